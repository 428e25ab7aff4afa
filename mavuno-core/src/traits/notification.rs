/// Best-effort outbound notification seam (SMS in production).
///
/// Failures are reported as `false` and must never fail the calling
/// operation.
pub trait NotificationSender: Send + Sync {
    fn notify(&self, phone_number: &str, message: &str) -> bool;
}
