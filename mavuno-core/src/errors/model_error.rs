/// Construction-time validation errors for domain models.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("latitude {lat} out of range [-90, 90]")]
    InvalidLatitude { lat: f64 },

    #[error("longitude {lng} out of range [-180, 180]")]
    InvalidLongitude { lng: f64 },
}
