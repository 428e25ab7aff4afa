mod claim_store;
mod earth_observation;
mod money_transfer;
mod notification;

pub use claim_store::ClaimStore;
pub use earth_observation::{BandSample, EarthObservationProvider, SceneMeta, SceneQuery};
pub use money_transfer::{MoneyTransferProvider, TransferOutcome, TransferRequest};
pub use notification::NotificationSender;
