use serde::{ser::Serializer, Serialize};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Tauri(#[from] tauri::Error),
    #[error("store is not loaded")]
    StoreNotLoaded,
    #[error("unknown product identifier: {0}")]
    UnknownProduct(String),
    #[error("a purchase is already in flight")]
    PurchaseInFlight,
    #[error("a restore is already in flight")]
    RestoreInFlight,
    #[error("store gateway error: {0}")]
    Gateway(String),
}

impl Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}
