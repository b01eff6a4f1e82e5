use crate::models::{Download, Transaction};

/// Supplies the product catalog and unlocks content once a purchase or
/// restore completes. Passed to [`crate::Builder::new`] by the host app.
pub trait ContentProvider: Send + Sync {
    /// All product identifiers the app sells. Queried at the start of every
    /// store load.
    fn product_identifiers(&self) -> Vec<String>;

    /// Unlock the content behind the given product identifier. Called for
    /// purchased and restored transactions alike.
    fn provide_content(&self, product_id: &str);

    /// Hook for keeping the transaction for the app's own records.
    fn record_transaction(&self, _transaction: &Transaction) {}

    /// Hook for content that ships as a platform-managed download.
    fn download_updated(&self, _download: &Download) {}
}

/// Updates on-screen state when purchase and restore flows finish.
pub trait UiPresenter: Send + Sync {
    /// Label of the window a payment sheet should attach to.
    #[cfg(any(target_os = "macos", target_os = "windows", target_os = "linux"))]
    fn parent_window(&self) -> Option<String> {
        None
    }

    /// Called exactly once per purchase attempt, successful or not.
    fn transaction_did_finish(&self, success: bool);

    /// Called exactly once per restore attempt, successful or not.
    fn restored_transactions_did_finish(&self, _success: bool) {}
}
