use std::sync::{Arc, Mutex};

use crate::models::{Download, Product, ProductQueryResponse, Transaction};

/// One transaction-stream update from the platform backend.
#[derive(Debug, Clone)]
pub enum TransactionEvent {
    Purchased(Transaction),
    Failed(Transaction),
    Restored(Transaction),
    RestoreFinished { success: bool },
    DownloadUpdated(Download),
}

pub type TransactionObserver = Arc<dyn Fn(TransactionEvent) + Send + Sync>;

pub type ProductQueryReply = Box<dyn FnOnce(crate::Result<ProductQueryResponse>) + Send>;

/// Window context handed to the backend when a purchase needs to anchor
/// native UI to one of the app's windows.
#[derive(Debug, Clone, Default)]
pub struct PurchaseContext {
    pub parent_window: Option<String>,
}

/// Boundary to the platform purchase backend.
///
/// Implementations must uphold the transaction-stream contract: every
/// `purchase` call eventually produces exactly one `Purchased` or `Failed`
/// event, and every `restore_purchases` call produces zero or more
/// `Restored` events followed by exactly one `RestoreFinished`.
pub trait StoreGateway: Send + Sync {
    /// Registers the observer the transaction stream is delivered to.
    /// Called once, when the plugin is set up.
    fn register_observer(&self, observer: TransactionObserver);

    /// Asynchronously fetches product metadata for the given identifiers.
    /// The reply carries the recognized products and the identifiers the
    /// platform rejected.
    fn fetch_products(&self, identifiers: Vec<String>, reply: ProductQueryReply);

    /// Starts a purchase for a previously fetched product.
    fn purchase(&self, product: &Product, context: PurchaseContext);

    /// Starts restoration of previously purchased products.
    fn restore_purchases(&self);
}

/// Fallback backend for platforms without a store. Fetches fail and
/// purchase/restore resolve to failure events, so callers still observe
/// the usual one-completion-per-request behavior.
#[derive(Default)]
pub struct UnsupportedGateway {
    observer: Mutex<Option<TransactionObserver>>,
}

impl UnsupportedGateway {
    fn notify(&self, event: TransactionEvent) {
        let observer = self.observer.lock().unwrap().clone();
        if let Some(observer) = observer {
            observer(event);
        }
    }
}

impl StoreGateway for UnsupportedGateway {
    fn register_observer(&self, observer: TransactionObserver) {
        *self.observer.lock().unwrap() = Some(observer);
    }

    fn fetch_products(&self, _identifiers: Vec<String>, reply: ProductQueryReply) {
        reply(Err(crate::Error::Gateway(
            "in-app purchases are not supported on this platform".into(),
        )));
    }

    fn purchase(&self, product: &Product, _context: PurchaseContext) {
        self.notify(TransactionEvent::Failed(Transaction {
            transaction_id: String::new(),
            product_id: product.product_id.clone(),
            purchase_time: 0,
            original_transaction_id: None,
        }));
    }

    fn restore_purchases(&self) {
        self.notify(TransactionEvent::RestoreFinished { success: false });
    }
}
