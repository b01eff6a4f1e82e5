use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tauri::{AppHandle, Emitter, Runtime};
use tracing::{debug, warn};

use crate::delegates::{ContentProvider, UiPresenter};
use crate::gateway::{PurchaseContext, StoreGateway, TransactionEvent};
use crate::models::*;

/// Emitted once a product-metadata response has arrived and the product
/// cache can be queried.
pub const PRODUCT_RESPONSE_EVENT: &str = "storefront://product-request-response";

#[derive(Debug, Clone, Copy, PartialEq)]
enum LoadPhase {
    NotLoaded,
    Loading,
    Loaded,
}

struct StoreState {
    phase: LoadPhase,
    products: HashMap<String, Product>,
    purchase_in_flight: bool,
    restore_in_flight: bool,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            phase: LoadPhase::NotLoaded,
            products: HashMap::new(),
            purchase_in_flight: false,
            restore_in_flight: false,
        }
    }
}

pub(crate) fn init<R: Runtime>(
    app: &AppHandle<R>,
    gateway: Arc<dyn StoreGateway>,
    content: Arc<dyn ContentProvider>,
    ui: Arc<dyn UiPresenter>,
) -> Storefront<R> {
    let inner = Arc::new(StorefrontInner {
        app: app.clone(),
        gateway,
        content,
        ui,
        state: Mutex::new(StoreState::default()),
    });

    // The gateway outlives nothing here, but a weak observer keeps the
    // storefront droppable without deregistration support on the trait.
    let weak = Arc::downgrade(&inner);
    inner.gateway.register_observer(Arc::new(move |event| {
        if let Some(inner) = weak.upgrade() {
            inner.handle_transaction_event(event);
        }
    }));

    Storefront(inner)
}

/// Access to the storefront APIs.
///
/// One instance is created during plugin setup and owned by the Tauri app
/// as managed state; all mutation happens in response to gateway callbacks.
pub struct Storefront<R: Runtime>(Arc<StorefrontInner<R>>);

struct StorefrontInner<R: Runtime> {
    app: AppHandle<R>,
    gateway: Arc<dyn StoreGateway>,
    content: Arc<dyn ContentProvider>,
    ui: Arc<dyn UiPresenter>,
    state: Mutex<StoreState>,
}

impl<R: Runtime> Storefront<R> {
    /// Starts an asynchronous product-metadata fetch for the identifiers
    /// supplied by the content provider. Completion is observable through
    /// [`PRODUCT_RESPONSE_EVENT`] and [`Storefront::is_store_available`].
    /// A call while a load is already in flight is ignored.
    pub fn load_store(&self) -> crate::Result<()> {
        {
            let mut state = self.0.state.lock().unwrap();
            if state.phase == LoadPhase::Loading {
                debug!("store load already in flight, ignoring");
                return Ok(());
            }
            state.phase = LoadPhase::Loading;
        }

        let identifiers = self.0.content.product_identifiers();
        if identifiers.is_empty() {
            warn!("content provider supplied no product identifiers");
        }
        debug!(count = identifiers.len(), "requesting product metadata");

        let weak = Arc::downgrade(&self.0);
        self.0.gateway.fetch_products(
            identifiers,
            Box::new(move |result| {
                if let Some(inner) = weak.upgrade() {
                    inner.handle_product_response(result);
                }
            }),
        );
        Ok(())
    }

    /// True once a store load has completed successfully.
    pub fn is_store_available(&self) -> bool {
        self.0.state.lock().unwrap().phase == LoadPhase::Loaded
    }

    /// Looks up a previously fetched product. Unknown or not-yet-loaded
    /// identifiers yield `None`, never an error.
    pub fn product_for_identifier(&self, product_id: &str) -> Option<Product> {
        self.0.state.lock().unwrap().products.get(product_id).cloned()
    }

    /// Starts an asynchronous purchase. The UI presenter's
    /// `transaction_did_finish` is invoked exactly once when the platform
    /// resolves the transaction. Overlapping purchases are rejected.
    pub fn buy_product(&self, product_id: &str) -> crate::Result<()> {
        let product = {
            let mut state = self.0.state.lock().unwrap();
            if state.phase != LoadPhase::Loaded {
                return Err(crate::Error::StoreNotLoaded);
            }
            let product = state
                .products
                .get(product_id)
                .cloned()
                .ok_or_else(|| crate::Error::UnknownProduct(product_id.to_string()))?;
            if state.purchase_in_flight {
                return Err(crate::Error::PurchaseInFlight);
            }
            state.purchase_in_flight = true;
            product
        };

        debug!(product_id, "starting purchase");
        let context = self.0.purchase_context();
        self.0.gateway.purchase(&product, context);
        Ok(())
    }

    /// Starts asynchronous restoration of prior purchases. Each restored
    /// transaction unlocks its content; the terminal outcome reaches the
    /// UI presenter's `restored_transactions_did_finish` exactly once.
    /// Overlapping restores are rejected.
    pub fn restore_purchased_products(&self) -> crate::Result<()> {
        {
            let mut state = self.0.state.lock().unwrap();
            if state.restore_in_flight {
                return Err(crate::Error::RestoreInFlight);
            }
            state.restore_in_flight = true;
        }

        debug!("starting restore of purchased products");
        self.0.gateway.restore_purchases();
        Ok(())
    }
}

impl<R: Runtime> StorefrontInner<R> {
    fn purchase_context(&self) -> PurchaseContext {
        #[cfg(any(target_os = "macos", target_os = "windows", target_os = "linux"))]
        {
            PurchaseContext {
                parent_window: self.ui.parent_window(),
            }
        }
        #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
        {
            PurchaseContext::default()
        }
    }

    fn handle_product_response(&self, result: crate::Result<ProductQueryResponse>) {
        match result {
            Ok(response) => {
                if !response.invalid_identifiers.is_empty() {
                    warn!(
                        invalid = ?response.invalid_identifiers,
                        "platform rejected product identifiers"
                    );
                }
                let payload = ProductResponseEvent {
                    product_ids: response
                        .products
                        .iter()
                        .map(|product| product.product_id.clone())
                        .collect(),
                    invalid_identifiers: response.invalid_identifiers,
                };
                {
                    let mut state = self.state.lock().unwrap();
                    state.products = response
                        .products
                        .into_iter()
                        .map(|product| (product.product_id.clone(), product))
                        .collect();
                    state.phase = LoadPhase::Loaded;
                }
                debug!(products = payload.product_ids.len(), "store loaded");
                if let Err(err) = self.app.emit(PRODUCT_RESPONSE_EVENT, payload) {
                    warn!(%err, "failed to emit product response event");
                }
            }
            Err(err) => {
                warn!(%err, "store load failed");
                let mut state = self.state.lock().unwrap();
                // A failed reload keeps the previously loaded catalog usable.
                state.phase = if state.products.is_empty() {
                    LoadPhase::NotLoaded
                } else {
                    LoadPhase::Loaded
                };
            }
        }
    }

    fn handle_transaction_event(&self, event: TransactionEvent) {
        match event {
            TransactionEvent::Purchased(transaction) => {
                debug!(product_id = %transaction.product_id, "purchase completed");
                self.content.provide_content(&transaction.product_id);
                self.content.record_transaction(&transaction);
                self.finish_purchase(true);
            }
            TransactionEvent::Failed(transaction) => {
                debug!(product_id = %transaction.product_id, "purchase failed");
                self.finish_purchase(false);
            }
            TransactionEvent::Restored(transaction) => {
                debug!(product_id = %transaction.product_id, "transaction restored");
                self.content.provide_content(&transaction.product_id);
                self.content.record_transaction(&transaction);
            }
            TransactionEvent::RestoreFinished { success } => {
                self.state.lock().unwrap().restore_in_flight = false;
                self.ui.restored_transactions_did_finish(success);
            }
            TransactionEvent::DownloadUpdated(download) => {
                self.content.download_updated(&download);
            }
        }
    }

    fn finish_purchase(&self, success: bool) {
        self.state.lock().unwrap().purchase_in_flight = false;
        self.ui.transaction_did_finish(success);
    }
}
