use std::sync::Arc;

use tauri::{
    plugin::{Builder as PluginBuilder, TauriPlugin},
    Manager, Runtime,
};

pub use models::*;

mod commands;
mod delegates;
mod error;
mod gateway;
mod models;
mod storefront;

pub use delegates::{ContentProvider, UiPresenter};
pub use error::{Error, Result};
pub use gateway::{
    ProductQueryReply, PurchaseContext, StoreGateway, TransactionEvent, TransactionObserver,
    UnsupportedGateway,
};
pub use storefront::{Storefront, PRODUCT_RESPONSE_EVENT};

/// Extensions to [`tauri::App`], [`tauri::AppHandle`] and [`tauri::Window`] to access the storefront APIs.
pub trait StorefrontExt<R: Runtime> {
    fn storefront(&self) -> &Storefront<R>;
}

impl<R: Runtime, T: Manager<R>> crate::StorefrontExt<R> for T {
    fn storefront(&self) -> &Storefront<R> {
        self.state::<Storefront<R>>().inner()
    }
}

/// Configures the plugin with its collaborators.
///
/// The content provider and UI presenter are mandatory and passed up front;
/// the platform gateway defaults to [`UnsupportedGateway`] so the plugin
/// degrades to failure reports on platforms without a store backend.
pub struct Builder {
    content: Arc<dyn ContentProvider>,
    ui: Arc<dyn UiPresenter>,
    gateway: Option<Arc<dyn StoreGateway>>,
}

impl Builder {
    pub fn new(content: Arc<dyn ContentProvider>, ui: Arc<dyn UiPresenter>) -> Self {
        Self {
            content,
            ui,
            gateway: None,
        }
    }

    /// Supplies the platform purchase backend.
    pub fn gateway(mut self, gateway: Arc<dyn StoreGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// Builds the plugin for registration with the Tauri app.
    pub fn build<R: Runtime>(self) -> TauriPlugin<R> {
        PluginBuilder::new("storefront")
            .invoke_handler(tauri::generate_handler![
                commands::load_store,
                commands::store_status,
                commands::get_product,
                commands::buy_product,
                commands::restore_purchases,
            ])
            .setup(move |app, _api| {
                let gateway = self
                    .gateway
                    .unwrap_or_else(|| Arc::new(UnsupportedGateway::default()));
                let storefront = storefront::init(app, gateway, self.content, self.ui);
                app.manage(storefront);
                Ok(())
            })
            .build()
    }
}
