use tauri::{command, AppHandle, Runtime};

use crate::models::*;
use crate::{Result, StorefrontExt};

#[command]
pub(crate) async fn load_store<R: Runtime>(app: AppHandle<R>) -> Result<()> {
    app.storefront().load_store()
}

#[command]
pub(crate) async fn store_status<R: Runtime>(app: AppHandle<R>) -> Result<StoreStatusResponse> {
    Ok(StoreStatusResponse {
        is_store_available: app.storefront().is_store_available(),
    })
}

#[command]
pub(crate) async fn get_product<R: Runtime>(
    app: AppHandle<R>,
    payload: GetProductRequest,
) -> Result<GetProductResponse> {
    Ok(GetProductResponse {
        product: app.storefront().product_for_identifier(&payload.product_id),
    })
}

#[command]
pub(crate) async fn buy_product<R: Runtime>(
    app: AppHandle<R>,
    payload: BuyProductRequest,
) -> Result<()> {
    app.storefront().buy_product(&payload.product_id)
}

#[command]
pub(crate) async fn restore_purchases<R: Runtime>(app: AppHandle<R>) -> Result<()> {
    app.storefront().restore_purchased_products()
}
