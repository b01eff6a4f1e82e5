use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub product_id: String,
    pub title: String,
    pub description: String,
    pub price_amount_micros: i64,
    pub price_currency_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_price: Option<String>,
}

impl Product {
    /// Display price for this product, preferring the string the platform
    /// already localized for the storefront's region.
    pub fn localized_price(&self) -> String {
        match &self.formatted_price {
            Some(formatted) => formatted.clone(),
            None => {
                let units = self.price_amount_micros / 1_000_000;
                let cents = (self.price_amount_micros % 1_000_000).abs() / 10_000;
                format!("{}.{:02} {}", units, cents, self.price_currency_code)
            }
        }
    }
}

/// Outcome of one product-metadata fetch: the products the platform
/// recognized plus the identifiers it rejected.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQueryResponse {
    pub products: Vec<Product>,
    #[serde(default)]
    pub invalid_identifiers: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub transaction_id: String,
    pub product_id: String,
    pub purchase_time: i64,
    /// Set on restored transactions; points at the original purchase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_transaction_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DownloadState {
    Waiting = 0,
    Active = 1,
    Paused = 2,
    Finished = 3,
    Failed = 4,
    Cancelled = 5,
}

impl Serialize for DownloadState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(*self as i32)
    }
}

impl<'de> Deserialize<'de> for DownloadState {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = i32::deserialize(deserializer)?;
        match value {
            0 => Ok(DownloadState::Waiting),
            1 => Ok(DownloadState::Active),
            2 => Ok(DownloadState::Paused),
            3 => Ok(DownloadState::Finished),
            4 => Ok(DownloadState::Failed),
            5 => Ok(DownloadState::Cancelled),
            _ => Err(serde::de::Error::custom(format!(
                "Invalid download state: {value}"
            ))),
        }
    }
}

/// Content-delivery artifact tied to a completed transaction. The platform
/// owns its lifecycle; the plugin only forwards update notifications.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Download {
    pub product_id: String,
    pub transaction_id: String,
    pub state: DownloadState,
    pub progress: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_remaining: Option<f64>,
}

/// Payload of the product-request-response event.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponseEvent {
    pub product_ids: Vec<String>,
    pub invalid_identifiers: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStatusResponse {
    pub is_store_available: bool,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProductRequest {
    pub product_id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProductResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyProductRequest {
    pub product_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(formatted: Option<&str>) -> Product {
        Product {
            product_id: "pro_unlock".into(),
            title: "Pro Unlock".into(),
            description: "Unlocks everything".into(),
            price_amount_micros: 4_990_000,
            price_currency_code: "USD".into(),
            formatted_price: formatted.map(Into::into),
        }
    }

    #[test]
    fn localized_price_prefers_platform_formatting() {
        assert_eq!(product(Some("$4.99")).localized_price(), "$4.99");
    }

    #[test]
    fn localized_price_falls_back_to_micros() {
        assert_eq!(product(None).localized_price(), "4.99 USD");
    }

    #[test]
    fn download_state_round_trips_as_integer() {
        let json = serde_json::to_string(&DownloadState::Finished).unwrap();
        assert_eq!(json, "3");
        let state: DownloadState = serde_json::from_str("1").unwrap();
        assert_eq!(state, DownloadState::Active);
        assert!(serde_json::from_str::<DownloadState>("9").is_err());
    }
}
