//! Shared application state.
//!
//! Handlers see trait objects, never MongoDB: the same state type is built
//! over the real collections in `main` and over in-memory fakes in tests.

use std::sync::Arc;

use bottega_core::receipt::ReceiptCalculator;
use bottega_store::{
    MongoStore, NewsletterStore, ProductStore, ReceiptStore, UserStore,
};

use crate::clients::{AssistantClient, GeocodingClient};
use crate::config::AppConfig;

/// Shared application state, cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductStore>,
    pub receipts: Arc<dyn ReceiptStore>,
    pub users: Arc<dyn UserStore>,
    pub newsletter: Arc<dyn NewsletterStore>,
    pub calculator: Arc<ReceiptCalculator>,
    pub geocoder: Option<GeocodingClient>,
    pub assistant: Option<AssistantClient>,
}

impl AppState {
    /// Builds state over explicit collaborators (used by tests with fakes).
    pub fn new(
        products: Arc<dyn ProductStore>,
        receipts: Arc<dyn ReceiptStore>,
        users: Arc<dyn UserStore>,
        newsletter: Arc<dyn NewsletterStore>,
        calculator: ReceiptCalculator,
    ) -> Self {
        AppState {
            products,
            receipts,
            users,
            newsletter,
            calculator: Arc::new(calculator),
            geocoder: None,
            assistant: None,
        }
    }

    /// Builds production state over a connected MongoDB client.
    pub fn from_mongo(store: &MongoStore, config: &AppConfig) -> Result<Self, reqwest::Error> {
        let geocoder = Some(GeocodingClient::new(&config.geocoding_url)?);
        let assistant = config
            .gemini_api_key
            .as_deref()
            .map(|key| AssistantClient::new(key, &config.gemini_model))
            .transpose()?;

        Ok(AppState {
            products: Arc::new(store.products()),
            receipts: Arc::new(store.receipts()),
            users: Arc::new(store.users()),
            newsletter: Arc::new(store.newsletter()),
            calculator: Arc::new(ReceiptCalculator::new(config.tax_table.clone())),
            geocoder,
            assistant,
        })
    }

    /// Attaches a geocoding client (tests inject fakes via the base URL).
    pub fn with_geocoder(mut self, geocoder: GeocodingClient) -> Self {
        self.geocoder = Some(geocoder);
        self
    }

    /// Attaches an assistant client.
    pub fn with_assistant(mut self, assistant: AssistantClient) -> Self {
        self.assistant = Some(assistant);
        self
    }
}
