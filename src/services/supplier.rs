// src/services/supplier.rs
// DOCUMENTATION: Itinerary supplier abstraction
// PURPOSE: Source of place candidates and ordered itineraries, real or mock

use crate::config::{Config, SupplierMode};
use crate::models::ItineraryItem;
use crate::services::{DeterministicMockSupplier, GeminiClient, LiveSupplier};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A place suggested for a destination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl PlaceCandidate {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Inputs of an itinerary build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryRequest {
    pub destination: String,
    pub days: i32,
    pub budget: f64,
    pub selected_places: Vec<String>,
    pub notes: Vec<String>,
}

/// Supplier of candidate places and itineraries
/// DOCUMENTATION: Neither operation fails. Implementations absorb transport
/// and parse errors and answer with fallback data instead.
#[async_trait]
pub trait ItinerarySupplier: Send + Sync {
    /// Places worth visiting at a destination
    async fn fetch_place_candidates(&self, destination: &str, budget: f64) -> Vec<PlaceCandidate>;

    /// Ordered, renderable sequence for the selected places
    async fn build_itinerary(&self, request: &ItineraryRequest) -> Vec<ItineraryItem>;

    fn mode(&self) -> SupplierMode;
}

/// Pick the supplier once, from configuration
pub fn supplier_from_config(config: &Config) -> Arc<dyn ItinerarySupplier> {
    match config.supplier_mode() {
        SupplierMode::Live => {
            log::info!("Using live itinerary supplier (model: {})", config.gemini_model);
            let client = GeminiClient::new(
                config.gemini_api_key.clone(),
                config.gemini_base_url.clone(),
                config.gemini_model.clone(),
                config.supplier_timeout(),
            );
            Arc::new(LiveSupplier::new(client))
        }
        SupplierMode::Mock => {
            log::warn!("No generative-AI credential configured, using sample itineraries");
            Arc::new(DeterministicMockSupplier)
        }
    }
}
