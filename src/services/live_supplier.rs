// src/services/live_supplier.rs
// DOCUMENTATION: Generative-AI backed supplier
// PURPOSE: Ask the model for candidates and itineraries, normalize its answer,
// fall back to sample data on any failure

use crate::config::SupplierMode;
use crate::errors::TripsError;
use crate::models::{
    AccommodationOption, GeoLocation, ItemKind, ItineraryItem, TransportMode, TransportOption,
};
use crate::services::gemini_client::{
    candidates_prompt, candidates_schema, itinerary_prompt, itinerary_schema,
};
use crate::services::{
    mock_itinerary, GeminiClient, ItineraryRequest, ItinerarySupplier, PlaceCandidate,
};
use async_trait::async_trait;
use rand::Rng;
use serde::Deserialize;

/// Reference point the synthetic coordinates are scattered around
pub const REFERENCE_LAT: f64 = 35.6;
pub const REFERENCE_LNG: f64 = 139.7;
const COORDINATE_SPREAD: f64 = 0.1;

/// Supplier backed by GeminiClient
pub struct LiveSupplier {
    client: GeminiClient,
}

impl LiveSupplier {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    async fn request_candidates(
        &self,
        destination: &str,
        budget: f64,
    ) -> Result<Vec<PlaceCandidate>, TripsError> {
        let text = self
            .client
            .generate_json(&candidates_prompt(destination, budget), &candidates_schema())
            .await?;
        parse_candidates(&text)
    }

    async fn request_itinerary(
        &self,
        request: &ItineraryRequest,
    ) -> Result<Vec<RawItineraryItem>, TripsError> {
        let prompt = itinerary_prompt(
            &request.destination,
            request.days,
            &request.selected_places,
            &request.notes,
        );
        let text = self.client.generate_json(&prompt, &itinerary_schema()).await?;
        parse_itinerary(&text)
    }
}

#[async_trait]
impl ItinerarySupplier for LiveSupplier {
    async fn fetch_place_candidates(&self, destination: &str, budget: f64) -> Vec<PlaceCandidate> {
        match self.request_candidates(destination, budget).await {
            Ok(candidates) => {
                log::info!(
                    "{} suggested {} places for {}",
                    self.client.model(),
                    candidates.len(),
                    destination
                );
                candidates
            }
            Err(e) => {
                log::error!("Candidate request for {} failed: {}", destination, e);
                Vec::new()
            }
        }
    }

    async fn build_itinerary(&self, request: &ItineraryRequest) -> Vec<ItineraryItem> {
        match self.request_itinerary(request).await {
            Ok(raw) => normalize_itinerary(&request.destination, raw),
            Err(e) => {
                log::error!(
                    "Itinerary request for {} failed, using sample itinerary: {}",
                    request.destination,
                    e
                );
                mock_itinerary(&request.destination, &request.selected_places)
            }
        }
    }

    fn mode(&self) -> SupplierMode {
        SupplierMode::Live
    }
}

/// Itinerary item as produced by the model
/// DOCUMENTATION: Everything but kind and title is optional
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItineraryItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: Option<f64>,
    pub cost: Option<f64>,
    pub transport_type: Option<String>,
    pub transport_options: Option<Vec<RawTransportOption>>,
    pub accommodation_options: Option<Vec<RawAccommodationOption>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransportOption {
    #[serde(rename = "type")]
    pub mode: Option<String>,
    pub duration_minutes: Option<f64>,
    pub cost: Option<f64>,
    #[serde(default)]
    pub recommended: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAccommodationOption {
    pub name: String,
    #[serde(default)]
    pub price_per_night: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub recommended: bool,
}

pub fn parse_candidates(text: &str) -> Result<Vec<PlaceCandidate>, TripsError> {
    serde_json::from_str(text)
        .map_err(|e| TripsError::ExternalApiError(format!("Invalid candidates JSON: {}", e)))
}

pub fn parse_itinerary(text: &str) -> Result<Vec<RawItineraryItem>, TripsError> {
    serde_json::from_str(text)
        .map_err(|e| TripsError::ExternalApiError(format!("Invalid itinerary JSON: {}", e)))
}

/// Image derived from an accommodation name
pub fn accommodation_image(name: &str) -> String {
    let seed: String = name.chars().filter(|c| !c.is_whitespace()).collect();
    format!("https://picsum.photos/seed/{}/300/200", seed)
}

/// Options used when the model returns an accommodation block without any
pub fn fallback_stays(destination: &str) -> Vec<RawAccommodationOption> {
    let option = |name: String, price: f64, rating: f64, address: &str, recommended: bool| {
        RawAccommodationOption {
            name,
            price_per_night: price,
            rating,
            address: address.to_string(),
            recommended,
        }
    };

    vec![
        option(format!("{} Central Hotel", destination), 120.0, 4.5, "City Center", true),
        option("Budget Stay Hostel".to_string(), 45.0, 3.8, "Old Town", false),
        option("Comfort Inn".to_string(), 85.0, 4.0, "Downtown", false),
    ]
}

/// Turn the model's answer into renderable items
/// DOCUMENTATION: Every item gets a fresh id and a coordinate near the reference
/// point; empty accommodation blocks are backfilled; option images are derived
/// from names. Items of unknown kind are dropped.
pub fn normalize_itinerary(destination: &str, raw: Vec<RawItineraryItem>) -> Vec<ItineraryItem> {
    let mut rng = rand::rng();

    raw.into_iter()
        .filter_map(|item| {
            let kind = match normalize_kind(destination, &item) {
                Some(kind) => kind,
                None => {
                    log::warn!("Dropping itinerary item of unknown kind: {}", item.kind);
                    return None;
                }
            };

            let location = GeoLocation {
                lat: REFERENCE_LAT + rng.random::<f64>() * COORDINATE_SPREAD,
                lng: REFERENCE_LNG + rng.random::<f64>() * COORDINATE_SPREAD,
            };

            let mut normalized = ItineraryItem::new(kind, item.title).with_location(location);
            normalized.description = item.description;
            normalized.duration_minutes = item.duration_minutes.map(to_minutes);
            normalized.cost = item.cost;
            Some(normalized)
        })
        .collect()
}

fn normalize_kind(destination: &str, item: &RawItineraryItem) -> Option<ItemKind> {
    match item.kind.trim().to_lowercase().as_str() {
        "place" => Some(ItemKind::Place),
        "lunch" => Some(ItemKind::Lunch),
        "transport" => {
            let options: Vec<TransportOption> = item
                .transport_options
                .iter()
                .flatten()
                .filter_map(|opt| {
                    Some(TransportOption {
                        mode: TransportMode::from_name(opt.mode.as_deref()?)?,
                        duration_minutes: opt.duration_minutes.map(to_minutes).unwrap_or(0),
                        cost: opt.cost.unwrap_or(0.0),
                        recommended: opt.recommended,
                    })
                })
                .collect();

            let mode = item
                .transport_type
                .as_deref()
                .and_then(TransportMode::from_name)
                .or_else(|| options.iter().find(|o| o.recommended).map(|o| o.mode))
                .or_else(|| options.first().map(|o| o.mode))
                .unwrap_or(TransportMode::Taxi);

            Some(ItemKind::Transport { mode, options })
        }
        "accommodation" => {
            let raw_options = match &item.accommodation_options {
                Some(options) if !options.is_empty() => options.clone(),
                _ => fallback_stays(destination),
            };

            let options = raw_options
                .into_iter()
                .map(|opt| AccommodationOption {
                    image: accommodation_image(&opt.name),
                    name: opt.name,
                    price_per_night: opt.price_per_night,
                    rating: opt.rating,
                    address: opt.address,
                    recommended: opt.recommended,
                })
                .collect();

            Some(ItemKind::Accommodation { options })
        }
        _ => None,
    }
}

fn to_minutes(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round() as u32
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const MODEL_OUTPUT: &str = r#"[
        {"type": "place", "title": "Senso-ji", "description": "Temple", "durationMinutes": 90, "cost": 0},
        {"type": "transport", "title": "To Skytree",
         "transportOptions": [
            {"type": "walk", "durationMinutes": 25, "cost": 0, "recommended": false},
            {"type": "metro", "durationMinutes": 8, "cost": 2.5, "recommended": true}
         ]},
        {"type": "accommodation", "title": "Night 1"},
        {"type": "accommodation", "title": "Night 2", "accommodationOptions": [
            {"name": "Park Hotel Tokyo", "pricePerNight": 180, "rating": 4.6, "address": "Shiodome", "recommended": true}
        ]},
        {"type": "note", "title": "Buy a notebook"}
    ]"#;

    fn normalized() -> Vec<ItineraryItem> {
        normalize_itinerary("Tokyo", parse_itinerary(MODEL_OUTPUT).unwrap())
    }

    #[test]
    fn test_unknown_kinds_dropped() {
        let items = normalized();
        assert_eq!(items.len(), 4);
        assert!(items.iter().all(|i| i.title != "Buy a notebook"));
    }

    #[test]
    fn test_fresh_ids_and_reference_coordinates() {
        let items = normalized();
        for item in &items {
            assert!(!item.id.is_empty());
            let loc = item.location.unwrap();
            assert!(loc.lat >= REFERENCE_LAT && loc.lat < REFERENCE_LAT + COORDINATE_SPREAD);
            assert!(loc.lng >= REFERENCE_LNG && loc.lng < REFERENCE_LNG + COORDINATE_SPREAD);
        }
        assert_ne!(items[0].id, items[1].id);
        assert_eq!(items[0].duration_minutes, Some(90));
    }

    #[test]
    fn test_transport_mode_from_recommended_option() {
        match &normalized()[1].kind {
            ItemKind::Transport { mode, options } => {
                assert_eq!(*mode, TransportMode::Metro);
                assert_eq!(options.len(), 2);
            }
            other => panic!("expected transport, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_accommodation_backfilled() {
        match &normalized()[2].kind {
            ItemKind::Accommodation { options } => {
                assert_eq!(options.len(), 3);
                assert_eq!(options[0].name, "Tokyo Central Hotel");
                assert!(options[0].recommended);
                assert_eq!(
                    options[1].image,
                    "https://picsum.photos/seed/BudgetStayHostel/300/200"
                );
            }
            other => panic!("expected accommodation, got {:?}", other),
        }
    }

    #[test]
    fn test_accommodation_images_derived_from_name() {
        match &normalized()[3].kind {
            ItemKind::Accommodation { options } => {
                assert_eq!(options.len(), 1);
                assert_eq!(
                    options[0].image,
                    "https://picsum.photos/seed/ParkHotelTokyo/300/200"
                );
            }
            other => panic!("expected accommodation, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_title_is_parse_error() {
        assert!(parse_itinerary(r#"[{"type": "place"}]"#).is_err());
        assert!(parse_candidates("not json").is_err());
    }

    fn unreachable_supplier() -> LiveSupplier {
        LiveSupplier::new(GeminiClient::new(
            "key".to_string(),
            "http://127.0.0.1:1".to_string(),
            "gemini-2.5-flash".to_string(),
            Duration::from_secs(2),
        ))
    }

    #[tokio::test]
    async fn test_failed_candidates_become_empty_list() {
        let candidates = unreachable_supplier()
            .fetch_place_candidates("Tokyo", 1000.0)
            .await;
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn test_failed_itinerary_falls_back_to_mock() {
        let request = ItineraryRequest {
            destination: "Tokyo".to_string(),
            days: 3,
            budget: 1000.0,
            selected_places: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            notes: vec![],
        };
        let items = unreachable_supplier().build_itinerary(&request).await;
        let kinds: Vec<&str> = items.iter().map(|i| i.kind.name()).collect();
        assert_eq!(
            kinds,
            vec!["place", "transport", "place", "transport", "place", "accommodation"]
        );
    }
}
