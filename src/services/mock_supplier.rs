// src/services/mock_supplier.rs
// DOCUMENTATION: Deterministic sample-data supplier
// PURPOSE: Used when no credential is configured and as the fallback of the live supplier

use crate::config::SupplierMode;
use crate::models::{
    AccommodationOption, GeoLocation, ItemKind, ItineraryItem, TransportMode, TransportOption,
};
use crate::services::{ItineraryRequest, ItinerarySupplier, PlaceCandidate};
use async_trait::async_trait;
use rand::Rng;

pub const MOCK_PLACE_DURATION: u32 = 90;
pub const MOCK_PLACE_COST: f64 = 15.0;

/// Supplier answering with fixed data
pub struct DeterministicMockSupplier;

#[async_trait]
impl ItinerarySupplier for DeterministicMockSupplier {
    async fn fetch_place_candidates(&self, destination: &str, _budget: f64) -> Vec<PlaceCandidate> {
        log::debug!("Returning sample candidates for {}", destination);
        sample_candidates()
    }

    async fn build_itinerary(&self, request: &ItineraryRequest) -> Vec<ItineraryItem> {
        log::warn!("No live supplier, returning sample itinerary for {}", request.destination);
        mock_itinerary(&request.destination, &request.selected_places)
    }

    fn mode(&self) -> SupplierMode {
        SupplierMode::Mock
    }
}

/// Fixed 4-entry catalog
pub fn sample_candidates() -> Vec<PlaceCandidate> {
    vec![
        PlaceCandidate::new("City Center Plaza", "The heart of the city."),
        PlaceCandidate::new("National Museum", "History and art."),
        PlaceCandidate::new("Central Park", "Green space for relaxation."),
        PlaceCandidate::new("Old Market", "Traditional shopping."),
    ]
}

/// Build the sample sequence for the selected places
/// DOCUMENTATION: place, then transport to the next place for every non-terminal
/// place; accommodation after every second place (index 2, 4, ...) and after the
/// last one, never twice in a row
pub fn mock_itinerary(destination: &str, places: &[String]) -> Vec<ItineraryItem> {
    let mut rng = rand::rng();
    let mut items = Vec::new();

    for (i, place) in places.iter().enumerate() {
        items.push(
            ItineraryItem::new(ItemKind::Place, place.clone())
                .with_description(format!("Visit to {}", place))
                .with_duration(MOCK_PLACE_DURATION)
                .with_cost(MOCK_PLACE_COST)
                .with_location(GeoLocation {
                    lat: 50.0 + rng.random::<f64>(),
                    lng: 50.0 + rng.random::<f64>(),
                }),
        );

        let is_last = i == places.len() - 1;

        if let Some(next) = places.get(i + 1) {
            items.push(mock_transport(next));
        }

        let wants_stay = (i > 0 && i % 2 == 0) || is_last;
        let just_stayed = items.last().is_some_and(ItineraryItem::is_accommodation);
        if wants_stay && !just_stayed {
            items.push(
                ItineraryItem::new(
                    ItemKind::Accommodation {
                        options: mock_stays(destination),
                    },
                    format!("Stay near {}", place),
                )
                .with_description("Recommended places to rest."),
            );
        }
    }

    items
}

fn mock_transport(next: &str) -> ItineraryItem {
    ItineraryItem::new(
        ItemKind::Transport {
            mode: TransportMode::Metro,
            options: vec![
                TransportOption::new(TransportMode::Metro, 20, 3.0, true),
                TransportOption::new(TransportMode::Taxi, 10, 25.0, false),
                TransportOption::new(TransportMode::Walk, 45, 0.0, false),
            ],
        },
        format!("Travel to {}", next),
    )
    .with_duration(20)
    .with_cost(3.0)
}

fn mock_stays(destination: &str) -> Vec<AccommodationOption> {
    vec![
        AccommodationOption {
            name: format!("{} Grand Hotel", destination),
            image: "https://picsum.photos/seed/h1/300/200".to_string(),
            price_per_night: 120.0,
            rating: 4.5,
            address: "Downtown".to_string(),
            recommended: true,
        },
        AccommodationOption {
            name: "Backpacker Hostel".to_string(),
            image: "https://picsum.photos/seed/h2/300/200".to_string(),
            price_per_night: 45.0,
            rating: 3.8,
            address: "Near Station".to_string(),
            recommended: false,
        },
        AccommodationOption {
            name: "City Inn".to_string(),
            image: "https://picsum.photos/seed/h3/300/200".to_string(),
            price_per_night: 85.0,
            rating: 4.0,
            address: "City Center".to_string(),
            recommended: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn kinds(items: &[ItineraryItem]) -> Vec<&'static str> {
        items.iter().map(|item| item.kind.name()).collect()
    }

    #[test]
    fn test_no_places_no_items() {
        assert!(mock_itinerary("Tokyo", &[]).is_empty());
    }

    #[test]
    fn test_single_place() {
        let items = mock_itinerary("Tokyo", &names(&["A"]));
        assert_eq!(kinds(&items), vec!["place", "accommodation"]);
    }

    #[test]
    fn test_three_places_sequence() {
        let items = mock_itinerary("Tokyo", &names(&["A", "B", "C"]));
        assert_eq!(
            kinds(&items),
            vec![
                "place",
                "transport",
                "place",
                "transport",
                "place",
                "accommodation"
            ]
        );
        assert_eq!(items[0].title, "A");
        assert_eq!(items[1].title, "Travel to B");
        assert_eq!(items[3].title, "Travel to C");
        // last place and every-second place coincide at index 2: one stay only
        assert_eq!(items[5].title, "Stay near C");
    }

    #[test]
    fn test_no_adjacent_transport_or_accommodation() {
        for n in 2..12 {
            let places: Vec<String> = (0..n).map(|i| format!("P{}", i)).collect();
            let items = mock_itinerary("X", &places);

            for pair in items.windows(2) {
                assert!(!(pair[0].is_transport() && pair[1].is_transport()), "n={}", n);
                assert!(
                    !(pair[0].is_accommodation() && pair[1].is_accommodation()),
                    "n={}",
                    n
                );
            }
            assert_eq!(items.iter().filter(|i| i.is_place()).count(), n);
            assert_eq!(items.iter().filter(|i| i.is_transport()).count(), n - 1);
            assert!(items.last().unwrap().is_accommodation());
        }
    }

    #[test]
    fn test_accommodation_after_even_indices_and_last() {
        let places = names(&["A", "B", "C", "D", "E", "F"]);
        let items = mock_itinerary("X", &places);

        let stays: Vec<&str> = items
            .iter()
            .filter(|i| i.is_accommodation())
            .map(|i| i.title.as_str())
            .collect();
        // index 2 and 4 by the every-second rule, index 5 as the last place
        assert_eq!(stays, vec!["Stay near C", "Stay near E", "Stay near F"]);
    }

    #[test]
    fn test_mock_constants() {
        let items = mock_itinerary("Lisbon", &names(&["A", "B"]));
        assert_eq!(items[0].duration_minutes, Some(90));
        assert_eq!(items[0].cost, Some(15.0));

        match &items[1].kind {
            ItemKind::Transport { mode, options } => {
                assert_eq!(*mode, TransportMode::Metro);
                assert_eq!(options.len(), 3);
                assert_eq!(options.iter().filter(|o| o.recommended).count(), 1);
                assert!(options[0].recommended);
            }
            other => panic!("expected transport, got {:?}", other),
        }

        match &items.last().unwrap().kind {
            ItemKind::Accommodation { options } => {
                assert_eq!(options.len(), 3);
                assert_eq!(options[0].name, "Lisbon Grand Hotel");
                assert_eq!(options.iter().filter(|o| o.recommended).count(), 1);
            }
            other => panic!("expected accommodation, got {:?}", other),
        }
    }

    #[test]
    fn test_ids_unique_within_sequence() {
        let items = mock_itinerary("X", &names(&["A", "B", "C", "D"]));
        let mut ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), items.len());
    }

    #[tokio::test]
    async fn test_supplier_candidates_non_empty() {
        let candidates = DeterministicMockSupplier
            .fetch_place_candidates("Anywhere", 500.0)
            .await;
        assert_eq!(candidates.len(), 4);
        assert_eq!(candidates[0].name, "City Center Plaza");
    }
}
