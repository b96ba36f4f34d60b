// src/models/itinerary.rs
// DOCUMENTATION: Itinerary item data structures
// PURPOSE: One scheduled step of a trip (visit, meal, transit leg, lodging block)

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generate a fresh identifier for plans, items and posts
/// DOCUMENTATION: Random token, unique enough for a single session
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Geographic coordinate attached to an item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub lat: f64,
    pub lng: f64,
}

impl From<GeoLocation> for geo_types::Coord<f64> {
    fn from(location: GeoLocation) -> Self {
        geo_types::Coord {
            x: location.lng,
            y: location.lat,
        }
    }
}

/// Means of transport between two places
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Walk,
    Taxi,
    Bus,
    Train,
    Metro,
    Helicopter,
    Flight,
}

impl TransportMode {
    /// Parse the lowercase wire name (as returned by the generative model)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "walk" => Some(Self::Walk),
            "taxi" | "car" => Some(Self::Taxi),
            "bus" => Some(Self::Bus),
            "train" => Some(Self::Train),
            "metro" => Some(Self::Metro),
            "helicopter" => Some(Self::Helicopter),
            "flight" => Some(Self::Flight),
            _ => None,
        }
    }
}

/// One alternative way to cover a transit leg
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportOption {
    #[serde(rename = "type")]
    pub mode: TransportMode,
    pub duration_minutes: u32,
    pub cost: f64,
    pub recommended: bool,
}

impl TransportOption {
    pub fn new(mode: TransportMode, duration_minutes: u32, cost: f64, recommended: bool) -> Self {
        Self {
            mode,
            duration_minutes,
            cost,
            recommended,
        }
    }
}

/// One lodging suggestion inside an accommodation block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccommodationOption {
    pub name: String,
    /// Image URL derived from the option name
    pub image: String,
    pub price_per_night: f64,
    /// 1-5 stars
    pub rating: f64,
    pub address: String,
    pub recommended: bool,
}

/// Kind of an itinerary item, carrying only the fields that kind needs
/// DOCUMENTATION: Serialized flat next to the common item fields with a "type" tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemKind {
    Place,
    Lunch,
    Transport {
        #[serde(rename = "transportType")]
        mode: TransportMode,
        #[serde(rename = "transportOptions", default)]
        options: Vec<TransportOption>,
    },
    Accommodation {
        #[serde(rename = "accommodationOptions", default)]
        options: Vec<AccommodationOption>,
    },
}

impl ItemKind {
    /// Wire name of the kind ("place", "lunch", ...)
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Place => "place",
            ItemKind::Lunch => "lunch",
            ItemKind::Transport { .. } => "transport",
            ItemKind::Accommodation { .. } => "accommodation",
        }
    }
}

/// One step in a plan
/// DOCUMENTATION: Identifier is unique within a plan; cost and duration
/// are optional and read as zero/unknown when absent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryItem {
    pub id: String,

    #[serde(flatten)]
    pub kind: ItemKind,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoLocation>,

    /// Photos the user attached to this step
    #[serde(default)]
    pub photos: Vec<String>,
}

impl ItineraryItem {
    /// Build an item with a fresh identifier and no optional fields set
    pub fn new(kind: ItemKind, title: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            kind,
            title: title.into(),
            description: None,
            duration_minutes: None,
            cost: None,
            location: None,
            photos: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn with_location(mut self, location: GeoLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn is_place(&self) -> bool {
        matches!(self.kind, ItemKind::Place)
    }

    pub fn is_transport(&self) -> bool {
        matches!(self.kind, ItemKind::Transport { .. })
    }

    pub fn is_accommodation(&self) -> bool {
        matches!(self.kind, ItemKind::Accommodation { .. })
    }
}

/// Sum of the known costs of a sequence (absent cost counts as zero)
pub fn total_cost(items: &[ItineraryItem]) -> f64 {
    items.iter().filter_map(|item| item.cost).sum()
}
