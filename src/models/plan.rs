// src/models/plan.rs
// DOCUMENTATION: Trip plan data structures
// PURPOSE: A named, dated, ordered itinerary owned by the in-memory plan list

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ItineraryItem, PhotoRef};

/// Lifecycle of a plan
/// DOCUMENTATION: planning -> upcoming/imported -> completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    Planning,
    Upcoming,
    Imported,
    Completed,
}

impl PlanStatus {
    /// Whether the dashboard lists the plan under upcoming adventures
    pub fn is_upcoming(&self) -> bool {
        !matches!(self, PlanStatus::Completed)
    }
}

/// Complete trip itinerary with metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPlan {
    pub id: String,
    pub destination: String,
    pub days: i32,
    pub budget: f64,
    pub start_date: DateTime<Utc>,
    pub items: Vec<ItineraryItem>,
    pub status: PlanStatus,
    pub cover_image: String,
    pub author_id: String,
    pub author_name: String,
}

impl TripPlan {
    /// Find an item of this plan by identifier
    pub fn item(&self, item_id: &str) -> Option<&ItineraryItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// All photos attached to the plan's items, in item order
    pub fn photos(&self) -> Vec<PhotoRef> {
        self.items
            .iter()
            .flat_map(|item| item.photos.iter().cloned())
            .collect()
    }

    /// Copy of the plan where one item got an extra photo
    /// DOCUMENTATION: Returns None when no item carries the identifier
    pub fn with_photo(&self, item_id: &str, photo: PhotoRef) -> Option<TripPlan> {
        self.item(item_id)?;

        let items = self
            .items
            .iter()
            .map(|item| {
                if item.id == item_id {
                    let mut updated = item.clone();
                    updated.photos.push(photo.clone());
                    updated
                } else {
                    item.clone()
                }
            })
            .collect();

        Some(TripPlan {
            items,
            ..self.clone()
        })
    }
}

/// Cover image for a destination
pub fn cover_image_for(destination: &str) -> String {
    format!("https://picsum.photos/seed/{}/400/300", destination)
}
