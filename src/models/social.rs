// src/models/social.rs
// DOCUMENTATION: Social feed and profile data structures
// PURPOSE: Published plan summaries, traveler markers and the user profile

use serde::{Deserialize, Serialize};

/// Reference to a photo (URL)
pub type PhotoRef = String;

/// A published plan summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialPost {
    pub id: String,
    pub author_id: String,
    pub author_name: String,
    pub author_avatar: String,
    /// Primary image
    pub image: PhotoRef,
    #[serde(default)]
    pub images: Vec<PhotoRef>,
    pub caption: String,
    pub likes: u32,
    pub comments: u32,
    /// Linked plan that can be imported
    pub trip_plan_id: Option<String>,
}

/// Simulated traveler shown on the live map
/// DOCUMENTATION: map_x/map_y are positions inside the 100x100 map view box,
/// drawn once when live mode is switched on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyTraveler {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub avatar: String,
    pub map_x: f64,
    pub map_y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub bio: String,
    pub followers: u32,
    pub following: u32,
    pub trips_count: u32,
}
