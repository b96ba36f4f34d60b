// src/models/bucket.rs
// DOCUMENTATION: Bucket list (wish-list) entries
// PURPOSE: User-authored places and reminders, independent of any plan

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Whether a bucket entry names a place or is a free-form reminder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketKind {
    Place,
    Note,
}

/// A wish-list entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketItem {
    pub id: String,
    pub text: String,
    pub is_completed: bool,
    #[serde(rename = "type")]
    pub kind: BucketKind,
    /// Associated city or area
    pub location: Option<String>,
}

impl BucketItem {
    /// Approximate match between the entry's location and a destination
    /// DOCUMENTATION: Case-insensitive substring containment in either direction.
    /// Entries without a location (or with an empty one) never match.
    pub fn matches_destination(&self, destination: &str) -> bool {
        let location = match self.location.as_deref() {
            Some(location) if !location.is_empty() => location.to_lowercase(),
            _ => return false,
        };
        let destination = destination.to_lowercase();

        location.contains(&destination) || destination.contains(&location)
    }
}

/// Request DTO for adding a bucket entry
/// DOCUMENTATION: Body of POST /bucket
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddBucketItemRequest {
    #[validate(length(min = 1, max = 255))]
    pub text: String,

    #[validate(length(min = 1, max = 255))]
    pub location: String,

    #[serde(rename = "type", default = "default_bucket_kind")]
    pub kind: BucketKind,
}

fn default_bucket_kind() -> BucketKind {
    BucketKind::Place
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(location: Option<&str>) -> BucketItem {
        BucketItem {
            id: "1".to_string(),
            text: "Visit Shibuya Crossing".to_string(),
            is_completed: false,
            kind: BucketKind::Place,
            location: location.map(str::to_string),
        }
    }

    #[test]
    fn test_matches_both_directions() {
        assert!(item(Some("Tokyo")).matches_destination("tokyo"));
        assert!(item(Some("Tokyo")).matches_destination("Tokyo, Japan"));
        assert!(item(Some("Shibuya, Tokyo")).matches_destination("TOKYO"));
        assert!(!item(Some("Kyoto")).matches_destination("Tokyo"));
    }

    #[test]
    fn test_missing_location_never_matches() {
        assert!(!item(None).matches_destination("Tokyo"));
        assert!(!item(Some("")).matches_destination("Tokyo"));
    }

    #[test]
    fn test_add_request_validation() {
        let ok = AddBucketItemRequest {
            text: "Eat ramen".to_string(),
            location: "Tokyo".to_string(),
            kind: BucketKind::Note,
        };
        assert!(ok.validate().is_ok());

        let missing_location = AddBucketItemRequest {
            location: String::new(),
            ..ok
        };
        assert!(missing_location.validate().is_err());
    }

    #[test]
    fn test_add_request_defaults_to_place() {
        let req: AddBucketItemRequest =
            serde_json::from_str(r#"{"text":"Tower","location":"Paris"}"#).unwrap();
        assert_eq!(req.kind, BucketKind::Place);
    }
}
