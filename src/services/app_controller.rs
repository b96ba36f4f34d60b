// src/services/app_controller.rs
// DOCUMENTATION: Root application controller
// PURPOSE: Single source of truth for route, plans, bucket list and social feed.
// Every page-level mutation goes through one of its methods.

use crate::db::AuthRepository;
use crate::errors::TripsError;
use crate::models::{
    cover_image_for, generate_id, total_cost, AddBucketItemRequest, BucketItem, BucketKind,
    NearbyTraveler, PhotoRef, PlanStatus, SocialPost, TripPlan, UserProfile,
};
use crate::services::map_visualizer::{random_marker_position, render_route_map, RouteMap};
use crate::services::PlanCreator;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Page currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppRoute {
    Auth,
    Home,
    Create,
    PlanDetail,
    Social,
    Profile,
}

/// Dashboard view model
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub upcoming: Vec<TripPlan>,
    pub completed: Vec<TripPlan>,
    pub bucket_list: Vec<BucketItem>,
}

/// Session summary
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub authenticated: bool,
    pub route: AppRoute,
    pub active_plan_id: Option<String>,
}

/// Application state plus intention-revealing mutations
pub struct AppController {
    auth: AuthRepository,
    authenticated: bool,
    route: AppRoute,
    plans: Vec<TripPlan>,
    active_plan_id: Option<String>,
    bucket_list: Vec<BucketItem>,
    feed: Vec<SocialPost>,
    new_social_post: Option<SocialPost>,
    nearby_travelers: Vec<NearbyTraveler>,
    creator: PlanCreator,
}

impl AppController {
    /// Build the controller, restoring the session from the persisted flag
    pub fn new(auth: AuthRepository) -> Self {
        let authenticated = auth.is_set();
        log::info!(
            "Restoring session: {}",
            if authenticated { "signed in" } else { "signed out" }
        );

        Self {
            auth,
            authenticated,
            route: if authenticated { AppRoute::Home } else { AppRoute::Auth },
            plans: Vec::new(),
            active_plan_id: None,
            bucket_list: seed_bucket_list(),
            feed: seed_feed(),
            new_social_post: None,
            nearby_travelers: Vec::new(),
            creator: PlanCreator::new(),
        }
    }

    pub fn ensure_authenticated(&self) -> Result<(), TripsError> {
        if self.authenticated {
            Ok(())
        } else {
            Err(TripsError::Unauthorized)
        }
    }

    pub fn session(&self) -> SessionView {
        SessionView {
            authenticated: self.authenticated,
            route: self.route,
            active_plan_id: self.active_plan_id.clone(),
        }
    }

    pub fn route(&self) -> AppRoute {
        self.route
    }

    pub fn plans(&self) -> &[TripPlan] {
        &self.plans
    }

    pub fn bucket_list(&self) -> &[BucketItem] {
        &self.bucket_list
    }

    pub fn creator(&self) -> &PlanCreator {
        &self.creator
    }

    pub fn creator_mut(&mut self) -> &mut PlanCreator {
        &mut self.creator
    }

    pub fn new_social_post(&self) -> Option<&SocialPost> {
        self.new_social_post.as_ref()
    }

    // --- Session ---

    pub fn login(&mut self) -> Result<(), TripsError> {
        self.auth.set()?;
        self.authenticated = true;
        self.route = AppRoute::Home;
        log::info!("Signed in");
        Ok(())
    }

    pub fn logout(&mut self) -> Result<(), TripsError> {
        self.auth.clear()?;
        self.authenticated = false;
        self.route = AppRoute::Auth;
        log::info!("Signed out");
        Ok(())
    }

    /// Switch page
    /// DOCUMENTATION: Plan detail needs an active plan; signed-out users stay on Auth
    pub fn navigate(&mut self, route: AppRoute) -> Result<(), TripsError> {
        if route != AppRoute::Auth {
            self.ensure_authenticated()?;
        }
        if route == AppRoute::PlanDetail && self.active_plan_id.is_none() {
            return Err(TripsError::InvalidState("no plan selected".to_string()));
        }
        self.route = route;
        Ok(())
    }

    // --- Bucket list ---

    pub fn add_bucket_item(&mut self, req: AddBucketItemRequest) -> Result<BucketItem, TripsError> {
        self.ensure_authenticated()?;

        let item = BucketItem {
            id: generate_id(),
            text: req.text,
            is_completed: false,
            kind: req.kind,
            location: Some(req.location),
        };
        self.bucket_list.push(item.clone());
        Ok(item)
    }

    pub fn delete_bucket_item(&mut self, id: &str) -> Result<(), TripsError> {
        self.ensure_authenticated()?;

        let before = self.bucket_list.len();
        self.bucket_list.retain(|item| item.id != id);
        if self.bucket_list.len() == before {
            return Err(TripsError::NotFound(format!("bucket item {}", id)));
        }
        Ok(())
    }

    pub fn toggle_bucket_item(&mut self, id: &str) -> Result<BucketItem, TripsError> {
        self.ensure_authenticated()?;

        let item = self
            .bucket_list
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| TripsError::NotFound(format!("bucket item {}", id)))?;
        item.is_completed = !item.is_completed;
        Ok(item.clone())
    }

    // --- Plans ---

    /// Add a freshly created plan (newest first) and go back to the dashboard
    pub fn save_plan(&mut self, plan: TripPlan) -> Result<(), TripsError> {
        self.ensure_authenticated()?;

        log::info!(
            "Saved plan {} for {} ({} items, estimated cost {:.2})",
            plan.id,
            plan.destination,
            plan.items.len(),
            total_cost(&plan.items)
        );
        self.plans.insert(0, plan);
        self.route = AppRoute::Home;
        Ok(())
    }

    pub fn plan(&self, plan_id: &str) -> Result<&TripPlan, TripsError> {
        self.plans
            .iter()
            .find(|plan| plan.id == plan_id)
            .ok_or_else(|| TripsError::NotFound(format!("plan {}", plan_id)))
    }

    pub fn active_plan(&self) -> Option<&TripPlan> {
        let id = self.active_plan_id.as_deref()?;
        self.plans.iter().find(|plan| plan.id == id)
    }

    /// Open a plan in the detail page
    pub fn select_plan(&mut self, plan_id: &str) -> Result<&TripPlan, TripsError> {
        self.ensure_authenticated()?;
        self.plan(plan_id)?;

        if self.active_plan_id.as_deref() != Some(plan_id) {
            self.nearby_travelers.clear();
        }
        self.active_plan_id = Some(plan_id.to_string());
        self.route = AppRoute::PlanDetail;
        self.plan(plan_id)
    }

    fn replace_plan(&mut self, updated: TripPlan) {
        for plan in self.plans.iter_mut() {
            if plan.id == updated.id {
                *plan = updated;
                return;
            }
        }
    }

    /// Attach a photo to an item of the active plan
    pub fn attach_photo(&mut self, item_id: &str, photo: PhotoRef) -> Result<TripPlan, TripsError> {
        self.ensure_authenticated()?;

        let plan = self
            .active_plan()
            .ok_or_else(|| TripsError::InvalidState("no plan selected".to_string()))?;
        let updated = plan
            .with_photo(item_id, photo)
            .ok_or_else(|| TripsError::NotFound(format!("itinerary item {}", item_id)))?;

        self.replace_plan(updated.clone());
        Ok(updated)
    }

    pub fn complete_plan(&mut self, plan_id: &str) -> Result<TripPlan, TripsError> {
        self.ensure_authenticated()?;

        let mut updated = self.plan(plan_id)?.clone();
        updated.status = PlanStatus::Completed;
        self.replace_plan(updated.clone());
        Ok(updated)
    }

    /// Import the plan linked from a social post
    /// DOCUMENTATION: The link is cosmetic; a placeholder plan is created
    /// instead of fetching the referenced one
    pub fn import_plan(&mut self, post_id: &str) -> Result<TripPlan, TripsError> {
        self.ensure_authenticated()?;

        let post = self
            .feed
            .iter()
            .find(|post| post.id == post_id)
            .ok_or_else(|| TripsError::NotFound(format!("post {}", post_id)))?;
        let linked = post.trip_plan_id.clone().ok_or_else(|| {
            TripsError::InvalidInput(format!("post {} has no linked plan", post_id))
        })?;

        let imported = TripPlan {
            id: generate_id(),
            destination: "Imported Trip".to_string(),
            days: 5,
            budget: 2000.0,
            start_date: Utc::now(),
            items: Vec::new(),
            status: PlanStatus::Imported,
            cover_image: cover_image_for("import"),
            author_id: "other".to_string(),
            author_name: "Other User".to_string(),
        };

        log::info!("Imported plan {} from post {} (linked {})", imported.id, post_id, linked);
        self.plans.insert(0, imported.clone());
        self.route = AppRoute::Home;
        Ok(imported)
    }

    /// Publish a plan's photos as a social post
    pub fn share_plan_as_post(&mut self, plan_id: &str) -> Result<SocialPost, TripsError> {
        self.ensure_authenticated()?;

        let plan = self.plan(plan_id)?;
        let photos = plan.photos();
        let first = photos.first().cloned().ok_or_else(|| {
            TripsError::InvalidInput(
                "add some photos to your itinerary items first".to_string(),
            )
        })?;

        let post = SocialPost {
            id: generate_id(),
            author_id: "me".to_string(),
            author_name: "Alex Wanderer".to_string(),
            author_avatar: "https://picsum.photos/seed/me/200".to_string(),
            image: first,
            caption: format!(
                "Just completed my amazing trip to {}! Checked out {} spots.",
                plan.destination,
                plan.items.len()
            ),
            images: photos,
            likes: 0,
            comments: 0,
            trip_plan_id: Some(plan.id.clone()),
        };

        self.feed.insert(0, post.clone());
        self.new_social_post = Some(post.clone());
        self.route = AppRoute::Social;
        Ok(post)
    }

    // --- Live map ---

    /// Switch live traveler mode for the detail page
    /// DOCUMENTATION: Marker positions are drawn here, once, so they stay stable
    /// for the whole live session
    pub fn set_live_mode(&mut self, live: bool) -> Result<&[NearbyTraveler], TripsError> {
        self.ensure_authenticated()?;

        if live && self.active_plan().is_none() {
            return Err(TripsError::InvalidState("no plan selected".to_string()));
        }
        if !live {
            self.nearby_travelers.clear();
        } else if self.nearby_travelers.is_empty() {
            self.nearby_travelers = simulated_travelers();
        }
        Ok(self.nearby_travelers.as_slice())
    }

    pub fn is_live(&self) -> bool {
        !self.nearby_travelers.is_empty()
    }

    /// Map of a plan (travelers only shown for the active plan)
    pub fn plan_map(&self, plan_id: &str) -> Result<RouteMap, TripsError> {
        self.ensure_authenticated()?;

        let plan = self.plan(plan_id)?;
        let travelers: &[NearbyTraveler] = if self.active_plan_id.as_deref() == Some(plan_id) {
            &self.nearby_travelers
        } else {
            &[]
        };
        Ok(render_route_map(&plan.items, travelers))
    }

    // --- Views ---

    pub fn dashboard(&self) -> Result<Dashboard, TripsError> {
        self.ensure_authenticated()?;

        let (upcoming, completed): (Vec<TripPlan>, Vec<TripPlan>) = self
            .plans
            .iter()
            .cloned()
            .partition(|plan| plan.status.is_upcoming());

        Ok(Dashboard {
            upcoming,
            completed,
            bucket_list: self.bucket_list.clone(),
        })
    }

    pub fn feed(&self) -> Result<&[SocialPost], TripsError> {
        self.ensure_authenticated()?;
        Ok(self.feed.as_slice())
    }

    pub fn profile(&self) -> Result<UserProfile, TripsError> {
        self.ensure_authenticated()?;

        Ok(UserProfile {
            id: "me".to_string(),
            name: "Alex Wanderer".to_string(),
            avatar: "https://picsum.photos/seed/me/200".to_string(),
            bio: "Solo traveler collecting sunsets and street food.".to_string(),
            followers: 1200,
            following: 350,
            trips_count: self.plans.len() as u32,
        })
    }
}

fn seed_bucket_list() -> Vec<BucketItem> {
    vec![
        BucketItem {
            id: "1".to_string(),
            text: "Visit Shibuya Crossing".to_string(),
            is_completed: false,
            kind: BucketKind::Place,
            location: Some("Tokyo".to_string()),
        },
        BucketItem {
            id: "2".to_string(),
            text: "Buy a notebook".to_string(),
            is_completed: false,
            kind: BucketKind::Note,
            location: Some("Tokyo".to_string()),
        },
    ]
}

fn seed_feed() -> Vec<SocialPost> {
    vec![
        SocialPost {
            id: "1".to_string(),
            author_id: "u2".to_string(),
            author_name: "Sarah Jenkins".to_string(),
            author_avatar: "https://picsum.photos/seed/sarah/100".to_string(),
            image: "https://picsum.photos/seed/kyoto/600/600".to_string(),
            images: Vec::new(),
            caption: "Found this hidden gem in Kyoto! The generated plan was spot on.".to_string(),
            likes: 124,
            comments: 12,
            trip_plan_id: Some("plan_kyoto".to_string()),
        },
        SocialPost {
            id: "2".to_string(),
            author_id: "u3".to_string(),
            author_name: "Mike Solo".to_string(),
            author_avatar: "https://picsum.photos/seed/mike/100".to_string(),
            image: "https://picsum.photos/seed/iceland/600/600".to_string(),
            images: Vec::new(),
            caption: "Iceland solo trip. Cold but worth it. Check out my itinerary.".to_string(),
            likes: 89,
            comments: 5,
            trip_plan_id: Some("plan_iceland".to_string()),
        },
    ]
}

fn simulated_travelers() -> Vec<NearbyTraveler> {
    [
        ("t1", "Sophie", 35.0, 139.0),
        ("t2", "Jin", 35.1, 139.1),
        ("t3", "Marc", 35.2, 139.2),
        ("t4", "Ana", 35.15, 139.05),
        ("t5", "Leo", 35.05, 139.15),
    ]
    .into_iter()
    .map(|(id, name, lat, lng)| {
        let (map_x, map_y) = random_marker_position();
        NearbyTraveler {
            id: id.to_string(),
            name: name.to_string(),
            lat,
            lng,
            avatar: format!("https://picsum.photos/seed/{}/50", id),
            map_x,
            map_y,
        }
    })
    .collect()
}

/// Random photo for the "add photo" button when the caller sends none
pub fn random_photo() -> PhotoRef {
    format!("https://picsum.photos/seed/{}/300/200", generate_id())
}
