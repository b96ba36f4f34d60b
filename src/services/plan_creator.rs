// src/services/plan_creator.rs
// DOCUMENTATION: Multi-step plan creation flow
// PURPOSE: Input -> Selection -> Review state machine with loading gates

use crate::errors::TripsError;
use crate::models::{
    cover_image_for, generate_id, BucketItem, BucketKind, ItemKind, ItineraryItem, PhotoRef,
    PlanStatus, TripPlan,
};
use crate::services::{ItineraryRequest, PlaceCandidate};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const LUNCH_DURATION: u32 = 60;
pub const LUNCH_COST: f64 = 15.0;

/// Step of the creation flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatorStep {
    Input,
    Selection,
    Review,
}

/// Step 1 form
/// DOCUMENTATION: Only the destination is checked; days and budget are taken as given
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PlanForm {
    #[validate(length(min = 1, max = 255))]
    pub destination: String,
    pub days: i32,
    pub budget: f64,
}

impl Default for PlanForm {
    fn default() -> Self {
        Self {
            destination: String::new(),
            days: 3,
            budget: 1000.0,
        }
    }
}

/// Partial update of the form (PUT /create/form)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanFormUpdate {
    pub destination: Option<String>,
    pub days: Option<i32>,
    pub budget: Option<f64>,
}

/// Where a selection entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionSource {
    Bucket,
    Recommended,
}

/// One toggleable entry of step 2
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: BucketKind,
    pub image: String,
    pub selected: bool,
    pub source: SelectionSource,
}

impl SelectionEntry {
    fn from_bucket(item: &BucketItem) -> Self {
        let description = match item.kind {
            BucketKind::Note => "Your note",
            BucketKind::Place => "From your bucket list",
        };
        Self {
            name: item.text.clone(),
            description: description.to_string(),
            kind: item.kind,
            image: thumbnail_for(&item.text),
            selected: true,
            source: SelectionSource::Bucket,
        }
    }

    fn from_candidate(candidate: PlaceCandidate) -> Self {
        Self {
            image: thumbnail_for(&candidate.name),
            name: candidate.name,
            description: candidate.description,
            kind: BucketKind::Place,
            selected: false,
            source: SelectionSource::Recommended,
        }
    }
}

fn thumbnail_for(name: &str) -> String {
    format!("https://picsum.photos/seed/{}/100/100", name)
}

/// Direction of a manual reorder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Query handed to the supplier when leaving step 1
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateQuery {
    pub destination: String,
    pub budget: f64,
}

/// State of the creation flow
#[derive(Debug, Clone, Serialize)]
pub struct PlanCreator {
    step: CreatorStep,
    form: PlanForm,
    selection: Vec<SelectionEntry>,
    itinerary: Vec<ItineraryItem>,
    loading: bool,
    #[serde(skip)]
    pending_bucket: Vec<SelectionEntry>,
}

impl Default for PlanCreator {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanCreator {
    pub fn new() -> Self {
        Self {
            step: CreatorStep::Input,
            form: PlanForm::default(),
            selection: Vec::new(),
            itinerary: Vec::new(),
            loading: false,
            pending_bucket: Vec::new(),
        }
    }

    pub fn step(&self) -> CreatorStep {
        self.step
    }

    pub fn selection(&self) -> &[SelectionEntry] {
        &self.selection
    }

    pub fn itinerary(&self) -> &[ItineraryItem] {
        &self.itinerary
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    fn ensure_idle(&self) -> Result<(), TripsError> {
        if self.loading {
            return Err(TripsError::InvalidState(
                "a generation request is in progress".to_string(),
            ));
        }
        Ok(())
    }

    fn ensure_step(&self, expected: CreatorStep) -> Result<(), TripsError> {
        self.ensure_idle()?;
        if self.step != expected {
            return Err(TripsError::InvalidState(format!(
                "expected step {:?}, flow is at {:?}",
                expected, self.step
            )));
        }
        Ok(())
    }

    /// Edit the step 1 form
    pub fn update_form(&mut self, update: PlanFormUpdate) -> Result<(), TripsError> {
        self.ensure_step(CreatorStep::Input)?;

        if let Some(destination) = update.destination {
            self.form.destination = destination;
        }
        if let Some(days) = update.days {
            self.form.days = days;
        }
        if let Some(budget) = update.budget {
            self.form.budget = budget;
        }
        Ok(())
    }

    /// Leave step 1: validate and mark loading
    /// DOCUMENTATION: Bucket entries whose location matches the destination are
    /// kept aside and placed first (pre-selected) once candidates arrive
    pub fn begin_candidate_fetch(
        &mut self,
        bucket_list: &[BucketItem],
    ) -> Result<CandidateQuery, TripsError> {
        self.ensure_step(CreatorStep::Input)?;

        let destination = self.form.destination.trim().to_string();
        if destination.is_empty() {
            return Err(TripsError::ValidationError(
                "destination must not be empty".to_string(),
            ));
        }
        self.form.validate()?;

        self.pending_bucket = bucket_list
            .iter()
            .filter(|item| item.matches_destination(&destination))
            .map(SelectionEntry::from_bucket)
            .collect();
        self.loading = true;

        Ok(CandidateQuery {
            destination,
            budget: self.form.budget,
        })
    }

    /// Finish the step 1 -> 2 transition with the supplier's answer
    pub fn complete_candidate_fetch(
        &mut self,
        candidates: Vec<PlaceCandidate>,
    ) -> Result<(), TripsError> {
        if !self.loading || self.step != CreatorStep::Input {
            return Err(TripsError::InvalidState(
                "no candidate request in progress".to_string(),
            ));
        }

        let mut selection = std::mem::take(&mut self.pending_bucket);
        selection.extend(candidates.into_iter().map(SelectionEntry::from_candidate));

        self.selection = selection;
        self.loading = false;
        self.step = CreatorStep::Selection;
        Ok(())
    }

    /// Flip the inclusion of one selection entry
    pub fn toggle_selection(&mut self, index: usize) -> Result<&SelectionEntry, TripsError> {
        self.ensure_step(CreatorStep::Selection)?;

        let entry = self
            .selection
            .get_mut(index)
            .ok_or_else(|| TripsError::NotFound(format!("selection entry {}", index)))?;
        entry.selected = !entry.selected;
        Ok(entry)
    }

    /// Leave step 2: collect the selected places and notes and mark loading
    pub fn begin_itinerary_build(&mut self) -> Result<ItineraryRequest, TripsError> {
        self.ensure_step(CreatorStep::Selection)?;

        let selected = |kind: BucketKind| -> Vec<String> {
            self.selection
                .iter()
                .filter(|entry| entry.selected && entry.kind == kind)
                .map(|entry| entry.name.clone())
                .collect()
        };

        let request = ItineraryRequest {
            destination: self.form.destination.trim().to_string(),
            days: self.form.days,
            budget: self.form.budget,
            selected_places: selected(BucketKind::Place),
            notes: selected(BucketKind::Note),
        };

        self.loading = true;
        Ok(request)
    }

    /// Finish the step 2 -> 3 transition with the generated sequence
    pub fn complete_itinerary_build(
        &mut self,
        items: Vec<ItineraryItem>,
    ) -> Result<(), TripsError> {
        if !self.loading || self.step != CreatorStep::Selection {
            return Err(TripsError::InvalidState(
                "no itinerary request in progress".to_string(),
            ));
        }

        self.itinerary = items;
        self.loading = false;
        self.step = CreatorStep::Review;
        Ok(())
    }

    /// Swap an item with its neighbour; no-op at either end
    pub fn move_item(&mut self, index: usize, direction: MoveDirection) -> Result<(), TripsError> {
        self.ensure_step(CreatorStep::Review)?;

        if index >= self.itinerary.len() {
            return Err(TripsError::NotFound(format!("itinerary item {}", index)));
        }

        let target = match direction {
            MoveDirection::Up if index == 0 => return Ok(()),
            MoveDirection::Up => index - 1,
            MoveDirection::Down if index + 1 == self.itinerary.len() => return Ok(()),
            MoveDirection::Down => index + 1,
        };

        self.itinerary.swap(index, target);
        Ok(())
    }

    /// Insert a lunch break at the middle of the sequence
    pub fn add_lunch_block(&mut self) -> Result<&ItineraryItem, TripsError> {
        self.ensure_step(CreatorStep::Review)?;

        let lunch = ItineraryItem::new(ItemKind::Lunch, "Lunch Break")
            .with_duration(LUNCH_DURATION)
            .with_description("Time to refuel")
            .with_cost(LUNCH_COST);

        let mid = self.itinerary.len() / 2;
        self.itinerary.insert(mid, lunch);
        Ok(&self.itinerary[mid])
    }

    /// Attach a photo to a generated item before saving
    pub fn attach_photo(&mut self, item_id: &str, photo: PhotoRef) -> Result<(), TripsError> {
        self.ensure_step(CreatorStep::Review)?;

        let item = self
            .itinerary
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| TripsError::NotFound(format!("itinerary item {}", item_id)))?;
        item.photos.push(photo);
        Ok(())
    }

    /// Materialize the plan and reset the flow
    pub fn save(&mut self) -> Result<TripPlan, TripsError> {
        self.ensure_step(CreatorStep::Review)?;

        let destination = self.form.destination.trim().to_string();
        let plan = TripPlan {
            id: generate_id(),
            cover_image: cover_image_for(&destination),
            destination,
            days: self.form.days,
            budget: self.form.budget,
            start_date: Utc::now(),
            items: std::mem::take(&mut self.itinerary),
            status: PlanStatus::Upcoming,
            author_id: "user1".to_string(),
            author_name: "Me".to_string(),
        };

        *self = PlanCreator::new();
        Ok(plan)
    }

    /// Clear the loading gate of a supplier call that never completed
    /// DOCUMENTATION: The flow stays at the step it was leaving
    pub fn abort_loading(&mut self) {
        if self.loading {
            log::warn!("Supplier call abandoned at step {:?}", self.step);
        }
        self.loading = false;
        self.pending_bucket.clear();
    }

    /// Abandon the flow (in-flight requests cannot be cancelled)
    pub fn reset(&mut self) -> Result<(), TripsError> {
        self.ensure_idle()?;
        *self = PlanCreator::new();
        Ok(())
    }
}
