// src/handlers/create.rs
// DOCUMENTATION: Plan creation handlers
// PURPOSE: Drive the Input -> Selection -> Review flow.
// Supplier calls run on a spawned task with the controller unlocked; the
// creator's loading flag rejects competing transitions meanwhile.

use crate::errors::TripsError;
use crate::handlers::{SharedController, SharedSupplier};
use crate::services::{AppController, AppRoute, MoveDirection, PlanCreator, PlanFormUpdate};
use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use std::future::Future;

/// Request body for reordering an item
#[derive(Debug, Deserialize)]
pub struct MoveItemRequest {
    pub direction: MoveDirection,
}

/// Request body for attaching a photo; a random one is used when url is absent
#[derive(Debug, Default, Deserialize)]
pub struct AddPhotoRequest {
    pub url: Option<String>,
}

fn creator_response(app: &AppController) -> HttpResponse {
    HttpResponse::Ok().json(app.creator())
}

/// GET /create
/// Open the creation flow where it was left
pub async fn get_creator(
    controller: web::Data<SharedController>,
) -> Result<impl Responder, TripsError> {
    let mut app = controller.lock().await;
    app.navigate(AppRoute::Create)?;
    Ok(creator_response(&app))
}

/// PUT /create/form
pub async fn update_form(
    controller: web::Data<SharedController>,
    req: web::Json<PlanFormUpdate>,
) -> Result<impl Responder, TripsError> {
    let mut app = controller.lock().await;
    app.ensure_authenticated()?;
    app.creator_mut().update_form(req.into_inner())?;
    Ok(creator_response(&app))
}

/// Run the completing half of a supplier call on its own task
/// DOCUMENTATION: The task outlives the request, so a client that disconnects
/// mid-call still leaves the flow at the next step. If the task itself dies
/// the loading gate is cleared.
async fn finish_on_task<F>(
    controller: &web::Data<SharedController>,
    task: F,
) -> Result<PlanCreator, TripsError>
where
    F: Future<Output = Result<PlanCreator, TripsError>> + 'static,
{
    match actix_web::rt::spawn(task).await {
        Ok(result) => result,
        Err(e) => {
            log::error!("Supplier task failed: {}", e);
            controller.lock().await.creator_mut().abort_loading();
            Err(TripsError::ExternalApiError(format!("Supplier task failed: {}", e)))
        }
    }
}

/// POST /create/candidates
/// Step 1 -> 2: ask the supplier for places, bucket matches first
pub async fn fetch_candidates(
    controller: web::Data<SharedController>,
    supplier: web::Data<SharedSupplier>,
) -> Result<impl Responder, TripsError> {
    let query = {
        let mut app = controller.lock().await;
        app.ensure_authenticated()?;
        let bucket_list = app.bucket_list().to_vec();
        app.creator_mut().begin_candidate_fetch(&bucket_list)?
    };

    log::info!("Fetching place candidates for {}", query.destination);
    let task_controller = controller.clone();
    let task_supplier = supplier.get_ref().clone();
    let creator = finish_on_task(&controller, async move {
        let candidates = task_supplier
            .fetch_place_candidates(&query.destination, query.budget)
            .await;

        let mut app = task_controller.lock().await;
        app.creator_mut().complete_candidate_fetch(candidates)?;
        Ok(app.creator().clone())
    })
    .await?;

    Ok(HttpResponse::Ok().json(creator))
}

/// POST /create/selection/{index}/toggle
pub async fn toggle_selection(
    controller: web::Data<SharedController>,
    path: web::Path<usize>,
) -> Result<impl Responder, TripsError> {
    let mut app = controller.lock().await;
    app.ensure_authenticated()?;
    let entry = app.creator_mut().toggle_selection(path.into_inner())?.clone();
    Ok(HttpResponse::Ok().json(entry))
}

/// POST /create/itinerary
/// Step 2 -> 3: build the ordered sequence for the selected places
pub async fn build_itinerary(
    controller: web::Data<SharedController>,
    supplier: web::Data<SharedSupplier>,
) -> Result<impl Responder, TripsError> {
    let request = {
        let mut app = controller.lock().await;
        app.ensure_authenticated()?;
        app.creator_mut().begin_itinerary_build()?
    };

    log::info!(
        "Building itinerary for {} ({} places, {} notes)",
        request.destination,
        request.selected_places.len(),
        request.notes.len()
    );
    let task_controller = controller.clone();
    let task_supplier = supplier.get_ref().clone();
    let creator = finish_on_task(&controller, async move {
        let items = task_supplier.build_itinerary(&request).await;

        let mut app = task_controller.lock().await;
        app.creator_mut().complete_itinerary_build(items)?;
        Ok(app.creator().clone())
    })
    .await?;

    Ok(HttpResponse::Ok().json(creator))
}

/// POST /create/items/{index}/move
pub async fn move_item(
    controller: web::Data<SharedController>,
    path: web::Path<usize>,
    req: web::Json<MoveItemRequest>,
) -> Result<impl Responder, TripsError> {
    let mut app = controller.lock().await;
    app.ensure_authenticated()?;
    app.creator_mut().move_item(path.into_inner(), req.direction)?;
    Ok(creator_response(&app))
}

/// POST /create/lunch
pub async fn add_lunch(
    controller: web::Data<SharedController>,
) -> Result<impl Responder, TripsError> {
    let mut app = controller.lock().await;
    app.ensure_authenticated()?;
    app.creator_mut().add_lunch_block()?;
    Ok(creator_response(&app))
}

/// POST /create/items/{id}/photos
pub async fn add_item_photo(
    controller: web::Data<SharedController>,
    path: web::Path<String>,
    req: web::Json<AddPhotoRequest>,
) -> Result<impl Responder, TripsError> {
    let photo = req.into_inner().url.unwrap_or_else(crate::services::random_photo);

    let mut app = controller.lock().await;
    app.ensure_authenticated()?;
    app.creator_mut().attach_photo(&path.into_inner(), photo)?;
    Ok(creator_response(&app))
}

/// POST /create/save
/// Materialize the plan, add it to the dashboard and reset the flow
pub async fn save_plan(
    controller: web::Data<SharedController>,
) -> Result<impl Responder, TripsError> {
    let mut app = controller.lock().await;
    app.ensure_authenticated()?;
    let plan = app.creator_mut().save()?;
    app.save_plan(plan.clone())?;
    Ok(HttpResponse::Created().json(plan))
}

/// POST /create/reset
pub async fn reset(controller: web::Data<SharedController>) -> Result<impl Responder, TripsError> {
    let mut app = controller.lock().await;
    app.ensure_authenticated()?;
    app.creator_mut().reset()?;
    Ok(creator_response(&app))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/create")
            .route("", web::get().to(get_creator))
            .route("/form", web::put().to(update_form))
            .route("/candidates", web::post().to(fetch_candidates))
            .route("/selection/{index}/toggle", web::post().to(toggle_selection))
            .route("/itinerary", web::post().to(build_itinerary))
            .route("/items/{index}/move", web::post().to(move_item))
            .route("/lunch", web::post().to(add_lunch))
            .route("/items/{id}/photos", web::post().to(add_item_photo))
            .route("/save", web::post().to(save_plan))
            .route("/reset", web::post().to(reset)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SupplierMode;
    use crate::handlers::test_support::app_state;
    use crate::models::ItineraryItem;
    use crate::services::{
        DeterministicMockSupplier, ItineraryRequest, ItinerarySupplier, PlaceCandidate,
    };
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use std::time::Duration;

    #[actix_rt::test]
    async fn test_full_creation_flow() {
        let (_dir, controller, supplier) = app_state();
        let app = test::init_service(
            App::new()
                .app_data(controller.clone())
                .app_data(supplier)
                .configure(config),
        )
        .await;

        let req = test::TestRequest::put()
            .uri("/create/form")
            .set_json(json!({ "destination": "Tokyo", "days": 2 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["form"]["days"], 2);
        assert_eq!(body["form"]["budget"], 1000.0);

        let req = test::TestRequest::post().uri("/create/candidates").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["step"], "selection");
        let selection = body["selection"].as_array().unwrap();
        assert_eq!(selection.len(), 6);
        assert_eq!(selection[0]["source"], "bucket");
        assert_eq!(selection[0]["selected"], true);
        assert_eq!(selection[2]["selected"], false);

        let req = test::TestRequest::post()
            .uri("/create/selection/2/toggle")
            .to_request();
        let entry: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(entry["selected"], true);

        let req = test::TestRequest::post().uri("/create/itinerary").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["step"], "review");
        let kinds: Vec<&str> = body["itinerary"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["type"].as_str().unwrap())
            .collect();
        assert_eq!(kinds, vec!["place", "transport", "place", "accommodation"]);

        let req = test::TestRequest::post()
            .uri("/create/items/0/move")
            .set_json(json!({ "direction": "up" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["itinerary"][0]["type"], "place");

        let req = test::TestRequest::post().uri("/create/lunch").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["itinerary"][2]["type"], "lunch");
        assert_eq!(body["itinerary"][2]["title"], "Lunch Break");

        let first_id = body["itinerary"][0]["id"].as_str().unwrap().to_string();
        let req = test::TestRequest::post()
            .uri(&format!("/create/items/{}/photos", first_id))
            .set_json(json!({ "url": "https://example.com/p.jpg" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["itinerary"][0]["photos"][0], "https://example.com/p.jpg");

        let req = test::TestRequest::post().uri("/create/save").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let plan: Value = test::read_body_json(resp).await;
        assert_eq!(plan["destination"], "Tokyo");
        assert_eq!(plan["status"], "upcoming");
        assert_eq!(plan["items"].as_array().unwrap().len(), 5);

        let state = controller.lock().await;
        assert_eq!(state.plans().len(), 1);
        assert_eq!(state.route(), AppRoute::Home);
        assert_eq!(state.creator().step(), crate::services::CreatorStep::Input);
    }

    /// Mock supplier that answers after a delay
    struct SlowSupplier;

    #[async_trait::async_trait]
    impl ItinerarySupplier for SlowSupplier {
        async fn fetch_place_candidates(
            &self,
            destination: &str,
            budget: f64,
        ) -> Vec<PlaceCandidate> {
            tokio::time::sleep(Duration::from_millis(150)).await;
            DeterministicMockSupplier
                .fetch_place_candidates(destination, budget)
                .await
        }

        async fn build_itinerary(&self, request: &ItineraryRequest) -> Vec<ItineraryItem> {
            tokio::time::sleep(Duration::from_millis(150)).await;
            DeterministicMockSupplier.build_itinerary(request).await
        }

        fn mode(&self) -> SupplierMode {
            SupplierMode::Mock
        }
    }

    #[actix_rt::test]
    async fn test_disconnect_mid_call_does_not_wedge_flow() {
        let (_dir, controller, _supplier) = app_state();
        let slow: SharedSupplier = Arc::new(SlowSupplier);
        let app = test::init_service(
            App::new()
                .app_data(controller.clone())
                .app_data(web::Data::new(slow))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::put()
            .uri("/create/form")
            .set_json(json!({ "destination": "Tokyo" }))
            .to_request();
        test::call_service(&app, req).await;

        // Client gives up before the supplier answers
        let req = test::TestRequest::post().uri("/create/candidates").to_request();
        let gone = tokio::time::timeout(
            Duration::from_millis(20),
            test::call_service(&app, req),
        )
        .await;
        assert!(gone.is_err());
        assert!(controller.lock().await.creator().is_loading());

        tokio::time::sleep(Duration::from_millis(400)).await;

        let req = test::TestRequest::get().uri("/create").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["loading"], false);
        assert_eq!(body["step"], "selection");

        let req = test::TestRequest::post().uri("/create/reset").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_rt::test]
    async fn test_empty_destination_rejected() {
        let (_dir, controller, supplier) = app_state();
        let app = test::init_service(
            App::new()
                .app_data(controller)
                .app_data(supplier)
                .configure(config),
        )
        .await;

        let req = test::TestRequest::post().uri("/create/candidates").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post().uri("/create/lunch").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::get().uri("/create").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["step"], "input");
        assert_eq!(body["loading"], false);
    }
}
