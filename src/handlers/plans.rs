// src/handlers/plans.rs
// DOCUMENTATION: Plan detail handlers
// PURPOSE: Open, complete and share plans; render their route map

use crate::errors::TripsError;
use crate::handlers::create::AddPhotoRequest;
use crate::handlers::SharedController;
use crate::services::{random_photo, AppController};
use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

/// Request body for switching live traveler mode
#[derive(Debug, Deserialize)]
pub struct LiveModeRequest {
    pub live: bool,
}

fn ensure_active(app: &AppController, plan_id: &str) -> Result<(), TripsError> {
    app.plan(plan_id)?;
    match app.active_plan() {
        Some(plan) if plan.id == plan_id => Ok(()),
        _ => Err(TripsError::InvalidState(format!(
            "plan {} is not open in the detail page",
            plan_id
        ))),
    }
}

/// GET /plans/{id}
/// Open the plan in the detail page
pub async fn get_plan(
    controller: web::Data<SharedController>,
    path: web::Path<String>,
) -> Result<impl Responder, TripsError> {
    let mut app = controller.lock().await;
    let plan = app.select_plan(&path.into_inner())?.clone();
    Ok(HttpResponse::Ok().json(plan))
}

/// POST /plans/{id}/complete
pub async fn complete_plan(
    controller: web::Data<SharedController>,
    path: web::Path<String>,
) -> Result<impl Responder, TripsError> {
    let plan = controller.lock().await.complete_plan(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(plan))
}

/// POST /plans/{id}/share
/// Publish the plan's photos to the social feed
pub async fn share_plan(
    controller: web::Data<SharedController>,
    path: web::Path<String>,
) -> Result<impl Responder, TripsError> {
    let post = controller.lock().await.share_plan_as_post(&path.into_inner())?;
    Ok(HttpResponse::Created().json(post))
}

/// POST /plans/{id}/items/{item_id}/photos
pub async fn add_photo(
    controller: web::Data<SharedController>,
    path: web::Path<(String, String)>,
    req: web::Json<AddPhotoRequest>,
) -> Result<impl Responder, TripsError> {
    let (plan_id, item_id) = path.into_inner();
    let photo = req.into_inner().url.unwrap_or_else(random_photo);

    let mut app = controller.lock().await;
    app.ensure_authenticated()?;
    ensure_active(&app, &plan_id)?;
    let plan = app.attach_photo(&item_id, photo)?;
    Ok(HttpResponse::Ok().json(plan))
}

/// POST /plans/{id}/live
/// Toggle simulated nearby travelers on the open plan's map
pub async fn set_live_mode(
    controller: web::Data<SharedController>,
    path: web::Path<String>,
    req: web::Json<LiveModeRequest>,
) -> Result<impl Responder, TripsError> {
    let mut app = controller.lock().await;
    app.ensure_authenticated()?;
    ensure_active(&app, &path.into_inner())?;
    let travelers = app.set_live_mode(req.live)?.to_vec();

    Ok(HttpResponse::Ok().json(json!({
        "live": app.is_live(),
        "travelers": travelers,
    })))
}

/// GET /plans/{id}/map
pub async fn get_map(
    controller: web::Data<SharedController>,
    path: web::Path<String>,
) -> Result<impl Responder, TripsError> {
    let map = controller.lock().await.plan_map(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(map))
}

/// GET /plans/{id}/map.svg
pub async fn get_map_svg(
    controller: web::Data<SharedController>,
    path: web::Path<String>,
) -> Result<impl Responder, TripsError> {
    let map = controller.lock().await.plan_map(&path.into_inner())?;
    Ok(HttpResponse::Ok()
        .content_type("image/svg+xml")
        .body(map.to_svg()))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/plans")
            .route("/{id}", web::get().to(get_plan))
            .route("/{id}/complete", web::post().to(complete_plan))
            .route("/{id}/share", web::post().to(share_plan))
            .route("/{id}/live", web::post().to(set_live_mode))
            .route("/{id}/map", web::get().to(get_map))
            .route("/{id}/map.svg", web::get().to(get_map_svg))
            .route("/{id}/items/{item_id}/photos", web::post().to(add_photo)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{cover_image_for, PlanStatus, TripPlan};
    use crate::services::mock_itinerary;
    use actix_web::{http::StatusCode, test, App};
    use chrono::Utc;
    use serde_json::Value;
    use crate::handlers::test_support::app_state;

    fn sample_plan(id: &str) -> TripPlan {
        let places = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        TripPlan {
            id: id.to_string(),
            destination: "Lisbon".to_string(),
            days: 2,
            budget: 800.0,
            start_date: Utc::now(),
            items: mock_itinerary("Lisbon", &places),
            status: PlanStatus::Upcoming,
            cover_image: cover_image_for("Lisbon"),
            author_id: "user1".to_string(),
            author_name: "Me".to_string(),
        }
    }

    #[actix_rt::test]
    async fn test_photo_then_share() {
        let (_dir, controller, _supplier) = app_state();
        controller.lock().await.save_plan(sample_plan("p1")).unwrap();
        let app = test::init_service(
            App::new().app_data(controller.clone()).configure(config),
        )
        .await;

        let req = test::TestRequest::post().uri("/plans/p1/share").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let item_id = controller.lock().await.plan("p1").unwrap().items[0].id.clone();
        let uri = format!("/plans/p1/items/{}/photos", item_id);

        // Not opened yet
        let req = test::TestRequest::post()
            .uri(&uri)
            .set_json(serde_json::json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let req = test::TestRequest::get().uri("/plans/p1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::post()
            .uri(&uri)
            .set_json(serde_json::json!({}))
            .to_request();
        let plan: Value = test::call_and_read_body_json(&app, req).await;
        let photo = plan["items"][0]["photos"][0].as_str().unwrap().to_string();
        assert!(photo.starts_with("https://picsum.photos/seed/"));

        let req = test::TestRequest::post().uri("/plans/p1/share").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let post: Value = test::read_body_json(resp).await;
        assert_eq!(post["image"], photo.as_str());
        assert_eq!(post["tripPlanId"], "p1");
        assert_eq!(
            post["caption"],
            "Just completed my amazing trip to Lisbon! Checked out 6 spots."
        );
    }

    #[actix_rt::test]
    async fn test_complete_and_map() {
        let (_dir, controller, _supplier) = app_state();
        controller.lock().await.save_plan(sample_plan("p1")).unwrap();
        let app = test::init_service(
            App::new().app_data(controller.clone()).configure(config),
        )
        .await;

        let req = test::TestRequest::post().uri("/plans/p1/complete").to_request();
        let plan: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(plan["status"], "completed");

        let req = test::TestRequest::get().uri("/plans/p1/map").to_request();
        let map: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(map["state"], "diagram");
        assert_eq!(map["nodes"].as_array().unwrap().len(), 3);
        assert_eq!(map["label"], "Offline Map View");

        let req = test::TestRequest::get().uri("/plans/p1/map.svg").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "image/svg+xml"
        );
        let body = test::read_body(resp).await;
        assert!(body.starts_with(b"<svg"));

        let req = test::TestRequest::get().uri("/plans/missing/map").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn test_live_mode_keeps_markers_stable() {
        let (_dir, controller, _supplier) = app_state();
        controller.lock().await.save_plan(sample_plan("p1")).unwrap();
        let app = test::init_service(
            App::new().app_data(controller.clone()).configure(config),
        )
        .await;

        let req = test::TestRequest::get().uri("/plans/p1").to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/plans/p1/live")
            .set_json(serde_json::json!({ "live": true }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["travelers"].as_array().unwrap().len(), 5);

        let req = test::TestRequest::get().uri("/plans/p1/map").to_request();
        let first: Value = test::call_and_read_body_json(&app, req).await;
        let req = test::TestRequest::get().uri("/plans/p1/map").to_request();
        let second: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(first["travelers"], second["travelers"]);
        assert_eq!(first["label"], "Live Map (5 travelers nearby)");

        let req = test::TestRequest::post()
            .uri("/plans/p1/live")
            .set_json(serde_json::json!({ "live": false }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["travelers"].as_array().unwrap().len(), 0);
    }
}
