// src/handlers/social.rs
// DOCUMENTATION: Social feed handlers
// PURPOSE: Browse the feed and import plans linked from posts

use crate::errors::TripsError;
use crate::handlers::SharedController;
use crate::services::AppRoute;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

/// GET /social
/// Feed, newest first, plus the post just shared from a plan (if any)
pub async fn feed(controller: web::Data<SharedController>) -> Result<impl Responder, TripsError> {
    let mut app = controller.lock().await;
    app.navigate(AppRoute::Social)?;

    Ok(HttpResponse::Ok().json(json!({
        "posts": app.feed()?,
        "newPost": app.new_social_post(),
    })))
}

/// POST /social/{post_id}/import
pub async fn import_plan(
    controller: web::Data<SharedController>,
    path: web::Path<String>,
) -> Result<impl Responder, TripsError> {
    let plan = controller.lock().await.import_plan(&path.into_inner())?;
    Ok(HttpResponse::Created().json(plan))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/social")
            .route("", web::get().to(feed))
            .route("/{post_id}/import", web::post().to(import_plan)),
    );
}
