// src/handlers/bucket.rs
// DOCUMENTATION: Bucket list handlers
// PURPOSE: Add, remove and check off bucket list entries

use crate::errors::TripsError;
use crate::handlers::SharedController;
use crate::models::AddBucketItemRequest;
use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

/// GET /bucket
pub async fn list_bucket(
    controller: web::Data<SharedController>,
) -> Result<impl Responder, TripsError> {
    let app = controller.lock().await;
    app.ensure_authenticated()?;
    Ok(HttpResponse::Ok().json(app.bucket_list()))
}

/// POST /bucket
/// Add an entry; text and location are both required
pub async fn add_bucket_item(
    controller: web::Data<SharedController>,
    req: web::Json<AddBucketItemRequest>,
) -> Result<impl Responder, TripsError> {
    if let Err(e) = req.validate() {
        return Err(TripsError::ValidationError(e.to_string()));
    }

    let item = controller.lock().await.add_bucket_item(req.into_inner())?;
    Ok(HttpResponse::Created().json(item))
}

/// DELETE /bucket/{id}
pub async fn delete_bucket_item(
    controller: web::Data<SharedController>,
    path: web::Path<String>,
) -> Result<impl Responder, TripsError> {
    controller.lock().await.delete_bucket_item(&path.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /bucket/{id}/toggle
pub async fn toggle_bucket_item(
    controller: web::Data<SharedController>,
    path: web::Path<String>,
) -> Result<impl Responder, TripsError> {
    let item = controller.lock().await.toggle_bucket_item(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(item))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/bucket")
            .route("", web::get().to(list_bucket))
            .route("", web::post().to(add_bucket_item))
            .route("/{id}", web::delete().to(delete_bucket_item))
            .route("/{id}/toggle", web::post().to(toggle_bucket_item)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::app_state;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};

    #[actix_rt::test]
    async fn test_add_toggle_delete() {
        let (_dir, controller, _supplier) = app_state();
        let app = test::init_service(App::new().app_data(controller).configure(config)).await;

        let req = test::TestRequest::post()
            .uri("/bucket")
            .set_json(json!({ "text": "Hike Fushimi Inari", "location": "Kyoto" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let item: Value = test::read_body_json(resp).await;
        assert_eq!(item["type"], "place");
        assert_eq!(item["isCompleted"], false);
        let id = item["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri(&format!("/bucket/{}/toggle", id))
            .to_request();
        let toggled: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(toggled["isCompleted"], true);

        let req = test::TestRequest::delete()
            .uri(&format!("/bucket/{}", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::delete()
            .uri(&format!("/bucket/{}", id))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn test_add_requires_location() {
        let (_dir, controller, _supplier) = app_state();
        let app = test::init_service(App::new().app_data(controller).configure(config)).await;

        let req = test::TestRequest::post()
            .uri("/bucket")
            .set_json(json!({ "text": "Somewhere", "location": "" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get().uri("/bucket").to_request();
        let list: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(list.as_array().unwrap().len(), 2);
    }
}
