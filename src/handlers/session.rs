// src/handlers/session.rs
// DOCUMENTATION: Session and top-level page handlers
// PURPOSE: Sign-in gate, dashboard and profile pages

use crate::errors::TripsError;
use crate::handlers::SharedController;
use crate::services::AppRoute;
use actix_web::{web, HttpResponse, Responder};

/// POST /auth/login
/// Sign in (no credentials) and land on the dashboard
pub async fn login(controller: web::Data<SharedController>) -> Result<impl Responder, TripsError> {
    let mut app = controller.lock().await;
    app.login()?;
    Ok(HttpResponse::Ok().json(app.session()))
}

/// POST /auth/logout
pub async fn logout(controller: web::Data<SharedController>) -> Result<impl Responder, TripsError> {
    let mut app = controller.lock().await;
    app.logout()?;
    Ok(HttpResponse::Ok().json(app.session()))
}

/// GET /session
/// Current route and sign-in state
pub async fn session(controller: web::Data<SharedController>) -> impl Responder {
    let app = controller.lock().await;
    HttpResponse::Ok().json(app.session())
}

/// GET /home
/// Dashboard: upcoming and completed plans plus the bucket list
pub async fn home(controller: web::Data<SharedController>) -> Result<impl Responder, TripsError> {
    let mut app = controller.lock().await;
    app.navigate(AppRoute::Home)?;
    Ok(HttpResponse::Ok().json(app.dashboard()?))
}

/// GET /profile
pub async fn profile(controller: web::Data<SharedController>) -> Result<impl Responder, TripsError> {
    let mut app = controller.lock().await;
    app.navigate(AppRoute::Profile)?;
    Ok(HttpResponse::Ok().json(app.profile()?))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout)),
    )
    .route("/session", web::get().to(session))
    .route("/home", web::get().to(home))
    .route("/profile", web::get().to(profile));
}
