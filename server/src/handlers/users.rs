use std::sync::Arc;

use crate::actix_web::Responder;
use actix_web::{web, HttpResponse};
use relay::serde_json::json;

use crate::profile::{NewUserProfile, ProfileStore};

pub fn configure_user_handlers(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/users").route(web::post().to(post)))
        .service(web::resource("/api/users/{user_id}").route(web::get().to(get)));
}

async fn post(
    body: web::Json<NewUserProfile>,
    profiles: web::Data<Arc<ProfileStore>>,
) -> Result<impl Responder, actix_web::error::Error> {
    match profiles.insert(body.into_inner()) {
        Ok(profile) => Ok(HttpResponse::Created().json(profile)),
        Err(err) => Ok(HttpResponse::BadRequest().json(json!({ "error": err.to_string() }))),
    }
}

async fn get(
    path: web::Path<String>,
    profiles: web::Data<Arc<ProfileStore>>,
) -> Result<impl Responder, actix_web::error::Error> {
    match profiles.get(&path) {
        Some(profile) => Ok(HttpResponse::Ok().json(profile)),
        None => Ok(HttpResponse::NotFound().json(json!({ "error": "User not found" }))),
    }
}
