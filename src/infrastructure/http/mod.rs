//! HTTP REST API routes

mod character_routes;
mod condition_routes;
mod roll_routes;

use axum::{
    http::StatusCode,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::application::services::ServiceError;
use crate::domain::value_objects::{CharacterId, ItemId, SkillKey, SkillKeyError};
use crate::infrastructure::state::AppState;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Character routes
        .route("/api/characters", get(character_routes::list_characters))
        .route("/api/characters", post(character_routes::create_character))
        .route("/api/characters/{id}", get(character_routes::get_character))
        .route(
            "/api/characters/{id}",
            delete(character_routes::delete_character),
        )
        .route(
            "/api/characters/{id}/sheet",
            get(character_routes::get_sheet),
        )
        // Item routes
        .route(
            "/api/characters/{id}/items",
            post(character_routes::create_item),
        )
        .route(
            "/api/characters/{id}/items/{item_id}",
            delete(character_routes::delete_item),
        )
        // Whole-character condition
        .route(
            "/api/characters/{id}/stress",
            post(condition_routes::toggle_stress),
        )
        .route(
            "/api/characters/{id}/restore",
            post(condition_routes::restore_skills),
        )
        .route("/api/characters/{id}/drink", post(condition_routes::drink))
        .route("/api/characters/{id}/rest", post(condition_routes::rest))
        .route(
            "/api/characters/{id}/editing-skills",
            post(condition_routes::toggle_editing_skills),
        )
        // Skill condition
        .route(
            "/api/characters/{id}/skills/{skill}/wound",
            post(condition_routes::toggle_wound),
        )
        .route(
            "/api/characters/{id}/skills/{skill}/scar",
            post(condition_routes::toggle_scar),
        )
        .route(
            "/api/characters/{id}/skills/{skill}/reduce",
            post(condition_routes::reduce_die),
        )
        .route(
            "/api/characters/{id}/skills/{skill}/augment",
            post(condition_routes::augment_die),
        )
        .route(
            "/api/characters/{id}/skills/{skill}/max",
            put(condition_routes::set_skill_max),
        )
        // Rolls
        .route(
            "/api/characters/{id}/skills/{skill}/roll",
            post(roll_routes::roll_skill),
        )
        .route(
            "/api/characters/{id}/items/{item_id}/roll",
            post(roll_routes::roll_item),
        )
}

/// Map a service error onto a status code and message
pub(crate) fn error_response(err: ServiceError) -> (StatusCode, String) {
    let status = match &err {
        ServiceError::CharacterNotFound(_)
        | ServiceError::SkillNotFound { .. }
        | ServiceError::ItemNotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Validation(_) | ServiceError::InvalidFormula(_) => StatusCode::BAD_REQUEST,
        ServiceError::ItemNotRollable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::Repository(_) | ServiceError::Roll(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!("Request failed: {}", err);
    } else {
        tracing::warn!(status = status.as_u16(), "Request rejected: {}", err);
    }
    (status, err.to_string())
}

pub(crate) fn parse_character_id(id: &str) -> Result<CharacterId, (StatusCode, String)> {
    id.parse()
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid character ID".to_string()))
}

pub(crate) fn parse_item_id(id: &str) -> Result<ItemId, (StatusCode, String)> {
    id.parse()
        .map_err(|_| (StatusCode::BAD_REQUEST, "Invalid item ID".to_string()))
}

pub(crate) fn parse_skill(skill: &str) -> Result<SkillKey, (StatusCode, String)> {
    skill
        .parse()
        .map_err(|e: SkillKeyError| (StatusCode::BAD_REQUEST, e.to_string()))
}
