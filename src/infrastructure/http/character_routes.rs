//! Character API routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use super::{error_response, parse_character_id, parse_item_id};
use crate::application::dto::{
    CharacterResponseDto, CharacterSheetView, CreateCharacterRequestDto, CreateItemRequestDto,
    ItemResponseDto,
};
use crate::application::services::{CreateCharacterRequest, CreateItemRequest};
use crate::infrastructure::state::AppState;

/// List all characters
pub async fn list_characters(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CharacterResponseDto>>, (StatusCode, String)> {
    let characters = state
        .character_service
        .list_characters()
        .await
        .map_err(error_response)?;

    Ok(Json(characters.into_iter().map(CharacterResponseDto::from).collect()))
}

/// Create a character
pub async fn create_character(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCharacterRequestDto>,
) -> Result<(StatusCode, Json<CharacterResponseDto>), (StatusCode, String)> {
    let service_request = CreateCharacterRequest {
        name: req.name,
        starting_die: req.starting_die.unwrap_or(state.config.starting_die),
        skill_max: req.skill_max,
    };

    let character = state
        .character_service
        .create_character(service_request)
        .await
        .map_err(error_response)?;

    Ok((
        StatusCode::CREATED,
        Json(CharacterResponseDto::from(character)),
    ))
}

/// Get a character by ID
pub async fn get_character(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CharacterResponseDto>, (StatusCode, String)> {
    let id = parse_character_id(&id)?;

    let character = state
        .character_service
        .get_character(id)
        .await
        .map_err(error_response)?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Character not found".to_string()))?;

    Ok(Json(CharacterResponseDto::from(character)))
}

/// Delete a character
pub async fn delete_character(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, (StatusCode, String)> {
    let id = parse_character_id(&id)?;

    state
        .character_service
        .delete_character(id)
        .await
        .map_err(error_response)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Everything needed to draw the character sheet
pub async fn get_sheet(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CharacterSheetView>, (StatusCode, String)> {
    let id = parse_character_id(&id)?;

    let sheet = state
        .character_service
        .get_sheet(id)
        .await
        .map_err(error_response)?;

    Ok(Json(sheet))
}

/// Give a character a new item
pub async fn create_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<CreateItemRequestDto>,
) -> Result<(StatusCode, Json<ItemResponseDto>), (StatusCode, String)> {
    let id = parse_character_id(&id)?;

    let service_request = CreateItemRequest {
        name: req.name,
        spell_level: req.spell_level,
        formula: req.formula,
        ..CreateItemRequest::of_type(req.item_type)
    };

    let item = state
        .character_service
        .create_item(id, service_request)
        .await
        .map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(ItemResponseDto::from(&item))))
}

/// Remove an item from a character
pub async fn delete_item(
    State(state): State<Arc<AppState>>,
    Path((id, item_id)): Path<(String, String)>,
) -> Result<StatusCode, (StatusCode, String)> {
    let id = parse_character_id(&id)?;
    let item_id = parse_item_id(&item_id)?;

    state
        .character_service
        .delete_item(id, item_id)
        .await
        .map_err(error_response)?;

    Ok(StatusCode::NO_CONTENT)
}
