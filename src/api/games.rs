use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, DeletedGameDto, GameDto, GameRequest,
    SearchGamesRequest};
use crate::services::PlatformPopulateStatus;

pub async fn list_games(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<GameDto>>>, ApiError> {
    let games = state
        .store()
        .list_games()
        .await
        .map_err(ApiError::database)?;

    let dtos: Vec<GameDto> = games.into_iter().map(GameDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

pub async fn create_game(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GameRequest>,
) -> Result<Json<ApiResponse<GameDto>>, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::validation("name must not be empty"));
    }

    let game = state
        .store()
        .create_game(&payload.into_fields())
        .await
        .map_err(ApiError::database)?;

    Ok(Json(ApiResponse::success(GameDto::from(game))))
}

pub async fn update_game(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<GameRequest>,
) -> Result<Json<ApiResponse<GameDto>>, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::validation("name must not be empty"));
    }

    let updated = state
        .store()
        .update_game(id, &payload.into_fields())
        .await
        .map_err(ApiError::database)?;

    match updated {
        Some(game) => Ok(Json(ApiResponse::success(GameDto::from(game)))),
        None => Err(ApiError::game_not_found(id)),
    }
}

pub async fn delete_game(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<DeletedGameDto>>, ApiError> {
    let deleted = state
        .store()
        .delete_game(id)
        .await
        .map_err(ApiError::database)?;

    if deleted {
        Ok(Json(ApiResponse::success(DeletedGameDto { id })))
    } else {
        Err(ApiError::game_not_found(id))
    }
}

pub async fn search_games(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SearchGamesRequest>,
) -> Result<Json<ApiResponse<Vec<GameDto>>>, ApiError> {
    // An empty platform applies no platform filter.
    let platform = payload.platform.as_deref().filter(|p| !p.is_empty());

    let games = state
        .store()
        .search_games(&payload.name, platform)
        .await
        .map_err(ApiError::database)?;

    let dtos: Vec<GameDto> = games.into_iter().map(GameDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

/// Fetches every platform chart in order and bulk-inserts the results.
/// A platform failure aborts the remaining loop but already-inserted rows
/// stay; the per-platform report is returned either way.
pub async fn populate_games(State(state): State<Arc<AppState>>) -> Response {
    let report = state.charts().populate().await;

    if report.failed() {
        let message = report
            .first_error()
            .unwrap_or("chart populate failed")
            .to_string();

        let body: ApiResponse<Vec<PlatformPopulateStatus>> = ApiResponse {
            success: false,
            data: Some(report.platforms),
            error: Some(message),
        };
        return (StatusCode::BAD_GATEWAY, Json(body)).into_response();
    }

    Json(ApiResponse::success(report.platforms)).into_response()
}
