use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, MessageResponse, SetDetail, SetQuery};
use crate::models::catalog::{LegoSet, NewSet, SetChanges, Theme};

/// GET /lego/sets?theme=
pub async fn list_sets(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SetQuery>,
) -> Result<Json<ApiResponse<Vec<LegoSet>>>, ApiError> {
    let sets = match query.theme.as_deref().filter(|t| !t.is_empty()) {
        Some(theme) => state.catalog.get_sets_by_theme(theme).await?,
        None => state.catalog.get_all_sets().await?,
    };

    Ok(Json(ApiResponse::success(sets)))
}

/// GET /lego/sets/{num}
/// The quote is decoration; a failed fetch only drops it from the response.
pub async fn get_set(
    State(state): State<Arc<AppState>>,
    Path(set_num): Path<String>,
) -> Result<Json<ApiResponse<SetDetail>>, ApiError> {
    let set = state.catalog.get_set_by_num(&set_num).await?;

    let quote = match &state.quotes {
        Some(client) => client
            .random()
            .await
            .inspect_err(|e| tracing::warn!("Quote unavailable: {e:#}"))
            .ok(),
        None => None,
    };

    Ok(Json(ApiResponse::success(SetDetail { set, quote })))
}

/// GET /lego/themes
pub async fn list_themes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Theme>>>, ApiError> {
    let themes = state.catalog.get_all_themes().await?;
    Ok(Json(ApiResponse::success(themes)))
}

/// POST /lego/sets
pub async fn add_set(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewSet>,
) -> Result<(StatusCode, Json<ApiResponse<MessageResponse>>), ApiError> {
    let set_num = payload.set_num.clone();
    state.catalog.add_set(payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(MessageResponse::new(format!(
            "Set {set_num} added"
        )))),
    ))
}

/// PUT /lego/sets/{num}
pub async fn edit_set(
    State(state): State<Arc<AppState>>,
    Path(set_num): Path<String>,
    Json(payload): Json<SetChanges>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.catalog.edit_set(&set_num, payload).await?;

    Ok(Json(ApiResponse::success(MessageResponse::new(format!(
        "Set {set_num} updated"
    )))))
}

/// DELETE /lego/sets/{num}
pub async fn delete_set(
    State(state): State<Arc<AppState>>,
    Path(set_num): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.catalog.delete_set(&set_num).await?;

    Ok(Json(ApiResponse::success(MessageResponse::new(format!(
        "Set {set_num} deleted"
    )))))
}
