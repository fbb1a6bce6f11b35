use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::{debug, info};

use super::{
    AppState,
    error::{ApiResult, add_failed, delete_failed, get_failed, load_failed, update_failed},
    params::parse_filter,
};
use crate::core::{Toy, ToyDraft};
use crate::query::ToyPage;

pub async fn list_toys(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> ApiResult<Json<ToyPage>> {
    let filter = parse_filter(&pairs);
    debug!(?filter, "querying toys");

    let page = state.repo.query(filter).await.map_err(load_failed)?;
    Ok(Json(page))
}

pub async fn get_toy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Toy>> {
    let toy = state.repo.get(&id).await.map_err(get_failed)?;
    Ok(Json(toy))
}

pub async fn create_toy(
    State(state): State<AppState>,
    payload: Result<Json<ToyDraft>, JsonRejection>,
) -> ApiResult<Json<Toy>> {
    let Json(mut draft) = payload.map_err(add_failed)?;
    draft.id = None;

    let toy = state.repo.save(draft).await.map_err(add_failed)?;
    info!(id = %toy.id, name = %toy.name, "toy added");
    Ok(Json(toy))
}

pub async fn update_toy(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ToyDraft>, JsonRejection>,
) -> ApiResult<Json<Toy>> {
    let Json(mut draft) = payload.map_err(update_failed)?;
    draft.id = Some(id);

    let toy = state.repo.save(draft).await.map_err(update_failed)?;
    info!(id = %toy.id, "toy updated");
    Ok(Json(toy))
}

pub async fn delete_toy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.repo.remove(&id).await.map_err(delete_failed)?;
    info!(id = %id, "toy deleted");
    Ok(StatusCode::OK)
}
