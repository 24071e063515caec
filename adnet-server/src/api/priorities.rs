//! Priority handlers: public resolution, dashboard listing, bulk update

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use std::collections::BTreeMap;

use adnet_types::{CountryCode, Platform, PriorityRecord};

use super::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct PriorityQuery {
    pub platform: Option<Platform>,
    pub os_version: Option<String>,
}

/// `GET /ads/{country_code}`: the filtered record a client should use.
pub async fn get_priorities(
    State(state): State<AppState>,
    Path(country_code): Path<String>,
    Query(query): Query<PriorityQuery>,
) -> Result<Json<PriorityRecord>, ApiError> {
    let record = state
        .service()
        .get_priorities(&country_code, query.platform, query.os_version.as_deref())
        .await?;
    Ok(Json(record))
}

/// `GET /ads`: every stored record, unfiltered.
pub async fn list_priorities(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<CountryCode, PriorityRecord>>, ApiError> {
    Ok(Json(state.service().list_all().await?))
}

/// `PUT /ads`: replace the records for every country in the body.
pub async fn update_priorities(
    State(state): State<AppState>,
    Json(batch): Json<BTreeMap<String, PriorityRecord>>,
) -> Result<StatusCode, ApiError> {
    state.service().update(batch).await?;
    Ok(StatusCode::NO_CONTENT)
}
