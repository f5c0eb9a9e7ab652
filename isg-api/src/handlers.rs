use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::{Value, json};

use isg_scrape::{Device, Statistics, collect_statistics, read_setting};

use crate::error::ApiError;
use crate::state::AppState;

pub async fn index() -> Json<Value> {
    Json(json!({
        "endpoints": {
            "GET /stats": "all statistics as label/value pairs",
            "GET /value/:name": "current value of a setting (e.g. val16)",
            "GET /value/:name?new=<value>": "save a new value for a setting",
            "GET /health": "liveness",
        }
    }))
}

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "device": state.device_url,
        "utc_time": chrono::Utc::now().to_rfc3339(),
    }))
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<Statistics>, ApiError> {
    let stats = collect_statistics(state.device.as_ref(), &state.table).await?;
    Ok(Json(stats))
}

#[derive(Debug, Deserialize)]
pub struct ValueQuery {
    pub new: Option<String>,
}

/// Saves `new` when given, otherwise reports the current value.
///
/// A save answers `"OK"` whatever the device replied.
pub async fn value(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<ValueQuery>,
) -> Result<Json<String>, ApiError> {
    match query.new {
        Some(new) => {
            state.device.submit(&name, &new).await?;
            Ok(Json("OK".to_string()))
        }
        None => {
            let current = read_setting(state.device.as_ref(), &state.table, &name).await?;
            Ok(Json(current))
        }
    }
}
