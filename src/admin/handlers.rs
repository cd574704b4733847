use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::admin::AdminState;
use crate::logger::Level;
use crate::registry::RegistryError;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggerStatus {
    pub name: String,
    pub level: Level,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SetLevelRequest {
    pub level: String,
}

/// Registry errors mapped onto HTTP responses.
#[derive(Debug)]
pub struct AdminError(RegistryError);

impl From<RegistryError> for AdminError {
    fn from(e: RegistryError) -> Self {
        Self(e)
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            RegistryError::NotFound(_) => StatusCode::NOT_FOUND,
            RegistryError::InvalidLevel(_) => StatusCode::BAD_REQUEST,
            RegistryError::DuplicateName(_) => StatusCode::CONFLICT,
        };
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

pub async fn list_loggers(State(state): State<AdminState>) -> Json<Vec<LoggerStatus>> {
    let statuses = state
        .registry
        .levels()
        .into_iter()
        .map(|(name, level)| LoggerStatus { name, level })
        .collect();
    Json(statuses)
}

pub async fn get_logger(
    State(state): State<AdminState>,
    Path(name): Path<String>,
) -> Result<Json<LoggerStatus>, AdminError> {
    let level = state.registry.level(&name)?;
    Ok(Json(LoggerStatus { name, level }))
}

pub async fn set_logger_level(
    State(state): State<AdminState>,
    Path(name): Path<String>,
    Json(request): Json<SetLevelRequest>,
) -> Result<Json<LoggerStatus>, AdminError> {
    state.registry.set_level(&name, &request.level)?;
    let level = state.registry.level(&name)?;
    Ok(Json(LoggerStatus { name, level }))
}
