use std::{num::IntErrorKind, sync::Arc};

use axum::{
    Json,
    extract::{State, rejection::BytesRejection},
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{AppState, extract::QueryParams};
use crate::dataset::{PredictionView, Record, TextRecord};
use crate::error::AppError;

pub const RANDOM_SAMPLE_SIZE: usize = 50;

/// One element of the batch request body.
#[derive(Debug, Deserialize)]
pub struct CredentialItem {
    username: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchEntry {
    Records(Arc<[TextRecord]>),
    Error { error: String },
}

pub async fn get_random_records(
    State(state): State<Arc<AppState>>,
    params: QueryParams,
) -> Result<Json<Vec<Record>>, AppError> {
    if let Err(err) = state
        .credentials
        .verify(params.first("username"), params.first("password"))
    {
        match err {
            AppError::MissingCredentials => {
                tracing::error!("No username or password provided in the request")
            }
            _ => tracing::warn!("Invalid username or password"),
        }
        return Err(err);
    }

    let records = state.datasets.sample_random(RANDOM_SAMPLE_SIZE)?;
    Ok(Json(records))
}

pub async fn get_prediction(
    State(state): State<Arc<AppState>>,
    params: QueryParams,
) -> Result<Json<Vec<PredictionView>>, AppError> {
    let Some(raw_id) = params.first("id") else {
        tracing::error!("No ID provided in the request");
        return Err(AppError::MissingId);
    };

    // A non-numeric id is reported as a server-side failure, not a 400.
    // Integers too wide for i64 can't match any row.
    let id = match raw_id.trim().parse::<i64>() {
        Ok(id) => id,
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            tracing::error!("ID {} not found in the dataset", raw_id);
            return Err(AppError::NotFound);
        }
        Err(e) => {
            return Err(AppError::Processing(format!(
                "invalid id {:?}: {}",
                raw_id, e
            )));
        }
    };

    let view = state.datasets.find_by_id(id).map_err(|err| {
        let err = AppError::from(err);
        if matches!(err, AppError::NotFound) {
            tracing::error!("ID {} not found in the dataset", id);
        }
        err
    })?;

    Ok(Json(vec![view]))
}

pub async fn post_predictions(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Vec<BatchEntry>>, AppError> {
    let body = body.map_err(|rejection| {
        tracing::error!("Failed to read request body: {}", rejection.body_text());
        AppError::MalformedInput
    })?;
    tracing::debug!("Received data: {}", String::from_utf8_lossy(&body));

    let items: Vec<CredentialItem> = serde_json::from_slice(&body).map_err(|e| {
        tracing::error!("Invalid JSON format: Expected a list ({})", e);
        AppError::MalformedInput
    })?;

    let responses = items
        .iter()
        .map(|item| {
            let valid = match (item.username.as_deref(), item.password.as_deref()) {
                (Some(username), Some(password)) => {
                    state.credentials.authenticate(username, password)
                }
                _ => false,
            };

            if valid {
                BatchEntry::Records(state.datasets.full_text_projection())
            } else {
                tracing::warn!("Invalid username or password");
                BatchEntry::Error {
                    error: AppError::InvalidCredentials.to_string(),
                }
            }
        })
        .collect();

    Ok(Json(responses))
}

pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "prediction_api"
    }))
}
