use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use cbot_core::{compile, render::render, FormSelections, Format, ReportDocument, SelectionsRequest};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::{error::ApiError, AppState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Generated {
    requirement_id: Uuid,
    requirements: ReportDocument,
}

/// Compiles a report from the questionnaire answers and keeps it for
/// download.
#[instrument(skip_all)]
pub async fn generate(
    State(state): State<AppState>,
    request: Result<Json<SelectionsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Generated>), ApiError> {
    let Json(request) = request?;
    let selections = FormSelections::try_from(request)?;
    let report = compile(&selections);

    let id = state
        .registry
        .write()
        .await
        .insert(&selections, report.clone());
    tracing::info!(%id, fingerprint = %report.fingerprint, "generated requirements document");

    Ok((
        StatusCode::CREATED,
        Json(Generated {
            requirement_id: id,
            requirements: report,
        }),
    ))
}

#[derive(Debug, Default, Deserialize)]
pub struct DownloadQuery {
    format: Option<String>,
}

/// Renders a stored report as a file download.
#[instrument(skip(state))]
pub async fn download(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DownloadQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let format = match query.format.as_deref() {
        Some(format) => format
            .parse::<Format>()
            .map_err(|e| ApiError::bad_request(e.to_string()))?,
        None => Format::default(),
    };

    let not_found = || ApiError::not_found(format!("requirements document '{id}' not found"));
    let uuid = Uuid::parse_str(&id).map_err(|_| not_found())?;

    let registry = state.registry.read().await;
    let stored = registry.get(uuid).ok_or_else(not_found)?;
    let body = render(&stored.report, format);

    let disposition = format!("attachment; filename={}", format.file_name(uuid));
    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
