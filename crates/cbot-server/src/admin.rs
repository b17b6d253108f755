use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use cbot_core::{
    admin::{
        self, DatabaseCard, DateRange, DocumentFilter, DocumentSummary, ModuleCard,
        ModuleCardUpdate, ServiceCard,
    },
    CoreModule,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::{error::ApiError, AppState};

/// All module specification cards.
pub async fn list_modules(State(state): State<AppState>) -> Json<Vec<ModuleCard>> {
    let cards = state.cards.read().await;
    Json(cards.iter().cloned().collect())
}

/// Resource figures of the auxiliary services.
pub async fn list_services() -> Json<Vec<ServiceCard>> {
    Json(admin::service_cards().collect())
}

/// Connection facts of the supported databases.
pub async fn list_databases() -> Json<Vec<DatabaseCard>> {
    Json(admin::database_cards().collect())
}

#[derive(Debug, Serialize)]
pub struct Updated {
    message: &'static str,
    module: ModuleCard,
}

/// Applies a partial update to a module card.
#[instrument(skip(state, update))]
pub async fn update_module(
    State(state): State<AppState>,
    Path(id): Path<String>,
    update: Result<Json<ModuleCardUpdate>, JsonRejection>,
) -> Result<Json<Updated>, ApiError> {
    let Json(update) = update?;
    let mut cards = state.cards.write().await;
    let module = cards.update(&id, update)?.clone();
    Ok(Json(Updated {
        message: "Module updated.",
        module,
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    search: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    module: String,
}

impl ListQuery {
    fn filter(&self) -> Result<DocumentFilter, ApiError> {
        let date = self
            .date
            .trim()
            .parse::<DateRange>()
            .map_err(|e| ApiError::bad_request(e.to_string()))?;

        let mut filter = DocumentFilter::new().search(&self.search).date(date);
        let module = self.module.trim();
        if !module.is_empty() && module != "all" {
            let module = module
                .parse::<CoreModule>()
                .map_err(|e| ApiError::bad_request(e.to_string()))?;
            filter = filter.module(module);
        }
        Ok(filter)
    }
}

/// Generated documents matching the query, newest first.
#[instrument(skip(state))]
pub async fn list_requirements(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<DocumentSummary>>, ApiError> {
    let filter = query.filter()?;
    let registry = state.registry.read().await;
    let matching = filter
        .apply(registry.summaries(), Utc::now())
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(matching))
}

/// Deletes a generated document.
#[instrument(skip(state))]
pub async fn delete_requirement(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let not_found = || ApiError::not_found(format!("requirements document '{id}' not found"));
    let uuid = Uuid::parse_str(&id).map_err(|_| not_found())?;

    if state.registry.write().await.remove(uuid) {
        tracing::info!(%uuid, "deleted requirements document");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found())
    }
}
