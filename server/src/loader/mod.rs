//! Asynchronous recipe loading pipeline.
//!
//! One load attempt runs reachability probe -> fetch -> replace-all, gated
//! by the [`gate::LoaderGate`] so at most one attempt is in flight. The
//! trigger endpoint fires this on a background task and returns immediately;
//! outcomes are only observable through the status endpoint.

pub mod gate;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

use skillet_core::{fetch_all, RecipeApi, RetryPolicy};

use crate::db::DbPool;
use crate::models::NewRecipe;
use crate::schema::recipes;
use gate::LoaderGate;

/// Records written per insert statement.
const INSERT_CHUNK_SIZE: usize = 50;

pub const MSG_ALREADY_IN_PROGRESS: &str = "Loading already in progress";
pub const MSG_API_NOT_ACCESSIBLE: &str = "External API is not accessible";
pub const MSG_NO_RECIPES: &str = "No recipes received from external API";
pub const MSG_SUCCESS: &str = "Successfully loaded recipes";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("External API error: {0}")]
    ExternalApi(#[from] skillet_core::ApiError),

    #[error("Database error: {0}")]
    Database(String),
}

/// Outcome of one load attempt. In-memory only; reported through the status
/// endpoint, never persisted.
#[derive(Debug, Clone)]
pub struct LoadResult {
    pub count: usize,
    pub message: String,
    pub success: bool,
    pub timestamp: DateTime<Utc>,
}

impl LoadResult {
    fn new(count: usize, message: impl Into<String>, success: bool) -> Self {
        Self {
            count,
            message: message.into(),
            success,
            timestamp: Utc::now(),
        }
    }
}

enum LoadOutcome {
    Unreachable,
    Empty,
    Loaded(usize),
}

/// Run one load attempt end to end.
///
/// A busy gate rejects the attempt before the fetcher is ever invoked. The
/// permit is held for the whole attempt and released on drop, so the gate
/// frees up on success, failure, and panic alike.
pub async fn run_load(pool: DbPool, api: Arc<dyn RecipeApi>, gate: Arc<LoaderGate>) -> LoadResult {
    let Some(_permit) = gate.try_acquire() else {
        tracing::warn!("recipe loading is already in progress, rejecting request");
        return LoadResult::new(0, MSG_ALREADY_IN_PROGRESS, false);
    };

    let started = Instant::now();
    tracing::info!("starting recipe data load from external API");

    match run_load_inner(&pool, api.as_ref()).await {
        Ok(LoadOutcome::Unreachable) => {
            tracing::error!("{}", MSG_API_NOT_ACCESSIBLE);
            gate.record_status(format!("Failed: {MSG_API_NOT_ACCESSIBLE}"));
            LoadResult::new(0, MSG_API_NOT_ACCESSIBLE, false)
        }
        Ok(LoadOutcome::Empty) => {
            tracing::warn!("{}", MSG_NO_RECIPES);
            gate.record_status(format!("Warning: {MSG_NO_RECIPES}"));
            LoadResult::new(0, MSG_NO_RECIPES, true)
        }
        Ok(LoadOutcome::Loaded(count)) => {
            let result = LoadResult::new(count, MSG_SUCCESS, true);
            gate.record_completed(count as i64, result.timestamp);
            tracing::info!(
                count,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "recipe load completed"
            );
            result
        }
        Err(e @ LoadError::ExternalApi(_)) => {
            let message = e.to_string();
            tracing::error!("{}", message);
            gate.record_status(format!("Failed: {message}"));
            LoadResult::new(0, message, false)
        }
        Err(e) => {
            let message = format!("Unexpected error during data loading: {e}");
            tracing::error!("{}", message);
            gate.record_status(format!("Failed: {message}"));
            LoadResult::new(0, message, false)
        }
    }
}

async fn run_load_inner(pool: &DbPool, api: &dyn RecipeApi) -> Result<LoadOutcome, LoadError> {
    if !api.check_reachable().await {
        return Ok(LoadOutcome::Unreachable);
    }

    let outcome = fetch_all(api, &RetryPolicy::default()).await?;
    if outcome.skipped > 0 {
        tracing::warn!(skipped = outcome.skipped, "skipped invalid recipe records");
    }

    // An empty fetch is not an error, and must leave the stored set alone.
    if outcome.recipes.is_empty() {
        return Ok(LoadOutcome::Empty);
    }

    tracing::info!(
        received = outcome.recipes.len(),
        "received recipes from external API"
    );

    let written = replace_all(pool, &outcome.recipes)?;
    Ok(LoadOutcome::Loaded(written))
}

/// Replace the whole stored set with `drafts`.
///
/// Delete and inserts run in one transaction so concurrent readers never
/// observe the window between delete and first insert. Each chunk inserts
/// under a savepoint: a failed chunk is logged and skipped while the rest of
/// the load proceeds, and the result carries the count actually written.
fn replace_all(pool: &DbPool, drafts: &[skillet_core::RecipeDraft]) -> Result<usize, LoadError> {
    let mut conn = pool.get().map_err(|e| LoadError::Database(e.to_string()))?;

    conn.transaction::<usize, diesel::result::Error, _>(|conn| {
        let existing: i64 = recipes::table.count().get_result(conn)?;
        if existing > 0 {
            tracing::info!(existing, "clearing existing recipes before load");
            diesel::delete(recipes::table).execute(conn)?;
        }

        let mut written = 0;
        for (index, chunk) in drafts.chunks(INSERT_CHUNK_SIZE).enumerate() {
            let rows: Vec<NewRecipe> = chunk.iter().map(NewRecipe::from).collect();
            let inserted = conn.transaction::<usize, diesel::result::Error, _>(|conn| {
                diesel::insert_into(recipes::table)
                    .values(&rows)
                    .execute(conn)
            });

            match inserted {
                Ok(n) => {
                    written += n;
                    tracing::debug!(chunk = index + 1, inserted = n, "saved recipe chunk");
                }
                Err(e) => {
                    tracing::error!(chunk = index + 1, error = %e, "failed to save recipe chunk");
                }
            }
        }

        Ok(written)
    })
    .map_err(|e| LoadError::Database(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::r2d2::ConnectionManager;
    use diesel::PgConnection;
    use serde_json::json;
    use skillet_core::{ApiError, MockRecipeApi};

    /// Lazy pool that never connects. The paths under test finish before any
    /// connection is checked out.
    fn unconnected_pool() -> DbPool {
        let manager = ConnectionManager::<PgConnection>::new("postgres://localhost/unused");
        diesel::r2d2::Pool::builder()
            .max_size(1)
            .build_unchecked(manager)
    }

    #[tokio::test]
    async fn test_busy_gate_rejects_without_invoking_fetcher() {
        let gate = Arc::new(LoaderGate::new());
        let _held = gate.try_acquire().unwrap();

        let api = Arc::new(MockRecipeApi::new().with_document(json!({"recipes": []})));
        let result = run_load(unconnected_pool(), api.clone(), gate.clone()).await;

        assert!(!result.success);
        assert_eq!(result.count, 0);
        assert_eq!(result.message, "Loading already in progress");
        assert_eq!(api.fetch_count(), 0);
        // Rejection must not overwrite the recorded history.
        assert_eq!(gate.snapshot().last_load_status, gate::STATUS_NEVER_LOADED);
    }

    #[tokio::test]
    async fn test_unreachable_api_short_circuits() {
        let gate = Arc::new(LoaderGate::new());
        let api = Arc::new(MockRecipeApi::unreachable());

        let result = run_load(unconnected_pool(), api.clone(), gate.clone()).await;

        assert!(!result.success);
        assert_eq!(result.count, 0);
        assert_eq!(result.message, "External API is not accessible");
        assert_eq!(api.fetch_count(), 0);
        assert_eq!(
            gate.snapshot().last_load_status,
            "Failed: External API is not accessible"
        );
        assert!(!gate.is_busy());
    }

    #[tokio::test]
    async fn test_empty_fetch_is_success_with_zero_count() {
        let gate = Arc::new(LoaderGate::new());
        let api = Arc::new(MockRecipeApi::new().with_document(json!({"recipes": []})));

        let result = run_load(unconnected_pool(), api, gate.clone()).await;

        assert!(result.success);
        assert_eq!(result.count, 0);
        assert_eq!(result.message, "No recipes received from external API");
        let snapshot = gate.snapshot();
        assert_eq!(
            snapshot.last_load_status,
            "Warning: No recipes received from external API"
        );
        // Not a completed load: time and count stay at their defaults.
        assert_eq!(snapshot.last_load_time, None);
        assert_eq!(snapshot.last_load_count, 0);
        assert!(!gate.is_busy());
    }

    #[tokio::test]
    async fn test_api_error_is_recorded_and_gate_released() {
        let gate = Arc::new(LoaderGate::new());
        let api = Arc::new(MockRecipeApi::new().with_error(ApiError::Status(404)));

        let result = run_load(unconnected_pool(), api, gate.clone()).await;

        assert!(!result.success);
        assert_eq!(result.count, 0);
        assert_eq!(
            result.message,
            "External API error: Recipe API returned status 404"
        );
        assert_eq!(
            gate.snapshot().last_load_status,
            "Failed: External API error: Recipe API returned status 404"
        );
        assert!(!gate.is_busy());
    }
}
