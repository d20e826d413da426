//! Full fetch of the upstream recipe document.

use serde_json::Value;

use crate::error::ApiError;
use crate::http::RecipeApi;
use crate::map::map_recipe;
use crate::retry::RetryPolicy;
use crate::types::RecipeDraft;

/// Result of one successful fetch: the usable drafts plus how many records
/// were skipped for missing required fields or per-record mapping failures.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    pub recipes: Vec<RecipeDraft>,
    pub skipped: usize,
}

/// Fetch the configured document under `policy` and map every record.
///
/// Transport/5xx failures are retried per the policy before surfacing as an
/// [`ApiError`]; individual bad records never fail the batch.
pub async fn fetch_all(api: &dyn RecipeApi, policy: &RetryPolicy) -> Result<FetchOutcome, ApiError> {
    let document = policy.run(|| api.fetch_document()).await?;
    Ok(map_document(&document))
}

/// Map the top-level document. A missing or non-array `recipes` field maps
/// to an empty outcome, matching the upstream contract for "nothing to load".
pub fn map_document(document: &Value) -> FetchOutcome {
    let Some(items) = document.get("recipes").and_then(Value::as_array) else {
        tracing::warn!("recipe document has no 'recipes' array");
        return FetchOutcome {
            recipes: Vec::new(),
            skipped: 0,
        };
    };

    let mut recipes = Vec::with_capacity(items.len());
    let mut skipped = 0;

    for node in items {
        match map_recipe(node) {
            Some(draft) => recipes.push(draft),
            None => skipped += 1,
        }
    }

    tracing::info!(
        mapped = recipes.len(),
        skipped,
        "mapped recipe records from external API"
    );

    FetchOutcome { recipes, skipped }
}
