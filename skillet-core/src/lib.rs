pub mod error;
pub mod fetch;
pub mod http;
pub mod map;
pub mod retry;
pub mod types;

pub use error::ApiError;
pub use fetch::{fetch_all, map_document, FetchOutcome};
pub use http::{HttpRecipeApi, MockRecipeApi, RecipeApi};
pub use retry::RetryPolicy;
pub use types::{Difficulty, RecipeDraft};
