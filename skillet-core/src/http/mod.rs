mod client;

pub use client::{HttpRecipeApi, MockRecipeApi, RecipeApi};
