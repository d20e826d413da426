use chrono::{DateTime, Utc};
use diesel::prelude::*;
use skillet_core::RecipeDraft;

#[derive(Queryable, Selectable, Debug)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub cuisine: String,
    pub difficulty: String,
    pub prep_time_minutes: Option<i32>,
    pub cook_time_minutes: Option<i32>,
    pub servings: Option<i32>,
    pub ingredients: Vec<Option<String>>,
    pub instructions: Vec<Option<String>>,
    pub tags: Vec<Option<String>>,
    pub image: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<i32>,
    pub calories_per_serving: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe {
    pub name: String,
    pub cuisine: String,
    pub difficulty: String,
    pub prep_time_minutes: Option<i32>,
    pub cook_time_minutes: Option<i32>,
    pub servings: Option<i32>,
    pub ingredients: Vec<Option<String>>,
    pub instructions: Vec<Option<String>>,
    pub tags: Vec<Option<String>>,
    pub image: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<i32>,
    pub calories_per_serving: Option<i32>,
}

impl From<&RecipeDraft> for NewRecipe {
    fn from(draft: &RecipeDraft) -> Self {
        Self {
            name: draft.name.clone(),
            cuisine: draft.cuisine.clone(),
            difficulty: draft.difficulty.as_str().to_string(),
            prep_time_minutes: draft.prep_time_minutes,
            cook_time_minutes: draft.cook_time_minutes,
            servings: draft.servings,
            ingredients: draft.ingredients.iter().cloned().map(Some).collect(),
            instructions: draft.instructions.iter().cloned().map(Some).collect(),
            tags: draft.tags.iter().cloned().map(Some).collect(),
            image: draft.image.clone(),
            rating: draft.rating,
            review_count: draft.review_count,
            calories_per_serving: draft.calories_per_serving,
        }
    }
}
