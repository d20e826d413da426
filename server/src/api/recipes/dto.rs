//! Wire representations for recipe endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Recipe;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeDto {
    pub id: i64,
    pub name: String,
    pub cuisine: String,
    pub difficulty: String,
    pub prep_time_minutes: Option<i32>,
    pub cook_time_minutes: Option<i32>,
    pub servings: Option<i32>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub tags: Vec<String>,
    pub image: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<i32>,
    pub calories_per_serving: Option<i32>,
    /// Computed prep + cook time; absent components count as zero.
    pub total_time_minutes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Recipe> for RecipeDto {
    fn from(recipe: Recipe) -> Self {
        let total_time_minutes =
            recipe.prep_time_minutes.unwrap_or(0) + recipe.cook_time_minutes.unwrap_or(0);

        Self {
            id: recipe.id,
            name: recipe.name,
            cuisine: recipe.cuisine,
            difficulty: recipe.difficulty,
            prep_time_minutes: recipe.prep_time_minutes,
            cook_time_minutes: recipe.cook_time_minutes,
            servings: recipe.servings,
            ingredients: recipe.ingredients.into_iter().flatten().collect(),
            instructions: recipe.instructions.into_iter().flatten().collect(),
            tags: recipe.tags.into_iter().flatten().collect(),
            image: recipe.image,
            rating: recipe.rating,
            review_count: recipe.review_count,
            calories_per_serving: recipe.calories_per_serving,
            total_time_minutes,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        }
    }
}

/// Pagination block of the page envelope.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page_number: i64,
    pub page_size: i64,
    pub offset: i64,
}

/// Page envelope returned by every paginated endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipePage {
    pub content: Vec<RecipeDto>,
    pub pageable: PageMeta,
    pub total_elements: i64,
    pub total_pages: i64,
    pub size: i64,
    pub number: i64,
    pub number_of_elements: i64,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl RecipePage {
    pub fn new(content: Vec<RecipeDto>, page: i64, size: i64, total_elements: i64) -> Self {
        let total_pages = if total_elements == 0 {
            0
        } else {
            (total_elements + size - 1) / size
        };
        let number_of_elements = content.len() as i64;

        Self {
            pageable: PageMeta {
                page_number: page,
                page_size: size,
                offset: page * size,
            },
            total_elements,
            total_pages,
            size,
            number: page,
            number_of_elements,
            first: page == 0,
            last: page + 1 >= total_pages,
            empty: content.is_empty(),
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: i64) -> Recipe {
        Recipe {
            id,
            name: format!("Recipe {id}"),
            cuisine: "Italian".to_string(),
            difficulty: "Medium".to_string(),
            prep_time_minutes: Some(10),
            cook_time_minutes: None,
            servings: Some(2),
            ingredients: vec![Some("Flour".to_string()), None],
            instructions: vec![Some("Mix".to_string())],
            tags: vec![Some("Quick".to_string())],
            image: None,
            rating: Some(4.0),
            review_count: Some(5),
            calories_per_serving: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_total_time_treats_absent_components_as_zero() {
        let dto = RecipeDto::from(recipe(1));
        assert_eq!(dto.total_time_minutes, 10);
    }

    #[test]
    fn test_array_columns_flatten_out_nulls() {
        let dto = RecipeDto::from(recipe(1));
        assert_eq!(dto.ingredients, vec!["Flour"]);
    }

    #[test]
    fn test_page_math_middle_page() {
        let page = RecipePage::new(vec![RecipeDto::from(recipe(1))], 1, 20, 45);
        assert_eq!(page.total_pages, 3);
        assert!(!page.first);
        assert!(!page.last);
        assert_eq!(page.pageable.offset, 20);
        assert_eq!(page.number_of_elements, 1);
    }

    #[test]
    fn test_page_math_last_partial_page() {
        let page = RecipePage::new(vec![], 2, 20, 45);
        assert_eq!(page.total_pages, 3);
        assert!(!page.first);
        assert!(page.last);
    }

    #[test]
    fn test_page_math_empty_result() {
        let page = RecipePage::new(vec![], 0, 20, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.first);
        assert!(page.last);
        assert!(page.empty);
    }

    #[test]
    fn test_page_envelope_field_names() {
        let value = serde_json::to_value(RecipePage::new(vec![], 0, 20, 0)).unwrap();
        assert!(value.get("totalElements").is_some());
        assert!(value.get("totalPages").is_some());
        assert!(value.get("numberOfElements").is_some());
        assert!(value["pageable"].get("pageNumber").is_some());
        assert!(value["pageable"].get("pageSize").is_some());
    }
}
