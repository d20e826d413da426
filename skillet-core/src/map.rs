//! Typed mapping from external API JSON into [`RecipeDraft`]s.
//!
//! Each record is mapped independently: a record missing a required field is
//! skipped, never fatal. Optional fields of the wrong JSON type map to unset.

use serde_json::Value;

use crate::types::{Difficulty, RecipeDraft};

/// Map one JSON object into a draft. Returns `None` when the record is
/// unusable (missing or blank `name`/`cuisine`).
pub fn map_recipe(node: &Value) -> Option<RecipeDraft> {
    let name = text_value(node, "name");
    let cuisine = text_value(node, "cuisine");

    let (Some(name), Some(cuisine)) = (name, cuisine) else {
        tracing::debug!("skipping recipe with missing required fields");
        return None;
    };

    let difficulty = text_value(node, "difficulty")
        .and_then(|s| Difficulty::parse(&s))
        .unwrap_or_default();

    Some(RecipeDraft {
        name,
        cuisine,
        difficulty,
        prep_time_minutes: int_value(node, "prepTimeMinutes").filter(|m| (0..=1440).contains(m)),
        cook_time_minutes: int_value(node, "cookTimeMinutes").filter(|m| (0..=1440).contains(m)),
        servings: int_value(node, "servings").filter(|s| (1..=50).contains(s)),
        ingredients: string_list(node, "ingredients"),
        instructions: string_list(node, "instructions"),
        tags: string_list(node, "tags"),
        image: text_value(node, "image"),
        rating: float_value(node, "rating").filter(|r| (0.0..=5.0).contains(r)),
        review_count: int_value(node, "reviewCount").filter(|c| *c >= 0),
        calories_per_serving: int_value(node, "caloriesPerServing")
            .filter(|c| (0..=5000).contains(c)),
    })
}

/// String field, trimmed. Blank-after-trim and non-string values are absent.
fn text_value(node: &Value, field: &str) -> Option<String> {
    node.get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Integer field with truncating coercion: a JSON `4.7` reads as `4`.
fn int_value(node: &Value, field: &str) -> Option<i32> {
    node.get(field).and_then(Value::as_f64).map(|f| f as i32)
}

fn float_value(node: &Value, field: &str) -> Option<f64> {
    node.get(field).and_then(Value::as_f64)
}

/// String array field. Non-string and blank entries are dropped; a missing
/// or non-array field is an empty list.
fn string_list(node: &Value, field: &str) -> Vec<String> {
    node.get(field)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_full_record() {
        let node = json!({
            "name": "Classic Margherita Pizza",
            "cuisine": "Italian",
            "difficulty": "Easy",
            "prepTimeMinutes": 20,
            "cookTimeMinutes": 15,
            "servings": 4,
            "ingredients": ["Pizza dough", "Tomato sauce", "Fresh mozzarella"],
            "instructions": ["Preheat oven", "Roll out dough", "Bake"],
            "tags": ["Pizza", "Italian"],
            "image": "https://example.com/pizza.jpg",
            "rating": 4.6,
            "reviewCount": 98,
            "caloriesPerServing": 300
        });

        let draft = map_recipe(&node).unwrap();
        assert_eq!(draft.name, "Classic Margherita Pizza");
        assert_eq!(draft.cuisine, "Italian");
        assert_eq!(draft.difficulty, Difficulty::Easy);
        assert_eq!(draft.prep_time_minutes, Some(20));
        assert_eq!(draft.cook_time_minutes, Some(15));
        assert_eq!(draft.servings, Some(4));
        assert_eq!(draft.ingredients.len(), 3);
        assert_eq!(draft.instructions.len(), 3);
        assert_eq!(draft.tags, vec!["Pizza", "Italian"]);
        assert_eq!(draft.rating, Some(4.6));
        assert_eq!(draft.review_count, Some(98));
        assert_eq!(draft.calories_per_serving, Some(300));
    }

    #[test]
    fn test_missing_name_is_skipped() {
        let node = json!({"cuisine": "Italian"});
        assert!(map_recipe(&node).is_none());
    }

    #[test]
    fn test_missing_cuisine_is_skipped() {
        let node = json!({"name": "Pasta"});
        assert!(map_recipe(&node).is_none());
    }

    #[test]
    fn test_blank_required_field_is_skipped() {
        let node = json!({"name": "   ", "cuisine": "Italian"});
        assert!(map_recipe(&node).is_none());
    }

    #[test]
    fn test_required_fields_are_trimmed() {
        let node = json!({"name": "  Pasta  ", "cuisine": " Italian "});
        let draft = map_recipe(&node).unwrap();
        assert_eq!(draft.name, "Pasta");
        assert_eq!(draft.cuisine, "Italian");
    }

    #[test]
    fn test_difficulty_defaults_to_medium() {
        let node = json!({"name": "Pasta", "cuisine": "Italian"});
        assert_eq!(map_recipe(&node).unwrap().difficulty, Difficulty::Medium);

        let node = json!({"name": "Pasta", "cuisine": "Italian", "difficulty": ""});
        assert_eq!(map_recipe(&node).unwrap().difficulty, Difficulty::Medium);

        let node = json!({"name": "Pasta", "cuisine": "Italian", "difficulty": "impossible"});
        assert_eq!(map_recipe(&node).unwrap().difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_integer_coercion_truncates_floats() {
        let node = json!({"name": "Pasta", "cuisine": "Italian", "prepTimeMinutes": 4.7});
        assert_eq!(map_recipe(&node).unwrap().prep_time_minutes, Some(4));
    }

    #[test]
    fn test_wrong_typed_optionals_map_to_unset() {
        let node = json!({
            "name": "Pasta",
            "cuisine": "Italian",
            "prepTimeMinutes": "twenty",
            "rating": "high",
            "image": 7,
            "ingredients": "flour"
        });
        let draft = map_recipe(&node).unwrap();
        assert_eq!(draft.prep_time_minutes, None);
        assert_eq!(draft.rating, None);
        assert_eq!(draft.image, None);
        assert!(draft.ingredients.is_empty());
    }

    #[test]
    fn test_out_of_range_values_map_to_unset() {
        let node = json!({
            "name": "Pasta",
            "cuisine": "Italian",
            "prepTimeMinutes": 2000,
            "servings": 0,
            "rating": 9.5,
            "reviewCount": -3,
            "caloriesPerServing": 99999
        });
        let draft = map_recipe(&node).unwrap();
        assert_eq!(draft.prep_time_minutes, None);
        assert_eq!(draft.servings, None);
        assert_eq!(draft.rating, None);
        assert_eq!(draft.review_count, None);
        assert_eq!(draft.calories_per_serving, None);
    }

    #[test]
    fn test_string_list_drops_blank_and_non_string_entries() {
        let node = json!({
            "name": "Pasta",
            "cuisine": "Italian",
            "tags": ["Dinner", "  ", 42, "Quick"]
        });
        assert_eq!(map_recipe(&node).unwrap().tags, vec!["Dinner", "Quick"]);
    }
}
