//! # Authored recipes
//!
//! [`RecipeDraft`] is the create-recipe form as a value. It converts into a
//! record with the same shape the search API returns, so authored and fetched
//! recipes render through the same detail page:
//!
//! | Draft field | Record field |
//! |-------------|--------------|
//! | `title` | `id`, `title` |
//! | `ingredients` | `extendedIngredients[]` with `measures.us` / `measures.metric` |
//! | `steps` | `analyzedInstructions[0].steps[]` numbered from 1 |
//! | `preparation_minutes`, `cooking_minutes` | same, plus `readyInMinutes` when both are set |
//!
//! [`RecipeDraft::from_recipe`] is the inverse used when editing.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use store::{Recipe, RecipeId};

use crate::error::AppError;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientDraft {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub title: String,
    pub servings: u32,
    pub ingredients: Vec<IngredientDraft>,
    pub steps: Vec<String>,
    pub summary: String,
    pub nutrition: String,
    pub preparation_minutes: Option<u32>,
    pub cooking_minutes: Option<u32>,
    pub image: Option<String>,
    pub average_rating: Option<f32>,
}

impl Default for RecipeDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            servings: 1,
            ingredients: Vec::new(),
            steps: Vec::new(),
            summary: String::new(),
            nutrition: String::new(),
            preparation_minutes: None,
            cooking_minutes: None,
            image: None,
            average_rating: None,
        }
    }
}

fn number(x: f64) -> Value {
    serde_json::Number::from_f64(x)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

fn measure(amount: f64, unit: &str) -> Value {
    json!({ "amount": number(amount), "unitShort": unit, "unitLong": unit })
}

impl RecipeDraft {
    /// Authored recipes are identified by their trimmed title.
    pub fn id(&self) -> Result<RecipeId, AppError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::InvalidDraft("title is required".to_string()));
        }
        Ok(RecipeId::from(title))
    }

    pub fn to_recipe(&self) -> Result<Recipe, AppError> {
        let id = self.id()?;

        let ingredients: Vec<Value> = self
            .ingredients
            .iter()
            .filter(|i| !i.name.trim().is_empty())
            .map(|i| {
                let unit = i.unit.trim();
                json!({
                    "name": i.name.trim(),
                    "amount": number(i.amount),
                    "unit": unit,
                    "measures": {
                        "us": measure(i.amount, unit),
                        "metric": measure(i.amount, unit),
                    },
                })
            })
            .collect();

        let steps: Vec<Value> = self
            .steps
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .enumerate()
            .map(|(i, step)| json!({ "number": i + 1, "step": step }))
            .collect();

        let mut record = json!({
            "id": id.as_str(),
            "title": id.as_str(),
            "servings": self.servings.max(1),
            "summary": self.summary,
            "nutrition": self.nutrition,
            "extendedIngredients": ingredients,
            "analyzedInstructions": [{ "name": "", "steps": steps }],
        });

        if let Value::Object(fields) = &mut record {
            if let Some(m) = self.preparation_minutes {
                fields.insert("preparationMinutes".into(), json!(m));
            }
            if let Some(m) = self.cooking_minutes {
                fields.insert("cookingMinutes".into(), json!(m));
            }
            if let (Some(p), Some(c)) = (self.preparation_minutes, self.cooking_minutes) {
                fields.insert("readyInMinutes".into(), json!(p + c));
            }
            if let Some(image) = self.image.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
                fields.insert("image".into(), json!(image));
            }
            if let Some(rating) = self.average_rating {
                fields.insert("averageRating".into(), number(f64::from(rating)));
            }
        }
        Ok(Recipe::new(record))
    }

    /// Rebuild a draft from a stored record, for editing.
    pub fn from_recipe(recipe: &Recipe) -> Self {
        let value = recipe.as_value();
        let text = |field: &str| {
            value
                .get(field)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let minutes = |field: &str| {
            value
                .get(field)
                .and_then(as_u64)
                .and_then(|m| u32::try_from(m).ok())
        };

        let ingredients = value
            .get("extendedIngredients")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .map(|i| IngredientDraft {
                        name: i.get("name").and_then(Value::as_str).unwrap_or_default().to_string(),
                        amount: i.get("amount").and_then(as_f64).unwrap_or_default(),
                        unit: i.get("unit").and_then(Value::as_str).unwrap_or_default().to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        // Older records stored a single instruction object instead of a list.
        let instructions = value.get("analyzedInstructions").and_then(|v| match v {
            Value::Array(items) => items.first(),
            other => Some(other),
        });
        let steps = instructions
            .and_then(|i| i.get("steps"))
            .and_then(Value::as_array)
            .map(|steps| {
                steps
                    .iter()
                    .filter_map(|s| s.get("step").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let image = Some(text("image")).filter(|s| !s.is_empty());

        Self {
            title: recipe.title().unwrap_or_default().to_string(),
            servings: value
                .get("servings")
                .and_then(as_u64)
                .and_then(|s| u32::try_from(s).ok())
                .unwrap_or(1)
                .max(1),
            ingredients,
            steps,
            summary: text("summary"),
            nutrition: text("nutrition"),
            preparation_minutes: minutes("preparationMinutes"),
            cooking_minutes: minutes("cookingMinutes"),
            image,
            average_rating: value.get("averageRating").and_then(as_f64).map(|r| r as f32),
        }
    }
}

/// Numbers in authored records may have been saved as strings by older
/// versions of the form.
fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn scale_amount(fields: &mut Map<String, Value>, factor: f64) {
    if let Some(amount) = fields.get("amount").and_then(as_f64) {
        fields.insert("amount".into(), number(round2(amount * factor)));
    }
}

/// Scale ingredient amounts of `recipe` to `servings` (at least one).
pub fn scale_servings(recipe: &Recipe, servings: u32) -> Recipe {
    let target = servings.max(1);
    let mut value = recipe.as_value().clone();
    let original = value
        .get("servings")
        .and_then(as_u64)
        .filter(|s| *s > 0)
        .unwrap_or(1);
    let factor = f64::from(target) / original as f64;

    if let Some(items) = value
        .get_mut("extendedIngredients")
        .and_then(Value::as_array_mut)
    {
        for item in items.iter_mut().filter_map(Value::as_object_mut) {
            scale_amount(item, factor);
            if let Some(measures) = item.get_mut("measures").and_then(Value::as_object_mut) {
                for system in measures.values_mut().filter_map(Value::as_object_mut) {
                    scale_amount(system, factor);
                }
            }
        }
    }
    if let Value::Object(fields) = &mut value {
        fields.insert("servings".into(), json!(target));
    }
    Recipe::new(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> RecipeDraft {
        RecipeDraft {
            title: "  Grandma's Soup ".to_string(),
            servings: 2,
            ingredients: vec![
                IngredientDraft {
                    name: "Carrot".to_string(),
                    amount: 3.0,
                    unit: "pieces".to_string(),
                },
                IngredientDraft::default(),
            ],
            steps: vec!["Chop".to_string(), " ".to_string(), "Simmer".to_string()],
            preparation_minutes: Some(10),
            cooking_minutes: Some(35),
            image: Some(String::new()),
            ..RecipeDraft::default()
        }
    }

    #[test]
    fn test_draft_record_shape() {
        let recipe = draft().to_recipe().unwrap();
        let v = recipe.as_value();

        assert_eq!(recipe.id(), Some(RecipeId::from("Grandma's Soup")));
        assert_eq!(v["extendedIngredients"].as_array().unwrap().len(), 1);
        assert_eq!(v["extendedIngredients"][0]["measures"]["metric"]["unitShort"], "pieces");
        assert_eq!(v["analyzedInstructions"][0]["steps"][1]["number"], 2);
        assert_eq!(v["analyzedInstructions"][0]["steps"][1]["step"], "Simmer");
        assert_eq!(v["readyInMinutes"], 45);
        assert!(v.get("image").is_none());
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let draft = RecipeDraft {
            title: "   ".to_string(),
            ..RecipeDraft::default()
        };
        assert!(matches!(draft.to_recipe(), Err(AppError::InvalidDraft(_))));
    }

    #[test]
    fn test_edit_roundtrip_keeps_content() {
        let original = draft();
        let rebuilt = RecipeDraft::from_recipe(&original.to_recipe().unwrap());

        assert_eq!(rebuilt.title, "Grandma's Soup");
        assert_eq!(rebuilt.servings, 2);
        assert_eq!(rebuilt.ingredients, vec![original.ingredients[0].clone()]);
        assert_eq!(rebuilt.steps, vec!["Chop", "Simmer"]);
        assert_eq!(rebuilt.cooking_minutes, Some(35));
        assert_eq!(rebuilt.image, None);
    }

    #[test]
    fn test_from_legacy_record() {
        let recipe = Recipe::new(json!({
            "id": "Toast",
            "title": "Toast",
            "servings": "3",
            "preparationMinutes": "5",
            "analyzedInstructions": { "name": "", "steps": [{ "number": 1, "step": "Toast it" }] },
        }));
        let draft = RecipeDraft::from_recipe(&recipe);
        assert_eq!(draft.servings, 3);
        assert_eq!(draft.preparation_minutes, Some(5));
        assert_eq!(draft.steps, vec!["Toast it"]);
    }

    #[test]
    fn test_out_of_range_numbers_are_dropped() {
        let recipe = Recipe::new(json!({
            "title": "Feast",
            "servings": 5_000_000_000u64,
            "cookingMinutes": 4_294_967_296u64,
            "preparationMinutes": 20,
        }));
        let draft = RecipeDraft::from_recipe(&recipe);
        assert_eq!(draft.servings, 1);
        assert_eq!(draft.cooking_minutes, None);
        assert_eq!(draft.preparation_minutes, Some(20));
    }

    #[test]
    fn test_scale_servings() {
        let recipe = draft().to_recipe().unwrap();
        let doubled = scale_servings(&recipe, 4);
        let v = doubled.as_value();

        assert_eq!(v["servings"], 4);
        assert_eq!(v["extendedIngredients"][0]["amount"].as_f64(), Some(6.0));
        assert_eq!(
            v["extendedIngredients"][0]["measures"]["us"]["amount"].as_f64(),
            Some(6.0)
        );

        let single = scale_servings(&recipe, 0);
        assert_eq!(single.as_value()["servings"], 1);
        assert_eq!(single.as_value()["extendedIngredients"][0]["amount"].as_f64(), Some(1.5));
    }
}
