use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::{MealSlot, Weekday};
use crate::error::{ApiError, PayloadError};
use crate::format::ResponseFormat;

pub const FOOD_TYPES: [&str; 7] = [
    "protein",
    "vegetable",
    "fruit",
    "carbohydrate",
    "dairy",
    "grain",
    "snack",
];

/// Raw meal-entry fields as they arrive from either transport. Numeric
/// fields accept JSON numbers or numeric strings (form values are always
/// strings).
#[derive(Debug, Deserialize)]
pub struct FoodInput {
    pub name: String,
    pub food_type: String,
    #[serde(deserialize_with = "int_field")]
    pub food_amount: i32,
    #[serde(deserialize_with = "int_field")]
    pub calorie_amount: i32,
    pub weekday: String,
    pub time_in_day: String,
}

/// Validated, normalized meal entry ready for the store.
#[derive(Debug, Clone)]
pub struct NewFood {
    pub name: String,
    pub food_type: String,
    pub food_amount: i32,
    pub calorie_amount: i32,
    pub weekday: Weekday,
    pub time_in_day: MealSlot,
}

impl FoodInput {
    pub fn normalize(self) -> Result<NewFood, ApiError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ApiError::validation("name must not be empty"));
        }
        let food_type = self.food_type.trim().to_ascii_lowercase();
        if !FOOD_TYPES.contains(&food_type.as_str()) {
            return Err(ApiError::validation(format!(
                "unknown food_type '{food_type}'"
            )));
        }
        if self.food_amount <= 0 {
            return Err(ApiError::validation("food_amount must be positive"));
        }
        if self.calorie_amount < 0 {
            return Err(ApiError::validation("calorie_amount must not be negative"));
        }
        let weekday = Weekday::from_name(self.weekday.trim())
            .ok_or_else(|| ApiError::validation(format!("unknown weekday '{}'", self.weekday)))?;
        let time_in_day = MealSlot::from_name(self.time_in_day.trim()).ok_or_else(|| {
            ApiError::validation(format!("unknown time_in_day '{}'", self.time_in_day))
        })?;
        Ok(NewFood {
            name,
            food_type,
            food_amount: self.food_amount,
            calorie_amount: self.calorie_amount,
            weekday,
            time_in_day,
        })
    }
}

/// Adapter between the two request transports and the one normalized
/// input type: a JSON body or an HTML form both land here, decided once
/// by the Content-Type header.
pub struct FoodPayload(pub NewFood);

#[async_trait]
impl<S> FromRequest<S> for FoodPayload
where
    S: Send + Sync,
{
    type Rejection = PayloadError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let format = ResponseFormat::detect(req.uri(), req.headers());
        let wrap = |error: ApiError| PayloadError { format, error };
        let input = extract_input::<FoodInput, S>(req, state).await.map_err(wrap)?;
        Ok(Self(input.normalize().map_err(wrap)?))
    }
}

pub(crate) async fn extract_input<T, S>(req: Request, state: &S) -> Result<T, ApiError>
where
    T: serde::de::DeserializeOwned + Send + 'static,
    S: Send + Sync,
{
    let is_json = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/json"))
        .unwrap_or(false);

    if is_json {
        let Json(input) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::validation(e.to_string()))?;
        Ok(input)
    } else {
        let Form(input) = Form::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::validation(e.to_string()))?;
        Ok(input)
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedFoodResponse {
    pub message: &'static str,
    pub id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct DeletedCountResponse {
    pub message: String,
    pub deleted: u64,
}

impl DeletedCountResponse {
    pub fn new(deleted: u64) -> Self {
        Self {
            message: format!("Deleted {deleted} food items"),
            deleted,
        }
    }
}

fn int_field<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    struct IntOrString;

    impl Visitor<'_> for IntOrString {
        type Value = i32;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("an integer or a string holding an integer")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i32, E> {
            i32::try_from(v).map_err(|_| E::custom("integer out of range"))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i32, E> {
            i32::try_from(v).map_err(|_| E::custom("integer out of range"))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i32, E> {
            v.trim()
                .parse::<i32>()
                .map_err(|_| E::custom(format!("'{v}' is not an integer")))
        }
    }

    deserializer.deserialize_any(IntOrString)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_json() -> &'static str {
        r#"{
            "name": "beef",
            "food_type": "protein",
            "food_amount": 150,
            "calorie_amount": 250,
            "weekday": "monday",
            "time_in_day": "dinner"
        }"#
    }

    #[test]
    fn accepts_numeric_fields_as_numbers_or_strings() {
        let input: FoodInput = serde_json::from_str(valid_json()).unwrap();
        assert_eq!(input.food_amount, 150);

        let stringy = r#"{
            "name": "beef",
            "food_type": "protein",
            "food_amount": "150",
            "calorie_amount": "250",
            "weekday": "monday",
            "time_in_day": "dinner"
        }"#;
        let input: FoodInput = serde_json::from_str(stringy).unwrap();
        assert_eq!(input.food_amount, 150);
        assert_eq!(input.calorie_amount, 250);
    }

    #[test]
    fn missing_field_is_a_deserialization_error() {
        let missing = r#"{"name": "beef", "food_type": "protein"}"#;
        assert!(serde_json::from_str::<FoodInput>(missing).is_err());
    }

    #[test]
    fn non_numeric_amount_is_rejected() {
        let bad = r#"{
            "name": "beef",
            "food_type": "protein",
            "food_amount": "plenty",
            "calorie_amount": 250,
            "weekday": "monday",
            "time_in_day": "dinner"
        }"#;
        assert!(serde_json::from_str::<FoodInput>(bad).is_err());
    }

    #[test]
    fn normalize_produces_typed_fields() {
        let input: FoodInput = serde_json::from_str(valid_json()).unwrap();
        let food = input.normalize().unwrap();
        assert_eq!(food.weekday, Weekday::Monday);
        assert_eq!(food.time_in_day, MealSlot::Dinner);
        assert_eq!(food.food_type, "protein");
    }

    #[test]
    fn normalize_rejects_out_of_set_values() {
        let mut input: FoodInput = serde_json::from_str(valid_json()).unwrap();
        input.weekday = "someday".into();
        assert!(input.normalize().is_err());

        let mut input: FoodInput = serde_json::from_str(valid_json()).unwrap();
        input.food_type = "plastic".into();
        assert!(input.normalize().is_err());

        let mut input: FoodInput = serde_json::from_str(valid_json()).unwrap();
        input.food_amount = 0;
        assert!(input.normalize().is_err());
    }

    #[test]
    fn normalize_is_case_insensitive_on_closed_sets() {
        let mut input: FoodInput = serde_json::from_str(valid_json()).unwrap();
        input.weekday = "Monday".into();
        input.time_in_day = "DINNER".into();
        input.food_type = "Protein".into();
        let food = input.normalize().unwrap();
        assert_eq!(food.weekday, Weekday::Monday);
        assert_eq!(food.time_in_day, MealSlot::Dinner);
    }
}
