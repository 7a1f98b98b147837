use axum::async_trait;
use axum::extract::{FromRequest, Request};
use serde::Deserialize;

use crate::error::{ApiError, PayloadError};
use crate::foods::dto::extract_input;
use crate::format::ResponseFormat;

/// Raw grocery-item fields. The HTML form posts the name under
/// `food-name`; JSON clients may use plain `name`.
#[derive(Debug, Deserialize)]
pub struct GroceryInput {
    #[serde(rename = "food-name", alias = "name")]
    pub name: String,
    pub amount: String,
}

#[derive(Debug, Clone)]
pub struct NewGroceryItem {
    pub name: String,
    pub amount: String,
}

impl GroceryInput {
    pub fn normalize(self) -> Result<NewGroceryItem, ApiError> {
        let name = self.name.trim().to_string();
        let amount = self.amount.trim().to_string();
        if name.is_empty() {
            return Err(ApiError::validation("item name must not be empty"));
        }
        if amount.is_empty() {
            return Err(ApiError::validation("amount must not be empty"));
        }
        Ok(NewGroceryItem { name, amount })
    }
}

pub struct GroceryPayload(pub NewGroceryItem);

#[async_trait]
impl<S> FromRequest<S> for GroceryPayload
where
    S: Send + Sync,
{
    type Rejection = PayloadError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let format = ResponseFormat::detect(req.uri(), req.headers());
        let wrap = |error: ApiError| PayloadError { format, error };
        let input = extract_input::<GroceryInput, S>(req, state)
            .await
            .map_err(wrap)?;
        Ok(Self(input.normalize().map_err(wrap)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_field_spellings() {
        let form: GroceryInput =
            serde_json::from_str(r#"{"food-name": "Milk", "amount": "1 gallon"}"#).unwrap();
        assert_eq!(form.name, "Milk");

        let json: GroceryInput =
            serde_json::from_str(r#"{"name": "Milk", "amount": "1 gallon"}"#).unwrap();
        assert_eq!(json.name, "Milk");
    }

    #[test]
    fn blank_fields_are_validation_errors() {
        let input = GroceryInput {
            name: "  ".into(),
            amount: "1".into(),
        };
        assert!(input.normalize().is_err());

        let input = GroceryInput {
            name: "Milk".into(),
            amount: "".into(),
        };
        assert!(input.normalize().is_err());
    }
}
