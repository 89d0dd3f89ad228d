use serde_json::{Map, Value};

use crate::domain::product::{Category, ProductRequest, ShippingType};
use crate::errors::ValidationError;

pub const PRODUCT_NAME: &str = "product_name";
pub const PRODUCT_WEIGHT_KG: &str = "product_weight_kg";
pub const CATEGORY: &str = "category";
pub const FRAGILITY_INDEX: &str = "fragility_index";
pub const SHIPPING_TYPE: &str = "shipping_type";

/// Checked in this order; the first absent field is the one reported.
pub const REQUIRED_FIELDS: [&str; 5] =
    [PRODUCT_NAME, PRODUCT_WEIGHT_KG, CATEGORY, FRAGILITY_INDEX, SHIPPING_TYPE];

const CATEGORY_VALUES: &str = "Food|Electronics|Cosmetics|Pharmacy";
const SHIPPING_VALUES: &str = "Air|Road|Sea";

/// Validates a raw caller payload into a [`ProductRequest`].
///
/// Completeness is checked first, then types, then numeric ranges, then enum
/// membership, so a payload with several problems reports the earliest class.
pub fn validate(raw: &Value) -> Result<ProductRequest, ValidationError> {
    let Some(fields) = raw.as_object() else {
        return Err(ValidationError::TypeError { field: "request body", expected: "a JSON object" });
    };

    if let Some(missing) = REQUIRED_FIELDS.into_iter().find(|field| !fields.contains_key(*field)) {
        return Err(ValidationError::MissingField { field: missing });
    }

    let name = string_field(fields, PRODUCT_NAME)?;
    let weight_kg = number_field(fields, PRODUCT_WEIGHT_KG)?;
    let fragility_index = number_field(fields, FRAGILITY_INDEX)?;
    let category = string_field(fields, CATEGORY)?;
    let shipping_type = string_field(fields, SHIPPING_TYPE)?;

    if !(0.0..=1.0).contains(&fragility_index) {
        return Err(ValidationError::RangeError {
            field: FRAGILITY_INDEX,
            constraint: "must be between 0 and 1",
        });
    }
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(ValidationError::RangeError {
            field: PRODUCT_WEIGHT_KG,
            constraint: "must be greater than 0",
        });
    }

    let category = category.parse::<Category>().map_err(|_| ValidationError::InvalidEnum {
        field: CATEGORY,
        value: category.to_owned(),
        expected: CATEGORY_VALUES,
    })?;
    let shipping_type =
        shipping_type.parse::<ShippingType>().map_err(|_| ValidationError::InvalidEnum {
            field: SHIPPING_TYPE,
            value: shipping_type.to_owned(),
            expected: SHIPPING_VALUES,
        })?;

    Ok(ProductRequest {
        name: name.to_owned(),
        weight_kg,
        category,
        fragility_index,
        shipping_type,
    })
}

fn number_field(fields: &Map<String, Value>, field: &'static str) -> Result<f64, ValidationError> {
    fields
        .get(field)
        .and_then(Value::as_f64)
        .ok_or(ValidationError::TypeError { field, expected: "a number" })
}

fn string_field<'a>(
    fields: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    fields
        .get(field)
        .and_then(Value::as_str)
        .ok_or(ValidationError::TypeError { field, expected: "a string" })
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::validate;
    use crate::domain::product::{Category, ShippingType};
    use crate::errors::ValidationError;

    fn payload() -> Value {
        json!({
            "product_name": "Granola Box",
            "product_weight_kg": 2.0,
            "category": "Food",
            "fragility_index": 0.5,
            "shipping_type": "Road"
        })
    }

    fn without(field: &str) -> Value {
        let mut value = payload();
        value.as_object_mut().expect("payload is an object").remove(field);
        value
    }

    fn with(field: &str, replacement: Value) -> Value {
        let mut value = payload();
        value[field] = replacement;
        value
    }

    #[test]
    fn accepts_complete_payload() {
        let request = validate(&payload()).expect("payload is valid");

        assert_eq!(request.name, "Granola Box");
        assert_eq!(request.weight_kg, 2.0);
        assert_eq!(request.category, Category::Food);
        assert_eq!(request.fragility_index, 0.5);
        assert_eq!(request.shipping_type, ShippingType::Road);
    }

    #[test]
    fn integer_numbers_are_accepted() {
        let request = validate(&with("product_weight_kg", json!(3))).expect("integers are numbers");
        assert_eq!(request.weight_kg, 3.0);

        let request = validate(&with("fragility_index", json!(1))).expect("1 is in range");
        assert_eq!(request.fragility_index, 1.0);
    }

    #[test]
    fn missing_fragility_index_is_reported() {
        assert_eq!(
            validate(&without("fragility_index")),
            Err(ValidationError::MissingField { field: "fragility_index" })
        );
    }

    #[test]
    fn first_missing_field_wins() {
        assert_eq!(
            validate(&json!({ "category": "Food" })),
            Err(ValidationError::MissingField { field: "product_name" })
        );
    }

    #[test]
    fn non_numeric_weight_is_a_type_error() {
        let error = validate(&with("product_weight_kg", json!("2kg"))).expect_err("string weight");
        assert_eq!(error.kind(), "type_error");
        assert_eq!(error.to_string(), "product_weight_kg must be a number");

        let error = validate(&with("fragility_index", Value::Null)).expect_err("null fragility");
        assert_eq!(
            error,
            ValidationError::TypeError { field: "fragility_index", expected: "a number" }
        );
    }

    #[test]
    fn fragility_out_of_range_is_a_range_error() {
        let error =
            validate(&with("fragility_index", json!(1.5))).expect_err("1.5 is out of range");
        assert_eq!(error.kind(), "range_error");

        let error = validate(&with("fragility_index", json!(-0.1))).expect_err("negative");
        assert_eq!(error.kind(), "range_error");
    }

    #[test]
    fn non_positive_weight_is_a_range_error() {
        for weight in [json!(0), json!(-2.5)] {
            let error = validate(&with("product_weight_kg", weight)).expect_err("weight <= 0");
            assert_eq!(
                error,
                ValidationError::RangeError {
                    field: "product_weight_kg",
                    constraint: "must be greater than 0"
                }
            );
        }
    }

    #[test]
    fn unknown_labels_are_invalid_enums() {
        let error = validate(&with("category", json!("Toys"))).expect_err("unknown category");
        assert!(matches!(
            error,
            ValidationError::InvalidEnum { field: "category", ref value, .. } if value == "Toys"
        ));

        let error = validate(&with("shipping_type", json!("Rail"))).expect_err("unknown shipping");
        assert_eq!(error.kind(), "invalid_enum");
    }

    #[test]
    fn non_object_body_is_rejected() {
        let error = validate(&json!([1, 2, 3])).expect_err("arrays are not requests");
        assert_eq!(error.kind(), "type_error");
    }
}
