use serde::Serialize;
use serde_json::Value;

use crate::schema::{Keyed, assign_ids, coerce};

/// Numeric input of a calculator
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorField {
	/// Identifier, also the variable name in the formula
	pub id: String,
	/// Input label
	pub label: String,
	/// Lower bound
	pub min: f64,
	/// Upper bound
	pub max: f64,
	/// Input step
	pub step: f64,
	/// Initial value
	pub default_value: f64,
}

impl Default for CalculatorField {
	fn default() -> Self {
		Self {
			id: String::new(),
			label: "Value".to_string(),
			min: 0.0,
			max: 100.0,
			step: 1.0,
			default_value: 0.0,
		}
	}
}

impl CalculatorField {
	fn field(id: &str, label: &str, min: f64, max: f64, step: f64, default_value: f64) -> Self {
		Self {
			id: id.to_string(),
			label: label.to_string(),
			min,
			max,
			step,
			default_value,
		}
	}

	fn coerce(value: &Value) -> Self {
		let d = Self::default();
		Self {
			id: coerce::string(value.get("id"), ""),
			label: coerce::string(value.get("label"), &d.label),
			min: coerce::number(value.get("min"), d.min),
			max: coerce::number(value.get("max"), d.max),
			step: coerce::number(value.get("step"), d.step),
			default_value: coerce::number(value.get("defaultValue"), d.default_value),
		}
	}

	/// Clamps `value` into `[min, max]`. Inverted bounds leave it unchanged.
	pub fn clamp(&self, value: f64) -> f64 {
		if self.min <= self.max {
			value.clamp(self.min, self.max)
		} else {
			value
		}
	}
}

impl Keyed for CalculatorField {
	fn id(&self) -> &str {
		&self.id
	}

	fn set_id(&mut self, id: String) {
		self.id = id;
	}
}

/// Attributes of the `calculator` block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorAttributes {
	/// Heading
	pub title: String,
	/// Text under the heading
	pub description: String,
	/// Numeric inputs
	pub fields: Vec<CalculatorField>,
	/// Arithmetic expression over field ids
	pub formula: String,
	/// Label of the result line
	pub result_label: String,
	/// Unit prefix of the result, e.g. `$`
	pub result_unit: String,
}

impl Default for CalculatorAttributes {
	fn default() -> Self {
		Self {
			title: "Cost Calculator".to_string(),
			description: "Estimate your total cost".to_string(),
			fields: vec![
				CalculatorField::field("tuition", "Annual tuition", 0.0, 100_000.0, 500.0, 20_000.0),
				CalculatorField::field("years", "Years of study", 1.0, 8.0, 1.0, 4.0),
			],
			formula: "tuition * years".to_string(),
			result_label: "Total cost".to_string(),
			result_unit: "$".to_string(),
		}
	}
}

impl CalculatorAttributes {
	pub(crate) fn coerce(value: &Value) -> Self {
		let d = Self::default();
		let mut fields = coerce::entries(
			value.get("fields"),
			&d.fields,
			CalculatorField::coerce,
			|label| CalculatorField {
				label,
				..CalculatorField::default()
			},
		);
		assign_ids(&mut fields, "field");

		Self {
			title: coerce::string(value.get("title"), &d.title),
			description: coerce::string(value.get("description"), &d.description),
			fields,
			formula: coerce::string(value.get("formula"), &d.formula),
			result_label: coerce::string(value.get("resultLabel"), &d.result_label),
			result_unit: coerce::string(value.get("resultUnit"), &d.result_unit),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_numeric_strings_are_parsed() {
		// Arrange
		let raw = json!({
			"fields": [{"id": "rent", "min": "100", "max": "2000", "step": 50, "defaultValue": "800"}],
			"formula": "rent * 12"
		});

		// Act
		let attrs = CalculatorAttributes::coerce(&raw);

		// Assert
		let field = &attrs.fields[0];
		assert_eq!(field.id, "rent");
		assert_eq!(field.label, "Value");
		assert_eq!((field.min, field.max, field.step), (100.0, 2000.0, 50.0));
		assert_eq!(field.default_value, 800.0);
		assert_eq!(attrs.title, "Cost Calculator");
	}

	#[rstest]
	fn test_bare_string_fields_get_positional_ids() {
		let attrs = CalculatorAttributes::coerce(&json!({"fields": ["Rent", "Food"]}));
		let ids: Vec<_> = attrs.fields.iter().map(|f| f.id.as_str()).collect();
		assert_eq!(ids, vec!["field-1", "field-2"]);
		assert_eq!(attrs.fields[1].label, "Food");
	}

	#[rstest]
	#[case(-5.0, 0.0)]
	#[case(50.0, 50.0)]
	#[case(500.0, 100.0)]
	fn test_clamp(#[case] input: f64, #[case] expected: f64) {
		assert_eq!(CalculatorField::default().clamp(input), expected);
	}

	#[rstest]
	fn test_clamp_with_inverted_bounds_is_identity() {
		let field = CalculatorField {
			min: 10.0,
			max: 1.0,
			..CalculatorField::default()
		};
		assert_eq!(field.clamp(42.0), 42.0);
	}

	#[rstest]
	fn test_serializes_camel_case() {
		let value = serde_json::to_value(CalculatorAttributes::default()).unwrap();
		assert_eq!(value["resultUnit"], json!("$"));
		assert_eq!(value["fields"][0]["defaultValue"], json!(20000.0));
	}
}
