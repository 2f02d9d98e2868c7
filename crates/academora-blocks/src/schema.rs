//! Attribute schema layer
//!
//! Every block type has a typed attribute struct implementing
//! [`BlockSchema`]. Coercion from a raw JSON bag is total: missing fields
//! take their declared default, mistyped fields are coerced where a
//! sensible reading exists and defaulted otherwise. Renderers can therefore
//! index into any field unconditionally.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::attributes::BlockAttributes;
use crate::block_type::BlockType;

/// Typed, fully defaulted attributes of one block type
pub trait BlockSchema:
	Default + Clone + PartialEq + fmt::Debug + Serialize + Send + Sync + 'static
{
	/// The block type these attributes belong to
	const BLOCK_TYPE: BlockType;

	/// Coerces a raw JSON attribute bag. Never fails.
	fn from_value(value: &Value) -> Self;

	/// Converts into the type-erased attribute enum
	fn into_attributes(self) -> BlockAttributes;

	/// Borrows the concrete attributes out of the erased enum
	fn downcast(attributes: &BlockAttributes) -> Option<&Self>;

	/// Serializes to the canonical JSON object
	fn to_value(&self) -> Value {
		serde_json::to_value(self).unwrap_or_else(|_| Value::Object(Map::new()))
	}

	/// Borrows the concrete attributes, or coerces them from their JSON form
	/// when the erased value holds another type.
	fn from_attributes(attributes: &BlockAttributes) -> Self {
		match Self::downcast(attributes) {
			Some(attrs) => attrs.clone(),
			None => Self::from_value(&attributes.to_value()),
		}
	}
}

/// List entries with a stable identifier
pub trait Keyed {
	/// Returns the entry id
	fn id(&self) -> &str;

	/// Replaces the entry id
	fn set_id(&mut self, id: String);
}

/// Ensures every entry carries a unique, non-empty id.
///
/// Entries with an empty id get the positional id `{prefix}-{n}` (1-based).
/// Repeated ids keep their first occurrence; later ones get `{id}-{k}` with
/// the smallest free `k >= 2`. Ids already present are never taken by an
/// assigned one, so the result is deterministic and stable under reapplication.
pub fn assign_ids<T: Keyed>(entries: &mut [T], prefix: &str) {
	let reserved: HashSet<String> = entries
		.iter()
		.map(|entry| entry.id().to_string())
		.filter(|id| !id.trim().is_empty())
		.collect();
	let mut taken: HashSet<String> = HashSet::with_capacity(entries.len());

	for (index, entry) in entries.iter_mut().enumerate() {
		let explicit = !entry.id().trim().is_empty();
		let base = if explicit {
			entry.id().to_string()
		} else {
			format!("{}-{}", prefix, index + 1)
		};

		let available =
			|candidate: &str| !taken.contains(candidate) && (explicit || !reserved.contains(candidate));
		let id = if available(&base) {
			base
		} else {
			(2..)
				.map(|k| format!("{}-{}", base, k))
				.find(|candidate| !taken.contains(candidate) && !reserved.contains(candidate))
				.unwrap_or_default()
		};

		taken.insert(id.clone());
		if entry.id() != id {
			entry.set_id(id);
		}
	}
}

/// Shallow-merges a partial attribute object over `defaults`.
///
/// Keys present in `partial` replace those in `defaults`. A non-object
/// `partial` leaves `defaults` unchanged.
pub fn merge_partial(defaults: Value, partial: &Value) -> Value {
	match (defaults, partial) {
		(Value::Object(mut base), Value::Object(overrides)) => {
			for (key, value) in overrides {
				base.insert(key.clone(), value.clone());
			}
			Value::Object(base)
		}
		(defaults, _) => defaults,
	}
}

/// Lenient field coercion helpers
pub mod coerce {
	use serde::de::DeserializeOwned;
	use serde_json::Value;

	/// Reads a string. Numbers and booleans are stringified.
	pub fn string(value: Option<&Value>, default: &str) -> String {
		match value {
			Some(Value::String(s)) => s.clone(),
			Some(Value::Number(n)) => n.to_string(),
			Some(Value::Bool(b)) => b.to_string(),
			_ => default.to_string(),
		}
	}

	/// Reads a boolean. Accepts `"true"`/`"false"` and numbers (non-zero is true).
	pub fn boolean(value: Option<&Value>, default: bool) -> bool {
		match value {
			Some(Value::Bool(b)) => *b,
			Some(Value::String(s)) => match s.trim() {
				"true" => true,
				"false" => false,
				_ => default,
			},
			Some(Value::Number(n)) => n.as_f64().map_or(default, |n| n != 0.0),
			_ => default,
		}
	}

	/// Reads a finite number. Numeric strings are parsed.
	pub fn number(value: Option<&Value>, default: f64) -> f64 {
		let parsed = match value {
			Some(Value::Number(n)) => n.as_f64(),
			Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
			_ => None,
		};
		parsed.filter(|n| n.is_finite()).unwrap_or(default)
	}

	/// Reads a list of strings.
	///
	/// Entries keep their position: scalars are stringified, anything else
	/// becomes an empty string.
	pub fn string_list(value: Option<&Value>, default: &[String]) -> Vec<String> {
		match value {
			Some(Value::Array(items)) => items.iter().map(|item| string(Some(item), "")).collect(),
			_ => default.to_vec(),
		}
	}

	/// Reads a list of structured entries.
	///
	/// Objects go through `from_object`, bare strings through `from_text`,
	/// entries of any other shape are dropped.
	pub fn entries<T: Clone>(
		value: Option<&Value>,
		default: &[T],
		from_object: impl Fn(&Value) -> T,
		from_text: impl Fn(String) -> T,
	) -> Vec<T> {
		match value {
			Some(Value::Array(items)) => items
				.iter()
				.filter_map(|item| match item {
					Value::Object(_) => Some(from_object(item)),
					Value::String(text) => Some(from_text(text.clone())),
					_ => None,
				})
				.collect(),
			_ => default.to_vec(),
		}
	}

	/// Reads a unit-variant enum by its serde name.
	pub fn variant<T: DeserializeOwned>(value: Option<&Value>, default: T) -> T {
		value
			.and_then(|v| T::deserialize(v).ok())
			.unwrap_or(default)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[derive(Debug, Clone, PartialEq)]
	struct Entry(String);

	impl Keyed for Entry {
		fn id(&self) -> &str {
			&self.0
		}

		fn set_id(&mut self, id: String) {
			self.0 = id;
		}
	}

	fn ids(entries: &[Entry]) -> Vec<&str> {
		entries.iter().map(|e| e.id()).collect()
	}

	#[rstest]
	fn test_assign_ids_fills_missing_positionally() {
		// Arrange
		let mut entries = vec![Entry("".into()), Entry("keep".into()), Entry(" ".into())];

		// Act
		assign_ids(&mut entries, "item");

		// Assert
		assert_eq!(ids(&entries), vec!["item-1", "keep", "item-3"]);
	}

	#[rstest]
	fn test_assign_ids_suffixes_duplicates() {
		let mut entries = vec![
			Entry("a".into()),
			Entry("a".into()),
			Entry("a".into()),
			Entry("a-2".into()),
		];

		assign_ids(&mut entries, "item");

		assert_eq!(ids(&entries), vec!["a", "a-3", "a-4", "a-2"]);
	}

	#[rstest]
	fn test_assign_ids_avoids_explicit_ids() {
		// A later explicit "item-1" must not collide with a positional id
		let mut entries = vec![Entry("".into()), Entry("item-1".into())];

		assign_ids(&mut entries, "item");

		assert_eq!(ids(&entries), vec!["item-1-2", "item-1"]);
	}

	#[rstest]
	fn test_assign_ids_is_stable() {
		let mut entries = vec![Entry("".into()), Entry("x".into()), Entry("x".into())];
		assign_ids(&mut entries, "tab");
		let first = entries.clone();

		assign_ids(&mut entries, "tab");

		assert_eq!(entries, first);
	}

	#[rstest]
	fn test_merge_partial_overrides_keys() {
		let merged = merge_partial(json!({"title": "A", "open": false}), &json!({"open": true}));
		assert_eq!(merged, json!({"title": "A", "open": true}));
	}

	#[rstest]
	fn test_merge_partial_ignores_non_object() {
		let merged = merge_partial(json!({"title": "A"}), &json!([1, 2]));
		assert_eq!(merged, json!({"title": "A"}));
	}

	#[rstest]
	#[case(json!("text"), "text")]
	#[case(json!(42), "42")]
	#[case(json!(true), "true")]
	#[case(json!(null), "fallback")]
	#[case(json!({"a": 1}), "fallback")]
	#[case(json!([1]), "fallback")]
	fn test_coerce_string(#[case] value: Value, #[case] expected: &str) {
		assert_eq!(coerce::string(Some(&value), "fallback"), expected);
	}

	#[rstest]
	#[case(json!(true), false, true)]
	#[case(json!("true"), false, true)]
	#[case(json!("false"), true, false)]
	#[case(json!(0), true, false)]
	#[case(json!(2), false, true)]
	#[case(json!("yes"), true, true)]
	#[case(json!(null), false, false)]
	fn test_coerce_boolean(#[case] value: Value, #[case] default: bool, #[case] expected: bool) {
		assert_eq!(coerce::boolean(Some(&value), default), expected);
	}

	#[rstest]
	#[case(json!(3.5), 3.5)]
	#[case(json!("12"), 12.0)]
	#[case(json!(" 7.25 "), 7.25)]
	#[case(json!("abc"), -1.0)]
	#[case(json!("NaN"), -1.0)]
	#[case(json!("inf"), -1.0)]
	#[case(json!(false), -1.0)]
	fn test_coerce_number(#[case] value: Value, #[case] expected: f64) {
		assert_eq!(coerce::number(Some(&value), -1.0), expected);
	}

	#[rstest]
	fn test_coerce_string_list_keeps_positions() {
		let list = coerce::string_list(Some(&json!(["a", 1, null, {"x": 1}, "e"])), &[]);
		assert_eq!(list, vec!["a", "1", "", "", "e"]);
	}

	#[rstest]
	fn test_coerce_string_list_falls_back() {
		let default = vec!["d".to_string()];
		assert_eq!(coerce::string_list(Some(&json!("a")), &default), default);
		assert_eq!(coerce::string_list(None, &default), default);
	}

	#[rstest]
	fn test_coerce_entries() {
		// Arrange
		let value = json!([{"id": "x"}, "plain", 42, null]);

		// Act
		let entries = coerce::entries(
			Some(&value),
			&[],
			|v| Entry(coerce::string(v.get("id"), "")),
			Entry,
		);

		// Assert
		assert_eq!(entries, vec![Entry("x".into()), Entry("plain".into())]);
	}

	#[rstest]
	fn test_coerce_variant() {
		#[derive(Debug, PartialEq, serde::Deserialize)]
		#[serde(rename_all = "lowercase")]
		enum Size {
			Small,
			Large,
		}

		assert_eq!(coerce::variant(Some(&json!("large")), Size::Small), Size::Large);
		assert_eq!(coerce::variant(Some(&json!("huge")), Size::Small), Size::Small);
		assert_eq!(coerce::variant(Some(&json!(3)), Size::Small), Size::Small);
		assert_eq!(coerce::variant(None, Size::Small), Size::Small);
	}
}
