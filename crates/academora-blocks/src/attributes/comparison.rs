use serde::Serialize;
use serde_json::Value;

use crate::schema::{Keyed, assign_ids, coerce};

/// One column of a comparison table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonColumn {
	/// Identifier
	pub id: String,
	/// Column header
	pub header: String,
	/// Cell values, top to bottom
	pub cells: Vec<String>,
}

impl ComparisonColumn {
	fn column(id: &str, header: &str, cells: &[&str]) -> Self {
		Self {
			id: id.to_string(),
			header: header.to_string(),
			cells: cells.iter().map(|c| c.to_string()).collect(),
		}
	}

	fn coerce(value: &Value) -> Self {
		Self {
			id: coerce::string(value.get("id"), ""),
			header: coerce::string(value.get("header"), ""),
			cells: coerce::string_list(value.get("cells"), &[]),
		}
	}
}

impl Keyed for ComparisonColumn {
	fn id(&self) -> &str {
		&self.id
	}

	fn set_id(&mut self, id: String) {
		self.id = id;
	}
}

/// Attributes of the `comparison` block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonAttributes {
	/// Caption
	pub title: String,
	/// Columns
	pub columns: Vec<ComparisonColumn>,
	/// Optional per-row labels
	pub row_headers: Vec<String>,
}

impl Default for ComparisonAttributes {
	fn default() -> Self {
		Self {
			title: "Compare Universities".to_string(),
			columns: vec![
				ComparisonColumn::column("col-1", "University A", &["$20,000", "4 years", "Urban"]),
				ComparisonColumn::column("col-2", "University B", &["$15,000", "3 years", "Rural"]),
			],
			row_headers: vec![
				"Tuition".to_string(),
				"Duration".to_string(),
				"Campus".to_string(),
			],
		}
	}
}

impl ComparisonAttributes {
	pub(crate) fn coerce(value: &Value) -> Self {
		let d = Self::default();
		let mut columns = coerce::entries(
			value.get("columns"),
			&d.columns,
			ComparisonColumn::coerce,
			|header| ComparisonColumn {
				header,
				..ComparisonColumn::default()
			},
		);
		assign_ids(&mut columns, "col");

		Self {
			title: coerce::string(value.get("title"), &d.title),
			columns,
			row_headers: coerce::string_list(value.get("rowHeaders"), &d.row_headers),
		}
	}

	/// Number of body rows: the longest column's cell count.
	pub fn row_count(&self) -> usize {
		self.columns
			.iter()
			.map(|column| column.cells.len())
			.max()
			.unwrap_or(0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_row_count_is_longest_column() {
		// Arrange
		let raw = json!({
			"columns": [
				{"header": "A", "cells": ["1", "2", "3"]},
				{"header": "B", "cells": ["1"]},
				{"header": "C", "cells": []}
			]
		});

		// Act
		let attrs = ComparisonAttributes::coerce(&raw);

		// Assert
		assert_eq!(attrs.row_count(), 3);
		assert_eq!(attrs.columns[2].id, "col-3");
	}

	#[rstest]
	fn test_missing_cells_default_to_empty() {
		let attrs = ComparisonAttributes::coerce(&json!({"columns": [{"header": "A"}]}));
		assert!(attrs.columns[0].cells.is_empty());
		assert_eq!(attrs.row_count(), 0);
	}

	#[rstest]
	fn test_numeric_cells_are_stringified() {
		let attrs = ComparisonAttributes::coerce(&json!({"columns": [{"cells": [1, true, null]}]}));
		assert_eq!(attrs.columns[0].cells, vec!["1", "true", ""]);
	}
}
