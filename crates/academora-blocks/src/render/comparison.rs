use academora_core::node::{Element, IntoNode, Node};

use super::{StaticRender, heading};
use crate::attributes::ComparisonAttributes;

impl StaticRender for ComparisonAttributes {
	/// Body rows pad shorter columns with empty cells.
	fn render_body(&self) -> Vec<Node> {
		let with_row_headers = !self.row_headers.is_empty();

		let header_row = Element::new("tr")
			.child(with_row_headers.then(|| Element::new("th")))
			.children(self.columns.iter().map(|column| {
				Element::new("th")
					.attr("data-column-id", column.id.clone())
					.child(column.header.clone())
			}));

		let body_rows = (0..self.row_count()).map(|row| {
			let row_header = with_row_headers.then(|| {
				Element::new("th")
					.attr("scope", "row")
					.child(self.row_headers.get(row).cloned().unwrap_or_default())
			});
			Element::new("tr")
				.child(row_header)
				.children(self.columns.iter().map(|column| {
					Element::new("td").child(column.cells.get(row).cloned().unwrap_or_default())
				}))
		});

		vec![
			heading("h3", "comparison-title", &self.title).into_node(),
			Element::new("table")
				.attr("class", "comparison-table")
				.child(Element::new("thead").child(header_row))
				.child(Element::new("tbody").children(body_rows))
				.into_node(),
		]
	}
}
