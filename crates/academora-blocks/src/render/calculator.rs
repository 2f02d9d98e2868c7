use academora_core::node::{Element, IntoNode, Node};

use super::{StaticRender, format_number, heading, paragraph};
use crate::attributes::{CalculatorAttributes, CalculatorField};

/// Calculator markup. `value_of` supplies each input's value by position
/// and `result` the already formatted result text.
pub(crate) fn calculator_view(
	attrs: &CalculatorAttributes,
	value_of: impl Fn(usize, &CalculatorField) -> f64,
	result: String,
) -> Vec<Node> {
	let fields = attrs.fields.iter().enumerate().map(|(index, field)| {
		Element::new("div").attr("class", "calculator-field").child(
			Element::new("label")
				.child(
					Element::new("span")
						.attr("class", "calculator-field-label")
						.child(field.label.clone()),
				)
				.child(
					Element::new("input")
						.attr("type", "number")
						.attr("name", field.id.clone())
						.attr("data-field-id", field.id.clone())
						.attr("min", format_number(field.min))
						.attr("max", format_number(field.max))
						.attr("step", format_number(field.step))
						.attr("value", format_number(value_of(index, field))),
				),
		)
	});

	vec![
		heading("h3", "calculator-title", &attrs.title).into_node(),
		paragraph("calculator-description", &attrs.description).into_node(),
		Element::new("div")
			.attr("class", "calculator-fields")
			.children(fields)
			.into_node(),
		Element::new("div")
			.attr("class", "calculator-result")
			.child(
				Element::new("span")
					.attr("class", "calculator-result-label")
					.child(format!("{}: ", attrs.result_label)),
			)
			.child(
				Element::new("span")
					.attr("class", "calculator-result-value")
					.child(result),
			)
			.into_node(),
	]
}

impl StaticRender for CalculatorAttributes {
	/// The result is a zero placeholder; only the interactive view computes it.
	fn render_body(&self) -> Vec<Node> {
		calculator_view(
			self,
			|_, field| field.default_value,
			format!("{}0", self.result_unit),
		)
	}
}
