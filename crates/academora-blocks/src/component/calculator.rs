use std::collections::HashMap;

use academora_core::node::Node;

use super::{BlockEvent, Interactive};
use crate::attributes::CalculatorAttributes;
use crate::formula::evaluate_or_zero;
use crate::render::{calculator_view, format_number};

impl CalculatorAttributes {
	/// Initial input values, clamped to each field's bounds.
	pub fn initial_values(&self) -> Vec<f64> {
		self.fields
			.iter()
			.map(|field| field.clamp(field.default_value))
			.collect()
	}

	/// Evaluates the formula for the given input values (by field position),
	/// rounded to two decimals. Any evaluation error yields `0`.
	pub fn compute(&self, values: &[f64]) -> f64 {
		let variables: HashMap<String, f64> = self
			.fields
			.iter()
			.zip(values.iter().copied())
			.map(|(field, value)| (field.id.clone(), value))
			.collect();
		let result = evaluate_or_zero(&self.formula, &variables);
		(result * 100.0).round() / 100.0
	}
}

impl Interactive for CalculatorAttributes {
	/// Current input value per field, by position.
	type State = Vec<f64>;

	fn initial_state(&self) -> Self::State {
		self.initial_values()
	}

	fn apply(&self, state: &mut Self::State, event: &BlockEvent) -> bool {
		let BlockEvent::SetField { field, value } = event else {
			return false;
		};
		if !value.is_finite() {
			return false;
		}
		let Some(index) = self.fields.iter().position(|f| &f.id == field) else {
			return false;
		};
		let clamped = self.fields[index].clamp(*value);
		match state.get_mut(index) {
			Some(current) if *current != clamped => {
				*current = clamped;
				true
			}
			_ => false,
		}
	}

	fn render_view(&self, state: &Self::State, _block_id: &str) -> Vec<Node> {
		let result = format!("{}{}", self.result_unit, format_number(self.compute(state)));
		calculator_view(
			self,
			|index, field| state.get(index).copied().unwrap_or(field.default_value),
			result,
		)
	}
}
