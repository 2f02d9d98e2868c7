//! The closed set of block kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BlockError;

/// Block type discriminator
///
/// The wire name (the `data-block-type` value and the serde representation)
/// is the camelCase variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockType {
	/// Numeric inputs combined by a formula
	Calculator,
	/// List of checkable items
	Checklist,
	/// Disclosure widget
	Collapsible,
	/// Side-by-side comparison table
	Comparison,
	/// Call-to-action banner
	Cta,
	/// Single-question multiple-choice quiz
	Quiz,
	/// Ordered list of step cards
	StepGuide,
	/// Tabbed panels
	Tabs,
	/// Dated list of events
	Timeline,
}

impl BlockType {
	/// Every block type, in registry order.
	pub const ALL: [BlockType; 9] = [
		BlockType::Calculator,
		BlockType::Checklist,
		BlockType::Collapsible,
		BlockType::Comparison,
		BlockType::Cta,
		BlockType::Quiz,
		BlockType::StepGuide,
		BlockType::Tabs,
		BlockType::Timeline,
	];

	/// Returns the wire name.
	pub fn as_str(&self) -> &'static str {
		match self {
			BlockType::Calculator => "calculator",
			BlockType::Checklist => "checklist",
			BlockType::Collapsible => "collapsible",
			BlockType::Comparison => "comparison",
			BlockType::Cta => "cta",
			BlockType::Quiz => "quiz",
			BlockType::StepGuide => "stepGuide",
			BlockType::Tabs => "tabs",
			BlockType::Timeline => "timeline",
		}
	}

	/// Returns the CSS class of the rendered wrapper, e.g. `step-guide-block`.
	pub fn css_class(&self) -> &'static str {
		match self {
			BlockType::Calculator => "calculator-block",
			BlockType::Checklist => "checklist-block",
			BlockType::Collapsible => "collapsible-block",
			BlockType::Comparison => "comparison-block",
			BlockType::Cta => "cta-block",
			BlockType::Quiz => "quiz-block",
			BlockType::StepGuide => "step-guide-block",
			BlockType::Tabs => "tabs-block",
			BlockType::Timeline => "timeline-block",
		}
	}
}

impl fmt::Display for BlockType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for BlockType {
	type Err = BlockError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		BlockType::ALL
			.into_iter()
			.find(|block_type| block_type.as_str() == s)
			.ok_or_else(|| BlockError::UnknownBlockType(s.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("calculator", BlockType::Calculator)]
	#[case("cta", BlockType::Cta)]
	#[case("stepGuide", BlockType::StepGuide)]
	#[case("timeline", BlockType::Timeline)]
	fn test_from_str(#[case] name: &str, #[case] expected: BlockType) {
		assert_eq!(name.parse::<BlockType>().unwrap(), expected);
		assert_eq!(expected.to_string(), name);
	}

	#[rstest]
	#[case("video")]
	#[case("step_guide")]
	#[case("Checklist")]
	#[case("")]
	fn test_from_str_rejects_unknown(#[case] name: &str) {
		let result = name.parse::<BlockType>();
		assert!(matches!(result, Err(BlockError::UnknownBlockType(n)) if n == name));
	}

	#[rstest]
	fn test_serde_matches_wire_name() {
		for block_type in BlockType::ALL {
			let json = serde_json::to_value(block_type).unwrap();
			assert_eq!(json, serde_json::Value::String(block_type.as_str().to_string()));
		}
	}
}
