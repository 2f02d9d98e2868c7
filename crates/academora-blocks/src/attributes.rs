//! Per-type block attributes
//!
//! One struct per block type, serialized with camelCase field names. The
//! [`BlockAttributes`] enum erases the concrete type for the registry and
//! the hydration runtime.

mod calculator;
mod checklist;
mod collapsible;
mod comparison;
mod cta;
mod quiz;
mod step_guide;
mod tabs;
mod timeline;

pub use calculator::{CalculatorAttributes, CalculatorField};
pub use checklist::{ChecklistAttributes, ChecklistItem};
pub use collapsible::CollapsibleAttributes;
pub use comparison::{ComparisonAttributes, ComparisonColumn};
pub use cta::{CtaAlignment, CtaAttributes, CtaSize};
pub use quiz::{QuizAttributes, QuizOption};
pub use step_guide::{GuideStep, StepGuideAttributes};
pub use tabs::{TabPanel, TabsAttributes};
pub use timeline::{TimelineAttributes, TimelineItem, TimelineOrientation};

use serde::Serialize;
use serde_json::Value;

use crate::block_type::BlockType;
use crate::schema::BlockSchema;

macro_rules! block_attributes {
	($($variant:ident($ty:ty)),* $(,)?) => {
		/// Attributes of any block type
		///
		/// Serializes as the inner struct (no tag); the block type travels
		/// separately in the `data-block-type` marker.
		#[derive(Debug, Clone, PartialEq, Serialize)]
		#[serde(untagged)]
		pub enum BlockAttributes {
			$(
				#[allow(missing_docs)]
				$variant($ty),
			)*
		}

		impl BlockAttributes {
			/// Returns the block type of these attributes.
			pub fn block_type(&self) -> BlockType {
				match self {
					$(Self::$variant(_) => BlockType::$variant,)*
				}
			}

			/// Returns the default attributes of `block_type`.
			pub fn defaults(block_type: BlockType) -> Self {
				match block_type {
					$(BlockType::$variant => Self::$variant(<$ty>::default()),)*
				}
			}

			/// Coerces a raw JSON bag into attributes of `block_type`.
			pub fn from_value(block_type: BlockType, value: &Value) -> Self {
				match block_type {
					$(BlockType::$variant => Self::$variant(<$ty>::coerce(value)),)*
				}
			}

			/// Serializes to the canonical JSON object.
			pub fn to_value(&self) -> Value {
				match self {
					$(Self::$variant(attrs) => attrs.to_value(),)*
				}
			}
		}

		$(
			impl BlockSchema for $ty {
				const BLOCK_TYPE: BlockType = BlockType::$variant;

				fn from_value(value: &Value) -> Self {
					Self::coerce(value)
				}

				fn into_attributes(self) -> BlockAttributes {
					BlockAttributes::$variant(self)
				}

				fn downcast(attributes: &BlockAttributes) -> Option<&Self> {
					match attributes {
						BlockAttributes::$variant(attrs) => Some(attrs),
						#[allow(unreachable_patterns)]
						_ => None,
					}
				}
			}

			impl From<$ty> for BlockAttributes {
				fn from(attrs: $ty) -> Self {
					BlockAttributes::$variant(attrs)
				}
			}
		)*
	};
}

block_attributes! {
	Calculator(CalculatorAttributes),
	Checklist(ChecklistAttributes),
	Collapsible(CollapsibleAttributes),
	Comparison(ComparisonAttributes),
	Cta(CtaAttributes),
	Quiz(QuizAttributes),
	StepGuide(StepGuideAttributes),
	Tabs(TabsAttributes),
	Timeline(TimelineAttributes),
}
