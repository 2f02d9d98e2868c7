//! Block registry
//!
//! Every [`BlockType`] owns one static [`BlockDefinition`] holding the four
//! operations the rest of the system needs: default attributes, parsing a
//! static element back into attributes, static rendering and creating the
//! editor component. The table is built at compile time, so lookups never
//! allocate and never fail.

use std::fmt;

use academora_core::markers::{BLOCK_CONFIG_ATTR, BLOCK_ID_ATTR};
use academora_core::node::{Element, Node};
use serde_json::Value;

use crate::attributes::{
	BlockAttributes, CalculatorAttributes, ChecklistAttributes, CollapsibleAttributes,
	ComparisonAttributes, CtaAttributes, QuizAttributes, StepGuideAttributes, TabsAttributes,
	TimelineAttributes,
};
use crate::block_type::BlockType;
use crate::component::{BlockComponent, Interactive, ViewMode, widget};
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::error::{BlockError, BlockResult};
use crate::render::render_static;

/// Registry entry of one block type
pub struct BlockDefinition {
	block_type: BlockType,
	insert_command: &'static str,
	default_attributes: fn() -> BlockAttributes,
	parse_attributes: fn(&Value) -> BlockAttributes,
	render_static_html: fn(&BlockAttributes, Option<&str>) -> Node,
	create_editor_view: fn(BlockAttributes, String) -> Box<dyn BlockComponent>,
}

fn defaults_of<T: Interactive>() -> BlockAttributes {
	T::default().into_attributes()
}

fn parse_of<T: Interactive>(value: &Value) -> BlockAttributes {
	T::from_value(value).into_attributes()
}

fn render_of<T: Interactive>(attributes: &BlockAttributes, block_id: Option<&str>) -> Node {
	match T::downcast(attributes) {
		Some(attrs) => render_static(attrs, block_id),
		None => render_static(&T::from_attributes(attributes), block_id),
	}
}

fn editor_of<T: Interactive>(attributes: BlockAttributes, block_id: String) -> Box<dyn BlockComponent> {
	widget(T::from_attributes(&attributes), block_id, ViewMode::Editor)
}

impl BlockDefinition {
	const fn of<T: Interactive>(insert_command: &'static str) -> Self {
		Self {
			block_type: T::BLOCK_TYPE,
			insert_command,
			default_attributes: defaults_of::<T>,
			parse_attributes: parse_of::<T>,
			render_static_html: render_of::<T>,
			create_editor_view: editor_of::<T>,
		}
	}

	/// Returns the block type.
	pub fn block_type(&self) -> BlockType {
		self.block_type
	}

	/// Returns the name of the authoring insert command.
	pub fn insert_command(&self) -> &'static str {
		self.insert_command
	}

	/// Attributes of a freshly inserted block.
	pub fn default_attributes(&self) -> BlockAttributes {
		(self.default_attributes)()
	}

	/// Coerces a raw JSON attribute bag.
	pub fn parse_attributes(&self, value: &Value) -> BlockAttributes {
		(self.parse_attributes)(value)
	}

	/// Reads the embedded config out of a static element.
	///
	/// # Errors
	///
	/// Returns [`BlockError::ConfigMissing`] when the element has no config
	/// script and [`BlockError::ConfigMalformed`] when its text is not a JSON
	/// object.
	pub fn try_parse_static_html(&self, element: &Element) -> BlockResult<BlockAttributes> {
		let config = extract_config(self.block_type.as_str(), element)?;
		Ok(self.parse_attributes(&config))
	}

	/// Reads the embedded config out of a static element, falling back to the
	/// defaults when it is missing or malformed. Failures are logged.
	pub fn parse_static_html(&self, element: &Element) -> BlockAttributes {
		self.parse_static_html_with_sink(element, &TracingSink)
	}

	/// Like [`parse_static_html`](Self::parse_static_html), reporting
	/// failures to `sink`.
	pub fn parse_static_html_with_sink(
		&self,
		element: &Element,
		sink: &dyn DiagnosticSink,
	) -> BlockAttributes {
		match self.try_parse_static_html(element) {
			Ok(attributes) => attributes,
			Err(error) => {
				if let Some(diagnostic) = Diagnostic::from_error(&error) {
					sink.report(
						diagnostic.with_block_id(element.attribute(BLOCK_ID_ATTR).map(str::to_string)),
					);
				}
				self.default_attributes()
			}
		}
	}

	/// Renders the static markup of `attributes`.
	///
	/// Attributes of another block type are converted through their JSON form.
	pub fn render_static_html(&self, attributes: &BlockAttributes) -> Node {
		(self.render_static_html)(attributes, None)
	}

	/// Renders the static markup, stamping `data-block-id` when given.
	pub fn render_static_html_with_id(
		&self,
		attributes: &BlockAttributes,
		block_id: Option<&str>,
	) -> Node {
		(self.render_static_html)(attributes, block_id)
	}

	/// Creates the editor component for `attributes`.
	pub fn create_editor_view(
		&self,
		attributes: BlockAttributes,
		block_id: impl Into<String>,
	) -> Box<dyn BlockComponent> {
		(self.create_editor_view)(attributes, block_id.into())
	}
}

impl fmt::Debug for BlockDefinition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("BlockDefinition")
			.field("block_type", &self.block_type)
			.field("insert_command", &self.insert_command)
			.finish_non_exhaustive()
	}
}

static DEFINITIONS: [BlockDefinition; 9] = [
	BlockDefinition::of::<CalculatorAttributes>("insertCalculator"),
	BlockDefinition::of::<ChecklistAttributes>("insertChecklist"),
	BlockDefinition::of::<CollapsibleAttributes>("insertCollapsible"),
	BlockDefinition::of::<ComparisonAttributes>("insertComparison"),
	BlockDefinition::of::<CtaAttributes>("insertCta"),
	BlockDefinition::of::<QuizAttributes>("insertQuiz"),
	BlockDefinition::of::<StepGuideAttributes>("insertStepGuide"),
	BlockDefinition::of::<TabsAttributes>("insertTabs"),
	BlockDefinition::of::<TimelineAttributes>("insertTimeline"),
];

/// Returns every registered definition, in [`BlockType::ALL`] order.
pub fn definitions() -> &'static [BlockDefinition] {
	&DEFINITIONS
}

impl BlockType {
	/// Returns the registry entry of this type.
	pub fn definition(self) -> &'static BlockDefinition {
		let index = match self {
			BlockType::Calculator => 0,
			BlockType::Checklist => 1,
			BlockType::Collapsible => 2,
			BlockType::Comparison => 3,
			BlockType::Cta => 4,
			BlockType::Quiz => 5,
			BlockType::StepGuide => 6,
			BlockType::Tabs => 7,
			BlockType::Timeline => 8,
		};
		&DEFINITIONS[index]
	}

	/// Resolves an insert command name such as `insertChecklist`.
	pub fn from_insert_command(name: &str) -> Option<BlockType> {
		DEFINITIONS
			.iter()
			.find(|definition| definition.insert_command == name)
			.map(BlockDefinition::block_type)
	}
}

/// Finds the embedded config script inside `element`.
pub fn find_config_script(element: &Element) -> Option<&Element> {
	element.find(&|e| e.tag_name() == "script" && e.has_attribute(BLOCK_CONFIG_ATTR))
}

/// Extracts and parses the embedded config of a block element.
///
/// # Errors
///
/// Returns [`BlockError::ConfigMissing`] when no config script exists and
/// [`BlockError::ConfigMalformed`] when its text is not a JSON object.
pub fn extract_config(block_type: &str, element: &Element) -> BlockResult<Value> {
	let script =
		find_config_script(element).ok_or_else(|| BlockError::ConfigMissing(block_type.to_string()))?;
	let value: Value =
		serde_json::from_str(script.text_content().trim()).map_err(|e| BlockError::ConfigMalformed {
			block_type: block_type.to_string(),
			reason: e.to_string(),
		})?;
	if !value.is_object() {
		return Err(BlockError::ConfigMalformed {
			block_type: block_type.to_string(),
			reason: "expected a JSON object".to_string(),
		});
	}
	Ok(value)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::component::BlockEvent;
	use crate::diagnostics::{DiagnosticKind, MemorySink};
	use crate::render::config_script;
	use academora_core::markers::BLOCK_TYPE_ATTR;
	use rstest::rstest;
	use serde_json::json;

	fn block_element(block_type: &str, script: Option<Element>) -> Element {
		let mut element = Element::new("div")
			.attr(BLOCK_TYPE_ATTR, block_type.to_string())
			.attr(BLOCK_ID_ATTR, "b-1");
		if let Some(script) = script {
			element = element.child(script);
		}
		element.child(Element::new("p").child("visible"))
	}

	fn raw_script(text: &str) -> Element {
		Element::new("script")
			.attr("type", "application/json")
			.attr(BLOCK_CONFIG_ATTR, "")
			.child(text.to_string())
	}

	#[rstest]
	fn test_definition_table_matches_block_types() {
		for block_type in BlockType::ALL {
			let definition = block_type.definition();
			assert_eq!(definition.block_type(), block_type);
			assert_eq!(definition.default_attributes().block_type(), block_type);
		}
		assert_eq!(definitions().len(), BlockType::ALL.len());
	}

	#[rstest]
	#[case("insertChecklist", Some(BlockType::Checklist))]
	#[case("insertStepGuide", Some(BlockType::StepGuide))]
	#[case("insertCta", Some(BlockType::Cta))]
	#[case("insertParagraph", None)]
	#[case("checklist", None)]
	fn test_from_insert_command(#[case] name: &str, #[case] expected: Option<BlockType>) {
		assert_eq!(BlockType::from_insert_command(name), expected);
	}

	#[rstest]
	fn test_parse_static_html_reads_config() {
		// Arrange
		let config = json!({"title": "Visa steps", "allowUserEdit": false});
		let element = block_element("checklist", Some(config_script(&config)));
		let definition = BlockType::Checklist.definition();

		// Act
		let attributes = definition.try_parse_static_html(&element).unwrap();

		// Assert
		assert_eq!(attributes, definition.parse_attributes(&config));
	}

	#[rstest]
	#[case(None, DiagnosticKind::ConfigMissing)]
	#[case(Some(raw_script(r#"{"title": "trunc"#)), DiagnosticKind::ConfigMalformed)]
	#[case(Some(raw_script("[1, 2]")), DiagnosticKind::ConfigMalformed)]
	fn test_parse_static_html_degrades_to_defaults(
		#[case] script: Option<Element>,
		#[case] kind: DiagnosticKind,
	) {
		// Arrange
		let element = block_element("checklist", script);
		let sink = MemorySink::new();
		let definition = BlockType::Checklist.definition();

		// Act
		let attributes = definition.parse_static_html_with_sink(&element, &sink);

		// Assert
		assert_eq!(attributes, definition.default_attributes());
		let diagnostics = sink.take();
		assert_eq!(diagnostics.len(), 1);
		assert_eq!(diagnostics[0].kind, kind);
		assert_eq!(diagnostics[0].block_type, "checklist");
		assert_eq!(diagnostics[0].block_id.as_deref(), Some("b-1"));
	}

	#[rstest]
	fn test_strict_parse_surfaces_errors() {
		let element = block_element("quiz", None);

		let result = BlockType::Quiz.definition().try_parse_static_html(&element);

		assert!(matches!(result, Err(BlockError::ConfigMissing(t)) if t == "quiz"));
	}

	#[rstest]
	fn test_render_static_html_stamps_id() {
		let definition = BlockType::Cta.definition();

		let node = definition
			.render_static_html_with_id(&definition.default_attributes(), Some("cta-1"));

		let root = node.as_element().unwrap();
		assert_eq!(root.attribute(BLOCK_TYPE_ATTR), Some("cta"));
		assert_eq!(root.attribute(BLOCK_ID_ATTR), Some("cta-1"));
	}

	#[rstest]
	fn test_render_converts_foreign_attributes() {
		// Arrange
		let definition = BlockType::Collapsible.definition();
		let foreign = BlockType::Quiz.definition().default_attributes();

		// Act
		let node = definition.render_static_html(&foreign);

		// Assert
		let root = node.as_element().unwrap();
		assert_eq!(root.attribute(BLOCK_TYPE_ATTR), Some("collapsible"));
	}

	#[rstest]
	fn test_editor_view_accepts_updates() {
		// Arrange
		let definition = BlockType::Collapsible.definition();
		let mut view = definition.create_editor_view(definition.default_attributes(), "c-1");

		// Act
		let changed = view.handle(&BlockEvent::Update(json!({"title": "FAQ"})));

		// Assert
		assert!(changed);
		assert_eq!(view.mode(), ViewMode::Editor);
		assert_eq!(view.attributes().to_value()["title"], json!("FAQ"));
	}
}
