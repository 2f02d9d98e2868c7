//! Static HTML rendering
//!
//! Each block type renders to a wrapper element carrying the marker
//! attributes, whose first child is the embedded config script and whose
//! remaining children are the visible, non-interactive projection of the
//! attributes. Rendering is pure: the same attributes always produce the
//! same tree.

mod calculator;
mod checklist;
mod collapsible;
mod comparison;
mod cta;
mod quiz;
mod step_guide;
mod tabs;
mod timeline;

pub(crate) use calculator::calculator_view;
pub(crate) use checklist::checklist_view;
pub(crate) use collapsible::collapsible_view;
pub(crate) use quiz::{QuizView, quiz_view};
pub(crate) use tabs::tabs_view;

use academora_core::markers::{
	BLOCK_CONFIG_ATTR, BLOCK_ID_ATTR, BLOCK_TYPE_ATTR, CONFIG_SCRIPT_TYPE, escape_script_json,
};
use academora_core::node::{Element, IntoNode, Node};
use serde_json::Value;

use crate::schema::BlockSchema;

/// Visible markup of a block type
pub(crate) trait StaticRender: BlockSchema {
	/// Renders the children that follow the config script.
	fn render_body(&self) -> Vec<Node>;
}

/// Renders `attrs` as a complete static block.
pub(crate) fn render_static<T: StaticRender>(attrs: &T, block_id: Option<&str>) -> Node {
	Element::new("div")
		.attr(BLOCK_TYPE_ATTR, T::BLOCK_TYPE.as_str())
		.opt_attr(BLOCK_ID_ATTR, block_id.map(str::to_string))
		.attr("class", T::BLOCK_TYPE.css_class())
		.child(config_script(&attrs.to_value()))
		.children(attrs.render_body())
		.into_node()
}

/// Builds the `<script type="application/json" data-block-config>` element.
pub fn config_script(config: &Value) -> Element {
	Element::new("script")
		.attr("type", CONFIG_SCRIPT_TYPE)
		.attr(BLOCK_CONFIG_ATTR, "")
		.child(escape_script_json(&config.to_string()))
}

/// Formats a number with at most two decimals and no trailing zeros.
///
/// Non-finite values format as `0`.
pub fn format_number(value: f64) -> String {
	if !value.is_finite() {
		return "0".to_string();
	}
	let rounded = (value * 100.0).round() / 100.0;
	if rounded == 0.0 {
		return "0".to_string();
	}
	if rounded.fract() == 0.0 {
		format!("{:.0}", rounded)
	} else {
		format!("{:.2}", rounded).trim_end_matches('0').to_string()
	}
}

pub(crate) fn heading(tag: &'static str, class: &'static str, text: &str) -> Option<Element> {
	(!text.is_empty()).then(|| Element::new(tag).attr("class", class).child(text.to_string()))
}

pub(crate) fn paragraph(class: &'static str, text: &str) -> Option<Element> {
	heading("p", class, text)
}

/// Returns `color` when it is safe inside an inline `style`, else `fallback`.
pub(crate) fn css_color(color: &str, fallback: &str) -> String {
	let lowered = color.to_ascii_lowercase();
	let unsafe_value = color.is_empty()
		|| color.contains([';', '{', '}', '<', '>', '"', '\\'])
		|| lowered.contains("url(")
		|| lowered.contains("expression(");
	if unsafe_value {
		fallback.to_string()
	} else {
		color.trim().to_string()
	}
}

/// Returns `url` unless it uses a script-capable scheme, in which case `#`.
pub(crate) fn safe_url(url: &str) -> String {
	let scheme: String = url
		.trim()
		.chars()
		.filter(|c| !c.is_whitespace() && !c.is_control())
		.take(11)
		.collect::<String>()
		.to_ascii_lowercase();
	if ["javascript:", "vbscript:", "data:"]
		.iter()
		.any(|prefix| scheme.starts_with(prefix))
	{
		"#".to_string()
	} else {
		url.to_string()
	}
}
