use academora_core::node::{Element, IntoNode, Node};

use super::StaticRender;
use crate::attributes::TabsAttributes;

/// Tabs markup with every panel present and only `active` marked.
pub(crate) fn tabs_view(attrs: &TabsAttributes, active: &str) -> Vec<Node> {
	let class = |base: &str, is_active: bool| {
		if is_active {
			format!("{} active", base)
		} else {
			base.to_string()
		}
	};

	let buttons = attrs.tabs.iter().map(|tab| {
		let is_active = tab.id == active;
		Element::new("button")
			.attr("type", "button")
			.attr("class", class("tab-button", is_active))
			.attr("role", "tab")
			.attr("aria-selected", if is_active { "true" } else { "false" })
			.attr("data-tab-id", tab.id.clone())
			.child(tab.label.clone())
	});

	let panels = attrs.tabs.iter().map(|tab| {
		Element::new("div")
			.attr("class", class("tab-panel", tab.id == active))
			.attr("role", "tabpanel")
			.attr("data-tab-id", tab.id.clone())
			.child(Element::new("p").child(tab.content.clone()))
	});

	vec![
		Element::new("div")
			.attr("class", "tabs-header")
			.attr("role", "tablist")
			.children(buttons)
			.into_node(),
		Element::new("div")
			.attr("class", "tabs-body")
			.children(panels)
			.into_node(),
	]
}

impl StaticRender for TabsAttributes {
	fn render_body(&self) -> Vec<Node> {
		tabs_view(self, &self.active_tab)
	}
}
