use academora_core::node::{Element, IntoNode, Node};

use super::StaticRender;
use crate::attributes::CollapsibleAttributes;

pub(crate) fn collapsible_view(attrs: &CollapsibleAttributes, open: bool) -> Vec<Node> {
	vec![
		Element::new("details")
			.attr("class", "collapsible")
			.bool_attr("open", open)
			.child(
				Element::new("summary")
					.attr("class", "collapsible-title")
					.child(attrs.title.clone()),
			)
			.child(
				Element::new("div")
					.attr("class", "collapsible-content")
					.child(Element::new("p").child(attrs.content.clone())),
			)
			.into_node(),
	]
}

impl StaticRender for CollapsibleAttributes {
	fn render_body(&self) -> Vec<Node> {
		collapsible_view(self, self.default_open)
	}
}
