use academora_core::node::{Element, IntoNode, Node};

use super::{StaticRender, heading, paragraph};
use crate::attributes::TimelineAttributes;

impl StaticRender for TimelineAttributes {
	fn render_body(&self) -> Vec<Node> {
		let items = self.items.iter().map(|item| {
			Element::new("li")
				.attr("class", "timeline-item")
				.attr("data-item-id", item.id.clone())
				.child(
					Element::new("span")
						.attr("class", "timeline-date")
						.child(item.date.clone()),
				)
				.child(
					Element::new("div")
						.attr("class", "timeline-content")
						.child(heading("h4", "timeline-item-title", &item.title))
						.child(paragraph("timeline-description", &item.description)),
				)
		});

		vec![
			heading("h3", "timeline-title", &self.title).into_node(),
			Element::new("ol")
				.attr(
					"class",
					format!("timeline timeline-{}", self.orientation.as_str()),
				)
				.children(items)
				.into_node(),
		]
	}
}
