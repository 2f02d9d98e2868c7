use academora_core::node::{Element, IntoNode, Node};

use super::{StaticRender, heading, paragraph, safe_url};
use crate::attributes::StepGuideAttributes;

impl StaticRender for StepGuideAttributes {
	fn render_body(&self) -> Vec<Node> {
		let steps = self.steps.iter().enumerate().map(|(index, step)| {
			let number = self.show_numbers.then(|| {
				Element::new("span")
					.attr("class", "step-number")
					.child((index + 1).to_string())
			});
			let image = (!step.image.is_empty()).then(|| {
				Element::new("img")
					.attr("class", "step-image")
					.attr("src", safe_url(&step.image))
					.attr("alt", step.title.clone())
			});

			Element::new("li")
				.attr("class", "step-card")
				.attr("data-step-id", step.id.clone())
				.child(number)
				.child(
					Element::new("div")
						.attr("class", "step-body")
						.child(heading("h4", "step-title", &step.title))
						.child(paragraph("step-description", &step.description))
						.child(image),
				)
		});

		let list_tag = if self.show_numbers { "ol" } else { "ul" };
		vec![
			heading("h3", "step-guide-title", &self.title).into_node(),
			Element::new(list_tag)
				.attr("class", "step-guide-steps")
				.children(steps)
				.into_node(),
		]
	}
}
