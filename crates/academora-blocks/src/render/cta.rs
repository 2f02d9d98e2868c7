use academora_core::node::{Element, IntoNode, Node};

use super::{StaticRender, css_color, heading, paragraph, safe_url};
use crate::attributes::CtaAttributes;

impl StaticRender for CtaAttributes {
	fn render_body(&self) -> Vec<Node> {
		let defaults = CtaAttributes::default();
		let background = css_color(&self.background_color, &defaults.background_color);
		let text = css_color(&self.text_color, &defaults.text_color);

		let button = Element::new("a")
			.attr("class", "cta-button")
			.attr("href", safe_url(&self.button_url))
			.opt_attr("target", self.open_in_new_tab.then_some("_blank"))
			.opt_attr("rel", self.open_in_new_tab.then_some("noopener noreferrer"))
			.child(self.button_text.clone());

		vec![
			Element::new("div")
				.attr(
					"class",
					format!(
						"cta-content cta-{} cta-align-{}",
						self.size.as_str(),
						self.alignment.as_str()
					),
				)
				.attr(
					"style",
					format!("background-color: {}; color: {};", background, text),
				)
				.child(heading("h3", "cta-title", &self.title))
				.child(paragraph("cta-description", &self.description))
				.child(button)
				.into_node(),
		]
	}
}
