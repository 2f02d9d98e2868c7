use academora_core::node::{Element, IntoNode, Node};

use super::{StaticRender, heading};
use crate::attributes::ChecklistAttributes;

/// Checklist markup. `is_checked` decides each box by position.
pub(crate) fn checklist_view(
	attrs: &ChecklistAttributes,
	is_checked: impl Fn(usize) -> bool,
	disabled: bool,
) -> Vec<Node> {
	let items = attrs.items.iter().enumerate().map(|(index, item)| {
		Element::new("li")
			.attr("class", "checklist-item")
			.attr("data-item-id", item.id.clone())
			.child(
				Element::new("label")
					.child(
						Element::new("input")
							.attr("type", "checkbox")
							.bool_attr("checked", is_checked(index))
							.bool_attr("disabled", disabled),
					)
					.child(
						Element::new("span")
							.attr("class", "checklist-text")
							.child(item.text.clone()),
					),
			)
	});

	vec![
		heading("h3", "checklist-title", &attrs.title).into_node(),
		Element::new("ul")
			.attr("class", "checklist-items")
			.children(items)
			.into_node(),
	]
}

impl StaticRender for ChecklistAttributes {
	fn render_body(&self) -> Vec<Node> {
		checklist_view(self, |index| self.items[index].checked, true)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::attributes::ChecklistItem;
	use rstest::rstest;

	#[rstest]
	fn test_static_checkboxes_are_disabled_and_reflect_state() {
		// Arrange
		let attrs = ChecklistAttributes {
			items: vec![
				ChecklistItem {
					id: "a".into(),
					text: "Done".into(),
					checked: true,
				},
				ChecklistItem {
					id: "b".into(),
					text: "Todo".into(),
					checked: false,
				},
			],
			..ChecklistAttributes::default()
		};

		// Act
		let body = Node::Fragment(attrs.render_body());

		// Assert
		let inputs = body.find_all(&|e| e.tag_name() == "input");
		assert_eq!(inputs.len(), 2);
		assert!(inputs.iter().all(|i| i.has_attribute("disabled")));
		assert!(inputs[0].has_attribute("checked"));
		assert!(!inputs[1].has_attribute("checked"));
		assert_eq!(
			body.render_to_string(),
			concat!(
				r#"<h3 class="checklist-title">Application Checklist</h3>"#,
				r#"<ul class="checklist-items">"#,
				r#"<li class="checklist-item" data-item-id="a"><label><input type="checkbox" checked="checked" disabled="disabled" /><span class="checklist-text">Done</span></label></li>"#,
				r#"<li class="checklist-item" data-item-id="b"><label><input type="checkbox" disabled="disabled" /><span class="checklist-text">Todo</span></label></li>"#,
				"</ul>"
			)
		);
	}
}
