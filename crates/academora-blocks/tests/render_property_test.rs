//! Property-based tests for the render/parse contract

use academora_blocks::registry::extract_config;
use academora_blocks::{BlockAttributes, BlockDocument, BlockType, render_to_string};
use proptest::prelude::*;
use serde_json::{Value, json};

fn text() -> impl Strategy<Value = String> {
	"\\PC{0,24}"
}

fn whole(range: std::ops::Range<i32>) -> impl Strategy<Value = f64> {
	range.prop_map(f64::from)
}

fn checklist() -> impl Strategy<Value = Value> {
	(
		text(),
		proptest::collection::vec((text(), any::<bool>()), 0..5),
		any::<bool>(),
	)
		.prop_map(|(title, items, allow_user_edit)| {
			let items: Vec<Value> = items
				.into_iter()
				.map(|(text, checked)| json!({"text": text, "checked": checked}))
				.collect();
			json!({"title": title, "items": items, "allowUserEdit": allow_user_edit})
		})
}

fn calculator() -> impl Strategy<Value = Value> {
	(
		text(),
		proptest::collection::vec(
			(text(), whole(-1000..0), whole(0..1000), whole(1..50), whole(-2000..2000)),
			0..4,
		),
		text(),
		text(),
	)
		.prop_map(|(title, fields, formula, unit)| {
			let fields: Vec<Value> = fields
				.into_iter()
				.map(|(label, min, max, step, default_value)| {
					json!({
						"label": label,
						"min": min,
						"max": max,
						"step": step,
						"defaultValue": default_value,
					})
				})
				.collect();
			json!({"title": title, "fields": fields, "formula": formula, "resultUnit": unit})
		})
}

fn comparison() -> impl Strategy<Value = Value> {
	(
		text(),
		proptest::collection::vec((text(), proptest::collection::vec(text(), 0..4)), 0..4),
		proptest::collection::vec(text(), 0..3),
	)
		.prop_map(|(title, columns, row_headers)| {
			let columns: Vec<Value> = columns
				.into_iter()
				.map(|(header, cells)| json!({"header": header, "cells": cells}))
				.collect();
			json!({"title": title, "columns": columns, "rowHeaders": row_headers})
		})
}

fn quiz() -> impl Strategy<Value = Value> {
	(
		text(),
		proptest::collection::vec((text(), any::<bool>()), 0..5),
		text(),
		any::<bool>(),
	)
		.prop_map(|(question, options, explanation, show_explanation)| {
			let options: Vec<Value> = options
				.into_iter()
				.map(|(text, is_correct)| json!({"text": text, "isCorrect": is_correct}))
				.collect();
			json!({
				"question": question,
				"options": options,
				"explanation": explanation,
				"showExplanation": show_explanation,
			})
		})
}

fn tabs() -> impl Strategy<Value = Value> {
	(
		proptest::collection::vec((text(), text()), 0..4),
		proptest::option::of(prop_oneof!["tab-[1-4]", text()]),
	)
		.prop_map(|(tabs, active_tab)| {
			let tabs: Vec<Value> = tabs
				.into_iter()
				.map(|(label, content)| json!({"label": label, "content": content}))
				.collect();
			match active_tab {
				Some(active_tab) => json!({"tabs": tabs, "activeTab": active_tab}),
				None => json!({"tabs": tabs}),
			}
		})
}

fn url() -> impl Strategy<Value = String> {
	prop_oneof![
		"https://[a-z]{1,8}\\.edu/[a-z]{0,8}",
		"/[a-z]{1,8}\\.png",
		" ?(javascript|JavaScript|vbscript|data):[a-z()0-9]{0,12}",
		text(),
	]
}

fn color() -> impl Strategy<Value = String> {
	prop_oneof![
		"#[0-9a-f]{3,6}",
		"rgb\\([0-9]{1,3}, ?[0-9]{1,3}, ?[0-9]{1,3}\\)",
		"[a-z]{1,8}; ?[a-z-]{1,8}: ?[a-z]{1,8}",
		text(),
	]
}

fn collapsible() -> impl Strategy<Value = Value> {
	(text(), text(), any::<bool>()).prop_map(|(title, content, default_open)| {
		json!({"title": title, "content": content, "defaultOpen": default_open})
	})
}

fn cta() -> impl Strategy<Value = Value> {
	(
		(text(), text(), text(), url()),
		(color(), color()),
		(
			prop_oneof!["small", "medium", "large", text()],
			prop_oneof!["left", "center", "right", text()],
			any::<bool>(),
		),
	)
		.prop_map(
			|(
				(title, description, button_text, button_url),
				(background_color, text_color),
				(size, alignment, open_in_new_tab),
			)| {
				json!({
					"title": title,
					"description": description,
					"buttonText": button_text,
					"buttonUrl": button_url,
					"backgroundColor": background_color,
					"textColor": text_color,
					"size": size,
					"alignment": alignment,
					"openInNewTab": open_in_new_tab,
				})
			},
		)
}

fn step_guide() -> impl Strategy<Value = Value> {
	(
		text(),
		proptest::collection::vec((text(), text(), proptest::option::of(url())), 0..4),
		any::<bool>(),
	)
		.prop_map(|(title, steps, show_numbers)| {
			let steps: Vec<Value> = steps
				.into_iter()
				.map(|(title, description, image)| match image {
					Some(image) => json!({"title": title, "description": description, "image": image}),
					None => json!({"title": title, "description": description}),
				})
				.collect();
			json!({"title": title, "steps": steps, "showNumbers": show_numbers})
		})
}

fn timeline() -> impl Strategy<Value = Value> {
	(
		text(),
		proptest::collection::vec((text(), text(), text()), 0..4),
		prop_oneof!["vertical", "horizontal", text()],
	)
		.prop_map(|(title, items, orientation)| {
			let items: Vec<Value> = items
				.into_iter()
				.map(|(date, title, description)| {
					json!({"date": date, "title": title, "description": description})
				})
				.collect();
			json!({"title": title, "items": items, "orientation": orientation})
		})
}

fn loose() -> impl Strategy<Value = Value> {
	prop_oneof![
		Just(json!({})),
		Just(json!(null)),
		text().prop_map(|title| json!({"title": title, "size": "huge", "orientation": 3})),
		text().prop_map(|content| json!({"content": content, "defaultOpen": "true"})),
		text().prop_map(|step| json!({"steps": [step, 7, {"title": "x"}], "showNumbers": 0})),
	]
}

fn block() -> impl Strategy<Value = (BlockType, Value)> {
	prop_oneof![
		checklist().prop_map(|v| (BlockType::Checklist, v)),
		calculator().prop_map(|v| (BlockType::Calculator, v)),
		comparison().prop_map(|v| (BlockType::Comparison, v)),
		quiz().prop_map(|v| (BlockType::Quiz, v)),
		tabs().prop_map(|v| (BlockType::Tabs, v)),
		collapsible().prop_map(|v| (BlockType::Collapsible, v)),
		cta().prop_map(|v| (BlockType::Cta, v)),
		step_guide().prop_map(|v| (BlockType::StepGuide, v)),
		timeline().prop_map(|v| (BlockType::Timeline, v)),
		(proptest::sample::select(BlockType::ALL.to_vec()), loose()),
	]
}

proptest! {
	#[test]
	fn prop_embedded_config_round_trips((block_type, raw) in block()) {
		// Arrange
		let definition = block_type.definition();
		let attributes = definition.parse_attributes(&raw);

		// Act
		let node = definition.render_static_html(&attributes);
		let config = extract_config(block_type.as_str(), node.as_element().unwrap()).unwrap();

		// Assert
		prop_assert_eq!(definition.parse_attributes(&config), attributes);
	}

	#[test]
	fn prop_cta_config_keeps_author_values(raw in cta()) {
		// Arrange
		let definition = BlockType::Cta.definition();
		let attributes = definition.parse_attributes(&raw);
		let BlockAttributes::Cta(cta) = &attributes else {
			unreachable!("cta definition parses cta attributes");
		};

		// Act
		let node = definition.render_static_html(&attributes);
		let root = node.as_element().unwrap();
		let config = extract_config("cta", root).unwrap();

		// Assert
		prop_assert_eq!(&config["buttonUrl"], &raw["buttonUrl"]);
		prop_assert_eq!(&config["backgroundColor"], &raw["backgroundColor"]);
		prop_assert_eq!(&config["textColor"], &raw["textColor"]);
		let href = root
			.find(&|e| e.has_class("cta-button"))
			.and_then(|e| e.attribute("href"))
			.unwrap()
			.to_string();
		let scheme: String = href.chars().filter(|c| !c.is_whitespace()).collect();
		prop_assert!(!scheme.to_ascii_lowercase().starts_with("javascript:"));
		if href != cta.button_url {
			prop_assert_eq!(href, "#");
		}
	}

	#[test]
	fn prop_step_images_stay_verbatim_in_config(raw in step_guide()) {
		// Arrange
		let definition = BlockType::StepGuide.definition();
		let attributes = definition.parse_attributes(&raw);

		// Act
		let node = definition.render_static_html(&attributes);
		let config = extract_config("stepGuide", node.as_element().unwrap()).unwrap();

		// Assert
		let raw_steps = raw["steps"].as_array().unwrap();
		let steps = config["steps"].as_array().unwrap();
		prop_assert_eq!(steps.len(), raw_steps.len());
		for (step, raw_step) in steps.iter().zip(raw_steps) {
			let expected = raw_step["image"].as_str().unwrap_or("");
			prop_assert_eq!(step["image"].as_str(), Some(expected));
		}
	}

	#[test]
	fn prop_rendering_is_deterministic((block_type, raw) in block()) {
		// Act
		let first = render_to_string(block_type.as_str(), &raw);
		let second = render_to_string(block_type.as_str(), &raw);

		// Assert
		prop_assert_eq!(first, second);
	}

	#[test]
	fn prop_config_script_never_closes_early((block_type, raw) in block()) {
		// Arrange
		let html = render_to_string(block_type.as_str(), &raw);

		// Act
		let scripts = html.matches("</script>").count();

		// Assert
		prop_assert_eq!(scripts, 1);
	}

	#[test]
	fn prop_document_html_recovers_every_block(
		blocks in proptest::collection::vec(block(), 0..6),
	) {
		// Arrange
		let mut document = BlockDocument::new();
		for (block_type, raw) in &blocks {
			document.insert(*block_type, raw);
		}

		// Act
		let restored = BlockDocument::from_html(&document.to_html());

		// Assert
		prop_assert_eq!(restored.blocks(), document.blocks());
	}
}
