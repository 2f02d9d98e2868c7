//! Subcommand implementations
//!
//! Each command returns its output as a string so `main` only decides where
//! it goes.

use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use academora::Settings;
use academora_blocks::registry::definitions;
use academora_blocks::{BlockDocument, BlockType, MemorySink};
use academora_core::dom::Document;
use academora_pages::HydrationOutcome;
use anyhow::{Context, Result, bail};
use colored::Colorize;
use serde_json::Value;

/// Reads a file, or stdin when `path` is `-`.
pub(crate) fn read_input(path: &Path) -> Result<String> {
	if path == Path::new("-") {
		return std::io::read_to_string(std::io::stdin()).context("failed to read stdin");
	}
	std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Parses inline JSON attributes; absent means an empty object.
pub(crate) fn parse_attributes(raw: Option<&str>) -> Result<Value> {
	let Some(raw) = raw else {
		return Ok(Value::Object(Default::default()));
	};
	let value: Value = serde_json::from_str(raw).context("attributes are not valid JSON")?;
	if !value.is_object() {
		bail!("attributes must be a JSON object");
	}
	Ok(value)
}

/// Renders one block to static HTML.
pub(crate) fn render(
	settings: &Settings,
	block_type: &str,
	attributes: &Value,
	pretty_config: bool,
) -> Result<String> {
	let parsed: BlockType = block_type.parse()?;
	let renderer = settings.renderer();
	let html = renderer.render_to_string(parsed.as_str(), attributes);
	if !pretty_config {
		return Ok(html);
	}

	let canonical = parsed.definition().parse_attributes(attributes).to_value();
	let mut out = html;
	writeln!(out)?;
	writeln!(out, "{}", serde_json::to_string_pretty(&canonical)?)?;
	Ok(out)
}

/// Lists the blocks stored in article HTML.
pub(crate) fn inspect(html: &str, json: bool) -> Result<String> {
	let sink = MemorySink::new();
	let document = BlockDocument::from_html_with_sink(html, &sink);
	let mut out = String::new();

	if json {
		let blocks: Vec<Value> = document
			.blocks()
			.iter()
			.map(|block| {
				serde_json::json!({
					"blockType": block.block_type().as_str(),
					"blockId": block.block_id(),
					"attributes": block.attributes().to_value(),
				})
			})
			.collect();
		writeln!(out, "{}", serde_json::to_string_pretty(&blocks)?)?;
		return Ok(out);
	}

	if document.is_empty() {
		writeln!(out, "{}", "No blocks found".yellow())?;
	}
	for (index, block) in document.blocks().iter().enumerate() {
		writeln!(
			out,
			"{:>3}. {} {}",
			index + 1,
			block.block_type().as_str().green().bold(),
			block.block_id().dimmed()
		)?;
	}
	for diagnostic in sink.diagnostics() {
		writeln!(out, "{} {}", "warning:".yellow().bold(), diagnostic)?;
	}
	Ok(out)
}

/// Result of a hydration check
pub(crate) struct HydrateSummary {
	pub(crate) output: String,
	pub(crate) skipped: usize,
}

/// Hydrates article HTML and reports what would mount on the page.
pub(crate) fn hydrate(settings: &Settings, html: &str) -> Result<HydrateSummary> {
	let sink = Arc::new(MemorySink::new());
	let mut runtime = settings.runtime().with_sink(sink.clone());
	let mut doc = Document::from_html(html);
	let root = doc.root();
	let report = runtime.hydrate_all(&mut doc, root);

	let mut out = String::new();
	for outcome in report.outcomes() {
		match outcome {
			HydrationOutcome::Mounted(block) => writeln!(
				out,
				"{} {} {}",
				"mounted".green().bold(),
				block.block_type.as_str(),
				block.block_id.dimmed()
			)?,
			HydrationOutcome::Skipped {
				reached, diagnostic, ..
			} => writeln!(
				out,
				"{} {} (after {}): {}",
				"skipped".red().bold(),
				diagnostic.block_type,
				reached,
				diagnostic.detail
			)?,
			HydrationOutcome::Failed { error, .. } => {
				writeln!(out, "{} {}", "failed".red().bold(), error)?
			}
			HydrationOutcome::Ignored(_) => {}
		}
	}
	writeln!(out, "{}", report.to_string().bold())?;

	Ok(HydrateSummary {
		output: out,
		skipped: report.skipped_count(),
	})
}

/// Lists block types and their insert commands.
pub(crate) fn types() -> Result<String> {
	let mut out = String::new();
	for definition in definitions() {
		let block_type = definition.block_type();
		writeln!(
			out,
			"{:<12} {:<20} .{}",
			block_type.as_str().green(),
			definition.insert_command(),
			block_type.css_class()
		)?;
	}
	Ok(out)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn plain() {
		colored::control::set_override(false);
	}

	#[rstest]
	#[case(None, json!({}))]
	#[case(Some(r#"{"title": "Fees"}"#), json!({"title": "Fees"}))]
	fn test_parse_attributes(#[case] raw: Option<&str>, #[case] expected: Value) {
		assert_eq!(parse_attributes(raw).unwrap(), expected);
	}

	#[rstest]
	#[case("[1, 2]")]
	#[case("{not json")]
	fn test_parse_attributes_rejects_non_objects(#[case] raw: &str) {
		assert!(parse_attributes(Some(raw)).is_err());
	}

	#[rstest]
	fn test_render_rejects_unknown_type() {
		let result = render(&Settings::default(), "poll", &json!({}), false);

		assert!(result.unwrap_err().to_string().contains("poll"));
	}

	#[rstest]
	fn test_render_then_inspect() {
		// Arrange
		plain();
		let html = render(&Settings::default(), "checklist", &json!({"title": "Visa"}), false)
			.unwrap();

		// Act
		let out = inspect(&html, false).unwrap();

		// Assert
		assert!(out.contains("checklist"));
		assert!(!out.contains("warning:"));
	}

	#[rstest]
	fn test_inspect_json_lists_canonical_attributes() {
		// Arrange
		let html = render(&Settings::default(), "collapsible", &json!({"title": "More"}), false)
			.unwrap();

		// Act
		let out = inspect(&html, true).unwrap();

		// Assert
		let blocks: Value = serde_json::from_str(&out).unwrap();
		assert_eq!(blocks[0]["blockType"], "collapsible");
		assert_eq!(blocks[0]["attributes"]["title"], "More");
		assert_eq!(blocks[0]["attributes"]["defaultOpen"], false);
	}

	#[rstest]
	fn test_hydrate_counts_skipped_blocks() {
		// Arrange
		plain();
		let good = render(&Settings::default(), "tabs", &json!({}), false).unwrap();
		let bad = concat!(
			r#"<div data-block-type="quiz">"#,
			r#"<script type="application/json" data-block-config>[1]</script></div>"#
		);
		let html = format!("{good}{bad}");

		// Act
		let summary = hydrate(&Settings::default(), &html).unwrap();

		// Assert
		assert_eq!(summary.skipped, 1);
		assert!(summary.output.contains("mounted tabs"));
		assert!(summary.output.contains("1 mounted, 1 skipped"));
	}

	#[rstest]
	fn test_types_lists_every_insert_command() {
		let out = types().unwrap();

		assert_eq!(out.lines().count(), 9);
		assert!(out.contains("insertStepGuide"));
	}
}
