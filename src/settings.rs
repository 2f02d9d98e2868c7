//! Workspace settings
//!
//! One TOML file configures both the static renderer and the hydration
//! runtime:
//!
//! ```toml
//! [render]
//! emit_block_ids = true
//! unknown_placeholder = false
//!
//! [hydration]
//! id_prefix = "article"
//! container_tag = "section"
//! ```
//!
//! Every key is optional; missing keys keep their defaults.

use std::path::{Path, PathBuf};

use academora_blocks::{BlockError, BlockRenderer, RenderOptions};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(feature = "pages")]
use academora_pages::{HydrationOptions, HydrationRuntime};

/// Settings loading errors
#[derive(Error, Debug)]
pub enum SettingsError {
	/// The settings file could not be read
	#[error("Failed to read {path}: {source}")]
	Io {
		/// Path of the settings file
		path: PathBuf,
		/// Underlying I/O error
		#[source]
		source: std::io::Error,
	},

	/// The settings text is not valid TOML for [`Settings`]
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// The settings could not be written back as TOML
	#[error("TOML serialization error: {0}")]
	Serialize(#[from] toml::ser::Error),
}

impl From<SettingsError> for BlockError {
	fn from(error: SettingsError) -> Self {
		BlockError::Settings(error.to_string())
	}
}

/// Renderer and hydration settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	/// Static rendering options
	pub render: RenderOptions,
	/// Hydration runtime options
	#[cfg(feature = "pages")]
	pub hydration: HydrationOptions,
}

impl Settings {
	/// Creates default settings.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the render options.
	pub fn render(mut self, render: RenderOptions) -> Self {
		self.render = render;
		self
	}

	/// Sets the hydration options.
	#[cfg(feature = "pages")]
	pub fn hydration(mut self, hydration: HydrationOptions) -> Self {
		self.hydration = hydration;
		self
	}

	/// Parses settings from TOML text.
	pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
		Ok(toml::from_str(contents)?)
	}

	/// Loads settings from a TOML file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
			path: path.to_path_buf(),
			source,
		})?;

		let settings = Self::from_toml_str(&contents)?;
		tracing::debug!(path = %path.display(), "Loaded settings");
		Ok(settings)
	}

	/// Serializes the settings as TOML.
	pub fn to_toml_string(&self) -> Result<String, SettingsError> {
		Ok(toml::to_string(self)?)
	}

	/// Builds a static renderer from these settings.
	pub fn renderer(&self) -> BlockRenderer {
		BlockRenderer::with_options(self.render.clone())
	}

	/// Builds a hydration runtime from these settings.
	#[cfg(feature = "pages")]
	pub fn runtime(&self) -> HydrationRuntime {
		HydrationRuntime::with_options(self.hydration.clone())
	}
}
