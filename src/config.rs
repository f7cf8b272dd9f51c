//! Site configuration module.
//!
//! Handles loading and validating `config.toml`. All options have stock
//! defaults, so a config file is only needed to override them.
//!
//! ## Config File
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! content_dir = "content"       # Category subdirectories live here
//! themes_dir = "themes"         # Theme directories live here
//! theme = "basic"               # Theme to use (static assets)
//! output_dir = "output"         # Generated site destination
//!
//! default_author = "Joe Bloggs" # Author for posts without one
//! site_name = "My Blog"
//! site_description = "Website"
//! # copyright = "..."           # Omit for "Copyright <year> <author>"
//!
//! date_format = "%Y/%m/%d"      # strftime format for post dates
//! category_page_size = 10       # Posts per category listing page
//! home_page_size = 5            # Posts per home feed page
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! site_name = "Field Notes"
//! home_page_size = 8
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Path to the content root; each subdirectory is a category.
    pub content_dir: String,
    /// Path to the themes root; static assets come from `<themes_dir>/<theme>/static`.
    pub themes_dir: String,
    /// Theme name.
    pub theme: String,
    /// Destination for the generated site. Cleared on every run.
    pub output_dir: String,
    /// Author used for posts without an `author` metadata key.
    pub default_author: String,
    /// Site name, shown in headers and used as the home page title.
    pub site_name: String,
    /// Site description, used on the home page.
    pub site_description: String,
    /// Footer copyright statement. When absent, derived from the current
    /// year and the default author.
    pub copyright: Option<String>,
    /// strftime-style format every post `date` must parse against.
    pub date_format: String,
    /// Posts per page on category listings.
    pub category_page_size: usize,
    /// Posts per page on the home feed.
    pub home_page_size: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: "content".to_string(),
            themes_dir: "themes".to_string(),
            theme: "basic".to_string(),
            output_dir: "output".to_string(),
            default_author: "Joe Bloggs".to_string(),
            site_name: "My Blog".to_string(),
            site_description: "Website".to_string(),
            copyright: None,
            date_format: "%Y/%m/%d".to_string(),
            category_page_size: 10,
            home_page_size: 5,
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.category_page_size == 0 {
            return Err(ConfigError::Validation(
                "category_page_size must be non-zero".into(),
            ));
        }
        if self.home_page_size == 0 {
            return Err(ConfigError::Validation(
                "home_page_size must be non-zero".into(),
            ));
        }
        if self.date_format.is_empty() {
            return Err(ConfigError::Validation(
                "date_format must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// The effective copyright line: the configured statement, or
    /// `Copyright <current year> <default_author>` when none is set.
    pub fn copyright_line(&self) -> String {
        match &self.copyright {
            Some(c) => c.clone(),
            None => format!(
                "Copyright {} {}",
                chrono::Local::now().year(),
                self.default_author
            ),
        }
    }

    /// Directory holding the active theme's static assets.
    pub fn static_dir(&self) -> std::path::PathBuf {
        Path::new(&self.themes_dir).join(&self.theme).join("static")
    }
}

/// Load configuration from a `config.toml` file.
///
/// A missing file yields stock defaults; a present but malformed or invalid
/// file is an error.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let config = if path.exists() {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)?
    } else {
        SiteConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// A fully documented stock `config.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> String {
    let d = SiteConfig::default();
    format!(
        r#"# simple-blog configuration
# All options are optional - the values below are the defaults.

# Content root. Each first-level subdirectory is a category;
# posts are markdown files anywhere beneath it.
content_dir = "{content_dir}"

# Themes root and active theme. Static assets are mirrored from
# <themes_dir>/<theme>/static into <output_dir>/static.
themes_dir = "{themes_dir}"
theme = "{theme}"

# Destination for the generated site. Cleared on every run.
output_dir = "{output_dir}"

# Author used for posts that don't set one in their metadata.
default_author = "{default_author}"

site_name = "{site_name}"
site_description = "{site_description}"

# Footer copyright statement. When omitted, "Copyright <year> <author>"
# is derived from the current year and default_author.
# copyright = "Copyright 2026 Joe Bloggs"

# strftime format every post date must parse against.
date_format = "{date_format}"

# Pagination limits.
category_page_size = {category_page_size}
home_page_size = {home_page_size}
"#,
        content_dir = d.content_dir,
        themes_dir = d.themes_dir,
        theme = d.theme,
        output_dir = d.output_dir,
        default_author = d.default_author,
        site_name = d.site_name,
        site_description = d.site_description,
        date_format = d.date_format,
        category_page_size = d.category_page_size,
        home_page_size = d.home_page_size,
    )
}
