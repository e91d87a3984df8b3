//! Site settings management.
//!
//! The blog itself is produced by an external static-site framework; these
//! structures carry the declarative settings that framework consumes, loaded
//! from `config.toml`.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main settings structure for the devnotes site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site identity and URL settings.
    #[serde(default)]
    pub site: SiteConfig,

    /// Content layout settings.
    #[serde(default)]
    pub content: ContentConfig,

    /// Options forwarded to the Markdown processor.
    #[serde(default)]
    pub markdown: MarkdownConfig,

    /// Feed output settings.
    #[serde(default)]
    pub feeds: FeedConfig,

    /// Pagination settings.
    #[serde(default)]
    pub pagination: PaginationConfig,

    /// Theme selection and theme-specific settings.
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Enabled plugin names.
    #[serde(default = "default_plugins")]
    pub plugins: Vec<String>,
}

/// Site-wide identity and URL settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site author name.
    #[serde(default = "default_author")]
    pub author: String,

    /// Site name shown in the masthead.
    #[serde(default = "default_sitename")]
    pub sitename: String,

    /// Site subtitle.
    #[serde(default = "default_subtitle")]
    pub subtitle: String,

    /// Site description for meta tags. Falls back to the subtitle.
    #[serde(default)]
    pub description: Option<String>,

    /// Name of the generated site index document.
    #[serde(default = "default_siteindex_url")]
    pub siteindex_url: String,

    /// Base URL of the site (e.g., "https://example.com").
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Whether generated links should be document relative.
    #[serde(default)]
    pub relative_urls: bool,

    /// IANA timezone name used for document dates.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Default language code.
    #[serde(default = "default_lang")]
    pub default_lang: String,
}

/// Content layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Content directory processed by the framework.
    #[serde(default = "default_content_path")]
    pub path: PathBuf,

    /// Directories to look at for pages, relative to the content directory.
    #[serde(default = "default_page_paths")]
    pub page_paths: Vec<String>,

    /// Directories to look at for articles, relative to the content directory.
    #[serde(default = "default_article_paths")]
    pub article_paths: Vec<String>,

    /// Directories to look for static files, relative to the content directory.
    #[serde(default = "default_static_paths")]
    pub static_paths: Vec<String>,

    /// Where to output the generated files.
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,

    /// Whether the framework may reuse cached content between runs.
    #[serde(default)]
    pub load_content_cache: bool,
}

/// Options forwarded untouched to the external Markdown processor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkdownConfig {
    /// Output format requested from the processor.
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// Per-extension option tables, keyed by extension name.
    #[serde(default = "default_markdown_extensions")]
    pub extensions: BTreeMap<String, toml::Table>,
}

/// Feed outputs. Each entry is a relative output path; `None` disables it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default)]
    pub feed_all_atom: Option<String>,

    #[serde(default)]
    pub category_feed_atom: Option<String>,

    #[serde(default)]
    pub translation_feed_atom: Option<String>,

    #[serde(default)]
    pub author_feed_atom: Option<String>,

    #[serde(default)]
    pub author_feed_rss: Option<String>,
}

/// Pagination settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Number of articles per listing page.
    #[serde(default = "default_pagination")]
    pub default_pagination: usize,
}

/// Theme selection and theme-specific settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Theme directory, relative to the repository root.
    #[serde(default = "default_theme")]
    pub theme: PathBuf,

    /// Header cover image, relative to the static content root.
    #[serde(default = "default_header_cover")]
    pub header_cover: String,

    /// Header background color.
    #[serde(default = "default_header_color")]
    pub header_color: String,

    /// Stylesheet used for code color schemes.
    #[serde(default = "default_color_scheme_css")]
    pub color_scheme_css: String,

    /// Per-file metadata overrides for extra static files.
    #[serde(default = "default_extra_path_metadata")]
    pub extra_path_metadata: BTreeMap<String, PathMetadata>,

    /// Social links rendered by the theme.
    #[serde(default = "default_social")]
    pub social: Vec<SocialLink>,
}

/// Metadata override for a single static file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathMetadata {
    /// Destination path in the output tree.
    #[serde(default)]
    pub path: Option<String>,
}

/// A single social link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
}

// Default value functions
fn default_author() -> String {
    "db".to_string()
}

fn default_sitename() -> String {
    "#Dev".to_string()
}

fn default_subtitle() -> String {
    "A collection of software development notes".to_string()
}

fn default_siteindex_url() -> String {
    "enc".to_string()
}

fn default_site_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timezone() -> String {
    "America/New_York".to_string()
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_content_path() -> PathBuf {
    PathBuf::from("content")
}

fn default_page_paths() -> Vec<String> {
    vec!["pages".to_string()]
}

fn default_article_paths() -> Vec<String> {
    vec!["articles".to_string()]
}

fn default_static_paths() -> Vec<String> {
    vec!["images".to_string(), "extra".to_string()]
}

fn default_output_path() -> PathBuf {
    PathBuf::from("output")
}

fn default_output_format() -> String {
    "html5".to_string()
}

fn default_markdown_extensions() -> BTreeMap<String, toml::Table> {
    let mut extensions = BTreeMap::new();

    for name in [
        "attr_list",
        "fenced_code",
        "extra",
        "meta",
        "toc",
        "admonition",
        "def_list",
        "arithmatex",
        "caret",
        "critic",
        "details",
        "inlinehilite",
        "magiclink",
        "mark",
        "keys",
        "smartsymbols",
        "tasklist",
        "tilde",
        "tabbed",
    ] {
        extensions.insert(name.to_string(), toml::Table::new());
    }

    extensions.insert(
        "codehilite".to_string(),
        toml::toml! { css_class = "highlight" },
    );
    extensions.insert(
        "betterem".to_string(),
        toml::toml! { smart_enable = "all" },
    );
    extensions.insert(
        "emoji".to_string(),
        toml::toml! {
            emoji_index = "emojione"
            emoji_generator = "to_png"
        },
    );
    // All code blocks are fence delimited; indented blocks stay plain text.
    extensions.insert(
        "superfences".to_string(),
        toml::toml! { disable_indented_code_blocks = true },
    );
    extensions.insert(
        "highlight".to_string(),
        toml::toml! {
            legacy_no_wrap_code = true
            linenums_style = "table"
            css_class = "highlight"
            guess_lang = false
            pygments_style = "default"
            noclasses = false
            use_pygments = true
        },
    );

    extensions
}

fn default_pagination() -> usize {
    10
}

fn default_theme() -> PathBuf {
    ["pelican", "themes", "pelican-clean-blog"].iter().collect()
}

fn default_header_cover() -> String {
    "images/home-bg.png".to_string()
}

fn default_header_color() -> String {
    "#004a59".to_string()
}

fn default_color_scheme_css() -> String {
    "tomorrow_night.css".to_string()
}

fn default_extra_path_metadata() -> BTreeMap<String, PathMetadata> {
    let mut extra = BTreeMap::new();
    extra.insert(
        "extra/favicon.ico".to_string(),
        PathMetadata {
            path: Some("favicon.ico".to_string()),
        },
    );
    extra
}

fn default_social() -> Vec<SocialLink> {
    vec![SocialLink {
        name: "github".to_string(),
        url: "https://github.com/dbarsam".to_string(),
    }]
}

fn default_plugins() -> Vec<String> {
    vec!["autostatic".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            content: ContentConfig::default(),
            markdown: MarkdownConfig::default(),
            feeds: FeedConfig::default(),
            pagination: PaginationConfig::default(),
            theme: ThemeConfig::default(),
            plugins: default_plugins(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            author: default_author(),
            sitename: default_sitename(),
            subtitle: default_subtitle(),
            description: None,
            siteindex_url: default_siteindex_url(),
            site_url: default_site_url(),
            relative_urls: false,
            timezone: default_timezone(),
            default_lang: default_lang(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            path: default_content_path(),
            page_paths: default_page_paths(),
            article_paths: default_article_paths(),
            static_paths: default_static_paths(),
            output_path: default_output_path(),
            load_content_cache: false,
        }
    }
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            output_format: default_output_format(),
            extensions: default_markdown_extensions(),
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_pagination: default_pagination(),
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            header_cover: default_header_cover(),
            header_color: default_header_color(),
            color_scheme_css: default_color_scheme_css(),
            extra_path_metadata: default_extra_path_metadata(),
            social: default_social(),
        }
    }
}

impl SiteConfig {
    /// Get the site description, falling back to the subtitle.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.subtitle)
    }
}

impl FeedConfig {
    /// Whether any feed output is enabled.
    pub fn any_enabled(&self) -> bool {
        self.feed_all_atom.is_some()
            || self.category_feed_atom.is_some()
            || self.translation_feed_atom.is_some()
            || self.author_feed_atom.is_some()
            || self.author_feed_rss.is_some()
    }
}

impl Config {
    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::settings(format!(
                "Settings file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::settings_with_source(
                format!("Failed to parse settings file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load settings using the config crate for more flexibility.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("DEVNOTES").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the settings.
    fn validate(&self) -> Result<()> {
        if self.site.sitename.is_empty() {
            return Err(CoreError::settings("site.sitename cannot be empty"));
        }

        if self.site.site_url.is_empty() {
            return Err(CoreError::settings("site.site_url cannot be empty"));
        }

        if self.pagination.default_pagination == 0 {
            return Err(CoreError::settings(
                "pagination.default_pagination must be at least 1",
            ));
        }

        if self.site.site_url.ends_with('/') {
            tracing::warn!("site.site_url should not have a trailing slash");
        }

        Ok(())
    }

    /// Get the full URL for a site path.
    ///
    /// With `relative_urls` enabled the framework rewrites links per
    /// document, so only the root-relative form is returned.
    pub fn url_for(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if self.site.relative_urls {
            format!("/{path}")
        } else {
            let base = self.site.site_url.trim_end_matches('/');
            format!("{base}/{path}")
        }
    }
}
