use crate::utils::{Result, RiggingError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Build environment selected for one plan resolution.
///
/// Anything other than the recognized development flag resolves to
/// production. The flag is fixed for the lifetime of the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildEnvironment {
    Development,
    Production,
}

impl BuildEnvironment {
    /// Resolve the environment from an optional flag value.
    ///
    /// Only the exact value `development` selects development mode;
    /// any other value (or none) is production-equivalent.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("development") => BuildEnvironment::Development,
            _ => BuildEnvironment::Production,
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, BuildEnvironment::Development)
    }
}

impl std::fmt::Display for BuildEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildEnvironment::Development => write!(f, "development"),
            BuildEnvironment::Production => write!(f, "production"),
        }
    }
}

/// Package metadata consumed by the banner stage.
///
/// Passed into plan resolution explicitly instead of being read as
/// ambient state from the project directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub license: String,
}

impl PackageMetadata {
    /// Load metadata from a `package.json`-style file.
    ///
    /// Unknown fields are ignored; `name` and `version` are required.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RiggingError::missing_input(path));
        }

        let content = std::fs::read_to_string(path)?;
        let metadata: PackageMetadata = serde_json::from_str(&content).map_err(|e| {
            RiggingError::metadata(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        Ok(metadata)
    }

    /// Render the banner block prepended to the script bundle.
    pub fn banner(&self) -> String {
        format!(
            "\n          Package: {} - v{}\n          Description: {}\n          @author {}\n          @license {}\n        ",
            self.name, self.version, self.description, self.author, self.license
        )
    }
}

/// Fixed entry and output declaration for one build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryOutput {
    /// Source directory all entry-relative paths resolve against
    #[serde(default = "default_context")]
    pub context: String,
    /// Entry script, relative to the context directory
    #[serde(default = "default_entry")]
    pub entry: String,
    /// Output directory the whole tree is emitted into
    #[serde(default = "default_outdir")]
    pub outdir: String,
    /// Script bundle path, relative to the output directory
    #[serde(default = "default_script_bundle")]
    pub script_bundle: String,
    /// Stylesheet bundle path, relative to the output directory
    #[serde(default = "default_style_bundle")]
    pub style_bundle: String,
    /// HTML template, relative to the context directory
    #[serde(default = "default_html_template")]
    pub html_template: String,
}

fn default_context() -> String {
    "src".to_string()
}

fn default_entry() -> String {
    "./index.js".to_string()
}

fn default_outdir() -> String {
    "dist".to_string()
}

fn default_script_bundle() -> String {
    "js/bundle.js".to_string()
}

fn default_style_bundle() -> String {
    "css/bundle.css".to_string()
}

fn default_html_template() -> String {
    "./index.html".to_string()
}

impl Default for EntryOutput {
    fn default() -> Self {
        Self {
            context: default_context(),
            entry: default_entry(),
            outdir: default_outdir(),
            script_bundle: default_script_bundle(),
            style_bundle: default_style_bundle(),
            html_template: default_html_template(),
        }
    }
}

impl EntryOutput {
    /// Absolute path of the entry script under the given project root
    pub fn entry_path(&self, root: &Path) -> std::path::PathBuf {
        join_context_relative(root, &self.context, &self.entry)
    }

    /// Absolute path of the HTML template under the given project root
    pub fn template_path(&self, root: &Path) -> std::path::PathBuf {
        join_context_relative(root, &self.context, &self.html_template)
    }
}

fn join_context_relative(root: &Path, context: &str, relative: &str) -> std::path::PathBuf {
    let trimmed = relative.strip_prefix("./").unwrap_or(relative);
    root.join(context).join(trimmed)
}

/// Logical output categories mapped to output subdirectories.
///
/// Font and vector assets land under the stylesheet subdirectory
/// regardless of asset kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputLayout {
    #[serde(default = "default_scripts_dir")]
    pub scripts: String,
    #[serde(default = "default_styles_dir")]
    pub styles: String,
    #[serde(default = "default_assets_dir")]
    pub assets: String,
    #[serde(default)]
    pub markup: String,
}

fn default_scripts_dir() -> String {
    "js/".to_string()
}

fn default_styles_dir() -> String {
    "css/".to_string()
}

fn default_assets_dir() -> String {
    "css/".to_string()
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self {
            scripts: default_scripts_dir(),
            styles: default_styles_dir(),
            assets: default_assets_dir(),
            markup: String::new(),
        }
    }
}
