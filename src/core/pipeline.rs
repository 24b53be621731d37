use crate::core::models::{BuildEnvironment, EntryOutput, PackageMetadata};
use crate::utils::{Result, RiggingError};
use serde::{Deserialize, Serialize};

/// Stage identity, ordered by required execution position.
///
/// The derived ordering is the pipeline invariant: clean before any
/// emission, extraction before HTML injection, copy last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageKind {
    Clean,
    MinifyScripts,
    ExtractStyles,
    Banner,
    DevProxy,
    RenderHtml,
    CopyStatic,
}

/// Local reload-proxy server declaration.
///
/// The server itself is an external collaborator; the plan only
/// carries its wiring. `reload: false` leaves page reloads to the
/// upstream dev server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
    pub upstream: String,
    pub reload: bool,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 8088,
            upstream: "http://localhost:8080/".to_string(),
            reload: false,
        }
    }
}

/// Minification switches for the rendered HTML entry point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HtmlMinifyOptions {
    pub html5: bool,
    pub remove_comments: bool,
    pub collapse_whitespace: bool,
    pub minify_css: bool,
    pub minify_js: bool,
    pub remove_empty_elements: bool,
    pub cache: bool,
}

impl Default for HtmlMinifyOptions {
    fn default() -> Self {
        Self {
            html5: true,
            remove_comments: true,
            collapse_whitespace: true,
            minify_css: true,
            minify_js: true,
            remove_empty_elements: false,
            cache: false,
        }
    }
}

/// Where bundle references are injected into the rendered document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InjectTarget {
    Head,
    Body,
}

/// One named post-processing stage with its options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "kebab-case")]
pub enum PipelineStage {
    /// Recursively delete all prior output
    Clean { patterns: Vec<String> },
    /// Minify the script bundle; source maps preserved in development
    MinifyScripts { source_maps: bool },
    /// Materialize extracted style content to its target file
    ExtractStyles { target: String, disabled: bool },
    /// Prepend the metadata banner to the script bundle only
    Banner { text: String, entry_only: bool },
    /// Run the local reload-proxy server (development only)
    DevProxy(ProxyConfig),
    /// Render the HTML entry from its template
    RenderHtml {
        template: String,
        inject: InjectTarget,
        minify: Option<HtmlMinifyOptions>,
    },
    /// Copy all remaining source files verbatim
    CopyStatic { from: String, ignore: Vec<String> },
}

impl PipelineStage {
    pub fn kind(&self) -> StageKind {
        match self {
            PipelineStage::Clean { .. } => StageKind::Clean,
            PipelineStage::MinifyScripts { .. } => StageKind::MinifyScripts,
            PipelineStage::ExtractStyles { .. } => StageKind::ExtractStyles,
            PipelineStage::Banner { .. } => StageKind::Banner,
            PipelineStage::DevProxy(_) => StageKind::DevProxy,
            PipelineStage::RenderHtml { .. } => StageKind::RenderHtml,
            PipelineStage::CopyStatic { .. } => StageKind::CopyStatic,
        }
    }

    pub fn name(&self) -> &'static str {
        match self.kind() {
            StageKind::Clean => "clean",
            StageKind::MinifyScripts => "minify-scripts",
            StageKind::ExtractStyles => "extract-styles",
            StageKind::Banner => "banner",
            StageKind::DevProxy => "dev-proxy",
            StageKind::RenderHtml => "render-html",
            StageKind::CopyStatic => "copy-static",
        }
    }
}

/// Ordered post-processing pipeline.
///
/// Construction via `for_env` is canonical; `validate` re-checks the
/// ordering invariant for plans that crossed a serialization
/// boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pipeline {
    stages: Vec<PipelineStage>,
}

impl Pipeline {
    /// Build the stage list for the given environment.
    ///
    /// The proxy stage only exists in development plans; HTML
    /// minification only in production plans.
    pub fn for_env(
        env: BuildEnvironment,
        metadata: &PackageMetadata,
        entry_output: &EntryOutput,
    ) -> Self {
        let development = env.is_development();
        let mut stages = vec![
            PipelineStage::Clean {
                patterns: vec![format!("{}/**/*", entry_output.outdir)],
            },
            PipelineStage::MinifyScripts {
                source_maps: development,
            },
            PipelineStage::ExtractStyles {
                target: entry_output.style_bundle.clone(),
                disabled: development,
            },
            PipelineStage::Banner {
                text: metadata.banner(),
                entry_only: true,
            },
        ];

        if development {
            stages.push(PipelineStage::DevProxy(ProxyConfig::default()));
        }

        stages.push(PipelineStage::RenderHtml {
            template: entry_output.html_template.clone(),
            inject: InjectTarget::Head,
            minify: if development {
                None
            } else {
                Some(HtmlMinifyOptions::default())
            },
        });
        stages.push(PipelineStage::CopyStatic {
            from: "./**/*".to_string(),
            ignore: vec!["*.js".to_string(), "*.scss".to_string()],
        });

        Self { stages }
    }

    pub fn stages(&self) -> &[PipelineStage] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Check the structural ordering invariant.
    pub fn validate(&self) -> Result<()> {
        if self.stages.is_empty() {
            return Err(RiggingError::invalid_plan("pipeline has no stages"));
        }

        for pair in self.stages.windows(2) {
            if pair[0].kind() >= pair[1].kind() {
                return Err(RiggingError::invalid_plan(format!(
                    "stage {} must not precede {}",
                    pair[0].name(),
                    pair[1].name()
                )));
            }
        }

        let first = &self.stages[0];
        if first.kind() != StageKind::Clean {
            return Err(RiggingError::invalid_plan(
                "output must be cleaned before any stage emits files",
            ));
        }

        let last = &self.stages[self.stages.len() - 1];
        if last.kind() != StageKind::CopyStatic {
            return Err(RiggingError::invalid_plan(
                "verbatim copy must run after all transformed output",
            ));
        }

        let extract = self.position(StageKind::ExtractStyles);
        let render = self.position(StageKind::RenderHtml);
        match (extract, render) {
            (Some(e), Some(r)) if e < r => Ok(()),
            _ => Err(RiggingError::invalid_plan(
                "style extraction must precede HTML injection",
            )),
        }
    }

    pub fn stage(&self, kind: StageKind) -> Option<&PipelineStage> {
        self.stages.iter().find(|stage| stage.kind() == kind)
    }

    fn position(&self, kind: StageKind) -> Option<usize> {
        self.stages.iter().position(|stage| stage.kind() == kind)
    }
}
