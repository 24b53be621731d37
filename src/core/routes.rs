use crate::core::models::{BuildEnvironment, OutputLayout};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// Version-query suffix carried by font/vector requests, e.g. "?v=4.7.0"
static VERSION_QUERY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^v=\d+\.\d+\.\d+$").unwrap());

/// Category a discovered source file routes to. Each file matches
/// exactly one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileCategory {
    Script,
    Stylesheet,
    RasterImage,
    WebFont,
    StaticAsset,
    Verbatim,
}

/// Output style for compiled stylesheets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    Expanded,
    Compressed,
}

/// How compiled style content reaches the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum StyleDelivery {
    /// Materialized into a standalone stylesheet file
    Extract { target: String },
    /// Injected inline by the page at runtime (development fallback)
    Inline,
}

/// Options for the three-stage stylesheet chain.
///
/// Stages apply as compile, then vendor-prefix, then deliver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleChainOptions {
    pub output_style: OutputStyle,
    pub vendor_prefix: bool,
    pub delivery: StyleDelivery,
    pub source_maps: bool,
}

/// Concrete action applied to a routed file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum RouteAction {
    /// Vendored sources are left to their own packaging
    Skip,
    /// Transpile to the stable target syntax
    Transpile { target: String },
    /// Run the compile / prefix / deliver stylesheet chain
    StyleChain(StyleChainOptions),
    /// Inline-encode into the referencing file, regardless of size
    InlineAlways,
    /// Inline-encode below the size limit, else emit under `outdir`
    InlineUnder { limit: u64, outdir: String },
    /// Always emit as a separate file under `outdir`
    EmitFile { outdir: String },
    /// Copied by the static-copy stage, byte for byte
    CopyVerbatim,
}

/// Routing decision for a single file request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub category: FileCategory,
    pub action: RouteAction,
}

impl Route {
    /// One-line human description, used by the explain command
    pub fn describe(&self) -> String {
        match &self.action {
            RouteAction::Skip => "skipped (vendored module)".to_string(),
            RouteAction::Transpile { target } => {
                format!("script: transpile to {}", target)
            }
            RouteAction::StyleChain(options) => {
                let delivery = match &options.delivery {
                    StyleDelivery::Extract { target } => format!("extract to {}", target),
                    StyleDelivery::Inline => "inline injection".to_string(),
                };
                format!(
                    "stylesheet: compile ({:?}), vendor-prefix, {}",
                    options.output_style, delivery
                )
            }
            RouteAction::InlineAlways => "raster image: inline as data URI".to_string(),
            RouteAction::InlineUnder { limit, outdir } => format!(
                "web font: inline below {} bytes, else emit under {}",
                limit, outdir
            ),
            RouteAction::EmitFile { outdir } => {
                format!("static asset: emit under {}", outdir)
            }
            RouteAction::CopyVerbatim => "copied verbatim by the copy stage".to_string(),
        }
    }
}

/// Single-pass dispatch table routing every file to exactly one
/// category.
///
/// Keyed by lowercase extension with one tie-break: for
/// `ttf`/`eot`/`svg`, a version-suffixed request wins the
/// inline-capable route, a plain request always emits a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteTable {
    /// Stable syntax target for script transpilation
    pub transpile_target: String,
    /// Options for the stylesheet chain
    pub style: StyleChainOptions,
    /// Inline size limit for version-suffixed font/vector requests
    pub inline_limit: u64,
    /// Output subdirectory for emitted font/vector assets
    pub asset_outdir: String,
    /// Patterns excluded from the verbatim-copy stage
    pub copy_excludes: Vec<String>,
}

pub const FONT_INLINE_LIMIT: u64 = 10_000;

impl RouteTable {
    pub fn for_env(env: BuildEnvironment, layout: &OutputLayout, style_bundle: &str) -> Self {
        let delivery = if env.is_development() {
            StyleDelivery::Inline
        } else {
            StyleDelivery::Extract {
                target: style_bundle.to_string(),
            }
        };

        Self {
            transpile_target: "es2015".to_string(),
            style: StyleChainOptions {
                output_style: if env.is_development() {
                    OutputStyle::Expanded
                } else {
                    OutputStyle::Compressed
                },
                vendor_prefix: true,
                delivery,
                source_maps: env.is_development(),
            },
            inline_limit: FONT_INLINE_LIMIT,
            asset_outdir: layout.assets.clone(),
            copy_excludes: vec!["*.js".to_string(), "*.scss".to_string()],
        }
    }

    /// Route a file request (path plus optional `?` query) to its
    /// category and action.
    pub fn route(&self, request: &str) -> Route {
        let (path, query) = split_request(request);
        let extension = extension_of(path);

        match extension.as_str() {
            "js" => {
                if is_vendored(path) {
                    return skip(FileCategory::Script);
                }
                Route {
                    category: FileCategory::Script,
                    action: RouteAction::Transpile {
                        target: self.transpile_target.clone(),
                    },
                }
            }
            "scss" | "sass" => {
                if is_vendored(path) {
                    return skip(FileCategory::Stylesheet);
                }
                Route {
                    category: FileCategory::Stylesheet,
                    action: RouteAction::StyleChain(self.style.clone()),
                }
            }
            "png" | "jpg" | "jpeg" | "gif" => Route {
                category: FileCategory::RasterImage,
                action: RouteAction::InlineAlways,
            },
            "woff" | "woff2" => self.web_font(),
            "ttf" | "eot" | "svg" => {
                // Version-suffixed requests take the inline-capable
                // route; plain requests always emit a file.
                if query.map(|q| VERSION_QUERY.is_match(q)).unwrap_or(false) {
                    self.web_font()
                } else {
                    Route {
                        category: FileCategory::StaticAsset,
                        action: RouteAction::EmitFile {
                            outdir: self.asset_outdir.clone(),
                        },
                    }
                }
            }
            _ => Route {
                category: FileCategory::Verbatim,
                action: RouteAction::CopyVerbatim,
            },
        }
    }

    fn web_font(&self) -> Route {
        Route {
            category: FileCategory::WebFont,
            action: RouteAction::InlineUnder {
                limit: self.inline_limit,
                outdir: self.asset_outdir.clone(),
            },
        }
    }
}

fn skip(category: FileCategory) -> Route {
    Route {
        category,
        action: RouteAction::Skip,
    }
}

fn split_request(request: &str) -> (&str, Option<&str>) {
    match request.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (request, None),
    }
}

fn extension_of(path: &str) -> String {
    std::path::Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default()
}

fn is_vendored(path: &str) -> bool {
    std::path::Path::new(path)
        .components()
        .any(|component| component.as_os_str() == "node_modules")
}
