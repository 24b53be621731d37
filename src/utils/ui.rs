use crate::core::pipeline::PipelineStage;
use crate::core::resolver::BuildPlan;
use crate::core::routes::StyleDelivery;
use colored::*;

/// Human-readable plan rendering for the terminal.
///
/// Machine consumers get JSON; this is the summary a developer sees.
pub struct RiggingUI;

impl RiggingUI {
    pub fn new() -> Self {
        Self
    }

    pub fn show_banner(&self) {
        println!(
            "\n  {} {}",
            "RIGGING".bright_cyan().bold(),
            format!("v{}", env!("CARGO_PKG_VERSION")).bright_white()
        );
        println!();
    }

    pub fn show_plan(&self, plan: &BuildPlan) {
        println!(
            "  {} {}",
            "mode".bright_black(),
            plan.environment.to_string().bright_cyan()
        );
        println!(
            "  {} {}/{} {} {}",
            "entry".bright_black(),
            plan.entry_output.context,
            plan.entry_output.entry.trim_start_matches("./"),
            "→".bright_black(),
            format!(
                "{}/{}",
                plan.entry_output.outdir, plan.entry_output.script_bundle
            )
            .bright_cyan()
        );

        let styles = match &plan.routes.style.delivery {
            StyleDelivery::Extract { target } => {
                format!("{}/{}", plan.entry_output.outdir, target)
            }
            StyleDelivery::Inline => "inline <style> injection".to_string(),
        };
        println!("  {} {}", "styles".bright_black(), styles.bright_cyan());
        println!(
            "  {} {}",
            "source maps".bright_black(),
            if plan.source_maps {
                "on".bright_green()
            } else {
                "off".bright_black()
            }
        );

        println!();
        for stage in plan.pipeline.stages() {
            println!(
                "  {} {}{}",
                "✓".bright_green(),
                stage.name().bright_white(),
                self.stage_detail(stage).bright_black()
            );
        }
        println!();
    }

    fn stage_detail(&self, stage: &PipelineStage) -> String {
        match stage {
            PipelineStage::Clean { patterns } => format!("  ({})", patterns.join(", ")),
            PipelineStage::MinifyScripts { source_maps } => {
                if *source_maps {
                    "  (with source maps)".to_string()
                } else {
                    String::new()
                }
            }
            PipelineStage::ExtractStyles { target, disabled } => {
                if *disabled {
                    "  (disabled, inline delivery)".to_string()
                } else {
                    format!("  ({})", target)
                }
            }
            PipelineStage::Banner { .. } => "  (entry bundle only)".to_string(),
            PipelineStage::DevProxy(proxy) => {
                format!("  ({}:{} → {})", proxy.host, proxy.port, proxy.upstream)
            }
            PipelineStage::RenderHtml { template, minify, .. } => {
                if minify.is_some() {
                    format!("  ({}, minified)", template)
                } else {
                    format!("  ({})", template)
                }
            }
            PipelineStage::CopyStatic { ignore, .. } => {
                format!("  (ignoring {})", ignore.join(", "))
            }
        }
    }
}

impl Default for RiggingUI {
    fn default() -> Self {
        Self::new()
    }
}
