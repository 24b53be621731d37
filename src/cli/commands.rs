use crate::core::models::{BuildEnvironment, EntryOutput, OutputLayout, PackageMetadata};
use crate::core::resolver::{BuildPlan, PlanChecker};
use crate::core::routes::RouteTable;
use crate::infrastructure::TokioFileSystemService;
use crate::utils::{Logger, RiggingUI};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::Path;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "rigging")]
#[command(about = "Rigging - build plan resolver for web asset pipelines")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a build plan and emit it as JSON
    Resolve {
        /// Project root directory
        #[arg(short, long, default_value = ".")]
        root: String,
        /// Build mode; anything but "development" resolves to production
        #[arg(short, long, default_value = "production")]
        mode: String,
        /// Package metadata file, relative to the project root
        #[arg(long, default_value = "package.json")]
        metadata: String,
        /// Write the plan to a file instead of stdout
        #[arg(short, long)]
        out: Option<String>,
        /// Pretty-print the emitted JSON
        #[arg(long)]
        pretty: bool,
        /// Also verify the required source inputs exist
        #[arg(long)]
        check: bool,
    },
    /// Validate a source tree against its resolved plan
    Check {
        /// Project root directory
        #[arg(short, long, default_value = ".")]
        root: String,
        /// Build mode; anything but "development" resolves to production
        #[arg(short, long, default_value = "production")]
        mode: String,
        /// Package metadata file, relative to the project root
        #[arg(long, default_value = "package.json")]
        metadata: String,
    },
    /// Show how a single file routes through the plan
    Explain {
        /// File request, optionally with a query suffix (icons.ttf?v=4.7.0)
        file: String,
        /// Build mode; anything but "development" resolves to production
        #[arg(short, long, default_value = "production")]
        mode: String,
    },
    /// Show resolver information
    Info,
}

pub struct CliHandler;

impl CliHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn run(&self) -> anyhow::Result<()> {
        // Initialize logging
        Logger::init();

        let cli = Cli::parse();

        match cli.command {
            Commands::Resolve {
                root,
                mode,
                metadata,
                out,
                pretty,
                check,
            } => {
                self.handle_resolve_command(&root, &mode, &metadata, out.as_deref(), pretty, check)
                    .await
            }
            Commands::Check {
                root,
                mode,
                metadata,
            } => self.handle_check_command(&root, &mode, &metadata).await,
            Commands::Explain { file, mode } => self.handle_explain_command(&file, &mode),
            Commands::Info => self.handle_info_command(),
        }
    }

    async fn handle_resolve_command(
        &self,
        root: &str,
        mode: &str,
        metadata_file: &str,
        out: Option<&str>,
        pretty: bool,
        check: bool,
    ) -> anyhow::Result<()> {
        Logger::resolve_start(mode, root);

        let env = BuildEnvironment::from_flag(Some(mode));
        let metadata = PackageMetadata::load(&Path::new(root).join(metadata_file))?;
        Logger::metadata_loaded(&metadata.name, &metadata.version);

        let plan = BuildPlan::resolve(env, metadata);

        if check {
            let checker = PlanChecker::new(Arc::new(TokioFileSystemService));
            checker.check(Path::new(root), &plan).await?;
        }

        let json = plan.to_json(pretty)?;
        match out {
            Some(target) => {
                tokio::fs::write(target, &json)
                    .await
                    .with_context(|| format!("Failed to write plan to {}", target))?;
                Logger::plan_written(target);
            }
            None => {
                println!("{}", json);
            }
        }

        Ok(())
    }

    async fn handle_check_command(
        &self,
        root: &str,
        mode: &str,
        metadata_file: &str,
    ) -> anyhow::Result<()> {
        Logger::resolve_start(mode, root);

        let env = BuildEnvironment::from_flag(Some(mode));
        let metadata = PackageMetadata::load(&Path::new(root).join(metadata_file))?;
        Logger::metadata_loaded(&metadata.name, &metadata.version);

        let plan = BuildPlan::resolve(env, metadata);
        let checker = PlanChecker::new(Arc::new(TokioFileSystemService));
        checker.check(Path::new(root), &plan).await?;

        let ui = RiggingUI::new();
        ui.show_banner();
        ui.show_plan(&plan);
        tracing::info!("✅ Plan and source inputs check out");

        Ok(())
    }

    fn handle_explain_command(&self, file: &str, mode: &str) -> anyhow::Result<()> {
        let env = BuildEnvironment::from_flag(Some(mode));
        let entry_output = EntryOutput::default();
        let table = RouteTable::for_env(env, &OutputLayout::default(), &entry_output.style_bundle);

        let route = table.route(file);
        println!("{} → {}", file, route.describe());

        Ok(())
    }

    fn handle_info_command(&self) -> anyhow::Result<()> {
        tracing::info!("🔧 Rigging v{}", env!("CARGO_PKG_VERSION"));
        tracing::info!("══════════════════════════════════════");
        tracing::info!("Build plan resolver for web asset pipelines");
        tracing::info!("");
        tracing::info!("🏗️  What it produces:");
        tracing::info!("  • Entry/output declaration (js/bundle.js, css/bundle.css)");
        tracing::info!("  • Single-pass file route table (one category per file)");
        tracing::info!("  • Ordered post-processing pipeline (clean → … → copy)");
        tracing::info!("");
        tracing::info!("🎚️  Modes:");
        tracing::info!("  • development: source maps, inline styles, reload proxy");
        tracing::info!("  • production: minified scripts, extracted styles, minified HTML");
        tracing::info!("");
        tracing::info!("The plan is consumed by an external bundler; rigging never");
        tracing::info!("transforms files itself.");

        Ok(())
    }
}

impl Default for CliHandler {
    fn default() -> Self {
        Self::new()
    }
}
