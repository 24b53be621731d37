use crate::core::interfaces::FileSystemService;
use crate::core::models::{BuildEnvironment, EntryOutput, OutputLayout, PackageMetadata};
use crate::core::pipeline::{Pipeline, PipelineStage, StageKind};
use crate::core::routes::RouteTable;
use crate::utils::{Logger, Result, RiggingError, Timer};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Fully-specified build plan handed to the external bundler.
///
/// Constructed fresh per invocation from the environment flag and
/// explicit package metadata; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildPlan {
    pub environment: BuildEnvironment,
    pub metadata: PackageMetadata,
    pub entry_output: EntryOutput,
    pub layout: OutputLayout,
    pub routes: RouteTable,
    pub pipeline: Pipeline,
    /// Source maps are emitted only for development builds
    pub source_maps: bool,
}

impl BuildPlan {
    /// Resolve the complete plan for one build invocation.
    pub fn resolve(env: BuildEnvironment, metadata: PackageMetadata) -> Self {
        let _timer = Timer::start("Resolving build plan");

        let entry_output = EntryOutput::default();
        let layout = OutputLayout::default();
        let routes = RouteTable::for_env(env, &layout, &entry_output.style_bundle);
        let pipeline = Pipeline::for_env(env, &metadata, &entry_output);

        let plan = Self {
            environment: env,
            metadata,
            entry_output,
            layout,
            routes,
            pipeline,
            source_maps: env.is_development(),
        };

        Logger::plan_ready(plan.pipeline.len(), plan.source_maps);
        plan
    }

    /// Re-check plan invariants.
    ///
    /// Resolution produces valid plans by construction; this guards
    /// plans that crossed a serialization boundary.
    pub fn validate(&self) -> Result<()> {
        self.pipeline.validate()?;

        if self.source_maps != self.environment.is_development() {
            return Err(RiggingError::invalid_plan(
                "source maps must track the development flag",
            ));
        }

        match self.pipeline.stage(StageKind::CopyStatic) {
            Some(PipelineStage::CopyStatic { ignore, .. }) => {
                if ignore != &self.routes.copy_excludes {
                    return Err(RiggingError::invalid_plan(
                        "copy-stage exclusions must match the route table",
                    ));
                }
            }
            _ => {
                return Err(RiggingError::invalid_plan("copy stage missing"));
            }
        }

        if self.environment.is_development() != self.pipeline.stage(StageKind::DevProxy).is_some() {
            return Err(RiggingError::invalid_plan(
                "dev proxy stage must exist exactly in development plans",
            ));
        }

        Ok(())
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let plan: BuildPlan = serde_json::from_str(content)?;
        plan.validate()?;
        Ok(plan)
    }
}

/// Validates a source tree against a resolved plan.
///
/// A missing entry script or HTML template is fatal for the build, so
/// it is surfaced here before the plan is handed off.
pub struct PlanChecker {
    fs_service: Arc<dyn FileSystemService>,
}

impl PlanChecker {
    pub fn new(fs_service: Arc<dyn FileSystemService>) -> Self {
        Self { fs_service }
    }

    pub async fn check(&self, root: &Path, plan: &BuildPlan) -> Result<()> {
        let _timer = Timer::start("Checking source inputs");
        Logger::checking_inputs();

        plan.validate()?;

        let entry = plan.entry_output.entry_path(root);
        if !self.fs_service.file_exists(&entry) {
            return Err(RiggingError::missing_input(entry));
        }
        self.fs_service.read_file(&entry).await?;

        let template = plan.entry_output.template_path(root);
        if !self.fs_service.file_exists(&template) {
            return Err(RiggingError::missing_input(template));
        }
        self.fs_service.read_file(&template).await?;

        Logger::debug(&format!(
            "Inputs present and readable: {}, {}",
            entry.display(),
            template.display()
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::routes::{RouteAction, StyleDelivery};

    fn metadata() -> PackageMetadata {
        PackageMetadata {
            name: "demo-app".to_string(),
            version: "1.2.3".to_string(),
            description: "A demo".to_string(),
            author: "Jane Doe".to_string(),
            license: "MIT".to_string(),
        }
    }

    #[test]
    fn test_resolve_production_plan() {
        let plan = BuildPlan::resolve(BuildEnvironment::Production, metadata());

        assert!(!plan.source_maps);
        assert!(plan.validate().is_ok());
        assert_eq!(plan.entry_output.script_bundle, "js/bundle.js");
        assert_eq!(plan.entry_output.style_bundle, "css/bundle.css");

        match &plan.routes.style.delivery {
            StyleDelivery::Extract { target } => assert_eq!(target, "css/bundle.css"),
            StyleDelivery::Inline => panic!("production extracts styles"),
        }
    }

    #[test]
    fn test_resolve_development_plan() {
        let plan = BuildPlan::resolve(BuildEnvironment::Development, metadata());

        assert!(plan.source_maps);
        assert!(plan.validate().is_ok());
        assert_eq!(plan.routes.style.delivery, StyleDelivery::Inline);
        assert!(plan.pipeline.stage(StageKind::DevProxy).is_some());
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let a = BuildPlan::resolve(BuildEnvironment::Production, metadata());
        let b = BuildPlan::resolve(BuildEnvironment::Production, metadata());
        assert_eq!(a, b);
        assert_eq!(
            a.to_json(false).unwrap(),
            b.to_json(false).unwrap()
        );
    }

    #[test]
    fn test_json_round_trip() {
        let plan = BuildPlan::resolve(BuildEnvironment::Development, metadata());
        let json = plan.to_json(true).unwrap();
        let restored = BuildPlan::from_json(&json).unwrap();
        assert_eq!(plan, restored);
    }

    #[test]
    fn test_from_json_rejects_tampered_plan() {
        let plan = BuildPlan::resolve(BuildEnvironment::Production, metadata());
        let json = plan.to_json(false).unwrap();

        // Flip the source-map flag without flipping the environment
        let tampered = json.replace("\"source_maps\":false", "\"source_maps\":true");
        assert!(BuildPlan::from_json(&tampered).is_err());
    }

    #[test]
    fn test_banner_stage_carries_metadata() {
        let plan = BuildPlan::resolve(BuildEnvironment::Production, metadata());
        match plan.pipeline.stage(StageKind::Banner) {
            Some(PipelineStage::Banner { text, entry_only }) => {
                assert!(*entry_only);
                assert!(text.contains("Package: demo-app - v1.2.3"));
                assert!(text.contains("@license MIT"));
            }
            _ => panic!("expected banner stage"),
        }
    }

    #[test]
    fn test_script_never_copied_verbatim() {
        let plan = BuildPlan::resolve(BuildEnvironment::Production, metadata());
        let route = plan.routes.route("src/app.js");
        assert!(!matches!(route.action, RouteAction::CopyVerbatim));
        assert!(plan.routes.copy_excludes.contains(&"*.js".to_string()));
    }
}
