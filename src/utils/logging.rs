use std::time::Instant;
use tracing::{debug, error, info, warn};

pub struct Logger;

impl Logger {
    pub fn init() {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("rigging=info"));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }

    pub fn resolve_start(mode: &str, root: &str) {
        info!("🔧 Rigging - Build Plan Resolver");
        info!("═══════════════════════════════════════");
        info!("📁 Root: {}", root);
        info!("🎚️  Mode: {}", mode);
    }

    pub fn metadata_loaded(name: &str, version: &str) {
        debug!("📦 Metadata: {} v{}", name, version);
    }

    pub fn checking_inputs() {
        info!("🔍 Checking required source inputs...");
    }

    pub fn plan_ready(stage_count: usize, source_maps: bool) {
        info!(
            "📋 Plan ready: {} pipeline stages, source maps {}",
            stage_count,
            if source_maps { "on" } else { "off" }
        );
    }

    pub fn plan_written(target: &str) {
        info!("✅ Plan written to {}", target);
    }

    pub fn error(msg: &str) {
        error!("❌ {}", msg);
    }

    pub fn warn(msg: &str) {
        warn!("⚠️  {}", msg);
    }

    pub fn debug(msg: &str) {
        debug!("{}", msg);
    }
}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: &str) -> Self {
        debug!("⏱️  Starting: {}", name);
        Self {
            start: Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        debug!("⏱️  Completed: {} in {:.2?}", self.name, self.elapsed());
    }
}
