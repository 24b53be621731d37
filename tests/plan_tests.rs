use rigging::core::pipeline::{PipelineStage, StageKind};
use rigging::core::routes::{FileCategory, RouteAction, StyleDelivery};
use rigging::{BuildEnvironment, BuildPlan, PackageMetadata};

fn metadata() -> PackageMetadata {
    PackageMetadata {
        name: "corp-site".to_string(),
        version: "2.0.1".to_string(),
        description: "Corporate site front end".to_string(),
        author: "Web Team".to_string(),
        license: "UNLICENSED".to_string(),
    }
}

#[test]
fn production_plan_shape() {
    let plan = BuildPlan::resolve(BuildEnvironment::Production, metadata());

    assert!(plan.validate().is_ok());
    assert!(!plan.source_maps);

    // Fixed entry/output declaration
    assert_eq!(plan.entry_output.context, "src");
    assert_eq!(plan.entry_output.entry, "./index.js");
    assert_eq!(plan.entry_output.outdir, "dist");
    assert_eq!(plan.entry_output.script_bundle, "js/bundle.js");
    assert_eq!(plan.entry_output.style_bundle, "css/bundle.css");

    // Production pipeline: no proxy, HTML minified
    assert!(plan.pipeline.stage(StageKind::DevProxy).is_none());
    match plan.pipeline.stage(StageKind::RenderHtml) {
        Some(PipelineStage::RenderHtml { minify, .. }) => assert!(minify.is_some()),
        _ => panic!("expected render-html stage"),
    }
}

#[test]
fn development_plan_shape() {
    let plan = BuildPlan::resolve(BuildEnvironment::Development, metadata());

    assert!(plan.validate().is_ok());
    assert!(plan.source_maps);
    assert_eq!(plan.routes.style.delivery, StyleDelivery::Inline);

    match plan.pipeline.stage(StageKind::MinifyScripts) {
        Some(PipelineStage::MinifyScripts { source_maps }) => assert!(*source_maps),
        _ => panic!("expected minify-scripts stage"),
    }

    match plan.pipeline.stage(StageKind::ExtractStyles) {
        Some(PipelineStage::ExtractStyles { disabled, .. }) => assert!(*disabled),
        _ => panic!("expected extract-styles stage"),
    }

    match plan.pipeline.stage(StageKind::DevProxy) {
        Some(PipelineStage::DevProxy(proxy)) => {
            assert_eq!((proxy.host.as_str(), proxy.port), ("localhost", 8088));
            assert_eq!(proxy.upstream, "http://localhost:8080/");
            assert!(!proxy.reload);
        }
        _ => panic!("expected dev-proxy stage"),
    }
}

#[test]
fn unknown_mode_is_production_equivalent() {
    let plan = BuildPlan::resolve(BuildEnvironment::from_flag(Some("staging")), metadata());
    assert_eq!(plan.environment, BuildEnvironment::Production);
    assert!(!plan.source_maps);
}

#[test]
fn resolution_is_idempotent() {
    let first = BuildPlan::resolve(BuildEnvironment::Development, metadata());
    let second = BuildPlan::resolve(BuildEnvironment::Development, metadata());

    assert_eq!(first, second);
    assert_eq!(
        first.to_json(true).unwrap(),
        second.to_json(true).unwrap()
    );
}

#[test]
fn serialized_plan_round_trips() {
    let plan = BuildPlan::resolve(BuildEnvironment::Development, metadata());
    let restored = BuildPlan::from_json(&plan.to_json(false).unwrap()).unwrap();
    assert_eq!(plan, restored);
}

#[test]
fn banner_renders_current_metadata_verbatim() {
    let plan = BuildPlan::resolve(BuildEnvironment::Production, metadata());
    match plan.pipeline.stage(StageKind::Banner) {
        Some(PipelineStage::Banner { text, entry_only }) => {
            assert!(*entry_only);
            assert!(text.contains("Package: corp-site - v2.0.1"));
            assert!(text.contains("Description: Corporate site front end"));
            assert!(text.contains("@author Web Team"));
            assert!(text.contains("@license UNLICENSED"));
        }
        _ => panic!("expected banner stage"),
    }
}

#[test]
fn example_source_tree_routes() {
    let plan = BuildPlan::resolve(BuildEnvironment::Production, metadata());

    // index.js goes through the script pipeline, never the copy stage
    let script = plan.routes.route("index.js");
    assert_eq!(script.category, FileCategory::Script);
    assert!(matches!(script.action, RouteAction::Transpile { .. }));

    // style.scss goes through the stylesheet chain
    let style = plan.routes.route("style.scss");
    assert_eq!(style.category, FileCategory::Stylesheet);

    // logo.png is inline-encoded
    let logo = plan.routes.route("logo.png");
    assert_eq!(logo.action, RouteAction::InlineAlways);

    // data.json is copied unmodified
    let data = plan.routes.route("data.json");
    assert_eq!(data.action, RouteAction::CopyVerbatim);

    // index.html is the template's concern, not a transform rule
    let markup = plan.routes.route("index.html");
    assert_eq!(markup.category, FileCategory::Verbatim);
}

#[test]
fn every_supported_extension_routes_to_one_category() {
    let plan = BuildPlan::resolve(BuildEnvironment::Production, metadata());
    let cases = [
        ("app.js", FileCategory::Script),
        ("app.scss", FileCategory::Stylesheet),
        ("app.sass", FileCategory::Stylesheet),
        ("a.png", FileCategory::RasterImage),
        ("a.jpg", FileCategory::RasterImage),
        ("a.jpeg", FileCategory::RasterImage),
        ("a.gif", FileCategory::RasterImage),
        ("f.woff", FileCategory::WebFont),
        ("f.woff2", FileCategory::WebFont),
        ("f.ttf?v=1.0.0", FileCategory::WebFont),
        ("f.eot?v=1.0.0", FileCategory::WebFont),
        ("f.svg?v=1.0.0", FileCategory::WebFont),
        ("f.ttf", FileCategory::StaticAsset),
        ("f.eot", FileCategory::StaticAsset),
        ("f.svg", FileCategory::StaticAsset),
        ("notes.txt", FileCategory::Verbatim),
    ];

    for (request, expected) in cases {
        assert_eq!(plan.routes.route(request).category, expected, "{}", request);
    }
}
