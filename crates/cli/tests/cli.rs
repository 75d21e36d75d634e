//! End-to-end tests driving the CLI library against a service on disk

#![allow(clippy::unwrap_used)]

use packwise::cmd::run::{dispatch, fire};
use packwise::{dry_run, load_service, parse_options};
use packwise_engine::HookOutcome;
use packwise_engine::hooks::events;
use serde_json::Value;
use std::fs;

const SERVICE: &str = r#"
service = "orders"

[provider]
name = "aws"
runtime = "nodejs18.x"

[functions.hello]
handler = "src/handler.hello"

[custom]
warmup = { enabled = true }
"#;

fn service_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("serverless.toml"), SERVICE).unwrap();
    dir
}

#[tokio::test]
async fn test_watch_command_through_lifecycle() {
    let dir = service_dir();
    let service = load_service(Some(dir.path().join("serverless.toml").as_path())).unwrap();
    assert!(service.function("hello").is_some());

    let options = parse_options(&["function=hello", "path=events/hello.json"]).unwrap();
    let report = dispatch(service, &["webpack", "watch"], options)
        .await
        .unwrap();

    let outcomes: Vec<(&str, HookOutcome)> = report
        .fired
        .iter()
        .map(|event| (event.name.as_str(), event.outcome))
        .collect();
    assert_eq!(
        outcomes,
        vec![
            ("before:webpack:watch:watch", HookOutcome::Unhandled),
            (events::WEBPACK_WATCH, HookOutcome::Completed { steps: 3 }),
            ("after:webpack:watch:watch", HookOutcome::Unhandled),
        ]
    );
    assert_eq!(
        report.operations(),
        vec!["validate", "makePathOptionAbsolute", "watch"]
    );

    let expected = std::path::absolute(dir.path().join("events/hello.json")).unwrap();
    assert_eq!(
        report.state.attachment(dry_run::ABSOLUTE_PATH_KEY),
        Some(&Value::from(expected.display().to_string()))
    );
}

#[tokio::test]
async fn test_deploy_artifacts_then_cleanup() {
    let dir = service_dir();
    let service = load_service(Some(dir.path().join("serverless.toml").as_path())).unwrap();

    let before = fire(
        service.clone(),
        events::BEFORE_DEPLOY_ARTIFACTS,
        Default::default(),
    )
    .await
    .unwrap();
    assert_eq!(
        before.operations(),
        vec!["validate", "compile", "packExternalModules"]
    );
    assert_eq!(
        before.state.output_path,
        Some(dir.path().join(dry_run::DEFAULT_OUTPUT_DIR))
    );

    // Each CLI invocation builds its own plugin, so cleanup starts fresh
    let after = fire(service, events::AFTER_DEPLOY_ARTIFACTS, Default::default())
        .await
        .unwrap();
    assert_eq!(after.operations(), vec!["cleanup"]);
    assert!(after.state.output_path.is_none());
}

#[tokio::test]
async fn test_unknown_command() {
    let dir = service_dir();
    let service = load_service(Some(dir.path().join("serverless.toml").as_path())).unwrap();

    let err = dispatch(service, &["webpack", "deploy"], Default::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast::<packwise_core::Error>().unwrap(),
        packwise_core::Error::UnknownCommand(ref path) if path == "webpack deploy"
    ));
}
