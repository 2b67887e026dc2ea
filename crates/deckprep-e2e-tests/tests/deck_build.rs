use assert_fs::prelude::*;
use deckprep_e2e_tests::{BANK_IMAGES, PNG_BYTES, init_tracing, mount_image, write_workspace};
use deckprep_lib::cli::{
    BuildParams, Command, FetchParams, ResolvedCommand, resolve_command, run_build, run_fetch,
};
use deckprep_lib::error::DeckPrepError;
use predicates::prelude::*;
use std::path::Path;
use wiremock::MockServer;

fn build_params(config_path: &Path, allow_failed_downloads: bool) -> BuildParams {
    let command = Command::Build {
        config_path: config_path.to_str().unwrap().to_string(),
        output_path: None,
        asset_dir: None,
        force: false,
        allow_failed_downloads,
    };
    match resolve_command(command).expect("Failed to resolve build command") {
        ResolvedCommand::Build(params) => params,
        _ => unreachable!("Resolved command type mismatch"),
    }
}

fn fetch_params(config_path: &Path, force: bool) -> FetchParams {
    let command = Command::Fetch {
        config_path: config_path.to_str().unwrap().to_string(),
        asset_dir: None,
        force,
    };
    match resolve_command(command).expect("Failed to resolve fetch command") {
        ResolvedCommand::Fetch(params) => params,
        _ => unreachable!("Resolved command type mismatch"),
    }
}

#[tokio::test]
async fn test_build_end_to_end() {
    init_tracing();
    let server = MockServer::start().await;
    for image in BANK_IMAGES {
        mount_image(&server, image, 200).await;
    }

    let temp = assert_fs::TempDir::new().unwrap();
    let config_path = write_workspace(temp.path(), &server.uri()).unwrap();

    let summary = run_build(build_params(&config_path, false))
        .await
        .expect("Build should succeed");

    // q1.png is referenced twice but fetched once.
    assert_eq!(summary.downloaded, 2);
    assert_eq!(summary.total(), 2);

    temp.child("practice-test.apkg")
        .assert(predicate::path::is_file());
    temp.child("assets/q1.png")
        .assert(predicate::path::eq_file(write_expected(temp.path()).as_path()));
    temp.child("assets/s1.png").assert(predicate::path::exists());
}

#[tokio::test]
async fn test_second_build_uses_cached_assets() {
    init_tracing();
    let server = MockServer::start().await;
    for image in BANK_IMAGES {
        mount_image(&server, image, 200).await;
    }

    let temp = assert_fs::TempDir::new().unwrap();
    let config_path = write_workspace(temp.path(), &server.uri()).unwrap();

    run_build(build_params(&config_path, false))
        .await
        .expect("First build should succeed");
    let summary = run_build(build_params(&config_path, false))
        .await
        .expect("Second build should succeed");

    assert_eq!(summary.used_cached, 2);
    assert_eq!(summary.downloaded, 0);
}

#[tokio::test]
async fn test_build_aborts_on_failed_download() {
    init_tracing();
    let server = MockServer::start().await;
    mount_image(&server, BANK_IMAGES[0], 200).await;
    mount_image(&server, BANK_IMAGES[1], 404).await;

    let temp = assert_fs::TempDir::new().unwrap();
    let config_path = write_workspace(temp.path(), &server.uri()).unwrap();

    let result = run_build(build_params(&config_path, false)).await;

    match result {
        Err(DeckPrepError::AssetDownload { failed, total }) => {
            assert_eq!(failed, 1);
            assert_eq!(total, 2);
        }
        other => panic!("Expected AssetDownload error, got {:?}", other),
    }
    temp.child("practice-test.apkg")
        .assert(predicate::path::missing());
}

#[tokio::test]
async fn test_build_allows_failed_downloads_when_asked() {
    init_tracing();
    let server = MockServer::start().await;
    mount_image(&server, BANK_IMAGES[0], 200).await;
    mount_image(&server, BANK_IMAGES[1], 500).await;

    let temp = assert_fs::TempDir::new().unwrap();
    let config_path = write_workspace(temp.path(), &server.uri()).unwrap();

    let summary = run_build(build_params(&config_path, true))
        .await
        .expect("Build should succeed despite the failed image");

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.downloaded, 1);
    temp.child("practice-test.apkg")
        .assert(predicate::path::is_file());
    temp.child("assets/s1.png").assert(predicate::path::missing());
}

#[tokio::test]
async fn test_fetch_downloads_images_only() {
    init_tracing();
    let server = MockServer::start().await;
    for image in BANK_IMAGES {
        mount_image(&server, image, 200).await;
    }

    let temp = assert_fs::TempDir::new().unwrap();
    let config_path = write_workspace(temp.path(), &server.uri()).unwrap();

    let summary = run_fetch(fetch_params(&config_path, false))
        .await
        .expect("Fetch should succeed");
    assert_eq!(summary.downloaded, 2);

    let summary = run_fetch(fetch_params(&config_path, true))
        .await
        .expect("Forced fetch should succeed");
    assert_eq!(summary.downloaded, 2);
    assert_eq!(summary.used_cached, 0);

    temp.child("assets/q1.png").assert(predicate::path::exists());
    temp.child("practice-test.apkg")
        .assert(predicate::path::missing());
}

#[test]
fn test_resolve_rejects_config_without_decks() {
    let temp = assert_fs::TempDir::new().unwrap();
    let config = temp.child("config.yaml");
    config
        .write_str(
            r#"base_url: https://example.com/
asset_dir: ./assets
output:
  path: out.apkg
model:
  id: 1
  name: Model
  template_name: Card
  templates:
    front: front.html
    back: back.html
    styles: styles.css
decks: []
"#,
        )
        .unwrap();

    let result = resolve_command(Command::Fetch {
        config_path: config.path().to_str().unwrap().to_string(),
        asset_dir: None,
        force: false,
    });

    assert!(matches!(
        result,
        Err(DeckPrepError::CliArgumentValidation { .. })
    ));
}

fn write_expected(root: &Path) -> std::path::PathBuf {
    let expected = root.join("expected.png");
    std::fs::write(&expected, PNG_BYTES).unwrap();
    expected
}
