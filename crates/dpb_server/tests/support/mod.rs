//! Shared integration-test server bootstrap helpers.

use axum_test::TestServer;
use dpb_server::{create_app, AppState, Config};
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

pub(crate) const TEST_MAX_UPLOAD_BYTES: usize = 4096;
pub(crate) const TEST_NOT_FOUND_DELAY: Duration = Duration::from_millis(100);

pub(crate) fn test_config_for_dir(dir: &Path) -> Config {
    let mut config = Config::new(dir);
    config.max_upload_bytes = TEST_MAX_UPLOAD_BYTES;
    config.not_found_delay = TEST_NOT_FOUND_DELAY;
    config
}

pub(crate) fn test_server_for_config(config: Config) -> TestServer {
    let state = AppState::open(config).expect("open store");
    TestServer::new(create_app(state)).expect("server")
}

pub(crate) fn setup_test_server() -> (TestServer, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let server = test_server_for_config(test_config_for_dir(temp_dir.path()));
    (server, temp_dir)
}

pub(crate) fn paste_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}
