//! Test helpers for staging request files.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path, contents).expect("write test file");
}

/// Temporary directory plus the UTF-8 path of `request.json` inside it.
pub(super) fn request_workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    let request_path = root.join("request.json");
    (tmp, request_path)
}

pub(super) fn request_json(addresses: &[&str]) -> Vec<u8> {
    serde_json::to_vec_pretty(&serde_json::json!({ "addresses": addresses }))
        .expect("serialise request")
}
