//! Shared utilities for integration tests.

use std::path::Path;

use tempfile::TempDir;

/// A temporary secrets directory holding `<name>_password` files.
pub fn secrets_dir(secrets: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, contents) in secrets {
        write_secret(dir.path(), name, contents);
    }
    dir
}

pub fn write_secret(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(format!("{name}_password")), contents).unwrap();
}

/// Environment variables read by the resolver; cleared for CLI runs.
#[allow(dead_code)]
pub const RESOLVER_VARS: &[&str] = &[
    "DOMAIN",
    "ADDITIONAL_TRUSTED_HOSTS",
    "DB_NAME",
    "DB_USER",
    "DB_PASSWORD",
    "DB_HOST",
    "DB_PORT",
    "TRUSTED_PROXY_CIDR",
    "SECRETS_DIR",
    "DB_SECRET_NAME",
];
