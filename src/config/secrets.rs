//! Secret file access.
//!
//! Docker mounts secrets as files under `/run/secrets`. The resolver only
//! needs two capabilities from the filesystem: "does this file exist" and
//! "read it", so they sit behind [`SecretStore`].

use std::io;
use std::path::{Path, PathBuf};

/// Default mount point for Docker secrets.
pub const DEFAULT_SECRETS_DIR: &str = "/run/secrets";

/// Suffix appended to the secret name to form the password file name.
pub const PASSWORD_SUFFIX: &str = "_password";

/// Existence check and read access for secret files.
pub trait SecretStore {
    fn exists(&self, path: &Path) -> bool;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Secrets read from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSecrets;

impl SecretStore for FsSecrets {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

impl<T: SecretStore + ?Sized> SecretStore for &T {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        (**self).read_to_string(path)
    }
}

/// Path of the password secret named `name` inside `dir`.
pub fn password_secret_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}{PASSWORD_SUFFIX}"))
}
