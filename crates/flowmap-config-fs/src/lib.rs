// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Filesystem-backed `ConfigStore` for flowmap tools (uses platform config dir).

use directories::ProjectDirs;
use flowmap_app_core::config::{ConfigError, ConfigStore};
use std::fs;
use std::path::{Path, PathBuf};

/// Store configs as JSON files under a base directory.
#[derive(Debug, Clone)]
pub struct FsConfigStore {
    base: PathBuf,
}

impl FsConfigStore {
    /// Create a store rooted at the user config directory (e.g., `~/.config/flowmap`).
    pub fn new() -> Result<Self, ConfigError> {
        let proj = ProjectDirs::from("dev", "flyingrobots", "Flowmap")
            .ok_or_else(|| ConfigError::Other("could not resolve config dir".into()))?;
        Self::at(proj.config_dir())
    }

    /// Create a store rooted at `base`, creating the directory if needed.
    pub fn at(base: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let base = base.as_ref().to_path_buf();
        fs::create_dir_all(&base)?;
        Ok(Self { base })
    }

    /// Directory the files live in.
    pub fn base(&self) -> &Path {
        &self.base
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base.join(format!("{key}.json"))
    }
}

impl ConfigStore for FsConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(ConfigError::NotFound),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    use super::*;
    use flowmap_app_core::config::ConfigService;
    use flowmap_app_core::config_port::ConfigPort;
    use flowmap_app_core::prefs::FlowmapPrefs;

    #[test]
    fn missing_key_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsConfigStore::at(dir.path()).unwrap();
        assert!(matches!(store.load_raw("prefs"), Err(ConfigError::NotFound)));
    }

    #[test]
    fn creates_nested_base_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let store = FsConfigStore::at(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(store.base(), nested.as_path());
    }

    #[test]
    fn prefs_persist_as_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let svc = ConfigService::new(FsConfigStore::at(dir.path()).unwrap());
        let mut prefs = FlowmapPrefs::default();
        prefs.defaults.system_name = "Engineering Enclave".into();
        prefs.view.show_grid = false;
        svc.save_prefs(&prefs);

        let text = fs::read_to_string(dir.path().join("prefs.json")).unwrap();
        assert!(text.contains("\"systemName\": \"Engineering Enclave\""));

        let reopened = ConfigService::new(FsConfigStore::at(dir.path()).unwrap());
        assert_eq!(reopened.load_prefs(), Some(prefs));
    }
}
