// SPDX-License-Identifier: LGPL-3.0-only
use anyhow::Result;
use serde::Deserialize;
use smol::fs;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use xdg::BaseDirectories;

use crate::navigation::DEFAULT_MAX_HISTORY;
use crate::search::DEFAULT_CACHE_CAPACITY;
use strata_core::tasks::DEFAULT_QUIET_PERIOD;

/// XDG prefix of the configuration directories.
pub const CONFIG_PREFIX: &str = "strata";

/// Name of the configuration file.
pub const CONFIG_FILE: &str = "explorer.toml";

/// One configuration file as written on disk. Every field is optional so
/// files can be layered.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// History settings
    #[serde(default)]
    pub navigation: NavigationSettings,
    /// Search settings
    #[serde(default)]
    pub search: SearchSettings,
    /// Directory listing settings
    #[serde(default)]
    pub listing: ListingSettings,
    /// Keyboard settings
    #[serde(default)]
    pub keyboard: KeyboardSettings,
    /// Any other sections are captured here
    #[serde(flatten)]
    pub other: HashMap<String, toml::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NavigationSettings {
    pub max_history: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchSettings {
    pub debounce_ms: Option<u64>,
    pub cache_capacity: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingSettings {
    pub show_hidden: Option<bool>,
    pub max_items: Option<usize>,
    pub folders_first: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeyboardSettings {
    pub enabled: Option<bool>,
}

/// Effective explorer configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerConfig {
    /// Maximum back/forward history length.
    pub max_history: usize,
    /// Quiet period of live search.
    pub search_debounce: Duration,
    /// Number of cached search result sets.
    pub search_cache_capacity: usize,
    /// Include hidden entries in listings.
    pub show_hidden: bool,
    /// Maximum number of entries per listing.
    pub max_items: Option<usize>,
    /// List directories before files.
    pub folders_first: bool,
    /// Whether keyboard shortcuts are dispatched.
    pub keyboard_enabled: bool,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            max_history: DEFAULT_MAX_HISTORY,
            search_debounce: DEFAULT_QUIET_PERIOD,
            search_cache_capacity: DEFAULT_CACHE_CAPACITY,
            show_hidden: false,
            max_items: None,
            folders_first: true,
            keyboard_enabled: true,
        }
    }
}

impl ExplorerConfig {
    /// Defaults merged with the configuration files in standard locations.
    pub async fn load() -> Result<Self> {
        let mut config = Self::default();
        let xdg_dirs = BaseDirectories::with_prefix(CONFIG_PREFIX)?;
        config.load_standard_locations(&xdg_dirs).await;
        Ok(config)
    }

    /// Load configuration from standard locations in precedence order.
    ///
    /// Order (later overrides earlier):
    /// 1. System Data: /usr/share/strata/explorer.toml (and XDG_DATA_DIRS)
    /// 2. System Config: /etc/xdg/strata/explorer.toml (and XDG_CONFIG_DIRS)
    /// 3. User Config: ~/.config/strata/explorer.toml (XDG_CONFIG_HOME)
    async fn load_standard_locations(&mut self, xdg_dirs: &BaseDirectories) {
        for path in xdg_dirs.find_data_files(CONFIG_FILE).rev() {
            self.load_file(&path).await;
        }

        for path in xdg_dirs.find_config_files(CONFIG_FILE).rev() {
            self.load_file(&path).await;
        }

        let user_config_path = xdg_dirs.get_config_home().join(CONFIG_FILE);
        if user_config_path.exists() {
            self.load_file(&user_config_path).await;
        }
    }

    /// Merge the given files in order, later overriding earlier. Missing or
    /// malformed files are skipped and reported in the returned list.
    pub async fn load_from_paths(&mut self, paths: &[PathBuf]) -> Vec<Result<()>> {
        let mut results = Vec::with_capacity(paths.len());
        for path in paths {
            results.push(self.try_load_file(path).await);
        }
        results
    }

    async fn try_load_file(&mut self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path).await?;
        let file = Self::parse(&content)?;
        self.merge(file);
        Ok(())
    }

    async fn load_file(&mut self, path: &Path) {
        log::info!("Loading config from: {:?}", path);
        match fs::read_to_string(path).await {
            Ok(content) => match Self::parse(&content) {
                Ok(file) => self.merge(file),
                Err(e) => {
                    log::error!("Failed to parse config file {:?}: {}", path, e);
                },
            },
            Err(e) => {
                log::warn!("Failed to read config file {:?}: {}", path, e);
            },
        }
    }

    /// Parse one configuration file.
    pub fn parse(content: &str) -> Result<ConfigFile> {
        Ok(toml::from_str(content)?)
    }

    /// Merge a loaded file into this configuration. Only fields present in
    /// the file change.
    pub fn merge(&mut self, other: ConfigFile) {
        // Navigation
        if let Some(max_history) = other.navigation.max_history {
            self.max_history = max_history.max(1);
        }

        // Search
        if let Some(ms) = other.search.debounce_ms {
            self.search_debounce = Duration::from_millis(ms);
        }
        if let Some(capacity) = other.search.cache_capacity {
            self.search_cache_capacity = capacity;
        }

        // Listing
        if let Some(show_hidden) = other.listing.show_hidden {
            self.show_hidden = show_hidden;
        }
        if other.listing.max_items.is_some() {
            self.max_items = other.listing.max_items;
        }
        if let Some(folders_first) = other.listing.folders_first {
            self.folders_first = folders_first;
        }

        // Keyboard
        if let Some(enabled) = other.keyboard.enabled {
            self.keyboard_enabled = enabled;
        }

        for section in other.other.keys() {
            log::debug!("Ignoring unknown config section [{}]", section);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_merge_fields() {
        let mut config = ExplorerConfig::default();
        let file = ExplorerConfig::parse(
            r#"
[navigation]
max_history = 10

[search]
debounce_ms = 120

[listing]
show_hidden = true

[theme]
name = "dark"
"#,
        )
        .unwrap();
        assert!(file.other.contains_key("theme"));
        config.merge(file);

        assert_eq!(config.max_history, 10);
        assert_eq!(config.search_debounce, Duration::from_millis(120));
        assert!(config.show_hidden);
        assert_eq!(config.search_cache_capacity, DEFAULT_CACHE_CAPACITY);
        assert!(config.folders_first);
        assert!(config.keyboard_enabled);
    }

    #[test]
    fn test_later_files_override_earlier() {
        let dir = tempfile::tempdir().unwrap();
        let system = dir.path().join("system.toml");
        let user = dir.path().join("user.toml");
        std::fs::write(&system, "[keyboard]\nenabled = false\n[listing]\nmax_items = 100\n").unwrap();
        std::fs::write(&user, "[listing]\nmax_items = 5\n").unwrap();

        let mut config = ExplorerConfig::default();
        let results = smol::block_on(config.load_from_paths(&[
            system,
            dir.path().join("missing.toml"),
            user,
        ]));

        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
        assert!(!config.keyboard_enabled);
        assert_eq!(config.max_items, Some(5));
    }

    #[test]
    fn test_malformed_file_is_rejected() {
        assert!(ExplorerConfig::parse("[navigation]\nmax_history = \"many\"").is_err());
    }
}
