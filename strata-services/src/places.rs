// SPDX-License-Identifier: LGPL-3.0-only
//! Known folders and drive roots.
//!
//! Known folders are read from the XDG `user-dirs.dirs` file in the config
//! home, with the `directories` crate filling in whatever the file does not
//! name. The result is cached until [reload_known_folders] is called.

use directories::UserDirs;
use serde::{Deserialize, Serialize};
use smol::fs;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Mutex;
use xdg::BaseDirectories;

/// Known folders of the current user, filled on first lookup.
static KNOWN_FOLDERS: Mutex<Option<HashMap<KnownFolder, PathBuf>>> = Mutex::new(None);

/// OS-defined special folders resolved by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnownFolder {
    /// The user's home directory.
    Home,
    /// The user's Desktop directory.
    Desktop,
    /// The user's Documents directory.
    Documents,
    /// The user's Downloads directory.
    Downloads,
    /// The user's Music directory.
    Music,
    /// The user's Pictures directory.
    Pictures,
    /// The user's Videos directory.
    Videos,
}

impl KnownFolder {
    /// Every known folder, in sidebar order.
    pub const ALL: [KnownFolder; 7] = [
        KnownFolder::Home,
        KnownFolder::Desktop,
        KnownFolder::Documents,
        KnownFolder::Downloads,
        KnownFolder::Music,
        KnownFolder::Pictures,
        KnownFolder::Videos,
    ];

    /// Lowercase name used on the host bridge.
    pub fn as_str(self) -> &'static str {
        match self {
            KnownFolder::Home => "home",
            KnownFolder::Desktop => "desktop",
            KnownFolder::Documents => "documents",
            KnownFolder::Downloads => "downloads",
            KnownFolder::Music => "music",
            KnownFolder::Pictures => "pictures",
            KnownFolder::Videos => "videos",
        }
    }

    fn xdg_key(self) -> Option<&'static str> {
        match self {
            KnownFolder::Home => None,
            KnownFolder::Desktop => Some("XDG_DESKTOP_DIR"),
            KnownFolder::Documents => Some("XDG_DOCUMENTS_DIR"),
            KnownFolder::Downloads => Some("XDG_DOWNLOAD_DIR"),
            KnownFolder::Music => Some("XDG_MUSIC_DIR"),
            KnownFolder::Pictures => Some("XDG_PICTURES_DIR"),
            KnownFolder::Videos => Some("XDG_VIDEOS_DIR"),
        }
    }
}

impl fmt::Display for KnownFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KnownFolder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KnownFolder::ALL
            .into_iter()
            .find(|folder| folder.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown folder: {}", s))
    }
}

/// Parse the contents of a `user-dirs.dirs` file.
///
/// Lines look like `XDG_DOCUMENTS_DIR="$HOME/Documents"`. Values must be
/// quoted and either absolute or relative to `$HOME`. Later lines override
/// earlier ones; trailing slashes are dropped.
pub fn parse_user_dirs_file(content: &str, home_dir: &Path) -> HashMap<KnownFolder, PathBuf> {
    let mut dirs = HashMap::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let Some(folder) = KnownFolder::ALL
            .into_iter()
            .find(|f| f.xdg_key() == Some(key))
        else {
            continue;
        };

        let Some(value) = value.trim().strip_prefix('"') else {
            continue;
        };
        let value = value.split('"').next().unwrap_or_default();

        let path = if let Some(relative) = value.strip_prefix("$HOME") {
            if !relative.is_empty() && !relative.starts_with('/') {
                continue;
            }
            let relative = relative.trim_matches('/');
            if relative.is_empty() {
                home_dir.to_path_buf()
            } else {
                home_dir.join(relative)
            }
        } else if value.starts_with('/') {
            let trimmed = value.trim_end_matches('/');
            if trimmed.is_empty() {
                PathBuf::from("/")
            } else {
                PathBuf::from(trimmed)
            }
        } else {
            continue;
        };

        dirs.insert(folder, path);
    }

    dirs
}

fn config_home(home_dir: &Path) -> PathBuf {
    match BaseDirectories::new() {
        Ok(xdg_dirs) => xdg_dirs.get_config_home(),
        Err(e) => {
            log::debug!("XDG base directories unavailable: {}", e);
            home_dir.join(".config")
        },
    }
}

/// The current user's home directory.
pub fn home_dir() -> Option<PathBuf> {
    UserDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .or_else(|| std::env::var("HOME").ok().map(PathBuf::from))
}

fn fallback_dir(folder: KnownFolder, user_dirs: &UserDirs) -> Option<PathBuf> {
    let dir = match folder {
        KnownFolder::Home => Some(user_dirs.home_dir()),
        KnownFolder::Desktop => user_dirs.desktop_dir(),
        KnownFolder::Documents => user_dirs.document_dir(),
        KnownFolder::Downloads => user_dirs.download_dir(),
        KnownFolder::Music => user_dirs.audio_dir(),
        KnownFolder::Pictures => user_dirs.picture_dir(),
        KnownFolder::Videos => user_dirs.video_dir(),
    };
    dir.map(Path::to_path_buf)
}

fn cached_known_folders() -> Option<HashMap<KnownFolder, PathBuf>> {
    match KNOWN_FOLDERS.lock() {
        Ok(cache) => cache.clone(),
        Err(e) => e.into_inner().clone(),
    }
}

fn store_known_folders(dirs: Option<HashMap<KnownFolder, PathBuf>>) {
    match KNOWN_FOLDERS.lock() {
        Ok(mut cache) => *cache = dirs,
        Err(e) => {
            log::warn!("Known folder cache was poisoned: {}", e);
            *e.into_inner() = dirs;
        },
    }
}

/// Resolve every known folder for the current user.
///
/// The first call reads `user-dirs.dirs`; later calls return the cached map.
pub async fn load_known_folders() -> HashMap<KnownFolder, PathBuf> {
    if let Some(dirs) = cached_known_folders() {
        return dirs;
    }
    let Some(home) = home_dir() else {
        log::warn!("Could not determine the home directory");
        return HashMap::new();
    };

    let dirs = read_known_folders(&config_home(&home), &home).await;
    store_known_folders(Some(dirs.clone()));
    dirs
}

/// Forget the cached known folders so the next lookup reads
/// `user-dirs.dirs` again.
pub fn reload_known_folders() {
    store_known_folders(None);
}

/// Read `user-dirs.dirs` from `config_home` and complete it with defaults.
async fn read_known_folders(config_home: &Path, home: &Path) -> HashMap<KnownFolder, PathBuf> {
    let mut dirs = match fs::read_to_string(config_home.join("user-dirs.dirs")).await {
        Ok(content) => parse_user_dirs_file(&content, home),
        Err(e) => {
            log::debug!("No readable user-dirs.dirs: {}", e);
            HashMap::new()
        },
    };
    dirs.insert(KnownFolder::Home, home.to_path_buf());
    dirs.entry(KnownFolder::Desktop)
        .or_insert_with(|| home.join("Desktop"));

    if let Some(user_dirs) = UserDirs::new() {
        for folder in KnownFolder::ALL {
            if !dirs.contains_key(&folder) {
                if let Some(path) = fallback_dir(folder, &user_dirs) {
                    dirs.insert(folder, path);
                }
            }
        }
    }

    dirs
}

/// Resolve one known folder for the current user.
pub async fn resolve_known_folder(folder: KnownFolder) -> Option<PathBuf> {
    load_known_folders().await.remove(&folder)
}

/// Root paths of the mounted drives: every existing `X:/` on Windows, `/`
/// elsewhere.
pub fn drives() -> Vec<String> {
    if cfg!(windows) {
        (b'A'..=b'Z')
            .map(|letter| format!("{}:/", letter as char))
            .filter(|root| Path::new(root).exists())
            .collect()
    } else {
        vec![String::from("/")]
    }
}
