//! User settings stored as JSON under the cache directory.

use crate::models::TreeGlyphs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const SETTINGS_DIR: &str = ".wstree";
const SETTINGS_FILE: &str = "setting.json";
const LOG_DIR: &str = "logs";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub tree: TreeSettings,
    #[serde(default)]
    pub theme: ThemeSettings,
    /// JSON seed file; the built-in sample is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_path: Option<PathBuf>,
    /// Log every derived tree level at debug.
    #[serde(default)]
    pub trace_tree: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeSettings {
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_icon: Option<String>,
}

fn default_indent_width() -> usize {
    2
}

impl Default for TreeSettings {
    fn default() -> Self {
        Self {
            indent_width: default_indent_width(),
            workspace_icon: None,
            folder_icon: None,
            document_icon: None,
        }
    }
}

impl TreeSettings {
    pub fn glyphs(&self) -> TreeGlyphs {
        let mut glyphs = TreeGlyphs::default();
        if let Some(icon) = &self.workspace_icon {
            glyphs.workspace = icon.as_str().into();
        }
        if let Some(icon) = &self.folder_icon {
            glyphs.folder = icon.as_str().into();
        }
        if let Some(icon) = &self.document_icon {
            glyphs.document = icon.as_str().into();
        }
        glyphs
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_bg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_fg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muted_fg: Option<String>,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            border: Some("dark_gray".to_string()),
            accent_fg: Some("yellow".to_string()),
            header_fg: Some("cyan".to_string()),
            folder_fg: Some("yellow".to_string()),
            document_fg: Some("white".to_string()),
            active_bg: Some("dark_gray".to_string()),
            active_fg: Some("white".to_string()),
            muted_fg: Some("dark_gray".to_string()),
        }
    }
}

pub fn get_settings_path() -> Option<PathBuf> {
    get_cache_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

pub fn ensure_settings_file() -> std::io::Result<PathBuf> {
    let path = get_settings_path().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine settings directory",
        )
    })?;
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    if !path.exists() {
        let content =
            serde_json::to_string_pretty(&Settings::default()).unwrap_or_else(|_| "{}".to_string());
        std::fs::write(&path, content)?;
    }
    Ok(path)
}

pub fn load_settings() -> Option<Settings> {
    let path = get_settings_path()?;
    let data = std::fs::read_to_string(path).ok()?;
    parse_settings(&data)
}

pub fn parse_settings(data: &str) -> Option<Settings> {
    match serde_json::from_str(data) {
        Ok(settings) => Some(settings),
        Err(err) => {
            tracing::warn!(error = %err, "ignoring unreadable settings");
            None
        }
    }
}

pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    let dir = get_cache_dir()
        .map(|dir| dir.join(SETTINGS_DIR).join(LOG_DIR))
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Cannot determine log directory",
            )
        })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }

    Ok(dir)
}

fn get_cache_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Caches"));
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
            return Some(PathBuf::from(xdg));
        }
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".cache"));
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(local) = std::env::var("LOCALAPPDATA") {
            return Some(PathBuf::from(local));
        }
        return std::env::var("APPDATA").ok().map(PathBuf::from);
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/settings.rs"]
mod tests;
