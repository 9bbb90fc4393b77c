use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::time::Duration;

use once_cell::sync::Lazy;

use crate::fetch::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, FetchOptions};
use crate::parsing::DEFAULT_TITLE_CLASS;

pub const CURRENT_VERSION: u32 = 1;
const SETTINGS_FILENAME: &str = ".skimmer_settings.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Class attribute value that marks the page title element
    #[serde(default = "default_title_class")]
    pub title_class: String,

    /// Abort instead of showing an empty page when the fetch fails
    #[serde(default)]
    pub fail_fast: bool,
}

fn default_version() -> u32 {
    CURRENT_VERSION
}

fn default_theme() -> String {
    "Oceanic Next".to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

fn default_title_class() -> String {
    DEFAULT_TITLE_CLASS.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            theme: default_theme(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            title_class: default_title_class(),
            fail_fast: false,
        }
    }
}

impl Settings {
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.timeout_secs.max(1)),
        }
    }
}

static SETTINGS: Lazy<RwLock<Settings>> = Lazy::new(|| RwLock::new(Settings::default()));

fn settings_path() -> Option<PathBuf> {
    home::home_dir().map(|home| home.join(SETTINGS_FILENAME))
}

pub fn load_settings() {
    let Some(path) = settings_path() else {
        warn!("Could not determine home directory, using default settings");
        return;
    };

    if let Some(settings) = load_settings_from(&path) {
        if let Ok(mut global) = SETTINGS.write() {
            *global = settings;
        }
    }
}

/// Read settings from `path`, writing defaults there when it does not exist.
/// Returns `None` when the file exists but cannot be used.
pub fn load_settings_from(path: &Path) -> Option<Settings> {
    if !path.exists() {
        info!(
            "Settings file not found at {:?}, creating with defaults",
            path
        );
        let settings = Settings::default();
        save_settings_to_file(&settings, path);
        return Some(settings);
    }

    match fs::read_to_string(path) {
        Ok(content) => match serde_yaml::from_str::<Settings>(&content) {
            Ok(mut settings) => {
                debug!("Loaded settings from {:?}", path);

                if settings.version < CURRENT_VERSION {
                    migrate_settings(&mut settings);
                    save_settings_to_file(&settings, path);
                }
                Some(settings)
            }
            Err(e) => {
                error!("Failed to parse settings file {:?}: {}", path, e);
                None
            }
        },
        Err(e) => {
            error!("Failed to read settings file {:?}: {}", path, e);
            None
        }
    }
}

fn migrate_settings(settings: &mut Settings) {
    info!(
        "Migrating settings from v{} to v{}",
        settings.version, CURRENT_VERSION
    );

    settings.version = CURRENT_VERSION;
}

fn save_settings_to_file(settings: &Settings, path: &Path) {
    let content = generate_settings_yaml(settings);

    match fs::write(path, content) {
        Ok(()) => debug!("Saved settings to {:?}", path),
        Err(e) => error!("Failed to save settings to {:?}: {}", path, e),
    }
}

fn generate_settings_yaml(settings: &Settings) -> String {
    let mut content = String::new();

    content.push_str(&format!("version: {}\n", settings.version));
    content.push_str("# Oceanic Next, Catppuccin Mocha or Kanagawa\n");
    content.push_str(&format!("theme: \"{}\"\n", settings.theme));
    content.push_str(&format!("user_agent: \"{}\"\n", settings.user_agent));
    content.push_str(&format!("timeout_secs: {}\n", settings.timeout_secs));
    content.push_str("# Elements carrying this class provide the page title\n");
    content.push_str(&format!("title_class: \"{}\"\n", settings.title_class));
    content.push_str(&format!("fail_fast: {}\n", settings.fail_fast));

    content
}

// Public API for accessing settings

pub fn current() -> Settings {
    SETTINGS
        .read()
        .map(|s| s.clone())
        .unwrap_or_default()
}

pub fn get_theme_name() -> String {
    SETTINGS
        .read()
        .map(|s| s.theme.clone())
        .unwrap_or_else(|_| default_theme())
}
