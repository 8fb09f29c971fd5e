use crate::events::AppEvent;
use crate::widget::color::Color;
use crate::widget::{
    DEFAULT_ANIM_DURATION, DEFAULT_BORDER_COLOR, DEFAULT_CHECK_COLOR, DEFAULT_INNER_COLOR,
    DEFAULT_TICK_COLOR,
};
use async_channel::Sender;
use directories::ProjectDirs;
use notify::event::ModifyKind;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Colors and timing of a checkbox.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Style {
    pub tick_color: Color,
    pub inner_color: Color,
    pub border_color: Color,
    pub check_color: Color,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub anim_duration: Duration,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            tick_color: Color::from_argb(DEFAULT_TICK_COLOR),
            inner_color: Color::from_argb(DEFAULT_INNER_COLOR),
            border_color: Color::from_argb(DEFAULT_BORDER_COLOR),
            check_color: Color::from_argb(DEFAULT_CHECK_COLOR),
            anim_duration: DEFAULT_ANIM_DURATION,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "tickbox", "tickbox").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("TICKBOX").try_parsing(true)
}

pub fn load_config() -> Result<Style, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(environment())
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Parses a style from TOML text; missing keys keep their defaults.
pub fn parse_config(toml: &str) -> Result<Style, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Style {
    match load_config() {
        Ok(style) => style,
        Err(e) => {
            log::warn!("Falling back to default style: {}", e);
            Style::default()
        }
    }
}

/// Writes the bundled default file unless a config already exists.
pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    let path = get_config_path()?;
    if path.exists() {
        log::info!("Keeping existing config at {}", path.display());
        return Ok(path);
    }
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    fs_err::write(&path, DEFAULT_CONFIG)?;
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Whether a watcher event changed the style file's contents.
///
/// Removals are skipped: editors that save by rename remove the file right
/// before the new one appears, and reloading in between would flash the
/// default style.
pub fn is_style_change(event: &notify::Event, config_path: &Path) -> bool {
    let rewrites_file = matches!(
        event.kind,
        EventKind::Create(_)
            | EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Name(_) | ModifyKind::Any)
    );
    rewrites_file && event.paths.iter().any(|p| p == config_path)
}

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    if let Err(e) = watch_style(tx).await {
        log::error!("Config watcher stopped: {}", e);
    }
}

async fn watch_style(tx: Sender<AppEvent>) -> Result<(), ConfigError> {
    let config_path = get_config_path()?;
    let config_dir = config_path.parent().ok_or(ConfigError::ConfigDirNotFound)?;
    fs_err::create_dir_all(config_dir)?;

    let (bridge_tx, bridge_rx) = async_channel::unbounded();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    // the file itself may not exist yet
    watcher.watch(config_dir, RecursiveMode::NonRecursive)?;
    log::debug!("Watching {} for style changes", config_path.display());

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) if is_style_change(&event, &config_path) => {
                if tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::error!("Watch error: {}", ConfigError::from(e)),
        }
    }
    Ok(())
}
