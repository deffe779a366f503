//! Handler functions for config CLI commands.
//!
//! Implements `docket config {path,get,set,init,export}` subcommands
//! and TOML dotted-key helper functions.
//!
//! `set` only accepts the keys [`DocketConfig`] defines. Each key has a
//! [`Setting`] kind that decides how the raw string is parsed and checked,
//! so a bad section name or route is refused before the file is written.

use crate::cli::ConfigAction;
use crate::config::DocketConfig;
use docket_core::{Error, Result};
use std::path::PathBuf;

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a config subcommand.
///
/// Receives the raw `--config` path (not a loaded config) because some
/// commands (path, init) work before a config file exists.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Get { key } => cmd_config_get(config_path, &key),
        ConfigAction::Set { key, value } => cmd_config_set(config_path, &key, &value),
        ConfigAction::Init { file, force } => cmd_config_init(file.as_deref(), force),
        ConfigAction::Export { docker_env } => {
            let config = DocketConfig::load(config_path)?;
            cmd_config_export(&config, docker_env)
        }
    }
}

// ============================================================================
// Command handlers
// ============================================================================

fn cmd_config_path(config_path: Option<&str>) -> Result<()> {
    match DocketConfig::resolve_config_path(config_path) {
        Some(path) => {
            println!("{}", path.display());
            if !path.exists() {
                eprintln!("(file does not exist, run `docket config init` to create it)");
            }
            Ok(())
        }
        None => Err(Error::config(
            "Could not determine config directory for this platform",
        )),
    }
}

fn cmd_config_get(config_path: Option<&str>, key: &str) -> Result<()> {
    let config = DocketConfig::load(config_path)?;
    println!("{}", config_value(&config, key)?);
    Ok(())
}

/// Look up a dotted key in the loaded config and format it for display.
fn config_value(config: &DocketConfig, key: &str) -> Result<String> {
    let value = toml::Value::try_from(config).map_err(|e| Error::config(e.to_string()))?;
    get_nested_value(&value, key)
        .map(format_toml_value)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))
}

fn cmd_config_set(config_path: Option<&str>, key: &str, value: &str) -> Result<()> {
    let path = DocketConfig::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory"))?;

    if !path.exists() {
        return Err(Error::config(format!(
            "Config file does not exist at {}. Run `docket config init` first.",
            path.display()
        )));
    }

    let parsed = parse_setting(key, value)?;

    let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
    let mut doc: toml::Value = toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;

    set_nested_value(&mut doc, key, parsed)?;

    let toml_str = toml::to_string_pretty(&doc).map_err(|e| Error::config(e.to_string()))?;
    toml::from_str::<DocketConfig>(&toml_str)
        .map_err(|e| Error::config(format!("{} would no longer load: {e}", path.display())))?;
    std::fs::write(&path, toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    println!("Set {key} = {value} in {}", path.display());
    Ok(())
}

fn cmd_config_init(file: Option<&str>, force: bool) -> Result<()> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => DocketConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = DocketConfig::default().to_toml_string()?;
    std::fs::write(&path, &toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    println!("Config file created at {}", path.display());
    Ok(())
}

fn cmd_config_export(config: &DocketConfig, docker_env: bool) -> Result<()> {
    for (key, value) in config.to_env_vars()? {
        if docker_env {
            println!("--env {key}={value}");
        } else {
            println!("{key}={value}");
        }
    }
    Ok(())
}

// ============================================================================
// TOML dotted-key helpers
// ============================================================================

fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Set a value at a dotted key path, creating intermediate tables as needed.
fn set_nested_value(root: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let (parents, leaf) = match key.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, key),
    };
    if leaf.is_empty() {
        return Err(Error::config("Empty key path"));
    }

    let mut current = root;
    for part in parents.into_iter().flat_map(|p| p.split('.')) {
        let table = current
            .as_table_mut()
            .ok_or_else(|| Error::config("Cannot navigate into a non-table value"))?;
        current = table
            .entry(part.to_string())
            .or_insert(toml::Value::Table(toml::map::Map::new()));
    }

    current
        .as_table_mut()
        .ok_or_else(|| Error::config("Cannot set key on a non-table value"))?
        .insert(leaf.to_string(), value);
    Ok(())
}

// ============================================================================
// Settable keys
// ============================================================================

/// How the raw value of a settable key is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Setting {
    /// Free text.
    Text,
    /// Filesystem path; `~` is expanded at load time.
    Path,
    /// Absolute route such as `/not-found`.
    Route,
    /// Empty, or a route prefix such as `/docs`.
    Prefix,
    /// Comma-separated top-level directory names.
    Sections,
    /// Positive pixel count.
    Pixels,
}

const SETTINGS: &[(&str, Setting)] = &[
    ("project_name", Setting::Text),
    ("base_path", Setting::Path),
    ("content.path", Setting::Path),
    ("content.published_sections", Setting::Sections),
    ("content.pathname_prefix", Setting::Prefix),
    ("content.edit_link_base", Setting::Text),
    ("content.not_found_path", Setting::Route),
    ("site.base_path", Setting::Prefix),
    ("site.brand", Setting::Text),
    ("site.image_service", Setting::Text),
    ("site.image_site", Setting::Text),
    ("site.image_width", Setting::Pixels),
    ("site.image_height", Setting::Pixels),
];

fn setting_for(key: &str) -> Result<Setting> {
    SETTINGS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, setting)| *setting)
        .ok_or_else(|| {
            let known: Vec<&str> = SETTINGS.iter().map(|(name, _)| *name).collect();
            Error::config(format!(
                "Unknown config key '{key}'. Known keys: {}",
                known.join(", ")
            ))
        })
}

/// Parse `raw` into the TOML value stored under `key`.
fn parse_setting(key: &str, raw: &str) -> Result<toml::Value> {
    let invalid = |why: &str| Error::config(format!("Invalid value for {key}: {why}"));

    match setting_for(key)? {
        Setting::Text | Setting::Path => Ok(toml::Value::String(raw.to_string())),
        Setting::Route if raw.starts_with('/') => Ok(toml::Value::String(raw.to_string())),
        Setting::Route => Err(invalid("must start with '/'")),
        Setting::Prefix if raw.is_empty() || raw.starts_with('/') => {
            Ok(toml::Value::String(raw.to_string()))
        }
        Setting::Prefix => Err(invalid("must be empty or start with '/'")),
        Setting::Sections => {
            let sections: Vec<&str> = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            if sections.is_empty() {
                return Err(invalid("at least one section is required"));
            }
            if let Some(bad) = sections.iter().find(|s| !is_section_name(s)) {
                return Err(invalid(&format!("'{bad}' is not a top-level directory name")));
            }
            Ok(toml::Value::Array(
                sections
                    .into_iter()
                    .map(|s| toml::Value::String(s.to_string()))
                    .collect(),
            ))
        }
        Setting::Pixels => raw
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .map(|n| toml::Value::Integer(i64::from(n)))
            .ok_or_else(|| invalid("expected a positive pixel count")),
    }
}

/// A single directory directly under the guides root.
fn is_section_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(items) => items
            .iter()
            .map(format_toml_value)
            .collect::<Vec<_>>()
            .join(", "),
        toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
