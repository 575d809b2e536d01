//! Application configuration: optional TOML file merged with CLI overrides.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use pdfgrab_core::download::{
    CONNECT_TIMEOUT_SECS, ClientSettings, MAX_TIMEOUT_SECS, READ_TIMEOUT_SECS,
};
use pdfgrab_core::user_agent::resolve_user_agent;
use pdfgrab_core::{DEFAULT_OUTPUT_DIR, RunRequest};

use crate::cli::Args;

/// TOML-backed file configuration for pdfgrab defaults.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Default destination folder.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// Default keyword patterns, used when none are given on the command line.
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    /// User-Agent override.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Connect timeout in seconds.
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    /// Overall per-request timeout in seconds.
    #[serde(default)]
    pub read_timeout_secs: Option<u64>,
    /// Default verbosity mode.
    #[serde(default)]
    pub verbosity: Option<VerbositySetting>,
}

impl FileConfig {
    /// Validates config values against the same constraints as the CLI.
    pub fn validate(&self) -> Result<()> {
        validate_timeout_secs("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout_secs("read_timeout_secs", self.read_timeout_secs)?;
        Ok(())
    }
}

fn validate_timeout_secs(field: &str, value: Option<u64>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(1..=MAX_TIMEOUT_SECS).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 1..={MAX_TIMEOUT_SECS}");
    }
    Ok(())
}

/// Supported config verbosity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerbositySetting {
    Default,
    Verbose,
    Quiet,
    Debug,
}

impl VerbositySetting {
    /// Default tracing filter directive for this setting.
    #[must_use]
    pub fn filter_directive(self) -> &'static str {
        match self {
            Self::Default => "info",
            Self::Verbose => "debug",
            Self::Quiet => "error",
            Self::Debug => "trace",
        }
    }
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/pdfgrab/config.toml`
/// 2. `$HOME/.config/pdfgrab/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("pdfgrab")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("pdfgrab")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads the config file.
///
/// An explicit path must exist. The default path is optional: when it is
/// missing, defaults are returned.
pub fn load_file_config(explicit: Option<&Path>) -> Result<FileConfig> {
    if let Some(path) = explicit {
        return load_from_path(path);
    }
    match resolve_default_config_path() {
        Some(path) if path.exists() => load_from_path(&path),
        _ => Ok(FileConfig::default()),
    }
}

fn load_from_path(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let cfg: FileConfig = toml::from_str(raw)?;
    cfg.validate()?;
    Ok(cfg)
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub request: RunRequest,
    pub client: ClientSettings,
    pub verbosity: Option<VerbositySetting>,
}

/// Merges CLI arguments over file config over built-in defaults.
///
/// Keywords given on the command line replace the config list entirely.
#[must_use]
pub fn merge(args: &Args, file: FileConfig) -> Settings {
    let keywords = if args.keywords.is_empty() {
        file.keywords.unwrap_or_default()
    } else {
        args.keywords.clone()
    };
    let output_dir = args
        .output_dir
        .clone()
        .or(file.output_dir)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    let user_agent = resolve_user_agent(args.user_agent.as_deref().or(file.user_agent.as_deref()));
    let client = ClientSettings {
        user_agent,
        connect_timeout_secs: args
            .connect_timeout
            .or(file.connect_timeout_secs)
            .unwrap_or(CONNECT_TIMEOUT_SECS),
        read_timeout_secs: args
            .read_timeout
            .or(file.read_timeout_secs)
            .unwrap_or(READ_TIMEOUT_SECS),
    };

    Settings {
        request: RunRequest::new(args.url.clone())
            .with_keywords(keywords)
            .with_output_dir(output_dir),
        client,
        verbosity: file.verbosity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pdfgrab_core::DEFAULT_BROWSER_USER_AGENT;
    use tempfile::TempDir;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["pdfgrab", "https://example.com/course/"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_parse_config_all_fields() {
        let cfg = parse_config_str(
            r#"
            output_dir = "/tmp/pdfs"
            keywords = ["hw", 'n\d+', "dis"]
            user_agent = "custom/2.0"
            connect_timeout_secs = 10
            read_timeout_secs = 120
            verbosity = "quiet"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.output_dir, Some(PathBuf::from("/tmp/pdfs")));
        assert_eq!(
            cfg.keywords,
            Some(vec!["hw".to_string(), r"n\d+".to_string(), "dis".to_string()])
        );
        assert_eq!(cfg.user_agent.as_deref(), Some("custom/2.0"));
        assert_eq!(cfg.connect_timeout_secs, Some(10));
        assert_eq!(cfg.read_timeout_secs, Some(120));
        assert_eq!(cfg.verbosity, Some(VerbositySetting::Quiet));
    }

    #[test]
    fn test_parse_config_empty_is_default() {
        assert_eq!(parse_config_str("").unwrap(), FileConfig::default());
    }

    #[test]
    fn test_parse_config_rejects_unknown_key() {
        let err = parse_config_str("concurrency = 4").unwrap_err();
        assert!(err.to_string().contains("concurrency"), "Got: {err}");
    }

    #[test]
    fn test_parse_config_rejects_out_of_range_timeout() {
        let err = parse_config_str("read_timeout_secs = 0").unwrap_err();
        assert!(err.to_string().contains("read_timeout_secs"), "Got: {err}");
    }

    #[test]
    fn test_parse_config_rejects_unknown_verbosity() {
        assert!(parse_config_str(r#"verbosity = "loud""#).is_err());
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");
        let err = load_file_config(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_explicit_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "keywords = [\"report\"]\n").unwrap();
        let cfg = load_file_config(Some(&path)).unwrap();
        assert_eq!(cfg.keywords, Some(vec!["report".to_string()]));
    }

    #[test]
    fn test_merge_defaults() {
        let settings = merge(&args(&[]), FileConfig::default());
        assert_eq!(settings.request.url, "https://example.com/course/");
        assert!(settings.request.keywords.is_empty());
        assert_eq!(settings.request.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(settings.client, ClientSettings::default());
        assert_eq!(settings.client.user_agent, DEFAULT_BROWSER_USER_AGENT);
        assert!(settings.verbosity.is_none());
    }

    #[test]
    fn test_merge_cli_overrides_file() {
        let file = FileConfig {
            output_dir: Some(PathBuf::from("from-file")),
            keywords: Some(vec!["file-kw".to_string()]),
            user_agent: Some("file-ua".to_string()),
            connect_timeout_secs: Some(5),
            read_timeout_secs: Some(50),
            verbosity: Some(VerbositySetting::Verbose),
        };
        let settings = merge(
            &args(&[
                "-k",
                "cli-kw",
                "-o",
                "from-cli",
                "--user-agent",
                "cli-ua",
                "--timeout",
                "9",
            ]),
            file,
        );
        assert_eq!(settings.request.keywords, vec!["cli-kw"]);
        assert_eq!(settings.request.output_dir, PathBuf::from("from-cli"));
        assert_eq!(settings.client.user_agent, "cli-ua");
        assert_eq!(settings.client.connect_timeout_secs, 5);
        assert_eq!(settings.client.read_timeout_secs, 9);
        assert_eq!(settings.verbosity, Some(VerbositySetting::Verbose));
    }

    #[test]
    fn test_merge_file_keywords_used_when_cli_has_none() {
        let file = FileConfig {
            keywords: Some(vec!["hw".to_string(), "dis".to_string()]),
            ..FileConfig::default()
        };
        let settings = merge(&args(&[]), file);
        assert_eq!(settings.request.keywords, vec!["hw", "dis"]);
    }
}
