//! Configuration loading and validation.
//!
//! Configuration is read from one file (TOML by default, JSON or YAML when
//! the extension says so) and then overridden by `ROLBA_`-prefixed
//! environment variables, where `__` separates nesting levels:
//!
//! ```text
//! ROLBA_EMAILING__PASSWORD=hunter2 rolba --config rolba.toml
//! ```
//!
//! A minimal file:
//!
//! ```toml
//! [emailing]
//! smtp_url = "smtp.gmail.com"
//! user = "watcher@gmail.com"
//! password = "app-password"
//!
//! [notification]
//! recipients = ["me@example.com"]
//! ```

pub mod error;
mod schema;

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::{OptionExt, ResultExt};
use figment::Figment;
use figment::providers::{Env, Format, Json, Toml, Yaml};
use std::path::{Path, PathBuf};
use tracing::instrument;

pub use crate::schema::{
    Config, DEFAULT_SUBJECT, Emailing, MarketplaceKind, Notification, SourceConfig, Storage, default_sources,
};

pub const ENV_PREFIX: &str = "ROLBA_";
pub const DEFAULT_FILE_NAME: &str = "config.toml";

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "rolba").ok_or_raise(|| ErrorKind::Directories)
}

/// `config.toml` in the platform configuration directory.
pub fn default_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join(DEFAULT_FILE_NAME))
}

impl Config {
    /// Load from `path`, or from [`default_path()`] when none is given, with
    /// environment overrides applied, then validate.
    #[instrument(skip_all, fields(path))]
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => default_path()?,
        };
        tracing::Span::current().record("path", tracing::field::display(path.display()));
        if !path.is_file() {
            exn::bail!(ErrorKind::FileNotFound(path));
        }
        Self::from_figment(Self::figment(&path).merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// The file layer alone, with the format chosen by extension.
    pub fn figment(path: &Path) -> Figment {
        let extension = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Figment::from(Json::file(path)),
            Some("yaml" | "yml") => Figment::from(Yaml::file(path)),
            _ => Figment::from(Toml::file(path)),
        }
    }

    /// Extract and validate a configuration from any set of providers.
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Self = figment.extract().or_raise(|| ErrorKind::Parse)?;
        config.validate()?;
        tracing::debug!(sources = config.sources.len(), "Configuration loaded");
        Ok(config)
    }

    /// Root directory of the snapshot files.
    pub fn storage_directory(&self) -> Result<PathBuf> {
        match &self.storage.directory {
            Some(directory) => Ok(directory.clone()),
            None => Ok(project_dirs()?.data_dir().to_path_buf()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;

    const TOML: &str = r#"
[emailing]
smtp_url = "smtp.example.com"
user = "watcher@example.com"
password = "secret"

[notification]
recipients = ["me@example.com"]
"#;

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_minimal_toml_gets_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&write(&dir, "rolba.toml", TOML))).unwrap();
        assert_eq!(config.emailing.smtp_url, "smtp.example.com");
        assert_eq!(config.notification.subject, DEFAULT_SUBJECT);
        assert_eq!(config.notification.recipients, ["me@example.com"]);
        assert_eq!(config.sources, default_sources());
        assert_eq!(config.sources[0].snapshot, Path::new("vinyl_empire_records.json"));
        assert_eq!(config.sources[1].snapshot, Path::new("black_vinyl_bazar_records.json"));
        assert_eq!(config.storage.directory, None);
    }

    #[test]
    fn test_json_and_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let json = write(
            &dir,
            "rolba.json",
            r#"{"emailing": {"smtp_url": "smtp.example.com", "user": "u@example.com", "password": "p"},
                "notification": {"subject": "Hi", "recipients": ["a@example.com"]},
                "storage": {"directory": "/var/lib/rolba"}}"#,
        );
        let config = Config::load(Some(&json)).unwrap();
        assert_eq!(config.notification.subject, "Hi");
        assert_eq!(config.storage_directory().unwrap(), Path::new("/var/lib/rolba"));

        let yaml = write(
            &dir,
            "rolba.yml",
            "emailing:\n  smtp_url: smtp.example.com\n  user: u@example.com\n  password: p\n\
             notification:\n  recipients: [a@example.com, b@example.com]\n\
             sources:\n  - title: Bazar\n    marketplace: black_vinyl_bazar\n    snapshot: bazar.json\n    max_pages: 5\n",
        );
        let config = Config::load(Some(&yaml)).unwrap();
        assert_eq!(config.notification.recipients.len(), 2);
        assert_eq!(config.sources.len(), 1);
        assert_eq!(config.sources[0].marketplace, MarketplaceKind::BlackVinylBazar);
        assert_eq!(config.sources[0].max_pages, Some(5));
    }

    #[test]
    fn test_custom_sources() {
        let dir = tempfile::tempdir().unwrap();
        let content = format!(
            "{TOML}\n[[sources]]\ntitle = \"Empire\"\nmarketplace = \"vinyl_empire\"\nsnapshot = \"e.json\"\n\
             start_url = \"https://vinylempire.cz/13-bazarove-vinyly?n=20\"\n"
        );
        let config = Config::load(Some(&write(&dir, "rolba.toml", &content))).unwrap();
        assert_eq!(config.sources.len(), 1);
        assert_eq!(
            config.sources[0].start_url.as_ref().map(|u| u.as_str()),
            Some("https://vinylempire.cz/13-bazarove-vinyly?n=20")
        );
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("missing.toml"))).unwrap_err();
        assert!(matches!(&*err, ErrorKind::FileNotFound(_)));
        assert!((*err).to_string().contains("hasn't been found"));
    }

    #[rstest]
    #[case("rolba.toml", "emailing = [")]
    #[case("rolba.json", "{\"emailing\": ")]
    #[case("rolba.toml", "[notification]\nrecipients = [\"me@example.com\"]\n")]
    #[case(
        "rolba.toml",
        "[emailing]\nsmtp_url = \"s\"\nuser = \"u\"\npassword = \"p\"\n\
         [[sources]]\ntitle = \"X\"\nmarketplace = \"ebay\"\nsnapshot = \"x.json\"\n"
    )]
    fn test_unparsable(#[case] name: &str, #[case] content: &str) {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&write(&dir, name, content))).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Parse));
    }

    #[rstest]
    #[case::empty_password("password = \"secret\"", "password = \"  \"")]
    #[case::no_recipients("recipients = [\"me@example.com\"]", "recipients = []")]
    #[case::empty_recipient("recipients = [\"me@example.com\"]", "recipients = [\"\"]")]
    #[case::empty_subject("[notification]", "[notification]\nsubject = \"\"")]
    fn test_invalid(#[case] from: &str, #[case] to: &str) {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&write(&dir, "rolba.toml", &TOML.replace(from, to)))).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Validation(_)));
    }

    #[rstest]
    #[case::no_sources(vec![])]
    #[case::empty_title(vec![SourceConfig::new(" ", MarketplaceKind::VinylEmpire, "a.json")])]
    #[case::duplicate_snapshot(vec![
        SourceConfig::new("A", MarketplaceKind::VinylEmpire, "a.json"),
        SourceConfig::new("B", MarketplaceKind::BlackVinylBazar, "a.json"),
    ])]
    #[case::empty_snapshot(vec![SourceConfig::new("A", MarketplaceKind::VinylEmpire, "")])]
    #[case::escaping_snapshot(vec![SourceConfig::new("A", MarketplaceKind::VinylEmpire, "../a.json")])]
    #[case::dotted_duplicate(vec![
        SourceConfig::new("A", MarketplaceKind::VinylEmpire, "a.json"),
        SourceConfig::new("B", MarketplaceKind::BlackVinylBazar, "./a.json"),
    ])]
    #[case::rooted_duplicate(vec![
        SourceConfig::new("A", MarketplaceKind::VinylEmpire, "a.json"),
        SourceConfig::new("B", MarketplaceKind::BlackVinylBazar, "/a.json"),
    ])]
    #[case::resolved_duplicate(vec![
        SourceConfig::new("A", MarketplaceKind::VinylEmpire, "shops/a.json"),
        SourceConfig::new("B", MarketplaceKind::BlackVinylBazar, "shops/../shops//a.json"),
    ])]
    #[case::zero_pages(vec![SourceConfig {
        max_pages: Some(0),
        ..SourceConfig::new("A", MarketplaceKind::VinylEmpire, "a.json")
    }])]
    fn test_invalid_sources(#[case] sources: Vec<SourceConfig>) {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::load(Some(&write(&dir, "rolba.toml", TOML))).unwrap();
        config.sources = sources;
        let err = config.validate().unwrap_err();
        assert!(matches!(&*err, ErrorKind::Validation(_)));
    }

    #[test]
    fn test_distinct_snapshot_directories() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::load(Some(&write(&dir, "rolba.toml", TOML))).unwrap();
        config.sources = vec![
            SourceConfig::new("A", MarketplaceKind::VinylEmpire, "a.json"),
            SourceConfig::new("B", MarketplaceKind::BlackVinylBazar, "shops/a.json"),
        ];
        config.validate().unwrap();
    }

    #[test]
    fn test_later_layers_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "rolba.toml", TOML);
        let figment = Config::figment(&path).merge(Toml::string("[emailing]\npassword = \"from-env\""));
        let config = Config::from_figment(figment).unwrap();
        assert_eq!(config.emailing.password, "from-env");
        assert_eq!(config.emailing.user, "watcher@example.com");
    }

    #[test]
    fn test_password_is_redacted() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&write(&dir, "rolba.toml", TOML))).unwrap();
        let debug = format!("{config:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("secret"));
    }
}
