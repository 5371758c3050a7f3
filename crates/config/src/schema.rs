use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::path::PathBuf;
use url::Url;

pub use rolba_notify::DEFAULT_SUBJECT;

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Config {
    pub emailing: Emailing,
    #[serde(default)]
    pub notification: Notification,
    #[serde(default)]
    pub storage: Storage,
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceConfig>,
}

/// SMTP relay credentials. The user is also the sender address.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Emailing {
    /// Relay host, e.g. `smtp.gmail.com`.
    pub smtp_url: String,
    pub user: String,
    pub password: String,
}
impl Debug for Emailing {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Emailing")
            .field("smtp_url", &self.smtp_url)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Notification {
    #[serde(default = "default_subject")]
    pub subject: String,
    #[serde(default)]
    pub recipients: Vec<String>,
}
impl Default for Notification {
    fn default() -> Self {
        Self {
            subject: default_subject(),
            recipients: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Storage {
    /// Root of the snapshot files. Defaults to the platform data directory.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketplaceKind {
    VinylEmpire,
    BlackVinylBazar,
}

/// One watched marketplace listing.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Section heading in the digest.
    pub title: String,
    pub marketplace: MarketplaceKind,
    /// Snapshot file, relative to the storage directory.
    pub snapshot: PathBuf,
    /// Overrides the marketplace's default listing URL.
    #[serde(default)]
    pub start_url: Option<Url>,
    #[serde(default)]
    pub max_pages: Option<usize>,
}
impl SourceConfig {
    pub fn new(title: impl Into<String>, marketplace: MarketplaceKind, snapshot: impl Into<PathBuf>) -> Self {
        Self {
            title: title.into(),
            marketplace,
            snapshot: snapshot.into(),
            start_url: None,
            max_pages: None,
        }
    }
}

fn default_subject() -> String {
    DEFAULT_SUBJECT.to_string()
}

pub fn default_sources() -> Vec<SourceConfig> {
    vec![
        SourceConfig::new("Vinyl Empire", MarketplaceKind::VinylEmpire, "vinyl_empire_records.json"),
        SourceConfig::new("Black Vinyl Bazar", MarketplaceKind::BlackVinylBazar, "black_vinyl_bazar_records.json"),
    ]
}

fn invalid(reason: impl Into<String>) -> crate::error::Error {
    exn::Exn::from(ErrorKind::Validation(reason.into()))
}

impl Config {
    /// Check everything deserialization alone cannot.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("emailing.smtp_url", &self.emailing.smtp_url),
            ("emailing.user", &self.emailing.user),
            ("emailing.password", &self.emailing.password),
            ("notification.subject", &self.notification.subject),
        ] {
            if value.trim().is_empty() {
                return Err(invalid(format!("{field} must not be empty")));
            }
        }
        if self.notification.recipients.is_empty() {
            return Err(invalid("notification.recipients must list at least one address"));
        }
        if self.notification.recipients.iter().any(|r| r.trim().is_empty()) {
            return Err(invalid("notification.recipients must not contain empty addresses"));
        }
        if self.sources.is_empty() {
            return Err(invalid("at least one source is required"));
        }
        let mut snapshots = HashSet::new();
        for source in &self.sources {
            if source.title.trim().is_empty() {
                return Err(invalid("source titles must not be empty"));
            }
            // Compare locations the way the storage backend resolves them.
            let location = rolba_storage::validate_path(&source.snapshot).or_raise(|| {
                ErrorKind::Validation(format!(
                    "source '{}' has an invalid snapshot file: {}",
                    source.title,
                    source.snapshot.display()
                ))
            })?;
            if !snapshots.insert(location) {
                return Err(invalid(format!(
                    "snapshot {} is used by more than one source",
                    source.snapshot.display()
                )));
            }
            if source.max_pages == Some(0) {
                return Err(invalid(format!("source '{}' must allow at least one page", source.title)));
            }
        }
        Ok(())
    }
}
