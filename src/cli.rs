use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Watch second-hand vinyl marketplaces and email what is newly listed.
#[derive(Debug, Parser)]
#[command(name = "rolba", version, about)]
pub struct Args {
    /// Configuration file (TOML, JSON or YAML by extension). Defaults to
    /// `config.toml` in the platform configuration directory.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log the digest instead of emailing it.
    #[arg(long)]
    pub no_email: bool,

    /// Diff against the snapshots without updating them. Implies --no-email.
    #[arg(long)]
    pub dry_run: bool,

    /// Increase logging verbosity (-v debug, -vv trace). `RUST_LOG` wins.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
impl Args {
    pub fn sends_email(&self) -> bool {
        !(self.no_email || self.dry_run)
    }

    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["rolba"]).unwrap();
        assert_eq!(args.config, None);
        assert!(args.sends_email());
        assert_eq!(args.log_filter(), "info");
    }

    #[test]
    fn test_flags() {
        let args = Args::try_parse_from(["rolba", "--config", "/etc/rolba.toml", "--no-email", "-vv"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("/etc/rolba.toml")));
        assert!(!args.sends_email());
        assert!(!args.dry_run);
        assert_eq!(args.log_filter(), "trace");
    }

    #[test]
    fn test_dry_run_implies_no_email() {
        let args = Args::try_parse_from(["rolba", "--dry-run", "-v"]).unwrap();
        assert!(!args.sends_email());
        assert_eq!(args.log_filter(), "debug");
    }

    #[test]
    fn test_rejects_unknown_flag() {
        assert!(Args::try_parse_from(["rolba", "--forever"]).is_err());
    }
}
