//! Command-line interface for student-tui.

use std::path::PathBuf;

use clap::Parser;

use crate::app::Route;
use crate::config::{self, Config, Settings};

/// student-tui - Manage student records from the terminal
///
/// Lists, searches, adds, edits and deletes students held by the
/// student management service.
#[derive(Debug, Parser)]
#[command(name = "student-tui")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the student management service
    #[arg(short, long, value_name = "URL")]
    pub url: Option<String>,

    /// Path to custom configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Screen to open first, e.g. `/addStudent` or `/editStudent/7`
    #[arg(short, long, value_name = "PATH", default_value = "/", value_parser = parse_route)]
    pub route: Route,

    /// Log at debug level regardless of RUST_LOG
    #[arg(short, long)]
    pub debug: bool,
}

impl Cli {
    /// Load the configuration file and apply command-line overrides.
    ///
    /// Precedence, lowest first: file, `STUDENT_API_URL`, `--url`.
    pub fn resolve_settings(&self) -> config::Result<Settings> {
        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        let mut settings = config.settings;
        if let Some(url) = &self.url {
            settings.base_url = url.trim().to_string();
            settings.validate()?;
        }
        Ok(settings)
    }
}

fn parse_route(path: &str) -> Result<Route, String> {
    Route::parse(path).ok_or_else(|| {
        format!(
            "unknown route '{}': expected '/', '/addStudent' or '/editStudent/<id>'",
            path
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::StudentId;
    use clap::CommandFactory;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["student-tui"]).unwrap();
        assert_eq!(cli.route, Route::Listing);
        assert!(cli.url.is_none());
        assert!(!cli.debug);
    }

    #[test]
    fn test_route_flag() {
        let cli = Cli::try_parse_from(["student-tui", "--route", "/editStudent/7"]).unwrap();
        assert_eq!(cli.route, Route::Edit(StudentId::new("7")));
    }

    #[test]
    fn test_unknown_route_rejected() {
        assert!(Cli::try_parse_from(["student-tui", "--route", "/nowhere"]).is_err());
    }

    #[test]
    #[serial]
    fn test_url_flag_overrides_file() {
        std::env::remove_var(config::BASE_URL_ENV);
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[settings]\nbase_url = \"http://file:8080\"\n").unwrap();

        let cli = Cli::try_parse_from([
            "student-tui",
            "--config",
            path.to_str().unwrap(),
            "--url",
            "http://flag:9090",
        ])
        .unwrap();
        assert_eq!(cli.resolve_settings().unwrap().base_url, "http://flag:9090");
    }

    #[test]
    #[serial]
    fn test_invalid_url_flag_rejected() {
        std::env::remove_var(config::BASE_URL_ENV);
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.toml");

        let cli = Cli::try_parse_from([
            "student-tui",
            "--config",
            path.to_str().unwrap(),
            "--url",
            "ftp://nope",
        ])
        .unwrap();
        assert!(cli.resolve_settings().is_err());
    }
}
