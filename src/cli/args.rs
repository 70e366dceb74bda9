//! CLI argument definitions for `moyenne`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use moyenne::config::ConfigOverrides;
use moyenne::logger::Level;
use moyenne::models::ScoreField;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Level::from(*self).fmt(f)
    }
}

/// CLI theme argument
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum ThemeArg {
    /// Light background
    Light,
    /// Dark background
    Dark,
}

impl std::fmt::Display for ThemeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

/// One `--grade MODULE.FIELD=VALUE` argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeArg {
    /// 1-based module number as displayed
    pub module: usize,
    /// Score field to update
    pub field: ScoreField,
    /// Raw value as typed
    pub value: String,
}

/// Parse `MODULE.FIELD=VALUE` (e.g., `1.exam=14`, `3.td=12.5`)
///
/// # Errors
/// Returns an error if the argument is not of that shape.
pub fn parse_grade(arg: &str) -> Result<GradeArg, String> {
    let (target, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("Expected MODULE.FIELD=VALUE, got '{arg}'"))?;
    let (module, field) = target
        .split_once('.')
        .ok_or_else(|| format!("Expected MODULE.FIELD before '=', got '{target}'"))?;

    let module = module
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|&n| n >= 1)
        .ok_or_else(|| format!("Module number must be 1 or more, got '{module}'"))?;

    Ok(GradeArg {
        module,
        field: field.parse()?,
        value: value.trim().to_string(),
    })
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `theme`, `reports_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// List specialties, semesters and modules of the catalog.
    Catalog {
        /// Specialty number, code (e.g., RSI) or full name
        #[arg(short, long, value_name = "SPECIALTY")]
        specialty: Option<String>,

        /// Semester number or name; requires --specialty
        #[arg(short = 'S', long, value_name = "SEMESTER", requires = "specialty")]
        semester: Option<String>,
    },
    /// Compute module and semester averages in one go.
    Compute {
        /// Specialty number, code (e.g., RSI) or full name
        #[arg(short, long, value_name = "SPECIALTY")]
        specialty: String,

        /// Semester number or name
        #[arg(short = 'S', long, value_name = "SEMESTER")]
        semester: String,

        /// Score entry, repeatable (e.g., `-g 1.exam=14 -g 1.td=10`)
        #[arg(short, long = "grade", value_name = "MODULE.FIELD=VALUE", value_parser = parse_grade)]
        grades: Vec<GradeArg>,

        /// Output format: text, markdown (md) or html
        #[arg(short, long, value_name = "FORMAT", default_value = "text")]
        format: String,

        /// Write the report to this file instead of stdout
        #[arg(short, long, value_name = "FILE", conflicts_with = "save")]
        output: Option<PathBuf>,

        /// Save the report into the configured reports directory
        #[arg(long)]
        save: bool,
    },
    /// Start an interactive calculator session.
    Shell,
}

#[derive(Parser, Debug)]
#[command(
    name = "moyenne",
    about = "Master's grade average calculator",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config reports directory
    #[arg(long = "config-reports-dir", value_name = "DIR")]
    pub config_reports_dir: Option<PathBuf>,

    /// Override config reports directory (short form)
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Use an alternate module catalog file
    #[arg(long = "catalog", value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Override the configured theme
    #[arg(long = "theme", value_enum)]
    pub theme: Option<ThemeArg>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Short-form flags (e.g., `--reports-dir`) take precedence over long-form
    /// flags (e.g., `--config-reports-dir`) when both are provided.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let path_string = |p: &PathBuf| p.to_string_lossy().to_string();
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self.config_log_file.as_ref().map(path_string),
            verbose: self.config_verbose,
            reports_dir: self
                .reports_dir
                .as_ref()
                .or(self.config_reports_dir.as_ref())
                .map(path_string),
            catalog: self.catalog.as_ref().map(path_string),
            theme: self.theme.map(|t| t.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_cli() -> Cli {
        Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            config_level: None,
            config_log_file: None,
            config_verbose: None,
            config_reports_dir: None,
            reports_dir: None,
            catalog: None,
            theme: None,
            command: Command::Config { subcommand: None },
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = bare_cli().to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.reports_dir.is_none());
        assert!(overrides.catalog.is_none());
        assert!(overrides.theme.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let cli = Cli {
            config_level: Some(LogLevelArg::Debug),
            config_log_file: Some(PathBuf::from("/tmp/test.log")),
            config_verbose: Some(true),
            catalog: Some(PathBuf::from("/tmp/catalog.toml")),
            theme: Some(ThemeArg::Dark),
            ..bare_cli()
        };

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.catalog, Some("/tmp/catalog.toml".to_string()));
        assert_eq!(overrides.theme, Some("dark".to_string()));
    }

    #[test]
    fn test_short_form_precedence_over_long_form() {
        let cli = Cli {
            config_reports_dir: Some(PathBuf::from("/long/reports")),
            reports_dir: Some(PathBuf::from("/short/reports")),
            ..bare_cli()
        };
        assert_eq!(
            cli.to_config_overrides().reports_dir,
            Some("/short/reports".to_string())
        );

        let cli = Cli {
            config_reports_dir: Some(PathBuf::from("/long/reports")),
            ..bare_cli()
        };
        assert_eq!(
            cli.to_config_overrides().reports_dir,
            Some("/long/reports".to_string())
        );
    }

    #[test]
    fn test_parse_grade() {
        assert_eq!(
            parse_grade("1.exam=14"),
            Ok(GradeArg {
                module: 1,
                field: ScoreField::Exam,
                value: "14".to_string(),
            })
        );
        assert_eq!(parse_grade("3.TD=12.5").map(|g| g.field), Ok(ScoreField::Td));
        assert_eq!(parse_grade("2.tp=").map(|g| g.value), Ok(String::new()));
    }

    #[test]
    fn test_parse_grade_rejects_malformed() {
        assert!(parse_grade("1.exam").is_err());
        assert!(parse_grade("exam=14").is_err());
        assert!(parse_grade("0.exam=14").is_err());
        assert!(parse_grade("1.lab=14").is_err());
    }

    #[test]
    fn test_cli_parses_compute() {
        let cli = Cli::try_parse_from([
            "moyenne", "compute", "-s", "RSI", "-S", "1", "-g", "1.exam=14", "-g", "8.exam=8",
        ])
        .expect("valid arguments");

        match cli.command {
            Command::Compute {
                specialty,
                semester,
                grades,
                format,
                ..
            } => {
                assert_eq!(specialty, "RSI");
                assert_eq!(semester, "1");
                assert_eq!(grades.len(), 2);
                assert_eq!(format, "text");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
