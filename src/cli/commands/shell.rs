//! Interactive shell handler
//!
//! A line-oriented front end to one calculator session. Every selection or
//! score change prints the refreshed view.

use super::selection::{render_view, resolve_semester, resolve_specialty, write_report};
use moyenne::catalog::Catalog;
use moyenne::config::Config;
use moyenne::models::ScoreField;
use moyenne::report::formats::ReportFormat;
use moyenne::session::Session;
use moyenne::{debug, error};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

const PROMPT: &str = "moyenne> ";

const HELP: &str = "\
Commands:
  specialties                      List specialties and semesters
  specialty [NUMBER|CODE|NAME]     Select a specialty (no argument clears it)
  semester [NUMBER|NAME]           Select a semester (no argument clears it)
  set MODULE exam|td|tp [VALUE]    Enter a score for the module numbered MODULE
  show                             Show the current averages
  theme                            Toggle light/dark theme for exports
  export FORMAT [FILE]             Write a text, md or html report
  help                             Show this help
  quit                             Leave the shell";

/// One parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellCommand {
    Help,
    Specialties,
    Specialty(Option<String>),
    Semester(Option<String>),
    Set {
        module: usize,
        field: ScoreField,
        value: String,
    },
    Show,
    Theme,
    Export {
        format: ReportFormat,
        path: Option<PathBuf>,
    },
    Quit,
}

/// Remaining words joined back together, `None` when there are none
fn rest_of_line<'a>(words: impl Iterator<Item = &'a str>) -> Option<String> {
    let rest = words.collect::<Vec<_>>().join(" ");
    (!rest.is_empty()).then_some(rest)
}

impl FromStr for ShellCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Err(String::new());
        };

        match command.to_lowercase().as_str() {
            "help" | "?" => Ok(Self::Help),
            "specialties" | "list" => Ok(Self::Specialties),
            "specialty" | "spec" => Ok(Self::Specialty(rest_of_line(words))),
            "semester" | "sem" => Ok(Self::Semester(rest_of_line(words))),
            "set" => {
                let module = words
                    .next()
                    .and_then(|m| m.parse::<usize>().ok())
                    .filter(|&m| m >= 1)
                    .ok_or("Usage: set MODULE exam|td|tp [VALUE]")?;
                let field: ScoreField = words
                    .next()
                    .ok_or("Usage: set MODULE exam|td|tp [VALUE]")?
                    .parse()?;
                Ok(Self::Set {
                    module,
                    field,
                    value: rest_of_line(words).unwrap_or_default(),
                })
            }
            "show" => Ok(Self::Show),
            "theme" => Ok(Self::Theme),
            "export" => {
                let format: ReportFormat = words
                    .next()
                    .ok_or("Usage: export FORMAT [FILE]")?
                    .parse()?;
                Ok(Self::Export {
                    format,
                    path: rest_of_line(words).map(PathBuf::from),
                })
            }
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(format!("Unknown command '{other}'. Type 'help' for a list.")),
        }
    }
}

/// Run the interactive shell on stdin/stdout.
pub fn run(catalog: &Catalog, config: &Config) {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let reports_dir = PathBuf::from(&config.paths.reports_dir);

    let mut session = Session::new(catalog);
    session.set_theme(config.theme());

    if let Err(e) = run_with(&mut session, stdin.lock(), stdout.lock(), &reports_dir, true) {
        error!("Shell I/O failed: {e}");
        eprintln!("✗ {e}");
    }
}

/// Read commands from `input` until it ends or the user quits
fn run_with(
    session: &mut Session,
    mut input: impl BufRead,
    mut out: impl Write,
    reports_dir: &Path,
    prompt: bool,
) -> io::Result<()> {
    writeln!(out, "Grade average calculator. Type 'help' for commands.")?;
    print_view(session, &mut out)?;

    let mut raw = Vec::new();
    loop {
        if prompt {
            write!(out, "{PROMPT}")?;
            out.flush()?;
        }
        raw.clear();
        if input.read_until(b'\n', &mut raw)? == 0 {
            break;
        }
        // Undecodable bytes become U+FFFD and then read like any other bad input
        let line = String::from_utf8_lossy(&raw);
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<ShellCommand>() {
            Ok(ShellCommand::Quit) => break,
            Ok(command) => {
                debug!("Shell command: {command:?}");
                execute(session, command, reports_dir, &mut out)?;
            }
            Err(e) => writeln!(out, "✗ {e}")?,
        }
    }
    Ok(())
}

fn execute(
    session: &mut Session,
    command: ShellCommand,
    reports_dir: &Path,
    out: &mut impl Write,
) -> io::Result<()> {
    let catalog = session.catalog();
    match command {
        ShellCommand::Help => writeln!(out, "{HELP}"),
        ShellCommand::Specialties => {
            for (i, name) in catalog.specialties().iter().enumerate() {
                writeln!(out, "  {}. {name}", i + 1)?;
            }
            writeln!(out, "Semesters: {}", catalog.semesters().join(", "))
        }
        ShellCommand::Specialty(input) => {
            session.set_specialty(input.map(|s| resolve_specialty(catalog, &s)));
            print_view(session, out)
        }
        ShellCommand::Semester(input) => {
            match session.set_semester(input.map(|s| resolve_semester(catalog, &s))) {
                Ok(()) => print_view(session, out),
                Err(e) => writeln!(out, "✗ {e}"),
            }
        }
        ShellCommand::Set {
            module,
            field,
            value,
        } => match session.update_field(module - 1, field, value) {
            Ok(()) => print_view(session, out),
            Err(e) => writeln!(out, "✗ {e}"),
        },
        ShellCommand::Show => print_view(session, out),
        ShellCommand::Theme => {
            session.toggle_theme();
            writeln!(out, "Theme: {}", session.theme())
        }
        ShellCommand::Export { format, path } => {
            match write_report(session, format, path.as_deref(), reports_dir) {
                Ok(written) => writeln!(out, "✓ Report written: {}", written.display()),
                Err(e) => writeln!(out, "✗ {e}"),
            }
        }
        ShellCommand::Quit => Ok(()),
    }
}

fn print_view(session: &Session, out: &mut impl Write) -> io::Result<()> {
    match render_view(session, ReportFormat::Text) {
        Ok(text) => writeln!(out, "{text}"),
        Err(e) => writeln!(out, "✗ {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_script(catalog: &Catalog, script: &str, reports_dir: &Path) -> String {
        let mut session = Session::new(catalog);
        let mut out = Vec::new();
        run_with(&mut session, script.as_bytes(), &mut out, reports_dir, false).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("help".parse::<ShellCommand>(), Ok(ShellCommand::Help));
        assert_eq!(
            "specialty Systèmes Informatiques (SI)".parse::<ShellCommand>(),
            Ok(ShellCommand::Specialty(Some(
                "Systèmes Informatiques (SI)".to_string()
            )))
        );
        assert_eq!("semester".parse::<ShellCommand>(), Ok(ShellCommand::Semester(None)));
        assert_eq!(
            "set 3 TD 12.5".parse::<ShellCommand>(),
            Ok(ShellCommand::Set {
                module: 3,
                field: ScoreField::Td,
                value: "12.5".to_string(),
            })
        );
        assert_eq!(
            "export md out.md".parse::<ShellCommand>(),
            Ok(ShellCommand::Export {
                format: ReportFormat::Markdown,
                path: Some(PathBuf::from("out.md")),
            })
        );
        assert_eq!("EXIT".parse::<ShellCommand>(), Ok(ShellCommand::Quit));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("set".parse::<ShellCommand>().is_err());
        assert!("set 0 exam 12".parse::<ShellCommand>().is_err());
        assert!("set 1 oral 12".parse::<ShellCommand>().is_err());
        assert!("export pdf".parse::<ShellCommand>().is_err());
        assert!("dance".parse::<ShellCommand>().is_err());
    }

    #[test]
    fn test_session_script() {
        let catalog = Catalog::builtin();
        let dir = tempfile::tempdir().unwrap();
        let out = run_script(
            &catalog,
            "semester 1\nspecialty RSI\nsemester 1\nset 1 exam 14\nset 1 td 10\nset 1 tp 16\nquit\nshow\n",
            dir.path(),
        );

        assert!(out.starts_with("Grade average calculator."));
        assert!(out.contains("Select a specialty to get started."));
        assert!(out.contains("✗ Select a specialty before choosing a semester"));
        assert!(out.contains("Select a semester to display its modules."));
        assert!(out.contains("13.67 / 20"));
    }

    #[test]
    fn test_invalid_utf8_line_does_not_end_session() {
        let catalog = Catalog::builtin();
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(&catalog);
        let mut out = Vec::new();
        let script: &[u8] = b"specialty RSI\nsemester 1\nset 1 exam \xff\xfe\nset 1 td 10\n\xc3\n";

        run_with(&mut session, script, &mut out, dir.path(), false).unwrap();

        // The garbled value is kept as typed and reads as 0; later lines still apply
        let entry = session.entry(0).unwrap();
        assert_eq!(entry.exam.as_deref(), Some("\u{fffd}\u{fffd}"));
        assert_eq!(entry.td.as_deref(), Some("10"));
        assert!(String::from_utf8_lossy(&out).contains("✗ Unknown command"));
    }

    #[test]
    fn test_selection_change_discards_scores() {
        let catalog = Catalog::builtin();
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(&catalog);
        let script = "specialty 2\nsemester 2\nset 1 exam 15\nsemester 1\nsemester 2\n";
        run_with(&mut session, script.as_bytes(), io::sink(), dir.path(), false).unwrap();

        assert_eq!(session.semester(), Some("Semestre 2"));
        assert!(session.scores().is_empty());
    }

    #[test]
    fn test_export_from_shell() {
        let catalog = Catalog::builtin();
        let dir = tempfile::tempdir().unwrap();
        let out = run_script(
            &catalog,
            "specialty SYM\nsemester 2\nset 1 exam 12\ntheme\nexport html\n",
            dir.path(),
        );

        assert!(out.contains("Theme: dark"));
        let written = dir.path().join("SYM-S2.html");
        assert!(out.contains(&format!("✓ Report written: {}", written.display())));
        assert!(std::fs::read_to_string(written)
            .unwrap()
            .contains("<body class=\"dark\">"));
    }

    #[test]
    fn test_export_without_results() {
        let catalog = Catalog::builtin();
        let dir = tempfile::tempdir().unwrap();
        let out = run_script(&catalog, "export text\n", dir.path());
        assert!(out.contains("✗ Nothing to export."));
    }
}
