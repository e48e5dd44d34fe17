//! Terminal-dependent presentation settings, resolved once at startup.

use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{ColorMode, GlobalFlags, OutputFormat};

/// Narrower `COLUMNS` values are ignored and tables use their natural width.
const MIN_TABLE_WIDTH: usize = 40;

/// What the process can see of its terminal.
#[derive(Clone, Copy, Debug, Default)]
pub struct Terminal {
    pub stdout_tty: bool,
    pub stderr_tty: bool,
    pub no_color: bool,
    pub columns: Option<usize>,
}

impl Terminal {
    fn detect() -> Self {
        Self {
            stdout_tty: std::io::stdout().is_terminal(),
            stderr_tty: std::io::stderr().is_terminal(),
            no_color: std::env::var_os("NO_COLOR").is_some(),
            columns: std::env::var("COLUMNS")
                .ok()
                .and_then(|value| value.trim().parse().ok()),
        }
    }
}

/// Plain by default: no color, no spinners, natural table width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiPrefs {
    /// Color medals and headers in leaderboard and field tables.
    pub color: bool,
    /// Show spinners on stderr while the backend works.
    pub spinners: bool,
    pub table_width: Option<usize>,
}

impl UiPrefs {
    /// Only table output is decorated; json and raw stay byte-stable for
    /// scripts, whatever the terminal.
    #[must_use]
    pub fn resolve(flags: &GlobalFlags, terminal: Terminal) -> Self {
        let table = flags.format == OutputFormat::Table;
        let color = table
            && match flags.color {
                ColorMode::Always => true,
                ColorMode::Never => false,
                ColorMode::Auto => terminal.stdout_tty && !terminal.no_color && !flags.quiet,
            };
        Self {
            color,
            spinners: table && terminal.stderr_tty && !flags.quiet,
            table_width: terminal.columns.filter(|width| *width >= MIN_TABLE_WIDTH),
        }
    }
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let _ = UI_PREFS.set(UiPrefs::resolve(flags, Terminal::detect()));
}

/// Preferences set by [`init`], or the plain defaults before it runs.
#[must_use]
pub fn prefs() -> UiPrefs {
    UI_PREFS.get().copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn flags(format: OutputFormat, color: ColorMode) -> GlobalFlags {
        GlobalFlags {
            format,
            limit: None,
            quiet: false,
            verbose: false,
            color,
            local: false,
        }
    }

    const TTY: Terminal = Terminal {
        stdout_tty: true,
        stderr_tty: true,
        no_color: false,
        columns: Some(120),
    };

    #[test]
    fn table_on_a_terminal_is_decorated() {
        let prefs = UiPrefs::resolve(&flags(OutputFormat::Table, ColorMode::Auto), TTY);
        assert_eq!(
            prefs,
            UiPrefs {
                color: true,
                spinners: true,
                table_width: Some(120),
            }
        );
    }

    #[test]
    fn machine_formats_stay_plain() {
        for format in [OutputFormat::Json, OutputFormat::Raw] {
            let prefs = UiPrefs::resolve(&flags(format, ColorMode::Always), TTY);
            assert!(!prefs.color);
            assert!(!prefs.spinners);
        }
    }

    #[test]
    fn auto_color_respects_no_color_and_pipes() {
        let table = flags(OutputFormat::Table, ColorMode::Auto);
        let no_color = Terminal {
            no_color: true,
            ..TTY
        };
        assert!(!UiPrefs::resolve(&table, no_color).color);

        let piped = Terminal {
            stdout_tty: false,
            ..TTY
        };
        assert!(!UiPrefs::resolve(&table, piped).color);
        assert!(UiPrefs::resolve(&table, piped).spinners);

        let always = flags(OutputFormat::Table, ColorMode::Always);
        assert!(UiPrefs::resolve(&always, piped).color);
        let never = flags(OutputFormat::Table, ColorMode::Never);
        assert!(!UiPrefs::resolve(&never, TTY).color);
    }

    #[test]
    fn quiet_disables_spinners() {
        let quiet = GlobalFlags {
            quiet: true,
            ..flags(OutputFormat::Table, ColorMode::Auto)
        };
        let prefs = UiPrefs::resolve(&quiet, TTY);
        assert!(!prefs.spinners);
        assert!(!prefs.color);
    }

    #[test]
    fn narrow_columns_are_ignored() {
        let table = flags(OutputFormat::Table, ColorMode::Never);
        let narrow = Terminal {
            columns: Some(MIN_TABLE_WIDTH - 1),
            ..TTY
        };
        assert_eq!(UiPrefs::resolve(&table, narrow).table_width, None);
        let unset = Terminal { columns: None, ..TTY };
        assert_eq!(UiPrefs::resolve(&table, unset).table_width, None);
    }
}
