//! Command-line interface definition and argument parsing.
//!
//! This module defines all command-line arguments, options, and their validation
//! using the [clap](https://docs.rs/clap/) library. Each tool is a subcommand.
//!
//! Helper methods accept a [`FileConfig`] reference so that config-file
//! values act as defaults that CLI arguments can override (layered config).

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use desk_tools::config::file::{FileConfig, expand_tilde};
use desk_tools::config::{DEFAULT_CURRENCY, DEFAULT_LEDGER_FILE, LedgerOptions, OrganizeOptions};
use desk_tools::convert::Conversion;
use desk_tools::password::DEFAULT_LENGTH;

/// Arguments locating the ledger and controlling how amounts are shown.
#[derive(Parser)]
pub struct LedgerArgs {
    /// Path of the expense CSV file
    ///
    /// Defaults to the `[ledger] file` config value, then `expenses.csv`
    /// in the current directory.
    #[arg(short = 'f', long)]
    file: Option<PathBuf>,

    /// Currency symbol printed before amounts (e.g. "$", "R$", "€")
    #[arg(long)]
    currency: Option<String>,
}

impl LedgerArgs {
    /// Resolve ledger options from CLI args and config file.
    ///
    /// - **file**: CLI > config (tilde-expanded) > `expenses.csv`
    /// - **currency**: CLI > config > `$`
    #[must_use]
    pub fn ledger_options(&self, config: &FileConfig) -> LedgerOptions {
        LedgerOptions {
            file: self
                .file
                .clone()
                .or_else(|| config.ledger.file.as_deref().map(expand_tilde))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LEDGER_FILE)),
            currency: self
                .currency
                .clone()
                .or_else(|| config.currency.clone())
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        }
    }
}

/// Subcommands for `expense`.
#[derive(Subcommand)]
pub enum ExpenseCommand {
    /// Record a new expense (prompts for any value not given)
    Add {
        /// Category label, e.g. "Food"
        #[arg(short, long)]
        category: Option<String>,

        /// Free-form description
        #[arg(short, long)]
        description: Option<String>,

        /// Amount, using a dot for cents (e.g. 12.50)
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
    },

    /// Delete the expense at the given index (see `expense list`)
    Delete {
        /// 0-based index of the expense to delete
        index: Option<usize>,

        /// Pick the expense from a list instead of giving an index
        #[arg(short = 'i', long)]
        interactive: bool,
    },

    /// List every expense with the grand total
    List,

    /// Show totals per category as a bar chart
    Chart {
        /// Also write the chart as an SVG file
        #[arg(long)]
        svg: Option<PathBuf>,
    },

    /// Verify that every row of the ledger file parses
    Check,
}

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Record and review expenses
    Expense {
        #[command(flatten)]
        ledger: LedgerArgs,

        #[command(subcommand)]
        command: ExpenseCommand,
    },

    /// Generate a random password
    Password {
        /// Number of characters (at least 4)
        ///
        /// Defaults to the `[password] length` config value, then 12.
        length: Option<usize>,
    },

    /// Convert a temperature or a distance
    Convert {
        /// Conversion to apply
        #[arg(value_enum)]
        mode: Conversion,

        /// Value to convert
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Move the files of a directory into per-type subfolders
    Organize {
        /// Directory to organize (defaults to the current directory)
        dir: Option<PathBuf>,

        /// Show what would be moved without touching anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (file values + defaults for unset keys)
    Show,
    /// Write a default config.toml if none exists yet
    Init,
    /// Print the path to the config file
    Path,
}

/// Main command-line interface structure.
///
/// Helper methods accept a [`FileConfig`] reference so that config-file values act as
/// defaults when the corresponding CLI argument is not provided.
#[derive(Parser)]
#[command(name = "desk-tools")]
#[command(
    about = "Everyday desk tools: expense ledger, password generator, unit converter and file organizer"
)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Tool to run
    #[command(subcommand)]
    pub command: Commands,

    /// Output results as a single JSON object for scripting/piping
    ///
    /// When enabled, human-readable output (colors, progress bars, emojis)
    /// is suppressed. Incompatible with interactive prompts.
    #[arg(long, global = true)]
    json: bool,

    /// Show debug logs on stderr
    #[arg(short = 'v', long, global = true)]
    verbose: bool,
}

impl Cli {
    /// Whether `--json` structured output mode is enabled.
    #[must_use]
    pub const fn json(&self) -> bool {
        self.json
    }

    /// Whether `--verbose` logging is enabled.
    #[must_use]
    pub const fn verbose(&self) -> bool {
        self.verbose
    }
}

/// Resolve the password length.
///
/// Priority: CLI argument > config file > 12.
#[must_use]
pub fn password_length(length: Option<usize>, config: &FileConfig) -> usize {
    length.or(config.password.length).unwrap_or(DEFAULT_LENGTH)
}

/// Resolve organizer options.
///
/// - **dir**: CLI argument > current directory
/// - **`dry_run`**: CLI flag `||` config value `||` `false`
/// - **categories**: config table, or the built-in one
#[must_use]
pub fn organize_options(dir: Option<PathBuf>, dry_run: bool, config: &FileConfig) -> OrganizeOptions {
    OrganizeOptions {
        dir: dir.unwrap_or_else(|| PathBuf::from(".")),
        dry_run: dry_run || config.organizer.dry_run.unwrap_or(false),
        categories: config.organizer.category_table(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_ledger_options_defaults() {
        let cli = parse(&["desk-tools", "expense", "list"]);
        let Commands::Expense { ledger, .. } = cli.command else {
            panic!("expected expense command");
        };

        let options = ledger.ledger_options(&FileConfig::default());

        assert_eq!(options.file, PathBuf::from("expenses.csv"));
        assert_eq!(options.currency, "$");
    }

    #[test]
    fn test_ledger_options_cli_overrides_config() {
        let cli = parse(&[
            "desk-tools",
            "expense",
            "--file",
            "/tmp/mine.csv",
            "--currency",
            "€",
            "list",
        ]);
        let Commands::Expense { ledger, .. } = cli.command else {
            panic!("expected expense command");
        };
        let config: FileConfig =
            toml::from_str("currency = \"R$\"\n[ledger]\nfile = \"/data/expenses.csv\"\n").unwrap();

        let options = ledger.ledger_options(&config);

        assert_eq!(options.file, PathBuf::from("/tmp/mine.csv"));
        assert_eq!(options.currency, "€");
    }

    #[test]
    fn test_ledger_options_from_config() {
        let cli = parse(&["desk-tools", "expense", "list"]);
        let Commands::Expense { ledger, .. } = cli.command else {
            panic!("expected expense command");
        };
        let config: FileConfig =
            toml::from_str("currency = \"R$\"\n[ledger]\nfile = \"/data/expenses.csv\"\n").unwrap();

        let options = ledger.ledger_options(&config);

        assert_eq!(options.file, PathBuf::from("/data/expenses.csv"));
        assert_eq!(options.currency, "R$");
    }

    #[test]
    fn test_expense_add_arguments() {
        let cli = parse(&[
            "desk-tools", "expense", "add", "-c", "Food", "-d", "Lunch", "-a", "12.50",
        ]);

        let Commands::Expense {
            command:
                ExpenseCommand::Add {
                    category,
                    description,
                    amount,
                },
            ..
        } = cli.command
        else {
            panic!("expected expense add");
        };

        assert_eq!(category.as_deref(), Some("Food"));
        assert_eq!(description.as_deref(), Some("Lunch"));
        assert_eq!(amount.as_deref(), Some("12.50"));
    }

    #[test]
    fn test_expense_delete_rejects_negative_index() {
        assert!(Cli::try_parse_from(["desk-tools", "expense", "delete", "-1"]).is_err());
    }

    #[test]
    fn test_password_length_priority() {
        let config: FileConfig = toml::from_str("[password]\nlength = 20\n").unwrap();

        assert_eq!(password_length(Some(8), &config), 8);
        assert_eq!(password_length(None, &config), 20);
        assert_eq!(password_length(None, &FileConfig::default()), DEFAULT_LENGTH);
    }

    #[test]
    fn test_convert_accepts_negative_value() {
        let cli = parse(&["desk-tools", "convert", "f-to-c", "-40"]);
        let Commands::Convert { mode, value } = cli.command else {
            panic!("expected convert");
        };

        assert_eq!(mode, Conversion::FahrenheitToCelsius);
        assert_eq!(value, "-40");
    }

    #[test]
    fn test_convert_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["desk-tools", "convert", "c-to-k", "1"]).is_err());
    }

    #[test]
    fn test_organize_options() {
        let config: FileConfig = toml::from_str("[organizer]\ndry_run = true\n").unwrap();

        let options = organize_options(None, false, &config);
        assert_eq!(options.dir, PathBuf::from("."));
        assert!(options.dry_run);

        let options = organize_options(Some(PathBuf::from("/downloads")), false, &FileConfig::default());
        assert_eq!(options.dir, PathBuf::from("/downloads"));
        assert!(!options.dry_run);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["desk-tools", "password", "8", "--json", "-v"]);

        assert!(cli.json());
        assert!(cli.verbose());
    }
}
