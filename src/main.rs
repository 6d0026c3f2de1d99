//! # desk-tools
//!
//! A small command-line toolbox bundling four independent utilities.
//!
//! ## Features
//!
//! - Expense ledger stored as CSV, with listing, totals and per-category charts
//! - Random password generator
//! - Temperature and distance converter
//! - File organizer that sorts a directory into per-type folders
//! - Persistent configuration via `~/.config/desk-tools/config.toml`
//!
//! ## Usage
//!
//! ```bash
//! # Record and review expenses
//! desk-tools expense add -c Food -d Lunch -a 12.50
//! desk-tools expense list
//! desk-tools expense chart --svg expenses.svg
//!
//! # Other tools
//! desk-tools password 20
//! desk-tools convert c-to-f 21.5
//! desk-tools organize ~/Downloads --dry-run
//! ```

mod cli;

use anyhow::{Ok, Result, bail};
use clap::Parser;
use cli::{Cli, Commands, ConfigCommand, ExpenseCommand};
use colored::Colorize;
use desk_tools::{
    config::{FileConfig, LedgerOptions},
    convert::convert,
    ledger::{
        Ledger, LedgerError,
        chart::{self, ChartError},
    },
    organizer::Organizer,
    output::{JsonCategoryTotal, JsonLedger, JsonOrganizeResult, JsonPassword},
    password::{self, RECOMMENDED_LENGTH},
    utils::{format_amount, init_tracing},
};
use inquire::{InquireError, Select, Text};
use std::process::exit;

/// Entry point for the desk-tools application.
///
/// This function handles all errors gracefully by calling [`inner_main`] and printing
/// any errors to stderr before exiting with a non-zero status code.
fn main() {
    if let Err(err) = inner_main() {
        eprintln!("{} {err}", "Error:".red());

        exit(1);
    }
}

/// Main application logic that can return errors.
///
/// Parses arguments, sets up logging, loads the config file and dispatches
/// to the selected tool.
///
/// # Errors
///
/// Returns validation errors (bad amount, password length, conversion
/// input, out-of-range index) and I/O failures from the selected tool.
fn inner_main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose());

    let json_mode = args.json();

    match args.command {
        Commands::Config { command } => handle_config_command(&command),
        Commands::Expense { ledger, command } => {
            let file_config = load_config(json_mode);
            run_expense(&ledger.ledger_options(&file_config), command, json_mode)
        }
        Commands::Password { length } => {
            let file_config = load_config(json_mode);
            run_password(cli::password_length(length, &file_config), json_mode)
        }
        Commands::Convert { mode, value } => {
            let converted = convert(mode, &value)?;
            if json_mode {
                println!("{}", serde_json::to_string_pretty(&converted)?);
            } else {
                println!("{}", converted.to_string().bold());
            }
            Ok(())
        }
        Commands::Organize { dir, dry_run } => {
            let file_config = load_config(json_mode);
            run_organize(cli::organize_options(dir, dry_run, &file_config), json_mode)
        }
    }
}

/// Print an informational notice (not a failure).
fn info(message: &str) {
    println!("{}", format!("ℹ️  {message}").cyan());
}

/// Print a warning notice (operation aborted, not a failure).
fn warn(message: &str) {
    eprintln!("{}", format!("⚠️  {message}").yellow());
}

/// Dispatch an `expense` subcommand against the configured ledger.
fn run_expense(options: &LedgerOptions, command: ExpenseCommand, json_mode: bool) -> Result<()> {
    if matches!(command, ExpenseCommand::Check) {
        return check_ledger(options);
    }

    let mut ledger = Ledger::open(&options.file)?;

    match command {
        ExpenseCommand::Add {
            category,
            description,
            amount,
        } => add_expense(&mut ledger, options, [category, description, amount], json_mode),
        ExpenseCommand::Delete { index, interactive } => {
            delete_expense(&mut ledger, options, index, interactive, json_mode)
        }
        ExpenseCommand::List => {
            if json_mode {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonLedger::from_ledger(&ledger))?
                );
            } else {
                print_ledger(&ledger, &options.currency);
            }
            Ok(())
        }
        ExpenseCommand::Chart { svg } => {
            show_chart(&ledger, &options.currency, svg.as_deref(), json_mode)
        }
        ExpenseCommand::Check => Ok(()),
    }
}

/// Prompt for one text value. `None` means the user cancelled.
fn prompt_text(message: &str, help: &str) -> Result<Option<String>> {
    match Text::new(message).with_help_message(help).prompt() {
        std::result::Result::Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Record a new expense, prompting for any field not given on the command line.
fn add_expense(
    ledger: &mut Ledger,
    options: &LedgerOptions,
    fields: [Option<String>; 3],
    json_mode: bool,
) -> Result<()> {
    const PROMPTS: [(&str, &str); 3] = [
        ("Category:", "e.g. Food, Transport"),
        ("Description:", "what was it for?"),
        ("Amount:", "use a dot for cents, e.g. 12.50"),
    ];

    if json_mode && fields.iter().any(Option::is_none) {
        bail!("--json requires --category, --description and --amount");
    }

    let mut values = Vec::with_capacity(3);
    for (field, (message, help)) in fields.into_iter().zip(PROMPTS) {
        let value = match field {
            Some(value) => value,
            None => match prompt_text(message, help)? {
                Some(value) => value,
                None => {
                    info("Cancelled, nothing recorded.");
                    return Ok(());
                }
            },
        };
        values.push(value);
    }

    let index = ledger.append(&values[0], &values[1], &values[2])?;
    let record = &ledger.records()[index];

    if json_mode {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        println!("{}", "Expense recorded! 💸".green());
        println!("  [{index}] {}", record.summary(&options.currency));
    }
    Ok(())
}

/// Delete one expense, either by index or picked from a list.
fn delete_expense(
    ledger: &mut Ledger,
    options: &LedgerOptions,
    index: Option<usize>,
    interactive: bool,
    json_mode: bool,
) -> Result<()> {
    let selection = if index.is_none() && interactive && !ledger.is_empty() {
        if json_mode {
            bail!("--json and --interactive cannot be used together");
        }
        select_expense(ledger, &options.currency)?
    } else {
        index
    };

    match ledger.delete_at(selection) {
        std::result::Result::Ok(removed) => {
            if json_mode {
                println!("{}", serde_json::to_string_pretty(&removed)?);
            } else {
                println!("{} {}", "Deleted:".red(), removed.summary(&options.currency));
                println!(
                    "TOTAL: {}",
                    format_amount(&options.currency, ledger.grand_total())
                );
            }
            Ok(())
        }
        Err(LedgerError::NoSelection) => {
            warn("Select an expense to delete: pass its index or use --interactive.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Let the user pick an expense. `None` when cancelled.
fn select_expense(ledger: &Ledger, currency: &str) -> Result<Option<usize>> {
    let items: Vec<String> = ledger
        .records()
        .iter()
        .enumerate()
        .map(|(i, r)| format!("[{i}] {}", r.summary(currency)))
        .collect();

    match Select::new("Select an expense to delete:", items).raw_prompt() {
        std::result::Result::Ok(choice) => Ok(Some(choice.index)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Print every record, a separator and the grand total.
fn print_ledger(ledger: &Ledger, currency: &str) {
    println!("{}", format!("🧾 {}", ledger.path().display()).bold());

    for (i, record) in ledger.records().iter().enumerate() {
        println!("  [{i}] {}", record.summary(currency));
    }

    println!("{}", "-".repeat(60));
    println!(
        "TOTAL: {}",
        format_amount(currency, ledger.grand_total())
            .bright_green()
            .bold()
    );
}

/// Print the per-category bar chart and optionally export it as SVG.
fn show_chart(
    ledger: &Ledger,
    currency: &str,
    svg_path: Option<&std::path::Path>,
    json_mode: bool,
) -> Result<()> {
    let totals = ledger.totals();

    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonCategoryTotal::from_totals(&totals))?
        );
    } else {
        match chart::render_bars(&totals, currency) {
            std::result::Result::Ok(lines) => {
                println!("\n{}", "📊 Expenses by category:".bold());
                for line in lines {
                    println!("  {line}");
                }
            }
            Err(ChartError::NoData) => {
                info("No expenses recorded.");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }
    }

    if let Some(path) = svg_path {
        match chart::write_svg(&totals, currency, path) {
            std::result::Result::Ok(()) => {
                if !json_mode {
                    println!("Chart written to: {}", path.display());
                }
            }
            Err(e @ (ChartError::Unavailable | ChartError::NoData)) => {
                if json_mode {
                    eprintln!("{e}");
                } else {
                    info(&e.to_string());
                }
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

/// Strictly parse the ledger file and report the first malformed row.
fn check_ledger(options: &LedgerOptions) -> Result<()> {
    let ledger = Ledger::open_strict(&options.file)?;

    println!(
        "{} {} records in {}",
        "✅ All rows valid:".green(),
        ledger.len(),
        ledger.path().display()
    );
    Ok(())
}

/// Generate and print one password.
fn run_password(length: usize, json_mode: bool) -> Result<()> {
    let generated = password::generate(length)?;

    if json_mode {
        let output = JsonPassword {
            length,
            password: generated,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", generated.bold());
        if length < RECOMMENDED_LENGTH {
            eprintln!(
                "{}",
                format!("Tip: use {RECOMMENDED_LENGTH}+ characters, with letters, numbers and symbols.")
                    .dimmed()
            );
        }
    }
    Ok(())
}

/// Organize a directory and print the outcome.
fn run_organize(options: desk_tools::OrganizeOptions, json_mode: bool) -> Result<()> {
    let organizer = Organizer::new(options.categories)
        .with_dry_run(options.dry_run)
        .with_quiet(json_mode);

    if !json_mode {
        println!(
            "{}",
            format!("🗂️  Organizing {}...", options.dir.display()).cyan()
        );
    }

    let result = organizer.organize(&options.dir)?;

    if json_mode {
        let output = JsonOrganizeResult::from_result(&result);
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        result.print_summary();
    }
    Ok(())
}

/// Default config file content written by `config init`.
const CONFIG_TEMPLATE: &str = r#"# desk-tools configuration
# All values are optional. CLI arguments always take priority.

# Currency symbol printed before amounts
# currency = "$"

[ledger]
# Expense CSV file (defaults to expenses.csv in the current directory)
# file = "~/Documents/expenses.csv"

[password]
# Default password length (minimum 4)
# length = 12

[organizer]
# Preview what would be moved without touching anything
# dry_run = false

# Replace the built-in category table (categories are tried alphabetically)
# [organizer.categories]
# Images = [".jpg", ".jpeg", ".png", ".gif", ".webp"]
# Documents = [".pdf", ".docx", ".doc", ".txt", ".xlsx", ".pptx"]
"#;

/// Dispatch a `config` subcommand.
fn handle_config_command(cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Path => match FileConfig::config_path() {
            Some(path) => println!("{}", path.display()),
            None => bail!("Could not determine the config directory on this platform"),
        },
        ConfigCommand::Show => show_config()?,
        ConfigCommand::Init => init_config()?,
    }
    Ok(())
}

/// Print the effective configuration (file values merged with defaults).
fn show_config() -> Result<()> {
    let path = FileConfig::config_path();

    let (file_exists, config) = match &path {
        Some(p) if p.exists() => (true, FileConfig::load()?),
        _ => (false, FileConfig::default()),
    };

    match &path {
        Some(p) if file_exists => println!("Config file: {} (found)", p.display()),
        Some(p) => println!(
            "Config file: {} (not found - showing defaults)",
            p.display()
        ),
        None => println!("Config file: (cannot determine path on this platform)"),
    }

    println!();
    println!("{}", format_config(&config));
    Ok(())
}

/// Format a [`FileConfig`] as a human-readable table, showing defaults for `None` fields.
fn format_config(config: &FileConfig) -> String {
    fn show_str(val: Option<&str>, default: &str) -> String {
        val.map_or_else(
            || format!("\"{default}\"  (default)"),
            |v| format!("\"{v}\""),
        )
    }
    fn show_bool(val: Option<bool>, default: bool) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }
    fn show_usize(val: Option<usize>, default: usize) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }

    let file = config.ledger.file.as_ref().map_or_else(
        || format!("\"{}\"  (default)", desk_tools::config::DEFAULT_LEDGER_FILE),
        |p| format!("\"{}\"", p.display()),
    );
    let categories = match &config.organizer.categories {
        Some(table) if !table.is_empty() => table
            .iter()
            .map(|(name, exts)| format!("\n  {name} = [{}]", exts.join(", ")))
            .collect::<String>(),
        _ => "built-in  (default)".to_string(),
    };

    format!(
        "currency   = {currency}

[ledger]
file       = {file}

[password]
length     = {length}

[organizer]
dry_run    = {dry_run}
categories = {categories}",
        currency = show_str(
            config.currency.as_deref(),
            desk_tools::config::DEFAULT_CURRENCY
        ),
        length = show_usize(config.password.length, password::DEFAULT_LENGTH),
        dry_run = show_bool(config.organizer.dry_run, false),
    )
}

/// Write a default config template to the config file path if it does not exist yet.
fn init_config() -> Result<()> {
    let Some(path) = FileConfig::config_path() else {
        bail!("Could not determine the config directory on this platform");
    };

    if path.exists() {
        println!("Config file already exists at: {}", path.display());
        println!("Remove it first if you want to regenerate it.");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {e}",
                parent.display()
            )
        })?;
    }

    std::fs::write(&path, CONFIG_TEMPLATE)
        .map_err(|e| anyhow::anyhow!("Failed to write config file {}: {e}", path.display()))?;

    println!("Config file written to: {}", path.display());
    Ok(())
}

/// Load the configuration file, falling back to defaults on failure.
fn load_config(json_mode: bool) -> FileConfig {
    match FileConfig::load() {
        std::result::Result::Ok(config) => config,
        Err(e) => {
            if !json_mode {
                eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
            }
            FileConfig::default()
        }
    }
}
