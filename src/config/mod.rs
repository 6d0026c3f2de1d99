//! Configuration types and the config-file layer.
//!
//! - [`file`] - the TOML file at `<config_dir>/desk-tools/config.toml`
//! - [`options`] - resolved per-command options (CLI > file > defaults)

pub mod file;
pub mod options;

pub use file::FileConfig;
pub use options::{DEFAULT_CURRENCY, DEFAULT_LEDGER_FILE, LedgerOptions, OrganizeOptions};
