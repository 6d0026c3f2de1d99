//! # desk-tools
//!
//! A small toolbox of independent utilities sharing one command-line front end:
//!
//! - [`ledger`] - an expense ledger persisted to CSV, with per-category totals
//!   and bar charts
//! - [`password`] - random password generation
//! - [`convert`] - temperature and distance conversion
//! - [`organizer`] - moves the files of a directory into per-type subfolders
//!
//! Configuration is layered (CLI > config file > defaults), see [`config`].

pub mod config;
pub mod convert;
pub mod ledger;
pub mod organizer;
pub mod output;
pub mod password;
pub mod utils;

pub use config::{LedgerOptions, OrganizeOptions};
