//! MoneyUP - personal finance tracking core
//!
//! Records income and expense transactions, walks a ten-step onboarding
//! survey that estimates monthly fixed costs, gates the dashboard behind a
//! one-time mock payment and computes budget metrics from the two.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (transactions, categories, onboarding profile)
//! - `storage`: Key-value storage of JSON documents, on disk or in memory
//! - `services`: Ledger, onboarding, dashboard and payment logic
//! - `app`: The composition root tying storage, settings and services together
//! - `export`: CSV and JSON ledger export
//! - `cli`, `display`, `setup`: The terminal front end
//!
//! # Example
//!
//! ```rust,ignore
//! use moneyup::config::MoneyUpPaths;
//! use moneyup::MoneyUp;
//!
//! let paths = MoneyUpPaths::new()?;
//! let app = MoneyUp::open(&paths)?;
//! println!("{}", app.ledger().balance(None));
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod setup;
pub mod storage;

pub use app::MoneyUp;
pub use error::{MoneyUpError, MoneyUpResult};
