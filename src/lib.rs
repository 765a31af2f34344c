// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod browser;
pub mod cli;
pub mod config;
pub mod core;
pub mod emit;
pub mod error;
pub mod file;
pub mod geo;
pub mod input;
pub mod progress;
pub mod record;
pub mod runner;
pub mod session;
pub mod specs;
pub mod tsv;

pub use error::{Error, Result};
