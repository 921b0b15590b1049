//! Core contracts and helpers for Datamask.
//!
//! This crate defines the in-memory table model exchanged between the table
//! readers/writers and the masking engine, plus small shared utilities.

pub mod error;
pub mod filename;
pub mod table;

pub use error::{Error, Result};
pub use filename::{masked_file_name, sanitize_filename};
pub use table::{Cell, Column, Number, Table, DATE_DISPLAY_FORMAT};
