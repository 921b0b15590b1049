//! Column classification and masking engine for Datamask.
//!
//! Columns are classified from their header text alone; each category maps to
//! a masking strategy that either partially masks the real value or replaces
//! it with synthetic data. Tables are exchanged with the outside world as
//! [`datamask_core::Table`] values; the `source`/`output` modules cover CSV.

pub mod classifier;
pub mod errors;
pub mod masking;
pub mod model;
pub mod output;
pub mod source;
pub mod synthetic;
pub mod value_type;

pub use classifier::{Category, Classification, ColumnClassifier, DEFAULT_FUZZY_THRESHOLD};
pub use errors::{GenerationError, MaskingError};
pub use masking::{MaskingEngine, Strategy, strategy_for};
pub use model::{ColumnReport, MaskOptions, MaskingIssue, MaskingReport};
pub use synthetic::{FakerGenerator, SyntheticGenerator};
pub use value_type::{ValueKind, classify_value};
