//! Feature preparation operations
//!
//! This module provides the two stages that run before a classifier sees any
//! data:
//! - `encoding`: per-position categorical encoding of fixed-length sequences
//! - `assemble`: required-column validation, categorical leveling and joining
//!   of the encoded sequence columns onto the typed records
//!
//! Both stages are pure: no I/O, no shared state.

pub mod assemble;
pub mod encoding;

pub use assemble::{assemble, validate_columns, AssembledTable, FeatureRecord};
pub use encoding::{encode, position_column, EncodedTable};
