//! # BoQ Core Domain Models
//!
//! Data structures shared by the bill-of-quantities extraction pipeline.
//!
//! ## Key Models
//!
//! - **InputRow**: One positional spreadsheet row (STT, description, unit, quantity)
//! - **Quantity**: A design quantity cell, kept as a number, raw text or empty
//! - **GroupContext**: The "HẠNG MỤC" group currently in effect while scanning rows
//! - **TaskRecord**: One extracted task, the unit of CSV output

pub mod task;

#[cfg(test)]
pub mod property_tests;

pub use task::*;
