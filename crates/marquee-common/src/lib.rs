//! Marquee-Common: Shared types, constants, and error handling.
//!
//! This crate provides the pieces every marquee component agrees on:
//!
//! - **Error Handling**: The `NotFound` / `Malformed` / `Transient` taxonomy
//!   that source adapters report and the enrichment pipeline dispatches on
//! - **Field Names**: The column names stored in the movie cache
//! - **Field Values**: The scalar value type stored per field
//!
//! # Examples
//!
//! ```
//! use marquee_common::{fields, Error, FieldValue, Result};
//!
//! let rating = FieldValue::from(8.1);
//! assert_eq!(rating.to_string(), "8.1");
//! assert_eq!(fields::IMDB_RATING, "IMDB Rating");
//!
//! fn lookup() -> Result<()> {
//!     Err(Error::not_found("the room"))
//! }
//! assert!(lookup().unwrap_err().is_not_found());
//! ```

pub mod error;
pub mod fields;
pub mod value;

pub use error::{Error, Result};
pub use value::FieldValue;
