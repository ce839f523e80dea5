//! Parsing for PostgreSQL's default INTERVAL text output.
//!
//! PostgreSQL renders interval columns as strings like
//! `"1 year 2 mons 3 days 04:05:06.789"`. This crate parses that output into
//! a compact [`Interval`] value that a client's decode layer can hand to
//! downstream conversion code.
//!
//! Only the default output style (`IntervalStyle = postgres`) is handled;
//! the iso_8601, sql_standard and postgres_verbose styles are not.
//!
//! # Example
//!
//! ```rust
//! use postgresql_interval::parse;
//!
//! let ival = parse("3 years 2 mons 4 days 04:05:06.789").unwrap();
//! assert_eq!(ival.years(), 3);
//! assert_eq!(ival.hours(), 1540);
//! assert_eq!(ival.microseconds(), 306_789_000);
//! ```

mod error;
mod interval;
mod parse;

pub use error::ParseError;
pub use interval::Interval;
pub use parse::parse;
