//! Numeric range-regex compiler.
//!
//! The store cannot compare numbers natively; it can only run byte
//! equality, substring, or regex matches against string-encoded cell
//! values. This module turns a decimal literal and a relational operator
//! into a regex that matches exactly the decimal strings satisfying the
//! relation, without ever parsing candidate values at scan time.
//!
//! Compilation is pure and stateless: no I/O, no shared state, identical
//! inputs produce byte-identical patterns.

mod errors;
mod literal;
mod range_regex;

pub use errors::{NumericError, NumericResult};
pub use literal::{is_decimal, DecimalLiteral};
pub use range_regex::{compile, RangeOp};
