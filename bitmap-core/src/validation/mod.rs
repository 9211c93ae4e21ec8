//! Input validation for bit map construction
//!
//! Pure conversion functions from untrusted capacity input with no I/O
//! dependencies.

pub mod parsing;

pub use parsing::{parse_capacity, Capacity};
