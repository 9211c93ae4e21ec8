#![no_std]

//! Bitmap Core - Fixed-Capacity Bit Map
//!
//! This crate provides the bit map itself: capacity planning, the owned word
//! buffer and the set / test / raw-read operations. It needs `alloc` but no
//! other part of `std`.

extern crate alloc;

pub mod bitmap;
pub mod error;
pub mod plan;
mod storage;
pub mod validation;
pub mod word;

pub use bitmap::BitMap;
pub use error::*;
pub use plan::{Plan, WordWidth};
pub use validation::{parse_capacity, Capacity};
pub use word::Word;
