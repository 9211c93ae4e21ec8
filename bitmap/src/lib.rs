//! Bitmap - Fixed-Capacity Bit Map and Clock Utilities
//!
//! This library pairs the `no_std` bit map from `bitmap-core` with the pieces
//! that need `std`: a monotonic millisecond clock and a configuration layer.
//!
//! ## Architecture
//!
//! - **bitmap-core**: capacity planning, word storage and bit operations (no I/O)
//! - **bitmap**: clock access, configuration loading and logging integration
//!
//! ## Quick Start
//!
//! ```rust
//! use bitmap::{BitMapConfig, clock};
//!
//! fn example() -> bitmap::Result<()> {
//!     let start = clock::monotonic_millis();
//!
//!     let mut map = BitMapConfig::with_capacity(3000)
//!         .with_memory_limit_bytes(1024)
//!         .build()?;
//!     map.add(59)?;
//!     map.add(72)?;
//!
//!     assert!(map.has(59)?);
//!     assert!(!map.has(8)?);
//!     println!("built in {}ms", clock::elapsed_millis(start));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

// Re-export the core bit map and its supporting types
pub use bitmap_core::{
    // Bit map
    BitMap, Plan, WordWidth,
    // Input validation
    parse_capacity, Capacity,
    // Error handling
    BitMapError, ErrorCategory, Result,
};

pub mod clock;
pub mod config;

pub use clock::{elapsed_millis, monotonic_millis, monotonic_secs};
pub use config::{BitMapConfig, ConfigError};
