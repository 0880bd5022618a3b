//! Mock storage devices for testing
//!
//! In-memory implementations of the platform traits for unit tests and
//! host-side simulation.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled

#![cfg(any(test, feature = "mock"))]

mod eeprom;
mod flash;

pub use eeprom::MockEeprom;
pub use flash::{MockFlash, DEFAULT_BLOCK_SIZE};
