//! Platform abstraction layer
//!
//! Storage device traits and the implementations shipped with the crate.
//! Board support code implements [`EepromInterface`] directly for real
//! EEPROM, or [`FlashInterface`] and wraps it in [`FlashEeprom`].

pub mod emulated;
pub mod error;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use emulated::FlashEeprom;
pub use error::{EepromError, FlashError, PlatformError, Result};
pub use traits::{EepromInterface, FlashInterface};
