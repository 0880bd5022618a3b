#![cfg_attr(not(test), no_std)]

//! eeprom_kv - Persistent key-value store for small non-volatile regions
//!
//! Firmware keeps a structured document of named, typed values in RAM and
//! persists it as compact JSON into a fixed-size EEPROM region. The stored
//! image is the encoded document followed by a single null terminator.
//!
//! # Modules
//!
//! - [`store`]: `KeyValueStore` facade, `Value`/`Document` types and the codec
//! - [`platform`]: storage traits (EEPROM, Flash), flash-backed EEPROM emulation
//!   and in-memory mock devices
//! - [`config`]: compile-time capacity configuration
//! - [`logging`]: `log_*!` macros (defmt on target, println in unit tests)
//!
//! # Example
//!
//! ```ignore
//! use eeprom_kv::store::KeyValueStore;
//!
//! let mut store: KeyValueStore<_, 1024> = KeyValueStore::new(eeprom);
//! store.begin();
//!
//! let boots: u32 = store.get("boots");
//! store.set("boots", boots + 1);
//! store.apply()?;
//! ```

extern crate alloc;

// Logging macros (log_info!, log_warn!, ...) are exported at crate root
pub mod logging;

// Compile-time capacity configuration
pub mod config;

// Storage device abstraction and implementations
pub mod platform;

// Key-value store over a storage device
pub mod store;

pub use config::DEFAULT_CAPACITY;
pub use store::{BeginOutcome, Document, KeyValueStore, StoreError, StoreState, Value};
