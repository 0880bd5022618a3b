//! Key-value store facade
//!
//! `KeyValueStore` owns the in-memory document and the storage device.
//!
//! # Storage Image Format
//!
//! ```text
//! ┌──────────────────────────────┬──────┬─────────────────────┐
//! │ Encoded document (JSON text) │ 0x00 │ stale / unused      │
//! └──────────────────────────────┴──────┴─────────────────────┘
//!  0                            len    len+1                 N
//! ```
//!
//! There is no length header: reading stops at the first null byte or at
//! `N`. When the document is exactly `N` bytes long no terminator is
//! written. Bytes after the terminator are left from earlier writes.
//!
//! # Lifecycle
//!
//! `NotStarted` → `begin()` → `Started`. Only the first `begin` reads
//! storage. Changes stay in RAM until `apply()`; nothing is saved on drop.

use super::codec::{CodecError, DocumentCodec, JsonCodec};
use super::convert::FromValue;
use super::document::Document;
use super::error::StoreError;
use super::value::Value;
use crate::platform::{EepromInterface, PlatformError};
use crate::{log_debug, log_error, log_info, log_warn};

/// End-of-data marker
const TERMINATOR: u8 = 0x00;

/// Store lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreState {
    /// `begin` has not loaded storage yet
    NotStarted,
    /// Storage was read once; further `begin` calls are no-ops
    Started,
}

/// What `begin` did
///
/// Informational only; every outcome leaves the store usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BeginOutcome {
    /// Document decoded from storage
    Loaded {
        /// Top-level keys loaded
        entries: usize,
        /// Bytes of encoded text read
        bytes: usize,
    },
    /// Storage held no usable document; started empty
    Empty(CodecError),
    /// Store was already started; nothing read
    AlreadyStarted,
    /// Storage could not be read; document is empty and the store stays
    /// `NotStarted` so a later `begin` retries
    StorageUnavailable(PlatformError),
}

/// Persistent key-value store over a fixed `N`-byte storage region
///
/// # Example
///
/// ```ignore
/// use eeprom_kv::store::KeyValueStore;
///
/// let mut store: KeyValueStore<_, 512> = KeyValueStore::new(eeprom);
/// store.begin();
///
/// if !store.exists("ssid") {
///     store.set("ssid", "MyNetwork");
///     store.set("channel", 6);
///     store.apply()?;
/// }
/// let channel: u8 = store.get("channel");
/// ```
pub struct KeyValueStore<E, const N: usize, C = JsonCodec> {
    /// Storage device
    eeprom: E,
    /// Document serializer
    codec: C,
    /// In-memory document
    document: Document,
    /// Lifecycle state
    state: StoreState,
    /// Document changed since last load/apply/erase
    dirty: bool,
}

impl<E: EepromInterface, const N: usize> KeyValueStore<E, N, JsonCodec> {
    /// Create a store using the JSON codec
    pub fn new(eeprom: E) -> Self {
        Self::with_codec(eeprom, JsonCodec::new())
    }
}

impl<E: EepromInterface, const N: usize, C: DocumentCodec> KeyValueStore<E, N, C> {
    /// Storage region size in bytes
    pub const CAPACITY: usize = N;

    /// Create a store with an explicit codec
    pub fn with_codec(eeprom: E, codec: C) -> Self {
        Self {
            eeprom,
            codec,
            document: Document::new(),
            state: StoreState::NotStarted,
            dirty: false,
        }
    }

    /// Load the document from storage
    ///
    /// Reads at most `N` bytes, stopping at the first null byte, and decodes
    /// them. Undecodable data (fresh device, corruption, foreign content) is
    /// treated as "no data": the document starts empty. Never fails; the
    /// outcome is returned for diagnostics.
    pub fn begin(&mut self) -> BeginOutcome {
        if self.state == StoreState::Started {
            return BeginOutcome::AlreadyStarted;
        }

        let image = match self.read_image() {
            Ok(image) => image,
            Err(e) => {
                log_error!("kv: storage unavailable: {}", e);
                self.document.clear();
                return BeginOutcome::StorageUnavailable(e);
            }
        };

        self.state = StoreState::Started;
        self.dirty = false;

        match self.codec.decode(&image) {
            Ok(document) => {
                self.document = document;
                log_info!(
                    "kv: loaded {} keys ({} bytes)",
                    self.document.len(),
                    image.len()
                );
                BeginOutcome::Loaded {
                    entries: self.document.len(),
                    bytes: image.len(),
                }
            }
            Err(CodecError::Empty) => {
                log_info!("kv: no stored data, starting empty");
                self.document.clear();
                BeginOutcome::Empty(CodecError::Empty)
            }
            Err(e) => {
                log_warn!("kv: stored data unusable ({}), starting empty", e);
                self.document.clear();
                BeginOutcome::Empty(e)
            }
        }
    }

    /// Empty the document; with `erase_storage`, also zero the whole region
    ///
    /// Does not call `apply`. The erase is written and committed immediately.
    pub fn clear(&mut self, erase_storage: bool) -> Result<(), StoreError> {
        if !self.document.is_empty() {
            self.dirty = true;
        }
        self.document.clear();

        if erase_storage {
            self.session(|eeprom| {
                for address in 0..N {
                    eeprom.write(address, TERMINATOR)?;
                }
                Ok(())
            })?;
            self.dirty = false;
            log_info!("kv: erased {} bytes", N);
        }
        Ok(())
    }

    /// Remove `key`; absent keys are ignored
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let removed = self.document.remove(key);
        if removed.is_some() {
            self.dirty = true;
        }
        removed
    }

    /// True if `key` is present
    pub fn exists(&self, key: &str) -> bool {
        self.document.contains_key(key)
    }

    /// Read `key` as `T`
    ///
    /// Returns `T::default()` when the key is absent or its value does not
    /// convert to `T`. Use [`try_get`](Self::try_get) or
    /// [`exists`](Self::exists) when that difference matters.
    pub fn get<T: FromValue + Default>(&self, key: &str) -> T {
        self.try_get(key).unwrap_or_default()
    }

    /// Read `key` as `T`, `None` if absent or not convertible
    pub fn try_get<T: FromValue>(&self, key: &str) -> Option<T> {
        self.document.get(key).and_then(T::from_value)
    }

    /// Raw stored value
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.document.get(key)
    }

    /// Insert or overwrite `key`
    pub fn set<T: Into<Value>>(&mut self, key: &str, value: T) {
        self.document.insert(key, value.into());
        self.dirty = true;
    }

    /// Write the document to storage
    ///
    /// Encodes the whole document and rewrites the region from offset 0,
    /// followed by a terminator when shorter than `N`. Returns the number of
    /// document bytes written.
    ///
    /// # Errors
    ///
    /// - `StoreError::CapacityExceeded` if the encoding is longer than `N`;
    ///   storage is not touched
    /// - `StoreError::EmbeddedNul` if the codec emitted a null byte
    /// - `StoreError::Platform` if the device fails mid-write
    pub fn apply(&mut self) -> Result<usize, StoreError> {
        let encoded = self.codec.encode(&self.document)?;

        if encoded.len() > N {
            log_error!(
                "kv: document needs {} bytes, region holds {}",
                encoded.len(),
                N
            );
            return Err(StoreError::CapacityExceeded {
                required: encoded.len(),
                capacity: N,
            });
        }
        if encoded.contains(&TERMINATOR) {
            return Err(StoreError::EmbeddedNul);
        }

        self.session(|eeprom| {
            for (address, &byte) in encoded.iter().enumerate() {
                eeprom.write(address, byte)?;
            }
            if encoded.len() < N {
                eeprom.write(encoded.len(), TERMINATOR)?;
            }
            Ok(())
        })?;

        self.dirty = false;
        log_debug!("kv: wrote {} of {} bytes", encoded.len(), N);
        Ok(encoded.len())
    }

    /// Size `apply` would write, in bytes (excluding the terminator)
    pub fn encoded_len(&self) -> Result<usize, StoreError> {
        Ok(self.codec.encode(&self.document)?.len())
    }

    /// Bytes left before `apply` would fail
    pub fn remaining(&self) -> Result<usize, StoreError> {
        Ok(N.saturating_sub(self.encoded_len()?))
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    pub fn is_started(&self) -> bool {
        self.state == StoreState::Started
    }

    /// True if the document changed since it was loaded, applied or erased
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn len(&self) -> usize {
        self.document.len()
    }

    pub fn is_empty(&self) -> bool {
        self.document.is_empty()
    }

    /// Top-level keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.document.keys()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn capacity(&self) -> usize {
        N
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Get storage device reference (for testing)
    pub fn eeprom(&self) -> &E {
        &self.eeprom
    }

    /// Get mutable storage device reference (for testing)
    pub fn eeprom_mut(&mut self) -> &mut E {
        &mut self.eeprom
    }

    /// Release the storage device; unsaved changes are dropped
    pub fn into_inner(self) -> E {
        self.eeprom
    }

    /// Read the region up to the first terminator
    ///
    /// The image lives on the stack and takes up to `N` bytes.
    fn read_image(&mut self) -> Result<heapless::Vec<u8, N>, PlatformError> {
        self.session(|eeprom| {
            let mut image = heapless::Vec::<u8, N>::new();
            for address in 0..N {
                let byte = eeprom.read(address)?;
                if byte == TERMINATOR {
                    break;
                }
                // At most N bytes are read, so the buffer cannot overflow
                if image.push(byte).is_err() {
                    break;
                }
            }
            Ok(image)
        })
    }

    /// Run `f` inside one storage session
    ///
    /// The session is closed even when `f` fails; the first error wins.
    fn session<R>(
        &mut self,
        f: impl FnOnce(&mut E) -> Result<R, PlatformError>,
    ) -> Result<R, PlatformError> {
        self.eeprom.begin(N)?;
        let result = f(&mut self.eeprom);
        let end = self.eeprom.end();
        let value = result?;
        end?;
        Ok(value)
    }
}
