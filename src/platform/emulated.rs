//! EEPROM emulation on a flash sector
//!
//! Chips without EEPROM reserve a flash region and mirror it in RAM, the
//! way the ESP8266/ESP32 Arduino cores implement `EEPROM.begin()` /
//! `EEPROM.commit()`:
//!
//! - `begin(size)` copies the first `size` bytes of the region into a RAM cache
//! - `read`/`write` operate on the cache only
//! - `end()` erases and reprograms the region if any byte changed, then
//!   releases the cache
//!
//! # Example
//!
//! ```ignore
//! use eeprom_kv::platform::FlashEeprom;
//! use eeprom_kv::store::KeyValueStore;
//!
//! // Last 4 KB sector of a 2 MB flash
//! let eeprom = FlashEeprom::new(flash, 0x1F_F000, 4096)?;
//! let mut store: KeyValueStore<_, 4096> = KeyValueStore::new(eeprom);
//! store.begin();
//! ```

use crate::platform::error::{EepromError, PlatformError};
use crate::platform::traits::{EepromInterface, FlashInterface};
use crate::platform::Result;
use alloc::vec;
use alloc::vec::Vec;

/// Flash-backed EEPROM
pub struct FlashEeprom<F: FlashInterface> {
    /// Flash interface
    flash: F,
    /// Region start (block-aligned)
    base: u32,
    /// Region size (multiple of the block size)
    size: u32,
    /// RAM mirror of the open session, empty when closed
    cache: Vec<u8>,
    /// Session open flag
    open: bool,
    /// Cache differs from flash
    dirty: bool,
}

impl<F: FlashInterface> FlashEeprom<F> {
    /// Create an emulated EEPROM over `size` bytes of flash at `base`
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::InvalidConfig` if the region is empty, not
    /// block-aligned, or extends past the end of the flash.
    pub fn new(flash: F, base: u32, size: u32) -> Result<Self> {
        let block = flash.block_size();
        let in_bounds = base
            .checked_add(size)
            .is_some_and(|end| end <= flash.capacity());

        if size == 0 || block == 0 || base % block != 0 || size % block != 0 || !in_bounds {
            return Err(PlatformError::InvalidConfig);
        }

        Ok(Self {
            flash,
            base,
            size,
            cache: Vec::new(),
            open: false,
            dirty: false,
        })
    }

    /// Get Flash interface reference (for testing)
    pub fn flash(&self) -> &F {
        &self.flash
    }

    /// Get mutable Flash interface reference (for testing)
    pub fn flash_mut(&mut self) -> &mut F {
        &mut self.flash
    }

    /// True while a session is open
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Release the flash interface
    pub fn into_inner(self) -> F {
        self.flash
    }

    /// Reprogram the region from the cache
    ///
    /// Bytes of the region past the cache keep their previous contents.
    fn commit(&mut self) -> Result<()> {
        let mut image = vec![0xFF; self.size as usize];
        self.flash.read(self.base, &mut image)?;
        image[..self.cache.len()].copy_from_slice(&self.cache);

        self.flash.erase(self.base, self.size)?;
        self.flash.write(self.base, &image)
    }

    fn check_access(&self, address: usize) -> Result<()> {
        if !self.open {
            return Err(EepromError::NotOpen.into());
        }
        if address >= self.cache.len() {
            return Err(EepromError::InvalidAddress.into());
        }
        Ok(())
    }
}

impl<F: FlashInterface> EepromInterface for FlashEeprom<F> {
    fn begin(&mut self, size: usize) -> Result<()> {
        if self.open {
            return Err(EepromError::AlreadyOpen.into());
        }
        if size > self.size as usize {
            return Err(EepromError::InvalidSize.into());
        }

        let mut cache = vec![0u8; size];
        self.flash.read(self.base, &mut cache)?;

        self.cache = cache;
        self.open = true;
        self.dirty = false;
        Ok(())
    }

    fn read(&mut self, address: usize) -> Result<u8> {
        self.check_access(address)?;
        Ok(self.cache[address])
    }

    fn write(&mut self, address: usize, value: u8) -> Result<()> {
        self.check_access(address)?;
        if self.cache[address] != value {
            self.cache[address] = value;
            self.dirty = true;
        }
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        if !self.open {
            return Err(EepromError::NotOpen.into());
        }

        let result = if self.dirty {
            crate::log_debug!("flash eeprom: committing {} bytes", self.cache.len());
            self.commit()
                .map_err(|_| PlatformError::Eeprom(EepromError::CommitFailed))
        } else {
            crate::log_trace!("flash eeprom: nothing to commit");
            Ok(())
        };

        self.cache = Vec::new();
        self.open = false;
        self.dirty = false;
        result
    }

    fn capacity(&self) -> usize {
        self.size as usize
    }
}
