//! Mock EEPROM implementation for testing
//!
//! Provides in-memory EEPROM simulation for unit tests and host simulation.

use crate::platform::{error::EepromError, traits::EepromInterface, Result};
use alloc::vec;
use alloc::vec::Vec;

/// Erased EEPROM cell value
const ERASED: u8 = 0xFF;

/// Mock EEPROM implementation
///
/// Simulates a byte-addressable EEPROM in memory. Supports:
/// - Session bracketing checks (`begin`/`end` pairing, bounds per session)
/// - Access counters for verifying how the device was driven
/// - Corruption injection for testing recovery
/// - Write failure injection
///
/// # Example
///
/// ```ignore
/// use eeprom_kv::platform::mock::MockEeprom;
/// use eeprom_kv::platform::traits::EepromInterface;
///
/// let mut eeprom = MockEeprom::new(64);
///
/// eeprom.begin(64).unwrap();
/// eeprom.write(0, b'{').unwrap();
/// eeprom.end().unwrap();
///
/// assert_eq!(eeprom.contents()[0], b'{');
/// assert_eq!(eeprom.commit_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockEeprom {
    /// Cell contents
    storage: Vec<u8>,
    /// Size of the open session, if any
    session: Option<usize>,
    /// Number of sessions opened
    begin_count: u32,
    /// Number of sessions committed
    commit_count: u32,
    /// Number of byte reads
    read_count: u32,
    /// Number of byte writes
    write_count: u32,
    /// Fail every write while set
    fail_writes: bool,
}

impl MockEeprom {
    /// Create a factory-fresh device (all cells 0xFF)
    pub fn new(capacity: usize) -> Self {
        Self::filled(capacity, ERASED)
    }

    /// Create a device with all cells set to zero
    pub fn zeroed(capacity: usize) -> Self {
        Self::filled(capacity, 0x00)
    }

    /// Create a device with all cells set to `value`
    pub fn filled(capacity: usize, value: u8) -> Self {
        Self {
            storage: vec![value; capacity],
            session: None,
            begin_count: 0,
            commit_count: 0,
            read_count: 0,
            write_count: 0,
            fail_writes: false,
        }
    }

    /// Create a device preloaded with `image` (rest zero)
    pub fn with_contents(capacity: usize, image: &[u8]) -> Self {
        let mut eeprom = Self::zeroed(capacity);
        eeprom.inject(0, image);
        eeprom
    }

    /// Get cell contents (for test verification)
    pub fn contents(&self) -> &[u8] {
        &self.storage
    }

    /// Overwrite cells directly, bypassing sessions
    ///
    /// Bytes past the end of the device are dropped.
    pub fn inject(&mut self, address: usize, data: &[u8]) {
        for (cell, &byte) in self.storage.iter_mut().skip(address).zip(data) {
            *cell = byte;
        }
    }

    /// Inject corruption at address (for testing error recovery)
    pub fn inject_corruption(&mut self, address: usize, len: usize) {
        for cell in self.storage.iter_mut().skip(address).take(len) {
            *cell = 0xAA; // Corrupt pattern
        }
    }

    /// Make every subsequent write fail (or succeed again)
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// True while a session is open
    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    /// Number of sessions opened
    pub fn begin_count(&self) -> u32 {
        self.begin_count
    }

    /// Number of sessions committed
    pub fn commit_count(&self) -> u32 {
        self.commit_count
    }

    /// Number of byte reads
    pub fn read_count(&self) -> u32 {
        self.read_count
    }

    /// Number of byte writes
    pub fn write_count(&self) -> u32 {
        self.write_count
    }

    /// Check that `address` falls inside the open session
    fn check_access(&self, address: usize) -> Result<()> {
        match self.session {
            None => Err(EepromError::NotOpen.into()),
            Some(size) if address >= size => Err(EepromError::InvalidAddress.into()),
            Some(_) => Ok(()),
        }
    }
}

impl EepromInterface for MockEeprom {
    fn begin(&mut self, size: usize) -> Result<()> {
        if self.session.is_some() {
            return Err(EepromError::AlreadyOpen.into());
        }
        if size > self.storage.len() {
            return Err(EepromError::InvalidSize.into());
        }

        self.session = Some(size);
        self.begin_count += 1;
        Ok(())
    }

    fn read(&mut self, address: usize) -> Result<u8> {
        self.check_access(address)?;
        self.read_count += 1;
        Ok(self.storage[address])
    }

    fn write(&mut self, address: usize, value: u8) -> Result<()> {
        self.check_access(address)?;
        if self.fail_writes {
            return Err(EepromError::WriteFailed.into());
        }

        self.storage[address] = value;
        self.write_count += 1;
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        if self.session.take().is_none() {
            return Err(EepromError::NotOpen.into());
        }
        self.commit_count += 1;
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.storage.len()
    }
}
