//! EEPROM interface trait
//!
//! Byte-addressable non-volatile storage as exposed by AVR EEPROM and the
//! flash-emulated EEPROM of ESP-class chips.

use crate::platform::Result;

/// EEPROM interface trait
///
/// Accesses happen inside a session: `begin` opens it over the first `size`
/// bytes, `read`/`write` address single bytes inside it, and `end` commits
/// the writes and closes it. On devices with real EEPROM `begin`/`end` may do
/// nothing; on flash-emulated devices `end` is when data becomes durable.
///
/// # Safety Invariants
///
/// - Only one session open at a time
/// - Only one owner per instance (no concurrent access)
pub trait EepromInterface {
    /// Open a session over bytes `0..size`
    ///
    /// # Errors
    ///
    /// Returns `EepromError::InvalidSize` if `size` exceeds `capacity()`.
    /// Returns `EepromError::AlreadyOpen` if a session is open.
    fn begin(&mut self, size: usize) -> Result<()>;

    /// Read one byte
    ///
    /// # Errors
    ///
    /// Returns `EepromError::NotOpen` outside a session and
    /// `EepromError::InvalidAddress` past the session size.
    fn read(&mut self, address: usize) -> Result<u8>;

    /// Write one byte
    ///
    /// # Errors
    ///
    /// Same as [`read`](Self::read), plus `EepromError::WriteFailed`.
    fn write(&mut self, address: usize, value: u8) -> Result<()>;

    /// Commit pending writes and close the session
    fn end(&mut self) -> Result<()>;

    /// Physical size in bytes
    fn capacity(&self) -> usize;
}

impl<T: EepromInterface + ?Sized> EepromInterface for &mut T {
    fn begin(&mut self, size: usize) -> Result<()> {
        T::begin(self, size)
    }

    fn read(&mut self, address: usize) -> Result<u8> {
        T::read(self, address)
    }

    fn write(&mut self, address: usize, value: u8) -> Result<()> {
        T::write(self, address, value)
    }

    fn end(&mut self) -> Result<()> {
        T::end(self)
    }

    fn capacity(&self) -> usize {
        T::capacity(self)
    }
}
