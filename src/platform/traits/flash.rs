//! Flash interface trait
//!
//! Chips without real EEPROM (ESP8266, ESP32, RP2040/RP2350, most STM32)
//! keep byte-addressable settings in a reserved flash sector instead. This
//! trait is the minimal flash surface `FlashEeprom` needs to do that.

use crate::platform::Result;

/// Flash interface trait
///
/// # Flash Characteristics
///
/// - Flash is organized in blocks (typically 4 KB)
/// - Erase operations set all bytes to 0xFF
/// - Write operations can only change bits from 1→0 (must erase first to reset to 1)
/// - Flash operations are blocking and can take 100ms+
///
/// # Safety Invariants
///
/// - Only one owner per Flash instance (no concurrent access)
/// - Must not erase/write the firmware image (implementations must validate addresses)
pub trait FlashInterface {
    /// Read `buf.len()` bytes starting at `address`
    ///
    /// # Errors
    ///
    /// Returns `FlashError::InvalidAddress` if the range is out of bounds.
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<()>;

    /// Write `data` starting at `address`
    ///
    /// The target range must have been erased first.
    ///
    /// # Errors
    ///
    /// Returns `FlashError::InvalidAddress` if the range is out of bounds.
    /// Returns `FlashError::WriteFailed` if the write operation fails.
    fn write(&mut self, address: u32, data: &[u8]) -> Result<()>;

    /// Erase `size` bytes starting at `address` (sets them to 0xFF)
    ///
    /// # Errors
    ///
    /// Returns `FlashError::InvalidAddress` if `address` or `size` is not
    /// block-aligned, or the range is out of bounds.
    fn erase(&mut self, address: u32, size: u32) -> Result<()>;

    /// Minimum erasable unit size
    fn block_size(&self) -> u32;

    /// Total Flash capacity in bytes
    fn capacity(&self) -> u32;
}
