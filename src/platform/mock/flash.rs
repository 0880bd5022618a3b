//! Mock Flash implementation for testing
//!
//! Provides in-memory NOR flash simulation for exercising `FlashEeprom`.

use crate::platform::{error::FlashError, traits::FlashInterface, Result};
use alloc::vec;
use alloc::vec::Vec;

/// Default flash block size (4 KB)
pub const DEFAULT_BLOCK_SIZE: u32 = 4096;

/// Mock Flash implementation
///
/// Simulates NOR flash in memory:
/// - Erase sets whole blocks to 0xFF
/// - Writes can only clear bits (1→0)
/// - Erase counts are tracked per block
/// - Write/erase failure injection
#[derive(Debug, Clone)]
pub struct MockFlash {
    /// Flash storage (initialized to 0xFF - erased state)
    storage: Vec<u8>,
    /// Erase count per block
    erase_counts: Vec<u32>,
    /// Erase unit
    block_size: u32,
    /// Fail every write and erase while set
    fail_writes: bool,
}

impl MockFlash {
    /// Create an erased flash of `blocks` blocks of `block_size` bytes
    pub fn new(block_size: u32, blocks: u32) -> Self {
        Self {
            storage: vec![0xFF; (block_size * blocks) as usize],
            erase_counts: vec![0; blocks as usize],
            block_size,
            fail_writes: false,
        }
    }

    /// Get Flash contents (for test verification)
    pub fn get_contents(&self, address: u32, len: usize) -> &[u8] {
        &self.storage[address as usize..address as usize + len]
    }

    /// Inject corruption at address (for testing error recovery)
    pub fn inject_corruption(&mut self, address: u32, len: usize) {
        for cell in self.storage.iter_mut().skip(address as usize).take(len) {
            *cell = 0xAA;
        }
    }

    /// Make every subsequent write and erase fail (or succeed again)
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of times the block containing `address` was erased
    pub fn get_erase_count(&self, address: u32) -> u32 {
        self.erase_counts[(address / self.block_size) as usize]
    }

    /// Total erase count across all blocks
    pub fn get_total_erase_count(&self) -> u32 {
        self.erase_counts.iter().sum()
    }

    fn check_range(&self, address: u32, len: usize) -> Result<()> {
        if address as usize + len > self.storage.len() {
            return Err(FlashError::InvalidAddress.into());
        }
        Ok(())
    }
}

impl FlashInterface for MockFlash {
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<()> {
        self.check_range(address, buf.len())?;

        let start = address as usize;
        buf.copy_from_slice(&self.storage[start..start + buf.len()]);
        Ok(())
    }

    fn write(&mut self, address: u32, data: &[u8]) -> Result<()> {
        self.check_range(address, data.len())?;
        if self.fail_writes {
            return Err(FlashError::WriteFailed.into());
        }

        // Flash can only change bits from 1→0
        let start = address as usize;
        for (cell, &byte) in self.storage[start..start + data.len()].iter_mut().zip(data) {
            *cell &= byte;
        }
        Ok(())
    }

    fn erase(&mut self, address: u32, size: u32) -> Result<()> {
        if address % self.block_size != 0 || size % self.block_size != 0 {
            return Err(FlashError::InvalidAddress.into());
        }
        self.check_range(address, size as usize)?;
        if self.fail_writes {
            return Err(FlashError::EraseFailed.into());
        }

        let start = address as usize;
        self.storage[start..start + size as usize].fill(0xFF);

        let first_block = (address / self.block_size) as usize;
        let block_count = (size / self.block_size) as usize;
        for count in &mut self.erase_counts[first_block..first_block + block_count] {
            *count += 1;
        }
        Ok(())
    }

    fn block_size(&self) -> u32 {
        self.block_size
    }

    fn capacity(&self) -> u32 {
        self.storage.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::PlatformError;

    #[test]
    fn test_mock_flash_read_write() {
        let mut flash = MockFlash::new(DEFAULT_BLOCK_SIZE, 2);

        let data = [0x7B, 0x7D, 0x00];
        flash.write(0x1000, &data).unwrap();

        let mut buf = [0u8; 3];
        flash.read(0x1000, &mut buf).unwrap();
        assert_eq!(buf, data);
    }

    #[test]
    fn test_mock_flash_erase() {
        let mut flash = MockFlash::new(DEFAULT_BLOCK_SIZE, 2);

        flash.write(0, &[0x55; 256]).unwrap();
        flash.erase(0, DEFAULT_BLOCK_SIZE).unwrap();

        assert!(flash.get_contents(0, 256).iter().all(|&b| b == 0xFF));
        assert_eq!(flash.get_erase_count(0), 1);
        assert_eq!(flash.get_erase_count(DEFAULT_BLOCK_SIZE), 0);
        assert_eq!(flash.get_total_erase_count(), 1);
    }

    #[test]
    fn test_mock_flash_unaligned_erase() {
        let mut flash = MockFlash::new(DEFAULT_BLOCK_SIZE, 2);

        assert!(flash.erase(0x100, DEFAULT_BLOCK_SIZE).is_err());
        assert!(flash.erase(0, 1024).is_err());
        assert!(flash.erase(DEFAULT_BLOCK_SIZE, 2 * DEFAULT_BLOCK_SIZE).is_err());
    }

    #[test]
    fn test_mock_flash_out_of_bounds() {
        let mut flash = MockFlash::new(256, 1);

        let mut buf = [0u8; 4];
        assert!(flash.read(254, &mut buf).is_err());
        assert!(flash.write(256, &[0]).is_err());
    }

    #[test]
    fn test_mock_flash_write_failure() {
        let mut flash = MockFlash::new(256, 1);
        flash.write(0, &[0x0F]).unwrap();
        flash.set_fail_writes(true);

        assert_eq!(
            flash.write(0, &[0x00]),
            Err(PlatformError::Flash(FlashError::WriteFailed))
        );
        assert_eq!(
            flash.erase(0, 256),
            Err(PlatformError::Flash(FlashError::EraseFailed))
        );

        // Contents and erase counts untouched, reads still work
        assert_eq!(flash.get_contents(0, 1), &[0x0Fu8]);
        assert_eq!(flash.get_total_erase_count(), 0);

        flash.set_fail_writes(false);
        flash.erase(0, 256).unwrap();
        assert_eq!(flash.get_contents(0, 1), &[0xFFu8]);
    }

    #[test]
    fn test_mock_flash_inject_corruption() {
        let mut flash = MockFlash::new(256, 1);
        flash.inject_corruption(254, 8);
        assert_eq!(flash.get_contents(252, 4), &[0xFFu8, 0xFF, 0xAA, 0xAA]);
    }

    #[test]
    fn test_mock_flash_write_only_clears_bits() {
        let mut flash = MockFlash::new(256, 1);

        flash.write(0, &[0x0F]).unwrap();
        flash.write(0, &[0xFF]).unwrap();

        let mut buf = [0u8; 1];
        flash.read(0, &mut buf).unwrap();
        assert_eq!(buf[0], 0x0F);
    }
}
