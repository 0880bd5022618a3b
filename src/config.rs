//! Capacity configuration
//!
//! The storage region size is fixed at compile time. `DEFAULT_CAPACITY` is
//! taken from the `EEPROM_KV_SIZE` environment variable at build time
//! (validated by `build.rs`, 1024 bytes when unset). Boards with a known
//! EEPROM size can use one of the presets instead.
//!
//! The capacity must not exceed the physical size of the device; opening a
//! storage session larger than the device fails with
//! `EepromError::InvalidSize`.
//!
//! `KeyValueStore::begin` reads the region into a `heapless::Vec<u8, N>`,
//! so loading needs about `N` bytes of stack on top of the heap-allocated
//! document: 4 KB with the ESP / ATmega2560 presets. Size task stacks
//! accordingly.

/// Region size selected at build time (`EEPROM_KV_SIZE`)
pub const DEFAULT_CAPACITY: usize = parse_capacity(env!("EEPROM_KV_SIZE"));

/// ESP8266 / ESP32 flash-emulated EEPROM
pub const ESP_CAPACITY: usize = 4096;

/// ATmega1280 / ATmega2560 (Arduino Mega)
pub const ATMEGA2560_CAPACITY: usize = 4096;

/// ATmega328P / ATmega32U4 (Arduino Uno, Leonardo)
pub const ATMEGA328P_CAPACITY: usize = 1024;

/// ATmega168
pub const ATMEGA168_CAPACITY: usize = 512;

/// Parse a decimal capacity at compile time
const fn parse_capacity(raw: &str) -> usize {
    let bytes = raw.as_bytes();
    let mut value = 0usize;
    let mut i = 0;
    while i < bytes.len() {
        let digit = bytes[i];
        assert!(digit.is_ascii_digit(), "EEPROM_KV_SIZE must be decimal");
        value = value * 10 + (digit - b'0') as usize;
        i += 1;
    }
    assert!(value > 0, "EEPROM_KV_SIZE must be positive");
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_capacity() {
        assert_eq!(parse_capacity("1024"), 1024);
        assert_eq!(parse_capacity("64"), 64);
        assert_eq!(parse_capacity("4096"), 4096);
    }

    #[test]
    fn test_default_capacity_positive() {
        assert!(DEFAULT_CAPACITY > 0);
    }
}
