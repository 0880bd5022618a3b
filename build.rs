use std::env;

/// Storage region size used when `EEPROM_KV_SIZE` is not set
const DEFAULT_SIZE: usize = 1024;

fn main() {
    println!("cargo:rerun-if-env-changed=EEPROM_KV_SIZE");

    // Region size in bytes for config::DEFAULT_CAPACITY
    let size = match env::var("EEPROM_KV_SIZE") {
        Ok(raw) => match raw.trim().parse::<usize>() {
            Ok(size) if size > 0 => {
                println!("cargo:warning=Using EEPROM_KV_SIZE from environment: {}", size);
                size
            }
            _ => panic!("EEPROM_KV_SIZE must be a positive integer, got {:?}", raw),
        },
        Err(_) => DEFAULT_SIZE,
    };

    println!("cargo:rustc-env=EEPROM_KV_SIZE={}", size);
}
