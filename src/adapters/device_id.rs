//! Device identity derived from the ESP32 factory MAC address.
//!
//! The MAC gives two things:
//! - a short, human-readable name `SP-XXYYZZ` (last 3 MAC bytes, uppercase
//!   hex) used for the access point SSID and log banners;
//! - a 64-bit hardware identifier folded into the simulation seed, so two
//!   boards booted at the same instant still diverge.

use core::fmt::Write;

/// Fixed-size device name: "SP-XXYYZZ".
pub type DeviceIdString = heapless::String<16>;

/// Full 6-byte MAC address.
pub type MacAddress = [u8; 6];

/// Read the factory MAC address from eFuse.
#[cfg(target_os = "espidf")]
pub fn read_mac() -> MacAddress {
    let mut mac: MacAddress = [0u8; 6];
    unsafe {
        esp_idf_svc::sys::esp_efuse_mac_get_default(mac.as_mut_ptr());
    }
    mac
}

/// Simulation: a fixed fake MAC.
#[cfg(not(target_os = "espidf"))]
pub fn read_mac() -> MacAddress {
    [0x24, 0x6F, 0x28, 0x5C, 0x01, 0x9E]
}

/// `SP-XXYYZZ` from the last 3 MAC bytes.
pub fn device_id(mac: &MacAddress) -> DeviceIdString {
    let mut id = DeviceIdString::new();
    let _ = write!(id, "SP-{:02X}{:02X}{:02X}", mac[3], mac[4], mac[5]);
    id
}

/// The MAC as a big-endian integer (upper 16 bits zero).
pub fn hardware_id(mac: &MacAddress) -> u64 {
    mac.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b))
}
