//! Adapter identity as reported by the graphics API

use std::fmt;

/// Four-part driver version, decoded from the packed form drivers report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DriverVersion {
    pub product: u16,
    pub version: u16,
    pub sub_version: u16,
    pub build: u16,
}

impl DriverVersion {
    /// Decode from the two packed 32-bit halves of a 64-bit driver version.
    pub fn from_packed(high: u32, low: u32) -> Self {
        Self {
            product: (high >> 16) as u16,
            version: (high & 0xFFFF) as u16,
            sub_version: (low >> 16) as u16,
            build: (low & 0xFFFF) as u16,
        }
    }

    /// The build number, the part driver-quality tables key on.
    #[inline]
    pub fn build(&self) -> u32 {
        u32::from(self.build)
    }
}

impl fmt::Display for DriverVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.product, self.version, self.sub_version, self.build
        )
    }
}

/// Identity of a display adapter, supplied once at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AdapterIdentity {
    /// PCI vendor ID.
    pub vendor_id: u32,
    /// PCI device ID, meaningful only within a vendor's ID space.
    pub device_id: u32,
    pub driver_version: DriverVersion,
    /// Driver binary filename, as reported by the OS.
    pub driver_name: String,
    /// Marketing name of the adapter.
    pub device_name: String,
}
