//! Vendor and device-family classification
//!
//! Numeric hardware IDs map to symbolic tags through static tables. The lookup
//! routine is generic; supporting a new vendor or device means extending the
//! data, not adding branches.

/// GPU vendor tag derived from the PCI vendor ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Vendor {
    #[default]
    Unknown,
    Nvidia,
    Amd,
    Intel,
    S3,
    PowerVr,
    Matrox,
    ThreeDfx,
    ThreeDLabs,
    CirrusLogic,
    Rendition,
}

impl Vendor {
    /// Classify a PCI vendor ID. Total: IDs outside the table are `Unknown`.
    ///
    /// IDs are compared for exact equality only; there is no partial matching.
    pub fn from_pci_id(vendor_id: u32) -> Vendor {
        VENDOR_TABLE
            .iter()
            .find(|(id, _)| *id == vendor_id)
            .map(|(_, vendor)| *vendor)
            .unwrap_or(Vendor::Unknown)
    }

    /// Display name used in diagnostic reports.
    pub fn name(self) -> &'static str {
        match self {
            Vendor::Unknown => "Unknown vendor",
            Vendor::Nvidia => "NVIDIA",
            Vendor::Amd => "AMD/ATI",
            Vendor::Intel => "Intel",
            Vendor::S3 => "S3",
            Vendor::PowerVr => "PowerVR",
            Vendor::Matrox => "Matrox",
            Vendor::ThreeDfx => "3Dfx",
            Vendor::ThreeDLabs => "3DLabs",
            Vendor::CirrusLogic => "Cirrus Logic",
            Vendor::Rendition => "Rendition",
        }
    }
}

/// Device-family tag within a vendor's product line.
///
/// Families are `'static` table entries; profiles hold references into the
/// tables rather than owned copies.
#[derive(Debug, PartialEq, Eq)]
pub struct DeviceFamily {
    pub vendor: Vendor,
    pub name: &'static str,
}

/// Sentinel for adapters whose vendor could not be classified.
pub static UNKNOWN_DEVICE: DeviceFamily = DeviceFamily {
    vendor: Vendor::Unknown,
    name: "Unknown device",
};

struct VendorDevices {
    vendor: Vendor,
    devices: &'static [(u32, &'static DeviceFamily)],
    /// Per-vendor sentinel for device IDs missing from the table. Distinct
    /// from [`UNKNOWN_DEVICE`] so "new NVIDIA part" and "no idea at all" stay
    /// distinguishable downstream.
    unknown: &'static DeviceFamily,
}

/// Classify a device ID within an already classified vendor.
///
/// Unknown device IDs under a known vendor yield that vendor's own unknown
/// sentinel; only an unknown vendor yields the process-wide [`UNKNOWN_DEVICE`].
pub fn classify_device(vendor: Vendor, device_id: u32) -> &'static DeviceFamily {
    let Some(table) = DEVICE_TABLES.iter().find(|t| t.vendor == vendor) else {
        return &UNKNOWN_DEVICE;
    };
    table
        .devices
        .iter()
        .find(|(id, _)| *id == device_id)
        .map(|(_, family)| *family)
        .unwrap_or(table.unknown)
}

// PCI vendor IDs. Historical vendors kept because their driver-status and
// override tables are still keyed on them.
static VENDOR_TABLE: &[(u32, Vendor)] = &[
    (0x10DE, Vendor::Nvidia),
    (0x12D2, Vendor::Nvidia), // NVIDIA/SGS-Thomson joint parts
    (0x1002, Vendor::Amd),
    (0x8086, Vendor::Intel),
    (0x5333, Vendor::S3),
    (0x104A, Vendor::PowerVr), // STMicro-manufactured Kyro boards
    (0x102B, Vendor::Matrox),
    (0x121A, Vendor::ThreeDfx),
    (0x3D3D, Vendor::ThreeDLabs),
    (0x1013, Vendor::CirrusLogic),
    (0x1163, Vendor::Rendition),
];

macro_rules! family {
    ($name:ident, $vendor:ident, $display:expr) => {
        pub static $name: DeviceFamily = DeviceFamily {
            vendor: Vendor::$vendor,
            name: $display,
        };
    };
}

family!(NVIDIA_UNKNOWN, Nvidia, "Unknown NVIDIA device");
family!(NVIDIA_RIVA_TNT, Nvidia, "RIVA TNT");
family!(NVIDIA_RIVA_TNT2, Nvidia, "RIVA TNT2");
family!(NVIDIA_GEFORCE_256, Nvidia, "GeForce 256");
family!(NVIDIA_GEFORCE2, Nvidia, "GeForce2");
family!(NVIDIA_GEFORCE3, Nvidia, "GeForce3");
family!(NVIDIA_GEFORCE4_TI, Nvidia, "GeForce4 Ti");

family!(AMD_UNKNOWN, Amd, "Unknown ATI device");
family!(AMD_RAGE_128, Amd, "Rage 128");
family!(AMD_RADEON_7000, Amd, "Radeon 7000");
family!(AMD_RADEON_8500, Amd, "Radeon 8500");
family!(AMD_RADEON_9700, Amd, "Radeon 9700");

family!(INTEL_UNKNOWN, Intel, "Unknown Intel device");
family!(INTEL_I810, Intel, "i810");
family!(INTEL_I815, Intel, "i815");
family!(INTEL_I845, Intel, "i845G");

family!(S3_UNKNOWN, S3, "Unknown S3 device");
family!(S3_SAVAGE4, S3, "Savage4");
family!(S3_SAVAGE_2000, S3, "Savage 2000");

family!(POWERVR_UNKNOWN, PowerVr, "Unknown PowerVR device");
family!(POWERVR_KYRO, PowerVr, "Kyro");

family!(MATROX_UNKNOWN, Matrox, "Unknown Matrox device");
family!(MATROX_G200, Matrox, "G200");
family!(MATROX_G400, Matrox, "G400");
family!(MATROX_PARHELIA, Matrox, "Parhelia");

family!(THREEDFX_UNKNOWN, ThreeDfx, "Unknown 3Dfx device");
family!(THREEDFX_BANSHEE, ThreeDfx, "Voodoo Banshee");
family!(THREEDFX_VOODOO3, ThreeDfx, "Voodoo3");
family!(THREEDFX_VOODOO5, ThreeDfx, "Voodoo4/5");

family!(THREEDLABS_UNKNOWN, ThreeDLabs, "Unknown 3DLabs device");
family!(THREEDLABS_PERMEDIA2, ThreeDLabs, "Permedia 2");
family!(THREEDLABS_PERMEDIA3, ThreeDLabs, "Permedia 3");

family!(CIRRUSLOGIC_UNKNOWN, CirrusLogic, "Unknown Cirrus Logic device");
family!(CIRRUSLOGIC_LAGUNA, CirrusLogic, "Laguna 3D");

family!(RENDITION_UNKNOWN, Rendition, "Unknown Rendition device");
family!(RENDITION_VERITE_2X00, Rendition, "Verite 2x00");

static DEVICE_TABLES: &[VendorDevices] = &[
    VendorDevices {
        vendor: Vendor::Nvidia,
        devices: &[
            (0x0020, &NVIDIA_RIVA_TNT),
            (0x0028, &NVIDIA_RIVA_TNT2),
            (0x0100, &NVIDIA_GEFORCE_256),
            (0x0150, &NVIDIA_GEFORCE2),
            (0x0200, &NVIDIA_GEFORCE3),
            (0x0250, &NVIDIA_GEFORCE4_TI),
        ],
        unknown: &NVIDIA_UNKNOWN,
    },
    VendorDevices {
        vendor: Vendor::Amd,
        devices: &[
            (0x5246, &AMD_RAGE_128),
            (0x5159, &AMD_RADEON_7000),
            (0x514C, &AMD_RADEON_8500),
            (0x4E44, &AMD_RADEON_9700),
        ],
        unknown: &AMD_UNKNOWN,
    },
    VendorDevices {
        vendor: Vendor::Intel,
        devices: &[
            (0x7121, &INTEL_I810),
            (0x1132, &INTEL_I815),
            (0x2562, &INTEL_I845),
        ],
        unknown: &INTEL_UNKNOWN,
    },
    VendorDevices {
        vendor: Vendor::S3,
        devices: &[(0x8A22, &S3_SAVAGE4), (0x9102, &S3_SAVAGE_2000)],
        unknown: &S3_UNKNOWN,
    },
    VendorDevices {
        vendor: Vendor::PowerVr,
        devices: &[(0x0010, &POWERVR_KYRO)],
        unknown: &POWERVR_UNKNOWN,
    },
    VendorDevices {
        vendor: Vendor::Matrox,
        devices: &[
            (0x0521, &MATROX_G200),
            (0x0525, &MATROX_G400),
            (0x0527, &MATROX_PARHELIA),
        ],
        unknown: &MATROX_UNKNOWN,
    },
    VendorDevices {
        vendor: Vendor::ThreeDfx,
        devices: &[
            (0x0003, &THREEDFX_BANSHEE),
            (0x0005, &THREEDFX_VOODOO3),
            (0x0009, &THREEDFX_VOODOO5),
        ],
        unknown: &THREEDFX_UNKNOWN,
    },
    VendorDevices {
        vendor: Vendor::ThreeDLabs,
        devices: &[
            (0x0007, &THREEDLABS_PERMEDIA2),
            (0x000A, &THREEDLABS_PERMEDIA3),
        ],
        unknown: &THREEDLABS_UNKNOWN,
    },
    VendorDevices {
        vendor: Vendor::CirrusLogic,
        devices: &[(0x00D6, &CIRRUSLOGIC_LAGUNA)],
        unknown: &CIRRUSLOGIC_UNKNOWN,
    },
    VendorDevices {
        vendor: Vendor::Rendition,
        devices: &[(0x2000, &RENDITION_VERITE_2X00)],
        unknown: &RENDITION_UNKNOWN,
    },
];
