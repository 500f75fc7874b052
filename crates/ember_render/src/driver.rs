//! Driver-quality classification
//!
//! Coarse quality tag for a driver build, derived from vendor-maintained
//! build-number ranges. Used to gate features that are known to misbehave on
//! specific driver generations.

use crate::vendor::Vendor;
use std::ops::RangeInclusive;

/// Quality classification of a driver build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DriverStatus {
    /// No data for this build. Absence of data is not evidence of a bad
    /// driver, so this is distinct from `Bad`.
    #[default]
    Unknown,
    Good,
    Acceptable,
    Bad,
}

impl DriverStatus {
    pub fn name(self) -> &'static str {
        match self {
            DriverStatus::Unknown => "unknown",
            DriverStatus::Good => "good",
            DriverStatus::Acceptable => "acceptable",
            DriverStatus::Bad => "known bad",
        }
    }
}

pub(crate) struct DriverRule {
    pub vendor: Vendor,
    /// `None` matches every device of the vendor.
    pub device_id: Option<u32>,
    pub builds: RangeInclusive<u32>,
    pub status: DriverStatus,
}

impl DriverRule {
    fn matches(&self, vendor: Vendor, device_id: u32, build: u32) -> bool {
        self.vendor == vendor
            && self.device_id.map_or(true, |id| id == device_id)
            && self.builds.contains(&build)
    }
}

/// Classify a driver build for a vendor/device pair.
///
/// Rules are scanned in table order and the last match wins, so a
/// device-specific range placed after a vendor-wide one refines it. Builds
/// outside every range classify as [`DriverStatus::Unknown`].
pub fn classify_driver(vendor: Vendor, device_id: u32, build: u32) -> DriverStatus {
    classify_with(DRIVER_RULES, vendor, device_id, build)
}

pub(crate) fn classify_with(
    rules: &[DriverRule],
    vendor: Vendor,
    device_id: u32,
    build: u32,
) -> DriverStatus {
    let mut status = DriverStatus::Unknown;
    for rule in rules {
        if rule.matches(vendor, device_id, build) {
            status = rule.status;
        }
    }
    status
}

// Build ranges collected from release-era driver testing. Vendor-wide ranges
// first, device-specific refinements after them.
static DRIVER_RULES: &[DriverRule] = &[
    DriverRule {
        vendor: Vendor::Nvidia,
        device_id: None,
        builds: 0..=1029,
        status: DriverStatus::Bad,
    },
    DriverRule {
        vendor: Vendor::Nvidia,
        device_id: None,
        builds: 1030..=4402,
        status: DriverStatus::Acceptable,
    },
    DriverRule {
        vendor: Vendor::Nvidia,
        device_id: None,
        builds: 4403..=5216,
        status: DriverStatus::Good,
    },
    DriverRule {
        vendor: Vendor::Amd,
        device_id: None,
        builds: 0..=4110,
        status: DriverStatus::Bad,
    },
    DriverRule {
        vendor: Vendor::Amd,
        device_id: None,
        builds: 4111..=6218,
        status: DriverStatus::Good,
    },
    // Early 8500 drivers regressed against the vendor-wide range above.
    DriverRule {
        vendor: Vendor::Amd,
        device_id: Some(0x514C),
        builds: 4111..=4200,
        status: DriverStatus::Acceptable,
    },
    DriverRule {
        vendor: Vendor::Intel,
        device_id: Some(0x7121),
        builds: 0..=1500,
        status: DriverStatus::Bad,
    },
    DriverRule {
        vendor: Vendor::Intel,
        device_id: None,
        builds: 3100..=3620,
        status: DriverStatus::Acceptable,
    },
    DriverRule {
        vendor: Vendor::S3,
        device_id: None,
        builds: 0..=8205,
        status: DriverStatus::Acceptable,
    },
    DriverRule {
        vendor: Vendor::PowerVr,
        device_id: Some(0x0010),
        builds: 0..=150,
        status: DriverStatus::Bad,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_outside_every_range_is_unknown() {
        assert_eq!(
            classify_driver(Vendor::Nvidia, 0x0200, 9999),
            DriverStatus::Unknown
        );
        assert_eq!(
            classify_driver(Vendor::Matrox, 0x0525, 100),
            DriverStatus::Unknown
        );
    }

    #[test]
    fn unknown_vendor_is_never_classified() {
        assert_eq!(
            classify_driver(Vendor::Unknown, 0x0200, 500),
            DriverStatus::Unknown
        );
    }

    #[test]
    fn vendor_wide_ranges_classify() {
        assert_eq!(
            classify_driver(Vendor::Nvidia, 0x0200, 500),
            DriverStatus::Bad
        );
        assert_eq!(
            classify_driver(Vendor::Nvidia, 0x0200, 5000),
            DriverStatus::Good
        );
    }

    #[test]
    fn device_specific_rule_refines_vendor_rule() {
        // Vendor-wide says good, the 8500-specific refinement downgrades it.
        assert_eq!(
            classify_driver(Vendor::Amd, 0x514C, 4150),
            DriverStatus::Acceptable
        );
        // Other AMD devices keep the vendor-wide classification.
        assert_eq!(
            classify_driver(Vendor::Amd, 0x5159, 4150),
            DriverStatus::Good
        );
    }

    #[test]
    fn last_matching_rule_wins() {
        let rules = [
            DriverRule {
                vendor: Vendor::Matrox,
                device_id: None,
                builds: 0..=100,
                status: DriverStatus::Good,
            },
            DriverRule {
                vendor: Vendor::Matrox,
                device_id: None,
                builds: 50..=100,
                status: DriverStatus::Bad,
            },
        ];
        assert_eq!(
            classify_with(&rules, Vendor::Matrox, 0x0525, 75),
            DriverStatus::Bad
        );
        assert_eq!(
            classify_with(&rules, Vendor::Matrox, 0x0525, 25),
            DriverStatus::Good
        );
    }
}
