//! Vendor-specific capability overrides
//!
//! Workarounds for known-defective vendor/device/driver combinations. The
//! pass runs after all generic detection and may only remove features from
//! the profile, never add them; the tables below are maintained against the
//! assumption that generic detection already ran.

use crate::driver::DriverStatus;
use crate::profile::Features;
use crate::vendor::Vendor;

pub(crate) struct OverrideRule {
    pub vendor: Vendor,
    /// `None` matches every device of the vendor.
    pub device_id: Option<u32>,
    /// When set, the rule only applies to driver builds at or below this.
    pub max_build: Option<u32>,
    /// When set, the rule only applies if the driver classified as `Bad`.
    pub only_bad_driver: bool,
    /// Features to force off.
    pub disable: Features,
}

impl OverrideRule {
    fn matches(&self, vendor: Vendor, device_id: u32, build: u32, status: DriverStatus) -> bool {
        self.vendor == vendor
            && self.device_id.map_or(true, |id| id == device_id)
            && self.max_build.map_or(true, |max| build <= max)
            && (!self.only_bad_driver || status == DriverStatus::Bad)
    }
}

/// Apply every matching override rule, in table order.
///
/// Each rule only clears bits, so applying all matches in order is equivalent
/// to last-write-wins over a single ordered rule list.
pub(crate) fn apply_overrides(
    vendor: Vendor,
    device_id: u32,
    build: u32,
    status: DriverStatus,
    features: &mut Features,
) {
    apply_with(OVERRIDE_RULES, vendor, device_id, build, status, features);
}

pub(crate) fn apply_with(
    rules: &[OverrideRule],
    vendor: Vendor,
    device_id: u32,
    build: u32,
    status: DriverStatus,
    features: &mut Features,
) {
    for rule in rules {
        if rule.matches(vendor, device_id, build, status) {
            if features.intersects(rule.disable) {
                tracing::debug!(
                    vendor = vendor.name(),
                    device_id,
                    disabled = ?rule.disable.intersection(*features),
                    "vendor override disabled features"
                );
            }
            features.remove(rule.disable);
        }
    }
}

static OVERRIDE_RULES: &[OverrideRule] = &[
    // Pre-GeForce NVIDIA parts advertise N-patches but render garbage.
    OverrideRule {
        vendor: Vendor::Nvidia,
        device_id: Some(0x0020),
        max_build: None,
        only_bad_driver: false,
        disable: Features::NPATCHES.union(Features::DOT3_BLEND),
    },
    OverrideRule {
        vendor: Vendor::Nvidia,
        device_id: Some(0x0028),
        max_build: None,
        only_bad_driver: false,
        disable: Features::NPATCHES,
    },
    // Broken early Detonator builds corrupt anisotropic sampling.
    OverrideRule {
        vendor: Vendor::Nvidia,
        device_id: None,
        max_build: Some(1029),
        only_bad_driver: false,
        disable: Features::ANISOTROPIC_FILTERING,
    },
    // Known-bad ATI builds: tessellation and anisotropy both unusable.
    OverrideRule {
        vendor: Vendor::Amd,
        device_id: None,
        max_build: None,
        only_bad_driver: true,
        disable: Features::NPATCHES.union(Features::ANISOTROPIC_FILTERING),
    },
    OverrideRule {
        vendor: Vendor::Intel,
        device_id: Some(0x7121),
        max_build: None,
        only_bad_driver: false,
        disable: Features::LARGE_POINTS.union(Features::NPATCHES),
    },
    OverrideRule {
        vendor: Vendor::Intel,
        device_id: Some(0x1132),
        max_build: None,
        only_bad_driver: false,
        disable: Features::LARGE_POINTS,
    },
    // Savage z-bias implementation shifts whole primitives.
    OverrideRule {
        vendor: Vendor::S3,
        device_id: None,
        max_build: None,
        only_bad_driver: false,
        disable: Features::Z_BIAS.union(Features::NPATCHES),
    },
    OverrideRule {
        vendor: Vendor::Matrox,
        device_id: Some(0x0525),
        max_build: None,
        only_bad_driver: false,
        disable: Features::BUMP_ENVMAP_LUMINANCE,
    },
    OverrideRule {
        vendor: Vendor::PowerVr,
        device_id: Some(0x0010),
        max_build: Some(150),
        only_bad_driver: false,
        disable: Features::DOT3_BLEND,
    },
];
