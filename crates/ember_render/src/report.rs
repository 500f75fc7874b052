//! Diagnostic capability report
//!
//! Assembles the human-readable summary stored on each profile, and keeps an
//! owner-managed process-wide copy of the most recent one so crash/diagnostic
//! logging can include it without holding a profile reference.

use crate::profile::{CapabilityProfile, Features};
use once_cell::sync::Lazy;
use std::fmt::Write;
use std::sync::Mutex;

/// Build the multi-line report for a resolved profile.
///
/// The exact formatting is informational, not contractual; tests assert on
/// content, not layout.
pub fn build_report(profile: &CapabilityProfile) -> String {
    let mut out = String::with_capacity(1024);

    let _ = writeln!(out, "Video card: {}", profile.device_name);
    let _ = writeln!(out, "Vendor: {}", profile.vendor.name());
    let _ = writeln!(out, "Device family: {}", profile.device.name);
    let _ = writeln!(
        out,
        "Driver: {} {} ({})",
        profile.driver_name,
        profile.driver_version,
        profile.driver_status.name()
    );
    let _ = writeln!(
        out,
        "Max texture size: {}x{}",
        profile.max_texture_width, profile.max_texture_height
    );
    let _ = writeln!(
        out,
        "Textures per pass: {} (stages: {})",
        profile.max_textures_per_pass, profile.max_supported_textures
    );
    let _ = writeln!(
        out,
        "Shaders: vertex {} / pixel {}",
        profile.vertex_shader, profile.pixel_shader
    );

    for (name, flag) in FEATURE_NAMES {
        let _ = writeln!(
            out,
            "{name}: {}",
            if profile.features.contains(*flag) {
                "yes"
            } else {
                "no"
            }
        );
    }

    let textures: Vec<&str> = profile
        .texture_formats
        .iter()
        .filter(|(_, ok)| *ok)
        .map(|(f, _)| f.name())
        .collect();
    let _ = writeln!(out, "Texture formats: {}", textures.join(" "));

    let targets: Vec<&str> = profile
        .render_target_formats
        .iter()
        .filter(|(_, ok)| *ok)
        .map(|(f, _)| f.name())
        .collect();
    let _ = writeln!(out, "Render target formats: {}", targets.join(" "));

    let depth: Vec<&str> = profile
        .depth_stencil_formats
        .iter()
        .filter(|(_, ok)| *ok)
        .map(|(f, _)| f.name())
        .collect();
    let _ = writeln!(out, "Depth/stencil formats: {}", depth.join(" "));

    out
}

const FEATURE_NAMES: &[(&str, Features)] = &[
    ("Hardware T&L", Features::HW_TRANSFORM_AND_LIGHT),
    ("DXTC", Features::DXTC),
    ("Gamma ramp", Features::GAMMA_RAMP),
    ("N-patches", Features::NPATCHES),
    ("Bump envmap", Features::BUMP_ENVMAP),
    ("Bump envmap luminance", Features::BUMP_ENVMAP_LUMINANCE),
    ("Z-bias", Features::Z_BIAS),
    ("Anisotropic filtering", Features::ANISOTROPIC_FILTERING),
    ("Modulate-alpha add-color", Features::MODULATE_ALPHA_ADD_COLOR),
    ("Dot3 blend", Features::DOT3_BLEND),
    ("Large points", Features::LARGE_POINTS),
    ("Cube maps", Features::CUBE_MAPS),
    ("Multi-texture", Features::MULTI_TEXTURE),
    ("Fog", Features::FOG),
];

static LAST_REPORT: Lazy<Mutex<Option<String>>> = Lazy::new(|| Mutex::new(None));

/// Record the report of the most recent resolution.
///
/// A poisoned lock is recovered rather than propagated; the cache holds plain
/// strings, so a writer that panicked elsewhere leaves nothing inconsistent.
pub fn store_last_report(report: &str) {
    *LAST_REPORT
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(report.to_string());
}

/// The report of the most recent resolution in this process, if any.
pub fn last_report() -> Option<String> {
    LAST_REPORT
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_names_vendor_and_features() {
        let mut profile = CapabilityProfile::conservative();
        profile.device_name = "Test Adapter".to_string();
        profile.features = Features::DXTC | Features::FOG;
        let report = build_report(&profile);

        assert!(report.contains("Test Adapter"));
        assert!(report.contains("Unknown vendor"));
        assert!(report.contains("DXTC: yes"));
        assert!(report.contains("N-patches: no"));
        assert!(report.contains("Fog: yes"));
    }

    #[test]
    fn last_report_cache_is_set_after_store() {
        // Other tests resolve profiles concurrently and also write the cache,
        // so only presence is asserted, not content.
        store_last_report("cached report");
        assert!(last_report().is_some());
    }

    #[test]
    fn cache_survives_a_poisoned_lock() {
        // Panic while holding the lock to poison it, then verify both
        // accessors recover instead of propagating the panic.
        let _ = std::thread::spawn(|| {
            let _guard = LAST_REPORT
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            panic!("poison the report cache lock");
        })
        .join();

        store_last_report("after poison");
        assert!(last_report().is_some());
    }
}
