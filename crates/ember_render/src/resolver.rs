//! Capability resolution
//!
//! Turns a raw capability descriptor plus an adapter identity into a
//! normalized [`CapabilityProfile`]. Resolution never fails: hardware we know
//! nothing about degrades to the all-conservative profile and the renderer is
//! required to run against that.
//!
//! Resolution happens once, on the thread that owns the device context; the
//! resulting profile is immutable shared state. Rebuilding (after a device
//! reset) means constructing a new [`DeviceCaps`], not patching the old one.

use crate::adapter::AdapterIdentity;
use crate::driver::classify_driver;
use crate::format::{DepthStencilFormat, FormatUsage, SurfaceFormat};
use crate::overrides::apply_overrides;
use crate::profile::{CapabilityProfile, Features, ShaderVersion};
use crate::raw::{has_feature, DeviceBits, MiscBits, RasterBits, RawDeviceCaps, TextureBits, TextureOpBits};
use crate::report;
use crate::source::CapabilitySource;
use crate::vendor::{classify_device, Vendor};

/// Resolve a capability profile from a source and adapter identity.
///
/// Pure over its inputs plus the static vendor/driver tables: identical
/// inputs produce identical profiles. `display_format` is the mode the device
/// was created with; it is recorded for diagnostics only.
pub fn resolve_profile<S>(
    source: &S,
    display_format: SurfaceFormat,
    identity: &AdapterIdentity,
) -> CapabilityProfile
where
    S: CapabilitySource + ?Sized,
{
    let raw = source.raw_caps();
    let mut profile = CapabilityProfile::conservative();
    profile.driver_version = identity.driver_version;
    profile.driver_name = identity.driver_name.clone();
    profile.device_name = identity.device_name.clone();

    // 1. Vendor, 2. device family. Exact-match table lookups, total.
    profile.vendor = Vendor::from_pci_id(identity.vendor_id);
    profile.device = classify_device(profile.vendor, identity.device_id);
    tracing::debug!(
        vendor = profile.vendor.name(),
        device = profile.device.name,
        display_format = display_format.name(),
        "classified adapter"
    );

    // 3. Format probing. Every format is probed exactly once per usage class;
    // one unsupported format must not short-circuit the rest.
    for format in SurfaceFormat::ALL {
        profile
            .texture_formats
            .set(format, source.supports_format(format, FormatUsage::Texture));
    }
    for format in SurfaceFormat::ALL {
        profile.render_target_formats.set(
            format,
            source.supports_format(format, FormatUsage::RenderTarget),
        );
    }
    for format in DepthStencilFormat::ALL {
        profile
            .depth_stencil_formats
            .set(format, source.supports_depth_format(format));
    }

    // 4. Feature bits and limits.
    profile.features = extract_features(&raw, &profile);
    profile.max_textures_per_pass = raw.max_simultaneous_textures;
    profile.max_supported_textures = raw.max_supported_textures;
    profile.max_texture_width = raw.max_texture_width;
    profile.max_texture_height = raw.max_texture_height;
    profile.vertex_shader = ShaderVersion::from_raw(raw.vertex_shader_version);
    profile.pixel_shader = ShaderVersion::from_raw(raw.pixel_shader_version);

    // 5. Driver quality from vendor build-range tables.
    let build = identity.driver_version.build();
    profile.driver_status = classify_driver(profile.vendor, identity.device_id, build);

    // 6. Vendor overrides run last and only narrow the feature set.
    apply_overrides(
        profile.vendor,
        identity.device_id,
        build,
        profile.driver_status,
        &mut profile.features,
    );

    // 7. Diagnostic report, mirrored into the process-wide cache.
    profile.report = report::build_report(&profile);
    report::store_last_report(&profile.report);

    profile
}

fn extract_features(raw: &RawDeviceCaps, profile: &CapabilityProfile) -> Features {
    let mut features = Features::empty();

    let mut set = |feature: Features, supported: bool| {
        features.set(feature, supported);
    };

    set(
        Features::HW_TRANSFORM_AND_LIGHT,
        has_feature(raw.device.bits(), DeviceBits::HW_TRANSFORM_AND_LIGHT.bits()),
    );
    set(
        Features::NPATCHES,
        has_feature(raw.device.bits(), DeviceBits::NPATCHES.bits()),
    );
    set(
        Features::GAMMA_RAMP,
        has_feature(raw.misc.bits(), MiscBits::FULLSCREEN_GAMMA.bits()),
    );
    set(
        Features::Z_BIAS,
        has_feature(raw.raster.bits(), RasterBits::Z_BIAS.bits()),
    );
    set(
        Features::ANISOTROPIC_FILTERING,
        has_feature(raw.raster.bits(), RasterBits::ANISOTROPY.bits()),
    );
    // Either fog path is enough for the fixed-function fog feature.
    set(
        Features::FOG,
        has_feature(raw.raster.bits(), RasterBits::FOG_TABLE.bits())
            || has_feature(raw.raster.bits(), RasterBits::FOG_VERTEX.bits()),
    );
    set(
        Features::CUBE_MAPS,
        has_feature(raw.texture.bits(), TextureBits::CUBE_MAP.bits()),
    );
    set(
        Features::BUMP_ENVMAP,
        has_feature(raw.texture_ops.bits(), TextureOpBits::BUMP_ENVMAP.bits()),
    );
    set(
        Features::BUMP_ENVMAP_LUMINANCE,
        has_feature(
            raw.texture_ops.bits(),
            TextureOpBits::BUMP_ENVMAP_LUMINANCE.bits(),
        ),
    );
    set(
        Features::MODULATE_ALPHA_ADD_COLOR,
        has_feature(
            raw.texture_ops.bits(),
            TextureOpBits::MODULATE_ALPHA_ADD_COLOR.bits(),
        ),
    );
    set(
        Features::DOT3_BLEND,
        has_feature(raw.texture_ops.bits(), TextureOpBits::DOT_PRODUCT3.bits()),
    );
    set(Features::MULTI_TEXTURE, raw.max_simultaneous_textures > 1);
    set(Features::LARGE_POINTS, raw.max_point_size > 1.0);

    // DXTC needs the compression cap and at least one usable DXT format; a
    // missing compression bit turns it off regardless of the probes.
    let any_dxt = SurfaceFormat::ALL
        .iter()
        .any(|&f| f.is_compressed() && profile.texture_formats.contains(f));
    set(
        Features::DXTC,
        has_feature(raw.texture.bits(), TextureBits::COMPRESSION.bits()) && any_dxt,
    );

    features
}

/// Resolved capabilities plus the retained handle to the capability source.
///
/// Two states: live (source retained, display-mode queries answered) and shut
/// down (source released). The profile stays valid for read access in both;
/// the only way back to a live state is full reconstruction.
pub struct DeviceCaps<S: CapabilitySource> {
    profile: CapabilityProfile,
    source: Option<S>,
}

impl<S: CapabilitySource> DeviceCaps<S> {
    /// Resolve a profile and retain the source for live display-mode queries.
    pub fn resolve(source: S, display_format: SurfaceFormat, identity: &AdapterIdentity) -> Self {
        let profile = resolve_profile(&source, display_format, identity);
        tracing::info!(
            vendor = profile.vendor.name(),
            device = profile.device.name,
            driver_status = profile.driver_status.name(),
            "capability profile resolved"
        );
        Self {
            profile,
            source: Some(source),
        }
    }

    #[inline]
    pub fn profile(&self) -> &CapabilityProfile {
        &self.profile
    }

    /// Whether `width` x `height` is an enumerated display mode for `format`.
    ///
    /// Live query against the source, independent of the cached profile: the
    /// available modes can depend on monitor state the snapshot does not
    /// capture. After shutdown the conservative answer is `false`.
    pub fn is_valid_display_format(&self, width: u32, height: u32, format: SurfaceFormat) -> bool {
        match &self.source {
            Some(source) => source
                .display_modes(format)
                .iter()
                .any(|mode| mode.width == width && mode.height == height),
            None => false,
        }
    }

    /// Release the retained source handle. The profile stays readable.
    pub fn shutdown(&mut self) {
        if self.source.take().is_some() {
            tracing::debug!("capability source released");
        }
    }

    #[inline]
    pub fn is_shut_down(&self) -> bool {
        self.source.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::DriverVersion;
    use crate::driver::DriverStatus;
    use crate::source::{DisplayMode, ReferenceAdapter};
    use crate::vendor::UNKNOWN_DEVICE;
    use std::cell::Cell;

    fn identity(vendor_id: u32, device_id: u32, build: u16) -> AdapterIdentity {
        AdapterIdentity {
            vendor_id,
            device_id,
            driver_version: DriverVersion {
                product: 6,
                version: 14,
                sub_version: 10,
                build,
            },
            driver_name: "display.drv".to_string(),
            device_name: "Test Adapter".to_string(),
        }
    }

    /// Source that says yes to everything and counts every probe.
    #[derive(Default)]
    struct CountingSource {
        caps: RawDeviceCaps,
        texture_probes: Cell<usize>,
        target_probes: Cell<usize>,
        depth_probes: Cell<usize>,
    }

    impl CapabilitySource for CountingSource {
        fn raw_caps(&self) -> RawDeviceCaps {
            self.caps
        }

        fn supports_format(&self, _format: SurfaceFormat, usage: FormatUsage) -> bool {
            match usage {
                FormatUsage::Texture => self.texture_probes.set(self.texture_probes.get() + 1),
                FormatUsage::RenderTarget => self.target_probes.set(self.target_probes.get() + 1),
            }
            true
        }

        fn supports_depth_format(&self, _format: DepthStencilFormat) -> bool {
            self.depth_probes.set(self.depth_probes.get() + 1);
            true
        }

        fn display_modes(&self, _format: SurfaceFormat) -> Vec<DisplayMode> {
            Vec::new()
        }
    }

    /// Source that fails every probe, for the conservative path.
    struct BarrenSource;

    impl CapabilitySource for BarrenSource {
        fn raw_caps(&self) -> RawDeviceCaps {
            RawDeviceCaps::default()
        }

        fn supports_format(&self, _format: SurfaceFormat, _usage: FormatUsage) -> bool {
            false
        }

        fn supports_depth_format(&self, _format: DepthStencilFormat) -> bool {
            false
        }

        fn display_modes(&self, _format: SurfaceFormat) -> Vec<DisplayMode> {
            Vec::new()
        }
    }

    #[test]
    fn every_format_probed_exactly_once_per_usage() {
        let source = CountingSource::default();
        let _ = resolve_profile(&source, SurfaceFormat::X8R8G8B8, &identity(0x10DE, 0x0200, 4500));

        assert_eq!(source.texture_probes.get(), SurfaceFormat::COUNT);
        assert_eq!(source.target_probes.get(), SurfaceFormat::COUNT);
        assert_eq!(source.depth_probes.get(), DepthStencilFormat::COUNT);
    }

    #[test]
    fn probes_do_not_short_circuit_on_failure() {
        // Same counts even when every probe reports unsupported.
        #[derive(Default)]
        struct FailingCounter(CountingSource);

        impl CapabilitySource for FailingCounter {
            fn raw_caps(&self) -> RawDeviceCaps {
                RawDeviceCaps::default()
            }
            fn supports_format(&self, format: SurfaceFormat, usage: FormatUsage) -> bool {
                self.0.supports_format(format, usage);
                false
            }
            fn supports_depth_format(&self, format: DepthStencilFormat) -> bool {
                self.0.supports_depth_format(format);
                false
            }
            fn display_modes(&self, _format: SurfaceFormat) -> Vec<DisplayMode> {
                Vec::new()
            }
        }

        let source = FailingCounter::default();
        let profile =
            resolve_profile(&source, SurfaceFormat::X8R8G8B8, &identity(0x10DE, 0x0200, 4500));

        assert_eq!(source.0.texture_probes.get(), SurfaceFormat::COUNT);
        assert_eq!(source.0.target_probes.get(), SurfaceFormat::COUNT);
        assert_eq!(source.0.depth_probes.get(), DepthStencilFormat::COUNT);
        assert!(!profile.supports_texture_format(SurfaceFormat::A8R8G8B8));
    }

    #[test]
    fn resolution_is_idempotent() {
        let id = ReferenceAdapter::identity();
        let a = resolve_profile(&ReferenceAdapter, SurfaceFormat::X8R8G8B8, &id);
        let b = resolve_profile(&ReferenceAdapter, SurfaceFormat::X8R8G8B8, &id);
        assert_eq!(a, b);
    }

    #[test]
    fn reference_adapter_resolves_fully_featured() {
        let profile = resolve_profile(
            &ReferenceAdapter,
            SurfaceFormat::X8R8G8B8,
            &ReferenceAdapter::identity(),
        );

        assert_eq!(profile.vendor, Vendor::Nvidia);
        assert_eq!(profile.device.name, "GeForce3");
        assert_eq!(profile.driver_status, DriverStatus::Good);
        assert!(profile.uses_hardware_tnl());
        assert!(profile.supports_dxtc());
        assert!(profile.supports_multi_texture());
        assert!(profile.supports_large_points());
        assert!(profile.vertex_shader.is_supported());
        assert!(profile.supports_depth_stencil_format(DepthStencilFormat::D24S8));
        assert!(!profile.supports_render_target_format(SurfaceFormat::Dxt1));
        assert!(profile.report().contains("GeForce3"));
    }

    #[test]
    fn unknown_hardware_degrades_to_conservative_profile() {
        let profile =
            resolve_profile(&BarrenSource, SurfaceFormat::X8R8G8B8, &identity(0xABCD, 0x1234, 1));

        assert_eq!(profile.vendor, Vendor::Unknown);
        assert_eq!(profile.device, &UNKNOWN_DEVICE);
        assert_eq!(profile.driver_status, DriverStatus::Unknown);
        assert!(profile.features.is_empty());
        assert_eq!(profile.max_textures_per_pass, 0);
        for format in SurfaceFormat::ALL {
            assert!(!profile.supports_texture_format(format));
        }
    }

    #[test]
    fn missing_compression_bit_disables_dxtc() {
        // Every probe succeeds, every other cap bit is set; only the
        // compression bit is absent.
        let mut caps = ReferenceAdapter.raw_caps();
        caps.texture.remove(TextureBits::COMPRESSION);

        struct Source(RawDeviceCaps);
        impl CapabilitySource for Source {
            fn raw_caps(&self) -> RawDeviceCaps {
                self.0
            }
            fn supports_format(&self, _f: SurfaceFormat, _u: FormatUsage) -> bool {
                true
            }
            fn supports_depth_format(&self, _f: DepthStencilFormat) -> bool {
                true
            }
            fn display_modes(&self, _f: SurfaceFormat) -> Vec<DisplayMode> {
                Vec::new()
            }
        }

        let profile = resolve_profile(
            &Source(caps),
            SurfaceFormat::X8R8G8B8,
            &ReferenceAdapter::identity(),
        );
        assert!(!profile.supports_dxtc());
        // The probes themselves still recorded the formats as usable.
        assert!(profile.supports_texture_format(SurfaceFormat::Dxt1));
    }

    #[test]
    fn dxtc_needs_a_usable_dxt_format() {
        struct NoDxtSource;
        impl CapabilitySource for NoDxtSource {
            fn raw_caps(&self) -> RawDeviceCaps {
                ReferenceAdapter.raw_caps()
            }
            fn supports_format(&self, format: SurfaceFormat, _u: FormatUsage) -> bool {
                !format.is_compressed()
            }
            fn supports_depth_format(&self, _f: DepthStencilFormat) -> bool {
                true
            }
            fn display_modes(&self, _f: SurfaceFormat) -> Vec<DisplayMode> {
                Vec::new()
            }
        }

        let profile = resolve_profile(
            &NoDxtSource,
            SurfaceFormat::X8R8G8B8,
            &ReferenceAdapter::identity(),
        );
        assert!(!profile.supports_dxtc());
    }

    #[test]
    fn known_bad_driver_triple_forces_overrides() {
        // Radeon 8500 on a build inside the known-bad range. Raw caps
        // advertise everything; the override table must win anyway.
        let source = CountingSource {
            caps: ReferenceAdapter.raw_caps(),
            ..CountingSource::default()
        };
        let profile =
            resolve_profile(&source, SurfaceFormat::X8R8G8B8, &identity(0x1002, 0x514C, 4000));

        assert_eq!(profile.vendor, Vendor::Amd);
        assert_eq!(profile.driver_status, DriverStatus::Bad);
        assert!(!profile.supports_npatches());
        assert!(!profile.supports_anisotropic_filtering());
        // Untouched features survive.
        assert!(profile.supports_cube_maps());
    }

    #[test]
    fn override_wins_over_raw_bits() {
        // S3 parts have z-bias forced off no matter what the caps claim.
        let source = CountingSource {
            caps: ReferenceAdapter.raw_caps(),
            ..CountingSource::default()
        };
        let profile =
            resolve_profile(&source, SurfaceFormat::X8R8G8B8, &identity(0x5333, 0x8A22, 8000));

        assert!(source.caps.raster.contains(RasterBits::Z_BIAS));
        assert!(!profile.supports_zbias());
    }

    #[test]
    fn display_format_validation_tracks_enumerated_modes() {
        let caps = DeviceCaps::resolve(
            ReferenceAdapter,
            SurfaceFormat::X8R8G8B8,
            &ReferenceAdapter::identity(),
        );

        assert!(caps.is_valid_display_format(1024, 768, SurfaceFormat::X8R8G8B8));
        assert!(!caps.is_valid_display_format(1920, 1080, SurfaceFormat::X8R8G8B8));
        // Format with no enumerated modes fails regardless of texture flags.
        assert!(caps.profile().supports_texture_format(SurfaceFormat::A8R8G8B8));
        assert!(!caps.is_valid_display_format(1024, 768, SurfaceFormat::A8R8G8B8));
    }

    #[test]
    fn shutdown_releases_source_but_keeps_profile() {
        let mut caps = DeviceCaps::resolve(
            ReferenceAdapter,
            SurfaceFormat::X8R8G8B8,
            &ReferenceAdapter::identity(),
        );
        let before = caps.profile().clone();

        assert!(caps.is_valid_display_format(800, 600, SurfaceFormat::X8R8G8B8));
        caps.shutdown();
        assert!(caps.is_shut_down());
        assert!(!caps.is_valid_display_format(800, 600, SurfaceFormat::X8R8G8B8));
        assert_eq!(caps.profile(), &before);

        // Shutdown twice is a no-op.
        caps.shutdown();
        assert!(caps.is_shut_down());
    }

    #[test]
    fn resolution_populates_report_cache() {
        let _ = resolve_profile(
            &ReferenceAdapter,
            SurfaceFormat::X8R8G8B8,
            &ReferenceAdapter::identity(),
        );
        // Content is not asserted because parallel tests also write the cache.
        assert!(crate::report::last_report().is_some());
    }
}
