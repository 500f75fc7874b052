//! Normalized capability profile
//!
//! Output of capability resolution: a flat, immutable record the renderer's
//! feature-selection logic branches on. Built once per adapter at device
//! initialization and shared read-only afterwards.

use crate::adapter::DriverVersion;
use crate::driver::DriverStatus;
use crate::format::{DepthStencilFormat, SurfaceFormat};
use crate::vendor::{DeviceFamily, Vendor, UNKNOWN_DEVICE};
use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Renderer-facing optional features, normalized from the raw caps.
    ///
    /// Kept as a flag set rather than loose booleans so vendor override rules
    /// can be plain data: an override is just a mask to remove.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Features: u32 {
        const HW_TRANSFORM_AND_LIGHT = 1 << 0;
        const DXTC = 1 << 1;
        const GAMMA_RAMP = 1 << 2;
        const NPATCHES = 1 << 3;
        const BUMP_ENVMAP = 1 << 4;
        const BUMP_ENVMAP_LUMINANCE = 1 << 5;
        const Z_BIAS = 1 << 6;
        const ANISOTROPIC_FILTERING = 1 << 7;
        const MODULATE_ALPHA_ADD_COLOR = 1 << 8;
        const DOT3_BLEND = 1 << 9;
        const LARGE_POINTS = 1 << 10;
        const CUBE_MAPS = 1 << 11;
        const MULTI_TEXTURE = 1 << 12;
        const FOG = 1 << 13;
    }
}

/// Shader model version, ordered. Version 0.0 means no shader support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ShaderVersion {
    pub major: u8,
    pub minor: u8,
}

impl ShaderVersion {
    pub const NONE: ShaderVersion = ShaderVersion { major: 0, minor: 0 };

    /// Decode from the `0xMMmm` encoding drivers report. Zero decodes to
    /// [`ShaderVersion::NONE`]; it is not an error.
    pub fn from_raw(raw: u32) -> Self {
        Self {
            major: ((raw >> 8) & 0xFF) as u8,
            minor: (raw & 0xFF) as u8,
        }
    }

    #[inline]
    pub fn is_supported(self) -> bool {
        self.major > 0
    }
}

impl fmt::Display for ShaderVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Per-surface-format support table, indexed by [`SurfaceFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSet([bool; SurfaceFormat::COUNT]);

impl FormatSet {
    pub const fn none() -> Self {
        Self([false; SurfaceFormat::COUNT])
    }

    pub(crate) fn set(&mut self, format: SurfaceFormat, supported: bool) {
        self.0[format.index()] = supported;
    }

    #[inline]
    pub fn contains(&self, format: SurfaceFormat) -> bool {
        self.0[format.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (SurfaceFormat, bool)> + '_ {
        SurfaceFormat::ALL.iter().map(|&f| (f, self.contains(f)))
    }
}

impl Default for FormatSet {
    fn default() -> Self {
        Self::none()
    }
}

/// Per-depth/stencil-format support table, indexed by [`DepthStencilFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthFormatSet([bool; DepthStencilFormat::COUNT]);

impl DepthFormatSet {
    pub const fn none() -> Self {
        Self([false; DepthStencilFormat::COUNT])
    }

    pub(crate) fn set(&mut self, format: DepthStencilFormat, supported: bool) {
        self.0[format.index()] = supported;
    }

    #[inline]
    pub fn contains(&self, format: DepthStencilFormat) -> bool {
        self.0[format.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (DepthStencilFormat, bool)> + '_ {
        DepthStencilFormat::ALL
            .iter()
            .map(|&f| (f, self.contains(f)))
    }
}

impl Default for DepthFormatSet {
    fn default() -> Self {
        Self::none()
    }
}

/// Immutable record of what an adapter supports.
///
/// Every field is derived deterministically from the raw caps and adapter
/// identity; nothing mutates it after resolution. Any number of threads may
/// read it concurrently.
#[derive(Debug, Clone, PartialEq)]
pub struct CapabilityProfile {
    pub vendor: Vendor,
    pub device: &'static DeviceFamily,
    pub driver_version: DriverVersion,
    pub driver_status: DriverStatus,
    pub driver_name: String,
    pub device_name: String,

    pub features: Features,

    pub texture_formats: FormatSet,
    pub render_target_formats: FormatSet,
    pub depth_stencil_formats: DepthFormatSet,

    pub max_textures_per_pass: u32,
    pub max_supported_textures: u32,
    pub max_texture_width: u32,
    pub max_texture_height: u32,

    pub vertex_shader: ShaderVersion,
    pub pixel_shader: ShaderVersion,

    pub(crate) report: String,
}

impl CapabilityProfile {
    /// The most conservative profile: every feature off, every format
    /// unsupported, all limits zero. Callers must be able to run against this.
    pub fn conservative() -> Self {
        Self {
            vendor: Vendor::Unknown,
            device: &UNKNOWN_DEVICE,
            driver_version: DriverVersion::default(),
            driver_status: DriverStatus::Unknown,
            driver_name: String::new(),
            device_name: String::new(),
            features: Features::empty(),
            texture_formats: FormatSet::none(),
            render_target_formats: FormatSet::none(),
            depth_stencil_formats: DepthFormatSet::none(),
            max_textures_per_pass: 0,
            max_supported_textures: 0,
            max_texture_width: 0,
            max_texture_height: 0,
            vertex_shader: ShaderVersion::NONE,
            pixel_shader: ShaderVersion::NONE,
            report: String::new(),
        }
    }

    /// Human-readable multi-line summary assembled at resolution time.
    #[inline]
    pub fn report(&self) -> &str {
        &self.report
    }

    #[inline]
    pub fn has(&self, features: Features) -> bool {
        self.features.contains(features)
    }

    #[inline]
    pub fn uses_hardware_tnl(&self) -> bool {
        self.has(Features::HW_TRANSFORM_AND_LIGHT)
    }

    #[inline]
    pub fn supports_dxtc(&self) -> bool {
        self.has(Features::DXTC)
    }

    #[inline]
    pub fn supports_gamma_ramp(&self) -> bool {
        self.has(Features::GAMMA_RAMP)
    }

    #[inline]
    pub fn supports_npatches(&self) -> bool {
        self.has(Features::NPATCHES)
    }

    #[inline]
    pub fn supports_bump_envmap(&self) -> bool {
        self.has(Features::BUMP_ENVMAP)
    }

    #[inline]
    pub fn supports_bump_envmap_luminance(&self) -> bool {
        self.has(Features::BUMP_ENVMAP_LUMINANCE)
    }

    #[inline]
    pub fn supports_zbias(&self) -> bool {
        self.has(Features::Z_BIAS)
    }

    #[inline]
    pub fn supports_anisotropic_filtering(&self) -> bool {
        self.has(Features::ANISOTROPIC_FILTERING)
    }

    #[inline]
    pub fn supports_modulate_alpha_add_color(&self) -> bool {
        self.has(Features::MODULATE_ALPHA_ADD_COLOR)
    }

    #[inline]
    pub fn supports_dot3_blend(&self) -> bool {
        self.has(Features::DOT3_BLEND)
    }

    #[inline]
    pub fn supports_large_points(&self) -> bool {
        self.has(Features::LARGE_POINTS)
    }

    #[inline]
    pub fn supports_cube_maps(&self) -> bool {
        self.has(Features::CUBE_MAPS)
    }

    #[inline]
    pub fn supports_multi_texture(&self) -> bool {
        self.has(Features::MULTI_TEXTURE)
    }

    #[inline]
    pub fn supports_fog(&self) -> bool {
        self.has(Features::FOG)
    }

    #[inline]
    pub fn supports_texture_format(&self, format: SurfaceFormat) -> bool {
        self.texture_formats.contains(format)
    }

    #[inline]
    pub fn supports_render_target_format(&self, format: SurfaceFormat) -> bool {
        self.render_target_formats.contains(format)
    }

    #[inline]
    pub fn supports_depth_stencil_format(&self, format: DepthStencilFormat) -> bool {
        self.depth_stencil_formats.contains(format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_version_decodes_and_orders() {
        assert_eq!(ShaderVersion::from_raw(0), ShaderVersion::NONE);
        assert!(!ShaderVersion::from_raw(0).is_supported());

        let v1_1 = ShaderVersion::from_raw(0x0101);
        let v1_4 = ShaderVersion::from_raw(0x0104);
        let v2_0 = ShaderVersion::from_raw(0x0200);
        assert!(v1_1.is_supported());
        assert!(v1_1 < v1_4);
        assert!(v1_4 < v2_0);
        assert_eq!(v1_4.to_string(), "1.4");
    }

    #[test]
    fn format_set_defaults_to_unsupported() {
        let set = FormatSet::none();
        for format in SurfaceFormat::ALL {
            assert!(!set.contains(format));
        }
    }

    #[test]
    fn format_set_tracks_individual_formats() {
        let mut set = FormatSet::none();
        set.set(SurfaceFormat::Dxt1, true);
        assert!(set.contains(SurfaceFormat::Dxt1));
        assert!(!set.contains(SurfaceFormat::Dxt5));
    }

    #[test]
    fn conservative_profile_has_nothing() {
        let profile = CapabilityProfile::conservative();
        assert_eq!(profile.vendor, Vendor::Unknown);
        assert_eq!(profile.driver_status, DriverStatus::Unknown);
        assert!(profile.features.is_empty());
        assert!(!profile.supports_dxtc());
        assert_eq!(profile.max_textures_per_pass, 0);
        assert!(!profile.vertex_shader.is_supported());
    }
}
