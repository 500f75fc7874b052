//! Capability source abstraction
//!
//! The resolver never talks to a graphics API directly; it queries whatever
//! implements [`CapabilitySource`]. Production code plugs in a live backend,
//! tests and the runtime smoke path plug in canned descriptions.

use crate::adapter::{AdapterIdentity, DriverVersion};
use crate::format::{DepthStencilFormat, FormatUsage, SurfaceFormat};
use crate::raw::{
    DeviceBits, MiscBits, RasterBits, RawDeviceCaps, TextureBits, TextureOpBits,
};

/// A display mode (width/height) enumerable for a given surface format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayMode {
    pub width: u32,
    pub height: u32,
}

impl DisplayMode {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Read-only query interface over the underlying graphics API.
///
/// The resolver issues no mutating calls through this trait. All queries are
/// synchronous and local; there is no cancellation or timeout to model.
pub trait CapabilitySource {
    /// The raw capability descriptor for the adapter.
    fn raw_caps(&self) -> RawDeviceCaps;

    /// Whether `format` can be used for the given usage class.
    fn supports_format(&self, format: SurfaceFormat, usage: FormatUsage) -> bool;

    /// Whether `format` can be used as a depth/stencil attachment.
    fn supports_depth_format(&self, format: DepthStencilFormat) -> bool;

    /// Display modes available for `format`. Queried live rather than cached,
    /// since available modes can depend on monitor state the capability
    /// snapshot does not capture.
    fn display_modes(&self, format: SurfaceFormat) -> Vec<DisplayMode>;
}

/// Canned capability source describing a well-behaved release-era adapter.
///
/// Used by the runtime smoke path and as a convenient test fixture; it is not
/// a stand-in for live probing.
#[derive(Debug, Clone, Default)]
pub struct ReferenceAdapter;

impl ReferenceAdapter {
    /// Identity matching the canned caps: a GeForce3 on a good driver build.
    pub fn identity() -> AdapterIdentity {
        AdapterIdentity {
            vendor_id: 0x10DE,
            device_id: 0x0200,
            driver_version: DriverVersion::from_packed(0x0006_000E, 0x000A_1267),
            driver_name: "nv4_disp.dll".to_string(),
            device_name: "GeForce3".to_string(),
        }
    }
}

impl CapabilitySource for ReferenceAdapter {
    fn raw_caps(&self) -> RawDeviceCaps {
        RawDeviceCaps {
            device: DeviceBits::HW_TRANSFORM_AND_LIGHT | DeviceBits::NPATCHES,
            raster: RasterBits::Z_BIAS
                | RasterBits::ANISOTROPY
                | RasterBits::FOG_TABLE
                | RasterBits::FOG_VERTEX,
            texture: TextureBits::CUBE_MAP | TextureBits::COMPRESSION,
            texture_ops: TextureOpBits::BUMP_ENVMAP
                | TextureOpBits::BUMP_ENVMAP_LUMINANCE
                | TextureOpBits::MODULATE_ALPHA_ADD_COLOR
                | TextureOpBits::DOT_PRODUCT3,
            misc: MiscBits::FULLSCREEN_GAMMA,
            max_simultaneous_textures: 4,
            max_supported_textures: 8,
            max_texture_width: 4096,
            max_texture_height: 4096,
            max_point_size: 64.0,
            vertex_shader_version: 0x0101,
            pixel_shader_version: 0x0101,
        }
    }

    fn supports_format(&self, format: SurfaceFormat, usage: FormatUsage) -> bool {
        match usage {
            // Everything except the odd palette formats samples fine.
            FormatUsage::Texture => !matches!(
                format,
                SurfaceFormat::A8P8 | SurfaceFormat::P8 | SurfaceFormat::A8R3G3B2
            ),
            FormatUsage::RenderTarget => matches!(
                format,
                SurfaceFormat::A8R8G8B8
                    | SurfaceFormat::X8R8G8B8
                    | SurfaceFormat::R5G6B5
                    | SurfaceFormat::X1R5G5B5
            ),
        }
    }

    fn supports_depth_format(&self, format: DepthStencilFormat) -> bool {
        matches!(
            format,
            DepthStencilFormat::D16 | DepthStencilFormat::D24S8 | DepthStencilFormat::D24X8
        )
    }

    fn display_modes(&self, format: SurfaceFormat) -> Vec<DisplayMode> {
        match format {
            SurfaceFormat::X8R8G8B8 | SurfaceFormat::R5G6B5 => vec![
                DisplayMode::new(640, 480),
                DisplayMode::new(800, 600),
                DisplayMode::new(1024, 768),
                DisplayMode::new(1280, 1024),
                DisplayMode::new(1600, 1200),
            ],
            _ => Vec::new(),
        }
    }
}
