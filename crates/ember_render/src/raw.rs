//! Raw device capability descriptor
//!
//! The bit groups mirror the shape of the capability blocks a graphics driver
//! reports: one mask per functional area plus a handful of numeric limits.
//! Nothing here is normalized; `resolver` turns this into a
//! [`CapabilityProfile`](crate::profile::CapabilityProfile).

use bitflags::bitflags;

bitflags! {
    /// Device-level pipeline capabilities.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DeviceBits: u32 {
        /// Transform and lighting runs on the GPU.
        const HW_TRANSFORM_AND_LIGHT = 1 << 0;
        /// N-patch (quintic/adaptive) tessellation.
        const NPATCHES = 1 << 1;
    }
}

bitflags! {
    /// Rasterizer capabilities.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct RasterBits: u32 {
        const Z_BIAS = 1 << 0;
        const ANISOTROPY = 1 << 1;
        const FOG_TABLE = 1 << 2;
        const FOG_VERTEX = 1 << 3;
    }
}

bitflags! {
    /// Texture addressing/storage capabilities.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextureBits: u32 {
        const CUBE_MAP = 1 << 0;
        const COMPRESSION = 1 << 1;
    }
}

bitflags! {
    /// Texture-stage blend operation capabilities.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextureOpBits: u32 {
        const BUMP_ENVMAP = 1 << 0;
        const BUMP_ENVMAP_LUMINANCE = 1 << 1;
        const MODULATE_ALPHA_ADD_COLOR = 1 << 2;
        const DOT_PRODUCT3 = 1 << 3;
    }
}

bitflags! {
    /// Miscellaneous capabilities that fit no other group.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MiscBits: u32 {
        /// Full-screen gamma ramp control.
        const FULLSCREEN_GAMMA = 1 << 0;
    }
}

/// Raw, unnormalized capability descriptor reported by the graphics device.
///
/// Immutable input to resolution; the resolver never writes back into it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawDeviceCaps {
    pub device: DeviceBits,
    pub raster: RasterBits,
    pub texture: TextureBits,
    pub texture_ops: TextureOpBits,
    pub misc: MiscBits,

    /// Textures the fixed-function pipeline can blend in a single pass.
    pub max_simultaneous_textures: u32,
    /// Texture blend stages the device exposes overall.
    pub max_supported_textures: u32,
    pub max_texture_width: u32,
    pub max_texture_height: u32,
    /// Largest point sprite size; 1.0 means plain one-pixel points only.
    pub max_point_size: f32,

    /// Vertex shader model, encoded as `0xMMmm`; 0 means no shader support.
    pub vertex_shader_version: u32,
    /// Pixel shader model, encoded as `0xMMmm`; 0 means no shader support.
    pub pixel_shader_version: u32,
}

/// All-bits-set feature test.
///
/// A feature that requires a combination of sub-capabilities counts as
/// supported only when every bit of its mask is present; there is no notion of
/// a partially supported feature.
#[inline]
pub const fn has_feature(caps: u32, feature: u32) -> bool {
    caps & feature == feature
}
