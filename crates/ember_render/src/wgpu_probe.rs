//! Live capability probing through wgpu
//!
//! Adapts a `wgpu::Adapter` to [`CapabilitySource`] so real hardware can be
//! resolved through the same path as canned descriptions. The legacy-shaped
//! format enumeration maps onto wgpu formats where an equivalent exists;
//! formats with no modern counterpart (palette, 16-bit packed) probe as
//! unsupported, which is exactly what the conservative contract wants.

use crate::adapter::{AdapterIdentity, DriverVersion};
use crate::format::{DepthStencilFormat, FormatUsage, SurfaceFormat};
use crate::raw::{
    DeviceBits, MiscBits, RasterBits, RawDeviceCaps, TextureBits, TextureOpBits,
};
use crate::source::{CapabilitySource, DisplayMode};
use thiserror::Error;

/// Errors acquiring a live adapter. Resolution itself still never fails; this
/// only covers getting hold of something to resolve.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("no compatible graphics adapter found")]
    NoAdapter,
}

/// Capability source backed by a live `wgpu::Adapter`.
pub struct WgpuCapabilitySource {
    adapter: wgpu::Adapter,
}

impl WgpuCapabilitySource {
    /// Acquire the default adapter of the default instance.
    pub fn acquire() -> Result<Self, ProbeError> {
        let instance = wgpu::Instance::default();
        let adapter = pollster::block_on(
            instance.request_adapter(&wgpu::RequestAdapterOptions::default()),
        )
        .ok_or(ProbeError::NoAdapter)?;
        Ok(Self::from_adapter(adapter))
    }

    pub fn from_adapter(adapter: wgpu::Adapter) -> Self {
        Self { adapter }
    }

    /// Identity assembled from `wgpu::AdapterInfo`. The PCI vendor/device IDs
    /// come straight from the backend; driver build information is not
    /// structured in wgpu, so the version reports as zero and driver-quality
    /// classification stays `Unknown`.
    pub fn identity(&self) -> AdapterIdentity {
        let info = self.adapter.get_info();
        AdapterIdentity {
            vendor_id: info.vendor,
            device_id: info.device,
            driver_version: DriverVersion::default(),
            driver_name: info.driver,
            device_name: info.name,
        }
    }

    fn format_features(&self, format: wgpu::TextureFormat) -> wgpu::TextureFormatFeatures {
        self.adapter.get_texture_format_features(format)
    }
}

fn surface_to_wgpu(format: SurfaceFormat) -> Option<wgpu::TextureFormat> {
    match format {
        SurfaceFormat::A8R8G8B8 | SurfaceFormat::X8R8G8B8 => Some(wgpu::TextureFormat::Bgra8Unorm),
        SurfaceFormat::A8 | SurfaceFormat::L8 => Some(wgpu::TextureFormat::R8Unorm),
        SurfaceFormat::A8L8 => Some(wgpu::TextureFormat::Rg8Unorm),
        SurfaceFormat::U8V8 => Some(wgpu::TextureFormat::Rg8Snorm),
        SurfaceFormat::Dxt1 => Some(wgpu::TextureFormat::Bc1RgbaUnorm),
        SurfaceFormat::Dxt2 | SurfaceFormat::Dxt3 => Some(wgpu::TextureFormat::Bc2RgbaUnorm),
        SurfaceFormat::Dxt4 | SurfaceFormat::Dxt5 => Some(wgpu::TextureFormat::Bc3RgbaUnorm),
        _ => None,
    }
}

fn depth_to_wgpu(format: DepthStencilFormat) -> Option<wgpu::TextureFormat> {
    match format {
        DepthStencilFormat::D16 => Some(wgpu::TextureFormat::Depth16Unorm),
        DepthStencilFormat::D24S8 | DepthStencilFormat::D24X4S4 => {
            Some(wgpu::TextureFormat::Depth24PlusStencil8)
        }
        DepthStencilFormat::D24X8 => Some(wgpu::TextureFormat::Depth24Plus),
        DepthStencilFormat::D32 => Some(wgpu::TextureFormat::Depth32Float),
        DepthStencilFormat::D15S1 => None,
    }
}

impl CapabilitySource for WgpuCapabilitySource {
    fn raw_caps(&self) -> RawDeviceCaps {
        let features = self.adapter.features();
        let limits = self.adapter.limits();

        let mut texture = TextureBits::CUBE_MAP;
        if features.contains(wgpu::Features::TEXTURE_COMPRESSION_BC) {
            texture |= TextureBits::COMPRESSION;
        }

        RawDeviceCaps {
            // Anything wgpu exposes transforms on the GPU; fixed-function
            // niceties (N-patches, legacy blend ops, table fog) do not exist.
            device: DeviceBits::HW_TRANSFORM_AND_LIGHT,
            raster: RasterBits::Z_BIAS | RasterBits::ANISOTROPY,
            texture,
            texture_ops: TextureOpBits::empty(),
            misc: MiscBits::empty(),
            max_simultaneous_textures: limits.max_sampled_textures_per_shader_stage.min(8),
            max_supported_textures: limits.max_sampled_textures_per_shader_stage,
            max_texture_width: limits.max_texture_dimension_2d,
            max_texture_height: limits.max_texture_dimension_2d,
            // wgpu has no point sprites.
            max_point_size: 1.0,
            // Programmable pipeline throughout; report a shader-model floor.
            vertex_shader_version: 0x0300,
            pixel_shader_version: 0x0300,
        }
    }

    fn supports_format(&self, format: SurfaceFormat, usage: FormatUsage) -> bool {
        let Some(wgpu_format) = surface_to_wgpu(format) else {
            return false;
        };
        let allowed = self.format_features(wgpu_format).allowed_usages;
        match usage {
            FormatUsage::Texture => allowed.contains(wgpu::TextureUsages::TEXTURE_BINDING),
            FormatUsage::RenderTarget => allowed.contains(wgpu::TextureUsages::RENDER_ATTACHMENT),
        }
    }

    fn supports_depth_format(&self, format: DepthStencilFormat) -> bool {
        let Some(wgpu_format) = depth_to_wgpu(format) else {
            return false;
        };
        self.format_features(wgpu_format)
            .allowed_usages
            .contains(wgpu::TextureUsages::RENDER_ATTACHMENT)
    }

    /// wgpu exposes no display-mode enumeration, so the live source reports
    /// none and `is_valid_display_format` answers `false` (windowed-only).
    fn display_modes(&self, _format: SurfaceFormat) -> Vec<DisplayMode> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_only_formats_never_map() {
        assert!(surface_to_wgpu(SurfaceFormat::P8).is_none());
        assert!(surface_to_wgpu(SurfaceFormat::R5G6B5).is_none());
        assert!(depth_to_wgpu(DepthStencilFormat::D15S1).is_none());
    }

    #[test]
    fn dxt_formats_map_to_bc() {
        assert_eq!(
            surface_to_wgpu(SurfaceFormat::Dxt1),
            Some(wgpu::TextureFormat::Bc1RgbaUnorm)
        );
        assert_eq!(
            surface_to_wgpu(SurfaceFormat::Dxt5),
            Some(wgpu::TextureFormat::Bc3RgbaUnorm)
        );
    }
}
