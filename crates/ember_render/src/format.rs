//! Engine surface and depth/stencil format enumerations

/// Color/texture surface formats the engine knows how to sample or render to.
///
/// The renderer never assumes a format is available; support is probed per
/// format and per usage at device initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SurfaceFormat {
    R8G8B8,
    A8R8G8B8,
    X8R8G8B8,
    R5G6B5,
    X1R5G5B5,
    A1R5G5B5,
    A4R4G4B4,
    R3G3B2,
    A8,
    A8R3G3B2,
    X4R4G4B4,
    A8P8,
    P8,
    L8,
    A8L8,
    A4L4,
    /// Signed bump map format.
    U8V8,
    /// Mixed bump/luminance format.
    L6V5U5,
    X8L8V8U8,
    Dxt1,
    Dxt2,
    Dxt3,
    Dxt4,
    Dxt5,
}

impl SurfaceFormat {
    /// Number of surface formats in the enumeration.
    pub const COUNT: usize = 24;

    /// Every surface format, in declaration order. Probing fans out over this.
    pub const ALL: [SurfaceFormat; Self::COUNT] = [
        SurfaceFormat::R8G8B8,
        SurfaceFormat::A8R8G8B8,
        SurfaceFormat::X8R8G8B8,
        SurfaceFormat::R5G6B5,
        SurfaceFormat::X1R5G5B5,
        SurfaceFormat::A1R5G5B5,
        SurfaceFormat::A4R4G4B4,
        SurfaceFormat::R3G3B2,
        SurfaceFormat::A8,
        SurfaceFormat::A8R3G3B2,
        SurfaceFormat::X4R4G4B4,
        SurfaceFormat::A8P8,
        SurfaceFormat::P8,
        SurfaceFormat::L8,
        SurfaceFormat::A8L8,
        SurfaceFormat::A4L4,
        SurfaceFormat::U8V8,
        SurfaceFormat::L6V5U5,
        SurfaceFormat::X8L8V8U8,
        SurfaceFormat::Dxt1,
        SurfaceFormat::Dxt2,
        SurfaceFormat::Dxt3,
        SurfaceFormat::Dxt4,
        SurfaceFormat::Dxt5,
    ];

    /// Index into per-format support tables.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// True for block-compressed (DXT) formats.
    #[inline]
    pub fn is_compressed(self) -> bool {
        matches!(
            self,
            SurfaceFormat::Dxt1
                | SurfaceFormat::Dxt2
                | SurfaceFormat::Dxt3
                | SurfaceFormat::Dxt4
                | SurfaceFormat::Dxt5
        )
    }

    /// Short display name used in diagnostic reports.
    pub fn name(self) -> &'static str {
        match self {
            SurfaceFormat::R8G8B8 => "R8G8B8",
            SurfaceFormat::A8R8G8B8 => "A8R8G8B8",
            SurfaceFormat::X8R8G8B8 => "X8R8G8B8",
            SurfaceFormat::R5G6B5 => "R5G6B5",
            SurfaceFormat::X1R5G5B5 => "X1R5G5B5",
            SurfaceFormat::A1R5G5B5 => "A1R5G5B5",
            SurfaceFormat::A4R4G4B4 => "A4R4G4B4",
            SurfaceFormat::R3G3B2 => "R3G3B2",
            SurfaceFormat::A8 => "A8",
            SurfaceFormat::A8R3G3B2 => "A8R3G3B2",
            SurfaceFormat::X4R4G4B4 => "X4R4G4B4",
            SurfaceFormat::A8P8 => "A8P8",
            SurfaceFormat::P8 => "P8",
            SurfaceFormat::L8 => "L8",
            SurfaceFormat::A8L8 => "A8L8",
            SurfaceFormat::A4L4 => "A4L4",
            SurfaceFormat::U8V8 => "U8V8",
            SurfaceFormat::L6V5U5 => "L6V5U5",
            SurfaceFormat::X8L8V8U8 => "X8L8V8U8",
            SurfaceFormat::Dxt1 => "DXT1",
            SurfaceFormat::Dxt2 => "DXT2",
            SurfaceFormat::Dxt3 => "DXT3",
            SurfaceFormat::Dxt4 => "DXT4",
            SurfaceFormat::Dxt5 => "DXT5",
        }
    }
}

/// Depth/stencil buffer formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DepthStencilFormat {
    D16,
    D32,
    D15S1,
    D24S8,
    D24X8,
    D24X4S4,
}

impl DepthStencilFormat {
    /// Number of depth/stencil formats in the enumeration.
    pub const COUNT: usize = 6;

    /// Every depth/stencil format, in declaration order.
    pub const ALL: [DepthStencilFormat; Self::COUNT] = [
        DepthStencilFormat::D16,
        DepthStencilFormat::D32,
        DepthStencilFormat::D15S1,
        DepthStencilFormat::D24S8,
        DepthStencilFormat::D24X8,
        DepthStencilFormat::D24X4S4,
    ];

    /// Index into per-format support tables.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Short display name used in diagnostic reports.
    pub fn name(self) -> &'static str {
        match self {
            DepthStencilFormat::D16 => "D16",
            DepthStencilFormat::D32 => "D32",
            DepthStencilFormat::D15S1 => "D15S1",
            DepthStencilFormat::D24S8 => "D24S8",
            DepthStencilFormat::D24X8 => "D24X8",
            DepthStencilFormat::D24X4S4 => "D24X4S4",
        }
    }
}

/// How a surface format is going to be used.
///
/// Depth/stencil attachment is probed through its own format enumeration and
/// is not part of this usage set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatUsage {
    /// Ordinary texture sampling.
    Texture,
    /// Render-target attachment.
    RenderTarget,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_covers_every_surface_format() {
        assert_eq!(SurfaceFormat::ALL.len(), SurfaceFormat::COUNT);
        for (i, format) in SurfaceFormat::ALL.iter().enumerate() {
            assert_eq!(format.index(), i);
        }
    }

    #[test]
    fn all_covers_every_depth_format() {
        assert_eq!(DepthStencilFormat::ALL.len(), DepthStencilFormat::COUNT);
        for (i, format) in DepthStencilFormat::ALL.iter().enumerate() {
            assert_eq!(format.index(), i);
        }
    }

    #[test]
    fn only_dxt_formats_are_compressed() {
        let compressed: Vec<_> = SurfaceFormat::ALL
            .iter()
            .filter(|f| f.is_compressed())
            .collect();
        assert_eq!(compressed.len(), 5);
        assert!(SurfaceFormat::Dxt1.is_compressed());
        assert!(!SurfaceFormat::A8R8G8B8.is_compressed());
    }
}
