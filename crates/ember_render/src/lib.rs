//! Ember Render System
//!
//! Graphics capability negotiation: maps the heterogeneous, vendor-specific
//! hardware/driver surface onto the small set of feature flags and limits the
//! renderer branches on. Covers vendor/device classification, per-format
//! support probing, driver-quality heuristics, and known-bad-driver
//! workarounds.
//!
//! The resolver is a pure function over an injected [`CapabilitySource`] plus
//! static vendor tables; it never fails, it only degrades to a conservative
//! profile.

pub mod adapter;
pub mod driver;
pub mod format;
pub mod profile;
pub mod raw;
pub mod report;
pub mod resolver;
pub mod source;
pub mod vendor;

mod overrides;

#[cfg(feature = "wgpu-probe")]
pub mod wgpu_probe;

#[cfg(feature = "wgpu-probe")]
pub use wgpu;

pub use adapter::{AdapterIdentity, DriverVersion};
pub use driver::{classify_driver, DriverStatus};
pub use format::{DepthStencilFormat, FormatUsage, SurfaceFormat};
pub use profile::{CapabilityProfile, DepthFormatSet, Features, FormatSet, ShaderVersion};
pub use raw::{has_feature, RawDeviceCaps};
pub use resolver::{resolve_profile, DeviceCaps};
pub use source::{CapabilitySource, DisplayMode, ReferenceAdapter};
pub use vendor::{classify_device, DeviceFamily, Vendor};
