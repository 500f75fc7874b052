//! Ember Engine Runtime
//!
//! Minimal binary that boots logging, loads services, and resolves a
//! capability profile from the built-in reference adapter description.

use anyhow::Result;
use ember_render::{DeviceCaps, ReferenceAdapter, SurfaceFormat};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    tracing::info!("Ember Engine v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("System language: {}", ember_services::system_language());

    let identity = ReferenceAdapter::identity();
    let caps = DeviceCaps::resolve(ReferenceAdapter, SurfaceFormat::X8R8G8B8, &identity);

    for line in caps.profile().report().lines() {
        tracing::info!("{line}");
    }

    Ok(())
}
