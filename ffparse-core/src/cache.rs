//! Populate-once cache of the capability listings.
//!
//! Listing the codecs of an ffmpeg build takes a process spawn and a few
//! hundred rows of parsing. The lists never change for a given executable, so
//! each one is filled on first use and then only read.

use crate::error::CoreResult;
use crate::media::{CodecCapability, DeviceCapability};
use crate::parsing::ToolVersion;
use once_cell::unsync::OnceCell;

/// Capability lists of one executable.
#[derive(Debug, Default)]
pub struct CapabilityCache {
    version: OnceCell<ToolVersion>,
    codecs: OnceCell<Vec<CodecCapability>>,
    devices: OnceCell<Vec<DeviceCapability>>,
}

impl CapabilityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached version, running `load` on first use. A failed load
    /// leaves the cell empty so the next call tries again.
    pub fn version_or_load<F>(&self, load: F) -> CoreResult<&ToolVersion>
    where
        F: FnOnce() -> CoreResult<ToolVersion>,
    {
        self.version.get_or_try_init(load)
    }

    pub fn codecs_or_load<F>(&self, load: F) -> CoreResult<&[CodecCapability]>
    where
        F: FnOnce() -> CoreResult<Vec<CodecCapability>>,
    {
        self.codecs.get_or_try_init(load).map(Vec::as_slice)
    }

    pub fn devices_or_load<F>(&self, load: F) -> CoreResult<&[DeviceCapability]>
    where
        F: FnOnce() -> CoreResult<Vec<DeviceCapability>>,
    {
        self.devices.get_or_try_init(load).map(Vec::as_slice)
    }

    /// Cached codecs, if already loaded.
    pub fn codecs(&self) -> Option<&[CodecCapability]> {
        self.codecs.get().map(Vec::as_slice)
    }

    /// Cached devices, if already loaded.
    pub fn devices(&self) -> Option<&[DeviceCapability]> {
        self.devices.get().map(Vec::as_slice)
    }

    pub fn version(&self) -> Option<&ToolVersion> {
        self.version.get()
    }
}
