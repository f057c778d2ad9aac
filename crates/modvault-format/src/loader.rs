//! Format sniffing and dispatch.

use tracing::debug;

use crate::error::{ModuleError, Result};
use crate::it::{ItModule, IT_SIGNATURE};
use crate::module::{Module, ModuleFormat};
use crate::protracker::ProTrackerModule;
use crate::s3m::{S3mModule, S3M_SIGNATURE};
use crate::xm::{XmModule, XM_ID_TEXT};

/// Smallest buffer the sniffer will look at.
pub const MIN_PROBE_LEN: usize = 44;

/// Identify the format of a module buffer.
///
/// Checked in order: `SCRM` at 44, the XM ID text at 0, `IMPM` at 0. A buffer
/// matching none of them is taken to be a ProTracker module.
pub fn sniff(data: &[u8]) -> Result<ModuleFormat> {
    if data.len() < MIN_PROBE_LEN {
        return Err(ModuleError::format(format!(
            "buffer is {} bytes, at least {} are needed to identify a module",
            data.len(),
            MIN_PROBE_LEN
        )));
    }

    let probe = |offset: usize, signature: &[u8]| {
        data.get(offset..offset + signature.len()) == Some(signature)
    };

    let format = if probe(44, S3M_SIGNATURE) {
        ModuleFormat::ScreamTracker
    } else if probe(0, XM_ID_TEXT) {
        ModuleFormat::FastTracker
    } else if probe(0, IT_SIGNATURE) {
        ModuleFormat::ImpulseTracker
    } else {
        ModuleFormat::ProTracker
    };
    Ok(format)
}

/// Sniff the buffer and decode it with the matching decoder.
pub fn load(data: &[u8]) -> Result<Module> {
    let format = sniff(data)?;
    debug!(%format, length = data.len(), "loading module");

    let module = match format {
        ModuleFormat::ProTracker => Module::ProTracker(ProTrackerModule::decode(data)?),
        ModuleFormat::ScreamTracker => Module::ScreamTracker(S3mModule::decode(data)?),
        ModuleFormat::FastTracker => Module::FastTracker(XmModule::decode(data)?),
        ModuleFormat::ImpulseTracker => Module::ImpulseTracker(ItModule::decode(data)?),
    };
    Ok(module)
}
