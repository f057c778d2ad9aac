//! Input loading for module files.
//!
//! Modules are read whole into memory. A file that starts with a zip local
//! header is treated as an archive holding exactly one module.

use anyhow::{bail, Context, Result};
use modvault_format::Module;
use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::ZipArchive;

/// File extensions picked up by directory scans.
pub const MODULE_EXTENSIONS: &[&str] = &["mod", "s3m", "xm", "it", "zip"];

/// Zip local file header magic.
pub const ZIP_MAGIC: &[u8; 4] = b"PK\x03\x04";

/// Raw module bytes plus where they came from.
#[derive(Debug)]
pub struct ModuleInput {
    /// Path of the file on disk.
    pub path: PathBuf,
    /// Name of the archive entry, when the file was a zip.
    pub archive_entry: Option<String>,
    /// The module bytes (extracted if zipped).
    pub bytes: Vec<u8>,
}

/// A decoded module with its input.
#[derive(Debug)]
pub struct LoadedModule {
    pub input: ModuleInput,
    pub module: Module,
}

/// Returns true when `path` carries one of [`MODULE_EXTENSIONS`].
pub fn has_module_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            MODULE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Read a module file, unpacking single-entry zip archives.
pub fn read_module(path: &Path) -> Result<ModuleInput> {
    let data =
        fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;

    if data.starts_with(ZIP_MAGIC) {
        let (entry, bytes) = unzip_single(&data)
            .with_context(|| format!("Failed to unpack archive: {}", path.display()))?;
        debug!(path = %path.display(), entry = %entry, len = bytes.len(), "unpacked zip entry");
        return Ok(ModuleInput {
            path: path.to_path_buf(),
            archive_entry: Some(entry),
            bytes,
        });
    }

    Ok(ModuleInput {
        path: path.to_path_buf(),
        archive_entry: None,
        bytes: data,
    })
}

/// Read and decode a module file.
pub fn load_module(path: &Path) -> Result<LoadedModule> {
    let input = read_module(path)?;
    let module = modvault_format::load(&input.bytes)
        .with_context(|| format!("Failed to decode module: {}", path.display()))?;
    Ok(LoadedModule { input, module })
}

fn unzip_single(data: &[u8]) -> Result<(String, Vec<u8>)> {
    let mut archive = ZipArchive::new(Cursor::new(data)).context("Not a valid zip archive")?;

    if archive.len() != 1 {
        bail!("Expected 1 file in zip archive, found {}", archive.len());
    }

    let mut file = archive.by_index(0).context("Cannot read zip entry")?;
    let name = file.name().to_string();
    let mut bytes = Vec::with_capacity(capacity_hint(file.size(), data.len()));
    file.read_to_end(&mut bytes)
        .with_context(|| format!("Cannot extract zip entry: {}", name))?;
    Ok((name, bytes))
}

/// Preallocation for an entry: its declared size, capped at the archive length.
fn capacity_hint(declared: u64, archive_len: usize) -> usize {
    usize::try_from(declared).map_or(archive_len, |size| size.min(archive_len))
}
