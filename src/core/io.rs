use crate::core::error::{DashResult, DashboardError};
use flate2::read::MultiGzDecoder;
use memmap2::Mmap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub struct MmapSource {
    mmap: Mmap,
}

impl MmapSource {
    pub fn open(path: &Path) -> DashResult<Self> {
        let file = File::open(path).map_err(|e| DashboardError::data_load(path, e.to_string()))?;
        // SAFETY: read-only file mapping.
        let mmap = unsafe { Mmap::map(&file) }
            .map_err(|e| DashboardError::data_load(path, format!("mmap failed: {e}")))?;
        Ok(Self { mmap })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.mmap
    }

    pub fn len(&self) -> usize {
        self.mmap.len()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputKind {
    Plain,
    Gzip,
}

pub fn detect_input_kind(bytes: &[u8]) -> InputKind {
    if bytes.len() >= 2 && bytes[0] == 0x1f && bytes[1] == 0x8b {
        InputKind::Gzip
    } else {
        InputKind::Plain
    }
}

/// File contents, mapped when plain and decompressed into memory when gzip.
pub enum InputBytes {
    Mapped(MmapSource),
    Owned(Vec<u8>),
}

impl InputBytes {
    pub fn as_slice(&self) -> &[u8] {
        match self {
            InputBytes::Mapped(m) => m.bytes(),
            InputBytes::Owned(v) => v,
        }
    }

    pub fn kind_label(&self) -> &'static str {
        match self {
            InputBytes::Mapped(_) => "plain",
            InputBytes::Owned(_) => "gzip",
        }
    }
}

pub fn read_input(path: &Path) -> DashResult<InputBytes> {
    let meta = std::fs::metadata(path).map_err(|e| DashboardError::data_load(path, e.to_string()))?;
    if !meta.is_file() {
        return Err(DashboardError::data_load(path, "not a regular file"));
    }
    if meta.len() == 0 {
        return Ok(InputBytes::Owned(Vec::new()));
    }
    let source = MmapSource::open(path)?;
    match detect_input_kind(source.bytes()) {
        InputKind::Plain => Ok(InputBytes::Mapped(source)),
        InputKind::Gzip => {
            let mut out = Vec::with_capacity(source.len() * 4);
            MultiGzDecoder::new(source.bytes())
                .read_to_end(&mut out)
                .map_err(|e| DashboardError::data_load(path, format!("gzip decode failed: {e}")))?;
            Ok(InputBytes::Owned(out))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/core/io.rs"]
mod tests;
