use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub fn bundle_name(stem: &str) -> String {
    format!("{}_dashboard.zip", stem)
}

/// Zips `files` (relative to `out_dir`) under a `<stem>_dashboard/` root.
pub fn write_bundle(out_dir: &Path, stem: &str, files: &[PathBuf]) -> Result<PathBuf> {
    let root = format!("{}_dashboard", stem);
    let zip_name = bundle_name(stem);
    let zip_path = out_dir.join(&zip_name);
    let tmp_path = out_dir.join(format!("{}.tmp", zip_name));

    let file = File::create(&tmp_path)
        .with_context(|| format!("failed to create {}", tmp_path.display()))?;
    let mut zip = ZipWriter::new(file);
    let result = write_zip_entries(&mut zip, out_dir, &root, files);

    match result.and_then(|_| zip.finish().with_context(|| "failed to finalize zip")) {
        Ok(_) => {
            fs::rename(&tmp_path, &zip_path)
                .with_context(|| format!("failed to move zip to {}", zip_path.display()))?;
            Ok(zip_path)
        }
        Err(e) => {
            let _ = fs::remove_file(&tmp_path);
            Err(e)
        }
    }
}

fn write_zip_entries(
    zip: &mut ZipWriter<File>,
    out_dir: &Path,
    root: &str,
    files: &[PathBuf],
) -> Result<()> {
    let epoch = zip::DateTime::from_date_and_time(1980, 1, 1, 0, 0, 0)
        .map_err(|e| anyhow::anyhow!("invalid zip timestamp: {e:?}"))?;
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(epoch);

    zip.add_directory(format!("{}/", root), options)
        .with_context(|| "failed to add directory entry to zip")?;

    let mut dirs: Vec<String> = Vec::new();
    for rel in files {
        if let Some(parent) = rel.parent().filter(|p| !p.as_os_str().is_empty()) {
            let dir = format!("{}/{}/", root, zip_entry_name(parent));
            if !dirs.contains(&dir) {
                zip.add_directory(dir.as_str(), options)
                    .with_context(|| format!("failed to add {} to zip", dir))?;
                dirs.push(dir);
            }
        }
        let src_path = out_dir.join(rel);
        let entry = format!("{}/{}", root, zip_entry_name(rel));
        add_file(zip, &src_path, &entry, options)
            .with_context(|| format!("failed to add {} to zip", rel.display()))?;
    }
    Ok(())
}

fn zip_entry_name(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn add_file(
    zip: &mut ZipWriter<File>,
    src_path: &Path,
    zip_path: &str,
    options: SimpleFileOptions,
) -> Result<()> {
    let mut file =
        File::open(src_path).with_context(|| format!("failed to open {}", src_path.display()))?;
    zip.start_file(zip_path, options)?;
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        zip.write_all(&buf[..n])?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/zip.rs"]
mod tests;
