//! Archive extraction.
//!
//! Handles tar.gz, tar.zst, plain tar, and zip archives, detected by file
//! extension.

use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Component, Path};

use thiserror::Error;
use zip::ZipArchive;
use zstd::stream::Decoder as ZstdDecoder;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Unsupported archive format: {0}")]
    UnsupportedFormat(String),

    #[error("Archive error: {0}")]
    Archive(String),
}

/// Archive container formats recognized by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    TarGz,
    TarZst,
    Tar,
    Zip,
}

/// Detect archive format from the file extension, case-insensitive.
pub fn detect_format(path: &Path) -> Option<ArchiveFormat> {
    let path_str = path.to_string_lossy().to_lowercase();

    if path_str.ends_with(".tar.gz") || path_str.ends_with(".tgz") {
        Some(ArchiveFormat::TarGz)
    } else if path_str.ends_with(".tar.zst") || path_str.ends_with(".tzst") {
        Some(ArchiveFormat::TarZst)
    } else if path_str.ends_with(".tar") {
        Some(ArchiveFormat::Tar)
    } else if path_str.ends_with(".zip") {
        Some(ArchiveFormat::Zip)
    } else {
        None
    }
}

/// Extract an archive into `dest_dir`, auto-detecting the format.
///
/// An unrecognized extension or a missing source is refused as
/// [`ExtractError::UnsupportedFormat`] rather than guessed at.
pub fn extract_archive(archive_path: &Path, dest_dir: &Path) -> Result<(), ExtractError> {
    let format = detect_format(archive_path)
        .filter(|_| archive_path.is_file())
        .ok_or_else(|| ExtractError::UnsupportedFormat(archive_path.display().to_string()))?;

    match format {
        ArchiveFormat::TarGz => {
            let file = File::open(archive_path)?;
            let decoder = flate2::read::GzDecoder::new(BufReader::new(file));
            extract_tar(decoder, dest_dir)
        }
        ArchiveFormat::TarZst => {
            let file = File::open(archive_path)?;
            let decoder = ZstdDecoder::new(BufReader::new(file))?;
            extract_tar(decoder, dest_dir)
        }
        ArchiveFormat::Tar => {
            let file = File::open(archive_path)?;
            extract_tar(BufReader::new(file), dest_dir)
        }
        ArchiveFormat::Zip => extract_zip(archive_path, dest_dir),
    }
}

/// Extract a tar archive from a reader.
fn extract_tar<R: Read>(reader: R, dest_dir: &Path) -> Result<(), ExtractError> {
    fs::create_dir_all(dest_dir)?;

    let mut archive = tar::Archive::new(reader);
    for entry in archive.entries()? {
        let mut entry = entry?;
        let entry_path = entry.path()?.into_owned();

        // Refuse absolute paths and parent traversal (Zip Slip)
        let escapes = entry_path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
        if escapes {
            return Err(ExtractError::Archive(format!(
                "Invalid path in archive: {}",
                entry_path.display()
            )));
        }

        entry.unpack_in(dest_dir)?;
    }

    Ok(())
}

/// Extract a zip archive.
fn extract_zip(archive_path: &Path, dest_dir: &Path) -> Result<(), ExtractError> {
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file).map_err(|e| ExtractError::Archive(e.to_string()))?;

    fs::create_dir_all(dest_dir)?;

    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| ExtractError::Archive(e.to_string()))?;
        // enclosed_name rejects traversal; entries outside the root are skipped
        let Some(relative_path) = file.enclosed_name() else {
            continue;
        };

        let out_path = dest_dir.join(relative_path);

        if file.is_dir() {
            fs::create_dir_all(&out_path)?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut outfile = File::create(&out_path)?;
        io::copy(&mut file, &mut outfile)?;

        #[cfg(unix)]
        if let Some(mode) = file.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&out_path, fs::Permissions::from_mode(mode))?;
        }
    }

    Ok(())
}

/// If `dir` holds exactly one top-level directory, move its contents up and
/// remove it. Hidden files do not count against the single-entry rule.
pub fn strip_components(dir: &Path) -> io::Result<()> {
    let mut entries: Vec<_> = fs::read_dir(dir)?.filter_map(|e| e.ok()).collect();
    entries.retain(|e| !e.file_name().to_string_lossy().starts_with('.'));

    if entries.len() == 1 && entries[0].file_type()?.is_dir() {
        let top_level = entries[0].path();
        for entry in fs::read_dir(&top_level)?.filter_map(|e| e.ok()) {
            fs::rename(entry.path(), dir.join(entry.file_name()))?;
        }
        fs::remove_dir(top_level)?;
    }

    Ok(())
}
