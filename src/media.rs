// SPDX-License-Identifier: MPL-2.0
//! Selection and validation of local video files.
//!
//! The service accepts a small set of container formats and caps uploads at
//! 100 MB. Both rules are enforced here, before any bytes leave the machine,
//! so an invalid pick never mutates the application's selection state.

use crate::error::UploadError;
use std::path::{Path, PathBuf};

/// Upload size limit enforced by the detection service.
pub const MAX_UPLOAD_BYTES: u64 = 100 * 1024 * 1024;

/// Container formats the detection service accepts.
///
/// The MIME values mirror what the service expects on the wire; the desktop
/// client derives the format from the file extension since there is no
/// browser to supply a MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoFormat {
    Mp4,
    Avi,
    QuickTime,
    Matroska,
}

/// File extensions offered in the open dialog filter.
pub const DIALOG_EXTENSIONS: [&str; 4] = ["mp4", "avi", "mov", "mkv"];

impl VideoFormat {
    /// Maps a file extension (without dot, any case) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "mp4" => Some(VideoFormat::Mp4),
            "avi" => Some(VideoFormat::Avi),
            "mov" => Some(VideoFormat::QuickTime),
            "mkv" => Some(VideoFormat::Matroska),
            _ => None,
        }
    }

    /// MIME type sent in the multipart part.
    pub fn mime(&self) -> &'static str {
        match self {
            VideoFormat::Mp4 => "video/mp4",
            VideoFormat::Avi => "video/avi",
            VideoFormat::QuickTime => "video/quicktime",
            VideoFormat::Matroska => "video/x-matroska",
        }
    }

    /// Short label shown in the selection card.
    pub fn label(&self) -> &'static str {
        match self {
            VideoFormat::Mp4 => "MP4",
            VideoFormat::Avi => "AVI",
            VideoFormat::QuickTime => "MOV",
            VideoFormat::Matroska => "MKV",
        }
    }
}

/// A video file that passed validation and is ready to upload.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedVideo {
    pub path: PathBuf,
    pub file_name: String,
    pub size_bytes: u64,
    pub format: VideoFormat,
}

/// Validates a picked file and builds the selection.
///
/// Rejects files over [`MAX_UPLOAD_BYTES`] and files whose extension is not
/// an accepted container format. The caller keeps its previous selection on
/// rejection.
pub fn inspect(path: &Path) -> Result<SelectedVideo, UploadError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_string();

    let format = VideoFormat::from_extension(&extension)
        .ok_or_else(|| UploadError::UnsupportedFormat(extension))?;

    let metadata = std::fs::metadata(path)?;
    validate_size(metadata.len())?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("video")
        .to_string();

    Ok(SelectedVideo {
        path: path.to_path_buf(),
        file_name,
        size_bytes: metadata.len(),
        format,
    })
}

/// Enforces the upload size limit.
pub fn validate_size(size_bytes: u64) -> Result<(), UploadError> {
    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(UploadError::FileTooLarge { size_bytes });
    }
    Ok(())
}

/// Human-readable file size for the selection card.
pub fn format_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = 1024.0 * 1024.0;

    let bytes_f = bytes as f64;
    if bytes_f >= MIB {
        format!("{:.1} MB", bytes_f / MIB)
    } else if bytes_f >= KIB {
        format!("{:.1} KB", bytes_f / KIB)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn accepted_extensions_map_to_formats() {
        assert_eq!(VideoFormat::from_extension("mp4"), Some(VideoFormat::Mp4));
        assert_eq!(VideoFormat::from_extension("AVI"), Some(VideoFormat::Avi));
        assert_eq!(
            VideoFormat::from_extension("mov"),
            Some(VideoFormat::QuickTime)
        );
        assert_eq!(
            VideoFormat::from_extension("mkv"),
            Some(VideoFormat::Matroska)
        );
        assert_eq!(VideoFormat::from_extension("webm"), None);
        assert_eq!(VideoFormat::from_extension(""), None);
    }

    #[test]
    fn mime_values_match_the_service_contract() {
        assert_eq!(VideoFormat::Mp4.mime(), "video/mp4");
        assert_eq!(VideoFormat::Avi.mime(), "video/avi");
        assert_eq!(VideoFormat::QuickTime.mime(), "video/quicktime");
        assert_eq!(VideoFormat::Matroska.mime(), "video/x-matroska");
    }

    #[test]
    fn size_limit_is_100_mib() {
        assert!(validate_size(MAX_UPLOAD_BYTES).is_ok());
        let err = validate_size(MAX_UPLOAD_BYTES + 1).unwrap_err();
        assert!(matches!(err, UploadError::FileTooLarge { .. }));
    }

    #[test]
    fn inspect_accepts_a_small_mp4() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"not really a video").unwrap();

        let selected = inspect(&path).unwrap();
        assert_eq!(selected.file_name, "clip.mp4");
        assert_eq!(selected.format, VideoFormat::Mp4);
        assert_eq!(selected.size_bytes, 18);
    }

    #[test]
    fn inspect_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::File::create(&path).unwrap();

        let err = inspect(&path).unwrap_err();
        assert_eq!(err, UploadError::UnsupportedFormat("txt".to_string()));
    }

    #[test]
    fn inspect_rejects_missing_file() {
        let err = inspect(Path::new("/nonexistent/clip.mp4")).unwrap_err();
        assert!(matches!(err, UploadError::Io(_)));
    }

    #[test]
    fn sizes_format_for_display() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }
}
