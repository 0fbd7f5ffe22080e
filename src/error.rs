// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
}

/// Specific error types for the upload workflow.
/// Used to provide user-friendly messages in the status banner.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadError {
    /// Selected file exceeds the service's upload limit.
    FileTooLarge { size_bytes: u64 },

    /// Selected file is not one of the accepted video formats.
    UnsupportedFormat(String),

    /// The request never reached the service (DNS, refused connection, timeout).
    Connection(String),

    /// The service answered with an error status; `detail` carries the
    /// server-provided explanation when the body parsed.
    Server { status: u16, detail: Option<String> },

    /// The service answered 2xx but the body did not match the wire format.
    InvalidResponse(String),

    /// Local I/O failed (reading the selection, writing a download).
    Io(String),
}

impl UploadError {
    /// Message shown to the user in the error banner. Prefers the server's
    /// `detail` field, falling back to a generic description.
    pub fn user_message(&self) -> String {
        match self {
            UploadError::FileTooLarge { .. } => {
                "File size too large. Maximum 100MB allowed.".to_string()
            }
            UploadError::UnsupportedFormat(_) => {
                "Invalid file type. Please upload a video file (MP4, AVI, MOV, MKV).".to_string()
            }
            UploadError::Server {
                detail: Some(detail),
                ..
            } => detail.clone(),
            UploadError::Server { detail: None, .. } | UploadError::InvalidResponse(_) => {
                "Error processing video".to_string()
            }
            UploadError::Connection(_) => {
                "Could not reach the detection service. Is it running?".to_string()
            }
            UploadError::Io(_) => "An unexpected error occurred".to_string(),
        }
    }

    /// Technical detail for the collapsible section of the banner, when it
    /// adds anything beyond the user message.
    pub fn technical_detail(&self) -> Option<String> {
        match self {
            UploadError::FileTooLarge { size_bytes } => {
                Some(format!("Selected file is {} bytes", size_bytes))
            }
            UploadError::UnsupportedFormat(ext) => Some(format!("Detected extension: {ext}")),
            UploadError::Connection(msg) => Some(msg.clone()),
            UploadError::Server { status, .. } => Some(format!("HTTP status: {status}")),
            UploadError::InvalidResponse(msg) => Some(msg.clone()),
            UploadError::Io(msg) => Some(msg.clone()),
        }
    }
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::FileTooLarge { size_bytes } => {
                write!(f, "File too large: {} bytes", size_bytes)
            }
            UploadError::UnsupportedFormat(ext) => {
                write!(f, "Unsupported video format: {ext}")
            }
            UploadError::Connection(msg) => write!(f, "Connection failed: {msg}"),
            UploadError::Server { status, detail } => match detail {
                Some(detail) => write!(f, "Server error {status}: {detail}"),
                None => write!(f, "Server error {status}"),
            },
            UploadError::InvalidResponse(msg) => write!(f, "Invalid response: {msg}"),
            UploadError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<std::io::Error> for UploadError {
    fn from(err: std::io::Error) -> Self {
        UploadError::Io(err.to_string())
    }
}

impl From<reqwest::Error> for UploadError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            UploadError::InvalidResponse(err.to_string())
        } else {
            UploadError::Connection(err.to_string())
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn server_detail_is_preferred_in_user_message() {
        let err = UploadError::Server {
            status: 400,
            detail: Some("Invalid file format. Only video files are allowed.".to_string()),
        };
        assert_eq!(
            err.user_message(),
            "Invalid file format. Only video files are allowed."
        );
    }

    #[test]
    fn missing_server_detail_falls_back_to_generic_message() {
        let err = UploadError::Server {
            status: 500,
            detail: None,
        };
        assert_eq!(err.user_message(), "Error processing video");
    }

    #[test]
    fn size_rejection_names_the_limit() {
        let err = UploadError::FileTooLarge {
            size_bytes: 200_000_000,
        };
        assert!(err.user_message().contains("100MB"));
        assert!(err.technical_detail().unwrap().contains("200000000"));
    }

    #[test]
    fn format_rejection_lists_accepted_formats() {
        let err = UploadError::UnsupportedFormat("txt".to_string());
        let message = err.user_message();
        assert!(message.contains("MP4"));
        assert!(message.contains("MKV"));
    }

    #[test]
    fn upload_error_display() {
        let err = UploadError::Server {
            status: 404,
            detail: Some("Video not found".to_string()),
        };
        assert_eq!(format!("{}", err), "Server error 404: Video not found");
    }
}
