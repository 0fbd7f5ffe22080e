// SPDX-License-Identifier: MPL-2.0
//! HTTP client for the chip detection service.
//!
//! The service is an opaque collaborator: it takes a video as multipart form
//! data on `POST /detect_chips/`, returns the name of a processed video plus
//! a metrics record, and serves the processed artifact from
//! `/processed_videos/{name}`. Nothing in this module decodes or inspects
//! video content.

use crate::error::UploadError;
use crate::media::SelectedVideo;
use serde::Deserialize;
use std::path::PathBuf;

/// User agent sent with every request.
const USER_AGENT: &str = "ChipView/0.1.0";

/// Path of the detection endpoint on the service.
const DETECT_PATH: &str = "/detect_chips/";

/// Path prefix the service serves processed videos from.
const PROCESSED_PATH: &str = "/processed_videos/";

/// Path of the service liveness probe.
const HEALTH_PATH: &str = "/health";

/// Summary statistics about processing throughput, as returned by the
/// service. All fields are stored verbatim; display formatting is derived
/// in the results view.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProcessingMetrics {
    pub total_frames: u64,
    pub average_processing_time_per_frame: f64,
    pub processing_fps: f64,
    pub original_fps: f64,
    pub resolution: String,
}

impl ProcessingMetrics {
    /// Total duration of the source video in seconds, derived from the frame
    /// count and the original frame rate. Zero when the frame rate is unknown.
    pub fn duration_secs(&self) -> f64 {
        if self.original_fps > 0.0 {
            self.total_frames as f64 / self.original_fps
        } else {
            0.0
        }
    }
}

/// Outcome of a successful detection request.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Full URL of the processed video on the service.
    pub video_url: String,
    /// File name of the processed video, used as the default download name.
    pub file_name: String,
    pub metrics: ProcessingMetrics,
}

/// Success body of `POST /detect_chips/`. The service also sends a `status`
/// field, which is ignored.
#[derive(Debug, Deserialize)]
struct DetectResponse {
    processed_video: String,
    metrics: ProcessingMetrics,
}

/// Error body the service sends alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Client for one detection service endpoint.
#[derive(Debug, Clone)]
pub struct DetectionClient {
    base_url: String,
}

impl DetectionClient {
    /// Creates a client for the given base URL (e.g. `http://localhost:8000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn detect_url(&self) -> String {
        format!("{}{}", self.base_url, DETECT_PATH)
    }

    fn health_url(&self) -> String {
        format!("{}{}", self.base_url, HEALTH_PATH)
    }

    /// URL the processed video is served from, given the name returned by
    /// the detection endpoint.
    pub fn processed_video_url(&self, name: &str) -> String {
        format!("{}{}{}", self.base_url, PROCESSED_PATH, name)
    }

    /// Uploads the selected video for processing and returns the detection
    /// outcome. One call maps to one `POST /detect_chips/` request; no
    /// retries.
    pub async fn detect(&self, video: SelectedVideo) -> Result<Detection, UploadError> {
        let client = http_client()?;

        let bytes = tokio::fs::read(&video.path).await?;

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(video.file_name.clone())
            .mime_str(video.format.mime())
            .map_err(|e| UploadError::Io(e.to_string()))?;
        let form = reqwest::multipart::Form::new().part("video", part);

        let response = client.post(self.detect_url()).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(|body| body.detail);
            return Err(UploadError::Server {
                status: status.as_u16(),
                detail,
            });
        }

        let body: DetectResponse = response.json().await?;

        Ok(Detection {
            video_url: self.processed_video_url(&body.processed_video),
            file_name: body.processed_video,
            metrics: body.metrics,
        })
    }

    /// Streams a processed video from the service to `dest`.
    ///
    /// Returns the destination path on success so the UI can confirm where
    /// the file landed.
    pub async fn download(&self, url: String, dest: PathBuf) -> Result<PathBuf, UploadError> {
        let client = http_client()?;

        let response = client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::Server {
                status: status.as_u16(),
                detail: None,
            });
        }

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }

        save_stream(response.bytes_stream(), &dest).await?;

        Ok(dest)
    }

    /// Pings the service liveness probe. Used once at startup to warn the
    /// user early when the service is down.
    pub async fn check_health(&self) -> Result<(), UploadError> {
        let client = http_client()?;

        let response = client.get(self.health_url()).send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(UploadError::Server {
                status: status.as_u16(),
                detail: None,
            })
        }
    }
}

/// Writes a chunked byte stream to `dest`.
///
/// A failed download must leave nothing behind, so the partially written
/// file is deleted on any mid-stream error.
async fn save_stream<S, B, E>(mut stream: S, dest: &std::path::Path) -> Result<(), UploadError>
where
    S: futures_util::Stream<Item = std::result::Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: Into<UploadError>,
{
    use futures_util::StreamExt;

    let result = async {
        let mut file = std::fs::File::create(dest)?;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(Into::into)?;
            std::io::Write::write_all(&mut file, chunk.as_ref())?;
        }
        Ok::<(), UploadError>(())
    }
    .await;

    // Delete the incomplete file
    if result.is_err() {
        let _ = std::fs::remove_file(dest);
    }
    result
}

/// Builds the HTTP client with an explicit redirect policy and user agent.
fn http_client() -> Result<reqwest::Client, UploadError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::limited(10))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}
