// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration of the upload workflow.
//!
//! The `App` struct owns the whole UI state machine
//! (idle → selected → uploading → result | error → idle-on-clear) and
//! translates messages into side effects like file dialogs and HTTP
//! requests. Policy decisions (what clears what, when the detect action is
//! offered) live here, close to the update loop, so user-facing behavior is
//! easy to audit.

use crate::client::{Detection, DetectionClient};
use crate::config::{self, ThemeMode};
use crate::error::UploadError;
use crate::media::{self, SelectedVideo};
use crate::ui::components::banner::{Severity, StatusBanner};
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::{form, progress, results};
use iced::widget::{scrollable, Column, Container, Text};
use iced::{alignment, time, window, Element, Length, Subscription, Task, Theme};
use std::path::PathBuf;

/// Root Iced application state.
#[derive(Debug)]
pub struct App {
    client: DetectionClient,
    theme_mode: ThemeMode,
    /// Current validated selection, if any.
    selection: Option<SelectedVideo>,
    /// Simulated progress for the upload in flight.
    upload: progress::State,
    /// Outcome of the last successful upload.
    result: Option<Detection>,
    /// Last recoverable error, shown in the banner.
    error: Option<UploadError>,
    show_error_details: bool,
    show_metrics: bool,
    /// Where the processed video was last saved, if downloaded.
    saved_to: Option<PathBuf>,
    /// Result of the startup liveness probe. `None` until it resolves.
    service_online: Option<bool>,
}

/// Top-level messages consumed by [`App::update`].
#[derive(Debug, Clone)]
pub enum Message {
    /// Open the system file dialog to pick a video.
    PickFile,
    FilePicked(Option<PathBuf>),
    /// Validation of a picked file finished.
    SelectionInspected(Result<SelectedVideo, UploadError>),
    ClearSelection,
    /// Submit the current selection to the detection service.
    StartUpload,
    /// Timer tick advancing the simulated progress.
    ProgressTick,
    UploadFinished(Result<Detection, UploadError>),
    ToggleMetrics,
    ToggleErrorDetails,
    /// Open the save dialog for the processed video.
    RequestDownload,
    DownloadTargetPicked(Option<PathBuf>),
    DownloadFinished(Result<PathBuf, UploadError>),
    /// Startup liveness probe resolved.
    HealthChecked(Result<(), UploadError>),
}

/// Runtime flags passed in from the CLI to tweak startup behavior.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Optional service endpoint override (e.g. `http://10.0.0.5:8000`).
    pub endpoint: Option<String>,
    /// Optional video path to preselect on startup.
    pub file_path: Option<String>,
}

pub const WINDOW_DEFAULT_WIDTH: u32 = 800;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 650;
pub const MIN_WINDOW_WIDTH: u32 = 480;
pub const MIN_WINDOW_HEIGHT: u32 = 520;

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    iced::application(move || App::new(flags.clone()), App::update, App::view)
        .title(|state: &App| state.title())
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl Default for App {
    fn default() -> Self {
        Self {
            client: DetectionClient::new(config::DEFAULT_ENDPOINT),
            theme_mode: ThemeMode::default(),
            selection: None,
            upload: progress::State::default(),
            result: None,
            error: None,
            show_error_details: false,
            show_metrics: false,
            saved_to: None,
            service_online: None,
        }
    }
}

impl App {
    /// Initializes application state, probes the service, and optionally
    /// kicks off validation of a video path received from the launcher.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config = match config::load() {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Failed to load config: {err}");
                config::Config::default()
            }
        };

        let endpoint = flags
            .endpoint
            .unwrap_or_else(|| config.endpoint_or_default());

        let app = App {
            client: DetectionClient::new(endpoint),
            theme_mode: config.theme_mode,
            ..Self::default()
        };

        let health_task = {
            let client = app.client.clone();
            Task::perform(
                async move { client.check_health().await },
                Message::HealthChecked,
            )
        };

        let preload_task = if let Some(path_str) = flags.file_path {
            let path = PathBuf::from(path_str);
            Task::perform(
                async move { media::inspect(&path) },
                Message::SelectionInspected,
            )
        } else {
            Task::none()
        };

        (app, Task::batch([health_task, preload_task]))
    }

    fn title(&self) -> String {
        "Chip Detection System".to_string()
    }

    fn theme(&self) -> Theme {
        match self.theme_mode {
            ThemeMode::Light => Theme::Light,
            ThemeMode::Dark | ThemeMode::System => Theme::Dark,
        }
    }

    /// The progress timer only runs while an upload is in flight, so it
    /// cannot outlive the request it animates.
    fn subscription(&self) -> Subscription<Message> {
        if self.upload.is_active() {
            time::every(progress::TICK_INTERVAL).map(|_| Message::ProgressTick)
        } else {
            Subscription::none()
        }
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickFile => {
                if self.upload.is_active() {
                    return Task::none();
                }
                Task::perform(
                    async {
                        rfd::AsyncFileDialog::new()
                            .add_filter("Video Files", &media::DIALOG_EXTENSIONS)
                            .pick_file()
                            .await
                            .map(|handle| handle.path().to_path_buf())
                    },
                    Message::FilePicked,
                )
            }
            Message::FilePicked(Some(path)) => Task::perform(
                async move { media::inspect(&path) },
                Message::SelectionInspected,
            ),
            Message::FilePicked(None) => Task::none(),
            Message::SelectionInspected(result) => {
                // A late validation result must not displace the upload in
                // flight; ignore it like the other selection paths do.
                if self.upload.is_active() {
                    return Task::none();
                }
                match result {
                    Ok(video) => {
                        // A valid pick replaces everything derived from the previous one.
                        self.selection = Some(video);
                        self.result = None;
                        self.error = None;
                        self.saved_to = None;
                        self.show_metrics = false;
                        self.show_error_details = false;
                        self.upload.reset();
                    }
                    Err(err) => {
                        // Rejection leaves the previous selection untouched.
                        eprintln!("Rejected selection: {err}");
                        self.error = Some(err);
                        self.show_error_details = false;
                    }
                }
                Task::none()
            }
            Message::ClearSelection => {
                if self.upload.is_active() {
                    return Task::none();
                }
                self.selection = None;
                self.result = None;
                self.error = None;
                self.saved_to = None;
                self.show_metrics = false;
                self.show_error_details = false;
                self.upload.reset();
                Task::none()
            }
            Message::StartUpload => {
                if self.upload.is_active() || self.result.is_some() {
                    return Task::none();
                }
                let Some(video) = self.selection.clone() else {
                    return Task::none();
                };

                self.error = None;
                self.show_error_details = false;
                self.upload.start();

                let client = self.client.clone();
                Task::perform(
                    async move { client.detect(video).await },
                    Message::UploadFinished,
                )
            }
            Message::ProgressTick => {
                self.upload.tick();
                Task::none()
            }
            Message::UploadFinished(Ok(detection)) => {
                self.upload.complete();
                self.result = Some(detection);
                self.show_metrics = false;
                Task::none()
            }
            Message::UploadFinished(Err(err)) => {
                eprintln!("Upload failed: {err}");
                self.upload.reset();
                self.error = Some(err);
                Task::none()
            }
            Message::ToggleMetrics => {
                self.show_metrics = !self.show_metrics;
                Task::none()
            }
            Message::ToggleErrorDetails => {
                self.show_error_details = !self.show_error_details;
                Task::none()
            }
            Message::RequestDownload => {
                let Some(detection) = self.result.as_ref() else {
                    return Task::none();
                };
                let file_name = detection.file_name.clone();
                Task::perform(
                    async move {
                        rfd::AsyncFileDialog::new()
                            .set_file_name(&file_name)
                            .add_filter("Video Files", &media::DIALOG_EXTENSIONS)
                            .save_file()
                            .await
                            .map(|handle| handle.path().to_path_buf())
                    },
                    Message::DownloadTargetPicked,
                )
            }
            Message::DownloadTargetPicked(Some(dest)) => {
                let Some(detection) = self.result.as_ref() else {
                    return Task::none();
                };
                let client = self.client.clone();
                let url = detection.video_url.clone();
                Task::perform(
                    async move { client.download(url, dest).await },
                    Message::DownloadFinished,
                )
            }
            Message::DownloadTargetPicked(None) => Task::none(),
            Message::DownloadFinished(Ok(path)) => {
                self.saved_to = Some(path);
                Task::none()
            }
            Message::DownloadFinished(Err(err)) => {
                eprintln!("Download failed: {err}");
                self.error = Some(err);
                Task::none()
            }
            Message::HealthChecked(result) => {
                if let Err(err) = &result {
                    eprintln!("Health check failed: {err}");
                }
                self.service_online = Some(result.is_ok());
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let header = Column::new()
            .spacing(spacing::XS)
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Center)
            .push(Text::new("Chip Detection System").size(typography::TITLE_LG))
            .push(
                Text::new("Upload a video to detect and classify electronic components")
                    .size(typography::BODY)
                    .color(palette::GRAY_400),
            );

        let mut content = Column::new()
            .spacing(spacing::LG)
            .width(Length::Fill)
            .push(header);

        if self.service_online == Some(false) {
            content = content.push(
                StatusBanner::new(Severity::Warning)
                    .title("Service unavailable")
                    .message(format!(
                        "Could not reach the detection service at {}.",
                        self.client.base_url()
                    ))
                    .view(),
            );
        }

        content = match &self.selection {
            Some(video) => content.push(form::selection_view(video, self.upload.is_active())),
            None => content.push(form::empty_view()),
        };

        if let Some(error) = &self.error {
            let mut banner = StatusBanner::new(Severity::Error)
                .title("Error")
                .message(error.user_message())
                .details_visible(self.show_error_details)
                .on_toggle_details(Message::ToggleErrorDetails);
            if let Some(detail) = error.technical_detail() {
                banner = banner.details(detail);
            }
            content = content.push(banner.view());
        }

        if self.upload.is_active() {
            content = content.push(progress::view(&self.upload));
        }

        if self.selection.is_some() && !self.upload.is_active() && self.result.is_none() {
            content = content.push(form::detect_button());
        }

        if let Some(detection) = &self.result {
            content = content.push(results::view(
                detection,
                self.show_metrics,
                self.saved_to.as_deref(),
            ));
        }

        let column = Container::new(content)
            .max_width(sizing::CONTENT_WIDTH)
            .padding(spacing::LG);

        scrollable(
            Container::new(column)
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Center),
        )
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::ProcessingMetrics;
    use crate::media::VideoFormat;

    fn sample_video() -> SelectedVideo {
        SelectedVideo {
            path: PathBuf::from("/videos/clip.mp4"),
            file_name: "clip.mp4".to_string(),
            size_bytes: 4_200_000,
            format: VideoFormat::Mp4,
        }
    }

    fn sample_detection() -> Detection {
        Detection {
            video_url: "http://localhost:8000/processed_videos/processed_clip.mp4".to_string(),
            file_name: "processed_clip.mp4".to_string(),
            metrics: ProcessingMetrics {
                total_frames: 300,
                average_processing_time_per_frame: 0.04,
                processing_fps: 25.0,
                original_fps: 30.0,
                resolution: "1920x1080".to_string(),
            },
        }
    }

    #[test]
    fn valid_selection_clears_previous_result_and_error() {
        let mut app = App::default();
        app.result = Some(sample_detection());
        app.error = Some(UploadError::Connection("refused".to_string()));
        app.saved_to = Some(PathBuf::from("/tmp/out.mp4"));
        app.show_metrics = true;

        let _ = app.update(Message::SelectionInspected(Ok(sample_video())));

        assert!(app.selection.is_some());
        assert!(app.result.is_none());
        assert!(app.error.is_none());
        assert!(app.saved_to.is_none());
        assert!(!app.show_metrics);
    }

    #[test]
    fn rejected_selection_keeps_previous_selection() {
        let mut app = App::default();
        app.selection = Some(sample_video());

        let _ = app.update(Message::SelectionInspected(Err(UploadError::FileTooLarge {
            size_bytes: 200_000_000,
        })));

        assert_eq!(app.selection, Some(sample_video()));
        assert!(matches!(
            app.error,
            Some(UploadError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn upload_starts_only_with_a_selection() {
        let mut app = App::default();
        let _ = app.update(Message::StartUpload);
        assert!(!app.upload.is_active());

        app.selection = Some(sample_video());
        let _ = app.update(Message::StartUpload);
        assert!(app.upload.is_active());
    }

    #[test]
    fn selection_arriving_mid_upload_is_ignored() {
        let mut app = App::default();
        app.selection = Some(sample_video());
        let _ = app.update(Message::StartUpload);
        let _ = app.update(Message::ProgressTick);

        let replacement = SelectedVideo {
            path: PathBuf::from("/videos/other.mp4"),
            file_name: "other.mp4".to_string(),
            size_bytes: 1_000,
            format: VideoFormat::Mp4,
        };
        let _ = app.update(Message::SelectionInspected(Ok(replacement)));

        // The request in flight keeps its progress and its selection.
        assert!(app.upload.is_active());
        assert_eq!(
            app.selection.as_ref().map(|v| v.file_name.as_str()),
            Some("clip.mp4")
        );

        // Still only one request: detect stays a no-op.
        let percent_before = app.upload.percent();
        let _ = app.update(Message::StartUpload);
        assert_eq!(app.upload.percent(), percent_before);

        // The response completes the original upload, not a new one.
        let _ = app.update(Message::UploadFinished(Ok(sample_detection())));
        assert!(app.result.is_some());
        assert_eq!(app.upload.percent(), 100.0);
    }

    #[test]
    fn flags_are_cloneable_for_the_boot_closure() {
        let flags = Flags {
            endpoint: Some("http://localhost:8000".to_string()),
            file_path: Some("/videos/clip.mp4".to_string()),
        };
        let copy = flags.clone();
        assert_eq!(copy.endpoint, flags.endpoint);
        assert_eq!(copy.file_path, flags.file_path);
    }

    #[test]
    fn upload_is_not_restarted_while_in_flight() {
        let mut app = App::default();
        app.selection = Some(sample_video());
        let _ = app.update(Message::StartUpload);
        for _ in 0..3 {
            let _ = app.update(Message::ProgressTick);
        }
        let percent_before = app.upload.percent();

        let _ = app.update(Message::StartUpload);
        assert_eq!(app.upload.percent(), percent_before);
    }

    #[test]
    fn progress_holds_at_90_until_response_then_jumps_to_100() {
        let mut app = App::default();
        app.selection = Some(sample_video());
        let _ = app.update(Message::StartUpload);

        for _ in 0..50 {
            let _ = app.update(Message::ProgressTick);
        }
        assert_eq!(app.upload.percent(), 90.0);

        let _ = app.update(Message::UploadFinished(Ok(sample_detection())));
        assert_eq!(app.upload.percent(), 100.0);
    }

    #[test]
    fn successful_upload_stores_result_and_disables_detect() {
        let mut app = App::default();
        app.selection = Some(sample_video());
        let _ = app.update(Message::StartUpload);
        let _ = app.update(Message::UploadFinished(Ok(sample_detection())));

        assert!(app.result.is_some());
        assert!(!app.upload.is_active());

        // Detect action is a no-op while a result is present.
        let _ = app.update(Message::StartUpload);
        assert!(!app.upload.is_active());
    }

    #[test]
    fn failed_upload_surfaces_server_detail() {
        let mut app = App::default();
        app.selection = Some(sample_video());
        let _ = app.update(Message::StartUpload);
        let _ = app.update(Message::UploadFinished(Err(UploadError::Server {
            status: 400,
            detail: Some("Invalid file format. Only video files are allowed.".to_string()),
        })));

        assert!(app.result.is_none());
        assert!(!app.upload.is_active());
        assert_eq!(app.upload.percent(), 0.0);
        assert_eq!(
            app.error.as_ref().map(UploadError::user_message),
            Some("Invalid file format. Only video files are allowed.".to_string())
        );
    }

    #[test]
    fn clearing_selection_resets_all_derived_state() {
        let mut app = App::default();
        app.selection = Some(sample_video());
        app.result = Some(sample_detection());
        app.saved_to = Some(PathBuf::from("/tmp/out.mp4"));
        app.error = Some(UploadError::Connection("refused".to_string()));
        app.show_metrics = true;

        let _ = app.update(Message::ClearSelection);

        assert!(app.selection.is_none());
        assert!(app.result.is_none());
        assert!(app.error.is_none());
        assert!(app.saved_to.is_none());
        assert!(!app.show_metrics);
        assert_eq!(app.upload.percent(), 0.0);
    }

    #[test]
    fn selection_cannot_be_cleared_mid_upload() {
        let mut app = App::default();
        app.selection = Some(sample_video());
        let _ = app.update(Message::StartUpload);
        let _ = app.update(Message::ClearSelection);

        assert!(app.selection.is_some());
        assert!(app.upload.is_active());
    }

    #[test]
    fn download_finish_records_saved_path() {
        let mut app = App::default();
        app.result = Some(sample_detection());

        let _ = app.update(Message::DownloadFinished(Ok(PathBuf::from(
            "/home/user/processed_clip.mp4",
        ))));
        assert_eq!(
            app.saved_to,
            Some(PathBuf::from("/home/user/processed_clip.mp4"))
        );
    }

    #[test]
    fn health_probe_result_is_recorded() {
        let mut app = App::default();
        assert_eq!(app.service_online, None);

        let _ = app.update(Message::HealthChecked(Err(UploadError::Connection(
            "refused".to_string(),
        ))));
        assert_eq!(app.service_online, Some(false));

        let _ = app.update(Message::HealthChecked(Ok(())));
        assert_eq!(app.service_online, Some(true));
    }

    #[test]
    fn metrics_toggle_flips_visibility() {
        let mut app = App::default();
        let _ = app.update(Message::ToggleMetrics);
        assert!(app.show_metrics);
        let _ = app.update(Message::ToggleMetrics);
        assert!(!app.show_metrics);
    }
}
