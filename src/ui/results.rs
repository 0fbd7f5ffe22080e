// SPDX-License-Identifier: MPL-2.0
//! Results view: processed video reference, download action, and the
//! collapsible metrics table.
//!
//! Playback stays out of this client; the download action brings the
//! artifact to disk where the system player owns it.

use crate::app::Message;
use crate::client::{Detection, ProcessingMetrics};
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, rule, Column, Container, Row, Text};
use iced::{alignment, Element, Length};
use std::path::Path;

/// Builds the label/value rows of the metrics table. Display values are
/// derived here, not stored: frame rates to 2 decimals, per-frame time to 4,
/// duration from frame count and original rate.
pub fn metric_rows(metrics: &ProcessingMetrics) -> Vec<(&'static str, String)> {
    vec![
        ("Resolution", metrics.resolution.clone()),
        ("Original FPS", format!("{:.2}", metrics.original_fps)),
        ("Processing FPS", format!("{:.2}", metrics.processing_fps)),
        ("Total Frames", metrics.total_frames.to_string()),
        (
            "Frame Process Time",
            format!("{:.4}s", metrics.average_processing_time_per_frame),
        ),
        ("Video Duration", format!("{:.2}s", metrics.duration_secs())),
    ]
}

/// Renders the detection results card.
pub fn view<'a>(
    detection: &'a Detection,
    show_metrics: bool,
    saved_to: Option<&'a Path>,
) -> Element<'a, Message> {
    let header = {
        let title = Text::new("Detection Results")
            .size(typography::TITLE_SM)
            .width(Length::Fill);

        let download = button(Text::new("Download").size(typography::BODY_SM))
            .style(styles::button::primary)
            .on_press(Message::RequestDownload);

        Row::new()
            .align_y(alignment::Vertical::Center)
            .push(title)
            .push(download)
    };

    let video_line = Text::new(detection.file_name.clone()).size(typography::BODY);
    let url_line = Text::new(detection.video_url.clone())
        .size(typography::CAPTION)
        .color(palette::GRAY_400);

    let mut content = Column::new()
        .spacing(spacing::SM)
        .width(Length::Fill)
        .push(header)
        .push(video_line)
        .push(url_line);

    if let Some(path) = saved_to {
        content = content.push(
            Text::new(format!("Saved to {}", path.display()))
                .size(typography::BODY_SM)
                .color(palette::SUCCESS_500),
        );
    }

    content = content.push(metrics_section(&detection.metrics, show_metrics));

    Container::new(content)
        .width(Length::Fill)
        .padding(spacing::MD)
        .style(styles::container::card)
        .into()
}

/// Collapsible metrics table.
fn metrics_section(metrics: &ProcessingMetrics, show_metrics: bool) -> Element<'_, Message> {
    let toggle_label = if show_metrics {
        "Hide details"
    } else {
        "Show details"
    };

    let header = Row::new()
        .align_y(alignment::Vertical::Center)
        .push(
            Text::new("Processing Metrics")
                .size(typography::BODY)
                .width(Length::Fill),
        )
        .push(
            button(Text::new(toggle_label).size(typography::BODY_SM))
                .style(styles::button::subtle)
                .on_press(Message::ToggleMetrics),
        );

    let mut section = Column::new()
        .spacing(spacing::XS)
        .width(Length::Fill)
        .push(rule::horizontal(1))
        .push(header);

    if show_metrics {
        let mut table = Column::new().spacing(spacing::XXS).width(Length::Fill);
        for (label, value) in metric_rows(metrics) {
            table = table.push(
                Row::new()
                    .push(
                        Text::new(label)
                            .size(typography::BODY_SM)
                            .width(Length::Fill),
                    )
                    .push(Text::new(value).size(typography::BODY_SM)),
            );
        }
        section = section.push(table);
    }

    section.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_metrics() -> ProcessingMetrics {
        ProcessingMetrics {
            total_frames: 450,
            average_processing_time_per_frame: 0.042_137,
            processing_fps: 23.732_2,
            original_fps: 29.97,
            resolution: "1920x1080".to_string(),
        }
    }

    #[test]
    fn rows_cover_all_metrics_in_order() {
        let rows = metric_rows(&sample_metrics());
        let labels: Vec<_> = rows.iter().map(|(label, _)| *label).collect();
        assert_eq!(
            labels,
            vec![
                "Resolution",
                "Original FPS",
                "Processing FPS",
                "Total Frames",
                "Frame Process Time",
                "Video Duration",
            ]
        );
    }

    #[test]
    fn fps_values_use_two_decimals() {
        let rows = metric_rows(&sample_metrics());
        assert_eq!(rows[1].1, "29.97");
        assert_eq!(rows[2].1, "23.73");
    }

    #[test]
    fn frame_time_uses_four_decimals_with_unit() {
        let rows = metric_rows(&sample_metrics());
        assert_eq!(rows[4].1, "0.0421s");
    }

    #[test]
    fn duration_is_derived_not_stored() {
        let rows = metric_rows(&sample_metrics());
        // 450 frames / 29.97 fps
        assert_eq!(rows[5].1, "15.02s");
    }
}
