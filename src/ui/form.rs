// SPDX-License-Identifier: MPL-2.0
//! Upload form views: the empty pick-a-file state and the selection card.

use crate::app::Message;
use crate::media::{self, SelectedVideo};
use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, Column, Container, Row, Text};
use iced::{alignment, Element, Length};

/// Renders the empty state shown before any video is selected.
pub fn empty_view() -> Element<'static, Message> {
    let title = Text::new("No video selected")
        .size(typography::TITLE_SM)
        .color(palette::GRAY_400);

    let hint = Text::new("MP4, AVI, MOV or MKV, up to 100 MB")
        .size(typography::BODY_SM)
        .color(palette::GRAY_400);

    let pick_button = button(Text::new("Choose a video"))
        .padding([spacing::SM, spacing::LG])
        .style(styles::button::primary)
        .on_press(Message::PickFile);

    let content = Column::new()
        .spacing(spacing::MD)
        .align_x(alignment::Horizontal::Center)
        .push(title)
        .push(pick_button)
        .push(hint);

    Container::new(content)
        .width(Length::Fill)
        .padding(spacing::XL)
        .align_x(alignment::Horizontal::Center)
        .style(styles::container::card)
        .into()
}

/// Renders the card describing the current selection, with a remove action.
///
/// The remove action is withheld while an upload is in flight so the
/// selection cannot change under the request.
pub fn selection_view(video: &SelectedVideo, uploading: bool) -> Element<'_, Message> {
    let header = {
        let title = Text::new("Uploaded Video")
            .size(typography::TITLE_SM)
            .width(Length::Fill);

        let mut remove = button(Text::new("Remove video").size(typography::BODY_SM))
            .style(styles::button::danger);
        if !uploading {
            remove = remove.on_press(Message::ClearSelection);
        }

        Row::new()
            .align_y(alignment::Vertical::Center)
            .push(title)
            .push(remove)
    };

    let file_line = Text::new(video.file_name.clone()).size(typography::BODY);
    let meta_line = Text::new(format!(
        "{} · {}",
        video.format.label(),
        media::format_size(video.size_bytes)
    ))
    .size(typography::BODY_SM)
    .color(palette::GRAY_400);

    let content = Column::new()
        .spacing(spacing::SM)
        .width(Length::Fill)
        .push(header)
        .push(file_line)
        .push(meta_line);

    Container::new(content)
        .width(Length::Fill)
        .padding(spacing::MD)
        .style(styles::container::card)
        .into()
}

/// Renders the primary detect action, shown when a selection is ready and no
/// result exists yet.
pub fn detect_button() -> Element<'static, Message> {
    let action = button(Text::new("Detect Components"))
        .padding([spacing::SM, spacing::XL])
        .style(styles::button::primary)
        .on_press(Message::StartUpload);

    Container::new(action)
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .into()
}
