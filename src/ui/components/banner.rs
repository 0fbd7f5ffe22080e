// SPDX-License-Identifier: MPL-2.0
//! Reusable status banner with consistent styling.
//!
//! Displays errors, warnings, and notices with a severity accent, a title,
//! a message, an optional collapsible technical-details section, and an
//! optional action button.
//!
//! # Usage
//!
//! ```ignore
//! StatusBanner::new(Severity::Error)
//!     .title("Error")
//!     .message("Error processing video")
//!     .details("HTTP status: 500")
//!     .view()
//! ```

use crate::ui::design_tokens::{palette, spacing, typography};
use crate::ui::styles;
use iced::widget::{button, rule, text, Column, Container, Text};
use iced::{Color, Element, Length, Theme};

/// Severity level determines the accent color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Operation failed (red accent).
    #[default]
    Error,
    /// Operation degraded but possible (orange accent).
    Warning,
    /// No action required (blue accent).
    Info,
    /// Operation completed (green accent).
    Success,
}

impl Severity {
    /// Accent color for this severity level.
    pub fn color(&self) -> Color {
        match self {
            Severity::Error => palette::ERROR_500,
            Severity::Warning => palette::WARNING_500,
            Severity::Info => palette::INFO_500,
            Severity::Success => palette::SUCCESS_500,
        }
    }
}

/// Configuration for the status banner.
#[derive(Debug, Clone)]
pub struct StatusBanner<Message> {
    severity: Severity,
    title: Option<String>,
    message: Option<String>,
    details: Option<String>,
    show_details: bool,
    toggle_details_message: Option<Message>,
    action_label: Option<String>,
    action_message: Option<Message>,
}

impl<Message> Default for StatusBanner<Message> {
    fn default() -> Self {
        Self {
            severity: Severity::default(),
            title: None,
            message: None,
            details: None,
            show_details: false,
            toggle_details_message: None,
            action_label: None,
            action_message: None,
        }
    }
}

impl<Message: Clone + 'static> StatusBanner<Message> {
    /// Creates a banner with the given severity.
    pub fn new(severity: Severity) -> Self {
        Self {
            severity,
            ..Self::default()
        }
    }

    /// Sets the title (short heading).
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the message (user-friendly explanation).
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the technical details (collapsible).
    pub fn details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Sets whether details are currently expanded.
    pub fn details_visible(mut self, visible: bool) -> Self {
        self.show_details = visible;
        self
    }

    /// Sets the message emitted when toggling details visibility.
    pub fn on_toggle_details(mut self, message: Message) -> Self {
        self.toggle_details_message = Some(message);
        self
    }

    /// Sets the action button label and message.
    pub fn action(mut self, label: impl Into<String>, message: Message) -> Self {
        self.action_label = Some(label.into());
        self.action_message = Some(message);
        self
    }

    /// Renders the banner.
    pub fn view(self) -> Element<'static, Message> {
        let accent = self.severity.color();

        let mut content = Column::new().spacing(spacing::XS).width(Length::Fill);

        if let Some(title_text) = self.title {
            let title = Text::new(title_text)
                .size(typography::TITLE_SM)
                .style(move |_theme: &Theme| text::Style {
                    color: Some(accent),
                });
            content = content.push(title);
        }

        if let Some(message_text) = self.message {
            content = content.push(Text::new(message_text).size(typography::BODY));
        }

        if let (Some(label), Some(msg)) = (self.action_label, self.action_message) {
            let action = button(Text::new(label).size(typography::BODY_SM))
                .on_press(msg)
                .style(styles::button::primary);
            content = content.push(action);
        }

        if let Some(details_text) = self.details {
            if let Some(toggle_msg) = self.toggle_details_message {
                let toggle_label = if self.show_details {
                    "Hide details"
                } else {
                    "Show details"
                };
                let toggle = button(Text::new(toggle_label).size(typography::BODY_SM))
                    .on_press(toggle_msg)
                    .style(styles::button::subtle);
                content = content.push(toggle);
            }

            if self.show_details {
                let details_body =
                    Text::new(details_text)
                        .size(typography::CAPTION)
                        .style(|theme: &Theme| text::Style {
                            color: Some(theme.extended_palette().secondary.base.text),
                        });

                let details_column = Column::new()
                    .spacing(spacing::XXS)
                    .width(Length::Fill)
                    .push(rule::horizontal(1))
                    .push(details_body);
                content = content.push(details_column);
            }
        }

        Container::new(content)
            .width(Length::Fill)
            .padding(spacing::MD)
            .style(styles::container::accent_panel(accent))
            .into()
    }
}
