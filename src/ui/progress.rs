// SPDX-License-Identifier: MPL-2.0
//! Simulated upload progress.
//!
//! The service offers no progress channel, so the counter is cosmetic: while
//! a request is in flight a timer advances it in fixed steps, capped below
//! completion, and it jumps to 100% when the response lands.

use crate::app::Message;
use crate::ui::design_tokens::{spacing, typography};
use iced::widget::{progress_bar, Column, Row, Text};
use iced::{Element, Length};
use std::time::Duration;

/// How often the simulation advances while uploading.
pub const TICK_INTERVAL: Duration = Duration::from_millis(500);

/// Percentage points added per tick.
const STEP: f32 = 5.0;

/// Ceiling the simulation holds at until the server responds.
const PRE_COMPLETION_CAP: f32 = 90.0;

/// Progress state for the upload in flight.
#[derive(Debug, Clone, Default)]
pub struct State {
    percent: f32,
    active: bool,
}

impl State {
    /// Starts a new simulation from zero.
    pub fn start(&mut self) {
        self.percent = 0.0;
        self.active = true;
    }

    /// Advances the simulation by one step, holding at the cap.
    pub fn tick(&mut self) {
        if self.active {
            self.percent = (self.percent + STEP).min(PRE_COMPLETION_CAP);
        }
    }

    /// Marks the upload as finished successfully.
    pub fn complete(&mut self) {
        self.percent = 100.0;
        self.active = false;
    }

    /// Clears the simulation (failure or selection reset).
    pub fn reset(&mut self) {
        self.percent = 0.0;
        self.active = false;
    }

    /// Whether an upload is currently in flight.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current simulated percentage, 0 to 100.
    #[must_use]
    pub fn percent(&self) -> f32 {
        self.percent
    }
}

/// Renders the progress bar shown while the upload is in flight.
pub fn view(state: &State) -> Element<'_, Message> {
    let label = Row::new()
        .width(Length::Fill)
        .push(
            Text::new("Processing video...")
                .size(typography::BODY)
                .width(Length::Fill),
        )
        .push(Text::new(format!("{:.0}%", state.percent())).size(typography::BODY));

    Column::new()
        .spacing(spacing::XS)
        .width(Length::Fill)
        .push(label)
        .push(progress_bar(0.0..=100.0, state.percent()))
        .into()
}
