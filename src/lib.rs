// SPDX-License-Identifier: MPL-2.0
//! `chipview` is a desktop client for a chip detection inference service,
//! built with the Iced GUI framework.
//!
//! The service does the heavy lifting (decoding, detection, annotation,
//! metrics) behind an HTTP boundary; this crate handles input validation,
//! upload orchestration, optimistic progress display, and result rendering.

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod media;
pub mod ui;
