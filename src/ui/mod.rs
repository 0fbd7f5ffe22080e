// SPDX-License-Identifier: MPL-2.0
//! UI views, reusable components, styles, and design tokens.

pub mod components;
pub mod design_tokens;
pub mod form;
pub mod progress;
pub mod results;
pub mod styles;
