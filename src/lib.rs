// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! An in-memory model of a terminal screen.
//!
//! The [`Screen`] holds a fixed-size character grid plus the machinery a
//! terminal emulator needs to edit it: a cursor, DEC-style scrolling
//! margins with origin mode, a tab ruler, a bounded scrollback buffer that
//! the viewport can be pinned into, and a text selection whose endpoints
//! survive scrolling, trimming and resizing. An escape-sequence
//! interpreter drives the write/erase/move/scroll operations; a renderer
//! pulls cells back out through [`Screen::draw`].
//!
//! This crate deliberately stops at the screen model. There is no control
//! code parser, no pty plumbing and no rendering backend here; those live
//! in the embedding application.

mod attrs;
mod cell;
mod line;
mod render;
mod screen;
mod scrollback;
mod selection;

pub use crate::{
    attrs::Attr,
    cell::Symbol,
    render::Renderer,
    screen::{Flags, Screen},
};

#[cfg(feature = "internal-test")]
pub use crate::selection::Endpoint;

use thiserror::Error;

/// The size of the visible screen window.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

/// Error codes surfaced by fallible screen operations.
///
/// Errors are plain return values; the screen never stores one, and a
/// failed operation leaves the screen in its pre-call state.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum Error {
    /// A zero dimension or otherwise out-of-range input that is not
    /// handled by clamping.
    #[error("invalid argument")]
    InvalidArg,
    /// An allocation failed. Only resize and scrollback line allocation
    /// can report this; both check allocations before mutating.
    #[error("out of memory")]
    OutOfMemory,
    /// No data available in the requested range, e.g. copying an
    /// inactive selection.
    #[error("no data in the requested range")]
    Range,
    /// Reserved for behaviour that is recognised but not implemented.
    #[error("operation not supported")]
    NotSupported,
}

pub type Result<T> = std::result::Result<T, Error>;
