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

//! The attrs module defines the per-cell attribute carrier. Attributes
//! are plain by-value data; the screen copies them into cells on write
//! and hands copies back out during draw traversal.

const MODE_BOLD: u8 = 0b0000_0001;
const MODE_UNDERLINE: u8 = 0b0000_0010;
const MODE_INVERSE: u8 = 0b0000_0100;
const MODE_PROTECT: u8 = 0b0000_1000;

/// Rendering attributes for a single cell.
///
/// Colors are carried two ways: a non-negative `fccode`/`bccode` is an
/// indexed palette code resolved by the embedder, while a negative code
/// means "use the RGB fields". The four mode bits are independent of
/// each other and of the colors.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Attr {
    /// Foreground palette code; negative selects `fr`/`fg`/`fb`.
    pub fccode: i8,
    /// Background palette code; negative selects `br`/`bg`/`bb`.
    pub bccode: i8,
    pub fr: u8,
    pub fg: u8,
    pub fb: u8,
    pub br: u8,
    pub bg: u8,
    pub bb: u8,
    mode: u8,
}

impl Default for Attr {
    fn default() -> Self {
        Attr {
            fccode: -1,
            bccode: -1,
            fr: 255,
            fg: 255,
            fb: 255,
            br: 0,
            bg: 0,
            bb: 0,
            mode: 0,
        }
    }
}

impl Attr {
    pub fn bold(&self) -> bool {
        self.mode & MODE_BOLD != 0
    }

    pub fn set_bold(&mut self, bold: bool) {
        if bold {
            self.mode |= MODE_BOLD;
        } else {
            self.mode &= !MODE_BOLD;
        }
    }

    pub fn underline(&self) -> bool {
        self.mode & MODE_UNDERLINE != 0
    }

    pub fn set_underline(&mut self, underline: bool) {
        if underline {
            self.mode |= MODE_UNDERLINE;
        } else {
            self.mode &= !MODE_UNDERLINE;
        }
    }

    pub fn inverse(&self) -> bool {
        self.mode & MODE_INVERSE != 0
    }

    pub fn set_inverse(&mut self, inverse: bool) {
        if inverse {
            self.mode |= MODE_INVERSE;
        } else {
            self.mode &= !MODE_INVERSE;
        }
    }

    /// Flip the inverse bit. Draw traversal stacks selection, cursor
    /// and global inversion by toggling rather than setting.
    pub fn toggle_inverse(&mut self) {
        self.mode ^= MODE_INVERSE;
    }

    pub fn protect(&self) -> bool {
        self.mode & MODE_PROTECT != 0
    }

    pub fn set_protect(&mut self, protect: bool) {
        if protect {
            self.mode |= MODE_PROTECT;
        } else {
            self.mode &= !MODE_PROTECT;
        }
    }

    pub fn has_modes(&self) -> bool {
        self.mode != 0
    }
}

impl std::fmt::Display for Attr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.fccode >= 0 {
            write!(f, "<FG {}>", self.fccode)?;
        }
        if self.bccode >= 0 {
            write!(f, "<BG {}>", self.bccode)?;
        }
        if self.bold() {
            write!(f, "b")?;
        }
        if self.underline() {
            write!(f, "_")?;
        }
        if self.inverse() {
            write!(f, "<")?;
        }
        if self.protect() {
            write!(f, "p")?;
        }
        Ok(())
    }
}
