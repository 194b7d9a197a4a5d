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

//! The render module defines the traversal that hands every visible
//! cell to an embedding renderer, with selection, cursor and global
//! inversion already applied to the attributes.

use smallvec::SmallVec;
use tracing::warn;

use crate::{
    attrs::Attr,
    cell::{Cell, Symbol},
    screen::{Flags, Screen},
    selection::RenderPos,
    Result,
};

/// How many per-cell draw failures are logged before the rest of the
/// traversal suppresses them.
const DRAW_FAILURE_LOG_MAX: usize = 3;

/// The receiving end of a draw traversal.
///
/// `draw_cell` gets the raw symbol id alongside the resolved code
/// points; synthetic table keys resolve to an empty slice and the
/// renderer looks them up in its own symbol table. A failed `draw_cell`
/// does not abort the traversal.
pub trait Renderer {
    fn prepare(&mut self, _screen: &Screen) -> Result<()> {
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_cell(
        &mut self,
        id: Symbol,
        chars: &[char],
        width: u8,
        posx: usize,
        posy: usize,
        attr: &Attr,
    ) -> Result<()>;

    fn render(&mut self, _screen: &Screen) -> Result<()> {
        Ok(())
    }
}

impl Screen {
    /// Walk every visible cell, oldest scrollback row first when the
    /// viewport is pinned into history, and feed it to the renderer.
    ///
    /// The traversal takes `&self`; a renderer cannot call back into
    /// mutating screen operations mid-draw.
    pub fn draw<R: Renderer>(&self, renderer: &mut R) -> Result<()> {
        if let Err(err) = renderer.prepare(self) {
            warn!("cannot prepare renderer: {err}");
            return Err(err);
        }

        let cur_x = self.cursor_x.min(self.size_x - 1);
        let hide_cursor = self.flags.contains(Flags::HIDE_CURSOR);
        let global_inverse = self.flags.contains(Flags::INVERSE);
        let pad = Cell::blank(self.def_attr);

        let mut history = self.sb.view();
        let mut live = 0usize;
        let mut cursor_drawn = false;
        let mut failures = 0usize;

        for i in 0..self.size_y {
            let (line, live_row) = match history.next() {
                Some(line) => (line, None),
                None => {
                    let y = live;
                    live += 1;
                    (&self.lines[y], Some(y))
                }
            };

            for j in 0..self.size_x {
                let cell = line.cell(j).unwrap_or(&pad);
                let mut attr = *cell.attr();

                let pos = match live_row {
                    Some(y) => RenderPos::Viewport { x: j, y },
                    None => RenderPos::Scrollback { id: line.sb_id(), x: j },
                };
                if self.sel.contains(pos) {
                    attr.toggle_inverse();
                }
                if live_row == Some(self.cursor_y) && j == cur_x && !hide_cursor {
                    attr.toggle_inverse();
                    cursor_drawn = true;
                }
                if global_inverse {
                    attr.toggle_inverse();
                }

                let mut chars: SmallVec<[char; 2]> = SmallVec::new();
                if let Some(c) = cell.ch().as_char() {
                    chars.push(c);
                }

                if let Err(err) = renderer.draw_cell(cell.ch(), &chars, cell.width(), j, i, &attr) {
                    failures += 1;
                    if failures <= DRAW_FAILURE_LOG_MAX {
                        warn!("cannot draw glyph at {},{}: {err}", j, i);
                    }
                }
            }
        }

        // The cursor row can be pushed out of view entirely when the
        // viewport is pinned deep into scrollback. Emit the cursor cell
        // once anyway, at the row it would have occupied.
        if !cursor_drawn && !hide_cursor {
            let virt_y = self.sb.view_len() + self.cursor_y;
            let line = &self.lines[self.cursor_y];
            let cell = line.cell(cur_x).unwrap_or(&pad);
            let mut attr = *cell.attr();
            attr.toggle_inverse();
            if global_inverse {
                attr.toggle_inverse();
            }

            let mut chars: SmallVec<[char; 2]> = SmallVec::new();
            if let Some(c) = cell.ch().as_char() {
                chars.push(c);
            }

            if let Err(err) = renderer.draw_cell(cell.ch(), &chars, cell.width(), cur_x, virt_y, &attr)
            {
                failures += 1;
                if failures <= DRAW_FAILURE_LOG_MAX {
                    warn!("cannot draw glyph at {},{}: {err}", cur_x, virt_y);
                }
            }
        }

        if failures > DRAW_FAILURE_LOG_MAX {
            warn!("{} glyph draw failures suppressed", failures - DRAW_FAILURE_LOG_MAX);
        }

        renderer.render(self)
    }
}
