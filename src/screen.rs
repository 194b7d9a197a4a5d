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

//! The screen module defines the viewport grid and the operations layer
//! an escape-sequence interpreter drives: cursor motion, writing,
//! erasing, line and character insertion, scrolling with scrollback
//! spill, margins, and resize.

use std::mem;

use bitflags::bitflags;
use tracing::{debug, warn};

use crate::{
    attrs::Attr,
    cell::{Cell, Symbol},
    line::Line,
    scrollback::Scrollback,
    selection::{Endpoint, Selection},
    Error, Result, Size,
};

bitflags! {
    /// Screen mode flags.
    #[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
    pub struct Flags: u32 {
        /// Writing shifts the rest of the row right instead of
        /// overwriting.
        const INSERT_MODE = 1 << 0;
        /// Writing past the right edge wraps to the next row.
        const AUTO_WRAP = 1 << 1;
        /// Cursor addressing is relative to the scroll region.
        const REL_ORIGIN = 1 << 2;
        /// Invert every cell during draw traversal.
        const INVERSE = 1 << 3;
        /// Skip cursor inversion during draw traversal.
        const HIDE_CURSOR = 1 << 4;
        /// The scrollback view position does not drift as the buffer
        /// trims from the top.
        const FIXED_POS = 1 << 5;
        /// Reserved for alternate-screen routing. The core never acts on
        /// it; callers implementing an alt screen swap `Screen`
        /// instances externally.
        const ALTERNATE = 1 << 6;
    }
}

fn default_ruler(width: usize) -> Vec<bool> {
    (0..width).map(|x| x % 8 == 0).collect()
}

/// An in-memory terminal screen: the visible grid, cursor, margins, tab
/// ruler, scrollback and selection.
///
/// All methods are synchronous and touch only this instance; `&mut self`
/// makes cross-thread sharing and re-entrant mutation unrepresentable.
#[derive(Debug)]
pub struct Screen {
    pub(crate) size_x: usize,
    pub(crate) size_y: usize,
    /// Line storage for the viewport. Only the first `size_y` entries
    /// are visible; a spare tail left behind by earlier shrinks makes
    /// regrowth allocation-free.
    pub(crate) lines: Vec<Line>,
    /// `cursor_x` may equal `size_x`, meaning a wrap is pending at the
    /// next write.
    pub(crate) cursor_x: usize,
    pub(crate) cursor_y: usize,
    /// Inclusive scroll region within `[0, size_y - 1]`.
    pub(crate) margin_top: usize,
    pub(crate) margin_bottom: usize,
    pub(crate) tab_ruler: Vec<bool>,
    pub(crate) flags: Flags,
    pub(crate) def_attr: Attr,
    pub(crate) sb: Scrollback,
    pub(crate) sel: Selection,
}

impl Screen {
    /// Create a screen with no scrollback storage.
    pub fn new(size: Size) -> Result<Self> {
        Self::with_scrollback(size, 0)
    }

    /// Create a screen that retains up to `sb_max` scrolled-off lines.
    pub fn with_scrollback(size: Size, sb_max: usize) -> Result<Self> {
        if size.width == 0 || size.height == 0 {
            return Err(Error::InvalidArg);
        }

        let def_attr = Attr::default();
        let mut lines = Vec::new();
        lines.try_reserve_exact(size.height).map_err(|_| Error::OutOfMemory)?;
        for _ in 0..size.height {
            lines.push(Line::try_new(size.width, &def_attr)?);
        }

        Ok(Screen {
            size_x: size.width,
            size_y: size.height,
            lines,
            cursor_x: 0,
            cursor_y: 0,
            margin_top: 0,
            margin_bottom: size.height - 1,
            tab_ruler: default_ruler(size.width),
            flags: Flags::empty(),
            def_attr,
            sb: Scrollback::new(sb_max),
            sel: Selection::new(),
        })
    }

    pub fn get_width(&self) -> usize {
        self.size_x
    }

    pub fn get_height(&self) -> usize {
        self.size_y
    }

    pub fn get_cursor_x(&self) -> usize {
        self.cursor_x
    }

    pub fn get_cursor_y(&self) -> usize {
        self.cursor_y
    }

    pub fn get_flags(&self) -> Flags {
        self.flags
    }

    pub fn margin_top(&self) -> usize {
        self.margin_top
    }

    pub fn margin_bottom(&self) -> usize {
        self.margin_bottom
    }

    /// Number of lines currently retired to scrollback.
    pub fn sb_depth(&self) -> usize {
        self.sb.len()
    }

    pub fn max_sb(&self) -> usize {
        self.sb.max()
    }

    pub fn set_flags(&mut self, flags: Flags) {
        self.flags.insert(flags);
    }

    pub fn reset_flags(&mut self, flags: Flags) {
        self.flags.remove(flags);
    }

    pub fn get_def_attr(&self) -> Attr {
        self.def_attr
    }

    /// Attributes used when initialising cells from now on; existing
    /// cells are unaffected.
    pub fn set_def_attr(&mut self, attr: Attr) {
        self.def_attr = attr;
    }

    /// Mark a tab stop at the cursor column. Ignored while a wrap is
    /// pending.
    pub fn set_tabstop(&mut self) {
        if self.cursor_x < self.size_x {
            self.tab_ruler[self.cursor_x] = true;
        }
    }

    pub fn reset_tabstop(&mut self) {
        if self.cursor_x < self.size_x {
            self.tab_ruler[self.cursor_x] = false;
        }
    }

    pub fn reset_all_tabstops(&mut self) {
        for stop in &mut self.tab_ruler {
            *stop = false;
        }
    }

    /// Clear all flags, open the scroll region to the whole screen and
    /// restore the default tab ruler.
    pub fn reset(&mut self) {
        self.flags = Flags::empty();
        self.margin_top = 0;
        self.margin_bottom = self.size_y - 1;
        self.tab_ruler = default_ruler(self.size_x);
    }

    /// Set the scroll region from 1-based coordinates, DECSTBM style. A
    /// top of 0 is treated as 1; a degenerate or out-of-range region
    /// resets to the whole screen.
    pub fn set_margins(&mut self, top: usize, bottom: usize) {
        let top = top.max(1);
        if bottom <= top || bottom > self.size_y {
            debug!(top, bottom, "degenerate scroll region, resetting to whole screen");
            self.margin_top = 0;
            self.margin_bottom = self.size_y - 1;
            return;
        }
        self.margin_top = top - 1;
        self.margin_bottom = bottom - 1;
    }

    // --- cursor motion ---

    /// Absolute move. With REL_ORIGIN set, `y` addresses rows relative
    /// to the top margin and is confined to the region.
    pub fn move_to(&mut self, x: usize, y: usize) {
        if self.flags.contains(Flags::REL_ORIGIN) {
            self.cursor_y = self.margin_top.saturating_add(y).min(self.margin_bottom);
        } else {
            self.cursor_y = y.min(self.size_y - 1);
        }
        self.cursor_x = x.min(self.size_x - 1);
    }

    /// Move up, stopping at the top margin when the cursor starts at or
    /// below it. Excess motion scrolls the region down when `scroll` is
    /// set.
    pub fn move_up(&mut self, num: usize, scroll: bool) {
        if num == 0 {
            return;
        }
        let boundary = if self.cursor_y >= self.margin_top { self.margin_top } else { 0 };
        let gap = self.cursor_y - boundary;
        if num > gap {
            self.cursor_y = boundary;
            if scroll {
                self.scroll_down(num - gap);
            }
        } else {
            self.cursor_y -= num;
        }
    }

    /// Move down, stopping at the bottom margin when the cursor starts
    /// at or above it. Excess motion scrolls the region up when `scroll`
    /// is set.
    pub fn move_down(&mut self, num: usize, scroll: bool) {
        if num == 0 {
            return;
        }
        let boundary =
            if self.cursor_y <= self.margin_bottom { self.margin_bottom } else { self.size_y - 1 };
        let gap = boundary - self.cursor_y;
        if num > gap {
            self.cursor_y = boundary;
            if scroll {
                self.scroll_up(num - gap);
            }
        } else {
            self.cursor_y += num;
        }
    }

    pub fn move_left(&mut self, num: usize) {
        if num == 0 {
            return;
        }
        if self.cursor_x >= self.size_x {
            self.cursor_x = self.size_x - 1;
        }
        self.cursor_x = self.cursor_x.saturating_sub(num);
    }

    pub fn move_right(&mut self, num: usize) {
        if num == 0 {
            return;
        }
        self.cursor_x = self.cursor_x.saturating_add(num).min(self.size_x - 1);
    }

    pub fn move_line_home(&mut self) {
        self.cursor_x = 0;
    }

    pub fn move_line_end(&mut self) {
        self.cursor_x = self.size_x - 1;
    }

    /// Advance to the `num`-th tab stop right of the cursor. Never
    /// wraps; runs out at the last column.
    pub fn tab_right(&mut self, num: usize) {
        for _ in 0..num {
            let from = self.cursor_x + 1;
            match (from..self.size_x).find(|&x| self.tab_ruler[x]) {
                Some(x) => self.cursor_x = x,
                None => {
                    self.cursor_x = self.size_x - 1;
                    break;
                }
            }
        }
    }

    /// Back up to the `num`-th tab stop left of the cursor, stopping at
    /// column 0.
    pub fn tab_left(&mut self, num: usize) {
        for _ in 0..num {
            if self.cursor_x == 0 {
                break;
            }
            let upto = self.cursor_x.min(self.size_x);
            self.cursor_x = (0..upto).rev().find(|&x| self.tab_ruler[x]).unwrap_or(0);
        }
    }

    /// Line feed plus carriage return, scrolling at the bottom margin.
    pub fn newline(&mut self) {
        self.move_down(1, true);
        self.move_line_home();
    }

    // --- writing ---

    /// Write one symbol at the cursor and advance.
    pub fn write(&mut self, ch: Symbol, attr: Attr) {
        let last = if self.cursor_y >= self.margin_top && self.cursor_y <= self.margin_bottom {
            self.margin_bottom
        } else {
            self.size_y - 1
        };

        if self.cursor_x >= self.size_x {
            if self.flags.contains(Flags::AUTO_WRAP) {
                self.cursor_x = 0;
                self.cursor_y += 1;
            } else {
                self.cursor_x = self.size_x - 1;
            }
        }

        if self.cursor_y > last {
            self.cursor_y = last;
            self.scroll_up(1);
        }

        if self.flags.contains(Flags::INSERT_MODE) && self.cursor_x < self.size_x - 1 {
            self.lines[self.cursor_y].cells_mut()[self.cursor_x..self.size_x].rotate_right(1);
        }

        self.lines[self.cursor_y].set(self.cursor_x, Cell::new(ch, attr));
        self.cursor_x += 1;
    }

    // --- erasing ---

    /// Reset all cells in the inclusive region between `(x_from,
    /// y_from)` and `(x_to, y_to)` in row-major order. Rows between the
    /// endpoints are erased across their full width. With
    /// `keep_protected`, cells carrying the protect attribute survive.
    fn erase_region(
        &mut self,
        x_from: usize,
        y_from: usize,
        x_to: usize,
        y_to: usize,
        keep_protected: bool,
    ) {
        let def_attr = self.def_attr;
        let y_to = y_to.min(self.size_y - 1);
        if y_from > y_to {
            return;
        }
        for y in y_from..=y_to {
            let from = if y == y_from { x_from } else { 0 };
            let to = if y == y_to { x_to.min(self.size_x - 1) } else { self.size_x - 1 };
            self.lines[y].erase(from, to, &def_attr, keep_protected);
        }
    }

    /// Cursor column snapped back into the grid when a wrap is pending.
    fn draw_x(&self) -> usize {
        self.cursor_x.min(self.size_x - 1)
    }

    pub fn erase_cursor(&mut self) {
        let x = self.draw_x();
        self.erase_region(x, self.cursor_y, x, self.cursor_y, false);
    }

    /// Erase `num` cells starting at the cursor.
    pub fn erase_chars(&mut self, num: usize) {
        if num == 0 {
            return;
        }
        let x = self.draw_x();
        self.erase_region(x, self.cursor_y, x.saturating_add(num - 1), self.cursor_y, false);
    }

    pub fn erase_cursor_to_end(&mut self, keep_protected: bool) {
        let x = self.draw_x();
        self.erase_region(x, self.cursor_y, self.size_x - 1, self.cursor_y, keep_protected);
    }

    pub fn erase_home_to_cursor(&mut self, keep_protected: bool) {
        self.erase_region(0, self.cursor_y, self.draw_x(), self.cursor_y, keep_protected);
    }

    pub fn erase_current_line(&mut self, keep_protected: bool) {
        self.erase_region(0, self.cursor_y, self.size_x - 1, self.cursor_y, keep_protected);
    }

    pub fn erase_screen_to_cursor(&mut self, keep_protected: bool) {
        self.erase_region(0, 0, self.draw_x(), self.cursor_y, keep_protected);
    }

    pub fn erase_cursor_to_screen(&mut self, keep_protected: bool) {
        let x = self.draw_x();
        self.erase_region(x, self.cursor_y, self.size_x - 1, self.size_y - 1, keep_protected);
    }

    pub fn erase_screen(&mut self, keep_protected: bool) {
        self.erase_region(0, 0, self.size_x - 1, self.size_y - 1, keep_protected);
    }

    // --- line and character insertion ---

    /// Insert `num` blank lines at the cursor row, pushing the rest of
    /// the scroll region down. A no-op outside the region.
    pub fn insert_lines(&mut self, num: usize) {
        if self.cursor_y < self.margin_top || self.cursor_y > self.margin_bottom {
            return;
        }
        let num = num.min(self.margin_bottom - self.cursor_y + 1);
        if num == 0 {
            return;
        }

        let def_attr = self.def_attr;
        for i in 0..num {
            self.lines[self.margin_bottom - i].clear(&def_attr);
        }
        self.lines[self.cursor_y..=self.margin_bottom].rotate_right(num);
        self.cursor_x = 0;
    }

    /// Delete `num` lines at the cursor row, pulling the rest of the
    /// scroll region up and clearing the tail. A no-op outside the
    /// region.
    pub fn delete_lines(&mut self, num: usize) {
        if self.cursor_y < self.margin_top || self.cursor_y > self.margin_bottom {
            return;
        }
        let num = num.min(self.margin_bottom - self.cursor_y + 1);
        if num == 0 {
            return;
        }

        let def_attr = self.def_attr;
        for i in 0..num {
            self.lines[self.cursor_y + i].clear(&def_attr);
        }
        self.lines[self.cursor_y..=self.margin_bottom].rotate_left(num);
        self.cursor_x = 0;
    }

    /// Shift the rest of the row right by `num` and blank the cells at
    /// the cursor.
    pub fn insert_chars(&mut self, num: usize) {
        if num == 0 {
            return;
        }
        let x = self.draw_x();
        let num = num.min(self.size_x - x);
        let def_attr = self.def_attr;
        let size_x = self.size_x;

        let line = &mut self.lines[self.cursor_y];
        line.cells_mut()[x..size_x].rotate_right(num);
        line.erase(x, x + num - 1, &def_attr, false);
    }

    /// Remove `num` cells at the cursor, pulling the rest of the row
    /// left and blanking the tail.
    pub fn delete_chars(&mut self, num: usize) {
        if num == 0 {
            return;
        }
        let x = self.draw_x();
        let num = num.min(self.size_x - x);
        let def_attr = self.def_attr;
        let size_x = self.size_x;

        let line = &mut self.lines[self.cursor_y];
        line.cells_mut()[x..size_x].rotate_left(num);
        line.erase(size_x - num, size_x - 1, &def_attr, false);
    }

    // --- scrolling ---

    /// Scroll the region up by `num` lines. Lines leaving the top of the
    /// region retire into scrollback; fresh blank lines enter at the
    /// bottom. Selection endpoints follow their content.
    pub fn scroll_up(&mut self, num: usize) {
        let region = self.margin_bottom - self.margin_top + 1;
        let num = num.min(region);
        if num == 0 {
            return;
        }

        let fixed = self.flags.contains(Flags::FIXED_POS);
        let def_attr = self.def_attr;
        for i in 0..num {
            let slot = self.margin_top + i;
            match Line::try_new(self.size_x, &def_attr) {
                Ok(fresh) => {
                    let old = mem::replace(&mut self.lines[slot], fresh);
                    if let Some(trimmed) = self.sb.push(old, fixed) {
                        self.sel.patch_trim(trimmed);
                    }
                }
                Err(_) => {
                    // No replacement line; the scroll must still happen,
                    // so the old line is cleared and reused in place.
                    warn!("scrollback line allocation failed, reusing line in place");
                    self.lines[slot].clear(&def_attr);
                }
            }
        }

        self.lines[self.margin_top..=self.margin_bottom].rotate_left(num);
        self.sel.patch_scroll_up(num, &self.sb);
    }

    /// Scroll the region down by `num` lines. Purely a rotation; nothing
    /// enters or leaves scrollback.
    pub fn scroll_down(&mut self, num: usize) {
        let region = self.margin_bottom - self.margin_top + 1;
        let num = num.min(region);
        if num == 0 {
            return;
        }

        self.lines[self.margin_top..=self.margin_bottom].rotate_right(num);
        let def_attr = self.def_attr;
        for i in 0..num {
            self.lines[self.margin_top + i].clear(&def_attr);
        }
        self.sel.patch_scroll_down(num);
    }

    // --- scrollback view ---

    /// Change the scrollback capacity, immediately trimming the oldest
    /// lines beyond it.
    pub fn set_max_sb(&mut self, max: usize) {
        let fixed = self.flags.contains(Flags::FIXED_POS);
        for id in self.sb.set_max(max, fixed) {
            self.sel.patch_trim(id);
        }
    }

    /// Drop the whole scrollback. Selection endpoints that pointed into
    /// it saturate at the top.
    pub fn clear_sb(&mut self) {
        self.sb.clear();
        self.sel.patch_clear();
    }

    pub fn sb_up(&mut self, num: usize) {
        self.sb.up(num);
    }

    pub fn sb_down(&mut self, num: usize) {
        self.sb.down(num);
    }

    pub fn sb_page_up(&mut self, num: usize) {
        self.sb.up(num.saturating_mul(self.size_y));
    }

    pub fn sb_page_down(&mut self, num: usize) {
        self.sb.down(num.saturating_mul(self.size_y));
    }

    /// Return the viewport to the live screen.
    pub fn sb_reset(&mut self) {
        self.sb.reset();
    }

    // --- selection ---

    pub fn selection_reset(&mut self) {
        self.sel.reset();
    }

    /// Begin a selection at the given view coordinates. While the
    /// viewport shows scrollback, view rows resolve into scrollback
    /// lines first and spill over into live rows.
    pub fn selection_start(&mut self, x: usize, y: usize) {
        let at = self.resolve_selection(x, y);
        self.sel.begin(at);
    }

    /// Move the open end of the selection. Ignored while no selection is
    /// active.
    pub fn selection_target(&mut self, x: usize, y: usize) {
        let at = self.resolve_selection(x, y);
        self.sel.target(at);
    }

    fn resolve_selection(&self, x: usize, y: usize) -> Endpoint {
        if let Some(pos) = self.sb.pos() {
            if let Some(idx) = self.sb.index_of(pos) {
                let remaining = self.sb.len() - idx;
                if y < remaining {
                    return Endpoint::Scrollback { id: self.sb.line_at(idx + y).sb_id(), x };
                }
                return Endpoint::Viewport { x, y: y - remaining };
            }
        }
        Endpoint::Viewport { x, y }
    }

    /// Copy the selected text, walking the endpoints in render order.
    /// Rows are joined with `\n`; trailing blanks are dropped except on
    /// the final row, where the selection covers them explicitly.
    pub fn selection_copy(&self) -> Result<String> {
        if !self.sel.is_active() {
            return Err(Error::Range);
        }
        let (lo, hi) = self.sel.ordered();

        let mut out = String::new();
        if matches!(hi, Endpoint::Top) {
            // Both endpoints scrolled off the oldest end; nothing left.
            return Ok(out);
        }

        let mut first = true;

        // Scrollback portion.
        let sb_start = match lo {
            Endpoint::Top => {
                if self.sb.is_empty() {
                    None
                } else {
                    Some((0, 0))
                }
            }
            Endpoint::Scrollback { id, x } => Some((self.sb.index_of(id).unwrap_or(0), x)),
            Endpoint::Viewport { .. } => None,
        };
        if let Some((start_idx, start_x)) = sb_start {
            for idx in start_idx..self.sb.len() {
                let line = self.sb.line_at(idx);
                let from = if first { start_x } else { 0 };
                let ends_here = matches!(hi, Endpoint::Scrollback { id, .. } if id == line.sb_id());
                let to = match hi {
                    Endpoint::Scrollback { x, .. } if ends_here => x,
                    _ => line.width().saturating_sub(1),
                };

                if !first {
                    out.push('\n');
                }
                copy_cells(&mut out, line, from, to, line.width(), !ends_here);
                first = false;

                if ends_here {
                    return Ok(out);
                }
            }
        }

        // Live portion.
        let (end_x, end_y) = match hi {
            Endpoint::Viewport { x, y } => (x, y),
            // A scrollback endpoint is always reached inside the loop
            // above while it is resident.
            _ => return Ok(out),
        };
        let start_y = match lo {
            Endpoint::Viewport { y, .. } => y,
            _ => 0,
        };

        let last_row = end_y.min(self.size_y - 1);
        for y in start_y..=last_row {
            let line = &self.lines[y];
            let from = match lo {
                Endpoint::Viewport { x, .. } if y == start_y => x,
                _ => 0,
            };
            let ends_here = y == end_y;
            let to = if ends_here { end_x } else { self.size_x - 1 };

            if !first {
                out.push('\n');
            }
            copy_cells(&mut out, line, from, to, self.size_x, !ends_here);
            first = false;
        }

        Ok(out)
    }

    // --- resize ---

    /// Resize the visible grid. Shrinking the height spills the top of
    /// the screen into scrollback; growing it pulls retired content back
    /// out. Fails without touching the screen when a dimension is zero
    /// or an up-front allocation is refused.
    pub fn resize(&mut self, new_x: usize, new_y: usize) -> Result<()> {
        if new_x == 0 || new_y == 0 {
            return Err(Error::InvalidArg);
        }

        // Enlarge the line array first; all allocation happens before
        // any visible mutation.
        if new_y > self.lines.len() {
            let needed = new_y - self.lines.len();
            let width = new_x.max(self.size_x);
            let mut fresh = Vec::new();
            fresh.try_reserve_exact(needed).map_err(|_| Error::OutOfMemory)?;
            for _ in 0..needed {
                fresh.push(Line::try_new(width, &self.def_attr)?);
            }
            self.lines.try_reserve(needed).map_err(|_| Error::OutOfMemory)?;
            self.lines.append(&mut fresh);
        }

        if new_x > self.size_x {
            let def_attr = self.def_attr;
            for line in &mut self.lines {
                line.grow(new_x, &def_attr)?;
            }
            // Re-initialise the newly exposed right-hand columns; an
            // overallocated line may still hold content there from
            // before an earlier shrink.
            for line in &mut self.lines {
                line.erase(self.size_x, new_x - 1, &def_attr, false);
            }
        }

        // xterm destroys margins on resize, so do we. The region spans
        // the whole old screen so a height shrink spills from the top.
        self.margin_top = 0;
        self.margin_bottom = self.size_y - 1;

        // Adjust x first; the scroll helpers depend on it.
        self.size_x = new_x;
        self.tab_ruler = default_ruler(new_x);
        if self.cursor_x >= self.size_x {
            self.cursor_x = self.size_x - 1;
        }

        if new_y < self.size_y {
            let diff = self.size_y - new_y;
            self.scroll_up(diff);
            self.cursor_y = self.cursor_y.saturating_sub(diff);
        } else if new_y > self.size_y {
            let mut restored = 0;
            while self.size_y + restored < new_y && !self.sb.is_empty() {
                let def_attr = self.def_attr;
                let target = self.size_x;
                if let Some(line) = self.sb.newest_mut() {
                    line.grow(target, &def_attr)?;
                }
                let Some(id) = self.sb.id_from_tail(1) else { break };
                let Some(line) = self.sb.pop() else { break };
                self.lines.insert(0, line);
                self.sel.patch_restore(id);
                self.cursor_y += 1;
                restored += 1;
            }
        }

        self.size_y = new_y;
        self.margin_bottom = new_y - 1;
        if self.cursor_y >= self.size_y {
            self.cursor_y = self.size_y - 1;
        }

        Ok(())
    }
}

/// Append the inclusive cell range `[from, to]` of a line as text. Empty
/// cells read as spaces; with `trim_trailing`, trailing blanks are
/// dropped.
fn copy_cells(out: &mut String, line: &Line, from: usize, to: usize, bound: usize, trim_trailing: bool) {
    if bound == 0 {
        return;
    }
    let to = to.min(bound - 1);
    if from > to {
        return;
    }

    let mut chars: Vec<char> = Vec::with_capacity(to - from + 1);
    for x in from..=to {
        let c = match line.cell(x) {
            Some(cell) if !cell.is_empty() => {
                cell.ch().as_char().unwrap_or(char::REPLACEMENT_CHARACTER)
            }
            _ => ' ',
        };
        chars.push(c);
    }
    if trim_trailing {
        while chars.last() == Some(&' ') {
            chars.pop();
        }
    }
    out.extend(chars);
}

impl std::fmt::Display for Screen {
    /// The current view as plain text: scrollback rows from the view
    /// anchor first, then live rows.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut history = self.sb.view();
        let mut live = 0;
        for i in 0..self.size_y {
            let line = match history.next() {
                Some(line) => line,
                None => {
                    let line = &self.lines[live];
                    live += 1;
                    line
                }
            };
            for x in 0..self.size_x {
                match line.cell(x) {
                    Some(cell) => write!(f, "{}", cell)?,
                    None => write!(f, " ")?,
                }
            }
            if i + 1 < self.size_y {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(feature = "internal-test")]
impl Screen {
    pub fn line_num(&self) -> usize {
        self.lines.len()
    }

    pub fn tab_ruler(&self) -> &[bool] {
        &self.tab_ruler
    }

    pub fn sb_pos_id(&self) -> Option<u64> {
        self.sb.pos()
    }

    pub fn sb_ids(&self) -> Vec<u64> {
        (0..self.sb.len()).map(|i| self.sb.line_at(i).sb_id()).collect()
    }

    /// Text of the idx-th oldest scrollback line, trailing blanks
    /// trimmed.
    pub fn sb_line_text(&self, idx: usize) -> String {
        let line = self.sb.line_at(idx);
        let mut out = String::new();
        copy_cells(&mut out, line, 0, line.width().saturating_sub(1), line.width(), true);
        out
    }

    /// Text of a live viewport row, trailing blanks trimmed.
    pub fn row_text(&self, y: usize) -> String {
        let mut out = String::new();
        copy_cells(&mut out, &self.lines[y], 0, self.size_x - 1, self.size_x, true);
        out
    }

    pub fn sel_endpoints(&self) -> (Endpoint, Endpoint) {
        self.sel.endpoints()
    }
}
