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

use crate::{
    attrs::Attr,
    cell::Cell,
    Error, Result,
};

/// A row of cells.
///
/// A line may be wider than the current grid; shrinking the grid never
/// shrinks lines, so the spare cells speed up a later regrowth. The
/// `sb_id` is zero until the line is linked into scrollback, at which
/// point it receives a monotonically increasing id that orders
/// scrollback lines for selection comparisons.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Line {
    cells: Vec<Cell>,
    sb_id: u64,
}

impl Line {
    pub fn try_new(width: usize, attr: &Attr) -> Result<Self> {
        if width == 0 {
            return Err(Error::InvalidArg);
        }

        let mut cells = Vec::new();
        cells.try_reserve_exact(width).map_err(|_| Error::OutOfMemory)?;
        cells.resize(width, Cell::blank(*attr));

        Ok(Line { cells, sb_id: 0 })
    }

    /// The allocated width of this line.
    pub fn width(&self) -> usize {
        self.cells.len()
    }

    /// Grow the cell array to at least `width`, initialising new cells
    /// from `attr`. Requests below the current width are a no-op.
    pub fn grow(&mut self, width: usize, attr: &Attr) -> Result<()> {
        if width == 0 {
            return Err(Error::InvalidArg);
        }
        if width <= self.cells.len() {
            return Ok(());
        }

        let additional = width - self.cells.len();
        self.cells.try_reserve(additional).map_err(|_| Error::OutOfMemory)?;
        self.cells.resize(width, Cell::blank(*attr));

        Ok(())
    }

    pub fn cell(&self, x: usize) -> Option<&Cell> {
        self.cells.get(x)
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Overwrite the cell at `x`. Writes beyond the allocated width are
    /// dropped; callers keep lines at least as wide as the grid.
    pub fn set(&mut self, x: usize, cell: Cell) {
        if let Some(slot) = self.cells.get_mut(x) {
            *slot = cell;
        }
    }

    /// Reset the inclusive cell range `[from, to]` from `attr`. When
    /// `keep_protected` is set, cells with the protect attribute are
    /// skipped.
    pub fn erase(&mut self, from: usize, to: usize, attr: &Attr, keep_protected: bool) {
        if from >= self.cells.len() || to < from {
            return;
        }

        let to = to.min(self.cells.len() - 1);
        for cell in &mut self.cells[from..=to] {
            if keep_protected && cell.attr().protect() {
                continue;
            }
            cell.init(attr);
        }
    }

    /// Reset every cell from `attr`.
    pub fn clear(&mut self, attr: &Attr) {
        for cell in &mut self.cells {
            cell.init(attr);
        }
    }

    pub fn sb_id(&self) -> u64 {
        self.sb_id
    }

    pub fn set_sb_id(&mut self, id: u64) {
        self.sb_id = id;
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for cell in &self.cells {
            write!(f, "{}", cell)?;
        }
        Ok(())
    }
}
