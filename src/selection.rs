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

//! The selection module tracks two endpoints that stay valid while the
//! screen scrolls, the scrollback trims, and the viewport resizes. The
//! endpoints order by render position: scrollback lines (by id) come
//! before live viewport rows, and [`Endpoint::Top`] sorts before
//! everything after its line was trimmed away.

use std::cmp::Ordering;

use crate::scrollback::Scrollback;

/// One end of a selection.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Endpoint {
    /// The endpoint scrolled off the oldest end of the scrollback.
    Top,
    /// A cell on a line resident in scrollback.
    Scrollback { id: u64, x: usize },
    /// A cell on a live viewport row. `y` may exceed the viewport height
    /// after downward scrolling; such an endpoint simply renders
    /// off-screen.
    Viewport { x: usize, y: usize },
}

/// A render position, i.e. a cell the draw traversal is visiting.
#[derive(Debug, Clone, Copy)]
pub enum RenderPos {
    Scrollback { id: u64, x: usize },
    Viewport { x: usize, y: usize },
}

impl From<RenderPos> for Endpoint {
    fn from(pos: RenderPos) -> Self {
        match pos {
            RenderPos::Scrollback { id, x } => Endpoint::Scrollback { id, x },
            RenderPos::Viewport { x, y } => Endpoint::Viewport { x, y },
        }
    }
}

/// Render order of two endpoints: Top first, then scrollback lines by
/// id, then viewport rows top to bottom, columns left to right.
fn cmp(a: &Endpoint, b: &Endpoint) -> Ordering {
    match (a, b) {
        (Endpoint::Top, Endpoint::Top) => Ordering::Equal,
        (Endpoint::Top, _) => Ordering::Less,
        (_, Endpoint::Top) => Ordering::Greater,

        (Endpoint::Scrollback { id: a_id, x: a_x }, Endpoint::Scrollback { id: b_id, x: b_x }) => {
            a_id.cmp(b_id).then(a_x.cmp(b_x))
        }
        (Endpoint::Scrollback { .. }, Endpoint::Viewport { .. }) => Ordering::Less,
        (Endpoint::Viewport { .. }, Endpoint::Scrollback { .. }) => Ordering::Greater,

        (Endpoint::Viewport { x: a_x, y: a_y }, Endpoint::Viewport { x: b_x, y: b_y }) => {
            a_y.cmp(b_y).then(a_x.cmp(b_x))
        }
    }
}

/// Selection state: an active flag plus the two endpoints.
#[derive(Debug)]
pub struct Selection {
    active: bool,
    start: Endpoint,
    end: Endpoint,
}

impl Selection {
    pub fn new() -> Self {
        Selection {
            active: false,
            start: Endpoint::Viewport { x: 0, y: 0 },
            end: Endpoint::Viewport { x: 0, y: 0 },
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn reset(&mut self) {
        self.active = false;
    }

    pub fn begin(&mut self, at: Endpoint) {
        self.active = true;
        self.start = at;
        self.end = at;
    }

    pub fn target(&mut self, at: Endpoint) {
        if self.active {
            self.end = at;
        }
    }

    pub fn endpoints(&self) -> (Endpoint, Endpoint) {
        (self.start, self.end)
    }

    /// The endpoints in render order; the user may have dragged upward.
    pub fn ordered(&self) -> (Endpoint, Endpoint) {
        if cmp(&self.start, &self.end) == Ordering::Greater {
            (self.end, self.start)
        } else {
            (self.start, self.end)
        }
    }

    /// Whether the given render position falls inside the selection.
    pub fn contains(&self, pos: RenderPos) -> bool {
        if !self.active {
            return false;
        }
        let p = Endpoint::from(pos);
        let (lo, hi) = self.ordered();
        cmp(&lo, &p) != Ordering::Greater && cmp(&hi, &p) != Ordering::Less
    }

    /// The viewport scrolled up by `num` rows: viewport endpoints move
    /// up with their content and may chase it into the scrollback; if
    /// the walk runs out of history the endpoint saturates at the top.
    pub fn patch_scroll_up(&mut self, num: usize, sb: &Scrollback) {
        Self::shift_up(&mut self.start, num, sb);
        Self::shift_up(&mut self.end, num, sb);
    }

    /// The viewport scrolled down by `num` rows. No overflow handling;
    /// an endpoint pushed past the bottom renders off-screen.
    pub fn patch_scroll_down(&mut self, num: usize) {
        Self::shift_down(&mut self.start, num);
        Self::shift_down(&mut self.end, num);
    }

    /// A scrollback line was trimmed away.
    pub fn patch_trim(&mut self, id: u64) {
        for ep in [&mut self.start, &mut self.end] {
            if matches!(*ep, Endpoint::Scrollback { id: ep_id, .. } if ep_id == id) {
                *ep = Endpoint::Top;
            }
        }
    }

    /// The whole scrollback was dropped.
    pub fn patch_clear(&mut self) {
        for ep in [&mut self.start, &mut self.end] {
            if matches!(*ep, Endpoint::Scrollback { .. }) {
                *ep = Endpoint::Top;
            }
        }
    }

    /// A scrollback line re-entered the viewport at row 0 during a
    /// growing resize, shifting every live row down by one.
    pub fn patch_restore(&mut self, id: u64) {
        for ep in [&mut self.start, &mut self.end] {
            *ep = match *ep {
                Endpoint::Scrollback { id: ep_id, x } if ep_id == id => {
                    Endpoint::Viewport { x, y: 0 }
                }
                Endpoint::Viewport { x, y } => Endpoint::Viewport { x, y: y + 1 },
                other => other,
            };
        }
    }

    fn shift_up(ep: &mut Endpoint, num: usize, sb: &Scrollback) {
        if let Endpoint::Viewport { x, y } = *ep {
            if y >= num {
                *ep = Endpoint::Viewport { x, y: y - num };
            } else {
                *ep = match sb.id_from_tail(num - y) {
                    Some(id) => Endpoint::Scrollback { id, x },
                    None => Endpoint::Top,
                };
            }
        }
    }

    fn shift_down(ep: &mut Endpoint, num: usize) {
        if let Endpoint::Viewport { x, y } = *ep {
            *ep = Endpoint::Viewport { x, y: y.saturating_add(num) };
        }
    }
}
