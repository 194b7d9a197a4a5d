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

//! The scrollback module stores lines that scrolled off the top of the
//! viewport. Lines are kept oldest-first with strictly increasing ids,
//! so references from the selection and the view position can be held as
//! ids instead of pointers and validated by binary search after trims.

use std::collections::VecDeque;

use crate::line::Line;

/// Retired-line storage with a bounded capacity and a view anchor.
///
/// `pos`, when set, names the line the draw traversal starts from; when
/// unset the viewport shows the live grid. The screen owns the policy of
/// when `pos` drifts on trims (the FIXED_POS flag) and passes it in.
#[derive(Debug)]
pub struct Scrollback {
    lines: VecDeque<Line>,
    max: usize,
    last_id: u64,
    pos: Option<u64>,
}

impl Scrollback {
    pub fn new(max: usize) -> Self {
        Scrollback { lines: VecDeque::new(), max, last_id: 0, pos: None }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn pos(&self) -> Option<u64> {
        self.pos
    }

    pub fn line_at(&self, idx: usize) -> &Line {
        &self.lines[idx]
    }

    pub fn newest_mut(&mut self) -> Option<&mut Line> {
        self.lines.back_mut()
    }

    /// Locate a line by id. Ids are strictly increasing oldest to
    /// newest, so this is a binary search.
    pub fn index_of(&self, id: u64) -> Option<usize> {
        let idx = self.lines.partition_point(|l| l.sb_id() < id);
        (idx < self.lines.len() && self.lines[idx].sb_id() == id).then_some(idx)
    }

    /// The id of the line `offset` places back from the newest end;
    /// `offset` is 1-based so `id_from_tail(1)` is the newest line.
    pub fn id_from_tail(&self, offset: usize) -> Option<u64> {
        if offset == 0 || offset > self.lines.len() {
            return None;
        }
        Some(self.lines[self.lines.len() - offset].sb_id())
    }

    /// Link a retired viewport line in at the newest end, assigning its
    /// id. Returns the id of the oldest line if the capacity forced one
    /// out. With a capacity of zero the line is dropped outright.
    pub fn push(&mut self, mut line: Line, fixed: bool) -> Option<u64> {
        if self.max == 0 {
            return None;
        }

        self.last_id += 1;
        line.set_sb_id(self.last_id);
        self.lines.push_back(line);

        if self.lines.len() > self.max {
            self.trim_oldest(fixed)
        } else {
            None
        }
    }

    /// Detach and return the newest line, forgetting its id. Used when a
    /// growing resize restores retired content into the viewport.
    pub fn pop(&mut self) -> Option<Line> {
        let mut line = self.lines.pop_back()?;
        if self.pos == Some(line.sb_id()) {
            // The viewed line re-enters the viewport; track backward so
            // the anchor stays inside the remaining history.
            self.pos = self.lines.back().map(Line::sb_id);
        }
        line.set_sb_id(0);
        Some(line)
    }

    /// Change the capacity, trimming oldest lines beyond it right away.
    /// Returns the ids of every trimmed line so the caller can patch
    /// selection endpoints.
    pub fn set_max(&mut self, max: usize, fixed: bool) -> Vec<u64> {
        self.max = max;
        let mut trimmed = Vec::new();
        while self.lines.len() > self.max {
            if let Some(id) = self.trim_oldest(fixed) {
                trimmed.push(id);
            }
        }
        trimmed
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.pos = None;
    }

    /// Move the view anchor `num` lines toward older history, stopping
    /// at the oldest line.
    pub fn up(&mut self, num: usize) {
        for _ in 0..num {
            match self.pos {
                None => match self.lines.back() {
                    Some(line) => self.pos = Some(line.sb_id()),
                    None => break,
                },
                Some(id) => match self.index_of(id) {
                    Some(i) if i > 0 => self.pos = Some(self.lines[i - 1].sb_id()),
                    _ => break,
                },
            }
        }
    }

    /// Move the view anchor `num` lines toward the live screen; walking
    /// past the newest line lands back on the live view.
    pub fn down(&mut self, num: usize) {
        for _ in 0..num {
            let Some(id) = self.pos else { break };
            match self.index_of(id) {
                Some(i) if i + 1 < self.lines.len() => {
                    self.pos = Some(self.lines[i + 1].sb_id());
                }
                _ => {
                    self.pos = None;
                    break;
                }
            }
        }
    }

    pub fn reset(&mut self) {
        self.pos = None;
    }

    /// Iterate the lines the viewport shows, starting at the view
    /// anchor. Empty when the anchor is unset.
    pub fn view(&self) -> impl Iterator<Item = &Line> + '_ {
        self.lines.iter().skip(self.view_start())
    }

    /// Number of lines from the view anchor through the newest line.
    pub fn view_len(&self) -> usize {
        self.lines.len() - self.view_start()
    }

    fn view_start(&self) -> usize {
        self.pos.and_then(|id| self.index_of(id)).unwrap_or(self.lines.len())
    }

    fn trim_oldest(&mut self, fixed: bool) -> Option<u64> {
        let old = self.lines.pop_front()?;
        let id = old.sb_id();

        match self.pos {
            Some(p) if p == id => {
                // The viewed line went away; show its successor. When
                // the trim drained everything, fall back to live view.
                self.pos = self.lines.front().map(Line::sb_id);
            }
            Some(p) if !fixed => {
                // Unpinned view drifts with the flow, keeping its
                // distance from the live edge.
                if let Some(i) = self.index_of(p) {
                    if i + 1 < self.lines.len() {
                        self.pos = Some(self.lines[i + 1].sb_id());
                    }
                }
            }
            _ => {}
        }

        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::Attr;

    fn blank_line() -> Line {
        Line::try_new(4, &Attr::default()).unwrap()
    }

    fn fill(sb: &mut Scrollback, n: usize) {
        for _ in 0..n {
            sb.push(blank_line(), false);
        }
    }

    #[test]
    fn ids_strictly_increase() {
        let mut sb = Scrollback::new(10);
        fill(&mut sb, 5);
        for i in 1..sb.len() {
            assert!(sb.line_at(i - 1).sb_id() < sb.line_at(i).sb_id());
        }
    }

    #[test]
    fn capacity_is_enforced() {
        let mut sb = Scrollback::new(3);
        fill(&mut sb, 10);
        assert_eq!(sb.len(), 3);
        // Oldest ids were the ones trimmed.
        assert_eq!(sb.line_at(0).sb_id(), 8);
    }

    #[test]
    fn zero_capacity_links_nothing() {
        let mut sb = Scrollback::new(0);
        assert_eq!(sb.push(blank_line(), false), None);
        assert!(sb.is_empty());
    }

    #[test]
    fn trim_moves_pos_to_successor() {
        let mut sb = Scrollback::new(2);
        fill(&mut sb, 2);
        // Anchor the view on the oldest line, then force it out.
        sb.up(2);
        assert_eq!(sb.pos(), Some(1));

        sb.push(blank_line(), false);
        assert_eq!(sb.pos(), Some(2));
    }

    #[test]
    fn trim_with_capacity_one_lands_on_new_line() {
        let mut sb = Scrollback::new(1);
        fill(&mut sb, 1);
        sb.up(1);
        assert_eq!(sb.pos(), Some(1));

        sb.push(blank_line(), false);
        assert_eq!(sb.pos(), Some(2), "view lands on the newly linked line");
    }

    #[test]
    fn unpinned_pos_drifts_on_trim() {
        let mut sb = Scrollback::new(3);
        fill(&mut sb, 3);
        sb.up(1);
        assert_eq!(sb.pos(), Some(3));

        sb.push(blank_line(), false);
        assert_eq!(sb.pos(), Some(4), "view keeps its distance from the live edge");
    }

    #[test]
    fn pinned_pos_stays_on_trim() {
        let mut sb = Scrollback::new(3);
        fill(&mut sb, 3);
        sb.up(1);
        assert_eq!(sb.pos(), Some(3));

        sb.push(blank_line(), true);
        assert_eq!(sb.pos(), Some(3));
    }

    #[test]
    fn pop_forgets_id_and_tracks_pos_back() {
        let mut sb = Scrollback::new(5);
        fill(&mut sb, 3);
        sb.up(1);
        assert_eq!(sb.pos(), Some(3));

        let line = sb.pop().unwrap();
        assert_eq!(line.sb_id(), 0);
        assert_eq!(sb.pos(), Some(2));
        assert_eq!(sb.len(), 2);

        // Ids never restart below what was already handed out.
        sb.push(blank_line(), false);
        assert_eq!(sb.line_at(2).sb_id(), 4);
    }

    #[test]
    fn set_max_trims_and_reports() {
        let mut sb = Scrollback::new(10);
        fill(&mut sb, 5);
        let trimmed = sb.set_max(2, false);
        assert_eq!(trimmed, vec![1, 2, 3]);
        assert_eq!(sb.len(), 2);
    }

    #[test]
    fn navigation_clamps_at_both_ends() {
        let mut sb = Scrollback::new(10);
        fill(&mut sb, 3);

        sb.up(100);
        assert_eq!(sb.pos(), Some(1));

        sb.down(2);
        assert_eq!(sb.pos(), Some(3));
        sb.down(1);
        assert_eq!(sb.pos(), None, "walking past the newest line lands on live view");

        sb.up(1);
        assert_eq!(sb.pos(), Some(3));
    }

    #[test]
    fn view_iterates_from_anchor() {
        let mut sb = Scrollback::new(10);
        fill(&mut sb, 4);
        assert_eq!(sb.view_len(), 0);

        sb.up(2);
        assert_eq!(sb.view_len(), 2);
        let ids: Vec<u64> = sb.view().map(Line::sb_id).collect();
        assert_eq!(ids, vec![3, 4]);
    }
}
