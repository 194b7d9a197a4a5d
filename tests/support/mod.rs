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

//! Shared helpers for the integration tests: a plain-text renderer that
//! captures a draw traversal, and a writer that feeds strings through
//! the screen the way an escape-sequence layer would.

#![allow(dead_code)]

use vtgrid::{Attr, Renderer, Result, Screen, Size, Symbol};

pub fn screen(width: usize, height: usize) -> Screen {
    Screen::new(Size { width, height }).unwrap()
}

pub fn screen_with_sb(width: usize, height: usize, sb_max: usize) -> Screen {
    Screen::with_scrollback(Size { width, height }, sb_max).unwrap()
}

/// Write a string at the cursor; `\n` acts as newline (line feed plus
/// carriage return), everything else is written with the screen's
/// default attributes.
pub fn write_str(screen: &mut Screen, s: &str) {
    let attr = screen.get_def_attr();
    write_str_attr(screen, s, attr);
}

pub fn write_str_attr(screen: &mut Screen, s: &str, attr: Attr) {
    for c in s.chars() {
        if c == '\n' {
            screen.newline();
        } else {
            screen.write(Symbol::from_char(c), attr);
        }
    }
}

/// A renderer that captures one frame as a character grid, with the
/// inverse bit and cell width kept per position. Cells reported outside
/// the viewport (the off-screen cursor) land in `extra`.
#[derive(Default)]
pub struct TextFrame {
    pub rows: Vec<Vec<char>>,
    pub inverse: Vec<Vec<bool>>,
    pub widths: Vec<Vec<u8>>,
    pub extra: Vec<(usize, usize, char)>,
    pub prepared: bool,
    pub rendered: bool,
}

impl TextFrame {
    pub fn new() -> Self {
        TextFrame::default()
    }

    /// One captured row as text, trailing blanks trimmed.
    pub fn row(&self, y: usize) -> String {
        let s: String = self.rows[y].iter().collect();
        s.trim_end().to_string()
    }

    /// The whole frame, rows joined with newlines, trailing blanks
    /// trimmed per row.
    pub fn text(&self) -> String {
        (0..self.rows.len()).map(|y| self.row(y)).collect::<Vec<_>>().join("\n")
    }
}

impl Renderer for TextFrame {
    fn prepare(&mut self, screen: &Screen) -> Result<()> {
        let (w, h) = (screen.get_width(), screen.get_height());
        self.rows = vec![vec![' '; w]; h];
        self.inverse = vec![vec![false; w]; h];
        self.widths = vec![vec![0; w]; h];
        self.extra.clear();
        self.prepared = true;
        Ok(())
    }

    fn draw_cell(
        &mut self,
        _id: Symbol,
        chars: &[char],
        width: u8,
        posx: usize,
        posy: usize,
        attr: &Attr,
    ) -> Result<()> {
        let c = chars.first().copied().unwrap_or(' ');
        if posy < self.rows.len() && posx < self.rows[posy].len() {
            self.rows[posy][posx] = c;
            self.inverse[posy][posx] = attr.inverse();
            self.widths[posy][posx] = width;
        } else {
            self.extra.push((posx, posy, c));
        }
        Ok(())
    }

    fn render(&mut self, _screen: &Screen) -> Result<()> {
        self.rendered = true;
        Ok(())
    }
}

/// Capture the screen's current view.
pub fn frame(screen: &Screen) -> TextFrame {
    let mut f = TextFrame::new();
    screen.draw(&mut f).expect("draw traversal");
    f
}
