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

use unicode_width::UnicodeWidthChar;

use crate::attrs::Attr;

/// Symbol ids at and above this value are keys into an external symbol
/// table rather than Unicode scalar values.
const SYMBOL_TABLE_BASE: u32 = 0x11_0000;

/// An opaque handle to the contents of a cell.
///
/// A symbol is either empty ([`Symbol::NONE`]), a Unicode scalar value,
/// or a synthetic key into an external symbol table that the embedder
/// maintains for base+combining sequences. The screen only ever compares
/// a symbol against `NONE`; everything else is stored and forwarded.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct Symbol(u32);

impl Symbol {
    /// The empty symbol. Cells reset to this.
    pub const NONE: Symbol = Symbol(0);

    /// Wrap a single printable char.
    pub fn from_char(c: char) -> Self {
        match UnicodeWidthChar::width(c) {
            None => panic!("control chars cannot form symbols"),
            Some(0) => panic!("zero width chars cannot form symbols"),
            Some(_) => Symbol(c as u32),
        }
    }

    /// Wrap a raw 32-bit id, including synthetic table keys.
    pub fn from_raw(id: u32) -> Self {
        Symbol(id)
    }

    pub fn as_raw(&self) -> u32 {
        self.0
    }

    pub fn is_none(&self) -> bool {
        self.0 == 0
    }

    /// The scalar value behind this symbol, if it is one. Empty symbols
    /// and synthetic table keys return `None`.
    pub fn as_char(&self) -> Option<char> {
        if self.0 == 0 || self.0 >= SYMBOL_TABLE_BASE {
            return None;
        }
        char::from_u32(self.0)
    }

    /// Display columns this symbol occupies. Synthetic table keys count
    /// as one column; the embedder that minted them knows better and can
    /// write explicit widths through the cell it renders into.
    pub fn width(&self) -> u8 {
        match self.as_char() {
            Some(c) => UnicodeWidthChar::width(c).map_or(1, |w| w.max(1)) as u8,
            None => 1,
        }
    }
}

/// A cell in the screen grid.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Cell {
    ch: Symbol,
    width: u8,
    attr: Attr,
}

// The grid stores size_x * line_num of these plus the whole scrollback,
// so a cell must stay within 16 bytes.
static_assertions::const_assert!(std::mem::size_of::<Cell>() <= 16);

impl Cell {
    pub fn new(ch: Symbol, attr: Attr) -> Self {
        Cell { ch, width: ch.width(), attr }
    }

    /// An empty cell carrying the given attributes.
    pub fn blank(attr: Attr) -> Self {
        Cell { ch: Symbol::NONE, width: 1, attr }
    }

    /// Reset this cell to empty, re-initialising from the given
    /// attributes.
    pub fn init(&mut self, attr: &Attr) {
        self.ch = Symbol::NONE;
        self.width = 1;
        self.attr = *attr;
    }

    pub fn ch(&self) -> Symbol {
        self.ch
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn attr(&self) -> &Attr {
        &self.attr
    }

    pub fn is_empty(&self) -> bool {
        self.ch.is_none()
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.ch.as_char() {
            Some(c) => write!(f, "{}", c),
            None => write!(f, " "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_symbol_round_trips() {
        let sym = Symbol::from_char('x');
        assert_eq!(sym.as_char(), Some('x'));
        assert_eq!(sym.width(), 1);
        assert!(!sym.is_none());
    }

    #[test]
    fn wide_symbol_width() {
        // '螃' occupies two columns.
        let sym = Symbol::from_char('螃');
        assert_eq!(sym.width(), 2);
    }

    #[test]
    fn table_key_is_opaque() {
        let sym = Symbol::from_raw(SYMBOL_TABLE_BASE + 7);
        assert_eq!(sym.as_char(), None);
        assert_eq!(sym.width(), 1);
        assert!(!sym.is_none());
    }

    #[test]
    #[should_panic(expected = "control chars")]
    fn control_char_panics() {
        let _ = Symbol::from_char('\n');
    }

    #[test]
    fn init_resets_contents_and_attr() {
        let mut attr = Attr::default();
        attr.set_bold(true);
        let mut cell = Cell::new(Symbol::from_char('a'), attr);

        let plain = Attr::default();
        cell.init(&plain);
        assert!(cell.is_empty());
        assert_eq!(cell.width(), 1);
        assert!(!cell.attr().bold());
    }
}
