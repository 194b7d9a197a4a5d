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

mod support;

use anyhow::Result;
use support::{frame, screen, screen_with_sb, write_str};
use vtgrid::Error;

fn letter(y: usize) -> String {
    char::from_u32('a' as u32 + (y % 26) as u32).unwrap().to_string()
}

/// Write one letter per row so rows are distinguishable after moves.
fn fill_rows(s: &mut vtgrid::Screen, rows: usize) {
    for y in 0..rows {
        s.move_to(0, y);
        write_str(s, &letter(y));
    }
}

#[test]
fn zero_dimension_is_rejected_and_harmless() {
    let mut s = screen(10, 4);
    write_str(&mut s, "keep");

    assert_eq!(s.resize(0, 4).unwrap_err(), Error::InvalidArg);
    assert_eq!(s.resize(10, 0).unwrap_err(), Error::InvalidArg);
    assert_eq!(s.get_width(), 10);
    assert_eq!(s.get_height(), 4);
    assert_eq!(frame(&s).row(0), "keep");
}

#[test]
fn shrink_height_spills_into_scrollback() -> Result<()> {
    let mut s = screen_with_sb(80, 24, 100);
    fill_rows(&mut s, 20);
    s.move_to(0, 19);

    s.resize(80, 10)?;

    assert_eq!(s.get_height(), 10);
    assert_eq!(s.sb_depth(), 14, "the top fourteen rows retired");
    assert_eq!(s.sb_line_text(0), "a");
    assert_eq!(s.sb_line_text(13), "n");

    // The last ten rows of the old content stay live.
    assert_eq!(s.row_text(0), "o");
    assert_eq!(s.row_text(5), "t");
    assert_eq!(s.row_text(6), "");

    assert_eq!(s.get_cursor_y(), 5, "cursor follows its row");
    assert_eq!((s.margin_top(), s.margin_bottom()), (0, 9));
    Ok(())
}

#[test]
fn grow_height_restores_from_scrollback() -> Result<()> {
    let mut s = screen_with_sb(80, 24, 100);
    fill_rows(&mut s, 20);
    s.move_to(0, 19);
    let before: Vec<String> = (0..24).map(|y| s.row_text(y)).collect();

    s.resize(80, 10)?;
    s.resize(80, 24)?;

    assert_eq!(s.sb_depth(), 0, "everything migrated back out");
    let after: Vec<String> = (0..24).map(|y| s.row_text(y)).collect();
    assert_eq!(after, before);
    assert_eq!(s.get_cursor_y(), 19);
    Ok(())
}

#[test]
fn grow_without_history_appends_blank_rows() -> Result<()> {
    let mut s = screen(10, 2);
    write_str(&mut s, "ab");

    s.resize(10, 5)?;
    assert_eq!(s.get_height(), 5);
    assert_eq!(s.row_text(0), "ab");
    for y in 1..5 {
        assert_eq!(s.row_text(y), "");
    }
    Ok(())
}

#[test]
fn width_shrink_keeps_cells_but_width_grow_reinitialises() -> Result<()> {
    let mut s = screen(10, 3);
    write_str(&mut s, "abcdefghij");

    s.resize(5, 3)?;
    assert_eq!(s.get_width(), 5);
    assert_eq!(s.row_text(0), "abcde");
    assert_eq!(s.get_cursor_x(), 4, "cursor clamped into the new width");

    // Growing back exposes freshly initialised columns; the old
    // right-hand content does not reappear.
    s.resize(10, 3)?;
    assert_eq!(s.row_text(0), "abcde");
    Ok(())
}

#[test]
fn resize_resets_margins_and_tab_ruler() -> Result<()> {
    let mut s = screen(16, 8);
    s.set_margins(2, 4);
    s.move_to(3, 0);
    s.set_tabstop();

    s.resize(24, 8)?;
    assert_eq!((s.margin_top(), s.margin_bottom()), (0, 7));
    for (x, stop) in s.tab_ruler().iter().enumerate() {
        assert_eq!(*stop, x % 8 == 0, "default ruler after resize, column {x}");
    }
    Ok(())
}

#[test]
fn spare_line_tail_is_retained_for_regrowth() -> Result<()> {
    let mut s = screen(10, 10);
    s.resize(10, 4)?;
    assert_eq!(s.line_num(), 10, "retired handles stay allocated");

    s.resize(10, 8)?;
    assert_eq!(s.line_num(), 10, "regrowth reuses the spare tail");
    assert_eq!(s.get_height(), 8);
    Ok(())
}

#[test]
fn shrink_without_scrollback_drops_the_top() -> Result<()> {
    let mut s = screen(10, 4);
    fill_rows(&mut s, 4);

    s.resize(10, 2)?;
    assert_eq!(s.row_text(0), "c");
    assert_eq!(s.row_text(1), "d");
    assert_eq!(s.sb_depth(), 0);

    // Growing back finds no history; the new rows are blank.
    s.resize(10, 4)?;
    assert_eq!(s.row_text(0), "c");
    assert_eq!(s.row_text(2), "");
    Ok(())
}

#[test]
fn resize_round_trip_loses_nothing() -> Result<()> {
    let mut s = screen_with_sb(12, 8, 64);
    fill_rows(&mut s, 8);

    s.resize(12, 3)?;
    s.resize(12, 11)?;
    s.resize(12, 8)?;

    // Growing to 11 restored all five retired rows and appended blanks;
    // shrinking back to 8 retired the top three again. Every original
    // cell is accounted for between scrollback and the live grid.
    assert_eq!(s.sb_depth(), 3);
    for (i, expected) in ["a", "b", "c"].iter().enumerate() {
        assert_eq!(s.sb_line_text(i), *expected);
    }
    for y in 0..5 {
        assert_eq!(s.row_text(y), letter(y + 3));
    }
    for y in 5..8 {
        assert_eq!(s.row_text(y), "");
    }
    Ok(())
}

#[test]
fn restored_lines_are_widened_to_the_new_grid() -> Result<()> {
    let mut s = screen_with_sb(6, 4, 32);
    fill_rows(&mut s, 4);

    // Retire rows at width 6, then come back taller and wider.
    s.resize(6, 2)?;
    assert_eq!(s.sb_depth(), 2);
    s.resize(12, 4)?;

    assert_eq!(s.sb_depth(), 0);
    assert_eq!(s.row_text(0), "a");
    assert_eq!(s.row_text(3), "d");

    // The restored rows accept writes across the full new width.
    s.move_to(11, 0);
    write_str(&mut s, "!");
    assert_eq!(s.row_text(0), "a          !");
    Ok(())
}

#[test]
fn cursor_is_clamped_on_both_axes() -> Result<()> {
    let mut s = screen(10, 6);
    s.move_to(9, 5);

    s.resize(4, 3)?;
    assert!(s.get_cursor_x() < 4);
    assert!(s.get_cursor_y() < 3);
    Ok(())
}
