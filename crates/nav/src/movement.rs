//! Cursor arithmetic.
//!
//! All functions take the row lengths as they are *now* and never trust the
//! incoming column: a row may have shrunk or emptied since the cursor was last
//! placed on it.

use marquee_types::{Cursor, Direction};

/// Clamp `col` into a row of `len` items. Empty rows pin the column to 0.
pub fn clamp_col(col: usize, len: usize) -> usize {
    col.min(len.saturating_sub(1))
}

/// Clamp `cursor` into the grid described by `row_lengths`.
pub fn clamp_cursor(cursor: Cursor, row_lengths: &[usize]) -> Cursor {
    if row_lengths.is_empty() {
        return Cursor::default();
    }
    let row = cursor.row.min(row_lengths.len() - 1);
    Cursor::new(row, clamp_col(cursor.col, row_lengths[row]))
}

fn offset_index(index: usize, delta: isize, len: usize) -> usize {
    let max = len.saturating_sub(1) as isize;
    (index as isize + delta).clamp(0, max) as usize
}

/// Compute where `direction` takes `cursor`.
///
/// Vertical moves carry the column over, clamped to the target row's length.
/// Horizontal moves stay within the current row. Moves past an edge leave the
/// (clamped) cursor where it is.
pub fn step(cursor: Cursor, direction: Direction, row_lengths: &[usize]) -> Cursor {
    let current = clamp_cursor(cursor, row_lengths);
    if row_lengths.is_empty() {
        return current;
    }

    if direction.is_vertical() {
        let row = offset_index(current.row, direction.delta(), row_lengths.len());
        if row == current.row {
            return current;
        }
        return Cursor::new(row, clamp_col(current.col, row_lengths[row]));
    }

    let len = row_lengths[current.row];
    if len == 0 {
        return current;
    }
    Cursor::new(current.row, offset_index(current.col, direction.delta(), len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_move_carries_column_when_possible() {
        assert_eq!(step(Cursor::new(0, 2), Direction::Down, &[4, 5]), Cursor::new(1, 2));
        assert_eq!(step(Cursor::new(0, 2), Direction::Down, &[4, 2]), Cursor::new(1, 1));
    }

    #[test]
    fn vertical_move_at_boundary_is_noop() {
        assert_eq!(step(Cursor::new(0, 1), Direction::Up, &[3, 3]), Cursor::new(0, 1));
        assert_eq!(step(Cursor::new(1, 1), Direction::Down, &[3, 3]), Cursor::new(1, 1));
    }

    #[test]
    fn vertical_move_into_empty_row_pins_column_to_zero() {
        assert_eq!(step(Cursor::new(0, 3), Direction::Down, &[5, 0]), Cursor::new(1, 0));
        // Both rows empty: `len - 1` would be negative in signed arithmetic.
        assert_eq!(step(Cursor::new(0, 0), Direction::Down, &[0, 0]), Cursor::new(1, 0));
    }

    #[test]
    fn horizontal_move_clamps_at_row_edges() {
        assert_eq!(step(Cursor::new(2, 0), Direction::Left, &[1, 1, 4]), Cursor::new(2, 0));
        assert_eq!(step(Cursor::new(2, 3), Direction::Right, &[1, 1, 4]), Cursor::new(2, 3));
        assert_eq!(step(Cursor::new(2, 1), Direction::Right, &[1, 1, 4]), Cursor::new(2, 2));
    }

    #[test]
    fn stale_column_is_clamped_before_moving() {
        // Row shrank from 5 items to 2 while the cursor sat on column 4.
        assert_eq!(step(Cursor::new(0, 4), Direction::Left, &[2]), Cursor::new(0, 0));
        // Row emptied entirely.
        assert_eq!(step(Cursor::new(0, 2), Direction::Right, &[0]), Cursor::new(0, 0));
    }

    #[test]
    fn empty_grid_yields_origin() {
        assert_eq!(step(Cursor::new(3, 3), Direction::Down, &[]), Cursor::default());
        assert_eq!(clamp_cursor(Cursor::new(9, 9), &[]), Cursor::default());
    }

    #[test]
    fn clamp_cursor_clamps_both_axes() {
        assert_eq!(clamp_cursor(Cursor::new(7, 7), &[3, 2]), Cursor::new(1, 1));
        assert_eq!(clamp_col(5, 0), 0);
    }
}
