//! Text rendering of board snapshots and parsing of typed moves.

use shared::{encode_move, Snapshot, RESIGN};

/// Renders a snapshot as an ASCII grid with 'A'.. row letters and 1..
/// column numbers, matching the coordinates players type back in.
pub fn render_board(snapshot: &Snapshot) -> String {
    let side = snapshot.len();
    let mut out = String::new();

    out.push_str("   ");
    for col in 0..side {
        out.push_str(&format!(" {} ", col + 1));
    }
    out.push('\n');

    for (row, cells) in snapshot.iter().enumerate() {
        out.push_str(&format!(" {} ", (b'A' + row as u8) as char));
        for cell in cells {
            out.push_str(&format!("[{}]", cell.unwrap_or(' ')));
        }
        out.push('\n');
    }
    out
}

/// Parses a typed move: `resign`, or a coordinate like `B3` (row letter,
/// 1-based column). Returns the wire integer, or None on anything else.
pub fn parse_move(input: &str, side: usize) -> Option<i32> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("resign") {
        return Some(RESIGN);
    }

    let mut chars = input.chars();
    let row_letter = chars.next()?.to_ascii_uppercase();
    if !row_letter.is_ascii_uppercase() {
        return None;
    }
    let row = (row_letter as u8 - b'A') as usize;

    let col: usize = chars.as_str().parse().ok()?;
    if col == 0 || col > side || row >= side {
        return None;
    }

    Some(encode_move(row, col - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::BOARD_SIDE;

    #[test]
    fn test_parse_coordinates() {
        assert_eq!(parse_move("A1", BOARD_SIDE), Some(0));
        assert_eq!(parse_move("b3", BOARD_SIDE), Some(12));
        assert_eq!(parse_move(" E5 ", BOARD_SIDE), Some(44));
    }

    #[test]
    fn test_parse_resign() {
        assert_eq!(parse_move("resign", BOARD_SIDE), Some(RESIGN));
        assert_eq!(parse_move("RESIGN", BOARD_SIDE), Some(RESIGN));
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert_eq!(parse_move("A6", BOARD_SIDE), None);
        assert_eq!(parse_move("F1", BOARD_SIDE), None);
        assert_eq!(parse_move("A0", BOARD_SIDE), None);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_move("", BOARD_SIDE), None);
        assert_eq!(parse_move("33", BOARD_SIDE), None);
        assert_eq!(parse_move("AA", BOARD_SIDE), None);
        assert_eq!(parse_move("A", BOARD_SIDE), None);
    }

    #[test]
    fn test_render_empty_board() {
        let snapshot = vec![vec![None; BOARD_SIDE]; BOARD_SIDE];
        let text = render_board(&snapshot);

        assert!(text.contains(" A "));
        assert!(text.contains(" E "));
        assert!(text.contains(" 5 "));
        assert_eq!(text.matches("[ ]").count(), BOARD_SIDE * BOARD_SIDE);
    }

    #[test]
    fn test_render_marked_cell() {
        let mut snapshot = vec![vec![None; BOARD_SIDE]; BOARD_SIDE];
        snapshot[1][2] = Some('X');
        let text = render_board(&snapshot);

        let row_b = text.lines().nth(2).unwrap();
        assert!(row_b.starts_with(" B "));
        assert!(row_b.contains("[X]"));
    }
}
