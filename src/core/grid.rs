//! Detection of shared puzzle results inside free-form message text.

use crate::domain::model::{Cell, Grid, Row, MAX_ROWS, ROW_WIDTH};

/// Map one puzzle glyph to its cell state.
///
/// Both the dark and the light square count as [`Cell::Absent`]; anything
/// else is not a cell.
pub fn classify(glyph: char) -> Option<Cell> {
    match glyph {
        '🟩' => Some(Cell::Correct),
        '🟨' => Some(Cell::Present),
        '⬛' | '⬜' => Some(Cell::Absent),
        _ => None,
    }
}

/// Parse a line as a puzzle row. Length is counted in chars, not bytes.
pub fn parse_row(line: &str) -> Option<Row> {
    let mut row = [Cell::Absent; ROW_WIDTH];
    let mut glyphs = line.chars();

    for slot in row.iter_mut() {
        *slot = classify(glyphs.next()?)?;
    }

    // 多出來的字元代表這不是一列
    if glyphs.next().is_some() {
        return None;
    }

    Some(row)
}

pub fn is_wordle_row(line: &str) -> bool {
    parse_row(line).is_some()
}

/// Find the first contiguous run of puzzle rows in `text`.
///
/// Lines before the first row are skipped. Once a run has started, the first
/// line that is not a row ends the scan for good; a second run later in the
/// message is never considered. The run is then accepted only if it is 1 to 5
/// rows long and ends with the solved row.
pub fn extract_grid(text: &str) -> Option<Grid> {
    let mut rows: Vec<Row> = Vec::new();
    let mut in_grid = false;

    for line in text.lines() {
        match parse_row(line) {
            Some(row) => {
                in_grid = true;
                rows.push(row);
            }
            None if in_grid => break,
            None => {}
        }
    }

    if rows.len() > MAX_ROWS {
        tracing::debug!("Ignoring {}-row grid, the matrix only has {} rows", rows.len(), MAX_ROWS);
    }

    Grid::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::SOLVED_ROW;

    const SOLVED: &str = "🟩🟩🟩🟩🟩";

    #[test]
    fn test_classify_known_glyphs() {
        assert_eq!(classify('🟩'), Some(Cell::Correct));
        assert_eq!(classify('🟨'), Some(Cell::Present));
        assert_eq!(classify('⬛'), Some(Cell::Absent));
        assert_eq!(classify('⬜'), Some(Cell::Absent));
    }

    #[test]
    fn test_classify_rejects_other_glyphs() {
        for glyph in ['G', 'Y', 'B', ' ', '🟥', '🟦', '🟧', '◼', '□', '\u{fe0f}', '\n'] {
            assert_eq!(classify(glyph), None, "{:?} should not classify", glyph);
        }
    }

    #[test]
    fn test_row_requires_exactly_five_glyphs() {
        assert!(is_wordle_row(SOLVED));
        assert!(is_wordle_row("🟨⬛⬜🟩⬛"));
        assert!(!is_wordle_row(""));
        assert!(!is_wordle_row("🟩🟩🟩🟩"));
        assert!(!is_wordle_row("🟩🟩🟩🟩🟩🟩"));
        assert!(!is_wordle_row("🟩🟩🟩🟩🟩 "));
        assert!(!is_wordle_row("🟩🟩x🟩🟩"));
        // 5 bytes but not 5 glyphs
        assert!(!is_wordle_row("abcde"));
    }

    #[test]
    fn test_parse_row_cells_in_order() {
        assert_eq!(
            parse_row("🟨⬛⬜🟩⬛"),
            Some([Cell::Present, Cell::Absent, Cell::Absent, Cell::Correct, Cell::Absent])
        );
    }

    #[test]
    fn test_extract_single_solved_row() {
        let grid = extract_grid(SOLVED).unwrap();
        assert_eq!(grid.rows(), &[SOLVED_ROW]);
    }

    #[test]
    fn test_extract_two_row_grid() {
        let grid = extract_grid("🟨⬛⬛⬛⬛\n🟩🟩🟩🟩🟩").unwrap();
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.rows()[0][0], Cell::Present);
        assert_eq!(grid.rows()[1], SOLVED_ROW);
    }

    #[test]
    fn test_extract_rejects_unsolved_last_row() {
        assert!(extract_grid("🟨⬛⬛⬛⬛\n🟩🟩🟩🟩⬛").is_none());
    }

    #[test]
    fn test_extract_rejects_six_rows() {
        let text = ["🟨⬛⬛⬛⬛", "⬛🟨⬛⬛⬛", "⬛⬛🟨⬛⬛", "⬛⬛⬛🟨⬛", "🟩🟩🟩🟩⬛", SOLVED].join("\n");
        assert!(extract_grid(&text).is_none());
    }

    #[test]
    fn test_extract_skips_text_before_first_row() {
        let grid = extract_grid("not a row\n🟩🟩🟩🟩🟩").unwrap();
        assert_eq!(grid.row_count(), 1);
    }

    #[test]
    fn test_extract_typical_share() {
        let text = "Wordle 245 3/6\n\n⬛🟨⬛⬛⬛\n⬛🟩🟩⬛🟨\n🟩🟩🟩🟩🟩\n\n#wordle";
        let grid = extract_grid(text).unwrap();
        assert_eq!(grid.row_count(), 3);
    }

    #[test]
    fn test_extract_does_not_restart_after_broken_run() {
        // 第一段在非 row 的行結束，之後的完整謎題不會被考慮
        let text = "🟨⬛⬛⬛⬛\nbroken\n🟩🟩🟩🟩🟩";
        assert!(extract_grid(text).is_none());
    }

    #[test]
    fn test_extract_without_rows_is_empty() {
        assert!(extract_grid("").is_none());
        assert!(extract_grid("just playing wordle today").is_none());
        assert!(extract_grid("GGGGG\nYYYYY").is_none());
    }

    #[test]
    fn test_extract_handles_crlf_line_breaks() {
        let grid = extract_grid("Wordle 245 2/6\r\n🟨⬛⬛⬛⬛\r\n🟩🟩🟩🟩🟩\r\n").unwrap();
        assert_eq!(grid.row_count(), 2);
    }
}
