/// 每列固定 5 格
pub const ROW_WIDTH: usize = 5;

/// LED 矩陣最多只能顯示 5 列
pub const MAX_ROWS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    /// 字母在正確位置 (🟩)
    Correct,
    /// 字母存在但位置錯誤 (🟨)
    Present,
    /// 字母不存在 (⬛ / ⬜)
    Absent,
}

pub type Row = [Cell; ROW_WIDTH];

/// 全部答對的列
pub const SOLVED_ROW: Row = [Cell::Correct; ROW_WIDTH];

/// 已驗證的謎題結果：1 到 5 列，最後一列必須全部為 Correct
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Row>,
}

impl Grid {
    /// 只有符合不變量時才會建立 Grid
    pub fn new(rows: Vec<Row>) -> Option<Self> {
        if rows.is_empty() || rows.len() > MAX_ROWS {
            return None;
        }

        if rows.last() != Some(&SOLVED_ROW) {
            return None;
        }

        Some(Self { rows })
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
