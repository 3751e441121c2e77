use crate::domain::model::{Cell, Grid, ROW_WIDTH};
use crate::utils::error::Result;
use std::io::Write;

/// 清除矩陣並將游標移回第一顆 LED
pub const CMD_CLEAR: u8 = b'Z';
pub const CMD_CORRECT: u8 = b'G';
pub const CMD_PRESENT: u8 = b'Y';
pub const CMD_ABSENT: u8 = b'B';

pub fn cell_command(cell: Cell) -> u8 {
    match cell {
        Cell::Correct => CMD_CORRECT,
        Cell::Present => CMD_PRESENT,
        Cell::Absent => CMD_ABSENT,
    }
}

/// `Z` followed by one color byte per cell, row by row.
pub fn encode_grid(grid: &Grid) -> Vec<u8> {
    let mut commands = Vec::with_capacity(1 + grid.row_count() * ROW_WIDTH);
    commands.push(CMD_CLEAR);
    commands.extend(grid.rows().iter().flatten().copied().map(cell_command));
    commands
}

/// 整個指令序列一次寫入並 flush，不等待裝置回應
pub fn render_grid<W: Write + ?Sized>(device: &mut W, grid: &Grid) -> Result<()> {
    let commands = encode_grid(grid);
    tracing::debug!("Writing {} command bytes to matrix", commands.len());
    device.write_all(&commands)?;
    device.flush()?;
    Ok(())
}

pub fn clear_matrix<W: Write + ?Sized>(device: &mut W) -> Result<()> {
    device.write_all(&[CMD_CLEAR])?;
    device.flush()?;
    Ok(())
}
