use crate::core::render::{CMD_ABSENT, CMD_CLEAR, CMD_CORRECT, CMD_PRESENT};
use crate::domain::model::{Cell, MAX_ROWS, ROW_WIDTH};
use std::io::{self, Write};

const PIXELS: usize = MAX_ROWS * ROW_WIDTH;

/// In-memory 5x5 matrix that speaks the same command protocol as the device.
///
/// Useful for `--dry-run`: every flush logs the current frame.
#[derive(Debug, Clone)]
pub struct SimulatedMatrix {
    pixels: [Option<Cell>; PIXELS],
    cursor: usize,
    frames: usize,
}

impl SimulatedMatrix {
    pub fn new() -> Self {
        Self {
            pixels: [None; PIXELS],
            cursor: 0,
            frames: 0,
        }
    }

    fn apply(&mut self, command: u8) {
        let cell = match command {
            CMD_CLEAR => {
                self.pixels = [None; PIXELS];
                self.cursor = 0;
                return;
            }
            CMD_CORRECT => Cell::Correct,
            CMD_PRESENT => Cell::Present,
            CMD_ABSENT => Cell::Absent,
            other => {
                tracing::debug!("Ignoring unknown matrix command {:#04x}", other);
                return;
            }
        };

        // 超過 25 顆 LED 的資料直接丟掉
        if let Some(pixel) = self.pixels.get_mut(self.cursor) {
            *pixel = Some(cell);
            self.cursor += 1;
        }
    }

    pub fn pixels(&self) -> &[Option<Cell>] {
        &self.pixels
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Current frame as emoji rows; unlit pixels are blank spaces.
    pub fn to_emoji(&self) -> String {
        self.pixels
            .chunks(ROW_WIDTH)
            .map(|row| {
                row.iter()
                    .map(|pixel| match pixel {
                        Some(Cell::Correct) => "🟩",
                        Some(Cell::Present) => "🟨",
                        Some(Cell::Absent) => "⬛",
                        None => "  ",
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for SimulatedMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for SimulatedMatrix {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for &command in buf {
            self.apply(command);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.frames += 1;
        tracing::info!("🖥️  Simulated matrix frame #{}:\n{}", self.frames, self.to_emoji());
        Ok(())
    }
}
