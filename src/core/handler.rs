use crate::core::grid::extract_grid;
use crate::core::render::render_grid;
use crate::domain::model::Grid;
use crate::utils::error::Result;
use std::io::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 訊息裡沒有完整的 Wordle
    Ignored,
    Rendered(Grid),
}

impl Outcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Outcome::Rendered(_))
    }
}

/// Owns the open matrix connection and renders every grid found in incoming
/// messages to it.
pub struct WordleHandler<D: Write> {
    device: D,
}

impl<D: Write> WordleHandler<D> {
    pub fn new(device: D) -> Self {
        Self { device }
    }

    /// Extract a grid from `text` and draw it. Messages without a grid are
    /// dropped without touching the device; only a failed device write is an
    /// error.
    pub fn process(&mut self, text: &str) -> Result<Outcome> {
        let Some(grid) = extract_grid(text) else {
            return Ok(Outcome::Ignored);
        };

        tracing::info!("🟩 Found {}-row Wordle:\n{}", grid.row_count(), text);
        render_grid(&mut self.device, &grid)?;

        Ok(Outcome::Rendered(grid))
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn into_device(self) -> D {
        self.device
    }
}
