use serde::{Deserialize, Serialize};

/// Board geometry and pacing configuration
///
/// Dimensions are in pixels and must be positive multiples of `cell_size`.
/// `speed` is an advisory pacing target for the driving loop; the simulation
/// itself never reads it and is equally correct at any stepping rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board width in pixels
    pub width: i32,
    /// Board height in pixels
    pub height: i32,
    /// Grid quantum; every position is a multiple of this
    pub cell_size: i32,
    /// Number of body segments at spawn
    pub initial_snake_length: usize,
    /// Advisory pacing target in ticks per second
    pub speed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 760,
            cell_size: 20,
            initial_snake_length: 3,
            speed: 200,
        }
    }
}

impl GameConfig {
    /// Create a configuration with custom board dimensions
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Small board that fits a terminal, paced for watching
    pub fn compact() -> Self {
        Self {
            speed: 12,
            ..Self::new(480, 360)
        }
    }

    /// Length of the trailing score-history window, sized for the overlay
    /// (two pixels per bar)
    pub fn history_window(&self) -> usize {
        (self.width / 2) as usize
    }

    /// Validate board geometry.
    ///
    /// Checked at engine construction so a board too small for the spawn
    /// snake fails fast instead of mid-episode.
    pub fn validate(&self) -> Result<(), String> {
        if self.cell_size <= 0 {
            return Err(format!("cell_size must be positive, got {}", self.cell_size));
        }
        if self.width <= 0 || self.height <= 0 {
            return Err(format!(
                "board dimensions must be positive, got {}x{}",
                self.width, self.height
            ));
        }
        if self.width % self.cell_size != 0 || self.height % self.cell_size != 0 {
            return Err(format!(
                "board {}x{} is not a multiple of cell_size {}",
                self.width, self.height, self.cell_size
            ));
        }
        let min = 5 * self.cell_size;
        if self.width < min || self.height < min {
            return Err(format!(
                "board {}x{} is smaller than {} cells per axis",
                self.width,
                self.height,
                min / self.cell_size
            ));
        }
        if self.initial_snake_length < 3 {
            return Err(format!(
                "initial_snake_length must be at least 3, got {}",
                self.initial_snake_length
            ));
        }
        // Spawn body extends left from the board center
        let center_col = self.width / self.cell_size / 2;
        if self.initial_snake_length as i32 > center_col + 1 {
            return Err(format!(
                "initial_snake_length {} does not fit left of the board center",
                self.initial_snake_length
            ));
        }
        Ok(())
    }
}
