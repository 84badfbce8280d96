//! Engine configuration

use match_three_core::types::{
    Color, EngineError, DEFAULT_COLOR_COUNT, DEFAULT_GRID_SIZE, MAX_CASCADE_STEPS,
    MAX_GENERATE_ATTEMPTS, MAX_GRID_SIZE, MIN_COLOR_COUNT, MIN_GRID_SIZE,
};

static PALETTE: [Color; 6] = Color::PALETTE;

/// Tunables for one engine instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Board edge length
    pub grid_size: usize,
    /// Number of palette colors in play, taken from the front of the palette
    pub colors: usize,
    /// Resolving steps allowed per cascade before it is forced to settle
    pub max_cascade_steps: u32,
    /// Redraws the generator may spend looking for a board with a legal move
    pub max_generate_attempts: u32,
    pub seed: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            colors: DEFAULT_COLOR_COUNT,
            max_cascade_steps: MAX_CASCADE_STEPS,
            max_generate_attempts: MAX_GENERATE_ATTEMPTS,
            seed: 1,
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `MATCH3_*` environment variables.
    ///
    /// Unset or unparseable values keep their default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `MATCH3_*` key
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parsed_usize = |key: &str| lookup(key).and_then(|s| s.trim().parse::<usize>().ok());
        let parsed_u32 = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u32>().ok());

        let defaults = Self::default();
        Self {
            grid_size: parsed_usize("MATCH3_GRID_SIZE").unwrap_or(defaults.grid_size),
            colors: parsed_usize("MATCH3_COLORS").unwrap_or(defaults.colors),
            max_cascade_steps: parsed_u32("MATCH3_MAX_CASCADE")
                .unwrap_or(defaults.max_cascade_steps),
            max_generate_attempts: defaults.max_generate_attempts,
            seed: parsed_u32("MATCH3_SEED").unwrap_or(defaults.seed),
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(EngineError::InvalidConfig(format!(
                "grid_size {} outside {MIN_GRID_SIZE}..={MAX_GRID_SIZE}",
                self.grid_size
            )));
        }
        if !(MIN_COLOR_COUNT..=Color::PALETTE.len()).contains(&self.colors) {
            return Err(EngineError::InvalidConfig(format!(
                "colors {} outside {MIN_COLOR_COUNT}..={}",
                self.colors,
                Color::PALETTE.len()
            )));
        }
        Ok(())
    }

    /// Colors in play
    pub fn palette(&self) -> &'static [Color] {
        &PALETTE[..self.colors.clamp(1, PALETTE.len())]
    }
}
