/// What happens to sprite pixels that fall past the right or bottom edge of the display.
///
/// Either way the sprite's origin is first reduced modulo the display size, so a sprite drawn
/// at (70, 40) starts at (6, 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgePolicy {
    /// Pixels past an edge reappear on the opposite side
    #[default]
    Wrap,
    /// Pixels past an edge are dropped; they never collide
    Clip,
}

/// # Quirks
/// Behaviors that vary between Chip-8 interpreters and that some ROMs depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Quirks {
    pub sprite_edge: EdgePolicy,
}

/// Engine configuration. Survives `Chip8::reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    pub quirks: Quirks,
    /// Seed for `RND`; seeded from the OS when absent
    pub seed: Option<u64>,
}

impl Config {
    pub fn with_sprite_edge(mut self, sprite_edge: EdgePolicy) -> Self {
        self.quirks.sprite_edge = sprite_edge;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod test_config {
    use super::*;

    #[test]
    fn test_defaults_to_wrapping_and_entropy() {
        let config = Config::default();
        assert_eq!(config.quirks.sprite_edge, EdgePolicy::Wrap);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_builders() {
        let config = Config::default()
            .with_sprite_edge(EdgePolicy::Clip)
            .with_seed(7);
        assert_eq!(config.quirks.sprite_edge, EdgePolicy::Clip);
        assert_eq!(config.seed, Some(7));
    }
}
