//! Tunable settings shared by the minimax engine and the deferred search.

use std::time::Duration;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// The side the engine plays; scores are reported from its point of view.
    pub color: Color,
    pub depth: u8,
    /// Pause before a deferred search starts.
    pub think_delay: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            color: Color::Dark,
            depth: 3,
            think_delay: Duration::from_millis(100),
        }
    }
}

impl EngineConfig {
    /// Apply one `name`/`value` option. Names are case-insensitive; unknown
    /// names are ignored.
    pub fn set_option(&mut self, name: &str, value: &str) -> ChessResult<()> {
        let invalid = || ChessError::InvalidOption {
            name: name.to_owned(),
            value: value.to_owned(),
        };

        if name.eq_ignore_ascii_case("Depth") {
            self.depth = value.trim().parse::<u8>().map_err(|_| invalid())?;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("Color") {
            self.color = parse_color(value).ok_or_else(invalid)?;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("ThinkDelay") {
            let millis = value.trim().parse::<u64>().map_err(|_| invalid())?;
            self.think_delay = Duration::from_millis(millis);
            return Ok(());
        }
        Ok(())
    }
}

/// `w`/`white`/`light` or `b`/`black`/`dark`, any case.
pub fn parse_color(value: &str) -> Option<Color> {
    match value.trim().to_ascii_lowercase().as_str() {
        "w" | "white" | "light" => Some(Color::Light),
        "b" | "black" | "dark" => Some(Color::Dark),
        _ => None,
    }
}
