//! Command-line interface

pub mod commands;

use crate::{Error, Result, game::Player};

/// Parse a player token from a CLI flag (`x`/`o`, case-insensitive).
pub(crate) fn parse_player(value: &str) -> Result<Player> {
    match value.trim().to_ascii_lowercase().as_str() {
        "x" => Ok(Player::X),
        "o" => Ok(Player::O),
        other => Err(Error::ParsePlayer {
            input: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_player() {
        assert_eq!(parse_player("x").unwrap(), Player::X);
        assert_eq!(parse_player(" O ").unwrap(), Player::O);
        assert!(parse_player("z").is_err());
    }
}
