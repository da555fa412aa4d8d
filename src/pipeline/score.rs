use thiserror::Error;

use super::types::EnrichedMatch;
use crate::config::ScoreParseMode;
use crate::error::{ServeForgeError, SfResult};

const WALKOVER: &str = "W/O";
const SKIPPED_TOKENS: [&str; 2] = ["RET", "DEF"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreParseError {
    #[error("set score '{token}' does not split into two sides")]
    MalformedSet { token: String },

    #[error("set score '{token}' has no leading digit on side '{side}'")]
    MissingDigits { token: String, side: String },

    #[error("set score '{token}' holds a game count too large to total")]
    Overflow { token: String },
}

/// Games won and lost by one participant over a whole match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameTally {
    pub won: u32,
    pub lost: u32,
}

impl GameTally {
    pub fn swapped(self) -> Self {
        Self {
            won: self.lost,
            lost: self.won,
        }
    }
}

/// Sums the games of every set in `score`, seen from the winner's side when
/// `winner` is true and from the loser's side otherwise.
///
/// Walkovers count as no games. Retirement and default markers are skipped.
/// A tiebreak suffix such as `7-6(4)` is ignored.
pub fn parse_score(
    score: &str,
    winner: bool,
    mode: ScoreParseMode,
) -> Result<GameTally, ScoreParseError> {
    if score.contains(WALKOVER) {
        return Ok(GameTally::default());
    }

    let mut tally = GameTally::default();
    for token in score.split(' ') {
        if token.is_empty() || SKIPPED_TOKENS.contains(&token) {
            continue;
        }
        let mut sides = token.split('-');
        let (Some(left), Some(right), None) = (sides.next(), sides.next(), sides.next()) else {
            return Err(ScoreParseError::MalformedSet {
                token: token.to_string(),
            });
        };
        let overflow = || ScoreParseError::Overflow {
            token: token.to_string(),
        };
        tally.won = tally
            .won
            .checked_add(side_games(token, left, mode)?)
            .ok_or_else(overflow)?;
        tally.lost = tally
            .lost
            .checked_add(side_games(token, right, mode)?)
            .ok_or_else(overflow)?;
    }

    Ok(if winner { tally } else { tally.swapped() })
}

fn side_games(token: &str, side: &str, mode: ScoreParseMode) -> Result<u32, ScoreParseError> {
    let digits: &str = match mode {
        ScoreParseMode::Full => {
            let end = side
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(side.len());
            &side[..end]
        }
        ScoreParseMode::LegacyFirstDigit => match side.chars().next() {
            Some(c) if c.is_ascii_digit() => &side[..1],
            _ => "",
        },
    };

    if digits.is_empty() {
        return Err(ScoreParseError::MissingDigits {
            token: token.to_string(),
            side: side.to_string(),
        });
    }
    digits.parse().map_err(|_| ScoreParseError::Overflow {
        token: token.to_string(),
    })
}

/// Attaches each row's game tally. The first unparseable score aborts the
/// whole batch, naming the match it came from.
pub fn attach_game_tallies(
    rows: &[EnrichedMatch],
    mode: ScoreParseMode,
) -> SfResult<Vec<EnrichedMatch>> {
    rows.iter()
        .map(|row| {
            let tally = parse_score(&row.player.score, row.player.won, mode).map_err(|source| {
                ServeForgeError::Score {
                    match_id: row.player.match_id.clone(),
                    source,
                }
            })?;
            let mut enriched = row.clone();
            enriched.games = Some(tally);
            Ok(enriched)
        })
        .collect()
}
