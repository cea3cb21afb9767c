//! Maze analysers producing named scores and display markers.
//!
//! Every scorer expects a maze that went through [`crate::solvers::solve`]: the
//! route is `Walked` and every other reachable cell is a dead end. Scorers may
//! re-mark off-path cells; they never touch walls.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

mod distance;
mod height;
mod junction;
mod only_by_exit;
mod start_end;

pub use distance::{DistanceField, bfs_distances};
pub use height::{DEFAULT_HEIGHT_RANGE, HeightLeveler, level_heights};
pub use junction::JunctionCounter;
pub use only_by_exit::OnlyByExitScorer;
pub use start_end::StartEndScorer;

use crate::{
    error::Result,
    maze::{Mark, Maze},
};

/// Key of the score every scorer reports, used to rank mazes (ascending).
pub const KEY_SCORE: &str = "score";

/// A solved maze together with the seed it was generated from.
#[derive(Debug, Clone)]
pub struct MazeInfo {
    pub maze: Maze,
    pub seed: i64,
    /// Text the seed was derived from.
    pub hash: String,
    /// Number of cells on the entrance-exit route.
    pub path_length: usize,
}

/// A single named score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreValue {
    Int(i64),
    Float(f64),
}

impl ScoreValue {
    pub fn as_f64(&self) -> f64 {
        match *self {
            ScoreValue::Int(value) => value as f64,
            ScoreValue::Float(value) => value,
        }
    }
}

impl From<i64> for ScoreValue {
    fn from(value: i64) -> Self {
        ScoreValue::Int(value)
    }
}

impl From<usize> for ScoreValue {
    fn from(value: usize) -> Self {
        ScoreValue::Int(value as i64)
    }
}

impl From<f64> for ScoreValue {
    fn from(value: f64) -> Self {
        ScoreValue::Float(value)
    }
}

impl fmt::Display for ScoreValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreValue::Int(value) => write!(f, "{}", value),
            ScoreValue::Float(value) => write!(f, "{:4.1}", value),
        }
    }
}

/// Result of one scorer run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreCard {
    pub scores: BTreeMap<String, ScoreValue>,
    /// Display glyph for each mark the scorer assigned.
    pub marker: HashMap<Mark, char>,
}

impl ScoreCard {
    pub fn with(mut self, key: &str, value: impl Into<ScoreValue>) -> Self {
        self.scores.insert(key.to_string(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<ScoreValue> {
        self.scores.get(key).copied()
    }

    /// The ranking score, `0.0` when absent.
    pub fn score(&self) -> f64 {
        self.get(KEY_SCORE).map_or(0.0, |s| s.as_f64())
    }

    /// Scores in report order: the ranking score first, the rest by name
    /// ignoring case.
    pub fn ordered(&self) -> impl Iterator<Item = (&str, ScoreValue)> {
        let first = self.scores.get_key_value(KEY_SCORE);
        let mut rest = self
            .scores
            .iter()
            .filter(|(key, _)| key.as_str() != KEY_SCORE)
            .collect::<Vec<_>>();
        rest.sort_by_cached_key(|(key, _)| key.to_lowercase());
        first
            .into_iter()
            .chain(rest)
            .map(|(key, value)| (key.as_str(), *value))
    }
}

/// Rates a solved maze.
pub trait Scorer {
    /// Short name used for registry lookups.
    fn name(&self) -> &str;

    fn score(&self, info: &mut MazeInfo) -> Result<ScoreCard>;
}

/// Sorts by the ranking score, lowest first. Equal scores keep their order.
pub fn rank_by_score<T>(items: &mut [T], card: impl Fn(&T) -> &ScoreCard) {
    items.sort_by(|a, b| card(a).score().total_cmp(&card(b).score()));
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::generators::{KruskalGenerator, MazeGenerator, MazeParams};
    use crate::solvers::solve;

    /// Generates and solves a Kruskal maze ready for scoring.
    pub(crate) fn solved_info(seed: i64, width: usize, height: usize) -> MazeInfo {
        let mut maze = KruskalGenerator
            .generate(seed, &MazeParams { width, height })
            .unwrap();
        let path_length = solve(&mut maze);
        MazeInfo {
            maze,
            seed,
            hash: seed.to_string(),
            path_length,
        }
    }

    #[test]
    fn test_score_value_display() {
        assert_eq!(ScoreValue::Int(12).to_string(), "12");
        assert_eq!(ScoreValue::Float(3.14159).to_string(), " 3.1");
        assert_eq!(ScoreValue::from(2.0).as_f64(), 2.0);
    }

    #[test]
    fn test_ordered_puts_score_first() {
        let card = ScoreCard::default()
            .with("alpha", 1_i64)
            .with(KEY_SCORE, 9.5)
            .with("Beta", 2_i64)
            .with("gamma", 3_i64);
        let keys = card.ordered().map(|(k, _)| k).collect::<Vec<_>>();
        assert_eq!(keys, vec!["score", "alpha", "Beta", "gamma"]);
        assert_eq!(card.score(), 9.5);
    }

    #[test]
    fn test_rank_by_score() {
        let mut cards = vec![
            ScoreCard::default().with(KEY_SCORE, 3.0),
            ScoreCard::default(),
            ScoreCard::default().with(KEY_SCORE, -1_i64),
        ];
        rank_by_score(&mut cards, |c| c);
        let order = cards.iter().map(|c| c.score()).collect::<Vec<_>>();
        assert_eq!(order, vec![-1.0, 0.0, 3.0]);
    }
}
