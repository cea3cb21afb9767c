use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    error::{MazeError, Result},
    generators::MazeParams,
    scorers::DEFAULT_HEIGHT_RANGE,
};

/// A generator seed and the text it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    pub value: i64,
    pub hash: String,
}

impl Seed {
    /// Numeric text is used as is, anything else is hashed.
    pub fn parse(text: &str) -> Self {
        let value = text.parse::<i64>().unwrap_or_else(|_| string_hash(text));
        Seed {
            value,
            hash: text.to_string(),
        }
    }

    /// Seed from the current time in milliseconds.
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_millis() as i64);
        Seed {
            value: millis,
            hash: millis.to_string(),
        }
    }
}

impl From<i64> for Seed {
    fn from(value: i64) -> Self {
        Seed {
            value,
            hash: value.to_string(),
        }
    }
}

/// `h = 31 * h + c` over the UTF-16 code units, wrapping at 32 bits.
fn string_hash(text: &str) -> i64 {
    text.encode_utf16()
        .fold(0_i32, |h, c| h.wrapping_mul(31).wrapping_add(c as i32)) as i64
}

/// Everything a batch run needs.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub width: usize,
    pub height: usize,
    pub seed: Seed,
    /// Number of mazes to generate from `seed`.
    pub count: usize,
    pub generator: String,
    /// `None` picks the first registered scorer.
    pub scorer: Option<String>,
    /// Number of levels for the height scorer.
    pub level_height: u8,
    /// Hashes to replay if the file exists, or where to store them otherwise.
    pub hashes_file: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        let params = MazeParams::default();
        Self {
            width: params.width,
            height: params.height,
            seed: Seed::now(),
            count: 1,
            generator: "kruskal".to_string(),
            scorer: None,
            level_height: DEFAULT_HEIGHT_RANGE,
            hashes_file: None,
        }
    }
}

impl RunConfig {
    pub fn params(&self) -> MazeParams {
        MazeParams {
            width: self.width,
            height: self.height,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MazeError::InvalidParams(format!(
                "maze size must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if self.count == 0 {
            return Err(MazeError::InvalidParams(
                "at least one maze must be generated".to_string(),
            ));
        }
        Ok(())
    }
}
