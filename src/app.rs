use std::{
    collections::HashSet,
    fs,
    io::{self, Write},
    path::Path,
    time::Instant,
};

use rand::Rng;

use crate::{
    config::{RunConfig, Seed},
    error::Result,
    generators::{MazeParams, get_rng},
    maze::{Mark, painter},
    registry::Registry,
    scorers::{MazeInfo, ScoreCard, rank_by_score},
    solvers::solve,
};

/// One generated, solved and scored maze.
#[derive(Debug, Clone)]
pub struct MazeReport {
    /// `id-NNN`, numbered by rank.
    pub name: String,
    pub info: MazeInfo,
    pub card: ScoreCard,
}

impl MazeReport {
    /// The maze view, the seed text and the scores, one per line.
    pub fn to_text(&self) -> String {
        let view = painter::to_text(&self.info.maze, Mark::WAY, &self.card.marker);
        self.with_summary(view)
    }

    /// Like [`MazeReport::to_text`] with the maze view coloured for a terminal.
    pub fn to_colored_text(&self) -> String {
        let view = painter::to_colored_text(&self.info.maze, Mark::WAY, &self.card.marker);
        self.with_summary(view)
    }

    fn with_summary(&self, view: String) -> String {
        let scores = self
            .card
            .ordered()
            .map(|(key, value)| format!(", {}: {}", key, value))
            .collect::<String>();
        format!("{}\n{}\n{}{}", view, self.info.hash, self.name, scores)
    }
}

/// Runs the generate, solve, score pipeline over a batch of seeds.
pub struct App {
    registry: Registry,
}

impl App {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// App with every built-in algorithm.
    pub fn from_config(config: &RunConfig) -> Result<Self> {
        Ok(App::new(Registry::with_defaults(config.level_height)?))
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The seeds of a batch: the configured one for a single maze, otherwise
    /// `count` seeds drawn from a generator seeded with it.
    pub fn seeds(config: &RunConfig) -> Vec<Seed> {
        if config.count <= 1 {
            return vec![config.seed.clone()];
        }
        let mut rng = get_rng(config.seed.value);
        let seeds = (0..config.count).map(|_| Seed::from(rng.random::<i64>()));
        dedup_seeds(seeds)
    }

    /// Generates, solves and scores one maze per configured seed and ranks them.
    pub fn run(&self, config: &RunConfig) -> Result<Vec<MazeReport>> {
        self.run_seeds(config, App::seeds(config))
    }

    /// Like [`App::run`] with an explicit list of seeds.
    pub fn run_seeds(&self, config: &RunConfig, seeds: Vec<Seed>) -> Result<Vec<MazeReport>> {
        config.validate()?;
        let generator = self.registry.generator(&config.generator)?;
        let scorer = self.registry.scorer(config.scorer.as_deref())?;
        let params = config.params();
        tracing::info!(
            "[app] {} {}x{} mazes with {}, scored by {}",
            seeds.len(),
            params.width,
            params.height,
            generator.name(),
            scorer.name()
        );

        let mut reports = Vec::with_capacity(seeds.len());
        for seed in seeds {
            let mut maze = generator.generate(seed.value, &params)?;
            let path_length = solve(&mut maze);
            let mut info = MazeInfo {
                maze,
                seed: seed.value,
                hash: seed.hash,
                path_length,
            };
            let card = scorer.score(&mut info)?;
            tracing::debug!("[app] seed {} scored {:.1}", info.seed, card.score());
            reports.push(MazeReport {
                name: String::new(),
                info,
                card,
            });
        }

        rank_by_score(&mut reports, |r| &r.card);
        for (rank, report) in reports.iter_mut().enumerate() {
            report.name = format!("id-{:03}", rank + 1);
            report.info.maze.set_name(report.name.clone());
        }
        Ok(reports)
    }

    /// Runs the hashes read from a hashes file, or the configured seeds when
    /// there are none.
    pub fn batch(&self, config: &RunConfig, known: Option<Vec<Seed>>) -> Result<Vec<MazeReport>> {
        match known {
            Some(seeds) => {
                tracing::info!("[app] replaying {} known hashes", seeds.len());
                self.run_seeds(config, seeds)
            }
            None => {
                tracing::info!("[app] used seed is {}", config.seed.value);
                self.run(config)
            }
        }
    }

    /// Generates, solves and scores the same maze size `iterations` times.
    pub fn profile(&self, params: &MazeParams, iterations: usize) -> Result<()> {
        let config = RunConfig {
            width: params.width,
            height: params.height,
            seed: Seed::from(0),
            count: 1,
            ..Default::default()
        };
        let start = Instant::now();
        for iteration in 0..iterations {
            let seeds = vec![Seed::from(iteration as i64)];
            self.run_seeds(&config, seeds)?;
        }
        tracing::info!(
            "[profile] {} runs of {}x{} in {:?}",
            iterations,
            params.width,
            params.height,
            start.elapsed()
        );
        Ok(())
    }
}

/// Keeps the first occurrence of every seed value.
fn dedup_seeds(seeds: impl IntoIterator<Item = Seed>) -> Vec<Seed> {
    let mut seen = HashSet::new();
    seeds
        .into_iter()
        .filter(|seed| seen.insert(seed.value))
        .collect()
}

/// Reads a hashes file, one seed text per line. `None` if the file does not exist.
pub fn read_hashes(path: &Path) -> io::Result<Option<Vec<Seed>>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let seeds = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Seed::parse);
    Ok(Some(dedup_seeds(seeds)))
}

/// Writes the hash of every report, in report order.
pub fn store_hashes(path: &Path, reports: &[MazeReport]) -> io::Result<()> {
    let mut out = io::BufWriter::new(fs::File::create(path)?);
    for report in reports {
        writeln!(out, "{}", report.info.hash)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(seed: i64, count: usize) -> RunConfig {
        RunConfig {
            width: 6,
            height: 5,
            seed: Seed::from(seed),
            count,
            ..Default::default()
        }
    }

    #[test]
    fn test_single_maze_keeps_seed_text() {
        let config = RunConfig {
            seed: Seed::parse("labyrinth"),
            ..config(0, 1)
        };
        let app = App::from_config(&config).unwrap();
        let reports = app.run(&config).unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].info.hash, "labyrinth");
        assert_eq!(reports[0].info.seed, Seed::parse("labyrinth").value);
        assert_eq!(reports[0].name, "id-001");
        assert_eq!(reports[0].info.maze.name(), "id-001");
    }

    #[test]
    fn test_batch_is_ranked() {
        let config = config(42, 5);
        let app = App::from_config(&config).unwrap();
        let reports = app.run(&config).unwrap();
        assert_eq!(reports.len(), 5);
        let scores = reports.iter().map(|r| r.card.score()).collect::<Vec<_>>();
        assert!(scores.windows(2).all(|w| w[0] <= w[1]));
        let names = reports.iter().map(|r| r.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["id-001", "id-002", "id-003", "id-004", "id-005"]);
        for report in &reports {
            assert_eq!(report.info.hash, report.info.seed.to_string());
        }
    }

    #[test]
    fn test_batch_is_deterministic() {
        let config = config(7, 3);
        let app = App::from_config(&config).unwrap();
        let first = app.run(&config).unwrap();
        let second = app.run(&config).unwrap();
        let texts = |reports: &[MazeReport]| reports.iter().map(|r| r.to_text()).collect::<Vec<_>>();
        assert_eq!(texts(&first), texts(&second));
    }

    #[test]
    fn test_report_text() {
        let config = RunConfig {
            width: 2,
            height: 1,
            scorer: Some("exit".to_string()),
            ..config(3, 1)
        };
        let app = App::from_config(&config).unwrap();
        let reports = app.run(&config).unwrap();
        let text = reports[0].to_text();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[3], "3");
        // Both cells are on the path: nothing behind the exit
        assert_eq!(lines[4], "id-001, score:  0.4, endcount: 0, length: 2");
    }

    #[test]
    fn test_colored_report_keeps_summary() {
        let config = config(5, 1);
        let app = App::from_config(&config).unwrap();
        let report = &app.run(&config).unwrap()[0];
        let plain = report.to_text();
        let colored = report.to_colored_text();
        assert_eq!(plain.lines().count(), colored.lines().count());
        // Hash and score lines are never coloured
        let tail = |text: &str| text.lines().rev().take(2).map(str::to_string).collect::<Vec<_>>();
        assert_eq!(tail(&plain), tail(&colored));
    }

    #[test]
    fn test_unknown_names_fail() {
        let app = App::from_config(&config(1, 1)).unwrap();
        let bad_generator = RunConfig {
            generator: "prim".to_string(),
            ..config(1, 1)
        };
        assert!(app.run(&bad_generator).is_err());
        let bad_scorer = RunConfig {
            scorer: Some("nope".to_string()),
            ..config(1, 1)
        };
        assert!(app.run(&bad_scorer).is_err());
    }

    #[test]
    fn test_hashes_file_roundtrip() {
        let path = std::env::temp_dir().join(format!("mazescore-hashes-{}", std::process::id()));
        let _ = fs::remove_file(&path);
        assert!(read_hashes(&path).unwrap().is_none());

        let config = config(11, 3);
        let app = App::from_config(&config).unwrap();
        let reports = app.run(&config).unwrap();
        store_hashes(&path, &reports).unwrap();

        let seeds = read_hashes(&path).unwrap().unwrap();
        let _ = fs::remove_file(&path);
        let hashes = seeds.iter().map(|s| s.hash.as_str()).collect::<Vec<_>>();
        let expected = reports.iter().map(|r| r.info.hash.as_str()).collect::<Vec<_>>();
        assert_eq!(hashes, expected);

        let replayed = app.run_seeds(&config, seeds).unwrap();
        assert_eq!(replayed[0].to_text(), reports[0].to_text());
    }

    #[derive(Clone, Default)]
    struct LogBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    /// Runs `f` with a subscriber writing into the returned buffer.
    fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        (result, buffer.text())
    }

    #[test]
    fn test_batch_replays_known_hashes() {
        let config = config(99, 4);
        let app = App::from_config(&config).unwrap();
        let known = vec![Seed::parse("12"), Seed::parse("maze")];
        let (reports, logs) = capture_logs(|| app.batch(&config, Some(known)).unwrap());

        // The configured seed and count play no part in a replay
        assert_eq!(reports.len(), 2);
        let mut hashes = reports.iter().map(|r| r.info.hash.as_str()).collect::<Vec<_>>();
        hashes.sort();
        assert_eq!(hashes, vec!["12", "maze"]);
        assert!(logs.contains("replaying 2 known hashes"));
        assert!(!logs.contains("used seed"));
    }

    #[test]
    fn test_batch_without_known_hashes_logs_seed() {
        let config = config(99, 2);
        let app = App::from_config(&config).unwrap();
        let (reports, logs) = capture_logs(|| app.batch(&config, None).unwrap());
        assert_eq!(reports.len(), 2);
        assert!(logs.contains("used seed is 99"));
    }

    #[test]
    fn test_dedup_seeds() {
        let seeds = dedup_seeds(["5", "x", "5", "6"].map(Seed::parse));
        let values = seeds.iter().map(|s| s.hash.as_str()).collect::<Vec<_>>();
        assert_eq!(values, vec!["5", "x", "6"]);
    }
}
