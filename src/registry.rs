//! Named lookup of the available generators and scorers.

use crate::{
    error::{MazeError, Result},
    generators::{BacktrackerGenerator, KruskalGenerator, MazeGenerator},
    scorers::{HeightLeveler, JunctionCounter, OnlyByExitScorer, Scorer, StartEndScorer},
};

/// Holds boxed generators and scorers in registration order.
///
/// Lookups match case-insensitively on any part of the name, first registered wins.
pub struct Registry {
    generators: Vec<Box<dyn MazeGenerator>>,
    scorers: Vec<Box<dyn Scorer>>,
}

impl Registry {
    pub fn empty() -> Self {
        Self {
            generators: Vec::new(),
            scorers: Vec::new(),
        }
    }

    /// Every built-in algorithm, with the height leveler using `height_range` levels.
    pub fn with_defaults(height_range: u8) -> Result<Self> {
        let mut registry = Registry::empty();
        registry.add_generator(Box::new(KruskalGenerator));
        registry.add_generator(Box::new(BacktrackerGenerator));
        registry.add_scorer(Box::new(StartEndScorer));
        registry.add_scorer(Box::new(JunctionCounter));
        registry.add_scorer(Box::new(OnlyByExitScorer));
        registry.add_scorer(Box::new(HeightLeveler::new(height_range)?));
        Ok(registry)
    }

    pub fn add_generator(&mut self, generator: Box<dyn MazeGenerator>) {
        self.generators.push(generator);
    }

    pub fn add_scorer(&mut self, scorer: Box<dyn Scorer>) {
        self.scorers.push(scorer);
    }

    pub fn generator(&self, name: &str) -> Result<&dyn MazeGenerator> {
        self.generators
            .iter()
            .find(|g| matches_name(g.name(), name))
            .map(|g| g.as_ref())
            .ok_or_else(|| MazeError::UnknownGenerator(name.to_string()))
    }

    /// The scorer matching `name`, or the first registered one when `name` is `None`.
    pub fn scorer(&self, name: Option<&str>) -> Result<&dyn Scorer> {
        let found = match name {
            Some(name) => self.scorers.iter().find(|s| matches_name(s.name(), name)),
            None => self.scorers.first(),
        };
        found
            .map(|s| s.as_ref())
            .ok_or_else(|| MazeError::UnknownScorer(name.unwrap_or_default().to_string()))
    }

    pub fn generator_names(&self) -> impl Iterator<Item = &str> {
        self.generators.iter().map(|g| g.name())
    }

    pub fn scorer_names(&self) -> impl Iterator<Item = &str> {
        self.scorers.iter().map(|s| s.name())
    }
}

fn matches_name(registered: &str, query: &str) -> bool {
    registered.to_lowercase().contains(&query.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_lookup() {
        let registry = Registry::with_defaults(10).unwrap();
        assert_eq!(registry.generator("kruskal").unwrap().name(), "Randomized Kruskal");
        assert_eq!(registry.generator("BACKTRACK").unwrap().name(), "Backtracker");
        assert_eq!(
            registry.generator("prim").err(),
            Some(MazeError::UnknownGenerator("prim".to_string()))
        );
    }

    #[test]
    fn test_scorer_lookup() {
        let registry = Registry::with_defaults(10).unwrap();
        assert_eq!(registry.scorer(None).unwrap().name(), "startend");
        assert_eq!(registry.scorer(Some("Height")).unwrap().name(), "height");
        assert_eq!(registry.scorer(Some("exit")).unwrap().name(), "exit");
        assert!(matches!(
            registry.scorer(Some("fastest")),
            Err(MazeError::UnknownScorer(_))
        ));
        assert!(registry.scorer_names().eq(["startend", "junction", "exit", "height"]));
    }

    #[test]
    fn test_empty_registry() {
        let registry = Registry::empty();
        assert!(matches!(registry.scorer(None), Err(MazeError::UnknownScorer(_))));
        assert_eq!(registry.generator_names().count(), 0);
    }

    #[test]
    fn test_invalid_height_range() {
        assert!(matches!(
            Registry::with_defaults(0),
            Err(MazeError::InvalidParams(_))
        ));
    }
}
