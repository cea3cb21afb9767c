pub mod app;
pub mod config;
pub mod error;
pub mod generators;
pub mod maze;
pub mod registry;
pub mod scorers;
pub mod solvers;
