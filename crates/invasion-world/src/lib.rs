//! World simulation engine.
//!
//! This module implements the city graph aliens roam, the invasion loop,
//! and the text format worlds are stored in.

pub mod graph;
pub mod simulation;
pub mod codec;

pub use graph::{City, WorldGraph};
pub use simulation::{Outcome, SimState, SimulationReport, Simulator};
