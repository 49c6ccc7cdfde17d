//! Population management and the steady-state evolutionary loop.
//!
//! A [`World`] owns a fixed-size population of programs and evolves it toward
//! the objective of a caller-supplied [`Evaluator`].

pub mod selection;
pub mod world;
pub mod trial;

pub use selection::{rank_tournament, sample_tournament};
pub use world::{Evaluator, World, WorldBuilder};
pub use trial::{compare_configurations, Budget, TrialOutcome};
