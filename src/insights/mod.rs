//! Derived insights (the "AI assistant" panel).
//!
//! Insights are recomputed from project metrics on every render and never
//! stored. Detectors are plain functions over the project list; the engine
//! picks the ones registered for a scope and de-duplicates their output.

pub mod detectors;
pub mod engine;

pub use engine::{default_engine, InsightContext, InsightEngine, InsightScope};
