//! Queries over a built complex.

pub mod adjacency;
