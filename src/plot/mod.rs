//! Scatterplot geometry: scales, draw order, and brush selection.

pub mod brush;
pub mod scales;

mod exec;
mod output;

pub use exec::exec;
