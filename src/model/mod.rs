//! Client-facing aggregates and write inputs for roasteries and beans.

pub mod bean;
pub mod roastery;

pub use bean::*;
pub use roastery::*;
