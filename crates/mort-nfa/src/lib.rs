pub mod alphabet;
mod frontier;
mod graph;
mod simulate;
mod stream;

#[cfg(test)]
mod fa_tests;

pub use alphabet::ByteClass;
pub use frontier::StateList;
pub use graph::{Assertion, Context, Edge, Graph, State, StateIdx, Transition};
pub use simulate::{simulate, Simulation};
pub use stream::{ByteStream, PositionedReader};

// re-exported so callers can spell repetition bounds without depending on mort-util
pub use mort_util::RangeUInt;
