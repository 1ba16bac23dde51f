mod recording;
mod replay;
mod simulation;
pub use recording::*;
pub use replay::*;
pub use simulation::*;
