pub use clock::*;
pub use forces::*;
pub use integrator::*;
pub use simulation::*;
pub use statistics::*;

pub mod clock;
pub mod forces;
pub mod integrator;
pub mod simulation;
pub mod statistics;
