pub use aligned::*;
pub use initial_conditions::*;
pub use io::*;
pub use system::*;

pub mod aligned;
pub mod initial_conditions;
pub mod io;
pub mod system;
