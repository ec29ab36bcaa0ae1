pub use console::*;
pub use write_data::*;

pub mod console;
pub mod write_data;
