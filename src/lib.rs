pub mod defaults;
pub mod dynamics;
pub mod error;
pub mod initialization;
pub mod output;

pub use error::{NbodyError, Result};
