pub mod error;
pub mod information;
pub mod model;
pub mod parser;

pub use error::{IniqError, Result};
pub use information::Information;
pub use model::{Category, Setting};
pub use parser::Parser;
