mod resolver;
mod types;

pub use resolver::*;
pub use types::*;
