mod domains;
mod error;
mod utils;

pub use domains::*;
pub use error::*;
pub use utils::*;
