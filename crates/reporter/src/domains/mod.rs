pub mod forecasts;

pub use forecasts::*;
