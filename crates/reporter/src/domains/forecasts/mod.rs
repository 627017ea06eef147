pub mod conditions;
pub mod current_reading;
pub mod time_layout;
pub mod time_map;
pub mod xml_forecast;

pub use conditions::*;
pub use current_reading::*;
pub use time_layout::*;
pub use time_map::*;
pub use xml_forecast::*;
