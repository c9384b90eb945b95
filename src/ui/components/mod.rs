pub mod gauge;
pub mod input;

pub use gauge::{humidity_gauge, rainfall_gauge, temperature_gauge, wind_gauge};
pub use input::{InputWidget, SelectWidget};
