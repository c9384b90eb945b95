pub mod advisory;
pub mod engine;
pub mod severity;
pub mod weather_status;

pub use advisory::{AdvisoryInput, ADVISORY_TABLE};
pub use engine::{Rule, RuleTable};
pub use severity::PEST_SEVERITY_TABLE;
pub use weather_status::{WeatherInput, WEATHER_STATUS_TABLE};
