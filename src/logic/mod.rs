pub mod advisor;
pub mod calculations;
pub mod chatbot;
pub mod data_sync;
pub mod detection;
pub mod rules;
pub mod search;

pub use advisor::ConditionsAdvisor;
pub use data_sync::{ConditionsService, ConnectionStatus};
