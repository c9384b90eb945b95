pub mod crop_service;
pub mod openweathermap;

pub use crop_service::CropServiceClient;
pub use openweathermap::OpenWeatherMapClient;
