pub mod alert;
pub mod chat;
pub mod classification;
pub mod crop;
pub mod feedback;
pub mod forecast;
pub mod library;
pub mod reading;

pub use alert::*;
pub use chat::*;
pub use classification::*;
pub use crop::*;
pub use feedback::*;
pub use forecast::*;
pub use library::*;
pub use reading::*;
