pub mod calculations;
pub mod models;
pub mod schedules;
pub mod state;

pub use models::*;
