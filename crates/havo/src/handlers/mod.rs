pub mod error;
pub mod health;
pub mod weather;

pub use error::AppError;
