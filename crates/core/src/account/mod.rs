mod error;
mod traits;

pub use error::{AccountError, Result};
pub use traits::ApiKeyStore;
