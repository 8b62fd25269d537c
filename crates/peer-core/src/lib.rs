pub mod error;
pub mod palette;
pub mod provider;
pub mod types;

pub use error::*;
pub use palette::*;
pub use provider::*;
pub use types::*;
