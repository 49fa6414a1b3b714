pub mod error;
pub mod tiny_model;

pub mod prelude {
    pub use crate::error::TinyModelError;
    pub use crate::tiny_model::*;
}

pub mod utils;
