//! Objective functions minimized during training

pub mod softmax;
pub mod traits;

pub use self::softmax::*;
pub use self::traits::*;
