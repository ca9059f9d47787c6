//! Data loading and dataset implementations
//!
//! This module provides the embedded Iris dataset, an in-memory dataset for
//! split partitions, and the randomized train/test splitter.

pub mod iris;
pub mod memory;
pub mod split;

pub use self::iris::*;
pub use self::memory::*;
pub use self::split::*;
