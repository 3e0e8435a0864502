//! Cache infrastructure - result cache implementations

mod in_memory;

pub use in_memory::{InMemoryCacheConfig, InMemoryResultCache};
