#![forbid(unsafe_code)]

// not concurrent
pub mod non_concurrent;

pub mod logging;

pub use non_concurrent::avl_tree::{AvlTree, EmptyCollection, Iter, ParseKeysError};
