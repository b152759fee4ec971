pub mod locks;
pub mod test_utils;

pub use locks::{KeyedLocks, KeyedGuard};
