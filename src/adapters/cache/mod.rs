//! Subscription cache adapters.

mod file;
mod memory;

pub use file::FileSubscriptionCache;
pub use memory::InMemorySubscriptionCache;
