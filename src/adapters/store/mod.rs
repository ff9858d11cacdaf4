//! Store gateway adapters.

mod bridge;
mod mock;

pub use bridge::{HostBridgeStoreGateway, StoreCommand};
pub use mock::{MockStoreGateway, RecordedStoreCall};
