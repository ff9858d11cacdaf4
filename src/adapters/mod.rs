//! Concrete implementations of the ports: the host store bridge, the HTTP
//! backend client, and the subscription caches.

pub mod backend;
pub mod cache;
pub mod store;
