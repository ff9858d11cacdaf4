//! Backend subscription service adapters.

mod http;

pub use http::HttpSubscriptionService;
