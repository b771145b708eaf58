//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient)
//! and the cart store channel. The rest of the application talks to these,
//! never to raw message passing.

pub mod cart_client;
pub mod catalog_client;
pub mod notification_client;
pub mod order_client;

pub use cart_client::*;
pub use catalog_client::*;
pub use notification_client::*;
pub use order_client::*;
