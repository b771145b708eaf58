//! Pure data structures implementing the
//! [`ActorEntity`](crate::framework::ActorEntity) trait and the DTOs that
//! travel between clients and actors.

pub mod cart;
pub mod ids;
pub mod notification;
pub mod order;
pub mod principal;
pub mod product;

pub use cart::*;
pub use ids::*;
pub use notification::*;
pub use order::*;
pub use principal::*;
pub use product::*;
