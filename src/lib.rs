//! # Order Desk
//!
//! Order placement and fulfillment core for a multi-vendor storefront:
//! carts, atomic per-vendor order creation, a delivery-lifecycle state
//! machine, payment reconciliation against signed gateway callbacks, and
//! the notification fan-out that ties them together.
//!
//! ## Architecture
//!
//! Every stateful store runs as an actor: its own Tokio task, an in-memory
//! store, requests processed **sequentially** from an mpsc channel. That
//! one decision carries most of the correctness load:
//!
//! - **No lost updates.** A vendor's status change and a gateway payment
//!   event racing on the same order are ordered by the order actor's
//!   channel; every rule is evaluated against current state.
//! - **Atomic checkout.** A cart spanning N vendors becomes N orders plus
//!   N vendor notices inside a single group-create message. The notices
//!   are written first (all-or-nothing in the notification actor), and
//!   the order inserts that follow cannot fail; a rejection anywhere
//!   leaves both stores untouched.
//! - **No locks.** Actors own their state; clients hold cheap cloneable
//!   senders.
//!
//! ## Module Tour
//!
//! ### The Engine ([`framework`])
//! The generic substrate: [`ActorEntity`](framework::ActorEntity) is the
//! contract a resource implements, [`ResourceActor`](framework::ResourceActor)
//! is the message loop, [`ResourceClient`](framework::ResourceClient) the
//! typed sender, [`mock`](framework::mock) the test doubles.
//!
//! ### The Resources ([`catalog_actor`], [`cart_actor`], [`order_actor`], [`notification_actor`])
//! Domain implementations. The order actor is where the fulfillment state
//! machine lives: forward-only status edges, vendor/admin authorization,
//! and the cash-on-delivery rule that marks an order paid in the same
//! mutation that marks it delivered.
//!
//! ### The Interface ([`clients`])
//! Type-safe wrappers the application talks to.
//! [`OrderClient::checkout`](clients::OrderClient::checkout) is the
//! orchestrator: fresh catalog resolution per line (client-supplied prices
//! and vendor claims are never trusted), partition by vendor, one atomic
//! commit.
//!
//! ### The Boundary ([`reconciliation`])
//! Signed gateway callbacks in, payment-status updates out. HMAC-SHA256
//! over the raw payload before any parse; duplicate deliveries are
//! acknowledged, not re-applied.
//!
//! ### The Runtime ([`runtime`])
//! [`OrderSystem`](runtime::OrderSystem) wires everything and shuts it
//! down; [`setup_tracing`](runtime::setup_tracing) initializes logging.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod cart_actor;
pub mod catalog_actor;
pub mod clients;
pub mod framework;
pub mod model;
pub mod notification_actor;
pub mod order_actor;
pub mod reconciliation;
pub mod runtime;
