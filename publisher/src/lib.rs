//! # Crate publisher
//!
//! ## publisher
//!
//! The `publisher` crate provides a mechanism for registering and notifying listeners
//! of new values of type `T`. Push sources use it to fan out every new reading to
//! the streams subscribed to them.
//!
//! ### Example
//!
//! ```
//! use publisher::{Listener, Publishable, Publisher};
//! use std::sync::Arc;
//! use uuid::Uuid;
//!
//! let publisher = Publisher::<f64>::new();
//!
//! // Register a listener
//! let mut listener = Listener::new(|_id: Uuid, value: Arc<f64>| {
//!     println!("Listener received: {}", value);
//! });
//! let listener_id = publisher.register_listener(&mut listener);
//!
//! // Notify all listeners
//! publisher.notify_listeners(Arc::new(9.8));
//!
//! // Unregister the listener
//! publisher.unregister_listener(listener_id);
//! assert!(publisher.is_empty());
//! ```

pub mod listener;
pub mod macros;
pub mod publisher;

pub use listener::Listener;
pub use publisher::{Publishable, Publisher};
