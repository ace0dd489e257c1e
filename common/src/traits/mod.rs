pub mod publisher;
pub mod source;

pub use crate::traits::publisher::Notifiable;
pub use crate::traits::source::{LocationSource, PushSource};
