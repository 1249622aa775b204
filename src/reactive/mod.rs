//! Reactive primitives
//!
//! - `value`: observable holder with `map`, `combine`, `switch_map` and
//!   `computed` derivations
//! - `scope`: cancellable ownership of subscriptions and tasks

mod scope;
mod value;

pub use scope::Scope;
pub use value::{Observable, Reactive, Subscription};
