//! Layered navigation state for a music player UI.
//!
//! [`controller::UiManager`] owns the screen stack, the dialog slot, the
//! collection-view stack and the overlay panel command channel, and derives
//! from them whether a back action has anything to do.

pub mod config;
pub mod controller;
pub mod demo;
pub mod logging;
pub mod model;
pub mod reactive;
pub mod view;

#[cfg(test)]
pub mod test_support;
