pub mod builder;
pub mod domain;
pub mod error;
pub mod policy;
pub mod state;
pub mod views;

pub use policy::{allowed_transitions, can_transition};
