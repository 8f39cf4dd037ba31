//! Controller layer: console state, user actions, UI events, and reducer-like state transitions.

pub mod actions;
pub mod events;
pub mod orchestration;
pub mod reducer;
pub mod state;
