//! Adapter implementations of the port traits.
//!
//! - `live`: talks to the real tracker over HTTP
//! - `recording`: wraps another adapter and captures its interactions
//! - `replaying`: serves interactions from a cassette

pub mod live;
pub mod recording;
pub mod replaying;
