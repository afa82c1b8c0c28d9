//! Core non-UI logic: the link codec, the fetch lifecycle, intent handling
//! and viewport-driven layout decisions.

pub mod fetch;
pub mod intents;
pub mod query_codec;
pub mod viewport;

pub use fetch::{FetchOrchestrator, FetchStatus, Resolution};
pub use intents::{
    Dispatch, IgnoreReason, IntentOutcome, UserIntent, apply_intent, bootstrap, send_dispatch,
};
pub use query_codec::{decode, decode_location, encode, encode_location};
pub use viewport::{Breakpoint, CardOrientation, FilterPlacement, LayoutDecision, layout_for};
