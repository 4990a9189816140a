//! Avatar presentation for the Persona voice-agent front-end.
//!
//! Owns two pre-loaded looping video slots ("idle" and "talking") and selects
//! which one is visible and playing based on speech-activity signals from a
//! real-time room. The selection logic is a small desired-state reconciler:
//! it never switches to a clip whose media has not finished buffering, parking
//! the request as a pending target instead and completing the switch when the
//! load notification arrives.
//!
//! The crate does no I/O of its own. Media playback goes through the
//! [`PlaybackHandle`] boundary trait implemented by the host, and room
//! activity arrives as [`RoomEvent`]s, typically pumped through
//! [`drive`] from a broadcast channel.

pub mod config;
pub mod error;
pub mod playback;
pub mod presenter;
pub mod room;

pub use config::PresenterConfig;
pub use error::{PlaybackError, PresenterError};
pub use playback::{MediaEvent, PlaybackHandle};
pub use presenter::{AvatarPresenter, SlotKind, StatusIndicator};
pub use room::{drive, RoomEvent, SpeechSignals};
