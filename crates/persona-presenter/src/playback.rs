use crate::error::PlaybackError;
use crate::presenter::SlotKind;

/// Boundary to the host's media element for one video slot.
///
/// The presenter owns both handles exclusively and drives them with
/// fire-and-forget commands. Only `play` can fail synchronously (the host
/// may reject autoplay); buffering progress and load failures come back
/// asynchronously as [`MediaEvent`]s.
pub trait PlaybackHandle {
    /// Starts (or resumes) playback of the current source.
    fn play(&mut self) -> Result<(), PlaybackError>;

    /// Pauses playback.
    fn pause(&mut self);

    /// Rewinds the playback position to the start of the clip.
    fn seek_to_start(&mut self);

    /// Asks the host to (re-)buffer the current source.
    fn load(&mut self);

    /// Replaces the media source. Invalidates any buffered data.
    fn set_source(&mut self, source: &str);
}

/// Asynchronous notification from a playback handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaEvent {
    /// The slot's media has buffered enough to play without stalling.
    Loaded(SlotKind),
    /// The slot's media failed to buffer for the current source.
    LoadFailed { slot: SlotKind, reason: String },
}
