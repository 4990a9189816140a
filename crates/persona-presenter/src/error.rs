use thiserror::Error;

/// Errors surfaced while constructing or configuring a presenter.
#[derive(Error, Debug)]
pub enum PresenterError {
    #[error("invalid presenter configuration: {0}")]
    Config(String),
}

/// Failure reported by a playback handle when asked to start playing.
///
/// The canonical case is the host environment rejecting autoplay. These are
/// logged and tolerated; they never alter the presenter's selection state.
#[derive(Error, Debug)]
pub enum PlaybackError {
    #[error("playback rejected by host policy: {0}")]
    Rejected(String),
}
