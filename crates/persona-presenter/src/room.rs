//! Speech-signal derivation from real-time room activity.
//!
//! The room client (the external real-time session) owns participant and
//! track state; this module only distills its event stream into the two
//! booleans the presenter consumes. The agent participant is located by
//! identity, and user speech is derived from local microphone activity.

use crate::playback::{MediaEvent, PlaybackHandle};
use crate::presenter::AvatarPresenter;
use tokio::sync::broadcast;

/// Notification delivered by the room client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    ParticipantConnected { identity: String },
    ParticipantDisconnected { identity: String },
    SpeakingChanged { identity: String, speaking: bool },
    LocalMicrophoneChanged { active: bool },
}

/// Distills room events into the presenter's two input booleans.
#[derive(Debug)]
pub struct SpeechSignals {
    agent_identity: String,
    agent_speaking: bool,
    mic_active: bool,
}

impl SpeechSignals {
    /// Creates a derivation filtering speaking changes to the participant
    /// with the given identity.
    pub fn new(agent_identity: impl Into<String>) -> Self {
        Self {
            agent_identity: agent_identity.into(),
            agent_speaking: false,
            mic_active: false,
        }
    }

    /// Folds one room event into the derived signals.
    ///
    /// Returns `true` when either derived boolean changed, i.e. when the
    /// presenter needs to be re-reconciled.
    pub fn apply(&mut self, event: &RoomEvent) -> bool {
        let before = (self.agent_speaking, self.mic_active);

        match event {
            RoomEvent::SpeakingChanged { identity, speaking }
                if *identity == self.agent_identity =>
            {
                self.agent_speaking = *speaking;
            }
            RoomEvent::ParticipantDisconnected { identity }
                if *identity == self.agent_identity =>
            {
                // A departed agent is by definition not speaking.
                self.agent_speaking = false;
            }
            RoomEvent::LocalMicrophoneChanged { active } => {
                self.mic_active = *active;
            }
            _ => {}
        }

        (self.agent_speaking, self.mic_active) != before
    }

    pub fn agent_speaking(&self) -> bool {
        self.agent_speaking
    }

    /// The user counts as speaking while any local microphone track is live.
    pub fn user_speaking(&self) -> bool {
        self.mic_active
    }
}

/// Pumps room and media notifications into the presenter until both
/// channels close.
///
/// This is the single event queue of the presentation: notifications are
/// processed one at a time, so the presenter's state is never mutated
/// concurrently. Dropping the senders ends the pump, which is also the
/// unsubscription — once `drive` returns, no further callback can reach the
/// presenter, and the playback handles are returned to the host for release.
pub async fn drive<P: PlaybackHandle>(
    mut presenter: AvatarPresenter<P>,
    mut signals: SpeechSignals,
    mut room_events: broadcast::Receiver<RoomEvent>,
    mut media_events: broadcast::Receiver<MediaEvent>,
) -> AvatarPresenter<P> {
    let mut room_open = true;
    let mut media_open = true;

    while room_open || media_open {
        tokio::select! {
            event = room_events.recv(), if room_open => match event {
                Ok(event) => {
                    if signals.apply(&event) {
                        presenter.set_user_speaking(signals.user_speaking());
                        presenter.set_agent_speaking(signals.agent_speaking());
                    }
                }
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    // Skipped events are absorbed by resyncing from the
                    // derived state; the signals are level-triggered.
                    tracing::warn!(missed, "room event stream lagged, resyncing");
                    presenter.set_user_speaking(signals.user_speaking());
                    presenter.set_agent_speaking(signals.agent_speaking());
                }
                Err(broadcast::error::RecvError::Closed) => {
                    room_open = false;
                }
            },
            event = media_events.recv(), if media_open => match event {
                Ok(MediaEvent::Loaded(slot)) => presenter.slot_loaded(slot),
                Ok(MediaEvent::LoadFailed { slot, reason }) => {
                    presenter.slot_load_failed(slot, &reason);
                }
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "media event stream lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    media_open = false;
                }
            },
        }
    }

    presenter
}
