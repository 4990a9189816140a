use crate::config::PresenterConfig;
use crate::error::PresenterError;
use crate::playback::PlaybackHandle;

/// One of the two semantic video roles managed by the presenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Idle,
    Talking,
}

impl SlotKind {
    /// The opposite slot.
    pub fn other(self) -> Self {
        match self {
            SlotKind::Idle => SlotKind::Talking,
            SlotKind::Talking => SlotKind::Idle,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SlotKind::Idle => "idle",
            SlotKind::Talking => "talking",
        }
    }
}

/// Speaking-status affordance shown alongside the avatar.
///
/// Carries no state of its own beyond the two speech booleans; the agent
/// takes precedence when both sides are speaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIndicator {
    AgentSpeaking,
    UserSpeaking,
}

#[derive(Debug)]
struct SlotState<P> {
    source: String,
    ready: bool,
    handle: P,
}

/// Speech-driven video selector.
///
/// Renders both slots continuously and keeps exactly one of them visible and
/// playing. Re-evaluates its selection whenever the agent-speaking signal or
/// a slot's readiness changes, and never performs a visible switch to a slot
/// whose media has not buffered; such a request is parked as the pending
/// target and completed once the load notification arrives. Rapid signal
/// flapping coalesces: only the latest desired target is remembered.
#[derive(Debug)]
pub struct AvatarPresenter<P: PlaybackHandle> {
    idle: SlotState<P>,
    talking: SlotState<P>,
    active: SlotKind,
    pending: Option<SlotKind>,
    agent_speaking: bool,
    user_speaking: bool,
}

impl<P: PlaybackHandle> AvatarPresenter<P> {
    /// Creates a presenter with the idle slot active and both slots unbuffered.
    ///
    /// Assigns each handle its configured source and attempts an initial play
    /// on both, tolerating host autoplay rejection.
    ///
    /// # Errors
    ///
    /// Returns `PresenterError::Config` if either clip reference is empty.
    pub fn new(
        config: PresenterConfig,
        mut idle_handle: P,
        mut talking_handle: P,
    ) -> Result<Self, PresenterError> {
        config.validate()?;

        idle_handle.set_source(&config.idle_source);
        talking_handle.set_source(&config.talking_source);

        let mut presenter = Self {
            idle: SlotState {
                source: config.idle_source,
                ready: false,
                handle: idle_handle,
            },
            talking: SlotState {
                source: config.talking_source,
                ready: false,
                handle: talking_handle,
            },
            active: SlotKind::Idle,
            pending: None,
            agent_speaking: false,
            user_speaking: false,
        };

        presenter.try_play(SlotKind::Idle);
        presenter.try_play(SlotKind::Talking);

        Ok(presenter)
    }

    fn slot(&self, kind: SlotKind) -> &SlotState<P> {
        match kind {
            SlotKind::Idle => &self.idle,
            SlotKind::Talking => &self.talking,
        }
    }

    fn slot_mut(&mut self, kind: SlotKind) -> &mut SlotState<P> {
        match kind {
            SlotKind::Idle => &mut self.idle,
            SlotKind::Talking => &mut self.talking,
        }
    }

    /// Issues a play command, logging and swallowing host rejection.
    fn try_play(&mut self, kind: SlotKind) {
        if let Err(e) = self.slot_mut(kind).handle.play() {
            tracing::warn!(
                slot = kind.as_str(),
                error = %e,
                "play rejected by host, selection state unchanged"
            );
        }
    }

    /// Updates the agent-speaking signal and reconciles the selection.
    pub fn set_agent_speaking(&mut self, speaking: bool) {
        if self.agent_speaking == speaking {
            return;
        }
        self.agent_speaking = speaking;
        self.reconcile();
    }

    /// Updates the user-speaking signal.
    ///
    /// Informational only: it feeds the status indicator and never affects
    /// which clip plays.
    pub fn set_user_speaking(&mut self, speaking: bool) {
        self.user_speaking = speaking;
    }

    /// Marks a slot's media as buffered and completes a matching pending switch.
    pub fn slot_loaded(&mut self, kind: SlotKind) {
        self.slot_mut(kind).ready = true;
        tracing::debug!(slot = kind.as_str(), "slot media buffered");

        if self.pending == Some(kind) {
            self.switch_to(kind);
        }
    }

    /// Records a buffering failure for a slot's current source.
    ///
    /// The slot stays unready and any pending switch to it stays parked until
    /// the source changes; there is no automatic retry or fallback.
    pub fn slot_load_failed(&mut self, kind: SlotKind, reason: &str) {
        self.slot_mut(kind).ready = false;
        tracing::warn!(
            slot = kind.as_str(),
            source = %self.slot(kind).source,
            reason,
            "slot media failed to buffer"
        );
    }

    /// Replaces a slot's clip reference, resetting its readiness.
    ///
    /// The other slot is untouched so the currently visible clip keeps
    /// playing uninterrupted even when the active slot's source goes stale.
    pub fn set_source(&mut self, kind: SlotKind, source: &str) {
        let slot = self.slot_mut(kind);
        if slot.source == source {
            return;
        }
        slot.source = source.to_string();
        slot.ready = false;
        slot.handle.set_source(source);

        self.try_play(SlotKind::Idle);
        self.try_play(SlotKind::Talking);
    }

    /// Re-evaluates which slot should be active.
    fn reconcile(&mut self) {
        let desired = if self.agent_speaking {
            SlotKind::Talking
        } else {
            SlotKind::Idle
        };

        if desired == self.active {
            // Already showing the desired clip; drop any stale pending target
            // so a later load notification cannot switch away.
            self.pending = None;
            return;
        }

        if self.slot(desired).ready {
            self.switch_to(desired);
        } else {
            self.pending = Some(desired);
            self.slot_mut(desired).handle.load();
            tracing::debug!(
                slot = desired.as_str(),
                "desired slot not buffered yet, parking switch"
            );
        }
    }

    /// Performs the visible switch: rewind and play the target, pause the other.
    fn switch_to(&mut self, target: SlotKind) {
        self.slot_mut(target).handle.seek_to_start();
        self.try_play(target);
        let other = target.other();
        self.slot_mut(other).handle.pause();
        self.active = target;
        self.pending = None;
        tracing::debug!(slot = target.as_str(), "switched active slot");
    }

    /// The slot currently visible and playing.
    pub fn active(&self) -> SlotKind {
        self.active
    }

    /// The slot the presenter wants to switch to but cannot yet.
    pub fn pending_target(&self) -> Option<SlotKind> {
        self.pending
    }

    /// Whether a slot's media has buffered for its current source.
    pub fn is_ready(&self, kind: SlotKind) -> bool {
        self.slot(kind).ready
    }

    /// A slot's current clip reference.
    pub fn source(&self, kind: SlotKind) -> &str {
        &self.slot(kind).source
    }

    pub fn agent_speaking(&self) -> bool {
        self.agent_speaking
    }

    pub fn user_speaking(&self) -> bool {
        self.user_speaking
    }

    /// Which status affordance to show, if any.
    pub fn status_indicator(&self) -> Option<StatusIndicator> {
        if self.agent_speaking {
            Some(StatusIndicator::AgentSpeaking)
        } else if self.user_speaking {
            Some(StatusIndicator::UserSpeaking)
        } else {
            None
        }
    }

    /// Releases both playback handles, pausing them on the way out.
    pub fn into_handles(mut self) -> (P, P) {
        self.idle.handle.pause();
        self.talking.handle.pause();
        (self.idle.handle, self.talking.handle)
    }
}
