//! Publication flow state machine
//!
//! Tracks the guided three-step publication of a note:
//!
//! ```text
//!    ┌─────────┐  metadata created   ┌─────────┐  upload / skip  ┌─────────┐
//!    │ Details │ ──────────────────► │  Cover  │ ──────────────► │ Content │
//!    └─────────┘                     └─────────┘ ◄────────────── └─────────┘
//!         ▲                                            back           │
//!         └────────────────── finish / reset ──────────────────────────┘
//! ```
//!
//! The machine is an explicit sum type plus a transition function, so the
//! step invariants hold even under programmatic misuse, not just because the
//! UI disables buttons. Transitions into `Cover`/`Content` require a note
//! identifier; re-entering `Details` discards every captured value so a note
//! id is never reused across two submissions.

use std::fmt;

use super::asset::{AssetKind, PickedAsset};
use super::draft::NoteDraft;
use super::errors::PublishError;
use super::newtypes::NoteId;

/// Current step of the guided publication flow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlowStep {
    /// Step 1: collecting note metadata
    #[default]
    Details,
    /// Step 2: optional cover image upload
    Cover,
    /// Step 3: mandatory content file upload
    Content,
}

impl FlowStep {
    /// Returns the step name as a string
    pub fn name(&self) -> &'static str {
        match self {
            FlowStep::Details => "Details",
            FlowStep::Cover => "Cover",
            FlowStep::Content => "Content",
        }
    }
}

impl fmt::Display for FlowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// State of one guided publication session
///
/// Owns the draft, the captured note identifier, the picked assets, the
/// per-step busy flags, and the transient user-facing messages. All mutation
/// goes through methods that preserve the flow invariants.
#[derive(Debug, Clone, Default)]
pub struct PublishFlow {
    step: FlowStep,
    draft: NoteDraft,
    note_id: Option<NoteId>,
    cover: Option<PickedAsset>,
    content: Option<PickedAsset>,
    cover_busy: bool,
    content_busy: bool,
    error: Option<String>,
    info: Option<String>,
}

impl PublishFlow {
    /// Creates a fresh flow at the Details step
    pub fn new() -> Self {
        Self::default()
    }

    // --- Accessors ---

    /// Current step
    pub fn step(&self) -> FlowStep {
        self.step
    }

    /// The draft being edited
    pub fn draft(&self) -> &NoteDraft {
        &self.draft
    }

    /// Note identifier captured from metadata creation, if any
    pub fn note_id(&self) -> Option<&NoteId> {
        self.note_id.as_ref()
    }

    /// The picked asset for the given slot, if any
    pub fn asset(&self, kind: AssetKind) -> Option<&PickedAsset> {
        match kind {
            AssetKind::Cover => self.cover.as_ref(),
            AssetKind::Content => self.content.as_ref(),
        }
    }

    /// Last error message, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Last informational message, if any
    pub fn info(&self) -> Option<&str> {
        self.info.as_deref()
    }

    /// Whether an upload for the given slot is in flight
    pub fn busy(&self, kind: AssetKind) -> bool {
        match kind {
            AssetKind::Cover => self.cover_busy,
            AssetKind::Content => self.content_busy,
        }
    }

    /// Whether any upload is in flight
    pub fn any_busy(&self) -> bool {
        self.cover_busy || self.content_busy
    }

    // --- Draft and asset mutation ---

    /// Mutable access to the draft while it is still editable
    ///
    /// The draft freezes once metadata creation has assigned a note
    /// identifier.
    pub fn draft_mut(&mut self) -> Result<&mut NoteDraft, PublishError> {
        if self.note_id.is_some() {
            return Err(PublishError::Validation(
                "Note details are already submitted and can no longer be edited.".to_string(),
            ));
        }
        Ok(&mut self.draft)
    }

    /// Stages an asset for the given slot, discarding any previous pick
    pub fn pick_asset(&mut self, kind: AssetKind, asset: PickedAsset) {
        match kind {
            AssetKind::Cover => self.cover = Some(asset),
            AssetKind::Content => self.content = Some(asset),
        }
    }

    // --- Messages ---

    /// Sets the error message, clearing any informational message
    ///
    /// The two channels are mutually exclusive so a stale success message is
    /// never shown alongside a new failure.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.info = None;
        self.error = Some(message.into());
    }

    /// Sets the informational message, clearing any error
    pub fn set_info(&mut self, message: impl Into<String>) {
        self.error = None;
        self.info = Some(message.into());
    }

    /// Clears both message channels
    pub fn clear_messages(&mut self) {
        self.error = None;
        self.info = None;
    }

    // --- Busy flags ---

    /// Marks an upload for the given slot as in flight
    ///
    /// At most one upload may be in flight at a time, across both slots.
    pub fn begin_upload(&mut self, kind: AssetKind) -> Result<(), PublishError> {
        if self.any_busy() {
            return Err(PublishError::Validation(
                "An upload is already in progress.".to_string(),
            ));
        }
        match kind {
            AssetKind::Cover => self.cover_busy = true,
            AssetKind::Content => self.content_busy = true,
        }
        Ok(())
    }

    /// Clears the busy flag for the given slot, regardless of outcome
    pub fn finish_upload(&mut self, kind: AssetKind) {
        match kind {
            AssetKind::Cover => self.cover_busy = false,
            AssetKind::Content => self.content_busy = false,
        }
    }

    // --- Transitions ---

    /// Checks whether a transition to the target step is valid
    ///
    /// Valid transitions:
    /// - Details -> Cover (only once a note identifier exists)
    /// - Cover -> Content (upload or skip)
    /// - Content -> Cover (back, to re-attempt the cover)
    /// - any -> Details (reset)
    pub fn can_transition_to(&self, target: FlowStep) -> bool {
        match (self.step, target) {
            (FlowStep::Details, FlowStep::Cover) => self.note_id.is_some(),
            (FlowStep::Cover, FlowStep::Content) => true,
            (FlowStep::Content, FlowStep::Cover) => true,
            (_, FlowStep::Details) => true,
            _ => false,
        }
    }

    /// Attempts to transition to the target step
    ///
    /// Entering `Details` performs the full reset: the note identifier,
    /// draft, picked assets, busy flags, and messages are all discarded.
    ///
    /// # Errors
    ///
    /// Returns `PublishError::Validation` if the transition is not allowed.
    pub fn transition_to(&mut self, target: FlowStep) -> Result<(), PublishError> {
        if !self.can_transition_to(target) {
            return Err(PublishError::Validation(format!(
                "Invalid step transition from {} to {}.",
                self.step, target
            )));
        }

        if target == FlowStep::Details {
            *self = PublishFlow::new();
            return Ok(());
        }

        self.step = target;
        Ok(())
    }

    /// Captures the note identifier from metadata creation and advances to
    /// the Cover step
    ///
    /// # Errors
    ///
    /// Rejected outside the Details step or when an identifier was already
    /// captured; a note id is never attached twice.
    pub fn attach_note_id(&mut self, note_id: NoteId) -> Result<(), PublishError> {
        if self.step != FlowStep::Details {
            return Err(PublishError::Validation(format!(
                "Cannot attach a note ID in the {} step.",
                self.step
            )));
        }
        if self.note_id.is_some() {
            return Err(PublishError::Validation(
                "A note ID is already attached to this flow.".to_string(),
            ));
        }
        self.note_id = Some(note_id);
        self.transition_to(FlowStep::Cover)
    }
}
