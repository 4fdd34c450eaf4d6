//! Actions for the reducer pattern
//!
//! All view-local state transitions are triggered by actions. Some actions
//! also carry a side effect (a remote call) that the event loop performs
//! after reducing; those are marked below.

use crossterm::event::{KeyEvent, MouseEvent};
use libpostboard::service::{Event, SubmitOutcome};
use libpostboard::view::{CommentForm, Field};

/// Actions that trigger UI state transitions
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    // === UI Events ===
    /// Keyboard input not consumed by a text field
    Key(KeyEvent),

    /// Mouse input (when enabled)
    Mouse(MouseEvent),

    /// Periodic tick
    Tick,

    /// Terminal resize event
    Resize(u16, u16),

    // === Global ===
    Quit,

    /// Toggle mouse capture on/off
    ToggleMouse,

    ToggleHelp,

    HideHelp,

    // === User picker ===
    TogglePicker,

    /// Outside click or Esc
    ClosePicker,

    PickerUp,

    /// Move the highlight down in a list of the given length
    PickerDown(usize),

    /// Commit a different user. Side effect: select the user.
    ChooseUser(u64),

    // === Lists ===
    CycleFocus,

    CursorUp,

    /// Move the cursor down in a list of the given length
    CursorDown(usize),

    /// Open/Close button of a post row. Side effect: toggle the post.
    TogglePost(u64),

    /// Side effect: delete the comment.
    DeleteComment(u64),

    // === Comment form ===
    /// Show the form for the given post
    OpenForm(u64),

    CloseForm,

    /// Move to the next field, leaving (blurring) the current one
    NextField,

    /// Text of a field changed
    FormInput(Field, String),

    /// "Clear" button
    ClearForm,

    /// Side effect: submit the form.
    SubmitComment,

    /// The service finished a submission and hands the form back
    CommentSubmitted {
        form: CommentForm,
        outcome: SubmitOutcome,
    },

    // === Service ===
    /// Request lifecycle event from the service layer
    Service(Event),

    // === Status Bar ===
    SetStatus(String),

    ClearStatus,
}
