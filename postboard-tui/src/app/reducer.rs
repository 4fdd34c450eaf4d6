//! Pure reducer function for UI state transitions
//!
//! `(UiState, UiAction) -> UiState`
//!
//! The reducer has NO side effects. Actions that need a remote call are
//! recorded here (status, submitting flag) and performed by the event loop.

use libpostboard::service::{Event, SubmitOutcome};

use super::actions::UiAction;
use super::state::{Focus, StatusBarState, UiState};
use libpostboard::view::Field;

/// Pure reducer function
///
/// # Purity Guarantees
///
/// - No network requests
/// - No terminal I/O
/// - Deterministic (same inputs -> same output)
pub fn reduce_ui(state: UiState, action: UiAction) -> UiState {
    match action {
        // Raw events are mapped to actions by the keymap before they get here
        UiAction::Key(_) | UiAction::Mouse(_) | UiAction::Tick | UiAction::Resize(_, _) => state,

        UiAction::Quit => UiState {
            should_quit: true,
            ..state
        },

        UiAction::ToggleMouse => UiState {
            mouse_enabled: !state.mouse_enabled,
            ..state
        },

        UiAction::ToggleHelp => UiState {
            help_visible: !state.help_visible,
            ..state
        },

        UiAction::HideHelp => UiState {
            help_visible: false,
            ..state
        },

        UiAction::TogglePicker => {
            let mut picker = state.picker;
            picker.toggle();
            UiState { picker, ..state }
        }

        UiAction::ClosePicker => {
            let mut picker = state.picker;
            picker.close();
            UiState { picker, ..state }
        }

        UiAction::PickerUp => {
            let mut picker = state.picker;
            picker.highlight_prev();
            UiState { picker, ..state }
        }

        UiAction::PickerDown(len) => {
            let mut picker = state.picker;
            picker.highlight_next(len);
            UiState { picker, ..state }
        }

        UiAction::ChooseUser(_) => {
            let mut picker = state.picker;
            picker.close();
            UiState {
                picker,
                post_cursor: 0,
                comment_cursor: 0,
                focus: Focus::Posts,
                form_open_for: None,
                ..state
            }
        }

        UiAction::CycleFocus => {
            let focus = match state.focus {
                Focus::Posts => Focus::Comments,
                Focus::Comments if state.form_open_for.is_some() => Focus::Form,
                Focus::Comments | Focus::Form => Focus::Posts,
            };
            UiState { focus, ..state }
        }

        UiAction::CursorUp => match state.focus {
            Focus::Posts => UiState {
                post_cursor: state.post_cursor.saturating_sub(1),
                ..state
            },
            Focus::Comments => UiState {
                comment_cursor: state.comment_cursor.saturating_sub(1),
                ..state
            },
            Focus::Form => state,
        },

        UiAction::CursorDown(len) => match state.focus {
            Focus::Posts => UiState {
                post_cursor: step_down(state.post_cursor, len),
                ..state
            },
            Focus::Comments => UiState {
                comment_cursor: step_down(state.comment_cursor, len),
                ..state
            },
            Focus::Form => state,
        },

        UiAction::TogglePost(_) => UiState {
            comment_cursor: 0,
            form_open_for: None,
            ..state
        },

        UiAction::DeleteComment(comment_id) => UiState {
            status: StatusBarState {
                message: Some(format!("Deleting comment {comment_id}...")),
            },
            ..state
        },

        UiAction::OpenForm(post_id) => UiState {
            form_open_for: Some(post_id),
            form_field: Field::Name,
            focus: Focus::Form,
            ..state
        },

        UiAction::CloseForm => UiState {
            form_open_for: None,
            focus: Focus::Comments,
            ..state
        },

        UiAction::NextField => {
            let mut form = state.form;
            form.blur(state.form_field);
            UiState {
                form,
                form_field: state.form_field.next(),
                ..state
            }
        }

        UiAction::FormInput(field, value) => {
            let mut form = state.form;
            form.set(field, value);
            UiState { form, ..state }
        }

        UiAction::ClearForm => {
            let mut form = state.form;
            form.reset();
            UiState {
                form,
                form_field: Field::Name,
                ..state
            }
        }

        UiAction::SubmitComment => UiState {
            submitting: true,
            ..state
        },

        UiAction::CommentSubmitted { form, outcome } => {
            let (message, form_field) = match &outcome {
                SubmitOutcome::Created(comment) => {
                    (Some(format!("Comment {} added", comment.id)), Field::Body)
                }
                SubmitOutcome::Invalid => (
                    Some("Fill in the highlighted fields".to_string()),
                    first_invalid(&form).unwrap_or(state.form_field),
                ),
                SubmitOutcome::Failed(_) => (None, state.form_field),
            };
            UiState {
                form,
                form_field,
                submitting: false,
                status: StatusBarState { message },
                ..state
            }
        }

        UiAction::Service(event) => {
            let message = match event {
                Event::RequestStarted { request } => Some(format!("{}...", capitalize(&request.to_string()))),
                Event::RequestFailed { request, .. } => Some(format!("Failed {request}")),
                Event::RequestSucceeded { .. } => None,
                Event::StaleResponseDiscarded { .. } => return state,
            };
            UiState {
                status: StatusBarState { message },
                ..state
            }
        }

        UiAction::SetStatus(message) => UiState {
            status: StatusBarState {
                message: Some(message),
            },
            ..state
        },

        UiAction::ClearStatus => UiState {
            status: StatusBarState { message: None },
            ..state
        },
    }
}

fn step_down(cursor: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (cursor + 1).min(len - 1)
    }
}

fn first_invalid(form: &libpostboard::view::CommentForm) -> Option<Field> {
    Field::ALL.into_iter().find(|field| form.errors.get(*field))
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libpostboard::service::RequestKind;
    use libpostboard::view::CommentForm;
    use libpostboard::Comment;

    #[test]
    fn test_reducer_is_pure() {
        let state = UiState::new();
        let state_clone = state.clone();

        let new_state = reduce_ui(state_clone.clone(), UiAction::SetStatus("Test".to_string()));

        assert!(state_clone.status.message.is_none());
        assert_eq!(new_state.status.message, Some("Test".to_string()));
    }

    #[test]
    fn test_quit_action() {
        let state = reduce_ui(UiState::new(), UiAction::Quit);
        assert!(state.should_quit);
    }

    #[test]
    fn test_choose_user_closes_picker_and_resets_cursor() {
        let mut state = UiState::new();
        state.picker.is_open = true;
        state.post_cursor = 3;

        let state = reduce_ui(state, UiAction::ChooseUser(2));
        assert!(!state.picker.is_open);
        assert_eq!(state.post_cursor, 0);
    }

    #[test]
    fn test_cursor_stays_in_list() {
        let state = reduce_ui(UiState::new(), UiAction::CursorDown(2));
        let state = reduce_ui(state, UiAction::CursorDown(2));
        let state = reduce_ui(state, UiAction::CursorDown(2));
        assert_eq!(state.post_cursor, 1);

        let state = reduce_ui(state, UiAction::CursorUp);
        let state = reduce_ui(state, UiAction::CursorUp);
        assert_eq!(state.post_cursor, 0);
    }

    #[test]
    fn test_next_field_blurs_current() {
        let state = reduce_ui(UiState::new(), UiAction::OpenForm(1));
        let state = reduce_ui(state, UiAction::NextField);

        assert_eq!(state.form_field, Field::Email);
        assert!(state.form.errors.name);
        assert!(!state.form.errors.email);
    }

    #[test]
    fn test_form_input_clears_error() {
        let state = reduce_ui(UiState::new(), UiAction::OpenForm(1));
        let state = reduce_ui(state, UiAction::NextField);
        let state = reduce_ui(state, UiAction::FormInput(Field::Name, "A".to_string()));

        assert_eq!(state.form.name, "A");
        assert!(!state.form.errors.name);
    }

    #[test]
    fn test_submission_created_takes_returned_form() {
        let mut returned = CommentForm::new();
        returned.name = "A".to_string();
        returned.email = "a@a.com".to_string();
        let comment = Comment {
            id: 501,
            post_id: 1,
            name: "A".to_string(),
            email: "a@a.com".to_string(),
            body: "hi".to_string(),
        };

        let state = reduce_ui(UiState::new(), UiAction::SubmitComment);
        assert!(state.submitting);

        let state = reduce_ui(
            state,
            UiAction::CommentSubmitted {
                form: returned.clone(),
                outcome: SubmitOutcome::Created(comment),
            },
        );
        assert!(!state.submitting);
        assert_eq!(state.form, returned);
        assert_eq!(state.form_field, Field::Body);
        assert_eq!(state.status.message.as_deref(), Some("Comment 501 added"));
    }

    #[test]
    fn test_invalid_submission_jumps_to_first_bad_field() {
        let mut form = CommentForm::new();
        form.name = "A".to_string();
        form.validate(Some(1));

        let state = reduce_ui(
            UiState::new(),
            UiAction::CommentSubmitted {
                form,
                outcome: SubmitOutcome::Invalid,
            },
        );
        assert_eq!(state.form_field, Field::Email);
    }

    #[test]
    fn test_service_events_update_status() {
        let state = reduce_ui(
            UiState::new(),
            UiAction::Service(Event::RequestStarted {
                request: RequestKind::LoadComments { post_id: 4 },
            }),
        );
        assert_eq!(
            state.status.message.as_deref(),
            Some("Loading comments of post #4...")
        );

        let state = reduce_ui(
            state,
            UiAction::Service(Event::RequestSucceeded {
                request: RequestKind::LoadComments { post_id: 4 },
            }),
        );
        assert!(state.status.message.is_none());
    }

    #[test]
    fn test_cycle_focus_skips_closed_form() {
        let state = reduce_ui(UiState::new(), UiAction::CycleFocus);
        assert_eq!(state.focus, Focus::Comments);
        let state = reduce_ui(state, UiAction::CycleFocus);
        assert_eq!(state.focus, Focus::Posts);
    }
}
