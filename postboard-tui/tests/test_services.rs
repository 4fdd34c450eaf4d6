//! Test the service bridge between the event loop and the async layer
//!
//! Commands are spawned on the handle's runtime; these tests poll the
//! store snapshot and the reply channel the same way the event loop does.

use std::sync::Arc;
use std::time::{Duration, Instant};

use libpostboard::gateway::mock::MockGateway;
use libpostboard::service::{Event, RequestKind, SubmitOutcome};
use libpostboard::view::{CommentForm, Field};
use libpostboard::{AppState, PostboardService, RacePolicy};
use postboard_tui::services::{ServiceHandle, ServiceReply};

fn handle() -> ServiceHandle {
    let service =
        PostboardService::with_gateway(Arc::new(MockGateway::seeded()), RacePolicy::default());
    ServiceHandle::new(service).unwrap()
}

/// Poll the store until `done` holds or two seconds pass
fn wait_for(services: &ServiceHandle, done: impl Fn(&AppState) -> bool) -> AppState {
    let deadline = Instant::now() + Duration::from_secs(2);
    loop {
        let state = services.state();
        if done(&state) || Instant::now() > deadline {
            return state;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
}

/// Next reply that is not a redraw signal
fn next_reply(services: &ServiceHandle) -> ServiceReply {
    let deadline = Instant::now() + Duration::from_secs(2);
    loop {
        let reply = services
            .replies()
            .recv_timeout(deadline.saturating_duration_since(Instant::now()))
            .unwrap();
        if reply != ServiceReply::StoreChanged {
            return reply;
        }
    }
}

#[test]
fn test_load_users_fills_store() {
    let services = handle();

    services.load_users();
    let state = wait_for(&services, |s| !s.users.is_empty() && !s.is_loading);

    assert_eq!(state.users.len(), 3);
}

#[test]
fn test_load_users_emits_request_events() {
    let services = handle();

    services.load_users();
    let first = next_reply(&services);

    assert_eq!(
        first,
        ServiceReply::Event(Event::RequestStarted {
            request: RequestKind::LoadUsers
        })
    );
}

#[test]
fn test_select_user_then_toggle_post() {
    let services = handle();

    services.select_user(1);
    let state = wait_for(&services, |s| s.posts.len() == 2 && !s.is_loading);
    assert_eq!(state.selected_user_id, Some(1));

    services.toggle_post(1);
    let state = wait_for(&services, |s| s.comments.len() == 2 && !s.is_loading);
    assert_eq!(state.selected_post_id, Some(1));

    services.toggle_post(1);
    let state = wait_for(&services, |s| s.selected_post_id.is_none());
    assert!(state.post.is_none());
}

#[test]
fn test_submit_comment_replies_with_outcome() {
    let services = handle();
    services.select_user(1);
    wait_for(&services, |s| s.posts.len() == 2 && !s.is_loading);
    services.toggle_post(1);
    wait_for(&services, |s| s.comments.len() == 2 && !s.is_loading);
    services.drain();

    let mut form = CommentForm::new();
    form.set(Field::Name, "Ann".to_string());
    form.set(Field::Email, "ann@example.com".to_string());
    form.set(Field::Body, "Nice post".to_string());
    services.submit_comment(form);

    let (form, outcome) = loop {
        if let ServiceReply::Submitted { form, outcome } = next_reply(&services) {
            break (form, outcome);
        }
    };

    match outcome {
        SubmitOutcome::Created(comment) => assert_eq!(comment.id, 4),
        other => panic!("expected a created comment, got {other:?}"),
    }
    assert_eq!(form.name, "Ann");
    assert_eq!(form.body, "");
    assert_eq!(services.state().comments.len(), 3);
}

#[test]
fn test_invalid_submission_replies_invalid() {
    let services = handle();

    services.submit_comment(CommentForm::new());
    let reply = next_reply(&services);

    match reply {
        ServiceReply::Submitted { form, outcome } => {
            assert_eq!(outcome, SubmitOutcome::Invalid);
            assert!(form.errors.name && form.errors.email && form.errors.body);
        }
        other => panic!("unexpected reply {other:?}"),
    }
}

#[test]
fn test_delete_comment_removes_it() {
    let services = handle();
    services.select_user(1);
    wait_for(&services, |s| s.posts.len() == 2 && !s.is_loading);
    services.toggle_post(1);
    wait_for(&services, |s| s.comments.len() == 2 && !s.is_loading);

    services.delete_comment(1);
    let state = wait_for(&services, |s| s.comments.len() == 1);

    assert_eq!(state.comments[0].id, 2);
}

#[test]
fn test_store_change_signals_redraw() {
    let services = handle();

    services.load_users();
    let deadline = Instant::now() + Duration::from_secs(2);
    let mut redraws = 0;
    while Instant::now() < deadline && redraws == 0 {
        redraws += services
            .drain()
            .iter()
            .filter(|reply| **reply == ServiceReply::StoreChanged)
            .count();
        std::thread::sleep(Duration::from_millis(10));
    }

    assert!(redraws > 0);
}

#[test]
fn test_idle_store_sends_no_redraw() {
    let services = handle();

    std::thread::sleep(Duration::from_millis(50));

    assert!(services.drain().is_empty());
}
