//! Integration tests for BarManager playback
//!
//! These tests verify:
//! - FIFO playback and queue positions
//! - Indefinite duration coercion and queue absorption
//! - Explicit dismiss / dismiss_all and late presenter callbacks
//! - Listener dispatch by correlation id, including re-entrant listeners
//! - Item store semantics and config snapshots
//! - Style pushes to the active presentation

mod common;

use common::{RecordingPresenter, listen, manager, sync_manager};
use snackbar_queue::manager::BarEvent;
use snackbar_queue::models::{BarConfig, Color, DurationSpec};
use snackbar_queue::{BarError, BarManager, DismissReason, DisplayListener};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::Ordering;

fn bar(message: &str) -> BarConfig {
    BarConfig::normal(message)
}

/// Fire the timeout on the newest handle.
fn time_out(manager: &BarManager<RecordingPresenter>) {
    manager
        .presenter()
        .last()
        .fire_dismissed(DismissReason::Timeout);
}

#[test]
fn test_items_play_in_fifo_order() {
    let manager = manager();

    assert_eq!(manager.show(&bar("A"), DurationSpec::Short, None), Ok(0));
    assert_eq!(manager.show(&bar("B"), DurationSpec::Long, None), Ok(1));
    assert_eq!(manager.show(&bar("C"), DurationSpec::Millis(500), None), Ok(2));

    // Only A has been made so far
    assert_eq!(manager.presenter().messages(), vec!["A"]);

    time_out(&manager);
    time_out(&manager);
    time_out(&manager);

    assert_eq!(manager.presenter().messages(), vec!["A", "B", "C"]);
    assert!(manager.is_idle());
}

#[test]
fn test_handle_receives_style_callback_then_show() {
    let manager = manager();

    manager.show(&bar("A"), DurationSpec::Short, None).unwrap();

    assert_eq!(
        manager.presenter().last().calls(),
        vec!["overlay", "colors", "callback", "show"]
    );
}

#[test]
fn test_indefinite_in_middle_is_coerced_to_short() {
    let manager = manager();
    let mut events = manager.subscribe();

    manager.show(&bar("A"), DurationSpec::Short, None).unwrap();
    manager.show(&bar("B"), DurationSpec::Indefinite, None).unwrap();
    manager.show(&bar("C"), DurationSpec::Short, None).unwrap();

    time_out(&manager);
    let b = manager.presenter().last();
    assert_eq!(b.message(), "B");
    assert_eq!(b.duration(), DurationSpec::Short);
    assert_eq!(manager.current_duration(), Some(DurationSpec::Short));

    // B auto-advances like any short bar
    time_out(&manager);
    assert_eq!(manager.presenter().last().message(), "C");

    let mut coerced = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let BarEvent::DurationCoerced { index } = event {
            coerced.push(index);
        }
    }
    assert_eq!(coerced, vec![1]);
    assert_eq!(manager.metrics().durations_coerced.load(Ordering::Relaxed), 1);
}

#[test]
fn test_lone_indefinite_absorbs_queue() {
    let manager = manager();

    assert_eq!(manager.show(&bar("A"), DurationSpec::Indefinite, None), Ok(0));

    assert_eq!(manager.queue_len(), 0);
    assert!(manager.is_showing());
    assert_eq!(manager.current_duration(), Some(DurationSpec::Indefinite));
    assert_eq!(manager.presenter().last().duration(), DurationSpec::Indefinite);
}

#[test]
fn test_indefinite_does_not_advance_on_its_own_dismissal() {
    let manager = manager();
    manager.show(&bar("A"), DurationSpec::Indefinite, None).unwrap();

    manager
        .presenter()
        .last()
        .fire_dismissed(DismissReason::Swipe);

    assert_eq!(manager.presenter().made(), 1);
    assert!(!manager.is_showing());
    assert!(manager.is_idle());
}

#[test]
fn test_explicit_dismiss_returns_indefinite_to_idle() {
    let manager = sync_manager();
    let listener = listen(&manager);
    manager
        .show(&bar("A"), DurationSpec::Indefinite, Some(5))
        .unwrap();
    manager.presenter().last().fire_shown();

    manager.dismiss().unwrap();

    assert!(manager.is_idle());
    assert_eq!(manager.presenter().made(), 1);
    assert_eq!(listener.events(), vec!["shown 5", "dismissed 5"]);
}

#[test]
fn test_show_after_absorption_starts_fresh_queue() {
    let manager = manager();
    manager.show(&bar("A"), DurationSpec::Indefinite, None).unwrap();

    assert_eq!(manager.show(&bar("B"), DurationSpec::Short, None), Ok(0));

    let a = manager.presenter().handle(0);
    assert!(a.calls().contains(&"dismiss".to_string()));
    assert_eq!(manager.presenter().last().message(), "B");
    assert_eq!(manager.queue_len(), 1);

    // A's late dismissal must not disturb B
    a.fire_dismissed(DismissReason::Manual);
    assert_eq!(manager.presenter().made(), 2);
    assert!(manager.is_showing());
}

#[test]
fn test_last_indefinite_keeps_duration_after_queue_plays() {
    let manager = manager();
    manager.show(&bar("A"), DurationSpec::Short, None).unwrap();
    manager.show(&bar("B"), DurationSpec::Indefinite, None).unwrap();

    time_out(&manager);

    assert_eq!(manager.presenter().last().duration(), DurationSpec::Indefinite);
    assert_eq!(manager.queue_len(), 0);
    assert!(manager.is_showing());
}

#[test]
fn test_dismiss_all_then_show_starts_queue_of_one() {
    let manager = manager();
    for message in ["A", "B", "C", "D"] {
        manager.show(&bar(message), DurationSpec::Short, None).unwrap();
    }

    manager.dismiss_all();
    assert_eq!(manager.queue_len(), 0);
    assert!(!manager.is_showing());

    assert_eq!(manager.show(&bar("E"), DurationSpec::Short, None), Ok(0));
    assert_eq!(manager.queue_len(), 1);

    // The old bar finishing its exit animation does not advance anything
    manager
        .presenter()
        .handle(0)
        .fire_dismissed(DismissReason::Manual);
    assert_eq!(manager.presenter().messages(), vec!["A", "E"]);
    assert_eq!(manager.current_index(), 0);
}

#[test]
fn test_dismiss_all_while_idle_is_harmless() {
    let manager = manager();
    manager.dismiss_all();
    assert!(manager.is_idle());
    assert_eq!(manager.metrics().queue_resets.load(Ordering::Relaxed), 1);
}

#[test]
fn test_dismiss_while_idle_does_nothing() {
    let manager = manager();
    let mut events = manager.subscribe();

    manager.dismiss().unwrap();

    assert!(manager.is_idle());
    assert!(events.try_recv().is_err());
    assert_eq!(manager.metrics().queue_drains.load(Ordering::Relaxed), 0);
    assert_eq!(manager.presenter().made(), 0);
}

#[test]
fn test_put_overwrites_existing_id() {
    let manager = manager();
    manager.put(bar("first"), 3).unwrap();
    manager.put(bar("second"), 3).unwrap();

    assert_eq!(manager.get(3), Some(bar("second")));
}

#[test]
fn test_put_rejects_id_zero() {
    let manager = manager();
    assert_eq!(manager.put(bar("nope"), 0), Err(BarError::InvalidStoreId(0)));
    assert_eq!(manager.get(0), None);
}

#[test]
fn test_show_unregistered_id_leaves_queue_unchanged() {
    let manager = manager();

    let result = manager.show(77_u32, DurationSpec::Short, None);

    assert_eq!(result, Err(BarError::UnknownStoreId(77)));
    assert_eq!(manager.queue_len(), 0);
    assert_eq!(manager.presenter().made(), 0);
}

#[test]
fn test_stored_config_is_snapshotted_on_show() {
    let manager = manager();
    manager.put(bar("v1"), 1).unwrap();
    manager.show(1_u32, DurationSpec::Short, None).unwrap();
    manager.show(1_u32, DurationSpec::Short, None).unwrap();

    manager.edit(1, |config| config.message = "v2".to_string());
    time_out(&manager);

    assert_eq!(manager.presenter().messages(), vec!["v1", "v1"]);
    assert_eq!(manager.get(1).map(|c| c.message), Some("v2".to_string()));
}

#[test]
fn test_adhoc_config_is_snapshotted_on_show() {
    let manager = manager();
    let mut config = bar("before");
    manager.show(&config, DurationSpec::Short, None).unwrap();
    manager.show(&config, DurationSpec::Short, None).unwrap();

    config.message = "after".to_string();
    time_out(&manager);

    assert_eq!(manager.presenter().messages(), vec!["before", "before"]);
}

#[test]
fn test_dismiss_with_correlation_id_notifies_once_then_advances() {
    let manager = manager();
    let listener = listen(&manager);
    manager.show(&bar("A"), DurationSpec::Long, Some(42)).unwrap();
    manager.show(&bar("B"), DurationSpec::Short, Some(7)).unwrap();
    let a = manager.presenter().last();
    a.fire_shown();

    manager.dismiss().unwrap();

    // Next item starts right away
    assert_eq!(manager.presenter().last().message(), "B");
    assert_eq!(manager.current_correlation_id(), Some(7));

    // The presenter reporting A's dismissal, even twice, notifies once
    a.fire_dismissed(DismissReason::Manual);
    a.fire_dismissed(DismissReason::Manual);
    assert_eq!(listener.events(), vec!["shown 42", "dismissed 42"]);
    assert_eq!(manager.presenter().made(), 2);
}

#[test]
fn test_sync_dismiss_advances_exactly_once() {
    let manager = sync_manager();
    let listener = listen(&manager);
    manager.show(&bar("A"), DurationSpec::Short, Some(42)).unwrap();
    manager.show(&bar("B"), DurationSpec::Short, None).unwrap();
    manager.show(&bar("C"), DurationSpec::Short, None).unwrap();

    manager.dismiss().unwrap();

    assert_eq!(manager.presenter().messages(), vec!["A", "B"]);
    assert_eq!(listener.events(), vec!["dismissed 42"]);
    assert_eq!(manager.presenter().visible().len(), 1);
}

#[test]
fn test_requests_without_correlation_id_skip_listener() {
    let manager = manager();
    let listener = listen(&manager);
    manager.show(&bar("A"), DurationSpec::Short, None).unwrap();

    let a = manager.presenter().last();
    a.fire_shown();
    a.fire_dismissed(DismissReason::Timeout);

    assert!(listener.events().is_empty());
    assert_eq!(manager.metrics().bars_shown.load(Ordering::Relaxed), 1);
    assert_eq!(manager.metrics().bars_dismissed.load(Ordering::Relaxed), 1);
}

#[test]
fn test_listener_can_show_from_dismiss_callback() {
    struct Chain {
        manager: BarManager<RecordingPresenter>,
        seen: RefCell<Vec<i32>>,
    }

    impl DisplayListener for Chain {
        fn on_shown(&self, _correlation_id: i32) {}

        fn on_dismissed(&self, correlation_id: i32) {
            self.seen.borrow_mut().push(correlation_id);
            if correlation_id == 1 {
                self.manager
                    .show(&BarConfig::normal("follow-up"), DurationSpec::Short, Some(2))
                    .unwrap();
            }
        }
    }

    let manager = manager();
    let chain = Rc::new(Chain {
        manager: manager.clone(),
        seen: RefCell::new(Vec::new()),
    });
    manager.set_on_display_listener(Some(chain.clone()));

    manager.show(&bar("first"), DurationSpec::Short, Some(1)).unwrap();
    time_out(&manager);

    assert_eq!(manager.presenter().messages(), vec!["first", "follow-up"]);
    assert_eq!(manager.current_correlation_id(), Some(2));
    assert_eq!(*chain.seen.borrow(), vec![1]);

    manager.set_on_display_listener(None);
}

/// Listener that resets the queue and starts a new bar when `1` is dismissed.
struct Restart {
    manager: BarManager<RecordingPresenter>,
}

impl DisplayListener for Restart {
    fn on_shown(&self, _correlation_id: i32) {}

    fn on_dismissed(&self, correlation_id: i32) {
        if correlation_id == 1 {
            self.manager.dismiss_all();
            self.manager
                .show(&bar("fresh"), DurationSpec::Short, Some(9))
                .unwrap();
        }
    }
}

fn assert_fresh_bar_survived(manager: &BarManager<RecordingPresenter>) {
    assert!(manager.is_showing());
    assert_eq!(manager.current_correlation_id(), Some(9));
    assert_eq!(manager.queue_len(), 1);
    assert_eq!(manager.presenter().messages(), vec!["first", "fresh"]);
    assert!(manager.presenter().last().is_showing());
    assert!(!manager.presenter().last().calls().contains(&"dismiss".to_string()));
}

#[test]
fn test_listener_restart_on_timeout_keeps_new_bar() {
    let manager = manager();
    manager.set_on_display_listener(Some(Rc::new(Restart {
        manager: manager.clone(),
    })));

    manager.show(&bar("first"), DurationSpec::Short, Some(1)).unwrap();
    time_out(&manager);

    assert_fresh_bar_survived(&manager);
    assert_eq!(manager.metrics().queue_drains.load(Ordering::Relaxed), 0);

    manager.set_on_display_listener(None);
}

#[test]
fn test_listener_restart_during_dismiss_keeps_new_bar() {
    let manager = sync_manager();
    manager.set_on_display_listener(Some(Rc::new(Restart {
        manager: manager.clone(),
    })));

    manager.show(&bar("first"), DurationSpec::Short, Some(1)).unwrap();
    manager.show(&bar("second"), DurationSpec::Short, None).unwrap();
    manager.dismiss().unwrap();

    assert_fresh_bar_survived(&manager);

    manager.set_on_display_listener(None);
}

#[test]
fn test_last_shown_tracks_shown_callback() {
    let manager = manager();
    manager.show(&bar("A"), DurationSpec::Short, None).unwrap();
    assert_eq!(manager.last_shown(), None);

    manager.presenter().last().fire_shown();
    assert_eq!(manager.last_shown(), Some(bar("A")));

    manager.update_to(&bar("A2")).unwrap();
    assert_eq!(manager.last_shown(), Some(bar("A")));
    assert_eq!(manager.presenter().last().message(), "A2");
}

#[test]
fn test_update_to_while_idle_does_nothing() {
    let manager = manager();
    manager.put(bar("stored"), 9).unwrap();

    manager.update_to(9_u32).unwrap();

    assert!(manager.is_idle());
    assert_eq!(manager.presenter().made(), 0);
}

#[test]
fn test_style_applied_to_next_bar_and_pushed_live() {
    let manager = manager();
    manager.set_overlay_color(Color::BLACK);
    manager.set_overlay_alpha(0.5);

    manager.show(&bar("A"), DurationSpec::Short, None).unwrap();
    let a = manager.presenter().last();
    assert_eq!(a.overlay(), Some((Color::BLACK, 0.5)));

    manager.set_message_color(Color::rgb(0x12, 0x34, 0x56));
    assert_eq!(
        a.colors().map(|c| c.message),
        Some(Color::rgb(0x12, 0x34, 0x56))
    );

    a.fire_dismissed(DismissReason::Timeout);
    assert_eq!(a.overlay(), None);
    assert_eq!(a.calls().last().map(String::as_str), Some("remove_overlay"));
}

#[test]
fn test_progress_pushed_to_current_bar_only() {
    let manager = manager();
    manager.set_progress(30);

    manager
        .show(
            &BarConfig::determinate("Uploading").with_progress_max(60),
            DurationSpec::Indefinite,
            None,
        )
        .unwrap();
    let upload = manager.presenter().last();
    assert_eq!(upload.progress(), None);

    manager.set_progress(45);
    assert_eq!(upload.progress(), Some(45));

    manager.set_progress(90);
    assert_eq!(upload.progress(), Some(60));
}

#[test]
fn test_views_to_move_forwarded_to_presenter() {
    let manager = manager();
    manager.set_views_to_move(vec!["fab".to_string()]);

    manager.show(&bar("A"), DurationSpec::Short, None).unwrap();

    assert_eq!(manager.presenter().last().views_to_move(), vec!["fab"]);
}

#[test]
fn test_presenter_failure_on_show_resets_queue() {
    let manager = manager();
    manager.presenter().fail_next_make();

    let result = manager.show(&bar("A"), DurationSpec::Short, None);

    assert!(matches!(result, Err(BarError::Presenter(_))));
    assert_eq!(manager.queue_len(), 0);
    assert_eq!(manager.show(&bar("B"), DurationSpec::Short, None), Ok(0));
    assert!(manager.is_showing());
}

#[test]
fn test_presenter_failure_while_advancing_goes_idle() {
    let manager = manager();
    manager.show(&bar("A"), DurationSpec::Short, None).unwrap();
    manager.show(&bar("B"), DurationSpec::Short, None).unwrap();
    manager.presenter().fail_next_make();

    time_out(&manager);

    assert!(manager.is_idle());
    assert_eq!(manager.metrics().presenter_errors.load(Ordering::Relaxed), 1);
}

#[test]
fn test_events_follow_queue_lifecycle() {
    let manager = manager();
    let mut events = manager.subscribe();

    manager.show(&bar("A"), DurationSpec::Short, Some(1)).unwrap();
    manager.presenter().last().fire_shown();
    time_out(&manager);

    let received: Vec<BarEvent> = std::iter::from_fn(|| events.try_recv().ok()).collect();
    assert_eq!(
        received,
        vec![
            BarEvent::Enqueued {
                position: 0,
                correlation_id: Some(1)
            },
            BarEvent::Shown {
                correlation_id: Some(1)
            },
            BarEvent::Dismissed {
                correlation_id: Some(1),
                reason: DismissReason::Timeout
            },
            BarEvent::QueueDrained,
        ]
    );
}
