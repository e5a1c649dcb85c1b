//! Tests for the navigation guard state machine, per-turn batching and the
//! notification path.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use xfer::ChannelTransport;
use xfer::Frame;
use xfer::MessageType;
use xfer::MutationFrame;
use xfer::MutationType;
use xfer::NavigationPolicy;
use xfer::Notification;
use xfer::OnBeforeUnloadRecord;
use xfer::Transport;

use crate::error::Error;
use crate::event::Event;
use crate::listeners::GlobalListeners;
use crate::window::BeforeUnloadState;
use crate::window::Handler;
use crate::window::Window;
use crate::worker::Worker;

const ALLOW: OnBeforeUnloadRecord = OnBeforeUnloadRecord::Install(NavigationPolicy::Allow);
const PREVENT: OnBeforeUnloadRecord = OnBeforeUnloadRecord::Install(NavigationPolicy::Prevent);
const REMOVE: OnBeforeUnloadRecord = OnBeforeUnloadRecord::Remove;

fn detached_window() -> Window {
    let (end, _peer) = ChannelTransport::pair();
    Window::new(Arc::new(end))
}

fn noop() -> Handler {
    Arc::new(|_: &Event| {})
}

/// Decodes a buffer of navigation guard records.
fn guards(words: &[u16]) -> Vec<OnBeforeUnloadRecord> {
    words
        .chunks(2)
        .map(|record| OnBeforeUnloadRecord::decode(record, 0).unwrap())
        .collect()
}

fn sent(window: &Window) -> Vec<OnBeforeUnloadRecord> {
    guards(window.document().transfer().pending_words())
}

async fn drain(end: &ChannelTransport) -> Vec<MutationFrame> {
    let mut frames = Vec::new();
    while let Some(bytes) = end.recv().await.unwrap() {
        match Frame::decode_bytes(&bytes).unwrap() {
            Frame::Mutations(frame) => frames.push(frame),
            other => panic!("expected mutation frame, got {:?}", other),
        }
    }
    frames
}

fn notification() -> Vec<u8> {
    Notification::new(MessageType::ExecOnBeforeUnload).to_bytes()
}

// ============================================================================
// Navigation Guard Scenarios
// ============================================================================

#[test]
fn test_handler_alone_sends_allow() {
    let mut window = detached_window();
    window.set_on_before_unload(Some(noop()));

    assert_eq!(sent(&window), vec![ALLOW]);
    assert_eq!(window.before_unload_state(), BeforeUnloadState::HandlerSet { prevent: false });
}

#[test]
fn test_flag_then_handler_sends_prevent_once() {
    let mut window = detached_window();
    window.set_on_before_unload_prevent_navigation(true);
    window.set_on_before_unload(Some(noop()));

    assert_eq!(sent(&window), vec![PREVENT]);
}

#[test]
fn test_flag_without_handler_sends_nothing() {
    let mut window = detached_window();
    window.set_on_before_unload_prevent_navigation(true);
    window.set_on_before_unload_prevent_navigation(false);
    window.set_on_before_unload_prevent_navigation(true);

    assert!(sent(&window).is_empty());
    assert_eq!(window.before_unload_state(), BeforeUnloadState::NoHandler { prevent: true });
}

#[test]
fn test_full_sequence_sends_every_change_in_order() {
    let mut window = detached_window();
    window.set_on_before_unload(Some(noop()));
    window.set_on_before_unload_prevent_navigation(true);
    window.set_on_before_unload_prevent_navigation(true);
    window.set_on_before_unload_prevent_navigation(false);

    assert_eq!(sent(&window), vec![ALLOW, PREVENT, ALLOW]);
    let words = window.document().transfer().pending_words();
    assert_eq!(words[0], MutationType::WindowOnBeforeUnload as u16);
    assert_eq!(window.document().transfer().pending_records(), 3);
}

#[test]
fn test_repeated_flag_sends_once() {
    let mut window = detached_window();
    window.set_on_before_unload(Some(noop()));
    window.set_on_before_unload_prevent_navigation(true);
    window.set_on_before_unload_prevent_navigation(true);

    assert_eq!(sent(&window), vec![ALLOW, PREVENT]);
}

#[test]
fn test_default_flag_write_is_not_a_change() {
    let mut window = detached_window();
    window.set_on_before_unload(Some(noop()));
    window.set_on_before_unload_prevent_navigation(false);

    assert_eq!(sent(&window), vec![ALLOW]);
}

#[test]
fn test_flag_stored_while_unset_is_sent_with_next_handler() {
    let mut window = detached_window();
    window.set_on_before_unload(Some(noop()));
    window.set_on_before_unload(None);
    window.set_on_before_unload_prevent_navigation(true);

    assert!(sent(&window).is_empty());

    window.set_on_before_unload(Some(noop()));
    assert_eq!(sent(&window), vec![PREVENT]);
}

#[test]
fn test_replacing_handler_resends_full_record() {
    let mut window = detached_window();
    window.set_on_before_unload_prevent_navigation(true);
    window.set_on_before_unload(Some(noop()));
    window.set_on_before_unload(Some(noop()));

    assert_eq!(sent(&window), vec![PREVENT, PREVENT]);
    assert_eq!(window.document().listeners().len(), 1);
}

#[test]
fn test_clearing_handler_in_same_turn_withdraws_its_records() {
    let mut window = detached_window();
    window.set_on_before_unload_prevent_navigation(true);
    window.set_on_before_unload(Some(noop()));
    window.set_on_before_unload_prevent_navigation(false);
    window.set_on_before_unload(None);

    assert!(sent(&window).is_empty());
    assert_eq!(window.document().transfer().pending_records(), 0);
    assert!(window.on_before_unload().is_none());
    assert!(window.document().listeners().is_empty());
    assert_eq!(window.before_unload_state(), BeforeUnloadState::NoHandler { prevent: false });
}

#[test]
fn test_clearing_handler_keeps_other_pending_records() {
    let mut window = detached_window();
    let other = [0x7F, 1, 2];
    window.document_mut().transfer_mut().transfer(&other);
    window.set_on_before_unload(Some(noop()));
    window.set_on_before_unload(None);

    assert_eq!(window.document().transfer().pending_words(), &other);
    assert_eq!(window.document().transfer().pending_records(), 1);
}

#[test]
fn test_clearing_flushed_handler_sends_remove() {
    let (end, _peer) = ChannelTransport::pair();
    let mut window = Window::new(Arc::new(end));
    window.set_on_before_unload(Some(noop()));
    assert!(window.document_mut().transfer_mut().flush().unwrap());

    window.set_on_before_unload(None);
    assert_eq!(sent(&window), vec![REMOVE]);

    // A second clear has nothing left to remove.
    window.set_on_before_unload(None);
    assert_eq!(sent(&window), vec![REMOVE]);
}

#[test]
fn test_replacing_then_clearing_flushed_handler_sends_only_remove() {
    let (end, _peer) = ChannelTransport::pair();
    let mut window = Window::new(Arc::new(end));
    window.set_on_before_unload(Some(noop()));
    window.document_mut().transfer_mut().flush().unwrap();

    window.set_on_before_unload(Some(noop()));
    window.set_on_before_unload_prevent_navigation(true);
    window.set_on_before_unload(None);

    assert_eq!(sent(&window), vec![REMOVE]);
}

#[test]
fn test_clear_then_set_in_one_turn_ends_installed() {
    let (end, _peer) = ChannelTransport::pair();
    let mut window = Window::new(Arc::new(end));
    window.set_on_before_unload(Some(noop()));
    window.document_mut().transfer_mut().flush().unwrap();

    window.set_on_before_unload(None);
    window.set_on_before_unload(Some(noop()));
    assert_eq!(sent(&window), vec![REMOVE, ALLOW]);

    window.set_on_before_unload(None);
    assert_eq!(sent(&window), vec![REMOVE]);
}

/// Applies guard records the way the host would: the last one wins.
fn apply(host: &mut Option<NavigationPolicy>, records: &[OnBeforeUnloadRecord]) {
    for record in records {
        *host = record.policy();
    }
}

#[test]
fn test_random_sequences_match_model() {
    let mut rng = StdRng::seed_from_u64(0x0F0F);

    for _ in 0..64 {
        let (end, _peer) = ChannelTransport::pair();
        let mut window = Window::new(Arc::new(end));
        let mut host = None;
        let mut handler = false;
        let mut prevent = false;

        for _ in 0..32 {
            match rng.gen_range(0..5) {
                0 => {
                    window.set_on_before_unload(Some(noop()));
                    handler = true;
                }
                1 => {
                    window.set_on_before_unload(None);
                    handler = false;
                }
                2 => {
                    apply(&mut host, &sent(&window));
                    window.document_mut().transfer_mut().flush().unwrap();
                    let local = handler.then(|| NavigationPolicy::from_flag(prevent));
                    assert_eq!(host, local);
                }
                _ => {
                    let value = rng.gen_bool(0.5);
                    window.set_on_before_unload_prevent_navigation(value);
                    prevent = value;
                }
            }
        }

        apply(&mut host, &sent(&window));
        assert_eq!(host, handler.then(|| NavigationPolicy::from_flag(prevent)));
        assert_eq!(window.on_before_unload_prevent_navigation(), prevent);
        assert_eq!(window.on_before_unload().is_some(), handler);
    }
}

// ============================================================================
// Listeners
// ============================================================================

#[test]
fn test_listeners_run_in_registration_order() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let mut listeners = GlobalListeners::new();

    let first = order.clone();
    let a = listeners.add(Box::new(move |_: &Notification| first.lock().unwrap().push("a")));
    let second = order.clone();
    listeners.add(Box::new(move |_: &Notification| second.lock().unwrap().push("b")));

    let ran = listeners.dispatch(&Notification::new(MessageType::ExecOnBeforeUnload));
    assert_eq!(ran, 2);
    assert_eq!(*order.lock().unwrap(), vec!["a", "b"]);

    assert!(listeners.remove(a));
    assert!(!listeners.remove(a));
    assert!(!listeners.contains(a));
    assert_eq!(listeners.len(), 1);
}

#[test]
fn test_replayed_event_is_inert() {
    let event = Event::new(crate::event::BEFORE_UNLOAD);
    event.prevent_default();

    assert_eq!(event.kind(), "beforeunload");
    assert!(!event.bubbles());
    assert!(!event.cancelable());
    assert!(!event.default_prevented());
}

// ============================================================================
// Worker
// ============================================================================

#[tokio::test]
async fn test_turn_ships_one_frame() -> anyhow::Result<()> {
    let (iso_end, host_end) = ChannelTransport::pair();
    let mut worker = Worker::new(Arc::new(iso_end));

    worker.turn(|window| {
        window.set_on_before_unload(Some(noop()));
        window.set_on_before_unload_prevent_navigation(true);
        window.set_on_before_unload_prevent_navigation(false);
    })?;
    worker.turn(|_| {})?;
    worker.turn(|window| window.set_on_before_unload_prevent_navigation(true))?;
    assert!(worker.window().document().transfer().pending_words().is_empty());
    drop(worker);

    let frames = drain(&host_end).await;
    assert_eq!(frames.len(), 2);
    assert_eq!(guards(&frames[0].mutations), vec![ALLOW, PREVENT, ALLOW]);
    assert_eq!(guards(&frames[1].mutations), vec![PREVENT]);
    Ok(())
}

#[tokio::test]
async fn test_set_and_clear_in_one_turn_ships_nothing() -> anyhow::Result<()> {
    let (iso_end, host_end) = ChannelTransport::pair();
    let mut worker = Worker::new(Arc::new(iso_end));

    worker.turn(|window| {
        window.set_on_before_unload_prevent_navigation(true);
        window.set_on_before_unload(Some(noop()));
        window.set_on_before_unload(None);
    })?;
    assert_eq!(worker.window().document().transfer().frames(), 0);

    worker.turn(|window| window.set_on_before_unload(Some(noop())))?;
    worker.turn(|window| window.set_on_before_unload(None))?;
    drop(worker);

    let frames = drain(&host_end).await;
    assert_eq!(frames.len(), 2);
    assert_eq!(guards(&frames[0].mutations), vec![PREVENT]);
    assert_eq!(guards(&frames[1].mutations), vec![REMOVE]);
    Ok(())
}

#[tokio::test]
async fn test_interned_strings_ride_with_next_frame() -> anyhow::Result<()> {
    let (iso_end, host_end) = ChannelTransport::pair();
    let mut worker = Worker::new(Arc::new(iso_end));

    let idx = worker.turn(|window| {
        let transfer = window.document_mut().transfer_mut();
        let first = transfer.intern("leave?");
        let again = transfer.intern("leave?");
        (first, again)
    })?;
    assert_eq!(idx, (Ok(0), Ok(0)));
    drop(worker);

    let frames = drain(&host_end).await;
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].strings, vec!["leave?".to_string()]);
    assert!(frames[0].mutations.is_empty());
    Ok(())
}

#[test]
fn test_notification_replays_handler() {
    let (iso_end, _host_end) = ChannelTransport::pair();
    let mut worker = Worker::new(Arc::new(iso_end));
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = calls.clone();
    worker
        .turn(|window| {
            window.set_on_before_unload(Some(Arc::new(move |event: &Event| {
                assert_eq!(event.kind(), "beforeunload");
                assert!(!event.cancelable());
                counter.fetch_add(1, Ordering::SeqCst);
            })));
        })
        .unwrap();

    assert_eq!(worker.handle_message(&notification()).unwrap(), 1);
    assert_eq!(worker.handle_message(&notification()).unwrap(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_notification_after_clear_reaches_no_one() {
    let (iso_end, _host_end) = ChannelTransport::pair();
    let mut worker = Worker::new(Arc::new(iso_end));
    let calls = Arc::new(AtomicUsize::new(0));

    let counter = calls.clone();
    worker
        .turn(|window| {
            window.set_on_before_unload(Some(Arc::new(move |_: &Event| {
                counter.fetch_add(1, Ordering::SeqCst);
            })));
            window.set_on_before_unload(None);
        })
        .unwrap();

    assert_eq!(worker.handle_message(&notification()).unwrap(), 0);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_worker_rejects_mutation_frame() {
    let (iso_end, _host_end) = ChannelTransport::pair();
    let mut worker = Worker::new(Arc::new(iso_end));

    let bytes = MutationFrame::new(Vec::new(), Vec::new()).to_bytes().unwrap();
    assert_eq!(worker.handle_message(&bytes).unwrap_err(), Error::UnexpectedFrame);
}

#[test]
fn test_flush_reports_closed_channel() {
    let (iso_end, host_end) = ChannelTransport::pair();
    let mut worker = Worker::new(Arc::new(iso_end));
    drop(host_end);

    let err = worker
        .turn(|window| window.set_on_before_unload(Some(noop())))
        .unwrap_err();
    assert_eq!(err, Error::Transport(xfer::TransportError::Closed));
    assert!(worker.window().document().transfer().pending_words().is_empty());
}

#[tokio::test]
async fn test_pump_stops_when_host_hangs_up() {
    let (iso_end, host_end) = ChannelTransport::pair();
    let mut worker = Worker::new(Arc::new(iso_end));

    host_end.send(notification()).unwrap();
    drop(host_end);

    assert_eq!(worker.pump_once().await.unwrap(), Some(0));
    assert_eq!(worker.pump_once().await.unwrap(), None);
}
