use super::*;
use crate::hotkeys::key_from_dom;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

/// In-memory stand-in for the webview video element and document.
#[derive(Debug)]
struct FakeHost {
    duration: f64,
    current_time: f64,
    paused: bool,
    ended: bool,
    draws: Vec<(u32, u32)>,
    seeks: Vec<f64>,
    attached: BTreeSet<ListenerKind>,
    listener_calls: Vec<(&'static str, ListenerKind)>,
}

impl FakeHost {
    fn with_duration(duration: f64) -> Self {
        Self {
            duration,
            current_time: 0.0,
            paused: true,
            ended: false,
            draws: Vec::new(),
            seeks: Vec::new(),
            attached: BTreeSet::new(),
            listener_calls: Vec::new(),
        }
    }
}

impl MediaElement for FakeHost {
    fn duration(&self) -> f64 {
        self.duration
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.current_time = seconds;
        self.seeks.push(seconds);
    }

    fn play(&mut self) {
        self.paused = false;
        self.ended = false;
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn is_ended(&self) -> bool {
        self.ended
    }

    fn draw_frame(&mut self, width: u32, height: u32) {
        self.draws.push((width, height));
    }
}

impl ListenerHost for FakeHost {
    fn attach_listener(&mut self, kind: ListenerKind) {
        self.attached.insert(kind);
        self.listener_calls.push(("attach", kind));
    }

    fn detach_listener(&mut self, kind: ListenerKind) {
        self.attached.remove(&kind);
        self.listener_calls.push(("detach", kind));
    }
}

fn constrained(interval: f64, width: u32) -> SelectorConfig {
    SelectorConfig {
        time_interval: Some(interval),
        width,
        ..Default::default()
    }
}

fn free(width: u32) -> SelectorConfig {
    SelectorConfig {
        time_interval: None,
        width,
        ..Default::default()
    }
}

fn loaded(config: SelectorConfig, duration: f64) -> IntervalSelector<FakeHost> {
    let mut selector = IntervalSelector::new(
        "video-interval-selector",
        "vis://localhost/video.mp4",
        config,
        FakeHost::with_duration(duration),
    )
    .unwrap();
    selector.on_loaded().unwrap();
    selector
}

fn record_events(selector: &mut IntervalSelector<FakeHost>) -> Rc<RefCell<Vec<SelectorEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    for kind in EventKind::ALL {
        let log = log.clone();
        selector.on(kind, move |event| log.borrow_mut().push(event.clone()));
    }
    log
}

#[test]
fn test_construction_requires_container_and_source() {
    let missing_container = IntervalSelector::new(
        "",
        "video.mp4",
        SelectorConfig::default(),
        FakeHost::with_duration(10.0),
    );
    assert!(matches!(missing_container, Err(SelectorError::MissingContainer)));

    let missing_source = IntervalSelector::new(
        "root",
        "  ",
        SelectorConfig::default(),
        FakeHost::with_duration(10.0),
    );
    assert!(matches!(missing_source, Err(SelectorError::MissingSource)));
}

#[test]
fn test_construction_rejects_invalid_interval() {
    let result = IntervalSelector::new(
        "root",
        "video.mp4",
        constrained(-2.0, 200),
        FakeHost::with_duration(10.0),
    );
    assert!(matches!(result, Err(SelectorError::InvalidInterval { .. })));
}

#[test]
fn test_each_instance_gets_its_own_scope() {
    let a = loaded(constrained(5.0, 200), 100.0);
    let b = loaded(constrained(5.0, 200), 100.0);
    assert_ne!(a.scope(), b.scope());
}

#[test]
fn test_video_too_short_announces_and_tears_down() {
    let mut selector = IntervalSelector::new(
        "video-interval-selector",
        "video.mp4",
        constrained(10.0, 200),
        FakeHost::with_duration(5.0),
    )
    .unwrap();
    let log = record_events(&mut selector);

    let result = selector.on_loaded();

    assert!(matches!(
        result,
        Err(SelectorError::VideoTooShort { interval, duration }) if interval == 10.0 && duration == 5.0
    ));
    assert_eq!(
        *log.borrow(),
        vec![
            SelectorEvent::Error {
                kind: ErrorKind::VideoTooShort
            },
            SelectorEvent::VideoTooShort,
        ]
    );
    assert!(selector.is_destroyed());
    assert!(selector.view().is_none());
    assert!(selector.listeners().is_empty());
    assert!(selector.host().attached.is_empty());
}

#[test]
fn test_load_initializes_and_binds_keyboard() {
    let mut selector = IntervalSelector::new(
        "root",
        "video.mp4",
        constrained(5.0, 200),
        FakeHost::with_duration(100.0),
    )
    .unwrap();
    let log = record_events(&mut selector);
    selector.on_loaded().unwrap();

    assert_eq!(*log.borrow(), vec![SelectorEvent::Initialized]);
    assert!(selector.is_ready());
    assert!(selector.listeners().is_attached(ListenerKind::KeyDown));
    let view = selector.view().unwrap();
    assert!(view.play_button);
    assert!(!view.pause_button);
    let seeker = view.seeker.unwrap();
    assert_eq!(seeker.width_px, 10.0);
    assert_eq!(seeker.left_px, 0.0);
}

#[test]
fn test_interval_equal_to_duration_is_accepted() {
    let selector = loaded(constrained(5.0, 200), 5.0);
    assert!(selector.is_ready());
    assert_eq!(selector.seeker().unwrap().width_px, 200.0);
}

#[test]
fn test_load_with_unknown_duration_waits() {
    let mut selector = IntervalSelector::new(
        "root",
        "video.mp4",
        free(200),
        FakeHost::with_duration(f64::NAN),
    )
    .unwrap();
    assert!(matches!(
        selector.on_loaded(),
        Err(SelectorError::InvalidDuration { .. })
    ));
    assert!(!selector.is_ready());

    selector.host_mut().duration = 30.0;
    selector.on_loaded().unwrap();
    assert!(selector.is_ready());
}

#[test]
fn test_auto_play_starts_after_load() {
    let config = SelectorConfig {
        auto_play: true,
        ..constrained(5.0, 200)
    };
    let selector = loaded(config, 100.0);
    assert_eq!(selector.state(), LoopState::Playing);
    assert!(!selector.host().paused);
    let view = selector.view().unwrap();
    assert!(!view.play_button && !view.pause_button);
}

#[test]
fn test_get_data_at_track_midpoint() {
    let mut selector = loaded(constrained(5.0, 200), 100.0);
    selector.drag_start(10.0);
    selector.drag_move(110.0).unwrap();
    selector.drag_end();

    let data = selector.get_data();
    assert!((data.start_time - 50.0).abs() <= 0.5);
    assert!((data.end_time - 55.0).abs() <= 0.5);
    assert_eq!(data.time_interval, Some(5.0));
    assert_eq!(selector.host().current_time, data.start_time);
}

#[test]
fn test_get_data_serializes_with_camel_case_keys() {
    let selector = loaded(constrained(5.0, 200), 100.0);
    let json = serde_json::to_value(selector.get_data()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "startTime": 0.0, "endTime": 5.0, "timeInterval": 5.0 })
    );
}

#[test]
fn test_get_data_in_free_mode_reports_playhead() {
    let mut selector = loaded(free(200), 100.0);
    selector.seek_to(SeekTarget::Offset(50.0)).unwrap();
    let data = selector.get_data();
    assert_eq!(data.start_time, 25.0);
    assert_eq!(data.end_time, 25.0);
    assert_eq!(data.time_interval, None);
}

#[test]
fn test_drag_clamps_to_track_edges() {
    let mut selector = loaded(constrained(5.0, 200), 100.0);
    selector.drag_start(5.0);
    assert_eq!(selector.drag_move(-300.0).unwrap(), Some(0.0));
    assert_eq!(selector.drag_move(900.0).unwrap(), Some(190.0));
    assert_eq!(selector.seeker().unwrap().left_px, 190.0);
    assert_eq!(selector.view().unwrap().seeker.unwrap().left_px, 190.0);

    let window = selector.window().unwrap();
    assert!((window.end - 100.0).abs() < 1e-9);
}

#[test]
fn test_drag_listeners_live_only_during_session() {
    let mut selector = loaded(constrained(5.0, 200), 100.0);
    assert!(selector.drag_session().is_none());
    assert_eq!(selector.drag_move(50.0).unwrap(), None);

    selector.drag_start(3.0);
    assert_eq!(selector.drag_session(), Some(DragSession { diff_x: 3.0 }));
    assert!(selector.listeners().is_attached(ListenerKind::DragMove));
    assert!(selector.listeners().is_attached(ListenerKind::DragEnd));

    selector.drag_end();
    assert!(selector.drag_session().is_none());
    assert!(!selector.host().attached.contains(&ListenerKind::DragMove));
    assert!(!selector.host().attached.contains(&ListenerKind::DragEnd));
    assert!(selector.host().attached.contains(&ListenerKind::KeyDown));
}

#[test]
fn test_drag_is_ignored_in_free_mode() {
    let mut selector = loaded(free(200), 100.0);
    selector.drag_start(10.0);
    assert!(selector.drag_session().is_none());
    assert!(!selector.listeners().is_attached(ListenerKind::DragMove));
}

#[test]
fn test_free_mode_seeks_from_pointer_position() {
    let mut selector = loaded(free(200), 100.0);
    let time = selector
        .seek_to(SeekTarget::Pointer {
            page_x: 150.0,
            track_page_left: 50.0,
        })
        .unwrap();
    assert_eq!(time, Some(50.0));
    assert_eq!(selector.host().current_time, 50.0);
}

#[test]
fn test_constrained_mode_seeks_from_seeker() {
    let mut selector = loaded(constrained(5.0, 200), 100.0);
    selector.drag_start(0.0);
    selector.drag_move(40.0).unwrap();
    let time = selector.seek_to(SeekTarget::Offset(180.0)).unwrap();
    assert_eq!(time, Some(20.0));
}

#[test]
fn test_seek_before_load_is_a_no_op() {
    let mut selector = IntervalSelector::new(
        "root",
        "video.mp4",
        free(200),
        FakeHost::with_duration(100.0),
    )
    .unwrap();
    assert_eq!(selector.seek_to(SeekTarget::Offset(10.0)).unwrap(), None);
    assert!(selector.host().seeks.is_empty());
}

#[test]
fn test_play_pause_stop_buttons() {
    let mut selector = loaded(constrained(5.0, 200), 100.0);
    selector.play_pause();
    assert_eq!(selector.state(), LoopState::Playing);
    let view = selector.view().unwrap();
    assert!(!view.play_button && !view.pause_button);

    selector.play_pause();
    assert_eq!(selector.state(), LoopState::Paused);
    assert!(selector.host().paused);
    let view = selector.view().unwrap();
    assert!(!view.play_button && view.pause_button);

    selector.play();
    selector.stop();
    assert_eq!(selector.state(), LoopState::Stopped);
    assert!(selector.view().unwrap().play_button);
    assert_eq!(selector.host().current_time, 0.0);
}

#[test]
fn test_playback_stops_at_first_tick_past_window_end() {
    let mut selector = loaded(constrained(5.0, 200), 100.0);
    selector.drag_start(0.0);
    selector.drag_move(100.0).unwrap();
    selector.drag_end();
    selector.play();

    let timestamps = [50.0, 51.2, 52.4, 53.6, 54.8, 55.0, 56.2];
    let mut stopped_at = None;
    for time in timestamps {
        selector.host_mut().current_time = time;
        if selector.tick() == TickDecision::StopAtBoundary {
            stopped_at = Some(time);
            break;
        }
    }

    assert_eq!(stopped_at, Some(55.0));
    assert_eq!(selector.state(), LoopState::Stopped);
    assert_eq!(selector.host().current_time, 50.0);
    assert!(selector.host().paused);
    assert_eq!(selector.tick(), TickDecision::Halt);
}

#[test]
fn test_tick_updates_indicators() {
    let mut selector = loaded(constrained(10.0, 200), 100.0);
    selector.drag_start(0.0);
    selector.drag_move(40.0).unwrap();
    selector.drag_end();
    selector.play();
    selector.host_mut().current_time = 22.5;

    assert_eq!(selector.tick(), TickDecision::Continue);

    let view = selector.view().unwrap();
    assert_eq!(view.timeline_fill_pct, 22.5);
    assert_eq!(view.seeker.unwrap().fill_pct, 25.0);
    assert_eq!(view.timer.as_deref(), Some("00:22 / 01:40"));
    assert_eq!(selector.host().draws.last(), Some(&(200, 350)));
}

#[test]
fn test_tick_without_timer() {
    let config = SelectorConfig {
        show_timer: false,
        ..free(200)
    };
    let mut selector = loaded(config, 100.0);
    selector.tick();
    assert_eq!(selector.view().unwrap().timer, None);
}

#[test]
fn test_paused_tick_draws_but_halts() {
    let mut selector = loaded(free(200), 100.0);
    assert_eq!(selector.on_can_play(), TickDecision::Halt);
    assert_eq!(selector.host().draws.len(), 1);
}

#[test]
fn test_natural_end_in_free_mode() {
    let mut selector = loaded(free(200), 100.0);
    selector.play();
    selector.host_mut().current_time = 100.0;
    selector.host_mut().ended = true;
    assert_eq!(selector.tick(), TickDecision::Halt);
    assert_eq!(selector.state(), LoopState::Stopped);
    assert!(selector.view().unwrap().play_button);
}

#[test]
fn test_media_end_with_seeker_at_track_end_rewinds_to_window_start() {
    let mut selector = loaded(constrained(5.0, 200), 100.0);
    selector.drag_start(0.0);
    assert_eq!(selector.drag_move(500.0).unwrap(), Some(190.0));
    selector.drag_end();
    let window_start = selector.window().unwrap().start;
    assert!((window_start - 95.0).abs() < 1e-9);

    selector.play();
    selector.host_mut().current_time = 100.0;
    selector.host_mut().ended = true;

    assert_eq!(selector.tick(), TickDecision::StopAtBoundary);
    assert_eq!(selector.state(), LoopState::Stopped);
    assert!((selector.host().current_time - window_start).abs() < 1e-9);
    assert!(selector.host().paused);
    assert!(selector.view().unwrap().play_button);
}

#[test]
fn test_keyboard_steps_seeker_and_toggles_playback() {
    let mut selector = loaded(constrained(5.0, 200), 100.0);
    assert!(selector.key_down(&key_from_dom("ArrowRight"), false).unwrap());
    assert_eq!(selector.seeker().unwrap().left_px, 1.0);
    assert_eq!(selector.host().current_time, 0.5);

    assert!(selector.key_down(&key_from_dom("ArrowLeft"), false).unwrap());
    assert_eq!(selector.seeker().unwrap().left_px, 0.0);

    assert!(selector.key_down(&key_from_dom(" "), false).unwrap());
    assert_eq!(selector.state(), LoopState::Playing);
    assert!(!selector.key_down(&key_from_dom(" "), true).unwrap());
    assert_eq!(selector.state(), LoopState::Playing);
}

#[test]
fn test_keyboard_step_stops_at_track_end() {
    let mut selector = loaded(constrained(5.0, 200), 100.0);
    selector.drag_start(0.0);
    selector.drag_move(190.0).unwrap();
    selector.drag_end();
    let seeks = selector.host().seeks.len();
    assert_eq!(selector.step_seeker(StepDirection::Forward).unwrap(), None);
    assert_eq!(selector.host().seeks.len(), seeks);
}

#[test]
fn test_destroy_is_idempotent_and_releases_everything() {
    let mut selector = loaded(constrained(5.0, 200), 100.0);
    selector.drag_start(2.0);

    selector.destroy();
    selector.destroy();

    assert!(selector.is_destroyed());
    assert!(selector.view().is_none());
    assert!(selector.drag_session().is_none());
    assert!(selector.listeners().is_empty());
    assert!(selector.host().attached.is_empty());
    let detaches = selector
        .host()
        .listener_calls
        .iter()
        .filter(|(call, _)| *call == "detach")
        .count();
    assert_eq!(detaches, 3);
}

#[test]
fn test_destroy_detaches_previously_released_listeners_again() {
    let mut selector = loaded(constrained(5.0, 200), 100.0);
    selector.drag_start(2.0);
    selector.drag_end();
    selector.host_mut().listener_calls.clear();

    selector.destroy();
    let detached: Vec<ListenerKind> = selector
        .host()
        .listener_calls
        .iter()
        .map(|(_, kind)| *kind)
        .collect();
    assert_eq!(
        detached,
        vec![
            ListenerKind::DragMove,
            ListenerKind::DragEnd,
            ListenerKind::KeyDown
        ]
    );
}

#[test]
fn test_destroyed_selector_ignores_input() {
    let mut selector = loaded(constrained(5.0, 200), 100.0);
    selector.destroy();
    selector.play();
    selector.drag_start(1.0);
    assert_eq!(selector.state(), LoopState::Idle);
    assert!(selector.drag_session().is_none());
    assert_eq!(selector.tick(), TickDecision::Halt);
    assert!(!selector.key_down(&key_from_dom(" "), false).unwrap());
    assert!(selector.on_loaded().is_ok());
    assert!(selector.is_destroyed());
}
