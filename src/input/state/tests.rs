use super::*;
use crate::config::KeybindingsConfig;
use crate::draw::testing::{Call, RecordingSurface};
use crate::draw::{Palette, Transition, WHITE};
use crate::input::{DrawingMode, Key, SessionSettings};
use crate::touch::{TouchEvent, TouchPoint};

fn create_test_input_state(mode: DrawingMode) -> InputState {
    let action_map = KeybindingsConfig::default().build_action_map().unwrap();
    InputState::with_defaults(
        SessionSettings {
            mode,
            stroke_width: 3,
        },
        action_map,
        Palette::default(),
        WHITE,
    )
}

/// Render once to consume the initial full repaint.
fn settle(state: &mut InputState, surface: &mut RecordingSurface) {
    state.render(surface);
    surface.take();
}

#[test]
fn end_to_end_free_draw_stroke() {
    let mut state = create_test_input_state(DrawingMode::FreeDraw);
    let mut surface = RecordingSurface::new(1000, 500);
    settle(&mut state, &mut surface);

    state.on_touch(TouchEvent::began(7, 0.1, 0.1));
    state.on_touch(TouchEvent::moved(7, 0.2, 0.1));
    state.on_touch(TouchEvent::moved(7, 0.3, 0.1));
    state.on_touch(TouchEvent::ended(7, 0.3, 0.1));

    assert!(state.registry.active().is_empty());
    assert_eq!(state.registry.finished_len(), 1);
    let stroke = &state.registry.finished()[0];
    assert_eq!(
        stroke.points(),
        &[
            TouchPoint::new(0.1, 0.1),
            TouchPoint::new(0.2, 0.1),
            TouchPoint::new(0.3, 0.1)
        ]
    );

    state.on_expose();
    assert_eq!(state.render(&mut surface), RedrawKind::Full);
    let calls = surface.take();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], Call::Clear(WHITE));
    assert_eq!(
        calls[1].polyline_points(),
        vec![(100.0, 50.0), (200.0, 50.0), (300.0, 50.0)]
    );
}

#[test]
fn live_movement_draws_only_new_segments() {
    let mut state = create_test_input_state(DrawingMode::FreeDraw);
    let mut surface = RecordingSurface::new(1000, 500);
    settle(&mut state, &mut surface);

    state.on_touch(TouchEvent::began(7, 0.1, 0.1));
    assert_eq!(state.render(&mut surface), RedrawKind::Incremental);
    assert_eq!(surface.take()[0].polyline_points(), vec![(100.0, 50.0)]);

    state.on_touch(TouchEvent::moved(7, 0.2, 0.1));
    state.render(&mut surface);
    assert_eq!(
        surface.take()[0].polyline_points(),
        vec![(100.0, 50.0), (200.0, 50.0)]
    );

    state.on_touch(TouchEvent::moved(7, 0.3, 0.1));
    state.render(&mut surface);
    assert_eq!(
        surface.take()[0].polyline_points(),
        vec![(200.0, 50.0), (300.0, 50.0)]
    );

    assert_eq!(state.render(&mut surface), RedrawKind::Skipped);
    assert!(surface.take().is_empty());
}

#[test]
fn contact_keeps_one_color_until_it_ends() {
    let mut state = create_test_input_state(DrawingMode::FreeDraw);
    let mut surface = RecordingSurface::new(640, 480);
    settle(&mut state, &mut surface);

    let expected = state.renderer.palette().color_for(7);
    state.on_touch(TouchEvent::began(7, 0.1, 0.1));
    state.on_touch(TouchEvent::began(8, 0.9, 0.9));
    state.render(&mut surface);
    for x in [0.2, 0.3, 0.4] {
        state.on_touch(TouchEvent::moved(7, x, 0.1));
        state.on_touch(TouchEvent::moved(8, 0.9, x));
        state.render(&mut surface);
    }
    state.on_expose();
    state.render(&mut surface);

    let calls = surface.take();
    let seven: Vec<_> = calls
        .iter()
        .filter(|c| matches!(c, Call::Polyline(points, _, _) if points[0].y == 48.0))
        .collect();
    assert!(seven.len() >= 4);
    assert!(seven.iter().all(|c| c.color() == expected));
}

#[test]
fn polyline_mode_new_gesture_wipes_previous() {
    let mut state = create_test_input_state(DrawingMode::PolylineOnly);
    let mut surface = RecordingSurface::new(100, 100);
    settle(&mut state, &mut surface);

    state.on_touch(TouchEvent::began(1, 0.1, 0.1));
    state.on_touch(TouchEvent::ended(1, 0.1, 0.1));
    state.render(&mut surface);
    surface.take();

    let transition = state.on_touch(TouchEvent::began(2, 0.5, 0.5));
    assert!(transition.clears_surface());
    assert!(state.registry.finished().is_empty());

    assert_eq!(state.render(&mut surface), RedrawKind::Full);
    let calls = surface.take();
    assert_eq!(calls[0], Call::Clear(WHITE));
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].polyline_points(), vec![(50.0, 50.0)]);
}

#[test]
fn switching_to_free_draw_stops_wiping() {
    let mut state = create_test_input_state(DrawingMode::DotOnly);
    state.on_key_press(Key::Char('d'));
    assert_eq!(state.settings().mode, DrawingMode::FreeDraw);

    state.on_touch(TouchEvent::began(1, 0.1, 0.1));
    state.on_touch(TouchEvent::ended(1, 0.1, 0.1));
    state.on_touch(TouchEvent::began(2, 0.5, 0.5));
    assert_eq!(state.registry.finished_len(), 1);
}

#[test]
fn orphan_touch_still_requests_redraw_but_changes_nothing() {
    let mut state = create_test_input_state(DrawingMode::FreeDraw);
    let mut surface = RecordingSurface::new(100, 100);
    settle(&mut state, &mut surface);

    assert_eq!(state.on_touch(TouchEvent::moved(3, 0.5, 0.5)), Transition::Ignored);
    assert!(state.needs_redraw);
    assert!(state.idle);
    assert_eq!(state.render(&mut surface), RedrawKind::Incremental);
    assert!(surface.take().is_empty());
}

#[test]
fn idle_flag_tracks_active_contacts() {
    let mut state = create_test_input_state(DrawingMode::FreeDraw);
    assert!(state.idle);
    state.on_touch(TouchEvent::began(1, 0.1, 0.1));
    assert!(!state.idle);
    state.on_touch(TouchEvent::began(2, 0.2, 0.2));
    state.on_touch(TouchEvent::ended(1, 0.1, 0.1));
    assert!(!state.idle);
    state.on_touch(TouchEvent::ended(2, 0.2, 0.2));
    assert!(state.idle);
}

#[test]
fn clear_key_drops_everything_and_requests_blank_repaint() {
    let mut state = create_test_input_state(DrawingMode::FreeDraw);
    let mut surface = RecordingSurface::new(100, 100);
    settle(&mut state, &mut surface);

    state.on_touch(TouchEvent::began(1, 0.1, 0.1));
    state.on_touch(TouchEvent::ended(1, 0.1, 0.1));
    state.on_touch(TouchEvent::began(2, 0.1, 0.1));
    state.on_key_press(Key::Space);

    assert!(state.registry.active().is_empty());
    assert!(state.registry.finished().is_empty());
    assert!(state.idle);
    assert_eq!(state.render(&mut surface), RedrawKind::Full);
    assert_eq!(surface.take(), vec![Call::Clear(WHITE)]);
}

#[test]
fn width_keys_adjust_and_floor() {
    let mut state = create_test_input_state(DrawingMode::FreeDraw);
    state.on_key_press(Key::Char('h'));
    assert_eq!(state.settings().stroke_width, 4);
    for _ in 0..10 {
        state.on_key_press(Key::Char('t'));
    }
    assert_eq!(state.settings().stroke_width, 1);
}

#[test]
fn width_change_applies_on_next_draw() {
    let mut state = create_test_input_state(DrawingMode::FreeDraw);
    let mut surface = RecordingSurface::new(100, 100);
    settle(&mut state, &mut surface);

    state.on_touch(TouchEvent::began(1, 0.1, 0.1));
    state.on_key_press(Key::Char('h'));
    state.render(&mut surface);
    match &surface.take()[0] {
        Call::Polyline(_, _, width) => assert_eq!(*width, 4.0),
        other => panic!("expected polyline, got {:?}", other),
    }
}

#[test]
fn escape_and_ctrl_q_request_exit() {
    let mut state = create_test_input_state(DrawingMode::FreeDraw);
    state.on_key_press(Key::Escape);
    assert!(state.should_exit);

    let mut state = create_test_input_state(DrawingMode::FreeDraw);
    state.on_key_press(Key::Char('q'));
    assert!(!state.should_exit);
    state.on_key_press(Key::Ctrl);
    state.on_key_press(Key::Char('q'));
    assert!(state.should_exit);
}

#[test]
fn released_modifier_no_longer_applies() {
    let mut state = create_test_input_state(DrawingMode::FreeDraw);
    state.on_key_press(Key::Ctrl);
    state.on_key_release(Key::Ctrl);
    state.on_key_press(Key::Char('l'));
    assert_eq!(state.settings().mode, DrawingMode::PolylineOnly);
}
