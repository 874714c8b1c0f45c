use std::cell::RefCell;
use std::rc::Rc;

use prize_wheel_core::{SectorInput, SequenceSource, SpinStrategy, WheelError};
use prize_wheel_widget::*;

fn items(n: usize) -> Vec<SectorInput> {
    (0..n).map(|i| SectorInput::new(format!("Prize {i}"), format!("p{i}"))).collect()
}

fn five_turns() -> WheelOptions {
    WheelOptions { min_spins: 5, max_spins: 5, ..WheelOptions::default() }
}

fn wheel(n: usize, draws: &[f64]) -> WheelWidget<HeadlessSurface, SequenceSource> {
    WheelWidget::mount(
        Some(HeadlessSurface::new()),
        &items(n),
        five_turns(),
        SequenceSource::new(draws.iter().copied()),
    )
    .expect("target present")
}

#[test]
fn missing_target_builds_nothing() {
    let w: Option<WheelWidget<HeadlessSurface, SequenceSource>> =
        WheelWidget::mount(None, &items(4), WheelOptions::default(), SequenceSource::constant(0.5));
    assert!(w.is_none());
}

#[test]
fn backwards_idle_velocity_builds_nothing() {
    let opts = WheelOptions { idle_velocity: -5.0, ..WheelOptions::default() };
    let w = WheelWidget::mount(
        Some(HeadlessSurface::new()),
        &items(4),
        opts,
        SequenceSource::constant(0.5),
    );
    assert!(w.is_none());
}

#[test]
fn mount_renders_layout() {
    let w = wheel(4, &[]);
    let layout = w.surface().layout.as_ref().unwrap();
    assert_eq!(layout.paints.len(), 4);
    assert_eq!(layout.paints[3].data_sector, "p3");
    assert_eq!(w.surface().button_text, "Крутить");
    assert_eq!(w.strategy(), SpinStrategy::Uniform);
}

#[test]
fn empty_wheel_refuses_to_spin() {
    let mut w = wheel(0, &[]);
    assert_eq!(w.state().angular_width, 0.0);
    assert_eq!(w.spin().unwrap_err(), WheelError::NoSectors);
    assert!(!w.is_spinning());
    assert!(w.surface().animations.is_empty());
}

#[test]
fn eight_sector_spin_lands_on_last() {
    // spins draw is irrelevant (range is 5..=5); offset 0.125 -> 45 deg
    let mut w = wheel(8, &[0.0, 0.125]);
    w.start(0.0);

    let (ticket, mut done) = w.spin().unwrap().expect("spin started");
    assert!(w.is_spinning());
    assert!(!w.surface().spin_enabled);
    assert!(!w.is_idling());

    let anim = w.surface().last_animation().unwrap().clone();
    assert_eq!(anim.from, 0.0);
    assert_eq!(anim.to, 1845.0);
    assert_eq!(anim.duration_ms, 5000);
    assert_eq!(anim.easing, "cubic-bezier(0.25, 0.1, 0.25, 1)");

    let outcome = w.finish_spin(ticket, 5000.0).unwrap();
    assert_eq!(outcome.winning_index, 7);
    assert_eq!(w.state().current_rotation, 1845.0);
    assert_eq!(w.surface().rotation, 45.0);
    assert_eq!(w.surface().transform, "rotate(45deg)");
    assert_eq!(w.surface().result_attr.as_deref(), Some("p7"));
    assert_eq!(w.surface().alerts, vec!["Prize 7".to_string()]);
    assert_eq!(w.last_result().unwrap().value, "p7");
    assert!(w.surface().spin_enabled);
    assert!(!w.is_spinning());
    assert!(w.is_idling());
    assert_eq!(done.try_outcome().map(|o| o.winning_index), Some(7));
}

#[test]
fn second_trigger_while_spinning_is_ignored() {
    let mut w = wheel(8, &[0.0, 0.125, 0.0, 0.5]);
    let first = w.spin().unwrap();
    assert!(first.is_some());
    let state_before = w.state().clone();

    assert!(w.spin().unwrap().is_none());
    assert_eq!(w.state(), &state_before);
    assert_eq!(w.surface().animations.len(), 1);
}

#[test]
fn completion_is_accepted_once() {
    let mut w = wheel(8, &[0.0, 0.125]);
    let (ticket, _) = w.spin().unwrap().unwrap();
    let id = ticket.id();
    w.finish_spin(ticket, 0.0).unwrap();

    let err = w.finish_spin_id(id, 0.0).unwrap_err();
    assert_eq!(err, WheelError::StaleTicket { ticket: id, pending: None });
    assert_eq!(w.surface().alerts.len(), 1);
}

#[test]
fn foreign_completion_keeps_spinning() {
    let mut w = wheel(8, &[0.0, 0.125]);
    let (ticket, _) = w.spin().unwrap().unwrap();
    assert!(w.finish_spin_id(ticket.id() + 7, 0.0).is_err());
    assert!(w.is_spinning());
    assert_eq!(w.pending_spin(), Some(ticket.id()));
}

#[test]
fn idle_frames_advance_and_stop_on_spin() {
    let mut w = wheel(8, &[0.0, 0.0]);
    w.start(0.0);

    let t1 = w.surface().pending_frame.unwrap();
    assert!(w.on_frame(t1, 1000.0));
    let t2 = w.surface().pending_frame.unwrap();
    assert!(w.on_frame(t2, 2000.0));
    assert!((w.state().current_rotation - 40.0).abs() < 1e-9);

    // a frame already queued when the spin starts must not move the wheel
    let queued = w.surface().pending_frame.unwrap();
    w.spin().unwrap().unwrap();
    assert!(w.surface().cancelled_frames.contains(&queued));
    assert!(!w.on_frame(queued, 3000.0));
    assert!((w.state().current_rotation - 40.0).abs() < 1e-9);

    let anim = w.surface().last_animation().unwrap();
    assert!((anim.from - 40.0).abs() < 1e-9);
}

#[test]
fn idle_resumes_from_completion_time() {
    let mut w = wheel(8, &[0.0, 0.125]);
    w.start(0.0);
    let (ticket, _) = w.spin().unwrap().unwrap();
    w.finish_spin(ticket, 10_000.0).unwrap();

    let t = w.surface().pending_frame.unwrap();
    assert!(w.on_frame(t, 10_500.0));
    assert!((w.state().current_rotation - 1855.0).abs() < 1e-9);
}

#[test]
fn callback_receives_value_and_label() {
    let seen: Rc<RefCell<Vec<SpinResult>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();

    let mut w = wheel(8, &[0.0, 0.125]);
    w.on_result(move |r| sink.borrow_mut().push(r.clone()));
    let (ticket, _) = w.spin().unwrap().unwrap();
    w.finish_spin(ticket, 0.0).unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![SpinResult { value: "p7".into(), label: "Prize 7".into() }]
    );
    assert!(w.surface().alerts.is_empty());
    assert_eq!(w.surface().result_attr.as_deref(), Some("p7"));
}

#[test]
fn weighted_wheel_lands_on_drawn_sector() {
    let input = vec![
        SectorInput::new("Nothing", "none").with_chance(0.3),
        SectorInput::new("Car", "car").with_chance(0.7),
    ];
    let mut w = WheelWidget::mount(
        Some(HeadlessSurface::new()),
        &input,
        five_turns(),
        SequenceSource::new([0.5, 0.0, 0.9]),
    )
    .unwrap();
    assert_eq!(w.strategy(), SpinStrategy::Weighted);

    let (ticket, done) = w.spin().unwrap().unwrap();
    let outcome = w.finish_spin(ticket, 0.0).unwrap();
    assert_eq!(outcome.value, "car");
    assert_eq!(futures::executor::block_on(done).unwrap().value, "car");
    assert_eq!(prize_wheel_core::sector_at_angle(w.state().current_rotation, 2), Some(1));
}

#[test]
fn rotation_never_decreases_across_spins() {
    let mut w = WheelWidget::mount(
        Some(HeadlessSurface::new()),
        &items(5),
        WheelOptions::default(),
        prize_wheel_core::RngSource::seeded(42),
    )
    .unwrap();
    w.start(0.0);
    let mut last = 0.0;
    for round in 0..20 {
        let t = w.surface().pending_frame.unwrap();
        w.on_frame(t, round as f64 * 1000.0 + 16.0);
        let (ticket, _) = w.spin().unwrap().unwrap();
        let outcome = w.finish_spin(ticket, round as f64 * 1000.0 + 500.0).unwrap();
        let now = w.state().current_rotation;
        assert!(now >= last);
        assert!(outcome.winning_index < 5);
        last = now;
    }
}
