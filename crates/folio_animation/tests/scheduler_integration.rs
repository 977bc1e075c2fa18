//! Integration tests for springs driven through the scheduler
//!
//! These tests verify that:
//! - Several springs advance in the same frame without interacting
//! - The loop stops on its own and resumes on retarget
//! - Reduced motion bypasses animation for widget-like consumers
//! - Scroll reveal and springs can run side by side
//! - Non-finite targets are ignored instead of spinning the loop

use std::time::{Duration, Instant};

use folio_animation::{
    advance_spring, AnimationScheduler, IntersectionOptions, MotionPreference, PointerEvent,
    PressAnimation, Rect, RevealObserver, RevealTransition, Spring, SpringConfig, SpringGroup,
    SpringState,
};

const FRAME: Duration = Duration::from_millis(16);

fn run_until_idle(scheduler: &mut AnimationScheduler, start: Instant) -> u32 {
    let mut frame = 0;
    while scheduler.tick_at(start + FRAME * frame) {
        frame += 1;
        assert!(frame < 2000, "scheduler never went idle");
    }
    frame
}

#[test]
fn test_independent_springs_in_one_frame() {
    let mut scheduler = AnimationScheduler::new();
    let scale = scheduler.add_spring(Spring::new(SpringConfig::snappy(), 1.0));
    let opacity = scheduler.add_spring(Spring::new(SpringConfig::gentle(), 1.0));

    // Initially no active animations (springs at target)
    assert!(!scheduler.has_active_animations());

    scheduler.set_target(scale, 1.5);
    scheduler.set_target(opacity, 0.5);
    assert!(scheduler.has_active_animations());

    run_until_idle(&mut scheduler, Instant::now());

    let scale = scheduler.get_spring(scale).unwrap();
    let opacity = scheduler.get_spring(opacity).unwrap();
    assert!(scale.is_settled());
    assert!(opacity.is_settled());
    assert_eq!(scale.value(), 1.5);
    assert_eq!(opacity.value(), 0.5);
}

#[test]
fn test_scheduler_matches_pure_integrator() {
    let config = SpringConfig::new(400.0, 25.0, 0.5).unwrap();
    let mut scheduler = AnimationScheduler::new();
    let id = scheduler.add_spring(Spring::new(config, 0.0));
    scheduler.set_target(id, 100.0);

    let start = Instant::now();
    let mut expected = SpringState::at_rest(0.0);
    for frame in 0..10u32 {
        scheduler.tick_at(start + FRAME * frame);
        // First frame uses 1/60s, later ones the measured 16ms
        let dt = if frame == 0 { 1.0 / 60.0 } else { 0.016 };
        expected = advance_spring(expected, 100.0, dt, &config).state;
    }

    let actual = scheduler.get_spring(id).unwrap().state();
    assert!((actual.value - expected.value).abs() < 1e-9);
    assert!((actual.velocity - expected.velocity).abs() < 1e-9);
}

#[test]
fn test_frame_hiccup_is_clamped() {
    let mut scheduler = AnimationScheduler::new();
    let id = scheduler.add_spring(Spring::new(SpringConfig::default(), 0.0));
    scheduler.set_target(id, 1.0);

    let start = Instant::now();
    scheduler.tick_at(start);
    // A two second stall must not blow the spring up
    scheduler.tick_at(start + Duration::from_secs(2));

    let value = scheduler.get_spring(id).unwrap().value();
    assert!(value.is_finite());
    assert!(value > 0.0 && value < 2.0);
}

#[test]
fn test_non_finite_target_does_not_keep_the_loop_alive() {
    let mut scheduler = AnimationScheduler::new();
    let id = scheduler.add_spring(Spring::new(SpringConfig::default(), 0.0));

    assert!(scheduler.set_target(id, f64::NAN));
    assert!(!scheduler.is_running());

    scheduler.set_target(id, 1.0);
    scheduler.set_target(id, f64::INFINITY);
    let frames = run_until_idle(&mut scheduler, Instant::now());
    assert!(frames > 0);

    let spring = scheduler.get_spring(id).unwrap();
    assert_eq!(spring.value(), 1.0);
    assert!(!scheduler.has_active_animations());
}

#[test]
fn test_group_and_spring_share_the_loop() {
    let mut scheduler = AnimationScheduler::new();
    let spring = scheduler.add_spring(Spring::new(SpringConfig::stiff(), 0.0));
    let group = scheduler.add_group(SpringGroup::with_values(
        SpringConfig::stiff(),
        [("x", 0.0), ("y", 0.0)],
    ));

    scheduler.set_target(spring, 3.0);
    scheduler.set_group_target(group, "x", 12.0);
    run_until_idle(&mut scheduler, Instant::now());

    assert_eq!(scheduler.get_spring(spring).unwrap().value(), 3.0);
    let group = scheduler.get_group(group).unwrap();
    assert_eq!(group.value("x"), Some(12.0));
    assert_eq!(group.value("y"), Some(0.0));
}

#[test]
fn test_press_animation_respects_reduced_motion_switch() {
    let mut button = PressAnimation::default();
    button.handle(PointerEvent::Enter);
    button.update(1.0 / 60.0);
    assert!(button.scale() > 1.0 && button.scale() < 1.05);

    button.set_preference(MotionPreference::Reduce);
    assert_eq!(button.scale(), 1.05);

    button.handle(PointerEvent::Down);
    assert_eq!(button.scale(), 0.95);
}

#[test]
fn test_staggered_reveal_of_three_cards() {
    let viewport = Rect::new(0.0, 0.0, 1024.0, 768.0);
    let mut observer = RevealObserver::new(3, IntersectionOptions::reveal_card());
    let cards = [
        Rect::new(100.0, 200.0, 600.0, 150.0),
        Rect::new(100.0, 400.0, 600.0, 150.0),
        Rect::new(100.0, 900.0, 600.0, 150.0),
    ];

    assert_eq!(observer.update(&cards, &viewport), vec![0, 1]);

    let transitions: Vec<_> = (0..3)
        .map(|i| RevealTransition::default().staggered(i, 100.0))
        .collect();

    // 50ms after coming into view the first card has started, the second has not
    let first = transitions[0].style(Some(50.0), MotionPreference::NoPreference);
    let second = transitions[1].style(Some(50.0), MotionPreference::NoPreference);
    assert!(first.opacity > 0.0);
    assert_eq!(second.opacity, 0.0);

    // The third card is still below the fold
    assert!(!observer.is_visible(2));
    let third = transitions[2].style(None, MotionPreference::NoPreference);
    assert_eq!(third.opacity, 0.0);
}
