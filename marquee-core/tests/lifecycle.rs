//! Device chrome and hardware back across mount and unmount.

mod common;

use common::{CountingRegistry, Harness, landscape, portrait, quiet_host};
use marquee_contracts::MockOrientationGuard;
use marquee_contracts::back::BackDisposition;
use marquee_core::LifecycleError;
use marquee_model::PlayerFeatures;
use mockall::Sequence;
use mockall::predicate::function;

/// Expects the full chrome round trip exactly once, in order.
fn strict_device() -> MockOrientationGuard {
    let mut seq = Sequence::new();
    let mut device = MockOrientationGuard::new();
    device
        .expect_lock()
        .with(function(landscape))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| ());
    device
        .expect_hide_navigation_bar()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| ());
    device
        .expect_lock()
        .with(function(portrait))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| ());
    device
        .expect_show_navigation_bar()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| ());
    device
}

fn harness() -> Harness {
    Harness::with_platform(PlayerFeatures::default(), strict_device(), quiet_host())
}

#[test]
fn mount_unmount_issues_each_chrome_call_once_without_leaks() {
    let harness = harness();
    let registry = harness.registry.clone();
    let Harness { mut screen, .. } = harness;

    let before = registry.live();
    screen.mount().unwrap();
    assert_eq!(registry.live(), before + 1);
    assert!(screen.is_mounted());

    screen.unmount().unwrap();
    assert_eq!(registry.live(), before);
    assert_eq!(registry.subscribed.get(), 1);
    assert_eq!(registry.unsubscribed.get(), 1);
}

#[test]
fn hardware_back_restores_and_is_not_consumed() {
    let harness = harness();
    let registry = harness.registry.clone();
    let Harness { mut screen, .. } = harness;
    screen.mount().unwrap();

    assert_eq!(registry.press_back(), vec![BackDisposition::NotConsumed]);
    // Host pops the screen; restoring again must not repeat the calls
    screen.unmount().unwrap();
    assert_eq!(registry.live(), 0);
}

#[test]
fn direct_back_then_unmount_restores_once() {
    let harness = harness();
    let Harness { mut screen, .. } = harness;
    screen.mount().unwrap();
    assert_eq!(screen.hardware_back(), BackDisposition::NotConsumed);
    assert_eq!(screen.hardware_back(), BackDisposition::NotConsumed);
    screen.unmount().unwrap();
}

#[test]
fn dropping_a_mounted_screen_releases_everything() {
    let harness = harness();
    let registry: std::rc::Rc<CountingRegistry> = harness.registry.clone();
    let Harness { mut screen, .. } = harness;
    screen.mount().unwrap();
    drop(screen);
    assert_eq!(registry.live(), 0);
    assert_eq!(registry.unsubscribed.get(), 1);
}

#[test]
fn second_mount_is_rejected_without_side_effects() {
    let harness = harness();
    let registry = harness.registry.clone();
    let engine = harness.engine.clone();
    let Harness { mut screen, .. } = harness;

    screen.mount().unwrap();
    assert_eq!(screen.mount(), Err(LifecycleError::AlreadyMounted));
    assert_eq!(registry.subscribed.get(), 1);
    assert_eq!(engine.borrow().opened.len(), 1);
    screen.unmount().unwrap();
}
