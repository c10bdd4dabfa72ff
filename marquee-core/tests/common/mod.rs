//! Shared fakes and fixtures for screen-level tests
//!
//! The recording engine and counting registry are hand-written because the
//! tests assert on exact sequences and live subscription counts. Device chrome
//! and host navigation use the mockall mocks from `marquee-contracts`.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use marquee_contracts::back::{
    BackDisposition, BackHandler, BackHandlerRegistry, SubscriptionId,
};
use marquee_contracts::device::{Orientation, OrientationGuard};
use marquee_contracts::engine::VideoEngine;
use marquee_contracts::host::HostNavigator;
use marquee_contracts::{MockHostNavigator, MockOrientationGuard};
use marquee_core::{Platform, PlayerScreen};
use marquee_model::{
    EngineCommand, EngineEvent, EngineProperty, LoadInfo, PlaybackSession,
    PlayerFeatures, RouteParams, SourceRequest, Track, TrackCatalog,
};

/// Everything the screen sent to the engine, in order
#[derive(Debug, Default)]
pub struct EngineLog {
    pub opened: Vec<SourceRequest>,
    pub commands: Vec<EngineCommand>,
    pub properties: Vec<EngineProperty>,
}

impl EngineLog {
    pub fn clear(&mut self) {
        self.opened.clear();
        self.commands.clear();
        self.properties.clear();
    }

    pub fn track_commands(&self) -> Vec<EngineCommand> {
        self.commands
            .iter()
            .filter(|command| matches!(command, EngineCommand::SelectTrack { .. }))
            .copied()
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingEngine {
    pub log: Rc<RefCell<EngineLog>>,
}

impl VideoEngine for RecordingEngine {
    fn open(&mut self, request: &SourceRequest) {
        self.log.borrow_mut().opened.push(request.clone());
    }

    fn dispatch(&mut self, command: EngineCommand) {
        self.log.borrow_mut().commands.push(command);
    }

    fn apply(&mut self, property: EngineProperty) {
        self.log.borrow_mut().properties.push(property);
    }
}

/// Back handler registry that keeps handlers so tests can press back and
/// count live subscriptions.
#[derive(Default)]
pub struct CountingRegistry {
    handlers: RefCell<Vec<(SubscriptionId, BackHandler)>>,
    next: Cell<u64>,
    pub subscribed: Cell<usize>,
    pub unsubscribed: Cell<usize>,
}

impl CountingRegistry {
    pub fn live(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Run every handler the way the host does on a hardware back press.
    pub fn press_back(&self) -> Vec<BackDisposition> {
        self.handlers
            .borrow_mut()
            .iter_mut()
            .map(|(_, handler)| handler())
            .collect()
    }
}

impl BackHandlerRegistry for CountingRegistry {
    fn subscribe(&self, handler: BackHandler) -> SubscriptionId {
        self.next.set(self.next.get() + 1);
        self.subscribed.set(self.subscribed.get() + 1);
        let id = SubscriptionId::new(self.next.get());
        self.handlers.borrow_mut().push((id, handler));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        let removed = handlers.len() != before;
        if removed {
            self.unsubscribed.set(self.unsubscribed.get() + 1);
        }
        removed
    }
}

/// Device mock that accepts any number of chrome calls.
pub fn lenient_device() -> MockOrientationGuard {
    let mut device = MockOrientationGuard::new();
    device.expect_lock().returning(|_| ());
    device.expect_hide_navigation_bar().returning(|| ());
    device.expect_show_navigation_bar().returning(|| ());
    device
}

/// Host mock that must never be asked to dismiss.
pub fn quiet_host() -> MockHostNavigator {
    let mut host = MockHostNavigator::new();
    host.expect_dismiss().never();
    host
}

pub struct Harness {
    pub screen: PlayerScreen,
    pub engine: Rc<RefCell<EngineLog>>,
    pub registry: Rc<CountingRegistry>,
    pub start: Instant,
}

impl Harness {
    pub fn new(features: PlayerFeatures) -> Self {
        Self::with_platform(features, lenient_device(), quiet_host())
    }

    pub fn with_platform(
        features: PlayerFeatures,
        device: impl OrientationGuard + 'static,
        host: impl HostNavigator + 'static,
    ) -> Self {
        let engine = RecordingEngine::default();
        let log = Rc::clone(&engine.log);
        let registry = Rc::new(CountingRegistry::default());
        let platform = Platform {
            device: Rc::new(device),
            back: registry.clone(),
            host: Rc::new(host),
        };
        let screen =
            PlayerScreen::new(session(), features, Box::new(engine), platform);
        Self {
            screen,
            engine: log,
            registry,
            start: Instant::now(),
        }
    }

    /// Mounted, loaded with `duration` seconds and the sample catalog, at
    /// `position` seconds, engine log cleared.
    pub fn loaded(features: PlayerFeatures, duration: f64, position: f64) -> Self {
        let mut harness = Self::new(features);
        harness.mount_and_load(duration, position);
        harness
    }

    pub fn mount_and_load(&mut self, duration: f64, position: f64) {
        self.screen.mount().unwrap();
        self.event(load_event(duration));
        self.event(EngineEvent::Progress {
            current_time: position,
        });
        self.engine.borrow_mut().clear();
    }

    pub fn event(&mut self, event: EngineEvent) {
        self.screen.handle_engine_event(event, self.start);
    }

    pub fn event_at(&mut self, event: EngineEvent, after: Duration) {
        self.screen.handle_engine_event(event, self.start + after);
    }

    pub fn tick_at(&mut self, after: Duration) -> bool {
        self.screen.tick(self.start + after)
    }
}

pub fn session() -> PlaybackSession {
    RouteParams::new("https://cdn.example.com/show/master.m3u8")
        .into_session()
        .unwrap()
}

pub fn catalog() -> TrackCatalog {
    TrackCatalog {
        audio: vec![
            Track::new(0).with_language("en").with_codec("aac").with_channels(2),
            Track::new(1).with_language("de").with_codec("ac3").with_channels(6),
            Track::new(2).with_language("es").with_codec("eac3").with_channels(6),
        ],
        video: vec![
            Track::new(0).with_height(1080).with_bitrate(6_000_000),
            Track::new(1).with_height(720).with_bitrate(3_000_000),
        ],
        text: vec![
            Track::new(0).with_language("en").with_codec("text/vtt"),
            Track::new(1).with_language("fr").with_codec("application/x-subrip"),
        ],
    }
}

pub fn load_event(duration: f64) -> EngineEvent {
    EngineEvent::Load(LoadInfo {
        duration,
        tracks: catalog(),
    })
}

pub fn landscape(orientation: &Orientation) -> bool {
    *orientation == Orientation::Landscape
}

pub fn portrait(orientation: &Orientation) -> bool {
    *orientation == Orientation::Portrait
}
