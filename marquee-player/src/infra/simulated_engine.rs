//! Simulated playback engine
//!
//! Stands in for the native engine: accepts the same open/command/property
//! calls and reports load, progress, buffer, end and error events in seconds
//! from a tokio task, asynchronously with respect to the calls that caused
//! them.

use std::time::Duration;

use log::{debug, info, trace, warn};
use marquee_contracts::engine::VideoEngine;
use marquee_model::{
    EngineCommand, EngineError, EngineEvent, EngineProperty, LoadInfo,
    SourceRequest, TrackCatalog,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};

use crate::infra::constants::{simulation, timing};

/// Scripted behaviour of one simulated session
#[derive(Debug, Clone)]
pub struct SimulationScript {
    pub duration_secs: f64,
    pub tracks: TrackCatalog,
    pub load_delay: Duration,
    pub progress_interval: Duration,
    /// Stall once when playback reaches `.0` seconds, for `.1`
    pub stall: Option<(f64, Duration)>,
    /// Fail when playback reaches this position
    pub failure: Option<(f64, EngineError)>,
}

impl Default for SimulationScript {
    fn default() -> Self {
        Self {
            duration_secs: simulation::DEFAULT_DURATION_SECS,
            tracks: TrackCatalog::default(),
            load_delay: timing::LOAD_DELAY,
            progress_interval: timing::PROGRESS_INTERVAL,
            stall: None,
            failure: None,
        }
    }
}

#[derive(Debug, Clone)]
enum EngineRequest {
    Open(SourceRequest),
    Command(EngineCommand),
    Property(EngineProperty),
}

/// Handle owned by the screen. Calls are queued to the engine task.
#[derive(Debug)]
pub struct SimulatedEngine {
    requests: mpsc::UnboundedSender<EngineRequest>,
}

impl SimulatedEngine {
    /// Start the engine task. Events arrive on the returned receiver; the
    /// task ends once the handle is dropped.
    pub fn spawn(
        script: SimulationScript,
    ) -> (Self, mpsc::UnboundedReceiver<EngineEvent>, JoinHandle<()>) {
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(script, request_rx, event_tx));
        (
            Self {
                requests: request_tx,
            },
            event_rx,
            task,
        )
    }

    fn send(&self, request: EngineRequest) {
        if self.requests.send(request).is_err() {
            warn!("[Engine] Simulated engine has stopped; request dropped");
        }
    }
}

impl VideoEngine for SimulatedEngine {
    fn open(&mut self, request: &SourceRequest) {
        self.send(EngineRequest::Open(request.clone()));
    }

    fn dispatch(&mut self, command: EngineCommand) {
        self.send(EngineRequest::Command(command));
    }

    fn apply(&mut self, property: EngineProperty) {
        self.send(EngineRequest::Property(property));
    }
}

#[derive(Debug, Default)]
struct Playhead {
    opened: bool,
    /// Time left until the load report
    load_in: Option<Duration>,
    loaded: bool,
    playing: bool,
    ended: bool,
    failed: bool,
    position: f64,
    stall_left: Option<Duration>,
    stalled_once: bool,
}

async fn run(
    script: SimulationScript,
    mut requests: mpsc::UnboundedReceiver<EngineRequest>,
    events: mpsc::UnboundedSender<EngineEvent>,
) {
    let mut head = Playhead::default();
    let mut ticker = interval(script.progress_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let emit = |event: EngineEvent| {
        trace!("[Engine] -> {event:?}");
        // Receiver gone means the screen is gone
        let _ = events.send(event);
    };

    loop {
        tokio::select! {
            request = requests.recv() => {
                let Some(request) = request else {
                    debug!("[Engine] Handle dropped, stopping");
                    return;
                };
                handle_request(&script, &mut head, request, &emit);
            }
            _ = ticker.tick() => {
                advance(&script, &mut head, script.progress_interval, &emit);
            }
        }
    }
}

fn handle_request(
    script: &SimulationScript,
    head: &mut Playhead,
    request: EngineRequest,
    emit: &impl Fn(EngineEvent),
) {
    match request {
        EngineRequest::Open(source) => {
            info!(
                "[Engine] Opening {} ({} headers, drm: {})",
                source.source.url,
                source.source.headers.iter().count(),
                source
                    .drm
                    .as_ref()
                    .map_or("none", |drm| drm.drm_type.as_str())
            );
            head.opened = true;
            head.playing = !source.paused;
            head.load_in = Some(script.load_delay);
        }
        EngineRequest::Command(EngineCommand::Play) => {
            head.playing = true;
            head.ended = false;
        }
        EngineRequest::Command(EngineCommand::Pause) => head.playing = false,
        EngineRequest::Command(EngineCommand::Seek { seconds }) => {
            if !head.loaded {
                return;
            }
            head.position = seconds.clamp(0.0, script.duration_secs);
            head.ended = false;
            emit(EngineEvent::Progress {
                current_time: head.position,
            });
        }
        EngineRequest::Command(EngineCommand::SelectTrack { kind, directive }) => {
            info!("[Engine] {kind} track -> {directive:?}");
        }
        EngineRequest::Property(property) => {
            debug!("[Engine] Property {property:?}");
        }
    }
}

fn advance(
    script: &SimulationScript,
    head: &mut Playhead,
    step: Duration,
    emit: &impl Fn(EngineEvent),
) {
    if !head.opened || head.failed {
        return;
    }

    if let Some(left) = head.load_in {
        if left > step {
            head.load_in = Some(left - step);
            return;
        }
        head.load_in = None;
        head.loaded = true;
        emit(EngineEvent::Load(LoadInfo {
            duration: script.duration_secs,
            tracks: script.tracks.clone(),
        }));
        return;
    }

    if !head.loaded || !head.playing || head.ended {
        return;
    }

    if let Some(left) = head.stall_left {
        if left > step {
            head.stall_left = Some(left - step);
        } else {
            head.stall_left = None;
            emit(EngineEvent::Buffer {
                is_buffering: false,
            });
        }
        return;
    }

    if let Some((at, length)) = script.stall
        && !head.stalled_once
        && head.position >= at
    {
        head.stalled_once = true;
        head.stall_left = Some(length);
        emit(EngineEvent::Buffer { is_buffering: true });
        return;
    }

    if let Some((at, error)) = &script.failure
        && head.position >= *at
    {
        head.failed = true;
        emit(EngineEvent::Error(error.clone()));
        return;
    }

    head.position = (head.position + step.as_secs_f64()).min(script.duration_secs);
    emit(EngineEvent::Progress {
        current_time: head.position,
    });

    if head.position >= script.duration_secs {
        head.ended = true;
        head.playing = false;
        emit(EngineEvent::End);
    }
}
