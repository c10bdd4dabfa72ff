use std::time::Duration;

use marquee_contracts::engine::VideoEngine;
use marquee_model::{
    EngineCommand, EngineError, EngineEvent, RouteParams, SourceRequest,
    TrackCatalog,
};
use marquee_player::cli::demo_catalog;
use marquee_player::infra::simulated_engine::{SimulatedEngine, SimulationScript};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::timeout;

fn request() -> SourceRequest {
    let session = RouteParams::new("https://cdn.example.com/show/master.m3u8")
        .into_session()
        .unwrap();
    SourceRequest::for_session(&session, false)
}

fn script(duration_secs: f64) -> SimulationScript {
    SimulationScript {
        duration_secs,
        tracks: demo_catalog(),
        load_delay: Duration::from_millis(300),
        progress_interval: Duration::from_millis(250),
        ..SimulationScript::default()
    }
}

async fn next(events: &mut UnboundedReceiver<EngineEvent>) -> EngineEvent {
    timeout(Duration::from_secs(30), events.recv())
        .await
        .expect("engine went quiet")
        .expect("engine stopped")
}

async fn until_end(events: &mut UnboundedReceiver<EngineEvent>) -> Vec<EngineEvent> {
    let mut seen = Vec::new();
    loop {
        let event = next(events).await;
        let done = matches!(event, EngineEvent::End | EngineEvent::Error(_));
        seen.push(event);
        if done {
            return seen;
        }
    }
}

#[tokio::test(start_paused = true)]
async fn reports_load_then_progress_until_end() {
    let (mut engine, mut events, task) = SimulatedEngine::spawn(script(2.0));
    engine.open(&request());

    let seen = until_end(&mut events).await;
    let EngineEvent::Load(info) = &seen[0] else {
        panic!("expected load first, got {:?}", seen[0]);
    };
    assert_eq!(info.duration, 2.0);
    assert_eq!(info.tracks, demo_catalog());

    let positions: Vec<f64> = seen
        .iter()
        .filter_map(|event| match event {
            EngineEvent::Progress { current_time } => Some(*current_time),
            _ => None,
        })
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    assert_eq!(positions.last(), Some(&2.0));
    assert_eq!(seen.last(), Some(&EngineEvent::End));

    drop(engine);
    task.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn nothing_happens_before_open() {
    let (_engine, mut events, _task) = SimulatedEngine::spawn(script(2.0));
    assert!(
        timeout(Duration::from_secs(5), events.recv())
            .await
            .is_err()
    );
}

#[tokio::test(start_paused = true)]
async fn paused_open_loads_without_progress() {
    let (mut engine, mut events, _task) = SimulatedEngine::spawn(SimulationScript {
        tracks: TrackCatalog::default(),
        ..script(2.0)
    });
    let mut paused = request();
    paused.paused = true;
    engine.open(&paused);

    assert!(matches!(next(&mut events).await, EngineEvent::Load(_)));
    assert!(
        timeout(Duration::from_secs(5), events.recv())
            .await
            .is_err()
    );

    engine.dispatch(EngineCommand::Seek { seconds: 1.5 });
    assert_eq!(
        next(&mut events).await,
        EngineEvent::Progress { current_time: 1.5 }
    );

    engine.dispatch(EngineCommand::Play);
    assert_eq!(until_end(&mut events).await.last(), Some(&EngineEvent::End));
}

#[tokio::test(start_paused = true)]
async fn scripted_stall_buffers_once() {
    let (mut engine, mut events, _task) = SimulatedEngine::spawn(SimulationScript {
        stall: Some((0.5, Duration::from_secs(1))),
        ..script(1.5)
    });
    engine.open(&request());

    let seen = until_end(&mut events).await;
    let buffering: Vec<bool> = seen
        .iter()
        .filter_map(|event| match event {
            EngineEvent::Buffer { is_buffering } => Some(*is_buffering),
            _ => None,
        })
        .collect();
    assert_eq!(buffering, vec![true, false]);
    assert_eq!(seen.last(), Some(&EngineEvent::End));
}

#[tokio::test(start_paused = true)]
async fn scripted_failure_stops_reporting() {
    let failure = EngineError::new(Some(6004), "license request failed");
    let (mut engine, mut events, _task) = SimulatedEngine::spawn(SimulationScript {
        failure: Some((0.5, failure.clone())),
        ..script(10.0)
    });
    engine.open(&request());

    let seen = until_end(&mut events).await;
    assert_eq!(seen.last(), Some(&EngineEvent::Error(failure)));
    assert!(
        timeout(Duration::from_secs(5), events.recv())
            .await
            .is_err()
    );
}
