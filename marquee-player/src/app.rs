//! Console runtime
//!
//! Drives one [`PlayerScreen`] from three sources: engine events, terminal
//! lines and a timer. Everything is funnelled through [`update`] on a single
//! thread.

use std::time::Instant;

use anyhow::Context;
use log::{debug, info, warn};
use marquee_config::{FeaturesLoad, FeaturesLoader};
use marquee_contracts::host::DismissReason;
use marquee_core::PlayerScreen;
use marquee_model::{PlayerFeatures, RouteParams};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{MissedTickBehavior, interval};

use crate::cli::Args;
use crate::domains::player::commands::{self, Command, HELP};
use crate::domains::player::{Message, PlayerView, update};
use crate::infra::console::ConsolePlatform;
use crate::infra::constants::timing;
use crate::infra::simulated_engine::{SimulatedEngine, SimulationScript};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub route: RouteParams,
    pub features: PlayerFeatures,
    pub script: SimulationScript,
}

impl AppConfig {
    /// Resolve route parameters from the command line and features from the
    /// environment and config files under `--config-root`.
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        let route = args.route_params()?;
        let FeaturesLoad { features, .. } = FeaturesLoader::new()
            .with_root(&args.config_root)
            .load()
            .context("failed to load player features")?;

        Ok(Self {
            route,
            features,
            script: args.script(),
        })
    }
}

/// How the screen was left
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitReason {
    /// Hardware back or end of input
    Back,
    /// The screen asked the host to pop it
    Dismissed(DismissReason),
}

pub async fn run(config: AppConfig) -> anyhow::Result<ExitReason> {
    let AppConfig {
        route,
        features,
        script,
    } = config;
    let session = route
        .into_session()
        .context("route parameters rejected")?;

    let (engine, mut events, engine_task) = SimulatedEngine::spawn(script);
    let console = ConsolePlatform::new();
    let mut screen =
        PlayerScreen::new(session, features, Box::new(engine), console.platform());
    screen.mount()?;
    println!("{}", PlayerView::from_screen(&screen));
    println!("type `h` for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut input_open = true;
    let mut ticker = interval(timing::TICK_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let reason = loop {
        let message = tokio::select! {
            Some(event) = events.recv() => Message::Engine(event, Instant::now()),
            line = lines.next_line(), if input_open => {
                match line.context("failed to read terminal input")? {
                    Some(line) => match commands::parse(&line) {
                        Ok(Command::Send(message)) => message,
                        Ok(Command::Show) => {
                            println!("{}", PlayerView::from_screen(&screen));
                            continue;
                        }
                        Ok(Command::Help) => {
                            println!("{HELP}");
                            continue;
                        }
                        Err(err) => {
                            println!("{err}");
                            continue;
                        }
                    },
                    None => {
                        debug!("Input closed, leaving the player");
                        input_open = false;
                        Message::HardwareBack
                    }
                }
            }
            _ = ticker.tick() => Message::Tick(Instant::now()),
        };

        let result = update(&mut screen, message);
        if let Some(dismissal) = console.host.take_dismissal() {
            println!("{}", PlayerView::from_screen(&screen));
            break ExitReason::Dismissed(dismissal);
        }
        if result.exit {
            break ExitReason::Back;
        }
        if result.redraw {
            println!("{}", PlayerView::from_screen(&screen));
        }
    };

    screen.unmount()?;
    if let Err(err) = engine_task.await {
        warn!("Simulated engine task ended abnormally: {err}");
    }
    info!("Player closed: {reason:?}");
    Ok(reason)
}
