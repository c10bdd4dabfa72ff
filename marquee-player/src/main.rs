use clap::Parser;
use env_logger::{Builder, Target};
use log::LevelFilter;
use marquee_player::app::{self, AppConfig, ExitReason};
use marquee_player::cli::Args;

fn init_logger() {
    Builder::new()
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .filter_module("marquee_player", LevelFilter::Debug)
        .filter_module("marquee_core", LevelFilter::Debug)
        .init();
}

fn main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let args = Args::parse();
    let config = AppConfig::from_args(&args)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    match runtime.block_on(app::run(config))? {
        ExitReason::Back => {}
        ExitReason::Dismissed(reason) => {
            log::warn!("Player dismissed: {reason:?}");
        }
    }
    Ok(())
}
