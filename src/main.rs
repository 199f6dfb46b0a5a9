#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

use std::env;

use anyhow::{bail, Context, Result};
use pollo::{
    app::{App, LogAudio, LogRenderer},
    constants::LOOP_TIME,
    formatter::TickFormatter,
    level::Level,
    systems::input::ScriptedInput,
};
use rand::{rngs::SmallRng, RngCore, SeedableRng};
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

/// Command line options of the headless driver.
#[derive(Debug, Default)]
struct Options {
    seed: Option<u64>,
    ticks: Option<u64>,
    realtime: bool,
    console: bool,
}

impl Options {
    fn parse(args: impl Iterator<Item = String>) -> Result<Self> {
        let mut options = Options::default();
        let mut args = args.skip(1);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" | "-s" => {
                    let value = args.next().context("--seed needs a value")?;
                    options.seed = Some(value.parse().with_context(|| format!("Invalid seed: {value}"))?);
                }
                "--ticks" | "-t" => {
                    let value = args.next().context("--ticks needs a value")?;
                    options.ticks = Some(value.parse().with_context(|| format!("Invalid tick count: {value}"))?);
                }
                "--realtime" | "-r" => options.realtime = true,
                "--console" | "-c" => options.console = true,
                other => bail!("Unknown argument: {other}"),
            }
        }
        Ok(options)
    }
}

fn init_tracing(console: bool) -> Result<()> {
    let subscriber = tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(!console).event_format(TickFormatter))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(subscriber).context("Could not set global default")?;
    Ok(())
}

/// The main entry point of the headless driver.
///
/// Plays the first level with a scripted input until the session ends or the tick limit is hit.
pub fn main() -> Result<()> {
    let options = Options::parse(env::args())?;
    init_tracing(options.console)?;

    let seed = options.seed.unwrap_or_else(|| SmallRng::from_os_rng().next_u64());
    let level = Level::level_one()?;

    let mut app = App::new(
        level,
        seed,
        Box::new(ScriptedInput::demo()),
        Box::new(LogRenderer::default()),
        Box::new(LogAudio),
    )?
    .realtime(options.realtime)
    .max_ticks(options.ticks);

    info!(seed, loop_time = ?LOOP_TIME, realtime = options.realtime, "Starting game loop");

    while app.run() {}

    info!(outcome = app.game.outcome().as_ref(), ticks = app.game.tick_count(), "Done");
    Ok(())
}
