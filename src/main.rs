//! Big Ball entry point
//!
//! Usage: `big-ball [settings.json] [--seed N] [--max-ticks N]`
//!
//! Runs the simulation until no Regular ball is left, pausing between
//! ticks, then prints the surviving balls as JSON.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let settings = match parse_args(std::env::args().skip(1)) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = run(&settings) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No native runner on the web; embedders drive `Simulation` directly
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_args(mut args: impl Iterator<Item = String>) -> big_ball::Result<big_ball::Settings> {
    use big_ball::{Settings, SimError};

    let mut path = None;
    let mut seed = None;
    let mut max_ticks = None;

    let parse_num = |flag: &str, value: Option<String>| -> big_ball::Result<u64> {
        value
            .as_deref()
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| SimError::InvalidSettings(format!("{} expects a number", flag)))
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => seed = Some(parse_num("--seed", args.next())?),
            "--max-ticks" => max_ticks = Some(parse_num("--max-ticks", args.next())?),
            flag if flag.starts_with("--") => {
                return Err(SimError::InvalidSettings(format!("unknown flag {}", flag)));
            }
            _ => path = Some(arg),
        }
    }

    let mut settings = match path {
        Some(path) => Settings::load(path)?,
        None => {
            log::info!("Using default settings");
            Settings::default()
        }
    };
    if let Some(seed) = seed {
        settings.seed = seed;
    }
    if max_ticks.is_some() {
        settings.max_ticks = max_ticks;
    }
    Ok(settings)
}

#[cfg(not(target_arch = "wasm32"))]
fn run(settings: &big_ball::Settings) -> big_ball::Result<()> {
    use big_ball::sim::{BallKind, RunOutcome, Simulation};
    use std::time::Duration;

    log::info!("Big Ball starting...");
    let mut sim = Simulation::new(settings)?;
    let pause = Duration::from_millis(settings.tick_interval_ms);

    let outcome = sim.run(settings.max_ticks, |surface| {
        log::trace!(
            "{} regular, {} monster, {} repellent",
            surface.count(BallKind::Regular),
            surface.count(BallKind::Monster),
            surface.count(BallKind::Repellent)
        );
        if !pause.is_zero() {
            std::thread::sleep(pause);
        }
    });

    match outcome {
        RunOutcome::Finished { ticks } => log::info!("Finished after {} ticks", ticks),
        RunOutcome::TickLimit { ticks } => log::warn!("Gave up after {} ticks", ticks),
    }

    let json = serde_json::to_string_pretty(&sim.surface().snapshot())?;
    println!("{}", json);
    Ok(())
}
