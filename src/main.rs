use std::{env, io, process};

use tracing::debug;
use tracing_subscriber::EnvFilter;

mod bus;
mod driver;
mod monitor;
mod orientation;

use bus::I2cBus;
use driver::st::lis3::{Error, Lis3, Strictness, DEFAULT_ADDRESS};
use driver::ThreadDelay;

struct Args {
    bus: u32,
    looping: bool,
    strictness: Strictness,
}

impl Args {
    /// `[--strict] <i2cbus> [loop]`. Anything other than `loop` in the
    /// second positional slot is accepted and ignored.
    fn parse(argv: impl Iterator<Item = String>) -> Option<Args> {
        let mut strictness = Strictness::Permissive;
        let mut positional = Vec::new();

        for arg in argv {
            if arg == "--strict" {
                strictness = Strictness::Strict;
            } else {
                positional.push(arg);
            }
        }

        let bus = positional.first()?.parse().ok()?;
        let looping = positional.get(1).map_or(false, |arg| arg == "loop");

        Some(Args {
            bus,
            looping,
            strictness,
        })
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = match Args::parse(env::args().skip(1)) {
        Some(args) => args,
        None => {
            let prog = env::args().next().unwrap_or_else(|| "gsensor".into());
            eprintln!("Usage : {prog} [--strict] i2cbus [loop]");
            process::exit(1);
        }
    };

    let i2c = match I2cBus::open(args.bus) {
        Ok(i2c) => i2c,
        Err(err) => {
            eprintln!("Error: {err}");
            if err.is_permission_denied() {
                eprintln!("Run as root?");
            }
            process::exit(1);
        }
    };

    let mut sensor = match Lis3::new(i2c, DEFAULT_ADDRESS, args.strictness) {
        Ok(sensor) => sensor,
        Err(Error::UnknownDevice(_)) => {
            println!("Accelerometer not found {}", args.bus);
            process::exit(1);
        }
        Err(err) => return Err(err.into()),
    };
    debug!("sampling in {:?} format", sensor.axis_format());

    monitor::run(&mut sensor, &mut ThreadDelay, &mut io::stdout(), args.looping)
}
