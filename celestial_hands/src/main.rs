//! celestial_hands: interactive entry point.

use std::path::PathBuf;
use std::process;

use celestial_hands::app::run;
use celestial_hands::{AppConfig, AppResult, ProviderKind};
use log::{error, info};

const USAGE: &str = "usage: celestial_hands [--config <path>] [--stdin] [--quick]";

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    stdin:  bool,
    quick:  bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().ok_or("--config needs a path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--stdin" => parsed.stdin = true,
            "--quick" => parsed.quick = true,
            "-h" | "--help" => return Err(USAGE.to_string()),
            other => return Err(format!("unknown argument {other:?}\n{USAGE}")),
        }
    }
    Ok(parsed)
}

fn configure(args: &Args) -> AppResult<AppConfig> {
    let mut config = if args.quick {
        info!("quick start: compiled defaults");
        AppConfig::default()
    } else {
        AppConfig::load(args.config.as_deref())?
    };
    if args.stdin {
        config.provider = ProviderKind::Stdin;
    }
    Ok(config)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(a) => a,
        Err(msg) => {
            eprintln!("{msg}");
            process::exit(2);
        }
    };

    if let Err(e) = configure(&args).and_then(run) {
        error!("{e}");
        process::exit(1);
    }
}
