use std::path::PathBuf;

use blockfall_engine::{PieceSeed, SessionConfig};
use clap::Parser;

use crate::{logging, play::PlayApp, tui::Runtime};

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Piece sequence seed as 32 hex digits (random when omitted)
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Start with the ghost piece hidden
    #[clap(long)]
    no_ghost: bool,
    /// File to write logs to
    #[clap(long, default_value = "blockfall.log")]
    log_file: PathBuf,
    /// Do not write a log file
    #[clap(long)]
    no_log: bool,
    /// Screen refresh rate in frames per second
    #[clap(long, default_value_t = 60, value_parser = clap::value_parser!(u16).range(1..))]
    fps: u16,
}

impl CommandArgs {
    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            seed: self.seed,
            show_ghost: !self.no_ghost,
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    let _log_guard = if args.no_log {
        None
    } else {
        Some(logging::init(&args.log_file)?)
    };

    let config = args.session_config();
    tracing::info!(?config, fps = args.fps, "blockfall starting");

    let mut app = PlayApp::new(config, f64::from(args.fps));
    Runtime::new().run(&mut app)?;

    tracing::info!("blockfall exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = CommandArgs::try_parse_from(["blockfall"]).unwrap();
        assert_eq!(args.session_config(), SessionConfig::default());
        assert_eq!(args.log_file, PathBuf::from("blockfall.log"));
        assert!(!args.no_log);
        assert_eq!(args.fps, 60);
    }

    #[test]
    fn test_seed_and_ghost_args() {
        let args = CommandArgs::try_parse_from([
            "blockfall",
            "--seed",
            "000102030405060708090a0b0c0d0e0f",
            "--no-ghost",
        ])
        .unwrap();
        let config = args.session_config();
        assert_eq!(
            config.seed.map(|seed| seed.to_string()).as_deref(),
            Some("000102030405060708090a0b0c0d0e0f")
        );
        assert!(!config.show_ghost);
    }

    #[test]
    fn test_invalid_args_rejected() {
        assert!(CommandArgs::try_parse_from(["blockfall", "--seed", "xyz"]).is_err());
        assert!(CommandArgs::try_parse_from(["blockfall", "--fps", "0"]).is_err());
    }
}
