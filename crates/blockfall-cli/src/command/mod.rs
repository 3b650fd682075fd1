use clap::{Parser, Subcommand};

use self::play::PlayArg;

mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
enum Mode {
    /// Play the game in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or_default() {
        Mode::Play(arg) => play::run(&arg)?,
    }
    Ok(())
}

impl Default for Mode {
    fn default() -> Self {
        Self::Play(PlayArg::default())
    }
}

#[cfg(test)]
mod tests {
    use std::{path::PathBuf, time::Duration};

    use clap::CommandFactory as _;

    use super::*;

    fn parse(args: &[&str]) -> Result<Mode, clap::Error> {
        let args = CommandArgs::try_parse_from(args)?;
        Ok(args.mode.unwrap_or_default())
    }

    #[test]
    fn test_command_definition_is_valid() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_bare_invocation_matches_play_defaults() {
        assert_eq!(parse(&["blockfall"]).unwrap(), parse(&["blockfall", "play"]).unwrap());

        let Mode::Play(arg) = parse(&["blockfall"]).unwrap();
        assert_eq!(arg.tick_interval(), Duration::from_millis(500));
        assert!(arg.seed.is_none());
        assert!(!arg.no_ghost);
        assert!(arg.log_file.is_none());
    }

    #[test]
    fn test_play_options() {
        let Mode::Play(arg) = parse(&[
            "blockfall",
            "play",
            "--tick-ms",
            "120",
            "--seed",
            "0123456789abcdef0123456789abcdef",
            "--no-ghost",
            "--log-file",
            "game.log",
        ])
        .unwrap();

        assert_eq!(arg.tick_interval(), Duration::from_millis(120));
        assert_eq!(
            arg.seed.map(|seed| seed.to_string()).as_deref(),
            Some("0123456789abcdef0123456789abcdef")
        );
        assert!(arg.no_ghost);
        assert_eq!(arg.log_file, Some(PathBuf::from("game.log")));
    }

    #[test]
    fn test_invalid_options_are_rejected() {
        assert!(parse(&["blockfall", "play", "--tick-ms", "0"]).is_err());
        assert!(parse(&["blockfall", "play", "--seed", "xyz"]).is_err());
    }
}
