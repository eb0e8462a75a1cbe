//! Command-line arguments.

use crate::core::difficulty::Difficulty;

pub const USAGE: &str = "\
Unicorn Dash - terminal endless runner

Usage: unicorn-dash [options]

Options:
  --difficulty <easy|normal|hard>  Start on this difficulty (default: normal)
  --mute                           Disable the terminal bell
  --seed <N>                       Fix the random seed
  --version                        Show version information
  --help                           Show this help message

Keys: Space/Up jump (twice for double jump), Down duck, P pause,
      R restart, M menu, 1/2/3 difficulty, Q/Esc quit";

/// Runtime options for a game session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    pub difficulty: Difficulty,
    pub mute: bool,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play(LaunchOptions),
    Version,
    Help,
}

/// Parse arguments (without the program name). The error is a message for
/// the user.
pub fn parse_args<I>(args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = String>,
{
    let mut options = LaunchOptions::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-v" => return Ok(Command::Version),
            "--help" | "-h" => return Ok(Command::Help),
            "--mute" => options.mute = true,
            "--difficulty" | "-d" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--difficulty needs a value".to_string())?;
                options.difficulty = Difficulty::from_name(&value)
                    .ok_or_else(|| format!("Unknown difficulty: {}", value))?;
            }
            "--seed" => {
                let value = args
                    .next()
                    .ok_or_else(|| "--seed needs a value".to_string())?;
                let seed = value
                    .parse::<u64>()
                    .map_err(|_| format!("Invalid seed: {}", value))?;
                options.seed = Some(seed);
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(Command::Play(options))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, String> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_no_args_plays_normal() {
        assert_eq!(parse(&[]), Ok(Command::Play(LaunchOptions::default())));
    }

    #[test]
    fn test_all_options() {
        let cmd = parse(&["--difficulty", "HARD", "--mute", "--seed", "99"]);
        assert_eq!(
            cmd,
            Ok(Command::Play(LaunchOptions {
                difficulty: Difficulty::Hard,
                mute: true,
                seed: Some(99),
            }))
        );
    }

    #[test]
    fn test_version_and_help_win() {
        assert_eq!(parse(&["--mute", "--version"]), Ok(Command::Version));
        assert_eq!(parse(&["-h"]), Ok(Command::Help));
    }

    #[test]
    fn test_errors() {
        assert!(parse(&["--bogus"]).is_err());
        assert!(parse(&["--difficulty"]).is_err());
        assert!(parse(&["--difficulty", "nightmare"]).is_err());
        assert!(parse(&["--seed", "-4"]).is_err());
    }
}
