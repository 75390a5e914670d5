//! Command-line configuration for the terminal binary.
//!
//! Arguments are parsed by hand into an [`AppConfig`]; rule constants stay in
//! `emerji_types`.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

use crate::types::GAME_SIZE;

/// File name used for the best score when no path is given
pub const BEST_SCORE_FILE: &str = ".emerji_best_score.json";

/// Largest board the terminal view can lay out
pub const MAX_BOARD_SIZE: usize = 12;

pub const USAGE: &str = "\
usage: emerji [--size N] [--seed S] [--best-score-file PATH] [--log-file PATH]

  --size N               board edge length, 1..=12 (default 5)
  --seed S               spawn seed (default: derived from the clock)
  --best-score-file PATH where the best score is kept
                         (default: $HOME/.emerji_best_score.json)
  --log-file PATH        append log output (RUST_LOG) to PATH; without it,
                         logging is off while stderr is the game's terminal
  -h, --help             print this message";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub size: usize,
    pub seed: Option<u64>,
    pub best_score_file: PathBuf,
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            size: GAME_SIZE,
            seed: None,
            best_score_file: default_best_score_file(std::env::var_os("HOME").as_deref().map(Path::new)),
            log_file: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play(AppConfig),
    Help,
}

/// Best-score file inside `home`, or in the working directory without one
pub fn default_best_score_file(home: Option<&Path>) -> PathBuf {
    match home {
        Some(home) => home.join(BEST_SCORE_FILE),
        None => PathBuf::from(BEST_SCORE_FILE),
    }
}

/// Parse command-line arguments (without the program name).
pub fn parse_args(args: &[String]) -> Result<Command> {
    let mut config = AppConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--size" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --size"))?;
                let size = v
                    .parse::<usize>()
                    .map_err(|_| anyhow!("invalid --size value: {}", v))?;
                if !(1..=MAX_BOARD_SIZE).contains(&size) {
                    return Err(anyhow!("--size must be between 1 and {}", MAX_BOARD_SIZE));
                }
                config.size = size;
            }
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                config.seed = Some(
                    v.parse::<u64>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            "--best-score-file" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --best-score-file"))?;
                config.best_score_file = PathBuf::from(v);
            }
            "--log-file" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --log-file"))?;
                config.log_file = Some(PathBuf::from(v));
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(Command::Play(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_arguments_gives_defaults() {
        let Command::Play(config) = parse_args(&[]).unwrap() else {
            panic!("expected play");
        };
        assert_eq!(config.size, GAME_SIZE);
        assert_eq!(config.seed, None);
        assert!(config.best_score_file.ends_with(BEST_SCORE_FILE));
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn test_all_options_are_parsed() {
        let cmd = parse_args(&args(&[
            "--size",
            "4",
            "--seed",
            "99",
            "--best-score-file",
            "/tmp/b.json",
            "--log-file",
            "/tmp/emerji.log",
        ]))
        .unwrap();
        assert_eq!(
            cmd,
            Command::Play(AppConfig {
                size: 4,
                seed: Some(99),
                best_score_file: PathBuf::from("/tmp/b.json"),
                log_file: Some(PathBuf::from("/tmp/emerji.log")),
            })
        );
    }

    #[test]
    fn test_help_wins() {
        assert_eq!(parse_args(&args(&["--size", "4", "-h"])).unwrap(), Command::Help);
    }

    #[test]
    fn test_bad_values_are_errors() {
        assert!(parse_args(&args(&["--size"])).is_err());
        assert!(parse_args(&args(&["--size", "0"])).is_err());
        assert!(parse_args(&args(&["--size", "13"])).is_err());
        assert!(parse_args(&args(&["--seed", "-1"])).is_err());
        assert!(parse_args(&args(&["--colour"])).is_err());
        assert!(parse_args(&args(&["--log-file"])).is_err());
    }

    #[test]
    fn test_default_file_falls_back_to_working_directory() {
        assert_eq!(default_best_score_file(None), PathBuf::from(BEST_SCORE_FILE));
        assert_eq!(
            default_best_score_file(Some(Path::new("/home/p"))),
            PathBuf::from("/home/p").join(BEST_SCORE_FILE)
        );
    }
}
