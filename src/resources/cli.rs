use std::path::PathBuf;

use bevy::prelude::*;

/// Command-line arguments for the flicker demo.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CliArgs {
    /// JSON config file to load instead of the default location.
    /// Usage: `cargo run -- --config flicker.json`
    pub config: Option<PathBuf>,

    /// Seed for a reproducible flicker pattern.
    /// Usage: `cargo run -- --seed 42`
    pub seed: Option<u64>,

    /// Overrides the configured repeat count.
    /// Usage: `cargo run -- --repeat 3`
    pub repeat: Option<u32>,

    /// Leave the light on once the sequence ends.
    /// Usage: `cargo run -- --stay-on`
    pub stay_on: bool,
}

impl CliArgs {
    /// Parse command-line arguments from the process environment.
    pub fn parse() -> Self {
        Self::parse_from(std::env::args().skip(1))
    }

    /// Parse arguments (without the program name).
    /// Supports:
    /// - `--config <path>`: Load the flicker config from a file
    /// - `--seed <u64>`: Seed the flicker RNG
    /// - `--repeat <n>`: Override the repeat count
    /// - `--stay-on`: Keep the light on after completion
    pub fn parse_from(args: impl IntoIterator<Item = String>) -> Self {
        let args: Vec<String> = args.into_iter().collect();
        let mut cli = CliArgs::default();

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--config" => {
                    if let Some(path) = args.get(i + 1) {
                        cli.config = Some(PathBuf::from(path));
                        info!("CLI: Using flicker config '{}'", path);
                        i += 2;
                    } else {
                        warn!("CLI: --config requires a path argument");
                        i += 1;
                    }
                }
                "--seed" => match args.get(i + 1).map(|v| v.parse::<u64>()) {
                    Some(Ok(seed)) => {
                        cli.seed = Some(seed);
                        i += 2;
                    }
                    Some(Err(_)) => {
                        warn!("CLI: --seed expects an unsigned integer, got '{}'", args[i + 1]);
                        i += 2;
                    }
                    None => {
                        warn!("CLI: --seed requires a value");
                        i += 1;
                    }
                },
                "--repeat" => match args.get(i + 1).map(|v| v.parse::<u32>()) {
                    Some(Ok(repeat)) => {
                        cli.repeat = Some(repeat);
                        i += 2;
                    }
                    Some(Err(_)) => {
                        warn!("CLI: --repeat expects an unsigned integer, got '{}'", args[i + 1]);
                        i += 2;
                    }
                    None => {
                        warn!("CLI: --repeat requires a value");
                        i += 1;
                    }
                },
                "--stay-on" => {
                    cli.stay_on = true;
                    i += 1;
                }
                arg => {
                    if arg.starts_with('-') {
                        warn!("CLI: Unknown argument '{}'", arg);
                    }
                    i += 1;
                }
            }
        }

        cli
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::parse_from(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_no_args() {
        assert_eq!(parse(&[]), CliArgs::default());
    }

    #[test]
    fn test_all_flags() {
        let cli = parse(&["--config", "lamp.json", "--seed", "42", "--repeat", "3", "--stay-on"]);
        assert_eq!(cli.config, Some(PathBuf::from("lamp.json")));
        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.repeat, Some(3));
        assert!(cli.stay_on);
    }

    #[test]
    fn test_bad_values_ignored() {
        let cli = parse(&["--seed", "abc", "--repeat", "-1", "--config"]);
        assert_eq!(cli.seed, None);
        assert_eq!(cli.repeat, None);
        assert_eq!(cli.config, None);
    }

    #[test]
    fn test_unknown_args_skipped() {
        let cli = parse(&["--verbose", "--repeat", "5"]);
        assert_eq!(cli.repeat, Some(5));
    }
}
