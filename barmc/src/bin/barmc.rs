use std::path::PathBuf;

use anyhow::Result;
use barm_trajectory::{DEFAULT_BOUND, DEFAULT_MAX_REACH, DEFAULT_STEP, DEFAULT_Z_LEVELS};
use barmc::{utils, ClientConfig, TrajectoryConfig};
use clap::{Parser, Subcommand};
use schemars::schema_for;
use tracing::{debug, info};

/// Drive the barmd arm daemon through a trajectory and log every answer.
#[derive(Parser, Debug)]
#[clap(name = env!("CARGO_BIN_NAME"), version)]
struct Opt {
    /// Path to the setting file.
    #[clap(short, long, value_parser)]
    config_path: Option<PathBuf>,
    /// Path of the daemon socket. Takes priority over the setting file.
    #[clap(short, long, value_parser)]
    socket_path: Option<PathBuf>,
    /// Read/write timeout of the socket in seconds.
    #[clap(long)]
    timeout_secs: Option<f64>,
    /// Delay between requests in milliseconds.
    #[clap(long)]
    pace_ms: Option<u64>,
    /// Stop after this many requests.
    #[clap(short = 'n', long)]
    limit: Option<usize>,
    /// Trajectory to run. Uses the setting file (or a grid sweep) if omitted.
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sweep every reachable lattice point, layer by layer.
    Grid {
        #[clap(long, default_value_t = DEFAULT_MAX_REACH)]
        max_reach: f64,
        #[clap(long, default_value_t = DEFAULT_STEP)]
        step: f64,
        /// Comma-separated z-levels. Defaults to 0,1,2,3,4,5,10,15.
        #[clap(long, value_delimiter = ',', allow_hyphen_values = true)]
        z_levels: Vec<f64>,
    },
    /// Send the origin, then random points forever.
    Random {
        #[clap(long, default_value_t = DEFAULT_BOUND)]
        bound: f64,
        /// Seed for a reproducible run.
        #[clap(long)]
        seed: Option<u64>,
    },
    /// Print the JSON schema of the setting file.
    Schema,
}

impl Opt {
    /// Lays the command line over a loaded config. A subcommand replaces the
    /// trajectory; global options replace the fields they name.
    fn apply_to(self, config: &mut ClientConfig) {
        match self.command {
            Some(Command::Grid {
                max_reach,
                step,
                z_levels,
            }) => {
                config.trajectory = TrajectoryConfig::GridSweep {
                    max_reach,
                    step,
                    z_levels: if z_levels.is_empty() {
                        DEFAULT_Z_LEVELS.to_vec()
                    } else {
                        z_levels
                    },
                };
            }
            Some(Command::Random { bound, seed }) => {
                config.trajectory = TrajectoryConfig::Random { bound, seed };
            }
            Some(Command::Schema) | None => {}
        }
        if let Some(socket_path) = self.socket_path {
            config.socket_path = socket_path;
        }
        if self.timeout_secs.is_some() {
            config.timeout_secs = self.timeout_secs;
        }
        if self.pace_ms.is_some() {
            config.pace_ms = self.pace_ms;
        }
        if self.limit.is_some() {
            config.limit = self.limit;
        }
    }
}

fn main() -> Result<()> {
    utils::init_tracing();
    let opt = Opt::parse();
    debug!(?opt);

    if let Some(Command::Schema) = opt.command {
        let schema = schema_for!(ClientConfig);
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }
    let mut config = utils::resolve_config(opt.config_path.clone())?;
    opt.apply_to(&mut config);
    debug!(?config);

    let summary = barmc::run_with_config(&config)?;
    info!(
        "sent {} requests: {} poses, {} invalid",
        summary.sent, summary.poses, summary.rejected
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grid() {
        let opt = Opt::parse_from([
            "barmc",
            "--socket-path",
            "/tmp/test.sock",
            "grid",
            "--max-reach",
            "6",
            "--z-levels",
            "-1,0,2.5",
        ]);
        assert_eq!(opt.socket_path, Some(PathBuf::from("/tmp/test.sock")));
        match opt.command {
            Some(Command::Grid {
                max_reach,
                step,
                z_levels,
            }) => {
                assert_eq!(max_reach, 6.0);
                assert_eq!(step, DEFAULT_STEP);
                assert_eq!(z_levels, [-1.0, 0.0, 2.5]);
            }
            c => panic!("unexpected {c:?}"),
        }
    }

    #[test]
    fn test_parse_random() {
        let opt = Opt::parse_from(["barmc", "-n", "10", "--pace-ms", "5", "random", "--seed", "3"]);
        assert_eq!(opt.limit, Some(10));
        assert_eq!(opt.pace_ms, Some(5));
        assert!(matches!(
            opt.command,
            Some(Command::Random { bound, seed: Some(3) }) if bound == DEFAULT_BOUND
        ));
    }

    #[test]
    fn test_parse_no_subcommand() {
        let opt = Opt::parse_from(["barmc"]);
        assert!(opt.command.is_none());
        assert!(opt.config_path.is_none());
    }

    const RANDOM_TOML: &str = include_str!("../../config/random.toml");

    fn merged(args: &[&str]) -> ClientConfig {
        let mut config = ClientConfig::from_str(RANDOM_TOML, "random.toml").unwrap();
        Opt::parse_from(args).apply_to(&mut config);
        config
    }

    #[test]
    fn test_apply_keeps_file_config() {
        let file = ClientConfig::from_str(RANDOM_TOML, "random.toml").unwrap();
        assert_eq!(merged(&["barmc"]), file);
        assert_eq!(
            file.trajectory,
            TrajectoryConfig::Random {
                bound: 10.0,
                seed: None
            }
        );
    }

    #[test]
    fn test_apply_global_overrides() {
        let config = merged(&[
            "barmc",
            "--socket-path",
            "/run/other.sock",
            "--timeout-secs",
            "0.5",
            "--pace-ms",
            "0",
            "-n",
            "7",
        ]);
        assert_eq!(config.socket_path, PathBuf::from("/run/other.sock"));
        assert_eq!(config.timeout_secs, Some(0.5));
        assert_eq!(config.pace_ms, Some(0));
        assert_eq!(config.pace(), std::time::Duration::ZERO);
        assert_eq!(config.limit, Some(7));
        // No subcommand: the trajectory still comes from the file.
        assert!(matches!(
            config.trajectory,
            TrajectoryConfig::Random { bound, seed: None } if bound == 10.0
        ));
    }

    #[test]
    fn test_apply_each_override_alone() {
        let file = ClientConfig::from_str(RANDOM_TOML, "random.toml").unwrap();

        let config = merged(&["barmc", "-s", "/run/a.sock"]);
        assert_eq!(config.socket_path, PathBuf::from("/run/a.sock"));
        assert_eq!(config.timeout_secs, file.timeout_secs);
        assert_eq!(config.pace_ms, file.pace_ms);

        let config = merged(&["barmc", "--timeout-secs", "9"]);
        assert_eq!(config.timeout_secs, Some(9.0));
        assert_eq!(config.socket_path, file.socket_path);

        let config = merged(&["barmc", "--pace-ms", "3"]);
        assert_eq!(config.pace_ms, Some(3));
        assert_eq!(config.limit, file.limit);

        let config = merged(&["barmc", "--limit", "2"]);
        assert_eq!(config.limit, Some(2));
        assert_eq!(config.pace_ms, file.pace_ms);
    }

    #[test]
    fn test_apply_subcommand_replaces_trajectory() {
        let config = merged(&["barmc", "grid", "--max-reach", "4"]);
        assert_eq!(
            config.trajectory,
            TrajectoryConfig::GridSweep {
                max_reach: 4.0,
                step: DEFAULT_STEP,
                z_levels: DEFAULT_Z_LEVELS.to_vec(),
            }
        );
        // File-level settings survive the switch.
        assert_eq!(config.pace_ms, Some(50));

        let config = merged(&["barmc", "grid", "--z-levels", "-2,7"]);
        assert!(matches!(
            config.trajectory,
            TrajectoryConfig::GridSweep { ref z_levels, .. } if z_levels == &[-2.0, 7.0]
        ));

        let config = merged(&["barmc", "random", "--bound", "3", "--seed", "5"]);
        assert_eq!(
            config.trajectory,
            TrajectoryConfig::Random {
                bound: 3.0,
                seed: Some(5)
            }
        );
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Opt::command().debug_assert();
    }
}
