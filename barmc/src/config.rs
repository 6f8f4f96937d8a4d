use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use barm_protocol::TargetPoint;
use barm_trajectory::{
    GridSweep, RandomSampler, DEFAULT_BOUND, DEFAULT_MAX_REACH, DEFAULT_STEP, DEFAULT_Z_LEVELS,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Error;

pub const DEFAULT_SOCKET_PATH: &str = "/tmp/barmd.sock";
/// Delay between random requests, so the daemon is not saturated.
pub const DEFAULT_RANDOM_PACE_MS: u64 = 50;

/// Boxed trajectory, finite or not.
pub type Trajectory = Box<dyn Iterator<Item = TargetPoint>>;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(tag = "type")]
pub enum TrajectoryConfig {
    /// Every reachable lattice point, layer by layer.
    GridSweep {
        #[serde(default = "default_max_reach")]
        max_reach: f64,
        #[serde(default = "default_step")]
        step: f64,
        #[serde(default = "default_z_levels")]
        z_levels: Vec<f64>,
    },
    /// The origin, then uniformly random points in `[-bound, bound]³` forever.
    Random {
        #[serde(default = "default_bound")]
        bound: f64,
        /// Fixed seed for a reproducible run.
        seed: Option<u64>,
    },
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        TrajectoryConfig::GridSweep {
            max_reach: default_max_reach(),
            step: default_step(),
            z_levels: default_z_levels(),
        }
    }
}

impl TrajectoryConfig {
    /// Delay used when the config does not set `pace_ms`.
    pub fn default_pace(&self) -> Duration {
        match self {
            TrajectoryConfig::GridSweep { .. } => Duration::ZERO,
            TrajectoryConfig::Random { .. } => Duration::from_millis(DEFAULT_RANDOM_PACE_MS),
        }
    }

    pub fn build(&self) -> Result<Trajectory, Error> {
        let trajectory: Trajectory = match self {
            TrajectoryConfig::GridSweep {
                max_reach,
                step,
                z_levels,
            } => Box::new(GridSweep::new(*max_reach, *step, z_levels.clone())?.into_iter()),
            TrajectoryConfig::Random { bound, seed } => {
                Box::new(RandomSampler::try_new(*bound, *seed)?)
            }
        };
        Ok(trajectory)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    // TOML format has a restriction that if a table itself contains tables,
    // all keys with non-table values must be emitted first.
    // Therefore, these fields must be located at the start of the struct.
    #[serde(default = "default_socket_path")]
    pub socket_path: PathBuf,
    /// Read/write timeout of the socket. Blocks forever if unset.
    pub timeout_secs: Option<f64>,
    /// Delay between requests. Defaults to 0 for grid sweeps and 50 for
    /// random runs.
    pub pace_ms: Option<u64>,
    /// Stop after this many requests.
    pub limit: Option<usize>,

    #[serde(default)]
    pub trajectory: TrajectoryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            socket_path: default_socket_path(),
            timeout_secs: None,
            pace_ms: None,
            limit: None,
            trajectory: TrajectoryConfig::default(),
        }
    }
}

fn default_socket_path() -> PathBuf {
    PathBuf::from(DEFAULT_SOCKET_PATH)
}

fn default_max_reach() -> f64 {
    DEFAULT_MAX_REACH
}

fn default_step() -> f64 {
    DEFAULT_STEP
}

fn default_z_levels() -> Vec<f64> {
    DEFAULT_Z_LEVELS.to_vec()
}

fn default_bound() -> f64 {
    DEFAULT_BOUND
}

impl ClientConfig {
    pub fn try_new<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Self::from_str(
            &std::fs::read_to_string(&path)
                .map_err(|e| Error::NoFile(path.as_ref().to_owned(), e))?,
            &path,
        )
    }

    pub fn from_str<P: AsRef<Path>>(s: &str, path: P) -> Result<Self, Error> {
        let config: ClientConfig =
            toml::from_str(s).map_err(|e| Error::TomlParseFailure(path.as_ref().to_owned(), e))?;
        config.timeout()?;
        debug!("{:?}", config);
        Ok(config)
    }

    pub fn timeout(&self) -> Result<Option<Duration>, Error> {
        match self.timeout_secs {
            None => Ok(None),
            Some(secs) if secs > 0.0 => Duration::try_from_secs_f64(secs)
                .map(Some)
                .map_err(|_| Error::InvalidTimeout(secs)),
            Some(secs) => Err(Error::InvalidTimeout(secs)),
        }
    }

    pub fn pace(&self) -> Duration {
        self.pace_ms
            .map(Duration::from_millis)
            .unwrap_or_else(|| self.trajectory.default_pace())
    }

    /// Builds the trajectory, cut to `limit` if one is set.
    pub fn build_trajectory(&self) -> Result<Trajectory, Error> {
        let trajectory = self.trajectory.build()?;
        let trajectory: Trajectory = match self.limit {
            Some(limit) => Box::new(trajectory.take(limit)),
            None => trajectory,
        };
        Ok(trajectory)
    }
}
