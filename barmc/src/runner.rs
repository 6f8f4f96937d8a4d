use barm_protocol::{Outcome, ProtocolClient, TargetPoint, Transport, UnixTransport};
use tracing::{debug, error, info, warn};

use crate::{ClientConfig, Error, Pacer};

/// Counts of one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub sent: usize,
    pub poses: usize,
    pub rejected: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: &Outcome) {
        self.sent += 1;
        match outcome {
            Outcome::Pose { .. } => self.poses += 1,
            Outcome::Rejected { .. } => self.rejected += 1,
        }
    }
}

/// Drives a trajectory through a [`ProtocolClient`], one request at a time.
#[derive(Debug)]
pub struct Runner<T> {
    client: ProtocolClient<T>,
    pacer: Pacer,
}

impl<T: Transport> Runner<T> {
    pub fn new(client: ProtocolClient<T>, pacer: Pacer) -> Self {
        Self { client, pacer }
    }

    /// Sends every point of `points` in order and logs each answer.
    ///
    /// Returns when `points` is exhausted; an endless trajectory runs until
    /// the process is stopped. The first protocol error ends the run.
    pub fn run<I>(&mut self, points: I) -> Result<RunSummary, Error>
    where
        I: IntoIterator<Item = TargetPoint>,
    {
        let mut summary = RunSummary::default();
        for point in points {
            let _guard = self.pacer.start();
            debug!("sending: {point}");
            let outcome = match self.client.send_target(&point) {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(%point, ?summary, "run aborted: {e}");
                    return Err(e.into());
                }
            };
            summary.record(&outcome);
            report(&point, &outcome);
        }
        info!(
            sent = summary.sent,
            poses = summary.poses,
            rejected = summary.rejected,
            "trajectory finished"
        );
        Ok(summary)
    }

    pub fn client(&self) -> &ProtocolClient<T> {
        &self.client
    }

    pub fn into_client(self) -> ProtocolClient<T> {
        self.client
    }
}

fn report(point: &TargetPoint, outcome: &Outcome) {
    match *outcome {
        Outcome::Pose {
            shoulder,
            elbow,
            rotation,
        } => info!(%point, shoulder, elbow, rotation, "response"),
        Outcome::Rejected { code } => warn!(%point, code, "invalid request"),
    }
}

/// Connects to the socket named by `config` and runs its trajectory.
///
/// The connection is closed when this returns, whatever the result.
pub fn run_with_config(config: &ClientConfig) -> Result<RunSummary, Error> {
    let trajectory = config.build_trajectory()?;
    let transport = UnixTransport::connect_with_timeout(&config.socket_path, config.timeout()?)?;
    info!(
        socket_path = ?config.socket_path,
        pace = ?config.pace(),
        "connected"
    );
    let mut runner = Runner::new(ProtocolClient::new(transport), Pacer::new(config.pace()));
    runner.run(trajectory)
}
