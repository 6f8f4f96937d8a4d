use std::iter::FusedIterator;

use barm_protocol::TargetPoint;

use crate::Error;

pub const DEFAULT_MAX_REACH: f64 = 12.0;
pub const DEFAULT_STEP: f64 = 1.0;
pub const DEFAULT_Z_LEVELS: [f64; 8] = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 10.0, 15.0];

// Absorbs rounding in `2 * max_reach / step` so that an upper bound which is
// a whole number of steps away is not lost.
const AXIS_EPSILON: f64 = 1e-9;

/// Sweeps a square lattice layer by layer and keeps the points within reach.
///
/// For every z-level (in the given order) x runs from `-max_reach` to
/// `max_reach` in steps of `step`, and for every x so does y. A point is
/// emitted iff its distance from the origin is at most `max_reach`.
#[derive(Clone, Debug, PartialEq)]
pub struct GridSweep {
    max_reach: f64,
    step: f64,
    z_levels: Vec<f64>,
    axis_len: usize,
}

impl GridSweep {
    pub fn new(max_reach: f64, step: f64, z_levels: Vec<f64>) -> Result<Self, Error> {
        if !max_reach.is_finite() || max_reach < 0.0 {
            return Err(Error::InvalidReach(max_reach));
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(Error::InvalidStep(step));
        }
        let axis_len = axis_len(max_reach, step).ok_or(Error::TooManyPoints { max_reach, step })?;
        Ok(Self {
            max_reach,
            step,
            z_levels,
            axis_len,
        })
    }

    pub fn max_reach(&self) -> f64 {
        self.max_reach
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn z_levels(&self) -> &[f64] {
        &self.z_levels
    }

    /// Whether `point` passes the reachability filter.
    pub fn is_reachable(&self, point: &TargetPoint) -> bool {
        point.norm() <= self.max_reach
    }

    pub fn iter(&self) -> GridSweepIter {
        self.clone().into_iter()
    }

    fn axis_value(&self, index: usize) -> f64 {
        -self.max_reach + index as f64 * self.step
    }
}

/// Number of lattice values on each of the x and y axes, `None` if it does
/// not fit in `usize`.
fn axis_len(max_reach: f64, step: f64) -> Option<usize> {
    let steps = (2.0 * max_reach / step + AXIS_EPSILON).floor();
    // `usize::MAX as f64` rounds up, so `<` keeps the cast exact.
    if !(steps < usize::MAX as f64) {
        return None;
    }
    (steps as usize).checked_add(1)
}

impl Default for GridSweep {
    fn default() -> Self {
        Self {
            max_reach: DEFAULT_MAX_REACH,
            step: DEFAULT_STEP,
            z_levels: DEFAULT_Z_LEVELS.to_vec(),
            axis_len: 25,
        }
    }
}

impl IntoIterator for GridSweep {
    type Item = TargetPoint;
    type IntoIter = GridSweepIter;

    fn into_iter(self) -> Self::IntoIter {
        GridSweepIter {
            axis_len: self.axis_len,
            sweep: self,
            z: 0,
            x: 0,
            y: 0,
        }
    }
}

impl IntoIterator for &GridSweep {
    type Item = TargetPoint;
    type IntoIter = GridSweepIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator returned by [`GridSweep::iter`].
#[derive(Clone, Debug)]
pub struct GridSweepIter {
    sweep: GridSweep,
    axis_len: usize,
    z: usize,
    x: usize,
    y: usize,
}

impl Iterator for GridSweepIter {
    type Item = TargetPoint;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let z = *self.sweep.z_levels.get(self.z)?;
            if self.x >= self.axis_len {
                self.z += 1;
                self.x = 0;
                self.y = 0;
                continue;
            }
            if self.y >= self.axis_len {
                self.x += 1;
                self.y = 0;
                continue;
            }
            let point = TargetPoint::new(
                self.sweep.axis_value(self.x),
                self.sweep.axis_value(self.y),
                z,
            );
            self.y += 1;
            if self.sweep.is_reachable(&point) {
                return Some(point);
            }
        }
    }
}

impl FusedIterator for GridSweepIter {}
