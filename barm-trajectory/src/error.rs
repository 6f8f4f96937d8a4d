use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("barm-trajectory: Step must be positive and finite, got {}.", .0)]
    InvalidStep(f64),
    #[error("barm-trajectory: Reach must be non-negative and finite, got {}.", .0)]
    InvalidReach(f64),
    #[error(
        "barm-trajectory: Lattice of reach {} and step {} has too many points.",
        max_reach,
        step
    )]
    TooManyPoints { max_reach: f64, step: f64 },
    #[error("barm-trajectory: Bound must be non-negative with a finite range, got {}.", .0)]
    InvalidBound(f64),
}
