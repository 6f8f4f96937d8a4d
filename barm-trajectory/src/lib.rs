#![doc = include_str!("../README.md")]

mod error;
mod grid_sweep;
mod random_sampler;

pub use crate::{error::*, grid_sweep::*, random_sampler::*};
