#![doc = include_str!("../README.md")]

mod config;
mod error;
mod pace;
mod runner;
pub mod utils;

pub use crate::{config::*, error::*, pace::*, runner::*};
