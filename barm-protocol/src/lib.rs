#![doc = include_str!("../README.md")]

mod client;
pub mod codec;
mod error;
mod transport;
mod types;

pub use crate::{client::*, error::*, transport::*, types::*};
