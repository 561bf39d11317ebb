//! resolvgen core: turn the public DNSCrypt resolver catalog into a CSV list.
//!
//! Pipeline: [`catalog`] -> [`filter`] -> [`stamp`] + [`record`] -> [`output`],
//! driven by [`pipeline::generate`].

pub mod config;
pub mod logging;

pub mod catalog;
pub mod error;
pub mod filter;
pub mod output;
pub mod pipeline;
pub mod record;
pub mod stamp;

pub use error::{GenerateError, StampError};
pub use pipeline::{generate, EntryErrorPolicy, GenerateOptions, GenerateReport};
