//! Analysis domain module.
//!
//! Everything about talking to the remote CoAI analysis service lives here:
//! the wire types, the `AnalysisBackend` seam the tool depends on, and the
//! reqwest-backed production client.

mod client;
mod error;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{
    AnalysisBackend, AnalysisRequest, AnalysisResponse, HttpAnalysisClient, TOKEN_HEADER,
    is_falsy,
};
pub use error::AnalysisError;
