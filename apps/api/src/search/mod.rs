// Agent reply pipeline: extraction → normalization → ranking.
// Only `service` suspends (on the agent call); everything else is pure.

pub mod extractor;
pub mod handlers;
pub mod models;
pub mod normalizer;
pub mod prompts;
pub mod ranking;
pub mod sample;
pub mod service;
