//! Services implementing business operations over the repository ports.

pub mod enrichment;
pub mod workflow;
