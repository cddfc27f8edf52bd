//! HTTP handlers for both demo services

pub mod devops;
pub mod public;
pub mod secure;

pub use devops::{devops_router, DevOpsState};
