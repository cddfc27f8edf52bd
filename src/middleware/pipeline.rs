//! Ordered guard pipeline.
//!
//! Guards run one after another before the wrapped routes. Each guard either
//! lets the request continue (possibly after attaching data to it) or rejects
//! it with a finished response, in which case no later guard and no handler
//! runs.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

/// Outcome of a single guard.
pub enum Flow {
    Continue,
    Reject(Response),
}

/// A synchronous request check.
pub trait Guard: Send + Sync + 'static {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn check(&self, request: &mut Request) -> Flow;
}

/// Guards executed in insertion order.
#[derive(Clone, Default)]
pub struct GuardPipeline {
    guards: Vec<Arc<dyn Guard>>,
}

impl GuardPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a guard to the end of the pipeline.
    pub fn with(mut self, guard: impl Guard) -> Self {
        self.guards.push(Arc::new(guard));
        self
    }

    pub fn len(&self) -> usize {
        self.guards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    /// Run every guard against the request, stopping at the first rejection.
    pub fn evaluate(&self, request: &mut Request) -> Flow {
        for guard in &self.guards {
            if let Flow::Reject(response) = guard.check(request) {
                debug!(
                    guard = guard.name(),
                    path = %request.uri().path(),
                    status = response.status().as_u16(),
                    "Request rejected by guard"
                );
                return Flow::Reject(response);
            }
        }
        Flow::Continue
    }
}

/// Middleware function running a pipeline in front of the inner service.
///
/// Install with `axum::middleware::from_fn_with_state(pipeline, run_pipeline)`.
pub async fn run_pipeline(
    State(pipeline): State<GuardPipeline>,
    mut request: Request,
    next: Next,
) -> Response {
    match pipeline.evaluate(&mut request) {
        Flow::Continue => next.run(request).await,
        Flow::Reject(response) => response,
    }
}
