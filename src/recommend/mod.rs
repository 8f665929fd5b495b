// Recommendation orchestration: request context, outcomes and cancellation.

pub mod cancel;
pub mod service;
