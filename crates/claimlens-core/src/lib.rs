pub mod aggregator;
pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod model;
pub mod orchestrator;
pub mod outcome;
pub mod planner;
pub mod types;

pub use aggregator::{aggregate, ResponseEnvelope};
pub use client::{HttpResourceClient, InMemoryResourceClient, ResourceClient};
pub use error::{ClaimLensError, Result};
pub use executor::{execute, RequestContext, StepExecutor};
pub use orchestrator::{orchestrate, OrchestrationRequest, Orchestrator};
pub use outcome::StepOutcome;
pub use planner::{plan, Plan, Planner};
pub use types::Action;
