//! Interactive project initialization.
//!
//! A [`Workflow`] takes a [`ProjectRequest`] and walks through directory
//! selection, template download and cleanup, dependency installation,
//! repository setup and TypeScript configuration. Each step is answered by
//! the request or by a prompt, and side effects are skipped on dry runs.

pub mod messages;
pub mod orchestrator;
pub mod request;

pub use orchestrator::{
    Collaborators, Step, StepDecision, StepOutcome, Workflow, WorkflowReport, WorkflowState,
};
pub use request::{ProjectRequest, ResolvedProject};
