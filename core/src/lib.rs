// vitrine/src/lib.rs

//! Vitrine: a small async workflow engine with compensating steps.
//!
//! A `Pipeline` is an ordered list of named steps run against a shared,
//! lockable context. Features:
//!  - Named steps with before/on/after hooks.
//!  - Early stopping via `PipelineControl::Stop`.
//!  - `skip_if` predicates evaluated against the context.
//!  - Compensating handlers, run in reverse order for every completed step
//!    when a later step fails (saga semantics).
//!  - Best-effort steps whose failures are logged and swallowed.
//!  - A type-keyed `Registry` for dispatching to the pipeline of a context type.

pub mod core;
pub mod error;
pub mod pipeline;
pub mod registry;

// --- Re-exports for the Public API ---

pub use crate::core::context::{Compensator, Handler};
pub use crate::core::context_data::ContextData;
pub use crate::core::control::{PipelineControl, PipelineResult};
pub use crate::core::step::{SkipCondition, StepDef};

pub use crate::pipeline::definition::Pipeline;

pub use crate::error::{FlowError, FlowResult};

pub use crate::registry::Registry;

/*
    Core Workflow:
    1. Define a context struct `MyCtx` for the process.
    2. Create a `Pipeline<MyCtx, MyErr>` with its step table.
    3. Register handlers with `.on_root()` (and `.before_root()` / `.after_root()` if needed).
    4. For steps with external side effects, register an undo with `.compensate_root()`.
    5. Mark post-commit cleanup steps with `.set_best_effort()`.
    6. Register the pipeline with a `Registry<AppErr>` and call `registry.run(ContextData::new(ctx)).await`.
*/
