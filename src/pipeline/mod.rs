//! Split → project → merge orchestration.
//!
//! Each step is a [`GoreStage`]; a [`Pipeline`] runs them in order, checks
//! their dependencies and reports progress through callbacks.

mod stage;

pub use stage::{
    GoreRun, GoreStage, MergeStage, Pipeline, PipelineError, ProjectStage, SplitStage, StageError,
    StageId,
};
