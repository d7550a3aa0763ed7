//! Pipeline stages and their orchestration.

use std::path::PathBuf;

use image::RgbImage;
use thiserror::Error;
use tracing::info;

use crate::config::{ConfigError, GoreConfig};
use crate::export::{
    ensure_dir, export_gores_png, export_rgb_png, load_rgb_image, ExportError, PngExportOptions,
};
use crate::merge::{merge_gores, MergeError};
use crate::projection::project_gores;
use crate::split::{split_into_gores, Gore, SplitError};

/// Unique identifier for pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    /// Load the source and cut it into gores.
    Split,
    /// Sinusoidal projection of every gore.
    Project,
    /// Reassembly of projected gores.
    Merge,
}

impl StageId {
    /// Returns the name of the stage.
    pub fn name(&self) -> &'static str {
        match self {
            StageId::Split => "split",
            StageId::Project => "project",
            StageId::Merge => "merge",
        }
    }
}

/// Failure inside a single stage.
#[derive(Error, Debug)]
pub enum StageError {
    #[error(transparent)]
    Split(#[from] SplitError),
    #[error(transparent)]
    Merge(#[from] MergeError),
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Errors that can occur during pipeline execution.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Stage '{stage}' failed: {source}")]
    StageFailed {
        stage: &'static str,
        #[source]
        source: StageError,
    },
    #[error("Missing dependency: stage '{0}' requires '{1}'")]
    MissingDependency(String, String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl PipelineError {
    fn stage(id: StageId, source: impl Into<StageError>) -> Self {
        PipelineError::StageFailed {
            stage: id.name(),
            source: source.into(),
        }
    }
}

/// Data produced as a run advances through the stages.
#[derive(Debug, Default)]
pub struct GoreRun {
    /// Gores cut from the source, in order.
    pub gores: Vec<Gore>,
    /// Projected gores, same order as `gores`.
    pub projected: Vec<RgbImage>,
    /// Final merged image.
    pub merged: Option<RgbImage>,
    /// Every file written so far.
    pub written: Vec<PathBuf>,
}

/// A step of the gore pipeline.
pub trait GoreStage: Send + Sync {
    /// Returns the unique identifier for this stage.
    fn id(&self) -> StageId;

    /// Returns a human-readable name for the stage.
    fn name(&self) -> &str;

    /// Returns the stage IDs that must be executed before this stage.
    fn dependencies(&self) -> &[StageId] {
        &[]
    }

    /// Executes the stage, advancing `run`.
    fn execute(&self, run: &mut GoreRun, config: &GoreConfig) -> Result<(), PipelineError>;
}

/// Runs stages in order against one configuration.
pub struct Pipeline {
    stages: Vec<Box<dyn GoreStage>>,
    config: GoreConfig,
}

impl Pipeline {
    /// Creates a new empty pipeline with the given configuration.
    pub fn new(config: GoreConfig) -> Self {
        Self {
            stages: Vec::new(),
            config,
        }
    }

    /// Pipeline with the split, project and merge stages.
    pub fn standard(config: GoreConfig) -> Self {
        let mut pipeline = Self::new(config);
        pipeline
            .add_stage(SplitStage::default())
            .add_stage(ProjectStage)
            .add_stage(MergeStage::default());
        pipeline
    }

    /// Adds a stage to the pipeline.
    pub fn add_stage<S: GoreStage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Returns the number of stages in the pipeline.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Returns the configuration the stages run with.
    pub fn config(&self) -> &GoreConfig {
        &self.config
    }

    /// Executes all stages in order.
    pub fn run(&self) -> Result<GoreRun, PipelineError> {
        self.run_with_callbacks(|_, _, _| {}, |_, _, _| {})
    }

    /// Executes all stages with progress callbacks.
    ///
    /// # Arguments
    /// * `on_stage_start` - Called when each stage begins
    /// * `on_stage_complete` - Called when each stage finishes
    pub fn run_with_callbacks<F1, F2>(
        &self,
        mut on_stage_start: F1,
        mut on_stage_complete: F2,
    ) -> Result<GoreRun, PipelineError>
    where
        F1: FnMut(&str, usize, usize),
        F2: FnMut(&str, usize, usize),
    {
        self.config.validate()?;

        let total = self.stages.len();
        let mut completed: Vec<StageId> = Vec::new();
        let mut run = GoreRun::default();

        for (i, stage) in self.stages.iter().enumerate() {
            on_stage_start(stage.name(), i, total);

            for dep in stage.dependencies() {
                if !completed.contains(dep) {
                    return Err(PipelineError::MissingDependency(
                        stage.name().to_string(),
                        dep.name().to_string(),
                    ));
                }
            }

            stage.execute(&mut run, &self.config)?;
            completed.push(stage.id());

            on_stage_complete(stage.name(), i, total);
        }

        Ok(run)
    }
}

/// Loads the source image, splits it and saves the raw gores.
#[derive(Debug, Clone, Default)]
pub struct SplitStage {
    pub png: PngExportOptions,
}

impl GoreStage for SplitStage {
    fn id(&self) -> StageId {
        StageId::Split
    }

    fn name(&self) -> &str {
        "Gore Split"
    }

    fn execute(&self, run: &mut GoreRun, config: &GoreConfig) -> Result<(), PipelineError> {
        let id = self.id();
        let source = load_rgb_image(&config.input).map_err(|e| PipelineError::stage(id, e))?;
        info!(
            input = %config.input.display(),
            width = source.width(),
            height = source.height(),
            "source loaded"
        );

        let gores = split_into_gores(&source, config.degree_step)
            .map_err(|e| PipelineError::stage(id, e))?;
        let paths = export_gores_png(gores.iter().map(|g| &g.image), &config.output_dir, &self.png)
            .map_err(|e| PipelineError::stage(id, e))?;

        run.gores = gores;
        run.written.extend(paths);
        Ok(())
    }
}

/// Projects every gore and saves the results under `projected_gores/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectStage;

impl GoreStage for ProjectStage {
    fn id(&self) -> StageId {
        StageId::Project
    }

    fn name(&self) -> &str {
        "Sinusoidal Projection"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Split]
    }

    fn execute(&self, run: &mut GoreRun, config: &GoreConfig) -> Result<(), PipelineError> {
        let images: Vec<&RgbImage> = run.gores.iter().map(|g| &g.image).collect();
        let projected = project_gores(&images, &config.repair, config.parallel);

        let paths = export_gores_png(
            &projected,
            &config.projected_dir(),
            &PngExportOptions::default(),
        )
        .map_err(|e| PipelineError::stage(self.id(), e))?;

        run.projected = projected;
        run.written.extend(paths);
        Ok(())
    }
}

/// Merges projected gores and saves the final image.
#[derive(Debug, Clone, Default)]
pub struct MergeStage {
    pub png: PngExportOptions,
}

impl GoreStage for MergeStage {
    fn id(&self) -> StageId {
        StageId::Merge
    }

    fn name(&self) -> &str {
        "Gore Merge"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Project]
    }

    fn execute(&self, run: &mut GoreRun, config: &GoreConfig) -> Result<(), PipelineError> {
        let id = self.id();
        let merged = merge_gores(&run.projected).map_err(|e| PipelineError::stage(id, e))?;

        let path = &config.output_image;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_dir(parent).map_err(|e| PipelineError::stage(id, e))?;
        }
        export_rgb_png(&merged, path, &self.png).map_err(|e| PipelineError::stage(id, e))?;
        info!(path = %path.display(), "merged image saved");

        run.merged = Some(merged);
        run.written.push(path.clone());
        Ok(())
    }
}
