//! Pipeline coordinator - runs load, index, fuse and split end to end
//!
//! The dataset is written only after every stage has succeeded, through a
//! sibling temporary file that is renamed over the output path.

pub mod summary;

pub use summary::{PageSample, RunSummary};

use crate::adapters::loader::load_exports;
use crate::config::LabelFuseConfig;
use crate::core::dataset::{DatasetBuilder, DatasetEnvelope, SplitSettings};
use crate::core::fusion::{FusionEngine, FusionRules};
use crate::core::index::ValueIndexer;
use crate::domain::{LabelFuseError, PageKey, Result};
use crate::{log_stage_complete, log_stage_start};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Result of a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub envelope: DatasetEnvelope,
    pub summary: RunSummary,
}

/// Pipeline coordinator
pub struct Pipeline {
    config: LabelFuseConfig,
    rules: FusionRules,
}

impl Pipeline {
    /// Create a pipeline from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the fusion rules cannot be derived
    pub fn new(config: LabelFuseConfig) -> Result<Self> {
        let rules = FusionRules::from_config(&config.fusion)?;
        Ok(Self { config, rules })
    }

    /// Execute the pipeline and write the dataset unless dry-run is set
    ///
    /// Stages:
    /// 1. Load both exports
    /// 2. Index the value export by page
    /// 3. Fuse structural annotations with the index
    /// 4. Tier and split
    /// 5. Persist the envelope
    pub fn run(&self) -> Result<PipelineOutcome> {
        let start_time = Instant::now();
        let mut outcome = self.build()?;

        if self.config.application.dry_run {
            tracing::info!("Dry run, dataset not written");
        } else {
            log_stage_start!("write");
            let stage = Instant::now();
            write_dataset(
                &outcome.envelope,
                &self.config.output.path,
                self.config.output.pretty,
            )?;
            log_stage_complete!("write", outcome.envelope.metadata.total_annotations, stage.elapsed());
            outcome.summary.output_path = Some(self.config.output.path.clone());
        }

        outcome.summary.duration = start_time.elapsed();
        outcome.summary.log_summary();
        Ok(outcome)
    }

    /// Runs every stage in memory without touching the output path
    pub fn build(&self) -> Result<PipelineOutcome> {
        let start_time = Instant::now();
        let mut summary = RunSummary::new();
        summary.dry_run = self.config.application.dry_run;

        tracing::info!(
            structural = %self.config.input.structural_path.display(),
            values = %self.config.input.values_path.display(),
            "Starting pipeline"
        );

        log_stage_start!("load");
        let stage = Instant::now();
        let loaded = load_exports(
            &self.config.input.structural_path,
            &self.config.input.values_path,
        )?;
        summary.images = loaded.structural.images.len();
        summary.structural_annotations = loaded.structural.annotations.len();
        summary.categories = loaded.structural.categories.len();
        summary.tasks = loaded.values.tasks.len();
        log_stage_complete!("load", summary.structural_annotations, stage.elapsed());

        log_stage_start!("index");
        let stage = Instant::now();
        let indexer = ValueIndexer::new(
            self.config.fusion.fallback_width,
            self.config.fusion.fallback_height,
        );
        let index = indexer.build(&loaded.values);
        summary.pages_indexed = index.len();
        summary.sample_page = loaded
            .values
            .tasks
            .first()
            .map(|task| match task.filename() {
                Some(name) => PageKey::from_filename(name),
                None => PageKey::synthetic(0),
            })
            .and_then(|key| index.get(&key))
            .map(PageSample::from_page);
        log_stage_complete!("index", summary.pages_indexed, stage.elapsed());

        log_stage_start!("fuse");
        let stage = Instant::now();
        let engine = FusionEngine::new(self.rules.clone());
        let fusion = engine.fuse(&loaded.structural, &index);
        summary.fusion = fusion.stats.clone();
        log_stage_complete!("fuse", fusion.annotations.len(), stage.elapsed());

        log_stage_start!("split");
        let stage = Instant::now();
        let envelope = DatasetBuilder::new(SplitSettings::from_config(&self.config.split))
            .value_assignment(self.rules.assignment)
            .sources(vec![loaded.structural_source, loaded.values_source])
            .build(fusion.annotations);
        summary.high_quality = envelope.high_quality.len();
        summary.medium_quality = envelope.medium_quality.len();
        summary.train = envelope.train.len();
        summary.validation = envelope.validation.len();
        log_stage_complete!("split", envelope.metadata.total_annotations, stage.elapsed());

        summary.duration = start_time.elapsed();
        Ok(PipelineOutcome { envelope, summary })
    }
}

/// Serializes `envelope` to `path`, replacing any existing file atomically
///
/// # Errors
///
/// Returns `Serialization` if encoding fails and `Io` if the file cannot be
/// written or moved into place.
pub fn write_dataset(envelope: &DatasetEnvelope, path: &Path, pretty: bool) -> Result<()> {
    let bytes = if pretty {
        serde_json::to_vec_pretty(envelope)
    } else {
        serde_json::to_vec(envelope)
    }
    .map_err(|e| LabelFuseError::Serialization(format!("Failed to encode dataset: {}", e)))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            LabelFuseError::Io(format!(
                "Failed to create output directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path);
    fs::write(&temp_path, &bytes).map_err(|e| {
        LabelFuseError::Io(format!("Failed to write {}: {}", temp_path.display(), e))
    })?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(LabelFuseError::Io(format!(
            "Failed to move dataset into place at {}: {}",
            path.display(),
            e
        )));
    }

    tracing::info!(path = %path.display(), bytes = bytes.len(), "Wrote dataset");
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset.json".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn config_for(dir: &TempDir) -> LabelFuseConfig {
        let mut config = LabelFuseConfig::default();
        config.input.structural_path = write_file(
            dir,
            "coco.json",
            r#"{
                "images": [{"id": 1, "file_name": "pages/p1.png"}],
                "categories": [{"id": 1, "name": "ZONE_CODE"}],
                "annotations": [{"id": 10, "image_id": 1, "category_id": 1, "bbox": [1, 2, 3, 4]}]
            }"#,
        );
        config.input.values_path = write_file(
            dir,
            "ls.json",
            r#"[{"file_upload": "p1.png", "annotations": [{"result": [
                {"type": "textarea", "from_name": "zone_code_text", "value": {"text": ["R-1"], "x": 1, "y": 1}}
            ]}]}]"#,
        );
        config.output.path = dir.path().join("out").join("dataset.json");
        config
    }

    #[test]
    fn test_run_writes_dataset() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir);
        let output = config.output.path.clone();

        let outcome = Pipeline::new(config).unwrap().run().unwrap();
        assert_eq!(outcome.envelope.metadata.total_annotations, 1);
        assert_eq!(outcome.summary.output_path.as_deref(), Some(output.as_path()));
        assert_eq!(outcome.summary.sample_page.as_ref().unwrap().zone_codes, 1);

        let written: DatasetEnvelope =
            serde_json::from_slice(&fs::read(&output).unwrap()).unwrap();
        assert_eq!(written, outcome.envelope);
        assert!(!temp_path_for(&output).exists());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut config = config_for(&dir);
        config.application.dry_run = true;
        let output = config.output.path.clone();

        let outcome = Pipeline::new(config).unwrap().run().unwrap();
        assert!(outcome.summary.dry_run);
        assert!(outcome.summary.output_path.is_none());
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_input_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut config = config_for(&dir);
        config.input.values_path = dir.path().join("absent.json");
        let output = config.output.path.clone();

        let err = Pipeline::new(config).unwrap().run().unwrap_err();
        assert!(matches!(err, LabelFuseError::MissingFile { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn test_invalid_assignment_rejected() {
        let mut config = LabelFuseConfig::default();
        config.fusion.value_assignment = "overlap".to_string();
        assert!(Pipeline::new(config).is_err());
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let temp = temp_path_for(Path::new("/data/out.json"));
        assert_eq!(temp, PathBuf::from("/data/.out.json.tmp"));
    }
}
