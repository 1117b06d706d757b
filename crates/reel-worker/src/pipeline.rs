//! The reel generation pipeline.
//!
//! One request runs start to finish as a strictly sequential state
//! machine; any step's failure short-circuits to `Failed`. Temporary
//! assets (narration audio, silent visual track) live in a per-request
//! workspace that is released on every exit path. The finished reel is
//! staged inside the workspace and only moved to the caller's output
//! path after a successful mux, so no partial file ever lands there.

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use validator::Validate;

use reel_media::{
    audio_duration_or_floor, build_schedule, build_visual_track, mux_reel, DrawTextSpec,
    ReelWorkspace, VisualTrackSpec,
};
use reel_models::{EncodingConfig, ReelRequest, RequestId};
use reel_speech::{SpeechSynthesizer, Translator};

use crate::config::WorkerConfig;
use crate::error::{Stage, WorkerError, WorkerResult};

/// Sequential reel generation pipeline with injected collaborators.
pub struct ReelPipeline {
    translator: Arc<dyn Translator>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    config: WorkerConfig,
    encoding: EncodingConfig,
}

impl ReelPipeline {
    /// Create a pipeline with the given adapters and configuration.
    pub fn new(
        translator: Arc<dyn Translator>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        config: WorkerConfig,
    ) -> Self {
        Self {
            translator,
            synthesizer,
            config,
            encoding: EncodingConfig::default(),
        }
    }

    /// Override the encoding configuration.
    pub fn with_encoding(mut self, encoding: EncodingConfig) -> Self {
        self.encoding = encoding;
        self
    }

    /// Generate one reel. Returns the output path on success.
    ///
    /// Errors carry the failing [`Stage`]; the pipeline boundary never
    /// panics for bad input or collaborator failures.
    pub async fn generate(&self, request: &ReelRequest) -> WorkerResult<PathBuf> {
        let request_id = RequestId::new();

        // Validating: rejected before any external call or temp file.
        self.log_stage(&request_id, Stage::Validating);
        self.validate(request)?;

        let workspace =
            ReelWorkspace::in_dir(&self.config.work_dir).map_err(WorkerError::Workspace)?;

        let result = self.run_stages(request, &request_id, &workspace).await;

        // Cleanup runs on success and failure alike, best effort.
        self.log_stage(&request_id, Stage::Cleanup);
        workspace.cleanup();

        match &result {
            Ok(path) => {
                self.log_stage(&request_id, Stage::Done);
                info!(request_id = %request_id, output = %path.display(), "Reel generated");
            }
            Err(e) => {
                self.log_stage(&request_id, Stage::Failed);
                error!(
                    request_id = %request_id,
                    failed_stage = %e.stage(),
                    error = %e,
                    diagnostics = e.diagnostics().unwrap_or(""),
                    "Reel generation failed"
                );
            }
        }

        result
    }

    fn validate(&self, request: &ReelRequest) -> WorkerResult<()> {
        request
            .validate()
            .map_err(|e| WorkerError::invalid_input(e.to_string()))?;
        if !request.has_text() {
            return Err(WorkerError::invalid_input("reel text must be non-empty"));
        }
        Ok(())
    }

    async fn run_stages(
        &self,
        request: &ReelRequest,
        request_id: &RequestId,
        workspace: &ReelWorkspace,
    ) -> WorkerResult<PathBuf> {
        self.log_stage(request_id, Stage::Translating);
        let translated = self
            .translator
            .translate(&request.text, &request.target_language)
            .await
            .map_err(WorkerError::Translation)?;

        self.log_stage(request_id, Stage::SynthesizingAudio);
        let audio_path = workspace.audio_path();
        self.synthesizer
            .synthesize(&translated, &request.target_language, &audio_path)
            .await
            .map_err(WorkerError::Synthesis)?;

        // Soft step: probe failure falls back to the floor duration.
        self.log_stage(request_id, Stage::ProbingDuration);
        let duration = audio_duration_or_floor(&audio_path).await;

        self.log_stage(request_id, Stage::SegmentingCaptions);
        let schedule = build_schedule(&translated, duration);
        let overlays = DrawTextSpec::from_schedule(&schedule, request.font_size);

        self.log_stage(request_id, Stage::RenderingVisualTrack);
        let visual_path = workspace.visual_path();
        let spec = VisualTrackSpec {
            duration,
            background_color: request.background_color.clone(),
            background_image: request.background_image_path.clone(),
            overlays,
        };
        build_visual_track(&spec, &self.encoding, &visual_path)
            .await
            .map_err(WorkerError::Render)?;

        self.log_stage(request_id, Stage::Muxing);
        let staged = workspace.staged_output_path();
        mux_reel(&visual_path, &audio_path, &self.encoding, &staged)
            .await
            .map_err(WorkerError::Mux)?;

        workspace
            .publish(&staged, &request.output_path)
            .await
            .map_err(WorkerError::Publish)?;

        Ok(request.output_path.clone())
    }

    fn log_stage(&self, request_id: &RequestId, stage: Stage) {
        info!(request_id = %request_id, stage = %stage, "Pipeline stage");
    }
}
