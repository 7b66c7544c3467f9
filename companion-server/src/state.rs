use std::sync::Arc;

use clients::{
    ConversationPartner, ElevenLabsProvider, GeminiProvider, LanguageAnalyzer, SceneGuide,
    SpeechSynthesizer, Unconfigured,
};
use companion_core::{
    ConversationService, Error, FeedbackAggregator, FsGalleryStore, FsProgressStore, GalleryStore, GuidanceFormatter,
    MemoryProgressStore, ProgressStore,
};
use config::{ProgressBackend, Settings};

use crate::error::ApiError;

/// Everything a handler needs, shared behind an `Arc`
pub struct AppState {
    pub progress: Arc<dyn ProgressStore>,
    pub gallery: Arc<dyn GalleryStore>,
    pub feedback: FeedbackAggregator,
    pub guidance: GuidanceFormatter,
    pub conversation: ConversationService,
    pub speech: Arc<dyn SpeechSynthesizer>,
    /// Include error chains in 500 responses
    pub expose_details: bool,
}

impl AppState {
    pub fn new(
        analyzer: Arc<dyn LanguageAnalyzer>,
        guide: Arc<dyn SceneGuide>,
        partner: Arc<dyn ConversationPartner>,
        speech: Arc<dyn SpeechSynthesizer>,
        progress: Arc<dyn ProgressStore>,
        gallery: Arc<dyn GalleryStore>,
    ) -> Self {
        AppState {
            progress,
            gallery,
            feedback: FeedbackAggregator::new(analyzer),
            guidance: GuidanceFormatter::new(guide),
            conversation: ConversationService::new(partner, speech.clone()),
            speech,
            expose_details: true,
        }
    }

    pub fn with_error_details(mut self, expose: bool) -> Self {
        self.expose_details = expose;
        self
    }

    /// Wire up providers and stores from configuration. A missing API key
    /// leaves its routes answering with a configuration error.
    pub async fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let (analyzer, guide, partner): (
            Arc<dyn LanguageAnalyzer>,
            Arc<dyn SceneGuide>,
            Arc<dyn ConversationPartner>,
        ) = match GeminiProvider::from_settings(settings)? {
            Some(gemini) => {
                tracing::info!("Using Gemini model {}", gemini.model_name());
                let gemini = Arc::new(gemini);
                let analyzer: Arc<dyn LanguageAnalyzer> = gemini.clone();
                let guide: Arc<dyn SceneGuide> = gemini.clone();
                let partner: Arc<dyn ConversationPartner> = gemini;
                (analyzer, guide, partner)
            }
            None => {
                tracing::warn!("Gemini API key not configured; Gemini-backed routes are unavailable");
                let fallback = Arc::new(Unconfigured::gemini());
                let analyzer: Arc<dyn LanguageAnalyzer> = fallback.clone();
                let guide: Arc<dyn SceneGuide> = fallback.clone();
                let partner: Arc<dyn ConversationPartner> = fallback;
                (analyzer, guide, partner)
            }
        };

        let speech: Arc<dyn SpeechSynthesizer> = match ElevenLabsProvider::from_settings(settings)? {
            Some(elevenlabs) => Arc::new(elevenlabs),
            None => Arc::new(Unconfigured::elevenlabs()),
        };

        let progress: Arc<dyn ProgressStore> = match settings.progress_backend {
            ProgressBackend::Memory => Arc::new(MemoryProgressStore::new()),
            ProgressBackend::File => {
                let dir = settings.progress_dir();
                tracing::info!("Progress records stored in {}", dir.display());
                Arc::new(FsProgressStore::new(dir))
            }
        };

        let gallery = FsGalleryStore::new(settings.gallery_dir());
        gallery.ensure_root().await;
        let gallery: Arc<dyn GalleryStore> = Arc::new(gallery);

        Ok(Self::new(analyzer, guide, partner, speech, progress, gallery)
            .with_error_details(!settings.is_production()))
    }

    /// Error mapper for a route whose failures read as `summary`
    pub fn fail(&self, summary: &'static str) -> impl Fn(Error) -> ApiError + '_ {
        move |err| ApiError::from_core(err, summary, self.expose_details)
    }
}
