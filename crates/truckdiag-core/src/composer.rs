//! Diagnosis composition.
//!
//! The composer builds a prompt, asks the oracle, and turns the outcome
//! into a [`DiagnosisResult`]. Its failure policy:
//!
//! - Code diagnosis never fails. No oracle, an oracle error, or an answer
//!   that does not decode all yield the fixed fallback diagnosis.
//! - Photo diagnosis follows the same policy, except that an answer
//!   flagging the photo as invalid becomes [`DiagnosisError::InvalidImage`].
//! - Chat never fails. Failures become a fixed reply text.
//!
//! All substitution happens in [`recover`]; nothing else swallows errors.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, Instrument};
use truckdiag_catalog::PartResolver;
use truckdiag_oracle::{
    ChatRequest, DiagnosisOracle, GeminiClient, InlineImage, OracleConfig, OracleError,
    StructuredRequest,
};
use uuid::Uuid;

use crate::domain::{
    ChatTurn, DiagnosisError, DiagnosisResult, FaultCodeData, Language, Result, TruckBrand,
};
use crate::enrich::{enrich, EnrichedDiagnosis};
use crate::fallback::{fallback_diagnosis, CONNECTION_ERROR_REPLY, DEMO_CHAT_REPLY};
use crate::{obs, prompt};

/// Which composer entry point handled a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosisMode {
    Code,
    Image,
    Chat,
}

impl std::fmt::Display for DiagnosisMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DiagnosisMode::Code => "code",
            DiagnosisMode::Image => "image",
            DiagnosisMode::Chat => "chat",
        };
        write!(f, "{}", s)
    }
}

/// Where a returned diagnosis came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosisSource {
    Oracle,
    Fallback,
}

impl std::fmt::Display for DiagnosisSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DiagnosisSource::Oracle => "oracle",
            DiagnosisSource::Fallback => "fallback",
        };
        write!(f, "{}", s)
    }
}

/// Simulated latencies used when no oracle is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposerSettings {
    pub code_delay: Duration,
    pub image_delay: Duration,
    pub chat_delay: Duration,
}

impl Default for ComposerSettings {
    fn default() -> Self {
        ComposerSettings {
            code_delay: Duration::from_millis(1500),
            image_delay: Duration::from_millis(2000),
            chat_delay: Duration::from_millis(1000),
        }
    }
}

impl ComposerSettings {
    /// No simulated latency.
    pub fn instant() -> Self {
        ComposerSettings {
            code_delay: Duration::ZERO,
            image_delay: Duration::ZERO,
            chat_delay: Duration::ZERO,
        }
    }
}

/// Composes diagnoses and chat replies on top of an optional oracle.
#[derive(Clone)]
pub struct DiagnosisComposer {
    oracle: Option<Arc<dyn DiagnosisOracle>>,
    resolver: PartResolver<'static>,
    settings: ComposerSettings,
}

impl std::fmt::Debug for DiagnosisComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosisComposer")
            .field("demo", &self.is_demo())
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl DiagnosisComposer {
    pub fn new(oracle: Option<Arc<dyn DiagnosisOracle>>) -> Self {
        DiagnosisComposer {
            oracle,
            resolver: PartResolver::orion(),
            settings: ComposerSettings::default(),
        }
    }

    /// Composer with no oracle.
    pub fn demo() -> Self {
        Self::new(None)
    }

    pub fn with_oracle(oracle: Arc<dyn DiagnosisOracle>) -> Self {
        Self::new(Some(oracle))
    }

    /// Gemini-backed composer, or a demo composer when `config` has no key.
    pub fn from_config(config: OracleConfig) -> Result<Self> {
        match GeminiClient::new(config) {
            Ok(client) => Ok(Self::with_oracle(Arc::new(client))),
            Err(OracleError::NotConfigured) => Ok(Self::demo()),
            Err(e) => Err(DiagnosisError::OracleSetup(e)),
        }
    }

    pub fn with_settings(mut self, settings: ComposerSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Swap the catalog used for enrichment.
    ///
    /// The resolver's catalog is validated against its own rule set first.
    pub fn with_resolver(mut self, resolver: PartResolver<'static>) -> Result<Self> {
        resolver.catalog().validate(resolver.rules())?;
        self.resolver = resolver;
        Ok(self)
    }

    /// True when no oracle is configured.
    pub fn is_demo(&self) -> bool {
        self.oracle.is_none()
    }

    pub fn resolver(&self) -> &PartResolver<'static> {
        &self.resolver
    }

    /// Diagnose a fault code. Always produces a result.
    pub async fn diagnose_from_code(
        &self,
        code: &FaultCodeData,
        brand: TruckBrand,
        model: Option<&str>,
        lang: Language,
    ) -> DiagnosisResult {
        let request_id = Uuid::new_v4().to_string();
        self.code_diagnosis(code, brand, model, lang)
            .instrument(obs::diagnosis_span(&request_id, DiagnosisMode::Code))
            .await
    }

    async fn code_diagnosis(
        &self,
        code: &FaultCodeData,
        brand: TruckBrand,
        model: Option<&str>,
        lang: Language,
    ) -> DiagnosisResult {
        let started = Instant::now();
        obs::emit_diagnosis_started(DiagnosisMode::Code, brand.as_str(), model);
        note_unknown_model(brand, model);

        let outcome = match &self.oracle {
            None => {
                sleep(self.settings.code_delay).await;
                Err(OracleError::NotConfigured)
            }
            Some(oracle) => {
                let code_string = code.code_string();
                debug!(code = %code_string, "asking oracle");
                let request = StructuredRequest::new(
                    prompt::code_prompt(&code_string, brand, model, lang),
                    prompt::diagnosis_schema(),
                );
                oracle.generate_structured(request).await.and_then(decode)
            }
        };

        let (result, source) = recover(DiagnosisMode::Code, outcome);
        finish(DiagnosisMode::Code, source, &result, started);
        result
    }

    /// Diagnose a photo of a dashboard, scanner screen or part.
    ///
    /// Fails only with [`DiagnosisError::InvalidImage`].
    pub async fn diagnose_from_image(
        &self,
        image: Vec<u8>,
        brand: TruckBrand,
        model: Option<&str>,
        lang: Language,
    ) -> Result<DiagnosisResult> {
        let request_id = Uuid::new_v4().to_string();
        self.image_diagnosis(image, brand, model, lang)
            .instrument(obs::diagnosis_span(&request_id, DiagnosisMode::Image))
            .await
    }

    async fn image_diagnosis(
        &self,
        image: Vec<u8>,
        brand: TruckBrand,
        model: Option<&str>,
        lang: Language,
    ) -> Result<DiagnosisResult> {
        let started = Instant::now();
        obs::emit_diagnosis_started(DiagnosisMode::Image, brand.as_str(), model);
        note_unknown_model(brand, model);
        let fingerprint = obs::image_fingerprint(&image);

        let outcome = match &self.oracle {
            None => {
                sleep(self.settings.image_delay).await;
                Err(OracleError::NotConfigured)
            }
            Some(oracle) => {
                debug!(image = %fingerprint, bytes = image.len(), "asking oracle");
                let request = StructuredRequest::new(
                    prompt::image_prompt(brand, model, lang),
                    prompt::diagnosis_schema(),
                )
                .with_image(InlineImage::sniff(image));

                match oracle.generate_structured(request).await {
                    Ok(value) if prompt::is_rejection(&value) => {
                        obs::emit_diagnosis_rejected(&fingerprint);
                        return Err(DiagnosisError::InvalidImage);
                    }
                    answer => answer.and_then(decode),
                }
            }
        };

        let (result, source) = recover(DiagnosisMode::Image, outcome);
        finish(DiagnosisMode::Image, source, &result, started);
        Ok(result)
    }

    /// Reply to `message` given the prior conversation. Always produces text.
    pub async fn chat(
        &self,
        history: &[ChatTurn],
        message: &str,
        brand: TruckBrand,
        model: Option<&str>,
        lang: Language,
    ) -> String {
        let request_id = Uuid::new_v4().to_string();
        self.chat_reply(history, message, brand, model, lang)
            .instrument(obs::diagnosis_span(&request_id, DiagnosisMode::Chat))
            .await
    }

    async fn chat_reply(
        &self,
        history: &[ChatTurn],
        message: &str,
        brand: TruckBrand,
        model: Option<&str>,
        lang: Language,
    ) -> String {
        let Some(oracle) = &self.oracle else {
            sleep(self.settings.chat_delay).await;
            obs::emit_demo_mode(DiagnosisMode::Chat);
            return DEMO_CHAT_REPLY.to_string();
        };

        let request = ChatRequest {
            system_instruction: prompt::chat_instruction(brand, model, lang),
            history: history.iter().map(ChatTurn::to_oracle).collect(),
            message: message.to_string(),
        };
        match oracle.chat(request).await {
            Ok(reply) => reply,
            Err(e) => {
                obs::emit_chat_failed(&e);
                CONNECTION_ERROR_REPLY.to_string()
            }
        }
    }

    /// Attach the matching catalog part to a diagnosis.
    pub fn enrich(&self, diagnosis: DiagnosisResult) -> EnrichedDiagnosis {
        enrich(diagnosis, &self.resolver)
    }

    /// [`diagnose_from_code`](Self::diagnose_from_code) followed by [`enrich`](Self::enrich).
    pub async fn diagnose_code_enriched(
        &self,
        code: &FaultCodeData,
        brand: TruckBrand,
        model: Option<&str>,
        lang: Language,
    ) -> EnrichedDiagnosis {
        let diagnosis = self.diagnose_from_code(code, brand, model, lang).await;
        self.enrich(diagnosis)
    }

    /// [`diagnose_from_image`](Self::diagnose_from_image) followed by [`enrich`](Self::enrich).
    pub async fn diagnose_image_enriched(
        &self,
        image: Vec<u8>,
        brand: TruckBrand,
        model: Option<&str>,
        lang: Language,
    ) -> Result<EnrichedDiagnosis> {
        let diagnosis = self.diagnose_from_image(image, brand, model, lang).await?;
        Ok(self.enrich(diagnosis))
    }
}

/// Decode an oracle answer into a diagnosis.
fn decode(value: serde_json::Value) -> std::result::Result<DiagnosisResult, OracleError> {
    Ok(serde_json::from_value(value)?)
}

/// Substitute the fallback for any oracle outcome that is not a diagnosis.
pub(crate) fn recover(
    mode: DiagnosisMode,
    outcome: std::result::Result<DiagnosisResult, OracleError>,
) -> (DiagnosisResult, DiagnosisSource) {
    match outcome {
        Ok(result) => (result, DiagnosisSource::Oracle),
        Err(OracleError::NotConfigured) => {
            obs::emit_demo_mode(mode);
            (fallback_diagnosis(), DiagnosisSource::Fallback)
        }
        Err(e) => {
            obs::emit_diagnosis_fallback(mode, &e);
            (fallback_diagnosis(), DiagnosisSource::Fallback)
        }
    }
}

fn finish(mode: DiagnosisMode, source: DiagnosisSource, result: &DiagnosisResult, started: Instant) {
    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    obs::emit_diagnosis_finished(mode, source, result.severity, duration_ms);
}

fn note_unknown_model(brand: TruckBrand, model: Option<&str>) {
    if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
        if !brand.knows_model(model) {
            debug!(brand = %brand, model = %model, "model not in fleet list");
        }
    }
}
