//! Speech synthesis provider types

use serde::{Deserialize, Serialize};

/// Versioning header required by the synthesis provider
pub const TTS_VERSION_HEADER: &str = "Cartesia-Version";

/// One selectable synthetic voice, as listed by the upstream catalog
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VoiceDescriptor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default = "default_voice_model")]
    pub model_id: String,
}

fn default_voice_model() -> String {
    "sonic-2".to_string()
}

/// Upstream voice catalog listing
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VoiceCatalog {
    #[serde(default)]
    pub data: Vec<VoiceDescriptor>,
}

/// Inbound synthesis request from the browser
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneratePayload {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub voice_id: Option<String>,
    #[serde(default)]
    pub model_id: Option<String>,
}

impl GeneratePayload {
    /// Returns the transcript and voice id when both are present and non-empty
    pub fn require_fields(&self) -> Option<(&str, &str)> {
        let text = self.text.as_deref().filter(|t| !t.is_empty())?;
        let voice_id = self.voice_id.as_deref().filter(|v| !v.is_empty())?;
        Some((text, voice_id))
    }
}

/// Outbound synthesis request in the provider's wire shape
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SynthesisRequest {
    pub transcript: String,
    pub model_id: String,
    pub voice: VoiceSelector,
    pub output_format: OutputFormat,
}

/// Voice selection by opaque id
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VoiceSelector {
    pub mode: String,
    pub id: String,
}

/// Audio container/encoding requested from the provider
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputFormat {
    pub container: String,
    pub encoding: String,
    pub sample_rate: u32,
}

impl OutputFormat {
    /// The one format the relay ever asks for: 32-bit float PCM in a WAV container
    pub fn wav_pcm_f32() -> Self {
        Self {
            container: "wav".to_string(),
            encoding: "pcm_f32le".to_string(),
            sample_rate: 44100,
        }
    }
}

impl SynthesisRequest {
    pub fn new(text: &str, voice_id: &str, model_id: String) -> Self {
        Self {
            transcript: text.to_string(),
            model_id,
            voice: VoiceSelector {
                mode: "id".to_string(),
                id: voice_id.to_string(),
            },
            output_format: OutputFormat::wav_pcm_f32(),
        }
    }
}
