//! Hosted text-to-speech over the `generateContent` REST endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::service::{SpeechClip, SpeechService};
use crate::{config::NarrationSettings, dsp::pcm::decode_base64_pcm16, error::NarrationError};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechRequest<'a> {
    contents: [Content<'a>; 1],
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [TextPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_modalities: [&'a str; 1],
    speech_config: SpeechConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig<'a> {
    voice_config: VoiceConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig<'a> {
    prebuilt_voice_config: PrebuiltVoice<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoice<'a> {
    voice_name: &'a str,
}

#[derive(Debug, Deserialize)]
struct SpeechResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
struct InlineData {
    data: String,
}

impl SpeechResponse {
    fn audio_payload(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|part| part.inline_data.as_ref())
            .map(|inline| inline.data.as_str())
            .filter(|data| !data.is_empty())
    }
}

pub struct GeminiSpeech {
    client: Client,
    settings: NarrationSettings,
    api_key: String,
}

impl GeminiSpeech {
    pub fn new(settings: NarrationSettings) -> Result<Self, NarrationError> {
        let api_key = settings
            .credential()
            .ok_or(NarrationError::MissingCredential)?
            .to_string();
        let client = Client::builder().timeout(settings.timeout).build()?;

        Ok(Self {
            client,
            settings,
            api_key,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.model
        )
    }

    fn prompt(&self, text: &str) -> String {
        if self.settings.style.is_empty() {
            text.to_string()
        } else {
            format!("{} {}", self.settings.style, text)
        }
    }
}

#[async_trait]
impl SpeechService for GeminiSpeech {
    async fn synthesize(&self, text: &str) -> Result<SpeechClip, NarrationError> {
        let prompt = self.prompt(text);
        let request = SpeechRequest {
            contents: [Content {
                parts: [TextPart { text: &prompt }],
            }],
            generation_config: GenerationConfig {
                response_modalities: ["AUDIO"],
                speech_config: SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoice {
                            voice_name: &self.settings.voice,
                        },
                    },
                },
            },
        };

        let url = self.url();
        debug!(%url, voice = %self.settings.voice, chars = prompt.len(), "requesting narration");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "speech service rejected request");
            return Err(NarrationError::Status {
                status: status.as_u16(),
                message: message.chars().take(200).collect(),
            });
        }

        let body: SpeechResponse = response.json().await?;
        let payload = body.audio_payload().ok_or(NarrationError::EmptyPayload)?;
        let samples = decode_base64_pcm16(payload)?;
        if samples.is_empty() {
            return Err(NarrationError::EmptyPayload);
        }

        let clip = SpeechClip {
            samples,
            sample_rate: self.settings.sample_rate,
        };
        debug!(seconds = clip.duration_secs(), "narration received");
        Ok(clip)
    }
}
