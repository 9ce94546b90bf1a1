use std::time::Duration;

use serde_json::json;
use wiremock::{
    matchers::{body_partial_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

use resonance::{
    config::NarrationSettings,
    narration::{GeminiSpeech, SpeechService},
    NarrationError,
};

const SPEECH_PATH: &str = "/models/gemini-2.5-flash-preview-tts:generateContent";

fn speech_for(server: &MockServer) -> GeminiSpeech {
    GeminiSpeech::new(NarrationSettings {
        endpoint: server.uri(),
        api_key: Some("test-key".into()),
        timeout: Duration::from_secs(5),
        ..NarrationSettings::default()
    })
    .unwrap()
}

fn audio_body(data: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {
                "parts": [{
                    "inlineData": { "mimeType": "audio/L16;codec=pcm;rate=24000", "data": data }
                }]
            }
        }]
    })
}

#[tokio::test]
async fn decodes_returned_pcm() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SPEECH_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_partial_json(json!({
            "generationConfig": {
                "responseModalities": ["AUDIO"],
                "speechConfig": { "voiceConfig": { "prebuiltVoiceConfig": { "voiceName": "Kore" } } }
            }
        })))
        // 0x4000, 0xC000, 0x7FFF little-endian
        .respond_with(ResponseTemplate::new(200).set_body_json(audio_body("AEAAwP9/")))
        .expect(1)
        .mount(&server)
        .await;

    let clip = speech_for(&server).synthesize("Ineffable.").await.unwrap();

    assert_eq!(clip.sample_rate, 24_000);
    assert_eq!(clip.samples.len(), 3);
    assert_eq!(clip.samples[0], 0.5);
    assert_eq!(clip.samples[1], -0.5);
    assert!(clip.samples[2] > 0.99);
}

#[tokio::test]
async fn error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SPEECH_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exhausted"))
        .mount(&server)
        .await;

    let err = speech_for(&server).synthesize("hello").await.unwrap_err();

    match err {
        NarrationError::Status { status, message } => {
            assert_eq!(status, 429);
            assert!(message.contains("quota"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn response_without_audio_is_empty_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SPEECH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "I can't do that" }] } }]
        })))
        .mount(&server)
        .await;

    let err = speech_for(&server).synthesize("hello").await.unwrap_err();
    assert!(matches!(err, NarrationError::EmptyPayload));
}

#[tokio::test]
async fn malformed_audio_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SPEECH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(audio_body("not base64!")))
        .mount(&server)
        .await;

    let err = speech_for(&server).synthesize("hello").await.unwrap_err();
    assert!(matches!(err, NarrationError::Decode(_)));
}
