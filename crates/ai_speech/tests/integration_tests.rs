//! Integration tests for ai_speech crate
//!
//! Tests synthesis against a mocked translate_tts endpoint.

use ai_speech::{AudioFormat, GoogleTranslateTts, SpeechConfig, SpeechError, TextToSpeech};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Create a test configuration pointing to mock server
fn test_config(base_url: &str) -> SpeechConfig {
    SpeechConfig {
        base_url: base_url.to_string(),
        timeout_ms: 2000,
        ..Default::default()
    }
}

/// Create mock MP3 audio data (minimal MP3 frame header)
fn mock_mp3_audio(marker: u8) -> Vec<u8> {
    vec![0xFF, 0xFB, 0x90, 0x00, marker, marker]
}

fn mp3_response(marker: u8) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "audio/mpeg")
        .set_body_bytes(mock_mp3_audio(marker))
}

#[tokio::test]
async fn synthesize_short_hindi_text() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .and(query_param("tl", "hi"))
        .and(query_param("client", "tw-ob"))
        .and(query_param("q", "नमस्ते"))
        .and(query_param("total", "1"))
        .and(query_param("idx", "0"))
        .respond_with(mp3_response(1))
        .expect(1)
        .mount(&server)
        .await;

    let tts = GoogleTranslateTts::new(test_config(&server.uri())).unwrap();
    let audio = tts.synthesize("नमस्ते", None).await.unwrap();

    assert_eq!(audio.format(), AudioFormat::Mp3);
    assert_eq!(audio.data(), mock_mp3_audio(1).as_slice());
}

#[tokio::test]
async fn long_text_is_chunked_and_concatenated_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .and(query_param("idx", "0"))
        .and(query_param("total", "2"))
        .respond_with(mp3_response(1))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .and(query_param("idx", "1"))
        .and(query_param("total", "2"))
        .respond_with(mp3_response(2))
        .expect(1)
        .mount(&server)
        .await;

    let config = SpeechConfig {
        max_chunk_chars: 20,
        ..test_config(&server.uri())
    };
    let tts = GoogleTranslateTts::new(config).unwrap();
    let audio = tts
        .synthesize("Pehla vaakya hai. Doosra vaakya hai.", None)
        .await
        .unwrap();

    let mut expected = mock_mp3_audio(1);
    expected.extend(mock_mp3_audio(2));
    assert_eq!(audio.into_data(), expected);
}

#[tokio::test]
async fn same_text_twice_gives_independent_buffers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .respond_with(mp3_response(7))
        .expect(2)
        .mount(&server)
        .await;

    let tts = GoogleTranslateTts::new(test_config(&server.uri())).unwrap();
    let first = tts.synthesize("haan ji", None).await.unwrap();
    let second = tts.synthesize("haan ji", None).await.unwrap();

    assert!(!first.is_empty());
    assert!(!second.is_empty());
    assert_eq!(first, second);
}

#[tokio::test]
async fn language_override_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .and(query_param("tl", "en"))
        .respond_with(mp3_response(3))
        .expect(1)
        .mount(&server)
        .await;

    let tts = GoogleTranslateTts::new(test_config(&server.uri())).unwrap();
    assert!(tts.synthesize("hello", Some("en")).await.is_ok());
}

#[tokio::test]
async fn empty_text_is_rejected_without_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(mp3_response(1))
        .expect(0)
        .mount(&server)
        .await;

    let tts = GoogleTranslateTts::new(test_config(&server.uri())).unwrap();
    let err = tts.synthesize("", None).await.unwrap_err();

    assert!(matches!(err, SpeechError::SynthesisFailed(_)));
}

#[tokio::test]
async fn rate_limit_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let tts = GoogleTranslateTts::new(test_config(&server.uri())).unwrap();
    let err = tts.synthesize("kuch", None).await.unwrap_err();

    assert!(matches!(err, SpeechError::RateLimited));
}

#[tokio::test]
async fn server_error_is_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let tts = GoogleTranslateTts::new(test_config(&server.uri())).unwrap();
    let err = tts.synthesize("kuch", None).await.unwrap_err();

    assert!(matches!(err, SpeechError::ServiceUnavailable(_)));
}

#[tokio::test]
async fn html_captcha_page_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=UTF-8")
                .set_body_string("<html>unusual traffic</html>"),
        )
        .mount(&server)
        .await;

    let tts = GoogleTranslateTts::new(test_config(&server.uri())).unwrap();
    let err = tts.synthesize("kuch", None).await.unwrap_err();

    assert!(matches!(err, SpeechError::InvalidResponse(_)));
}

#[tokio::test]
async fn empty_body_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "audio/mpeg"))
        .mount(&server)
        .await;

    let tts = GoogleTranslateTts::new(test_config(&server.uri())).unwrap();
    let err = tts.synthesize("kuch", None).await.unwrap_err();

    assert!(matches!(err, SpeechError::InvalidResponse(_)));
}
