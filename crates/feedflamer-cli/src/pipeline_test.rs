use std::path::Path;

use chrono::NaiveDate;
use feedflamer_core::SpeechRate;
use feedflamer_voice::GoogleTtsClient;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

const SCRIPT: &str = "HOST: Welcome to the show.\nALEX: Engagement is low.\nMAYA: Agreed.";

struct Services {
    feed: MockServer,
    openai: MockServer,
    tts: MockServer,
}

impl Services {
    async fn start() -> Self {
        Self {
            feed: MockServer::start().await,
            openai: MockServer::start().await,
            tts: MockServer::start().await,
        }
    }

    async fn mount_feed(&self) {
        Mock::given(method("GET"))
            .and(path("/2/users/by/username/jack"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {
                    "id": "12",
                    "name": "jack",
                    "username": "jack",
                    "verified": true,
                    "description": "just setting up",
                    "public_metrics": { "followers_count": 50_000 }
                }
            })))
            .mount(&self.feed)
            .await;

        Mock::given(method("GET"))
            .and(path("/2/users/12/tweets"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    { "id": "3", "text": "first post", "public_metrics": { "like_count": 10, "retweet_count": 1, "reply_count": 0 } },
                    { "id": "2", "text": "second post", "public_metrics": { "like_count": 20, "retweet_count": 2, "reply_count": 1 } }
                ],
                "meta": { "result_count": 2 }
            })))
            .mount(&self.feed)
            .await;
    }

    async fn mount_openai(&self, status: u16) {
        let template = if status == 200 {
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{ "message": { "role": "assistant", "content": SCRIPT } }]
            }))
        } else {
            ResponseTemplate::new(status)
        };
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(template)
            .mount(&self.openai)
            .await;
    }

    async fn mount_tts(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path_regex("^/translate_tts$"))
            .respond_with(ResponseTemplate::new(status).set_body_bytes(b"MP3".to_vec()))
            .mount(&self.tts)
            .await;
    }
}

struct Clients {
    feed: FeedClient,
    narrative: NarrativeClient,
    tts: GoogleTtsClient,
    roster: Roster,
    voices: VoiceMap,
}

impl Clients {
    fn new(services: &Services) -> Self {
        Self {
            feed: FeedClient::with_base_url("token", 5, &services.feed.uri()).unwrap(),
            narrative: NarrativeClient::with_base_url("key", "gpt-4", 5, &services.openai.uri())
                .unwrap(),
            tts: GoogleTtsClient::with_base_url(5, &services.tts.uri()).unwrap(),
            roster: Roster::default(),
            voices: VoiceMap::with_defaults("en", SpeechRate::Normal),
        }
    }

    fn pipeline(&self, output_dir: &Path) -> Pipeline<'_, GoogleTtsClient> {
        Pipeline {
            feed: &self.feed,
            narrative: &self.narrative,
            synthesizer: &self.tts,
            roster: &self.roster,
            voices: &self.voices,
            settings: PipelineSettings {
                output_dir: output_dir.to_path_buf(),
                script_prefix: "twitter_critique".to_owned(),
                max_tokens: 1500,
                temperature: 0.8,
                render_mode: RenderMode::Sequential,
            },
        }
    }
}

fn started_at() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 7)
        .unwrap()
        .and_hms_opt(9, 5, 2)
        .unwrap()
}

fn request(render_audio: bool) -> PodcastRequest {
    PodcastRequest {
        handle: "@jack".to_owned(),
        post_count: 10,
        render_audio,
    }
}

fn files_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[tokio::test]
async fn completes_with_sidecar_and_sequential_audio() {
    let services = Services::start().await;
    services.mount_feed().await;
    services.mount_openai(200).await;
    services.mount_tts(200).await;
    let clients = Clients::new(&services);
    let out = tempfile::tempdir().unwrap();

    let outcome = clients
        .pipeline(out.path())
        .run_podcast(&request(true), started_at())
        .await;

    let (handle, post_count, transcript_path, audio) = match outcome {
        PodcastOutcome::Completed {
            handle,
            post_count,
            transcript_path,
            audio,
            ..
        } => (handle, post_count, transcript_path, audio),
        other => panic!("expected completion, got {other:?}"),
    };
    assert_eq!(handle, "jack");
    assert_eq!(post_count, 2);
    assert_eq!(
        files_in(out.path()),
        vec![
            "twitter_critique_jack_20250307_090502.mp3",
            "twitter_critique_jack_20250307_090502.txt"
        ]
    );

    let sidecar = std::fs::read_to_string(&transcript_path).unwrap();
    assert!(sidecar.starts_with("Twitter Critique Podcast: @jack\nGenerated: 2025-03-07 09:05:02\n"));
    assert!(sidecar.ends_with(SCRIPT));

    let audio = audio.expect("audio requested");
    assert_eq!(audio.clip_count, 3);
    assert_eq!(audio.transcript_path.as_deref(), Some(transcript_path.as_path()));
    assert_eq!(std::fs::read(&audio.path).unwrap(), b"MP3MP3MP3");
}

#[tokio::test]
async fn script_only_run_skips_synthesis() {
    let services = Services::start().await;
    services.mount_feed().await;
    services.mount_openai(200).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&services.tts)
        .await;
    let clients = Clients::new(&services);
    let out = tempfile::tempdir().unwrap();

    let outcome = clients
        .pipeline(out.path())
        .run_podcast(&request(false), started_at())
        .await;

    assert!(matches!(outcome, PodcastOutcome::Completed { audio: None, .. }));
    assert_eq!(
        files_in(out.path()),
        vec!["twitter_critique_jack_20250307_090502.txt"]
    );
}

#[tokio::test]
async fn synthesis_failure_keeps_sidecar_and_cleans_clips() {
    let services = Services::start().await;
    services.mount_feed().await;
    services.mount_openai(200).await;
    services.mount_tts(500).await;
    let clients = Clients::new(&services);
    let out = tempfile::tempdir().unwrap();

    let outcome = clients
        .pipeline(out.path())
        .run_podcast(&request(true), started_at())
        .await;

    let (stage, message, transcript_path) = match outcome {
        PodcastOutcome::Failed {
            stage,
            message,
            transcript_path,
        } => (stage, message, transcript_path),
        other => panic!("expected failure, got {other:?}"),
    };
    assert_eq!(stage, Stage::Synthesis);
    assert!(message.contains("500"), "{message}");
    let transcript_path = transcript_path.expect("sidecar written before synthesis");
    assert!(transcript_path.exists());
    assert_eq!(
        files_in(out.path()),
        vec!["twitter_critique_jack_20250307_090502.txt"]
    );
}

#[tokio::test]
async fn unknown_user_fails_at_lookup_without_files() {
    let services = Services::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "errors": [{ "title": "Not Found Error", "detail": "Could not find user" }]
        })))
        .mount(&services.feed)
        .await;
    let clients = Clients::new(&services);
    let out = tempfile::tempdir().unwrap();

    let outcome = clients
        .pipeline(out.path())
        .run_podcast(&request(true), started_at())
        .await;

    assert!(
        matches!(
            outcome,
            PodcastOutcome::Failed {
                stage: Stage::Lookup,
                transcript_path: None,
                ..
            }
        ),
        "got {outcome:?}"
    );
    assert!(files_in(out.path()).is_empty());
}

#[tokio::test]
async fn generator_error_fails_at_generation() {
    let services = Services::start().await;
    services.mount_feed().await;
    services.mount_openai(401).await;
    let clients = Clients::new(&services);
    let out = tempfile::tempdir().unwrap();

    let outcome = clients
        .pipeline(out.path())
        .run_podcast(&request(true), started_at())
        .await;

    assert!(
        matches!(
            outcome,
            PodcastOutcome::Failed {
                stage: Stage::Generation,
                transcript_path: None,
                ..
            }
        ),
        "got {outcome:?}"
    );
    assert!(files_in(out.path()).is_empty());
}

#[test]
fn stage_names() {
    assert_eq!(Stage::Lookup.to_string(), "lookup");
    assert_eq!(Stage::Synthesis.to_string(), "synthesis");
    let err = PipelineError::Fetch(FeedError::NoPosts {
        user_id: "1".to_owned(),
    });
    assert_eq!(err.stage(), Stage::Fetch);
    assert_eq!(err.to_string(), "fetching posts failed: no recent posts for user 1");
}
