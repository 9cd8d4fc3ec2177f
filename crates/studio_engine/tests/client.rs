use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use pretty_assertions::assert_eq;
use serde_json::json;
use studio_core::{GeneratePayload, GenerationRequest, Operation, PackshotPayload};
use studio_engine::{ProviderClient, ProviderFailure, ProviderSettings, ReqwestProviderClient};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> ProviderSettings {
    ProviderSettings {
        base_url: server.uri(),
        ..ProviderSettings::default()
    }
}

fn generate_request(sync: bool, count: u32) -> GenerationRequest {
    GenerationRequest::new(
        "secret-token",
        Operation::Generate(GeneratePayload {
            prompt: "a red car".to_string(),
            ..GeneratePayload::default()
        }),
        sync,
        count,
    )
}

#[tokio::test]
async fn submit_posts_operation_body_and_returns_raw_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/text-to-image/hd"))
        .and(header("api_token", "secret-token"))
        .and(body_partial_json(json!({
            "prompt": "a red car",
            "num_results": 2,
            "sync": true,
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "result_urls": ["u1", "u2"] })),
        )
        .mount(&server)
        .await;

    let client = ReqwestProviderClient::new(settings_for(&server));
    let raw = client
        .submit(&generate_request(true, 2))
        .await
        .expect("submit ok");
    assert_eq!(raw["result_urls"][0], "u1");
    assert_eq!(raw["result_urls"][1], "u2");
}

#[tokio::test]
async fn submit_encodes_image_payloads_as_base64() {
    let server = MockServer::start().await;
    let image = vec![0x89u8, 0x50, 0x4e, 0x47];
    Mock::given(method("POST"))
        .and(path("/product/packshot"))
        .and(body_partial_json(json!({
            "file": BASE64.encode(&image),
            "background_color": "#FFFFFF",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result_url": "u" })))
        .mount(&server)
        .await;

    let request = GenerationRequest::new(
        "secret-token",
        Operation::Packshot(PackshotPayload {
            image,
            background_color: "#FFFFFF".to_string(),
            sku: None,
            force_rmbg: false,
            content_moderation: false,
        }),
        true,
        1,
    );

    let client = ReqwestProviderClient::new(settings_for(&server));
    let raw = client.submit(&request).await.expect("submit ok");
    assert_eq!(raw["result_url"], "u");
}

#[tokio::test]
async fn submit_maps_422_to_moderation_blocked() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(422))
        .mount(&server)
        .await;

    let client = ReqwestProviderClient::new(settings_for(&server));
    let err = client
        .submit(&generate_request(true, 1))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ProviderFailure::ModerationBlocked);
}

#[tokio::test]
async fn submit_surfaces_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = ReqwestProviderClient::new(settings_for(&server));
    let err = client
        .submit(&generate_request(false, 4))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ProviderFailure::HttpStatus(500));
}

#[tokio::test]
async fn submit_times_out_on_slow_provider() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({ "result_url": "late" })),
        )
        .mount(&server)
        .await;

    let settings = ProviderSettings {
        submit_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let client = ReqwestProviderClient::new(settings);
    let err = client
        .submit(&generate_request(true, 1))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ProviderFailure::Timeout);
}

#[tokio::test]
async fn check_ready_is_true_only_on_status_ok() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/img/done"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/img/not-yet"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = ReqwestProviderClient::new(settings_for(&server));
    assert!(client.check_ready(&format!("{}/img/done", server.uri())).await);
    assert!(
        !client
            .check_ready(&format!("{}/img/not-yet", server.uri()))
            .await
    );
}

#[tokio::test]
async fn check_ready_swallows_transport_failures() {
    studio_logging::initialize_for_tests();
    let client = ReqwestProviderClient::new(ProviderSettings {
        check_timeout: Duration::from_millis(100),
        ..ProviderSettings::default()
    });

    // Nothing listens here; the probe must report "not ready", not fail.
    assert!(!client.check_ready("http://127.0.0.1:9/img").await);
    assert!(!client.check_ready("not a url at all").await);
}

#[tokio::test]
async fn enhance_prompt_reads_known_response_keys() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/prompt_enhancer"))
        .and(body_partial_json(json!({ "prompt": "car" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "enhanced_prompt": "a glossy red car" })),
        )
        .mount(&server)
        .await;

    let client = ReqwestProviderClient::new(settings_for(&server));
    let enhanced = client
        .enhance_prompt("secret-token", "car")
        .await
        .expect("enhance ok");
    assert_eq!(enhanced.as_deref(), Some("a glossy red car"));
}

#[tokio::test]
async fn enhance_prompt_is_none_on_unknown_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/prompt_enhancer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "variants": [1, 2] })))
        .mount(&server)
        .await;

    let client = ReqwestProviderClient::new(settings_for(&server));
    let enhanced = client
        .enhance_prompt("secret-token", "car")
        .await
        .expect("enhance ok");
    assert_eq!(enhanced, None);
}
