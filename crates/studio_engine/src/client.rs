use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::{json, Value};

use studio_core::{GenerationRequest, Operation, Placement, RawResponse};
use studio_logging::{studio_debug, studio_info};

use crate::types::{ProviderError, ProviderFailure};

#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub submit_timeout: Duration,
    /// Timeout for the lightweight existence probe.
    pub check_timeout: Duration,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: "https://engine.prod.bria-api.com/v1".to_string(),
            connect_timeout: Duration::from_secs(10),
            submit_timeout: Duration::from_secs(30),
            check_timeout: Duration::from_secs(5),
        }
    }
}

/// Raw, un-normalized provider access.
#[async_trait::async_trait]
pub trait ProviderClient: Send + Sync {
    /// Submit one generation request and return the raw response body.
    async fn submit(&self, request: &GenerationRequest) -> Result<RawResponse, ProviderError>;

    /// Existence probe for a result URL: true only on an explicit OK status.
    ///
    /// Best effort. Any error or other status means "not yet ready" and is
    /// never re-raised; the provider may 404 transiently.
    async fn check_ready(&self, url: &str) -> bool;

    /// Ask the provider to rewrite a prompt for better generations.
    async fn enhance_prompt(
        &self,
        credential: &str,
        prompt: &str,
    ) -> Result<Option<String>, ProviderError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestProviderClient {
    settings: ProviderSettings,
}

impl ReqwestProviderClient {
    pub fn new(settings: ProviderSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self, timeout: Duration) -> Result<reqwest::Client, ProviderError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(timeout)
            .build()
            .map_err(|err| ProviderError::new(ProviderFailure::Network, err.to_string()))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    async fn post_json(
        &self,
        path: &str,
        credential: &str,
        body: Value,
    ) -> Result<RawResponse, ProviderError> {
        let client = self.build_client(self.settings.submit_timeout)?;
        let response = client
            .post(self.endpoint(path))
            .header("api_token", credential)
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::UNPROCESSABLE_ENTITY {
            return Err(ProviderError::new(
                ProviderFailure::ModerationBlocked,
                "request rejected by content moderation",
            ));
        }
        if !status.is_success() {
            return Err(ProviderError::new(
                ProviderFailure::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        response
            .json::<Value>()
            .await
            .map_err(|err| ProviderError::new(ProviderFailure::Network, err.to_string()))
    }
}

#[async_trait::async_trait]
impl ProviderClient for ReqwestProviderClient {
    async fn submit(&self, request: &GenerationRequest) -> Result<RawResponse, ProviderError> {
        let (path, body) = request_body(request);
        studio_info!(
            "submit op={} sync={} count={}",
            request.kind(),
            request.synchronous,
            request.requested_count
        );
        self.post_json(path, &request.credential, body).await
    }

    async fn check_ready(&self, url: &str) -> bool {
        let Ok(parsed) = reqwest::Url::parse(url) else {
            return false;
        };
        let Ok(client) = self.build_client(self.settings.check_timeout) else {
            return false;
        };
        match client.head(parsed).send().await {
            Ok(response) => response.status() == reqwest::StatusCode::OK,
            Err(err) => {
                studio_debug!("existence check failed for {url}: {err}");
                false
            }
        }
    }

    async fn enhance_prompt(
        &self,
        credential: &str,
        prompt: &str,
    ) -> Result<Option<String>, ProviderError> {
        let raw = self
            .post_json("prompt_enhancer", credential, json!({ "prompt": prompt }))
            .await?;
        Ok(extract_enhanced_prompt(&raw))
    }
}

/// Operation-specific wire path and JSON body. Image and mask bytes travel
/// base64-encoded in the `file` / `mask_file` / `ref_image_file` fields.
fn request_body(request: &GenerationRequest) -> (&'static str, Value) {
    let count = request.requested_count;
    let sync = request.synchronous;
    match &request.operation {
        Operation::Generate(p) => (
            "text-to-image/hd",
            json!({
                "prompt": p.prompt,
                "num_results": count,
                "aspect_ratio": p.aspect_ratio,
                "sync": sync,
                "enhance_image": p.enhance_image,
                "medium": p.medium,
                "prompt_enhancement": p.prompt_enhancement,
                "content_moderation": p.content_moderation,
            }),
        ),
        Operation::Packshot(p) => (
            "product/packshot",
            json!({
                "file": BASE64.encode(&p.image),
                "background_color": p.background_color,
                "sku": p.sku,
                "force_rmbg": p.force_rmbg,
                "content_moderation": p.content_moderation,
                "sync": sync,
            }),
        ),
        Operation::Shadow(p) => (
            "product/shadow",
            json!({
                "file": BASE64.encode(&p.image),
                "shadow_type": p.style.as_str(),
                "background_color": p.background_color,
                "shadow_color": p.shadow_color,
                "shadow_offset": p.offset,
                "shadow_intensity": p.intensity,
                "shadow_blur": p.blur,
                "sku": p.sku,
                "force_rmbg": p.force_rmbg,
                "content_moderation": p.content_moderation,
                "sync": sync,
            }),
        ),
        Operation::LifestyleByText(p) => {
            let mut body = json!({
                "file": BASE64.encode(&p.image),
                "scene_description": p.scene_description,
                "num_results": count,
                "sync": sync,
                "fast": p.fast,
                "optimize_description": p.optimize_description,
                "exclude_elements": p.exclude_elements,
                "original_quality": p.original_quality,
            });
            merge(&mut body, placement_fields(&p.placement));
            ("product/lifestyle_shot_by_text", body)
        }
        Operation::LifestyleByImage(p) => {
            let mut body = json!({
                "file": BASE64.encode(&p.image),
                "ref_image_file": BASE64.encode(&p.reference_image),
                "num_results": count,
                "sync": sync,
                "enhance_ref_image": p.enhance_ref_image,
                "ref_image_influence": p.ref_image_influence,
                "original_quality": p.original_quality,
            });
            merge(&mut body, placement_fields(&p.placement));
            ("product/lifestyle_shot_by_image", body)
        }
        Operation::GenerativeFill(p) => (
            "gen_fill",
            json!({
                "file": BASE64.encode(&p.image),
                "mask_file": BASE64.encode(&p.mask),
                "prompt": p.prompt,
                "negative_prompt": p.negative_prompt,
                "num_results": count,
                "sync": sync,
                "seed": p.seed,
                "content_moderation": p.content_moderation,
            }),
        ),
        Operation::Erase(p) => (
            "erase_foreground",
            json!({
                "file": BASE64.encode(&p.image),
                "mask_file": BASE64.encode(&p.mask),
                "content_moderation": p.content_moderation,
                "sync": sync,
            }),
        ),
    }
}

/// The provider expects the full placement field set on every lifestyle
/// call; variants fill in their own values and leave the rest at defaults.
fn placement_fields(placement: &Placement) -> Value {
    match placement {
        Placement::Original => json!({
            "placement_type": "original",
            "shot_size": [1000, 1000],
            "manual_placement_selection": ["upper_left"],
            "padding_values": [0, 0, 0, 0],
        }),
        Placement::Automatic { shot_size } => json!({
            "placement_type": "automatic",
            "shot_size": shot_size,
            "manual_placement_selection": ["upper_left"],
            "padding_values": [0, 0, 0, 0],
        }),
        Placement::Manual {
            positions,
            shot_size,
        } => json!({
            "placement_type": "manual_placement",
            "shot_size": shot_size,
            "manual_placement_selection": positions,
            "padding_values": [0, 0, 0, 0],
        }),
        Placement::Padding { padding } => json!({
            "placement_type": "manual_padding",
            "shot_size": [1000, 1000],
            "manual_placement_selection": ["upper_left"],
            "padding_values": padding,
        }),
        Placement::Coordinates {
            foreground_size,
            foreground_location,
            shot_size,
        } => json!({
            "placement_type": "custom_coordinates",
            "shot_size": shot_size,
            "manual_placement_selection": ["upper_left"],
            "padding_values": [0, 0, 0, 0],
            "foreground_image_size": foreground_size,
            "foreground_image_location": foreground_location,
        }),
    }
}

fn merge(base: &mut Value, extra: Value) {
    if let (Some(base), Some(extra)) = (base.as_object_mut(), extra.as_object()) {
        for (key, value) in extra {
            base.insert(key.clone(), value.clone());
        }
    }
}

/// The enhancement endpoint drifts between response keys too.
fn extract_enhanced_prompt(raw: &Value) -> Option<String> {
    raw.get("enhanced_prompt")
        .or_else(|| raw.get("result"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn map_reqwest_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        return ProviderError::new(ProviderFailure::Timeout, err.to_string());
    }
    if err.is_builder() {
        return ProviderError::new(ProviderFailure::InvalidUrl, err.to_string());
    }
    ProviderError::new(ProviderFailure::Network, err.to_string())
}
