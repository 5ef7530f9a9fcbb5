// src/services/generation_client.rs
use crate::errors::AdsmithError;
use crate::models::{EncodedImage, GenerationRequest, MarketingDraft};
use crate::services::gemini::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    GenerationService, ImageConfig, Part,
};
use log::{error, info, warn};
use serde_json::{Value, json};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

const ANALYSIS_INSTRUCTION: &str = "Perform a Deep Vision Analysis of this product. \
Analyze materials, vibe, color theory, and target audience.";

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Wait after the 0-indexed `attempt` failed: base, 2x base, 4x base...
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}

#[derive(Debug)]
pub enum AttemptOutcome<T> {
    Success(T),
    Retryable(AdsmithError),
    Terminal(AdsmithError),
}

impl<T> From<Result<T, AdsmithError>> for AttemptOutcome<T> {
    fn from(result: Result<T, AdsmithError>) -> Self {
        match result {
            Ok(value) => AttemptOutcome::Success(value),
            Err(e) if e.is_retryable() => AttemptOutcome::Retryable(e),
            Err(e) => AttemptOutcome::Terminal(e),
        }
    }
}

/// Runs `attempt` until it succeeds, fails terminally, or the policy runs
/// out. The last retryable error is returned when every attempt failed.
pub async fn retry_with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    label: &str,
    mut attempt: F,
) -> Result<T, AdsmithError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = AttemptOutcome<T>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut last_error = AdsmithError::NoOutput;

    for i in 0..max_attempts {
        match attempt(i).await {
            AttemptOutcome::Success(value) => return Ok(value),
            AttemptOutcome::Terminal(e) => {
                error!("{} attempt {} failed terminally: {}", label, i + 1, e);
                return Err(e);
            }
            AttemptOutcome::Retryable(e) => {
                warn!("{} attempt {} failed: {}", label, i + 1, e);
                last_error = e;
                if i + 1 < max_attempts {
                    tokio::time::sleep(policy.delay_after(i)).await;
                }
            }
        }
    }

    Err(last_error)
}

pub fn classify_response(response: &GenerateContentResponse) -> AttemptOutcome<String> {
    let Some(candidate) = response.first_candidate() else {
        return AttemptOutcome::Retryable(AdsmithError::NoOutput);
    };
    if let Some(image) = candidate.first_image() {
        return AttemptOutcome::Success(format!("data:{};base64,{}", image.mime_type, image.data));
    }
    if let Some(text) = candidate.text() {
        return AttemptOutcome::Terminal(AdsmithError::ModelResponse(text));
    }
    if let Some(reason) = candidate.finished_abnormally() {
        return AttemptOutcome::Terminal(AdsmithError::GenerationBlocked(reason.to_string()));
    }
    AttemptOutcome::Retryable(AdsmithError::NoOutput)
}

/// Context for the analysis call when several product images are selected.
pub fn bundle_context(image_count: usize) -> String {
    if image_count > 1 {
        format!(
            "Note: {} images provided. Treat as a bundle/combo. Focus description on value and variety.",
            image_count
        )
    } else {
        String::new()
    }
}

pub fn marketing_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "productName": { "type": "STRING" },
            "longDescription": {
                "type": "STRING",
                "description": "A highly persuasive, long-form sales description (100-150 words). Use 2-3 paragraphs. Focus on emotional hooks, key features, and lifestyle benefits."
            },
            "keywords": {
                "type": "STRING",
                "description": "10 comma-separated SEO tags"
            },
            "visualHook": {
                "type": "STRING",
                "description": "A short, punchy, 3-5 word headline suitable for overlaying ON the image"
            }
        },
        "propertyOrdering": ["productName", "longDescription", "keywords", "visualHook"]
    })
}

pub struct GenerationClient {
    service: Arc<dyn GenerationService>,
    text_model: String,
    image_model: String,
    retry: RetryPolicy,
}

impl GenerationClient {
    pub fn new(
        service: Arc<dyn GenerationService>,
        text_model: impl Into<String>,
        image_model: impl Into<String>,
    ) -> Self {
        Self {
            service,
            text_model: text_model.into(),
            image_model: image_model.into(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Single-attempt vision analysis. `Ok(None)` when the model returned no text.
    pub async fn analyze_marketing(
        &self,
        image: &EncodedImage,
        extra_context: &str,
    ) -> Result<Option<MarketingDraft>, AdsmithError> {
        let start = Instant::now();
        let instruction = match extra_context.trim() {
            "" => ANALYSIS_INSTRUCTION.to_string(),
            context => format!("{}\n{}", ANALYSIS_INSTRUCTION, context),
        };

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part::text(instruction), Part::inline(image)],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(marketing_schema()),
                image_config: None,
            }),
        };

        let response = self
            .service
            .generate_content(&self.text_model, &request)
            .await
            .inspect_err(|e| error!("Marketing analysis failed: {}", e))?;

        let Some(text) = response.text() else {
            warn!("Marketing analysis returned no text");
            return Ok(None);
        };
        let draft: MarketingDraft = serde_json::from_str(&text)?;

        info!(
            "Marketing analysis finished in {}ms",
            start.elapsed().as_millis()
        );
        Ok(Some(draft))
    }

    /// Synthesizes the creative and returns it as a data URI.
    pub async fn generate_creative(
        &self,
        request: &GenerationRequest,
    ) -> Result<String, AdsmithError> {
        let start = Instant::now();
        let mut parts = Vec::with_capacity(request.images.len() + 1);
        parts.push(Part::text(request.prompt.clone()));
        parts.extend(request.images.iter().map(Part::inline));

        let payload = GenerateContentRequest {
            contents: vec![Content { parts }],
            generation_config: request.aspect_ratio.as_ref().map(|ratio| GenerationConfig {
                image_config: Some(ImageConfig {
                    aspect_ratio: ratio.clone(),
                }),
                ..GenerationConfig::default()
            }),
        };

        let service = &self.service;
        let model = self.image_model.as_str();
        let payload = &payload;
        let image = retry_with_backoff(&self.retry, "Creative generation", move |_| async move {
            match service.generate_content(model, payload).await {
                Ok(response) => classify_response(&response),
                Err(e) => AttemptOutcome::from(Err::<String, _>(e)),
            }
        })
        .await?;

        info!(
            "Creative generated in {}ms with {} reference images",
            start.elapsed().as_millis(),
            request.images.len()
        );
        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::gemini::{Candidate, InlineData};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    type Reply = Result<GenerateContentResponse, AdsmithError>;

    #[derive(Default)]
    struct ScriptedService {
        replies: Mutex<VecDeque<Reply>>,
        calls: Mutex<Vec<(String, GenerateContentRequest)>>,
    }

    impl ScriptedService {
        fn new(replies: Vec<Reply>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                calls: Mutex::default(),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl GenerationService for ScriptedService {
        async fn generate_content(
            &self,
            model: &str,
            request: &GenerateContentRequest,
        ) -> Result<GenerateContentResponse, AdsmithError> {
            self.calls
                .lock()
                .unwrap()
                .push((model.to_string(), request.clone()));
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(AdsmithError::Transport("script exhausted".into())))
        }
    }

    fn client(service: Arc<ScriptedService>) -> GenerationClient {
        GenerationClient::new(service, "text-model", "image-model")
    }

    fn candidate(parts: Vec<Part>, finish_reason: Option<&str>) -> GenerateContentResponse {
        GenerateContentResponse {
            candidates: vec![Candidate {
                content: Some(Content { parts }),
                finish_reason: finish_reason.map(str::to_string),
            }],
        }
    }

    fn image_reply(mime: &str, data: &str) -> Reply {
        Ok(candidate(
            vec![Part {
                text: None,
                inline_data: Some(InlineData {
                    mime_type: mime.into(),
                    data: data.into(),
                }),
            }],
            Some("STOP"),
        ))
    }

    fn transport(n: u8) -> Reply {
        Err(AdsmithError::Transport(format!("connection reset #{n}")))
    }

    fn request() -> GenerationRequest {
        GenerationRequest {
            prompt: "make an ad".into(),
            images: vec![
                EncodedImage::new("image/png", "P1"),
                EncodedImage::new("image/jpeg", "LOGO"),
            ],
            aspect_ratio: Some("1:1".into()),
        }
    }

    #[test]
    fn backoff_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_after(0), Duration::from_secs(1));
        assert_eq!(policy.delay_after(1), Duration::from_secs(2));
        assert_eq!(policy.delay_after(2), Duration::from_secs(4));
    }

    #[test]
    fn classifier_prefers_image_then_text_then_reason() {
        let both = candidate(
            vec![
                Part::text("caption"),
                Part::inline(&EncodedImage::new("image/png", "IMG")),
            ],
            Some("STOP"),
        );
        assert!(matches!(classify_response(&both), AttemptOutcome::Success(uri) if uri == "data:image/png;base64,IMG"));

        let text = candidate(vec![Part::text("I can't")], Some("SAFETY"));
        assert!(matches!(
            classify_response(&text),
            AttemptOutcome::Terminal(AdsmithError::ModelResponse(t)) if t == "I can't"
        ));

        let blocked = candidate(vec![], Some("IMAGE_SAFETY"));
        assert!(matches!(
            classify_response(&blocked),
            AttemptOutcome::Terminal(AdsmithError::GenerationBlocked(r)) if r == "IMAGE_SAFETY"
        ));

        let empty = candidate(vec![], Some("STOP"));
        assert!(matches!(
            classify_response(&empty),
            AttemptOutcome::Retryable(AdsmithError::NoOutput)
        ));

        assert!(matches!(
            classify_response(&GenerateContentResponse::default()),
            AttemptOutcome::Retryable(AdsmithError::NoOutput)
        ));
    }

    #[test]
    fn bundle_context_only_for_several_images() {
        assert_eq!(bundle_context(1), "");
        assert!(bundle_context(3).starts_with("Note: 3 images provided."));
    }

    #[tokio::test(start_paused = true)]
    async fn image_reply_is_returned_as_data_uri() {
        let service = ScriptedService::new(vec![image_reply("image/webp", "UklGRg==")]);
        let started = tokio::time::Instant::now();
        let uri = client(service.clone())
            .generate_creative(&request())
            .await
            .unwrap();
        assert_eq!(uri, "data:image/webp;base64,UklGRg==");
        assert_eq!(service.call_count(), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn payload_is_prompt_then_images_with_aspect_ratio() {
        let service = ScriptedService::new(vec![image_reply("image/png", "X")]);
        client(service.clone())
            .generate_creative(&request())
            .await
            .unwrap();

        let calls = service.calls.lock().unwrap();
        let (model, sent) = &calls[0];
        assert_eq!(model, "image-model");
        let value = serde_json::to_value(sent).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [{ "parts": [
                    { "text": "make an ad" },
                    { "inlineData": { "mimeType": "image/png", "data": "P1" } },
                    { "inlineData": { "mimeType": "image/jpeg", "data": "LOGO" } }
                ]}],
                "generationConfig": { "imageConfig": { "aspectRatio": "1:1" } }
            })
        );
    }

    #[tokio::test]
    async fn no_aspect_ratio_means_no_config() {
        let service = ScriptedService::new(vec![image_reply("image/png", "X")]);
        let mut req = request();
        req.aspect_ratio = None;
        client(service.clone()).generate_creative(&req).await.unwrap();
        let calls = service.calls.lock().unwrap();
        assert!(calls[0].1.generation_config.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn text_reply_fails_immediately() {
        let service = ScriptedService::new(vec![
            Ok(candidate(vec![Part::text("I cannot generate that.")], Some("STOP"))),
            image_reply("image/png", "never"),
        ]);
        let started = tokio::time::Instant::now();
        let err = client(service.clone())
            .generate_creative(&request())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Model Response: I cannot generate that.");
        assert_eq!(service.call_count(), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn blocked_reply_fails_immediately() {
        let service = ScriptedService::new(vec![Ok(candidate(vec![], Some("SAFETY")))]);
        let err = client(service.clone())
            .generate_creative(&request())
            .await
            .unwrap_err();
        assert!(matches!(err, AdsmithError::GenerationBlocked(ref r) if r == "SAFETY"));
        assert_eq!(service.call_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn transport_errors_retry_with_backoff() {
        let service = ScriptedService::new(vec![
            transport(1),
            transport(2),
            image_reply("image/png", "FINAL"),
        ]);
        let started = tokio::time::Instant::now();
        let uri = client(service.clone())
            .generate_creative(&request())
            .await
            .unwrap();
        assert_eq!(uri, "data:image/png;base64,FINAL");
        assert_eq!(service.call_count(), 3);
        assert_eq!(started.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn empty_reply_is_retried() {
        let service = ScriptedService::new(vec![
            Ok(GenerateContentResponse::default()),
            image_reply("image/png", "OK"),
        ]);
        let started = tokio::time::Instant::now();
        let uri = client(service.clone())
            .generate_creative(&request())
            .await
            .unwrap();
        assert_eq!(uri, "data:image/png;base64,OK");
        assert_eq!(started.elapsed(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_retries_return_last_error() {
        let service = ScriptedService::new(vec![transport(1), transport(2), transport(3)]);
        let started = tokio::time::Instant::now();
        let err = client(service.clone())
            .generate_creative(&request())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Transport error: connection reset #3");
        assert_eq!(service.call_count(), 3);
        assert_eq!(started.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn refusal_after_transport_error_stops_the_loop() {
        let service = ScriptedService::new(vec![
            transport(1),
            Ok(candidate(vec![Part::text("No.")], None)),
            image_reply("image/png", "never"),
        ]);
        let err = client(service.clone())
            .generate_creative(&request())
            .await
            .unwrap_err();
        assert!(matches!(err, AdsmithError::ModelResponse(_)));
        assert_eq!(service.call_count(), 2);
    }

    #[tokio::test]
    async fn analysis_parses_structured_reply() {
        let service = ScriptedService::new(vec![Ok(candidate(
            vec![Part::text(
                r#"{"productName":"Bamboo Mug","longDescription":"Warm.","keywords":"mug, bamboo","visualHook":"Sip Sustainably"}"#,
            )],
            Some("STOP"),
        ))]);
        let draft = client(service.clone())
            .analyze_marketing(&EncodedImage::new("image/png", "P1"), &bundle_context(2))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(draft.product_name, "Bamboo Mug");
        assert_eq!(draft.visual_hook, "Sip Sustainably");

        let calls = service.calls.lock().unwrap();
        let (model, sent) = &calls[0];
        assert_eq!(model, "text-model");
        let parts = &sent.contents[0].parts;
        assert_eq!(parts.len(), 2);
        let instruction = parts[0].text.as_deref().unwrap();
        assert!(instruction.starts_with("Perform a Deep Vision Analysis"));
        assert!(instruction.contains("Treat as a bundle/combo"));
        assert_eq!(parts[1].inline_data.as_ref().unwrap().mime_type, "image/png");
        let config = sent.generation_config.as_ref().unwrap();
        assert_eq!(config.response_mime_type.as_deref(), Some("application/json"));
        assert_eq!(
            config.response_schema.as_ref().unwrap()["propertyOrdering"],
            json!(["productName", "longDescription", "keywords", "visualHook"])
        );
    }

    #[tokio::test]
    async fn analysis_without_text_is_none() {
        let service = ScriptedService::new(vec![Ok(GenerateContentResponse::default())]);
        let draft = client(service)
            .analyze_marketing(&EncodedImage::new("image/png", "P1"), "")
            .await
            .unwrap();
        assert!(draft.is_none());
    }

    #[tokio::test]
    async fn analysis_errors_propagate_without_retry() {
        let service = ScriptedService::new(vec![
            Err(AdsmithError::Upstream {
                status: 500,
                body: "boom".into(),
            }),
            Ok(GenerateContentResponse::default()),
        ]);
        let err = client(service.clone())
            .analyze_marketing(&EncodedImage::new("image/png", "P1"), "")
            .await
            .unwrap_err();
        assert!(matches!(err, AdsmithError::Upstream { status: 500, ref body } if body == "boom"));
        assert_eq!(service.call_count(), 1);
    }

    #[tokio::test]
    async fn malformed_analysis_json_is_a_serialization_error() {
        let service = ScriptedService::new(vec![Ok(candidate(
            vec![Part::text("not json")],
            Some("STOP"),
        ))]);
        let err = client(service)
            .analyze_marketing(&EncodedImage::new("image/png", "P1"), "")
            .await
            .unwrap_err();
        assert!(matches!(err, AdsmithError::Serialization(_)));
    }
}
