/// Deserialization tests for `generateContent` payloads as returned by the
/// public API.
#[cfg(test)]
mod unit {
    use crate::types::{GenerateContentRequest, GenerateContentResponse};
    use crate::GeminiError;

    fn parse(json: &str) -> GenerateContentResponse {
        serde_json::from_str(json).expect("failed to parse response")
    }

    #[test]
    fn request_body_shape() {
        let req = GenerateContentRequest::from_prompt("write a haiku");
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "write a haiku");
    }

    #[test]
    fn parse_full_response() {
        let resp = parse(
            r#"{
                "candidates": [{
                    "content": {"role": "model", "parts": [{"text": "feat: add login"}]},
                    "finishReason": "STOP"
                }],
                "usageMetadata": {
                    "promptTokenCount": 120,
                    "candidatesTokenCount": 8,
                    "totalTokenCount": 128
                },
                "modelVersion": "gemma-3-27b-it"
            }"#,
        );
        assert_eq!(resp.text().as_deref(), Some("feat: add login"));
        let usage = resp.usage_metadata.unwrap();
        assert_eq!(usage.prompt_token_count, 120);
        assert_eq!(usage.total_token_count, 128);
        assert_eq!(resp.candidates[0].finish_reason.as_deref(), Some("STOP"));
    }

    #[test]
    fn text_uses_first_candidate_only() {
        let resp = parse(
            r#"{"candidates": [
                {"content": {"parts": [{"text": "first"}]}},
                {"content": {"parts": [{"text": "second"}]}}
            ]}"#,
        );
        assert_eq!(resp.text().as_deref(), Some("first"));
    }

    #[test]
    fn safety_blocked_candidate_has_no_text() {
        // Blocked candidates come back without a content object.
        let resp = parse(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#);
        assert_eq!(resp.text(), None);
    }

    #[test]
    fn non_text_parts_are_skipped() {
        let resp = parse(
            r#"{"candidates": [{"content": {"parts": [
                {"inlineData": {"mimeType": "image/png", "data": "AAAA"}},
                {"text": "caption"}
            ]}}]}"#,
        );
        assert_eq!(resp.text().as_deref(), Some("caption"));
    }

    #[test]
    fn missing_candidates_defaults_to_empty() {
        let resp = parse("{}");
        assert!(resp.candidates.is_empty());
        assert_eq!(resp.text(), None);
    }

    #[test]
    fn quota_classification_by_status_string() {
        let err = GeminiError::Api {
            status: 403,
            code: Some("RESOURCE_EXHAUSTED".into()),
            message: "per-minute limit".into(),
        };
        assert!(err.is_quota());

        let err = GeminiError::Api {
            status: 400,
            code: Some("INVALID_ARGUMENT".into()),
            message: "bad model".into(),
        };
        assert!(!err.is_quota());

        assert!(!GeminiError::EmptyResponse {
            model: "m".into()
        }
        .is_quota());
    }
}
