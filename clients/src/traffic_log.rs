//! Traffic logging for collaborator API calls
//!
//! Emitted under the `traffic` target at debug level.
//! Content is truncated to avoid leaking private data (and megabytes of
//! base64 image data) into logs.

/// Maximum characters to log for content (to protect privacy)
const MAX_CONTENT_LOG_CHARS: usize = 200;

/// Truncate a string for logging, adding ellipsis if truncated
fn truncate_for_log(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{}... ({} chars total)", truncated, char_count)
    }
}

fn summarize(value: &impl serde::Serialize) -> String {
    let json = serde_json::to_string(value).unwrap_or_else(|_| "<serialization error>".to_string());
    truncate_for_log(&json, MAX_CONTENT_LOG_CHARS)
}

/// Log an upstream request (truncated summary only)
pub fn log_request(service: &str, request: &impl serde::Serialize) {
    tracing::debug!(target: "traffic", "[REQUEST] [{}] {}", service, summarize(request));
}

/// Log an upstream response (truncated summary only)
pub fn log_response(service: &str, response: &impl serde::Serialize) {
    tracing::debug!(target: "traffic", "[RESPONSE] [{}] {}", service, summarize(response));
}

/// Log a binary upstream response by size
pub fn log_binary_response(service: &str, len: usize) {
    tracing::debug!(target: "traffic", "[RESPONSE] [{}] <{} bytes>", service, len);
}

/// Log an upstream error
pub fn log_error(service: &str, error: &str) {
    tracing::debug!(target: "traffic", "[ERROR] [{}] {}", service, error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_content_is_untouched() {
        assert_eq!(truncate_for_log("hello", 10), "hello");
    }

    #[test]
    fn test_long_content_is_truncated_with_count() {
        let long = "a".repeat(250);
        let out = truncate_for_log(&long, 200);
        assert!(out.starts_with(&"a".repeat(200)));
        assert!(out.ends_with("... (250 chars total)"));
    }

    #[test]
    fn test_truncation_counts_chars_not_bytes() {
        let out = truncate_for_log("ééé", 2);
        assert_eq!(out, "éé... (3 chars total)");
    }
}
