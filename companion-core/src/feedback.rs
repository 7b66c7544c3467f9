//! Language feedback: ask the analyzer, then normalize whatever came back

use std::sync::Arc;

use clients::LanguageAnalyzer;
use serde::Serialize;
use serde_json::{Number, Value};

use crate::{Error, Result};

const DEFAULT_TARGET_LANGUAGE: &str = "en";
const DEFAULT_LEVEL: &str = "intermediate";
const NO_PRONUNCIATION_FEEDBACK: &str = "No pronunciation feedback available";
const AUDIO_NOTE: &str = "Audio analysis would be enhanced with additional speech processing";

/// Normalized feedback. Every field is always present on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackResult {
    pub score: Number,
    pub feedback: String,
    pub phonemes: Vec<Value>,
    pub grammar: GrammarFeedback,
    pub vocabulary: VocabularyFeedback,
    pub pronunciation: PronunciationFeedback,
    pub cultural: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrammarFeedback {
    pub corrections: Vec<Value>,
    pub score: Number,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VocabularyFeedback {
    pub suggestions: Vec<Value>,
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PronunciationFeedback {
    pub score: Number,
    pub feedback: String,
}

pub struct FeedbackAggregator {
    analyzer: Arc<dyn LanguageAnalyzer>,
}

impl FeedbackAggregator {
    pub fn new(analyzer: Arc<dyn LanguageAnalyzer>) -> Self {
        Self { analyzer }
    }

    /// Raw analysis of `text`, with a pronunciation note when audio came along.
    /// A blank `target_language` falls back to English.
    pub async fn analyze_feedback(
        &self,
        text: Option<&str>,
        target_language: Option<&str>,
        audio_data: Option<&str>,
    ) -> Result<Value> {
        let text = match text {
            Some(t) if !t.trim().is_empty() => t,
            _ => return Err(Error::validation("Text is required")),
        };
        let target_language = target_language
            .filter(|l| !l.trim().is_empty())
            .unwrap_or(DEFAULT_TARGET_LANGUAGE);

        tracing::debug!(target_language, chars = text.len(), "Analyzing feedback");
        let mut analysis = self
            .analyzer
            .analyze_language(text, target_language)
            .await
            .map_err(Error::AnalysisFailure)?;

        if audio_data.is_some_and(|a| !a.is_empty()) {
            annotate_audio(&mut analysis);
        }
        Ok(analysis)
    }

    pub async fn analyze_and_format(
        &self,
        text: Option<&str>,
        target_language: Option<&str>,
        audio_data: Option<&str>,
    ) -> Result<FeedbackResult> {
        let analysis = self.analyze_feedback(text, target_language, audio_data).await?;
        Ok(format_feedback(&analysis))
    }

    /// The cultural note of an analysis of `text`, empty when the analyzer gave none
    pub async fn cultural_context(
        &self,
        text: Option<&str>,
        target_language: Option<&str>,
    ) -> Result<String> {
        let analysis = self.analyze_feedback(text, target_language, None).await?;
        Ok(format_feedback(&analysis).cultural)
    }
}

fn annotate_audio(analysis: &mut Value) {
    let Some(obj) = analysis.as_object_mut() else {
        return;
    };
    let pronunciation = obj
        .entry("pronunciation")
        .or_insert_with(|| Value::Object(Default::default()));
    if !pronunciation.is_object() {
        *pronunciation = Value::Object(Default::default());
    }
    if let Some(p) = pronunciation.as_object_mut() {
        p.insert("note".into(), Value::String(AUDIO_NOTE.into()));
    }
}

/// Total over any JSON: missing, null or wrongly typed pieces take their defaults
pub fn format_feedback(analysis: &Value) -> FeedbackResult {
    let pronunciation = analysis.get("pronunciation");
    let grammar = analysis.get("grammar");
    let vocabulary = analysis.get("vocabulary");

    let pronunciation_score = pronunciation.and_then(|p| score_of(p.get("score")));
    let pronunciation_feedback = pronunciation.and_then(|p| text_of(p.get("feedback")));

    FeedbackResult {
        score: score_of(analysis.get("score"))
            .or_else(|| pronunciation_score.clone())
            .unwrap_or_else(zero),
        feedback: text_of(analysis.get("feedback"))
            .or_else(|| pronunciation_feedback.clone())
            .unwrap_or_default(),
        phonemes: list_of(analysis.get("phonemes"))
            .or_else(|| pronunciation.and_then(|p| list_of(p.get("phonemes"))))
            .unwrap_or_default(),
        grammar: GrammarFeedback {
            corrections: grammar.and_then(|g| list_of(g.get("errors"))).unwrap_or_default(),
            score: grammar.and_then(|g| score_of(g.get("score"))).unwrap_or_else(zero),
        },
        vocabulary: VocabularyFeedback {
            suggestions: vocabulary
                .and_then(|v| list_of(v.get("suggestions")))
                .unwrap_or_default(),
            level: vocabulary
                .and_then(|v| text_of(v.get("level")))
                .unwrap_or_else(|| DEFAULT_LEVEL.to_string()),
        },
        pronunciation: PronunciationFeedback {
            score: pronunciation_score.unwrap_or_else(zero),
            feedback: pronunciation_feedback.unwrap_or_else(|| NO_PRONUNCIATION_FEEDBACK.to_string()),
        },
        cultural: cultural_of(analysis.get("cultural")),
    }
}

fn zero() -> Number {
    Number::from(0)
}

/// Numbers pass through; numeric strings are parsed
fn score_of(value: Option<&Value>) -> Option<Number> {
    match value? {
        Value::Number(n) => Some(n.clone()),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .map(Number::from)
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(Number::from_f64))
        }
        _ => None,
    }
}

fn text_of(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn list_of(value: Option<&Value>) -> Option<Vec<Value>> {
    value.and_then(Value::as_array).cloned()
}

fn cultural_of(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(v) => text_of(v.get("context")).unwrap_or_default(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    struct StubAnalyzer {
        response: Value,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl StubAnalyzer {
        fn new(response: Value) -> Arc<Self> {
            Arc::new(Self {
                response,
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LanguageAnalyzer for StubAnalyzer {
        async fn analyze_language(&self, text: &str, target_language: &str) -> anyhow::Result<Value> {
            self.calls
                .lock()
                .unwrap()
                .push((text.to_string(), target_language.to_string()));
            Ok(self.response.clone())
        }
    }

    struct FailingAnalyzer;

    #[async_trait]
    impl LanguageAnalyzer for FailingAnalyzer {
        async fn analyze_language(&self, _text: &str, _target_language: &str) -> anyhow::Result<Value> {
            Err(anyhow::anyhow!("quota exceeded"))
        }
    }

    #[test]
    fn test_format_feedback_is_total() {
        for input in [json!({}), json!(null), json!(42), json!("text"), json!([1, 2])] {
            let result = format_feedback(&input);
            assert_eq!(result.score, zero());
            assert_eq!(result.feedback, "");
            assert!(result.phonemes.is_empty());
            assert_eq!(result.vocabulary.level, "intermediate");
            assert_eq!(result.pronunciation.feedback, "No pronunciation feedback available");
            assert_eq!(result.cultural, "");
        }
    }

    #[test]
    fn test_format_feedback_wrong_types_default() {
        let result = format_feedback(&json!({
            "score": true,
            "feedback": 7,
            "phonemes": "ah",
            "grammar": {"errors": "none", "score": []},
            "vocabulary": "rich",
            "pronunciation": 3
        }));
        assert_eq!(result.score, zero());
        assert_eq!(result.feedback, "");
        assert!(result.phonemes.is_empty());
        assert!(result.grammar.corrections.is_empty());
        assert_eq!(result.grammar.score, zero());
        assert_eq!(result.vocabulary.level, "intermediate");
    }

    #[test]
    fn test_format_feedback_falls_back_to_pronunciation() {
        let result = format_feedback(&json!({
            "pronunciation": {
                "score": 72,
                "feedback": "Soften the r",
                "phonemes": [{"phoneme": "r", "accuracy": 0.4}]
            }
        }));
        assert_eq!(result.score, Number::from(72));
        assert_eq!(result.feedback, "Soften the r");
        assert_eq!(result.phonemes, vec![json!({"phoneme": "r", "accuracy": 0.4})]);
        assert_eq!(result.pronunciation.score, Number::from(72));
        assert_eq!(result.pronunciation.feedback, "Soften the r");
    }

    #[test]
    fn test_format_feedback_prefers_top_level() {
        let result = format_feedback(&json!({
            "score": "88",
            "feedback": "Great",
            "pronunciation": {"score": 10, "feedback": "meh"}
        }));
        assert_eq!(result.score, Number::from(88));
        assert_eq!(result.feedback, "Great");
        assert_eq!(result.pronunciation.score, Number::from(10));
    }

    #[test]
    fn test_format_feedback_sections() {
        let result = format_feedback(&json!({
            "grammar": {"errors": [{"original": "I goed", "correction": "I went"}], "score": 65.5},
            "vocabulary": {"suggestions": ["went"], "level": "beginner"},
            "cultural": {"context": "Informal register"}
        }));
        assert_eq!(result.grammar.corrections.len(), 1);
        assert_eq!(serde_json::to_value(&result.grammar.score).unwrap(), json!(65.5));
        assert_eq!(result.vocabulary.suggestions, vec![json!("went")]);
        assert_eq!(result.vocabulary.level, "beginner");
        assert_eq!(result.cultural, "Informal register");

        assert_eq!(format_feedback(&json!({"cultural": "Say please"})).cultural, "Say please");
    }

    #[test]
    fn test_wire_shape() {
        let value = serde_json::to_value(format_feedback(&json!({}))).unwrap();
        assert_eq!(
            value,
            json!({
                "score": 0,
                "feedback": "",
                "phonemes": [],
                "grammar": {"corrections": [], "score": 0},
                "vocabulary": {"suggestions": [], "level": "intermediate"},
                "pronunciation": {"score": 0, "feedback": "No pronunciation feedback available"},
                "cultural": ""
            })
        );
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected_without_calling_analyzer() {
        let stub = StubAnalyzer::new(json!({}));
        let aggregator = FeedbackAggregator::new(stub.clone());
        for text in [None, Some(""), Some("   ")] {
            let err = aggregator.analyze_feedback(text, Some("en"), None).await.unwrap_err();
            assert!(matches!(err, Error::Validation(ref m) if m == "Text is required"));
        }
        assert!(stub.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_analyze_and_format() {
        let stub = StubAnalyzer::new(json!({"grammar": {"score": 90}}));
        let aggregator = FeedbackAggregator::new(stub.clone());
        let result = aggregator.analyze_and_format(Some("hello"), None, None).await.unwrap();
        assert_eq!(result.score, zero());
        assert_eq!(result.grammar.score, Number::from(90));
        assert_eq!(
            stub.calls.lock().unwrap().as_slice(),
            &[("hello".to_string(), "en".to_string())]
        );
    }

    #[tokio::test]
    async fn test_audio_adds_pronunciation_note() {
        let stub = StubAnalyzer::new(json!({"pronunciation": {"score": 70}}));
        let aggregator = FeedbackAggregator::new(stub);
        let analysis = aggregator
            .analyze_feedback(Some("hola"), Some("es"), Some("UklGRg=="))
            .await
            .unwrap();
        assert_eq!(analysis["pronunciation"]["score"], json!(70));
        assert_eq!(analysis["pronunciation"]["note"], json!(AUDIO_NOTE));

        let stub = StubAnalyzer::new(json!({"grammar": {}}));
        let aggregator = FeedbackAggregator::new(stub);
        let analysis = aggregator
            .analyze_feedback(Some("hola"), Some("es"), Some("UklGRg=="))
            .await
            .unwrap();
        assert_eq!(analysis["pronunciation"], json!({"note": AUDIO_NOTE}));
    }

    #[tokio::test]
    async fn test_analyzer_failure_is_analysis_failure() {
        let aggregator = FeedbackAggregator::new(Arc::new(FailingAnalyzer));
        let err = aggregator.analyze_feedback(Some("hello"), None, None).await.unwrap_err();
        assert!(matches!(err, Error::AnalysisFailure(_)));
        assert_eq!(err.to_string(), "quota exceeded");
    }

    #[tokio::test]
    async fn test_cultural_context() {
        let stub = StubAnalyzer::new(json!({"cultural": "Tu is informal", "grammar": {"score": 60}}));
        let aggregator = FeedbackAggregator::new(stub.clone());
        let note = aggregator.cultural_context(Some("salut"), Some("fr")).await.unwrap();
        assert_eq!(note, "Tu is informal");
        assert_eq!(stub.calls.lock().unwrap()[0].1, "fr");

        let aggregator = FeedbackAggregator::new(StubAnalyzer::new(json!({})));
        assert_eq!(aggregator.cultural_context(Some("salut"), None).await.unwrap(), "");

        let err = aggregator.cultural_context(Some(" "), None).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
