//! Conversation bookkeeping on top of the progress store
//!
//! A finished conversation bumps the counters, folds its scores into the
//! running averages, advances the daily streak and appends a history entry.
//! The result is applied as one ordinary `update_progress` merge.

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::Result;
use crate::storage::{ProgressFields, ProgressRecord, ProgressStore};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// What the client reports about one finished conversation
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationOutcome {
    #[serde(default)]
    pub scenario: Option<String>,
    /// Seconds spent in the conversation
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub feedback: Option<ConversationFeedback>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConversationFeedback {
    #[serde(default)]
    pub grammar: Option<SectionScore>,
    #[serde(default)]
    pub vocabulary: Option<SectionScore>,
    #[serde(default)]
    pub pronunciation: Option<SectionScore>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SectionScore {
    #[serde(default)]
    pub score: Option<f64>,
}

/// Record a finished conversation for `user_id` and return the merged record
pub async fn record_conversation(
    store: &dyn ProgressStore,
    user_id: &str,
    outcome: &ConversationOutcome,
) -> Result<ProgressRecord> {
    let current = store.get_progress(user_id).await?;
    let updates = conversation_updates(&current.fields, outcome, Utc::now().date_naive());
    tracing::debug!(
        user_id,
        scenario = outcome.scenario.as_deref().unwrap_or(""),
        "Recording conversation"
    );
    Ok(store.update_progress(user_id, updates).await?)
}

/// The fields a conversation on `today` changes, computed from `current`
pub fn conversation_updates(
    current: &ProgressFields,
    outcome: &ConversationOutcome,
    today: NaiveDate,
) -> ProgressFields {
    let conversations = number_field(current, "totalConversations");
    let duration = outcome.duration.unwrap_or(0.0);
    let feedback = outcome.feedback.as_ref();

    let mut updates = ProgressFields::new();
    updates.insert("totalConversations".into(), number(conversations + 1.0));
    updates.insert(
        "totalTime".into(),
        number(number_field(current, "totalTime") + duration),
    );

    let sections = [
        ("grammarScore", feedback.and_then(|f| f.grammar.as_ref())),
        ("vocabularyScore", feedback.and_then(|f| f.vocabulary.as_ref())),
        ("pronunciationScore", feedback.and_then(|f| f.pronunciation.as_ref())),
    ];
    for (key, section) in sections {
        let old = number_field(current, key);
        let score = match section.and_then(|s| s.score) {
            Some(new) => running_average(old, conversations, new),
            None => old,
        };
        updates.insert(key.into(), number(score));
    }

    let streak = next_streak(
        number_field(current, "streak"),
        current.get("lastPracticeDate").and_then(Value::as_str),
        today,
    );
    updates.insert("streak".into(), number(streak));

    let date = today.format(DATE_FORMAT).to_string();
    let mut history = current
        .get("conversationHistory")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let mut entry = serde_json::Map::new();
    entry.insert("date".into(), json!(date));
    if let Some(scenario) = &outcome.scenario {
        entry.insert("scenario".into(), json!(scenario));
    }
    entry.insert("duration".into(), number(duration));
    history.push(Value::Object(entry));

    updates.insert("lastPracticeDate".into(), json!(date));
    updates.insert("conversationHistory".into(), Value::Array(history));
    updates
}

fn running_average(old: f64, count: f64, new: f64) -> f64 {
    round_half_up((old * count + new) / (count + 1.0))
}

/// Halves round toward positive infinity, so -72.5 becomes -72
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Consecutive day extends, a longer gap restarts at 1, the same day (or an
/// unreadable date) leaves the streak alone
fn next_streak(streak: f64, last_practice: Option<&str>, today: NaiveDate) -> f64 {
    let Some(last) = last_practice else {
        return 1.0;
    };
    let Ok(last) = NaiveDate::parse_from_str(last, DATE_FORMAT) else {
        return streak;
    };
    match (today - last).num_days() {
        1 => streak + 1.0,
        d if d > 1 => 1.0,
        _ => streak,
    }
}

/// Numeric field value, 0 when absent or not a number
pub(crate) fn number_field(fields: &ProgressFields, key: &str) -> f64 {
    fields.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

/// Integral values are written as JSON integers
fn number(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        json!(value as i64)
    } else {
        json!(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryProgressStore;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn fields(value: Value) -> ProgressFields {
        value.as_object().cloned().unwrap()
    }

    fn outcome(value: Value) -> ConversationOutcome {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_first_conversation() {
        let updates = conversation_updates(
            &ProgressFields::new(),
            &outcome(json!({
                "scenario": "cafe",
                "duration": 120,
                "feedback": {"grammar": {"score": 80}}
            })),
            day("2026-03-10"),
        );
        assert_eq!(
            Value::Object(updates),
            json!({
                "totalConversations": 1,
                "totalTime": 120,
                "grammarScore": 80,
                "vocabularyScore": 0,
                "pronunciationScore": 0,
                "streak": 1,
                "lastPracticeDate": "2026-03-10",
                "conversationHistory": [
                    {"date": "2026-03-10", "scenario": "cafe", "duration": 120}
                ]
            })
        );
    }

    #[test]
    fn test_running_average_rounds() {
        let current = fields(json!({"totalConversations": 2, "grammarScore": 70}));
        let updates = conversation_updates(
            &current,
            &outcome(json!({"feedback": {"grammar": {"score": 85}}})),
            day("2026-03-10"),
        );
        // (70 * 2 + 85) / 3 = 75
        assert_eq!(updates["grammarScore"], json!(75));

        let current = fields(json!({"totalConversations": 1, "grammarScore": 70}));
        let updates = conversation_updates(
            &current,
            &outcome(json!({"feedback": {"grammar": {"score": 75}}})),
            day("2026-03-10"),
        );
        // 72.5 rounds up
        assert_eq!(updates["grammarScore"], json!(73));
    }

    #[test]
    fn test_halves_round_toward_positive_infinity() {
        assert_eq!(round_half_up(72.5), 73.0);
        assert_eq!(round_half_up(-72.5), -72.0);
        assert_eq!(round_half_up(-72.6), -73.0);
        // (-70 * 1 + -75) / 2 = -72.5
        assert_eq!(running_average(-70.0, 1.0, -75.0), -72.0);
    }

    #[test]
    fn test_missing_scores_keep_previous_average() {
        let current = fields(json!({"totalConversations": 4, "pronunciationScore": 66}));
        let updates = conversation_updates(&current, &outcome(json!({})), day("2026-03-10"));
        assert_eq!(updates["pronunciationScore"], json!(66));
        assert_eq!(updates["totalConversations"], json!(5));
        assert_eq!(updates["totalTime"], json!(0));
    }

    #[test]
    fn test_streak_transitions() {
        let today = day("2026-03-10");
        assert_eq!(next_streak(0.0, None, today), 1.0);
        assert_eq!(next_streak(3.0, Some("2026-03-09"), today), 4.0);
        assert_eq!(next_streak(3.0, Some("2026-03-10"), today), 3.0);
        assert_eq!(next_streak(3.0, Some("2026-03-01"), today), 1.0);
        assert_eq!(next_streak(3.0, Some("yesterday"), today), 3.0);
    }

    #[test]
    fn test_streak_crosses_month_boundary() {
        assert_eq!(next_streak(7.0, Some("2026-02-28"), day("2026-03-01")), 8.0);
    }

    #[test]
    fn test_history_appends() {
        let current = fields(json!({
            "conversationHistory": [{"date": "2026-03-09", "duration": 30}]
        }));
        let updates = conversation_updates(
            &current,
            &outcome(json!({"duration": 45.5})),
            day("2026-03-10"),
        );
        assert_eq!(
            updates["conversationHistory"],
            json!([
                {"date": "2026-03-09", "duration": 30},
                {"date": "2026-03-10", "duration": 45.5}
            ])
        );
        assert_eq!(updates["totalTime"], json!(45.5));
    }

    #[test]
    fn test_non_numeric_fields_count_as_zero() {
        let current = fields(json!({"totalConversations": "many", "totalTime": null}));
        let updates = conversation_updates(&current, &outcome(json!({"duration": 10})), day("2026-03-10"));
        assert_eq!(updates["totalConversations"], json!(1));
        assert_eq!(updates["totalTime"], json!(10));
    }

    #[tokio::test]
    async fn test_record_conversation_preserves_other_fields() {
        let store = MemoryProgressStore::new();
        store
            .update_progress("u1", fields(json!({"level": "b1"})))
            .await
            .unwrap();

        let record = record_conversation(&store, "u1", &outcome(json!({"scenario": "airport", "duration": 60})))
            .await
            .unwrap();
        assert_eq!(record.get("level"), Some(&json!("b1")));
        assert_eq!(record.get("totalConversations"), Some(&json!(1)));
        assert_eq!(record.get("streak"), Some(&json!(1)));

        let again = record_conversation(&store, "u1", &outcome(json!({"duration": 60})))
            .await
            .unwrap();
        assert_eq!(again.get("totalConversations"), Some(&json!(2)));
        assert_eq!(again.get("totalTime"), Some(&json!(120)));
        // Same day
        assert_eq!(again.get("streak"), Some(&json!(1)));
    }
}
