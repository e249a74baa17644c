//! Keyword responder
//!
//! The rule-based `POST /chat` variant. A PHQ-9 score is mapped to one of
//! three severity bands; a free-text query is matched against keyword groups
//! in a fixed order. No model is involved.

use serde_json::Value;

pub const GOOD_SHAPE_MESSAGE: &str = "Your mental health appears to be in good shape!";
pub const DOING_WELL_MESSAGE: &str = "You are doing well. You can talk to me about anything you are dealing with or anything that is on your mind.";
pub const SIGNIFICANT_DEPRESSION_MESSAGE: &str =
    "You may be experiencing significant depression. Please consider seeking professional help.";

pub const GREETING_RESPONSE: &str = "Hello! How can I help you today?";
pub const WELLBEING_RESPONSE: &str = "I'm here to support you. How can I assist you today?";
pub const THANKS_RESPONSE: &str =
    "You're welcome! Is there anything else you'd like to talk about?";
pub const HELP_RESPONSE: &str = "I'm here to listen and provide support. You can share what's on your mind, and I'll do my best to help.";
pub const FALLBACK_RESPONSE: &str =
    "I'm here to listen. Could you tell me more about how you're feeling?";

pub const NO_VALID_PARAMETERS: &str =
    "No valid parameters provided. Please include either a score or query parameter.";
pub const INVALID_SCORE: &str = "Invalid score parameter. Score must be an integer.";
pub const INVALID_QUERY: &str = "Invalid query parameter. Query must be a string.";

/// Keyword groups, checked in order. The first group with a match wins.
const KEYWORD_RULES: &[(&[&str], &str)] = &[
    (&["hello", "hi", "hey"], GREETING_RESPONSE),
    (&["how are you", "how're you"], WELLBEING_RESPONSE),
    (&["thank", "thanks"], THANKS_RESPONSE),
    (&["help", "support"], HELP_RESPONSE),
];

/// Message for a PHQ-9 score.
pub fn score_message(score: i64) -> &'static str {
    if score <= 4 {
        GOOD_SHAPE_MESSAGE
    } else if score <= 14 {
        DOING_WELL_MESSAGE
    } else {
        SIGNIFICANT_DEPRESSION_MESSAGE
    }
}

/// Reply for a free-text query (case-insensitive substring match).
pub fn query_response(query: &str) -> &'static str {
    let query = query.to_lowercase();
    KEYWORD_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| query.contains(k)))
        .map(|(_, response)| *response)
        .unwrap_or(FALLBACK_RESPONSE)
}

/// Interpret a score value: integers as-is, floats and numeric strings
/// truncated toward zero. Anything else is rejected.
pub fn parse_score(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate))
        }
        _ => None,
    }
}

fn truncate(f: f64) -> Option<i64> {
    if f.is_finite() && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f.trunc() as i64)
    } else {
        None
    }
}

/// Outcome of one keyword-responder request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesReply {
    Score { score: i64, message: &'static str },
    Query { response: &'static str, timestamp: String },
    Invalid(&'static str),
}

/// Decide the reply for a request body. `score` takes precedence over `query`.
pub fn respond(body: &Value) -> RulesReply {
    let Some(fields) = body.as_object() else {
        return RulesReply::Invalid(NO_VALID_PARAMETERS);
    };

    if let Some(raw_score) = fields.get("score") {
        return match parse_score(raw_score) {
            Some(score) => RulesReply::Score {
                score,
                message: score_message(score),
            },
            None => RulesReply::Invalid(INVALID_SCORE),
        };
    }

    if let Some(raw_query) = fields.get("query") {
        let Some(query) = raw_query.as_str() else {
            return RulesReply::Invalid(INVALID_QUERY);
        };
        let timestamp = fields
            .get("timestamp")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        return RulesReply::Query {
            response: query_response(query),
            timestamp,
        };
    }

    RulesReply::Invalid(NO_VALID_PARAMETERS)
}
