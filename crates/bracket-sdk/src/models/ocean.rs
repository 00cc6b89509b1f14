//! OCEAN personality score payloads
//!
//! The inference endpoint returns the five trait scores either nested
//! under a `scores` object (current shape) or at the top level (legacy
//! shape). Non-numeric values parse to `None` rather than failing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// The five OCEAN trait scores; any score may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OceanScores {
    pub openness: Option<f64>,
    pub conscientiousness: Option<f64>,
    pub extraversion: Option<f64>,
    pub agreeableness: Option<f64>,
    pub neuroticism: Option<f64>,
}

impl OceanScores {
    /// Read scores from a JSON object, tolerating missing or non-numeric
    /// values.
    pub fn from_value(value: &Value) -> Self {
        Self {
            openness: trait_score(value, "openness"),
            conscientiousness: trait_score(value, "conscientiousness"),
            extraversion: trait_score(value, "extraversion"),
            agreeableness: trait_score(value, "agreeableness"),
            neuroticism: trait_score(value, "neuroticism"),
        }
    }
}

fn trait_score(value: &Value, key: &str) -> Option<f64> {
    value.get(key).and_then(Value::as_f64)
}

/// A parsed inference response: typed scores plus the raw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct OceanResult {
    pub scores: OceanScores,
    /// Full response payload for caller inspection.
    pub raw: Value,
}

impl OceanResult {
    /// Parse an inference payload.
    ///
    /// Scores are read from a nested `scores` object when present,
    /// otherwise from the top level (legacy shape).
    pub fn from_payload(payload: &Value) -> Result<Self> {
        if !payload.is_object() {
            return Err(Error::Json {
                message: "inference payload must be a JSON object".to_string(),
                source: None,
            });
        }

        let scores = match payload.get("scores") {
            Some(nested) if nested.is_object() => OceanScores::from_value(nested),
            _ => OceanScores::from_value(payload),
        };

        Ok(Self {
            scores,
            raw: payload.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_nested_scores_payload() {
        let payload = json!({
            "id": "resp-1",
            "scores": {
                "openness": 0.91,
                "conscientiousness": 0.82,
                "extraversion": 0.73,
                "agreeableness": 0.64,
                "neuroticism": 0.55,
            },
        });

        let result = OceanResult::from_payload(&payload).unwrap();

        assert_eq!(
            result.scores,
            OceanScores {
                openness: Some(0.91),
                conscientiousness: Some(0.82),
                extraversion: Some(0.73),
                agreeableness: Some(0.64),
                neuroticism: Some(0.55),
            }
        );
        assert_eq!(result.raw, payload);
    }

    #[test]
    fn test_supports_top_level_scores_for_compatibility() {
        let payload = json!({
            "openness": 0.31,
            "conscientiousness": 0.42,
            "extraversion": 0.53,
            "agreeableness": 0.64,
            "neuroticism": 0.75,
            "note": "legacy shape",
        });

        let result = OceanResult::from_payload(&payload).unwrap();

        assert_eq!(result.scores.openness, Some(0.31));
        assert_eq!(result.scores.neuroticism, Some(0.75));
        assert_eq!(result.raw["note"], "legacy shape");
    }

    #[test]
    fn test_non_numeric_scores_become_none() {
        let payload = json!({"scores": {"openness": "high", "extraversion": 0.5}});
        let result = OceanResult::from_payload(&payload).unwrap();
        assert_eq!(result.scores.openness, None);
        assert_eq!(result.scores.extraversion, Some(0.5));
        assert_eq!(result.scores.agreeableness, None);
    }

    #[test]
    fn test_rejects_non_object_payload() {
        assert!(OceanResult::from_payload(&json!("text")).is_err());
        assert!(OceanResult::from_payload(&json!([1, 2])).is_err());
    }

    #[test]
    fn test_scores_serde_round_trip() {
        let scores = OceanScores {
            openness: Some(0.5),
            ..OceanScores::default()
        };
        let encoded = serde_json::to_value(&scores).unwrap();
        let decoded: OceanScores = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, scores);
    }
}
