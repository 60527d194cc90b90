use crate::types::Action;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Marker carried as `data` by the unsupported-prompt outcome.
pub const NOT_APPLICABLE: &str = "N/A";

/// Recorded result of one executed action.
///
/// A success carries `data`; a recoverable failure carries `message`. The
/// unsupported-prompt outcome carries both, with `data` set to `"N/A"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub action: Action,
    #[serde(rename = "step")]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StepOutcome {
    pub fn success(action: Action, label: impl Into<String>, data: Value) -> Self {
        Self {
            action,
            label: label.into(),
            data: Some(data),
            message: None,
        }
    }

    pub fn failure(action: Action, label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            action,
            label: label.into(),
            data: None,
            message: Some(message.into()),
        }
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self {
            action: Action::Unsupported,
            label: "Unsupported prompt".to_string(),
            data: Some(Value::String(NOT_APPLICABLE.to_string())),
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.message.is_none()
    }
}

/// Format an amount the way the presentation layer shows money:
/// dollar sign, thousands separators, two decimals.
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("${sign}{grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_serializes_step_and_data() {
        let o = StepOutcome::success(Action::GetClaim, "Claim retrieved", json!({"claim_id": "c"}));
        let v = serde_json::to_value(&o).unwrap();
        assert_eq!(v["step"], "Claim retrieved");
        assert_eq!(v["action"], "get_claim");
        assert_eq!(v["data"]["claim_id"], "c");
        assert!(v.get("message").is_none());
        assert!(o.is_success());
    }

    #[test]
    fn failure_has_no_data() {
        let o = StepOutcome::failure(
            Action::GetPolicyCoverages,
            "Coverage lookup failed",
            "No policy_id found.",
        );
        let v = serde_json::to_value(&o).unwrap();
        assert!(v.get("data").is_none());
        assert_eq!(v["message"], "No policy_id found.");
        assert!(!o.is_success());
    }

    #[test]
    fn unsupported_carries_sentinel() {
        let o = StepOutcome::unsupported("I don't understand that yet.");
        assert_eq!(o.data, Some(json!("N/A")));
        assert_eq!(o.label, "Unsupported prompt");
        assert!(!o.is_success());
    }

    #[test]
    fn currency_formatting() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(7.5), "$7.50");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_currency(-250.0), "$-250.00");
        assert_eq!(format_currency(-0.001), "$0.00");
    }
}
