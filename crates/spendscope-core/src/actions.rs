//! Pattern actions
//!
//! A detail view may ask for something to be done about a pattern (create a
//! budget, set an alert, ...). The engine never executes these; it only
//! describes the request and hands it to an [`ActionDispatcher`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    CreateBudget,
    SetAlert,
    ExportData,
    ScheduleReview,
    Implement,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::CreateBudget => "create_budget",
            ActionType::SetAlert => "set_alert",
            ActionType::ExportData => "export_data",
            ActionType::ScheduleReview => "schedule_review",
            ActionType::Implement => "implement",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "create_budget" => Ok(ActionType::CreateBudget),
            "set_alert" => Ok(ActionType::SetAlert),
            "export_data" => Ok(ActionType::ExportData),
            "schedule_review" => Ok(ActionType::ScheduleReview),
            "implement" => Ok(ActionType::Implement),
            _ => Err(format!("Unknown action type: {}", s)),
        }
    }
}

/// A request to act on a pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternAction {
    pub action_type: ActionType,
    pub pattern_id: String,
    /// Opaque to the engine
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl PatternAction {
    pub fn new(action_type: ActionType, pattern_id: impl Into<String>) -> Self {
        Self {
            action_type,
            pattern_id: pattern_id.into(),
            payload: serde_json::Value::Null,
        }
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.pattern_id.trim().is_empty() {
            return Err(Error::InvalidData("action needs a pattern id".into()));
        }
        Ok(())
    }
}

/// Hands pattern actions to whatever executes them
pub trait ActionDispatcher: Send + Sync {
    fn dispatch(&self, action: &PatternAction) -> Result<()>;
}

/// Dispatcher that only records the request in the log
#[derive(Debug, Default)]
pub struct LoggingDispatcher;

impl ActionDispatcher for LoggingDispatcher {
    fn dispatch(&self, action: &PatternAction) -> Result<()> {
        action.validate()?;
        info!(
            action = action.action_type.as_str(),
            pattern = action.pattern_id,
            "Pattern action requested"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_type_parse() {
        assert_eq!(
            ActionType::from_str("schedule_review").unwrap(),
            ActionType::ScheduleReview
        );
        assert_eq!(ActionType::CreateBudget.as_str(), "create_budget");
        assert!(ActionType::from_str("delete_everything").is_err());
    }

    #[test]
    fn test_action_json() {
        let action: PatternAction = serde_json::from_str(
            r#"{"actionType":"set_alert","patternId":"anomaly:shopping","payload":{"limit":500}}"#,
        )
        .unwrap();
        assert_eq!(action.action_type, ActionType::SetAlert);
        assert_eq!(action.payload["limit"], 500);

        let bare: PatternAction =
            serde_json::from_str(r#"{"actionType":"implement","patternId":"trend:food"}"#).unwrap();
        assert!(bare.payload.is_null());
    }

    #[test]
    fn test_logging_dispatcher() {
        let dispatcher = LoggingDispatcher;
        let action = PatternAction::new(ActionType::ExportData, "trend:food")
            .with_payload(serde_json::json!({"format": "csv"}));
        assert!(dispatcher.dispatch(&action).is_ok());

        let missing = PatternAction::new(ActionType::ExportData, " ");
        assert!(dispatcher.dispatch(&missing).is_err());
    }
}
