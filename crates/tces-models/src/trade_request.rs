use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::project::{BudgetRange, ProjectSize, ProjectType, QualityTier, TimelinePreference};
use crate::trade::Trade;

/// Request sent to a single trade service (serialized as the JSON body of
/// `POST {base_url}/estimate`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeRequest {
    pub request_id: Uuid,
    pub trade: Trade,
    pub project: ProjectSnapshot,
    pub trade_scope: TradeScope,
    pub constraints: Constraints,
}

/// The slice of the project analysis every trade needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectSnapshot {
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub size: ProjectSize,
    pub quality_tier: QualityTier,
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeScope {
    pub phases: Vec<String>,
    /// Requirement tags relevant to this trade only.
    pub specific_requirements: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Constraints {
    pub timeline: TimelinePreference,
    pub budget_range: Option<BudgetRange>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_type_serializes_as_type() {
        let request = TradeRequest {
            request_id: Uuid::new_v4(),
            trade: Trade::Electrical,
            project: ProjectSnapshot {
                project_type: ProjectType::KitchenRenovation,
                size: ProjectSize::Medium,
                quality_tier: QualityTier::HighEnd,
                location: "US-Northeast".to_string(),
            },
            trade_scope: TradeScope {
                phases: vec!["rough_in".to_string()],
                specific_requirements: vec!["recessed_lighting".to_string()],
            },
            constraints: Constraints {
                timeline: TimelinePreference::Rush,
                budget_range: None,
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["project"]["type"], "kitchen_renovation");
        assert_eq!(json["project"]["quality_tier"], "high_end");
        assert_eq!(json["trade"], "electrical");
        assert_eq!(json["constraints"]["timeline"], "rush");

        let back: TradeRequest = serde_json::from_value(json).unwrap();
        assert_eq!(back, request);
    }
}
