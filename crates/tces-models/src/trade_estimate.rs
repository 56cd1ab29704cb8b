use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::trade::Trade;

/// Standardized estimate returned by a trade service (or synthesized as a
/// fallback when the service call fails).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeEstimate {
    pub phases: Vec<String>,
    pub labor: LaborEstimate,
    pub materials: MaterialsEstimate,
    #[serde(default)]
    pub total_cost: Option<Decimal>,
    /// 0.0 to 1.0. Absent means the service did not self-assess.
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub complications: Vec<String>,
    #[serde(default)]
    pub coordination_requirements: CoordinationRequirements,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LaborEstimate {
    pub total_hours: f64,
    /// Working days the trade needs on site. Non-positive values are
    /// treated as one day by the scheduler.
    #[serde(default)]
    pub timeline_days: Option<i64>,
    #[serde(default)]
    pub cost: Option<Decimal>,
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialsEstimate {
    pub line_items: Vec<MaterialLineItem>,
    /// None when pricing is resolved downstream; see `pricing_status`.
    #[serde(default)]
    pub total_cost: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing_status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaterialLineItem {
    pub item: String,
    pub quantity: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default)]
    pub unit_cost: Option<Decimal>,
    #[serde(default)]
    pub total_cost: Option<Decimal>,
}

fn default_unit() -> String {
    "each".to_string()
}

/// What must happen before and after a trade's work.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CoordinationRequirements {
    pub prerequisites: Vec<String>,
    pub provides_for: Vec<String>,
    pub schedule_flexibility: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TradeStatus {
    Success,
    Failed,
}

/// Outcome of dispatching one trade. Exactly one per requested trade.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeResult {
    pub trade: Trade,
    pub status: TradeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<TradeEstimate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<TradeEstimate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TradeResult {
    pub fn success(trade: Trade, estimate: TradeEstimate) -> Self {
        Self {
            trade,
            status: TradeStatus::Success,
            estimate: Some(estimate),
            fallback: None,
            error: None,
        }
    }

    pub fn failed(trade: Trade, fallback: TradeEstimate, error: impl Into<String>) -> Self {
        Self {
            trade,
            status: TradeStatus::Failed,
            estimate: None,
            fallback: Some(fallback),
            error: Some(error.into()),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.status == TradeStatus::Failed
    }

    /// The live estimate, or the fallback substituted for it.
    pub fn effective_estimate(&self) -> Option<&TradeEstimate> {
        self.estimate.as_ref().or(self.fallback.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_estimate() -> TradeEstimate {
        TradeEstimate {
            phases: vec!["rough_in".to_string(), "finish".to_string()],
            labor: LaborEstimate {
                total_hours: 24.0,
                timeline_days: Some(3),
                cost: Some(dec!(2040)),
                hourly_rate: Some(dec!(85)),
            },
            materials: MaterialsEstimate {
                line_items: vec![MaterialLineItem {
                    item: "12/2 Romex".to_string(),
                    quantity: 250.0,
                    unit: "ft".to_string(),
                    unit_cost: None,
                    total_cost: None,
                }],
                total_cost: None,
                pricing_status: Some("pending_external".to_string()),
            },
            total_cost: Some(dec!(2040)),
            confidence: Some(0.8),
            complications: vec![],
            coordination_requirements: CoordinationRequirements::default(),
            note: None,
        }
    }

    #[test]
    fn minimal_contract_body_parses() {
        let body = r#"{
            "phases": ["installation"],
            "labor": {"total_hours": 12},
            "materials": {"line_items": []}
        }"#;
        let estimate: TradeEstimate = serde_json::from_str(body).unwrap();
        assert_eq!(estimate.labor.total_hours, 12.0);
        assert_eq!(estimate.labor.timeline_days, None);
        assert_eq!(estimate.confidence, None);
        assert!(estimate.coordination_requirements.prerequisites.is_empty());
    }

    #[test]
    fn numeric_costs_parse_as_decimal() {
        let body = r#"{
            "phases": ["installation"],
            "labor": {"total_hours": 8, "cost": 640.5},
            "materials": {"line_items": [], "total_cost": 1200},
            "total_cost": 1840.5
        }"#;
        let estimate: TradeEstimate = serde_json::from_str(body).unwrap();
        assert_eq!(estimate.labor.cost, Some(dec!(640.5)));
        assert_eq!(estimate.materials.total_cost, Some(dec!(1200)));
    }

    #[test]
    fn effective_estimate_prefers_live_result() {
        let live = TradeResult::success(Trade::Electrical, sample_estimate());
        assert_eq!(live.effective_estimate(), live.estimate.as_ref());
        assert!(!live.is_failed());

        let failed = TradeResult::failed(Trade::Electrical, sample_estimate(), "timed out");
        assert!(failed.is_failed());
        assert!(failed.estimate.is_none());
        assert_eq!(failed.effective_estimate(), failed.fallback.as_ref());
    }

    #[test]
    fn failed_result_serializes_error_and_fallback() {
        let failed = TradeResult::failed(Trade::Plumbing, sample_estimate(), "connection refused");
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["error"], "connection refused");
        assert!(json.get("estimate").is_none());
        assert!(json["fallback"].is_object());
    }
}
