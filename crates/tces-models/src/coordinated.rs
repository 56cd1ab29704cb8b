use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::project::{ProjectAnalysis, ProjectSize, QualityTier};
use crate::trade::Trade;
use crate::trade_estimate::TradeResult;

/// A trade's slot in the project schedule. Days are 1-based and inclusive.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub trade: Trade,
    pub start_day: u32,
    pub end_day: u32,
    pub duration: u32,
}

/// Field-wise sums across every trade result.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CombinedTotals {
    pub labor_hours: f64,
    pub labor_cost: Decimal,
    pub material_cost: Decimal,
    pub total_cost: Decimal,
}

/// Everything the coordinator knows after one orchestration request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoordinatedEstimate {
    pub estimates: Vec<TradeResult>,
    pub schedule: Vec<ScheduleEntry>,
    pub totals: CombinedTotals,
    /// Within [0, 0.95].
    pub confidence: f64,
}

impl CoordinatedEstimate {
    pub fn failed_count(&self) -> usize {
        self.estimates.iter().filter(|r| r.is_failed()).count()
    }

    pub fn total_timeline_days(&self) -> u32 {
        self.schedule.iter().map(|e| e.end_day).max().unwrap_or(0)
    }
}

/// The externally visible response for one orchestration request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EstimateResponse {
    pub project: ProjectSummary,
    pub estimates: EstimatesSection,
    pub schedule: ScheduleSection,
    pub confidence: f64,
    pub timestamp: DateTime<Utc>,
    pub request_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectSummary {
    pub description: String,
    pub size: ProjectSize,
    pub quality_tier: QualityTier,
    pub trades_involved: Vec<Trade>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EstimatesSection {
    pub by_trade: Vec<TradeLine>,
    pub combined_totals: CombinedTotals,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TradeLine {
    pub trade: Trade,
    pub labor_hours: f64,
    pub labor_cost: Decimal,
    pub material_cost: Decimal,
    pub total_cost: Decimal,
    pub phases: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleSection {
    pub total_timeline_days: u32,
    pub by_trade: Vec<ScheduleEntry>,
}

impl TradeLine {
    /// Summarize a result, reading the fallback when the live call failed.
    /// Missing numbers are reported as zero.
    pub fn from_result(result: &TradeResult) -> Self {
        let estimate = result.effective_estimate();
        Self {
            trade: result.trade.clone(),
            labor_hours: estimate.map(|e| e.labor.total_hours).unwrap_or(0.0),
            labor_cost: estimate.and_then(|e| e.labor.cost).unwrap_or_default(),
            material_cost: estimate
                .and_then(|e| e.materials.total_cost)
                .unwrap_or_default(),
            total_cost: estimate.and_then(|e| e.total_cost).unwrap_or_default(),
            phases: estimate.map(|e| e.phases.clone()).unwrap_or_default(),
        }
    }
}

impl EstimateResponse {
    pub fn new(
        description: &str,
        analysis: &ProjectAnalysis,
        coordinated: &CoordinatedEstimate,
        request_id: Uuid,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            project: ProjectSummary {
                description: description.to_string(),
                size: analysis.size,
                quality_tier: analysis.quality_tier,
                trades_involved: analysis.trades_required.clone(),
            },
            estimates: EstimatesSection {
                by_trade: coordinated
                    .estimates
                    .iter()
                    .map(TradeLine::from_result)
                    .collect(),
                combined_totals: coordinated.totals.clone(),
            },
            schedule: ScheduleSection {
                total_timeline_days: coordinated.total_timeline_days(),
                by_trade: coordinated.schedule.clone(),
            },
            confidence: coordinated.confidence,
            timestamp,
            request_id,
        }
    }
}
