//! Test support module providing scenario-based mock trade services.
//!
//! Unlike the simple `MockTradeService` (which returns canned responses),
//! `ScenarioTradeService` reads the request's phases, size and quality tier
//! and prices them the way a real trade service would, so totals, schedules
//! and confidence come out realistic. Behavior variants cover the failure
//! modes the dispatcher must absorb.

use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tces_models::{
    Constraints, CoordinationRequirements, LaborEstimate, MaterialLineItem, MaterialsEstimate,
    ProjectSize, ProjectSnapshot, ProjectType, QualityTier, TimelinePreference, Trade,
    TradeEstimate, TradeRequest, TradeScope,
};
use uuid::Uuid;

use crate::error::DispatchError;
use crate::parser::parse_trade_estimate;
use crate::service::TradeService;

/// A kitchen request for `trade` with a single phase, for tests that only
/// need something well-formed.
pub fn sample_request(trade: Trade) -> TradeRequest {
    TradeRequest {
        request_id: Uuid::new_v4(),
        trade,
        project: ProjectSnapshot {
            project_type: ProjectType::KitchenRenovation,
            size: ProjectSize::Medium,
            quality_tier: QualityTier::MidRange,
            location: "unspecified".to_string(),
        },
        trade_scope: TradeScope {
            phases: vec!["installation".to_string()],
            specific_requirements: vec![],
        },
        constraints: Constraints {
            timeline: TimelinePreference::Standard,
            budget_range: None,
        },
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Behavior {
    Realistic,
    Failing,
    Slow(Duration),
    Malformed,
    Panicking,
}

pub struct ScenarioTradeService {
    pub trade: Trade,
    behavior: Behavior,
}

impl ScenarioTradeService {
    pub fn new(trade: Trade) -> Self {
        Self {
            trade,
            behavior: Behavior::Realistic,
        }
    }

    /// Every call answers `ServiceUnavailable`.
    pub fn failing(mut self) -> Self {
        self.behavior = Behavior::Failing;
        self
    }

    /// Sleep before answering realistically.
    pub fn slow(mut self, delay: Duration) -> Self {
        self.behavior = Behavior::Slow(delay);
        self
    }

    /// Answer with a body that fails response validation.
    pub fn malformed(mut self) -> Self {
        self.behavior = Behavior::Malformed;
        self
    }

    pub fn panicking(mut self) -> Self {
        self.behavior = Behavior::Panicking;
        self
    }
}

/// Hours per phase before size and quality scaling.
fn base_phase_hours(trade: &Trade) -> f64 {
    match trade {
        Trade::Carpentry => 16.0,
        Trade::Electrical => 12.0,
        Trade::Plumbing => 10.0,
        Trade::Flooring => 12.0,
        Trade::Painting => 8.0,
        Trade::Other(_) => 8.0,
    }
}

fn hourly_rate(trade: &Trade) -> Decimal {
    match trade {
        Trade::Carpentry => Decimal::from(65),
        Trade::Electrical => Decimal::from(85),
        Trade::Plumbing => Decimal::from(95),
        Trade::Flooring => Decimal::from(60),
        Trade::Painting => Decimal::from(50),
        Trade::Other(_) => Decimal::from(75),
    }
}

fn size_factor(size: ProjectSize) -> f64 {
    match size {
        ProjectSize::Small => 0.6,
        ProjectSize::Medium => 1.0,
        ProjectSize::Large => 1.5,
        ProjectSize::Xl => 2.2,
    }
}

fn quality_factor(tier: QualityTier) -> f64 {
    match tier {
        QualityTier::Budget => 0.8,
        QualityTier::MidRange => 1.0,
        QualityTier::HighEnd => 1.3,
        QualityTier::Luxury => 1.6,
    }
}

/// Price a request: phases × base hours, scaled by size and quality; labor
/// at the trade's rate, materials at a flat share of labor.
pub fn realistic_estimate(request: &TradeRequest) -> TradeEstimate {
    let trade = &request.trade;
    let phases = if request.trade_scope.phases.is_empty() {
        vec!["installation".to_string()]
    } else {
        request.trade_scope.phases.clone()
    };

    let hours = (phases.len() as f64
        * base_phase_hours(trade)
        * size_factor(request.project.size)
        * quality_factor(request.project.quality_tier))
    .round();
    let rate = hourly_rate(trade);
    let labor_cost = Decimal::from(hours as i64) * rate;
    let material_cost = (labor_cost * Decimal::new(8, 1)).round_dp(2);
    let timeline_days = ((hours / 8.0).ceil() as i64).max(1);

    let confidence = match request.project.quality_tier {
        QualityTier::Luxury => 0.75,
        _ => 0.85,
    };

    TradeEstimate {
        phases,
        labor: LaborEstimate {
            total_hours: hours,
            timeline_days: Some(timeline_days),
            cost: Some(labor_cost),
            hourly_rate: Some(rate),
        },
        materials: MaterialsEstimate {
            line_items: vec![MaterialLineItem {
                item: format!("{trade} materials allowance"),
                quantity: 1.0,
                unit: "lot".to_string(),
                unit_cost: Some(material_cost),
                total_cost: Some(material_cost),
            }],
            total_cost: Some(material_cost),
            pricing_status: Some("estimated".to_string()),
        },
        total_cost: Some(labor_cost + material_cost),
        confidence: Some(confidence),
        complications: request
            .trade_scope
            .specific_requirements
            .iter()
            .map(|r| format!("Scope includes {r}"))
            .collect(),
        coordination_requirements: CoordinationRequirements {
            prerequisites: vec![],
            provides_for: vec![],
            schedule_flexibility: "medium".to_string(),
        },
        note: None,
    }
}

#[async_trait]
impl TradeService for ScenarioTradeService {
    fn trade(&self) -> &Trade {
        &self.trade
    }

    async fn estimate(&self, request: &TradeRequest) -> Result<TradeEstimate, DispatchError> {
        match &self.behavior {
            Behavior::Realistic => Ok(realistic_estimate(request)),
            Behavior::Failing => Err(DispatchError::ServiceUnavailable(format!(
                "{} service is down",
                self.trade
            ))),
            Behavior::Slow(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(realistic_estimate(request))
            }
            Behavior::Malformed => parse_trade_estimate(r#"{"phases": [], "labor": {"total_hours": -4}}"#),
            Behavior::Panicking => panic!("{} service crashed", self.trade),
        }
    }
}
