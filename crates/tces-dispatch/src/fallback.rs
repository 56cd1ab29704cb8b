use rust_decimal::Decimal;
use tces_models::{
    CoordinationRequirements, LaborEstimate, MaterialsEstimate, Trade, TradeEstimate,
};

/// Confidence reported by every fallback estimate.
pub const FALLBACK_CONFIDENCE: f64 = 0.3;

/// Static figures substituted when a trade service cannot be used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackProfile {
    pub labor_hours: f64,
    pub timeline_days: i64,
    pub labor_cost: Decimal,
    pub material_cost: Decimal,
}

impl FallbackProfile {
    pub fn total_cost(&self) -> Decimal {
        self.labor_cost + self.material_cost
    }
}

/// The fallback table, keyed by trade. Trades outside the built-in set
/// share a generic profile.
pub fn fallback_profile(trade: &Trade) -> FallbackProfile {
    let (labor_hours, timeline_days, labor_cost, material_cost) = match trade {
        Trade::Carpentry => (40.0, 5, 2600, 3000),
        Trade::Electrical => (24.0, 3, 2040, 800),
        Trade::Plumbing => (20.0, 3, 1900, 900),
        Trade::Flooring => (24.0, 3, 1440, 2400),
        Trade::Painting => (32.0, 4, 1600, 600),
        Trade::Other(_) => (16.0, 2, 1200, 500),
    };
    FallbackProfile {
        labor_hours,
        timeline_days,
        labor_cost: Decimal::from(labor_cost),
        material_cost: Decimal::from(material_cost),
    }
}

/// A synthetic estimate standing in for a failed trade call.
pub fn fallback_estimate(trade: &Trade) -> TradeEstimate {
    let profile = fallback_profile(trade);
    TradeEstimate {
        phases: vec!["installation".to_string()],
        labor: LaborEstimate {
            total_hours: profile.labor_hours,
            timeline_days: Some(profile.timeline_days),
            cost: Some(profile.labor_cost),
            hourly_rate: None,
        },
        materials: MaterialsEstimate {
            line_items: vec![],
            total_cost: Some(profile.material_cost),
            pricing_status: Some("fallback".to_string()),
        },
        total_cost: Some(profile.total_cost()),
        confidence: Some(FALLBACK_CONFIDENCE),
        complications: vec![format!(
            "Live {trade} estimate unavailable; figures are static defaults"
        )],
        coordination_requirements: CoordinationRequirements {
            prerequisites: vec![],
            provides_for: vec![],
            schedule_flexibility: "unknown".to_string(),
        },
        note: Some(format!(
            "Fallback estimate: {trade} service could not be reached or answered invalidly"
        )),
    }
}
