//! Template-style estimating: base hours per phase, scaled by a size
//! complexity multiplier and a quality-tier finish multiplier, priced at the
//! configured labor rate. Materials are listed but left unpriced for an
//! external pricing step.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tces_models::{
    CoordinationRequirements, LaborEstimate, MaterialLineItem, MaterialsEstimate, ProjectSize,
    QualityTier, TimelinePreference, Trade, TradeEstimate, TradeRequest,
};

use crate::config::StubConfig;

pub const HOURS_PER_DAY: f64 = 8.0;
pub const PENDING_PRICING: &str = "pending_external";

/// Base hours for one phase of a medium, mid-range job.
pub fn phase_hours(phase: &str) -> f64 {
    match phase {
        "demolition" => 8.0,
        "framing" | "wall_framing" => 16.0,
        "floor_framing" | "roof_framing" => 20.0,
        "cabinet_installation" => 24.0,
        "vanity_installation" | "door_installation" => 6.0,
        "trim_finish" => 12.0,
        "rough_in" => 16.0,
        "panel_assessment" => 4.0,
        "panel_upgrade" | "service_extension" => 12.0,
        "gfci_installation" => 3.0,
        "fixture_installation" | "lighting_installation" => 8.0,
        "final_connections" => 6.0,
        "sink_installation" | "finish_plumbing" => 6.0,
        "appliance_hookups" => 4.0,
        "drain_installation" => 10.0,
        "supply_replacement" => 24.0,
        "subfloor_preparation" => 8.0,
        "tile_installation" => 20.0,
        "flooring_installation" => 16.0,
        "grouting" | "transitions" => 6.0,
        "surface_preparation" => 8.0,
        "drywall_touch_up" | "priming" => 6.0,
        "finish_coats" => 12.0,
        _ => 8.0,
    }
}

pub fn complexity_multiplier(size: ProjectSize) -> f64 {
    match size {
        ProjectSize::Small => 0.8,
        ProjectSize::Medium => 1.0,
        ProjectSize::Large => 1.3,
        ProjectSize::Xl => 1.6,
    }
}

pub fn quality_multiplier(tier: QualityTier) -> f64 {
    match tier {
        QualityTier::Budget => 0.9,
        QualityTier::MidRange => 1.0,
        QualityTier::HighEnd => 1.2,
        QualityTier::Luxury => 1.5,
    }
}

fn confidence(request: &TradeRequest) -> f64 {
    let base = match request.project.quality_tier {
        QualityTier::Luxury => 0.7,
        QualityTier::HighEnd => 0.75,
        _ => 0.8,
    };
    // Unpriced requirement items widen the range.
    let penalty = 0.02 * request.trade_scope.specific_requirements.len() as f64;
    (base - penalty).max(0.5)
}

fn coordination(trade: &Trade) -> CoordinationRequirements {
    let (prerequisites, provides_for, flexibility): (&[&str], &[&str], &str) = match trade {
        Trade::Electrical => (&[], &["framing", "drywall"], "low"),
        Trade::Plumbing => (&[], &["framing", "fixtures"], "low"),
        Trade::Carpentry => (&["electrical rough-in", "plumbing rough-in"], &["flooring"], "medium"),
        Trade::Flooring => (&["cabinets installed"], &["painting"], "medium"),
        Trade::Painting => (&["flooring complete"], &[], "high"),
        Trade::Other(_) => (&[], &[], "medium"),
    };
    CoordinationRequirements {
        prerequisites: prerequisites.iter().map(|s| s.to_string()).collect(),
        provides_for: provides_for.iter().map(|s| s.to_string()).collect(),
        schedule_flexibility: flexibility.to_string(),
    }
}

/// Estimate a request the way this service's trade would quote it.
pub fn build_estimate(request: &TradeRequest, config: &StubConfig) -> TradeEstimate {
    let phases = if request.trade_scope.phases.is_empty() {
        vec!["installation".to_string()]
    } else {
        request.trade_scope.phases.clone()
    };

    let base_hours: f64 = phases.iter().map(|p| phase_hours(p)).sum();
    let hours = (base_hours
        * complexity_multiplier(request.project.size)
        * quality_multiplier(request.project.quality_tier)
        * 10.0)
        .round()
        / 10.0;
    let labor_cost = (Decimal::from_f64(hours).unwrap_or_default() * config.hourly_rate).round_dp(2);
    let timeline_days = ((hours / HOURS_PER_DAY).ceil() as i64).max(1);

    let line_items = request
        .trade_scope
        .specific_requirements
        .iter()
        .map(|requirement| MaterialLineItem {
            item: requirement.replace('_', " "),
            quantity: 1.0,
            unit: "lot".to_string(),
            unit_cost: None,
            total_cost: None,
        })
        .collect();

    let mut complications = Vec::new();
    if request.constraints.timeline == TimelinePreference::Rush {
        complications.push("Rush timeline may require overtime labor".to_string());
    }
    if let Some(max) = request.constraints.budget_range.as_ref().and_then(|b| b.max) {
        if labor_cost > max {
            complications.push(format!("Labor alone ({labor_cost}) exceeds budget maximum ({max})"));
        }
    }

    TradeEstimate {
        phases,
        labor: LaborEstimate {
            total_hours: hours,
            timeline_days: Some(timeline_days),
            cost: Some(labor_cost),
            hourly_rate: Some(config.hourly_rate),
        },
        materials: MaterialsEstimate {
            line_items,
            total_cost: None,
            pricing_status: Some(PENDING_PRICING.to_string()),
        },
        total_cost: Some(labor_cost),
        confidence: Some(confidence(request)),
        complications,
        coordination_requirements: coordination(&request.trade),
        note: Some("Material costs pending external pricing".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tces_models::{
        BudgetRange, Constraints, ProjectSnapshot, ProjectType, TradeScope,
    };
    use uuid::Uuid;

    fn request(size: ProjectSize, tier: QualityTier, phases: &[&str]) -> TradeRequest {
        TradeRequest {
            request_id: Uuid::new_v4(),
            trade: Trade::Plumbing,
            project: ProjectSnapshot {
                project_type: ProjectType::KitchenRenovation,
                size,
                quality_tier: tier,
                location: "unspecified".to_string(),
            },
            trade_scope: TradeScope {
                phases: phases.iter().map(|p| p.to_string()).collect(),
                specific_requirements: vec!["sink_replacement".to_string()],
            },
            constraints: Constraints {
                timeline: TimelinePreference::Standard,
                budget_range: None,
            },
        }
    }

    #[test]
    fn kitchen_plumbing_medium() {
        let config = StubConfig::for_trade(Trade::Plumbing);
        let phases = ["rough_in", "sink_installation", "appliance_hookups"];
        let estimate = build_estimate(
            &request(ProjectSize::Medium, QualityTier::MidRange, &phases),
            &config,
        );

        // 16 + 6 + 4
        assert_eq!(estimate.labor.total_hours, 26.0);
        assert_eq!(estimate.labor.cost, Some(dec!(1950)));
        assert_eq!(estimate.labor.timeline_days, Some(4));
        assert_eq!(estimate.total_cost, Some(dec!(1950)));
        assert_eq!(estimate.materials.line_items[0].item, "sink replacement");
        assert_eq!(estimate.materials.pricing_status.as_deref(), Some(PENDING_PRICING));
        assert!((estimate.confidence.unwrap() - 0.78).abs() < 1e-9);
        assert!(estimate.validate().is_ok());
    }

    #[test]
    fn multipliers_compound() {
        let config = StubConfig::for_trade(Trade::Plumbing);
        let estimate = build_estimate(
            &request(ProjectSize::Large, QualityTier::Luxury, &["rough_in"]),
            &config,
        );
        // 16 x 1.3 x 1.5
        assert_eq!(estimate.labor.total_hours, 31.2);
        assert_eq!(estimate.labor.cost, Some(dec!(2340.00)));
    }

    #[test]
    fn empty_scope_quotes_generic_installation() {
        let config = StubConfig::for_trade(Trade::Plumbing);
        let estimate = build_estimate(
            &request(ProjectSize::Small, QualityTier::Budget, &[]),
            &config,
        );
        assert_eq!(estimate.phases, vec!["installation"]);
        assert_eq!(estimate.labor.timeline_days, Some(1));
    }

    #[test]
    fn rush_and_tight_budget_are_flagged() {
        let config = StubConfig::for_trade(Trade::Plumbing);
        let mut req = request(ProjectSize::Medium, QualityTier::MidRange, &["rough_in"]);
        req.constraints.timeline = TimelinePreference::Rush;
        req.constraints.budget_range = Some(BudgetRange {
            min: None,
            max: Some(dec!(500)),
        });

        let estimate = build_estimate(&req, &config);
        assert_eq!(estimate.complications.len(), 2);
        assert!(estimate.complications[1].contains("exceeds budget"));
    }
}
