use tces_models::{
    Constraints, ProjectAnalysis, ProjectSnapshot, ProjectType, Trade, TradeRequest, TradeScope,
};
use uuid::Uuid;

/// Phase list used when a trade has no mapping for the project type.
pub const GENERIC_PHASES: &[&str] = &["installation"];

/// Ordered phases for a trade on a given project type, if mapped.
fn phase_table(trade: &Trade, project_type: ProjectType) -> Option<&'static [&'static str]> {
    use ProjectType::*;

    let phases: &'static [&'static str] = match (trade, project_type) {
        (Trade::Carpentry, KitchenRenovation) => {
            &["demolition", "framing", "cabinet_installation", "trim_finish"]
        }
        (Trade::Carpentry, BathroomRenovation) => {
            &["demolition", "vanity_installation", "trim_finish"]
        }
        (Trade::Carpentry, BasementFinish) => &["framing", "door_installation", "trim_finish"],
        (Trade::Carpentry, RoomAddition) => {
            &["floor_framing", "wall_framing", "roof_framing", "trim_finish"]
        }
        (Trade::Carpentry, WholeHouseRenovation) => &[
            "demolition",
            "framing",
            "cabinet_installation",
            "door_installation",
            "trim_finish",
        ],

        (Trade::Electrical, KitchenRenovation) => &[
            "rough_in",
            "panel_assessment",
            "fixture_installation",
            "final_connections",
        ],
        (Trade::Electrical, BathroomRenovation) => {
            &["rough_in", "gfci_installation", "fixture_installation"]
        }
        (Trade::Electrical, BasementFinish) => {
            &["rough_in", "lighting_installation", "final_connections"]
        }
        (Trade::Electrical, RoomAddition) => {
            &["service_extension", "rough_in", "final_connections"]
        }
        (Trade::Electrical, WholeHouseRenovation) => &[
            "panel_upgrade",
            "rough_in",
            "fixture_installation",
            "final_connections",
        ],

        (Trade::Plumbing, KitchenRenovation) => {
            &["rough_in", "sink_installation", "appliance_hookups"]
        }
        (Trade::Plumbing, BathroomRenovation) => {
            &["rough_in", "fixture_installation", "finish_plumbing"]
        }
        (Trade::Plumbing, BasementFinish) => {
            &["rough_in", "drain_installation", "fixture_installation"]
        }
        (Trade::Plumbing, WholeHouseRenovation) => {
            &["supply_replacement", "rough_in", "fixture_installation"]
        }

        (Trade::Flooring, KitchenRenovation | BathroomRenovation) => {
            &["subfloor_preparation", "tile_installation", "grouting"]
        }
        (Trade::Flooring, BasementFinish | RoomAddition | WholeHouseRenovation) => {
            &["subfloor_preparation", "flooring_installation", "transitions"]
        }

        (Trade::Painting, KitchenRenovation | BathroomRenovation) => {
            &["surface_preparation", "priming", "finish_coats"]
        }
        (Trade::Painting, BasementFinish | RoomAddition | WholeHouseRenovation) => &[
            "surface_preparation",
            "drywall_touch_up",
            "priming",
            "finish_coats",
        ],

        _ => return None,
    };
    Some(phases)
}

/// Phases a trade should quote, falling back to [`GENERIC_PHASES`].
pub fn phases_for(trade: &Trade, project_type: ProjectType) -> Vec<String> {
    phase_table(trade, project_type)
        .unwrap_or(GENERIC_PHASES)
        .iter()
        .map(|p| p.to_string())
        .collect()
}

/// Substrings a requirement tag must contain to be relevant to a trade.
/// `None` means the trade receives every requirement.
fn requirement_keywords(trade: &Trade) -> Option<&'static [&'static str]> {
    match trade {
        Trade::Carpentry => Some(&["cabinet", "trim", "molding", "door"]),
        Trade::Electrical => Some(&["lighting", "outlet", "panel", "circuit", "appliance"]),
        Trade::Plumbing => Some(&[
            "fixture", "sink", "faucet", "toilet", "shower", "tub", "water", "drain",
        ]),
        Trade::Flooring => Some(&["floor", "tile"]),
        Trade::Painting => Some(&["paint", "drywall"]),
        Trade::Other(_) => None,
    }
}

/// The subset of `requirements` relevant to `trade`, order preserved.
pub fn filter_requirements(trade: &Trade, requirements: &[String]) -> Vec<String> {
    match requirement_keywords(trade) {
        Some(keywords) => requirements
            .iter()
            .filter(|tag| keywords.iter().any(|k| tag.contains(k)))
            .cloned()
            .collect(),
        None => requirements.to_vec(),
    }
}

/// Expand an analysis into one request per required trade, in trade order.
pub fn build_requests(analysis: &ProjectAnalysis) -> Vec<(Trade, TradeRequest)> {
    let project = ProjectSnapshot {
        project_type: analysis.project_type,
        size: analysis.size,
        quality_tier: analysis.quality_tier,
        location: analysis.location.clone(),
    };
    let constraints = Constraints {
        timeline: analysis.timeline_preference,
        budget_range: analysis.budget_range.clone(),
    };

    analysis
        .trades_required
        .iter()
        .map(|trade| {
            let request = TradeRequest {
                request_id: Uuid::new_v4(),
                trade: trade.clone(),
                project: project.clone(),
                trade_scope: TradeScope {
                    phases: phases_for(trade, analysis.project_type),
                    specific_requirements: filter_requirements(
                        trade,
                        &analysis.specific_requirements,
                    ),
                },
                constraints: constraints.clone(),
            };
            (trade.clone(), request)
        })
        .collect()
}
