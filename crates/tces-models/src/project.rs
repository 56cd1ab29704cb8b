use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::trade::Trade;

pub const DEFAULT_LOCATION: &str = "unspecified";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    KitchenRenovation,
    BathroomRenovation,
    BasementFinish,
    RoomAddition,
    WholeHouseRenovation,
    #[default]
    GeneralRenovation,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProjectSize {
    Small,
    #[default]
    Medium,
    Large,
    Xl,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    Budget,
    #[default]
    MidRange,
    HighEnd,
    Luxury,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimelinePreference {
    Rush,
    #[default]
    Standard,
    Flexible,
}

/// Caller budget bounds, passed through to trade services untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetRange {
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

/// Optional structured details supplied alongside the free-text description.
/// Every present field overrides what the analyzer would detect.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProjectHints {
    pub project_type: Option<ProjectType>,
    pub size: Option<ProjectSize>,
    pub quality_tier: Option<QualityTier>,
    /// Replaces trade detection when non-empty.
    pub trades: Vec<Trade>,
    /// Merged with detected requirement tags.
    pub requirements: Vec<String>,
    pub location: Option<String>,
    pub timeline: Option<TimelinePreference>,
    pub budget_range: Option<BudgetRange>,
}

/// Normalized view of a project, produced once per orchestration request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectAnalysis {
    pub project_type: ProjectType,
    pub size: ProjectSize,
    pub quality_tier: QualityTier,
    /// Never empty; ordered by trade priority.
    pub trades_required: Vec<Trade>,
    pub specific_requirements: Vec<String>,
    pub location: String,
    pub timeline_preference: TimelinePreference,
    pub budget_range: Option<BudgetRange>,
}
