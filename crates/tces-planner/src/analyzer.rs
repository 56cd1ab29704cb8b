//! Rule-based project classification.
//!
//! Each field is classified by an ordered rule table: the first rule with a
//! keyword found in the description wins, and unmatched text falls back to
//! the field's default. Trade triggers are the exception; every matching
//! trade is kept.
//!
//! Keywords match whole words of the lowercased description, allowing a
//! plural or participle ending on the last word ("cabinets", "flooring"),
//! so "stain" does not fire on "stainless".

use tces_models::project::DEFAULT_LOCATION;
use tces_models::{
    ProjectAnalysis, ProjectHints, ProjectSize, ProjectType, QualityTier, TimelinePreference,
    Trade,
};
use tracing::debug;

/// A keyword rule mapping any of `keywords` to `outcome`.
struct Rule<T> {
    keywords: &'static [&'static str],
    outcome: T,
}

const PROJECT_TYPE_RULES: &[Rule<ProjectType>] = &[
    Rule {
        keywords: &["whole house", "whole home", "entire house", "entire home", "full house"],
        outcome: ProjectType::WholeHouseRenovation,
    },
    Rule {
        keywords: &["kitchen"],
        outcome: ProjectType::KitchenRenovation,
    },
    Rule {
        keywords: &["bathroom", "bath remodel", "ensuite", "powder room"],
        outcome: ProjectType::BathroomRenovation,
    },
    Rule {
        keywords: &["basement"],
        outcome: ProjectType::BasementFinish,
    },
    Rule {
        keywords: &["addition", "add a room", "extension", "sunroom"],
        outcome: ProjectType::RoomAddition,
    },
];

// "extra large" must be checked before "large".
const SIZE_RULES: &[Rule<ProjectSize>] = &[
    Rule {
        keywords: &["extra large", "massive", "huge", "xl"],
        outcome: ProjectSize::Xl,
    },
    Rule {
        keywords: &["small", "galley", "tiny", "compact"],
        outcome: ProjectSize::Small,
    },
    Rule {
        keywords: &["large", "big", "spacious"],
        outcome: ProjectSize::Large,
    },
];

const QUALITY_RULES: &[Rule<QualityTier>] = &[
    Rule {
        keywords: &["budget", "cheap", "basic", "affordable", "economy"],
        outcome: QualityTier::Budget,
    },
    Rule {
        keywords: &["luxury", "premium", "custom", "designer"],
        outcome: QualityTier::Luxury,
    },
    Rule {
        keywords: &["high end", "upscale", "high quality", "good quality"],
        outcome: QualityTier::HighEnd,
    },
];

// "no rush" must be checked before "rush".
const TIMELINE_RULES: &[Rule<TimelinePreference>] = &[
    Rule {
        keywords: &["flexible", "no rush", "no hurry", "not in a hurry", "whenever"],
        outcome: TimelinePreference::Flexible,
    },
    Rule {
        keywords: &["rush", "asap", "as soon as possible", "urgent", "quickly", "emergency"],
        outcome: TimelinePreference::Rush,
    },
];

/// Trade triggers, in trade priority order.
const TRADE_TRIGGERS: &[Rule<Trade>] = &[
    Rule {
        keywords: &[
            "cabinet", "carpentry", "carpenter", "trim", "molding", "framing", "door",
            "shelving", "shelves", "deck", "woodwork", "built in", "vanity",
        ],
        outcome: Trade::Carpentry,
    },
    Rule {
        keywords: &[
            "electrical", "electric", "wiring", "rewire", "outlet", "lighting", "light fixture",
            "panel", "circuit", "breaker",
        ],
        outcome: Trade::Electrical,
    },
    Rule {
        keywords: &[
            "plumbing", "plumber", "pipe", "faucet", "sink", "toilet", "shower", "drain",
            "water heater", "bathtub",
        ],
        outcome: Trade::Plumbing,
    },
    Rule {
        keywords: &["floor", "tile", "hardwood", "carpet", "laminate", "vinyl plank"],
        outcome: Trade::Flooring,
    },
    Rule {
        keywords: &["paint", "primer", "stain"],
        outcome: Trade::Painting,
    },
];

/// Requirement tags, collected in declaration order.
const REQUIREMENT_TAGS: &[Rule<&str>] = &[
    Rule { keywords: &["cabinet"], outcome: "new_cabinets" },
    Rule { keywords: &["countertop"], outcome: "countertops" },
    Rule { keywords: &["island"], outcome: "kitchen_island" },
    Rule { keywords: &["molding"], outcome: "crown_molding" },
    Rule { keywords: &["trim"], outcome: "trim_work" },
    Rule { keywords: &["door"], outcome: "door_replacement" },
    Rule { keywords: &["recessed"], outcome: "recessed_lighting" },
    Rule { keywords: &["lighting", "light fixture"], outcome: "lighting_upgrade" },
    Rule { keywords: &["outlet"], outcome: "outlet_addition" },
    Rule { keywords: &["panel"], outcome: "panel_upgrade" },
    Rule { keywords: &["appliance"], outcome: "appliance_circuits" },
    Rule { keywords: &["sink"], outcome: "sink_replacement" },
    Rule { keywords: &["faucet"], outcome: "faucet_replacement" },
    Rule { keywords: &["toilet"], outcome: "toilet_replacement" },
    Rule { keywords: &["shower"], outcome: "shower_conversion" },
    Rule { keywords: &["bathtub"], outcome: "tub_replacement" },
    Rule { keywords: &["water heater"], outcome: "water_heater_replacement" },
    Rule { keywords: &["hardwood"], outcome: "hardwood_flooring" },
    Rule { keywords: &["tile"], outcome: "tile_flooring" },
    Rule { keywords: &["carpet"], outcome: "carpet_flooring" },
    Rule { keywords: &["paint"], outcome: "interior_paint" },
    Rule { keywords: &["drywall"], outcome: "drywall_repair" },
    Rule { keywords: &["permit"], outcome: "permits" },
];

/// Endings a keyword's last word may carry and still match.
const INFLECTIONS: &[&str] = &["", "s", "es", "d", "ed", "ing", "ry"];

/// Lowercased alphanumeric words of `text`, each followed by a single
/// space and the whole led by one, e.g. `" new stainless sink "`.
fn words(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut out = String::with_capacity(lowered.len() + 2);
    out.push(' ');
    for word in lowered.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
        out.push_str(word);
        out.push(' ');
    }
    out
}

fn contains_keyword(words: &str, keyword: &str) -> bool {
    let needle = format!(" {keyword}");
    words.match_indices(needle.as_str()).any(|(at, _)| {
        let rest = &words[at + needle.len()..];
        let ending = rest.find(' ').map_or(rest, |end| &rest[..end]);
        INFLECTIONS.contains(&ending)
    })
}

fn matches(words: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| contains_keyword(words, k))
}

fn classify<T: Clone>(words: &str, rules: &[Rule<T>]) -> Option<T> {
    rules
        .iter()
        .find(|rule| matches(words, rule.keywords))
        .map(|rule| rule.outcome.clone())
}

/// Every trade whose triggers appear in `text`, in priority order.
pub fn detect_trades(text: &str) -> Vec<Trade> {
    trades_in(&words(text))
}

fn trades_in(words: &str) -> Vec<Trade> {
    TRADE_TRIGGERS
        .iter()
        .filter(|rule| matches(words, rule.keywords))
        .map(|rule| rule.outcome.clone())
        .collect()
}

/// Requirement tags mentioned in `text`, in vocabulary order.
pub fn detect_requirements(text: &str) -> Vec<String> {
    requirements_in(&words(text))
}

fn requirements_in(words: &str) -> Vec<String> {
    REQUIREMENT_TAGS
        .iter()
        .filter(|rule| matches(words, rule.keywords))
        .map(|rule| rule.outcome.to_string())
        .collect()
}

/// Deduplicate and order trades: built-in trades by priority, then any
/// other trades in the order given. Blank names are dropped.
fn normalize_trades(trades: &[Trade]) -> Vec<Trade> {
    let mut ordered: Vec<Trade> = Vec::with_capacity(trades.len());
    for trade in trades {
        if !trade.as_str().trim().is_empty() && !ordered.contains(trade) {
            ordered.push(trade.clone());
        }
    }
    // Stable sort keeps unknown trades in caller order.
    ordered.sort_by_key(Trade::priority);
    ordered
}

/// Classify a free-text description into a [`ProjectAnalysis`].
///
/// Present hints override detection field by field. Never fails: anything
/// unrecognized degrades to the documented defaults, and the trade list
/// always contains at least `carpentry`.
pub fn analyze(description: &str, hints: &ProjectHints) -> ProjectAnalysis {
    let text = words(description);

    let project_type = hints
        .project_type
        .or_else(|| classify(&text, PROJECT_TYPE_RULES))
        .unwrap_or_default();
    let size = hints
        .size
        .or_else(|| classify(&text, SIZE_RULES))
        .unwrap_or_default();
    let quality_tier = hints
        .quality_tier
        .or_else(|| classify(&text, QUALITY_RULES))
        .unwrap_or_default();
    let timeline_preference = hints
        .timeline
        .or_else(|| classify(&text, TIMELINE_RULES))
        .unwrap_or_default();

    let hinted = normalize_trades(&hints.trades);
    let mut trades_required = if hinted.is_empty() {
        trades_in(&text)
    } else {
        hinted
    };
    if trades_required.is_empty() {
        trades_required.push(Trade::Carpentry);
    }

    let mut specific_requirements = requirements_in(&text);
    for requirement in &hints.requirements {
        let requirement = requirement.trim();
        if !requirement.is_empty() && !specific_requirements.iter().any(|r| r == requirement) {
            specific_requirements.push(requirement.to_string());
        }
    }

    let location = hints
        .location
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(DEFAULT_LOCATION)
        .to_string();

    debug!(
        project_type = ?project_type,
        size = ?size,
        quality_tier = ?quality_tier,
        trades = ?trades_required,
        "Project analyzed"
    );

    ProjectAnalysis {
        project_type,
        size,
        quality_tier,
        trades_required,
        specific_requirements,
        location,
        timeline_preference,
        budget_range: hints.budget_range.clone(),
    }
}
