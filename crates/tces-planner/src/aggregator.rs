use tces_models::{CombinedTotals, TradeResult};

/// Upper bound on aggregate confidence; synthetic estimates never reach 1.
pub const MAX_CONFIDENCE: f64 = 0.95;

/// Confidence assumed for a result that does not report one.
pub const DEFAULT_RESULT_CONFIDENCE: f64 = 0.5;

/// Confidence lost per failed trade, floored by [`MIN_RELIABILITY`].
pub const FAILURE_PENALTY: f64 = 0.2;
pub const MIN_RELIABILITY: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub totals: CombinedTotals,
    pub confidence: f64,
}

/// `max(0.5, 1 - 0.2 * failed)`.
pub fn reliability_factor(failed: usize) -> f64 {
    (1.0 - FAILURE_PENALTY * failed as f64).max(MIN_RELIABILITY)
}

/// Sum every result's estimate (or fallback) and score overall confidence.
pub fn aggregate(results: &[TradeResult]) -> Aggregate {
    let mut totals = CombinedTotals::default();
    for estimate in results.iter().filter_map(TradeResult::effective_estimate) {
        totals.labor_hours += estimate.labor.total_hours;
        totals.labor_cost += estimate.labor.cost.unwrap_or_default();
        totals.material_cost += estimate.materials.total_cost.unwrap_or_default();
        totals.total_cost += estimate.total_cost.unwrap_or_default();
    }

    Aggregate {
        totals,
        confidence: overall_confidence(results),
    }
}

fn overall_confidence(results: &[TradeResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }

    let sum: f64 = results
        .iter()
        .map(|r| {
            r.effective_estimate()
                .and_then(|e| e.confidence)
                .unwrap_or(DEFAULT_RESULT_CONFIDENCE)
        })
        .sum();
    let average = sum / results.len() as f64;
    let failed = results.iter().filter(|r| r.is_failed()).count();
    let mut factor = reliability_factor(failed);
    // Nothing answered: at most half of the fallback average, however few trades.
    if failed == results.len() {
        factor = factor.min(MIN_RELIABILITY);
    }

    (average * factor).clamp(0.0, MAX_CONFIDENCE)
}
