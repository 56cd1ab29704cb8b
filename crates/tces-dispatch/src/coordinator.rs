use std::time::Instant;

use chrono::Utc;
use serde::Serialize;
use tces_models::{
    CoordinatedEstimate, EstimateResponse, ProjectAnalysis, ProjectHints, Trade, TradeRequest,
};
use tces_planner::{aggregate, analyze, build_requests, DependencyScheduler};
use tracing::info;
use uuid::Uuid;

use crate::dispatcher::TradeDispatcher;
use crate::error::CoordinationError;

/// The analysis of a description and the requests it would send, before
/// anything is dispatched.
#[derive(Debug, Clone, Serialize)]
pub struct RequestPlan {
    pub analysis: ProjectAnalysis,
    pub requests: Vec<(Trade, TradeRequest)>,
}

/// Full output of one orchestration request: the formatted response plus the
/// intermediate analysis and per-trade results (including error text).
#[derive(Debug, Clone, Serialize)]
pub struct CoordinationReport {
    pub analysis: ProjectAnalysis,
    pub coordinated: CoordinatedEstimate,
    pub response: EstimateResponse,
}

/// Runs analyzer, request builder, dispatcher, scheduler and aggregator for
/// one project description.
#[derive(Debug, Clone)]
pub struct Coordinator {
    dispatcher: TradeDispatcher,
    scheduler: DependencyScheduler,
}

impl Coordinator {
    pub fn new(dispatcher: TradeDispatcher, scheduler: DependencyScheduler) -> Self {
        Self {
            dispatcher,
            scheduler,
        }
    }

    pub fn dispatcher(&self) -> &TradeDispatcher {
        &self.dispatcher
    }

    pub fn scheduler(&self) -> &DependencyScheduler {
        &self.scheduler
    }

    /// Analyze the description and build per-trade requests. No I/O.
    pub fn plan(
        &self,
        description: &str,
        hints: &ProjectHints,
    ) -> Result<RequestPlan, CoordinationError> {
        if description.trim().is_empty() {
            return Err(CoordinationError::InvalidInput(
                "project description must not be empty".to_string(),
            ));
        }

        let analysis = analyze(description, hints);
        if analysis.trades_required.is_empty() {
            return Err(CoordinationError::NoTrades);
        }

        let requests = build_requests(&analysis);
        Ok(RequestPlan { analysis, requests })
    }

    pub async fn coordinate(
        &self,
        description: &str,
        hints: &ProjectHints,
    ) -> Result<EstimateResponse, CoordinationError> {
        Ok(self.coordinate_detailed(description, hints).await?.response)
    }

    pub async fn coordinate_detailed(
        &self,
        description: &str,
        hints: &ProjectHints,
    ) -> Result<CoordinationReport, CoordinationError> {
        let start = Instant::now();
        let RequestPlan { analysis, requests } = self.plan(description, hints)?;
        info!(
            project_type = ?analysis.project_type,
            size = ?analysis.size,
            trades = analysis.trades_required.len(),
            "Starting coordination"
        );

        let results = self.dispatcher.dispatch(requests).await;
        let schedule = self.scheduler.schedule(&results);
        let totals = aggregate(&results);

        let coordinated = CoordinatedEstimate {
            estimates: results,
            schedule,
            totals: totals.totals,
            confidence: totals.confidence,
        };

        let response = EstimateResponse::new(
            description,
            &analysis,
            &coordinated,
            Uuid::new_v4(),
            Utc::now(),
        );

        info!(
            request_id = %response.request_id,
            failed = coordinated.failed_count(),
            total_cost = %coordinated.totals.total_cost,
            timeline_days = coordinated.total_timeline_days(),
            confidence = coordinated.confidence,
            elapsed_ms = start.elapsed().as_millis(),
            "Coordination complete"
        );

        Ok(CoordinationReport {
            analysis,
            coordinated,
            response,
        })
    }
}
