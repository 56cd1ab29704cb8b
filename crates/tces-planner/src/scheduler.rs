use std::collections::HashMap;

use tces_models::{ScheduleEntry, ScheduleMode, Trade, TradeResult};

use crate::error::PlannerError;

/// One row of the precedence table: a trade and the trades that must finish
/// before it starts. Weather and inspection notes are advisory metadata and
/// do not move the schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseDependency {
    pub phase: Trade,
    pub dependencies: Vec<Trade>,
    pub weather_sensitive: bool,
    pub inspection: Option<String>,
}

impl PhaseDependency {
    pub fn new(phase: Trade, dependencies: &[Trade]) -> Self {
        Self {
            phase,
            dependencies: dependencies.to_vec(),
            weather_sensitive: false,
            inspection: None,
        }
    }

    pub fn with_inspection(mut self, inspection: &str) -> Self {
        self.inspection = Some(inspection.to_string());
        self
    }

    pub fn with_weather_sensitivity(mut self) -> Self {
        self.weather_sensitive = true;
        self
    }
}

/// The standard residential precedence table, in declaration order.
pub fn standard_precedence() -> Vec<PhaseDependency> {
    vec![
        PhaseDependency::new(Trade::Electrical, &[]).with_inspection("electrical rough-in"),
        PhaseDependency::new(Trade::Plumbing, &[]).with_inspection("plumbing rough-in"),
        PhaseDependency::new(Trade::Carpentry, &[Trade::Electrical, Trade::Plumbing])
            .with_inspection("framing"),
        PhaseDependency::new(Trade::Flooring, &[Trade::Carpentry]),
        PhaseDependency::new(Trade::Painting, &[Trade::Flooring]).with_weather_sensitivity(),
    ]
}

/// Working days a result asks for: `labor.timeline_days` from the estimate
/// or fallback, or one day when absent or non-positive.
pub fn duration_of(result: &TradeResult) -> u32 {
    result
        .effective_estimate()
        .and_then(|e| e.labor.timeline_days)
        .filter(|days| *days > 0)
        .map(|days| u32::try_from(days).unwrap_or(u32::MAX))
        .unwrap_or(1)
}

/// Orders trades by a precedence table and assigns day ranges.
///
/// Sequential mode (the default) runs one trade at a time in table order,
/// even when two trades share no dependency. Parallel mode is an opt-in
/// extension that starts each trade the day after its latest present
/// dependency ends.
#[derive(Debug, Clone)]
pub struct DependencyScheduler {
    table: Vec<PhaseDependency>,
    mode: ScheduleMode,
}

impl Default for DependencyScheduler {
    fn default() -> Self {
        Self::standard(ScheduleMode::Sequential)
    }
}

impl DependencyScheduler {
    /// Build a scheduler over a custom table. Every dependency must name a
    /// phase declared earlier in the same table.
    pub fn new(table: Vec<PhaseDependency>, mode: ScheduleMode) -> Result<Self, PlannerError> {
        for (index, entry) in table.iter().enumerate() {
            if table[..index].iter().any(|e| e.phase == entry.phase) {
                return Err(PlannerError::DuplicatePhase(entry.phase.clone()));
            }
            for dependency in &entry.dependencies {
                match table.iter().position(|e| &e.phase == dependency) {
                    None => {
                        return Err(PlannerError::DanglingDependency {
                            phase: entry.phase.clone(),
                            dependency: dependency.clone(),
                        })
                    }
                    Some(dep_index) if dep_index >= index => {
                        return Err(PlannerError::DependencyOrder {
                            phase: entry.phase.clone(),
                            dependency: dependency.clone(),
                        })
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(Self { table, mode })
    }

    pub fn standard(mode: ScheduleMode) -> Self {
        Self {
            table: standard_precedence(),
            mode,
        }
    }

    pub fn mode(&self) -> ScheduleMode {
        self.mode
    }

    pub fn table(&self) -> &[PhaseDependency] {
        &self.table
    }

    /// The table row for a trade, including its advisory metadata.
    pub fn entry(&self, trade: &Trade) -> Option<&PhaseDependency> {
        self.table.iter().find(|e| &e.phase == trade)
    }

    pub fn dependencies_of(&self, trade: &Trade) -> &[Trade] {
        self.entry(trade)
            .map(|e| e.dependencies.as_slice())
            .unwrap_or(&[])
    }

    /// One entry per result: tabled trades in table order, then untabled
    /// trades in result order.
    pub fn schedule(&self, results: &[TradeResult]) -> Vec<ScheduleEntry> {
        let mut ordered: Vec<&TradeResult> = Vec::with_capacity(results.len());
        for entry in &self.table {
            ordered.extend(results.iter().filter(|r| r.trade == entry.phase));
        }
        let tabled = ordered.len();
        ordered.extend(results.iter().filter(|r| self.entry(&r.trade).is_none()));

        match self.mode {
            ScheduleMode::Sequential => Self::sequential(&ordered),
            ScheduleMode::Parallel => self.parallel(&ordered, tabled),
        }
    }

    fn sequential(ordered: &[&TradeResult]) -> Vec<ScheduleEntry> {
        let mut cursor = 0u32;
        ordered
            .iter()
            .map(|result| {
                let entry = slot(result, cursor.saturating_add(1));
                cursor = entry.end_day;
                entry
            })
            .collect()
    }

    fn parallel(&self, ordered: &[&TradeResult], tabled: usize) -> Vec<ScheduleEntry> {
        let mut end_days: HashMap<&Trade, u32> = HashMap::new();
        let mut entries = Vec::with_capacity(ordered.len());

        for (index, result) in ordered.iter().enumerate() {
            let after = if index < tabled {
                self.dependencies_of(&result.trade)
                    .iter()
                    .filter_map(|dep| end_days.get(dep).copied())
                    .max()
                    .unwrap_or(0)
            } else {
                entries[..tabled]
                    .iter()
                    .map(|e: &ScheduleEntry| e.end_day)
                    .max()
                    .unwrap_or(0)
            };

            let entry = slot(result, after.saturating_add(1));
            let end = end_days.entry(&result.trade).or_insert(0);
            *end = (*end).max(entry.end_day);
            entries.push(entry);
        }

        entries
    }
}

fn slot(result: &TradeResult, start_day: u32) -> ScheduleEntry {
    let duration = duration_of(result);
    ScheduleEntry {
        trade: result.trade.clone(),
        start_day,
        end_day: start_day.saturating_add(duration - 1),
        duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tces_models::{
        CoordinationRequirements, LaborEstimate, MaterialsEstimate, TradeEstimate,
    };

    fn result(trade: Trade, days: Option<i64>) -> TradeResult {
        TradeResult::success(
            trade,
            TradeEstimate {
                phases: vec!["installation".to_string()],
                labor: LaborEstimate {
                    total_hours: 8.0,
                    timeline_days: days,
                    cost: None,
                    hourly_rate: None,
                },
                materials: MaterialsEstimate {
                    line_items: vec![],
                    total_cost: None,
                    pricing_status: None,
                },
                total_cost: None,
                confidence: None,
                complications: vec![],
                coordination_requirements: CoordinationRequirements::default(),
                note: None,
            },
        )
    }

    fn find<'a>(schedule: &'a [ScheduleEntry], trade: &Trade) -> &'a ScheduleEntry {
        schedule.iter().find(|e| &e.trade == trade).unwrap()
    }

    fn assert_precedence_holds(scheduler: &DependencyScheduler, schedule: &[ScheduleEntry]) {
        for entry in schedule {
            for dep in scheduler.dependencies_of(&entry.trade) {
                if let Some(dep_entry) = schedule.iter().find(|e| &e.trade == dep) {
                    assert!(
                        entry.start_day > dep_entry.end_day,
                        "{} starts day {} but {} ends day {}",
                        entry.trade,
                        entry.start_day,
                        dep,
                        dep_entry.end_day
                    );
                }
            }
        }
    }

    #[test]
    fn standard_table_is_valid() {
        let table = standard_precedence();
        assert!(DependencyScheduler::new(table, ScheduleMode::Sequential).is_ok());
    }

    #[test]
    fn sequential_follows_table_order() {
        let scheduler = DependencyScheduler::default();
        let results = vec![
            result(Trade::Painting, Some(2)),
            result(Trade::Carpentry, Some(5)),
            result(Trade::Electrical, Some(3)),
            result(Trade::Plumbing, Some(2)),
        ];

        let schedule = scheduler.schedule(&results);
        let order: Vec<&Trade> = schedule.iter().map(|e| &e.trade).collect();
        assert_eq!(
            order,
            vec![
                &Trade::Electrical,
                &Trade::Plumbing,
                &Trade::Carpentry,
                &Trade::Painting
            ]
        );

        assert_eq!(
            schedule[0],
            ScheduleEntry {
                trade: Trade::Electrical,
                start_day: 1,
                end_day: 3,
                duration: 3
            }
        );
        assert_eq!((schedule[1].start_day, schedule[1].end_day), (4, 5));
        assert_eq!((schedule[2].start_day, schedule[2].end_day), (6, 10));
        assert_eq!((schedule[3].start_day, schedule[3].end_day), (11, 12));
        assert_precedence_holds(&scheduler, &schedule);
    }

    #[test]
    fn missing_or_non_positive_duration_is_one_day() {
        let scheduler = DependencyScheduler::default();
        let results = vec![
            result(Trade::Electrical, None),
            result(Trade::Plumbing, Some(0)),
            result(Trade::Carpentry, Some(-4)),
        ];
        let schedule = scheduler.schedule(&results);
        assert!(schedule.iter().all(|e| e.duration == 1));
        assert_eq!(schedule[2].start_day, 3);
        assert_eq!(schedule[2].end_day, 3);
    }

    #[test]
    fn untabled_trades_go_last_in_result_order() {
        let scheduler = DependencyScheduler::default();
        let results = vec![
            result(Trade::Other("roofing".to_string()), Some(2)),
            result(Trade::Carpentry, Some(1)),
            result(Trade::Other("hvac".to_string()), Some(1)),
        ];
        let schedule = scheduler.schedule(&results);
        let order: Vec<&str> = schedule.iter().map(|e| e.trade.as_str()).collect();
        assert_eq!(order, vec!["carpentry", "roofing", "hvac"]);
        assert_eq!(schedule[1].start_day, 2);
        assert_eq!(schedule[2].start_day, 4);
    }

    #[test]
    fn empty_results_yield_empty_schedule() {
        assert!(DependencyScheduler::default().schedule(&[]).is_empty());
    }

    #[test]
    fn parallel_mode_overlaps_independent_trades() {
        let scheduler = DependencyScheduler::standard(ScheduleMode::Parallel);
        let results = vec![
            result(Trade::Carpentry, Some(4)),
            result(Trade::Electrical, Some(3)),
            result(Trade::Plumbing, Some(5)),
            result(Trade::Flooring, Some(2)),
            result(Trade::Other("hvac".to_string()), Some(1)),
        ];
        let schedule = scheduler.schedule(&results);

        let electrical = find(&schedule, &Trade::Electrical);
        let plumbing = find(&schedule, &Trade::Plumbing);
        assert_eq!(electrical.start_day, 1);
        assert_eq!(plumbing.start_day, 1);

        let carpentry = find(&schedule, &Trade::Carpentry);
        assert_eq!(carpentry.start_day, 6);
        assert_eq!(find(&schedule, &Trade::Flooring).start_day, 10);
        assert_eq!(find(&schedule, &Trade::Other("hvac".to_string())).start_day, 12);
        assert_precedence_holds(&scheduler, &schedule);
    }

    #[test]
    fn parallel_mode_skips_absent_dependencies() {
        let scheduler = DependencyScheduler::standard(ScheduleMode::Parallel);
        let schedule = scheduler.schedule(&[result(Trade::Painting, Some(2))]);
        assert_eq!(schedule[0].start_day, 1);
        assert_eq!(schedule[0].end_day, 2);
    }

    #[test]
    fn rejects_dangling_dependency() {
        let table = vec![PhaseDependency::new(Trade::Carpentry, &[Trade::Electrical])];
        assert_eq!(
            DependencyScheduler::new(table, ScheduleMode::Sequential).unwrap_err(),
            PlannerError::DanglingDependency {
                phase: Trade::Carpentry,
                dependency: Trade::Electrical
            }
        );
    }

    #[test]
    fn rejects_forward_and_duplicate_declarations() {
        let forward = vec![
            PhaseDependency::new(Trade::Carpentry, &[Trade::Electrical]),
            PhaseDependency::new(Trade::Electrical, &[]),
        ];
        assert!(matches!(
            DependencyScheduler::new(forward, ScheduleMode::Sequential),
            Err(PlannerError::DependencyOrder { .. })
        ));

        let duplicate = vec![
            PhaseDependency::new(Trade::Electrical, &[]),
            PhaseDependency::new(Trade::Electrical, &[]),
        ];
        assert_eq!(
            DependencyScheduler::new(duplicate, ScheduleMode::Sequential).unwrap_err(),
            PlannerError::DuplicatePhase(Trade::Electrical)
        );
    }

    #[test]
    fn advisory_metadata_is_carried() {
        let scheduler = DependencyScheduler::default();
        assert_eq!(
            scheduler.entry(&Trade::Carpentry).unwrap().inspection.as_deref(),
            Some("framing")
        );
        assert!(scheduler.entry(&Trade::Painting).unwrap().weather_sensitive);
    }
}
