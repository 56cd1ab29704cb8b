pub mod config;
pub mod contract;
pub mod coordinated;
pub mod project;
pub mod trade;
pub mod trade_estimate;
pub mod trade_request;

pub use config::{
    ConfigError, DispatchConfig, ScheduleMode, SchedulerConfig, ServicesConfig, TcesConfig,
};
pub use contract::{validate_request_payload, ContractError, ESTIMATE_PATH};
pub use coordinated::{
    CombinedTotals, CoordinatedEstimate, EstimateResponse, EstimatesSection, ProjectSummary,
    ScheduleEntry, ScheduleSection, TradeLine,
};
pub use project::{
    BudgetRange, ProjectAnalysis, ProjectHints, ProjectSize, ProjectType, QualityTier,
    TimelinePreference,
};
pub use trade::Trade;
pub use trade_estimate::{
    CoordinationRequirements, LaborEstimate, MaterialLineItem, MaterialsEstimate, TradeEstimate,
    TradeResult, TradeStatus,
};
pub use trade_request::{Constraints, ProjectSnapshot, TradeRequest, TradeScope};
