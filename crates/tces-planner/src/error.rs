use tces_models::Trade;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    #[error("Precedence table lists {0} more than once")]
    DuplicatePhase(Trade),

    #[error("{phase} depends on {dependency}, which is not in the precedence table")]
    DanglingDependency { phase: Trade, dependency: Trade },

    #[error("{phase} depends on {dependency}, which must be declared before it")]
    DependencyOrder { phase: Trade, dependency: Trade },
}
