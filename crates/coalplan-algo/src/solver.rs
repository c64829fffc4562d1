//! Thin wrapper around the external LP solve capability.
//!
//! The rest of the crate treats the solver as a black box that accepts
//! non-negative continuous columns, named rows and a linear objective, and
//! returns primal values, reduced costs and row duals. This module pins down
//! the status handling: infeasible and unbounded models are surfaced as
//! distinct typed errors before any primal or dual field is read.

use highs::{HighsModelStatus, HighsStatus, Model};
use thiserror::Error;

/// Errors raised by a solve attempt.
#[derive(Debug, Clone, Error)]
pub enum SolveError {
    /// The model definition is incoherent (solver rejected the problem).
    #[error("incoherent model: {0:?}")]
    Incoherent(HighsStatus),

    /// The constraint set admits no solution.
    #[error("model is infeasible")]
    Infeasible,

    /// The objective is unbounded.
    #[error("model is unbounded")]
    Unbounded,

    /// Presolve could not distinguish infeasible from unbounded.
    #[error("model is infeasible or unbounded")]
    InfeasibleOrUnbounded,

    /// Any other non-optimal terminal status.
    #[error("could not find optimal result: {0:?}")]
    NonOptimal(HighsModelStatus),
}

/// Solve the model, returning the solved state only when an optimal solution
/// exists. Every other terminal status becomes a [`SolveError`].
pub fn solve_optimal(mut model: Model) -> Result<highs::SolvedModel, SolveError> {
    model.set_option("output_flag", false);
    let solved = model.try_solve().map_err(SolveError::Incoherent)?;

    match solved.status() {
        HighsModelStatus::Optimal => Ok(solved),
        HighsModelStatus::Infeasible => Err(SolveError::Infeasible),
        HighsModelStatus::Unbounded => Err(SolveError::Unbounded),
        HighsModelStatus::UnboundedOrInfeasible => Err(SolveError::InfeasibleOrUnbounded),
        status => Err(SolveError::NonOptimal(status)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use highs::{RowProblem, Sense};

    #[test]
    fn optimal_model_returns_the_solved_state() {
        let mut pb = RowProblem::default();
        let x = pb.add_column(1.0, 0.0..);
        pb.add_row(..=10.0, &[(x, 1.0)]);
        let solved = solve_optimal(pb.optimise(Sense::Maximise)).unwrap();
        assert!((solved.objective_value() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn infeasible_model_is_a_typed_error() {
        // x >= 0 but the row forces x <= -1.
        let mut pb = RowProblem::default();
        let x = pb.add_column(1.0, 0.0..);
        pb.add_row(..=-1.0, &[(x, 1.0)]);
        let err = solve_optimal(pb.optimise(Sense::Maximise)).unwrap_err();
        assert!(matches!(err, SolveError::Infeasible));
    }

    #[test]
    fn unbounded_model_is_a_typed_error() {
        let mut pb = RowProblem::default();
        pb.add_column(1.0, 0.0..);
        let err = solve_optimal(pb.optimise(Sense::Maximise)).unwrap_err();
        assert!(matches!(
            err,
            SolveError::Unbounded | SolveError::InfeasibleOrUnbounded
        ));
    }
}
