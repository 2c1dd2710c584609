use thiserror::Error;

/// Errors raised while building a problem, before the solver ever runs.
///
/// GLPK aborts the whole process when an index or bound is invalid, so the
/// wrapper checks every argument and reports misuse here instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("GLPK could not allocate a problem object")]
    OutOfMemory,
    #[error("row index {index} is out of range 1..={rows}")]
    BadRowIndex { index: usize, rows: usize },
    #[error("column index {index} is out of range 1..={cols}")]
    BadColumnIndex { index: usize, cols: usize },
    #[error("cannot add {0} rows or columns in one call")]
    BadCount(usize),
    #[error("{indices} column indices paired with {values} coefficients")]
    LengthMismatch { indices: usize, values: usize },
    #[error("column {0} appears more than once in the same row")]
    DuplicateCoefficient(usize),
    #[error("the name `{0}` is already in use")]
    DuplicateName(String),
    #[error("invalid name `{name}`: {reason}")]
    InvalidName { name: String, reason: &'static str },
    #[error("lower bound {lower} exceeds upper bound {upper}")]
    InvertedBounds { lower: f64, upper: f64 },
}

/// Errors reported by the simplex solver itself.
///
/// All of these are recoverable at the call site; none are retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error("feasibility tolerance {0} is outside the open interval (0, 1)")]
    InvalidTolerance(f64),
    #[error("the problem has no feasible solution")]
    Infeasible,
    #[error("the objective is unbounded in the chosen direction")]
    Unbounded,
    #[error("simplex iteration limit exceeded")]
    IterationLimit,
    #[error("simplex time limit exceeded")]
    TimeLimit,
    #[error("numerical failure in the solver: {0}")]
    Numerical(String),
}
