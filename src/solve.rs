use std::fmt;

use libc::c_int;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::SolveError;
use crate::ffi;
use crate::problem::Problem;

/// How chatty GLPK is on the terminal while solving.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    #[default]
    Off,
    Error,
    Normal,
    Full,
}

impl MessageLevel {
    fn as_raw(self) -> c_int {
        match self {
            MessageLevel::Off => ffi::GLP_MSG_OFF,
            MessageLevel::Error => ffi::GLP_MSG_ERR,
            MessageLevel::Normal => ffi::GLP_MSG_ON,
            MessageLevel::Full => ffi::GLP_MSG_ALL,
        }
    }
}

/// Control parameters passed through to `glp_simplex`.
///
/// Unset fields keep the defaults filled in by `glp_init_smcp`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimplexOptions {
    pub message_level: MessageLevel,
    pub iteration_limit: Option<u32>,
    pub time_limit_ms: Option<u32>,
    /// Primal feasibility tolerance (`tol_bnd`).
    pub feasibility_tolerance: Option<f64>,
    pub presolve: bool,
}

impl SimplexOptions {
    fn as_raw(&self) -> Result<ffi::glp_smcp, SolveError> {
        let mut parm = ffi::glp_smcp::defaults();
        parm.msg_lev = self.message_level.as_raw();
        if let Some(limit) = self.iteration_limit {
            parm.it_lim = limit.min(c_int::MAX as u32) as c_int;
        }
        if let Some(limit) = self.time_limit_ms {
            parm.tm_lim = limit.min(c_int::MAX as u32) as c_int;
        }
        if let Some(tol) = self.feasibility_tolerance {
            // glp_simplex aborts the process on a tolerance outside (0, 1).
            if !(tol > 0.0 && tol < 1.0) {
                return Err(SolveError::InvalidTolerance(tol));
            }
            parm.tol_bnd = tol;
        }
        parm.presolve = if self.presolve { ffi::GLP_ON } else { ffi::GLP_OFF };
        Ok(parm)
    }
}

/// One decision variable's value in an optimal solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableValue {
    pub name: String,
    pub value: f64,
}

/// An optimal basic solution returned by [`Problem::solve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub objective_name: String,
    pub objective: f64,
    pub variables: Vec<VariableValue>,
}

impl Solution {
    pub fn value_of(&self, name: &str) -> Option<f64> {
        self.variables.iter().find(|v| v.name == name).map(|v| v.value)
    }
}

impl fmt::Display for Solution {
    /// Formats the solution as a single report line, e.g.
    /// `Z = 733.333; x0 = 33.3333; x1 = 66.6667; x2 = 0`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.objective_name, fmt_g(self.objective))?;
        for v in &self.variables {
            write!(f, "; {} = {}", v.name, fmt_g(v.value))?;
        }
        Ok(())
    }
}

impl Problem {
    /// Runs GLPK's simplex solver on the problem.
    ///
    /// Blocks the calling thread until the solver returns. An optimal
    /// solution comes back as `Ok`; infeasibility, unboundedness, exceeded
    /// limits and numerical trouble come back as [`SolveError`].
    pub fn solve(&mut self, options: &SimplexOptions) -> Result<Solution, SolveError> {
        let parm = options.as_raw()?;
        debug!(
            "running simplex on {:?} ({} rows, {} columns)",
            self.name().unwrap_or_default(),
            self.num_rows(),
            self.num_cols()
        );
        let ret = unsafe { ffi::glp_simplex(self.as_ptr(), &parm) };
        if ret != 0 {
            return Err(return_code_error(ret));
        }
        match unsafe { ffi::glp_get_status(self.as_ptr()) } {
            ffi::GLP_OPT => {}
            ffi::GLP_NOFEAS => return Err(SolveError::Infeasible),
            ffi::GLP_UNBND => return Err(SolveError::Unbounded),
            other => {
                return Err(SolveError::Numerical(format!(
                    "solver stopped with solution status {other}"
                )))
            }
        }
        let objective = unsafe { ffi::glp_get_obj_val(self.as_ptr()) };
        let mut variables = Vec::with_capacity(self.num_cols());
        for j in 1..=self.num_cols() {
            let name = self
                .col_name(j)
                .ok()
                .flatten()
                .unwrap_or_else(|| format!("x{j}"));
            let value = unsafe { ffi::glp_get_col_prim(self.as_ptr(), j as c_int) };
            variables.push(VariableValue { name, value });
        }
        let solution = Solution {
            objective_name: self.objective_name().unwrap_or_else(|| "obj".to_string()),
            objective,
            variables,
        };
        info!(
            "simplex optimum: {} = {}",
            solution.objective_name, solution.objective
        );
        Ok(solution)
    }
}

fn return_code_error(code: c_int) -> SolveError {
    match code {
        // The presolver reports infeasibility and unboundedness through the
        // return code instead of the solution status.
        ffi::GLP_ENOPFS => SolveError::Infeasible,
        ffi::GLP_ENODFS => SolveError::Unbounded,
        ffi::GLP_EITLIM => SolveError::IterationLimit,
        ffi::GLP_ETMLIM => SolveError::TimeLimit,
        ffi::GLP_EBADB => SolveError::Numerical("invalid initial basis".to_string()),
        ffi::GLP_ESING => SolveError::Numerical("singular basis matrix".to_string()),
        ffi::GLP_ECOND => SolveError::Numerical("ill-conditioned basis matrix".to_string()),
        ffi::GLP_EBOUND => SolveError::Numerical("invalid bounds on a variable".to_string()),
        ffi::GLP_EFAIL => SolveError::Numerical("the search terminated prematurely".to_string()),
        ffi::GLP_EOBJLL => SolveError::Numerical("objective reached its lower limit".to_string()),
        ffi::GLP_EOBJUL => SolveError::Numerical("objective reached its upper limit".to_string()),
        other => SolveError::Numerical(format!("glp_simplex returned {other}")),
    }
}

/// `%g`-style float formatting: six significant digits, trailing zeros
/// trimmed. Matches what the GLPK manual's own examples print.
fn fmt_g(x: f64) -> String {
    if x == 0.0 || !x.is_finite() {
        return format!("{x}");
    }
    // Round to six significant digits before choosing the notation: the
    // carry can push a value into the next power of ten (999999.9 must
    // print as 1e6, not 1000000).
    let rounded: f64 = format!("{x:.5e}").parse().unwrap_or(x);
    let magnitude = rounded.abs().log10().floor() as i32;
    if !(-4..=5).contains(&magnitude) {
        return format!("{rounded:e}");
    }
    let precision = (5 - magnitude).max(0) as usize;
    let mut s = format!("{rounded:.precision$}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_g_matches_printf() {
        assert_eq!(fmt_g(0.0), "0");
        assert_eq!(fmt_g(733.3333333333334), "733.333");
        assert_eq!(fmt_g(33.33333333333333), "33.3333");
        assert_eq!(fmt_g(66.66666666666667), "66.6667");
        assert_eq!(fmt_g(-1.5), "-1.5");
        assert_eq!(fmt_g(100.0), "100");
        assert_eq!(fmt_g(0.0001), "0.0001");
    }

    #[test]
    fn fmt_g_rounds_before_choosing_notation() {
        assert_eq!(fmt_g(999999.4), "999999");
        assert_eq!(fmt_g(999999.9), "1e6");
        assert_eq!(fmt_g(99.99999), "100");
    }

    #[test]
    fn solution_renders_as_one_line() {
        let solution = Solution {
            objective_name: "Z".to_string(),
            objective: 733.3333333333334,
            variables: vec![
                VariableValue { name: "x0".to_string(), value: 33.33333333333333 },
                VariableValue { name: "x1".to_string(), value: 66.66666666666667 },
                VariableValue { name: "x2".to_string(), value: 0.0 },
            ],
        };
        assert_eq!(
            solution.to_string(),
            "Z = 733.333; x0 = 33.3333; x1 = 66.6667; x2 = 0"
        );
    }

    #[test]
    fn options_map_onto_control_parameters() {
        let options = SimplexOptions {
            message_level: MessageLevel::Error,
            iteration_limit: Some(50),
            time_limit_ms: Some(1_000),
            feasibility_tolerance: Some(1e-9),
            presolve: true,
        };
        let parm = options.as_raw().unwrap();
        assert_eq!(parm.msg_lev, crate::ffi::GLP_MSG_ERR);
        assert_eq!(parm.it_lim, 50);
        assert_eq!(parm.tm_lim, 1_000);
        assert_eq!(parm.tol_bnd, 1e-9);
        assert_eq!(parm.presolve, crate::ffi::GLP_ON);
    }

    #[test]
    fn out_of_range_tolerances_are_rejected() {
        for tol in [0.0, 1.0, -1e-9, f64::NAN] {
            let options = SimplexOptions {
                feasibility_tolerance: Some(tol),
                ..SimplexOptions::default()
            };
            assert!(matches!(
                options.as_raw(),
                Err(SolveError::InvalidTolerance(_))
            ));
        }
    }
}
