//! Build linear programs and solve them with the GNU Linear Programming
//! Kit (GLPK).
//!
//! The crate owns no solver logic of its own: it marshals an in-memory
//! problem description into GLPK's native representation, invokes the
//! simplex routine, and marshals the result back. The native handle is
//! wrapped in [`Problem`], which releases it on every exit path.
//!
//! ```no_run
//! use glpk_lp::{Bounds, Direction, Problem, SimplexOptions};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut lp = Problem::new("diet")?;
//! lp.set_direction(Direction::Minimize);
//! lp.add_rows(1)?;
//! lp.set_row_bounds(1, Bounds::Lower(10.0))?;
//! lp.add_cols(2)?;
//! lp.set_col_bounds(1, Bounds::Lower(0.0))?;
//! lp.set_col_bounds(2, Bounds::Lower(0.0))?;
//! lp.set_obj_coef(1, 3.0)?;
//! lp.set_obj_coef(2, 2.0)?;
//! lp.set_row_coefficients(1, &[1, 2], &[1.0, 1.0])?;
//! let solution = lp.solve(&SimplexOptions::default())?;
//! println!("{solution}");
//! # Ok(())
//! # }
//! ```

mod error;
mod ffi;
mod problem;
mod solve;

pub use error::{ModelError, SolveError};
pub use problem::{Bounds, Direction, Problem};
pub use solve::{MessageLevel, SimplexOptions, Solution, VariableValue};

/// Version string of the linked GLPK library, e.g. `"5.0"`.
pub fn version() -> String {
    unsafe { std::ffi::CStr::from_ptr(ffi::glp_version()) }
        .to_string_lossy()
        .into_owned()
}
