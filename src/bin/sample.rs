//! The classic production-planning example from the GLPK manual:
//! maximize `10 x0 + 6 x1 + 4 x2` under three capacity constraints.
//!
//! Prints the optimal objective and variable values on a single line.

use glpk_lp::{Bounds, Direction, Problem, SimplexOptions};
use log::debug;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    debug!("linked against GLPK {}", glpk_lp::version());

    let mut lp = Problem::new("sample")?;
    lp.set_objective_name("Z")?;
    lp.set_direction(Direction::Maximize);

    let first_row = lp.add_rows(3)?;
    for (offset, name) in ["p", "q", "r"].into_iter().enumerate() {
        lp.set_row_name(first_row + offset, name)?;
    }
    lp.set_row_bounds(1, Bounds::Upper(100.0))?;
    lp.set_row_bounds(2, Bounds::Upper(600.0))?;
    lp.set_row_bounds(3, Bounds::Upper(300.0))?;

    let first_col = lp.add_cols(3)?;
    for offset in 0..3 {
        lp.set_col_name(first_col + offset, &format!("x{offset}"))?;
        lp.set_col_bounds(first_col + offset, Bounds::Lower(0.0))?;
    }

    lp.set_obj_coef(1, 10.0)?;
    lp.set_obj_coef(2, 6.0)?;
    lp.set_obj_coef(3, 4.0)?;

    lp.set_row_coefficients(1, &[1, 2, 3], &[1.0, 1.0, 1.0])?;
    lp.set_row_coefficients(2, &[1, 2, 3], &[10.0, 4.0, 5.0])?;
    lp.set_row_coefficients(3, &[1, 2, 3], &[2.0, 2.0, 6.0])?;

    let solution = lp.solve(&SimplexOptions::default())?;
    println!("{solution}");
    Ok(())
}
