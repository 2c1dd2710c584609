use std::collections::HashSet;
use std::ffi::{CStr, CString};
use std::ptr::NonNull;

use libc::{c_double, c_int};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::ffi;

/// Objective direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Minimize,
    Maximize,
}

/// Allowed range of a row (constraint) or a column (decision variable).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bounds {
    /// No bounds in either direction.
    Free,
    /// `x >= l`
    Lower(f64),
    /// `x <= u`
    Upper(f64),
    /// `l <= x <= u`
    Double(f64, f64),
    /// `x = v`
    Fixed(f64),
}

impl Bounds {
    fn as_raw(self) -> Result<(c_int, f64, f64), ModelError> {
        match self {
            Bounds::Free => Ok((ffi::GLP_FR, 0.0, 0.0)),
            Bounds::Lower(l) => Ok((ffi::GLP_LO, l, 0.0)),
            Bounds::Upper(u) => Ok((ffi::GLP_UP, 0.0, u)),
            Bounds::Double(l, u) => {
                if l > u {
                    Err(ModelError::InvertedBounds { lower: l, upper: u })
                } else {
                    Ok((ffi::GLP_DB, l, u))
                }
            }
            Bounds::Fixed(v) => Ok((ffi::GLP_FX, v, v)),
        }
    }

    fn from_raw(type_: c_int, lb: f64, ub: f64) -> Bounds {
        match type_ {
            ffi::GLP_LO => Bounds::Lower(lb),
            ffi::GLP_UP => Bounds::Upper(ub),
            ffi::GLP_DB => Bounds::Double(lb, ub),
            ffi::GLP_FX => Bounds::Fixed(lb),
            _ => Bounds::Free,
        }
    }
}

/// An in-memory linear program backed by a native GLPK problem object.
///
/// The handle is owned exclusively and released exactly once when the
/// `Problem` is dropped, on success and error paths alike. All indices are
/// 1-based, matching GLPK's own convention.
pub struct Problem {
    ptr: NonNull<ffi::glp_prob>,
    row_names: HashSet<String>,
    col_names: HashSet<String>,
}

impl Problem {
    /// Allocates a new empty problem with the given name.
    pub fn new(name: &str) -> Result<Problem, ModelError> {
        let cname = valid_name(name)?;
        let ptr = NonNull::new(unsafe { ffi::glp_create_prob() }).ok_or(ModelError::OutOfMemory)?;
        unsafe { ffi::glp_set_prob_name(ptr.as_ptr(), cname.as_ptr()) };
        Ok(Problem {
            ptr,
            row_names: HashSet::new(),
            col_names: HashSet::new(),
        })
    }

    pub(crate) fn as_ptr(&self) -> *mut ffi::glp_prob {
        self.ptr.as_ptr()
    }

    pub fn name(&self) -> Option<String> {
        unsafe { copy_name(ffi::glp_get_prob_name(self.as_ptr())) }
    }

    pub fn set_objective_name(&mut self, name: &str) -> Result<(), ModelError> {
        let cname = valid_name(name)?;
        unsafe { ffi::glp_set_obj_name(self.as_ptr(), cname.as_ptr()) };
        Ok(())
    }

    pub fn objective_name(&self) -> Option<String> {
        unsafe { copy_name(ffi::glp_get_obj_name(self.as_ptr())) }
    }

    pub fn set_direction(&mut self, direction: Direction) {
        let dir = match direction {
            Direction::Minimize => ffi::GLP_MIN,
            Direction::Maximize => ffi::GLP_MAX,
        };
        unsafe { ffi::glp_set_obj_dir(self.as_ptr(), dir) };
    }

    pub fn direction(&self) -> Direction {
        match unsafe { ffi::glp_get_obj_dir(self.as_ptr()) } {
            ffi::GLP_MAX => Direction::Maximize,
            _ => Direction::Minimize,
        }
    }

    /// Appends `count` rows and returns the index of the first new row.
    pub fn add_rows(&mut self, count: usize) -> Result<usize, ModelError> {
        let n = checked_count(count, self.num_rows())?;
        let first = unsafe { ffi::glp_add_rows(self.as_ptr(), n) };
        Ok(first as usize)
    }

    /// Appends `count` columns and returns the index of the first new column.
    pub fn add_cols(&mut self, count: usize) -> Result<usize, ModelError> {
        let n = checked_count(count, self.num_cols())?;
        let first = unsafe { ffi::glp_add_cols(self.as_ptr(), n) };
        Ok(first as usize)
    }

    pub fn num_rows(&self) -> usize {
        unsafe { ffi::glp_get_num_rows(self.as_ptr()) as usize }
    }

    pub fn num_cols(&self) -> usize {
        unsafe { ffi::glp_get_num_cols(self.as_ptr()) as usize }
    }

    pub fn set_row_name(&mut self, i: usize, name: &str) -> Result<(), ModelError> {
        self.check_row(i)?;
        let cname = valid_name(name)?;
        let old = self.row_name(i)?;
        if old.as_deref() == Some(name) {
            return Ok(());
        }
        if self.row_names.contains(name) {
            return Err(ModelError::DuplicateName(name.to_string()));
        }
        if let Some(old) = old {
            self.row_names.remove(&old);
        }
        self.row_names.insert(name.to_string());
        unsafe { ffi::glp_set_row_name(self.as_ptr(), i as c_int, cname.as_ptr()) };
        Ok(())
    }

    pub fn row_name(&self, i: usize) -> Result<Option<String>, ModelError> {
        self.check_row(i)?;
        Ok(unsafe { copy_name(ffi::glp_get_row_name(self.as_ptr(), i as c_int)) })
    }

    pub fn set_col_name(&mut self, j: usize, name: &str) -> Result<(), ModelError> {
        self.check_col(j)?;
        let cname = valid_name(name)?;
        let old = self.col_name(j)?;
        if old.as_deref() == Some(name) {
            return Ok(());
        }
        if self.col_names.contains(name) {
            return Err(ModelError::DuplicateName(name.to_string()));
        }
        if let Some(old) = old {
            self.col_names.remove(&old);
        }
        self.col_names.insert(name.to_string());
        unsafe { ffi::glp_set_col_name(self.as_ptr(), j as c_int, cname.as_ptr()) };
        Ok(())
    }

    pub fn col_name(&self, j: usize) -> Result<Option<String>, ModelError> {
        self.check_col(j)?;
        Ok(unsafe { copy_name(ffi::glp_get_col_name(self.as_ptr(), j as c_int)) })
    }

    pub fn set_row_bounds(&mut self, i: usize, bounds: Bounds) -> Result<(), ModelError> {
        self.check_row(i)?;
        let (type_, lb, ub) = bounds.as_raw()?;
        unsafe { ffi::glp_set_row_bnds(self.as_ptr(), i as c_int, type_, lb, ub) };
        Ok(())
    }

    pub fn row_bounds(&self, i: usize) -> Result<Bounds, ModelError> {
        self.check_row(i)?;
        let p = self.as_ptr();
        let i = i as c_int;
        unsafe {
            Ok(Bounds::from_raw(
                ffi::glp_get_row_type(p, i),
                ffi::glp_get_row_lb(p, i),
                ffi::glp_get_row_ub(p, i),
            ))
        }
    }

    pub fn set_col_bounds(&mut self, j: usize, bounds: Bounds) -> Result<(), ModelError> {
        self.check_col(j)?;
        let (type_, lb, ub) = bounds.as_raw()?;
        unsafe { ffi::glp_set_col_bnds(self.as_ptr(), j as c_int, type_, lb, ub) };
        Ok(())
    }

    pub fn col_bounds(&self, j: usize) -> Result<Bounds, ModelError> {
        self.check_col(j)?;
        let p = self.as_ptr();
        let j = j as c_int;
        unsafe {
            Ok(Bounds::from_raw(
                ffi::glp_get_col_type(p, j),
                ffi::glp_get_col_lb(p, j),
                ffi::glp_get_col_ub(p, j),
            ))
        }
    }

    pub fn set_obj_coef(&mut self, j: usize, coef: f64) -> Result<(), ModelError> {
        self.check_col(j)?;
        unsafe { ffi::glp_set_obj_coef(self.as_ptr(), j as c_int, coef) };
        Ok(())
    }

    pub fn obj_coef(&self, j: usize) -> Result<f64, ModelError> {
        self.check_col(j)?;
        Ok(unsafe { ffi::glp_get_obj_coef(self.as_ptr(), j as c_int) })
    }

    /// Replaces the non-zero coefficients of row `i`.
    ///
    /// `cols` and `values` are parallel slices; every column index must be
    /// valid and distinct.
    pub fn set_row_coefficients(
        &mut self,
        i: usize,
        cols: &[usize],
        values: &[f64],
    ) -> Result<(), ModelError> {
        self.check_row(i)?;
        if cols.len() != values.len() {
            return Err(ModelError::LengthMismatch {
                indices: cols.len(),
                values: values.len(),
            });
        }
        let mut seen = HashSet::with_capacity(cols.len());
        for &j in cols {
            self.check_col(j)?;
            if !seen.insert(j) {
                return Err(ModelError::DuplicateCoefficient(j));
            }
        }
        // GLPK reads both arrays starting at position 1.
        let mut ind: Vec<c_int> = Vec::with_capacity(cols.len() + 1);
        let mut val: Vec<c_double> = Vec::with_capacity(values.len() + 1);
        ind.push(0);
        val.push(0.0);
        ind.extend(cols.iter().map(|&j| j as c_int));
        val.extend_from_slice(values);
        unsafe {
            ffi::glp_set_mat_row(
                self.as_ptr(),
                i as c_int,
                cols.len() as c_int,
                ind.as_ptr(),
                val.as_ptr(),
            );
        }
        Ok(())
    }

    /// Returns the non-zero entries of row `i` as `(column, coefficient)`
    /// pairs.
    pub fn row_coefficients(&self, i: usize) -> Result<Vec<(usize, f64)>, ModelError> {
        self.check_row(i)?;
        let p = self.as_ptr();
        let len = unsafe { ffi::glp_get_mat_row(p, i as c_int, std::ptr::null_mut(), std::ptr::null_mut()) };
        let mut ind: Vec<c_int> = vec![0; len as usize + 1];
        let mut val: Vec<c_double> = vec![0.0; len as usize + 1];
        unsafe { ffi::glp_get_mat_row(p, i as c_int, ind.as_mut_ptr(), val.as_mut_ptr()) };
        Ok(ind[1..]
            .iter()
            .zip(&val[1..])
            .map(|(&j, &v)| (j as usize, v))
            .collect())
    }

    /// Value of row `i`'s auxiliary variable in the current basic solution.
    pub fn row_activity(&self, i: usize) -> Result<f64, ModelError> {
        self.check_row(i)?;
        Ok(unsafe { ffi::glp_get_row_prim(self.as_ptr(), i as c_int) })
    }

    /// Releases the native problem object. Equivalent to dropping; consuming
    /// `self` makes a second release a compile error rather than a runtime
    /// one.
    pub fn delete(self) {}

    fn check_row(&self, i: usize) -> Result<(), ModelError> {
        let rows = self.num_rows();
        if i == 0 || i > rows {
            return Err(ModelError::BadRowIndex { index: i, rows });
        }
        Ok(())
    }

    fn check_col(&self, j: usize) -> Result<(), ModelError> {
        let cols = self.num_cols();
        if j == 0 || j > cols {
            return Err(ModelError::BadColumnIndex { index: j, cols });
        }
        Ok(())
    }
}

impl Drop for Problem {
    fn drop(&mut self) {
        unsafe { ffi::glp_delete_prob(self.ptr.as_ptr()) };
    }
}

impl std::fmt::Debug for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Problem")
            .field("name", &self.name())
            .field("rows", &self.num_rows())
            .field("cols", &self.num_cols())
            .finish()
    }
}

/// GLPK aborts when a problem grows past 100,000,000 rows or columns
/// (`M_MAX`/`N_MAX` in its sources).
const DIMENSION_LIMIT: usize = 100_000_000;

fn checked_count(count: usize, current: usize) -> Result<c_int, ModelError> {
    if count == 0 || count > DIMENSION_LIMIT - current {
        return Err(ModelError::BadCount(count));
    }
    c_int::try_from(count).map_err(|_| ModelError::BadCount(count))
}

/// GLPK requires names of at most 255 graphic characters.
fn valid_name(name: &str) -> Result<CString, ModelError> {
    if name.is_empty() {
        return Err(ModelError::InvalidName {
            name: name.to_string(),
            reason: "names must not be empty",
        });
    }
    if name.len() > 255 {
        return Err(ModelError::InvalidName {
            name: name.to_string(),
            reason: "names are limited to 255 characters",
        });
    }
    if name.chars().any(|c| c.is_control()) {
        return Err(ModelError::InvalidName {
            name: name.to_string(),
            reason: "names must not contain control characters",
        });
    }
    CString::new(name).map_err(|_| ModelError::InvalidName {
        name: name.to_string(),
        reason: "names must not contain NUL bytes",
    })
}

/// Copies a name out of GLPK-owned storage; the pointer is only valid until
/// the next call that touches names.
unsafe fn copy_name(ptr: *const libc::c_char) -> Option<String> {
    if ptr.is_null() {
        None
    } else {
        Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_reject_inverted_range() {
        assert_eq!(
            Bounds::Double(3.0, 1.0).as_raw(),
            Err(ModelError::InvertedBounds { lower: 3.0, upper: 1.0 })
        );
    }

    #[test]
    fn bounds_survive_raw_round_trip() {
        for b in [
            Bounds::Free,
            Bounds::Lower(-1.5),
            Bounds::Upper(100.0),
            Bounds::Double(0.0, 10.0),
            Bounds::Fixed(42.0),
        ] {
            let (type_, lb, ub) = b.as_raw().unwrap();
            assert_eq!(Bounds::from_raw(type_, lb, ub), b);
        }
    }

    #[test]
    fn counts_are_capped_at_glpk_limits() {
        assert!(checked_count(1, 0).is_ok());
        assert!(checked_count(DIMENSION_LIMIT, 0).is_ok());
        assert_eq!(checked_count(0, 0), Err(ModelError::BadCount(0)));
        assert_eq!(
            checked_count(200_000_000, 0),
            Err(ModelError::BadCount(200_000_000))
        );
        // The limit applies to the problem's total size, not one call.
        assert_eq!(
            checked_count(1, DIMENSION_LIMIT),
            Err(ModelError::BadCount(1))
        );
    }

    #[test]
    fn names_are_validated() {
        assert!(valid_name("p").is_ok());
        assert!(valid_name("").is_err());
        assert!(valid_name("a\0b").is_err());
        assert!(valid_name("a\tb").is_err());
        assert!(valid_name(&"x".repeat(256)).is_err());
    }
}
