//! Raw bindings to the subset of the GLPK C API this crate drives.
//!
//! Declarations mirror `glpk.h`. The safe wrapper in [`crate::problem`] is
//! the only intended consumer; nothing here validates its arguments, and
//! GLPK aborts the process when fed an invalid index or bound, so callers
//! must check everything up front.

#![allow(non_camel_case_types)]
#![allow(dead_code)]

use libc::{c_char, c_double, c_int};

/// Opaque GLPK problem object (`glp_prob`).
#[repr(C)]
pub struct glp_prob {
    _opaque: [u8; 0],
}

// Objective direction.
pub const GLP_MIN: c_int = 1;
pub const GLP_MAX: c_int = 2;

// Bound types for rows and columns.
pub const GLP_FR: c_int = 1;
pub const GLP_LO: c_int = 2;
pub const GLP_UP: c_int = 3;
pub const GLP_DB: c_int = 4;
pub const GLP_FX: c_int = 5;

// Basic solution status.
pub const GLP_UNDEF: c_int = 1;
pub const GLP_FEAS: c_int = 2;
pub const GLP_INFEAS: c_int = 3;
pub const GLP_NOFEAS: c_int = 4;
pub const GLP_OPT: c_int = 5;
pub const GLP_UNBND: c_int = 6;

// Message levels for `glp_smcp.msg_lev`.
pub const GLP_MSG_OFF: c_int = 0;
pub const GLP_MSG_ERR: c_int = 1;
pub const GLP_MSG_ON: c_int = 2;
pub const GLP_MSG_ALL: c_int = 3;

pub const GLP_ON: c_int = 1;
pub const GLP_OFF: c_int = 0;

// Non-zero return codes of `glp_simplex`.
pub const GLP_EBADB: c_int = 0x01;
pub const GLP_ESING: c_int = 0x02;
pub const GLP_ECOND: c_int = 0x03;
pub const GLP_EBOUND: c_int = 0x04;
pub const GLP_EFAIL: c_int = 0x05;
pub const GLP_EOBJLL: c_int = 0x06;
pub const GLP_EOBJUL: c_int = 0x07;
pub const GLP_EITLIM: c_int = 0x08;
pub const GLP_ETMLIM: c_int = 0x09;
pub const GLP_ENOPFS: c_int = 0x0A;
pub const GLP_ENODFS: c_int = 0x0B;

/// Simplex control parameters (`glp_smcp`).
///
/// Field order matches GLPK 5.0. The trailing padding keeps the struct at
/// least as large as every released layout, so it stays safe to pass to
/// older 4.x libraries, which only read up to `presolve`.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct glp_smcp {
    pub msg_lev: c_int,
    pub meth: c_int,
    pub pricing: c_int,
    pub r_test: c_int,
    pub tol_bnd: c_double,
    pub tol_dj: c_double,
    pub tol_piv: c_double,
    pub obj_ll: c_double,
    pub obj_ul: c_double,
    pub it_lim: c_int,
    pub tm_lim: c_int,
    pub out_frq: c_int,
    pub out_dly: c_int,
    pub presolve: c_int,
    pub excl: c_int,
    pub shift: c_int,
    pub aorn: c_int,
    reserved: [c_double; 36],
}

impl glp_smcp {
    /// Control parameters filled in by `glp_init_smcp`.
    pub fn defaults() -> Self {
        let mut parm = std::mem::MaybeUninit::<glp_smcp>::zeroed();
        unsafe {
            glp_init_smcp(parm.as_mut_ptr());
            parm.assume_init()
        }
    }
}

#[link(name = "glpk")]
extern "C" {
    pub fn glp_create_prob() -> *mut glp_prob;
    pub fn glp_delete_prob(lp: *mut glp_prob);

    pub fn glp_set_prob_name(lp: *mut glp_prob, name: *const c_char);
    pub fn glp_set_obj_name(lp: *mut glp_prob, name: *const c_char);
    pub fn glp_set_obj_dir(lp: *mut glp_prob, dir: c_int);
    pub fn glp_get_prob_name(lp: *mut glp_prob) -> *const c_char;
    pub fn glp_get_obj_name(lp: *mut glp_prob) -> *const c_char;
    pub fn glp_get_obj_dir(lp: *mut glp_prob) -> c_int;

    pub fn glp_add_rows(lp: *mut glp_prob, nrs: c_int) -> c_int;
    pub fn glp_add_cols(lp: *mut glp_prob, ncs: c_int) -> c_int;
    pub fn glp_get_num_rows(lp: *mut glp_prob) -> c_int;
    pub fn glp_get_num_cols(lp: *mut glp_prob) -> c_int;

    pub fn glp_set_row_name(lp: *mut glp_prob, i: c_int, name: *const c_char);
    pub fn glp_set_col_name(lp: *mut glp_prob, j: c_int, name: *const c_char);
    pub fn glp_get_row_name(lp: *mut glp_prob, i: c_int) -> *const c_char;
    pub fn glp_get_col_name(lp: *mut glp_prob, j: c_int) -> *const c_char;

    pub fn glp_set_row_bnds(lp: *mut glp_prob, i: c_int, type_: c_int, lb: c_double, ub: c_double);
    pub fn glp_set_col_bnds(lp: *mut glp_prob, j: c_int, type_: c_int, lb: c_double, ub: c_double);
    pub fn glp_get_row_type(lp: *mut glp_prob, i: c_int) -> c_int;
    pub fn glp_get_row_lb(lp: *mut glp_prob, i: c_int) -> c_double;
    pub fn glp_get_row_ub(lp: *mut glp_prob, i: c_int) -> c_double;
    pub fn glp_get_col_type(lp: *mut glp_prob, j: c_int) -> c_int;
    pub fn glp_get_col_lb(lp: *mut glp_prob, j: c_int) -> c_double;
    pub fn glp_get_col_ub(lp: *mut glp_prob, j: c_int) -> c_double;

    pub fn glp_set_obj_coef(lp: *mut glp_prob, j: c_int, coef: c_double);
    pub fn glp_get_obj_coef(lp: *mut glp_prob, j: c_int) -> c_double;

    pub fn glp_set_mat_row(
        lp: *mut glp_prob,
        i: c_int,
        len: c_int,
        ind: *const c_int,
        val: *const c_double,
    );
    pub fn glp_get_mat_row(
        lp: *mut glp_prob,
        i: c_int,
        ind: *mut c_int,
        val: *mut c_double,
    ) -> c_int;

    pub fn glp_init_smcp(parm: *mut glp_smcp);
    pub fn glp_simplex(lp: *mut glp_prob, parm: *const glp_smcp) -> c_int;
    pub fn glp_get_status(lp: *mut glp_prob) -> c_int;
    pub fn glp_get_obj_val(lp: *mut glp_prob) -> c_double;
    pub fn glp_get_row_prim(lp: *mut glp_prob, i: c_int) -> c_double;
    pub fn glp_get_col_prim(lp: *mut glp_prob, j: c_int) -> c_double;

    pub fn glp_version() -> *const c_char;
}
