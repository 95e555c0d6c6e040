//! Cut-list optimization: assigns required cuts to raw stock while keeping
//! waste low.
//!
//! Two modes share one result shape:
//! - [`optimize_linear`]: boards by length, First-Fit-Decreasing.
//! - [`optimize_sheet`]: panels by length and width, guillotine packing with
//!   Best Short Side Fit and Shorter Axis Split, rotating pieces unless their
//!   grain is fixed.
//!
//! Every call is a pure function of its inputs. Failures are reported inside
//! the returned [`OptimizationResult`], never as `Err` or panics.

pub mod config;
pub mod error;
pub mod expand;
pub mod guillotine;
pub mod input;
pub mod linear;
pub mod render;
pub mod sheet;
pub mod solver;
pub mod summary;
pub mod types;
pub mod units;
pub mod validate;

pub use config::OptimizeRequest;
pub use error::{InputError, OptimizeError};
pub use solver::Solver;
pub use types::{
    CutPlacement, CutRequest, Dimensions, Mode, OptimizationResult, PlacedCut, StockOffering,
    StockPlan, Summary,
};

/// Packs `cuts` onto `stock` by length. `kerf` is the blade width in the same
/// unit as the lengths.
pub fn optimize_linear(
    cuts: &[CutRequest],
    stock: &[StockOffering],
    kerf: f64,
) -> OptimizationResult {
    Solver::new(Mode::Linear, kerf).solve(cuts, stock)
}

/// Packs rectangular `cuts` onto rectangular `stock` sheets.
pub fn optimize_sheet(
    cuts: &[CutRequest],
    stock: &[StockOffering],
    kerf: f64,
) -> OptimizationResult {
    Solver::new(Mode::Sheet, kerf).solve(cuts, stock)
}

/// Dispatches to [`optimize_linear`] or [`optimize_sheet`] by `mode`.
pub fn optimize(
    mode: Mode,
    cuts: &[CutRequest],
    stock: &[StockOffering],
    kerf: f64,
) -> OptimizationResult {
    Solver::new(mode, kerf).solve(cuts, stock)
}
