//! Result aggregation shared by both packers.

use crate::error::OptimizeError;
use crate::types::{OptimizationResult, StockPlan, Summary};

const INCHES_PER_FOOT: f64 = 12.0;

fn percentage(waste: f64, material: f64) -> f64 {
    if material > 0.0 {
        waste / material * 100.0
    } else {
        0.0
    }
}

/// Summary for linear plans. `available_length` is the combined length of
/// every expanded stock unit, used or not.
pub fn summarize_linear(
    plans: &[StockPlan],
    total_cuts: usize,
    unplaced_cuts: Vec<String>,
    available_length: f64,
) -> Summary {
    let total_waste: f64 = plans.iter().map(|p| p.waste).sum();
    let used_length: f64 = plans.iter().map(|p| p.stock_length()).sum();

    Summary {
        total_cuts,
        total_stock_used: plans.len(),
        total_waste,
        waste_percentage: percentage(total_waste, used_length),
        unplaced_cuts,
        total_linear_feet_used: used_length / INCHES_PER_FOOT,
        total_linear_feet_available: available_length / INCHES_PER_FOOT,
    }
}

/// Summary for sheet plans; linear-feet fields stay 0.
pub fn summarize_sheet(
    plans: &[StockPlan],
    total_cuts: usize,
    unplaced_cuts: Vec<String>,
) -> Summary {
    let total_waste: f64 = plans.iter().map(|p| p.waste).sum();
    let used_area: f64 = plans.iter().map(|p| p.stock_area()).sum();

    Summary {
        total_cuts,
        total_stock_used: plans.len(),
        total_waste,
        waste_percentage: percentage(total_waste, used_area),
        unplaced_cuts,
        total_linear_feet_used: 0.0,
        total_linear_feet_available: 0.0,
    }
}

impl OptimizationResult {
    pub fn completed(plans: Vec<StockPlan>, summary: Summary) -> Self {
        Self {
            success: true,
            error: None,
            plans,
            summary,
        }
    }

    /// Hard failure with an otherwise zeroed summary.
    pub fn failure(error: OptimizeError, total_cuts: usize, unplaced_cuts: Vec<String>) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            plans: Vec::new(),
            summary: Summary {
                total_cuts,
                unplaced_cuts,
                ..Summary::default()
            },
        }
    }
}
