//! First-Fit-Decreasing over stock lengths.

use tracing::{debug, warn};

use crate::error::OptimizeError;
use crate::expand::{ExpandedUnit, expand};
use crate::summary::summarize_linear;
use crate::types::{
    CutPlacement, CutRequest, Mode, OptimizationResult, PlacedCut, StockOffering, StockPlan,
};

pub struct LinearPacker {
    kerf: f64,
}

impl LinearPacker {
    pub fn new(kerf: f64) -> Self {
        Self { kerf }
    }

    pub fn pack(&self, cuts: &[CutRequest], stock: &[StockOffering]) -> OptimizationResult {
        if cuts.is_empty() {
            return OptimizationResult::failure(OptimizeError::NoCuts, 0, vec![]);
        }
        if stock.is_empty() {
            return OptimizationResult::failure(OptimizeError::NoStock, 0, vec![]);
        }

        let mut units = expand(cuts, Mode::Linear);
        units.sort_by(|a, b| b.length().total_cmp(&a.length()));

        // Necessary, not sufficient: catches the obvious case before packing
        let max_cut = max_of(cuts.iter().map(|c| c.dimensions.length()));
        let max_stock = max_of(stock.iter().map(|s| s.dimensions.length()));
        if max_cut > max_stock {
            return OptimizationResult::failure(
                OptimizeError::CutTooLong {
                    cut: max_cut,
                    stock: max_stock,
                },
                units.len(),
                cuts.iter().map(|c| c.id.clone()).collect(),
            );
        }

        let mut stock_units = expand(stock, Mode::Linear);
        stock_units.sort_by(|a, b| b.length().total_cmp(&a.length()));

        let mut plans: Vec<StockPlan> = Vec::new();
        let mut next_stock = 0;
        let mut unplaced: Vec<String> = Vec::new();

        for cut in &units {
            if let Some(plan) = plans.iter_mut().find(|p| self.fits(p, cut.length())) {
                plan.cuts.push(placed(cut));
                continue;
            }

            match stock_units.get(next_stock) {
                Some(unit) if cut.length() <= unit.length() => {
                    debug!(stock = %unit.id, cut = %cut.id, "opening stock");
                    plans.push(StockPlan {
                        stock_id: unit.id.clone(),
                        stock_label: unit.label.clone(),
                        original_stock_id: unit.original_id.clone(),
                        stock: unit.dimensions,
                        cuts: vec![placed(cut)],
                        waste: 0.0,
                    });
                    next_stock += 1;
                }
                _ => {
                    warn!(
                        cut = %cut.id,
                        length = cut.length(),
                        "cut could not be placed"
                    );
                    if !unplaced.contains(&cut.original_id) {
                        unplaced.push(cut.original_id.clone());
                    }
                }
            }
        }

        for plan in &mut plans {
            plan.waste = self.final_waste(plan);
        }

        let available: f64 = stock_units.iter().map(|s| s.length()).sum();
        let summary = summarize_linear(&plans, units.len(), unplaced, available);
        OptimizationResult::completed(plans, summary)
    }

    /// Placement-time check: one kerf is charged for every cut already on the
    /// stock, plus one ahead of the new cut unless the stock is empty.
    fn fits(&self, plan: &StockPlan, length: f64) -> bool {
        let placed = plan.cuts.len() as f64;
        let used = plan.placed_length() + placed * self.kerf;
        let required = length + if plan.cuts.is_empty() { 0.0 } else { self.kerf };
        required <= plan.stock_length() - used
    }

    /// Reported waste charges kerf only between cuts.
    fn final_waste(&self, plan: &StockPlan) -> f64 {
        let between = plan.cuts.len().saturating_sub(1) as f64;
        plan.stock_length() - (plan.placed_length() + between * self.kerf)
    }
}

fn placed(cut: &ExpandedUnit) -> PlacedCut {
    PlacedCut {
        cut_id: cut.id.clone(),
        cut_label: cut.label.clone(),
        original_id: cut.original_id.clone(),
        placement: CutPlacement::Linear {
            length: cut.length(),
        },
    }
}

fn max_of(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(f64::NEG_INFINITY, f64::max)
}
