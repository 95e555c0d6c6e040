//! Two-dimensional packing: sheets opened in area order, cuts placed with
//! [`GuillotineBin`].

use tracing::{debug, warn};

use crate::error::OptimizeError;
use crate::expand::{ExpandedUnit, expand};
use crate::guillotine::{GuillotineBin, Placement};
use crate::summary::summarize_sheet;
use crate::types::{
    CutPlacement, CutRequest, Mode, OptimizationResult, PlacedCut, StockOffering, StockPlan,
};

/// A plan still accepting cuts, with its free-space arena.
struct OpenSheet {
    plan: StockPlan,
    bin: GuillotineBin,
}

impl OpenSheet {
    fn new(unit: &ExpandedUnit, kerf: f64) -> Self {
        Self {
            plan: StockPlan {
                stock_id: unit.id.clone(),
                stock_label: unit.label.clone(),
                original_stock_id: unit.original_id.clone(),
                stock: unit.dimensions,
                cuts: Vec::new(),
                waste: 0.0,
            },
            bin: GuillotineBin::new(unit.rect(), kerf),
        }
    }

    fn try_place(&mut self, cut: &ExpandedUnit) -> bool {
        let piece = cut.rect();
        let Some(scored) = self.bin.find_best(piece, !cut.grain_matters) else {
            return false;
        };
        let placement = self.bin.place(scored, piece);
        debug!(
            stock = %self.plan.stock_id,
            cut = %cut.id,
            x = placement.x,
            y = placement.y,
            rotated = placement.rotated,
            "placed cut"
        );
        self.plan.cuts.push(placed(cut, placement));
        true
    }

    /// Stock area minus cut area minus a per-cut kerf allowance along both
    /// placed edges. An estimate: it does not trace the actual saw lines.
    fn finish(mut self, kerf: f64) -> StockPlan {
        let kerf_loss: f64 = self
            .plan
            .cuts
            .iter()
            .map(|c| c.placement.length() * kerf + c.placement.width().unwrap_or(0.0) * kerf)
            .sum();
        let waste = self.plan.stock_area() - self.plan.placed_area() - kerf_loss;
        self.plan.waste = waste.max(0.0);
        self.plan
    }
}

pub struct SheetPacker {
    kerf: f64,
}

impl SheetPacker {
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

        let mut units = expand(cuts, Mode::Sheet);
        units.sort_by(|a, b| b.area().total_cmp(&a.area()));

        // Component-wise maxima, either orientation
        let cut_length = max_of(cuts.iter().map(|c| c.dimensions.length()));
        let cut_width = max_of(cuts.iter().map(|c| c.dimensions.rect().width));
        let stock_length = max_of(stock.iter().map(|s| s.dimensions.length()));
        let stock_width = max_of(stock.iter().map(|s| s.dimensions.rect().width));
        let fits = (cut_length <= stock_length && cut_width <= stock_width)
            || (cut_width <= stock_length && cut_length <= stock_width);
        if !fits {
            return OptimizationResult::failure(
                OptimizeError::SheetTooSmall {
                    cut_length,
                    cut_width,
                    stock_length,
                    stock_width,
                },
                units.len(),
                cuts.iter().map(|c| c.id.clone()).collect(),
            );
        }

        let mut sheets = expand(stock, Mode::Sheet);
        sheets.sort_by(|a, b| b.area().total_cmp(&a.area()));

        let mut open: Vec<OpenSheet> = Vec::new();
        let mut next_sheet = 0;
        let mut unplaced: Vec<String> = Vec::new();

        for cut in &units {
            if open.iter_mut().any(|sheet| sheet.try_place(cut)) {
                continue;
            }

            if let Some(unit) = sheets.get(next_sheet) {
                let mut sheet = OpenSheet::new(unit, self.kerf);
                if sheet.try_place(cut) {
                    debug!(stock = %unit.id, cut = %cut.id, "opened sheet");
                    open.push(sheet);
                    next_sheet += 1;
                    continue;
                }
            }

            warn!(cut = %cut.id, size = %cut.rect(), "cut could not be placed");
            if !unplaced.contains(&cut.original_id) {
                unplaced.push(cut.original_id.clone());
            }
        }

        let plans: Vec<StockPlan> = open.into_iter().map(|s| s.finish(self.kerf)).collect();
        let summary = summarize_sheet(&plans, units.len(), unplaced);
        OptimizationResult::completed(plans, summary)
    }
}

fn placed(cut: &ExpandedUnit, placement: Placement) -> PlacedCut {
    PlacedCut {
        cut_id: cut.id.clone(),
        cut_label: cut.label.clone(),
        original_id: cut.original_id.clone(),
        placement: CutPlacement::Sheet {
            length: placement.rect.length,
            width: placement.rect.width,
            x: placement.x,
            y: placement.y,
            rotated: placement.rotated,
        },
    }
}

fn max_of(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(f64::NEG_INFINITY, f64::max)
}
