use tracing::{info, info_span, warn};

use crate::linear::LinearPacker;
use crate::sheet::SheetPacker;
use crate::types::{CutRequest, Mode, OptimizationResult, StockOffering};

/// Entry point tying a mode and a kerf to the matching packer.
///
/// Holds no state between calls; the same inputs always produce the same plan.
#[derive(Debug, Clone, Copy)]
pub struct Solver {
    mode: Mode,
    kerf: f64,
}

impl Solver {
    pub fn new(mode: Mode, kerf: f64) -> Self {
        Self { mode, kerf }
    }

    pub fn solve(&self, cuts: &[CutRequest], stock: &[StockOffering]) -> OptimizationResult {
        let _span = info_span!("optimize", mode = %self.mode, kerf = self.kerf).entered();

        let result = match self.mode {
            Mode::Linear => LinearPacker::new(self.kerf).pack(cuts, stock),
            Mode::Sheet => SheetPacker::new(self.kerf).pack(cuts, stock),
        };

        match &result.error {
            Some(error) => warn!(%error, "optimization failed"),
            None => info!(
                cuts = result.summary.total_cuts,
                stock_used = result.summary.total_stock_used,
                waste_percent = %format!("{:.1}", result.summary.waste_percentage),
                unplaced = result.summary.unplaced_cuts.len(),
                "optimization finished"
            ),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_by_mode() {
        let cuts = [CutRequest::sheet("a", 24.0, 12.0, 2)];
        let stock = [StockOffering::sheet("s", 48.0, 24.0, 1)];

        let linear = Solver::new(Mode::Linear, 0.0).solve(&cuts, &stock);
        assert!(linear.plans[0].cuts[0].placement.width().is_none());
        assert_eq!(linear.summary.total_linear_feet_available, 4.0);

        let sheet = Solver::new(Mode::Sheet, 0.0).solve(&cuts, &stock);
        assert_eq!(sheet.plans[0].cuts[0].placement.width(), Some(12.0));
        assert_eq!(sheet.summary.total_linear_feet_available, 0.0);
    }

    #[test]
    fn test_no_cuts_in_either_mode() {
        let stock = [StockOffering::sheet("s", 48.0, 24.0, 1)];
        for mode in [Mode::Linear, Mode::Sheet] {
            let result = Solver::new(mode, 0.125).solve(&[], &stock);
            assert!(!result.success);
            assert_eq!(result.error.as_deref(), Some("No cuts provided"));
            assert_eq!(result.summary.total_cuts, 0);
            assert_eq!(result.summary.total_waste, 0.0);
        }
    }
}
