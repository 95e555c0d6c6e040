//! Checks a caller runs before handing a request to the engine. The engine
//! itself accepts anything and degrades as documented.

use crate::config::{MAX_EXPANDED_UNITS, OptimizeRequest};
use crate::error::InputError;
use crate::expand::{Expandable, unit_count};
use crate::types::{CutRequest, Mode, StockOffering};

fn validate_entry<T: Expandable>(
    item: &T,
    kind: &'static str,
    mode: Mode,
) -> Result<(), InputError> {
    let dims = item.dimensions();
    if !(dims.length() > 0.0) {
        return Err(InputError::NonPositiveLength {
            kind,
            id: item.id().to_string(),
        });
    }
    if item.quantity() < 1 {
        return Err(InputError::ZeroQuantity {
            kind,
            id: item.id().to_string(),
        });
    }
    if mode == Mode::Sheet && !dims.width().is_some_and(|w| w > 0.0) {
        return Err(InputError::MissingWidth {
            kind,
            id: item.id().to_string(),
            mode,
        });
    }
    Ok(())
}

pub fn validate_cut(cut: &CutRequest, mode: Mode) -> Result<(), InputError> {
    validate_entry(cut, "cut", mode)
}

pub fn validate_stock(stock: &StockOffering, mode: Mode) -> Result<(), InputError> {
    validate_entry(stock, "stock", mode)
}

pub fn validate_kerf(kerf: f64) -> Result<(), InputError> {
    if kerf.is_finite() && kerf >= 0.0 {
        Ok(())
    } else {
        Err(InputError::InvalidKerf(kerf.to_string()))
    }
}

fn check_unit_limit(kind: &'static str, count: u64) -> Result<(), InputError> {
    if count > MAX_EXPANDED_UNITS {
        return Err(InputError::TooManyUnits {
            kind,
            count,
            limit: MAX_EXPANDED_UNITS,
        });
    }
    Ok(())
}

/// Validates every entry, the kerf, and the expanded size of the request.
pub fn validate_request(req: &OptimizeRequest) -> Result<(), InputError> {
    validate_kerf(req.kerf)?;
    for cut in &req.cuts {
        validate_cut(cut, req.mode)?;
    }
    for stock in &req.stock {
        validate_stock(stock, req.mode)?;
    }
    check_unit_limit("cut", unit_count(&req.cuts))?;
    check_unit_limit("stock", unit_count(&req.stock))?;
    Ok(())
}
