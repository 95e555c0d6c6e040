//! Parsing of command-line cut and stock entries.
//!
//! Grammar: `[label=]L[xW]:qty[:grain]`, where `L` and `W` may be fractional
//! inches (`23-1/2`, `3/4`). `:grain` is only accepted on cuts.

use crate::config::kerf_preset;
use crate::error::InputError;
use crate::types::{CutRequest, Dimensions, StockOffering};
use crate::units::parse_fractional_inches;

pub fn parse_dimensions(s: &str) -> Result<Dimensions, InputError> {
    let invalid = || InputError::InvalidDimensions(s.to_string());
    let parse = |part: &str| parse_fractional_inches(part).filter(|v| *v > 0.0);

    match s.split_once(['x', 'X']) {
        Some((length, width)) => Ok(Dimensions::Sheet {
            length: parse(length).ok_or_else(invalid)?,
            width: parse(width).ok_or_else(invalid)?,
        }),
        None => Ok(Dimensions::Linear {
            length: parse(s).ok_or_else(invalid)?,
        }),
    }
}

struct Entry<'a> {
    label: Option<&'a str>,
    dimensions: Dimensions,
    qty: u32,
    flags: Vec<&'a str>,
}

fn parse_entry(s: &str) -> Result<Entry<'_>, InputError> {
    let (label, body) = match s.split_once('=') {
        Some((label, body)) if !label.trim().is_empty() => (Some(label.trim()), body),
        Some(_) => return Err(InputError::InvalidEntry(s.to_string())),
        None => (None, s),
    };

    let mut parts = body.split(':');
    let dims = parts
        .next()
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| InputError::InvalidEntry(s.to_string()))?;
    let dimensions = parse_dimensions(dims.trim())?;
    let qty = match parts.next() {
        Some(q) => q
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|q| *q > 0)
            .ok_or_else(|| InputError::InvalidQuantity(s.to_string()))?,
        None => 1,
    };

    Ok(Entry {
        label,
        dimensions,
        qty,
        flags: parts.map(str::trim).collect(),
    })
}

/// Parses a cut entry; `index` provides the generated id (`cut-<n>`).
pub fn parse_cut(s: &str, index: usize) -> Result<CutRequest, InputError> {
    let entry = parse_entry(s)?;
    let mut grain_matters = false;
    for flag in &entry.flags {
        match *flag {
            "grain" | "g" => grain_matters = true,
            _ => return Err(InputError::InvalidEntry(s.to_string())),
        }
    }

    Ok(CutRequest {
        id: format!("cut-{}", index + 1),
        dimensions: entry.dimensions,
        quantity: entry.qty,
        label: entry.label.map(str::to_string),
        grain_matters,
    })
}

pub fn parse_stock(s: &str, index: usize) -> Result<StockOffering, InputError> {
    let entry = parse_entry(s)?;
    if !entry.flags.is_empty() {
        return Err(InputError::InvalidEntry(s.to_string()));
    }

    Ok(StockOffering {
        id: format!("stock-{}", index + 1),
        dimensions: entry.dimensions,
        quantity: entry.qty,
        label: entry.label.map(str::to_string),
    })
}

/// A kerf is a preset name, a number, or a fraction.
pub fn parse_kerf(s: &str) -> Result<f64, InputError> {
    if let Some(preset) = kerf_preset(s) {
        return Ok(preset.value);
    }
    parse_fractional_inches(s)
        .filter(|k| *k >= 0.0)
        .ok_or_else(|| InputError::InvalidKerf(s.to_string()))
}
