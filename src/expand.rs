use crate::types::{CutRequest, Dimensions, Mode, Rect, StockOffering};

/// One physical piece produced from a quantity-bearing entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandedUnit {
    /// `<originalId>-<index>`
    pub id: String,
    pub original_id: String,
    pub label: String,
    pub dimensions: Dimensions,
    pub grain_matters: bool,
}

impl ExpandedUnit {
    pub fn length(&self) -> f64 {
        self.dimensions.length()
    }

    pub fn rect(&self) -> Rect {
        self.dimensions.rect()
    }

    pub fn area(&self) -> f64 {
        self.rect().area()
    }
}

/// An input entry that stands for `quantity()` identical units.
pub trait Expandable {
    fn id(&self) -> &str;
    fn dimensions(&self) -> Dimensions;
    fn quantity(&self) -> u32;
    fn label(&self) -> Option<&str>;
    fn grain_matters(&self) -> bool {
        false
    }
    /// Label prefix when the caller left the label blank.
    fn default_prefix(mode: Mode) -> &'static str;
}

impl Expandable for CutRequest {
    fn id(&self) -> &str {
        &self.id
    }

    fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn grain_matters(&self) -> bool {
        self.grain_matters
    }

    fn default_prefix(_mode: Mode) -> &'static str {
        "Cut"
    }
}

impl Expandable for StockOffering {
    fn id(&self) -> &str {
        &self.id
    }

    fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn default_prefix(mode: Mode) -> &'static str {
        match mode {
            Mode::Linear => "Stock",
            Mode::Sheet => "Sheet",
        }
    }
}

fn default_label(prefix: &str, dims: Dimensions) -> String {
    match dims {
        Dimensions::Linear { length } => format!("{} {}\"", prefix, length),
        Dimensions::Sheet { length, width } => format!("{} {}\"x{}\"", prefix, length, width),
    }
}

/// Expands entries into units, in input order, with dimensions normalized
/// for `mode`. A quantity of 0 contributes nothing.
pub fn expand<T: Expandable>(items: &[T], mode: Mode) -> Vec<ExpandedUnit> {
    let mut units = Vec::with_capacity(items.iter().map(|i| i.quantity() as usize).sum());
    for item in items {
        let dimensions = item.dimensions().for_mode(mode);
        let label = match item.label() {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => default_label(T::default_prefix(mode), dimensions),
        };
        for i in 0..item.quantity() {
            units.push(ExpandedUnit {
                id: format!("{}-{}", item.id(), i),
                original_id: item.id().to_string(),
                label: label.clone(),
                dimensions,
                grain_matters: item.grain_matters(),
            });
        }
    }
    units
}

/// Total units an expansion would produce, without allocating them.
pub fn unit_count<T: Expandable>(items: &[T]) -> u64 {
    items.iter().map(|i| i.quantity() as u64).sum()
}
