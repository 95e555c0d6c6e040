use serde::{Deserialize, Deserializer, Serialize};

/// Optimization mode selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Length only, First-Fit-Decreasing.
    #[default]
    Linear,
    /// Length x width, guillotine packing.
    Sheet,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Linear => write!(f, "linear"),
            Mode::Sheet => write!(f, "sheet"),
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" | "1d" => Ok(Mode::Linear),
            "sheet" | "2d" => Ok(Mode::Sheet),
            _ => Err(format!(
                "invalid mode '{}', expected: linear or sheet",
                s
            )),
        }
    }
}

/// Axis-aligned size in inches. `length` runs along x, `width` along y.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub length: f64,
    pub width: f64,
}

impl Rect {
    pub fn new(length: f64, width: f64) -> Self {
        Self { length, width }
    }

    pub fn area(&self) -> f64 {
        self.length * self.width
    }

    pub fn rotated(&self) -> Self {
        Self {
            length: self.width,
            width: self.length,
        }
    }

    pub fn fits_in(&self, other: &Rect) -> bool {
        self.length <= other.length && self.width <= other.width
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.length, self.width)
    }
}

/// Size of a cut or stock entry.
///
/// Flattened into its owner on the wire: `{"length": 96}` reads as `Linear`,
/// `{"length": 96, "width": 48}` as `Sheet`. A `"width": null` falls back to
/// `Linear`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dimensions {
    Sheet { length: f64, width: f64 },
    Linear { length: f64 },
}

impl Dimensions {
    pub fn length(&self) -> f64 {
        match *self {
            Dimensions::Sheet { length, .. } | Dimensions::Linear { length } => length,
        }
    }

    pub fn width(&self) -> Option<f64> {
        match *self {
            Dimensions::Sheet { width, .. } => Some(width),
            Dimensions::Linear { .. } => None,
        }
    }

    /// Rectangle used by the sheet packer; a missing width counts as 0.
    pub fn rect(&self) -> Rect {
        Rect::new(self.length(), self.width().unwrap_or(0.0))
    }

    /// Normalizes to the shape the given mode works with.
    pub fn for_mode(&self, mode: Mode) -> Dimensions {
        match mode {
            Mode::Linear => Dimensions::Linear {
                length: self.length(),
            },
            Mode::Sheet => Dimensions::Sheet {
                length: self.length(),
                width: self.width().unwrap_or(0.0),
            },
        }
    }
}

/// A required piece, possibly in several identical copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CutRequest {
    pub id: String,
    #[serde(flatten)]
    pub dimensions: Dimensions,
    #[serde(
        default = "default_quantity",
        deserialize_with = "deserialize_u32_from_number"
    )]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Grain direction is fixed; the piece may not be rotated on a sheet.
    #[serde(default)]
    pub grain_matters: bool,
}

impl CutRequest {
    pub fn linear(id: impl Into<String>, length: f64, quantity: u32) -> Self {
        Self {
            id: id.into(),
            dimensions: Dimensions::Linear { length },
            quantity,
            label: None,
            grain_matters: false,
        }
    }

    pub fn sheet(id: impl Into<String>, length: f64, width: f64, quantity: u32) -> Self {
        Self {
            id: id.into(),
            dimensions: Dimensions::Sheet { length, width },
            quantity,
            label: None,
            grain_matters: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_grain(mut self, grain_matters: bool) -> Self {
        self.grain_matters = grain_matters;
        self
    }
}

/// Raw material available to cut from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockOffering {
    pub id: String,
    #[serde(flatten)]
    pub dimensions: Dimensions,
    #[serde(
        default = "default_quantity",
        deserialize_with = "deserialize_u32_from_number"
    )]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl StockOffering {
    pub fn linear(id: impl Into<String>, length: f64, quantity: u32) -> Self {
        Self {
            id: id.into(),
            dimensions: Dimensions::Linear { length },
            quantity,
            label: None,
        }
    }

    pub fn sheet(id: impl Into<String>, length: f64, width: f64, quantity: u32) -> Self {
        Self {
            id: id.into(),
            dimensions: Dimensions::Sheet { length, width },
            quantity,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

fn default_quantity() -> u32 {
    1
}

/// Accepts `3` as well as `3.0`, which browser clients tend to send.
pub fn deserialize_u32_from_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let n = f64::deserialize(deserializer)?;
    if n.fract() != 0.0 || n < 0.0 || n > u32::MAX as f64 {
        return Err(serde::de::Error::custom(format!(
            "expected a non-negative integer, got {}",
            n
        )));
    }
    Ok(n as u32)
}

/// Where a cut ended up on its stock unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CutPlacement {
    /// Placed dimensions (swapped when rotated) and the corner position.
    Sheet {
        length: f64,
        width: f64,
        x: f64,
        y: f64,
        rotated: bool,
    },
    Linear { length: f64 },
}

impl CutPlacement {
    pub fn length(&self) -> f64 {
        match *self {
            CutPlacement::Sheet { length, .. } | CutPlacement::Linear { length } => length,
        }
    }

    pub fn width(&self) -> Option<f64> {
        match *self {
            CutPlacement::Sheet { width, .. } => Some(width),
            CutPlacement::Linear { .. } => None,
        }
    }

    pub fn is_rotated(&self) -> bool {
        matches!(self, CutPlacement::Sheet { rotated: true, .. })
    }

    pub fn area(&self) -> f64 {
        self.length() * self.width().unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedCut {
    /// Per-unit id, `<originalId>-<index>`.
    pub cut_id: String,
    pub cut_label: String,
    pub original_id: String,
    #[serde(flatten)]
    pub placement: CutPlacement,
}

/// One physical stock unit and the cuts assigned to it.
///
/// On the wire the stock size is flat (`stockLength`, `stockWidth`) and the
/// waste lands in `wasteLength` for boards or `wasteArea` for sheets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StockPlanWire", into = "StockPlanWire")]
pub struct StockPlan {
    pub stock_id: String,
    pub stock_label: String,
    pub original_stock_id: String,
    pub stock: Dimensions,
    pub cuts: Vec<PlacedCut>,
    /// Linear inches in linear mode, square inches in sheet mode.
    pub waste: f64,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StockPlanWire {
    stock_id: String,
    stock_label: String,
    original_stock_id: String,
    stock_length: f64,
    stock_width: Option<f64>,
    cuts: Vec<PlacedCut>,
    waste_length: f64,
    waste_area: Option<f64>,
}

impl From<StockPlan> for StockPlanWire {
    fn from(plan: StockPlan) -> Self {
        let (waste_length, waste_area) = match plan.stock {
            Dimensions::Linear { .. } => (plan.waste, None),
            Dimensions::Sheet { .. } => (0.0, Some(plan.waste)),
        };
        Self {
            stock_id: plan.stock_id,
            stock_label: plan.stock_label,
            original_stock_id: plan.original_stock_id,
            stock_length: plan.stock.length(),
            stock_width: plan.stock.width(),
            cuts: plan.cuts,
            waste_length,
            waste_area,
        }
    }
}

impl From<StockPlanWire> for StockPlan {
    fn from(wire: StockPlanWire) -> Self {
        let stock = match wire.stock_width {
            Some(width) => Dimensions::Sheet {
                length: wire.stock_length,
                width,
            },
            None => Dimensions::Linear {
                length: wire.stock_length,
            },
        };
        Self {
            stock_id: wire.stock_id,
            stock_label: wire.stock_label,
            original_stock_id: wire.original_stock_id,
            stock,
            cuts: wire.cuts,
            waste: wire.waste_area.unwrap_or(wire.waste_length),
        }
    }
}

impl StockPlan {
    pub fn stock_length(&self) -> f64 {
        self.stock.length()
    }

    pub fn stock_area(&self) -> f64 {
        self.stock.rect().area()
    }

    pub fn placed_length(&self) -> f64 {
        self.cuts.iter().map(|c| c.placement.length()).sum()
    }

    pub fn placed_area(&self) -> f64 {
        self.cuts.iter().map(|c| c.placement.area()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Requested cut units after quantity expansion.
    pub total_cuts: usize,
    pub total_stock_used: usize,
    /// Linear inches or square inches, depending on mode.
    pub total_waste: f64,
    /// 0-100.
    pub waste_percentage: f64,
    /// Original cut ids with at least one unit left unplaced.
    pub unplaced_cuts: Vec<String>,
    pub total_linear_feet_used: f64,
    pub total_linear_feet_available: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub plans: Vec<StockPlan>,
    pub summary: Summary,
}

impl OptimizationResult {
    pub fn placed_count(&self) -> usize {
        self.plans.iter().map(|p| p.cuts.len()).sum()
    }

    pub fn all_placed(&self) -> bool {
        self.success && self.summary.unplaced_cuts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_from_json() {
        let cut: CutRequest =
            serde_json::from_str(r#"{"id":"a","length":40,"width":null,"quantity":3}"#).unwrap();
        assert_eq!(cut.dimensions, Dimensions::Linear { length: 40.0 });
        assert_eq!(cut.quantity, 3);
        assert!(!cut.grain_matters);

        let cut: CutRequest = serde_json::from_str(
            r#"{"id":"b","length":24,"width":12.5,"quantity":1,"grainMatters":true}"#,
        )
        .unwrap();
        assert_eq!(
            cut.dimensions,
            Dimensions::Sheet {
                length: 24.0,
                width: 12.5,
            }
        );
        assert!(cut.grain_matters);
    }

    #[test]
    fn test_quantity_defaults_and_accepts_float() {
        let stock: StockOffering = serde_json::from_str(r#"{"id":"s","length":96}"#).unwrap();
        assert_eq!(stock.quantity, 1);

        let stock: StockOffering =
            serde_json::from_str(r#"{"id":"s","length":96,"quantity":5.0}"#).unwrap();
        assert_eq!(stock.quantity, 5);

        let bad = serde_json::from_str::<StockOffering>(r#"{"id":"s","length":96,"quantity":1.5}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_placement_serializes_flat() {
        let cut = PlacedCut {
            cut_id: "a-0".into(),
            cut_label: "Cut 40\"".into(),
            original_id: "a".into(),
            placement: CutPlacement::Linear { length: 40.0 },
        };
        let json = serde_json::to_value(&cut).unwrap();
        assert_eq!(json["cutId"], "a-0");
        assert_eq!(json["length"], 40.0);
        assert!(json.get("rotated").is_none());
    }

    #[test]
    fn test_stock_plan_wire_keys() {
        let plan = StockPlan {
            stock_id: "ply-0".into(),
            stock_label: "Sheet 48\"x24\"".into(),
            original_stock_id: "ply".into(),
            stock: Dimensions::Sheet {
                length: 48.0,
                width: 24.0,
            },
            cuts: Vec::new(),
            waste: 570.0,
        };
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["stockLength"], 48.0);
        assert_eq!(json["stockWidth"], 24.0);
        assert_eq!(json["wasteLength"], 0.0);
        assert_eq!(json["wasteArea"], 570.0);
        assert!(json.get("stock").is_none());
        assert_eq!(serde_json::from_value::<StockPlan>(json).unwrap(), plan);

        let board = StockPlan {
            stock: Dimensions::Linear { length: 96.0 },
            waste: 15.875,
            ..plan
        };
        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json["stockWidth"], serde_json::Value::Null);
        assert_eq!(json["wasteLength"], 15.875);
        assert_eq!(json["wasteArea"], serde_json::Value::Null);
        assert_eq!(serde_json::from_value::<StockPlan>(json).unwrap(), board);
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("sheet".parse::<Mode>().unwrap(), Mode::Sheet);
        assert_eq!("Linear".parse::<Mode>().unwrap(), Mode::Linear);
        assert!("cube".parse::<Mode>().is_err());
    }

    #[test]
    fn test_rect_rotation() {
        let r = Rect::new(30.0, 10.0);
        assert_eq!(r.rotated(), Rect::new(10.0, 30.0));
        assert!(r.rotated().fits_in(&Rect::new(10.0, 30.0)));
        assert!(!r.fits_in(&Rect::new(10.0, 30.0)));
    }
}
