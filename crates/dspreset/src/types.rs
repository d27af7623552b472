/// A `control` element captured at load time.
///
/// Geometry attributes are kept as raw text; parsing to numbers happens per
/// transform call so one bad value skips one control instead of failing the
/// load.
#[derive(Debug, Clone)]
pub struct Control {
    /// Document-order position among all `control` elements. Stable key
    /// used to address the element when patching the XML.
    pub position: usize,
    /// The literal `type` attribute, if present.
    pub control_type: Option<String>,
    /// Display identity: `id`, else `label`, else `"unnamed"`.
    pub ident: String,
    pub x: Option<String>,
    pub y: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
}

impl Control {
    /// Type name for indexing and display (`"unknown"` when absent).
    pub fn type_name(&self) -> &str {
        self.control_type.as_deref().unwrap_or("unknown")
    }

    /// Parse the four geometry attributes, defaulting missing ones to 0.
    pub fn rect(&self) -> Result<Rect, std::num::ParseFloatError> {
        Ok(Rect {
            x: numeric_attr(self.x.as_deref())?,
            y: numeric_attr(self.y.as_deref())?,
            width: numeric_attr(self.width.as_deref())?,
            height: numeric_attr(self.height.as_deref())?,
        })
    }
}

/// Typed accessor for an optional numeric attribute: absent means 0, present
/// must parse as a float.
pub fn numeric_attr(value: Option<&str>) -> Result<f64, std::num::ParseFloatError> {
    match value {
        Some(text) => text.trim().parse(),
        None => Ok(0.0),
    }
}

/// Position and size of a control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn offset(&self, offsets: Offsets) -> Rect {
        Rect {
            x: self.x + offsets.dx,
            y: self.y + offsets.dy,
            width: self.width + offsets.dw,
            height: self.height + offsets.dh,
        }
    }
}

/// Signed deltas applied uniformly to each geometry attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Offsets {
    pub dx: f64,
    pub dy: f64,
    pub dw: f64,
    pub dh: f64,
}

impl Offsets {
    pub fn new(dx: f64, dy: f64, dw: f64, dh: f64) -> Self {
        Self { dx, dy, dw, dh }
    }

    pub fn inverse(&self) -> Self {
        Self {
            dx: -self.dx,
            dy: -self.dy,
            dw: -self.dw,
            dh: -self.dh,
        }
    }
}

/// One planned control modification: before and after geometry.
#[derive(Debug, Clone)]
pub struct ChangeRecord {
    pub position: usize,
    pub ident: String,
    pub control_type: String,
    pub old: Rect,
    pub new: Rect,
}

impl ChangeRecord {
    /// The attributes whose value actually changes, as
    /// `(name, old, new)` tuples in fixed x/y/width/height order.
    pub fn changed_fields(&self) -> Vec<(&'static str, f64, f64)> {
        [
            ("x", self.old.x, self.new.x),
            ("y", self.old.y, self.new.y),
            ("width", self.old.width, self.new.width),
            ("height", self.old.height, self.new.height),
        ]
        .into_iter()
        .filter(|(_, old, new)| old != new)
        .collect()
    }
}

/// Counters returned by a transform pass.
///
/// `found` counts controls whose type matched the selection regardless of
/// parse outcome; `skipped` counts matched controls with a non-numeric
/// geometry attribute; `modified` counts controls actually rewritten.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifyStats {
    pub found: usize,
    pub modified: usize,
    pub skipped: usize,
}
