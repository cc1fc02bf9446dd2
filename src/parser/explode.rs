//! Array explosion: flatten `name={v0 v1 ...}` into indexed scalar fields.
//!
//! `load={1 2}` with a dataset width of 4 becomes
//! `load0=1 load1=2 load2=0 load3=0`. Empty arrays (`name={}`) contribute
//! nothing for their line, whatever the dataset width.

use super::prescan::ArrayWidths;
use crate::utils::config::PAD_VALUE;
use once_cell::sync::Lazy;
use regex::Regex;

/// One `key=value` token: a brace array or a scalar running to whitespace
static FIELD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Za-z0-9_]+)=(?:\{([^}]*)\}|([^\s{]*))").expect("valid field pattern")
});

/// One flat column of a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatField {
    pub name: String,
    pub value: String,
}

impl FlatField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Ordered fields of one line after explosion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatRecord {
    fields: Vec<FlatField>,
}

impl FlatRecord {
    pub fn fields(&self) -> &[FlatField] {
        &self.fields
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Render back to `key=value` tokens separated by single spaces
    pub fn to_line(&self) -> String {
        self.fields
            .iter()
            .map(|f| format!("{}={}", f.name, f.value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Explode one payload into flat fields
///
/// **Public** - pure function, called once per selected line
///
/// Scans left to right exactly once. Text that is not a `key=value` token
/// is skipped. Unbalanced braces are not validated.
///
/// # Arguments
/// * `payload` - The `key=value` part of one line
/// * `widths` - Dataset-wide array widths from [`prescan_array_widths`](super::prescan_array_widths)
///
/// # Returns
/// Fields in line order; `name={a b}` becomes `name0=a name1=b` padded with
/// `0` up to the width of `name`, and `name={}` produces no field
///
/// # Example
/// ```ignore
/// let widths: ArrayWidths = vec![("load", 3)].into_iter().collect();
/// let record = explode_payload("load={1 2} temp=5", &widths);
/// assert_eq!(record.to_line(), "load0=1 load1=2 load2=0 temp=5");
/// ```
pub fn explode_payload(payload: &str, widths: &ArrayWidths) -> FlatRecord {
    let mut fields = Vec::new();

    for caps in FIELD_PATTERN.captures_iter(payload) {
        let name = &caps[1];

        match (caps.get(2), caps.get(3)) {
            (Some(elements), _) => explode_array(name, elements.as_str(), widths, &mut fields),
            (None, Some(value)) => fields.push(FlatField::new(name, value.as_str())),
            (None, None) => {}
        }
    }

    FlatRecord { fields }
}

/// Push `name0..name(k-1)` then zero padding up to the dataset width
///
/// **Private** - internal helper for explode_payload
fn explode_array(name: &str, elements: &str, widths: &ArrayWidths, out: &mut Vec<FlatField>) {
    let values: Vec<&str> = elements.split_whitespace().collect();
    if values.is_empty() {
        return;
    }

    for (idx, value) in values.iter().enumerate() {
        out.push(FlatField::new(format!("{}{}", name, idx), *value));
    }

    for idx in values.len()..widths.get(name) {
        out.push(FlatField::new(format!("{}{}", name, idx), PAD_VALUE));
    }
}
