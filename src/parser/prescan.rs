//! Dataset-wide array width inference.
//!
//! The padded width of an array field is a property of the whole dataset,
//! not of one line, so this pass must finish before any line is exploded.

use super::filter::SelectedLine;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

/// `name={elements}` with at least one character between the braces
static ARRAY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z0-9_]+)=\{([^}]+)\}").expect("valid array pattern"));

/// Maximum element count per array field name
///
/// Built once per pass by [`prescan_array_widths`] and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrayWidths {
    widths: BTreeMap<String, usize>,
}

impl ArrayWidths {
    /// Width for `name`, 0 if the field was never seen in brace form
    pub fn get(&self, name: &str) -> usize {
        self.widths.get(name).copied().unwrap_or(0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.widths.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.widths.iter().map(|(name, width)| (name.as_str(), *width))
    }

    /// Copy of the mapping, for reports
    pub fn to_map(&self) -> BTreeMap<String, usize> {
        self.widths.clone()
    }

    fn observe(&mut self, name: &str, count: usize) {
        let width = self.widths.entry(name.to_string()).or_insert(0);
        if count > *width {
            *width = count;
        }
    }
}

impl<S: Into<String>> FromIterator<(S, usize)> for ArrayWidths {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        let mut widths = ArrayWidths::default();
        for (name, count) in iter {
            let name: String = name.into();
            widths.observe(&name, count);
        }
        widths
    }
}

/// Compute array widths over every selected line
///
/// **Public** - first stage of a parse pass
///
/// # Arguments
/// * `lines` - Every line selected for the pass
///
/// # Returns
/// For each array field name, the largest element count seen; empty arrays
/// do not count
///
/// # Example
/// ```ignore
/// let lines = select_lines(text, "thermal_power_allocator:");
/// let widths = prescan_array_widths(&lines);
/// println!("req_power width: {}", widths.get("req_power"));
/// ```
pub fn prescan_array_widths(lines: &[SelectedLine<'_>]) -> ArrayWidths {
    let mut widths = ArrayWidths::default();

    for line in lines {
        for caps in ARRAY_PATTERN.captures_iter(line.text) {
            widths.observe(&caps[1], caps[2].split_whitespace().count());
        }
    }

    debug!("Prescanned {} lines, {} array fields", lines.len(), widths.len());
    for (name, width) in widths.iter() {
        debug!("  {}: width {}", name, width);
    }

    widths
}
