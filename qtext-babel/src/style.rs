//! Style mappings and the style cascade
//!
//! Container blocks may declare presentation keys with a `<style>` tag:
//!
//! ```text
//! ::: figure
//! <style>{"text-align": "center", "image-width": 0.5}</style>
//!
//! ![Plot](plot.png)
//! :::
//! ```
//!
//! The declaration is a JSON object; the braces may be left out. Declarations
//! attach to the nearest enclosing container and cascade to everything nested
//! inside it.
//!
//! # Full vs incremental style
//!
//! While rendering, [`StyleCascade`] tracks the containers entered so far and
//! yields two views for each container:
//!
//! - the *full* style: every ancestor declaration merged with the container's
//!   own (own keys win),
//! - the *incremental* style: the container's own declaration alone.
//!
//! Which view a renderer applies is a per-format decision. Formats whose
//! containers inherit presentation structurally (nested HTML elements) apply the
//! incremental style, except at the document root which has no inheriting
//! wrapper and applies the full style. Flat formats (LaTeX) apply the full style
//! at every level.
//!
//! Keys a renderer does not recognize are ignored by that renderer.

use crate::error::FormatError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Recognized presentation keys.
pub mod keys {
    pub const TEXT_ALIGN: &str = "text-align";
    pub const CONTENT_ALIGN: &str = "content-align";
    pub const FONT_SIZE: &str = "font-size";
    pub const TABLE_BORDER: &str = "table-border";
    pub const TABLE_CELL_HEIGHT: &str = "table-cell-height";
    pub const TABLE_CELL_WIDTH: &str = "table-cell-width";
    pub const TABLE_HEADER_BOLD: &str = "table-header-bold";
    pub const TABLE_HEADER_RULE: &str = "table-header-rule";
    pub const IMAGE_WIDTH: &str = "image-width";
}

static EMPTY: StyleMap = StyleMap(BTreeMap::new());

/// Ordered key/value presentation data declared on a container block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleMap(BTreeMap<String, Value>);

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the interior of a `<style>` tag.
    ///
    /// Empty content yields an empty mapping. Missing outer braces are added.
    pub fn parse(payload: &str) -> Result<Self, FormatError> {
        let trimmed = payload.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }

        let source = if trimmed.starts_with('{') {
            trimmed.to_string()
        } else {
            format!("{{{trimmed}}}")
        };

        match serde_json::from_str::<Value>(&source) {
            Ok(Value::Object(map)) => Ok(Self(map.into_iter().collect())),
            Ok(_) => Err(FormatError::parse(
                "style declaration is not an object",
                trimmed,
            )),
            Err(e) => Err(FormatError::parse(
                format!("invalid style declaration: {e}"),
                trimmed,
            )),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Overlay `other` onto this mapping; keys in `other` win.
    pub fn merge(&mut self, other: &StyleMap) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// This mapping with `own` overlaid on top.
    pub fn merged(&self, own: &StyleMap) -> StyleMap {
        let mut full = self.clone();
        full.merge(own);
        full
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_str()
    }

    /// Numeric value; numeric strings (optionally suffixed with `pt`) are accepted.
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().trim_end_matches("pt").trim().parse().ok(),
            _ => None,
        }
    }

    /// Boolean value; numbers are true when non-zero.
    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_f64().map(|v| v != 0.0),
            Value::String(s) => match s.trim().to_lowercase().as_str() {
                "true" | "yes" | "1" => Some(true),
                "false" | "no" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn alignment(&self, key: &str) -> Option<Alignment> {
        Alignment::from_keyword(self.text(key)?)
    }

    /// Compact JSON object, keys in sorted order.
    pub fn to_json(&self) -> String {
        Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
        .to_string()
    }
}

/// Horizontal alignment keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.trim().to_lowercase().as_str() {
            "left" => Some(Alignment::Left),
            "center" | "centre" => Some(Alignment::Center),
            "right" => Some(Alignment::Right),
            "justify" => Some(Alignment::Justify),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "justify",
        }
    }

    /// Read the `text-align` declaration out of a raw cell style string such as
    /// `text-align:center`.
    pub fn from_cell_style(style: &str) -> Option<Self> {
        style.split(';').find_map(|declaration| {
            let (key, value) = declaration.split_once(':')?;
            if key.trim() == keys::TEXT_ALIGN {
                Alignment::from_keyword(value)
            } else {
                None
            }
        })
    }
}

/// Values used when a style key is not declared anywhere in the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleDefaults {
    pub table_border: bool,
    pub table_cell_height: f64,
    pub table_cell_width: f64,
    pub table_header_bold: bool,
    pub table_header_rule: bool,
    pub image_width: f64,
}

impl Default for StyleDefaults {
    fn default() -> Self {
        StyleDefaults {
            table_border: false,
            table_cell_height: 1.5,
            table_cell_width: 1.5,
            table_header_bold: true,
            table_header_rule: true,
            image_width: 1.0,
        }
    }
}

/// Table presentation resolved from the full style at the table's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableStyle {
    pub border: bool,
    pub cell_height: f64,
    pub cell_width: f64,
    pub header_bold: bool,
    pub header_rule: bool,
    pub content_align: Option<Alignment>,
}

impl TableStyle {
    pub fn resolve(style: &StyleMap, defaults: &StyleDefaults) -> Self {
        TableStyle {
            border: style
                .flag(keys::TABLE_BORDER)
                .unwrap_or(defaults.table_border),
            cell_height: style
                .number(keys::TABLE_CELL_HEIGHT)
                .filter(|h| *h > 0.0)
                .unwrap_or(defaults.table_cell_height),
            cell_width: style
                .number(keys::TABLE_CELL_WIDTH)
                .filter(|w| *w > 0.0)
                .unwrap_or(defaults.table_cell_width),
            header_bold: style
                .flag(keys::TABLE_HEADER_BOLD)
                .unwrap_or(defaults.table_header_bold),
            header_rule: style
                .flag(keys::TABLE_HEADER_RULE)
                .unwrap_or(defaults.table_header_rule),
            content_align: style.alignment(keys::CONTENT_ALIGN),
        }
    }

    /// Vertical cell padding in em, half of the height beyond one line.
    pub fn vertical_padding(&self) -> f64 {
        ((self.cell_height - 1.0) / 2.0).max(0.0)
    }

    /// Horizontal cell padding in em.
    pub fn horizontal_padding(&self) -> f64 {
        ((self.cell_width - 1.0) / 2.0).max(0.0)
    }
}

/// Image width as a fraction of the available width, in `(0, 1]`.
pub fn image_width(style: &StyleMap, defaults: &StyleDefaults) -> f64 {
    style
        .number(keys::IMAGE_WIDTH)
        .filter(|w| *w > 0.0)
        .map(|w| w.min(1.0))
        .unwrap_or(defaults.image_width)
}

/// Format a number without a trailing `.0` and with at most four decimals.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let fixed = format!("{value:.4}");
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// The two views of a container's style.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppliedStyle {
    /// Ancestor declarations merged with the container's own
    pub full: StyleMap,
    /// The container's own declaration
    pub incremental: StyleMap,
}

/// Stack of accumulated styles for the containers currently being rendered.
#[derive(Debug, Clone, Default)]
pub struct StyleCascade {
    stack: Vec<StyleMap>,
}

impl StyleCascade {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a container declaring `own`.
    pub fn enter(&mut self, own: &StyleMap) -> AppliedStyle {
        let full = self.current().merged(own);
        self.stack.push(full.clone());
        AppliedStyle {
            full,
            incremental: own.clone(),
        }
    }

    /// Leave the innermost container.
    pub fn leave(&mut self) {
        self.stack.pop();
    }

    /// Full style in effect at the current position.
    pub fn current(&self) -> &StyleMap {
        self.stack.last().unwrap_or(&EMPTY)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}
