//! Chart colours

use crate::model::InfusionKind;

/// Twenty-colour categorical palette
pub const CATEGORY20: [&str; 20] = [
    "#1f77b4", "#aec7e8", "#ff7f0e", "#ffbb78", "#2ca02c", "#98df8a", "#d62728", "#ff9896",
    "#9467bd", "#c5b0d5", "#8c564b", "#c49c94", "#e377c2", "#f7b6d2", "#7f7f7f", "#c7c7c7",
    "#bcbd22", "#dbdb8d", "#17becf", "#9edae5",
];

/// Fixed colour per infusion so a kind looks the same on every chart
#[inline]
pub fn infusion_colour(kind: InfusionKind) -> &'static str {
    CATEGORY20[kind.index()]
}

/// Colour for the `i`th line of a chart, cycling the palette
#[inline]
pub fn index_colour(i: usize) -> &'static str {
    CATEGORY20[i % CATEGORY20.len()]
}
