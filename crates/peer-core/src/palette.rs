/// Fixed chart palette shared by the legend, line series, and the
/// relative-strength panels.
pub const PALETTE: [&str; 10] = [
    "#8b5cf6", "#10b981", "#f59e0b", "#3b82f6", "#ef4444",
    "#ec4899", "#06b6d4", "#84cc16", "#6366f1", "#f97316",
];

/// Color for the ticker at `index` in the selection order. Wraps past the
/// palette end, so every surface coloring by selection index agrees.
pub fn ticker_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}
