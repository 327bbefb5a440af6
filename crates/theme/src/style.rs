use crate::colors::Color;

/// Visual settings for one summary card, derived from its channel accent.
#[derive(Debug, Clone, Copy)]
pub struct CardStyle {
    /// Translucent wash of the channel accent.
    pub background: Color,
    /// Slightly stronger wash used as the card border.
    pub border: Color,
    /// The channel accent at full strength (title + value).
    pub accent: Color,
}

/// Visual settings for one chart panel.
#[derive(Debug, Clone, Copy)]
pub struct ChartStyle {
    /// Panel background.
    pub background: Color,
    /// Trace color.
    pub accent: Color,
    /// Area fill under the trace.
    pub fill: Color,
    /// Horizontal gridlines.
    pub grid: Color,
    /// Axis tick labels.
    pub labels: Color,
}
