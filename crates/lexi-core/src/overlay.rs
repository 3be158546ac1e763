use lexi_config::ui::UiConfig;
use lexi_types::{Position, Rect, Size};

/// Placement rule for word popovers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopoverLayout {
    /// Space between anchor and popover
    pub gap: f32,
    /// Space kept from the viewport edges
    pub margin: f32,
}

impl Default for PopoverLayout {
    fn default() -> Self {
        Self {
            gap: 12.0,
            margin: 10.0,
        }
    }
}

impl From<&UiConfig> for PopoverLayout {
    fn from(config: &UiConfig) -> Self {
        Self {
            gap: config.popover_gap,
            margin: config.viewport_margin,
        }
    }
}

impl PopoverLayout {
    /// Center the popover above `anchor`, flipping below when there is no
    /// room above, and clamp it horizontally into the viewport.
    pub fn place(&self, anchor: Rect, popover: Size, viewport: Size) -> Position {
        let mut top = anchor.top - popover.height - self.gap;
        if top < self.margin {
            top = anchor.bottom() + self.gap;
        }

        let max_left = viewport.width - popover.width - self.margin;
        let left = (anchor.center_x() - popover.width / 2.0)
            .min(max_left)
            // wider than the viewport: pin to the left edge
            .max(self.margin);

        Position { top, left }
    }
}
