//! Breakpoint classification and the layout decisions derived from it.

/// Discrete terminal-width class, modeled on the usual responsive grid tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Breakpoint {
    /// Below 60 columns.
    #[default]
    Xs,
    /// 60 columns and up.
    Sm,
    /// 90 columns and up.
    Md,
    /// 120 columns and up.
    Lg,
    /// 160 columns and up.
    Xl,
    /// 200 columns and up.
    Xxl,
}

impl Breakpoint {
    /// What: Classify a terminal width.
    ///
    /// Inputs:
    /// - `columns`: Terminal width in cells
    ///
    /// Output: Largest breakpoint whose minimum width fits.
    #[must_use]
    pub const fn from_width(columns: u16) -> Self {
        match columns {
            0..60 => Self::Xs,
            60..90 => Self::Sm,
            90..120 => Self::Md,
            120..160 => Self::Lg,
            160..200 => Self::Xl,
            _ => Self::Xxl,
        }
    }
}

/// How a product card lays out its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardOrientation {
    /// One line per card: name, brand and price side by side.
    Horizontal,
    /// Boxed card with fields stacked.
    Vertical,
}

/// Where the filter panel lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPlacement {
    /// Folded into an accordion above the grid.
    CollapsedAccordion,
    /// Sidebar next to the grid, pinned `sticky_offset` rows below the header.
    DockedInline {
        /// Rows between the top of the sidebar and the panel.
        sticky_offset: u16,
    },
}

/// Everything the renderer needs to know about the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutDecision {
    /// Card layout.
    pub orientation: CardOrientation,
    /// Filter panel placement.
    pub filters: FilterPlacement,
    /// Cards per grid row.
    pub columns: u16,
}

/// What: Map a breakpoint to layout decisions.
///
/// Inputs:
/// - `breakpoint`: Current width class
/// - `sticky_offset`: Configured docking offset, used only when docked
///
/// Output:
/// - `LayoutDecision`; below `Sm` cards are horizontal and filters collapse.
#[must_use]
pub const fn layout_for(breakpoint: Breakpoint, sticky_offset: u16) -> LayoutDecision {
    let compact = matches!(breakpoint, Breakpoint::Xs);
    let columns = match breakpoint {
        Breakpoint::Xs => 1,
        Breakpoint::Sm | Breakpoint::Md => 2,
        Breakpoint::Lg | Breakpoint::Xl => 3,
        Breakpoint::Xxl => 4,
    };
    LayoutDecision {
        orientation: if compact {
            CardOrientation::Horizontal
        } else {
            CardOrientation::Vertical
        },
        filters: if compact {
            FilterPlacement::CollapsedAccordion
        } else {
            FilterPlacement::DockedInline { sticky_offset }
        },
        columns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Width thresholds map to the expected tiers
    ///
    /// - Input: Widths around each threshold
    /// - Output: Matching breakpoints
    fn classifies_widths() {
        assert_eq!(Breakpoint::from_width(0), Breakpoint::Xs);
        assert_eq!(Breakpoint::from_width(59), Breakpoint::Xs);
        assert_eq!(Breakpoint::from_width(60), Breakpoint::Sm);
        assert_eq!(Breakpoint::from_width(119), Breakpoint::Md);
        assert_eq!(Breakpoint::from_width(120), Breakpoint::Lg);
        assert_eq!(Breakpoint::from_width(199), Breakpoint::Xl);
        assert_eq!(Breakpoint::from_width(u16::MAX), Breakpoint::Xxl);
    }

    #[test]
    /// What: Compact widths collapse filters and use horizontal cards
    ///
    /// - Input: Xs and Sm with offset 3
    /// - Output: Horizontal/collapsed for Xs; vertical/docked with offset 3 for Sm
    fn threshold_switches_layout() {
        let xs = layout_for(Breakpoint::Xs, 3);
        assert_eq!(xs.orientation, CardOrientation::Horizontal);
        assert_eq!(xs.filters, FilterPlacement::CollapsedAccordion);
        assert_eq!(xs.columns, 1);

        let sm = layout_for(Breakpoint::Sm, 3);
        assert_eq!(sm.orientation, CardOrientation::Vertical);
        assert_eq!(sm.filters, FilterPlacement::DockedInline { sticky_offset: 3 });
    }

    #[test]
    /// What: Grid columns widen with the breakpoint
    ///
    /// - Input: Md, Xl, Xxl
    /// - Output: 2, 3, 4 columns
    fn columns_follow_breakpoint() {
        assert_eq!(layout_for(Breakpoint::Md, 0).columns, 2);
        assert_eq!(layout_for(Breakpoint::Xl, 0).columns, 3);
        assert_eq!(layout_for(Breakpoint::Xxl, 0).columns, 4);
    }
}
