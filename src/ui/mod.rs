//! Terminal rendering of the catalog listing.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::logic::viewport::FilterPlacement;
use crate::state::AppState;
use crate::theme::theme;

mod filters;
mod grid;
pub mod view;

pub use view::{CatalogView, Phase, derive_view};

/// Sidebar width when the filter panel is docked.
const SIDEBAR_W: u16 = 28;

/// What: Draw one frame of the listing.
///
/// Inputs:
/// - `f`: Frame to render into
/// - `app`: Session state
///
/// Details:
/// - Layout follows `app.layout()`: a docked sidebar above `Sm`, otherwise a
///   collapsible accordion above the grid.
pub fn ui(f: &mut Frame, app: &AppState) {
    let th = theme();
    let area = f.area();
    f.render_widget(Block::default().style(Style::default().bg(th.base)), area);

    let view = derive_view(app);
    let banner_h = u16::from(view.banner.is_some());
    let chunks = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(banner_h),
        Constraint::Min(3),
        Constraint::Length(2),
    ])
    .split(area);

    render_header(f, &view, chunks[0]);
    if let Some(banner) = &view.banner {
        f.render_widget(
            Paragraph::new(Span::styled(
                format!("⚠ {banner}"),
                Style::default().fg(th.red).add_modifier(Modifier::BOLD),
            )),
            chunks[1],
        );
    }

    match view.layout.filters {
        FilterPlacement::DockedInline { sticky_offset } => {
            let cols = Layout::horizontal([Constraint::Length(SIDEBAR_W), Constraint::Min(10)])
                .split(chunks[2]);
            let sidebar = cols[0];
            let offset = sticky_offset.min(sidebar.height.saturating_sub(1));
            let panel = Rect {
                y: sidebar.y + offset,
                height: sidebar.height - offset,
                ..sidebar
            };
            filters::render_filter_panel(f, app, &view.controls, panel);
            grid::render_grid(f, app, &view, cols[1]);
        }
        FilterPlacement::CollapsedAccordion => {
            let panel_h = if app.filters_expanded {
                filters::panel_height(&view.controls).min(chunks[2].height / 2)
            } else {
                0
            };
            let rows = Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(panel_h),
                Constraint::Min(3),
            ])
            .split(chunks[2]);
            let (arrow, hint) = if app.filters_expanded {
                ("▾", "")
            } else {
                ("▸", "  (f)")
            };
            f.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(format!("{arrow} Filters"), Style::default().fg(th.mauve)),
                    Span::styled(hint, Style::default().fg(th.overlay1)),
                ])),
                rows[0],
            );
            if app.filters_expanded {
                filters::render_filter_panel(f, app, &view.controls, rows[1]);
            }
            grid::render_grid(f, app, &view, rows[2]);
        }
    }

    render_footer(f, &view, chunks[3]);
}

fn render_header(f: &mut Frame, view: &CatalogView<'_>, area: Rect) {
    let th = theme();
    let mut crumbs: Vec<Span> = Vec::new();
    for (i, crumb) in view.breadcrumbs.iter().enumerate() {
        if i > 0 {
            crumbs.push(Span::styled(" / ", Style::default().fg(th.overlay1)));
        }
        crumbs.push(Span::styled(crumb.clone(), Style::default().fg(th.lavender)));
    }
    let lines = vec![
        Line::from(Span::styled(
            view.title.clone(),
            Style::default().fg(th.mauve).add_modifier(Modifier::BOLD),
        )),
        Line::from(crumbs),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_footer(f: &mut Frame, view: &CatalogView<'_>, area: Rect) {
    let th = theme();
    let p = view.pagination;
    let pages = p
        .last_page
        .map_or_else(|| format!("Page {}", p.page), |last| format!("Page {} of {last}", p.page));
    let dim = Style::default().fg(th.overlay1);
    let on = Style::default().fg(th.text);
    let pager = Line::from(vec![
        Span::styled("‹ prev ", if p.can_prev { on } else { dim }),
        Span::styled(pages, Style::default().fg(th.sapphire)),
        Span::styled(" next ›", if p.can_next { on } else { dim }),
        Span::styled("   ", dim),
        Span::styled(view.link.clone(), Style::default().fg(th.lavender)),
    ]);
    let hints = Line::from(Span::styled(
        "Tab focus  ⏎ select  Space brand  s sort  n/p page  ⌫ all  b/Alt←→ history  r retry  q quit",
        dim,
    ));
    f.render_widget(Paragraph::new(vec![pager, hints]), area);
}
