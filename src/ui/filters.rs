use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use crate::state::{AppState, Focus};
use crate::theme::{Theme, theme};
use crate::util::format_price;

use super::view::FilterControls;

fn panel_block(title: &str, focused: bool, th: &Theme) -> Block<'static> {
    Block::default()
        .title(Span::styled(
            title.to_string(),
            Style::default().fg(if focused { th.mauve } else { th.overlay1 }),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused { th.mauve } else { th.surface1 }))
}

/// Rows the panel needs to show every control without scrolling.
#[must_use]
pub fn panel_height(controls: &FilterControls) -> u16 {
    let cats = u16::try_from(controls.categories.len()).unwrap_or(u16::MAX);
    let brands = controls
        .brands
        .as_ref()
        .map_or(1, |b| u16::try_from(b.len().max(1)).unwrap_or(u16::MAX));
    // borders of the category and brand lists, then the price and sort blocks
    cats.saturating_add(brands).saturating_add(2 + 2 + 6 + 3)
}

/// What: Render the category, brand, price and sort controls stacked in `area`.
///
/// Inputs:
/// - `f`: Frame to draw into
/// - `app`: Session state (focus and cursors)
/// - `controls`: Derived control content
/// - `area`: Target rectangle
///
/// Details:
/// - Brand and price blocks render as disabled until bounds are loaded.
pub fn render_filter_panel(f: &mut Frame, app: &AppState, controls: &FilterControls, area: Rect) {
    let th = theme();
    let cats_h = u16::try_from(controls.categories.len()).unwrap_or(u16::MAX).saturating_add(2);
    let brands_h = controls
        .brands
        .as_ref()
        .map_or(3, |b| u16::try_from(b.len().max(1)).unwrap_or(u16::MAX).saturating_add(2));
    let chunks = Layout::vertical([
        Constraint::Max(cats_h),
        Constraint::Max(brands_h),
        Constraint::Length(6),
        Constraint::Length(3),
    ])
    .split(area);

    render_categories(f, app, controls, chunks[0], &th);
    render_brands(f, app, controls, chunks[1], &th);
    render_price(f, app, controls, chunks[2], &th);

    let sort = Paragraph::new(Line::from(vec![
        Span::styled("Price ", Style::default().fg(th.subtext0)),
        Span::styled(controls.sort.label(), Style::default().fg(th.text)),
        Span::styled("  (s)", Style::default().fg(th.overlay1)),
    ]))
    .block(panel_block("Sort", false, &th));
    f.render_widget(sort, chunks[3]);
}

fn render_categories(f: &mut Frame, app: &AppState, controls: &FilterControls, area: Rect, th: &Theme) {
    let focused = app.focus == Focus::Categories;
    let items: Vec<ListItem> = controls
        .categories
        .iter()
        .map(|c| {
            let marker = if c.selected { "● " } else { "  " };
            let style = if c.selected {
                Style::default().fg(th.green).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(th.text)
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(th.green)),
                Span::styled(c.label.clone(), style),
            ]))
        })
        .collect();
    let list = List::new(items)
        .block(panel_block("Category", focused, th))
        .highlight_style(if focused {
            Style::default().fg(th.mantle).bg(th.lavender)
        } else {
            Style::default()
        });
    let mut state = ListState::default().with_selected(Some(app.category_cursor));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_brands(f: &mut Frame, app: &AppState, controls: &FilterControls, area: Rect, th: &Theme) {
    let focused = app.focus == Focus::Brands;
    let Some(brands) = &controls.brands else {
        let waiting = Paragraph::new(Span::styled("loading…", Style::default().fg(th.surface1)))
            .block(panel_block("Brand", focused, th));
        f.render_widget(waiting, area);
        return;
    };
    let items: Vec<ListItem> = if brands.is_empty() {
        vec![ListItem::new(Span::styled(
            "no brands",
            Style::default().fg(th.overlay1),
        ))]
    } else {
        brands
            .iter()
            .map(|b| {
                let (mark, color) = if b.selected {
                    ("[x] ", th.green)
                } else {
                    ("[ ] ", th.overlay1)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(mark, Style::default().fg(color)),
                    Span::styled(b.name.clone(), Style::default().fg(th.text)),
                ]))
            })
            .collect()
    };
    let list = List::new(items)
        .block(panel_block("Brand", focused, th))
        .highlight_style(if focused {
            Style::default().fg(th.mantle).bg(th.lavender)
        } else {
            Style::default()
        });
    let mut state = ListState::default().with_selected(Some(app.brand_cursor));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_price(f: &mut Frame, app: &AppState, controls: &FilterControls, area: Rect, th: &Theme) {
    let focused = app.focus == Focus::Price;
    let dim = Style::default().fg(th.overlay1);
    let lines = controls.price.map_or_else(
        || vec![Line::from(Span::styled("loading…", Style::default().fg(th.surface1)))],
        |p| {
            let applied = p.applied.map_or_else(
                || "any".to_string(),
                |r| format!("{} – {}", format_price(r.from()), format_price(r.to())),
            );
            let mut lines = vec![
                Line::from(vec![
                    Span::styled("Bounds  ", dim),
                    Span::styled(
                        format!("{} – {}", format_price(p.min), format_price(p.max)),
                        Style::default().fg(th.subtext0),
                    ),
                ]),
                Line::from(vec![
                    Span::styled("Applied ", dim),
                    Span::styled(applied, Style::default().fg(th.green)),
                ]),
            ];
            if let Some(d) = p.draft {
                lines.push(Line::from(vec![
                    Span::styled("Draft   ", dim),
                    Span::styled(
                        format!("{} – {}", format_price(d.from()), format_price(d.to())),
                        Style::default().fg(th.yellow),
                    ),
                ]));
            }
            if focused {
                lines.push(Line::from(Span::styled("←→ low ↑↓ high ⏎ apply x clear", dim)));
            }
            lines
        },
    );
    f.render_widget(
        Paragraph::new(lines).block(panel_block("Price", focused, th)),
        area,
    );
}
