use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::logic::viewport::CardOrientation;
use crate::state::{AppState, CatalogItem, Focus};
use crate::theme::{Theme, theme};
use crate::util::{format_price, format_rating, truncate_to_width};

use super::view::{Card, CatalogView, Phase};

/// Height of a boxed (vertical) card.
const VERTICAL_CARD_H: u16 = 6;

/// What: Render the item grid for `view` into `area`.
///
/// Details:
/// - Rows scroll so the card under the grid cursor stays visible.
/// - An empty loaded result renders a message instead of cards.
pub fn render_grid(f: &mut Frame, app: &AppState, view: &CatalogView<'_>, area: Rect) {
    let th = theme();
    let focused = app.focus == Focus::Grid;
    let block = Block::default()
        .title(Span::styled(
            grid_title(view),
            Style::default().fg(if focused { th.mauve } else { th.overlay1 }),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused { th.mauve } else { th.surface1 }));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if view.cards.is_empty() {
        let msg = Paragraph::new(Span::styled(
            "No items match these filters.",
            Style::default().fg(th.subtext0),
        ));
        f.render_widget(msg, inner);
        return;
    }

    let columns = usize::from(view.layout.columns.max(1));
    let card_h = match view.layout.orientation {
        CardOrientation::Horizontal => 1,
        CardOrientation::Vertical => VERTICAL_CARD_H,
    };
    let visible_rows = usize::from((inner.height / card_h).max(1));
    let cursor_row = app.grid_cursor / columns;
    let first_row = cursor_row.saturating_sub(visible_rows - 1);

    let rows: Vec<&[Card<'_>]> = view.cards.chunks(columns).collect();
    let row_areas = Layout::vertical(
        std::iter::repeat_n(Constraint::Length(card_h), visible_rows.min(rows.len()))
            .collect::<Vec<_>>(),
    )
    .split(inner);

    for (slot, row) in rows.iter().skip(first_row).take(visible_rows).enumerate() {
        let Some(row_area) = row_areas.get(slot) else {
            break;
        };
        let cells = Layout::horizontal(
            std::iter::repeat_n(Constraint::Ratio(1, u32::try_from(columns).unwrap_or(1)), columns)
                .collect::<Vec<_>>(),
        )
        .split(*row_area);
        for (col, card) in row.iter().enumerate() {
            let index = (first_row + slot) * columns + col;
            let selected = focused && index == app.grid_cursor && view.phase != Phase::Loading;
            match view.layout.orientation {
                CardOrientation::Horizontal => render_row_card(f, card, selected, cells[col], &th),
                CardOrientation::Vertical => render_box_card(f, card, selected, cells[col], &th),
            }
        }
    }
}

fn grid_title(view: &CatalogView<'_>) -> String {
    match (view.phase, view.pagination.total) {
        (Phase::Initializing | Phase::Loading, _) => "Items (loading…)".to_string(),
        (_, Some(total)) => format!("Items ({total})"),
        (_, None) => "Items".to_string(),
    }
}

fn price_spans(item: &CatalogItem, th: &Theme) -> Vec<Span<'static>> {
    let mut spans = vec![Span::styled(
        format_price(item.price),
        Style::default().fg(th.green).add_modifier(Modifier::BOLD),
    )];
    if let Some(old) = item.old_price {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format_price(old),
            Style::default().fg(th.red).add_modifier(Modifier::CROSSED_OUT),
        ));
    }
    spans
}

fn render_row_card(f: &mut Frame, card: &Card<'_>, selected: bool, area: Rect, th: &Theme) {
    let line = match card {
        Card::Placeholder => Line::from(Span::styled(
            "░".repeat(usize::from(area.width.saturating_sub(1))),
            Style::default().fg(th.surface1),
        )),
        Card::Item(item) => {
            let width = usize::from(area.width);
            let name_w = width.saturating_sub(22);
            let mut spans = vec![
                Span::styled(
                    format!("{:<w$}", truncate_to_width(&item.name, name_w), w = name_w),
                    Style::default().fg(th.text),
                ),
                Span::styled(
                    format!(" {:<8} ", truncate_to_width(&item.brand, 8)),
                    Style::default().fg(th.subtext0),
                ),
            ];
            spans.extend(price_spans(item, th));
            Line::from(spans)
        }
    };
    let style = if selected {
        Style::default().bg(th.surface1)
    } else {
        Style::default()
    };
    f.render_widget(Paragraph::new(line).style(style), area);
}

fn render_box_card(f: &mut Frame, card: &Card<'_>, selected: bool, area: Rect, th: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if selected { th.sapphire } else { th.surface1 }));
    let inner_w = usize::from(area.width.saturating_sub(2));
    let lines = match card {
        Card::Placeholder => {
            let bar = Style::default().fg(th.surface1);
            vec![
                Line::from(Span::styled("▒".repeat(inner_w.saturating_sub(2)), bar)),
                Line::from(Span::styled("▒".repeat(inner_w / 2), bar)),
                Line::from(Span::styled("▒".repeat(inner_w / 3), bar)),
            ]
        }
        Card::Item(item) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    truncate_to_width(&item.name, inner_w),
                    Style::default().fg(th.text).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    truncate_to_width(&item.brand, inner_w),
                    Style::default().fg(th.subtext0),
                )),
                Line::from(price_spans(item, th)),
            ];
            if let Some(rate) = item.rate {
                lines.push(Line::from(Span::styled(
                    format_rating(rate),
                    Style::default().fg(th.yellow),
                )));
            }
            lines
        }
    };
    f.render_widget(Paragraph::new(lines).block(block), area);
}
