//! Select field and its option list popup.
//!
//! Geometry is computed by [`SelectLayout::compute`] without touching the
//! frame, then drawn and registered for mouse dispatch:
//!
//! ```text
//! ┌ Title ─────────────────────────────────┐
//! │  First ×   Third ×          ×  │ ▾     │
//! └────────────────────────────────────────┘
//! ┌────────────────────────────────────────┐
//! │ First                                  │  <- rows, popup overlays
//! │ Second                                 │     whatever is below
//! └────────────────────────────────────────┘
//! ```

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::SelectField;
use crate::events::Action;
use crate::select::{Intent, Mode, SelectControl, SelectHost, Selection};
use crate::tui::interaction::{InteractionRegistry, InteractiveRegion, priority};
use crate::tui::theme::*;

/// Height of a field box including borders
pub const FIELD_HEIGHT: u16 = 3;

/// Columns reserved on the right for " ×  │ ▾ "
const TRAIL_WIDTH: u16 = 8;

/// Rows shown before the list scrolls
const MAX_VISIBLE_ROWS: usize = 8;

/// Screen geometry of one select field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectLayout {
    pub field: Rect,
    /// Area for the single-mode label or the chips
    pub content: Rect,
    /// One rect per chip that fits, aligned with the selected items
    pub chips: Vec<Rect>,
    /// Chips that did not fit
    pub hidden_chips: usize,
    pub clear: Rect,
    pub separator: Rect,
    pub indicator: Rect,
    /// Option list frame, when open
    pub popup: Option<Rect>,
    /// Visible rows as (option index, rect)
    pub rows: Vec<(usize, Rect)>,
}

/// Text drawn for a chip
pub fn chip_text(label: &str) -> String {
    format!(" {} × ", label)
}

impl SelectLayout {
    /// Compute the layout of a field drawn at `field`, with the popup
    /// clipped to `screen`.
    pub fn compute(
        field: Rect,
        screen: Rect,
        control: &SelectControl,
        host: &impl SelectHost,
    ) -> Self {
        let inner = Block::default().borders(Borders::ALL).inner(field);
        let row_y = inner.y;
        let content_width = inner.width.saturating_sub(TRAIL_WIDTH);
        let trail_x = inner.x + content_width;
        let content = Rect::new(inner.x, row_y, content_width, inner.height.min(1));

        let clear = Rect::new(trail_x, row_y, 3, 1).intersection(inner);
        let separator = Rect::new(trail_x + 4, row_y, 1, 1).intersection(inner);
        let indicator = Rect::new(trail_x + 6, row_y, 1, 1).intersection(inner);

        let (chips, hidden_chips) = match host.value() {
            Selection::Multiple(items) => {
                let mut chips = Vec::with_capacity(items.len());
                let mut x = content.x + 1;
                for item in items {
                    let width = Span::raw(chip_text(&item.label)).width() as u16;
                    if x + width > content.right() {
                        break;
                    }
                    chips.push(Rect::new(x, row_y, width, 1));
                    x += width + 1;
                }
                let hidden = items.len() - chips.len();
                (chips, hidden)
            }
            Selection::Single(_) => (Vec::new(), 0),
        };

        let (popup, rows) = if control.is_open() {
            Self::popup_rows(field, screen, control, host.option_count())
        } else {
            (None, Vec::new())
        };

        Self {
            field,
            content,
            chips,
            hidden_chips,
            clear,
            separator,
            indicator,
            popup,
            rows,
        }
    }

    fn popup_rows(
        field: Rect,
        screen: Rect,
        control: &SelectControl,
        count: usize,
    ) -> (Option<Rect>, Vec<(usize, Rect)>) {
        let y = field.bottom();
        let wanted = count.clamp(1, MAX_VISIBLE_ROWS) as u16 + 2;
        let height = wanted.min(screen.bottom().saturating_sub(y));
        if height < 3 {
            return (None, Vec::new());
        }

        let popup = Rect::new(field.x, y, field.width, height);
        let visible = (height - 2) as usize;
        let offset = scroll_offset(control.highlighted(), visible, count);

        let rows = (offset..count)
            .take(visible)
            .enumerate()
            .map(|(i, index)| {
                let rect = Rect::new(popup.x + 1, popup.y + 1 + i as u16, popup.width.saturating_sub(2), 1);
                (index, rect)
            })
            .collect();

        (Some(popup), rows)
    }
}

/// First row to show so the highlighted row stays visible.
pub fn scroll_offset(highlighted: usize, visible: usize, count: usize) -> usize {
    if visible == 0 || highlighted < visible {
        return 0;
    }
    (highlighted + 1 - visible).min(count.saturating_sub(visible))
}

/// Render the field box and register its regions.
pub fn render_select_field(
    frame: &mut Frame,
    layout: &SelectLayout,
    index: usize,
    field: &SelectField,
    focused: bool,
    registry: &mut InteractionRegistry,
) {
    let control = &field.control;
    let host = &field.host;
    let to_field = |intent| Action::Field { field: index, intent };

    let border = if focused { ACCENT_MINT } else { TEXT_DIM };
    let block = Block::default()
        .title(format!(" {} ", host.title))
        .title_style(Style::new().fg(border).bold())
        .borders(Borders::ALL)
        .border_style(Style::new().fg(border));
    frame.render_widget(block, layout.field);

    registry.register(
        InteractiveRegion::clickable("select_field", layout.field.into(), to_field(Intent::ToggleVisibility))
            .with_priority(priority::FIELD),
    );

    match host.value() {
        Selection::Multiple(items) => {
            for (i, (item, rect)) in items.iter().zip(&layout.chips).enumerate() {
                let chip = Paragraph::new(Line::from(Span::styled(
                    chip_text(&item.label),
                    Style::new().fg(TEXT_WHITE).bg(CHIP_BG),
                )));
                frame.render_widget(chip, *rect);
                registry.register(
                    InteractiveRegion::clickable("select_chip", (*rect).into(), to_field(Intent::DeselectChip(i)))
                        .with_priority(priority::NESTED),
                );
            }

            if layout.hidden_chips > 0 {
                let x = layout.chips.last().map_or(layout.content.x + 1, |r| r.right() + 1);
                let more = format!("+{}", layout.hidden_chips);
                let rect = Rect::new(x, layout.content.y, more.len() as u16, 1).intersection(layout.content);
                frame.render_widget(Paragraph::new(Span::styled(more, Style::new().fg(TEXT_DIM))), rect);
            }
        }
        Selection::Single(current) => {
            if let Some(option) = current {
                let label = Rect::new(
                    layout.content.x + 1,
                    layout.content.y,
                    layout.content.width.saturating_sub(1),
                    layout.content.height,
                );
                frame.render_widget(
                    Paragraph::new(Span::styled(option.label.as_str(), Style::new().fg(TEXT_WHITE))),
                    label,
                );
            }
        }
    }

    let clear_style = if host.value().is_empty() {
        Style::new().fg(TEXT_DIM)
    } else {
        Style::new().fg(ACCENT_CORAL)
    };
    frame.render_widget(Paragraph::new(Span::styled(" × ", clear_style)), layout.clear);
    registry.register(
        InteractiveRegion::clickable("select_clear", layout.clear.into(), to_field(Intent::Clear))
            .with_priority(priority::NESTED),
    );

    frame.render_widget(
        Paragraph::new(Span::styled("│", Style::new().fg(TEXT_DIM))),
        layout.separator,
    );
    let arrow = if control.is_open() { "▴" } else { "▾" };
    frame.render_widget(
        Paragraph::new(Span::styled(arrow, Style::new().fg(ACCENT_LIGHT_BLUE))),
        layout.indicator,
    );
}

/// Render the option list of an open field and register its rows.
///
/// Call after every field box is drawn so the list covers the fields
/// below it.
pub fn render_select_popup(
    frame: &mut Frame,
    layout: &SelectLayout,
    index: usize,
    field: &SelectField,
    registry: &mut InteractionRegistry,
) {
    let Some(popup) = layout.popup else {
        return;
    };
    let control = &field.control;
    let host = &field.host;
    let to_field = |intent| Action::Field { field: index, intent };

    frame.render_widget(Clear, popup);

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::new().fg(ACCENT_MINT))
        .style(Style::new().bg(POPUP_BG));
    if !host.query().is_empty() {
        block = block
            .title(format!(" filter: {} ", host.query()))
            .title_style(Style::new().fg(ACCENT_LIGHT_BLUE));
    }
    frame.render_widget(block, popup);

    // The frame swallows clicks so nothing underneath toggles
    registry.register(
        InteractiveRegion::interactive(
            "select_popup",
            popup.into(),
            Action::None,
            to_field(Intent::HighlightPrev),
            to_field(Intent::HighlightNext),
        )
        .with_priority(priority::POPUP),
    );

    if host.options().is_empty() {
        let empty = Rect::new(popup.x + 1, popup.y + 1, popup.width.saturating_sub(2), 1);
        frame.render_widget(
            Paragraph::new(Span::styled(" (no options)", Style::new().fg(TEXT_DIM))),
            empty,
        );
        return;
    }

    for (option_index, rect) in &layout.rows {
        let Some(option) = host.option_at(*option_index) else {
            continue;
        };
        let selected = control.is_selected(host, option);
        let highlighted = *option_index == control.highlighted();

        let style = if highlighted {
            Style::new().fg(TEXT_WHITE).bg(HIGHLIGHT_BG)
        } else if selected {
            Style::new().fg(TEXT_DARK).bg(SELECTED_BG)
        } else {
            Style::new().fg(TEXT_WHITE)
        };
        let marker = match (control.mode(), selected) {
            (Mode::Multiple, true) => "✓ ",
            _ => "  ",
        };

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::raw(marker),
                Span::raw(option.label.as_str()),
            ]))
            .style(style),
            *rect,
        );
        registry.register(
            InteractiveRegion::clickable("select_row", (*rect).into(), to_field(Intent::SelectOption(*option_index)))
                .with_hover(to_field(Intent::Highlight(*option_index)))
                .with_priority(priority::POPUP_ITEM),
        );
    }
}
