use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::select::Identity;
use super::components::{FIELD_HEIGHT, SelectLayout, render_select_field, render_select_popup};
use super::theme::*;

/// Widest a field box gets
const FIELD_MAX_WIDTH: u16 = 60;

/// Rows between field boxes
const FIELD_GAP: u16 = 1;

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    app.interactions.clear();

    // Main vertical layout: header, fields, hotkeys
    let main_layout = Layout::vertical([
        Constraint::Length(2), // Header + spacing
        Constraint::Min(0),    // Fields
        Constraint::Length(1), // Hotkeys
    ])
    .split(area);

    render_header(frame, main_layout[0], app);

    let areas = field_areas(main_layout[1], app.fields.len());
    let mut layouts = Vec::with_capacity(areas.len());

    for (index, (field, rect)) in app.fields.iter_mut().zip(&areas).enumerate() {
        field.control.sync_options(&field.host);
        let layout = SelectLayout::compute(*rect, area, &field.control, &field.host);
        let focused = app.focused == Some(index);
        render_select_field(frame, &layout, index, field, focused, &mut app.interactions);
        layouts.push(layout);
    }

    // Lists go on top of every field box
    for (index, (field, layout)) in app.fields.iter().zip(&layouts).enumerate() {
        render_select_popup(frame, layout, index, field, &mut app.interactions);
    }

    render_hotkeys(frame, main_layout[2]);
}

/// Stack field boxes top to bottom, centered, dropping those that do not fit.
pub fn field_areas(body: Rect, count: usize) -> Vec<Rect> {
    let width = body.width.min(FIELD_MAX_WIDTH);
    let x = body.x + (body.width - width) / 2;

    (0..count)
        .map(|i| body.y + i as u16 * (FIELD_HEIGHT + FIELD_GAP))
        .take_while(|y| y + FIELD_HEIGHT <= body.bottom())
        .map(|y| Rect::new(x, y, width, FIELD_HEIGHT))
        .collect()
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let identity = match app.config.identity {
        Identity::Key => "key",
        Identity::Reference => "reference",
    };
    let line = Line::from(vec![
        Span::styled("picklist", Style::new().fg(ACCENT_MINT).bold()),
        Span::styled("  identity: ", Style::new().fg(TEXT_DIM)),
        Span::styled(identity, Style::new().fg(ACCENT_LIGHT_BLUE)),
    ]);
    frame.render_widget(Paragraph::new(line).centered(), area);
}

fn render_hotkeys(frame: &mut Frame, area: Rect) {
    let hotkeys = [
        ("[Tab]", " focus · "),
        ("[Enter]", " open/select · "),
        ("[↑/↓]", " highlight · "),
        ("[Del]", " clear · "),
        ("[^R]", " reload · "),
        ("[Esc]", " close · "),
        ("[q]", " quit"),
    ];
    let spans: Vec<Span> = hotkeys
        .iter()
        .flat_map(|(key, label)| {
            [
                Span::styled(*key, Style::new().fg(TEXT_WHITE)),
                Span::styled(*label, Style::new().fg(TEXT_DIM)),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)).centered(), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    use crate::config::Config;
    use crate::events::Action;
    use crate::select::{Intent, SelectHost};

    fn draw(app: &mut App) {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
    }

    #[test]
    fn test_field_areas() {
        let areas = field_areas(Rect::new(0, 2, 100, 21), 3);
        assert_eq!(
            areas,
            vec![
                Rect::new(20, 2, 60, 3),
                Rect::new(20, 6, 60, 3),
                Rect::new(20, 10, 60, 3),
            ]
        );

        // Only two fit
        assert_eq!(field_areas(Rect::new(0, 0, 40, 7), 3).len(), 2);
    }

    #[test]
    fn test_closed_render_registers_field_regions() {
        let mut app = App::new(Config::default()).unwrap();
        draw(&mut app);

        assert_eq!(app.interactions.regions_named("select_field").count(), 2);
        assert_eq!(app.interactions.regions_named("select_clear").count(), 2);
        // Multiple field preselects one chip
        assert_eq!(app.interactions.regions_named("select_chip").count(), 1);
        assert_eq!(app.interactions.regions_named("select_row").count(), 0);
    }

    #[test]
    fn test_clear_click_while_open_keeps_list_open() {
        let mut app = App::new(Config::default()).unwrap();
        app.dispatch(Action::Field { field: 0, intent: Intent::ToggleVisibility });
        draw(&mut app);

        let clear = app.interactions.regions_named("select_clear").next().unwrap().bounds;
        let action = app.interactions.handle_click(clear.x + 1, clear.y).unwrap();
        assert_eq!(action, Action::Field { field: 0, intent: Intent::Clear });

        app.dispatch(action);
        assert!(app.fields[0].control.is_open());
        assert!(app.fields[0].host.value().is_empty());
    }

    #[test]
    fn test_open_list_covers_field_below() {
        let mut app = App::new(Config::default()).unwrap();
        app.dispatch(Action::Field { field: 0, intent: Intent::ToggleVisibility });
        draw(&mut app);

        assert_eq!(app.interactions.regions_named("select_row").count(), 5);

        // Second field box sits under the open list of the first one
        let second = app
            .interactions
            .regions_named("select_field")
            .nth(1)
            .unwrap()
            .bounds;
        let action = app.interactions.handle_click(second.x + 5, second.y + 1);
        assert!(matches!(
            action,
            Some(Action::Field { field: 0, intent: Intent::SelectOption(_) })
        ));
    }

    #[test]
    fn test_hover_and_click_row() {
        let mut app = App::new(Config::default()).unwrap();
        app.dispatch(Action::Field { field: 0, intent: Intent::ToggleVisibility });
        draw(&mut app);

        let row = app.interactions.regions_named("select_row").nth(2).unwrap().bounds;
        let hover = app.interactions.handle_hover(row.x, row.y).unwrap();
        app.dispatch(hover);
        assert_eq!(app.fields[0].control.highlighted(), 2);

        let click = app.interactions.handle_click(row.x, row.y).unwrap();
        app.dispatch(click);
        assert!(app.fields[0].control.is_open());
        let labels: Vec<&str> = app.fields[0]
            .host
            .value()
            .items()
            .iter()
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(labels, vec!["First", "Third"]);
    }
}
