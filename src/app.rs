use ratatui::layout::Rect;

use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::events::Action;
use crate::log;
use crate::select::{Intent, Mode, OptionRef, SelectControl, SelectHost, Selection};
use crate::tui::interaction::InteractionRegistry;

/// Screen rectangle used for hit testing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickRegion {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl ClickRegion {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && y >= self.y
            && x < self.x.saturating_add(self.width)
            && y < self.y.saturating_add(self.height)
    }
}

impl From<Rect> for ClickRegion {
    fn from(rect: Rect) -> Self {
        Self::new(rect.x, rect.y, rect.width, rect.height)
    }
}

/// Host side of one select field: the option list, the stored value and
/// the filter query that narrows the list.
#[derive(Debug, Clone)]
pub struct FieldHost {
    pub title: String,
    source: Vec<OptionRef>,
    /// Filtered view of `source`, rebuilt on every filter change
    options: Vec<OptionRef>,
    revision: u64,
    value: Selection,
    query: String,
}

impl FieldHost {
    pub fn new(title: impl Into<String>, source: Vec<OptionRef>, value: Selection) -> Self {
        let options = source.clone();
        Self {
            title: title.into(),
            source,
            options,
            revision: 0,
            value,
            query: String::new(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn push_query(&mut self, c: char) {
        self.query.push(c);
        self.refilter();
    }

    /// Returns false when the query was already empty.
    pub fn pop_query(&mut self) -> bool {
        if self.query.pop().is_none() {
            return false;
        }
        self.refilter();
        true
    }

    pub fn clear_query(&mut self) {
        if !self.query.is_empty() {
            self.query.clear();
            self.refilter();
        }
    }

    /// Swap in a rebuilt option list. The stored value is left untouched.
    pub fn replace_source(&mut self, source: Vec<OptionRef>) {
        self.source = source;
        self.refilter();
    }

    fn refilter(&mut self) {
        let needle = self.query.to_lowercase();
        self.options = self
            .source
            .iter()
            .filter(|o| o.label.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        self.revision += 1;
    }
}

impl SelectHost for FieldHost {
    fn options(&self) -> &[OptionRef] {
        &self.options
    }

    fn options_revision(&self) -> u64 {
        self.revision
    }

    fn value(&self) -> &Selection {
        &self.value
    }

    fn on_change(&mut self, value: Selection) {
        log::log_change(&self.title, &value.describe());
        self.value = value;
    }
}

/// A control paired with its host data
#[derive(Debug, Clone)]
pub struct SelectField {
    pub control: SelectControl,
    pub host: FieldHost,
}

pub struct App {
    pub config: Config,
    pub fields: Vec<SelectField>,
    pub focused: Option<usize>,
    pub interactions: InteractionRegistry,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let options = config.build_options();
        let mut fields = Vec::with_capacity(config.fields.len());

        for field in &config.fields {
            let mut initial = Vec::with_capacity(field.initial.len());
            for key in &field.initial {
                let option = options
                    .iter()
                    .find(|o| &o.key == key)
                    .ok_or_else(|| ConfigError::UnknownInitial(field.title.clone(), key.clone()))?;
                initial.push(option.clone());
            }

            let value = match field.mode {
                Mode::Single => Selection::Single(initial.into_iter().next()),
                Mode::Multiple => Selection::Multiple(initial),
            };

            let control = SelectControl::new(field.mode)
                .with_identity(config.identity)
                .with_options_change(config.on_options_change);
            let host = FieldHost::new(field.title.clone(), options.clone(), value);

            fields.push(SelectField { control, host });
        }

        let focused = if fields.is_empty() { None } else { Some(0) };

        Ok(Self {
            config,
            fields,
            focused,
            interactions: InteractionRegistry::new(),
            should_quit: false,
        })
    }

    /// Apply an action to application state.
    pub fn dispatch(&mut self, action: Action) {
        if action.is_loggable() {
            log::log_event(&format!("{:?}", action));
        }

        match action {
            Action::None => {}
            Action::Quit => self.should_quit = true,
            Action::FocusNext => self.cycle_focus(true),
            Action::FocusPrev => self.cycle_focus(false),
            Action::Blur => self.blur(),
            Action::Field { field, intent } => self.apply_intent(field, intent),
            Action::Filter(c) => {
                if let Some(field) = self.focused_field_mut() {
                    field.host.push_query(c);
                    field.control.sync_options(&field.host);
                    if !field.control.is_open() {
                        field.control.toggle_visibility();
                    }
                }
            }
            Action::FilterBackspace => {
                if let Some(field) = self.focused_field_mut() {
                    if field.host.pop_query() {
                        field.control.sync_options(&field.host);
                    }
                }
            }
            Action::ReloadOptions => self.reload_options(),
        }
    }

    /// Move focus to `index`, closing the previously focused field.
    pub fn focus(&mut self, index: usize) {
        if index >= self.fields.len() || self.focused == Some(index) {
            return;
        }
        self.blur();
        self.focused = Some(index);
    }

    /// Focus left the focused field: close it and drop its filter.
    pub fn blur(&mut self) {
        if let Some(field) = self.focused_field_mut() {
            field.control.close();
            field.host.clear_query();
            field.control.sync_options(&field.host);
        }
    }

    /// Rebuild every option as a fresh allocation, as a host would after
    /// refetching its data. Stored values keep their old options.
    pub fn reload_options(&mut self) {
        let options = self.config.build_options();
        for field in &mut self.fields {
            field.host.replace_source(options.clone());
            field.control.sync_options(&field.host);
        }
        log::log(&format!(
            "Reloaded {} options ({:?} identity)",
            options.len(),
            self.config.identity
        ));
    }

    fn apply_intent(&mut self, index: usize, intent: Intent) {
        if index >= self.fields.len() {
            log::log(&format!("Ignoring {:?} for unknown field {}", intent, index));
            return;
        }
        self.focus(index);

        let field = &mut self.fields[index];
        field.control.apply(intent, &mut field.host);
        if intent == Intent::Close {
            field.host.clear_query();
            field.control.sync_options(&field.host);
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let len = self.fields.len();
        if len == 0 {
            return;
        }
        let next = match (self.focused, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => i.checked_sub(1).unwrap_or(len - 1),
        };
        self.focus(next);
    }

    fn focused_field_mut(&mut self) -> Option<&mut SelectField> {
        self.focused.and_then(|i| self.fields.get_mut(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::{Identity, OptionsChange};

    fn app() -> App {
        App::new(Config::default()).unwrap()
    }

    fn labels(app: &App, field: usize) -> Vec<String> {
        app.fields[field]
            .host
            .value()
            .items()
            .iter()
            .map(|o| o.label.clone())
            .collect()
    }

    fn field_action(field: usize, intent: Intent) -> Action {
        Action::Field { field, intent }
    }

    #[test]
    fn test_click_region_contains() {
        let region = ClickRegion::new(10, 10, 20, 10);

        assert!(region.contains(10, 10));
        assert!(region.contains(29, 19));
        assert!(!region.contains(30, 20));
        assert!(!region.contains(9, 10));
    }

    #[test]
    fn test_default_fields() {
        let app = app();
        assert_eq!(app.fields.len(), 2);
        assert_eq!(app.focused, Some(0));
        assert_eq!(labels(&app, 0), vec!["First"]);
        assert_eq!(labels(&app, 1), vec!["First"]);
        assert_eq!(app.fields[1].control.mode(), Mode::Single);
    }

    #[test]
    fn test_unknown_initial_is_rejected() {
        let mut config = Config::default();
        config.fields[0].initial = vec!["Sixth".to_string()];

        assert!(App::new(config).is_err());
    }

    #[test]
    fn test_dispatch_select_and_deselect() {
        let mut app = app();

        app.dispatch(field_action(0, Intent::SelectOption(1)));
        assert_eq!(labels(&app, 0), vec!["First", "Second"]);

        app.dispatch(field_action(0, Intent::DeselectChip(0)));
        assert_eq!(labels(&app, 0), vec!["Second"]);
    }

    #[test]
    fn test_acting_on_other_field_blurs_focused() {
        let mut app = app();

        app.dispatch(field_action(0, Intent::ToggleVisibility));
        assert!(app.fields[0].control.is_open());

        app.dispatch(field_action(1, Intent::ToggleVisibility));
        assert_eq!(app.focused, Some(1));
        assert!(!app.fields[0].control.is_open());
        assert!(app.fields[1].control.is_open());
    }

    #[test]
    fn test_blur_closes_and_keeps_focus() {
        let mut app = app();

        app.dispatch(field_action(1, Intent::ToggleVisibility));
        app.dispatch(Action::Blur);
        assert!(!app.fields[1].control.is_open());
        assert_eq!(app.focused, Some(1));
    }

    #[test]
    fn test_focus_cycle_wraps() {
        let mut app = app();

        app.dispatch(field_action(0, Intent::ToggleVisibility));
        app.dispatch(Action::FocusNext);
        assert_eq!(app.focused, Some(1));
        assert!(!app.fields[0].control.is_open());

        app.dispatch(Action::FocusNext);
        assert_eq!(app.focused, Some(0));
        app.dispatch(Action::FocusPrev);
        assert_eq!(app.focused, Some(1));
    }

    #[test]
    fn test_filter_narrows_and_resets_highlight() {
        let mut app = app();

        app.dispatch(field_action(0, Intent::ToggleVisibility));
        app.dispatch(field_action(0, Intent::Highlight(4)));

        app.dispatch(Action::Filter('f'));
        let field = &app.fields[0];
        let shown: Vec<&str> = field.host.options().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(shown, vec!["First", "Fourth", "Fifth"]);
        assert_eq!(field.control.highlighted(), 0);
        assert!(field.control.is_open());

        // Row indices now refer to the filtered list
        app.dispatch(field_action(0, Intent::SelectOption(2)));
        assert_eq!(labels(&app, 0), vec!["First", "Fifth"]);

        app.dispatch(Action::FilterBackspace);
        assert_eq!(app.fields[0].host.options().len(), 5);
        assert_eq!(app.fields[0].host.query(), "");
    }

    #[test]
    fn test_filter_keeps_list_open_under_reset_policy() {
        let mut config = Config::default();
        config.on_options_change = OptionsChange::Reset;
        let mut app = App::new(config).unwrap();

        app.dispatch(field_action(0, Intent::ToggleVisibility));
        app.dispatch(field_action(0, Intent::Highlight(3)));
        app.dispatch(Action::Filter('f'));

        let field = &app.fields[0];
        assert!(field.control.is_open());
        assert_eq!(field.control.highlighted(), 0);
        assert_eq!(field.host.options().len(), 3);

        // A closed field opens on the first keystroke too
        app.dispatch(field_action(0, Intent::Close));
        app.dispatch(Action::Filter('t'));
        assert!(app.fields[0].control.is_open());
    }

    #[test]
    fn test_filter_opens_closed_field() {
        let mut app = app();

        app.dispatch(Action::Filter('t'));
        assert!(app.fields[0].control.is_open());
        assert_eq!(app.fields[0].host.query(), "t");
    }

    #[test]
    fn test_close_drops_filter() {
        let mut app = app();

        app.dispatch(Action::Filter('x'));
        assert!(app.fields[0].host.options().is_empty());

        app.dispatch(field_action(0, Intent::Close));
        assert_eq!(app.fields[0].host.query(), "");
        assert_eq!(app.fields[0].host.options().len(), 5);
    }

    #[test]
    fn test_reload_with_key_identity_keeps_matches() {
        let mut app = app();
        app.dispatch(Action::ReloadOptions);

        let field = &app.fields[1];
        let first = field.host.options()[0].clone();
        assert!(field.control.is_selected(&field.host, &first));

        // Re-selecting the reloaded "First" is still a no-op
        app.dispatch(field_action(1, Intent::SelectOption(0)));
        assert_eq!(labels(&app, 1), vec!["First"]);
    }

    #[test]
    fn test_reload_with_reference_identity_loses_matches() {
        let mut config = Config::default();
        config.identity = Identity::Reference;
        let mut app = App::new(config).unwrap();

        app.dispatch(Action::ReloadOptions);

        let field = &app.fields[0];
        let first = field.host.options()[0].clone();
        assert!(!field.control.is_selected(&field.host, &first));

        app.dispatch(field_action(0, Intent::SelectOption(0)));
        assert_eq!(labels(&app, 0), vec!["First", "First"]);
    }

    #[test]
    fn test_unknown_field_is_ignored() {
        let mut app = app();
        app.dispatch(field_action(7, Intent::Clear));
        assert_eq!(app.focused, Some(0));
        assert_eq!(labels(&app, 0), vec!["First"]);
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        app.dispatch(Action::Quit);
        assert!(app.should_quit);
    }
}
