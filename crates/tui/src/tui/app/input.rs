use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{AddField, App, InputMode};
use crate::core::{EditKey, KeyValueStore};
use crate::tui::buffer::TextBuffer;
use crate::tui::constants::STATUS_HELP;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NormalAction {
    Quit,
    EnterAdd,
    EnterEdit,
    Toggle,
    Delete,
    ClearCompleted,
    ShowHelp,
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,
}

impl NormalAction {
    pub(crate) fn from_event(key: &KeyEvent) -> Option<Self> {
        if matches!(key.code, KeyCode::Char('c')) && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Self::Quit);
        }

        match key.code {
            KeyCode::Char('q') => Some(Self::Quit),
            KeyCode::Char('a') => Some(Self::EnterAdd),
            KeyCode::Char('e') => Some(Self::EnterEdit),
            KeyCode::Char(' ') | KeyCode::Enter => Some(Self::Toggle),
            KeyCode::Char('x') | KeyCode::Delete => Some(Self::Delete),
            KeyCode::Char('c') => Some(Self::ClearCompleted),
            KeyCode::Char('h') | KeyCode::Char('?') => Some(Self::ShowHelp),
            KeyCode::Char('j') | KeyCode::Down => Some(Self::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Self::SelectPrev),
            KeyCode::Home => Some(Self::SelectFirst),
            KeyCode::End => Some(Self::SelectLast),
            _ => None,
        }
    }
}

impl<S: KeyValueStore> App<S> {
    pub(crate) fn on_key(&mut self, key: KeyEvent) {
        match self.input_mode {
            InputMode::Normal => self.handle_normal_mode(key),
            InputMode::Add => self.handle_add_mode(key),
            InputMode::Edit => self.handle_edit_mode(key),
            InputMode::Help => self.handle_help_mode(key),
        }
    }

    fn handle_normal_mode(&mut self, key: KeyEvent) {
        if let Some(action) = NormalAction::from_event(&key) {
            self.execute_normal_action(action);
        }
    }

    fn execute_normal_action(&mut self, action: NormalAction) {
        match action {
            NormalAction::Quit => self.should_quit = true,
            NormalAction::EnterAdd => self.begin_add(),
            NormalAction::EnterEdit => self.edit_selected(),
            NormalAction::Toggle => self.toggle_selected(),
            NormalAction::Delete => self.delete_selected(),
            NormalAction::ClearCompleted => self.clear_completed(),
            NormalAction::ShowHelp => {
                self.input_mode = InputMode::Help;
                self.set_status_info(STATUS_HELP);
            }
            NormalAction::SelectNext => self.select_next(),
            NormalAction::SelectPrev => self.select_prev(),
            NormalAction::SelectFirst => self.select_first(),
            NormalAction::SelectLast => self.select_last(),
        }
    }

    fn handle_add_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_add(),
            KeyCode::Esc => self.cancel_add(),
            KeyCode::Tab | KeyCode::BackTab => self.add_field = self.add_field.toggle(),
            KeyCode::Char(c) if self.add_field == AddField::Due => {
                if c.is_ascii_digit() || c == ':' {
                    self.due_input.insert_char(c);
                }
            }
            _ => {
                let field = match self.add_field {
                    AddField::Text => &mut self.text_input,
                    AddField::Due => &mut self.due_input,
                };
                edit_buffer(field, key);
            }
        }
    }

    fn handle_edit_mode(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.finish_edit(EditKey::Submit),
            KeyCode::Esc => self.finish_edit(EditKey::Cancel),
            _ => edit_buffer(&mut self.edit_input, key),
        }
    }

    fn handle_help_mode(&mut self, key: KeyEvent) {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('h') | KeyCode::Char('?')
        ) {
            self.input_mode = InputMode::Normal;
            self.status = None;
        }
    }
}

fn edit_buffer(buffer: &mut TextBuffer, key: KeyEvent) {
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            buffer.insert_char(c);
        }
        KeyCode::Backspace => buffer.backspace(),
        KeyCode::Delete => buffer.delete_char(),
        KeyCode::Left => buffer.move_left(),
        KeyCode::Right => buffer.move_right(),
        KeyCode::Home => buffer.move_home(),
        KeyCode::End => buffer.move_end(),
        _ => {}
    }
}
