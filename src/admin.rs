//! Admin screen state: game list management behind the admin password.
//! The screen owns its keys; only the global secret/debug handling runs
//! before these.

use crate::input::{Key, KeyPress};
use crate::registry::{GameId, Registry};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminMode {
    List,
    Edit,
    ConfirmDelete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditField {
    Title,
    Executable,
    Args,
    Embedded,
}

impl EditField {
    pub const ALL: [EditField; 4] = [
        EditField::Title,
        EditField::Executable,
        EditField::Args,
        EditField::Embedded,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EditField::Title => "Title",
            EditField::Executable => "Executable",
            EditField::Args => "Arguments",
            EditField::Embedded => "Embedded",
        }
    }

    fn next(self) -> Self {
        match self {
            EditField::Title => EditField::Executable,
            EditField::Executable => EditField::Args,
            EditField::Args => EditField::Embedded,
            EditField::Embedded => EditField::Embedded,
        }
    }

    fn prev(self) -> Self {
        match self {
            EditField::Title => EditField::Title,
            EditField::Executable => EditField::Title,
            EditField::Args => EditField::Executable,
            EditField::Embedded => EditField::Args,
        }
    }
}

#[derive(Clone, Debug)]
pub struct EditForm {
    /// `None` means a new game is being added.
    pub id: Option<GameId>,
    pub title: String,
    pub executable: String,
    pub args: String,
    pub embedded: bool,
    pub field: EditField,
    pub editing: bool,
    pub error: Option<String>,
    backup: String,
}

impl EditForm {
    fn empty() -> Self {
        Self {
            id: None,
            title: String::new(),
            executable: String::new(),
            args: String::new(),
            embedded: false,
            field: EditField::Title,
            editing: false,
            error: None,
            backup: String::new(),
        }
    }

    pub fn value(&self, field: EditField) -> String {
        match field {
            EditField::Title => self.title.clone(),
            EditField::Executable => self.executable.clone(),
            EditField::Args => self.args.clone(),
            EditField::Embedded => if self.embedded { "yes" } else { "no" }.to_string(),
        }
    }

    fn value_mut(&mut self) -> Option<&mut String> {
        match self.field {
            EditField::Title => Some(&mut self.title),
            EditField::Executable => Some(&mut self.executable),
            EditField::Args => Some(&mut self.args),
            EditField::Embedded => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminOutcome {
    Stay,
    Leave,
}

pub struct AdminState {
    pub selected: usize,
    pub mode: AdminMode,
    pub form: Option<EditForm>,
}

impl AdminState {
    pub fn new() -> Self {
        Self {
            selected: 0,
            mode: AdminMode::List,
            form: None,
        }
    }

    pub fn handle_key(&mut self, press: &KeyPress, registry: &mut Registry) -> AdminOutcome {
        match self.mode {
            AdminMode::List => self.handle_list_key(press, registry),
            AdminMode::ConfirmDelete => {
                self.handle_confirm_key(press, registry);
                AdminOutcome::Stay
            }
            AdminMode::Edit => {
                self.handle_edit_key(press, registry);
                AdminOutcome::Stay
            }
        }
    }

    fn handle_list_key(&mut self, press: &KeyPress, registry: &mut Registry) -> AdminOutcome {
        use crate::input::dispatcher::Catalog as _;

        match press.key {
            Key::Escape | Key::Char('q') => return AdminOutcome::Leave,
            Key::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            Key::Down => {
                if !registry.is_empty() {
                    self.selected = (self.selected + 1).min(registry.len() - 1);
                }
            }
            Key::Char('a') => {
                self.form = Some(EditForm::empty());
                self.mode = AdminMode::Edit;
            }
            Key::Enter | Key::Char('e') => {
                if let Some(game) = registry.games().get(self.selected) {
                    self.form = Some(EditForm {
                        id: Some(game.id),
                        title: game.title.clone(),
                        executable: game.executable.to_string_lossy().to_string(),
                        args: game.args.join(" "),
                        embedded: game.embedded,
                        field: EditField::Title,
                        editing: false,
                        error: None,
                        backup: String::new(),
                    });
                    self.mode = AdminMode::Edit;
                }
            }
            Key::Char('d') | Key::Delete => {
                if !registry.is_empty() {
                    self.mode = AdminMode::ConfirmDelete;
                }
            }
            _ => {}
        }
        AdminOutcome::Stay
    }

    fn handle_confirm_key(&mut self, press: &KeyPress, registry: &mut Registry) {
        use crate::input::dispatcher::Catalog as _;

        match press.key {
            Key::Char('y') => {
                if let Some(game) = registry.games().get(self.selected) {
                    let id = game.id;
                    registry.remove(id);
                }
                if !registry.is_empty() {
                    self.selected = self.selected.min(registry.len() - 1);
                } else {
                    self.selected = 0;
                }
                self.mode = AdminMode::List;
            }
            Key::Char('n') | Key::Escape => {
                self.mode = AdminMode::List;
            }
            _ => {}
        }
    }

    fn handle_edit_key(&mut self, press: &KeyPress, registry: &mut Registry) {
        let Some(ref mut form) = self.form else {
            self.mode = AdminMode::List;
            return;
        };

        if form.editing {
            match press.key {
                Key::Enter => {
                    form.editing = false;
                }
                Key::Escape => {
                    let backup = form.backup.clone();
                    if let Some(value) = form.value_mut() {
                        *value = backup;
                    }
                    form.editing = false;
                }
                Key::Backspace => {
                    if let Some(value) = form.value_mut() {
                        value.pop();
                    }
                }
                Key::Char(ch) if !press.ctrl && !press.alt => {
                    if let Some(value) = form.value_mut() {
                        value.push(ch);
                    }
                    form.error = None;
                }
                _ => {}
            }
            return;
        }

        match press.key {
            Key::Up => form.field = form.field.prev(),
            Key::Down | Key::Tab => form.field = form.field.next(),
            Key::Enter => {
                if form.field == EditField::Embedded {
                    form.embedded = !form.embedded;
                } else {
                    form.backup = form.value(form.field);
                    form.editing = true;
                }
            }
            Key::Char('s') => self.save_form(registry),
            Key::Escape | Key::Char('q') => {
                self.form = None;
                self.mode = AdminMode::List;
            }
            _ => {}
        }
    }

    fn save_form(&mut self, registry: &mut Registry) {
        let Some(ref mut form) = self.form else {
            return;
        };

        let title = form.title.trim().to_string();
        let executable = form.executable.trim().to_string();
        if title.is_empty() {
            form.error = Some("Title is required".to_string());
            return;
        }
        if executable.is_empty() {
            form.error = Some("Executable path is required".to_string());
            return;
        }
        let args: Vec<String> = form.args.split_whitespace().map(str::to_string).collect();

        match form.id {
            Some(id) => {
                let mut game = crate::registry::Game::new(id, &title, executable.into());
                game.args = args;
                game.embedded = form.embedded;
                registry.replace(game);
            }
            None => {
                registry.add(&title, executable.into(), args, form.embedded);
            }
        }

        self.form = None;
        self.mode = AdminMode::List;
    }
}
