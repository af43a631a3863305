use crate::{
    cli::Cli,
    config::Config,
    document::Document,
    error::PersistError,
    event::{AppEvent, AppSender, Event, EventHandler},
    file_browser::FileBrowser,
    file_ops::{self, DialogOutcome},
    history_filter::{FilteredEntry, HistoryFilter},
    history_store::HistoryStore,
    list_view_state::ListViewState,
    menu::{MenuBus, MenuCommand, Subscription},
    persistence::{HistoryBackend, JsonFileBackend, MemoryBackend},
};
use ratatui::{
    DefaultTerminal,
    crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
};
use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};
use tui_input::{Input, InputRequest};

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Editor,
    History,
}

/// Popups drawn on top of the main view. Only one is active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    OpenDialog,
    SaveAsPrompt,
    Message(String),
    Error(String),
}

/// Application.
#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub events: EventHandler,
    pub document: Document,
    pub history: HistoryStore,
    pub history_filter: HistoryFilter,
    /// Selection over the filtered history rows.
    pub history_view: ListViewState,
    pub history_visible: bool,
    /// True while the history search query is being typed.
    pub history_search_active: bool,
    pub focus: Focus,
    pub overlay: Option<Overlay>,
    pub file_browser: Option<FileBrowser>,
    /// Text input shared by the history search and the save-as prompt.
    pub input: Input,
    pub help_visible: bool,
    pub menu: MenuBus,
    /// Menu listeners, released when the app is dropped.
    menu_subscriptions: Vec<Subscription>,
    /// Last rendered editor height, used for paging.
    pub editor_height: Cell<usize>,
}

/// Picks the history backend from the command line and configuration.
pub fn history_backend(args: &Cli, config: &Config) -> Result<Arc<dyn HistoryBackend>, PersistError> {
    if args.no_history {
        return Ok(Arc::new(MemoryBackend::new()));
    }
    let backend = match args.history_file.as_ref().or(config.history.file.as_ref()) {
        Some(path) => JsonFileBackend::new(path),
        None => JsonFileBackend::in_config_dir()?,
    };
    info!("Using history file {:?}", backend.path());
    Ok(Arc::new(backend))
}

impl App {
    /// Constructs the application, loading the file history first.
    pub async fn new(args: Cli, config: Config) -> Self {
        let options = config.history.options();
        let events = EventHandler::new();

        let mut startup_error = None;
        let history = match history_backend(&args, &config) {
            Ok(backend) => match HistoryStore::load(backend.clone(), options).await {
                Ok(store) => store,
                Err(e) => {
                    error!("Failed to load file history: {}", e);
                    startup_error = Some(format!("Failed to load file history:\n{}", e));
                    HistoryStore::empty(backend, options)
                }
            },
            Err(e) => {
                error!("File history unavailable: {}", e);
                startup_error = Some(format!("File history unavailable:\n{}", e));
                HistoryStore::empty(Arc::new(MemoryBackend::new()), options)
            }
        };

        let mut app = Self::with_history(history, events);
        if let Some(message) = startup_error {
            app.overlay = Some(Overlay::Error(message));
        }
        if let Some(file) = args.file {
            app.open_path(&file);
        }
        app
    }

    /// Builds an app around an already loaded history.
    pub fn with_history(history: HistoryStore, events: EventHandler) -> Self {
        let sender = events.app_sender();
        let history = history.on_save_error(Arc::new({
            let sender = sender.clone();
            move |e: &PersistError| sender.send(AppEvent::HistorySaveFailed(e.to_string()))
        }));

        let menu = MenuBus::new();
        let menu_subscriptions = subscribe_menu(&menu, &sender);

        let mut app = Self {
            running: true,
            events,
            document: Document::new(),
            history,
            history_filter: HistoryFilter::new(),
            history_view: ListViewState::new(),
            history_visible: true,
            history_search_active: false,
            focus: Focus::Editor,
            overlay: None,
            file_browser: None,
            input: Input::default(),
            help_visible: false,
            menu,
            menu_subscriptions,
            editor_height: Cell::new(0),
        };
        app.sync_history_view();
        app
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        while self.running {
            terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;
            match self.events.next().await? {
                Event::Tick => self.tick(),
                Event::Crossterm(event) => {
                    if let ratatui::crossterm::event::Event::Key(key_event) = event {
                        self.handle_key_events(key_event)?;
                    }
                }
                Event::App(app_event) => self.handle_app_event(app_event),
            }
        }
        Ok(())
    }

    /// Handles all queued app events without waiting for new ones.
    pub fn process_pending_events(&mut self) {
        while let Some(event) = self.events.try_next() {
            if let Event::App(app_event) = event {
                self.handle_app_event(app_event);
            }
        }
    }

    /// Applies an app event to the state.
    pub fn handle_app_event(&mut self, app_event: AppEvent) {
        match app_event {
            AppEvent::Quit => self.quit(),
            AppEvent::OpenFile => self.show_open_dialog(),
            AppEvent::SaveFile => self.save(),
            AppEvent::SaveFileAs => self.show_save_as_prompt(),
            AppEvent::Confirm => self.confirm(),
            AppEvent::Cancel => self.cancel(),
            AppEvent::MoveUp => self.move_selection(|view| view.move_up(), |browser| browser.move_up()),
            AppEvent::MoveDown => self.move_selection(|view| view.move_down(), |browser| browser.move_down()),
            AppEvent::PageUp => self.move_selection(|view| view.page_up(), |browser| browser.page_up()),
            AppEvent::PageDown => self.move_selection(|view| view.page_down(), |browser| browser.page_down()),
            AppEvent::ToggleHistory => {
                // Focus the sidebar first, hide it when already focused
                if self.history_visible && self.focus == Focus::History {
                    self.history_visible = false;
                    self.focus = Focus::Editor;
                } else {
                    self.history_visible = true;
                    self.focus = Focus::History;
                }
                self.history_search_active = false;
            }
            AppEvent::SwitchFocus => {
                self.focus = match self.focus {
                    Focus::Editor if self.history_visible => Focus::History,
                    _ => Focus::Editor,
                };
                self.history_search_active = false;
            }
            AppEvent::ActivateHistorySearch => {
                self.history_visible = true;
                self.focus = Focus::History;
                self.history_search_active = true;
                self.input = Input::new(self.history_filter.query().to_string());
            }
            AppEvent::RemoveHistoryEntry => self.remove_selected_history_entry(),
            AppEvent::CopyHistoryPath => self.copy_selected_history_path(),
            AppEvent::CycleFileFilter => {
                if let Some(browser) = self.file_browser.as_mut()
                    && let Err(e) = browser.cycle_filter()
                {
                    self.file_browser = None;
                    self.overlay = Some(Overlay::Error(e.to_string()));
                }
            }
            AppEvent::ParentDirectory => {
                if let Some(browser) = self.file_browser.as_mut()
                    && let Err(e) = browser.go_up()
                {
                    warn!("Cannot leave {:?}: {}", browser.cwd(), e);
                }
            }
            AppEvent::ToggleHelp => self.help_visible = !self.help_visible,
            AppEvent::HistorySaveFailed(message) => {
                self.overlay = Some(Overlay::Error(format!("Failed to save file history:\n{}", message)));
            }
        }
    }

    /// Returns the filtered history rows, most recent first.
    pub fn visible_history(&self) -> Vec<FilteredEntry<'_>> {
        let mut entries = self.history_filter.entries(self.history.records());
        entries.reverse();
        entries
    }

    /// Original history index of the selected sidebar row.
    pub fn selected_history_index(&self) -> Option<usize> {
        self.visible_history()
            .get(self.history_view.selected_index())
            .map(|entry| entry.original_index)
    }

    /// Recomputes the sidebar rows and moves the selection to the current record.
    fn sync_history_view(&mut self) {
        let rows = self.visible_history();
        let current_row = self
            .history
            .current_index()
            .and_then(|current| rows.iter().position(|e| e.original_index == current));
        let count = rows.len();

        self.history_view.set_item_count(count);
        if let Some(row) = current_row {
            self.history_view.select_index(row);
        }
    }

    /// Opens `path` in the editor and records it in the history.
    pub fn open_path(&mut self, path: &Path) {
        match file_ops::read_file(path) {
            Ok(opened) => {
                let key = opened.path.to_string_lossy().to_string();
                self.document.load(opened.path, &opened.content);
                self.history.add(&key);
                self.sync_history_view();
                self.focus = Focus::Editor;
            }
            Err(e) => {
                error!("Error opening file: {}", e);
                self.overlay = Some(Overlay::Error(format!("Failed to open file:\n{}", e)));
            }
        }
    }

    fn show_open_dialog(&mut self) {
        let start = self
            .document
            .path()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));

        match FileBrowser::open(&start) {
            Ok(browser) => {
                self.file_browser = Some(browser);
                self.overlay = Some(Overlay::OpenDialog);
            }
            Err(e) => self.overlay = Some(Overlay::Error(e.to_string())),
        }
    }

    fn show_save_as_prompt(&mut self) {
        let suggested = file_ops::suggested_save_path(self.document.path());
        self.input = Input::new(suggested.to_string_lossy().to_string());
        self.overlay = Some(Overlay::SaveAsPrompt);
    }

    /// Saves to the current path, or asks for one.
    fn save(&mut self) {
        let Some(path) = self.document.path().map(Path::to_path_buf) else {
            self.show_save_as_prompt();
            return;
        };
        match file_ops::save_file(&path, &self.document.content()) {
            Ok(()) => {
                self.document.mark_saved(path);
                self.overlay = Some(Overlay::Message("File saved successfully!".to_string()));
            }
            Err(e) => {
                error!("Error saving file: {}", e);
                self.overlay = Some(Overlay::Error(format!("Failed to save file:\n{}", e)));
            }
        }
    }

    fn save_as(&mut self, outcome: DialogOutcome<PathBuf>) {
        let DialogOutcome::Picked(path) = outcome else {
            return;
        };
        match file_ops::save_file_as(&path, &self.document.content()) {
            Ok(saved) => {
                self.document.mark_saved(saved);
                self.overlay = Some(Overlay::Message("File saved successfully!".to_string()));
            }
            Err(e) => {
                error!("Error saving file: {}", e);
                self.overlay = Some(Overlay::Error(format!("Failed to save file:\n{}", e)));
            }
        }
    }

    fn confirm(&mut self) {
        match self.overlay {
            Some(Overlay::OpenDialog) => {
                let picked = match self.file_browser.as_mut().map(|browser| browser.activate()) {
                    Some(Ok(picked)) => picked,
                    Some(Err(e)) => {
                        self.file_browser = None;
                        self.overlay = Some(Overlay::Error(e.to_string()));
                        return;
                    }
                    None => None,
                };
                if let Some(path) = picked {
                    self.close_overlay();
                    self.open_path(&path);
                }
            }
            Some(Overlay::SaveAsPrompt) => {
                let value = self.input.value().trim().to_string();
                self.close_overlay();
                let outcome = if value.is_empty() {
                    DialogOutcome::Cancelled
                } else {
                    DialogOutcome::Picked(PathBuf::from(value))
                };
                self.save_as(outcome);
            }
            Some(Overlay::Message(_)) | Some(Overlay::Error(_)) => self.close_overlay(),
            None if self.focus == Focus::History => {
                if self.history_search_active {
                    self.history_search_active = false;
                } else {
                    self.open_selected_history_entry();
                }
            }
            None => {}
        }
    }

    fn cancel(&mut self) {
        if self.help_visible {
            self.help_visible = false;
            return;
        }
        if self.overlay.is_some() {
            self.close_overlay();
            return;
        }
        if self.focus == Focus::History {
            if self.history_search_active || self.history_filter.is_active() {
                self.history_search_active = false;
                self.history_filter.clear();
                self.input.reset();
                self.sync_history_view();
            } else {
                self.focus = Focus::Editor;
            }
        }
    }

    fn close_overlay(&mut self) {
        if self.overlay == Some(Overlay::OpenDialog) {
            self.file_browser = None;
        }
        self.overlay = None;
    }

    fn move_selection(&mut self, on_history: impl FnOnce(&mut ListViewState), on_browser: impl FnOnce(&mut FileBrowser)) {
        match self.overlay {
            Some(Overlay::OpenDialog) => {
                if let Some(browser) = self.file_browser.as_mut() {
                    on_browser(browser);
                }
            }
            None if self.focus == Focus::History => on_history(&mut self.history_view),
            _ => {}
        }
    }

    fn open_selected_history_entry(&mut self) {
        let Some(index) = self.selected_history_index() else {
            return;
        };
        let Some(path) = self.history.select(index).map(|record| PathBuf::from(&record.path)) else {
            return;
        };
        self.open_path(&path);
    }

    fn remove_selected_history_entry(&mut self) {
        if let Some(index) = self.selected_history_index() {
            self.history.remove(index);
            self.sync_history_view();
        }
    }

    fn copy_selected_history_path(&mut self) {
        let Some(path) = self
            .selected_history_index()
            .and_then(|index| self.history.records().get(index))
            .map(|record| record.path.clone())
        else {
            return;
        };

        let result = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(path.clone()));
        self.overlay = Some(match result {
            Ok(()) => Overlay::Message(format!("Copied to clipboard:\n{}", path)),
            Err(e) => Overlay::Error(format!("Failed to copy to clipboard:\n{}", e)),
        });
    }

    /// Applies an edit to the shared text input.
    fn edit_input(&mut self, key_event: KeyEvent) {
        let request = match key_event.code {
            KeyCode::Char(c) => InputRequest::InsertChar(c),
            KeyCode::Backspace => InputRequest::DeletePrevChar,
            KeyCode::Delete => InputRequest::DeleteNextChar,
            KeyCode::Left => InputRequest::GoToPrevChar,
            KeyCode::Right => InputRequest::GoToNextChar,
            KeyCode::Home => InputRequest::GoToStart,
            KeyCode::End => InputRequest::GoToEnd,
            _ => return,
        };
        self.input.handle(request);

        if self.history_search_active && self.overlay.is_none() {
            self.history_filter.set_query(self.input.value());
            self.history_view.reset();
            self.sync_history_view();
        }
    }

    /// Handles the key events and updates the state of [`App`].
    pub fn handle_key_events(&mut self, key_event: KeyEvent) -> color_eyre::Result<()> {
        if key_event.kind == KeyEventKind::Release {
            return Ok(());
        }

        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
        let shift = key_event.modifiers.contains(KeyModifiers::SHIFT);

        // Global keybindings
        match key_event.code {
            KeyCode::Char('c') if ctrl => {
                self.events.send(AppEvent::Quit);
                return Ok(());
            }
            KeyCode::Char('q') if ctrl => {
                self.menu.emit(MenuCommand::Quit);
                return Ok(());
            }
            KeyCode::Char('o') if ctrl => {
                self.menu.emit(MenuCommand::Open);
                return Ok(());
            }
            KeyCode::Char('s') | KeyCode::Char('S') if ctrl && shift => {
                self.menu.emit(MenuCommand::SaveAs);
                return Ok(());
            }
            KeyCode::Char('s') if ctrl => {
                self.menu.emit(MenuCommand::Save);
                return Ok(());
            }
            KeyCode::F(12) => {
                self.menu.emit(MenuCommand::SaveAs);
                return Ok(());
            }
            KeyCode::Char('r') if ctrl => {
                self.events.send(AppEvent::ToggleHistory);
                return Ok(());
            }
            KeyCode::F(1) => {
                self.events.send(AppEvent::ToggleHelp);
                return Ok(());
            }
            _ => {}
        }

        if self.help_visible {
            if key_event.code == KeyCode::Esc {
                self.events.send(AppEvent::Cancel);
            }
            return Ok(());
        }

        match self.overlay {
            Some(Overlay::OpenDialog) => match key_event.code {
                KeyCode::Esc => self.events.send(AppEvent::Cancel),
                KeyCode::Enter => self.events.send(AppEvent::Confirm),
                KeyCode::Up => self.events.send(AppEvent::MoveUp),
                KeyCode::Down => self.events.send(AppEvent::MoveDown),
                KeyCode::PageUp => self.events.send(AppEvent::PageUp),
                KeyCode::PageDown => self.events.send(AppEvent::PageDown),
                KeyCode::Tab => self.events.send(AppEvent::CycleFileFilter),
                KeyCode::Backspace | KeyCode::Left => self.events.send(AppEvent::ParentDirectory),
                KeyCode::Right => self.events.send(AppEvent::Confirm),
                _ => {}
            },
            Some(Overlay::SaveAsPrompt) => match key_event.code {
                KeyCode::Esc => self.events.send(AppEvent::Cancel),
                KeyCode::Enter => self.events.send(AppEvent::Confirm),
                _ => self.edit_input(key_event),
            },
            Some(Overlay::Message(_)) | Some(Overlay::Error(_)) => match key_event.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') => self.events.send(AppEvent::Cancel),
                _ => {}
            },
            None => match self.focus {
                Focus::History if self.history_search_active => match key_event.code {
                    KeyCode::Esc => self.events.send(AppEvent::Cancel),
                    KeyCode::Enter => self.events.send(AppEvent::Confirm),
                    KeyCode::Up => self.events.send(AppEvent::MoveUp),
                    KeyCode::Down => self.events.send(AppEvent::MoveDown),
                    _ => self.edit_input(key_event),
                },
                Focus::History => match key_event.code {
                    KeyCode::Esc => self.events.send(AppEvent::Cancel),
                    KeyCode::Enter => self.events.send(AppEvent::Confirm),
                    KeyCode::Up | KeyCode::Char('k') => self.events.send(AppEvent::MoveUp),
                    KeyCode::Down | KeyCode::Char('j') => self.events.send(AppEvent::MoveDown),
                    KeyCode::PageUp => self.events.send(AppEvent::PageUp),
                    KeyCode::PageDown => self.events.send(AppEvent::PageDown),
                    KeyCode::Char('/') => self.events.send(AppEvent::ActivateHistorySearch),
                    KeyCode::Delete | KeyCode::Char('d') => self.events.send(AppEvent::RemoveHistoryEntry),
                    KeyCode::Char('y') => self.events.send(AppEvent::CopyHistoryPath),
                    KeyCode::Tab => self.events.send(AppEvent::SwitchFocus),
                    _ => {}
                },
                Focus::Editor => self.handle_editor_key(key_event),
            },
        }
        Ok(())
    }

    fn handle_editor_key(&mut self, key_event: KeyEvent) {
        let page = self.editor_height.get().saturating_sub(1);
        match key_event.code {
            KeyCode::Tab if self.history_visible => self.events.send(AppEvent::SwitchFocus),
            KeyCode::Char(c) => self.document.insert_char(c),
            KeyCode::Enter => self.document.insert_newline(),
            KeyCode::Backspace => self.document.backspace(),
            KeyCode::Delete => self.document.delete(),
            KeyCode::Left => self.document.move_left(),
            KeyCode::Right => self.document.move_right(),
            KeyCode::Up => self.document.move_up(),
            KeyCode::Down => self.document.move_down(),
            KeyCode::Home => self.document.move_line_start(),
            KeyCode::End => self.document.move_line_end(),
            KeyCode::PageUp => self.document.page_up(page),
            KeyCode::PageDown => self.document.page_down(page),
            _ => {}
        }
    }

    /// Handles the tick event of the terminal.
    pub fn tick(&self) {}

    /// Writes pending history changes and stops the main loop.
    pub fn quit(&mut self) {
        if let Err(e) = self.history.flush() {
            error!("Failed to save file history on exit: {}", e);
        }
        self.running = false;
    }

    /// Number of active menu listeners owned by the app.
    pub fn menu_subscription_count(&self) -> usize {
        self.menu_subscriptions.len()
    }
}

/// Forwards menu commands into the app event queue.
fn subscribe_menu(menu: &MenuBus, sender: &AppSender) -> Vec<Subscription> {
    [
        (MenuCommand::Open, AppEvent::OpenFile),
        (MenuCommand::Save, AppEvent::SaveFile),
        (MenuCommand::SaveAs, AppEvent::SaveFileAs),
        (MenuCommand::Quit, AppEvent::Quit),
    ]
    .into_iter()
    .map(|(command, app_event)| {
        let sender = sender.clone();
        menu.subscribe(command, move || sender.send(app_event.clone()))
    })
    .collect()
}
