use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, info};
use reqwest::StatusCode;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::app::state::{BrowseState, SharedApi, Tab};
use crate::error::Result;
use crate::favorites::add_favorite;
use crate::listing::{Listing, ListingId};
use crate::notice::Notice;
use crate::pagination::{LoadOutcome, PageRequest};
use crate::ui::{render_browser, TerminalGuard};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Results of spawned API calls, applied by the UI loop in arrival order.
enum TaskMessage {
    Page(PageRequest, Result<Vec<Listing>>),
    Favorites(Result<Vec<Listing>>),
    Removed(ListingId, Result<StatusCode>),
    Added(Notice),
}

enum Flow {
    Continue,
    Quit,
}

/// Drives the interactive browser: key handling, spawned fetches, and redraws.
pub struct AppController {
    api: SharedApi,
    state: BrowseState,
    tx: UnboundedSender<TaskMessage>,
    rx: UnboundedReceiver<TaskMessage>,
}

impl AppController {
    pub fn new(api: SharedApi, page_size: usize) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: BrowseState::new(api.clone(), page_size),
            api,
            tx,
            rx,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let mut guard = TerminalGuard::new()?;
        info!("Browser started");

        loop {
            self.drain_messages();

            if self.state.wants_next_page() {
                self.spawn_next_page();
            }

            let state = &mut self.state;
            guard.terminal_mut().draw(|f| render_browser(f, state))?;

            if event::poll(POLL_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if let Flow::Quit = self.handle_key(key) {
                        break;
                    }
                }
            }
        }

        guard.restore()?;
        info!("Browser closed");
        Ok(())
    }

    fn drain_messages(&mut self) {
        while let Ok(message) = self.rx.try_recv() {
            match message {
                TaskMessage::Page(request, result) => {
                    if let LoadOutcome::Failed(reason) = self.state.paginator.complete(request, result)
                    {
                        self.state.stalled = Some(reason);
                    }
                }
                TaskMessage::Favorites(result) => {
                    // failures are logged by `complete_refresh`; the stale list stays visible
                    let _ = self.state.favorites.complete_refresh(result);
                }
                TaskMessage::Removed(id, result) => {
                    let notice = self.state.favorites.complete_remove(id, result);
                    self.state.notice = Some(notice);
                }
                TaskMessage::Added(notice) => {
                    self.state.notice = Some(notice);
                }
            }
            self.state.clamp_cursors();
        }
    }

    fn spawn_next_page(&mut self) {
        let Some(request) = self.state.paginator.begin_fetch() else {
            return;
        };
        debug!("Requesting page at offset {}", request.offset);
        let task = self.state.paginator.fetch_task(request);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let (request, result) = task.await;
            let _ = tx.send(TaskMessage::Page(request, result));
        });
    }

    fn spawn_favorites_refresh(&mut self) {
        self.state.favorites.begin_refresh();
        let api = self.api.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = api.favorites().await;
            let _ = tx.send(TaskMessage::Favorites(result));
        });
    }

    fn spawn_add_favorite(&self, listing: Listing) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let notice = add_favorite(api.as_ref(), &listing).await;
            let _ = tx.send(TaskMessage::Added(notice));
        });
    }

    fn spawn_remove_favorite(&mut self, id: ListingId) {
        if !self.state.favorites.begin_remove(id) {
            return;
        }
        let api = self.api.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = api.remove_favorite(id).await;
            let _ = tx.send(TaskMessage::Removed(id, result));
        });
    }

    fn switch_tab(&mut self, tab: Tab) {
        if self.state.tab == tab {
            return;
        }
        self.state.tab = tab;
        if tab == Tab::Favorites {
            self.spawn_favorites_refresh();
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Flow::Quit;
        }

        if self.state.notice.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.state.notice = None;
            }
            return Flow::Continue;
        }

        if self.state.editor.is_some() {
            self.handle_editor_key(key);
            return Flow::Continue;
        }

        let page = self.state.viewport.max(1) as isize;
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Up | KeyCode::Char('k') => self.state.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.state.move_cursor(1),
            KeyCode::PageUp => self.state.move_cursor(-page),
            KeyCode::PageDown => self.state.move_cursor(page),
            KeyCode::Home | KeyCode::Char('g') => self.state.move_cursor(isize::MIN / 2),
            KeyCode::End | KeyCode::Char('G') => self.state.move_cursor(isize::MAX / 2),
            KeyCode::Tab => {
                let next = match self.state.tab {
                    Tab::Listings => Tab::Favorites,
                    Tab::Favorites => Tab::Listings,
                };
                self.switch_tab(next);
            }
            KeyCode::Char('1') => self.switch_tab(Tab::Listings),
            KeyCode::Char('2') => self.switch_tab(Tab::Favorites),
            KeyCode::Char('/') if self.state.tab == Tab::Listings => self.state.open_editor(),
            KeyCode::Char('f') if self.state.tab == Tab::Listings => {
                if let Some(listing) = self.state.selected_listing().cloned() {
                    self.spawn_add_favorite(listing);
                }
            }
            KeyCode::Char('r') => match self.state.tab {
                Tab::Listings => self.state.stalled = None,
                Tab::Favorites => self.spawn_favorites_refresh(),
            },
            KeyCode::Char('d') | KeyCode::Delete if self.state.tab == Tab::Favorites => {
                if let Some(id) = self.state.selected_favorite().map(|l| l.id) {
                    self.spawn_remove_favorite(id);
                }
            }
            _ => {}
        }
        Flow::Continue
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        let Some(editor) = self.state.editor.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.state.editor = None,
            KeyCode::Enter => {
                self.state.apply_editor();
            }
            KeyCode::Down | KeyCode::Tab => editor.focus_next(),
            KeyCode::Up | KeyCode::BackTab => editor.focus_prev(),
            KeyCode::Backspace => editor.form.pop_char(editor.focused),
            KeyCode::Char('x') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                editor.form.clear();
                editor.error = None;
            }
            KeyCode::Char(ch) => {
                editor.form.push_char(editor.focused, ch);
                editor.error = None;
            }
            _ => {}
        }
    }
}
