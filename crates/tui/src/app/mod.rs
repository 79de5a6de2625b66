mod expenses;

use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::{
    client::Client,
    config::AppConfig,
    error::{AppError, Result},
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

pub use expenses::{ApiEvent, Connection, ExpensesState, Focus};

#[derive(Debug)]
pub struct AppState {
    pub endpoint: String,
    pub currency_symbol: String,
    pub expenses: ExpensesState,
}

pub struct App {
    client: Client,
    pub state: AppState,
    events_tx: UnboundedSender<ApiEvent>,
    events_rx: UnboundedReceiver<ApiEvent>,
    should_quit: bool,
}

impl App {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url, config.request_timeout())?;
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let state = AppState {
            endpoint: client.collection_url().to_string(),
            currency_symbol: config.currency_symbol.clone(),
            expenses: ExpensesState::default(),
        };

        Ok(Self {
            client,
            state,
            events_tx,
            events_rx,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        self.load();
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(100);

        while !self.should_quit {
            while let Ok(api_event) = self.events_rx.try_recv() {
                self.apply(api_event);
            }

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
            tokio::task::yield_now().await;
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let focus = self.state.expenses.focus;
        match map_key(key) {
            AppAction::Quit => {
                self.should_quit = true;
            }
            AppAction::Cancel => {
                self.state.expenses.error = None;
            }
            AppAction::NextField => {
                self.state.expenses.focus = focus.next();
            }
            AppAction::PrevField => {
                self.state.expenses.focus = focus.prev();
            }
            AppAction::Submit => {
                if focus.is_form() {
                    self.submit();
                }
            }
            AppAction::Backspace => {
                if let Some(field) = self.active_field_mut() {
                    field.pop();
                }
            }
            AppAction::Up => match focus {
                Focus::History => self.state.expenses.select_prev(),
                Focus::Category => self.state.expenses.form.cycle_category(false),
                _ => {}
            },
            AppAction::Down => match focus {
                Focus::History => self.state.expenses.select_next(),
                Focus::Category => self.state.expenses.form.cycle_category(true),
                _ => {}
            },
            AppAction::Left => {
                if focus == Focus::Category {
                    self.state.expenses.form.cycle_category(false);
                }
            }
            AppAction::Right => {
                if focus == Focus::Category {
                    self.state.expenses.form.cycle_category(true);
                }
            }
            AppAction::Delete => {
                if focus == Focus::History {
                    self.remove_selected();
                }
            }
            AppAction::Input(ch) => {
                if let Some(field) = self.active_field_mut() {
                    field.push(ch);
                } else {
                    self.handle_command_key(ch);
                }
            }
            AppAction::None => {}
        }
    }

    fn active_field_mut(&mut self) -> Option<&mut String> {
        let form = &mut self.state.expenses.form;
        match self.state.expenses.focus {
            Focus::Description => Some(&mut form.description),
            Focus::Amount => Some(&mut form.amount),
            Focus::Category | Focus::History => None,
        }
    }

    fn handle_command_key(&mut self, ch: char) {
        let focus = self.state.expenses.focus;
        match ch {
            'q' | 'Q' => self.should_quit = true,
            'r' | 'R' => self.load(),
            ' ' if focus == Focus::Category => self.state.expenses.form.cycle_category(true),
            'j' | 'J' if focus == Focus::History => self.state.expenses.select_next(),
            'k' | 'K' if focus == Focus::History => self.state.expenses.select_prev(),
            'd' | 'D' if focus == Focus::History => self.remove_selected(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use api_types::expense::Category;
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::{expenses::MSG_MISSING_FIELDS, *};

    fn app() -> App {
        App::new(&AppConfig::default()).unwrap()
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    #[test]
    fn typing_fills_the_focused_field() {
        let mut app = app();
        type_text(&mut app, "quick lunch");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "12.5");
        press(&mut app, KeyCode::Backspace);

        let form = &app.state.expenses.form;
        assert_eq!(form.description, "quick lunch");
        assert_eq!(form.amount, "12.");
        assert!(!app.should_quit);
    }

    #[test]
    fn category_field_cycles_with_arrows() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.state.expenses.focus, Focus::Category);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(
            app.state.expenses.form.category,
            Some(Category::Utilities)
        );
        press(&mut app, KeyCode::Left);
        assert_eq!(
            app.state.expenses.form.category,
            Some(Category::Transport)
        );
    }

    #[test]
    fn q_quits_only_outside_text_fields() {
        let mut app = app();
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.state.expenses.focus, Focus::History);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn ctrl_c_always_quits() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn enter_with_empty_form_shows_validation_error() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.expenses.error.as_deref(), Some(MSG_MISSING_FIELDS));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state.expenses.error, None);
    }
}
