use api_types::{
    Amount,
    expense::{Category, Expense, ExpenseId, ExpenseNew},
};
use chrono::{DateTime, Local};

use crate::{app::App, client::ClientError, summary::Summary};

pub const MSG_FETCH_FAILED: &str =
    "Failed to fetch expenses. Please make sure the backend server is running.";
pub const MSG_INVALID_RESPONSE: &str = "Received an invalid response from the server.";
pub const MSG_MISSING_FIELDS: &str = "Please fill all fields.";
pub const MSG_INVALID_AMOUNT: &str = "Please enter a valid amount.";
pub const MSG_CREATE_FAILED: &str = "Failed to add expense.";
pub const MSG_DELETE_FAILED: &str = "Failed to delete expense.";

/// Completion of a request spawned by the view.
#[derive(Debug)]
pub enum ApiEvent {
    Loaded {
        generation: u64,
        result: Result<Vec<Expense>, ClientError>,
    },
    Created(Result<(), ClientError>),
    Deleted {
        id: ExpenseId,
        result: Result<(), ClientError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Description,
    Amount,
    Category,
    History,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Self::Description => Self::Amount,
            Self::Amount => Self::Category,
            Self::Category => Self::History,
            Self::History => Self::Description,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Description => Self::History,
            Self::Amount => Self::Description,
            Self::Category => Self::Amount,
            Self::History => Self::Category,
        }
    }

    pub fn is_form(self) -> bool {
        self != Self::History
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connection {
    #[default]
    Pending,
    Ok,
    Failed,
}

/// Pending "Add New Expense" fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseForm {
    pub description: String,
    /// Raw text as typed; parsed on submit.
    pub amount: String,
    pub category: Option<Category>,
}

impl Default for ExpenseForm {
    fn default() -> Self {
        Self {
            description: String::new(),
            amount: String::new(),
            category: Some(Category::Food),
        }
    }
}

impl ExpenseForm {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn cycle_category(&mut self, forward: bool) {
        self.category = Some(match self.category {
            Some(category) if forward => category.next(),
            Some(category) => category.prev(),
            None => Category::Food,
        });
    }

    /// Builds the request body, or the message to show instead.
    ///
    /// A blank description counts as missing; a non-blank one is sent as typed.
    pub fn validate(&self) -> Result<ExpenseNew, &'static str> {
        let amount = self.amount.trim();
        let Some(category) = self.category else {
            return Err(MSG_MISSING_FIELDS);
        };
        if self.description.trim().is_empty() || amount.is_empty() {
            return Err(MSG_MISSING_FIELDS);
        }
        let amount: Amount = amount.parse().map_err(|_| MSG_INVALID_AMOUNT)?;

        Ok(ExpenseNew {
            description: self.description.clone(),
            amount,
            category,
        })
    }
}

#[derive(Debug, Default)]
pub struct ExpensesState {
    /// Server order; displayed reversed.
    pub items: Vec<Expense>,
    pub form: ExpenseForm,
    pub loading: bool,
    pub error: Option<String>,
    pub focus: Focus,
    /// Index into the newest-first display order.
    pub selected: usize,
    pub connection: Connection,
    pub last_refresh: Option<DateTime<Local>>,
    generation: u64,
}

impl ExpensesState {
    pub fn newest_first(&self) -> impl Iterator<Item = &Expense> {
        self.items.iter().rev()
    }

    pub fn selected_expense(&self) -> Option<&Expense> {
        self.newest_first().nth(self.selected)
    }

    pub fn summary(&self) -> Summary {
        Summary::derive(&self.items)
    }

    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.items.len() - 1);
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.items.len().saturating_sub(1));
    }
}

impl App {
    /// Re-fetches the whole list.
    ///
    /// Every call bumps the generation; only the response of the latest call
    /// is applied.
    pub fn load(&mut self) {
        let state = &mut self.state.expenses;
        state.generation += 1;
        state.loading = true;
        state.error = None;

        let generation = state.generation;
        let client = self.client.clone();
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.list_expenses().await;
            let _ = events.send(ApiEvent::Loaded { generation, result });
        });
    }

    /// Validates the form and issues a create request.
    ///
    /// Returns `false` when validation failed and nothing was sent.
    pub fn submit(&mut self) -> bool {
        let state = &mut self.state.expenses;
        state.error = None;

        let payload = match state.form.validate() {
            Ok(payload) => payload,
            Err(message) => {
                tracing::debug!(reason = message, "expense form rejected");
                state.error = Some(message.to_string());
                return false;
            }
        };

        let client = self.client.clone();
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.create_expense(&payload).await;
            let _ = events.send(ApiEvent::Created(result));
        });
        true
    }

    pub fn remove(&mut self, id: ExpenseId) {
        let client = self.client.clone();
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.delete_expense(&id).await;
            let _ = events.send(ApiEvent::Deleted { id, result });
        });
    }

    pub fn remove_selected(&mut self) {
        if let Some(id) = self.state.expenses.selected_expense().map(|e| e.id.clone()) {
            self.remove(id);
        }
    }

    pub fn apply(&mut self, event: ApiEvent) {
        let state = &mut self.state.expenses;
        match event {
            ApiEvent::Loaded { generation, result } => {
                if generation != state.generation {
                    tracing::debug!(generation, current = state.generation, "dropping stale load");
                    return;
                }
                state.loading = false;
                match result {
                    Ok(items) => {
                        tracing::info!(count = items.len(), "expenses loaded");
                        state.items = items;
                        state.connection = Connection::Ok;
                        state.last_refresh = Some(Local::now());
                    }
                    Err(err) => {
                        tracing::warn!("failed to load expenses: {err}");
                        state.error = Some(load_message_for_error(&err).to_string());
                        state.items.clear();
                        state.connection = Connection::Failed;
                    }
                }
                state.clamp_selection();
            }
            ApiEvent::Created(Ok(())) => {
                tracing::info!("expense created");
                state.form.reset();
                self.load();
            }
            ApiEvent::Created(Err(err)) => {
                tracing::warn!("failed to create expense: {err}");
                state.error = Some(MSG_CREATE_FAILED.to_string());
            }
            ApiEvent::Deleted { id, result: Ok(()) } => {
                tracing::info!(%id, "expense deleted");
                self.load();
            }
            ApiEvent::Deleted { id, result: Err(err) } => {
                tracing::warn!(%id, "failed to delete expense: {err}");
                state.error = Some(MSG_DELETE_FAILED.to_string());
            }
        }
    }
}

fn load_message_for_error(err: &ClientError) -> &'static str {
    match err {
        ClientError::InvalidResponse(_) => MSG_INVALID_RESPONSE,
        ClientError::NotFound
        | ClientError::Decode(_)
        | ClientError::Validation(_)
        | ClientError::Server(_)
        | ClientError::Transport(_) => MSG_FETCH_FAILED,
    }
}
