use std::time::Duration;

use api_types::{
    ErrorResponse,
    expense::{Expense, ExpenseId, ExpenseNew},
};
use reqwest::{Response, Url};

use crate::error::{AppError, Result};

const COLLECTION_PATH: &str = "api/expenses";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("not found")]
    NotFound,
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("malformed response body: {0}")]
    Decode(String),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// HTTP client for the expense collection endpoint.
#[derive(Debug, Clone)]
pub struct Client {
    collection: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base = Url::parse(base_url)
            .map_err(|err| AppError::InvalidConfig(format!("invalid base_url: {err}")))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let collection = base
            .join(COLLECTION_PATH)
            .map_err(|err| AppError::InvalidConfig(format!("invalid base_url: {err}")))?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { collection, http })
    }

    pub fn collection_url(&self) -> &Url {
        &self.collection
    }

    /// `GET /api/expenses`.
    ///
    /// A body that is not JSON is a [`ClientError::Decode`]; JSON that is
    /// not an array is a [`ClientError::InvalidResponse`]. Array elements
    /// that do not read as expense records are skipped.
    pub async fn list_expenses(&self) -> std::result::Result<Vec<Expense>, ClientError> {
        tracing::debug!(url = %self.collection, "listing expenses");
        let res = self.http.get(self.collection.clone()).send().await?;
        let res = check_status(res).await?;

        let bytes = res.bytes().await?;
        let body = serde_json::from_slice::<serde_json::Value>(&bytes)
            .map_err(|err| ClientError::Decode(err.to_string()))?;
        let records = match body {
            serde_json::Value::Array(records) => records,
            other => {
                return Err(ClientError::InvalidResponse(format!(
                    "expected an array, got {}",
                    json_kind(&other)
                )));
            }
        };

        let mut expenses = Vec::with_capacity(records.len());
        for (idx, record) in records.into_iter().enumerate() {
            match serde_json::from_value::<Expense>(record) {
                Ok(expense) => expenses.push(expense),
                Err(err) => {
                    tracing::warn!(index = idx, "skipping unreadable expense record: {err}");
                }
            }
        }
        Ok(expenses)
    }

    /// `POST /api/expenses`. The created record in the body is not used.
    pub async fn create_expense(
        &self,
        payload: &ExpenseNew,
    ) -> std::result::Result<(), ClientError> {
        tracing::debug!(url = %self.collection, category = %payload.category, "creating expense");
        let res = self
            .http
            .post(self.collection.clone())
            .json(payload)
            .send()
            .await?;
        check_status(res).await?;
        Ok(())
    }

    /// `DELETE /api/expenses/{id}`.
    pub async fn delete_expense(&self, id: &ExpenseId) -> std::result::Result<(), ClientError> {
        let endpoint = self.expense_url(id)?;
        tracing::debug!(url = %endpoint, "deleting expense");
        let res = self.http.delete(endpoint).send().await?;
        check_status(res).await?;
        Ok(())
    }

    fn expense_url(&self, id: &ExpenseId) -> std::result::Result<Url, ClientError> {
        let mut endpoint = self.collection.clone();
        endpoint
            .path_segments_mut()
            .map_err(|()| ClientError::Server("base_url cannot be a base".to_string()))?
            .pop_if_empty()
            .push(id.as_str());
        Ok(endpoint)
    }
}

async fn check_status(res: Response) -> std::result::Result<Response, ClientError> {
    if res.status().is_success() {
        return Ok(res);
    }

    let status = res.status();
    let body = res
        .json::<ErrorResponse>()
        .await
        .map(|err| err.error)
        .unwrap_or_else(|_| status.to_string());

    let err = match status.as_u16() {
        404 => ClientError::NotFound,
        400 | 422 => ClientError::Validation(body),
        _ => ClientError::Server(body),
    };
    Err(err)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
