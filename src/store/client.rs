use crate::error::{AppError, Result};
use crate::store::{to_camel_keys, to_snake_keys};
use crate::types::{NewTrade, Session, Trade};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

/// REST client for the hosted trade store.
///
/// Every call is scoped to the authenticated owner: the session token goes in
/// the Authorization header and rows are filtered by `user_id`. Mutations
/// return nothing; callers re-list to pick up the store's truth.
#[derive(Clone)]
pub struct TradeStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl TradeStore {
    /// Create a new store client.
    pub fn new(base_url: String, api_key: String) -> Self {
        let client = Client::builder()
            .user_agent("journal/1.0")
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url,
            api_key,
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/trades", self.base_url.trim_end_matches('/'))
    }

    /// List all trades for the session's owner, newest open date first.
    pub async fn list_trades(&self, session: &Session) -> Result<Vec<Trade>> {
        let url = format!(
            "{}?select=*&user_id=eq.{}&order=open_date.desc",
            self.table_url(),
            session.user_id
        );

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&session.token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(store_error("list", response).await);
        }

        let rows: Value = response.json().await?;
        let trades: Vec<Trade> = serde_json::from_value(to_camel_keys(rows))?;
        debug!("Listed {} trades for {}", trades.len(), session.user_id);
        Ok(trades)
    }

    /// Insert a new trade for the session's owner. The store assigns the id.
    pub async fn insert_trade(&self, session: &Session, trade: &NewTrade) -> Result<()> {
        let mut row = serde_json::to_value(trade)?;
        if let Value::Object(ref mut fields) = row {
            fields.insert("userId".to_string(), Value::String(session.user_id.clone()));
        }
        let payload = Value::Array(vec![to_snake_keys(row)]);
        debug!("Inserting trade: {}", payload);

        let response = self
            .client
            .post(self.table_url())
            .header("apikey", &self.api_key)
            .header("Prefer", "return=minimal")
            .bearer_auth(&session.token)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(store_error("insert", response).await);
        }
        Ok(())
    }

    /// Update fields of an existing trade by id.
    ///
    /// `fields` is a camelCase partial object; the casing transform produces
    /// the wire form.
    pub async fn update_trade(&self, session: &Session, id: &str, fields: Value) -> Result<()> {
        let url = format!(
            "{}?id=eq.{}&user_id=eq.{}",
            self.table_url(),
            id,
            session.user_id
        );
        let payload = to_snake_keys(fields);
        debug!("Updating trade {}: {}", id, payload);

        let response = self
            .client
            .patch(&url)
            .header("apikey", &self.api_key)
            .header("Prefer", "return=minimal")
            .bearer_auth(&session.token)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(store_error("update", response).await);
        }
        Ok(())
    }

    /// Delete a trade by id.
    pub async fn delete_trade(&self, session: &Session, id: &str) -> Result<()> {
        let url = format!(
            "{}?id=eq.{}&user_id=eq.{}",
            self.table_url(),
            id,
            session.user_id
        );

        let response = self
            .client
            .delete(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&session.token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(store_error("delete", response).await);
        }
        Ok(())
    }
}

/// Turn a failed store response into an error carrying the underlying reason.
async fn store_error(operation: &str, response: reqwest::Response) -> AppError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    let detail: String = text.chars().take(200).collect();
    warn!("Store {} returned {}: {}", operation, status, detail);
    AppError::Store(format!("{} failed ({}): {}", operation, status, detail))
}
