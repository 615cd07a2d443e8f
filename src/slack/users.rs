use serde_json::Value;

use crate::error::Result;

use super::client::SlackClient;
use super::response::read_response;

impl SlackClient {
    /// Look up a user by ID via `users.info`.
    ///
    /// Read-only existence check used by validation; a missing user comes
    /// back as a classified `NotFound` error.
    pub async fn get_user(&self, user_id: &str) -> Result<Value> {
        let response = self.get("users.info", &[("user", user_id)]).await?;
        read_response(response).await
    }
}
