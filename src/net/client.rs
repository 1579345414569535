//! HTTP API client for the game server.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use super::errors::{ApiError, ApiResult};
use crate::game::entities::Card;
use crate::rooms::Room;
use crate::session::User;

/// Header carrying the admin bearer token.
pub const ADMIN_TOKEN_HEADER: &str = "X-Admin-Token";

/// API client for communicating with the game server.
///
/// Holds the base URL and the session bearer token behind interior
/// mutability so one shared client serves every component. Admin endpoints
/// authenticate with the separate admin token per call and never send the
/// session bearer.
pub struct ApiClient {
    base_url: Mutex<String>,
    token: Mutex<Option<String>>,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct GuestCredentials<'a> {
    provider: &'static str,
    display_name: &'a str,
    password: &'a str,
}

/// Server response to login and register calls.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
struct CreateRoomRequest<'a> {
    name: &'a str,
    max_players: u32,
    max_spectators: u32,
}

#[derive(Debug, Serialize)]
struct JoinRoomRequest {
    as_spectator: bool,
}

#[derive(Debug, Serialize)]
struct RoleUpdateRequest<'a> {
    role: &'a str,
}

impl ApiClient {
    /// Create a new API client against `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: Mutex::new(normalize_base(base_url)),
            token: Mutex::new(None),
            client: reqwest::Client::new(),
        }
    }

    /// Replace the base URL (trailing slash trimmed).
    pub fn set_base_url(&self, base_url: &str) {
        *self.base_url.lock() = normalize_base(base_url);
    }

    /// Install or clear the session bearer token.
    pub fn set_token(&self, token: Option<String>) {
        *self.token.lock() = token;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.lock(), path)
    }

    fn bearer(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token.lock().as_deref() {
            Some(token) => request.header("Authorization", format!("Bearer {token}")),
            None => request,
        }
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> ApiResult<reqwest::Response> {
        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(&self, response: reqwest::Response) -> ApiResult<T> {
        response.json().await.map_err(ApiError::Decode)
    }

    // --- Auth ---

    /// Login with the guest provider.
    pub async fn login_guest(&self, display_name: &str, password: &str) -> ApiResult<AuthResponse> {
        let body = GuestCredentials {
            provider: "guest",
            display_name,
            password,
        };
        let response = self
            .execute(self.client.post(self.url("/auth/login")).json(&body))
            .await?;
        self.decode(response).await
    }

    /// Register a guest account.
    pub async fn register_guest(
        &self,
        display_name: &str,
        password: &str,
    ) -> ApiResult<AuthResponse> {
        let body = GuestCredentials {
            provider: "guest",
            display_name,
            password,
        };
        let response = self
            .execute(self.client.post(self.url("/auth/register")).json(&body))
            .await?;
        self.decode(response).await
    }

    // --- Rooms ---

    /// List rooms visible to the current user.
    pub async fn list_rooms(&self) -> ApiResult<Vec<Room>> {
        let response = self
            .execute(self.bearer(self.client.get(self.url("/rooms"))))
            .await?;
        self.decode(response).await
    }

    /// Create a room and return it.
    pub async fn create_room(
        &self,
        name: &str,
        max_players: u32,
        max_spectators: u32,
    ) -> ApiResult<Room> {
        let body = CreateRoomRequest {
            name,
            max_players,
            max_spectators,
        };
        let response = self
            .execute(self.bearer(self.client.post(self.url("/rooms")).json(&body)))
            .await?;
        self.decode(response).await
    }

    /// Join the room identified by `code` as a player.
    pub async fn join_room(&self, code: &str) -> ApiResult<Room> {
        let body = JoinRoomRequest {
            as_spectator: false,
        };
        let response = self
            .execute(
                self.bearer(
                    self.client
                        .post(self.url(&format!("/rooms/{code}/join")))
                        .json(&body),
                ),
            )
            .await?;
        self.decode(response).await
    }

    // --- Cards ---

    /// Fetch the card listing, optionally scoped to one deck.
    pub async fn fetch_cards(&self, deck_id: Option<&str>) -> ApiResult<Vec<Card>> {
        let mut request = self.client.get(self.url("/cards"));
        if let Some(deck_id) = deck_id {
            request = request.query(&[("deck_id", deck_id)]);
        }
        let response = self.execute(self.bearer(request)).await?;
        self.decode(response).await
    }

    // --- Admin ---

    fn admin(&self, request: reqwest::RequestBuilder, admin_token: &str) -> reqwest::RequestBuilder {
        request.header(ADMIN_TOKEN_HEADER, admin_token)
    }

    /// Check an admin token against the server. Resolves on 2xx and rejects
    /// otherwise; the caller interprets the rejection status.
    pub async fn verify_admin_token(&self, admin_token: &str) -> ApiResult<()> {
        self.execute(self.admin(self.client.get(self.url("/admin/verify")), admin_token))
            .await?;
        Ok(())
    }

    pub async fn list_admin_cards(&self, admin_token: &str) -> ApiResult<Vec<Card>> {
        let response = self
            .execute(self.admin(self.client.get(self.url("/admin/cards")), admin_token))
            .await?;
        self.decode(response).await
    }

    pub async fn create_card(&self, admin_token: &str, payload: &Value) -> ApiResult<Card> {
        let response = self
            .execute(self.admin(
                self.client.post(self.url("/admin/cards")).json(payload),
                admin_token,
            ))
            .await?;
        self.decode(response).await
    }

    pub async fn delete_card(&self, admin_token: &str, card_id: i64) -> ApiResult<()> {
        self.execute(self.admin(
            self.client.delete(self.url(&format!("/admin/cards/{card_id}"))),
            admin_token,
        ))
        .await?;
        Ok(())
    }

    pub async fn list_admin_decks(&self, admin_token: &str) -> ApiResult<Vec<Value>> {
        let response = self
            .execute(self.admin(self.client.get(self.url("/admin/decks")), admin_token))
            .await?;
        self.decode(response).await
    }

    pub async fn create_deck(&self, admin_token: &str, payload: &Value) -> ApiResult<Value> {
        let response = self
            .execute(self.admin(
                self.client.post(self.url("/admin/decks")).json(payload),
                admin_token,
            ))
            .await?;
        self.decode(response).await
    }

    pub async fn delete_deck(&self, admin_token: &str, deck_id: &str) -> ApiResult<()> {
        self.execute(self.admin(
            self.client.delete(self.url(&format!("/admin/decks/{deck_id}"))),
            admin_token,
        ))
        .await?;
        Ok(())
    }

    /// Export one deck with its cards for backup or transfer.
    pub async fn export_deck(&self, admin_token: &str, deck_id: &str) -> ApiResult<Value> {
        let response = self
            .execute(self.admin(
                self.client.get(self.url(&format!("/admin/decks/{deck_id}/export"))),
                admin_token,
            ))
            .await?;
        self.decode(response).await
    }

    /// Import a previously exported deck.
    pub async fn import_deck(&self, admin_token: &str, payload: &Value) -> ApiResult<Value> {
        let response = self
            .execute(self.admin(
                self.client.post(self.url("/admin/decks/import")).json(payload),
                admin_token,
            ))
            .await?;
        self.decode(response).await
    }

    pub async fn list_admin_users(&self, admin_token: &str) -> ApiResult<Vec<User>> {
        let response = self
            .execute(self.admin(self.client.get(self.url("/admin/users")), admin_token))
            .await?;
        self.decode(response).await
    }

    /// Change a user's role and return the updated account.
    pub async fn update_user_role(
        &self,
        admin_token: &str,
        user_id: &str,
        role: &str,
    ) -> ApiResult<User> {
        let body = RoleUpdateRequest { role };
        let response = self
            .execute(self.admin(
                self.client
                    .patch(self.url(&format!("/admin/users/{user_id}/role")))
                    .json(&body),
                admin_token,
            ))
            .await?;
        self.decode(response).await
    }

    pub async fn delete_user(&self, admin_token: &str, user_id: &str) -> ApiResult<()> {
        self.execute(self.admin(
            self.client.delete(self.url(&format!("/admin/users/{user_id}"))),
            admin_token,
        ))
        .await?;
        Ok(())
    }

    /// List every room regardless of visibility or membership.
    pub async fn list_admin_rooms(&self, admin_token: &str) -> ApiResult<Vec<Room>> {
        let response = self
            .execute(self.admin(self.client.get(self.url("/admin/rooms")), admin_token))
            .await?;
        self.decode(response).await
    }

    pub async fn delete_admin_room(&self, admin_token: &str, code: &str) -> ApiResult<()> {
        self.execute(self.admin(
            self.client.delete(self.url(&format!("/admin/rooms/{code}"))),
            admin_token,
        ))
        .await?;
        Ok(())
    }
}

fn normalize_base(base: &str) -> String {
    base.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:8000/");
        assert_eq!(client.url("/rooms"), "http://localhost:8000/rooms");

        client.set_base_url("http://example.test/api/");
        assert_eq!(client.url("/cards"), "http://example.test/api/cards");
    }

    #[test]
    fn test_user_listing_parses() {
        let parsed: Vec<User> = serde_json::from_str(
            r#"[{"id": "u-1", "display_name": "Ana", "role": "admin"},
                {"id": "u-2", "display_name": "Bo", "role": "player"}]"#,
        )
        .expect("user listing should parse");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].role, "admin");
    }

    #[test]
    fn test_role_update_body_shape() {
        let body = serde_json::to_value(RoleUpdateRequest { role: "admin" })
            .expect("role body should serialize");
        assert_eq!(body, serde_json::json!({"role": "admin"}));
    }

    #[test]
    fn test_auth_response_parses() {
        let parsed: AuthResponse = serde_json::from_str(
            r#"{"token": "t1", "user": {"id": "u-4", "display_name": "Ana", "role": "player"}}"#,
        )
        .expect("auth response should parse");
        assert_eq!(parsed.token, "t1");
        assert_eq!(parsed.user.display_name, "Ana");
    }
}
