//! Wire types for `/api/v1/users`.

use serde::{Deserialize, Deserializer, Serialize};

/// One account as returned by the list endpoint.
///
/// `created_at` is kept exactly as the server sent it; formatting happens at
/// render time so a refresh never depends on the local clock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "CreatedAt")]
    pub created_at: String,
    pub admin: bool,
    pub disabled: bool,
    /// Opaque value owned by the storage bridge.
    #[serde(rename = "powergateToken")]
    pub powergate_token: String,
    #[serde(rename = "powergateID")]
    pub powergate_id: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

/// Accepts both `"id": 7` and `"id": "7"`.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Unsigned(id) => id.to_string(),
        RawId::Signed(id) => id.to_string(),
    })
}

/// Response body of `GET /api/v1/users`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListUsersResponse {
    #[serde(default)]
    pub users: Vec<User>,
}

/// Request body shared by every batch action: `{ "users": [id, ...] }`.
#[derive(Debug, Clone, Serialize)]
pub struct BatchRequest<'a> {
    pub users: Vec<&'a str>,
}
