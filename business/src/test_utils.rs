//! Test utilities for business layer testing with mock servers.
//!
//! # Example
//!
//! ```ignore
//! let mut test_ctx = TestContext::new().await;
//! mock_list_users(&test_ctx.mock_server, vec![sample_user("1", false, false)]).await;
//!
//! request_refresh(&mut test_ctx.ctx);
//! test_ctx.poll().await;
//!
//! assert_eq!(test_ctx.ctx.state::<UsersState>().users().len(), 1);
//! ```

#![cfg(all(test, not(target_arch = "wasm32")))]

use std::time::Duration;

use userdesk_states::StateCtx;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

use crate::{BusinessConfig, build_state_ctx, poll_users_workflow};

/// Test context that holds a mock server and a configured StateCtx.
pub struct TestContext {
    pub mock_server: MockServer,
    /// The state context configured to use the mock server.
    pub ctx: StateCtx,
}

impl TestContext {
    pub async fn new() -> Self {
        env_logger::builder().is_test(true).try_init().ok();

        let mock_server = MockServer::start().await;
        let config = BusinessConfig::new(mock_server.uri());
        let ctx = build_state_ctx(config);

        Self { mock_server, ctx }
    }

    /// Flush all pending commands and wait for async tasks to complete,
    /// syncing after each one finishes.
    pub async fn flush_and_wait(&mut self) {
        self.ctx.sync_computes();
        self.ctx.flush_commands();

        let timeout = Duration::from_secs(5);
        let start = std::time::Instant::now();

        while self.ctx.task_count() > 0 {
            if start.elapsed() > timeout {
                panic!(
                    "Timed out waiting for pending tasks ({} still in JoinSet)",
                    self.ctx.task_count()
                );
            }

            if self.ctx.task_set_mut().join_next().await.is_some() {
                self.ctx.sync_computes();
            }
        }

        self.ctx.sync_computes();
    }

    /// Runs frames of "flush, wait, reconcile" until the workflow stops
    /// queuing follow-up commands.
    pub async fn poll(&mut self) {
        for _ in 0..8 {
            self.flush_and_wait().await;
            poll_users_workflow(&mut self.ctx);
            if self.ctx.pending_commands() == 0 {
                return;
            }
        }
        panic!("workflow kept queuing commands");
    }
}

/// A list entry in wire format with a numeric id when `id` parses as one.
pub fn sample_user(id: &str, admin: bool, disabled: bool) -> serde_json::Value {
    let wire_id = id
        .parse::<u64>()
        .map_or_else(|_| serde_json::json!(id), |n| serde_json::json!(n));
    serde_json::json!({
        "id": wire_id,
        "name": format!("User {id}"),
        "email": format!("user{id}@example.com"),
        "CreatedAt": "2024-01-01T00:00:00Z",
        "admin": admin,
        "disabled": disabled,
        "powergateToken": format!("token-{id}"),
        "powergateID": format!("pg-{id}"),
    })
}

pub async fn mock_list_users(server: &MockServer, users: Vec<serde_json::Value>) {
    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "users": users })))
        .mount(server)
        .await;
}

pub async fn mock_action(server: &MockServer, endpoint: &str, status: u16) {
    Mock::given(method("POST"))
        .and(path(format!("/api/v1/users/{endpoint}")))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}
