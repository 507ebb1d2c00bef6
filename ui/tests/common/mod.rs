use std::time::Duration;

use egui_kittest::Harness;
use userdesk_ui::UserDeskApp;
use userdesk_ui::state::State;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Upper bound on frames to wait for network-driven state changes.
const MAX_FRAMES: usize = 200;
const FRAME_WAIT: Duration = Duration::from_millis(10);

pub struct TestCtx<'a> {
    /// Mock server must be retained to keep HTTP endpoints alive during tests.
    pub mock_server: MockServer,
    harness: Harness<'a, UserDeskApp>,
}

impl<'a> TestCtx<'a> {
    /// Starts the app against `mock_server`. Mount mocks before calling this
    /// so the initial fetch already sees them.
    pub fn new(mock_server: MockServer) -> Self {
        let state = State::test(mock_server.uri());
        let app = UserDeskApp::new(state);
        let harness = Harness::new_eframe(|_| app);

        Self {
            mock_server,
            harness,
        }
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, UserDeskApp> {
        &mut self.harness
    }

    /// Steps frames, yielding to the runtime between them, until `done` holds.
    pub async fn step_until(&mut self, mut done: impl FnMut(&UserDeskApp) -> bool) {
        for _ in 0..MAX_FRAMES {
            self.harness.step();
            if done(self.harness.state()) {
                return;
            }
            tokio::time::sleep(FRAME_WAIT).await;
        }
        panic!("condition not reached within {MAX_FRAMES} frames");
    }

    /// Steps until no command is queued or running, then renders once more.
    pub async fn settle(&mut self) {
        self.step_until(|app| {
            app.state.ctx.pending_commands() == 0 && !app.state.ctx.has_running_tasks()
        })
        .await;
        self.harness.step();
    }

    pub async fn requests_to(&self, method_name: &str, route: &str) -> Vec<wiremock::Request> {
        self.mock_server
            .received_requests()
            .await
            .expect("request recording is enabled")
            .into_iter()
            .filter(|r| r.method.as_str() == method_name && r.url.path() == route)
            .collect()
    }
}

pub async fn start_server() -> MockServer {
    env_logger::builder().is_test(true).try_init().ok();
    MockServer::start().await
}

pub fn sample_user(id: u64, admin: bool, disabled: bool) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": format!("User {id}"),
        "email": format!("user{id}@example.com"),
        "CreatedAt": "2024-01-01T00:00:00Z",
        "admin": admin,
        "disabled": disabled,
        "powergateToken": format!("token-{id}"),
        "powergateID": format!("pg-{id}"),
    })
}

/// `[{id:1, admin:false, disabled:false}, {id:2, admin:true, disabled:true}]`
pub fn two_users() -> serde_json::Value {
    serde_json::json!({ "users": [sample_user(1, false, false), sample_user(2, true, true)] })
}

pub async fn mock_list_users(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
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
