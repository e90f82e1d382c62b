//! Integration tests for dmdesk

/// Minimal HTTP/1.1 backend serving canned responses on a local port
mod backend {
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::sync::{Arc, Mutex};
    use std::thread;

    #[derive(Debug, Clone)]
    pub struct Received {
        pub method: String,
        pub path: String,
        pub headers: Vec<(String, String)>,
        pub body: String,
    }

    impl Received {
        pub fn header(&self, name: &str) -> Option<&str> {
            self.headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.as_str())
        }
    }

    pub struct Backend {
        pub url: String,
        received: Arc<Mutex<Vec<Received>>>,
        handle: Option<thread::JoinHandle<()>>,
    }

    impl Backend {
        /// Serve one response per connection, in order, then stop
        pub fn serve(responses: Vec<(u16, &str)>) -> Self {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            let url = format!("http://{}", listener.local_addr().unwrap());
            let received = Arc::new(Mutex::new(Vec::new()));
            let log = Arc::clone(&received);
            let responses: Vec<(u16, String)> = responses
                .into_iter()
                .map(|(status, body)| (status, body.to_string()))
                .collect();

            let handle = thread::spawn(move || {
                for (status, body) in responses {
                    let (stream, _) = match listener.accept() {
                        Ok(conn) => conn,
                        Err(_) => return,
                    };
                    let mut reader = BufReader::new(stream);
                    let request = read_request(&mut reader);
                    log.lock().unwrap().push(request);

                    let response = format!(
                        "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        body.len(),
                        body
                    );
                    let mut stream = reader.into_inner();
                    let _ = stream.write_all(response.as_bytes());
                    let _ = stream.flush();
                }
            });

            Self {
                url,
                received,
                handle: Some(handle),
            }
        }

        /// Wait for every canned response to be served
        pub fn finish(mut self) -> Vec<Received> {
            if let Some(handle) = self.handle.take() {
                handle.join().unwrap();
            }
            self.received.lock().unwrap().clone()
        }
    }

    fn read_request(reader: &mut impl BufRead) -> Received {
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        let mut parts = line.split_whitespace();
        let method = parts.next().unwrap_or_default().to_string();
        let path = parts.next().unwrap_or_default().to_string();

        let mut headers = Vec::new();
        loop {
            let mut line = String::new();
            if reader.read_line(&mut line).unwrap() == 0 {
                break;
            }
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                headers.push((name.trim().to_string(), value.trim().to_string()));
            }
        }

        let header = |name: &str| {
            headers
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.clone())
        };

        let body = if header("transfer-encoding").is_some_and(|v| v.contains("chunked")) {
            read_chunked(reader)
        } else {
            let length: usize = header("content-length")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0);
            let mut body = vec![0; length];
            reader.read_exact(&mut body).unwrap();
            body
        };

        Received {
            method,
            path,
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
        }
    }

    fn read_chunked(reader: &mut impl BufRead) -> Vec<u8> {
        let mut body = Vec::new();
        loop {
            let mut size_line = String::new();
            reader.read_line(&mut size_line).unwrap();
            let size_hex = size_line.trim().split(';').next().unwrap_or("0");
            let size = usize::from_str_radix(size_hex, 16).unwrap();

            let mut chunk = vec![0; size];
            reader.read_exact(&mut chunk).unwrap();
            body.extend_from_slice(&chunk);

            let mut crlf = String::new();
            reader.read_line(&mut crlf).unwrap();
            if size == 0 {
                return body;
            }
        }
    }
}

const ALICE_LOGIN: &str =
    r#"{"token":"tok-alice","user":{"id":"u-1","username":"alice","role":"admin"}}"#;

const BOB_RECORD: &str = r#"{"id":"u-2","username":"bob","token":"tok-bob","role":"admin"}"#;

mod cli_tests {
    use super::backend::Backend;
    use super::{ALICE_LOGIN, BOB_RECORD};
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Isolated config and state directories per test
    struct Sandbox {
        dir: TempDir,
    }

    impl Sandbox {
        fn new() -> Self {
            Self {
                dir: TempDir::new().unwrap(),
            }
        }

        fn state_dir(&self) -> PathBuf {
            self.dir.path().join("state")
        }

        fn config_path(&self) -> PathBuf {
            self.dir.path().join("config.toml")
        }

        fn session_file(&self) -> PathBuf {
            self.state_dir().join("store").join("user.json")
        }

        fn store_session(&self, record: &str) {
            let store = self.state_dir().join("store");
            std::fs::create_dir_all(&store).unwrap();
            std::fs::write(self.session_file(), record).unwrap();
        }

        fn stored_session(&self) -> Option<serde_json::Value> {
            std::fs::read_to_string(self.session_file())
                .ok()
                .map(|s| serde_json::from_str(&s).unwrap())
        }

        fn audit_log(&self) -> String {
            std::fs::read_to_string(self.state_dir().join("audit.log")).unwrap_or_default()
        }

        /// Command pointed at an unreachable backend
        fn dmdesk(&self) -> Command {
            self.dmdesk_at("http://127.0.0.1:1")
        }

        fn dmdesk_at(&self, api_url: &str) -> Command {
            let mut cmd = cargo_bin_cmd!("dmdesk");
            cmd.env("DMDESK_STATE_DIR", self.state_dir())
                .env("DMDESK_CONFIG", self.config_path())
                .env("DMDESK_API_URL", api_url)
                .env("CI", "1")
                .env_remove("DMDESK_PASSWORD");
            cmd
        }
    }

    fn write_csv(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn help_displays() {
        cargo_bin_cmd!("dmdesk")
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("admin console"));
    }

    #[test]
    fn version_displays() {
        cargo_bin_cmd!("dmdesk")
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("dmdesk"));
    }

    #[test]
    fn config_path_honors_env() {
        let sandbox = Sandbox::new();
        sandbox
            .dmdesk()
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show_applies_api_url_override() {
        let sandbox = Sandbox::new();
        sandbox
            .dmdesk_at("https://dm.example.com")
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[api]"))
            .stdout(predicate::str::contains("https://dm.example.com"));
    }

    #[test]
    fn config_set_persists() {
        let sandbox = Sandbox::new();
        sandbox
            .dmdesk()
            .args(["config", "set", "navigation.landing", "/accounts"])
            .assert()
            .success();

        let written = std::fs::read_to_string(sandbox.config_path()).unwrap();
        assert!(written.contains("landing = \"/accounts\""));
    }

    #[test]
    fn config_set_unknown_key() {
        let sandbox = Sandbox::new();
        sandbox
            .dmdesk()
            .args(["config", "set", "vm.name", "x"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown config key"));
    }

    #[test]
    fn whoami_without_session() {
        let sandbox = Sandbox::new();
        sandbox
            .dmdesk()
            .arg("whoami")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not logged in"))
            .stderr(predicate::str::contains("dmdesk login"));
    }

    #[test]
    fn whoami_restores_stored_session() {
        let sandbox = Sandbox::new();
        sandbox.store_session(BOB_RECORD);

        sandbox
            .dmdesk()
            .args(["whoami", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"bob\""))
            .stdout(predicate::str::contains("tok-bob").not());
    }

    #[test]
    fn malformed_session_is_discarded_quietly() {
        let sandbox = Sandbox::new();
        sandbox.store_session("{\"id\": 42");

        sandbox
            .dmdesk()
            .arg("whoami")
            .assert()
            .failure()
            .stdout(predicate::str::contains("[FAIL]").not())
            .stderr(predicate::str::contains("Not logged in"));

        assert!(!sandbox.session_file().exists());
    }

    #[test]
    fn unreadable_session_file_is_discarded() {
        let sandbox = Sandbox::new();
        sandbox.store_session("");
        std::fs::write(sandbox.session_file(), [0xff, 0xfe, b'{']).unwrap();

        sandbox
            .dmdesk()
            .arg("whoami")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not logged in"));

        assert!(!sandbox.session_file().exists());
    }

    #[test]
    fn protected_command_redirects_to_login() {
        let sandbox = Sandbox::new();
        sandbox
            .dmdesk()
            .args(["accounts", "list"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("dmdesk login --redirect /accounts"))
            .stderr(predicate::str::contains("Not logged in"));
    }

    #[test]
    fn login_network_failure_keeps_previous_session() {
        let sandbox = Sandbox::new();
        sandbox.store_session(BOB_RECORD);

        sandbox
            .dmdesk()
            .args(["login", "--username", "alice", "--password-stdin"])
            .write_stdin("secret1\n")
            .assert()
            .failure()
            .stdout(predicate::str::contains("Login failed"));

        assert_eq!(sandbox.stored_session().unwrap()["username"], "bob");
    }

    #[test]
    fn login_against_backend() {
        let sandbox = Sandbox::new();
        let backend = Backend::serve(vec![(200, ALICE_LOGIN)]);

        sandbox
            .dmdesk_at(&backend.url)
            .args(["login", "--username", "alice", "--password-stdin"])
            .write_stdin("secret1\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Logged in as alice"))
            .stdout(predicate::str::contains("dmdesk dashboard"));

        let received = backend.finish();
        assert_eq!(received[0].method, "POST");
        assert_eq!(received[0].path, "/api/v1/auth/login");
        let body: serde_json::Value = serde_json::from_str(&received[0].body).unwrap();
        assert_eq!(body["username"], "alice");
        assert_eq!(body["password"], "secret1");

        let stored = sandbox.stored_session().unwrap();
        assert_eq!(stored["username"], "alice");
        assert_eq!(stored["token"], "tok-alice");

        let audit = sandbox.audit_log();
        assert!(audit.contains("session.login"));
        assert!(!audit.contains("secret1"));
        assert!(!audit.contains("tok-alice"));
    }

    #[test]
    fn login_rejected_shows_server_message() {
        let sandbox = Sandbox::new();
        let backend = Backend::serve(vec![(401, r#"{"message":"Invalid username or password"}"#)]);

        sandbox
            .dmdesk_at(&backend.url)
            .args(["login", "--username", "alice", "--password-stdin"])
            .write_stdin("wrong\n")
            .assert()
            .failure()
            .stdout(predicate::str::contains("Invalid username or password"));

        backend.finish();
        assert!(sandbox.stored_session().is_none());
    }

    #[test]
    fn requests_carry_bearer_token() {
        let sandbox = Sandbox::new();
        sandbox.store_session(BOB_RECORD);
        let backend = Backend::serve(vec![(
            200,
            r#"{"accounts":[{"username":"shop.one","login_status":"success"}],"total":1}"#,
        )]);

        sandbox
            .dmdesk_at(&backend.url)
            .args(["accounts", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("shop.one"));

        let received = backend.finish();
        assert_eq!(received[0].path, "/api/v1/accounts/");
        assert_eq!(received[0].header("authorization"), Some("Bearer tok-bob"));
    }

    #[test]
    fn unauthorized_response_ends_session() {
        let sandbox = Sandbox::new();
        sandbox.store_session(BOB_RECORD);
        let backend = Backend::serve(vec![(401, r#"{"detail":"Token expired"}"#)]);

        sandbox
            .dmdesk_at(&backend.url)
            .args(["accounts", "list"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("Session expired"));

        backend.finish();
        assert!(!sandbox.session_file().exists());
        assert!(sandbox.audit_log().contains("session.expired"));
    }

    #[test]
    fn logout_removes_stored_session() {
        let sandbox = Sandbox::new();
        sandbox.store_session(BOB_RECORD);

        sandbox
            .dmdesk()
            .arg("logout")
            .assert()
            .success()
            .stdout(predicate::str::contains("Logged out"));

        assert!(!sandbox.session_file().exists());
    }

    #[test]
    fn session_set_merges_and_persists() {
        let sandbox = Sandbox::new();
        sandbox.store_session(BOB_RECORD);

        sandbox
            .dmdesk()
            .args(["session", "set", "--role", "editor"])
            .assert()
            .success();

        let stored = sandbox.stored_session().unwrap();
        assert_eq!(stored["role"], "editor");
        assert_eq!(stored["username"], "bob");
        assert_eq!(stored["token"], "tok-bob");
    }

    #[test]
    fn session_set_without_session() {
        let sandbox = Sandbox::new();
        sandbox
            .dmdesk()
            .args(["session", "set", "--role", "editor"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not logged in"));

        assert!(!sandbox.session_file().exists());
    }

    #[test]
    fn upload_rejects_csv_without_password_column() {
        let sandbox = Sandbox::new();
        sandbox.store_session(BOB_RECORD);
        let csv = write_csv(sandbox.dir.path(), "accounts.csv", "username,email\nshop,a@b.c\n");

        sandbox
            .dmdesk()
            .args(["accounts", "upload"])
            .arg(&csv)
            .assert()
            .failure()
            .stdout(predicate::str::contains("Invalid CSV file"));
    }

    #[test]
    fn upload_sends_multipart_csv() {
        let sandbox = Sandbox::new();
        sandbox.store_session(BOB_RECORD);
        let csv = write_csv(
            sandbox.dir.path(),
            "accounts.csv",
            "Username,Password\nshop.one,pw1\nshop.two,pw2\n",
        );
        let backend = Backend::serve(vec![(
            200,
            r#"{"success":true,"message":"Started processing 2 accounts","data":{"total_accounts":2}}"#,
        )]);

        sandbox
            .dmdesk_at(&backend.url)
            .args(["accounts", "upload"])
            .arg(&csv)
            .assert()
            .success()
            .stdout(predicate::str::contains("Started processing 2 accounts"));

        let received = backend.finish();
        assert_eq!(received[0].path, "/api/v1/accounts/bulk");
        assert!(received[0]
            .header("content-type")
            .unwrap_or_default()
            .starts_with("multipart/form-data; boundary="));
        assert!(received[0].body.contains("filename=\"accounts.csv\""));
        assert!(received[0].body.contains("shop.two,pw2"));
    }

    #[test]
    fn campaign_start_uploads_recipients() {
        let sandbox = Sandbox::new();
        sandbox.store_session(BOB_RECORD);
        let csv = write_csv(sandbox.dir.path(), "leads.csv", "username,name\nana.shop,Ana\n");
        let backend = Backend::serve(vec![(
            200,
            r#"{"success":true,"message":"Bulk DM campaign started","data":{"campaign_id":"c-42","total_recipients":1,"errors":[]}}"#,
        )]);

        sandbox
            .dmdesk_at(&backend.url)
            .args(["campaigns", "start", "--template", "7", "--account", "brand.main"])
            .arg(&csv)
            .assert()
            .success()
            .stdout(predicate::str::contains("Campaign c-42 started"));

        let received = backend.finish();
        assert_eq!(
            received[0].path,
            "/api/v1/dmer/send?template_id=7&instagram_account_username=brand.main"
        );
        assert_eq!(received[0].header("authorization"), Some("Bearer tok-bob"));
        assert!(received[0].body.contains("ana.shop,Ana"));
    }

    #[test]
    fn campaign_start_checks_recipient_columns() {
        let sandbox = Sandbox::new();
        sandbox.store_session(BOB_RECORD);
        let csv = write_csv(sandbox.dir.path(), "leads.csv", "handle\nana\n");

        sandbox
            .dmdesk()
            .args(["campaigns", "start", "--template", "7"])
            .arg(&csv)
            .assert()
            .failure()
            .stdout(predicate::str::contains("missing required columns: username, name"));
    }

    #[test]
    fn auto_reply_off_sends_disabled_config() {
        let sandbox = Sandbox::new();
        sandbox.store_session(BOB_RECORD);
        let backend = Backend::serve(vec![(
            200,
            r#"{"success":true,"message":"Auto-reply disabled for shop.one"}"#,
        )]);

        sandbox
            .dmdesk_at(&backend.url)
            .args(["accounts", "auto-reply", "shop.one", "--off"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Auto-reply disabled for shop.one"));

        let received = backend.finish();
        assert_eq!(received[0].method, "POST");
        assert_eq!(received[0].path, "/api/v1/dmer/auto-reply/shop.one");
        let body: serde_json::Value = serde_json::from_str(&received[0].body).unwrap();
        assert_eq!(body["is_enabled"], false);
    }

    #[test]
    fn delete_requires_yes_when_not_interactive() {
        let sandbox = Sandbox::new();
        sandbox.store_session(BOB_RECORD);

        sandbox
            .dmdesk()
            .args(["accounts", "delete", "shop.one"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("--yes"));
    }
}

mod session_flow {
    use super::backend::Backend;
    use super::ALICE_LOGIN;
    use async_trait::async_trait;
    use dmdesk::api::{ApiClient, CredentialSlot, HttpRequest, HttpResponse, Transport, UreqTransport};
    use dmdesk::config::schema::ApiConfig;
    use dmdesk::notify::{Level, NotificationLog};
    use dmdesk::session::{Session, SessionManager, SessionPatch, SESSION_KEY};
    use dmdesk::store::{KeyValueStore, MemoryStore};
    use dmdesk::{DeskError, DeskResult};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Transport answering from a queue
    #[derive(Default)]
    struct Canned {
        responses: Mutex<VecDeque<(u16, String)>>,
    }

    impl Canned {
        fn with(responses: &[(u16, &str)]) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(
                    responses
                        .iter()
                        .map(|(status, body)| (*status, body.to_string()))
                        .collect(),
                ),
            })
        }
    }

    #[async_trait]
    impl Transport for Canned {
        async fn execute(&self, _request: HttpRequest) -> DeskResult<HttpResponse> {
            match self.responses.lock().unwrap().pop_front() {
                Some((status, body)) => Ok(HttpResponse { status, body }),
                None => Err(DeskError::Transport("connection refused".to_string())),
            }
        }
    }

    struct Harness {
        manager: SessionManager,
        store: Arc<MemoryStore>,
        notes: Arc<NotificationLog>,
    }

    fn harness(client: (ApiClient, CredentialSlot)) -> Harness {
        let (client, slot) = client;
        let store = Arc::new(MemoryStore::new());
        let notes = Arc::new(NotificationLog::new());
        let manager = SessionManager::builder(client, slot, store.clone())
            .notifier(notes.clone())
            .build();
        Harness {
            manager,
            store,
            notes,
        }
    }

    fn canned(responses: &[(u16, &str)]) -> Harness {
        harness(ApiClient::new(&ApiConfig::default(), Canned::with(responses)).unwrap())
    }

    fn bob() -> Session {
        Session {
            user_id: "u-2".to_string(),
            username: "bob".to_string(),
            auth_token: "tok-bob".to_string(),
            role: "admin".to_string(),
        }
    }

    #[tokio::test]
    async fn persisted_session_restores_equal() {
        let h = canned(&[]);
        h.store
            .set(SESSION_KEY, &bob().to_record().unwrap())
            .await
            .unwrap();

        h.manager.initialize().await;

        assert_eq!(h.manager.current_session().await, Some(bob()));
    }

    #[tokio::test]
    async fn malformed_stored_value_is_not_an_error() {
        let h = canned(&[]);
        h.store.set(SESSION_KEY, "[1, 2, 3]").await.unwrap();

        h.manager.initialize().await;

        assert!(!h.manager.is_authenticated().await);
        assert!(!h.manager.is_initializing().await);
        assert!(h.notes.entries().is_empty());
    }

    #[tokio::test]
    async fn login_sets_memory_storage_and_header() {
        let h = canned(&[(200, ALICE_LOGIN)]);
        h.manager.initialize().await;

        assert!(h.manager.login("alice", "secret1").await);

        assert!(h.manager.is_authenticated().await);
        let stored = Session::from_record(&h.store.peek(SESSION_KEY).unwrap()).unwrap();
        assert_eq!(stored.username, "alice");
        assert_eq!(
            h.manager.client().authorization(),
            Some(format!("Bearer {}", stored.auth_token))
        );
    }

    #[tokio::test]
    async fn rejected_login_notifies_once() {
        let h = canned(&[(401, r#"{"message":"Invalid username or password"}"#)]);
        h.manager.initialize().await;

        assert!(!h.manager.login("alice", "wrong").await);

        assert!(!h.manager.is_authenticated().await);
        assert_eq!(h.notes.entries().len(), 1);
        assert_eq!(h.notes.count(Level::Error), 1);
    }

    #[tokio::test]
    async fn logout_clears_all_three() {
        let h = canned(&[(200, ALICE_LOGIN)]);
        h.manager.login("alice", "secret1").await;

        h.manager.logout().await;

        assert!(h.store.peek(SESSION_KEY).is_none());
        assert!(!h.manager.is_authenticated().await);
        assert!(h.manager.client().authorization().is_none());
    }

    #[tokio::test]
    async fn any_unauthorized_response_logs_out() {
        let h = canned(&[(200, ALICE_LOGIN), (401, r#"{"detail":"expired"}"#)]);
        h.manager.login("alice", "secret1").await;

        let err = h
            .manager
            .client()
            .get_json::<serde_json::Value>("/api/v1/templates/")
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert_eq!(err.server_message(), Some("expired"));
        assert!(h.store.peek(SESSION_KEY).is_none());
        assert!(h.manager.client().authorization().is_none());
    }

    #[tokio::test]
    async fn role_update_keeps_username() {
        let h = canned(&[]);
        h.store
            .set(SESSION_KEY, &bob().to_record().unwrap())
            .await
            .unwrap();
        h.manager.initialize().await;

        assert!(h.manager.update_session(SessionPatch::role("editor")).await);

        let current = h.manager.current_session().await.unwrap();
        assert_eq!((current.role.as_str(), current.username.as_str()), ("editor", "bob"));
        let stored = Session::from_record(&h.store.peek(SESSION_KEY).unwrap()).unwrap();
        assert_eq!(stored, current);
    }

    #[tokio::test]
    async fn real_transport_round_trip() {
        let backend = Backend::serve(vec![(200, ALICE_LOGIN), (401, r#"{"detail":"expired"}"#)]);
        let config = ApiConfig {
            base_url: backend.url.clone(),
            ..ApiConfig::default()
        };
        let transport = Arc::new(UreqTransport::new(Duration::from_secs(5)));
        let h = harness(ApiClient::new(&config, transport).unwrap());

        assert!(h.manager.login("alice", "secret1").await);
        let err = h
            .manager
            .client()
            .get_json::<serde_json::Value>("/api/v1/accounts/")
            .await
            .unwrap_err();

        assert!(err.is_auth_rejection());
        assert!(!h.manager.is_authenticated().await);

        let received = backend.finish();
        assert_eq!(received[1].header("authorization"), Some("Bearer tok-alice"));
    }
}
