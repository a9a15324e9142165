#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

static SERVER: OnceLock<TestServer> = OnceLock::new();
static COUNTER: AtomicU32 = AtomicU32::new(0);

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        // Assumes debug profile; adjust if you run tests with --release
        let mut cmd = Command::new("target/debug/photogram-api");
        cmd.env("PORT", port.to_string())
            // Keep startup bounded when PostgreSQL is unreachable
            .env("DATABASE_ACQUIRE_TIMEOUT_SECS", "5")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // Inherit environment so the server can see DATABASE_URL and TOKEN_KEY from .env
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline { break; }
            let url = format!("{}/health", self.base_url);
            match client.get(&url).send().await {
                Ok(resp) => {
                    // Ready as soon as health answers, even if the database is down
                    if resp.status() == StatusCode::OK || resp.status() == StatusCode::SERVICE_UNAVAILABLE {
                        return Ok(());
                    }
                }
                Err(_) => {}
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// True when /health reports the database reachable. Suites that write rows
/// call this first and skip themselves when PostgreSQL is not around.
pub async fn database_ready(server: &TestServer) -> Result<bool> {
    let client = reqwest::Client::new();
    let res = client
        .get(format!("{}/health", server.base_url))
        .send()
        .await?;
    Ok(res.status() == StatusCode::OK)
}

/// Unique suffix so suites can run repeatedly against the same database.
pub fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before unix epoch")
        .as_nanos();
    let serial = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{:x}{}", nanos, serial)
}

pub struct Session {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub token: String,
}

/// Registers a fresh account and logs it in.
pub async fn signed_in_user(client: &reqwest::Client, server: &TestServer) -> Result<Session> {
    let username = format!("user{}", unique_suffix());
    let email = format!("{}@example.com", username);
    let password = "password123".to_string();

    let res = client
        .post(format!("{}/api/v1/user/register", server.base_url))
        .json(&json!({
            "username": username,
            "email": email,
            "password": password,
            "age": 25
        }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::CREATED,
        "register failed: {}",
        res.status()
    );
    let body = res.json::<Value>().await?;
    let user_id = body["data"]["id"]
        .as_str()
        .context("register response missing id")?
        .to_string();

    let res = client
        .post(format!("{}/api/v1/user/login", server.base_url))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());
    let body = res.json::<Value>().await?;
    let token = body["data"]["token"]
        .as_str()
        .context("login response missing token")?
        .to_string();

    Ok(Session { user_id, username, email, password, token })
}

/// Uploads a photo for the given session and returns its id.
pub async fn create_photo(
    client: &reqwest::Client,
    server: &TestServer,
    token: &str,
    title: &str,
) -> Result<String> {
    let res = client
        .post(format!("{}/api/v1/photo", server.base_url))
        .bearer_auth(token)
        .json(&json!({
            "title": title,
            "caption": "uploaded by the integration suite",
            "photo_url": "https://images.example.com/shot.jpg"
        }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::CREATED,
        "photo create failed: {}",
        res.status()
    );
    let body = res.json::<Value>().await?;
    let id = body["data"]["id"]
        .as_str()
        .context("photo create response missing id")?
        .to_string();
    Ok(id)
}
