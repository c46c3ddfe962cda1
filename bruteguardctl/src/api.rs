use anyhow::Context;
use serde_json::Value;
use tokio::time::{sleep, Duration};
use tracing::{error, info};

use crate::context::ServerSettings;

// Constants for retry mechanism
const MAX_RETRIES: usize = 5;
const INITIAL_RETRY_DELAY_MS: u64 = 500;
const MAX_RETRY_DELAY_MS: u64 = 8000;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Client error calling bruteguard API at {url} : {status}{message}")]
    Client {
        url: String,
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("Server error calling bruteguard API at {url} : {status}{message}")]
    Server {
        url: String,
        status: reqwest::StatusCode,
        message: String,
    },
}

/// Helper function to normalize URLs by handling trailing slashes
fn normalize_url(base_url: &str, path: &str) -> String {
    let mut normalized_base = base_url.trim_end_matches('/').to_string();
    let normalized_path = path.trim_start_matches('/');

    normalized_base.push('/');
    normalized_base.push_str(normalized_path);
    normalized_base
}

fn is_retriable_error(err: &reqwest::Error) -> bool {
    err.is_timeout()
        || err.is_connect()
        || err.is_request()
        || err.status().is_some_and(|s| s.is_server_error())
}

fn should_retry(err: &anyhow::Error) -> bool {
    if let Some(api_err) = err.downcast_ref::<ApiError>() {
        return matches!(api_err, ApiError::Server { .. });
    }
    if let Some(reqwest_err) = err.downcast_ref::<reqwest::Error>() {
        return is_retriable_error(reqwest_err);
    }
    false
}

/// Helper function to execute a future with retry logic
async fn with_retry<F, Fut, T>(f: F) -> anyhow::Result<T>
where
    F: Fn() -> Fut + Clone,
    Fut: std::future::Future<Output = anyhow::Result<T>>,
{
    let mut retry_count = 0;
    let mut delay = INITIAL_RETRY_DELAY_MS;

    loop {
        match f().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if retry_count >= MAX_RETRIES - 1 {
                    return Err(err.context("Exhausted all retry attempts"));
                }

                if !should_retry(&err) {
                    return Err(err);
                }

                retry_count += 1;
                error!(
                    "API call failed (attempt {}/{}), retrying in {}ms: {}",
                    retry_count, MAX_RETRIES, delay, err
                );

                sleep(Duration::from_millis(delay)).await;
                delay = (delay * 2).min(MAX_RETRY_DELAY_MS);
            }
        }
    }
}

async fn error_message(response: reqwest::Response) -> String {
    match response.json::<Value>().await {
        Ok(content) => match content.get("message") {
            Some(message) => format!(": {}", message.as_str().unwrap_or("Unknown error")),
            None => String::new(),
        },
        Err(_) => String::new(),
    }
}

pub async fn get_or_post(
    server: &ServerSettings,
    action: &str,
    method: &str,
    body: Option<Value>,
) -> anyhow::Result<Value> {
    let url = normalize_url(&server.server, &format!("api/v1/{action}"));
    info!("Calling bruteguard API at {}", &url);

    with_retry(|| async {
        let client = reqwest::Client::new();
        let request = match method.to_lowercase().as_str() {
            "post" => match body.clone() {
                Some(body) => client.post(&url).json(&body),
                None => client.post(&url),
            },
            _ => client.get(&url),
        };

        let response = request
            .timeout(Duration::from_secs(10))
            .send()
            .await
            .context(format!("Failed to call bruteguard API at {}", &url))?;

        let status = response.status();

        // Client errors (4xx) shouldn't be retried - fail fast
        if status.is_client_error() {
            return Err(anyhow::Error::from(ApiError::Client {
                url: url.clone(),
                status,
                message: error_message(response).await,
            }));
        }

        if !status.is_success() {
            return Err(anyhow::Error::from(ApiError::Server {
                url: url.clone(),
                status,
                message: error_message(response).await,
            }));
        }

        let json = response.json::<Value>().await.context(format!(
            "Failed to parse response from bruteguard API at {}",
            &url
        ))?;
        Ok(json)
    })
    .await
}

pub async fn get(server: &ServerSettings, action: &str) -> anyhow::Result<Value> {
    get_or_post(server, action, "GET", None).await
}

pub async fn post(server: &ServerSettings, action: &str, body: Value) -> anyhow::Result<Value> {
    get_or_post(server, action, "POST", Some(body)).await
}
