use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use varnora_types::ContactMessage;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";
const DEFAULT_SUBJECT: &str = "New contact form submission";

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("email relay request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("email relay rejected message ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Relays a stored contact message somewhere a human will read it.
/// Runs after the store write; a failure never undoes that write.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, msg: &ContactMessage) -> Result<(), NotifyError>;
}

/// Used when no email relay is configured.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, msg: &ContactMessage) -> Result<(), NotifyError> {
        info!(
            id = msg.id,
            from = %msg.email,
            subject = msg.subject.as_deref().unwrap_or(DEFAULT_SUBJECT),
            "Contact message received (email relay disabled)"
        );
        Ok(())
    }
}

/// Sends contact messages through the Resend HTTP API.
pub struct ResendNotifier {
    client: reqwest::Client,
    api_key: String,
    from: String,
    to: String,
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct ResendEmail<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    reply_to: &'a str,
    html: String,
}

impl ResendNotifier {
    pub fn new(api_key: String, from: String, to: String) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            api_key,
            from,
            to,
            endpoint: RESEND_ENDPOINT.to_string(),
        })
    }

    /// Send to `endpoint` instead of the public Resend API.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl Notifier for ResendNotifier {
    async fn notify(&self, msg: &ContactMessage) -> Result<(), NotifyError> {
        let email = ResendEmail {
            from: &self.from,
            to: [self.to.as_str()],
            subject: email_subject(msg),
            reply_to: &msg.email,
            html: render_html(msg),
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&email)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(id = msg.id, status = status.as_u16(), "Email relay rejected contact message");
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        info!(id = msg.id, "Contact message relayed by email");
        Ok(())
    }
}

fn email_subject(msg: &ContactMessage) -> &str {
    match msg.subject.as_deref() {
        Some(s) if !s.trim().is_empty() => s,
        _ => DEFAULT_SUBJECT,
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_html(msg: &ContactMessage) -> String {
    format!(
        concat!(
            r#"<div style="background-color:#f3f4f6;color:#000;font-family:Arial, sans-serif;padding:20px">"#,
            r#"<div style="background-color:#fff;padding:20px;border-radius:8px;max-width:600px;margin:0 auto;border:1px solid #ccc">"#,
            "<h2>You received the following message from the contact form:</h2>",
            "<p>{message}</p>",
            "<hr/>",
            "<p>The sender&#39;s email is: {email}</p>",
            "</div></div>"
        ),
        message = escape_html(&msg.message),
        email = escape_html(&msg.email),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Json, Router,
        http::{HeaderMap, StatusCode, header},
        routing::post,
    };
    use serde_json::Value;

    use super::*;

    fn msg(subject: Option<&str>, message: &str) -> ContactMessage {
        ContactMessage {
            id: 1,
            name: "Jo".into(),
            email: "jo@x.com".into(),
            subject: subject.map(Into::into),
            message: message.into(),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn html_contains_message_and_sender() {
        let html = render_html(&msg(None, "Hi there!!"));
        assert!(html.contains("<p>Hi there!!</p>"));
        assert!(html.contains("The sender&#39;s email is: jo@x.com"));
    }

    #[test]
    fn html_escapes_user_input() {
        let html = render_html(&msg(None, "<script>alert('x')</script> & more"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; more"));
    }

    #[test]
    fn subject_falls_back_when_absent_or_blank() {
        assert_eq!(email_subject(&msg(None, "hello world")), DEFAULT_SUBJECT);
        assert_eq!(email_subject(&msg(Some(""), "hello world")), DEFAULT_SUBJECT);
        assert_eq!(email_subject(&msg(Some("Rebrand"), "hello world")), "Rebrand");
    }

    type Captured = Arc<Mutex<Option<(Option<String>, Value)>>>;

    /// Serves one route at `/emails` that records what it was sent and
    /// answers with `status`.
    async fn spawn_relay(status: StatusCode) -> (String, Captured) {
        let captured: Captured = Arc::default();
        let sink = captured.clone();
        let app = Router::new().route(
            "/emails",
            post(move |headers: HeaderMap, Json(body): Json<Value>| async move {
                let auth = headers
                    .get(header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                *sink.lock().unwrap() = Some((auth, body));
                (status, "relay says no")
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}/emails"), captured)
    }

    fn notifier(endpoint: String) -> ResendNotifier {
        ResendNotifier::new("re_test".into(), "site@studio.dev".into(), "inbox@studio.dev".into())
            .unwrap()
            .with_endpoint(endpoint)
    }

    #[tokio::test]
    async fn resend_request_shape() {
        let (endpoint, captured) = spawn_relay(StatusCode::OK).await;

        notifier(endpoint).notify(&msg(None, "Hi there!!")).await.unwrap();

        let (auth, body) = captured.lock().unwrap().take().unwrap();
        assert_eq!(auth.as_deref(), Some("Bearer re_test"));
        assert_eq!(body["from"], "site@studio.dev");
        assert_eq!(body["to"], serde_json::json!(["inbox@studio.dev"]));
        assert_eq!(body["subject"], DEFAULT_SUBJECT);
        assert_eq!(body["reply_to"], "jo@x.com");
        assert!(body["html"].as_str().unwrap().contains("<p>Hi there!!</p>"));
    }

    #[tokio::test]
    async fn resend_uses_message_subject() {
        let (endpoint, captured) = spawn_relay(StatusCode::OK).await;

        notifier(endpoint).notify(&msg(Some("Rebrand"), "Hi there!!")).await.unwrap();

        let (_, body) = captured.lock().unwrap().take().unwrap();
        assert_eq!(body["subject"], "Rebrand");
    }

    #[tokio::test]
    async fn resend_non_success_is_rejected() {
        let (endpoint, _) = spawn_relay(StatusCode::UNPROCESSABLE_ENTITY).await;

        let err = notifier(endpoint).notify(&msg(None, "Hi there!!")).await.unwrap_err();

        match err {
            NotifyError::Rejected { status, body } => {
                assert_eq!(status, 422);
                assert_eq!(body, "relay says no");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn log_notifier_always_succeeds() {
        assert!(LogNotifier.notify(&msg(Some("Hi"), "hello world")).await.is_ok());
    }
}
