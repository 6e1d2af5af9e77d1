//! Transactional email channel over the SendGrid v3 Mail Send API.
//!
//! Single attempt per message. A non-2xx reply surfaces as
//! `DispatchError::Rejected` carrying SendGrid's first error message.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::SendGridConfig;
use crate::notify::templates::render;
use crate::notify::{Decision, DispatchError, NotificationChannel};

#[derive(Debug, Serialize)]
struct MailSendRequest<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: Address<'a>,
    subject: &'a str,
    content: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: Vec<Address<'a>>,
}

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    content_type: &'a str,
    value: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendGridErrors {
    errors: Vec<SendGridErrorBody>,
}

#[derive(Debug, Deserialize)]
struct SendGridErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct EmailChannel {
    client: Client,
    api_url: String,
    api_key: String,
    from_email: String,
}

impl EmailChannel {
    pub fn new(config: &SendGridConfig) -> Result<Self, DispatchError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()?,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            from_email: config.from_email.clone(),
        })
    }
}

fn build_request<'a>(
    from_email: &'a str,
    decision: &'a Decision,
    subject: &'a str,
    body: &'a str,
) -> MailSendRequest<'a> {
    MailSendRequest {
        personalizations: vec![Personalization {
            to: vec![Address {
                email: &decision.email,
                name: Some(&decision.candidate_name),
            }],
        }],
        from: Address {
            email: from_email,
            name: None,
        },
        subject,
        content: vec![Content {
            content_type: "text/plain",
            value: body,
        }],
    }
}

#[async_trait]
impl NotificationChannel for EmailChannel {
    fn name(&self) -> &'static str {
        "email"
    }

    async fn deliver(&self, decision: &Decision) -> Result<(), DispatchError> {
        let message = render(decision);
        let request_body =
            build_request(&self.from_email, decision, &message.subject, &message.body);

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<SendGridErrors>(&body)
                .ok()
                .and_then(|e| e.errors.into_iter().next())
                .map(|e| e.message)
                .unwrap_or(body);
            warn!("SendGrid returned {status}: {message}");
            return Err(DispatchError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        debug!("Sent {:?} email to {}", decision.kind, decision.email);
        Ok(())
    }
}
