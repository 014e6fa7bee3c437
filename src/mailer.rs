// src/mailer.rs

use maud::{html, Markup};
use reqwest::blocking::Client;
use serde::Serialize;

use crate::config::MailConfig;

const BREVO_SEND_URL: &str = "https://api.brevo.com/v3/smtp/email";

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("API error: {0}")]
    ApiError(String),
}

/// Transactional mail through Brevo's v3 API.
pub struct BrevoMailer {
    api_key: String,
    sender_email: String,
    sender_name: String,
    client: Client,
}

#[derive(Serialize)]
struct BrevoSender<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Serialize)]
struct BrevoRecipient<'a> {
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BrevoPayload<'a> {
    sender: BrevoSender<'a>,
    to: Vec<BrevoRecipient<'a>>,
    subject: &'a str,
    html_content: String,
}

impl BrevoMailer {
    pub fn new(cfg: &MailConfig) -> Self {
        Self {
            api_key: cfg.api_key.clone(),
            sender_email: cfg.sender_email.clone(),
            sender_name: cfg.sender_name.clone(),
            client: Client::new(),
        }
    }

    pub fn send_welcome(
        &self,
        recipient_email: &str,
        username: &str,
        explore_url: &str,
    ) -> Result<(), MailerError> {
        let payload = BrevoPayload {
            sender: BrevoSender {
                name: &self.sender_name,
                email: &self.sender_email,
            },
            to: vec![BrevoRecipient {
                email: recipient_email,
            }],
            subject: "Welcome to Estate Search!",
            html_content: welcome_email(username, explore_url, &self.sender_name).into_string(),
        };

        let resp = self
            .client
            .post(BREVO_SEND_URL)
            .header("api-key", &self.api_key)
            .json(&payload)
            .send()
            .map_err(|e| MailerError::RequestFailed(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().unwrap_or_else(|_| "(no body)".to_string());
            return Err(MailerError::ApiError(format!("{status} - {body}")));
        }

        Ok(())
    }
}

pub fn welcome_email(username: &str, explore_url: &str, team: &str) -> Markup {
    html! {
        html {
            body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;" {
                div style="max-width: 600px; margin: 0 auto; padding: 20px;" {
                    h2 { "Hello " (username) "," }
                    p { "Thank you for signing up! We're excited to have you onboard." }
                    p { "Browse homes for sale and rent, or post your own property for free." }
                    p style="margin: 25px 0;" {
                        a href=(explore_url)
                          style="background-color: #4CAF50; color: white; padding: 12px 25px; text-decoration: none; border-radius: 5px; display: inline-block;"
                        { "Start Exploring" }
                    }
                    hr style="margin-top: 30px; border: none; border-top: 1px solid #eee;";
                    p style="font-size: 0.8em; color: #999;" { "Best regards, " (team) }
                }
            }
        }
    }
}
