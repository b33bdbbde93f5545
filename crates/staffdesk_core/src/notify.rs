//! Welcome notification sent after a new employee record is created.
//!
//! # Invariants
//! - Notification failure never rolls back the created record.
//! - Log events carry the record id only, never the address or body.

use crate::model::employee::Employee;
use crate::repo::content_api::RemoteError;
use crate::repo::http_api::send_checked;
use async_trait::async_trait;
use log::{info, warn};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

const NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

pub const WELCOME_SUBJECT: &str = "Welcome to Our Company!";

/// Outgoing welcome email request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WelcomeEmail {
    pub to: String,
    pub subject: String,
    pub text: String,
}

impl WelcomeEmail {
    pub fn for_employee(employee: &Employee) -> Self {
        let position = employee.position_label().unwrap_or_default();
        let department = employee.department_label().unwrap_or_default();
        Self {
            to: employee.email.clone(),
            subject: WELCOME_SUBJECT.to_string(),
            text: format!(
                "Hi {},\n\nWelcome to our company! Your employee profile has been created successfully.\n\nPosition: {}\nDepartment: {}\n\nBest regards,\nHR Team",
                employee.name, position, department
            ),
        }
    }
}

/// Result of the post-create notification step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationStatus {
    NotConfigured,
    Sent,
    /// Human-readable reason; the record itself was created.
    Failed(String),
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_welcome(&self, email: &WelcomeEmail) -> Result<(), RemoteError>;
}

/// Posts welcome emails as JSON to a notification endpoint.
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    client: Client,
    endpoint: String,
}

impl HttpNotifier {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, RemoteError> {
        let client = Client::builder().timeout(NOTIFY_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn send_welcome(&self, email: &WelcomeEmail) -> Result<(), RemoteError> {
        send_checked(self.client.post(&self.endpoint).json(email)).await?;
        Ok(())
    }
}

/// Sends the welcome email for `employee` and reports the outcome.
pub async fn notify_welcome(notifier: Option<&dyn Notifier>, employee: &Employee) -> NotificationStatus {
    let Some(notifier) = notifier else {
        return NotificationStatus::NotConfigured;
    };

    match notifier.send_welcome(&WelcomeEmail::for_employee(employee)).await {
        Ok(()) => {
            info!("event=welcome_notify module=notify status=ok id={}", employee.id);
            NotificationStatus::Sent
        }
        Err(err) => {
            warn!(
                "event=welcome_notify module=notify status=error id={} error={}",
                employee.id, err
            );
            NotificationStatus::Failed(err.to_string())
        }
    }
}
