use super::{ApiClient, Session};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::json;
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Outcome of a login attempt.
///
/// Bad credentials and an unreachable backend are distinct, expected
/// outcomes for the caller to render, not errors to propagate.
#[derive(Debug)]
pub enum LoginOutcome {
    Success(Session),
    Invalid { message: String },
    Unreachable { message: String },
}

impl ApiClient {
    pub fn login(&self, credentials: &Credentials) -> LoginOutcome {
        let url = self.url("/api/auth/login");

        let response = match self.agent().post(&url).send_json(credentials) {
            Ok(response) => response,
            Err(ureq::Error::StatusCode(code)) => {
                debug!(status = code, "Login rejected");
                return LoginOutcome::Invalid {
                    message: "Invalid credentials".to_string(),
                };
            }
            Err(err) => {
                warn!(error = %err, "Login request failed");
                return LoginOutcome::Unreachable {
                    message: format!("Cannot reach server at {}: {err}", self.url("")),
                };
            }
        };

        let body: serde_json::Value = match response.into_body().read_json() {
            Ok(body) => body,
            Err(err) => {
                warn!(error = %err, "Failed to parse login response");
                return LoginOutcome::Unreachable {
                    message: "Malformed login response from server".to_string(),
                };
            }
        };

        match body["token"].as_str() {
            Some(token) => {
                debug!(username = %credentials.username, "Admin login succeeded");
                LoginOutcome::Success(Session::new(
                    credentials.username.clone(),
                    token.to_string(),
                ))
            }
            None => LoginOutcome::Invalid {
                message: body["message"]
                    .as_str()
                    .unwrap_or("Invalid credentials")
                    .to_string(),
            },
        }
    }

    /// Request a password-reset token for the given account email.
    pub fn forgot_password(&self, email: &str) -> Result<String> {
        let response = self
            .agent()
            .post(&self.url("/api/auth/forgot"))
            .send_json(&json!({ "email": email }))
            .context("Forgot-password request failed")?;

        read_message(response)
    }

    /// Redeem a reset token for a new password.
    pub fn reset_password(&self, token: &str, new_password: &str) -> Result<String> {
        let response = self
            .agent()
            .post(&self.url("/api/auth/reset-password"))
            .send_json(&json!({ "token": token, "newPassword": new_password }))
            .context("Reset-password request failed")?;

        read_message(response)
    }

    /// Change the password of a logged-in admin.
    pub fn change_password(
        &self,
        session: &Session,
        current_password: &str,
        new_password: &str,
    ) -> Result<String> {
        let response = self
            .agent()
            .post(&self.url("/api/auth/change-password"))
            .header("Authorization", &session.bearer())
            .send_json(&json!({
                "currentPassword": current_password,
                "newPassword": new_password,
            }))
            .context("Change-password request failed")?;

        read_message(response)
    }
}

fn read_message(response: ureq::http::Response<ureq::Body>) -> Result<String> {
    let body: serde_json::Value = response
        .into_body()
        .read_json()
        .context("Failed to parse server response")?;

    Ok(body["message"].as_str().unwrap_or("OK").to_string())
}
