//! Login, logout and the current user's profile

use tracing::info;

use crate::api::ApiClient;
use crate::error::LedgerResult;
use crate::models::{LoginRequest, LoginResponse, UserInfo};

const LOGIN_PATH: &str = "/api/auth/login";
const PROFILE_PATH: &str = "/api/auth/profile";

pub struct AuthService<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Log in and store the returned token for later commands
    pub fn login(&self, email_or_username: &str, password: &str) -> LedgerResult<LoginResponse> {
        let request = LoginRequest {
            email_or_username: email_or_username.trim().to_string(),
            password: password.to_string(),
        };
        request.validate()?;

        let response: LoginResponse = self.client.post(LOGIN_PATH, &request)?;
        if !response.token.is_empty() {
            self.client.tokens().save(&response.token)?;
        }
        info!(user = %response.user.username, "logged in");
        Ok(response)
    }

    pub fn logout(&self) -> LedgerResult<()> {
        self.client.tokens().clear()?;
        info!("logged out");
        Ok(())
    }

    pub fn is_logged_in(&self) -> bool {
        self.client.tokens().is_logged_in()
    }

    pub fn profile(&self) -> LedgerResult<UserInfo> {
        self.client.get(PROFILE_PATH, Vec::new())
    }
}
