use reqwest::{Client, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tokio::runtime::Handle;

use super::{FetchError, models::LoginForm};
use crate::prelude::*;

pub const LOGIN: &str = "/login";
pub const LOGOUT: &str = "/logout";

/// Logged-in portal session.
///
/// The cookie jar lives in the client, so the session owns the client and nobody else may reuse it.
/// Dropping an open session (for example, when the refresh gets cancelled) fires a logout
/// in the background.
pub struct Session {
    client: Client,
    base_url: String,
    is_open: bool,
}

impl Session {
    /// Log in and take ownership of the client.
    ///
    /// The client must have the cookie store enabled.
    #[instrument(skip_all, fields(username = username))]
    pub async fn login(
        client: Client,
        base_url: &str,
        username: &str,
        password: &SecretString,
    ) -> Result<Self, FetchError> {
        info!("logging in…");
        let mut session = Self { client, base_url: base_url.to_string(), is_open: false };
        let form = LoginForm {
            lang: "en",
            username,
            password: password.expose_secret(),
            remember_me: true,
        };
        let response = session
            .client
            .post(session.url(LOGIN))
            .form(&form)
            .send()
            .await
            .map_err(|source| FetchError::Transport { path: LOGIN, source })?;
        match response.status() {
            StatusCode::UNAUTHORIZED => Err(FetchError::Unauthorized { path: LOGIN }),
            status if !status.is_success() => Err(FetchError::Status { path: LOGIN, status }),
            _ => {
                session.is_open = true;
                Ok(session)
            }
        }
    }

    /// Best-effort logout, failures are only logged.
    #[instrument(skip_all)]
    pub async fn logout(mut self) {
        self.is_open = false;
        match self.client.post(self.url(LOGOUT)).send().await {
            Ok(response) => debug!(status = %response.status(), "logged out"),
            Err(error) => warn!("failed to log out: {error:#}"),
        }
    }

    #[instrument(skip_all, level = Level::DEBUG, fields(path = path))]
    pub async fn post<Q, F>(
        &self,
        path: &'static str,
        query: &Q,
        form: &F,
    ) -> Result<serde_json::Value, FetchError>
    where
        Q: Serialize + ?Sized,
        F: Serialize + ?Sized,
    {
        Self::call(path, self.client.post(self.url(path)).query(query).form(form)).await
    }

    #[instrument(skip_all, level = Level::DEBUG, fields(path = path))]
    pub async fn get<Q>(
        &self,
        path: &'static str,
        query: &Q,
    ) -> Result<serde_json::Value, FetchError>
    where
        Q: Serialize + ?Sized,
    {
        Self::call(path, self.client.get(self.url(path)).query(query)).await
    }

    async fn call(
        path: &'static str,
        request: RequestBuilder,
    ) -> Result<serde_json::Value, FetchError> {
        let response =
            request.send().await.map_err(|source| FetchError::Transport { path, source })?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { path, status });
        }
        let body = response.bytes().await.map_err(|source| FetchError::Transport { path, source })?;
        let value: serde_json::Value =
            serde_json::from_slice(&body).map_err(|source| FetchError::Json { path, source })?;
        debug!(n_bytes = body.len(), "call succeeded");
        trace!(%value);
        Ok(value)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if !self.is_open {
            return;
        }
        let Ok(runtime) = Handle::try_current() else {
            warn!("abandoned the session without a runtime to log out");
            return;
        };
        warn!("session abandoned, logging out in the background…");
        let request = self.client.post(self.url(LOGOUT));
        runtime.spawn(async move {
            if let Err(error) = request.send().await {
                warn!("failed to log out: {error:#}");
            }
        });
    }
}
