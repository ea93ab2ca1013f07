use crate::{
    services::addon_service::response_message,
    transport::{ApiClient, RequestOptions},
    validators::login_validator::LoginValidator,
    Result,
};

pub struct AuthService;

impl AuthService {
    /// Logs in; the session cookie lands in the client's cookie jar and rides
    /// along on every later request made with the same `ApiClient`.
    pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<Option<String>> {
        let request = LoginValidator::validate(email, password)?;

        tracing::info!("logging in as {}", request.email);
        let response = client
            .post("/api/auth/login", &request, RequestOptions::default())
            .await
            .inspect_err(|err| tracing::warn!("login failed: {}", err))?;

        Ok(response_message(&response))
    }
}
