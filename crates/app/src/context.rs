//! Application context: the single owner of session state.
//!
//! Consumers get the context by reference. Every mutation of the session goes
//! through here so the REST client's bearer token and the navigator never
//! disagree with the store.

use std::future::Future;

use chrono::Utc;
use thiserror::Error;

use homestay_auth::{KeyValueStore, SessionStore, UserProfile, validate_claims};
use homestay_client::dto::{LoginRequest, RegisterRequest, UpdateProfileRequest};
use homestay_client::{ApiClient, ApiError, ClientConfig};
use homestay_core::{DomainError, UserId};
use homestay_router::{NavigationError, NavigationOutcome, Navigator, ResolvedRoute, RouteName};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Invalid(#[from] DomainError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

impl AppError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Api(err) if err.is_unauthorized())
    }

    /// Text suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Invalid(DomainError::Validation(msg)) => msg.clone(),
            AppError::Invalid(err) => err.to_string(),
            AppError::Api(err) => err.user_message(),
            AppError::Navigation(err) => err.to_string(),
        }
    }
}

pub struct AppContext<S> {
    session: SessionStore<S>,
    api: ApiClient,
    navigator: Navigator,
}

impl<S: KeyValueStore> AppContext<S> {
    pub fn new(store: S, config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self::with_client(store, ApiClient::new(config)?))
    }

    pub fn with_client(store: S, api: ApiClient) -> Self {
        Self {
            session: SessionStore::new(store),
            api,
            navigator: Navigator::new(),
        }
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    /// Bearer credential the REST client currently sends.
    pub fn client_token(&self) -> Option<&str> {
        self.api.token()
    }

    pub fn current_route(&self) -> Option<&ResolvedRoute> {
        self.navigator.current()
    }

    /// Rehydrate the session from durable storage.
    ///
    /// An expired token is kept; the backend's 401 ends the session on the
    /// next authenticated call.
    pub fn start(&mut self) {
        self.session.restore();
        self.sync_token();

        if let Some(claims) = self.session.token_claims() {
            if let Err(err) = validate_claims(&claims, Utc::now()) {
                tracing::info!(error = %err, "restored token looks stale");
            }
        }
    }

    pub async fn login(&mut self, request: &LoginRequest) -> Result<UserProfile, AppError> {
        request.validate()?;
        let response = self.api.auth().login(request).await?;
        let (token, profile) = response.into_parts();

        self.session.set_token(Some(token));
        self.session.set_user(Some(profile.clone()));
        self.sync_token();
        tracing::info!(user_id = %profile.id, role = %profile.role, "signed in");
        Ok(profile)
    }

    /// Create an account. Does not sign in.
    pub async fn register(&self, request: &RegisterRequest) -> Result<UserId, AppError> {
        request.validate()?;
        Ok(self.api.auth().register(request).await?)
    }

    /// Re-fetch the signed-in user's profile and store it.
    pub async fn refresh_profile(&mut self) -> Result<UserProfile, AppError> {
        let profile = self.call(|api| async move { api.users().profile().await }).await?;
        self.session.set_user(Some(profile.clone()));
        Ok(profile)
    }

    pub async fn update_profile(&mut self, request: &UpdateProfileRequest) -> Result<UserProfile, AppError> {
        request.validate()?;
        let request = request.clone();
        let profile = self
            .call(|api| async move { api.users().update_profile(&request).await })
            .await?;
        self.session.set_user(Some(profile.clone()));
        Ok(profile)
    }

    /// End the session and land on the login page.
    pub fn logout(&mut self) -> Result<NavigationOutcome, AppError> {
        self.session.logout();
        self.sync_token();
        Ok(self.navigator.navigate_named(RouteName::Login, &self.session)?)
    }

    pub fn navigate(&mut self, path: &str) -> Result<NavigationOutcome, AppError> {
        Ok(self.navigator.navigate(path, &self.session)?)
    }

    /// Run an authenticated backend call under the 401 policy.
    ///
    /// The closure receives a handle carrying the session's credential:
    ///
    /// ```ignore
    /// let orders = ctx.call(|api| async move { api.orders().mine(page).await }).await?;
    /// ```
    pub async fn call<T, F, Fut>(&mut self, request: F) -> Result<T, AppError>
    where
        F: FnOnce(ApiClient) -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        self.require_token()?;
        let result = request(self.api.clone()).await;
        self.check(result)
    }

    /// Route an authenticated call's result through the 401 policy: an
    /// `Unauthorized` answer ends the session before the error is returned.
    fn check<T>(&mut self, result: Result<T, ApiError>) -> Result<T, AppError> {
        match result {
            Err(ApiError::Unauthorized) => {
                tracing::warn!("backend rejected the session credential; signing out");
                self.logout()?;
                Err(ApiError::Unauthorized.into())
            }
            other => Ok(other?),
        }
    }

    fn require_token(&self) -> Result<(), AppError> {
        match self.session.token() {
            Some(_) => Ok(()),
            None => Err(ApiError::Unauthorized.into()),
        }
    }

    fn sync_token(&mut self) {
        self.api.set_token(self.session.token().map(str::to_string));
    }
}
