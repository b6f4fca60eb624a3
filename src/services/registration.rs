use std::future::Future;

use crate::config::{ApiConfig, FallbackPolicy};
use crate::models::{ErrorBody, ErrorMap, FormData, RegisteredUser, RegistrationRequest};
use crate::services::validation;

pub const SUCCESS_MESSAGE: &str = "Account created successfully! Please login.";

/// Which of the two registration endpoints an attempt went to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Register,
    Fallback,
}

/// Result of posting the form to one endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Registered(RegisteredUser),
    Failed(AttemptFailure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptFailure {
    /// The backend answered with a non-success status.
    Rejected { status: u16, body: ErrorBody },
    /// No response was received.
    Unreachable(String),
    /// The request could not be built or the response could not be read.
    Invalid(String),
}

impl AttemptFailure {
    fn is_server_fault(&self) -> bool {
        match self {
            AttemptFailure::Unreachable(_) => true,
            AttemptFailure::Rejected { status, .. } => *status == 404 || *status >= 500,
            AttemptFailure::Invalid(_) => false,
        }
    }
}

/// What the user is told when registration did not go through
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("{0}")]
    Server(String),
    #[error("Registration endpoint not found. Please check your backend server.")]
    NotFound,
    #[error("Server error. Please try again later.")]
    ServerFault,
    #[error("Cannot connect to server. Please check if your backend is running on {base_url}")]
    Connectivity { base_url: String },
    #[error("Registration failed. Please try again.")]
    Failed,
}

impl SubmitError {
    pub fn classify(failure: &AttemptFailure, config: &ApiConfig) -> Self {
        match failure {
            AttemptFailure::Rejected { status, body } => {
                let reported = [&body.message, &body.error]
                    .into_iter()
                    .flatten()
                    .find(|m| !m.is_empty());
                match (reported, status) {
                    (Some(message), _) => SubmitError::Server(message.clone()),
                    (None, 404) => SubmitError::NotFound,
                    (None, 500) => SubmitError::ServerFault,
                    (None, _) => SubmitError::Failed,
                }
            }
            AttemptFailure::Unreachable(_) => SubmitError::Connectivity {
                base_url: config.base_url.clone(),
            },
            AttemptFailure::Invalid(_) => SubmitError::Failed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Validation failed, nothing was sent.
    Invalid(ErrorMap),
    Registered {
        endpoint: Endpoint,
        user: RegisteredUser,
    },
    Failed(SubmitError),
}

/// Transport used to post a registration request.
pub trait RegistrationApi {
    fn post(&self, url: &str, request: &RegistrationRequest) -> impl Future<Output = AttemptOutcome>;
}

/// What the page does in response to the workflow.
pub trait SubmissionEffects {
    fn show_errors(&self, errors: &ErrorMap);
    fn set_submitting(&self, submitting: bool);
    fn notify(&self, message: &str);
    fn go_to_login(&self);
}

pub struct Registrar<A> {
    api: A,
    config: ApiConfig,
}

impl<A: RegistrationApi> Registrar<A> {
    pub fn new(api: A, config: ApiConfig) -> Self {
        Self { api, config }
    }

    /// Validates the form and, when it is clean, registers the account.
    /// The form itself is never modified.
    pub async fn submit<E: SubmissionEffects>(
        &self,
        form: &FormData,
        effects: &E,
    ) -> SubmissionOutcome {
        let errors = validation::validate(form);
        effects.show_errors(&errors);
        if !errors.is_empty() {
            log::debug!("Registration form has {} invalid field(s)", errors.fields().count());
            return SubmissionOutcome::Invalid(errors);
        }

        effects.set_submitting(true);
        let outcome = match self.register(&form.to_request()).await {
            Ok((endpoint, user)) => {
                log::info!(
                    "Registered {} via {:?} endpoint (id: {:?})",
                    form.username,
                    endpoint,
                    user.id
                );
                effects.notify(SUCCESS_MESSAGE);
                effects.go_to_login();
                SubmissionOutcome::Registered { endpoint, user }
            }
            Err(e) => {
                log::error!("Registration of {} failed: {}", form.username, e);
                effects.notify(&e.to_string());
                SubmissionOutcome::Failed(e)
            }
        };
        effects.set_submitting(false);
        outcome
    }

    /// Posts to the register endpoint, then to the fallback endpoint with the same
    /// payload if the first attempt failed. The error reported is the one of the
    /// last attempt made.
    pub async fn register(
        &self,
        request: &RegistrationRequest,
    ) -> Result<(Endpoint, RegisteredUser), SubmitError> {
        let primary = self.attempt(Endpoint::Register, request).await;
        let failure = match primary {
            AttemptOutcome::Registered(user) => return Ok((Endpoint::Register, user)),
            AttemptOutcome::Failed(failure) => failure,
        };

        if !self.should_fall_back(&failure) {
            return Err(SubmitError::classify(&failure, &self.config));
        }
        if !failure.is_server_fault() {
            // A definitive rejection here can be hidden by the fallback's answer.
            log::warn!("Register endpoint rejected the request ({failure:?}), trying fallback anyway");
        } else {
            log::warn!("Register endpoint failed ({failure:?}), trying fallback");
        }

        match self.attempt(Endpoint::Fallback, request).await {
            AttemptOutcome::Registered(user) => Ok((Endpoint::Fallback, user)),
            AttemptOutcome::Failed(failure) => Err(SubmitError::classify(&failure, &self.config)),
        }
    }

    fn should_fall_back(&self, failure: &AttemptFailure) -> bool {
        match self.config.fallback_policy {
            FallbackPolicy::Always => true,
            FallbackPolicy::ServerFaultsOnly => failure.is_server_fault(),
        }
    }

    async fn attempt(&self, endpoint: Endpoint, request: &RegistrationRequest) -> AttemptOutcome {
        let url = match endpoint {
            Endpoint::Register => self.config.register_url(),
            Endpoint::Fallback => self.config.fallback_url(),
        };
        log::debug!("POST {url} for {}", request.username);
        self.api.post(&url, request).await
    }
}
