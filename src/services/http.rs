use reqwest::{Client, Response};

use crate::models::{ErrorBody, RegisteredUser, RegistrationRequest};
use crate::services::registration::{AttemptFailure, AttemptOutcome, RegistrationApi};

/// Posts registrations as JSON with reqwest (browser fetch when built for wasm).
#[derive(Clone, Default)]
pub struct HttpRegistrationApi {
    http: Client,
}

impl HttpRegistrationApi {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RegistrationApi for HttpRegistrationApi {
    async fn post(&self, url: &str, request: &RegistrationRequest) -> AttemptOutcome {
        let res = match self.http.post(url).json(request).send().await {
            Ok(res) => res,
            Err(e) if e.is_builder() => return AttemptOutcome::Failed(AttemptFailure::Invalid(e.to_string())),
            Err(e) => return AttemptOutcome::Failed(AttemptFailure::Unreachable(e.to_string())),
        };
        read_outcome(res).await
    }
}

async fn read_outcome(res: Response) -> AttemptOutcome {
    let status = res.status();
    let text = match res.text().await {
        Ok(text) => text,
        Err(e) => return AttemptOutcome::Failed(AttemptFailure::Invalid(e.to_string())),
    };
    parse_outcome(status.as_u16(), status.is_success(), &text)
}

/// Interprets a response. Bodies are optional on both paths and a body that
/// isn't the expected JSON is treated as absent.
pub fn parse_outcome(status: u16, success: bool, body: &str) -> AttemptOutcome {
    if success {
        let user = serde_json::from_str::<RegisteredUser>(body).unwrap_or_default();
        return AttemptOutcome::Registered(user);
    }
    AttemptOutcome::Failed(AttemptFailure::Rejected {
        status,
        body: serde_json::from_str::<ErrorBody>(body).unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use crate::services::registration::SubmitError;

    #[test]
    fn success_with_and_without_body() {
        assert_eq!(
            parse_outcome(201, true, r#"{"_id":"abc","username":"ada"}"#),
            AttemptOutcome::Registered(RegisteredUser {
                id: Some("abc".into())
            })
        );
        assert_eq!(
            parse_outcome(204, true, ""),
            AttemptOutcome::Registered(RegisteredUser::default())
        );
    }

    #[test]
    fn rejection_keeps_reported_message() {
        assert_eq!(
            parse_outcome(400, false, r#"{"message":"Username already taken"}"#),
            AttemptOutcome::Failed(AttemptFailure::Rejected {
                status: 400,
                body: ErrorBody {
                    message: Some("Username already taken".into()),
                    error: None,
                },
            })
        );
    }

    #[test]
    fn message_survives_non_string_error_flag() {
        let outcome = parse_outcome(
            400,
            false,
            r#"{"success":false,"error":true,"message":"Username already taken"}"#,
        );
        let AttemptOutcome::Failed(failure) = outcome else {
            panic!("expected a rejection");
        };
        assert_eq!(
            SubmitError::classify(&failure, &ApiConfig::default()),
            SubmitError::Server("Username already taken".into())
        );
    }

    #[test]
    fn html_error_page_has_no_message() {
        assert_eq!(
            parse_outcome(404, false, "<html>Cannot POST /api/users/register</html>"),
            AttemptOutcome::Failed(AttemptFailure::Rejected {
                status: 404,
                body: ErrorBody::default(),
            })
        );
    }

    #[tokio::test]
    async fn unreachable_backend_is_reported_as_connectivity_failure() {
        // Reserve a free port, then release it so nothing is listening there.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let outcome = HttpRegistrationApi::new()
            .post(
                &format!("http://127.0.0.1:{port}/api/users/register"),
                &RegistrationRequest {
                    username: "ada".into(),
                    phone: "0123456789".into(),
                    email: "ada@example.com".into(),
                    password: "secret".into(),
                },
            )
            .await;
        assert!(matches!(
            outcome,
            AttemptOutcome::Failed(AttemptFailure::Unreachable(_))
        ));
    }
}
