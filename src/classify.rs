//! Turns a failed backend call into what the user gets to see.

use api_client::{model::ErrorPayload, Error};

use crate::notification::Notification;

// User-facing text is Portuguese, like the messages the backend sends.
pub const SAVED: &str = "Salvou com sucesso!";
pub const UNAVAILABLE: &str = "Indisponível! Tente mais tarde";
pub const UNEXPECTED: &str = "Erro inesperado!";
pub const UNAUTHORIZED: &str = "Não autorizado";

/// Whether per-field validation errors are shown individually.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldDetail {
    PerField,
    SummaryOnly,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Verdict {
    pub notifications: Vec<Notification>,
    pub invalidate_session: bool,
}

impl Verdict {
    fn notify(notifications: Vec<Notification>) -> Self {
        Self {
            notifications,
            invalidate_session: false,
        }
    }
}

pub fn classify(error: &Error, detail: FieldDetail) -> Verdict {
    match error {
        Error::Unavailable(_) => Verdict::notify(vec![Notification::error(UNAVAILABLE)]),
        Error::Rejected { payload, .. } => match (error.reported_status(), payload) {
            (Some(401), payload) => Verdict {
                notifications: vec![Notification::warning(
                    payload
                        .as_ref()
                        .map_or(UNAUTHORIZED, |p| p.message.as_str()),
                )],
                invalidate_session: true,
            },
            (Some(400..=500), Some(payload)) => {
                Verdict::notify(client_failure(payload, detail))
            }
            _ => Verdict::notify(vec![Notification::error(UNEXPECTED)]),
        },
        Error::Json(_) | Error::Http(_) | Error::BaseUrl(_) | Error::InvalidBookId(_) => {
            Verdict::notify(vec![Notification::error(UNEXPECTED)])
        }
    }
}

fn client_failure(payload: &ErrorPayload, detail: FieldDetail) -> Vec<Notification> {
    match (&payload.field_errors, detail) {
        (Some(field_errors), FieldDetail::PerField) if !field_errors.is_empty() => field_errors
            .iter()
            .map(|e| Notification::error(e.to_string()))
            .collect(),
        _ => vec![Notification::error(payload.message.as_str())],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_client::{model::FieldError, StatusCode};

    fn rejected(status: u16, message: &str, field_errors: Option<Vec<FieldError>>) -> Error {
        Error::Rejected {
            status: StatusCode::from_u16(status).unwrap(),
            payload: Some(ErrorPayload {
                status,
                message: message.to_owned(),
                field_errors,
            }),
        }
    }

    fn isbn_required() -> Vec<FieldError> {
        vec![FieldError {
            field: "isbn".to_owned(),
            message: "required".to_owned(),
        }]
    }

    #[test]
    fn unauthorized_warns_with_backend_message_and_invalidates() {
        let verdict = classify(&rejected(401, "Session expired", None), FieldDetail::PerField);

        assert_eq!(verdict.notifications, vec![Notification::warning("Session expired")]);
        assert!(verdict.invalidate_session);
    }

    #[test]
    fn unauthorized_uses_payload_status_over_http_status() {
        let error = Error::Rejected {
            status: StatusCode::FORBIDDEN,
            payload: Some(ErrorPayload {
                status: 401,
                message: "Token inválido".to_owned(),
                field_errors: None,
            }),
        };

        assert!(classify(&error, FieldDetail::SummaryOnly).invalidate_session);
    }

    #[test]
    fn field_errors_become_one_notification_each() {
        let mut field_errors = isbn_required();
        field_errors.push(FieldError {
            field: "autor".to_owned(),
            message: "required".to_owned(),
        });

        let verdict = classify(
            &rejected(422, "Dados inválidos", Some(field_errors)),
            FieldDetail::PerField,
        );

        assert_eq!(
            verdict.notifications,
            vec![
                Notification::error("isbn: required"),
                Notification::error("autor: required")
            ]
        );
        assert!(!verdict.invalidate_session);
    }

    #[test]
    fn summary_only_shows_top_level_message() {
        let verdict = classify(
            &rejected(422, "Dados inválidos", Some(isbn_required())),
            FieldDetail::SummaryOnly,
        );

        assert_eq!(verdict.notifications, vec![Notification::error("Dados inválidos")]);
    }

    #[test]
    fn empty_field_error_list_falls_back_to_message() {
        let verdict = classify(
            &rejected(400, "Requisição inválida", Some(vec![])),
            FieldDetail::PerField,
        );

        assert_eq!(verdict.notifications, vec![Notification::error("Requisição inválida")]);
    }

    #[test]
    fn status_range_includes_500() {
        let verdict = classify(&rejected(500, "Falha interna", None), FieldDetail::PerField);
        assert_eq!(verdict.notifications, vec![Notification::error("Falha interna")]);
    }

    #[test]
    fn status_above_500_is_unexpected() {
        let verdict = classify(&rejected(503, "Manutenção", None), FieldDetail::PerField);
        assert_eq!(verdict.notifications, vec![Notification::error(UNEXPECTED)]);
    }

    #[test]
    fn rejection_without_payload_is_unexpected() {
        let error = Error::Rejected {
            status: StatusCode::BAD_REQUEST,
            payload: None,
        };

        let verdict = classify(&error, FieldDetail::PerField);
        assert_eq!(verdict.notifications, vec![Notification::error(UNEXPECTED)]);
    }

    #[test]
    fn unauthorized_without_payload_still_signs_out() {
        let error = Error::Rejected {
            status: StatusCode::UNAUTHORIZED,
            payload: None,
        };

        let verdict = classify(&error, FieldDetail::SummaryOnly);
        assert_eq!(verdict.notifications, vec![Notification::warning(UNAUTHORIZED)]);
        assert!(verdict.invalidate_session);
    }

    #[test]
    fn undecodable_record_is_unexpected() {
        let error = Error::Json(serde_json::from_str::<u8>("livro").unwrap_err());

        let verdict = classify(&error, FieldDetail::PerField);
        assert_eq!(verdict.notifications, vec![Notification::error(UNEXPECTED)]);
        assert!(!verdict.invalidate_session);
    }
}
