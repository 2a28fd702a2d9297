use serde::{Deserialize, Serialize};
use std::fmt;
use time::Date;

time::serde::format_description!(release_date, Date, "[year]-[month]-[day]");

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookId(pub String);

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self(id) = self;
        write!(f, "{id}")
    }
}

impl From<u64> for BookId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// Body of `GET /livros/{id}`, `POST /livros` and `PUT /livros/{id}`.
///
/// The identifier is addressed through the URL only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInfo {
    pub isbn: String,

    #[serde(rename = "descricao")]
    pub description: String,

    #[serde(rename = "autor")]
    pub author: String,

    #[serde(rename = "dtLancamento", with = "release_date")]
    pub release_date: Date,
}

/// Error body returned by the backend on non-2xx responses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub status: u16,

    #[serde(rename = "mensagem", default)]
    pub message: String,

    #[serde(rename = "erros", default, skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<Vec<FieldError>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(rename = "campo")]
    pub field: String,

    #[serde(rename = "mensagem")]
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Value of the `Authorization` header, passed through verbatim.
#[derive(Clone, PartialEq, Eq)]
pub struct Authorization(pub String);

// Keeps tokens out of log lines.
impl fmt::Debug for Authorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Authorization(..)")
    }
}
