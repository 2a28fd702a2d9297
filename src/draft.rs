use api_client::model::BookInfo;
use std::fmt;
use time::{macros::format_description, Date, OffsetDateTime};

use crate::error::{Error, Result};

/// Fields a book must carry before it can be saved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Isbn,
    Description,
    Author,
    ReleaseDate,
}

impl Field {
    /// Name the backend uses for the field, also used in user-facing messages.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Isbn => "isbn",
            Field::Description => "descricao",
            Field::Author => "autor",
            Field::ReleaseDate => "dtLancamento",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Client-local working copy of a book's fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Draft {
    pub isbn: String,
    pub author: String,
    pub description: String,
    pub release_date: Date,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            isbn: String::new(),
            author: String::new(),
            description: String::new(),
            release_date: today(),
        }
    }
}

/// The user's calendar day, or the UTC one when the local offset cannot be
/// determined (multi-threaded processes on some Unix platforms).
pub fn today() -> Date {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .date()
}

impl Draft {
    /// Required text fields that are empty or blank, in form order.
    pub fn missing_fields(&self) -> Vec<Field> {
        [
            (Field::Isbn, &self.isbn),
            (Field::Description, &self.description),
            (Field::Author, &self.author),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    /// Release date as shown in the form, `dd/mm/yyyy`.
    pub fn release_date_text(&self) -> String {
        // The description is static and valid for every Date.
        self.release_date
            .format(format_description!("[day]/[month]/[year]"))
            .unwrap_or_default()
    }

    pub fn set_release_date_text(&mut self, text: &str) -> Result<()> {
        let text = text.trim();
        self.release_date = Date::parse(text, format_description!("[day]/[month]/[year]"))
            .map_err(|_| Error::ReleaseDate(text.to_owned()))?;
        Ok(())
    }

    pub fn to_book_info(&self) -> BookInfo {
        BookInfo {
            isbn: self.isbn.clone(),
            description: self.description.clone(),
            author: self.author.clone(),
            release_date: self.release_date,
        }
    }
}

impl From<BookInfo> for Draft {
    fn from(
        BookInfo {
            isbn,
            description,
            author,
            release_date,
        }: BookInfo,
    ) -> Self {
        Self {
            isbn,
            author,
            description,
            release_date,
        }
    }
}
