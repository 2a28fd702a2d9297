use anyhow::Result;
use clap::{Args, Subcommand};
use std::fmt;

use livro::{BookId, Draft, Level, Notification};

#[derive(Subcommand)]
pub enum Command {
    /// Print the stored fields of a book.
    Show {
        #[arg(long, help = "ID of the book")]
        id: String,
    },
    /// Create a book, or update it when --id is given.
    Save {
        #[arg(long, help = "ID of the book to update")]
        id: Option<String>,

        #[command(flatten)]
        fields: BookFields,
    },
}

#[derive(Args)]
pub struct BookFields {
    #[arg(long, help = "ISBN of the book")]
    pub isbn: Option<String>,

    #[arg(long, help = "Author of the book")]
    pub author: Option<String>,

    #[arg(long, help = "Description of the book")]
    pub description: Option<String>,

    #[arg(long, help = "Release date, dd/mm/yyyy")]
    pub release_date: Option<String>,
}

impl BookFields {
    /// Overwrites the fields that were given on the command line.
    pub fn apply_to(self, draft: &mut Draft) -> Result<()> {
        let BookFields {
            isbn,
            author,
            description,
            release_date,
        } = self;

        if let Some(isbn) = isbn {
            draft.isbn = isbn;
        }
        if let Some(author) = author {
            draft.author = author;
        }
        if let Some(description) = description {
            draft.description = description;
        }
        if let Some(release_date) = release_date {
            draft.set_release_date_text(&release_date)?;
        }
        Ok(())
    }
}

pub fn book_id(id: String) -> BookId {
    BookId(id)
}

pub struct Book<'a>(pub &'a Draft);

impl fmt::Display for Book<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self(draft) = self;
        writeln!(f, "{} [{}]", draft.description, draft.isbn)?;
        writeln!(f, "{}", draft.author)?;
        write!(f, "Lançado em {}", draft.release_date_text())
    }
}

pub struct Notice(pub Notification);

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self(Notification { level, message }) = self;
        let tag = match level {
            Level::Success => "ok",
            Level::Warning => "aviso",
            Level::Error => "erro",
        };
        write!(f, "{tag}: {message}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_given_fields_are_overwritten() {
        let mut draft = Draft {
            isbn: "978-85-359-0277-5".to_owned(),
            author: "Machado de Assis".to_owned(),
            description: "Dom Casmurro".to_owned(),
            ..Draft::default()
        };
        let fields = BookFields {
            isbn: None,
            author: None,
            description: Some("Memórias Póstumas de Brás Cubas".to_owned()),
            release_date: Some("01/01/1881".to_owned()),
        };

        fields.apply_to(&mut draft).unwrap();

        assert_eq!(draft.isbn, "978-85-359-0277-5");
        assert_eq!(draft.description, "Memórias Póstumas de Brás Cubas");
        assert_eq!(draft.release_date_text(), "01/01/1881");
    }

    #[test]
    fn bad_release_date_is_an_error() {
        let fields = BookFields {
            isbn: None,
            author: None,
            description: None,
            release_date: Some("1881".to_owned()),
        };

        assert!(fields.apply_to(&mut Draft::default()).is_err());
    }

    #[test]
    fn notice_is_tagged_with_level() {
        let notice = Notice(Notification::warning("Session expired"));
        assert_eq!(notice.to_string(), "aviso: Session expired");
    }
}
