use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Data de lançamento `{0}` inválida, use dd/mm/aaaa")]
    ReleaseDate(String),
}

pub type Result<A> = std::result::Result<A, Error>;
