use thiserror::Error;

pub mod constants;
pub mod entities;
pub mod functional;

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum CardError {
    #[error("invalid card value {value:?}")]
    InvalidCard { value: char },
    #[error("invalid card {token:?}")]
    InvalidToken { token: String },
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum HandError {
    #[error(transparent)]
    Card(#[from] CardError),
    #[error("need 5 cards but got {count}")]
    WrongCardCount { count: usize },
}
