use thiserror::Error;

#[derive(Error, Debug)]
pub enum FactoryError {
    #[error("data load error: {0}")] DataLoad(String),
    #[error("parse error: {0}")] Parse(String),
    #[error("unknown template: {0}")] Template(String),
    #[error("generation error: {0}")] Generation(String),
    #[error("render error: {0}")] Render(String),
    #[error("write error: {0}")] Write(String),
}

pub type Result<T> = std::result::Result<T, FactoryError>;
