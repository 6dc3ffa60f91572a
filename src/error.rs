use thiserror::Error;

#[derive(Error, Debug)]
#[error("{0}")]
pub struct SimplexError(String);

impl SimplexError {
    pub fn new(msg: String) -> Self {
        Self(msg)
    }
}
