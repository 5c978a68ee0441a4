use std::{error::Error, fmt::Display};

/// The catch all error of this workspace.
/// Library errors convert into it, so fallible glue code can use `?` on all of them.
#[derive(Debug)]
pub enum BpError {
    /// A plain error message.
    StringBpError(String),
    /// An error annotated with where it surfaced.
    RethrowBpError(String, Box<dyn Error>),
    /// Any other library error.
    OtherBpError(Box<dyn Error>),
}

/// Result type going with [BpError].
pub type BpResult<O> = Result<O, BpError>;

impl Display for BpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BpError::StringBpError(str) => str.fmt(f),
            BpError::RethrowBpError(str, err) => {
                str.fmt(f)?;
                " with: ".fmt(f)?;
                err.fmt(f)?;
                Ok(())
            }
            BpError::OtherBpError(err) => err.fmt(f),
        }
    }
}
impl Error for BpError {}

impl BpError {
    /// Annotates a BpError with a message to make the origin of an error visible.
    /// # Usage
    /// ```
    /// # use common::{BpError, BpResult};
    /// # fn parse_snapshot() -> BpResult<()> {
    /// # Err(BpError::StringBpError("".into()))
    /// # }
    /// # fn load_tree() -> BpResult<()> {
    /// parse_snapshot().map_err(BpError::rethrow_with("loading the tree failed"))?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn rethrow_with(str: &'static str) -> impl Fn(BpError) -> BpError {
        move |err| BpError::RethrowBpError(str.to_string(), Box::new(err))
    }
}

macro_rules! implement_from {
    ($type:ty) => {
        impl From<$type> for BpError {
            fn from(other: $type) -> Self {
                BpError::OtherBpError(Box::from(other))
            }
        }
    };
}
implement_from!(std::io::Error);
implement_from!(serde_json::Error);

impl<'a> From<&'a str> for BpError {
    fn from(other: &'a str) -> Self {
        BpError::StringBpError(other.to_string())
    }
}
impl From<String> for BpError {
    fn from(other: String) -> Self {
        BpError::StringBpError(other)
    }
}
