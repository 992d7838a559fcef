use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

/// The stage a compilation stopped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    Semantic,
    Output,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn kind(&self) -> ErrorKind {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } | ErrorImpl::NumberParseError { .. } => {
                ErrorKind::Lexical
            }
            ErrorImpl::UnexpectedToken { .. } => ErrorKind::Syntax,
            ErrorImpl::UndefinedSymbol { .. }
            | ErrorImpl::UndefinedVariable { .. }
            | ErrorImpl::UnsupportedOperator { .. }
            | ErrorImpl::LoopNestingTooDeep { .. } => ErrorKind::Semantic,
            ErrorImpl::OutputError => ErrorKind::Output,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UndefinedSymbol { .. } => "UndefinedSymbol",
            ErrorImpl::UndefinedVariable { .. } => "UndefinedVariable",
            ErrorImpl::UnsupportedOperator { .. } => "UnsupportedOperator",
            ErrorImpl::LoopNestingTooDeep { .. } => "LoopNestingTooDeep",
            ErrorImpl::OutputError => "OutputError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it outside the 32-bit integer range?",
                token
            )),
            ErrorImpl::UnexpectedToken { token, expected } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, expected {}",
                token, expected
            )),
            ErrorImpl::UndefinedSymbol { symbol } => ErrorTip::Suggestion(format!(
                "Word `{}` is not defined, words must be defined before they are used",
                symbol
            )),
            ErrorImpl::UndefinedVariable { variable } => ErrorTip::Suggestion(format!(
                "`{}` is not a variable, declare it with `variable {}`",
                variable, variable
            )),
            ErrorImpl::UnsupportedOperator { operator } => {
                ErrorTip::Suggestion(format!("Operator `{}` is not supported", operator))
            }
            ErrorImpl::LoopNestingTooDeep { limit } => ErrorTip::Suggestion(format!(
                "At most {} `do ... loop` levels may be nested",
                limit
            )),
            ErrorImpl::OutputError => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}:{}", self.internal_error, self.position.1, self.position.0)
    }
}

impl std::error::Error for Error {}

impl From<std::fmt::Error> for Error {
    fn from(_: std::fmt::Error) -> Self {
        Error::new(ErrorImpl::OutputError, Position::null())
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("unexpected token {token:?}, expected {expected}")]
    UnexpectedToken { token: String, expected: String },
    #[error("undefined symbol: {symbol:?}")]
    UndefinedSymbol { symbol: String },
    #[error("undefined variable: {variable:?}")]
    UndefinedVariable { variable: String },
    #[error("unsupported operator: {operator:?}")]
    UnsupportedOperator { operator: String },
    #[error("counted loops nested deeper than {limit}")]
    LoopNestingTooDeep { limit: usize },
    #[error("failed to write generated output")]
    OutputError,
}
