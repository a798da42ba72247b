/// Recoverable failures caused by input data rather than caller logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SpanError {
    /// The input does not match the expected grammar (numbers, literals).
    #[error("unexpected character in input")]
    UnexpectedCharacter,
    /// The destination span cannot hold the output.
    #[error("destination span is too small")]
    InsufficientSize,
    /// Caller-supplied indices or sizes are out of range.
    #[error("invalid argument")]
    ArgumentError,
    /// The input ended before the expected content.
    #[error("unexpected end of input")]
    EndOfInput,
    /// A scan reached the end without finding a match.
    #[error("item not found")]
    ItemNotFound,
    /// The value cannot be represented faithfully (e.g. doubles above 2^53 - 1).
    #[error("operation not supported for this value")]
    NotSupported,
}

pub type Result<T> = std::result::Result<T, SpanError>;
