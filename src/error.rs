use crate::Code;

/// Short form for results carrying a codec [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Failure modes of decoding and deserialization.
///
/// Encoding is total over byte inputs and has no error surface. Nothing is
/// ever logged and no partial output is committed when one of these is
/// returned.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The input cannot be resolved under the dictionary rules. The caller
    /// should reject the input; no default value is ever substituted.
    #[error("corrupt data: {0}")]
    CorruptData(#[from] CorruptKind),
    /// The dictionary growth discipline was violated by the caller. This is
    /// a programming error, not a property of the input.
    #[error("internal inconsistency: {0}")]
    InternalInconsistency(&'static str),
}

/// The specific way an input failed to resolve.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CorruptKind {
    /// A code that is neither an assigned entry nor the next code the
    /// dictionary would assign.
    #[error("code {code} is not assigned (dictionary holds {size} entries)")]
    UnknownCode {
        /// The offending code.
        code: Code,
        /// Dictionary size at the point the code was consumed.
        size: usize,
    },
    /// Binary input that ends in half a code word.
    #[error("binary stream of {0} bytes is not a whole number of 16-bit codes")]
    TruncatedBinary(usize),
    /// A textual token that does not parse as a 16-bit decimal code.
    #[error("malformed code token {0:?}")]
    MalformedToken(String),
}
