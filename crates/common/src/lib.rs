/// Common types and utilities for the binding generator

/// Error type for binding generation
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An ABI type string does not match any known pattern for its kind
    #[error("Malformed type descriptor: {0}")]
    MalformedTypeDescriptor(String),

    /// The target language cannot express a tuple type
    #[error("{language} binding for tuple type {signature} is not supported")]
    UnsupportedTupleBinding {
        language: String,
        signature: String,
    },

    /// Two distinct tuple shapes ended up with the same display name
    #[error("Duplicate struct name '{name}' for tuples {first} and {second}")]
    DuplicateStructName {
        name: String,
        first: String,
        second: String,
    },

    /// The ABI JSON is not a well-formed contract ABI
    #[error("Invalid ABI: {0}")]
    InvalidAbi(String),

    /// Invalid binding configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Create a new malformed type descriptor error
    pub fn malformed_type<S: Into<String>>(msg: S) -> Self {
        Error::MalformedTypeDescriptor(msg.into())
    }

    /// Create a new unsupported tuple binding error
    pub fn unsupported_tuple<L: Into<String>, S: Into<String>>(
        language: L,
        signature: S,
    ) -> Self {
        Error::UnsupportedTupleBinding {
            language: language.into(),
            signature: signature.into(),
        }
    }

    /// Create a new duplicate struct name error
    pub fn duplicate_struct<N, A, B>(name: N, first: A, second: B) -> Self
    where
        N: Into<String>,
        A: Into<String>,
        B: Into<String>,
    {
        Error::DuplicateStructName {
            name: name.into(),
            first: first.into(),
            second: second.into(),
        }
    }

    /// Create a new invalid ABI error
    pub fn invalid_abi<S: Into<String>>(msg: S) -> Self {
        Error::InvalidAbi(msg.into())
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a new serialization error
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        Error::Serialization(msg.into())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(format!("JSON serialization error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::malformed_type("uint7");
        assert_eq!(err.to_string(), "Malformed type descriptor: uint7");

        let err = Error::unsupported_tuple("java", "(address,uint8)");
        assert_eq!(
            err.to_string(),
            "java binding for tuple type (address,uint8) is not supported"
        );

        let err = Error::duplicate_struct("Pair", "(uint8)", "(uint16)");
        assert!(err.to_string().contains("'Pair'"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
