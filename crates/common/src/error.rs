/// Error types that can be built from a plain message string.
///
/// Implement this for a crate's error type, then invoke [`impl_context!`]
/// in its error module to get `.context()` and `.with_context()` on
/// `Result` and `Option`.
pub trait FromMessage: Sized {
    fn from_message(message: String) -> Self;
}

/// Generate a crate-local `Context` trait with `.context()` and
/// `.with_context()` on `Result` and `Option`.
///
/// The invoking module must define `Error: FromMessage` and
/// `type Result<T> = std::result::Result<T, Error>`.
///
/// ```ignore
/// // in crates/config/src/error.rs
/// fenbot_common::impl_context!();
/// ```
#[macro_export]
macro_rules! impl_context {
    () => {
        pub trait Context<T> {
            fn context(self, context: impl Into<String>) -> Result<T>;
            fn with_context<C, F>(self, f: F) -> Result<T>
            where
                C: Into<String>,
                F: FnOnce() -> C;
        }

        impl<T, E: std::fmt::Display> Context<T> for std::result::Result<T, E> {
            fn context(self, context: impl Into<String>) -> Result<T> {
                let ctx = context.into();
                self.map_err(|source| {
                    <Error as $crate::FromMessage>::from_message(format!("{ctx}: {source}"))
                })
            }

            fn with_context<C, F>(self, f: F) -> Result<T>
            where
                C: Into<String>,
                F: FnOnce() -> C,
            {
                self.map_err(|source| {
                    let ctx = f().into();
                    <Error as $crate::FromMessage>::from_message(format!("{ctx}: {source}"))
                })
            }
        }

        impl<T> Context<T> for Option<T> {
            fn context(self, context: impl Into<String>) -> Result<T> {
                self.ok_or_else(|| <Error as $crate::FromMessage>::from_message(context.into()))
            }

            fn with_context<C, F>(self, f: F) -> Result<T>
            where
                C: Into<String>,
                F: FnOnce() -> C,
            {
                self.ok_or_else(|| <Error as $crate::FromMessage>::from_message(f().into()))
            }
        }
    };
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    enum Error {
        #[error("{0}")]
        Message(String),
    }

    impl FromMessage for Error {
        fn from_message(message: String) -> Self {
            Self::Message(message)
        }
    }

    type Result<T> = std::result::Result<T, Error>;

    crate::impl_context!();

    #[test]
    fn context_prefixes_result_errors() {
        let res: std::result::Result<(), std::fmt::Error> = Err(std::fmt::Error);
        let err = res.context("formatting reply").unwrap_err();
        assert_eq!(
            err.to_string(),
            "formatting reply: an error occurred when formatting an argument"
        );
    }

    #[test]
    fn with_context_is_lazy_on_success() {
        let res: std::result::Result<u8, std::fmt::Error> = Ok(3);
        let value = res
            .with_context(|| -> String { unreachable!("context built for Ok") })
            .unwrap();
        assert_eq!(value, 3);
    }

    #[test]
    fn context_turns_none_into_message() {
        let value: Option<u8> = None;
        let err = value.with_context(|| "no anchor").unwrap_err();
        assert!(matches!(err, Error::Message(ref m) if m == "no anchor"));
    }
}
