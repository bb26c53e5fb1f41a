#![deny(missing_docs)]

//! This crate defines error & result types for Widecol.
//! It also contains a variety of useful macros for error handling.

use std::backtrace::Backtrace;
use std::borrow::Cow;
use std::fmt::{Debug, Display, Formatter};
use std::ops::Deref;
use std::{env, fmt};

/// A string that can be used as an error message.
#[derive(Debug)]
pub struct ErrString(Cow<'static, str>);

#[allow(clippy::fallible_impl_from)]
impl<T> From<T> for ErrString
where
    T: Into<Cow<'static, str>>,
{
    #[allow(clippy::panic)]
    fn from(msg: T) -> Self {
        if env::var("WIDECOL_PANIC_ON_ERR").as_deref().unwrap_or("") == "1" {
            panic!("{}\nBacktrace:\n{}", msg.into(), Backtrace::capture());
        } else {
            Self(msg.into())
        }
    }
}

impl AsRef<str> for ErrString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for ErrString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for ErrString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

// Alias so `thiserror` does not treat these fields as backtraces and emit the
// nightly-only `Error::provide` implementation.
type CapturedBacktrace = Backtrace;

/// The top-level error type for Widecol.
#[derive(thiserror::Error)]
#[non_exhaustive]
pub enum WidecolError {
    /// A schema could not be turned into a rowset.
    #[error("schema error: {0}\nBacktrace:\n{1}")]
    Schema(ErrString, CapturedBacktrace),
    /// A value's runtime type does not match the type of the field it was offered to.
    #[error("type mismatch: expected {0} but got {1}\nBacktrace:\n{2}")]
    TypeMismatch(ErrString, ErrString, CapturedBacktrace),
    /// A field type that a storage engine cannot represent.
    #[error("unsupported type: {0}\nBacktrace:\n{1}")]
    UnsupportedType(ErrString, CapturedBacktrace),
    /// The external key-value store failed, or returned bytes that could not be decoded.
    #[error("storage backend error: {0}\nBacktrace:\n{1}")]
    StorageBackend(ErrString, CapturedBacktrace),
    /// An invalid argument was provided.
    #[error("{0}\nBacktrace:\n{1}")]
    InvalidArgument(ErrString, CapturedBacktrace),
    /// A wrapper for other errors, carrying additional context.
    #[error("{0}: {1}")]
    Context(ErrString, #[source] Box<WidecolError>),
}

impl WidecolError {
    /// Adds additional context to an error.
    pub fn with_context<T: Into<ErrString>>(self, msg: T) -> Self {
        WidecolError::Context(msg.into(), Box::new(self))
    }

    /// Returns true if this error, or the error it wraps, is a type mismatch.
    pub fn is_type_mismatch(&self) -> bool {
        match self {
            WidecolError::TypeMismatch(..) => true,
            WidecolError::Context(_, inner) => inner.is_type_mismatch(),
            _ => false,
        }
    }

    /// Returns true if this error, or the error it wraps, is a schema error.
    pub fn is_schema(&self) -> bool {
        match self {
            WidecolError::Schema(..) => true,
            WidecolError::Context(_, inner) => inner.is_schema(),
            _ => false,
        }
    }

    /// Returns true if this error, or the error it wraps, came from the storage backend.
    pub fn is_storage_backend(&self) -> bool {
        match self {
            WidecolError::StorageBackend(..) => true,
            WidecolError::Context(_, inner) => inner.is_storage_backend(),
            _ => false,
        }
    }
}

impl Debug for WidecolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

/// A type alias for Results that return WidecolErrors as their error type.
pub type WidecolResult<T> = Result<T, WidecolError>;

/// A trait for unwrapping a WidecolResult.
pub trait WidecolUnwrap {
    /// The type of the value being unwrapped.
    type Output;

    /// Returns the value of the result if it is Ok, otherwise panics with the error.
    /// Should be called only in contexts where the error condition represents a bug (programmer error).
    fn widecol_unwrap(self) -> Self::Output;
}

impl<T, E> WidecolUnwrap for Result<T, E>
where
    E: Into<WidecolError>,
{
    type Output = T;

    #[inline(always)]
    fn widecol_unwrap(self) -> Self::Output {
        self.map_err(|err| err.into())
            .unwrap_or_else(|err| crate::widecol_panic!(err))
    }
}

/// A trait for expect-ing a WidecolResult or an Option.
pub trait WidecolExpect {
    /// The type of the value being expected.
    type Output;

    /// Returns the value of the result if it is Ok, otherwise panics with the error.
    /// Should be called only in contexts where the error condition represents a bug (programmer error).
    fn widecol_expect(self, msg: &str) -> Self::Output;
}

impl<T, E> WidecolExpect for Result<T, E>
where
    E: Into<WidecolError>,
{
    type Output = T;

    #[inline(always)]
    fn widecol_expect(self, msg: &str) -> Self::Output {
        self.map_err(|err| err.into())
            .unwrap_or_else(|e| crate::widecol_panic!(e.with_context(msg.to_string())))
    }
}

impl<T> WidecolExpect for Option<T> {
    type Output = T;

    #[inline(always)]
    fn widecol_expect(self, msg: &str) -> Self::Output {
        self.unwrap_or_else(|| {
            let err = WidecolError::InvalidArgument(msg.to_string().into(), Backtrace::capture());
            crate::widecol_panic!(err)
        })
    }
}

/// A convenient macro for creating a WidecolError.
#[macro_export]
macro_rules! widecol_err {
    (TypeMismatch: $expected:expr, $actual:expr $(,)?) => {{
        use std::backtrace::Backtrace;
        $crate::__private::must_use($crate::WidecolError::TypeMismatch(
            $expected.to_string().into(),
            $actual.to_string().into(),
            Backtrace::capture(),
        ))
    }};
    (Context: $msg:literal, $err:expr) => {{
        $crate::__private::must_use($crate::WidecolError::Context($msg.into(), Box::new($err)))
    }};
    ($variant:ident: $fmt:literal $(, $arg:expr)* $(,)?) => {{
        use std::backtrace::Backtrace;
        $crate::__private::must_use($crate::WidecolError::$variant(
            format!($fmt, $($arg),*).into(),
            Backtrace::capture(),
        ))
    }};
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::widecol_err!(InvalidArgument: $fmt, $($arg),*)
    };
}

/// A convenient macro for returning a WidecolError.
#[macro_export]
macro_rules! widecol_bail {
    ($($tt:tt)+) => {
        return Err($crate::widecol_err!($($tt)+))
    };
}

/// A convenient macro for panicking with a WidecolError in the presence of a programmer error
/// (e.g., an invariant has been violated).
#[macro_export]
macro_rules! widecol_panic {
    (TypeMismatch: $expected:expr, $actual:expr $(,)?) => {
        $crate::widecol_panic!($crate::widecol_err!(TypeMismatch: $expected, $actual))
    };
    ($variant:ident: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::widecol_panic!($crate::widecol_err!($variant: $fmt, $($arg),*))
    };
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::widecol_panic!($crate::widecol_err!($fmt, $($arg),*))
    };
    ($err:expr) => {{
        let err: $crate::WidecolError = $err;
        panic!("{}", err)
    }};
}

#[doc(hidden)]
pub mod __private {
    #[doc(hidden)]
    #[inline]
    #[must_use]
    pub const fn must_use(error: crate::WidecolError) -> crate::WidecolError {
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fails_with_type_mismatch() -> WidecolResult<()> {
        widecol_bail!(TypeMismatch: "int", "text")
    }

    #[test]
    fn type_mismatch_message() {
        let err = fails_with_type_mismatch().unwrap_err();
        assert!(err.is_type_mismatch());
        assert!(
            err.to_string()
                .starts_with("type mismatch: expected int but got text")
        );
    }

    #[test]
    fn context_preserves_kind() {
        let name = "region";
        let err =
            widecol_err!(Schema: "duplicate field name {name}").with_context("building rowset");
        assert!(err.is_schema());
        assert!(!err.is_type_mismatch());
        assert!(
            err.to_string()
                .starts_with("building rowset: schema error: duplicate field name region")
        );
    }

    #[test]
    fn bare_literal_is_invalid_argument() {
        let err = widecol_err!("row has {} values", 3);
        assert!(matches!(err, WidecolError::InvalidArgument(..)));
    }

    #[test]
    fn storage_errors_survive_context() {
        let err = widecol_err!(StorageBackend: "disk gone").with_context("reading row 3");
        assert!(err.is_storage_backend());
        assert!(!err.is_schema());
        assert!(!widecol_err!("disk gone").is_storage_backend());
    }

    #[test]
    #[should_panic(expected = "missing value")]
    fn expect_on_none_panics() {
        let value: Option<u32> = None;
        value.widecol_expect("missing value");
    }
}
