mod adhoc;
mod driver;
mod type_mismatch;
mod undefined_attribute;
mod unknown_association;

use adhoc::AdhocError;
use driver::DriverError;
use type_mismatch::TypeMismatchError;
use undefined_attribute::UndefinedAttributeError;
use unknown_association::UnknownAssociationError;

use std::sync::Arc;

/// Return early with a formatted ad-hoc [`Error`].
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Create a formatted ad-hoc [`Error`].
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur in Velum.
#[derive(Clone)]
pub struct Error {
    kind: Arc<ErrorKind>,
}

#[derive(Debug)]
enum ErrorKind {
    Adhoc(AdhocError),
    Driver(DriverError),
    TypeMismatch(TypeMismatchError),
    UndefinedAttribute(UndefinedAttributeError),
    UnknownAssociation(UnknownAssociationError),
}

impl Error {
    /// An object assigned to an association is not an instance of the
    /// association's declared target class.
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::from(ErrorKind::TypeMismatch(TypeMismatchError {
            expected: expected.into(),
            actual: actual.into(),
        }))
    }

    /// An attribute-style method did not resolve to any declared property,
    /// even after forcing lazy accessor generation.
    pub fn undefined_attribute(model: impl Into<String>, method: impl Into<String>) -> Self {
        Self::from(ErrorKind::UndefinedAttribute(UndefinedAttributeError {
            model: model.into(),
            method: method.into(),
        }))
    }

    /// An association accessor was invoked for a name the model class does
    /// not declare.
    pub fn unknown_association(model: impl Into<String>, name: impl Into<String>) -> Self {
        Self::from(ErrorKind::UnknownAssociation(UnknownAssociationError {
            model: model.into(),
            name: name.into(),
        }))
    }

    /// A storage collaborator failure, passed through unmodified.
    pub fn driver(cause: impl Into<anyhow::Error>) -> Self {
        Self::from(ErrorKind::Driver(DriverError {
            inner: cause.into(),
        }))
    }

    pub fn from_args(args: core::fmt::Arguments<'_>) -> Self {
        Self::from(ErrorKind::Adhoc(AdhocError {
            message: args.to_string(),
        }))
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(*self.kind, ErrorKind::TypeMismatch(_))
    }

    pub fn is_undefined_attribute(&self) -> bool {
        matches!(*self.kind, ErrorKind::UndefinedAttribute(_))
    }

    pub fn is_unknown_association(&self) -> bool {
        matches!(*self.kind, ErrorKind::UnknownAssociation(_))
    }

    pub fn is_driver(&self) -> bool {
        matches!(*self.kind, ErrorKind::Driver(_))
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &*self.kind {
            ErrorKind::Driver(err) => Some(err),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match &*self.kind {
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            Driver(err) => core::fmt::Display::fmt(err, f),
            TypeMismatch(err) => core::fmt::Display::fmt(err, f),
            UndefinedAttribute(err) => core::fmt::Display::fmt(err, f),
            UnknownAssociation(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if f.alternate() {
            f.debug_struct("Error").field("kind", &self.kind).finish()
        } else {
            core::fmt::Display::fmt(self, f)
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Self {
            kind: Arc::new(kind),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::driver(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_mismatch_names_both_classes() {
        let err = Error::type_mismatch("Tag", "Comment");
        assert!(err.is_type_mismatch());
        assert_eq!(err.to_string(), "expected an instance of Tag, got Comment");
    }

    #[test]
    fn undefined_attribute_names_model_and_method() {
        let err = Error::undefined_attribute("Post", "subtitle=");
        assert!(err.is_undefined_attribute());
        assert_eq!(
            err.to_string(),
            "undefined attribute method `subtitle=` for model Post"
        );
    }

    #[test]
    fn driver_errors_keep_their_source() {
        let err = Error::driver(anyhow::anyhow!("connection reset"));
        assert!(err.is_driver());
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn adhoc_errors_format_their_arguments() {
        let err = err!("unsupported scoped query method `{}`", "frobnicate");
        assert_eq!(
            err.to_string(),
            "unsupported scoped query method `frobnicate`"
        );
    }
}
