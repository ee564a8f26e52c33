//! Core traits for Care Admin

use crate::error::AdminResult;

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// Schema descriptors implement this so a registry built in code or loaded
/// from a file is checked once at startup, before any request is built.
///
/// # Example
///
/// ```rust,ignore
/// use careadmin_core::{AdminError, AdminResult, Validatable};
///
/// struct Endpoint(String);
///
/// impl Validatable for Endpoint {
///     fn validate(&self) -> AdminResult<()> {
///         if !self.0.starts_with('/') {
///             return Err(AdminError::validation("Endpoint must start with '/'"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or an `AdminError` describing the problem.
    fn validate(&self) -> AdminResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get all validation errors (for types that can have multiple errors)
    fn validation_errors(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => vec![],
            Err(e) => vec![e.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AdminError;

    struct Endpoint(&'static str);

    impl Validatable for Endpoint {
        fn validate(&self) -> AdminResult<()> {
            if !self.0.starts_with('/') {
                return Err(AdminError::validation("Endpoint must start with '/'"));
            }
            Ok(())
        }
    }

    #[test]
    fn test_default_methods() {
        assert!(Endpoint("/users").is_valid());
        assert!(Endpoint("/users").validation_errors().is_empty());

        let bad = Endpoint("users");
        assert!(!bad.is_valid());
        assert_eq!(
            bad.validation_errors(),
            vec!["Validation error: Endpoint must start with '/'".to_string()]
        );
    }
}
