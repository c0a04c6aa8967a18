//! Collects field errors so a request can be rejected with every problem at once.

use crate::server::error::{AppError, FieldError};

#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` against `field` unless `ok` holds.
    pub fn check(&mut self, ok: bool, field: &str, message: &str) -> &mut Self {
        if !ok {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    pub fn min_len(&mut self, value: &str, min: usize, field: &str) -> &mut Self {
        let ok = value.trim().chars().count() >= min;
        self.check(
            ok,
            field,
            &format!("{} must be at least {} characters", field, min),
        )
    }

    pub fn not_blank(&mut self, value: &str, field: &str) -> &mut Self {
        self.check(
            !value.trim().is_empty(),
            field,
            &format!("{} is required", field),
        )
    }

    pub fn email(&mut self, value: &str, field: &str) -> &mut Self {
        let ok = value
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
        self.check(ok, field, "Invalid email address")
    }

    /// Requires a finite, non-negative quantity.
    pub fn non_negative(&mut self, value: f64, field: &str) -> &mut Self {
        self.check(
            value.is_finite() && value >= 0.0,
            field,
            &format!("{} must be zero or greater", field),
        )
    }

    /// Requires a finite quantity strictly above zero.
    pub fn positive(&mut self, value: f64, field: &str) -> &mut Self {
        self.check(
            value.is_finite() && value > 0.0,
            field,
            &format!("{} must be greater than zero", field),
        )
    }

    pub fn finish(&mut self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(std::mem::take(&mut self.errors)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_every_failed_field() {
        let result = Validator::new()
            .min_len("ab", 3, "username")
            .email("nope", "email")
            .positive(0.0, "quantity")
            .finish();

        match result {
            Err(AppError::Validation(errors)) => {
                let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["username", "email", "quantity"]);
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn passes_valid_input() {
        assert!(Validator::new()
            .min_len("alice", 3, "username")
            .email("a@b.c", "email")
            .non_negative(0.0, "stock_qty")
            .finish()
            .is_ok());
    }

    #[test]
    fn rejects_non_finite_quantities() {
        assert!(Validator::new()
            .non_negative(f64::NAN, "quantity")
            .finish()
            .is_err());
    }
}
