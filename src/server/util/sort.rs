//! Parsing of `sort=field:dir` query values.

use std::str::FromStr;

use sea_orm::Order;

use crate::server::error::AppError;

/// A parsed sort request over the field set `F`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<F> {
    pub field: F,
    pub descending: bool,
}

impl<F> Sort<F> {
    pub fn order(&self) -> Order {
        if self.descending {
            Order::Desc
        } else {
            Order::Asc
        }
    }
}

impl<F: FromStr> Sort<F> {
    /// Parses `field` or `field:asc|desc`. The direction defaults to ascending.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let (field, direction) = match raw.split_once(':') {
            Some((field, direction)) => (field, Some(direction)),
            None => (raw, None),
        };

        let field = field
            .trim()
            .parse::<F>()
            .map_err(|_| AppError::invalid_field("sort", format!("Unknown sort field '{}'", field)))?;

        let descending = match direction.map(|d| d.trim().to_ascii_lowercase()).as_deref() {
            None | Some("asc") => false,
            Some("desc") => true,
            Some(other) => {
                return Err(AppError::invalid_field(
                    "sort",
                    format!("Unknown sort direction '{}'", other),
                ))
            }
        };

        Ok(Self { field, descending })
    }

    /// Parses an optional query value, falling back to `default` when absent.
    pub fn parse_or(raw: Option<&str>, default: Sort<F>) -> Result<Self, AppError> {
        match raw.filter(|r| !r.is_empty()) {
            Some(raw) => Self::parse(raw),
            None => Ok(default),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    enum Field {
        Name,
    }

    impl FromStr for Field {
        type Err = ();

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "name" => Ok(Self::Name),
                _ => Err(()),
            }
        }
    }

    #[test]
    fn parses_field_and_direction() {
        let sort = Sort::<Field>::parse("name:desc").unwrap();

        assert_eq!(sort.field, Field::Name);
        assert!(sort.descending);
    }

    #[test]
    fn direction_defaults_to_ascending() {
        let sort = Sort::<Field>::parse("name").unwrap();

        assert!(!sort.descending);
    }

    #[test]
    fn rejects_unknown_field_and_direction() {
        assert!(matches!(
            Sort::<Field>::parse("price:asc"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            Sort::<Field>::parse("name:sideways"),
            Err(AppError::Validation(_))
        ));
    }
}
