//! Declarative field rules.
//!
//! Each entity hand-declares a [`Field`] per validated attribute, mapping the
//! attribute's name to an accessor. A [`RuleSet`] then names which fields
//! fall in which category. Empty strings count as unset everywhere.

use super::field::ErrorList;
use super::field::FieldError;
use super::field::Path;

/// Named accessor for one string attribute of `T`.
pub struct Field<T> {
    name: &'static str,
    accessor: fn(&T) -> Option<&str>,
}

impl<T> Field<T> {
    pub const fn new(name: &'static str, accessor: fn(&T) -> Option<&str>) -> Self {
        Self { name, accessor }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The field's value, `None` when unset or empty.
    pub fn value<'a>(&self, record: &'a T) -> Option<&'a str> {
        (self.accessor)(record).filter(|value| !value.is_empty())
    }
}

/// Inclusive character length bounds on a field.
pub struct Bounded<T> {
    pub field: Field<T>,
    pub min: usize,
    pub max: usize,
}

impl<T> Bounded<T> {
    pub const fn new(field: Field<T>, min: usize, max: usize) -> Self {
        Self { field, min, max }
    }
}

/// Supplying a value that differs from the old record is forbidden.
/// Omitting the field is always allowed.
pub fn immutable<T>(new: &T, old: &T, path: &Path, fields: &[Field<T>]) -> ErrorList {
    fields
        .iter()
        .filter(|field| {
            field
                .value(new)
                .is_some_and(|value| Some(value) != field.value(old))
        })
        .map(|field| {
            FieldError::forbidden(
                &path.child(field.name),
                format!("{} updates must not change {}", path, field.name),
            )
        })
        .collect()
}

/// Supplying any value is forbidden.
pub fn forbidden<T>(new: &T, path: &Path, fields: &[Field<T>]) -> ErrorList {
    fields
        .iter()
        .filter(|field| field.value(new).is_some())
        .map(|field| {
            FieldError::forbidden(
                &path.child(field.name),
                format!("{} updates must not supply {}", path, field.name),
            )
        })
        .collect()
}

/// A value must be supplied.
pub fn required<T>(new: &T, path: &Path, fields: &[Field<T>]) -> ErrorList {
    fields
        .iter()
        .filter(|field| field.value(new).is_none())
        .map(|field| {
            FieldError::required(
                &path.child(field.name),
                format!("{} updates must supply {}", path, field.name),
            )
        })
        .collect()
}

/// Length in characters must lie within the bounds. An unset field has
/// length zero.
pub fn length<T>(new: &T, path: &Path, bounds: &[Bounded<T>]) -> ErrorList {
    bounds
        .iter()
        .filter_map(|bound| {
            let value = bound.field.value(new).unwrap_or_default();
            if within(value, bound.min, bound.max) {
                return None;
            }
            Some(FieldError::invalid(
                &path.child(bound.field.name),
                value,
                format!(
                    "{}: {} must be between {} and {} characters",
                    path, bound.field.name, bound.min, bound.max
                ),
            ))
        })
        .collect()
}

fn within(value: &str, min: usize, max: usize) -> bool {
    let length = value.chars().count();
    length >= min && length <= max
}

/// Field categories for one kind of mutation.
///
/// Checks always run in the order immutable, forbidden, required, length
/// and every failure is reported.
pub struct RuleSet<'a, T> {
    immutable: &'a [Field<T>],
    forbidden: &'a [Field<T>],
    required: &'a [Field<T>],
    bounded: &'a [Bounded<T>],
}

impl<'a, T> RuleSet<'a, T> {
    pub const fn new() -> Self {
        Self {
            immutable: &[],
            forbidden: &[],
            required: &[],
            bounded: &[],
        }
    }

    pub const fn immutable(mut self, fields: &'a [Field<T>]) -> Self {
        self.immutable = fields;
        self
    }

    pub const fn forbidden(mut self, fields: &'a [Field<T>]) -> Self {
        self.forbidden = fields;
        self
    }

    pub const fn required(mut self, fields: &'a [Field<T>]) -> Self {
        self.required = fields;
        self
    }

    pub const fn bounded(mut self, bounds: &'a [Bounded<T>]) -> Self {
        self.bounded = bounds;
        self
    }

    /// Validate `new` against every rule.
    ///
    /// Immutability rules are only checked when an `old` record is given.
    pub fn validate(&self, path: &Path, new: &T, old: Option<&T>) -> ErrorList {
        let mut errors = ErrorList::new();

        if let Some(old) = old {
            errors.extend(immutable(new, old, path, self.immutable));
        }
        errors.extend(forbidden(new, path, self.forbidden));
        errors.extend(required(new, path, self.required));
        errors.extend(length(new, path, self.bounded));

        errors
    }
}

impl<T> Default for RuleSet<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}
