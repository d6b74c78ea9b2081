//! Field level validation
//!
//! Structured validation errors addressed by field path, plus a small
//! declarative rule engine. Entities declare a table of [`rules::Field`]
//! accessors and name which fields are immutable, forbidden, required or
//! length bounded; the engine runs every rule and collects all failures
//! into one ordered [`field::ErrorList`].
//!
//! ```
//! use validation::field::Path;
//! use validation::rules::Field;
//! use validation::rules::RuleSet;
//!
//! struct Tag {
//!     name: Option<String>,
//! }
//!
//! fn name(tag: &Tag) -> Option<&str> {
//!     tag.name.as_deref()
//! }
//!
//! const NAME: Field<Tag> = Field::new("Name", name);
//!
//! let required = [NAME];
//! let rules = RuleSet::new().required(&required);
//! let errors = rules.validate(&Path::new("Tag"), &Tag { name: None }, None);
//!
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors[0].field, "Tag.Name");
//! ```

pub mod field;
pub mod rules;

pub use field::ErrorList;
pub use field::ErrorType;
pub use field::FieldError;
pub use field::Path;
