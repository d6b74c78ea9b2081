pub mod errors;
pub mod path;

pub use errors::ErrorList;
pub use errors::ErrorType;
pub use errors::FieldError;
pub use path::Path;
