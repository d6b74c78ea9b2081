use std::fmt;

/// Dotted locator of a field inside a record, e.g. `User.Login`.
///
/// Paths are immutable; [`Path::child`] returns a new path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// Create a root path.
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            segments: vec![root.into()],
        }
    }

    /// Create a path from a root and a sequence of child names.
    pub fn with_children(root: impl Into<String>, children: &[&str]) -> Self {
        children
            .iter()
            .fold(Self::new(root), |path, child| path.child(*child))
    }

    /// Path of a named child of this path.
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        Self { segments }
    }

    pub fn root(&self) -> &str {
        &self.segments[0]
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root() {
        let path = Path::new("User");
        assert_eq!(path.to_string(), "User");
        assert_eq!(path.root(), "User");
    }

    #[test]
    fn test_child() {
        let root = Path::new("User");
        let login = root.child("Login");

        assert_eq!(login.to_string(), "User.Login");
        assert_eq!(login.root(), "User");
        // Parent is untouched
        assert_eq!(root.to_string(), "User");
    }

    #[test]
    fn test_with_children() {
        let path = Path::with_children("User", &["Address", "Street"]);
        assert_eq!(path.to_string(), "User.Address.Street");
        assert_eq!(path, Path::new("User").child("Address").child("Street"));
    }
}
