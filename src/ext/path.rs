use std::path::{Path, PathBuf};

/// Extension trait for Path with helpers for deriving output locations
pub trait PathExt {
    /// Returns the path with its last extension removed, or `None` when
    /// there is no extension to remove.
    ///
    /// # Examples
    /// ```
    /// use render::ext::PathExt;
    /// use std::path::{Path, PathBuf};
    ///
    /// let path = Path::new("deploy/config.yaml.j2");
    /// assert_eq!(path.without_extension(), Some(PathBuf::from("deploy/config.yaml")));
    /// assert_eq!(Path::new("Makefile").without_extension(), None);
    /// ```
    fn without_extension(&self) -> Option<PathBuf>;
}

impl PathExt for Path {
    fn without_extension(&self) -> Option<PathBuf> {
        self.extension().map(|_| self.with_extension(""))
    }
}
