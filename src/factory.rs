use std::fmt;

use tracing::debug;

use crate::error::PermissionError;
use crate::options::PermissionOptions;
use crate::permission::{MatchKind, Permission};
use crate::set::PermissionSet;

/// Builds permissions from plain names, choosing the match kind and adding a
/// namespace prefix.
///
/// A name containing a wildcard segment becomes a wildcard permission; any
/// other name becomes an exact permission. Factories can be nested with
/// [`create_child`](Self::create_child) to give each component of an
/// application its own namespace.
///
/// # Example
///
/// ```
/// use wildperm::{MatchKind, PermissionFactory};
///
/// let app = PermissionFactory::new().with_prefix("app");
/// let files = app.create_child("files");
///
/// let read = files.create_permission("read");
/// assert_eq!(read.name(), "app.files.read");
/// assert_eq!(read.kind(), MatchKind::Exact);
///
/// let all = files.create_permission("*");
/// assert_eq!(all.kind(), MatchKind::Wildcard);
/// assert!(all.grants_permission(&read));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PermissionFactory {
    options: PermissionOptions,
    /// Stored without a trailing delimiter; empty means no prefix.
    prefix: String,
}

impl PermissionFactory {
    /// Creates a factory with default options and no prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a factory with a custom delimiter and wildcard token.
    pub fn with_separators(
        delimiter: impl Into<String>,
        wildcard: impl Into<String>,
    ) -> Result<Self, PermissionError> {
        Ok(Self::new().with_options(PermissionOptions::new(delimiter, wildcard)?))
    }

    /// Replaces the options. An existing prefix is joined with the new delimiter.
    pub fn with_options(mut self, options: PermissionOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the prefix added to every permission this factory creates.
    ///
    /// An empty prefix means no prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Returns the options given to created permissions.
    pub fn options(&self) -> &PermissionOptions {
        &self.options
    }

    /// Returns the prefix, empty when there is none.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Puts `name` under this factory's prefix.
    fn prefixed(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            self.options.join(&[self.prefix.as_str(), name])
        }
    }

    /// Creates a permission for `name` under this factory's prefix.
    pub fn create_permission(&self, name: &str) -> Permission {
        let name = self.prefixed(name);
        let kind = if self
            .options
            .split(&name)
            .iter()
            .any(|segment| self.options.is_wildcard(segment))
        {
            MatchKind::Wildcard
        } else {
            MatchKind::Exact
        };

        Permission::with_kind(name, kind).with_options(self.options.clone())
    }

    /// Creates a described permission for `name` under this factory's prefix.
    pub fn create_described(&self, name: &str, description: impl Into<String>) -> Permission {
        self.create_permission(name).with_description(description)
    }

    /// Creates a set holding a permission for each name, using this factory's options.
    pub fn create_set<I, S>(&self, names: I) -> PermissionSet
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = PermissionSet::with_options(self.options.clone());
        set.extend(
            names
                .into_iter()
                .map(|name| self.create_permission(name.as_ref())),
        );
        set
    }

    /// Creates a factory with the same options whose prefix extends this one.
    ///
    /// An empty `prefix` yields a factory with this factory's prefix.
    pub fn create_child(&self, prefix: &str) -> PermissionFactory {
        let prefix = if prefix.is_empty() {
            self.prefix.clone()
        } else {
            self.prefixed(prefix)
        };
        let child = self.clone().with_prefix(prefix);
        debug!(parent = self.prefix(), child = child.prefix(), "created child factory");
        child
    }
}

impl fmt::Display for PermissionFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PermissionFactory({}, {}, {})",
            self.prefix(),
            self.options.delimiter(),
            self.options.wildcard()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        rpf: PermissionFactory,
        tpf: PermissionFactory,
        t2pf: PermissionFactory,
        ttpf: PermissionFactory,
        twpf: PermissionFactory,
    }

    fn fixture() -> Fixture {
        let rpf = PermissionFactory::new();
        let tpf = PermissionFactory::new().with_prefix("test");
        let t2pf = rpf.create_child("test");
        let ttpf = t2pf.create_child("2");
        let twpf = tpf.create_child("*");
        Fixture {
            rpf,
            tpf,
            t2pf,
            ttpf,
            twpf,
        }
    }

    #[test]
    fn test_equal() {
        let f = fixture();
        let p1 = Permission::new("test.1.hello");
        let p2 = Permission::new("test.2.hello");
        let p5 = Permission::wildcard("test.*");

        assert_eq!(p1, f.rpf.create_permission("test.1.hello"));
        assert_ne!(p1, f.rpf.create_permission("test.2.hello"));
        assert_eq!(p2, f.ttpf.create_permission("hello"));
        assert_eq!(p2, f.tpf.create_permission("2.hello"));
        assert_ne!(p5, f.twpf.create_permission(""));
        assert_eq!(f.tpf, f.t2pf);
        assert_ne!(f.tpf, f.ttpf);
    }

    #[test]
    fn test_selects_match_kind() {
        let f = fixture();
        assert_eq!(f.rpf.create_permission("test.1").kind(), MatchKind::Exact);
        assert_eq!(f.rpf.create_permission("test.*").kind(), MatchKind::Wildcard);
        assert_eq!(f.rpf.create_permission("*.read").kind(), MatchKind::Wildcard);
        // A wildcard character inside a segment is not a wildcard segment.
        assert_eq!(f.rpf.create_permission("test.a*").kind(), MatchKind::Exact);
    }

    #[test]
    fn test_wildcard_prefix() {
        let f = fixture();
        let p = f.twpf.create_permission("hello");
        assert_eq!(p.name(), "test.*.hello");
        assert_eq!(p.kind(), MatchKind::Wildcard);
        assert!(p.grants_permission("test.2.hello"));
    }

    #[test]
    fn test_prefix_accessor() {
        let f = fixture();
        assert_eq!(f.rpf.prefix(), "");
        assert_eq!(f.tpf.prefix(), "test");
        assert_eq!(f.ttpf.prefix(), "test.2");
    }

    #[test]
    fn test_empty_prefix_is_no_prefix() {
        let factory = PermissionFactory::new().with_prefix("");
        assert_eq!(factory, PermissionFactory::new());
        assert_eq!(factory.create_permission("a.b").name(), "a.b");
    }

    #[test]
    fn test_custom_separators() {
        let factory = PermissionFactory::with_separators("/", "+")
            .unwrap()
            .with_prefix("files");
        let all = factory.create_permission("+");
        assert_eq!(all.name(), "files/+");
        assert_eq!(all.kind(), MatchKind::Wildcard);
        assert!(all.grants_permission("files/read"));

        let child = factory.create_child("docs");
        assert_eq!(child.create_permission("read").name(), "files/docs/read");
    }

    #[test]
    fn test_rejects_invalid_separators() {
        assert_eq!(
            PermissionFactory::with_separators("", "*"),
            Err(PermissionError::EmptyDelimiter)
        );
    }

    #[test]
    fn test_create_described() {
        let f = fixture();
        let p = f.tpf.create_described("1.hello", "Say hello");
        assert_eq!(p.name(), "test.1.hello");
        assert_eq!(p.description(), Some("Say hello"));
    }

    #[test]
    fn test_create_set() {
        let f = fixture();
        let set = f.tpf.create_set(["1.*", "2.hello", "2.hello"]);
        assert_eq!(set.len(), 2);
        assert!(set.grants_permission("test.1.goodbye"));
        assert!(set.grants_permission("test.2.hello"));
        assert!(!set.grants_permission("test.2.goodbye"));
    }

    #[test]
    fn test_options_after_prefix_use_new_delimiter() {
        let slash = PermissionOptions::new("/", "*").unwrap();
        let factory = PermissionFactory::new().with_prefix("app").with_options(slash);
        assert_eq!(factory.prefix(), "app");

        let read = factory.create_permission("read");
        assert_eq!(read.name(), "app/read");
        assert_eq!(read.segments(), vec!["app", "read"]);

        let all = factory.create_permission("*");
        assert_eq!(all.name(), "app/*");
        assert_eq!(all.kind(), MatchKind::Wildcard);
        assert!(all.grants_permission(&read));

        let child = factory.create_child("docs");
        assert_eq!(child.create_permission("read").name(), "app/docs/read");
    }

    #[test]
    fn test_child_with_empty_prefix() {
        let f = fixture();
        let same = f.tpf.create_child("");
        assert_eq!(same, f.tpf);
        assert_eq!(f.rpf.create_child(""), f.rpf);
    }

    #[test]
    fn test_display() {
        let f = fixture();
        assert_eq!(f.ttpf.to_string(), "PermissionFactory(test.2, ., *)");
        assert_eq!(f.rpf.to_string(), "PermissionFactory(, ., *)");
    }
}
