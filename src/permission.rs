use std::borrow::{Borrow, Cow};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::matching;
use crate::options::PermissionOptions;

/// Selects the algorithm a permission uses to decide what it grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MatchKind {
    /// The permission grants only itself.
    #[default]
    Exact,
    /// Wildcard segments match any segment at their position, and a trailing
    /// wildcard also matches any further segments.
    Wildcard,
}

/// A segment-structured permission name.
///
/// A permission is immutable once built. Equality and hashing consider the
/// name only, so an exact and a wildcard permission with the same name are
/// the same set member even though they grant different things.
///
/// # Example
///
/// ```
/// use wildperm::Permission;
///
/// let read = Permission::new("files.read");
/// assert!(read.grants_permission("files.read"));
/// assert!(!read.grants_permission("files.write"));
///
/// let files = Permission::wildcard("files.*");
/// assert!(files.grants_permission(&read));
/// assert!(files.grants_permission("files.write.all"));
/// assert!(!files.grants_permission("files"));
/// ```
#[derive(Debug, Clone)]
pub struct Permission {
    name: String,
    description: Option<String>,
    kind: MatchKind,
    options: PermissionOptions,
}

impl Permission {
    /// Creates a permission that grants only itself.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_kind(name, MatchKind::Exact)
    }

    /// Creates a permission whose segments may be wildcards.
    pub fn wildcard(name: impl Into<String>) -> Self {
        Self::with_kind(name, MatchKind::Wildcard)
    }

    /// Creates a permission with an explicit match kind and default options.
    pub fn with_kind(name: impl Into<String>, kind: MatchKind) -> Self {
        Self {
            name: name.into(),
            description: None,
            kind,
            options: PermissionOptions::default(),
        }
    }

    /// Attaches a human-readable description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the delimiter and wildcard used to interpret the name.
    pub fn with_options(mut self, options: PermissionOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the permission name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the match kind.
    pub fn kind(&self) -> MatchKind {
        self.kind
    }

    /// Returns the options used to split the name.
    pub fn options(&self) -> &PermissionOptions {
        &self.options
    }

    /// Returns the segments of the name. Never empty.
    pub fn segments(&self) -> Vec<&str> {
        self.options.split(&self.name)
    }

    /// Checks whether this is a wildcard permission whose last segment is the
    /// wildcard token.
    ///
    /// Always false for exact permissions, whose segments carry no meaning
    /// beyond the name itself.
    pub fn is_end_wildcard(&self) -> bool {
        match self.kind {
            MatchKind::Exact => false,
            MatchKind::Wildcard => {
                matching::is_end_wildcard(&self.segments(), self.options.wildcard())
            }
        }
    }

    /// Checks whether holding this permission grants `other`.
    ///
    /// `other` may be a permission or a raw name. An exact permission grants
    /// only an equal name. A wildcard permission compares segment by segment,
    /// splitting a raw name with this permission's options.
    pub fn grants_permission<'a>(&self, other: impl Into<PermissionRef<'a>>) -> bool {
        let other = other.into();
        match self.kind {
            MatchKind::Exact => matching::exact_grants(&self.name, other.name()),
            MatchKind::Wildcard => {
                let other = as_wildcard_permission(other, &self.options);
                matching::wildcard_grants(
                    &self.segments(),
                    &other.segments(),
                    self.options.wildcard(),
                )
            }
        }
    }

    /// Checks whether this permission grants at least one of `permissions`.
    ///
    /// Returns false for an empty collection.
    pub fn grants_any_permission<'a, I>(&self, permissions: I) -> bool
    where
        I: IntoIterator<Item = &'a Permission>,
    {
        permissions.into_iter().any(|p| self.grants_permission(p))
    }
}

impl PartialEq for Permission {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Permission {}

impl Hash for Permission {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Must hash exactly like `str` for the `Borrow<str>` impl below.
        self.name.hash(state);
    }
}

impl Borrow<str> for Permission {
    fn borrow(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// An argument to a matching query: either an existing permission or a raw name.
#[derive(Debug, Clone, Copy)]
pub enum PermissionRef<'a> {
    Permission(&'a Permission),
    Name(&'a str),
}

impl<'a> PermissionRef<'a> {
    /// Returns the name being queried.
    pub fn name(&self) -> &'a str {
        match *self {
            PermissionRef::Permission(p) => p.name(),
            PermissionRef::Name(name) => name,
        }
    }
}

impl<'a> From<&'a Permission> for PermissionRef<'a> {
    fn from(permission: &'a Permission) -> Self {
        PermissionRef::Permission(permission)
    }
}

impl<'a> From<&'a str> for PermissionRef<'a> {
    fn from(name: &'a str) -> Self {
        PermissionRef::Name(name)
    }
}

impl<'a> From<&'a String> for PermissionRef<'a> {
    fn from(name: &'a String) -> Self {
        PermissionRef::Name(name)
    }
}

/// Resolves a query argument to a permission, promoting raw names to
/// wildcard permissions built with `options`.
///
/// Raw names passed to matching queries are usually patterns rather than
/// concrete grants, so they get wildcard semantics. Existing permissions are
/// borrowed unchanged.
///
/// # Example
///
/// ```
/// use wildperm::{as_wildcard_permission, MatchKind, Permission, PermissionOptions};
///
/// let options = PermissionOptions::default();
/// let coerced = as_wildcard_permission("files.*", &options);
/// assert_eq!(coerced.kind(), MatchKind::Wildcard);
///
/// let exact = Permission::new("files.read");
/// assert_eq!(as_wildcard_permission(&exact, &options).kind(), MatchKind::Exact);
/// ```
pub fn as_wildcard_permission<'a>(
    query: impl Into<PermissionRef<'a>>,
    options: &PermissionOptions,
) -> Cow<'a, Permission> {
    match query.into() {
        PermissionRef::Permission(p) => Cow::Borrowed(p),
        PermissionRef::Name(name) => {
            Cow::Owned(Permission::wildcard(name).with_options(options.clone()))
        }
    }
}
