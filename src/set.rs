use std::collections::HashSet;
use std::collections::hash_set;
use std::ops::{BitAnd, BitOr, BitXor, Sub};

use tracing::trace;

use crate::options::PermissionOptions;
use crate::permission::{Permission, PermissionRef, as_wildcard_permission};

/// An unordered, duplicate-free collection of permissions.
///
/// Members may freely mix exact and wildcard permissions; each one matches
/// with its own rule. Uniqueness follows [`Permission`] equality, so two
/// permissions with the same name collapse to a single member regardless of
/// their match kind.
///
/// The set carries [`PermissionOptions`] used to interpret raw names passed
/// to [`has_any_permission`](Self::has_any_permission). Set algebra keeps the
/// left operand's options, so derived sets answer the same queries.
///
/// # Example
///
/// ```
/// use wildperm::{Permission, PermissionSet};
///
/// let held: PermissionSet = [
///     Permission::wildcard("test.1.*"),
///     Permission::new("test.2.hello"),
/// ]
/// .into_iter()
/// .collect();
///
/// assert!(held.grants_permission("test.1.goodbye"));
/// assert!(held.grants_permission("test.2.hello"));
/// assert!(!held.grants_permission("test.1"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PermissionSet {
    permissions: HashSet<Permission>,
    options: PermissionOptions,
}

impl PermissionSet {
    /// Creates an empty set with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set whose raw-name queries use `options`.
    pub fn with_options(options: PermissionOptions) -> Self {
        Self {
            permissions: HashSet::new(),
            options,
        }
    }

    /// Returns the options used to interpret raw names.
    pub fn options(&self) -> &PermissionOptions {
        &self.options
    }

    /// Adds a permission. Returns false if an equally named permission was
    /// already present, in which case the set is unchanged.
    pub fn insert(&mut self, permission: Permission) -> bool {
        self.permissions.insert(permission)
    }

    /// Removes the permission with the given name. Returns whether it was present.
    pub fn remove<'a>(&mut self, permission: impl Into<PermissionRef<'a>>) -> bool {
        self.permissions.remove(permission.into().name())
    }

    /// Checks membership by name.
    pub fn contains<'a>(&self, permission: impl Into<PermissionRef<'a>>) -> bool {
        self.permissions.contains(permission.into().name())
    }

    /// Returns the member with the given name, if present.
    pub fn get(&self, name: &str) -> Option<&Permission> {
        self.permissions.get(name)
    }

    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    /// Checks whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }

    /// Iterates over the members in arbitrary order.
    pub fn iter(&self) -> hash_set::Iter<'_, Permission> {
        self.permissions.iter()
    }

    /// Checks whether any member grants `other`.
    ///
    /// Each member applies its own matching rule, and a raw name is
    /// interpreted by each member as it would be by
    /// [`Permission::grants_permission`].
    pub fn grants_permission<'a>(&self, other: impl Into<PermissionRef<'a>>) -> bool {
        let other = other.into();
        let granted = self.permissions.iter().find(|p| p.grants_permission(other));
        if let Some(member) = granted {
            trace!(permission = other.name(), granted_by = member.name(), "permission granted");
            true
        } else {
            trace!(permission = other.name(), "permission not granted");
            false
        }
    }

    /// Checks whether this set grants at least one of `permissions`.
    ///
    /// This compares every member against every candidate, which is fine for
    /// the tens of permissions a subject typically holds.
    // TODO: index wildcard members by leading segments if sets grow into the thousands.
    pub fn grants_any_permission<'a, I>(&self, permissions: I) -> bool
    where
        I: IntoIterator<Item = &'a Permission>,
    {
        permissions.into_iter().any(|p| self.grants_permission(p))
    }

    /// Checks whether any member is granted by `other`.
    ///
    /// This is the inverse of [`grants_permission`](Self::grants_permission):
    /// it asks whether the set holds something of the shape `other` describes.
    /// A raw name is promoted to a wildcard permission with this set's options.
    ///
    /// # Example
    ///
    /// ```
    /// use wildperm::{Permission, PermissionSet};
    ///
    /// let held: PermissionSet = [Permission::new("test.1.hello")].into_iter().collect();
    /// assert!(held.has_any_permission("test.*"));
    /// assert!(!held.has_any_permission("other.*"));
    /// ```
    pub fn has_any_permission<'a>(&self, other: impl Into<PermissionRef<'a>>) -> bool {
        let other = as_wildcard_permission(other, &self.options);
        other.grants_any_permission(self)
    }

    /// Returns the members in either set.
    pub fn union(&self, other: &PermissionSet) -> PermissionSet {
        self.derive(self.permissions.union(&other.permissions))
    }

    /// Returns the members in both sets, taken from `self`.
    pub fn intersection(&self, other: &PermissionSet) -> PermissionSet {
        self.derive(self.permissions.intersection(&other.permissions))
    }

    /// Returns the members of `self` that are not in `other`.
    pub fn difference(&self, other: &PermissionSet) -> PermissionSet {
        self.derive(self.permissions.difference(&other.permissions))
    }

    /// Returns the members in exactly one of the sets.
    pub fn symmetric_difference(&self, other: &PermissionSet) -> PermissionSet {
        self.derive(self.permissions.symmetric_difference(&other.permissions))
    }

    /// Checks whether every member of `self` is also in `other`.
    pub fn is_subset(&self, other: &PermissionSet) -> bool {
        self.permissions.is_subset(&other.permissions)
    }

    fn derive<'a>(&self, members: impl Iterator<Item = &'a Permission>) -> PermissionSet {
        PermissionSet {
            permissions: members.cloned().collect(),
            options: self.options.clone(),
        }
    }
}

/// Sets are equal when they have the same members by name.
impl PartialEq for PermissionSet {
    fn eq(&self, other: &Self) -> bool {
        self.permissions == other.permissions
    }
}

impl Eq for PermissionSet {}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = Permission>>(iter: T) -> Self {
        Self {
            permissions: iter.into_iter().collect(),
            options: PermissionOptions::default(),
        }
    }
}

impl Extend<Permission> for PermissionSet {
    fn extend<T: IntoIterator<Item = Permission>>(&mut self, iter: T) {
        self.permissions.extend(iter);
    }
}

impl IntoIterator for PermissionSet {
    type Item = Permission;
    type IntoIter = hash_set::IntoIter<Permission>;

    fn into_iter(self) -> Self::IntoIter {
        self.permissions.into_iter()
    }
}

impl<'a> IntoIterator for &'a PermissionSet {
    type Item = &'a Permission;
    type IntoIter = hash_set::Iter<'a, Permission>;

    fn into_iter(self) -> Self::IntoIter {
        self.permissions.iter()
    }
}

impl BitOr<&PermissionSet> for &PermissionSet {
    type Output = PermissionSet;

    fn bitor(self, rhs: &PermissionSet) -> PermissionSet {
        self.union(rhs)
    }
}

impl BitAnd<&PermissionSet> for &PermissionSet {
    type Output = PermissionSet;

    fn bitand(self, rhs: &PermissionSet) -> PermissionSet {
        self.intersection(rhs)
    }
}

impl Sub<&PermissionSet> for &PermissionSet {
    type Output = PermissionSet;

    fn sub(self, rhs: &PermissionSet) -> PermissionSet {
        self.difference(rhs)
    }
}

impl BitXor<&PermissionSet> for &PermissionSet {
    type Output = PermissionSet;

    fn bitxor(self, rhs: &PermissionSet) -> PermissionSet {
        self.symmetric_difference(rhs)
    }
}
