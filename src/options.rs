use crate::error::PermissionError;

/// The delimiter that separates segments when none is configured.
pub const DEFAULT_DELIMITER: &str = ".";

/// The wildcard token used when none is configured.
pub const DEFAULT_WILDCARD: &str = "*";

/// The special strings that give a permission name its structure.
///
/// Options are an immutable value carried by every permission, so matching
/// never consults process-wide state and alternate delimiters can be used
/// side by side.
///
/// # Example
///
/// ```
/// use wildperm::PermissionOptions;
///
/// let options = PermissionOptions::new(":", "?").unwrap();
/// assert_eq!(options.split("files:?:read"), vec!["files", "?", "read"]);
/// assert!(options.is_wildcard("?"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawOptions"))]
pub struct PermissionOptions {
    delimiter: String,
    wildcard: String,
}

impl PermissionOptions {
    /// Creates options with a custom delimiter and wildcard token.
    ///
    /// Both must be non-empty, and the wildcard must not contain the delimiter.
    pub fn new(
        delimiter: impl Into<String>,
        wildcard: impl Into<String>,
    ) -> Result<Self, PermissionError> {
        let delimiter = delimiter.into();
        let wildcard = wildcard.into();

        if delimiter.is_empty() {
            return Err(PermissionError::EmptyDelimiter);
        }
        if wildcard.is_empty() {
            return Err(PermissionError::EmptyWildcard);
        }
        if wildcard.contains(delimiter.as_str()) {
            return Err(PermissionError::WildcardContainsDelimiter { wildcard, delimiter });
        }

        Ok(Self { delimiter, wildcard })
    }

    /// Returns the segment delimiter.
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Returns the wildcard token.
    pub fn wildcard(&self) -> &str {
        &self.wildcard
    }

    /// Splits a permission name into its segments.
    ///
    /// The result is never empty: an empty name yields a single empty segment.
    pub fn split<'a>(&self, name: &'a str) -> Vec<&'a str> {
        name.split(self.delimiter.as_str()).collect()
    }

    /// Checks whether a segment is the wildcard token.
    pub fn is_wildcard(&self, segment: &str) -> bool {
        segment == self.wildcard
    }

    /// Joins segments back into a name.
    pub fn join<S: AsRef<str>>(&self, segments: &[S]) -> String {
        let mut name = String::new();
        for (i, segment) in segments.iter().enumerate() {
            if i > 0 {
                name.push_str(&self.delimiter);
            }
            name.push_str(segment.as_ref());
        }
        name
    }
}

impl Default for PermissionOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            wildcard: DEFAULT_WILDCARD.to_string(),
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(default)]
struct RawOptions {
    delimiter: String,
    wildcard: String,
}

#[cfg(feature = "serde")]
impl Default for RawOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            wildcard: DEFAULT_WILDCARD.to_string(),
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<RawOptions> for PermissionOptions {
    type Error = PermissionError;

    fn try_from(raw: RawOptions) -> Result<Self, Self::Error> {
        PermissionOptions::new(raw.delimiter, raw.wildcard)
    }
}
