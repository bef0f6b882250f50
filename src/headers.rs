//! Case-insensitive, multi-valued header collection for
//! [`Response`](crate::response::Response).
//!
//! Headers are stored in an ordered map to preserve insertion order. Each
//! entry is keyed by the ASCII-lowercased name but remembers the casing of
//! the name as it was first stored, so `set("Content-Type", ..)` followed by
//! `contains("content-type")` matches while serialization still prints
//! `Content-Type`. No two entries may have case-insensitively equal names.
//!
//! A header always holds at least one value. Values keep their insertion
//! order and are not deduplicated; replacing or appending accepts a single
//! string, a numeric scalar, or a sequence of such scalars through the
//! [`ToHeaderValues`] conversion (see below).
//!
//! Names and values are treated as raw printable text. This collection does
//! not enforce any HTTP semantics or restrict which headers are allowed.

use indexmap::IndexMap;

use crate::error::Error;

/// One accepted value input for a header-setting operation: a single string,
/// a numeric scalar, or an ordered sequence of those, flattened into
/// individual string values in order.
///
/// Unsupported shapes simply do not implement this trait, so they are
/// rejected at compile time rather than at run time.
pub trait ToHeaderValues {
    fn to_values(self) -> Vec<String>;
}

macro_rules! scalar_header_values {
    ($($t:ty),+ $(,)?) => {$(
        impl ToHeaderValues for $t {
            fn to_values(self) -> Vec<String> {
                vec![self.to_string()]
            }
        }

        impl ToHeaderValues for Vec<$t> {
            fn to_values(self) -> Vec<String> {
                self.into_iter().map(|v| v.to_string()).collect()
            }
        }

        impl ToHeaderValues for &[$t] {
            fn to_values(self) -> Vec<String> {
                self.iter().map(|v| v.to_string()).collect()
            }
        }

        impl<const N: usize> ToHeaderValues for [$t; N] {
            fn to_values(self) -> Vec<String> {
                self.iter().map(|v| v.to_string()).collect()
            }
        }
    )+};
}

scalar_header_values!(
    &str, String, u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, f32, f64,
);

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    /// Casing as first stored, kept for display and serialization.
    name: String,
    values: Vec<String>,
}

/// Ordered, case-insensitive, multi-valued header collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: IndexMap<String, Entry>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    fn normalize(name: &str) -> String {
        name.to_ascii_lowercase()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True iff a case-insensitive match for `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&Self::normalize(name))
    }

    /// Values of the case-insensitively matching header, in insertion order.
    pub fn get(&self, name: &str) -> Result<&[String], Error> {
        self.entries
            .get(&Self::normalize(name))
            .map(|entry| entry.values.as_slice())
            .ok_or_else(|| Error::HeaderNotFound(name.to_string()))
    }

    /// Values of the matching header joined with `", "`.
    pub fn get_line(&self, name: &str) -> Result<String, Error> {
        self.get(name).map(|values| values.join(", "))
    }

    /// Replaces the header, discarding any previous values.
    ///
    /// With `rename` the matching entry is removed and recreated under the
    /// exact casing of `name`, which also moves it to the end of iteration
    /// order. Without it, a matching entry keeps both its stored casing and
    /// its position; only the values are swapped out.
    pub fn set(&mut self, name: &str, value: impl ToHeaderValues, rename: bool) -> Result<(), Error> {
        let values = Self::flatten(name, value)?;
        let key = Self::normalize(name);

        if !rename {
            if let Some(entry) = self.entries.get_mut(&key) {
                entry.values = values;
                return Ok(());
            }
        }

        self.entries.shift_remove(&key);
        self.entries.insert(
            key,
            Entry {
                name: name.to_string(),
                values,
            },
        );
        Ok(())
    }

    /// Appends the flattened values to the header, creating it if absent.
    ///
    /// With `rename` the matching entry is recreated under the exact casing
    /// of `name` at the end of iteration order, carrying its old values over
    /// ahead of the new ones.
    pub fn add(&mut self, name: &str, value: impl ToHeaderValues, rename: bool) -> Result<(), Error> {
        let values = Self::flatten(name, value)?;
        let key = Self::normalize(name);

        if !rename {
            if let Some(entry) = self.entries.get_mut(&key) {
                entry.values.extend(values);
                return Ok(());
            }
        }

        let mut merged = match self.entries.shift_remove(&key) {
            Some(old) => old.values,
            None => Vec::new(),
        };
        merged.extend(values);
        self.entries.insert(
            key,
            Entry {
                name: name.to_string(),
                values: merged,
            },
        );
        Ok(())
    }

    /// Removes the case-insensitively matching header. No-op when absent.
    /// The relative order of the remaining headers is preserved.
    pub fn remove(&mut self, name: &str) {
        self.entries.shift_remove(&Self::normalize(name));
    }

    /// Iterates `(display name, values)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .values()
            .map(|entry| (entry.name.as_str(), entry.values.as_slice()))
    }

    /// A full independent copy keyed by display name. Mutating it leaves the
    /// collection untouched.
    pub fn to_map(&self) -> IndexMap<String, Vec<String>> {
        self.entries
            .values()
            .map(|entry| (entry.name.clone(), entry.values.clone()))
            .collect()
    }

    // Validates and flattens before any mutation happens.
    fn flatten(name: &str, value: impl ToHeaderValues) -> Result<Vec<String>, Error> {
        let values = value.to_values();
        if values.is_empty() {
            return Err(Error::EmptyHeaderValues(name.to_string()));
        }
        Ok(values)
    }
}
