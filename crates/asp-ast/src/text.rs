use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
    sync::{LazyLock, Mutex, MutexGuard, PoisonError},
};

use string_interner::{DefaultBackend, DefaultSymbol, StringInterner};

static STRING_INTERNER: LazyLock<Mutex<StringInterner<DefaultBackend>>> =
    LazyLock::new(|| Mutex::new(StringInterner::default()));

fn interner() -> MutexGuard<'static, StringInterner<DefaultBackend>> {
    STRING_INTERNER.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Interned text stored in string-valued attributes.
///
/// Every string entering a node goes through the process-wide interner, so a
/// `Text` is a small copyable handle that stays valid until the process exits.
/// Equality compares handles; ordering and hashing follow the string content.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Text(DefaultSymbol);

impl Text {
    pub fn new(s: &str) -> Self {
        Self(interner().get_or_intern(s))
    }

    pub fn as_str(&self) -> String {
        self.resolve_with(|s| s.to_string())
    }

    pub fn resolve_with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&str) -> R,
    {
        let interner = interner();
        f(interner.resolve(self.0).unwrap_or_default())
    }

    pub fn is_empty(&self) -> bool {
        self.resolve_with(str::is_empty)
    }
}

impl Default for Text {
    fn default() -> Self {
        Text::new("")
    }
}

impl Ord for Text {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.0 == other.0 {
            return Ordering::Equal;
        }

        let interner = interner();
        let lhs = interner.resolve(self.0).unwrap_or_default();
        let rhs = interner.resolve(other.0).unwrap_or_default();
        lhs.cmp(rhs)
    }
}

impl PartialOrd for Text {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Text {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.resolve_with(|s| s.hash(state))
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Text {
    fn from(s: String) -> Self {
        Self::new(&s)
    }
}

impl PartialEq<str> for Text {
    fn eq(&self, other: &str) -> bool {
        self.resolve_with(|s| s == other)
    }
}

impl PartialEq<&str> for Text {
    fn eq(&self, other: &&str) -> bool {
        self.resolve_with(|s| s == *other)
    }
}

impl std::fmt::Display for Text {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.resolve_with(|s| f.write_str(s))
    }
}

impl std::fmt::Debug for Text {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.resolve_with(|s| write!(f, "{:?}", s))
    }
}

#[cfg(feature = "host")]
impl serde::Serialize for Text {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.resolve_with(|s| serializer.serialize_str(s))
    }
}

#[cfg(feature = "host")]
impl<'de> serde::Deserialize<'de> for Text {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Text::new(&s))
    }
}
