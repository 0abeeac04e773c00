use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global string interner for component type names.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Source of component ids. Starts at 1 so that 0 never names a component.
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Largest id ever handed out or restored. Keeps ids inside JavaScript's
/// safe-integer range so they cross the wasm boundary as exact `f64`s.
pub const MAX_RAW_ID: u64 = (1 << 53) - 1;

/// Identifier of one placed component.
///
/// Allocated from a process-wide counter, so ids are unique across every
/// design in the process and increase in creation order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(u64);

impl ComponentId {
    /// Allocate a fresh id.
    ///
    /// # Panics
    ///
    /// Panics once all [`MAX_RAW_ID`] ids have been handed out.
    pub fn next() -> Self {
        match Self::try_next() {
            Some(id) => id,
            None => panic!("component id space exhausted"),
        }
    }

    /// Allocate a fresh id, or `None` once the id space is used up. The
    /// counter stops at `MAX_RAW_ID + 1` and never wraps.
    pub fn try_next() -> Option<Self> {
        NEXT_ID
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| {
                (n <= MAX_RAW_ID).then_some(n + 1)
            })
            .ok()
            .map(ComponentId)
    }

    /// Rebuild an id from its raw value (snapshots, JS bridge).
    ///
    /// Returns `None` for 0 and for anything above [`MAX_RAW_ID`]. Otherwise
    /// bumps the allocator past `raw` so later `next()` calls cannot collide
    /// with a restored component.
    pub fn from_raw(raw: u64) -> Option<Self> {
        if raw == 0 || raw > MAX_RAW_ID {
            return None;
        }
        NEXT_ID.fetch_max(raw + 1, Ordering::Relaxed);
        Some(ComponentId(raw))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An interned component type name (`wall`, `sliding-door`, ...).
/// Internally a 4-byte `Spur` index with O(1) equality and hashing.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeName(Spur);

impl TypeName {
    /// Intern a type name, or return the existing handle.
    pub fn intern(s: &str) -> Self {
        TypeName(INTERNER.get_or_intern(s))
    }

    /// The handle for `s` if it has been interned before. Never grows the
    /// interner.
    pub fn get(s: &str) -> Option<Self> {
        INTERNER.get(s).map(TypeName)
    }

    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }
}

impl fmt::Debug for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for TypeName {
    fn from(s: &str) -> Self {
        TypeName::intern(s)
    }
}

impl Serialize for TypeName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TypeName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(TypeName::intern(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = TypeName::intern("sliding-door");
        let b = TypeName::intern("sliding-door");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "sliding-door");
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let a = ComponentId::next();
        let b = ComponentId::next();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn get_does_not_intern() {
        assert!(TypeName::get("never-placed-gazebo").is_none());
        assert!(TypeName::get("never-placed-gazebo").is_none());
        let a = TypeName::intern("pergola");
        assert_eq!(TypeName::get("pergola"), Some(a));
    }

    #[test]
    fn from_raw_moves_allocator_forward() {
        let restored = ComponentId::from_raw(1_000_000).unwrap();
        let fresh = ComponentId::next();
        assert!(fresh > restored);
    }

    #[test]
    fn from_raw_rejects_zero_and_unsafe_ids() {
        assert!(ComponentId::from_raw(0).is_none());
        assert!(ComponentId::from_raw(MAX_RAW_ID + 1).is_none());
        assert!(ComponentId::from_raw(u64::MAX).is_none());
        // The allocator was not dragged toward the top of the range.
        assert!(ComponentId::next().get() < MAX_RAW_ID);
    }
}
