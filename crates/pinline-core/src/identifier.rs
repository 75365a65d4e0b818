//! Interned identifiers for nodes and pins.
//!
//! The diagram engine keys active wire connections by `(node id, pin id)`, so
//! both must be stable and cheap to compare across re-renders. [`Id`] interns
//! the string once and is `Copy` afterwards; [`TerminalKey`] pairs a node id
//! with a pin id.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner shared by every [`Id`].
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock");
    f(&mut interner)
}

/// Interned node or pin identifier.
///
/// # Examples
///
/// ```
/// use pinline_core::identifier::Id;
///
/// let pin = Id::new("coil_in");
/// assert_eq!(pin, "coil_in");
///
/// let generated = Id::indexed("in", 3);
/// assert_eq!(generated, "in3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from a string slice.
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Creates the id of the `idx`-th generated pin sharing a prefix, e.g. `in0`, `in1`.
    ///
    /// Count-parametrized symbols derive their pin ids this way so that pin
    /// `in2` keeps its identity when the count grows from 3 to 5.
    pub fn indexed(prefix: &str, idx: usize) -> Self {
        Self::new(&format!("{prefix}{idx}"))
    }

    /// Returns the `Id` of `name` if it was interned before, without interning it.
    pub fn lookup(name: &str) -> Option<Self> {
        with_interner(|interner| interner.get(name)).map(Self)
    }

    /// Returns the interned string.
    pub fn as_string(&self) -> String {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner")
                .to_string()
        })
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner")
                == other
        })
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

/// Read-only key for maps keyed by [`Id`].
///
/// A `&str` that was never interned cannot be a key of any such map, so
/// queries resolve it with [`Id::lookup`] and leave the interner untouched.
pub trait IdKey {
    fn find_id(&self) -> Option<Id>;
}

impl IdKey for Id {
    fn find_id(&self) -> Option<Id> {
        Some(*self)
    }
}

impl IdKey for &str {
    fn find_id(&self) -> Option<Id> {
        Id::lookup(self)
    }
}

/// Externally unique key of one terminal: the owning node and the pin id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TerminalKey {
    node: Id,
    pin: Id,
}

impl TerminalKey {
    pub fn new(node: Id, pin: Id) -> Self {
        Self { node, pin }
    }

    pub fn node(&self) -> Id {
        self.node
    }

    pub fn pin(&self) -> Id {
        self.pin
    }
}

impl fmt::Display for TerminalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.node, self.pin)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_new_interns_equal_strings() {
        let id1 = Id::new("relay_1");
        let id2 = Id::new("relay_1");
        let id3 = Id::new("fuse_1");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "relay_1");
    }

    #[test]
    fn test_indexed_is_stable() {
        assert_eq!(Id::indexed("out", 0), Id::indexed("out", 0));
        assert_ne!(Id::indexed("out", 0), Id::indexed("out", 1));
        assert_eq!(Id::indexed("w", 11), "w11");
    }

    #[test]
    fn test_lookup_does_not_intern() {
        assert_eq!(Id::lookup("lookup_never_interned"), None);
        assert_eq!(Id::lookup("lookup_never_interned"), None);

        let id = Id::new("lookup_interned");
        assert_eq!(Id::lookup("lookup_interned"), Some(id));
        assert_eq!("lookup_interned".find_id(), Some(id));
        assert_eq!(id.find_id(), Some(id));
    }

    #[test]
    fn test_display_trait() {
        let id = Id::new("display_test");
        assert_eq!(format!("{id}"), "display_test");
    }

    #[test]
    fn test_partial_eq_str() {
        let id = Id::new("87a");
        assert!(id == "87a");
        assert!(id != "87");

        let empty = Id::new("");
        assert!(empty == "");
    }

    #[test]
    fn test_terminal_key_display_and_hash() {
        let key = TerminalKey::new(Id::new("ecu_1"), Id::new("in3"));
        assert_eq!(key.to_string(), "ecu_1::in3");

        let mut map = HashMap::new();
        map.insert(key, 1);
        assert_eq!(
            map.get(&TerminalKey::new(Id::new("ecu_1"), Id::new("in3"))),
            Some(&1)
        );
        assert_eq!(map.get(&TerminalKey::new(Id::new("ecu_2"), Id::new("in3"))), None);
    }
}
