use std::collections::HashMap;
use std::fmt;

/* Interned identifier key. Keys below `BUILTIN_COUNT + 1` are the built-in
 * primitive names; key 0 is never handed out. */
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u32);

impl Id {
    pub fn is_builtin(self) -> bool {
        self.0 >= 1 && (self.0 as usize) <= BUILTIN_NAMES.len()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub const KEY_I8: Id = Id(1);
pub const KEY_I16: Id = Id(2);
pub const KEY_I32: Id = Id(3);
pub const KEY_I64: Id = Id(4);
pub const KEY_U8: Id = Id(5);
pub const KEY_U16: Id = Id(6);
pub const KEY_U32: Id = Id(7);
pub const KEY_U64: Id = Id(8);
pub const KEY_USIZE: Id = Id(9);
pub const KEY_BOOL: Id = Id(10);

/* Spellings of the built-in keys, in key order starting at 1 */
pub const BUILTIN_NAMES: [&str; 10] = [
    "i8", "i16", "i32", "i64", "u8", "u16", "u32", "u64", "usize", "bool",
];

/// Identifier table mapping interned keys to their display names.
///
/// Every table starts with the built-in primitive names pre-registered, so a
/// primitive's key is the same in every table.
#[derive(Debug, Clone)]
pub struct IdMap {
    names: Vec<String>,
    by_name: HashMap<String, Id>,
}

impl Default for IdMap {
    fn default() -> Self {
        Self::new()
    }
}

impl IdMap {
    pub fn new() -> Self {
        let mut map = Self {
            /* slot 0 is the invalid key */
            names: vec![String::new()],
            by_name: HashMap::new(),
        };
        for name in BUILTIN_NAMES {
            map.intern(name);
        }
        map
    }

    /// Returns the key for `name`, registering it if it is new.
    pub fn intern(&mut self, name: &str) -> Id {
        if let Some(id) = self.by_name.get(name) {
            return *id;
        }
        let id = Id(self.names.len() as u32);
        self.names.push(name.to_string());
        self.by_name.insert(name.to_string(), id);
        id
    }

    pub fn lookup(&self, name: &str) -> Option<Id> {
        self.by_name.get(name).copied()
    }

    /// Display name for `id`. Keys this table never issued render as `#<key>`.
    pub fn name(&self, id: Id) -> String {
        match self.names.get(id.0 as usize) {
            Some(name) if id.0 != 0 => name.clone(),
            _ => id.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_have_fixed_keys() {
        let map = IdMap::new();
        assert_eq!(map.lookup("i8"), Some(KEY_I8));
        assert_eq!(map.lookup("u32"), Some(KEY_U32));
        assert_eq!(map.lookup("usize"), Some(KEY_USIZE));
        assert_eq!(map.lookup("bool"), Some(KEY_BOOL));
        assert_eq!(map.len(), BUILTIN_NAMES.len());
        assert!(KEY_BOOL.is_builtin());
    }

    #[test]
    fn intern_is_idempotent() {
        let mut map = IdMap::new();
        let a = map.intern("decoder");
        let b = map.intern("decoder");
        assert_eq!(a, b);
        assert!(!a.is_builtin());
        assert_eq!(map.name(a), "decoder");
        assert_eq!(map.intern("u8"), KEY_U8);
    }

    #[test]
    fn unknown_keys_render_numerically() {
        let map = IdMap::new();
        assert_eq!(map.name(Id(0)), "#0");
        assert_eq!(map.name(Id(999)), "#999");
    }
}
