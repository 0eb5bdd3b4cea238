//! PDF object types.
//!
//! The checker does not parse files; it only needs enough of the object model
//! to hold attribute values and the encryption dictionary.
//! Dictionaries keep insertion order so that attribute precedence and
//! diagnostics follow document order.

use indexmap::IndexMap;

/// Ordered PDF dictionary.
pub type Dictionary = IndexMap<String, Object>;

/// PDF object representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Null object
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Real (floating-point) value
    Real(f64),
    /// String (byte array, any text-string encoding)
    String(Vec<u8>),
    /// Name (without the leading /)
    Name(String),
    /// Array of objects
    Array(Vec<Object>),
    /// Dictionary (key-value pairs)
    Dictionary(Dictionary),
    /// Stream (dictionary + data)
    Stream {
        /// Stream dictionary
        dict: Dictionary,
        /// Stream data
        data: bytes::Bytes,
    },
    /// Indirect object reference
    Reference(ObjectRef),
}

/// Reference to an indirect object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ObjectRef {
    /// Object number
    pub id: u32,
    /// Generation number
    pub gen: u16,
}

impl ObjectRef {
    /// Create a new object reference.
    pub fn new(id: u32, gen: u16) -> Self {
        Self { id, gen }
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} R", self.id, self.gen)
    }
}

impl Object {
    /// Convenience constructor for a name object.
    pub fn name(name: impl Into<String>) -> Self {
        Object::Name(name.into())
    }

    /// Try to cast to integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Object::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to cast to name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Object::Name(s) => Some(s),
            _ => None,
        }
    }

    /// Try to cast to dictionary. Works for both Dictionary and Stream objects.
    pub fn as_dict(&self) -> Option<&Dictionary> {
        match self {
            Object::Dictionary(d) => Some(d),
            Object::Stream { dict, .. } => Some(dict),
            _ => None,
        }
    }

    /// Visit every string object reachable from this object, depth first.
    pub fn for_each_string<F: FnMut(&[u8])>(&self, f: &mut F) {
        match self {
            Object::String(s) => f(s),
            Object::Array(arr) => arr.iter().for_each(|o| o.for_each_string(f)),
            Object::Dictionary(d) | Object::Stream { dict: d, .. } => {
                d.values().for_each(|o| o.for_each_string(f))
            },
            _ => {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_ref_display() {
        assert_eq!(format!("{}", ObjectRef::new(12, 0)), "12 0 R");
    }

    #[test]
    fn test_dictionary_keeps_insertion_order() {
        let mut dict = Dictionary::new();
        dict.insert("O".into(), Object::name("List"));
        dict.insert("ListNumbering".into(), Object::name("Decimal"));
        let keys: Vec<_> = dict.keys().cloned().collect();
        assert_eq!(keys, vec!["O", "ListNumbering"]);
    }

    #[test]
    fn test_for_each_string_walks_nested() {
        let mut inner = Dictionary::new();
        inner.insert("T".into(), Object::String(b"b".to_vec()));
        let obj = Object::Array(vec![
            Object::String(b"a".to_vec()),
            Object::Dictionary(inner),
            Object::Integer(3),
        ]);
        let mut seen = Vec::new();
        obj.for_each_string(&mut |s| seen.push(s.to_vec()));
        assert_eq!(seen, vec![b"a".to_vec(), b"b".to_vec()]);
    }
}
