use crate::collections::HashMap;
use crate::{Protocol, Value};
use std::borrow;
use std::cmp;
use std::fmt;
use std::hash;

/// An iterator over the fields of an `Object`.
pub type Iter<'a> = crate::collections::hash_map::Iter<'a, String, Value>;

/// Struct representing a dynamic anonymous object.
///
/// Fields are keyed by string. Protocol members are kept apart from the
/// fields and keyed by [Protocol], so that a field named `next` never
/// shadows or implements [Protocol::NEXT].
#[derive(Default, Clone)]
pub struct Object {
    fields: HashMap<String, Value>,
    protocols: HashMap<Protocol, Value>,
}

impl Object {
    /// Construct a new object.
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
            protocols: HashMap::new(),
        }
    }

    /// Returns the number of fields in the object.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the object contains no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns a reference to the field corresponding to the key.
    #[inline]
    pub fn get<Q: ?Sized>(&self, k: &Q) -> Option<&Value>
    where
        String: borrow::Borrow<Q>,
        Q: hash::Hash + cmp::Eq,
    {
        self.fields.get(k)
    }

    /// Returns a mutable reference to the field corresponding to the key.
    pub fn get_mut<Q: ?Sized>(&mut self, k: &Q) -> Option<&mut Value>
    where
        String: borrow::Borrow<Q>,
        Q: hash::Hash + cmp::Eq,
    {
        self.fields.get_mut(k)
    }

    /// Returns `true` if the object contains a field for the specified key.
    pub fn contains_key<Q: ?Sized>(&self, k: &Q) -> bool
    where
        String: borrow::Borrow<Q>,
        Q: hash::Hash + cmp::Eq,
    {
        self.fields.contains_key(k)
    }

    /// Inserts a field into the object, returning the previous value of the
    /// field if there was one.
    pub fn insert<K>(&mut self, k: K, v: Value) -> Option<Value>
    where
        K: Into<String>,
    {
        self.fields.insert(k.into(), v)
    }

    /// Removes a field from the object, returning its value if it was
    /// present.
    pub fn remove<Q: ?Sized>(&mut self, k: &Q) -> Option<Value>
    where
        String: borrow::Borrow<Q>,
        Q: hash::Hash + cmp::Eq,
    {
        self.fields.remove(k)
    }

    /// Get the member declared for the given protocol.
    pub fn protocol(&self, protocol: Protocol) -> Option<&Value> {
        self.protocols.get(&protocol)
    }

    /// Declare a member for the given protocol, returning the previous
    /// member if there was one.
    ///
    /// Declaring [Value::Unit] is equivalent to not declaring the protocol
    /// at all.
    pub fn insert_protocol(&mut self, protocol: Protocol, v: Value) -> Option<Value> {
        self.protocols.insert(protocol, v)
    }

    /// Remove the member declared for the given protocol.
    pub fn remove_protocol(&mut self, protocol: Protocol) -> Option<Value> {
        self.protocols.remove(&protocol)
    }

    /// An iterator visiting all fields in arbitrary order.
    pub fn iter(&self) -> Iter<'_> {
        self.fields.iter()
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.fields.iter()).finish()
    }
}
