//! Access to the PDF object graph.
//!
//! Font loading only needs three things from a document: read an object by
//! id, add a new indirect object, and mark an object as finished. The
//! [`ObjectStore`] trait captures exactly that; [`lopdf::Document`] and the
//! in-memory [`MemoryStore`] implement it.

use std::collections::BTreeMap;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use tracing::trace;

use crate::error::BackendError;

/// The document-object-model operations used by font loading.
pub trait ObjectStore {
    /// Fetch an indirect object.
    fn get_object(&self, id: ObjectId) -> Option<&Object>;

    /// Store `object` as a new indirect object and return its id.
    fn add_object(&mut self, object: Object) -> ObjectId;

    /// Mark an indirect object as complete; it will not be modified again.
    fn flush(&mut self, id: ObjectId);
}

impl ObjectStore for Document {
    fn get_object(&self, id: ObjectId) -> Option<&Object> {
        Document::get_object(self, id).ok()
    }

    fn add_object(&mut self, object: Object) -> ObjectId {
        Document::add_object(self, object)
    }

    fn flush(&mut self, id: ObjectId) {
        // lopdf serializes whole documents; there is nothing to write early.
        trace!(object = ?id, "flush");
    }
}

/// A standalone object store backed by a map.
///
/// Records flushed ids, which makes the object lifecycle observable.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    objects: BTreeMap<ObjectId, Object>,
    flushed: Vec<ObjectId>,
    next_id: u32,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids flushed so far, in order.
    pub fn flushed(&self) -> &[ObjectId] {
        &self.flushed
    }

    /// True if `id` has been flushed.
    pub fn is_flushed(&self, id: ObjectId) -> bool {
        self.flushed.contains(&id)
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl ObjectStore for MemoryStore {
    fn get_object(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(&id)
    }

    fn add_object(&mut self, object: Object) -> ObjectId {
        self.next_id += 1;
        let id = (self.next_id, 0);
        self.objects.insert(id, object);
        id
    }

    fn flush(&mut self, id: ObjectId) {
        trace!(object = ?id, "flush");
        self.flushed.push(id);
    }
}

/// Resolve an indirect reference to the actual object.
///
/// Dangling references resolve to themselves.
pub(crate) fn resolve_ref<'a, S: ObjectStore + ?Sized>(
    store: &'a S,
    obj: &'a Object,
) -> &'a Object {
    match obj {
        Object::Reference(id) => store.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// Look up `key` in `dict`, following one indirect reference.
pub(crate) fn get_resolved<'a, S: ObjectStore + ?Sized>(
    store: &'a S,
    dict: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Object> {
    dict.get(key).ok().map(|obj| resolve_ref(store, obj))
}

/// Convert a numeric object to an integer, rounding reals.
pub(crate) fn object_to_i64(obj: &Object) -> Option<i64> {
    match obj {
        Object::Integer(i) => Some(*i),
        Object::Real(f) if f.is_finite() => Some(f.round() as i64),
        _ => None,
    }
}

/// Convert a numeric object to an `i32`, saturating out-of-range values.
pub(crate) fn object_to_i32(obj: &Object) -> Option<i32> {
    object_to_i64(obj).map(|v| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
}

/// Read a name object as text.
pub(crate) fn object_to_name(obj: &Object) -> Option<String> {
    obj.as_name()
        .ok()
        .map(|name| String::from_utf8_lossy(name).into_owned())
}

/// Short name of an object's type, for diagnostics.
pub(crate) fn object_kind(obj: &Object) -> &'static str {
    match obj {
        Object::Null => "null",
        Object::Boolean(_) => "boolean",
        Object::Integer(_) => "integer",
        Object::Real(_) => "real",
        Object::Name(_) => "name",
        Object::String(..) => "string",
        Object::Array(_) => "array",
        Object::Dictionary(_) => "dictionary",
        Object::Stream(_) => "stream",
        Object::Reference(_) => "reference",
    }
}

/// Decode a PDF stream, decompressing if necessary.
pub(crate) fn decode_stream(stream: &Stream) -> Result<Vec<u8>, BackendError> {
    if stream.dict.get(b"Filter").is_ok() {
        stream
            .decompressed_content()
            .map_err(|e| BackendError::Parse(format!("stream decompression failed: {e}")))
    } else {
        Ok(stream.content.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;

    #[test]
    fn memory_store_adds_and_flushes() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        let a = store.add_object(Object::Integer(1));
        let b = store.add_object(Object::Integer(2));
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
        assert!(matches!(store.get_object(b), Some(Object::Integer(2))));

        store.flush(b);
        assert!(store.is_flushed(b));
        assert!(!store.is_flushed(a));
        assert_eq!(store.flushed(), &[b]);
    }

    #[test]
    fn document_store_round_trips_objects() {
        let mut doc = Document::with_version("1.5");
        let id = ObjectStore::add_object(&mut doc, Object::Integer(42));
        assert!(matches!(
            ObjectStore::get_object(&doc, id),
            Some(Object::Integer(42))
        ));
        assert!(ObjectStore::get_object(&doc, (9999, 0)).is_none());
        ObjectStore::flush(&mut doc, id);
    }

    #[test]
    fn resolve_ref_follows_one_reference() {
        let mut store = MemoryStore::new();
        let id = store.add_object(Object::Integer(7));
        let reference = Object::Reference(id);
        assert!(matches!(resolve_ref(&store, &reference), Object::Integer(7)));

        let dangling = Object::Reference((500, 0));
        assert!(matches!(
            resolve_ref(&store, &dangling),
            Object::Reference((500, 0))
        ));
    }

    #[test]
    fn get_resolved_reads_through_references() {
        let mut store = MemoryStore::new();
        let id = store.add_object(Object::Name(b"WinAnsiEncoding".to_vec()));
        let dict = dictionary! { "Encoding" => id };
        let obj = get_resolved(&store, &dict, b"Encoding");
        assert_eq!(obj.and_then(object_to_name).as_deref(), Some("WinAnsiEncoding"));
        assert!(get_resolved(&store, &dict, b"Missing").is_none());
    }

    #[test]
    fn numeric_conversions() {
        assert_eq!(object_to_i64(&Object::Integer(-207)), Some(-207));
        assert_eq!(object_to_i64(&Object::Real(717.6)), Some(718));
        assert_eq!(object_to_i64(&Object::Real(f32::NAN)), None);
        assert_eq!(object_to_i64(&Object::Name(b"X".to_vec())), None);
        assert_eq!(object_to_i32(&Object::Integer(i64::MAX)), Some(i32::MAX));
    }

    #[test]
    fn object_kind_names() {
        assert_eq!(object_kind(&Object::Null), "null");
        assert_eq!(object_kind(&Object::Array(vec![])), "array");
        assert_eq!(object_kind(&Object::Reference((1, 0))), "reference");
    }

    #[test]
    fn decode_stream_without_filter_returns_raw_bytes() {
        let stream = Stream::new(Dictionary::new(), b"raw".to_vec());
        assert_eq!(decode_stream(&stream).unwrap(), b"raw");
    }
}
