//! Thin document model over `lopdf`.
//!
//! [`PdfDocument`] exposes exactly what the merge needs from a PDF library:
//! decode bytes, create an empty document, list page indices, copy pages
//! from another document, append copied pages, and serialize.
//!
//! Copying a page deep-copies every object the page reaches (content
//! streams, fonts, images, annotations) into the destination under fresh
//! object ids. Attributes a page inherits from its page tree are resolved
//! onto the copy, so it keeps its size and resources once it hangs under a
//! different parent.

use lopdf::encryption::DecryptionError;
use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};
use std::collections::HashMap;

use crate::config::CompressionLevel;
use crate::error::{PdfMergeError, Result};

/// PDF version written for newly created documents.
const OUTPUT_VERSION: &str = "1.7";

/// Page attributes that may be inherited from ancestor `Pages` nodes.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against cyclic `Parent` chains in malformed page trees.
const MAX_TREE_DEPTH: usize = 64;

/// Reference to a page that has been copied into a destination document but
/// not yet placed in its page tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageHandle {
    id: ObjectId,
}

/// Width and height of a page in points, taken from its effective `MediaBox`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    /// Width in points.
    pub width: f32,
    /// Height in points.
    pub height: f32,
}

/// A PDF document loaded into memory.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    inner: Document,
}

impl PdfDocument {
    /// Decode a document from its encoded bytes.
    ///
    /// # Errors
    ///
    /// Returns the library's error unchanged if the bytes are not a readable
    /// PDF. A document that only opens with a user password, or that has no
    /// catalog, is rejected as well.
    pub fn load(bytes: &[u8]) -> std::result::Result<Self, lopdf::Error> {
        let inner = Document::load_mem(bytes)?;

        // lopdf only warns when the empty user password does not unlock the file.
        if inner.is_encrypted() && inner.encryption_state.is_none() {
            return Err(DecryptionError::IncorrectPassword.into());
        }
        inner.catalog()?;

        Ok(Self { inner })
    }

    /// Create an empty document with a catalog and an empty page tree.
    pub fn create() -> Self {
        let mut inner = Document::with_version(OUTPUT_VERSION);

        let pages_id = inner.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => Vec::<Object>::new(),
            "Count" => 0,
        });
        let catalog_id = inner.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        inner.trailer.set("Root", catalog_id);

        Self { inner }
    }

    /// PDF version string from the file header.
    pub fn version(&self) -> &str {
        &self.inner.version
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.inner.get_pages().len()
    }

    /// Zero-based page indices in document order.
    pub fn page_indices(&self) -> Vec<usize> {
        (0..self.page_count()).collect()
    }

    /// Size of the page at `index`, if it has a usable `MediaBox`.
    pub fn page_size(&self, index: usize) -> Option<PageSize> {
        let page_id = self.page_ids().get(index).copied()?;
        let media_box = self.inherited_attribute(page_id, b"MediaBox")?;
        let media_box = self.resolve(&media_box).as_array().ok()?;
        if media_box.len() < 4 {
            return None;
        }

        let coord = |i: usize| self.resolve(&media_box[i]).as_float().ok();
        let (x0, y0, x1, y1) = (coord(0)?, coord(1)?, coord(2)?, coord(3)?);

        Some(PageSize {
            width: (x1 - x0).abs(),
            height: (y1 - y0).abs(),
        })
    }

    /// Copy pages of `source` into this document.
    ///
    /// Returns one handle per requested index, in the same order. The copies
    /// are not part of the page tree until passed to [`Self::add_page`].
    /// Objects shared between the requested pages are copied once, and
    /// references between requested pages (link destinations) point at the
    /// copies.
    ///
    /// # Errors
    ///
    /// Returns [`PdfMergeError::PageNotFound`] if an index is out of range.
    pub fn copy_pages(
        &mut self,
        source: &PdfDocument,
        indices: &[usize],
    ) -> Result<Vec<PageHandle>> {
        let source_pages = source.page_ids();
        let mut importer = Importer::new(&source.inner);

        let mut pages = Vec::with_capacity(indices.len());
        for &index in indices {
            let page_id = *source_pages.get(index).ok_or(PdfMergeError::PageNotFound {
                index,
                page_count: source_pages.len(),
            })?;

            let page = source.detached_page(page_id)?;
            let new_id = importer.register_page(page_id, &mut self.inner);
            pages.push((new_id, page));
        }

        let handles = pages
            .into_iter()
            .map(|(new_id, page)| {
                let page = importer.dictionary(&page, &mut self.inner);
                self.inner.objects.insert(new_id, Object::Dictionary(page));
                PageHandle { id: new_id }
            })
            .collect();
        importer.finish(&mut self.inner);

        Ok(handles)
    }

    /// Append a copied page to the end of the page tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the document has no usable page tree or the handle
    /// does not refer to a page of this document.
    pub fn add_page(&mut self, page: PageHandle) -> Result<()> {
        let pages_id = self.pages_root()?;

        self.inner
            .get_dictionary_mut(page.id)?
            .set("Parent", pages_id);

        let pages = self.inner.get_dictionary_mut(pages_id)?;
        pages.get_mut(b"Kids")?.as_array_mut()?.push(page.id.into());

        let count = pages.get(b"Count").and_then(Object::as_i64).unwrap_or(0);
        pages.set("Count", count + 1);

        Ok(())
    }

    /// Serialize the document.
    ///
    /// # Errors
    ///
    /// Returns an error if the library fails to write the document.
    pub fn save(&mut self, compression: CompressionLevel) -> Result<Vec<u8>> {
        match compression {
            CompressionLevel::None => {}
            CompressionLevel::Standard => self.inner.compress(),
            CompressionLevel::Maximum => {
                self.inner.prune_objects();
                self.inner.compress();
            }
        }

        let mut buffer = Vec::new();
        self.inner
            .save_to(&mut buffer)
            .map_err(|err| PdfMergeError::other(format!("Failed to serialize PDF: {err}")))?;

        Ok(buffer)
    }

    /// Page object ids in document order.
    fn page_ids(&self) -> Vec<ObjectId> {
        self.inner.get_pages().into_values().collect()
    }

    /// Object id of the root `Pages` node.
    fn pages_root(&self) -> Result<ObjectId> {
        let pages_id = self.inner.catalog()?.get(b"Pages")?.as_reference()?;
        Ok(pages_id)
    }

    /// Look up `key` on the page or the nearest ancestor that defines it.
    fn inherited_attribute(&self, page_id: ObjectId, key: &[u8]) -> Option<Object> {
        let mut node = self.inner.get_dictionary(page_id).ok()?;

        for _ in 0..MAX_TREE_DEPTH {
            if let Ok(value) = node.get(key) {
                return Some(value.clone());
            }
            let parent_id = node.get(b"Parent").and_then(Object::as_reference).ok()?;
            node = self.inner.get_dictionary(parent_id).ok()?;
        }

        None
    }

    /// Follow a single indirect reference, if any.
    fn resolve<'a>(&'a self, object: &'a Object) -> &'a Object {
        match object {
            Object::Reference(id) => self.inner.get_object(*id).unwrap_or(object),
            other => other,
        }
    }

    /// Clone a page dictionary with its inherited attributes resolved and
    /// without its `Parent`.
    fn detached_page(&self, page_id: ObjectId) -> Result<Dictionary> {
        let mut page = self.inner.get_dictionary(page_id)?.clone();
        for key in INHERITABLE_KEYS {
            if !page.has(key)
                && let Some(value) = self.inherited_attribute(page_id, key)
            {
                page.set(key.to_vec(), value);
            }
        }
        page.remove(b"Parent");

        Ok(page)
    }
}

/// Copies objects from one document into another.
///
/// References are followed with an explicit worklist, so long reference
/// chains (pages linking to the next page) do not grow the call stack.
struct Importer<'a> {
    source: &'a Document,
    copied: HashMap<ObjectId, ObjectId>,
    pending: Vec<(ObjectId, ObjectId)>,
}

impl<'a> Importer<'a> {
    fn new(source: &'a Document) -> Self {
        Self {
            source,
            copied: HashMap::new(),
            pending: Vec::new(),
        }
    }

    /// Reserve the destination id for a requested page.
    ///
    /// The page itself is imported by the caller. A page requested twice gets
    /// two copies; references to it resolve to the first.
    fn register_page(&mut self, page_id: ObjectId, target: &mut Document) -> ObjectId {
        let new_id = target.new_object_id();
        self.copied.entry(page_id).or_insert(new_id);
        new_id
    }

    /// Import every object still referenced but not yet copied.
    fn finish(&mut self, target: &mut Document) {
        let source = self.source;

        while let Some((source_id, new_id)) = self.pending.pop() {
            let imported = match source.get_object(source_id) {
                Ok(object) => self.object(object, target),
                Err(_) => Object::Null,
            };
            target.objects.insert(new_id, imported);
        }
    }

    fn dictionary(&mut self, dict: &Dictionary, target: &mut Document) -> Dictionary {
        let mut imported = Dictionary::new();
        for (key, value) in dict.iter() {
            imported.set(key.clone(), self.object(value, target));
        }
        imported
    }

    fn object(&mut self, object: &Object, target: &mut Document) -> Object {
        match object {
            Object::Reference(id) => self.reference(*id, target),
            Object::Array(items) => Object::Array(
                items
                    .iter()
                    .map(|item| self.object(item, target))
                    .collect(),
            ),
            Object::Dictionary(dict) => Object::Dictionary(self.dictionary(dict, target)),
            Object::Stream(stream) => {
                let mut stream = stream.clone();
                stream.dict = self.dictionary(&stream.dict, target);
                Object::Stream(stream)
            }
            other => other.clone(),
        }
    }

    /// Map a reference into the destination, queueing its target for copying.
    fn reference(&mut self, id: ObjectId, target: &mut Document) -> Object {
        if let Some(new_id) = self.copied.get(&id) {
            return Object::Reference(*new_id);
        }

        // A dangling reference is equivalent to null.
        let Ok(object) = self.source.get_object(id) else {
            return Object::Null;
        };

        // Never drag the source's page tree or catalog along.
        if is_structural_node(object) {
            return Object::Null;
        }

        let new_id = target.new_object_id();
        self.copied.insert(id, new_id);
        self.pending.push((id, new_id));

        Object::Reference(new_id)
    }
}

fn is_structural_node(object: &Object) -> bool {
    let Ok(dict) = object.as_dict() else {
        return false;
    };

    matches!(
        dict.get(b"Type"),
        Ok(Object::Name(name)) if name.as_slice() == b"Pages" || name.as_slice() == b"Catalog"
    )
}
