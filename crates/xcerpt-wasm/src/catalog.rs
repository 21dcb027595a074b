//! WASM bindings for the book catalog.
//!
//! Books and excerpts cross the boundary as plain objects through
//! `serde_wasm_bindgen`; ids are numbers. The host persists the library by
//! storing `to_json()` and restoring with `JsLibrary.from_json()`.

use js_sys::Array;
use wasm_bindgen::prelude::*;
use xcerpt_core::capture::ExcerptDraft;
use xcerpt_core::catalog::{BookId, CatalogError, ExcerptId, Library, NewBook, VolumeInfo};

fn to_js_error(e: CatalogError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_js_value<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// The user's books and excerpts.
#[wasm_bindgen]
#[derive(Default)]
pub struct JsLibrary {
    inner: Library,
}

#[wasm_bindgen]
impl JsLibrary {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsLibrary {
        Self::default()
    }

    /// Serialize the whole library for storage.
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.inner)
    }

    /// Restore a library saved with `to_json`.
    pub fn from_json(value: JsValue) -> Result<JsLibrary, JsValue> {
        let inner: Library =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }

    /// All books as an array of plain objects.
    pub fn books(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.inner.books())
    }

    /// One book, or undefined.
    pub fn book(&self, id: BookId) -> Result<JsValue, JsValue> {
        to_js_value(&self.inner.book(id))
    }

    /// Books whose title or joined authors contain `query` (case-insensitive),
    /// optionally only favorites. An empty query matches every book.
    pub fn search(&self, query: &str, only_favorites: bool) -> Result<JsValue, JsValue> {
        let books: Vec<_> = self.inner.search(query, only_favorites).collect();
        to_js_value(&books)
    }

    #[wasm_bindgen(getter)]
    pub fn book_count(&self) -> usize {
        self.inner.books().len()
    }

    /// Add a book from a search result or manual entry.
    ///
    /// `authors` is an array of strings; other entries are ignored.
    pub fn add_book(
        &mut self,
        title: String,
        authors: Array,
        thumbnail_url: Option<String>,
    ) -> Result<BookId, JsValue> {
        let authors = authors.iter().filter_map(|a| a.as_string()).collect();
        self.add_book_inner(title, authors, thumbnail_url)
            .map_err(to_js_error)
    }

    /// Add a book from a book-search `volumeInfo` object.
    pub fn add_volume(&mut self, volume_info: JsValue) -> Result<BookId, JsValue> {
        let info: VolumeInfo = serde_wasm_bindgen::from_value(volume_info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.inner.add_book(info.into()).map_err(to_js_error)
    }

    pub fn remove_book(&mut self, id: BookId) -> Result<(), JsValue> {
        self.inner.remove_book(id).map(|_| ()).map_err(to_js_error)
    }

    pub fn toggle_favorite(&mut self, id: BookId) -> Result<bool, JsValue> {
        self.inner.toggle_favorite(id).map_err(to_js_error)
    }

    /// Use the generated gradient cover (true) or the thumbnail (false).
    pub fn set_use_custom_image(&mut self, id: BookId, value: bool) -> Result<(), JsValue> {
        self.inner.set_cover(id, value, None).map_err(to_js_error)
    }

    /// Add an excerpt from a `{ text, chapter, page }` draft.
    ///
    /// Chapter and page are strings as typed; non-numeric values are dropped.
    pub fn add_excerpt(&mut self, book: BookId, draft: JsValue) -> Result<ExcerptId, JsValue> {
        let draft: ExcerptDraft =
            serde_wasm_bindgen::from_value(draft).map_err(|e| JsValue::from_str(&e.to_string()))?;
        draft.commit_to(&mut self.inner, book).map_err(to_js_error)
    }

    pub fn remove_excerpt(&mut self, book: BookId, excerpt: ExcerptId) -> Result<(), JsValue> {
        self.inner
            .remove_excerpt(book, excerpt)
            .map(|_| ())
            .map_err(to_js_error)
    }

    pub fn toggle_bookmark(&mut self, book: BookId, excerpt: ExcerptId) -> Result<bool, JsValue> {
        self.inner.toggle_bookmark(book, excerpt).map_err(to_js_error)
    }

    pub fn set_note(&mut self, book: BookId, excerpt: ExcerptId, note: String) -> Result<(), JsValue> {
        self.inner.set_note(book, excerpt, note).map_err(to_js_error)
    }

    /// Turn an excerpt card over. Returns whether it is now face up.
    pub fn flip(&mut self, book: BookId, excerpt: ExcerptId) -> Result<bool, JsValue> {
        self.inner.flip(book, excerpt).map_err(to_js_error)
    }

    pub fn excerpt_count(&self, book: BookId) -> Result<usize, JsValue> {
        self.inner.excerpt_count(book).map_err(to_js_error)
    }

    /// Bookmarked excerpts of a book as an array of plain objects.
    pub fn bookmarked(&self, book: BookId) -> Result<JsValue, JsValue> {
        let entry = self
            .inner
            .book(book)
            .ok_or_else(|| to_js_error(CatalogError::BookNotFound(book)))?;
        let excerpts: Vec<_> = entry.bookmarked().collect();
        to_js_value(&excerpts)
    }
}

impl JsLibrary {
    fn add_book_inner(
        &mut self,
        title: String,
        authors: Vec<String>,
        thumbnail_url: Option<String>,
    ) -> Result<BookId, CatalogError> {
        self.inner.add_book(NewBook {
            title,
            authors,
            thumbnail_url,
        })
    }
}
