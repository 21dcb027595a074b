//! Book catalog and the excerpts collected from each book.
//!
//! Books come from a book-search result or manual entry; the host converts
//! either into a [`NewBook`]. Excerpts are appended from the capture
//! pipeline (see [`crate::capture::ExcerptDraft`]) and annotated afterwards.
//!
//! The whole [`Library`] is serde-serializable; persisting it is up to the
//! host.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a book within a library.
pub type BookId = u32;

/// Identifier of an excerpt within a library.
pub type ExcerptId = u32;

/// Errors from catalog operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Book {0} not found")]
    BookNotFound(BookId),

    #[error("Excerpt {excerpt} not found in book {book}")]
    ExcerptNotFound { book: BookId, excerpt: ExcerptId },

    #[error("Book title must not be empty")]
    EmptyTitle,

    #[error("Excerpt text must not be empty")]
    EmptyExcerpt,

    #[error("No identifiers left in this library")]
    IdsExhausted,
}

/// Color with channels in 0.0 to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Rgba {
    pub const fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Opaque color from 8-bit channels.
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::new(
            red as f64 / 255.0,
            green as f64 / 255.0,
            blue as f64 / 255.0,
            1.0,
        )
    }
}

/// Gradient used for the generated cover when a book has no thumbnail.
pub fn default_cover_colors() -> [Rgba; 2] {
    [Rgba::from_rgb8(239, 120, 221), Rgba::from_rgb8(239, 172, 120)]
}

/// A text snippet taken from a book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Excerpt {
    pub id: ExcerptId,
    pub text: String,
    pub chapter: Option<i32>,
    pub page: Option<i32>,
    /// Free-form annotation shown on the back of the excerpt card.
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub is_bookmarked: bool,
    /// Whether the card shows the text (true) or the note (false).
    #[serde(default = "face_up")]
    pub is_face_up: bool,
}

fn face_up() -> bool {
    true
}

/// A book in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub authors: Vec<String>,
    /// Cover thumbnail from the search provider.
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub excerpts: Vec<Excerpt>,
    #[serde(default)]
    pub is_favorited: bool,
    /// Show the generated gradient cover instead of the thumbnail.
    #[serde(default)]
    pub use_custom_image: bool,
    #[serde(default = "default_cover_colors")]
    pub cover_colors: [Rgba; 2],
}

impl Book {
    pub fn excerpt(&self, id: ExcerptId) -> Option<&Excerpt> {
        self.excerpts.iter().find(|e| e.id == id)
    }

    /// Bookmarked excerpts in insertion order.
    pub fn bookmarked(&self) -> impl Iterator<Item = &Excerpt> {
        self.excerpts.iter().filter(|e| e.is_bookmarked)
    }
}

/// Book details supplied when adding to the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub authors: Vec<String>,
    pub thumbnail_url: Option<String>,
}

/// Excerpt details supplied when adding to a book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewExcerpt {
    pub text: String,
    pub chapter: Option<i32>,
    pub page: Option<i32>,
}

/// Book-search response (`/books/v1/volumes`). Only the fields the
/// catalog keeps are decoded.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeSearch {
    #[serde(default)]
    pub items: Vec<VolumeItem>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeItem {
    pub volume_info: VolumeInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    #[serde(default)]
    pub title: String,
    pub authors: Option<Vec<String>>,
    pub image_links: Option<ImageLinks>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    pub small_thumbnail: String,
}

impl VolumeSearch {
    /// Search results as books ready to add.
    pub fn into_new_books(self) -> Vec<NewBook> {
        self.items
            .into_iter()
            .map(|item| item.volume_info.into())
            .collect()
    }
}

impl From<VolumeInfo> for NewBook {
    fn from(info: VolumeInfo) -> Self {
        Self {
            title: info.title,
            authors: info.authors.unwrap_or_default(),
            thumbnail_url: info.image_links.map(|links| links.small_thumbnail),
        }
    }
}

/// All books and their excerpts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "LibrarySnapshot")]
pub struct Library {
    books: Vec<Book>,
    next_id: u32,
}

/// Stored form of a [`Library`]. The id counter is not trusted on restore.
#[derive(Deserialize)]
struct LibrarySnapshot {
    #[serde(default)]
    books: Vec<Book>,
    #[serde(default)]
    next_id: u32,
}

impl From<LibrarySnapshot> for Library {
    fn from(snapshot: LibrarySnapshot) -> Self {
        let highest = snapshot
            .books
            .iter()
            .flat_map(|b| std::iter::once(b.id).chain(b.excerpts.iter().map(|e| e.id)))
            .max()
            .unwrap_or(0);
        if snapshot.next_id < highest {
            log::warn!(
                "Stored id counter {} is behind id {highest}, advancing",
                snapshot.next_id
            );
        }
        Self {
            books: snapshot.books,
            next_id: snapshot.next_id.max(highest),
        }
    }
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn book(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub fn favorites(&self) -> impl Iterator<Item = &Book> {
        self.books.iter().filter(|b| b.is_favorited)
    }

    /// Books whose title or concatenated authors contain `query`, ignoring
    /// case. An empty query matches every book.
    pub fn search<'a>(
        &'a self,
        query: &str,
        only_favorites: bool,
    ) -> impl Iterator<Item = &'a Book> {
        let needle = query.to_lowercase();
        self.books.iter().filter(move |b| {
            let matches = needle.is_empty()
                || b.title.to_lowercase().contains(&needle)
                || b.authors.concat().to_lowercase().contains(&needle);
            matches && (!only_favorites || b.is_favorited)
        })
    }

    fn book_mut(&mut self, id: BookId) -> Result<&mut Book, CatalogError> {
        self.books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(CatalogError::BookNotFound(id))
    }

    fn excerpt_mut(
        &mut self,
        book: BookId,
        excerpt: ExcerptId,
    ) -> Result<&mut Excerpt, CatalogError> {
        self.book_mut(book)?
            .excerpts
            .iter_mut()
            .find(|e| e.id == excerpt)
            .ok_or(CatalogError::ExcerptNotFound { book, excerpt })
    }

    fn allocate_id(&mut self) -> Result<u32, CatalogError> {
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or(CatalogError::IdsExhausted)?;
        Ok(self.next_id)
    }

    /// Add a book. Title and authors are trimmed; blank authors are dropped.
    pub fn add_book(&mut self, new: NewBook) -> Result<BookId, CatalogError> {
        let title = new.title.trim();
        if title.is_empty() {
            return Err(CatalogError::EmptyTitle);
        }

        let authors = new
            .authors
            .iter()
            .map(|a| a.trim())
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .collect();
        let thumbnail_url = new
            .thumbnail_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        let id = self.allocate_id()?;
        self.books.push(Book {
            id,
            title: title.to_string(),
            authors,
            thumbnail_url,
            excerpts: Vec::new(),
            is_favorited: false,
            use_custom_image: false,
            cover_colors: default_cover_colors(),
        });
        log::debug!("Added book {id}: {title}");
        Ok(id)
    }

    pub fn remove_book(&mut self, id: BookId) -> Result<Book, CatalogError> {
        let index = self
            .books
            .iter()
            .position(|b| b.id == id)
            .ok_or(CatalogError::BookNotFound(id))?;
        Ok(self.books.remove(index))
    }

    /// Flip the favorite flag, returning the new value.
    pub fn toggle_favorite(&mut self, id: BookId) -> Result<bool, CatalogError> {
        let book = self.book_mut(id)?;
        book.is_favorited = !book.is_favorited;
        Ok(book.is_favorited)
    }

    /// Choose between the thumbnail and a generated gradient cover.
    ///
    /// `colors` replaces the gradient when given.
    pub fn set_cover(
        &mut self,
        id: BookId,
        use_custom_image: bool,
        colors: Option<[Rgba; 2]>,
    ) -> Result<(), CatalogError> {
        let book = self.book_mut(id)?;
        book.use_custom_image = use_custom_image;
        if let Some(colors) = colors {
            book.cover_colors = colors;
        }
        Ok(())
    }

    /// Append an excerpt to a book.
    pub fn add_excerpt(
        &mut self,
        book: BookId,
        new: NewExcerpt,
    ) -> Result<ExcerptId, CatalogError> {
        let text = new.text.trim();
        if text.is_empty() {
            return Err(CatalogError::EmptyExcerpt);
        }
        let text = text.to_string();

        // Resolve the book before allocating so a miss leaves ids untouched.
        self.book_mut(book)?;
        let id = self.allocate_id()?;
        self.book_mut(book)?.excerpts.push(Excerpt {
            id,
            text,
            chapter: new.chapter,
            page: new.page,
            note: String::new(),
            is_bookmarked: false,
            is_face_up: true,
        });
        Ok(id)
    }

    pub fn remove_excerpt(
        &mut self,
        book: BookId,
        excerpt: ExcerptId,
    ) -> Result<Excerpt, CatalogError> {
        let entry = self.book_mut(book)?;
        let index = entry
            .excerpts
            .iter()
            .position(|e| e.id == excerpt)
            .ok_or(CatalogError::ExcerptNotFound { book, excerpt })?;
        Ok(entry.excerpts.remove(index))
    }

    /// Flip the bookmark flag, returning the new value.
    pub fn toggle_bookmark(
        &mut self,
        book: BookId,
        excerpt: ExcerptId,
    ) -> Result<bool, CatalogError> {
        let entry = self.excerpt_mut(book, excerpt)?;
        entry.is_bookmarked = !entry.is_bookmarked;
        Ok(entry.is_bookmarked)
    }

    pub fn set_note(
        &mut self,
        book: BookId,
        excerpt: ExcerptId,
        note: impl Into<String>,
    ) -> Result<(), CatalogError> {
        self.excerpt_mut(book, excerpt)?.note = note.into();
        Ok(())
    }

    /// Turn the excerpt card over, returning whether it is now face up.
    pub fn flip(&mut self, book: BookId, excerpt: ExcerptId) -> Result<bool, CatalogError> {
        let entry = self.excerpt_mut(book, excerpt)?;
        entry.is_face_up = !entry.is_face_up;
        Ok(entry.is_face_up)
    }

    pub fn excerpt_count(&self, book: BookId) -> Result<usize, CatalogError> {
        self.book(book)
            .map(|b| b.excerpts.len())
            .ok_or(CatalogError::BookNotFound(book))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library_with_book() -> (Library, BookId) {
        let mut library = Library::new();
        let id = library
            .add_book(NewBook {
                title: "Range".to_string(),
                authors: vec!["David Epstein".to_string()],
                thumbnail_url: None,
            })
            .unwrap();
        (library, id)
    }

    fn excerpt(text: &str) -> NewExcerpt {
        NewExcerpt {
            text: text.to_string(),
            chapter: Some(3),
            page: Some(112),
        }
    }

    #[test]
    fn test_add_book_normalizes_fields() {
        let mut library = Library::new();
        let id = library
            .add_book(NewBook {
                title: "  The Myth of Normal ".to_string(),
                authors: vec!["Gabor Maté, MD".to_string(), "  ".to_string(), String::new()],
                thumbnail_url: Some(" ".to_string()),
            })
            .unwrap();

        let book = library.book(id).unwrap();
        assert_eq!(book.title, "The Myth of Normal");
        assert_eq!(book.authors, vec!["Gabor Maté, MD".to_string()]);
        assert_eq!(book.thumbnail_url, None);
        assert_eq!(book.cover_colors, default_cover_colors());
        assert!(!book.use_custom_image);
    }

    #[test]
    fn test_add_book_rejects_blank_title() {
        let mut library = Library::new();
        let result = library.add_book(NewBook {
            title: "   ".to_string(),
            ..Default::default()
        });
        assert_eq!(result, Err(CatalogError::EmptyTitle));
        assert!(library.books().is_empty());
    }

    #[test]
    fn test_ids_are_unique_across_books_and_excerpts() {
        let (mut library, book) = library_with_book();
        let first = library.add_excerpt(book, excerpt("one")).unwrap();
        let other = library
            .add_book(NewBook {
                title: "Steve Jobs".to_string(),
                ..Default::default()
            })
            .unwrap();
        let second = library.add_excerpt(other, excerpt("two")).unwrap();

        let mut ids = vec![book, first, other, second];
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_add_excerpt_defaults() {
        let (mut library, book) = library_with_book();
        let id = library.add_excerpt(book, excerpt("  Match quality  ")).unwrap();

        let stored = library.book(book).unwrap().excerpt(id).unwrap();
        assert_eq!(stored.text, "Match quality");
        assert_eq!(stored.chapter, Some(3));
        assert_eq!(stored.page, Some(112));
        assert!(stored.note.is_empty());
        assert!(!stored.is_bookmarked);
        assert!(stored.is_face_up);
        assert_eq!(library.excerpt_count(book), Ok(1));
    }

    #[test]
    fn test_add_excerpt_errors() {
        let (mut library, book) = library_with_book();
        assert_eq!(
            library.add_excerpt(book, excerpt("   ")),
            Err(CatalogError::EmptyExcerpt)
        );
        assert_eq!(
            library.add_excerpt(999, excerpt("text")),
            Err(CatalogError::BookNotFound(999))
        );
    }

    #[test]
    fn test_bookmark_note_and_flip() {
        let (mut library, book) = library_with_book();
        let a = library.add_excerpt(book, excerpt("a")).unwrap();
        let b = library.add_excerpt(book, excerpt("b")).unwrap();

        assert_eq!(library.toggle_bookmark(book, b), Ok(true));
        library.set_note(book, a, "compare with chapter 5").unwrap();
        assert_eq!(library.flip(book, a), Ok(false));
        assert_eq!(library.flip(book, a), Ok(true));

        let stored = library.book(book).unwrap();
        let bookmarked: Vec<_> = stored.bookmarked().map(|e| e.id).collect();
        assert_eq!(bookmarked, vec![b]);
        assert_eq!(stored.excerpt(a).unwrap().note, "compare with chapter 5");

        assert_eq!(library.toggle_bookmark(book, b), Ok(false));
    }

    #[test]
    fn test_missing_excerpt() {
        let (mut library, book) = library_with_book();
        assert_eq!(
            library.toggle_bookmark(book, 42),
            Err(CatalogError::ExcerptNotFound { book, excerpt: 42 })
        );
    }

    #[test]
    fn test_remove_excerpt_and_book() {
        let (mut library, book) = library_with_book();
        let id = library.add_excerpt(book, excerpt("gone")).unwrap();
        assert_eq!(library.remove_excerpt(book, id).unwrap().text, "gone");
        assert_eq!(library.excerpt_count(book), Ok(0));

        assert_eq!(library.remove_book(book).unwrap().title, "Range");
        assert!(library.book(book).is_none());
        assert_eq!(library.remove_book(book), Err(CatalogError::BookNotFound(book)));
    }

    #[test]
    fn test_favorites_and_cover() {
        let (mut library, book) = library_with_book();
        assert_eq!(library.toggle_favorite(book), Ok(true));
        assert_eq!(library.favorites().count(), 1);

        let colors = [Rgba::new(0.0, 0.0, 0.0, 1.0), Rgba::new(1.0, 1.0, 1.0, 1.0)];
        library.set_cover(book, true, Some(colors)).unwrap();
        let stored = library.book(book).unwrap();
        assert!(stored.use_custom_image);
        assert_eq!(stored.cover_colors, colors);
    }

    #[test]
    fn test_default_cover_colors() {
        let [first, second] = default_cover_colors();
        assert!((first.red - 239.0 / 255.0).abs() < 1e-12);
        assert!((first.green - 120.0 / 255.0).abs() < 1e-12);
        assert!((second.green - 172.0 / 255.0).abs() < 1e-12);
        assert_eq!(second.alpha, 1.0);
    }

    fn shelf() -> (Library, BookId, BookId, BookId) {
        let mut library = Library::new();
        let mut add = |title: &str, authors: &[&str]| {
            library
                .add_book(NewBook {
                    title: title.to_string(),
                    authors: authors.iter().map(|a| a.to_string()).collect(),
                    thumbnail_url: None,
                })
                .unwrap()
        };
        let steve = add("Steve Jobs", &["Walter Isaacson"]);
        let range = add("Range", &["David Epstein"]);
        let thinking = add("Thinking, Fast and Slow", &["Daniel", "Kahneman"]);
        (library, steve, range, thinking)
    }

    fn ids<'a>(books: impl Iterator<Item = &'a Book>) -> Vec<BookId> {
        books.map(|b| b.id).collect()
    }

    #[test]
    fn test_search_empty_query_returns_all() {
        let (library, steve, range, thinking) = shelf();
        assert_eq!(ids(library.search("", false)), vec![steve, range, thinking]);
    }

    #[test]
    fn test_search_matches_title_ignoring_case() {
        let (library, _, range, _) = shelf();
        assert_eq!(ids(library.search("rAnGe", false)), vec![range]);
    }

    #[test]
    fn test_search_matches_concatenated_authors() {
        let (library, steve, _, thinking) = shelf();
        assert_eq!(ids(library.search("isaacson", false)), vec![steve]);
        // Authors are joined without a separator
        assert_eq!(ids(library.search("danielkahneman", false)), vec![thinking]);
        assert!(library.search("daniel kahneman", false).next().is_none());
    }

    #[test]
    fn test_search_only_favorites() {
        let (mut library, steve, range, _) = shelf();
        library.toggle_favorite(range).unwrap();

        assert_eq!(ids(library.search("", true)), vec![range]);
        assert!(library.search("steve", true).next().is_none());
        assert_eq!(ids(library.search("steve", false)), vec![steve]);
    }

    const VOLUMES_FIXTURE: &str = r#"{
        "kind": "books#volumes",
        "totalItems": 2,
        "items": [
            {
                "kind": "books#volume",
                "id": "8U2oAAAAQBAJ",
                "volumeInfo": {
                    "title": "Steve Jobs",
                    "authors": ["Walter Isaacson"],
                    "publisher": "Simon and Schuster",
                    "imageLinks": {
                        "smallThumbnail": "http://books.google.com/books/content?id=8U2oAAAAQBAJ&zoom=5",
                        "thumbnail": "http://books.google.com/books/content?id=8U2oAAAAQBAJ&zoom=1"
                    }
                }
            },
            {
                "kind": "books#volume",
                "id": "x1",
                "volumeInfo": {
                    "title": "Anonymous Pamphlet"
                }
            }
        ]
    }"#;

    #[test]
    fn test_volume_search_decodes_fixture() {
        let search: VolumeSearch = serde_json::from_str(VOLUMES_FIXTURE).unwrap();
        let books = search.into_new_books();
        assert_eq!(books.len(), 2);

        assert_eq!(books[0].title, "Steve Jobs");
        assert_eq!(books[0].authors, vec!["Walter Isaacson".to_string()]);
        assert_eq!(
            books[0].thumbnail_url.as_deref(),
            Some("http://books.google.com/books/content?id=8U2oAAAAQBAJ&zoom=5")
        );

        assert_eq!(books[1].title, "Anonymous Pamphlet");
        assert!(books[1].authors.is_empty());
        assert_eq!(books[1].thumbnail_url, None);
    }

    #[test]
    fn test_volume_search_without_items() {
        let search: VolumeSearch =
            serde_json::from_str(r#"{"kind": "books#volumes", "totalItems": 0}"#).unwrap();
        assert!(search.into_new_books().is_empty());
    }

    #[test]
    fn test_volume_info_adds_to_library() {
        let search: VolumeSearch = serde_json::from_str(VOLUMES_FIXTURE).unwrap();
        let mut library = Library::new();
        for book in search.into_new_books() {
            library.add_book(book).unwrap();
        }
        assert_eq!(library.books().len(), 2);
        assert_eq!(library.books()[0].authors, vec!["Walter Isaacson".to_string()]);
    }

    #[test]
    fn test_restore_advances_stale_counter() {
        let (mut library, book) = library_with_book();
        let excerpt_id = library.add_excerpt(book, excerpt("kept")).unwrap();

        let mut stored = serde_json::to_value(&library).unwrap();
        stored["next_id"] = serde_json::json!(0);
        let mut restored: Library = serde_json::from_value(stored).unwrap();

        let new_book = restored
            .add_book(NewBook {
                title: "Another".to_string(),
                ..Default::default()
            })
            .unwrap();
        assert_ne!(new_book, book);
        assert_ne!(new_book, excerpt_id);
        assert!(new_book > excerpt_id);
    }

    #[test]
    fn test_restore_keeps_counter_ahead_of_ids() {
        let (library, _) = library_with_book();
        let mut stored = serde_json::to_value(&library).unwrap();
        stored["next_id"] = serde_json::json!(40);
        let restored: Library = serde_json::from_value(stored).unwrap();
        assert_eq!(restored.next_id, 40);
        assert_eq!(restored.books(), library.books());
    }

    #[test]
    fn test_exhausted_ids_return_error() {
        let (mut library, book) = library_with_book();
        library.next_id = u32::MAX;

        assert_eq!(
            library.add_book(NewBook {
                title: "One Too Many".to_string(),
                ..Default::default()
            }),
            Err(CatalogError::IdsExhausted)
        );
        assert_eq!(
            library.add_excerpt(book, excerpt("text")),
            Err(CatalogError::IdsExhausted)
        );
        assert_eq!(library.books().len(), 1);
        assert_eq!(library.excerpt_count(book), Ok(0));
    }
}
