//! A named reference system: book order, chapter counts, verse counts, and
//! the dense ordinal address space derived from them.

use crate::book::BookId;
use crate::error::{Result, VersificationError};
use crate::order::BookOrder;
use crate::verse::{Testament, VerseRef};

/// A complete versification scheme.
///
/// Immutable once constructed; safe for unsynchronized concurrent reads.
/// Every verse, including the whole-work, testament, book and chapter
/// introductions, occupies one slot in a dense zero-based ordinal space:
///
/// - `0` — the whole-work introduction
/// - `1` — the first-testament introduction
/// - `2` — the first book's introduction, `3` its chapter 1 introduction,
///   `4` its chapter 1 verse 1, and so on
/// - `ot_max_ordinal() + 1` — the second-testament introduction
#[derive(Debug, Clone)]
pub struct Versification {
    name: String,
    order: BookOrder,
    /// Highest verse number per chapter, indexed `[book][chapter]`.
    /// Chapter 0 is the book introduction and always ends at verse 0.
    last_verses: Vec<Vec<u32>>,
    /// Ordinal of verse 0 of each chapter, parallel to `last_verses`.
    chapter_starts: Vec<Vec<u32>>,
    ot_max_ordinal: u32,
    nt_max_ordinal: u32,
}

impl Versification {
    /// Construct a scheme from an already-augmented book order and the
    /// per-book last-verse tables.
    ///
    /// The order may contain the introduction placeholders wherever the
    /// scheme puts them; `last_verse` holds one row per non-placeholder
    /// book, in order, with 1-based chapters (no chapter 0 row; it is
    /// synthesized here, as are the placeholder rows). Construction walks
    /// every chapter once.
    pub fn new(name: impl Into<String>, order: BookOrder, last_verse: &[&[u32]]) -> Result<Self> {
        if order.is_empty() {
            return Err(VersificationError::EmptyOrder);
        }

        let mut rows = last_verse.iter();
        let mut last_verses = Vec::with_capacity(order.len());
        for book in order.iter() {
            if book.is_intro() {
                last_verses.push(vec![0]);
            } else if let Some(row) = rows.next() {
                last_verses.push(with_intro_chapter(row));
            } else {
                return Err(table_mismatch(&order, last_verse));
            }
        }
        if rows.next().is_some() {
            return Err(table_mismatch(&order, last_verse));
        }

        // One walk over all chapters accumulates the ordinal counter into
        // the chapter-start table and fixes the testament boundary.
        let mut chapter_starts = Vec::with_capacity(last_verses.len());
        let mut ordinal: u32 = 0;
        let mut ot_max_ordinal = 0;
        for (index, chapters) in last_verses.iter().enumerate() {
            if order.get(index) == Some(BookId::IntroNt) {
                ot_max_ordinal = ordinal.saturating_sub(1);
            }
            let mut starts = Vec::with_capacity(chapters.len());
            for &last_verse in chapters {
                starts.push(ordinal);
                // Verse 0 is the chapter introduction, hence the extra slot.
                ordinal += last_verse + 1;
            }
            chapter_starts.push(starts);
        }
        let nt_max_ordinal = ordinal - 1;
        if !order.contains(BookId::IntroNt) {
            ot_max_ordinal = nt_max_ordinal;
        }

        Ok(Self {
            name: name.into(),
            order,
            last_verses,
            chapter_starts,
            ot_max_ordinal,
            nt_max_ordinal,
        })
    }

    /// Convenience constructor from separate testament book lists.
    ///
    /// Synthesizes the whole-work placeholder plus one placeholder per
    /// non-empty testament, in the conventional layout. The book lists must
    /// not include placeholders themselves.
    pub fn with_testaments(
        name: impl Into<String>,
        books_ot: &[BookId],
        books_nt: &[BookId],
        last_verse_ot: &[&[u32]],
        last_verse_nt: &[&[u32]],
    ) -> Result<Self> {
        let mut books = Vec::with_capacity(books_ot.len() + books_nt.len() + 3);
        books.push(BookId::IntroBible);
        if !books_ot.is_empty() {
            books.push(BookId::IntroOt);
            books.extend_from_slice(books_ot);
        }
        if !books_nt.is_empty() {
            books.push(BookId::IntroNt);
            books.extend_from_slice(books_nt);
        }

        let tables: Vec<&[u32]> = last_verse_ot
            .iter()
            .chain(last_verse_nt.iter())
            .copied()
            .collect();
        Self::new(name, BookOrder::new(books)?, &tables)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn books(&self) -> &BookOrder {
        &self.order
    }

    /// Last ordinal of the first testament range.
    pub fn ot_max_ordinal(&self) -> u32 {
        self.ot_max_ordinal
    }

    /// Last ordinal of the scheme; equals the first-testament boundary when
    /// the scheme has no second testament.
    pub fn maximum_ordinal(&self) -> u32 {
        self.nt_max_ordinal
    }

    /// Last valid chapter number for a book; 0 when the book is absent.
    pub fn last_chapter(&self, book: BookId) -> u32 {
        match self.order.position(book) {
            Some(position) => self.last_verses[position].len() as u32 - 1,
            None => 0,
        }
    }

    /// Last valid verse number for a chapter; 0 when out of range.
    pub fn last_verse(&self, book: BookId, chapter: u32) -> u32 {
        self.order
            .position(book)
            .and_then(|position| self.last_verses[position].get(chapter as usize))
            .copied()
            .unwrap_or(0)
    }

    /// The dense ordinal of a verse address.
    ///
    /// An out-of-range book or chapter yields the sentinel ordinal 0; call
    /// [`Versification::validate`] first when a hard error is wanted.
    pub fn ordinal(&self, verse: VerseRef) -> u32 {
        self.order
            .position(verse.book)
            .and_then(|position| self.chapter_starts[position].get(verse.chapter as usize))
            .map(|start| start + verse.verse)
            .unwrap_or(0)
    }

    /// Decode an ordinal back into a verse address.
    ///
    /// Ordinals beyond the end of the scheme are clamped to the last verse.
    /// Runs two binary searches: one over books, one over the owning book's
    /// chapters. In the conventional layout this sends ordinal 0 to the
    /// whole-work introduction, 1 to the first-testament introduction and
    /// `ot_max_ordinal() + 1` to the second-testament introduction.
    pub fn decode_ordinal(&self, ordinal: u32) -> VerseRef {
        let ord = ordinal.min(self.nt_max_ordinal);

        // Largest book whose chapter-0 start is <= ord; chapter 0 of book 0
        // starts at 0, so the partition point is never 0.
        let book_index = self
            .chapter_starts
            .partition_point(|starts| starts[0] <= ord)
            - 1;
        let starts = &self.chapter_starts[book_index];
        let chapter = starts.partition_point(|&start| start <= ord) - 1;
        let book = self.order.as_slice()[book_index];
        VerseRef::new(book, chapter as u32, ord - starts[chapter])
    }

    /// Check an address against this scheme's bounds.
    pub fn validate(&self, book: BookId, chapter: u32, verse: u32) -> Result<()> {
        let Some(position) = self.order.position(book) else {
            return Err(VersificationError::BookNotInScheme {
                book,
                scheme: self.name.clone(),
            });
        };

        let max_chapter = self.last_verses[position].len() as u32 - 1;
        if chapter > max_chapter {
            return Err(VersificationError::ChapterOutOfRange {
                book,
                max: max_chapter,
                given: chapter,
            });
        }

        let max_verse = self.last_verses[position][chapter as usize];
        if verse > max_verse {
            return Err(VersificationError::VerseOutOfRange {
                book,
                chapter,
                max: max_verse,
                given: verse,
            });
        }
        Ok(())
    }

    /// Silent form of [`Versification::validate`].
    pub fn is_valid(&self, book: BookId, chapter: u32, verse: u32) -> bool {
        self.validate(book, chapter, verse).is_ok()
    }

    /// The verse one step after `verse`, rolling across chapter and book
    /// boundaries into the next introduction; `None` past the end.
    pub fn next_verse(&self, verse: VerseRef) -> Option<VerseRef> {
        if verse.verse < self.last_verse(verse.book, verse.chapter) {
            return Some(VerseRef::new(verse.book, verse.chapter, verse.verse + 1));
        }
        if verse.chapter < self.last_chapter(verse.book) {
            return Some(VerseRef::new(verse.book, verse.chapter + 1, 0));
        }
        self.order
            .next(verse.book)
            .map(|book| VerseRef::new(book, 0, 0))
    }

    /// The verse one step before `verse`; `None` before the start.
    pub fn previous_verse(&self, verse: VerseRef) -> Option<VerseRef> {
        if verse.verse > 0 {
            return Some(VerseRef::new(verse.book, verse.chapter, verse.verse - 1));
        }
        if verse.chapter > 0 {
            let chapter = verse.chapter - 1;
            return Some(VerseRef::new(
                verse.book,
                chapter,
                self.last_verse(verse.book, chapter),
            ));
        }
        self.order.previous(verse.book).map(|book| {
            let chapter = self.last_chapter(book);
            VerseRef::new(book, chapter, self.last_verse(book, chapter))
        })
    }

    /// Repair an out-of-range chapter or verse by carrying the excess into
    /// subsequent chapters and books, so that "verse + N" arithmetic may
    /// cross boundaries. Negative inputs clamp to 0; overflow past the last
    /// book saturates at the scheme's final verse.
    pub fn patch(&self, book: BookId, chapter: i32, verse: i32) -> VerseRef {
        let mut book = if self.order.contains(book) {
            book
        } else {
            match self.order.first() {
                Some(first) => first,
                None => return VerseRef::new(BookId::IntroBible, 0, 0),
            }
        };
        let mut chapter = chapter.max(0) as u32;
        let mut verse = verse.max(0) as u32;

        while chapter > self.last_chapter(book) {
            chapter -= self.last_chapter(book) + 1;
            book = match self.order.next(book) {
                Some(next) => next,
                None => return self.last_verse_ref(),
            };
        }

        while verse > self.last_verse(book, chapter) {
            verse -= self.last_verse(book, chapter) + 1;
            chapter += 1;
            if chapter > self.last_chapter(book) {
                chapter = 0;
                book = match self.order.next(book) {
                    Some(next) => next,
                    None => return self.last_verse_ref(),
                };
            }
        }

        VerseRef::new(book, chapter, verse)
    }

    /// The verse `n` ordinals after `verse`, clamped to the end of the
    /// scheme.
    pub fn add(&self, verse: VerseRef, n: u32) -> VerseRef {
        self.decode_ordinal(self.ordinal(verse).saturating_add(n))
    }

    /// The verse `n` ordinals before `verse`, clamped to the start.
    pub fn subtract(&self, verse: VerseRef, n: u32) -> VerseRef {
        self.decode_ordinal(self.ordinal(verse).saturating_sub(n))
    }

    /// Signed verse count from `start` to `end`, inclusive of `start` and
    /// exclusive of `end`.
    pub fn distance(&self, start: VerseRef, end: VerseRef) -> i64 {
        i64::from(self.ordinal(end)) - i64::from(self.ordinal(start))
    }

    /// Which testament range an ordinal falls in.
    pub fn testament_of(&self, ordinal: u32) -> Testament {
        if ordinal > self.ot_max_ordinal {
            Testament::New
        } else {
            Testament::Old
        }
    }

    /// Number of addressable verses in one testament, or in the whole
    /// scheme when `None`.
    pub fn verse_count(&self, testament: Option<Testament>) -> u32 {
        let total = self.nt_max_ordinal + 1;
        match testament {
            None => total,
            Some(Testament::Old) => self.ot_max_ordinal + 1,
            Some(Testament::New) => total - (self.ot_max_ordinal + 1),
        }
    }

    pub fn first_verse_in_chapter(&self, book: BookId, chapter: u32) -> VerseRef {
        VerseRef::new(book, chapter, 0)
    }

    pub fn last_verse_in_chapter(&self, book: BookId, chapter: u32) -> VerseRef {
        VerseRef::new(book, chapter, self.last_verse(book, chapter))
    }

    pub fn is_end_of_chapter(&self, verse: VerseRef) -> bool {
        verse.verse == self.last_verse(verse.book, verse.chapter)
    }

    pub fn is_end_of_book(&self, verse: VerseRef) -> bool {
        self.is_end_of_chapter(verse) && verse.chapter == self.last_chapter(verse.book)
    }

    /// Every address of the scheme in ordinal order.
    pub fn all_verses(&self) -> impl Iterator<Item = VerseRef> + '_ {
        (0..=self.nt_max_ordinal).map(|ordinal| self.decode_ordinal(ordinal))
    }

    fn last_verse_ref(&self) -> VerseRef {
        match self.order.last() {
            Some(book) => {
                let chapter = self.last_chapter(book);
                VerseRef::new(book, chapter, self.last_verse(book, chapter))
            }
            None => VerseRef::new(BookId::IntroBible, 0, 0),
        }
    }
}

fn table_mismatch(order: &BookOrder, tables: &[&[u32]]) -> VersificationError {
    VersificationError::TableMismatch {
        books: order.iter().filter(|book| !book.is_intro()).count(),
        tables: tables.len(),
    }
}

/// Prepend the implicit 0-verse introduction chapter to a 1-based table row.
fn with_intro_chapter(chapters: &[u32]) -> Vec<u32> {
    let mut row = Vec::with_capacity(chapters.len() + 1);
    row.push(0);
    row.extend_from_slice(chapters);
    row
}
