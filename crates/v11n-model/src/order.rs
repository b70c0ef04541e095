//! Ordered book subsets with O(1) reverse lookup.

use crate::book::BookId;
use crate::error::{Result, VersificationError};

/// Sentinel marking a catalog entry that is not part of the order.
const ABSENT: i32 = -1;

/// An immutable, ordered subset of the book catalog.
///
/// Defines which books exist and in what sequence for one reference system.
/// Position lookup is total over the catalog: books outside the order report
/// no position.
#[derive(Debug, Clone)]
pub struct BookOrder {
    books: Vec<BookId>,
    positions: Vec<i32>,
}

impl BookOrder {
    /// Build an order from a book sequence, rejecting duplicates.
    pub fn new(books: Vec<BookId>) -> Result<Self> {
        let mut positions = vec![ABSENT; BookId::COUNT];
        for (position, &book) in books.iter().enumerate() {
            if positions[book.index()] != ABSENT {
                return Err(VersificationError::DuplicateBook { book });
            }
            positions[book.index()] = position as i32;
        }
        Ok(Self { books, positions })
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// The ordered books as a slice.
    pub fn as_slice(&self) -> &[BookId] {
        &self.books
    }

    /// Position of a book within this order, if present.
    pub fn position(&self, book: BookId) -> Option<usize> {
        match self.positions[book.index()] {
            ABSENT => None,
            position => Some(position as usize),
        }
    }

    pub fn contains(&self, book: BookId) -> bool {
        self.positions[book.index()] != ABSENT
    }

    pub fn get(&self, position: usize) -> Option<BookId> {
        self.books.get(position).copied()
    }

    pub fn first(&self) -> Option<BookId> {
        self.books.first().copied()
    }

    pub fn last(&self) -> Option<BookId> {
        self.books.last().copied()
    }

    /// The book following `book` in this order.
    pub fn next(&self, book: BookId) -> Option<BookId> {
        self.position(book).and_then(|p| self.get(p + 1))
    }

    /// The book preceding `book` in this order.
    pub fn previous(&self, book: BookId) -> Option<BookId> {
        self.position(book)
            .and_then(|p| p.checked_sub(1))
            .and_then(|p| self.get(p))
    }

    pub fn iter(&self) -> impl Iterator<Item = BookId> + '_ {
        self.books.iter().copied()
    }
}
