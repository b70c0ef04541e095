//! Parsing of canonical reference strings.
//!
//! The accepted grammar is `Book.Chapter.Verse`, the same-chapter shorthand
//! `Book.Chapter.Verse1-Verse2`, and the full two-ended form
//! `Book.C.V-Book.C.V`. Book codes may themselves contain dots
//! (`Herm.Mand`), so the chapter and verse are taken from the right.

use crate::book::BookId;
use crate::error::{Result, VersificationError};
use crate::verse::{VerseRange, VerseRef};
use crate::versification::Versification;

/// Parse a single verse address and validate it against `v11n`.
pub fn parse_verse(v11n: &Versification, input: &str) -> Result<VerseRef> {
    let verse = split_triple(input)?;
    v11n.validate(verse.book, verse.chapter, verse.verse)?;
    Ok(verse)
}

/// Parse a verse or verse-range reference and validate it against `v11n`.
pub fn parse_range(v11n: &Versification, input: &str) -> Result<VerseRange> {
    let input = input.trim();
    let Some((head, tail)) = input.split_once('-') else {
        return Ok(VerseRange::single(parse_verse(v11n, input)?));
    };

    let start = parse_verse(v11n, head)?;
    let end = if tail.contains('.') {
        parse_verse(v11n, tail)?
    } else {
        // Same-chapter shorthand: the tail is just the closing verse number.
        let verse = parse_number(tail, input)?;
        v11n.validate(start.book, start.chapter, verse)?;
        VerseRef::new(start.book, start.chapter, verse)
    };

    if v11n.ordinal(end) < v11n.ordinal(start) {
        return Err(VersificationError::InvertedRange {
            input: input.to_string(),
        });
    }
    Ok(VerseRange::new(start, end))
}

fn split_triple(input: &str) -> Result<VerseRef> {
    let input = input.trim();
    let mut parts = input.rsplitn(3, '.');
    let (Some(verse), Some(chapter), Some(book)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(VersificationError::MalformedReference {
            input: input.to_string(),
        });
    };

    let book = BookId::from_osis(book).ok_or_else(|| VersificationError::UnknownBook {
        code: book.to_string(),
    })?;
    Ok(VerseRef::new(
        book,
        parse_number(chapter, input)?,
        parse_number(verse, input)?,
    ))
}

fn parse_number(text: &str, input: &str) -> Result<u32> {
    text.trim()
        .parse()
        .map_err(|_| VersificationError::MalformedReference {
            input: input.to_string(),
        })
}
