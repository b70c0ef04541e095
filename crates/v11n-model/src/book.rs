//! The closed universe of canonical book identifiers.
//!
//! Which books exist, and in what order, is decided by each reference
//! system's [`BookOrder`](crate::BookOrder); this module only defines the
//! catalog every order draws from. The three `Intro*` entries are synthetic
//! placeholders addressing front matter for the whole work and for each
//! testament.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::VersificationError;

macro_rules! book_catalog {
    ($( $variant:ident => $osis:literal ),+ $(,)?) => {
        /// A book of scripture, canonical or otherwise.
        ///
        /// Each identifier carries its canonical OSIS-style code. The set is
        /// closed; reference systems select and order a subset of it.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub enum BookId {
            $($variant),+
        }

        impl BookId {
            /// Every identifier in catalog order.
            pub const ALL: &'static [BookId] = &[$(BookId::$variant),+];

            /// The canonical OSIS code, e.g. `"Gen"` or `"1Cor"`.
            pub fn osis(self) -> &'static str {
                match self {
                    $(BookId::$variant => $osis),+
                }
            }
        }
    };
}

book_catalog! {
    // Synthetic front-matter placeholders
    IntroBible => "Intro.Bible",
    IntroOt => "Intro.OT",
    // First testament
    Gen => "Gen",
    Exod => "Exod",
    Lev => "Lev",
    Num => "Num",
    Deut => "Deut",
    Josh => "Josh",
    Judg => "Judg",
    Ruth => "Ruth",
    Sam1 => "1Sam",
    Sam2 => "2Sam",
    Kgs1 => "1Kgs",
    Kgs2 => "2Kgs",
    Chr1 => "1Chr",
    Chr2 => "2Chr",
    Ezra => "Ezra",
    Neh => "Neh",
    Esth => "Esth",
    Job => "Job",
    Ps => "Ps",
    Prov => "Prov",
    Eccl => "Eccl",
    Song => "Song",
    Isa => "Isa",
    Jer => "Jer",
    Lam => "Lam",
    Ezek => "Ezek",
    Dan => "Dan",
    Hos => "Hos",
    Joel => "Joel",
    Amos => "Amos",
    Obad => "Obad",
    Jonah => "Jonah",
    Mic => "Mic",
    Nah => "Nah",
    Hab => "Hab",
    Zeph => "Zeph",
    Hag => "Hag",
    Zech => "Zech",
    Mal => "Mal",
    // Second testament
    IntroNt => "Intro.NT",
    Matt => "Matt",
    Mark => "Mark",
    Luke => "Luke",
    John => "John",
    Acts => "Acts",
    Rom => "Rom",
    Cor1 => "1Cor",
    Cor2 => "2Cor",
    Gal => "Gal",
    Eph => "Eph",
    Phil => "Phil",
    Col => "Col",
    Thess1 => "1Thess",
    Thess2 => "2Thess",
    Tim1 => "1Tim",
    Tim2 => "2Tim",
    Titus => "Titus",
    Phlm => "Phlm",
    Heb => "Heb",
    Jas => "Jas",
    Pet1 => "1Pet",
    Pet2 => "2Pet",
    John1 => "1John",
    John2 => "2John",
    John3 => "3John",
    Jude => "Jude",
    Rev => "Rev",
    // Deuterocanon
    Tob => "Tob",
    Jdt => "Jdt",
    AddEsth => "AddEsth",
    Wis => "Wis",
    Sir => "Sir",
    Bar => "Bar",
    EpJer => "EpJer",
    PrAzar => "PrAzar",
    Sus => "Sus",
    Bel => "Bel",
    Macc1 => "1Macc",
    Macc2 => "2Macc",
    Macc3 => "3Macc",
    Macc4 => "4Macc",
    PrMan => "PrMan",
    Esd1 => "1Esd",
    Esd2 => "2Esd",
    Ps151 => "Ps151",
    // Rahlfs' LXX
    Odes => "Odes",
    PssSol => "PssSol",
    // Vulgate and later Latin manuscripts
    EpLao => "EpLao",
    Esd3 => "3Esd",
    Esd4 => "4Esd",
    Esd5 => "5Esd",
    // Ethiopian canon
    En1 => "1En",
    Jub => "Jub",
    Bar4 => "4Bar",
    AscenIsa => "AscenIsa",
    PsJos => "PsJos",
    // Coptic canon
    AposCon => "AposCon",
    Clem1 => "1Clem",
    Clem2 => "2Clem",
    // Armenian canon
    Cor3 => "3Cor",
    EpCorPaul => "EpCorPaul",
    JosAsen => "JosAsen",
    T12Patr => "T12Patr",
    T12PatrTAsh => "T12Patr.TAsh",
    T12PatrTBenj => "T12Patr.TBenj",
    T12PatrTDan => "T12Patr.TDan",
    T12PatrTGad => "T12Patr.TGad",
    T12PatrTIss => "T12Patr.TIss",
    T12PatrTJos => "T12Patr.TJos",
    T12PatrTJud => "T12Patr.TJud",
    T12PatrTLevi => "T12Patr.TLevi",
    T12PatrTNaph => "T12Patr.TNaph",
    T12PatrTReu => "T12Patr.TReu",
    T12PatrTSim => "T12Patr.TSim",
    T12PatrTZeb => "T12Patr.TZeb",
    // Peshitta
    Bar2 => "2Bar",
    EpBar => "EpBar",
    // Codex Sinaiticus
    Barn => "Barn",
    Herm => "Herm",
    HermMand => "Herm.Mand",
    HermSim => "Herm.Sim",
    HermVis => "Herm.Vis",
    // Other books
    AddDan => "AddDan",
    AddPs => "AddPs",
    EsthGr => "EsthGr",
}

impl BookId {
    /// Number of identifiers in the catalog.
    pub const COUNT: usize = Self::ALL.len();

    /// Dense, stable catalog index, suitable for reverse-lookup tables.
    pub fn index(self) -> usize {
        self as usize
    }

    /// True for books that only ever have a single chapter.
    pub fn is_single_chapter(self) -> bool {
        matches!(
            self,
            BookId::Obad
                | BookId::Phlm
                | BookId::John2
                | BookId::John3
                | BookId::Jude
                | BookId::EpJer
                | BookId::PrAzar
                | BookId::Sus
                | BookId::Bel
                | BookId::PrMan
                | BookId::Ps151
                | BookId::AddPs
                | BookId::EpLao
        )
    }

    /// True for the synthetic front-matter placeholders.
    pub fn is_intro(self) -> bool {
        matches!(self, BookId::IntroBible | BookId::IntroOt | BookId::IntroNt)
    }

    /// Case-insensitive lookup by OSIS code.
    pub fn from_osis(code: &str) -> Option<BookId> {
        let code = code.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|book| book.osis().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.osis())
    }
}

impl FromStr for BookId {
    type Err = VersificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_osis(s).ok_or_else(|| VersificationError::UnknownBook {
            code: s.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn osis_round_trips_for_every_book() {
        for &book in BookId::ALL {
            assert_eq!(BookId::from_osis(book.osis()), Some(book));
        }
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(BookId::from_osis("gen"), Some(BookId::Gen));
        assert_eq!(BookId::from_osis("1COR"), Some(BookId::Cor1));
        assert_eq!(BookId::from_osis("NoSuchBook"), None);
    }

    #[test]
    fn catalog_indices_are_dense_and_stable() {
        for (position, &book) in BookId::ALL.iter().enumerate() {
            assert_eq!(book.index(), position);
        }
    }

    #[test]
    fn single_chapter_flags() {
        assert!(BookId::Obad.is_single_chapter());
        assert!(BookId::Phlm.is_single_chapter());
        assert!(!BookId::Gen.is_single_chapter());
        assert!(!BookId::Rev.is_single_chapter());
    }
}
