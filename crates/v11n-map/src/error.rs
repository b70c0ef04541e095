use thiserror::Error;

use v11n_model::VersificationError;

#[derive(Debug, Error)]
pub enum MapError {
    #[error(transparent)]
    Reference(#[from] VersificationError),
    #[error("empty mapping specification")]
    EmptySpec,
    #[error("offset specification {spec:?} has no basis to offset from")]
    OffsetWithoutBasis { spec: String },
    #[error("offset specification {spec:?} is not a signed verse count")]
    MalformedOffset { spec: String },
    #[error("part tag is not allowed on the range {spec:?}")]
    PartOnRange { spec: String },
    #[error("absent-section marker {spec:?} is not allowed on the local side")]
    SectionOnLocal { spec: String },
    #[error("rule side {spec:?} must name verses")]
    NotAVerse { spec: String },
    #[error("{left} maps {left_count} verses but {right} maps {right_count}")]
    CardinalityMismatch {
        left: String,
        right: String,
        left_count: u32,
        right_count: u32,
    },
    #[error("no mapping data for scheme {scheme:?}")]
    NoMappingData { scheme: String },
}

pub type Result<T> = std::result::Result<T, MapError>;
