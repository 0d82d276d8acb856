//! The record contract the view engine is generic over.
//!
//! A page's record type says which of its fields are searchable, which enum
//! is its status, and how each sortable field is keyed. Filtering, ordering
//! and aggregation are done once, in [`crate::view`].

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use crate::collate;
use crate::error::ViewError;
use crate::Identified;

/// A closed set of named values: a status enum or a sortable-field enum.
///
/// Parsing is exact and case-sensitive; the wire spelling is [`as_str`](Vocabulary::as_str).
pub trait Vocabulary:
    Copy
    + Eq
    + Hash
    + fmt::Display
    + FromStr<Err = ViewError>
    + serde::Serialize
    + Send
    + Sync
    + 'static
{
    /// Every value, in declaration order.
    fn all() -> &'static [Self];

    /// The wire spelling.
    fn as_str(self) -> &'static str;
}

/// One row of a dashboard table.
pub trait Record: Identified + Clone {
    /// Fields the table can be sorted by.
    type Field: Vocabulary;
    /// The record's status/category enum.
    type Status: Vocabulary;

    /// The designated searchable text fields.
    fn search_text(&self) -> Vec<&str>;

    /// The record's status, or `None` for records without a status field.
    fn status(&self) -> Option<Self::Status>;

    /// The sort key for `field`.
    fn sort_key(&self, field: Self::Field) -> SortKey<'_>;
}

/// A typed sort key.
///
/// Keys of the same variant compare by type: text by locale-aware collation,
/// numbers arithmetically, timestamps as instants. `Missing` sorts after
/// every present value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortKey<'a> {
    Text(&'a str),
    Number(f64),
    Timestamp(DateTime<Utc>),
    Missing,
}

impl SortKey<'_> {
    /// Key for an integer count.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn count(n: u64) -> Self {
        // Counts on a dashboard stay far below 2^53.
        Self::Number(n as f64)
    }

    /// Ascending comparison of two keys.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => collate::compare(a, b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Timestamp(a), Self::Timestamp(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    // Only reached for mismatched variants, which a record never produces
    // for a single field except through `Missing`.
    const fn rank(&self) -> u8 {
        match self {
            Self::Text(_) => 0,
            Self::Number(_) => 1,
            Self::Timestamp(_) => 2,
            Self::Missing => 3,
        }
    }
}

impl From<Option<DateTime<Utc>>> for SortKey<'_> {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        value.map_or(Self::Missing, Self::Timestamp)
    }
}

/// Declare a [`Vocabulary`] enum with its wire spellings.
///
/// `$kind` names the [`ViewError`] variant returned for unknown input.
macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $kind:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant ),+
        }

        impl $name {
            /// Every value, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The wire spelling.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::ViewError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err($crate::error::ViewError::$kind {
                        value: other.to_owned(),
                        expected: Self::ALL
                            .iter()
                            .map(|v| v.as_str())
                            .collect::<Vec<_>>()
                            .join(", "),
                    }),
                }
            }
        }

        impl $crate::record::Vocabulary for $name {
            fn all() -> &'static [Self] {
                Self::ALL
            }

            fn as_str(self) -> &'static str {
                $name::as_str(self)
            }
        }
    };
}

pub(crate) use vocabulary;
