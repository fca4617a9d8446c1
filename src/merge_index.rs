//! Merge-region lookup and the processed-merge bookkeeping used while
//! walking a header.

use std::collections::HashSet;
use std::fmt;

use crate::error::{Result, XlcolumnsError};
use crate::types::MergeRange;

/// Canonical key of a merge region: its four bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MergeSignature {
    start_row: u32,
    start_col: u32,
    end_row: u32,
    end_col: u32,
}

impl fmt::Display for MergeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{}",
            self.start_row, self.start_col, self.end_row, self.end_col
        )
    }
}

pub fn signature(region: &MergeRange) -> MergeSignature {
    MergeSignature {
        start_row: region.start_row,
        start_col: region.start_col,
        end_row: region.end_row,
        end_col: region.end_col,
    }
}

/// Read-only view over a sheet's merge regions.
#[derive(Debug, Clone, Copy)]
pub struct MergeIndex<'a> {
    regions: &'a [MergeRange],
}

impl<'a> MergeIndex<'a> {
    /// Wrap a sheet's merge list.
    ///
    /// # Errors
    /// Returns [`XlcolumnsError::MalformedMergeRegion`] for the first region whose
    /// end precedes its start; such a region could never be consumed by a scan.
    pub fn new(regions: &'a [MergeRange]) -> Result<Self> {
        if let Some(bad) = regions.iter().find(|region| !region.is_well_formed()) {
            return Err(XlcolumnsError::MalformedMergeRegion(bad.to_string()));
        }
        Ok(Self { regions })
    }

    /// First region containing `(row, col)`. Regions never overlap, so at most
    /// one can match.
    pub fn find_covering(&self, row: u32, col: u32) -> Option<&'a MergeRange> {
        self.regions.iter().find(|region| region.contains(row, col))
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Merge regions already expanded during one traversal.
///
/// Create one per top-level build; sharing a set across independent builds
/// makes the second build skip regions it never expanded.
#[derive(Debug, Default)]
pub struct ProcessedMerges {
    seen: HashSet<MergeSignature>,
}

impl ProcessedMerges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_processed(&self, region: &MergeRange) -> bool {
        self.seen.contains(&signature(region))
    }

    /// Mark a region as consumed. Returns `false` if it already was.
    pub fn mark_processed(&mut self, region: &MergeRange) -> bool {
        self.seen.insert(signature(region))
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
