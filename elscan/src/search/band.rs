use serde::Serialize;
use std::ops::RangeInclusive;

use crate::errors::{ElsError, ElsResult};

/// Smallest skip of the full band
pub const FULL_BAND_MIN: usize = 2;
/// Largest skip of the full band
pub const FULL_BAND_MAX: usize = 49;

/// Inclusive range of skip distances scanned by the cross-search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkipBand {
    min: usize,
    max: usize,
}

impl SkipBand {
    pub fn new(min: usize, max: usize) -> ElsResult<Self> {
        if min == 0 {
            return Err(ElsError::config_error("skip band must start at 1 or more"));
        }
        if min > max {
            return Err(ElsError::config_error(format!(
                "skip band {min}..={max} is empty"
            )));
        }
        Ok(Self { min, max })
    }

    /// Every skip from 2 to 49
    pub fn full() -> Self {
        Self {
            min: FULL_BAND_MIN,
            max: FULL_BAND_MAX,
        }
    }

    /// `width` consecutive skips starting at `skip`
    pub fn from_skip(skip: usize, width: usize) -> ElsResult<Self> {
        if width == 0 {
            return Err(ElsError::config_error("band width must be at least 1"));
        }
        let max = skip
            .checked_add(width - 1)
            .ok_or_else(|| ElsError::config_error("skip band overflows"))?;
        Self::new(skip, max)
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// Number of skip values in the band
    pub fn width(&self) -> usize {
        self.max - self.min + 1
    }

    /// Skip values in ascending order
    pub fn iter(&self) -> RangeInclusive<usize> {
        self.min..=self.max
    }
}
