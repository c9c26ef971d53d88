use crate::error::{Error, Result};
use crate::types::AlbumEntry;
use regex::Regex;

/// Predicates for selecting logged albums. Supplied filters compose by
/// logical AND; with none supplied every entry passes.
#[derive(Debug, Default)]
pub struct SearchFilters {
    title: Option<Regex>,
    artist: Option<Regex>,
    rating: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
}

impl SearchFilters {
    pub fn new(
        title: Option<&str>,
        artist: Option<&str>,
        rating: Option<f64>,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<Self> {
        Ok(Self {
            title: compile(title)?,
            artist: compile(artist)?,
            rating,
            min,
            max,
        })
    }

    pub fn matches(&self, album: &AlbumEntry) -> bool {
        if let Some(pattern) = &self.title {
            // Case-sensitive substring search; an unset title never matches.
            if !album.title.as_deref().is_some_and(|t| pattern.is_match(t)) {
                return false;
            }
        }
        if let Some(pattern) = &self.artist {
            // Passes if any of the entry's artists matches.
            if !album.artists.iter().any(|a| pattern.is_match(a)) {
                return false;
            }
        }
        if let Some(rating) = self.rating {
            // Exact floating-point equality, no tolerance.
            if album.rating != rating {
                return false;
            }
        }
        if let Some(min) = self.min {
            if album.rating < min {
                return false;
            }
        }
        if let Some(max) = self.max {
            if album.rating > max {
                return false;
            }
        }
        true
    }
}

fn compile(pattern: Option<&str>) -> Result<Option<Regex>> {
    pattern
        .map(|p| {
            Regex::new(p).map_err(|e| Error::InvalidData(format!("invalid pattern '{}': {}", p, e)))
        })
        .transpose()
}
