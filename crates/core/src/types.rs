use chrono::{Local, NaiveDate};

/// One logged listening record.
///
/// `title` is optional at the type level because a stored entry may lack a
/// `<title>` child; the add flow always sets it before persistence. A
/// `rating` of `0.0` is the sentinel for "unrated" and is never written to
/// storage, so a real rating of exactly zero is indistinguishable from no
/// rating at all.
#[derive(Debug, Clone, PartialEq)]
pub struct AlbumEntry {
    /// Release identifier from the remote catalog. Not unique within the
    /// log: re-adding the same release is permitted.
    pub id: i64,
    pub title: Option<String>,
    /// Insertion order matches the order returned by the catalog.
    pub artists: Vec<String>,
    pub rating: f64,
    pub date: NaiveDate,
}

impl AlbumEntry {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            title: None,
            artists: Vec::new(),
            rating: 0.0,
            date: Local::now().date_naive(),
        }
    }
}
