use crate::error::{Error, Result};
use crate::types::AlbumEntry;
use chrono::NaiveDate;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// The canonical list of logged albums for the session.
///
/// Entries are append-only: the tool never updates or deletes existing
/// records, only manual edits to the underlying file can.
#[derive(Debug, Default)]
pub struct MusicLog {
    pub albums: Vec<AlbumEntry>,
}

/// Child elements recognized inside an `<album>` element.
#[derive(Debug, Clone, Copy)]
enum Field {
    Title,
    Artist,
    Rating,
    Date,
}

impl MusicLog {
    /// Load the log from an XML document at `path`.
    ///
    /// A missing file is not an error: the log starts empty. Malformed XML
    /// is a hard failure.
    pub fn load(path: &Path) -> Result<MusicLog> {
        if !path.exists() {
            return Ok(MusicLog::default());
        }

        let content = fs::read_to_string(path)?;
        let mut reader = Reader::from_str(&content);

        let mut log = MusicLog::default();
        let mut entry: Option<AlbumEntry> = None;
        let mut field: Option<Field> = None;
        // Open elements not yet closed. The pull reader reports premature
        // end-of-input as a plain Eof, so truncation has to be caught here.
        let mut depth = 0usize;

        loop {
            match reader.read_event().map_err(|e| Error::Xml(e.to_string()))? {
                Event::Start(e) => {
                    depth += 1;
                    match e.name().as_ref() {
                        b"album" => entry = Some(AlbumEntry::new(album_id(&e)?)),
                        b"title" if entry.is_some() => field = Some(Field::Title),
                        b"artist" if entry.is_some() => field = Some(Field::Artist),
                        b"rating" if entry.is_some() => field = Some(Field::Rating),
                        b"date" if entry.is_some() => field = Some(Field::Date),
                        _ => {}
                    }
                }
                Event::Empty(e) => {
                    // A self-closing <album id=".."/> is an entry with all
                    // children absent; other empty elements carry no text.
                    if e.name().as_ref() == b"album" {
                        log.albums.push(AlbumEntry::new(album_id(&e)?));
                    }
                }
                Event::Text(t) => {
                    if let (Some(album), Some(field)) = (entry.as_mut(), field) {
                        let text = t.unescape().map_err(|e| Error::Xml(e.to_string()))?;
                        apply_field(album, field, &text)?;
                    }
                }
                Event::End(e) => {
                    depth = depth.saturating_sub(1);
                    match e.name().as_ref() {
                        b"album" => {
                            if let Some(done) = entry.take() {
                                log.albums.push(done);
                            }
                        }
                        b"title" | b"artist" | b"rating" | b"date" => field = None,
                        _ => {}
                    }
                }
                Event::Eof => {
                    if depth > 0 {
                        return Err(Error::Xml("unexpected end of document".to_string()));
                    }
                    break;
                }
                _ => {}
            }
        }

        tracing::debug!(path = %path.display(), albums = log.albums.len(), "log loaded");
        Ok(log)
    }

    /// Write the entire log to `path`, overwriting any existing file.
    ///
    /// The parent directory is created if absent. Each entry becomes an
    /// `<album id="..">` element with `<title>` (omitted when unset), one
    /// `<artist>` per artist in order, `<rating>` (omitted when `0.0`), and
    /// `<date>` (always written, ISO-8601).
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut writer = Writer::new(Vec::new());
        writer
            .write_event(Event::Start(BytesStart::new("musiclog")))
            .map_err(|e| Error::Xml(e.to_string()))?;

        for album in &self.albums {
            let mut open = BytesStart::new("album");
            open.push_attribute(("id", album.id.to_string().as_str()));
            writer
                .write_event(Event::Start(open))
                .map_err(|e| Error::Xml(e.to_string()))?;

            if let Some(title) = &album.title {
                write_text_element(&mut writer, "title", title)?;
            }
            for artist in &album.artists {
                write_text_element(&mut writer, "artist", artist)?;
            }
            if album.rating != 0.0 {
                write_text_element(&mut writer, "rating", &album.rating.to_string())?;
            }
            write_text_element(&mut writer, "date", &album.date.format("%Y-%m-%d").to_string())?;

            writer
                .write_event(Event::End(BytesEnd::new("album")))
                .map_err(|e| Error::Xml(e.to_string()))?;
        }

        writer
            .write_event(Event::End(BytesEnd::new("musiclog")))
            .map_err(|e| Error::Xml(e.to_string()))?;

        fs::write(path, writer.into_inner())?;
        tracing::debug!(path = %path.display(), albums = self.albums.len(), "log saved");
        Ok(())
    }
}

fn write_text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    tag: &str,
    text: &str,
) -> Result<()> {
    writer
        .write_event(Event::Start(BytesStart::new(tag)))
        .map_err(|e| Error::Xml(e.to_string()))?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(|e| Error::Xml(e.to_string()))?;
    writer
        .write_event(Event::End(BytesEnd::new(tag)))
        .map_err(|e| Error::Xml(e.to_string()))?;
    Ok(())
}

/// Read the required integer `id` attribute of an `<album>` element.
fn album_id(element: &BytesStart) -> Result<i64> {
    let attr = element
        .try_get_attribute("id")
        .map_err(|e| Error::Xml(e.to_string()))?
        .ok_or_else(|| Error::InvalidData("album element missing id attribute".to_string()))?;
    let value = attr
        .unescape_value()
        .map_err(|e| Error::Xml(e.to_string()))?;
    value
        .parse()
        .map_err(|_| Error::InvalidData(format!("invalid album id '{}'", value)))
}

fn apply_field(album: &mut AlbumEntry, field: Field, text: &str) -> Result<()> {
    match field {
        Field::Title => album.title = Some(text.to_string()),
        Field::Artist => album.artists.push(text.to_string()),
        Field::Rating => {
            album.rating = text
                .trim()
                .parse()
                .map_err(|_| Error::InvalidData(format!("invalid rating '{}'", text)))?;
        }
        Field::Date => {
            // A stored date that does not match YYYY-MM-DD is silently
            // dropped; the entry keeps its creation-time default of today.
            if let Some(date) = parse_iso_date(text) {
                album.date = date;
            }
        }
    }
    Ok(())
}

/// Parse a date string matching exactly `YYYY-MM-DD` into a `NaiveDate`.
/// Anything else, including calendar-invalid dates, yields `None`.
pub fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = PATTERN.get_or_init(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("date pattern"));

    let caps = pattern.captures(text)?;
    let year = caps[1].parse().ok()?;
    let month = caps[2].parse().ok()?;
    let day = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
