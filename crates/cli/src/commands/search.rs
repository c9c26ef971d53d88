use anyhow::Result;
use musiclog_core::{Config, MusicLog, SearchFilters};

/// Print the title of every logged album passing the supplied filters,
/// one per line, in log order.
pub async fn run(
    config: &Config,
    title: Option<String>,
    artist: Option<String>,
    rating: Option<f64>,
    min: Option<f64>,
    max: Option<f64>,
) -> Result<()> {
    let log = MusicLog::load(&config.storage_path)?;
    let filters = SearchFilters::new(title.as_deref(), artist.as_deref(), rating, min, max)?;

    for album in log.albums.iter().filter(|a| filters.matches(a)) {
        println!("{}", album.title.as_deref().unwrap_or(""));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use musiclog_core::{AlbumEntry, MusicLog, SearchFilters};

    fn log() -> MusicLog {
        let mut albums = Vec::new();
        for (id, title, artist, rating) in [
            (1, "Abbey Road", "The Beatles", 2.0),
            (2, "Band on the Run", "Wings", 5.0),
            (3, "Ram", "Paul McCartney", 8.0),
        ] {
            let mut entry = AlbumEntry::new(id);
            entry.title = Some(title.to_string());
            entry.artists = vec![artist.to_string()];
            entry.rating = rating;
            albums.push(entry);
        }
        MusicLog { albums }
    }

    #[test]
    fn rating_range_selects_middle_entry() {
        let log = log();
        let filters = SearchFilters::new(None, None, None, Some(3.0), Some(7.0)).unwrap();
        let titles: Vec<&str> = log
            .albums
            .iter()
            .filter(|a| filters.matches(a))
            .filter_map(|a| a.title.as_deref())
            .collect();
        assert_eq!(titles, vec!["Band on the Run"]);
    }

    #[test]
    fn no_filters_list_everything_in_log_order() {
        let log = log();
        let filters = SearchFilters::new(None, None, None, None, None).unwrap();
        let titles: Vec<&str> = log
            .albums
            .iter()
            .filter(|a| filters.matches(a))
            .filter_map(|a| a.title.as_deref())
            .collect();
        assert_eq!(titles, vec!["Abbey Road", "Band on the Run", "Ram"]);
    }
}
