use anyhow::Result;
use musiclog_catalog::{Candidate, CatalogClient};
use musiclog_core::{AlbumEntry, Config, MusicLog};
use std::io::{self, BufRead, Write};

/// Search the catalog for `name` and append one entry to the log.
///
/// Non-interactively the first candidate is taken unconditionally;
/// interactively the user picks one of up to `result_limit` candidates or
/// skips with empty input. The log is persisted whenever the search
/// produced results, even when an interactive run selects nothing.
pub async fn run(config: &Config, name: &str, rating: Option<f64>, interactive: bool) -> Result<()> {
    let client = CatalogClient::new(&config.catalog)?;
    let mut log = MusicLog::load(&config.storage_path)?;

    let results = client.search(name).await?;
    if results.is_empty() {
        println!("No results for {}", name);
        return Ok(());
    }

    if interactive {
        let stdin = io::stdin();
        add_interactive(
            &mut log,
            &results,
            config.result_limit,
            &mut stdin.lock(),
            &mut io::stdout(),
        )?;
    } else {
        add_first(&mut log, &results, rating.unwrap_or(0.0));
    }

    log.save(&config.storage_path)?;
    Ok(())
}

fn entry_from(candidate: &Candidate) -> AlbumEntry {
    let mut entry = AlbumEntry::new(candidate.id);
    entry.title = Some(candidate.title.clone());
    entry.artists = candidate.artists.clone();
    entry
}

/// Append the first candidate with the given rating.
fn add_first(log: &mut MusicLog, results: &[Candidate], rating: f64) {
    let mut entry = entry_from(&results[0]);
    entry.rating = rating;
    log.albums.push(entry);
}

/// List candidates, prompt for a selection and a rating, and append the
/// chosen entry. Empty input at the selection prompt adds nothing.
fn add_interactive<R: BufRead, W: Write>(
    log: &mut MusicLog,
    results: &[Candidate],
    limit: usize,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let count = print_candidates(out, results, limit)?;
    let Some(index) = prompt_index(input, out, count)? else {
        return Ok(());
    };
    let rating = prompt_rating(input, out)?;

    let mut entry = entry_from(&results[index]);
    entry.rating = rating;
    log.albums.push(entry);
    Ok(())
}

/// Print up to `limit` candidates as `N: title`, 1-indexed. Returns the
/// count printed.
fn print_candidates<W: Write>(out: &mut W, results: &[Candidate], limit: usize) -> io::Result<usize> {
    let count = results.len().min(limit);
    for (i, candidate) in results.iter().take(count).enumerate() {
        writeln!(out, "{}: {}", i + 1, candidate.title)?;
    }
    Ok(count)
}

/// Prompt until the user enters a number in `1..=count` or empty input.
/// Returns the zero-based index of the selection, or `None` for the
/// empty-input skip default.
fn prompt_index<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    count: usize,
) -> Result<Option<usize>> {
    loop {
        write!(out, "Enter a number 1-{} (empty for default): ", count)?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // EOF behaves like the empty default.
            return Ok(None);
        }
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        match line.parse::<i64>() {
            Ok(n) if n >= 1 && (n as usize) <= count => return Ok(Some(n as usize - 1)),
            Ok(_) => writeln!(out, "Please enter a valid index.")?,
            Err(_) => writeln!(out, "Please enter a number.")?,
        }
    }
}

/// Prompt once for an optional rating. Empty or non-numeric input is
/// silently treated as unrated.
fn prompt_rating<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<f64> {
    write!(out, "Enter a rating (empty for none): ")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().parse().unwrap_or(0.0))
}
