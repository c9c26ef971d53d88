mod commands;

use clap::Parser;
use musiclog_core::Config;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "musiclog")]
#[command(version, about = "Log the music you listen to", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Search the catalog and log an album
    #[command(alias = "a")]
    Add {
        /// Free-text catalog search query
        name: String,

        /// Rate the album
        #[arg(short, long)]
        rating: Option<f64>,

        /// Prompt for candidate selection and rating
        #[arg(short, long)]
        interactive: bool,
    },

    /// Search logged albums
    #[command(alias = "s")]
    Search {
        /// Title regex
        #[arg(short, long)]
        title: Option<String>,

        /// Artist regex
        #[arg(short, long)]
        artist: Option<String>,

        /// Exact rating
        #[arg(short, long)]
        rating: Option<f64>,

        /// Minimum rating
        #[arg(short, long)]
        min: Option<f64>,

        /// Maximum rating
        #[arg(short = 'M', long)]
        max: Option<f64>,
    },

    #[command(external_subcommand)]
    Other(Vec<String>),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Command::Add {
            name,
            rating,
            interactive,
        } => commands::add::run(&config, &name, rating, interactive).await,
        Command::Search {
            title,
            artist,
            rating,
            min,
            max,
        } => commands::search::run(&config, title, artist, rating, min, max).await,
        Command::Other(args) => {
            let cmd = args.first().map(String::as_str).unwrap_or("");
            println!("Unknown command {}", cmd);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_alias_dispatches() {
        let cli = Cli::try_parse_from(["musiclog", "a", "abbey road"]).unwrap();
        assert!(matches!(cli.command, Command::Add { ref name, .. } if name == "abbey road"));
    }

    #[test]
    fn add_parses_rating_flag() {
        let cli = Cli::try_parse_from(["musiclog", "add", "revolver", "-r", "8.5"]).unwrap();
        match cli.command {
            Command::Add { rating, interactive, .. } => {
                assert_eq!(rating, Some(8.5));
                assert!(!interactive);
            }
            _ => panic!("expected add command"),
        }
    }

    #[test]
    fn malformed_rating_flag_is_a_parse_error() {
        assert!(Cli::try_parse_from(["musiclog", "add", "revolver", "-r", "great"]).is_err());
    }

    #[test]
    fn search_alias_and_bounds() {
        let cli = Cli::try_parse_from(["musiclog", "s", "-m", "3", "-M", "7"]).unwrap();
        match cli.command {
            Command::Search { min, max, .. } => {
                assert_eq!(min, Some(3.0));
                assert_eq!(max, Some(7.0));
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn unknown_command_is_captured() {
        let cli = Cli::try_parse_from(["musiclog", "listen", "extra"]).unwrap();
        assert!(matches!(cli.command, Command::Other(ref args) if args[0] == "listen"));
    }
}
