use crate::search::{Sort, Timespan};
use clap::{Args, Parser};

#[derive(Parser, Debug)]
#[command(
    name = "redsearch",
    version,
    about = "Search Reddit posts, subreddits and users."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Ordering and pagination flags shared by every search
#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// Reddit only honours this for posts; it is forwarded for the others.
    #[arg(long, value_enum, help = "Sort order")]
    pub sort: Option<Sort>,

    /// Reddit only honours this for posts; it is forwarded for the others.
    #[arg(long = "time", short = 't', value_enum, help = "Time window")]
    pub timespan: Option<Timespan>,

    /// Maximum number of results (Reddit may return none for 1).
    #[arg(long, short, help = "Number of results to retrieve")]
    pub limit: Option<u32>,

    /// Fullname to continue after, as printed by a previous search.
    #[arg(long, help = "Cursor to continue after")]
    pub after: Option<String>,

    /// Fullname to continue before.
    #[arg(long, help = "Cursor to continue before")]
    pub before: Option<String>,

    /// Display results in a brief, one-line format.
    #[arg(long, short, help = "Show results in a brief one-line format")]
    pub brief: bool,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Search for posts, across Reddit or within some subreddits.
    Posts {
        /// The text to search for.
        #[arg(help = "Search query", required = true)]
        query: String,

        /// Restrict the search to this subreddit (repeatable).
        #[arg(long = "subreddit", short = 'r', help = "Subreddit to search in")]
        subreddits: Vec<String>,

        #[command(flatten)]
        args: SearchArgs,
    },

    /// Search for subreddits by name and description.
    Subreddits {
        #[arg(help = "Search query", required = true)]
        query: String,

        #[command(flatten)]
        args: SearchArgs,
    },

    /// Search for users by name.
    Users {
        #[arg(help = "Search query", required = true)]
        query: String,

        #[command(flatten)]
        args: SearchArgs,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posts_command_parses_repeated_subreddits_and_enums() {
        let cli = Cli::try_parse_from([
            "redsearch", "posts", "async io", "-r", "rust", "-r", "golang", "--sort", "top",
            "--time", "week", "--limit", "25",
        ])
        .unwrap();

        match cli.command {
            Commands::Posts {
                query,
                subreddits,
                args,
            } => {
                assert_eq!(query, "async io");
                assert_eq!(subreddits, ["rust", "golang"]);
                assert_eq!(args.sort, Some(Sort::Top));
                assert_eq!(args.timespan, Some(Timespan::Week));
                assert_eq!(args.limit, Some(25));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn users_and_subreddits_accept_sort_and_time() {
        let cli = Cli::try_parse_from([
            "redsearch", "users", "ferris", "--sort", "new", "-t", "week", "-b",
        ])
        .unwrap();
        match cli.command {
            Commands::Users { query, args } => {
                assert_eq!(query, "ferris");
                assert_eq!(args.sort, Some(Sort::New));
                assert_eq!(args.timespan, Some(Timespan::Week));
                assert!(args.brief);
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let cli = Cli::try_parse_from(["redsearch", "subreddits", "rust", "--time", "all"]).unwrap();
        match cli.command {
            Commands::Subreddits { args, .. } => {
                assert_eq!(args.sort, None);
                assert_eq!(args.timespan, Some(Timespan::All));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn unknown_sort_is_rejected() {
        let result = Cli::try_parse_from(["redsearch", "posts", "rust", "--sort", "loudest"]);
        assert!(result.is_err());
    }
}
