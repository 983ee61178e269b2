use clap::Parser;
use log::{error, info};
use redsearch::cli::{Cli, Commands, SearchArgs};
use redsearch::config::AppConfig;
use redsearch::operations::search::{
    handle_search_command_with_client, SearchCommandOptions, SearchTarget,
};
use std::process::ExitCode;

fn command_options(command: Commands) -> SearchCommandOptions {
    let (query, target, args) = match command {
        Commands::Posts {
            query,
            subreddits,
            args,
        } => (query, SearchTarget::Posts { subreddits }, args),
        Commands::Subreddits { query, args } => (query, SearchTarget::Subreddits, args),
        Commands::Users { query, args } => (query, SearchTarget::Users, args),
    };

    let SearchArgs {
        sort,
        timespan,
        limit,
        after,
        before,
        brief,
    } = args;

    SearchCommandOptions {
        query,
        target,
        sort,
        timespan,
        limit,
        after,
        before,
        brief,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = AppConfig::load();

    let mut client = match config.create_client() {
        Ok(client) => client,
        Err(err) => {
            error!("Failed to create Reddit client: {}", err);
            return ExitCode::FAILURE;
        }
    };

    // Prefer an app-only token over the rate-limited public endpoints
    if client.access_token.is_none() {
        if let Some(client_id) = &config.client_id {
            match client.get_access_token(client_id).await {
                Ok(_) => info!("Successfully authenticated with Reddit API"),
                Err(err) => {
                    error!("Failed to authenticate with Reddit API: {}", err);
                    return ExitCode::FAILURE;
                }
            }
        }
    }

    match handle_search_command_with_client(command_options(cli.command), client).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use redsearch::search::{Sort, Timespan};

    #[test]
    fn user_search_keeps_sort_and_time() {
        let cli = Cli::try_parse_from(["redsearch", "users", "ferris", "--sort", "top", "-t", "year"])
            .unwrap();
        let options = command_options(cli.command);

        assert!(matches!(options.target, SearchTarget::Users));
        assert_eq!(options.sort, Some(Sort::Top));
        assert_eq!(options.timespan, Some(Timespan::Year));
    }
}
