use anyhow::{Context, Result};
use commitpulse::export::export_chart;
use commitpulse::view::{self, CommitBody, RepoPanel};
use commitpulse::{Config, GithubApi, GithubClient, LookupController};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
commands:
  user <name>      enter a username
  search [name]    list the user's repositories
  commits <repo>   chart the repository's recent commits
  help             show this help
  quit             exit";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env().context("Invalid configuration")?;
    let client = GithubClient::new(&config)?;
    let controller = LookupController::new(client, config.window_days);

    println!("GitHub Profile Analyzer");
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let line = line.trim();
        let (cmd, arg) = line.split_once(' ').unwrap_or((line, ""));
        let arg = arg.trim();

        match cmd {
            "" => continue,
            "user" => controller.set_username(arg),
            "search" if arg.is_empty() => controller.search().await,
            "search" => controller.search_user(arg).await,
            "commits" if !arg.is_empty() => {
                controller.view_commits(arg).await;
                render(&controller);
                save_chart(&controller, &config);
                continue;
            }
            "help" => {
                println!("{HELP}");
                continue;
            }
            "quit" | "exit" => break,
            _ => {
                println!("unknown command: {line}\n{HELP}");
                continue;
            }
        }

        render(&controller);
    }

    Ok(())
}

fn render<A: GithubApi>(controller: &LookupController<A>) {
    let state = controller.snapshot();

    println!();
    if !state.username().is_empty() {
        println!("user: {}", state.username());
    }

    match view::repo_panel(&state) {
        RepoPanel::Blank => {}
        RepoPanel::Skeleton(n) => {
            println!("Repositories:");
            for _ in 0..n {
                println!("  ...");
            }
        }
        RepoPanel::Error(msg) => println!("error: {msg}"),
        RepoPanel::Cards(cards) => {
            println!("Repositories:");
            for card in cards {
                println!("  {} - {}", card.title, card.description);
                println!("    {}", card.url);
            }
        }
        RepoPanel::NoRepositories => println!("{}", view::NO_REPOSITORIES),
    }

    if let Some(panel) = view::commit_panel(&state, controller.window_days()) {
        println!();
        println!("{}", panel.title);
        match panel.body {
            CommitBody::Loading => println!("Loading commits chart..."),
            CommitBody::Error(msg) => println!("error: {msg}"),
            CommitBody::Empty(msg) => println!("{msg}"),
            CommitBody::Chart(data) => {
                for day in &data {
                    println!("  {} {:>4} {}", day.date, day.count, "#".repeat(day.count as usize));
                }
            }
        }
    }
}

fn save_chart<A: GithubApi>(controller: &LookupController<A>, config: &Config) {
    let state = controller.snapshot();
    match export_chart(&state, controller.window_days(), config) {
        Ok(true) => {
            info!(path = %config.chart_path.display(), "chart written");
            println!("chart written to {}", config.chart_path.display());
        }
        Ok(false) => {}
        Err(e) => {
            warn!(error = %format!("{e:#}"), "chart not written");
            println!("could not write chart: {e:#}");
        }
    }
}
