use crate::demo::{run_demo, run_plan, run_score, DemoArgs, PlanArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use drill_planner::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Drill Planner",
    about = "Score drills and assemble training sessions from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Assemble a training session for the given preferences
    Plan(PlanArgs),
    /// Print the ranked score breakdown for every catalog drill
    Score(ScoreArgs),
    /// Run a self-contained demo against a built-in drill catalog
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Plan(args) => run_plan(args),
        Command::Score(args) => run_score(args),
        Command::Demo(args) => run_demo(args),
    }
}
