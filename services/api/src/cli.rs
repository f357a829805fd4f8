use crate::report::{run_costs, run_plans, run_recommend, CostArgs, PlansArgs, RecommendArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use pathway_planner::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Hong Kong Pathway Planner",
    about = "Compare talent admission and study immigration costs and get a recommendation",
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
    /// Print the monthly, first-year and seven-year cost projection
    Costs(CostArgs),
    /// Score the questionnaire and print the recommended plan
    Recommend(RecommendArgs),
    /// Compare both plan descriptors side by side
    Plans(PlansArgs),
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
        Command::Costs(args) => run_costs(args),
        Command::Recommend(args) => run_recommend(args),
        Command::Plans(args) => run_plans(args),
    }
}
