use crate::commands::{run_draft, run_leads, run_score, DraftCommand, LeadsCommand, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use systems_scorecard::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Systems Scorecard",
    about = "Score systems-complexity questionnaires and manage the resulting leads",
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
    /// Score a questionnaire answers file
    Score(ScoreArgs),
    /// Submit, list, delete, or export stored leads
    Leads {
        #[command(subcommand)]
        command: LeadsCommand,
    },
    /// Inspect or discard the saved questionnaire draft
    Draft {
        #[command(subcommand)]
        command: DraftCommand,
    },
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
        Command::Score(args) => run_score(args),
        Command::Leads { command } => run_leads(command).await,
        Command::Draft { command } => run_draft(command),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_lead_listing_filters() {
        let cli = Cli::try_parse_from([
            "systems-scorecard",
            "leads",
            "list",
            "--tier",
            "high",
            "--status",
            "Proposal Sent",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Leads {
                command: LeadsCommand::List(args),
            }) => {
                assert_eq!(
                    args.tier,
                    Some(systems_scorecard::workflows::assessment::ComplexityTier::High)
                );
                assert_eq!(
                    args.status,
                    Some(systems_scorecard::workflows::leads::LeadStatus::ProposalSent)
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
