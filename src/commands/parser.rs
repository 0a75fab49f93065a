use super::types::RecallCommand;
use clap::{Parser, Subcommand};

pub const USAGE: &str = "usage: /recall [-u <user>] [-n <number>] | /recall stop | /recall status";

const COMMAND_NAME: &str = "/recall";

#[derive(Parser, Debug)]
#[command(name = "/recall", disable_help_subcommand = true, disable_version_flag = true)]
struct RecallArgs {
    #[command(subcommand)]
    action: Option<RecallAction>,

    /// Only recall messages sent by this user
    #[arg(short, long)]
    user: Option<String>,

    /// How many recent messages to recall (default 1)
    #[arg(short, long, allow_hyphen_values = true)]
    number: Option<String>,
}

#[derive(Subcommand, Debug)]
enum RecallAction {
    /// Cancel every running recall in this channel
    Stop,
    /// Show running recalls in this channel
    Status,
}

pub fn parse_command(input: &str) -> Option<RecallCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let mut parts = trimmed.split_whitespace();
    if parts.next()?.to_lowercase() != COMMAND_NAME {
        return None;
    }

    let argv = std::iter::once(COMMAND_NAME).chain(parts);
    let command = match RecallArgs::try_parse_from(argv) {
        Ok(args) => match args.action {
            Some(RecallAction::Stop) => RecallCommand::Stop,
            Some(RecallAction::Status) => RecallCommand::Status,
            None => RecallCommand::Recall {
                user: args.user,
                number: coerce_number(args.number.as_deref()),
            },
        },
        Err(_) => RecallCommand::Invalid,
    };
    Some(command)
}

/// Missing, non-numeric and non-positive counts all become 1.
pub fn coerce_number(raw: Option<&str>) -> usize {
    raw.and_then(|raw| raw.trim().parse::<i64>().ok())
        .and_then(|number| usize::try_from(number).ok())
        .unwrap_or(1)
        .max(1)
}
