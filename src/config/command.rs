use clap::{ArgGroup, Args, Parser, Subcommand};

use crate::core::samples::SampleKind;
use crate::domain::records::{Theme, MAX_GROUP_COUNT, MAX_GROUP_SIZE};
use crate::export::ExportFormat;

#[derive(Debug, Clone, Parser)]
#[command(name = "group-randomizer", version)]
#[command(about = "Split a list of names into random, balanced groups")]
pub struct CliConfig {
    /// Path to a TOML settings file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Directory holding history, saved lists and preferences
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Shuffle participants into groups
    Split(SplitArgs),
    /// Show the group count and size that go together for a participant count
    Reconcile(ReconcileArgs),
    /// Past grouping sessions
    #[command(subcommand)]
    History(HistoryCommand),
    /// Saved participant lists
    #[command(subcommand)]
    Lists(ListsCommand),
    /// Theme and display preferences
    #[command(subcommand)]
    Prefs(PrefsCommand),
    /// Print placeholder participant names
    Samples(SamplesArgs),
}

#[derive(Debug, Clone, Args)]
#[command(group(ArgGroup::new("source").args(["input", "names", "list"])))]
#[command(group(ArgGroup::new("sizing").args(["groups", "size"])))]
pub struct SplitArgs {
    /// File with one name per line or comma separated; "-" reads stdin
    #[arg(short, long)]
    pub input: Option<String>,

    /// Names given inline, separated by commas or newlines
    #[arg(short, long)]
    pub names: Option<String>,

    /// Id of a saved list to use as input
    #[arg(long)]
    pub list: Option<String>,

    /// Restore title, sizing, theme and names from a history entry
    #[arg(long, value_name = "ID")]
    pub from_history: Option<String>,

    #[arg(short, long)]
    pub title: Option<String>,

    /// Number of groups to create
    #[arg(short, long, value_parser = parse_group_count)]
    pub groups: Option<usize>,

    /// Members per group
    #[arg(short, long, value_parser = parse_group_size)]
    pub size: Option<usize>,

    /// Do not mark a leader in each group
    #[arg(long)]
    pub no_leader: bool,

    /// Seed for a reproducible shuffle
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(short, long)]
    pub format: Option<ExportFormat>,

    /// Write the export into this directory instead of printing it
    #[arg(short, long)]
    pub output: Option<String>,

    /// Leave out groups that ended up empty
    #[arg(long)]
    pub drop_empty: bool,

    /// Do not record this run in history
    #[arg(long)]
    pub no_history: bool,
}

#[derive(Debug, Clone, Args)]
#[command(group(ArgGroup::new("sizing").args(["groups", "size"]).required(true)))]
pub struct ReconcileArgs {
    /// Number of participants
    #[arg(long)]
    pub count: usize,

    #[arg(short, long)]
    pub groups: Option<usize>,

    #[arg(short, long)]
    pub size: Option<usize>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum HistoryCommand {
    List,
    Show {
        id: String,
        #[arg(short, long)]
        format: Option<ExportFormat>,
    },
    Delete {
        id: String,
    },
    Clear {
        /// Confirm removing every entry
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ListsCommand {
    List {
        #[arg(short, long)]
        search: Option<String>,
    },
    #[command(group(ArgGroup::new("source").args(["input", "names"]).required(true)))]
    Save {
        #[arg(long)]
        name: Option<String>,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        input: Option<String>,
        #[arg(short, long)]
        names: Option<String>,
    },
    Show {
        id: String,
    },
    Rename {
        id: String,
        name: String,
    },
    /// Put a list's names in random order
    Shuffle {
        id: String,
        #[arg(long)]
        seed: Option<u64>,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum PrefsCommand {
    Show,
    Set {
        #[arg(long)]
        theme: Option<Theme>,
        #[arg(long)]
        dark_mode: Option<bool>,
    },
    Reset,
}

#[derive(Debug, Clone, Args)]
pub struct SamplesArgs {
    #[arg(short, long, default_value = "other")]
    pub kind: SampleKind,

    #[arg(short = 'n', long, default_value_t = 10)]
    pub count: usize,

    /// List the built-in sample sets instead
    #[arg(long)]
    pub presets: bool,

    /// Append the names to this file instead of printing them
    #[arg(long, value_name = "FILE", conflicts_with = "presets")]
    pub append_to: Option<String>,
}

fn parse_group_count(value: &str) -> Result<usize, String> {
    parse_bounded(value, MAX_GROUP_COUNT)
}

fn parse_group_size(value: &str) -> Result<usize, String> {
    parse_bounded(value, MAX_GROUP_SIZE)
}

fn parse_bounded(value: &str, max: usize) -> Result<usize, String> {
    let number: usize = value.parse().map_err(|e| format!("{}", e))?;
    if (1..=max).contains(&number) {
        Ok(number)
    } else {
        Err(format!("must be between 1 and {}", max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        CliConfig::command().debug_assert();
    }

    #[test]
    fn test_parse_split() {
        let cli = CliConfig::try_parse_from([
            "group-randomizer",
            "split",
            "--names",
            "a,b,c",
            "--groups",
            "2",
            "--format",
            "csv",
            "--seed",
            "9",
        ])
        .unwrap();

        match cli.command {
            Command::Split(args) => {
                assert_eq!(args.names.as_deref(), Some("a,b,c"));
                assert_eq!(args.groups, Some(2));
                assert_eq!(args.format, Some(ExportFormat::Csv));
                assert_eq!(args.seed, Some(9));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_split_rejects_both_sizing_flags() {
        let result = CliConfig::try_parse_from([
            "group-randomizer",
            "split",
            "--names",
            "a",
            "--groups",
            "2",
            "--size",
            "2",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_reconcile_requires_a_sizing_flag() {
        assert!(CliConfig::try_parse_from(["group-randomizer", "reconcile", "--count", "5"]).is_err());
    }

    #[test]
    fn test_split_rejects_out_of_range_sizing() {
        for (flag, value) in [
            ("--groups", "2305843009213693951"),
            ("--groups", "0"),
            ("--groups", "1001"),
            ("--size", "18446744073709551615"),
        ] {
            let result =
                CliConfig::try_parse_from(["group-randomizer", "split", "--names", "a,b", flag, value]);
            assert!(result.is_err(), "{} {} should be rejected", flag, value);
        }

        let cli = CliConfig::try_parse_from([
            "group-randomizer",
            "split",
            "--names",
            "a,b",
            "--groups",
            "1000",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Split(SplitArgs { groups: Some(1000), .. })));
    }

    #[test]
    fn test_parse_replay_shuffle_and_append() {
        let cli = CliConfig::try_parse_from([
            "group-randomizer",
            "split",
            "--from-history",
            "abc",
            "--size",
            "3",
        ])
        .unwrap();
        match cli.command {
            Command::Split(args) => {
                assert_eq!(args.from_history.as_deref(), Some("abc"));
                assert_eq!(args.size, Some(3));
            }
            other => panic!("unexpected command {:?}", other),
        }

        let cli =
            CliConfig::try_parse_from(["group-randomizer", "lists", "shuffle", "xyz", "--seed", "4"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Command::Lists(ListsCommand::Shuffle { seed: Some(4), .. })
        ));

        let cli = CliConfig::try_parse_from([
            "group-randomizer",
            "samples",
            "--kind",
            "sports",
            "--append-to",
            "names.txt",
        ])
        .unwrap();
        match cli.command {
            Command::Samples(args) => assert_eq!(args.append_to.as_deref(), Some("names.txt")),
            other => panic!("unexpected command {:?}", other),
        }
        assert!(CliConfig::try_parse_from([
            "group-randomizer",
            "samples",
            "--presets",
            "--append-to",
            "names.txt",
        ])
        .is_err());
    }
}
