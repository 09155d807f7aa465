use anyhow::Context;
use clap::Parser;
use group_randomizer::config::{
    Command, HistoryCommand, ListsCommand, PrefsCommand, ReconcileArgs, SamplesArgs, SplitArgs,
};
use group_randomizer::core::samples::{append_samples, generate_sample_names, SAMPLE_PRESETS};
use group_randomizer::domain::ports::ConfigProvider;
use group_randomizer::domain::records::NewSavedList;
use group_randomizer::export::{self, ExportFormat};
use group_randomizer::utils::error::ErrorSeverity;
use group_randomizer::utils::{logger, validation::Validate};
use group_randomizer::{
    reconcile, CliConfig, GroupError, GroupPartition, GroupingEngine, GroupingSession,
    HistoryStore, LocalStorage, PreferencesStore, SavedListStore, SizingMode, TomlConfig,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

struct App {
    settings: TomlConfig,
    storage: LocalStorage,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let settings = match TomlConfig::load_or_default(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ Failed to load config file: {}", e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Err(e) = settings.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(|| settings.data_dir().to_string());
    tracing::debug!("Using data directory {}", data_dir);

    let app = App {
        settings,
        storage: LocalStorage::new(data_dir),
    };

    if let Err(e) = app.dispatch(cli.command).await {
        let Some(group_error) = e.downcast_ref::<GroupError>() else {
            return Err(e);
        };

        tracing::error!(
            "Command failed: {} (Category: {:?}, Severity: {:?})",
            group_error,
            group_error.category(),
            group_error.severity()
        );
        eprintln!("❌ {}", group_error.user_friendly_message());
        eprintln!("💡 {}", group_error.recovery_suggestion());

        let exit_code = match group_error.severity() {
            ErrorSeverity::Low => 4,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

impl App {
    async fn dispatch(&self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::Split(args) => self.split(args).await,
            Command::Reconcile(args) => self.reconcile(args),
            Command::History(cmd) => self.history(cmd).await,
            Command::Lists(cmd) => self.lists(cmd).await,
            Command::Prefs(cmd) => self.prefs(cmd).await,
            Command::Samples(args) => samples(args).await,
        }
    }

    fn history_store(&self) -> HistoryStore<LocalStorage> {
        HistoryStore::with_limit(self.storage.clone(), self.settings.history_limit())
    }

    async fn split(&self, args: SplitArgs) -> anyhow::Result<()> {
        let preferences = PreferencesStore::new(self.storage.clone());

        let mut session = match &args.from_history {
            Some(id) => {
                let record = self.history_store().get(id).await?;
                tracing::debug!("Replaying history entry {}", record.id);
                GroupingSession::replay(&record)
            }
            None => {
                let mut session = GroupingSession::with_defaults(&self.settings);
                session.set_theme(preferences.theme().await);

                let explicit_sizing = args.groups.is_some() || args.size.is_some();
                if !explicit_sizing {
                    if let Some(last) = preferences.last_used().await {
                        tracing::debug!("Applying last used settings {:?}", last);
                        session.apply_last_used(&last);
                    }
                }
                session
            }
        };

        if let Some(id) = &args.list {
            let list = SavedListStore::new(self.storage.clone()).get(id).await?;
            session.load_saved_list(&list);
        } else if args.from_history.is_none() || args.input.is_some() || args.names.is_some() {
            let text = read_names(args.input.as_deref(), args.names.as_deref()).await?;
            session.set_participant_text(text);
        }

        if let Some(title) = args.title {
            session.set_title(title);
        }
        if let Some(groups) = args.groups {
            session.set_mode(SizingMode::ByGroupCount);
            session.set_group_count(groups);
        } else if let Some(size) = args.size {
            session.set_mode(SizingMode::ByGroupSize);
            session.set_group_size(size);
        }
        if args.no_leader {
            session.set_assign_leader(false);
        }

        let mut rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let engine = GroupingEngine::with_history(self.history_store(), preferences)
            .record_history(!args.no_history);

        let Some(outcome) = engine.run(&session, &mut rng).await? else {
            eprintln!("⚠️  No participants entered; add names with --names, --input or --list");
            return Ok(());
        };

        let groups = if args.drop_empty || self.settings.drop_empty_groups() {
            outcome.groups.without_empty_groups()
        } else {
            outcome.groups
        };

        let format = args.format.unwrap_or_else(|| self.settings.export_format());
        let output_dir = args.output.as_deref().or_else(|| {
            (!format.is_textual()).then(|| self.settings.output_path())
        });
        emit(&groups, session.title(), format, output_dir).await?;

        let summary = groups.summary();
        eprintln!(
            "✅ {} groups, {} participants, ~{} per group, {} with leaders",
            summary.total_groups,
            summary.total_participants,
            summary.average_per_group,
            summary.groups_with_leaders
        );
        if let Some(record) = outcome.record {
            eprintln!("📝 Saved to history as {}", record.id);
        }
        Ok(())
    }

    fn reconcile(&self, args: ReconcileArgs) -> anyhow::Result<()> {
        let (mode, group_count, group_size) = match args.groups {
            Some(groups) => (
                SizingMode::ByGroupCount,
                groups,
                self.settings.default_group_size(),
            ),
            None => (
                SizingMode::ByGroupSize,
                self.settings.default_group_count(),
                args.size.unwrap_or_else(|| self.settings.default_group_size()),
            ),
        };

        let sizing = reconcile(args.count, mode, group_count, group_size)?;
        println!("groups: {}", sizing.group_count);
        println!("size:   {}", sizing.group_size);
        Ok(())
    }

    async fn history(&self, command: HistoryCommand) -> anyhow::Result<()> {
        let store = self.history_store();
        match command {
            HistoryCommand::List => {
                let history = store.load().await;
                if history.is_empty() {
                    println!("No history yet");
                }
                for record in history {
                    println!(
                        "{}  {}  {}  {} participants in {} groups",
                        record.id,
                        record.timestamp.format("%b %-d, %Y %H:%M"),
                        if record.title.is_empty() {
                            "Untitled Session"
                        } else {
                            record.title.as_str()
                        },
                        record.participant_count,
                        record.groups.len()
                    );
                }
            }
            HistoryCommand::Show { id, format } => {
                let record = store.get(&id).await?;
                let session = GroupingSession::from_history(&record);
                eprintln!(
                    "🕘 {} mode, {} groups of {}, leaders {}, theme {}; rerun with `split --from-history {}`",
                    session.mode(),
                    session.group_count(),
                    session.group_size(),
                    if session.assign_leader() { "on" } else { "off" },
                    session.theme(),
                    record.id
                );
                let format = format.unwrap_or_else(|| self.settings.export_format());
                let output_dir = (!format.is_textual()).then(|| self.settings.output_path());
                emit(&record.groups, &record.title, format, output_dir).await?;
            }
            HistoryCommand::Delete { id } => {
                let remaining = store.delete(&id).await?;
                println!("Deleted {} ({} entries left)", id, remaining.len());
            }
            HistoryCommand::Clear { yes } => {
                if !yes {
                    anyhow::bail!("refusing to clear history without --yes");
                }
                store.clear().await?;
                println!("History cleared");
            }
        }
        Ok(())
    }

    async fn lists(&self, command: ListsCommand) -> anyhow::Result<()> {
        let store = SavedListStore::new(self.storage.clone());
        match command {
            ListsCommand::List { search } => {
                let all = store.load().await;
                let total = all.len();
                let shown = store.search(search.as_deref().unwrap_or("")).await;
                for list in &shown {
                    println!(
                        "{}  {}  {} names  {}",
                        list.id,
                        list.name,
                        list.count,
                        list.timestamp.format("%b %-d, %Y")
                    );
                }
                println!("{} of {} lists shown", shown.len(), total);
            }
            ListsCommand::Save {
                name,
                title,
                input,
                names,
            } => {
                let participant_text = read_names(input.as_deref(), names.as_deref()).await?;
                if group_randomizer::parse_participants(&participant_text).is_empty() {
                    return Err(GroupError::invalid_argument(
                        "add participants before saving the list",
                    )
                    .into());
                }
                let saved = store
                    .save(NewSavedList {
                        name,
                        title: title.unwrap_or_default(),
                        participant_text,
                    })
                    .await?;
                println!("Saved '{}' ({} names) as {}", saved.name, saved.count, saved.id);
            }
            ListsCommand::Show { id } => {
                let list = store.get(&id).await?;
                println!("{}", list.participant_text);
            }
            ListsCommand::Rename { id, name } => {
                let list = store.rename(&id, &name).await?;
                println!("Renamed {} to '{}'", list.id, list.name);
            }
            ListsCommand::Shuffle { id, seed } => {
                let mut rng = match seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                let list = store.shuffle(&id, &mut rng).await?;
                println!("{}", list.participant_text);
            }
            ListsCommand::Delete { id } => {
                let remaining = store.delete(&id).await?;
                println!("Deleted {} ({} lists left)", id, remaining.len());
            }
        }
        Ok(())
    }

    async fn prefs(&self, command: PrefsCommand) -> anyhow::Result<()> {
        let store = PreferencesStore::new(self.storage.clone());
        match command {
            PrefsCommand::Show => {
                println!("theme:     {}", store.theme().await);
                println!("dark mode: {}", store.dark_mode().await);
                if let Some(last) = store.last_used().await {
                    println!(
                        "last used: {} mode, {} groups, {} per group, leaders {}",
                        last.mode,
                        last.group_count,
                        last.group_size,
                        if last.assign_leader { "on" } else { "off" }
                    );
                }
            }
            PrefsCommand::Set { theme, dark_mode } => {
                if let Some(theme) = theme {
                    store.set_theme(theme).await?;
                    println!("Theme set to {}", theme);
                }
                if let Some(dark_mode) = dark_mode {
                    store.set_dark_mode(dark_mode).await?;
                    println!("Dark mode {}", if dark_mode { "on" } else { "off" });
                }
            }
            PrefsCommand::Reset => {
                store.clear().await?;
                println!("Preferences reset");
            }
        }
        Ok(())
    }
}

async fn samples(args: SamplesArgs) -> anyhow::Result<()> {
    if args.presets {
        for preset in SAMPLE_PRESETS {
            println!(
                "{:<16} {:>3}  {:<10} {}",
                preset.name, preset.count, preset.kind, preset.description
            );
        }
        return Ok(());
    }

    let Some(path) = args.append_to else {
        for name in generate_sample_names(args.kind, args.count) {
            println!("{}", name);
        }
        return Ok(());
    };

    let existing = match tokio::fs::read_to_string(&path).await {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(GroupError::from(e).into()),
    };
    let text = append_samples(&existing, args.kind, args.count);
    tokio::fs::write(&path, format!("{}\n", text))
        .await
        .map_err(GroupError::from)?;
    println!("Added {} {} names to {}", args.count, args.kind, path);
    Ok(())
}

async fn read_names(input: Option<&str>, inline: Option<&str>) -> anyhow::Result<String> {
    match (input, inline) {
        (_, Some(names)) => Ok(names.to_string()),
        (Some("-"), None) => {
            tokio::task::spawn_blocking(|| std::io::read_to_string(std::io::stdin()))
                .await?
                .context("reading names from stdin")
        }
        (Some(path), None) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading names from {}", path)),
        (None, None) => Ok(String::new()),
    }
}

/// Prints textual formats, or writes the file when an output directory is given.
async fn emit(
    groups: &GroupPartition,
    title: &str,
    format: ExportFormat,
    output_dir: Option<&str>,
) -> anyhow::Result<()> {
    let today = chrono::Local::now().date_naive();
    let data = export::render(format, groups, title, today)?;

    match output_dir {
        Some(dir) => {
            tokio::fs::create_dir_all(dir).await.map_err(GroupError::from)?;
            let path = Path::new(dir).join(export::file_name(title, format));
            tokio::fs::write(&path, &data).await.map_err(GroupError::from)?;
            tracing::info!("Exported {} ({} bytes)", path.display(), data.len());
            println!("📁 Output saved to: {}", path.display());
        }
        None => {
            print!("{}", String::from_utf8_lossy(&data));
            if format == ExportFormat::Json || format == ExportFormat::Share {
                println!();
            }
        }
    }
    Ok(())
}
