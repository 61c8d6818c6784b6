use clap::Args;
use speech_report::config::{AppConfig, ConfigError};
use speech_report::error::AppError;
use speech_report::records::Politician;
use speech_report::report::format_speech_timestamp;
use speech_report::roster::{Roster, SpeechListing};
use speech_report::sources::{PoliticianSource, SourceFormat};
use speech_report::{LatestSpeechReporter, LatestSpeeches};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Default)]
pub(crate) struct SourceArgs {
    /// Politician export to read (.json or .csv). Defaults to APP_SOURCE_PATH
    #[arg(long)]
    pub(crate) input: Option<PathBuf>,
    /// Read the export as this format instead of inferring it from the extension
    #[arg(long, value_parser = crate::infra::parse_format)]
    pub(crate) format: Option<SourceFormat>,
}

#[derive(Args, Debug)]
pub(crate) struct LatestArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    /// Print the report as JSON
    #[arg(long)]
    pub(crate) json: bool,
    /// Order the table by speech date, newest first
    #[arg(long)]
    pub(crate) newest_first: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ListArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    /// Only list speeches by this politician
    #[arg(long)]
    pub(crate) politician: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct ShowArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    /// Speech hash to look up
    #[arg(long)]
    pub(crate) hash: String,
}

#[derive(Args, Debug)]
pub(crate) struct FindArgs {
    #[command(flatten)]
    pub(crate) source: SourceArgs,
    /// Politician name, in either name or surname-first order
    #[arg(long)]
    pub(crate) name: String,
    /// Only accept an exact name match
    #[arg(long)]
    pub(crate) exact: bool,
}

pub(crate) fn run_latest(args: LatestArgs, config: &AppConfig) -> Result<(), AppError> {
    let politicians = load_politicians(&args.source, config)?;
    let latest = LatestSpeechReporter::compute_latest_speeches(&politicians)?;

    if args.json {
        let summary = latest.summary(politicians.len());
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!(
            "{}",
            render_latest(&latest, politicians.len(), args.newest_first)
        );
    }

    Ok(())
}

pub(crate) fn run_list(args: ListArgs, config: &AppConfig) -> Result<(), AppError> {
    let politicians = load_politicians(&args.source, config)?;
    let listing = Roster::new(&politicians).speeches(args.politician.as_deref());
    print!("{}", render_listing(&listing));
    Ok(())
}

pub(crate) fn run_show(args: ShowArgs, config: &AppConfig) -> Result<(), AppError> {
    let politicians = load_politicians(&args.source, config)?;
    let found = Roster::new(&politicians).speech_by_hash(&args.hash)?;

    println!("Speech {}", args.hash);
    println!("Politician: {}", found.politician.name);
    match found.speech.timestamp() {
        Ok(at) => println!("Date: {}", format_speech_timestamp(at)),
        Err(issue) => println!("Date: unavailable ({issue})"),
    }
    if let Some(text) = &found.speech.raw_text {
        println!("\n{text}");
    }

    Ok(())
}

pub(crate) fn run_find(args: FindArgs, config: &AppConfig) -> Result<(), AppError> {
    let politicians = load_politicians(&args.source, config)?;
    let found = Roster::new(&politicians).find_by_name(&args.name, !args.exact)?;
    print!("{}", render_politician(found));
    Ok(())
}

fn load_politicians(args: &SourceArgs, config: &AppConfig) -> Result<Vec<Politician>, AppError> {
    let source = config
        .source
        .resolve(args.input.clone(), args.format)?
        .ok_or(ConfigError::MissingSource)?;

    info!(
        path = %source.path().display(),
        format = source.format().label(),
        "loading politician export"
    );

    Ok(source.load()?)
}

fn render_latest(latest: &LatestSpeeches, records: usize, newest_first: bool) -> String {
    let mut lines = vec![format!(
        "Latest speech per politician ({} records, {} with speeches)",
        records,
        latest.len()
    )];

    if latest.is_empty() {
        lines.push("No speeches found".to_string());
        return into_block(lines);
    }

    let entries = if newest_first {
        latest.most_recent_first()
    } else {
        latest.entries()
    };
    lines.extend(
        entries
            .iter()
            .map(|entry| format!("- {}: {}", entry.name, entry.last_speech_label())),
    );

    into_block(lines)
}

fn render_listing(listing: &[SpeechListing]) -> String {
    if listing.is_empty() {
        return into_block(vec!["No speeches found".to_string()]);
    }

    let lines = listing
        .iter()
        .map(|entry| {
            let hash = entry.speech_hash.as_deref().unwrap_or("-");
            let preview = entry
                .speech
                .as_deref()
                .map(|text| preview(text, 60))
                .unwrap_or_default();
            format!("- {} | {} | {}", hash, entry.name, preview)
        })
        .collect();

    into_block(lines)
}

fn render_politician(politician: &Politician) -> String {
    let mut lines = vec![format!("Politician: {}", politician.name)];
    if let Some(hash) = &politician.hash {
        lines.push(format!("Hash: {hash}"));
    }
    if let Some(group) = &politician.political_group {
        lines.push(format!("Political group: {group}"));
    }
    lines.push(format!("Speeches: {}", politician.speeches.len()));
    into_block(lines)
}

/// Joins rendered lines, each terminated by a newline.
fn into_block(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

fn preview(text: &str, limit: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= limit {
        return collapsed;
    }

    let mut cut = collapsed.chars().take(limit).collect::<String>();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use speech_report::Speech;

    fn politicians() -> Vec<Politician> {
        vec![
            Politician::new(
                "Tomasz Reczek",
                vec![
                    Speech::dated("2020-01-08T10:15:00Z")
                        .with_hash("a1")
                        .with_text("Panie   Marszałku!\nWysoka Izbo!"),
                    Speech::dated("2021-06-15").with_hash("a2"),
                ],
            )
            .with_hash("p1"),
            Politician::new("Anna Nowak", vec![Speech::dated("2022-03-03")]),
        ]
    }

    #[test]
    fn latest_table_lists_names_alphabetically_or_by_recency() {
        let records = politicians();
        let latest =
            LatestSpeechReporter::compute_latest_speeches(&records).expect("report computes");

        let by_name = render_latest(&latest, records.len(), false);
        assert_eq!(
            by_name,
            "Latest speech per politician (2 records, 2 with speeches)\n\
- Anna Nowak: 2022-03-03\n\
- Tomasz Reczek: 2021-06-15\n"
        );

        let by_date = render_latest(&latest, records.len(), true);
        assert!(by_date.find("Anna Nowak") < by_date.find("Tomasz Reczek"));
    }

    #[test]
    fn empty_report_says_so() {
        let latest = LatestSpeechReporter::compute_latest_speeches(&[]).expect("report computes");
        assert!(render_latest(&latest, 0, false).ends_with("No speeches found\n"));
    }

    #[test]
    fn listing_collapses_whitespace_in_previews() {
        let records = politicians();
        let listing = Roster::new(&records).speeches(Some("Tomasz Reczek"));
        let rendered = render_listing(&listing);
        assert_eq!(
            rendered,
            "- a1 | Tomasz Reczek | Panie Marszałku! Wysoka Izbo!\n- a2 | Tomasz Reczek | \n"
        );
    }

    #[test]
    fn preview_truncates_on_character_boundaries() {
        assert_eq!(preview("Sęk Sęk Sęk", 5), "Sęk S...");
        assert_eq!(preview("krótko", 10), "krótko");
    }

    #[test]
    fn politician_summary_includes_known_fields() {
        let records = politicians();
        let rendered = render_politician(&records[0]);
        assert!(rendered.contains("Politician: Tomasz Reczek"));
        assert!(rendered.contains("Hash: p1"));
        assert!(rendered.contains("Speeches: 2"));
        assert!(!rendered.contains("Political group"));
    }

    #[test]
    fn missing_source_is_a_configuration_error() {
        let config = AppConfig {
            environment: speech_report::config::AppEnvironment::Test,
            server: speech_report::config::ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            telemetry: speech_report::config::TelemetryConfig {
                log_level: "info".to_string(),
            },
            source: Default::default(),
        };

        match load_politicians(&SourceArgs::default(), &config) {
            Err(AppError::Config(ConfigError::MissingSource)) => {}
            other => panic!("expected missing source, got {other:?}"),
        }
    }
}
