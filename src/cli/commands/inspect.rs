//! Read-only inspection commands: list, lookup, pages, stats.

use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::config::Settings;
use crate::index::IndexRecord;
use crate::io::{EntityType, Envelope, ExitCode, OutputManager};

/// A record together with its position in the index.
#[derive(Debug, Serialize)]
pub struct RecordView<'a> {
    pub position: usize,
    #[serde(flatten)]
    pub record: &'a IndexRecord,
}

#[derive(Debug, Serialize)]
pub struct PageView<'a> {
    pub title: &'a str,
    pub location: &'a str,
    pub start: usize,
    pub records: usize,
    pub sections: usize,
}

/// Open the index or report why it could not be loaded.
macro_rules! open_or_report {
    ($path:expr, $output:expr) => {
        match $crate::index::SearchIndexStore::open($path) {
            Ok(store) => store,
            Err(e) => return Ok($output.report_error(&e)?),
        }
    };
}
pub(crate) use open_or_report;

fn write_record<W: Write>(
    w: &mut W,
    position: usize,
    record: &IndexRecord,
    preview_chars: usize,
) -> std::io::Result<()> {
    writeln!(w, "{position:>5}  {:<8} {}", record.category, record.location)?;
    if !record.title.is_empty() && record.title != record.page {
        writeln!(w, "       title: {}", record.title)?;
    }
    if !record.text.is_empty() {
        let preview = record.preview(preview_chars).replace('\n', " ");
        let ellipsis = if preview.len() < record.text.len() { "..." } else { "" };
        writeln!(w, "       {preview}{ellipsis}")?;
    }
    Ok(())
}

/// Run list command.
pub fn run_list<O: Write, E: Write>(
    path: &Path,
    limit: Option<usize>,
    config: &Settings,
    output: &mut OutputManager<O, E>,
) -> anyhow::Result<ExitCode> {
    let store = open_or_report!(path, output);
    let shown = limit.unwrap_or(store.len()).min(store.len());
    let truncated = shown < store.len();

    if output.is_json() {
        let views: Vec<_> = store
            .all()
            .take(shown)
            .enumerate()
            .map(|(position, record)| RecordView { position, record })
            .collect();
        let envelope = Envelope::success(views)
            .with_entity_type(EntityType::Record)
            .with_count(shown)
            .with_truncated(truncated)
            .with_message(format!("{shown} of {} records", store.len()));
        output.emit_json(&envelope)?;
        return Ok(ExitCode::Success);
    }

    for (position, record) in store.all().take(shown).enumerate() {
        write_record(output.out(), position, record, config.output.preview_chars)?;
    }
    if truncated {
        let note = output.dim(&format!("... {} more records", store.len() - shown));
        writeln!(output.out(), "{note}")?;
    }
    Ok(ExitCode::Success)
}

/// Run lookup command.
pub fn run_lookup<O: Write, E: Write>(
    path: &Path,
    location: &str,
    config: &Settings,
    output: &mut OutputManager<O, E>,
) -> anyhow::Result<ExitCode> {
    let store = open_or_report!(path, output);

    let views: Vec<_> = store
        .records_for_location(location)
        .with_positions()
        .map(|(position, record)| RecordView { position, record })
        .collect();

    if views.is_empty() {
        if output.is_json() {
            let envelope: Envelope<()> =
                Envelope::not_found(format!("No records found at location '{location}'"))
                    .with_entity_type(EntityType::Record)
                    .with_query(location);
            output.emit_json(&envelope)?;
        } else {
            writeln!(output.err(), "No records found at location '{location}'")?;
        }
        return Ok(ExitCode::NotFound);
    }

    if output.is_json() {
        let count = views.len();
        let envelope = Envelope::success(views)
            .with_entity_type(EntityType::Record)
            .with_count(count)
            .with_query(location)
            .with_message(format!("Found {count} records at '{location}'"));
        output.emit_json(&envelope)?;
    } else {
        let heading = output.heading(&format!("{} ({} records)", location, views.len()));
        writeln!(output.out(), "{heading}")?;
        for view in &views {
            write_record(
                output.out(),
                view.position,
                view.record,
                config.output.preview_chars,
            )?;
        }
    }
    Ok(ExitCode::Success)
}

/// Run pages command.
pub fn run_pages<O: Write, E: Write>(
    path: &Path,
    output: &mut OutputManager<O, E>,
) -> anyhow::Result<ExitCode> {
    let store = open_or_report!(path, output);
    let pages: Vec<_> = store
        .pages()
        .map(|group| PageView {
            title: group.title,
            location: group.location(),
            start: group.start,
            records: group.records.len(),
            sections: group.sections().count(),
        })
        .collect();

    if output.is_json() {
        let count = pages.len();
        let envelope = Envelope::success(pages)
            .with_entity_type(EntityType::Page)
            .with_count(count);
        output.emit_json(&envelope)?;
        return Ok(ExitCode::Success);
    }

    for page in &pages {
        let title = output.heading(page.title);
        writeln!(
            output.out(),
            "{title}  {}  ({} records, {} sections)",
            page.location,
            page.records,
            page.sections
        )?;
    }
    Ok(ExitCode::Success)
}

/// Run stats command.
pub fn run_stats<O: Write, E: Write>(
    path: &Path,
    output: &mut OutputManager<O, E>,
) -> anyhow::Result<ExitCode> {
    let store = open_or_report!(path, output);
    let stats = store.stats();

    if output.is_json() {
        let envelope = Envelope::success(&stats)
            .with_entity_type(EntityType::Stats)
            .with_message(format!("{} ({})", path.display(), store.source_format()));
        output.emit_json(&envelope)?;
        return Ok(ExitCode::Success);
    }

    let heading = output.heading(&path.display().to_string());
    let out = output.out();
    writeln!(out, "{heading}")?;
    writeln!(out, "  format:      {}", store.source_format())?;
    writeln!(out, "  records:     {}", stats.records)?;
    writeln!(out, "  pages:       {}", stats.pages)?;
    if stats.page_groups != stats.pages {
        writeln!(out, "  page runs:   {}", stats.page_groups)?;
    }
    writeln!(out, "  locations:   {}", stats.locations)?;
    writeln!(out, "  text chars:  {}", stats.text_chars)?;
    for (category, count) in &stats.categories {
        writeln!(out, "  {category:<12} {count}")?;
    }
    Ok(ExitCode::Success)
}
