//! Immutable, ordered store of search index records.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::iter::FusedIterator;
use std::path::Path;

use super::format::{self, SourceFormat};
use super::record::IndexRecord;
use crate::error::{IndexError, IndexResult, MalformedRecordError};

/// Ordered sequence of [`IndexRecord`], read-only after construction.
///
/// Lookups by location go through a position map built once at load time.
/// The store never changes after construction, so it can be shared across
/// threads behind `&` or `Arc` without locking.
#[derive(Debug, Clone)]
pub struct SearchIndexStore {
    records: Vec<IndexRecord>,
    by_location: IndexMap<String, Vec<usize>>,
    source_format: SourceFormat,
}

#[derive(Serialize)]
struct DocsRef<'a> {
    docs: &'a [IndexRecord],
}

impl SearchIndexStore {
    /// Build a store from records already in reading order.
    pub fn from_records(records: Vec<IndexRecord>) -> Self {
        Self::with_format(records, SourceFormat::Json)
    }

    fn with_format(records: Vec<IndexRecord>, source_format: SourceFormat) -> Self {
        let mut by_location: IndexMap<String, Vec<usize>> = IndexMap::new();
        for (position, record) in records.iter().enumerate() {
            by_location
                .entry(record.location.clone())
                .or_default()
                .push(position);
        }
        Self {
            records,
            by_location,
            source_format,
        }
    }

    /// Parse raw file contents, either plain JSON or a script assignment.
    pub fn load(raw: &str) -> IndexResult<Self> {
        let (source_format, payload) = format::detect(raw)?;
        let value: Value = serde_json::from_str(payload)
            .map_err(|e| MalformedRecordError::shape(format!("invalid JSON: {e}")))?;
        let records = parse_docs(value)?;
        tracing::debug!(target: "store", "parsed {} records ({source_format})", records.len());
        Ok(Self::with_format(records, source_format))
    }

    /// Load from an already parsed JSON value.
    pub fn from_json_value(value: Value) -> IndexResult<Self> {
        Ok(Self::from_records(parse_docs(value)?))
    }

    /// Read and load an index file.
    pub fn open(path: impl AsRef<Path>) -> IndexResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| IndexError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::load(&raw)?;
        tracing::info!(
            target: "store",
            "loaded {} records from {}",
            store.len(),
            path.display()
        );
        Ok(store)
    }

    /// All records in original order. Each call starts a fresh pass.
    pub fn all(&self) -> std::slice::Iter<'_, IndexRecord> {
        self.records.iter()
    }

    /// Records whose `location` equals `location`, in original order.
    pub fn records_for_location(&self, location: &str) -> LocationRecords<'_> {
        let positions: &[usize] = self
            .by_location
            .get(location)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        LocationRecords {
            records: &self.records,
            positions: positions.iter(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&IndexRecord> {
        self.records.get(position)
    }

    pub fn as_slice(&self) -> &[IndexRecord] {
        &self.records
    }

    /// Distinct locations in first-seen order.
    pub fn locations(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.by_location.keys().map(String::as_str)
    }

    pub fn contains_location(&self, location: &str) -> bool {
        self.by_location.contains_key(location)
    }

    /// Contiguous runs of records that share a `page` title.
    pub fn pages(&self) -> Pages<'_> {
        Pages {
            records: &self.records,
            offset: 0,
        }
    }

    /// Layout the store was loaded from.
    pub fn source_format(&self) -> &SourceFormat {
        &self.source_format
    }

    pub fn stats(&self) -> IndexStats {
        let mut categories: IndexMap<String, usize> = IndexMap::new();
        let mut page_titles: IndexSet<&str> = IndexSet::new();
        let mut text_chars = 0;
        for record in &self.records {
            *categories
                .entry(record.category.as_str().to_string())
                .or_default() += 1;
            page_titles.insert(record.page.as_str());
            text_chars += record.char_count();
        }

        IndexStats {
            records: self.records.len(),
            pages: page_titles.len(),
            page_groups: self.pages().count(),
            locations: self.by_location.len(),
            categories,
            text_chars,
        }
    }

    /// Serialize as a bare `{"docs":[...]}` object.
    pub fn to_json(&self) -> IndexResult<String> {
        Ok(serde_json::to_string(&DocsRef {
            docs: &self.records,
        })?)
    }

    /// Serialize as a script assigning the index to `variable`.
    ///
    /// Fails with [`IndexError::InvalidVariable`] when `variable` is not an
    /// identifier, since [`SearchIndexStore::load`] could not read it back.
    pub fn to_script(&self, variable: &str) -> IndexResult<String> {
        format::check_variable(variable)?;
        let docs = serde_json::to_string(&self.records)?;
        Ok(format::wrap_script(variable, &docs))
    }

    /// Serialize in the given layout.
    pub fn render(&self, source_format: &SourceFormat) -> IndexResult<String> {
        match source_format {
            SourceFormat::Json => self.to_json(),
            SourceFormat::Script { variable } => self.to_script(variable),
        }
    }

    /// Write the index to `path` in the given layout.
    pub fn write_to(&self, path: impl AsRef<Path>, source_format: &SourceFormat) -> IndexResult<()> {
        let path = path.as_ref();
        let contents = self.render(source_format)?;
        std::fs::write(path, contents).map_err(|source| IndexError::FileWrite {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(
            target: "store",
            "wrote {} records to {} ({source_format})",
            self.len(),
            path.display()
        );
        Ok(())
    }
}

/// Stores compare by their records; the on-disk layout is not part of equality.
impl PartialEq for SearchIndexStore {
    fn eq(&self, other: &Self) -> bool {
        self.records == other.records
    }
}

impl Eq for SearchIndexStore {}

impl<'a> IntoIterator for &'a SearchIndexStore {
    type Item = &'a IndexRecord;
    type IntoIter = std::slice::Iter<'a, IndexRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.all()
    }
}

fn parse_docs(value: Value) -> Result<Vec<IndexRecord>, MalformedRecordError> {
    let Value::Object(mut root) = value else {
        return Err(MalformedRecordError::shape("top-level value is not an object"));
    };
    let Some(docs) = root.remove("docs") else {
        return Err(MalformedRecordError::shape("missing `docs` key"));
    };
    let Value::Array(items) = docs else {
        return Err(MalformedRecordError::shape("`docs` is not an array"));
    };

    let mut records = Vec::with_capacity(items.len());
    for (position, item) in items.into_iter().enumerate() {
        let record: IndexRecord = serde_json::from_value(item)
            .map_err(|e| MalformedRecordError::record(position, e.to_string()))?;
        check_required(position, &record)?;
        records.push(record);
    }
    Ok(records)
}

fn check_required(position: usize, record: &IndexRecord) -> Result<(), MalformedRecordError> {
    let empty = if record.location.is_empty() {
        "location"
    } else if record.page.is_empty() {
        "page"
    } else if record.category.as_str().is_empty() {
        "category"
    } else {
        return Ok(());
    };
    Err(MalformedRecordError::record(
        position,
        format!("field `{empty}` is empty"),
    ))
}

/// Lazy, restartable iterator over the records of one location.
#[derive(Debug, Clone)]
pub struct LocationRecords<'a> {
    records: &'a [IndexRecord],
    positions: std::slice::Iter<'a, usize>,
}

impl<'a> Iterator for LocationRecords<'a> {
    type Item = &'a IndexRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.positions.next().map(|&i| &self.records[i])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.positions.size_hint()
    }
}

impl<'a> LocationRecords<'a> {
    /// Pair each record with its position in the store.
    pub fn with_positions(self) -> impl ExactSizeIterator<Item = (usize, &'a IndexRecord)> + Clone + 'a {
        let records = self.records;
        self.positions.map(move |&i| (i, &records[i]))
    }
}

impl ExactSizeIterator for LocationRecords<'_> {}
impl FusedIterator for LocationRecords<'_> {}

/// Records of one page, in reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGroup<'a> {
    pub title: &'a str,
    /// Position of the first record of the group in the store.
    pub start: usize,
    pub records: &'a [IndexRecord],
}

impl<'a> PageGroup<'a> {
    /// Location of the page-level record, falling back to the first record's path.
    pub fn location(&self) -> &'a str {
        self.records
            .iter()
            .find(|r| r.is_page())
            .map(|r| r.location.as_str())
            .or_else(|| self.records.first().map(|r| r.path()))
            .unwrap_or_default()
    }

    pub fn sections(&self) -> impl Iterator<Item = &'a IndexRecord> + 'a {
        self.records.iter().filter(|r| r.is_section())
    }
}

/// Iterator over contiguous page groups.
#[derive(Debug, Clone)]
pub struct Pages<'a> {
    records: &'a [IndexRecord],
    offset: usize,
}

impl<'a> Iterator for Pages<'a> {
    type Item = PageGroup<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let records = self.records;
        let first = records.first()?;
        let len = records
            .iter()
            .take_while(|r| r.page == first.page)
            .count();
        let (group, rest) = records.split_at(len);
        let start = self.offset;
        self.records = rest;
        self.offset += len;
        Some(PageGroup {
            title: &first.page,
            start,
            records: group,
        })
    }
}

impl FusedIterator for Pages<'_> {}

/// Summary counts for a loaded index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub records: usize,
    /// Distinct page titles.
    pub pages: usize,
    /// Contiguous page runs; larger than `pages` when a page is split.
    pub page_groups: usize,
    pub locations: usize,
    pub categories: IndexMap<String, usize>,
    pub text_chars: usize,
}
