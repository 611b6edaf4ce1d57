//! Value indexer
//!
//! Turns the value export's nested per-task result lists into one typed
//! [`PageValueIndex`] per page, keyed by [`PageKey`].
//!
//! Page keys resolve from the task's `file_upload`, then `data.image`, then a
//! synthetic `page_<task index>`. When two tasks resolve to the same key the later
//! task replaces the earlier one.

use crate::adapters::label_studio::{LabelStudioTask, ResultRecord, ValueExport};
use crate::domain::ids::PageKey;
use crate::domain::page::{ExtractedRect, NumericValue, PageValueIndex, UnitChoice, ZoneCodeValue};
use std::collections::BTreeMap;

/// Pixel resolution assumed for rectangles that do not declare one
pub const DEFAULT_FALLBACK_WIDTH: u32 = 2550;
/// See [`DEFAULT_FALLBACK_WIDTH`]
pub const DEFAULT_FALLBACK_HEIGHT: u32 = 1650;

/// Kind of a result record, decided by its `type` / `from_name` discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    /// `type == "rectanglelabels"`
    Rectangle,
    /// `from_name == "normalized_value"`
    NumericValue,
    /// `from_name == "zone_code_text"`
    ZoneCode,
    /// `from_name == "unit"`
    Unit,
    /// Anything else; kept only in the raw passthrough
    Other,
}

impl ResultKind {
    /// Classifies a record; `type` is checked before `from_name`
    pub fn classify(kind: Option<&str>, from_name: Option<&str>) -> Self {
        if kind == Some("rectanglelabels") {
            return ResultKind::Rectangle;
        }
        match from_name {
            Some("normalized_value") => ResultKind::NumericValue,
            Some("zone_code_text") => ResultKind::ZoneCode,
            Some("unit") => ResultKind::Unit,
            _ => ResultKind::Other,
        }
    }
}

/// Page key to page value index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueIndex {
    pages: BTreeMap<PageKey, PageValueIndex>,
}

impl ValueIndex {
    /// Looks up a page
    pub fn get(&self, key: &PageKey) -> Option<&PageValueIndex> {
        self.pages.get(key)
    }

    /// Inserts a page, returning the one it replaced
    pub fn insert(&mut self, key: PageKey, page: PageValueIndex) -> Option<PageValueIndex> {
        self.pages.insert(key, page)
    }

    /// Number of pages
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// True when no page was indexed
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Pages in key order
    pub fn iter(&self) -> impl Iterator<Item = (&PageKey, &PageValueIndex)> {
        self.pages.iter()
    }

    /// Total number of numeric values across pages
    pub fn total_numeric_values(&self) -> usize {
        self.pages.values().map(|p| p.normalized_values.len()).sum()
    }

    /// Total number of zone codes across pages
    pub fn total_zone_codes(&self) -> usize {
        self.pages.values().map(|p| p.zone_codes.len()).sum()
    }
}

/// Builds a [`ValueIndex`] from a value export
#[derive(Debug, Clone, Copy)]
pub struct ValueIndexer {
    fallback_width: u32,
    fallback_height: u32,
}

impl Default for ValueIndexer {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_WIDTH, DEFAULT_FALLBACK_HEIGHT)
    }
}

impl ValueIndexer {
    /// Creates an indexer with the given fallback resolution
    pub fn new(fallback_width: u32, fallback_height: u32) -> Self {
        Self {
            fallback_width,
            fallback_height,
        }
    }

    /// Indexes every task of the export
    pub fn build(&self, export: &ValueExport) -> ValueIndex {
        let mut index = ValueIndex::default();

        for (task_index, task) in export.tasks.iter().enumerate() {
            let (key, page) = self.index_task(task_index, task);

            if task_index == 0 {
                log_sample_page(&key, &page);
            }

            if index.insert(key.clone(), page).is_some() {
                tracing::warn!(
                    page = %key,
                    task_index,
                    "Duplicate page key in value export, later task replaces earlier one"
                );
            }
        }

        tracing::info!(
            pages = index.len(),
            numeric_values = index.total_numeric_values(),
            zone_codes = index.total_zone_codes(),
            "Indexed value export"
        );

        index
    }

    /// Indexes a single task
    pub fn index_task(&self, task_index: usize, task: &LabelStudioTask) -> (PageKey, PageValueIndex) {
        let filename = task.filename();
        let key = match filename {
            Some(name) => PageKey::from_filename(name),
            None => PageKey::synthetic(task_index),
        };

        let mut page = PageValueIndex::new(filename.unwrap_or_default());

        for raw in task.results() {
            page.all_results.push(raw.clone());

            let Some(record) = ResultRecord::from_raw(raw) else {
                tracing::debug!(page = %key, "Result record is not an object, kept raw only");
                continue;
            };

            self.apply_record(&mut page, &record);
        }

        (key, page)
    }

    fn apply_record(&self, page: &mut PageValueIndex, record: &ResultRecord<'_>) {
        let x = record.float("x").unwrap_or(0.0);
        let y = record.float("y").unwrap_or(0.0);

        match ResultKind::classify(record.kind(), record.from_name()) {
            ResultKind::Rectangle => page.rectangles.push(ExtractedRect {
                labels: record.strings("rectanglelabels"),
                x,
                y,
                width: record.float("width").unwrap_or(0.0),
                height: record.float("height").unwrap_or(0.0),
                original_width: record
                    .dimension("original_width")
                    .or_else(|| record.record_dimension("original_width"))
                    .unwrap_or(self.fallback_width),
                original_height: record
                    .dimension("original_height")
                    .or_else(|| record.record_dimension("original_height"))
                    .unwrap_or(self.fallback_height),
            }),
            ResultKind::NumericValue => page.normalized_values.push(NumericValue {
                number: record.number(),
                x,
                y,
            }),
            ResultKind::ZoneCode => {
                if let Some(text) = record.first_string("text").filter(|t| !t.is_empty()) {
                    page.zone_codes.push(ZoneCodeValue {
                        text: text.to_string(),
                        x,
                        y,
                    });
                }
            }
            ResultKind::Unit => {
                if let Some(unit) = record.first_string("choices") {
                    page.units.push(UnitChoice {
                        unit: unit.to_string(),
                        x,
                        y,
                    });
                }
            }
            ResultKind::Other => {}
        }
    }
}

fn log_sample_page(key: &PageKey, page: &PageValueIndex) {
    let sample_zones: Vec<&str> = page
        .zone_codes
        .iter()
        .take(3)
        .map(|z| z.text.as_str())
        .collect();

    tracing::info!(
        page = %key,
        rectangles = page.rectangles.len(),
        normalized_values = page.normalized_values.len(),
        zone_codes = page.zone_codes.len(),
        units = page.units.len(),
        sample_zones = ?sample_zones,
        "Sample page analysis"
    );
}
