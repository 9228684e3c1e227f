//! Glossary extraction pipeline.
//!
//! Stages, each a pure function of the previous stage's output:
//!
//! 1. cover page trimming
//! 2. stamp scrubbing
//! 3. paragraph normalization
//! 4. glossary section isolation
//! 5. term/definition extraction
//!
//! [`GlossaryPipeline`] compiles the marker-dependent patterns once and runs
//! the stages in order. A pipeline holds no per-run state, so one value can
//! serve any number of documents, including from several threads.

mod cover;
mod normalize;
mod options;
mod section;
mod stamp;
mod terms;

pub use options::{MarkerSet, PipelineOptions};
pub use section::{is_toc_line, SectionState, Step};
pub use terms::{extract_pairs_from_line, first_spaced_dash};

use log::debug;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::Result;
use crate::model::{Document, GlossaryEntry};
use options::CompiledMarkers;

/// Stage-by-stage statistics of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineReport {
    /// Pages received
    pub pages_in: usize,
    /// Whether the first page was dropped as a cover page
    pub cover_dropped: bool,
    /// Blocks received (after cover trimming)
    pub blocks_in: usize,
    /// Blocks removed by the stamp scrubber
    pub blocks_scrubbed: usize,
    /// Paragraphs after normalization
    pub paragraphs: usize,
    /// Paragraphs in the glossary section
    pub section_paragraphs: usize,
    /// Extracted entries
    pub entries: usize,
}

/// Output of a full run: the entries plus how each stage went.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOutput {
    /// Extracted glossary entries in document order
    pub entries: Vec<GlossaryEntry>,
    /// Stage statistics
    pub report: PipelineReport,
}

/// Configured glossary extraction pipeline.
#[derive(Debug, Clone)]
pub struct GlossaryPipeline {
    options: PipelineOptions,
    markers: CompiledMarkers,
}

impl GlossaryPipeline {
    /// Create a pipeline, compiling the configured markers.
    ///
    /// Fails only when the marker set is unusable (no section keyword, or a
    /// marker that yields an invalid pattern).
    pub fn new(options: PipelineOptions) -> Result<Self> {
        let markers = CompiledMarkers::compile(&options.markers)?;
        Ok(Self { options, markers })
    }

    /// Create a pipeline with the default template markers.
    pub fn with_defaults() -> Result<Self> {
        Self::new(PipelineOptions::default())
    }

    /// The options this pipeline was built with.
    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Stages 1-2: drop the cover page and scrub stamps.
    pub fn prepare(&self, doc: &Document) -> Document {
        let doc = if self.options.trim_cover {
            cover::trim_cover(doc, &self.markers)
        } else {
            doc.clone()
        };

        if self.options.scrub_stamps {
            stamp::scrub_pages(&doc, &self.markers)
        } else {
            doc
        }
    }

    /// Stages 1-3: the document's normalized paragraphs.
    pub fn paragraphs(&self, doc: &Document) -> Vec<String> {
        let prepared = self.prepare(doc);
        self.normalize(&prepared)
    }

    /// Stage 3 alone, over an already prepared document.
    pub fn normalize(&self, prepared: &Document) -> Vec<String> {
        let dead_heading = self
            .options
            .truncate_dead_sections
            .then_some(&self.markers.dead_heading);
        normalize::normalize(prepared.blocks(), dead_heading)
    }

    /// Stage 4: the glossary section within normalized paragraphs.
    pub fn section(&self, paragraphs: &[String]) -> Vec<String> {
        section::isolate_section(paragraphs, &self.markers.section_keyword)
    }

    /// Stage 5: entries from glossary section paragraphs.
    pub fn terms(&self, section: &[String]) -> Vec<GlossaryEntry> {
        terms::format_glossary(section, &self.markers.section_keyword)
    }

    /// Run all stages and return the glossary entries.
    pub fn extract(&self, doc: &Document) -> Vec<GlossaryEntry> {
        self.run(doc).entries
    }

    /// Run all stages, keeping per-stage statistics.
    pub fn run(&self, doc: &Document) -> PipelineOutput {
        let mut report = PipelineReport {
            pages_in: doc.page_count(),
            ..Default::default()
        };

        let trimmed = if self.options.trim_cover {
            cover::trim_cover(doc, &self.markers)
        } else {
            doc.clone()
        };
        report.cover_dropped = trimmed.page_count() < doc.page_count();
        report.blocks_in = trimmed.block_count();

        let scrubbed = if self.options.scrub_stamps {
            stamp::scrub_pages(&trimmed, &self.markers)
        } else {
            trimmed
        };
        report.blocks_scrubbed = report.blocks_in - scrubbed.block_count();

        let paragraphs = self.normalize(&scrubbed);
        report.paragraphs = paragraphs.len();

        let section = self.section(&paragraphs);
        report.section_paragraphs = section.len();

        let entries = self.terms(&section);
        report.entries = entries.len();

        debug!("pipeline run: {:?}", report);
        PipelineOutput { entries, report }
    }

    /// Extract glossaries from many documents in parallel.
    ///
    /// Results are in input order.
    pub fn extract_batch(&self, docs: &[Document]) -> Vec<Vec<GlossaryEntry>> {
        docs.par_iter().map(|doc| self.extract(doc)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> Document {
        Document::from_blocks(vec![
            vec![
                "МИНИСТЕРСТВО НАУКИ И ВЫСШЕГО ОБРАЗОВАНИЯ",
                "Дальневосточный федеральный университет",
                "Владивосток 2022",
            ],
            vec![
                "1.4 Термины и определения ........ 2",
                "1. Общие положения.",
                "ПЛ-ДВФУ-7-2022 2 из 3",
            ],
            vec![
                "1.4 Термины и определения:",
                "Сервер - вычислительное устройство; Клиент - потребитель услуг.ПЛ-ДВФУ-7-2022 3 из 3",
                "5. Управление документом",
                "Хвост - не глоссарий.",
            ],
        ])
    }

    #[test]
    fn test_run_report() {
        let pipeline = GlossaryPipeline::with_defaults().unwrap();
        let output = pipeline.run(&sample_document());

        assert_eq!(
            output.entries,
            vec![
                GlossaryEntry::new("Сервер", "вычислительное устройство"),
                GlossaryEntry::new("Клиент", "потребитель услуг"),
            ]
        );
        assert_eq!(output.report.pages_in, 3);
        assert!(output.report.cover_dropped);
        assert_eq!(output.report.blocks_in, 7);
        assert_eq!(output.report.blocks_scrubbed, 1);
        assert_eq!(output.report.section_paragraphs, 3);
        assert_eq!(output.report.entries, 2);
    }

    #[test]
    fn test_stage_toggles() {
        let options = PipelineOptions::new()
            .keep_cover()
            .keep_stamps()
            .without_truncation();
        let pipeline = GlossaryPipeline::new(options).unwrap();

        let prepared = pipeline.prepare(&sample_document());
        assert_eq!(prepared, sample_document());

        let paragraphs = pipeline.paragraphs(&sample_document());
        assert!(paragraphs.iter().any(|p| p.contains("Управление")));
    }

    #[test]
    fn test_extract_matches_stage_composition() {
        let pipeline = GlossaryPipeline::with_defaults().unwrap();
        let doc = sample_document();

        let paragraphs = pipeline.paragraphs(&doc);
        let section = pipeline.section(&paragraphs);
        assert_eq!(pipeline.terms(&section), pipeline.extract(&doc));
    }

    #[test]
    fn test_extract_batch_keeps_order() {
        let pipeline = GlossaryPipeline::with_defaults().unwrap();
        let empty = Document::from_blocks(vec![vec!["Без глоссария."]]);
        let docs = vec![sample_document(), empty, sample_document()];

        let results = pipeline.extract_batch(&docs);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].len(), 2);
        assert!(results[1].is_empty());
        assert_eq!(results[2], results[0]);
    }
}
