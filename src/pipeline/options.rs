//! Pipeline options and marker configuration.

use std::io::Read;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Document-template markers the heuristics key on.
///
/// The defaults describe the regulatory documents of one institution
/// (Far Eastern Federal University, Vladivostok). Other templates that follow
/// the same structural conventions can be targeted by swapping the markers,
/// either in code or from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerSet {
    /// Tokens that must all appear on a cover page (compared with all
    /// whitespace removed)
    pub cover_markers: Vec<String>,

    /// City printed with the issue year on the cover page
    pub cover_city: String,

    /// Organization token inside document-control stamps (`АБВ-ДВФУ-12-2022`)
    pub stamp_organization: String,

    /// Word of the numbered heading that opens the trailing administrative
    /// part of a document (`5. Управление документом`)
    pub dead_section_heading: String,

    /// Keywords identifying the glossary section heading (case-insensitive)
    pub section_keywords: Vec<String>,
}

impl MarkerSet {
    /// Load a marker set from JSON. Missing fields keep their defaults.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        serde_json::from_reader(reader)
            .map_err(|e| Error::InvalidInput(format!("marker set: {}", e)))
    }

    /// Set the section keywords.
    pub fn with_section_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.section_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Set the stamp organization token.
    pub fn with_stamp_organization(mut self, token: impl Into<String>) -> Self {
        self.stamp_organization = token.into();
        self
    }

    /// Set the cover page markers and city.
    pub fn with_cover<I, S>(mut self, markers: I, city: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cover_markers = markers.into_iter().map(Into::into).collect();
        self.cover_city = city.into();
        self
    }

    /// Set the dead-section heading word.
    pub fn with_dead_section_heading(mut self, word: impl Into<String>) -> Self {
        self.dead_section_heading = word.into();
        self
    }
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self {
            cover_markers: vec![
                "МИНИСТЕРСТВО".to_string(),
                "Дальневосточныйфедеральныйуниверситет".to_string(),
            ],
            cover_city: "Владивосток".to_string(),
            stamp_organization: "ДВФУ".to_string(),
            dead_section_heading: "Управление".to_string(),
            section_keywords: vec![
                "термины".to_string(),
                "определения".to_string(),
                "сокращения".to_string(),
            ],
        }
    }
}

/// Options for a [`GlossaryPipeline`](super::GlossaryPipeline) run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Template markers
    pub markers: MarkerSet,

    /// Drop a recognized cover page
    pub trim_cover: bool,

    /// Remove document-control stamps
    pub scrub_stamps: bool,

    /// Cut the document at the administrative heading
    pub truncate_dead_sections: bool,
}

impl PipelineOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the marker set.
    pub fn with_markers(mut self, markers: MarkerSet) -> Self {
        self.markers = markers;
        self
    }

    /// Keep the first page even if it looks like a cover page.
    pub fn keep_cover(mut self) -> Self {
        self.trim_cover = false;
        self
    }

    /// Leave document-control stamps in place.
    pub fn keep_stamps(mut self) -> Self {
        self.scrub_stamps = false;
        self
    }

    /// Keep paragraphs after the administrative heading.
    pub fn without_truncation(mut self) -> Self {
        self.truncate_dead_sections = false;
        self
    }
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            markers: MarkerSet::default(),
            trim_cover: true,
            scrub_stamps: true,
            truncate_dead_sections: true,
        }
    }
}

/// Stamp token separator: any run of whitespace or hyphens.
const SEP: &str = r"[-\s]*";

/// Marker-dependent patterns, compiled once per pipeline.
#[derive(Debug, Clone)]
pub(crate) struct CompiledMarkers {
    pub(crate) cover_markers: Vec<String>,
    pub(crate) cover_year: Regex,
    pub(crate) stamp_exact: [Regex; 3],
    pub(crate) stamp_embedded: Regex,
    pub(crate) dead_heading: Regex,
    pub(crate) section_keyword: Regex,
}

impl CompiledMarkers {
    pub(crate) fn compile(markers: &MarkerSet) -> Result<Self> {
        if markers.section_keywords.iter().all(|k| k.trim().is_empty()) {
            return Err(Error::InvalidInput(
                "marker set needs at least one section keyword".to_string(),
            ));
        }

        let org = regex::escape(&compress(&markers.stamp_organization));
        let code = format!(r"[А-Я]{{2,3}}-{org}-\d+(?:/\d+)?-\d{{4}}");
        let page = r"\d+из\d+";

        let embedded = format!(
            r"(?i)([А-Яа-я.;]){SEP}[А-Я]{{2,3}}{SEP}{org}{SEP}\d+(?:/\d+)?{SEP}\d{{4}}{SEP}\d+{SEP}из{SEP}\d+"
        );

        let keywords = markers
            .section_keywords
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|");

        Ok(Self {
            cover_markers: markers.cover_markers.iter().map(|m| compress(m)).collect(),
            cover_year: Regex::new(&format!(
                r"{}20[1-9][0-9]",
                regex::escape(&compress(&markers.cover_city))
            ))?,
            stamp_exact: [
                Regex::new(&format!("^(?:{code})$"))?,
                Regex::new(&format!("^(?:{page})$"))?,
                Regex::new(&format!("^(?:{code}{page})$"))?,
            ],
            stamp_embedded: Regex::new(&embedded)?,
            dead_heading: Regex::new(&format!(
                r"^\d+\.\s+{}\s+\S+",
                regex::escape(markers.dead_section_heading.trim())
            ))?,
            section_keyword: Regex::new(&format!("(?i)(?:{keywords})"))?,
        })
    }
}

/// Remove all whitespace.
pub(crate) fn compress(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}
