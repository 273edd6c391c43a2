//! Guideline ruleset loading.
//!
//! The ruleset lives in `tools/content/guidelines.json` and feeds every
//! validator. There is no sensible default ruleset, so a missing or malformed
//! file is a fatal configuration error. The store memoizes the first
//! successful read for the life of the process; `invalidate` drops the memo
//! (used by tests and by editors iterating on the ruleset).

use crate::runtime::error::{PipelineError, PipelineResult};
use serde::Deserialize;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Complete guideline ruleset.
#[derive(Clone, Debug, Deserialize)]
pub struct GuidelineConfig {
    pub frontmatter: FrontmatterRules,
    pub structure: StructureRules,
    pub voice: VoiceRules,
    pub images: ImageRules,
    pub links: LinkRules,
    pub scoring: ScoringWeights,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FrontmatterRules {
    pub title_min: usize,
    pub title_max: usize,
    pub excerpt_min: usize,
    pub excerpt_max: usize,
    pub tags_min: usize,
    pub tags_max: usize,
    pub keywords_min: usize,
    pub keywords_max: usize,
    #[serde(default)]
    pub forbidden_title_words: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StructureRules {
    pub word_count_min: usize,
    pub word_count_max: usize,
    pub min_section_headings: usize,
    /// Heading names accepted as a closing section, matched case-insensitively.
    pub conclusion_headings: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct VoiceRules {
    #[serde(default)]
    pub forbidden_phrases: Vec<String>,
    /// Forbidden phrase -> preferred replacement, used for suggestions.
    #[serde(default)]
    pub preferred_phrases: BTreeMap<String, String>,
    pub max_passive_percent: f64,
    pub max_sentence_words: usize,
    #[serde(default = "default_long_sentence_allowance")]
    pub long_sentence_allowance: usize,
}

fn default_long_sentence_allowance() -> usize {
    3
}

#[derive(Clone, Debug, Deserialize)]
pub struct ImageRules {
    pub thumbnail: ImageSpec,
    pub hero: ImageSpec,
}

/// Required pixel dimensions and byte budget for one image role.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct ImageSpec {
    pub width: u32,
    pub height: u32,
    pub max_bytes: u64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LinkRules {
    pub min_internal_links: usize,
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

fn default_max_suggestions() -> usize {
    3
}

/// Weights for the aggregator's overall score.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct ScoringWeights {
    pub technical_depth: f64,
    pub voice_alignment: f64,
    pub structure: f64,
    pub seo_readiness: f64,
}

/// Caching loader for the guideline ruleset.
#[derive(Clone, Debug)]
pub struct GuidelineStore {
    path: PathBuf,
    cached: RefCell<Option<Rc<GuidelineConfig>>>,
}

impl GuidelineStore {
    /// Create a store backed by the given file.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            cached: RefCell::new(None),
        }
    }

    /// Return the ruleset, reading the backing file on first use.
    pub fn load(&self) -> PipelineResult<Rc<GuidelineConfig>> {
        if let Some(config) = self.cached.borrow().as_ref() {
            return Ok(Rc::clone(config));
        }

        let body = fs::read_to_string(&self.path).map_err(|err| {
            PipelineError::config(format!("failed to read {}: {err}", self.path.display()))
                .with_hint("the guideline file has no default; create it before validating")
        })?;
        let config: GuidelineConfig = serde_json::from_str(&body).map_err(|err| {
            PipelineError::config(format!("failed to parse {}: {err}", self.path.display()))
        })?;

        let config = Rc::new(config);
        *self.cached.borrow_mut() = Some(Rc::clone(&config));
        Ok(config)
    }

    /// Drop the memoized ruleset so the next load re-reads the file.
    pub fn invalidate(&self) {
        self.cached.borrow_mut().take();
    }

    /// Return the ruleset path on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
pub(crate) fn sample_config() -> GuidelineConfig {
    serde_json::from_str(sample_config_json()).expect("sample guideline config parses")
}

#[cfg(test)]
pub(crate) fn sample_config_json() -> &'static str {
    r#"{
  "frontmatter": {
    "title_min": 10,
    "title_max": 70,
    "excerpt_min": 40,
    "excerpt_max": 160,
    "tags_min": 2,
    "tags_max": 6,
    "keywords_min": 1,
    "keywords_max": 8,
    "forbidden_title_words": ["ultimate", "revolutionary"]
  },
  "structure": {
    "word_count_min": 50,
    "word_count_max": 3000,
    "min_section_headings": 2,
    "conclusion_headings": ["Conclusion", "Wrapping up", "Closing thoughts"]
  },
  "voice": {
    "forbidden_phrases": ["game changer", "leverage"],
    "preferred_phrases": { "leverage": "use" },
    "max_passive_percent": 25.0,
    "max_sentence_words": 30
  },
  "images": {
    "thumbnail": { "width": 16, "height": 16, "max_bytes": 500000 },
    "hero": { "width": 24, "height": 16, "max_bytes": 1000000 }
  },
  "links": {
    "min_internal_links": 1
  },
  "scoring": {
    "technical_depth": 0.25,
    "voice_alignment": 0.25,
    "structure": 0.3,
    "seo_readiness": 0.2
  }
}"#
}
