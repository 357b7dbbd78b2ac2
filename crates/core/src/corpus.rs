//! Corpus loading and document preparation.
//!
//! Records are read from a JSON array or a JSON Lines file (`.jsonl`) and
//! turned into [`Document`]s: ordinals follow input order, missing token
//! fields are produced with the [`TextNormalizer`], and the lexical text blob
//! repeats title, ingredient, and step terms by their field weights.

use crate::config::{INGREDIENT_WEIGHT, STEP_WEIGHT, TITLE_WEIGHT};
use crate::document::{Bm25Source, Document, Recipe};
use crate::error::{BuildError, CorpusError};
use crate::text::TextNormalizer;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tags as a single blob or as a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagField {
    Blob(String),
    List(Vec<String>),
}

impl TagField {
    /// Flattens to the blob the filters match against.
    pub fn into_blob(self) -> String {
        match self {
            TagField::Blob(s) => s,
            TagField::List(items) => items.join(", "),
        }
    }
}

/// One recipe as stored on disk. Every field is optional at decode time;
/// [`DocumentBuilder`] enforces the required ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub minutes: Option<u32>,
    #[serde(default)]
    pub tags: Option<TagField>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Option<Vec<String>>,
    #[serde(default)]
    pub steps: Option<Vec<String>>,
    /// Precomputed normalized ingredient tokens.
    #[serde(default)]
    pub ingredients_tokens: Option<Vec<String>>,
    /// Precomputed normalized step tokens.
    #[serde(default)]
    pub steps_tokens: Option<Vec<String>>,
    /// Precomputed weighted lexical text.
    #[serde(default)]
    pub search_text: Option<String>,
}

/// Reads every record from `path`. `.jsonl` files are read line by line;
/// anything else must hold a single JSON array.
pub fn load_corpus(path: impl AsRef<Path>) -> Result<Vec<RecipeRecord>, CorpusError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let is_jsonl = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jsonl"));

    let records = if is_jsonl {
        let mut records = Vec::new();
        for (i, line) in raw.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record = serde_json::from_str(line).map_err(|source| CorpusError::Json {
                line: Some(i + 1),
                source,
            })?;
            records.push(record);
        }
        records
    } else {
        serde_json::from_str(&raw).map_err(|source| CorpusError::Json { line: None, source })?
    };

    tracing::info!("Loaded {} recipe records from {:?}", records.len(), path);
    Ok(records)
}

/// Turns records into index-ready documents.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    normalizer: TextNormalizer,
    source: Bm25Source,
}

impl DocumentBuilder {
    pub fn new(normalizer: TextNormalizer, source: Bm25Source) -> Self {
        Self { normalizer, source }
    }

    pub fn with_source(mut self, source: Bm25Source) -> Self {
        self.source = source;
        self
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Builds documents with ordinals `0..records.len()` in input order.
    pub fn build(&self, records: Vec<RecipeRecord>) -> Result<Vec<Document>, BuildError> {
        if records.is_empty() {
            return Err(BuildError::EmptyCorpus);
        }
        records
            .into_iter()
            .enumerate()
            .map(|(i, record)| self.build_one(i as u32, record))
            .collect()
    }

    fn build_one(&self, ordinal: u32, record: RecipeRecord) -> Result<Document, BuildError> {
        let missing = |field| BuildError::MissingField { ordinal, field };
        let name = record.name.ok_or_else(|| missing("name"))?;
        let minutes = record.minutes.ok_or_else(|| missing("minutes"))?;
        let ingredients = record.ingredients.ok_or_else(|| missing("ingredients"))?;
        let steps = record.steps.ok_or_else(|| missing("steps"))?;

        let title_tokens = self.normalizer.normalize(&name);
        let ingredient_tokens = record
            .ingredients_tokens
            .unwrap_or_else(|| self.normalizer.normalize_all(&ingredients));
        let step_tokens = record
            .steps_tokens
            .unwrap_or_else(|| self.normalizer.normalize_all(&steps));

        let lexical_text = record
            .search_text
            .unwrap_or_else(|| weighted_text(&title_tokens, &ingredient_tokens, &step_tokens));

        let tokens = match self.source {
            Bm25Source::Ingredients => ingredient_tokens,
            Bm25Source::All => {
                let mut all = title_tokens;
                all.extend(ingredient_tokens);
                all.extend(step_tokens);
                all
            }
        };

        let recipe = Recipe {
            id: record.id.unwrap_or(ordinal as u64),
            name,
            minutes,
            tags: record.tags.map(TagField::into_blob).unwrap_or_default(),
            description: record.description.unwrap_or_default(),
            ingredients,
            steps,
        };
        Ok(Document::new(ordinal, recipe, lexical_text, tokens))
    }
}

/// Title × TITLE_WEIGHT, ingredients × INGREDIENT_WEIGHT, steps × STEP_WEIGHT.
pub fn weighted_text(title: &[String], ingredients: &[String], steps: &[String]) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(
        title.len() * TITLE_WEIGHT + ingredients.len() * INGREDIENT_WEIGHT + steps.len() * STEP_WEIGHT,
    );
    for (tokens, weight) in [
        (title, TITLE_WEIGHT),
        (ingredients, INGREDIENT_WEIGHT),
        (steps, STEP_WEIGHT),
    ] {
        for _ in 0..weight {
            parts.extend(tokens.iter().map(String::as_str));
        }
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn record(name: &str, minutes: u32, ingredients: &[&str], steps: &[&str]) -> RecipeRecord {
        RecipeRecord {
            name: Some(name.into()),
            minutes: Some(minutes),
            ingredients: Some(strings(ingredients)),
            steps: Some(strings(steps)),
            ..Default::default()
        }
    }

    #[test]
    fn test_weighted_text_repetition() {
        let text = weighted_text(&strings(&["soup"]), &strings(&["rice"]), &strings(&["boil"]));
        assert_eq!(text, "soup soup rice rice rice rice rice boil");
        assert_eq!(weighted_text(&[], &[], &[]), "");
    }

    #[test]
    fn test_build_assigns_ordinals_and_tokens() {
        let builder = DocumentBuilder::default();
        let docs = builder
            .build(vec![
                record("Tomato Soup", 25, &["4 tomatoes", "1 onion"], &["Chop the onions."]),
                record("Toast", 5, &["bread"], &["toast it"]),
            ])
            .unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].ordinal, 0);
        assert_eq!(docs[1].ordinal, 1);
        assert_eq!(docs[0].tokens, strings(&["tomato", "onion"]));
        assert!(docs[0].lexical_text.starts_with("tomato soup tomato soup tomato onion"));
        assert!(docs[0].lexical_text.ends_with("chop onion"));
        assert_eq!(docs[1].recipe.id, 1);
    }

    #[test]
    fn test_bm25_source_all() {
        let builder = DocumentBuilder::default().with_source(Bm25Source::All);
        let docs = builder
            .build(vec![record("Egg Salad", 10, &["eggs"], &["mix"])])
            .unwrap();
        assert_eq!(docs[0].tokens, strings(&["egg", "salad", "egg", "mix"]));
    }

    #[test]
    fn test_precomputed_fields_are_used() {
        let mut r = record("Pasta", 20, &["spaghetti"], &["boil"]);
        r.ingredients_tokens = Some(strings(&["noodle"]));
        r.search_text = Some("custom blob".into());
        r.tags = Some(TagField::List(strings(&["italian", "vegetarian"])));
        let docs = DocumentBuilder::default().build(vec![r]).unwrap();
        assert_eq!(docs[0].tokens, strings(&["noodle"]));
        assert_eq!(docs[0].lexical_text, "custom blob");
        assert_eq!(docs[0].recipe.tags, "italian, vegetarian");
    }

    #[test]
    fn test_missing_field_reports_ordinal() {
        let mut bad = record("Broken", 5, &["x"], &["y"]);
        bad.steps = None;
        let err = DocumentBuilder::default()
            .build(vec![record("Ok", 5, &["a"], &["b"]), bad])
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::MissingField {
                ordinal: 1,
                field: "steps"
            }
        );
    }

    #[test]
    fn test_empty_records_rejected() {
        assert_eq!(
            DocumentBuilder::default().build(Vec::new()).unwrap_err(),
            BuildError::EmptyCorpus
        );
    }

    #[test]
    fn test_load_json_array() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"[{{"id": 7, "name": "Soup", "minutes": 30, "tags": "['dinner']",
                "ingredients": ["water"], "steps": ["boil"]}}]"#
        )
        .unwrap();
        let records = load_corpus(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, Some(7));
        assert_eq!(records[0].tags, Some(TagField::Blob("['dinner']".into())));
    }

    #[test]
    fn test_load_jsonl_skips_blank_lines() {
        let mut file = tempfile::Builder::new().suffix(".jsonl").tempfile().unwrap();
        writeln!(file, r#"{{"name": "A", "minutes": 1, "ingredients": [], "steps": []}}"#).unwrap();
        writeln!(file).unwrap();
        writeln!(file, r#"{{"name": "B", "minutes": 2, "ingredients": [], "steps": []}}"#).unwrap();
        let records = load_corpus(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name.as_deref(), Some("B"));
    }

    #[test]
    fn test_load_jsonl_reports_line() {
        let mut file = tempfile::Builder::new().suffix(".jsonl").tempfile().unwrap();
        writeln!(file, r#"{{"name": "A"}}"#).unwrap();
        writeln!(file, "not json").unwrap();
        match load_corpus(file.path()).unwrap_err() {
            CorpusError::Json { line, .. } => assert_eq!(line, Some(2)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_corpus(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, CorpusError::Io { .. }));
    }
}
