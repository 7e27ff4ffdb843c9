//! Command payloads and their renderings.
//!
//! Every command builds a serializable report and renders it in the
//! requested [`OutputFormat`]. Reports go to stdout; logs never do.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use sp_config::{SelectionOrder, StrategyName};

use crate::classify::{Classifier, WordClassifier};
use crate::dist::{Distribution, ProbError};
use crate::knowledge::KnowledgeBase;

/// Schema version of the JSON payloads.
pub const OUTPUT_SCHEMA_VERSION: &str = "1.0.0";

/// Supported output formats for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Structured JSON (default for machine consumption)
    #[default]
    Json,
    /// Human-readable Markdown
    Md,
    /// One line per result
    Summary,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Md => write!(f, "md"),
            OutputFormat::Summary => write!(f, "summary"),
        }
    }
}

/// A payload renderable in every output format.
pub trait Report: Serialize {
    fn markdown(&self) -> String;
    fn summary(&self) -> String;

    fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(self),
            OutputFormat::Md => Ok(self.markdown()),
            OutputFormat::Summary => Ok(self.summary()),
        }
    }
}

/// A word that fed the strategy, with its informativeness.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedWord {
    pub word: String,
    pub score: f64,
}

/// Result of one classification query.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationReport {
    pub schema_version: String,
    pub strategy: StrategyName,
    pub selection: SelectionOrder,
    pub top_n: usize,
    pub words: Vec<String>,
    pub selected: Vec<SelectedWord>,
    /// Query words without a classifier.
    pub ignored: Vec<String>,
    pub category: Option<String>,
    pub distribution: Distribution<String>,
}

impl ClassificationReport {
    /// Classify `words` and capture what the classifier did.
    pub fn build<K>(classifier: &Classifier<K>, words: &[String], n: usize) -> Result<Self, ProbError>
    where
        K: KnowledgeBase<Category = String>,
    {
        let distribution = classifier.posterior_over_categories(words, n)?;
        let selected = classifier
            .select(words, n)
            .into_iter()
            .map(|(word, c)| SelectedWord {
                word: word.to_string(),
                score: c.score,
            })
            .collect();
        let ignored = words
            .iter()
            .filter(|word| classifier.word_classifier(word).is_none())
            .cloned()
            .collect();

        Ok(ClassificationReport {
            schema_version: OUTPUT_SCHEMA_VERSION.to_string(),
            strategy: classifier.strategy_name(),
            selection: classifier.selection(),
            top_n: n,
            words: words.to_vec(),
            selected,
            ignored,
            category: distribution.most_probable().cloned(),
            distribution,
        })
    }

    fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or("undecided")
    }

    /// Mass of the chosen category (a score for unnormalized strategies).
    pub fn confidence(&self) -> f64 {
        self.category
            .as_ref()
            .map_or(0.0, |category| self.distribution.probability(category))
    }
}

impl Report for ClassificationReport {
    fn markdown(&self) -> String {
        let mut out = String::from("# Classification\n\n");
        out.push_str(&format!("- words: {}\n", self.words.join(" ")));
        out.push_str(&format!("- strategy: {}\n", self.strategy));
        out.push_str(&format!(
            "- selected ({} of {} max, {}): {}\n",
            self.selected.len(),
            self.top_n,
            self.selection,
            self.selected
                .iter()
                .map(|s| s.word.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        ));
        if !self.ignored.is_empty() {
            out.push_str(&format!("- ignored: {}\n", self.ignored.join(" ")));
        }
        out.push_str(&format!("- category: **{}**\n\n", self.category_label()));
        out.push_str(&distribution_table(&self.distribution));
        out
    }

    fn summary(&self) -> String {
        format!(
            "{} ({:.6}) via {} [{}]",
            self.category_label(),
            self.confidence(),
            self.strategy,
            self.words.join(" ")
        )
    }
}

/// Full posterior only, without the chosen category.
#[derive(Debug, Clone, Serialize)]
pub struct PosteriorReport {
    pub schema_version: String,
    pub strategy: StrategyName,
    pub words: Vec<String>,
    pub distribution: Distribution<String>,
}

impl From<ClassificationReport> for PosteriorReport {
    fn from(report: ClassificationReport) -> Self {
        PosteriorReport {
            schema_version: report.schema_version,
            strategy: report.strategy,
            words: report.words,
            distribution: report.distribution,
        }
    }
}

impl Report for PosteriorReport {
    fn markdown(&self) -> String {
        format!(
            "# Posterior ({})\n\n{}",
            self.strategy,
            distribution_table(&self.distribution)
        )
    }

    fn summary(&self) -> String {
        self.distribution.to_string().trim_end().to_string()
    }
}

/// Per-word classifier table for inspection.
#[derive(Debug, Clone, Serialize)]
pub struct WordsReport {
    pub schema_version: String,
    pub order: SelectionOrder,
    pub floor: f64,
    pub words: Vec<WordRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WordRow {
    pub word: String,
    pub score: f64,
    pub distribution: Distribution<String>,
}

impl WordsReport {
    pub fn build<K>(classifier: &Classifier<K>, order: SelectionOrder, limit: Option<usize>) -> Self
    where
        K: KnowledgeBase<Category = String>,
    {
        let ranked = classifier.ranked_words(order);
        let limit = limit.unwrap_or(ranked.len());
        WordsReport {
            schema_version: OUTPUT_SCHEMA_VERSION.to_string(),
            order,
            floor: classifier.floor(),
            words: ranked
                .into_iter()
                .take(limit)
                .map(|(word, c): (&str, &WordClassifier<String>)| WordRow {
                    word: word.to_string(),
                    score: c.score,
                    distribution: c.distribution.clone(),
                })
                .collect(),
        }
    }
}

impl Report for WordsReport {
    fn markdown(&self) -> String {
        let mut out = String::from("# Word classifiers\n\n");
        out.push_str(&format!("- order: {}\n- floor: {:.6}\n\n", self.order, self.floor));
        out.push_str("| word | score | distribution |\n|------|-------|--------------|\n");
        for row in &self.words {
            out.push_str(&format!(
                "| {} | {:.6} | {} |\n",
                row.word,
                row.score,
                inline_distribution(&row.distribution)
            ));
        }
        out
    }

    fn summary(&self) -> String {
        self.words
            .iter()
            .map(|row| format!("{} {:.6}", row.word, row.score))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Reference test corpus run through every strategy.
#[derive(Debug, Clone, Serialize)]
pub struct DemoReport {
    pub schema_version: String,
    pub cases: Vec<DemoCase>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DemoCase {
    pub words: Vec<String>,
    pub results: Vec<ClassificationReport>,
}

impl Report for DemoReport {
    fn markdown(&self) -> String {
        let mut out = String::from("# Reference corpus\n");
        for case in &self.cases {
            out.push_str(&format!("\n## {}\n", case.words.join(" ")));
            for result in &case.results {
                out.push_str(&format!(
                    "\n### {} → {}\n\n",
                    result.strategy,
                    result.category_label()
                ));
                out.push_str(&distribution_table(&result.distribution));
            }
        }
        out
    }

    fn summary(&self) -> String {
        let mut out = String::new();
        for case in &self.cases {
            out.push_str(&format!("use corpus: {:?}\n", case.words));
            for result in &case.results {
                out.push_str(&format!("{}:\n", result.strategy));
                out.push_str(&result.distribution.to_string());
            }
            out.push('\n');
        }
        out.trim_end().to_string()
    }
}

fn distribution_table(dist: &Distribution<String>) -> String {
    let mut out = String::from("| category | probability |\n|----------|-------------|\n");
    for (category, mass) in dist.iter() {
        out.push_str(&format!("| {} | {:.6} |\n", category, mass));
    }
    out
}

fn inline_distribution(dist: &Distribution<String>) -> String {
    dist.iter()
        .map(|(category, mass)| format!("{}={:.4}", category, mass))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::WordTable;
    use crate::strategy::strategy_for;

    fn classifier(name: StrategyName) -> Classifier<WordTable> {
        Classifier::new(WordTable::reference(), strategy_for(name)).unwrap()
    }

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn classification_report_tracks_ignored_words() {
        let c = classifier(StrategyName::NaiveBayes);
        let report =
            ClassificationReport::build(&c, &words(&["free", "jump", "test"]), 15).unwrap();
        assert_eq!(report.category.as_deref(), Some("Spam"));
        assert_eq!(report.selected.len(), 1);
        assert_eq!(report.ignored, vec!["jump", "test"]);
    }

    #[test]
    fn json_rendering_is_structured() {
        let c = classifier(StrategyName::Fisher);
        let report = ClassificationReport::build(&c, &words(&["monad"]), 15).unwrap();
        let json: serde_json::Value =
            serde_json::from_str(&report.render(OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["strategy"], "fisher");
        assert_eq!(json["category"], "Ham");
        assert_eq!(json["distribution"][0]["outcome"], "Spam");
    }

    #[test]
    fn summary_and_markdown_name_the_category() {
        let c = classifier(StrategyName::NaiveBayes);
        let report = ClassificationReport::build(&c, &words(&["free"]), 15).unwrap();
        assert!(report.summary().starts_with("Spam ("));
        let md = report.render(OutputFormat::Md).unwrap();
        assert!(md.contains("**Spam**"));
        assert!(md.contains("| Ham |"));
    }

    #[test]
    fn words_report_respects_limit() {
        let c = classifier(StrategyName::NaiveBayes);
        let report = WordsReport::build(&c, SelectionOrder::MostInformative, Some(3));
        assert_eq!(report.words.len(), 3);
        assert!(report.words[0].score >= report.words[2].score);
        assert_eq!(report.summary().lines().count(), 3);
    }
}
