//! Classification metrics over (true, predicted) label pairs.
//!
//! Every ratio with a zero denominator is undefined (`None`, serialized as
//! `null`) instead of being reported as zero.

use super::relevance::Relevance;
use crate::core::label::Label;
use crate::document::Document;
use serde::Serialize;

/// A metric value; `None` when undefined
pub type Score = Option<f64>;

/// `num / den`, undefined when `den` is zero
pub fn ratio(num: usize, den: usize) -> Score {
    if den == 0 {
        None
    } else {
        Some(num as f64 / den as f64)
    }
}

/// Harmonic mean of precision and recall.
///
/// Undefined when either input is undefined; zero when both are zero.
pub fn f1_score(precision: Score, recall: Score) -> Score {
    let (p, r) = (precision?, recall?);
    if p + r == 0.0 {
        Some(0.0)
    } else {
        Some(2.0 * p * r / (p + r))
    }
}

/// Square confusion matrix; rows are true classes, columns predicted ones
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfusionMatrix<C> {
    labels: Vec<C>,
    counts: Vec<Vec<usize>>,
}

impl<C: Copy + PartialEq> ConfusionMatrix<C> {
    pub fn new(labels: Vec<C>) -> Self {
        let n = labels.len();
        Self {
            labels,
            counts: vec![vec![0; n]; n],
        }
    }

    fn index(&self, class: C) -> Option<usize> {
        self.labels.iter().position(|c| *c == class)
    }

    /// Count one observation; pairs outside the label set are ignored
    pub fn record(&mut self, truth: C, predicted: C) {
        if let (Some(t), Some(p)) = (self.index(truth), self.index(predicted)) {
            self.counts[t][p] += 1;
        }
    }

    pub fn labels(&self) -> &[C] {
        &self.labels
    }

    pub fn rows(&self) -> &[Vec<usize>] {
        &self.counts
    }

    pub fn count(&self, truth: C, predicted: C) -> usize {
        match (self.index(truth), self.index(predicted)) {
            (Some(t), Some(p)) => self.counts[t][p],
            _ => 0,
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Sum of the diagonal
    pub fn correct(&self) -> usize {
        (0..self.labels.len()).map(|i| self.counts[i][i]).sum()
    }

    /// Number of observations whose true class is `class`
    pub fn support(&self, class: C) -> usize {
        self.index(class)
            .map(|i| self.counts[i].iter().sum())
            .unwrap_or(0)
    }

    /// Number of observations predicted as `class`
    pub fn predicted(&self, class: C) -> usize {
        self.index(class)
            .map(|j| self.counts.iter().map(|row| row[j]).sum())
            .unwrap_or(0)
    }

    pub fn accuracy(&self) -> Score {
        ratio(self.correct(), self.total())
    }

    /// One-vs-rest precision, recall and F1 for `class`
    pub fn class_metrics(&self, class: C) -> ClassMetrics<C> {
        let tp = self.count(class, class);
        let precision = ratio(tp, self.predicted(class));
        let recall = ratio(tp, self.support(class));
        ClassMetrics {
            label: class,
            precision,
            recall,
            f1: f1_score(precision, recall),
            support: self.support(class),
        }
    }

    /// Metrics for every class, in label order
    pub fn per_class(&self) -> Vec<ClassMetrics<C>> {
        self.labels.iter().map(|c| self.class_metrics(*c)).collect()
    }
}

/// Per-class row of a classification report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetrics<C> {
    pub label: C,
    pub precision: Score,
    pub recall: Score,
    pub f1: Score,
    /// Number of documents whose true class is `label`
    pub support: usize,
}

/// Averaged precision / recall / F1
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Averages {
    pub precision: Score,
    pub recall: Score,
    pub f1: Score,
}

impl Averages {
    /// Unweighted mean over classes where the metric is defined
    pub fn macro_average<C>(rows: &[ClassMetrics<C>]) -> Self {
        let mean = |pick: fn(&ClassMetrics<C>) -> Score| {
            let values: Vec<f64> = rows.iter().filter_map(pick).collect();
            if values.is_empty() {
                None
            } else {
                Some(values.iter().sum::<f64>() / values.len() as f64)
            }
        };
        Self {
            precision: mean(|r| r.precision),
            recall: mean(|r| r.recall),
            f1: mean(|r| r.f1),
        }
    }

    /// Support-weighted mean over classes where the metric is defined
    pub fn weighted_average<C>(rows: &[ClassMetrics<C>]) -> Self {
        let mean = |pick: fn(&ClassMetrics<C>) -> Score| {
            let (sum, weight) = rows
                .iter()
                .filter_map(|r| pick(r).map(|v| (v, r.support)))
                .fold((0.0, 0usize), |(sum, weight), (v, support)| {
                    (sum + v * support as f64, weight + support)
                });
            if weight == 0 {
                None
            } else {
                Some(sum / weight as f64)
            }
        };
        Self {
            precision: mean(|r| r.precision),
            recall: mean(|r| r.recall),
            f1: mean(|r| r.f1),
        }
    }
}

/// Aligned (true, predicted) label pairs plus what had to be skipped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelPairs {
    pub pairs: Vec<(Label, Label)>,
    /// Documents without a ground-truth label
    pub unlabeled: usize,
    /// Labeled documents without a prediction
    pub unpredicted: usize,
}

/// Collect the pairs of documents that carry both labels
pub fn collect_label_pairs(docs: &[Document]) -> LabelPairs {
    let mut out = LabelPairs::default();
    for doc in docs {
        match (doc.true_label, doc.predicted_label) {
            (None, _) => out.unlabeled += 1,
            (Some(_), None) => out.unpredicted += 1,
            (Some(t), Some(p)) => out.pairs.push((t, p)),
        }
    }
    out
}

/// Multi-class classification report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MulticlassReport {
    /// True when no document could be evaluated; every metric is then `None`
    pub no_data: bool,
    /// Number of documents with both a true and a predicted label
    pub evaluated: usize,
    pub unlabeled_skipped: usize,
    pub unpredicted_skipped: usize,
    pub accuracy: Score,
    /// One row per observed label, in label order
    pub per_label: Vec<ClassMetrics<Label>>,
    pub macro_avg: Averages,
    pub weighted_avg: Averages,
    pub confusion: ConfusionMatrix<Label>,
}

impl MulticlassReport {
    pub fn from_documents(docs: &[Document]) -> Self {
        Self::from_pairs(collect_label_pairs(docs))
    }

    /// Build the report over the labels that occur as truth or prediction
    pub fn from_pairs(pairs: LabelPairs) -> Self {
        let observed: Vec<Label> = Label::ALL
            .into_iter()
            .filter(|l| pairs.pairs.iter().any(|(t, p)| t == l || p == l))
            .collect();

        let mut confusion = ConfusionMatrix::new(observed);
        for (t, p) in &pairs.pairs {
            confusion.record(*t, *p);
        }

        let per_label = confusion.per_class();
        Self {
            no_data: pairs.pairs.is_empty(),
            evaluated: pairs.pairs.len(),
            unlabeled_skipped: pairs.unlabeled,
            unpredicted_skipped: pairs.unpredicted,
            accuracy: confusion.accuracy(),
            macro_avg: Averages::macro_average(&per_label),
            weighted_avg: Averages::weighted_average(&per_label),
            per_label,
            confusion,
        }
    }
}

/// Binary relevance report; the positive class is [`Relevance::Relevant`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryRelevanceReport {
    pub no_data: bool,
    /// Pairs where both labels map to a relevance class
    pub evaluated: usize,
    /// Labeled, predicted documents where either label is a non-answer
    pub excluded: usize,
    pub unlabeled_skipped: usize,
    pub unpredicted_skipped: usize,
    pub precision: Score,
    pub recall: Score,
    pub f1: Score,
    pub accuracy: Score,
    /// Rows for relevant and irrelevant
    pub per_class: Vec<ClassMetrics<Relevance>>,
    pub confusion: ConfusionMatrix<Relevance>,
}

impl BinaryRelevanceReport {
    pub fn from_documents(docs: &[Document]) -> Self {
        Self::from_pairs(collect_label_pairs(docs))
    }

    pub fn from_pairs(pairs: LabelPairs) -> Self {
        let mut confusion = ConfusionMatrix::new(Relevance::ALL.to_vec());
        let mut excluded = 0;
        for (t, p) in &pairs.pairs {
            match (Relevance::of(*t), Relevance::of(*p)) {
                (Some(t), Some(p)) => confusion.record(t, p),
                _ => excluded += 1,
            }
        }

        let relevant = confusion.class_metrics(Relevance::Relevant);
        let evaluated = confusion.total();
        Self {
            no_data: evaluated == 0,
            evaluated,
            excluded,
            unlabeled_skipped: pairs.unlabeled,
            unpredicted_skipped: pairs.unpredicted,
            precision: relevant.precision,
            recall: relevant.recall,
            f1: relevant.f1,
            accuracy: confusion.accuracy(),
            per_class: confusion.per_class(),
            confusion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, truth: Option<Label>, predicted: Option<Label>) -> Document {
        let mut doc = Document::new(id);
        doc.true_label = truth;
        if let Some(label) = predicted {
            doc.finish(label);
        }
        doc
    }

    fn approx(score: Score, expected: f64) -> bool {
        score.is_some_and(|v| (v - expected).abs() < 1e-9)
    }

    // ==================== Primitives ====================

    #[test]
    fn test_ratio_zero_denominator_is_undefined() {
        assert_eq!(ratio(0, 0), None);
        assert_eq!(ratio(1, 4), Some(0.25));
    }

    #[test]
    fn test_f1_conventions() {
        assert_eq!(f1_score(None, Some(1.0)), None);
        assert_eq!(f1_score(Some(0.0), Some(0.0)), Some(0.0));
        assert!(approx(f1_score(Some(0.5), Some(1.0)), 2.0 / 3.0));
    }

    #[test]
    fn test_confusion_matrix_counts() {
        let mut m = ConfusionMatrix::new(vec!['a', 'b']);
        m.record('a', 'a');
        m.record('a', 'b');
        m.record('b', 'b');
        m.record('z', 'a');

        assert_eq!(m.total(), 3);
        assert_eq!(m.correct(), 2);
        assert_eq!(m.support('a'), 2);
        assert_eq!(m.predicted('b'), 2);
        let expected: Vec<Vec<usize>> = vec![vec![1, 1], vec![0, 1]];
        assert_eq!(m.rows(), expected.as_slice());
    }

    // ==================== Multi-class ====================

    #[test]
    fn test_multiclass_perfect_predictions() {
        let docs = vec![
            doc("1", Some(Label::Positive), Some(Label::Positive)),
            doc("2", Some(Label::Irrelevant), Some(Label::Irrelevant)),
        ];
        let report = MulticlassReport::from_documents(&docs);

        assert!(!report.no_data);
        assert_eq!(report.evaluated, 2);
        assert_eq!(report.accuracy, Some(1.0));
        assert_eq!(
            report.confusion.labels(),
            &[Label::Positive, Label::Irrelevant]
        );
        for row in &report.per_label {
            assert_eq!(row.precision, Some(1.0));
            assert_eq!(row.recall, Some(1.0));
            assert_eq!(row.f1, Some(1.0));
            assert_eq!(row.support, 1);
        }
    }

    #[test]
    fn test_multiclass_observed_labels_in_enum_order() {
        let docs = vec![
            doc("1", Some(Label::Irrelevant), Some(Label::TooShort)),
            doc("2", Some(Label::Positive), Some(Label::Negative)),
        ];
        let report = MulticlassReport::from_documents(&docs);
        assert_eq!(
            report.confusion.labels(),
            &[
                Label::Positive,
                Label::Negative,
                Label::Irrelevant,
                Label::TooShort
            ]
        );
        assert_eq!(report.accuracy, Some(0.0));
    }

    #[test]
    fn test_multiclass_undefined_per_label_ratios() {
        // NEGATIVE is never predicted (precision undefined) and
        // ERROR is never true (recall undefined)
        let docs = vec![
            doc("1", Some(Label::Negative), Some(Label::Error)),
            doc("2", Some(Label::Positive), Some(Label::Positive)),
        ];
        let report = MulticlassReport::from_documents(&docs);
        let row = |l: Label| report.per_label.iter().find(|r| r.label == l).unwrap();

        assert_eq!(row(Label::Negative).precision, None);
        assert_eq!(row(Label::Negative).recall, Some(0.0));
        assert_eq!(row(Label::Negative).f1, None);
        assert_eq!(row(Label::Error).recall, None);
        assert_eq!(row(Label::Error).precision, Some(0.0));
        assert_eq!(row(Label::Error).support, 0);

        // Macro precision averages POSITIVE (1.0) and ERROR (0.0)
        assert!(approx(report.macro_avg.precision, 0.5));
        // Weighted recall: POSITIVE 1.0 * 1 + NEGATIVE 0.0 * 1
        assert!(approx(report.weighted_avg.recall, 0.5));
    }

    #[test]
    fn test_multiclass_skipped_counts() {
        let docs = vec![
            doc("1", None, Some(Label::Positive)),
            doc("2", None, None),
            doc("3", Some(Label::Positive), None),
            doc("4", Some(Label::Positive), Some(Label::Positive)),
        ];
        let report = MulticlassReport::from_documents(&docs);
        assert_eq!(report.unlabeled_skipped, 2);
        assert_eq!(report.unpredicted_skipped, 1);
        assert_eq!(report.evaluated, 1);
    }

    #[test]
    fn test_multiclass_no_data() {
        let report = MulticlassReport::from_documents(&[]);
        assert!(report.no_data);
        assert_eq!(report.evaluated, 0);
        assert_eq!(report.accuracy, None);
        assert!(report.per_label.is_empty());
        assert_eq!(report.macro_avg, Averages::default());
        assert_eq!(report.weighted_avg, Averages::default());

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["accuracy"].is_null());
        assert_eq!(json["no_data"], true);
    }

    // ==================== Binary relevance ====================

    #[test]
    fn test_binary_collapses_answers() {
        let docs = vec![
            doc("1", Some(Label::Positive), Some(Label::Negative)),
            doc("2", Some(Label::Neutral), Some(Label::Irrelevant)),
            doc("3", Some(Label::Irrelevant), Some(Label::Irrelevant)),
            doc("4", Some(Label::Irrelevant), Some(Label::Positive)),
        ];
        let report = BinaryRelevanceReport::from_documents(&docs);

        assert_eq!(report.evaluated, 4);
        assert_eq!(report.confusion.count(Relevance::Relevant, Relevance::Relevant), 1);
        assert_eq!(report.confusion.count(Relevance::Relevant, Relevance::Irrelevant), 1);
        assert_eq!(report.confusion.count(Relevance::Irrelevant, Relevance::Relevant), 1);
        assert_eq!(report.confusion.count(Relevance::Irrelevant, Relevance::Irrelevant), 1);
        assert_eq!(report.precision, Some(0.5));
        assert_eq!(report.recall, Some(0.5));
        assert_eq!(report.f1, Some(0.5));
        assert_eq!(report.accuracy, Some(0.5));
        assert_eq!(report.per_class.len(), 2);
    }

    #[test]
    fn test_binary_excludes_non_answers() {
        let base = vec![
            doc("1", Some(Label::Positive), Some(Label::Positive)),
            doc("2", Some(Label::Irrelevant), Some(Label::Positive)),
        ];
        let mut with_noise = base.clone();
        with_noise.push(doc("3", Some(Label::Positive), Some(Label::Error)));
        with_noise.push(doc("4", Some(Label::Uncertain), Some(Label::Irrelevant)));
        with_noise.push(doc("5", Some(Label::Irrelevant), Some(Label::TooShort)));

        let clean = BinaryRelevanceReport::from_documents(&base);
        let noisy = BinaryRelevanceReport::from_documents(&with_noise);

        assert_eq!(noisy.excluded, 3);
        assert_eq!(noisy.evaluated, clean.evaluated);
        assert_eq!(noisy.precision, clean.precision);
        assert_eq!(noisy.recall, clean.recall);
        assert_eq!(noisy.f1, clean.f1);
        assert_eq!(noisy.confusion, clean.confusion);
    }

    #[test]
    fn test_binary_all_excluded_is_no_data() {
        let docs = vec![
            doc("1", Some(Label::Error), Some(Label::Positive)),
            doc("2", Some(Label::Positive), Some(Label::Uncertain)),
        ];
        let report = BinaryRelevanceReport::from_documents(&docs);
        assert!(report.no_data);
        assert_eq!(report.excluded, 2);
        assert_eq!(report.precision, None);
        assert_eq!(report.recall, None);
        assert_eq!(report.f1, None);
        assert_eq!(report.accuracy, None);
    }

    #[test]
    fn test_binary_never_predicted_relevant() {
        let docs = vec![doc("1", Some(Label::Positive), Some(Label::Irrelevant))];
        let report = BinaryRelevanceReport::from_documents(&docs);
        assert_eq!(report.precision, None);
        assert_eq!(report.recall, Some(0.0));
        assert_eq!(report.f1, None);
    }
}
