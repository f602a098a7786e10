//! Evaluation metrics for the held-out split
//!
//! Undefined ratios (no predicted or no actual members of a class) count
//! as 0.0.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Rows are actual classes, columns predicted classes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub counts: Vec<Vec<usize>>,
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn harmonic(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

impl ConfusionMatrix {
    pub fn from_predictions(actual: &[usize], predicted: &[usize], n_classes: usize) -> Self {
        let mut counts = vec![vec![0; n_classes]; n_classes];
        for (&a, &p) in actual.iter().zip(predicted.iter()) {
            if a < n_classes && p < n_classes {
                counts[a][p] += 1;
            }
        }
        Self { counts }
    }

    pub fn n_classes(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    pub fn accuracy(&self) -> f64 {
        let correct: usize = (0..self.n_classes()).map(|c| self.counts[c][c]).sum();
        ratio(correct, self.total())
    }

    /// Actual members of `class`
    pub fn support(&self, class: usize) -> usize {
        self.counts[class].iter().sum()
    }

    pub fn precision(&self, class: usize) -> f64 {
        let predicted: usize = self.counts.iter().map(|row| row[class]).sum();
        ratio(self.counts[class][class], predicted)
    }

    pub fn recall(&self, class: usize) -> f64 {
        ratio(self.counts[class][class], self.support(class))
    }

    pub fn f1(&self, class: usize) -> f64 {
        harmonic(self.precision(class), self.recall(class))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub class: usize,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AverageMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Per-class precision/recall/F1 with macro and weighted averages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub macro_avg: AverageMetrics,
    pub weighted_avg: AverageMetrics,
}

impl ClassificationReport {
    pub fn from_confusion(matrix: &ConfusionMatrix) -> Self {
        let classes: Vec<ClassMetrics> = (0..matrix.n_classes())
            .map(|c| ClassMetrics {
                class: c,
                precision: matrix.precision(c),
                recall: matrix.recall(c),
                f1: matrix.f1(c),
                support: matrix.support(c),
            })
            .collect();

        let total = matrix.total();
        let n = classes.len().max(1) as f64;
        let macro_avg = AverageMetrics {
            precision: classes.iter().map(|c| c.precision).sum::<f64>() / n,
            recall: classes.iter().map(|c| c.recall).sum::<f64>() / n,
            f1: classes.iter().map(|c| c.f1).sum::<f64>() / n,
            support: total,
        };

        let weight = |value: fn(&ClassMetrics) -> f64| {
            if total == 0 {
                0.0
            } else {
                classes.iter().map(|c| value(c) * c.support as f64).sum::<f64>() / total as f64
            }
        };
        let weighted_avg = AverageMetrics {
            precision: weight(|c| c.precision),
            recall: weight(|c| c.recall),
            f1: weight(|c| c.f1),
            support: total,
        };

        Self {
            accuracy: matrix.accuracy(),
            classes,
            macro_avg,
            weighted_avg,
        }
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:>14} {:>10} {:>10} {:>10} {:>10}", "", "precision", "recall", "f1-score", "support")?;
        writeln!(f)?;
        for c in &self.classes {
            writeln!(
                f,
                "{:>14} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                c.class, c.precision, c.recall, c.f1, c.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>14} {:>10} {:>10} {:>10.2} {:>10}",
            "accuracy", "", "", self.accuracy, self.macro_avg.support
        )?;
        for (name, avg) in [("macro avg", &self.macro_avg), ("weighted avg", &self.weighted_avg)] {
            writeln!(
                f,
                "{:>14} {:>10.2} {:>10.2} {:>10.2} {:>10}",
                name, avg.precision, avg.recall, avg.f1, avg.support
            )?;
        }
        Ok(())
    }
}

/// Everything the trainer prints after fitting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub accuracy: f64,
    /// F1 of the fire class
    pub f1: f64,
    pub confusion_matrix: ConfusionMatrix,
    pub classification: ClassificationReport,
    /// Label counts over the whole dataset
    pub label_counts: BTreeMap<usize, usize>,
    pub median_area: f64,
    pub n_train: usize,
    pub n_test: usize,
}

impl EvaluationReport {
    pub fn new(
        actual: &[usize],
        predicted: &[usize],
        all_labels: &[usize],
        median_area: f64,
        n_train: usize,
    ) -> Self {
        let matrix = ConfusionMatrix::from_predictions(actual, predicted, 2);
        let classification = ClassificationReport::from_confusion(&matrix);

        let mut label_counts = BTreeMap::new();
        for &label in all_labels {
            *label_counts.entry(label).or_insert(0) += 1;
        }

        Self {
            accuracy: matrix.accuracy(),
            f1: matrix.f1(super::labels::FIRE),
            confusion_matrix: matrix,
            classification,
            label_counts,
            median_area,
            n_train,
            n_test: actual.len(),
        }
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Accuracy: {}", self.accuracy)?;
        writeln!(f, "Classification Report:")?;
        writeln!(f, "{}", self.classification)?;
        writeln!(f, "F1 Score: {}", self.f1)?;
        writeln!(f, "Label counts (median area {}):", self.median_area)?;
        for (label, count) in &self.label_counts {
            writeln!(f, "  {}: {}", label, count)?;
        }
        writeln!(f, "Confusion Matrix (rows actual, columns predicted):")?;
        for row in &self.confusion_matrix.counts {
            let cells: Vec<String> = row.iter().map(|c| format!("{:>5}", c)).collect();
            writeln!(f, "  {}", cells.join(""))?;
        }
        write!(f, "Train/test: {}/{}", self.n_train, self.n_test)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confusion_and_scores() {
        let actual = [0, 0, 0, 1, 1, 1, 1, 0];
        let predicted = [0, 1, 0, 1, 1, 0, 1, 0];
        let m = ConfusionMatrix::from_predictions(&actual, &predicted, 2);

        assert_eq!(m.counts, vec![vec![3, 1], vec![1, 3]]);
        assert_eq!(m.total(), 8);
        assert_eq!(m.accuracy(), 0.75);
        assert_eq!(m.precision(1), 0.75);
        assert_eq!(m.recall(1), 0.75);
        assert!((m.f1(1) - 0.75).abs() < 1e-12);
        assert_eq!(m.support(0), 4);
    }

    #[test]
    fn test_zero_division_is_zero() {
        let m = ConfusionMatrix::from_predictions(&[0, 0], &[0, 0], 2);
        assert_eq!(m.precision(1), 0.0);
        assert_eq!(m.recall(1), 0.0);
        assert_eq!(m.f1(1), 0.0);
        assert_eq!(m.accuracy(), 1.0);
    }

    #[test]
    fn test_report_averages() {
        let actual = [0, 0, 0, 0, 1, 1];
        let predicted = [0, 0, 0, 1, 1, 1];
        let m = ConfusionMatrix::from_predictions(&actual, &predicted, 2);
        let report = ClassificationReport::from_confusion(&m);

        // class 0: p=1, r=0.75 ; class 1: p=2/3, r=1
        assert_eq!(report.classes[0].precision, 1.0);
        assert_eq!(report.classes[0].recall, 0.75);
        assert!((report.classes[1].precision - 2.0 / 3.0).abs() < 1e-12);
        assert!((report.macro_avg.recall - 0.875).abs() < 1e-12);

        let expected_weighted = (report.classes[0].f1 * 4.0 + report.classes[1].f1 * 2.0) / 6.0;
        assert!((report.weighted_avg.f1 - expected_weighted).abs() < 1e-12);
        assert_eq!(report.weighted_avg.support, 6);
    }

    #[test]
    fn test_evaluation_report() {
        let report = EvaluationReport::new(&[0, 1, 1], &[0, 1, 0], &[0, 0, 1, 1, 1], 1.5, 2);

        assert!((report.accuracy - 2.0 / 3.0).abs() < 1e-12);
        assert!((report.f1 - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(report.label_counts[&0], 2);
        assert_eq!(report.label_counts[&1], 3);
        assert_eq!(report.n_test, 3);

        let text = report.to_string();
        assert!(text.contains("Accuracy:"));
        assert!(text.contains("F1 Score:"));
        assert!(text.contains("weighted avg"));
    }
}
