use std::collections::HashMap;
use std::error::Error;
use std::fmt::{self, Display, Formatter};

/// Per-label classification accuracy plus the overall accuracy. The overall
/// value is held apart from the per-label map so a real label named "Overall"
/// cannot collide with it.
#[derive(Debug, Clone)]
pub struct AccuracyReport {
    overall: f64,
    per_label: HashMap<String, f64>,
}

impl AccuracyReport {
    /// The fraction of all samples that were classified correctly.
    pub fn overall(&self) -> f64 {
        self.overall
    }

    /// The accuracy for one label, or `None` if the label was never predicted
    /// correctly.
    pub fn label(&self, label: &str) -> Option<f64> {
        self.per_label.get(label).copied()
    }

    pub fn per_label(&self) -> &HashMap<String, f64> {
        &self.per_label
    }
}

impl Display for AccuracyReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut labels = self.per_label.iter().collect::<Vec<_>>();
        labels.sort_by(|a, b| a.0.cmp(b.0));
        for (label, accuracy) in labels {
            writeln!(f, "{}: {:.2}%", label, accuracy * 100.0)?;
        }
        write!(f, "Overall: {:.2}%", self.overall * 100.0)
    }
}

pub trait ClassificationMetrics {
    /// Computes per-label accuracy from expected and predicted labels.
    ///
    /// Totals are counted per expected label; a prediction is correct when it
    /// matches the expected label at the same index. Labels that were never
    /// predicted correctly are left out of the report rather than reported as
    /// zero.
    ///
    /// # Arguments
    ///
    /// * `y_true` - The expected labels.
    /// * `y_pred` - The predicted labels.
    ///
    /// # Returns
    ///
    /// The accuracies as a `Result` containing an `AccuracyReport` or an error
    /// message if the slices differ in length.
    fn accuracy_by_label(
        &self,
        y_true: &[String],
        y_pred: &[String],
    ) -> Result<AccuracyReport, Box<dyn Error>> {
        if y_true.len() != y_pred.len() {
            return Err("Predictions and labels are of different sizes.".into());
        }

        let mut label_totals: HashMap<&str, usize> = HashMap::new();
        let mut label_correct: HashMap<&str, usize> = HashMap::new();
        let mut overall_total = 0usize;
        let mut overall_correct = 0usize;

        for (expected, predicted) in y_true.iter().zip(y_pred) {
            *label_totals.entry(expected.as_str()).or_insert(0) += 1;
            overall_total += 1;
            if expected == predicted {
                *label_correct.entry(predicted.as_str()).or_insert(0) += 1;
                overall_correct += 1;
            }
        }

        let per_label = label_correct
            .into_iter()
            .map(|(label, correct)| {
                (
                    label.to_string(),
                    correct as f64 / label_totals[label] as f64,
                )
            })
            .collect();

        Ok(AccuracyReport {
            overall: overall_correct as f64 / overall_total as f64,
            per_label,
        })
    }
}
