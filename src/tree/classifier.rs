//! Decision Tree Text Classifier
use std::error::Error;
use std::io::{BufRead, Lines, Write};

use crate::metrics::accuracy::{AccuracyReport, ClassificationMetrics};
use crate::text::block::{FeatureValue, TextBlock};
use crate::tree::node::ClassifierNode;

const FEATURE_PREFIX: &str = "Feature: ";
const THRESHOLD_PREFIX: &str = "Threshold: ";

/// A binary decision tree over named text features. Built either by parsing a
/// serialized tree or by folding labeled training samples in one at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct Classifier<T: FeatureValue> {
    root: Box<ClassifierNode<T>>,
}

impl<T: FeatureValue> ClassificationMetrics for Classifier<T> {}

impl<T: FeatureValue> Classifier<T> {
    /// Reconstructs a classifier from its line-oriented serialized form.
    ///
    /// A decision node is a `Feature: <name>` line directly followed by a
    /// `Threshold: <value>` line and then its left and right subtrees in
    /// pre-order; any other line is a leaf holding that line as its label.
    ///
    /// # Returns
    ///
    /// The parsed classifier, or an error if the input is empty, a `Feature:`
    /// line is not followed by a well-formed `Threshold:` line, or the input
    /// ends before the tree is complete.
    pub fn from_reader<R: BufRead>(input: R) -> Result<Self, Box<dyn Error>> {
        let mut lines = input.lines();
        let root = Self::build_tree(&mut lines)?.ok_or("The classifier input is empty.")?;
        Ok(Self { root })
    }

    fn build_tree<R: BufRead>(
        lines: &mut Lines<R>,
    ) -> Result<Option<Box<ClassifierNode<T>>>, Box<dyn Error>> {
        let line = match lines.next() {
            Some(line) => line?,
            None => return Ok(None),
        };
        let line = line.trim();

        if let Some(feature) = line.strip_prefix(FEATURE_PREFIX) {
            let threshold_line = lines
                .next()
                .ok_or("A 'Feature:' line must be followed by a 'Threshold:' line.")??;
            let threshold = threshold_line
                .trim()
                .strip_prefix(THRESHOLD_PREFIX)
                .ok_or("A 'Feature:' line must be followed by a 'Threshold:' line.")?
                .parse::<f64>()?;
            let threshold = T::from_f64(threshold).ok_or("Couldn't transform from f64")?;
            let left = Self::build_tree(lines)?
                .ok_or("The classifier input ended before a left subtree was read.")?;
            let right = Self::build_tree(lines)?
                .ok_or("The classifier input ended before a right subtree was read.")?;
            Ok(Some(Box::new(ClassifierNode::Decision {
                feature: feature.to_string(),
                threshold,
                left,
                right,
            })))
        } else {
            Ok(Some(Box::new(ClassifierNode::leaf(line.to_string()))))
        }
    }

    /// Grows a classifier by inserting each (block, label) pair in order,
    /// starting from a single leaf for the first pair.
    ///
    /// # Returns
    ///
    /// The trained classifier, or an error if the lists differ in length or
    /// are empty.
    pub fn from_training(data: &[TextBlock<T>], labels: &[String]) -> Result<Self, Box<dyn Error>> {
        if data.len() != labels.len() {
            return Err(format!(
                "Length of provided data [{}] doesn't match provided labels [{}]",
                data.len(),
                labels.len()
            )
            .into());
        }
        if data.is_empty() {
            return Err("Training data must not be empty.".into());
        }

        let mut root = Box::new(ClassifierNode::leaf_with_sample(
            labels[0].clone(),
            data[0].clone(),
        ));
        for (block, label) in data.iter().zip(labels).skip(1) {
            root = Self::insert(root, block.clone(), label)?;
        }
        Ok(Self { root })
    }

    // Inserting a label a leaf already carries is a no-op: each leaf keeps at
    // most one splitting sample. A conflicting label splits the leaf on the
    // feature where the two samples differ most, at the exact midpoint, so both
    // samples route to leaves with their own labels.
    fn insert(
        node: Box<ClassifierNode<T>>,
        block: TextBlock<T>,
        label: &str,
    ) -> Result<Box<ClassifierNode<T>>, Box<dyn Error>> {
        match *node {
            ClassifierNode::Leaf {
                label: existing,
                sample,
            } => {
                if existing == label {
                    return Ok(Box::new(ClassifierNode::Leaf {
                        label: existing,
                        sample,
                    }));
                }
                let sample = sample.ok_or("Cannot split a leaf that holds no training sample.")?;
                let feature = sample.largest_difference(&block)?;
                let threshold = midpoint(sample.get(&feature)?, block.get(&feature)?);
                let splits_right = block.get(&feature)? >= threshold;

                let existing_leaf = ClassifierNode::Leaf {
                    label: existing,
                    sample: Some(sample),
                };
                let new_leaf = ClassifierNode::leaf_with_sample(label.to_string(), block);
                let (left, right) = if splits_right {
                    (existing_leaf, new_leaf)
                } else {
                    (new_leaf, existing_leaf)
                };
                Ok(Box::new(ClassifierNode::decision(
                    feature, threshold, left, right,
                )))
            }
            ClassifierNode::Decision {
                feature,
                threshold,
                left,
                right,
            } => {
                let (left, right) = if block.get(&feature)? >= threshold {
                    (left, Self::insert(right, block, label)?)
                } else {
                    (Self::insert(left, block, label)?, right)
                };
                Ok(Box::new(ClassifierNode::Decision {
                    feature,
                    threshold,
                    left,
                    right,
                }))
            }
        }
    }

    /// Labels a block by walking the tree from the root: below the threshold
    /// goes left, at or above it goes right.
    pub fn classify(&self, input: &TextBlock<T>) -> Result<String, Box<dyn Error>> {
        Self::classify_node(&self.root, input)
    }

    fn classify_node(
        node: &ClassifierNode<T>,
        input: &TextBlock<T>,
    ) -> Result<String, Box<dyn Error>> {
        match node {
            ClassifierNode::Leaf { label, .. } => Ok(label.clone()),
            ClassifierNode::Decision {
                feature,
                threshold,
                left,
                right,
            } => {
                if input.get(feature)? < *threshold {
                    Self::classify_node(left, input)
                } else {
                    Self::classify_node(right, input)
                }
            }
        }
    }

    /// Writes the tree in the pre-order text format accepted by
    /// [`Classifier::from_reader`]. Leaf samples are not written.
    pub fn save<W: Write>(&self, output: &mut W) -> Result<(), Box<dyn Error>> {
        Self::save_node(&self.root, output)
    }

    fn save_node<W: Write>(
        node: &ClassifierNode<T>,
        output: &mut W,
    ) -> Result<(), Box<dyn Error>> {
        match node {
            ClassifierNode::Leaf { label, .. } => writeln!(output, "{}", label)?,
            ClassifierNode::Decision {
                feature,
                threshold,
                left,
                right,
            } => {
                writeln!(output, "{}{}", FEATURE_PREFIX, feature)?;
                writeln!(output, "{}{}", THRESHOLD_PREFIX, threshold)?;
                Self::save_node(left, output)?;
                Self::save_node(right, output)?;
            }
        }
        Ok(())
    }

    /// Classifies every block and scores the predictions against the expected
    /// labels.
    ///
    /// # Returns
    ///
    /// An [`AccuracyReport`], or an error if the lists differ in length or a
    /// block is missing a feature the tree tests.
    pub fn evaluate(
        &self,
        data: &[TextBlock<T>],
        labels: &[String],
    ) -> Result<AccuracyReport, Box<dyn Error>> {
        if data.len() != labels.len() {
            return Err(format!(
                "Length of provided data [{}] doesn't match provided labels [{}]",
                data.len(),
                labels.len()
            )
            .into());
        }
        let predictions = data
            .iter()
            .map(|block| self.classify(block))
            .collect::<Result<Vec<_>, _>>()?;
        self.accuracy_by_label(labels, &predictions)
    }

    pub fn root(&self) -> &ClassifierNode<T> {
        &self.root
    }
}

fn midpoint<T: FeatureValue>(one: T, two: T) -> T {
    one.min(two) + (one - two).abs() / (T::one() + T::one())
}
