use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};
use std::collections::BTreeSet;
use std::error::Error;

use crate::text::block::{FeatureValue, TextBlock};
use crate::text::tokenize;

/// A labeled collection of text samples: one feature block per sample and the
/// expected label at the same index.
#[derive(Debug, Clone)]
pub struct Corpus<T: FeatureValue> {
    blocks: Vec<TextBlock<T>>,
    labels: Vec<String>,
}

impl<T: FeatureValue> Corpus<T> {
    pub fn new(blocks: Vec<TextBlock<T>>, labels: Vec<String>) -> Result<Self, Box<dyn Error>> {
        if blocks.len() != labels.len() {
            return Err("Blocks and labels are of different sizes.".into());
        }
        Ok(Self { blocks, labels })
    }

    /// Builds a corpus from (text, label) pairs. Blocks are built over the
    /// union vocabulary of the whole corpus, with words absent from a sample
    /// held at zero, so any two blocks share their full feature set.
    pub fn from_labeled_text(samples: &[(String, String)]) -> Result<Self, Box<dyn Error>> {
        let token_lists = samples
            .iter()
            .map(|(text, _)| tokenize::tokens(text))
            .collect::<Vec<_>>();
        let vocabulary = token_lists
            .iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>();

        let mut blocks = Vec::with_capacity(samples.len());
        for tokens in &token_lists {
            blocks.push(Self::frequency_block(tokens, &vocabulary)?);
        }
        let labels = samples.iter().map(|(_, label)| label.clone()).collect();
        Ok(Self { blocks, labels })
    }

    fn frequency_block(
        tokens: &[String],
        vocabulary: &BTreeSet<String>,
    ) -> Result<TextBlock<T>, Box<dyn Error>> {
        let total = T::from_usize(tokens.len()).ok_or("Couldn't transform from usize")?;
        let counts = tokenize::counts(tokens);
        let mut features = Vec::with_capacity(vocabulary.len());
        for word in vocabulary {
            let value = match counts.get(word) {
                Some(&count) => T::from_usize(count).ok_or("Couldn't transform from usize")? / total,
                None => T::zero(),
            };
            features.push((word.clone(), value));
        }
        Ok(TextBlock::from_features(features))
    }

    pub fn train_test_split(
        &self,
        train_size: f64,
        seed: Option<u64>,
    ) -> Result<(Self, Self), Box<dyn Error>> {
        if !(0.0..=1.0).contains(&train_size) {
            return Err("Train size should be between 0.0 and 1.0".into());
        }
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut indices = (0..self.blocks.len()).collect::<Vec<_>>();
        indices.shuffle(&mut rng);
        let train_size = (self.blocks.len() as f64 * train_size).floor() as usize;
        let (train_indices, test_indices) = indices.split_at(train_size);

        Ok((self.subset(train_indices), self.subset(test_indices)))
    }

    fn subset(&self, indices: &[usize]) -> Self {
        let blocks = indices
            .iter()
            .map(|&index| self.blocks[index].clone())
            .collect();
        let labels = indices
            .iter()
            .map(|&index| self.labels[index].clone())
            .collect();
        Self { blocks, labels }
    }

    pub fn blocks(&self) -> &[TextBlock<T>] {
        &self.blocks
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn samples() -> Vec<(String, String)> {
        vec![
            ("free money now".to_string(), "Spam".to_string()),
            ("meeting at noon".to_string(), "Ham".to_string()),
            ("free prize claim now".to_string(), "Spam".to_string()),
            ("lunch at noon again".to_string(), "Ham".to_string()),
        ]
    }

    #[test]
    fn test_new_mismatched_lengths() {
        let blocks = vec![TextBlock::from_features([("free", 1.0)])];
        let result = Corpus::new(blocks, Vec::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_from_labeled_text_shares_vocabulary() {
        let corpus: Corpus<f64> = Corpus::from_labeled_text(&samples()[..2]).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.labels(), &["Spam".to_string(), "Ham".to_string()]);

        // Both blocks carry the six-word union vocabulary.
        for block in corpus.blocks() {
            assert_eq!(block.len(), 6);
        }
        let spam = &corpus.blocks()[0];
        assert_relative_eq!(spam.get("free").unwrap(), 1.0 / 3.0);
        assert_relative_eq!(spam.get("meeting").unwrap(), 0.0);
    }

    #[test]
    fn test_from_labeled_text_frequencies_sum_to_one() {
        let corpus: Corpus<f64> = Corpus::from_labeled_text(&samples()).unwrap();
        for block in corpus.blocks() {
            let sum: f64 = block.features().map(|(_, value)| value).sum();
            assert_relative_eq!(sum, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_train_test_split() {
        let corpus: Corpus<f64> = Corpus::from_labeled_text(&samples()).unwrap();
        let (train, test) = corpus.train_test_split(0.75, Some(42)).unwrap();
        assert_eq!(train.len(), 3);
        assert_eq!(test.len(), 1);
    }

    #[test]
    fn test_train_test_split_invalid_train_size() {
        let corpus: Corpus<f64> = Corpus::from_labeled_text(&samples()).unwrap();
        assert!(corpus.train_test_split(1.5, None).is_err());
    }
}
