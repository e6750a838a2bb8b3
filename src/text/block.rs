use num_traits::{Float, FromPrimitive, ToPrimitive};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Debug, Display};

use crate::text::tokenize;

pub trait FeatureValue:
    Debug + Clone + Copy + Float + FromPrimitive + ToPrimitive + Send + Sync + Display + 'static
{
}

impl<T> FeatureValue for T where
    T: Debug + Clone + Copy + Float + FromPrimitive + ToPrimitive + Send + Sync + Display + 'static
{
}

/// An immutable mapping from feature names to numeric values, describing one
/// text sample. Features are kept sorted by name so that queries over them
/// behave deterministically.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock<T: FeatureValue> {
    features: BTreeMap<String, T>,
}

impl<T: FeatureValue> TextBlock<T> {
    /// Builds a block from (name, value) pairs. Later duplicates of a name
    /// overwrite earlier ones.
    pub fn from_features<S, I>(pairs: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, T)>,
    {
        Self {
            features: pairs
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }

    /// Builds a block from raw text. Every distinct token becomes a feature
    /// whose value is the token's relative frequency within the text.
    pub fn from_text(text: &str) -> Result<Self, Box<dyn Error>> {
        let tokens = tokenize::tokens(text);
        let total = T::from_usize(tokens.len()).ok_or("Couldn't transform from usize")?;
        let features = tokenize::counts(&tokens)
            .into_iter()
            .map(|(token, count)| -> Result<(String, T), Box<dyn Error>> {
                let count = T::from_usize(count).ok_or("Couldn't transform from usize")?;
                Ok((token, count / total))
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { features })
    }

    /// Looks up a feature by name.
    ///
    /// # Returns
    ///
    /// The feature's value, or an error if no feature with that name exists.
    pub fn get(&self, name: &str) -> Result<T, Box<dyn Error>> {
        self.features
            .get(name)
            .copied()
            .ok_or_else(|| format!("No feature named '{}'.", name).into())
    }

    /// Finds the feature on which this block and `other` disagree the most.
    ///
    /// # Returns
    ///
    /// The name of the feature with the largest absolute value gap among
    /// features present in both blocks, or an error if the blocks share no
    /// features. Ties resolve to the alphabetically first name.
    pub fn largest_difference(&self, other: &Self) -> Result<String, Box<dyn Error>> {
        let mut best: Option<(&str, T)> = None;
        for (name, value) in &self.features {
            if let Some(other_value) = other.features.get(name) {
                let difference = (*value - *other_value).abs();
                let improves = match best {
                    Some((_, best_difference)) => difference > best_difference,
                    None => true,
                };
                if improves {
                    best = Some((name, difference));
                }
            }
        }
        best.map(|(name, _)| name.to_string())
            .ok_or_else(|| "The blocks share no features.".into())
    }

    pub fn features(&self) -> impl Iterator<Item = (&str, T)> + '_ {
        self.features
            .iter()
            .map(|(name, value)| (name.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_from_features_get() {
        let block = TextBlock::from_features([("word_count", 10.0), ("link_count", 0.0)]);
        assert_relative_eq!(block.get("word_count").unwrap(), 10.0);
        assert_relative_eq!(block.get("link_count").unwrap(), 0.0);
    }

    #[test]
    fn test_get_missing_feature() {
        let block = TextBlock::from_features([("word_count", 10.0)]);
        assert!(block.get("link_count").is_err());
    }

    #[test]
    fn test_largest_difference() {
        let ham = TextBlock::from_features([("word_count", 10.0), ("link_count", 0.0)]);
        let spam = TextBlock::from_features([("word_count", 2.0), ("link_count", 5.0)]);
        assert_eq!(ham.largest_difference(&spam).unwrap(), "word_count");
    }

    #[test]
    fn test_largest_difference_tie_prefers_first_name() {
        let first = TextBlock::from_features([("alpha", 0.0), ("beta", 2.0)]);
        let second = TextBlock::from_features([("alpha", 2.0), ("beta", 0.0)]);
        assert_eq!(first.largest_difference(&second).unwrap(), "alpha");
    }

    #[test]
    fn test_largest_difference_disjoint_features() {
        let first = TextBlock::from_features([("alpha", 1.0)]);
        let second = TextBlock::from_features([("beta", 1.0)]);
        assert!(first.largest_difference(&second).is_err());
    }

    #[test]
    fn test_from_text_frequencies() {
        let block: TextBlock<f64> = TextBlock::from_text("free free money").unwrap();
        assert_eq!(block.len(), 2);
        assert_relative_eq!(block.get("free").unwrap(), 2.0 / 3.0);
        assert_relative_eq!(block.get("money").unwrap(), 1.0 / 3.0);
    }

    #[test]
    fn test_from_text_empty() {
        let block: TextBlock<f64> = TextBlock::from_text("").unwrap();
        assert!(block.is_empty());
    }

    #[test]
    fn test_features_iterate_in_name_order() {
        let block = TextBlock::from_features([("zeta", 1.0), ("alpha", 2.0)]);
        let names = block.features().map(|(name, _)| name).collect::<Vec<_>>();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }
}
