use crate::text::block::{FeatureValue, TextBlock};

/// Decision tree node: either an inner split on one feature or a labeled leaf.
/// A leaf built during training keeps the sample that produced it so a later
/// conflicting insertion can split on it; parsed leaves carry no sample.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierNode<T: FeatureValue> {
    Decision {
        feature: String,
        threshold: T,
        left: Box<ClassifierNode<T>>,
        right: Box<ClassifierNode<T>>,
    },
    Leaf {
        label: String,
        sample: Option<TextBlock<T>>,
    },
}

impl<T: FeatureValue> ClassifierNode<T> {
    pub fn decision(
        feature: String,
        threshold: T,
        left: ClassifierNode<T>,
        right: ClassifierNode<T>,
    ) -> Self {
        Self::Decision {
            feature,
            threshold,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn leaf(label: String) -> Self {
        Self::Leaf {
            label,
            sample: None,
        }
    }

    pub fn leaf_with_sample(label: String, sample: TextBlock<T>) -> Self {
        Self::Leaf {
            label,
            sample: Some(sample),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Leaf { label, .. } => Some(label),
            Self::Decision { .. } => None,
        }
    }

    pub fn feature(&self) -> Option<&str> {
        match self {
            Self::Decision { feature, .. } => Some(feature),
            Self::Leaf { .. } => None,
        }
    }

    pub fn threshold(&self) -> Option<T> {
        match self {
            Self::Decision { threshold, .. } => Some(*threshold),
            Self::Leaf { .. } => None,
        }
    }

    pub fn left(&self) -> Option<&ClassifierNode<T>> {
        match self {
            Self::Decision { left, .. } => Some(left),
            Self::Leaf { .. } => None,
        }
    }

    pub fn right(&self) -> Option<&ClassifierNode<T>> {
        match self {
            Self::Decision { right, .. } => Some(right),
            Self::Leaf { .. } => None,
        }
    }

    pub fn sample(&self) -> Option<&TextBlock<T>> {
        match self {
            Self::Leaf { sample, .. } => sample.as_ref(),
            Self::Decision { .. } => None,
        }
    }
}
