//! # Textree
//!
//! `textree` provides a binary decision-tree classifier for labeling text-derived
//! feature vectors, e.g. deciding whether a message is spam or ham. A tree can be
//! grown incrementally from labeled training samples or reloaded from its
//! line-oriented serialized form, and its decisions can be scored with per-label
//! accuracy metrics.
//!
//! ## Getting Started
//!
//! To use `textree`, add the following to your `Cargo.toml` file:
//!
//! ```toml
//! [dependencies]
//! textree = "*"
//! ```
//!
//! ## Example Usage
//!
//! As a quick example, here's how you can train a classifier on two hand-built
//! feature vectors and classify them:
//!
//! ```rust
//! use textree::text::block::TextBlock;
//! use textree::tree::classifier::Classifier;
//!
//! let ham = TextBlock::from_features([("link_count", 0.0), ("word_count", 10.0)]);
//! let spam = TextBlock::from_features([("link_count", 5.0), ("word_count", 2.0)]);
//!
//! let data = vec![ham.clone(), spam.clone()];
//! let labels = vec!["Ham".to_string(), "Spam".to_string()];
//!
//! let classifier = Classifier::from_training(&data, &labels).unwrap();
//!
//! assert_eq!(classifier.classify(&ham).unwrap(), "Ham");
//! assert_eq!(classifier.classify(&spam).unwrap(), "Spam");
//! ```

/// Labeled corpora and train/test splitting
pub mod data;
/// Functions for evaluating model performance
pub mod metrics;
/// Turning raw text into feature vectors
pub mod text;
/// The decision tree classifier
pub mod tree;
