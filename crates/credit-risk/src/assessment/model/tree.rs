use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::super::predictor::PredictionError;
use super::super::vector::FeatureVector;
use crate::schema::FEATURE_COUNT;

/// Node of a binary decision tree. Node 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    /// Goes to `left` when `features[feature] <= threshold`, otherwise to `right`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        class: i64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Children must point forward, which also rules out cycles.
    pub(super) fn validate(&self) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("decision tree has no nodes".to_string());
        }

        for (index, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } = node
            {
                if *feature >= FEATURE_COUNT {
                    return Err(format!(
                        "node {index} splits on feature {feature}, expected < {FEATURE_COUNT}"
                    ));
                }
                if !threshold.is_finite() {
                    return Err(format!("node {index} has a non-finite threshold"));
                }
                for child in [*left, *right] {
                    if child <= index || child >= self.nodes.len() {
                        return Err(format!(
                            "node {index} points to invalid child {child}"
                        ));
                    }
                }
            }
        }

        Ok(())
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<i64, PredictionError> {
        let mut index = 0;
        loop {
            match self.nodes.get(index) {
                Some(TreeNode::Leaf { class }) => return Ok(*class),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = features.get(*feature).ok_or_else(|| {
                        PredictionError::Malformed(format!(
                            "node {index} reads missing feature {feature}"
                        ))
                    })?;
                    let next = if value <= *threshold { *left } else { *right };
                    if next <= index {
                        return Err(PredictionError::Malformed(format!(
                            "node {index} points back to node {next}"
                        )));
                    }
                    index = next;
                }
                None => {
                    return Err(PredictionError::Malformed(format!(
                        "node {index} does not exist"
                    )))
                }
            }
        }
    }
}

/// Majority vote over independently trained trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub(super) fn validate(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("random forest has no trees".to_string());
        }
        for (index, tree) in self.trees.iter().enumerate() {
            tree.validate()
                .map_err(|reason| format!("tree {index}: {reason}"))?;
        }
        Ok(())
    }

    /// Ties go to the smaller label.
    pub fn predict(&self, features: &FeatureVector) -> Result<i64, PredictionError> {
        let mut votes: BTreeMap<i64, usize> = BTreeMap::new();
        for tree in &self.trees {
            *votes.entry(tree.predict(features)?).or_default() += 1;
        }

        let mut winner: Option<(i64, usize)> = None;
        for (label, count) in votes {
            if winner.map_or(true, |(_, best)| count > best) {
                winner = Some((label, count));
            }
        }

        winner
            .map(|(label, _)| label)
            .ok_or_else(|| PredictionError::Malformed("random forest has no trees".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Good when credit score (feature 16) > 600 and defaults (feature 19) <= 1.
    fn score_tree() -> DecisionTree {
        DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 16,
                    threshold: 600.0,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { class: 0 },
                TreeNode::Split {
                    feature: 19,
                    threshold: 1.0,
                    left: 3,
                    right: 4,
                },
                TreeNode::Leaf { class: 1 },
                TreeNode::Leaf { class: 0 },
            ],
        }
    }

    fn features(score: f64, defaults: f64) -> FeatureVector {
        let mut values = [0.0; FEATURE_COUNT];
        values[16] = score;
        values[19] = defaults;
        FeatureVector::new(values)
    }

    fn leaf(class: i64) -> DecisionTree {
        DecisionTree {
            nodes: vec![TreeNode::Leaf { class }],
        }
    }

    #[test]
    fn tree_walks_to_leaf() {
        let tree = score_tree();
        tree.validate().expect("well formed");

        assert_eq!(tree.predict(&features(650.0, 0.0)), Ok(1));
        assert_eq!(tree.predict(&features(600.0, 0.0)), Ok(0));
        assert_eq!(tree.predict(&features(700.0, 2.0)), Ok(0));
    }

    #[test]
    fn validate_rejects_backward_children() {
        let tree = DecisionTree {
            nodes: vec![
                TreeNode::Leaf { class: 1 },
                TreeNode::Split {
                    feature: 0,
                    threshold: 1.0,
                    left: 0,
                    right: 0,
                },
            ],
        };
        let err = tree.validate().expect_err("child precedes parent");
        assert!(err.contains("node 1"));
    }

    #[test]
    fn validate_rejects_unknown_feature() {
        let tree = DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 20,
                    threshold: 1.0,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { class: 0 },
                TreeNode::Leaf { class: 1 },
            ],
        };
        assert!(tree.validate().is_err());
    }

    #[test]
    fn unvalidated_cycle_is_reported_instead_of_looping() {
        let tree = DecisionTree {
            nodes: vec![TreeNode::Split {
                feature: 0,
                threshold: 1.0,
                left: 0,
                right: 0,
            }],
        };
        assert!(matches!(
            tree.predict(&features(0.0, 0.0)),
            Err(PredictionError::Malformed(_))
        ));
    }

    #[test]
    fn forest_takes_majority_and_breaks_ties_low() {
        let forest = RandomForest {
            trees: vec![leaf(1), leaf(1), leaf(0)],
        };
        assert_eq!(forest.predict(&features(0.0, 0.0)), Ok(1));

        let tied = RandomForest {
            trees: vec![leaf(1), leaf(0)],
        };
        assert_eq!(tied.predict(&features(0.0, 0.0)), Ok(0));
    }
}
