//! Feed-forward network classifier
//!
//! Runs a small dense network exported by the offline trainer as JSON. The
//! artifact carries its own feature order and normalization; both are
//! checked against this build's feature layout when loading.

use crate::ranking::{rank_scores, ClassificationResult};
use crate::{Classify, ModelError};
use exercise_registry::{Boosts, ExerciseId};
use feature_engine::{
    FeatureExtractor, FeatureNormalization, Landmark, FEATURE_COUNT, FEATURE_NAMES,
};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Layer activation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Relu,
    Linear,
    Softmax,
}

/// Inference-time batch normalization parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchNorm {
    pub gamma: Vec<f64>,
    pub beta: Vec<f64>,
    pub moving_mean: Vec<f64>,
    pub moving_variance: Vec<f64>,
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
}

fn default_epsilon() -> f64 {
    1e-3
}

/// Dense layer as exported: `weights[input][output]`, batch norm applied
/// after the affine transform and before the activation. Dropout layers are
/// not exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseLayer {
    pub weights: Vec<Vec<f64>>,
    pub bias: Vec<f64>,
    #[serde(default)]
    pub batch_norm: Option<BatchNorm>,
    pub activation: Activation,
}

/// Serialized model as written by the trainer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub feature_names: Vec<String>,
    pub labels: Vec<String>,
    pub normalization: FeatureNormalization,
    pub layers: Vec<DenseLayer>,
}

/// Dense layer with batch norm folded into its weights
#[derive(Debug, Clone)]
struct Layer {
    weights: Array2<f64>,
    bias: Array1<f64>,
    activation: Activation,
}

/// Neural network exercise classifier
#[derive(Debug, Clone)]
pub struct NeuralClassifier {
    extractor: FeatureExtractor,
    normalization: FeatureNormalization,
    layers: Vec<Layer>,
    /// (output index, exercise) sorted by registration order
    outputs: Vec<(usize, ExerciseId)>,
}

impl NeuralClassifier {
    /// Load a JSON artifact from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        info!("Loading exercise model from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse and validate a model artifact held in memory
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let artifact: ModelArtifact = serde_json::from_str(json)?;
        Self::from_artifact(artifact)
    }

    /// Validate an artifact and prepare it for inference
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ModelError> {
        if artifact.feature_names.iter().map(String::as_str).ne(FEATURE_NAMES) {
            return Err(ModelError::FeatureLayoutMismatch {
                expected: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
                actual: artifact.feature_names,
            });
        }
        artifact.normalization.validate()?;

        let mut outputs = artifact
            .labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                label
                    .parse::<ExerciseId>()
                    .map(|id| (i, id))
                    .map_err(|_| ModelError::UnknownLabel(label.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        outputs.sort_by_key(|(_, id)| *id);

        let mut layers = Vec::with_capacity(artifact.layers.len());
        let mut width = FEATURE_COUNT;
        for (index, layer) in artifact.layers.into_iter().enumerate() {
            let layer = fold_layer(index, width, layer)?;
            width = layer.bias.len();
            layers.push(layer);
        }

        match layers.last() {
            None => return Err(ModelError::Invalid("model has no layers".to_string())),
            Some(last) if last.activation != Activation::Softmax => {
                return Err(ModelError::Invalid("output layer must be softmax".to_string()))
            }
            Some(_) => {}
        }
        if width != artifact.labels.len() {
            return Err(ModelError::Shape {
                layer: layers.len() - 1,
                expected: artifact.labels.len(),
                actual: width,
            });
        }

        info!(
            layers = layers.len(),
            classes = outputs.len(),
            "Exercise model ready"
        );

        Ok(Self {
            extractor: FeatureExtractor::new(),
            normalization: artifact.normalization,
            layers,
            outputs,
        })
    }

    /// Class probabilities in artifact label order
    pub fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Array1<f64> {
        let input = self.normalization.apply(features);
        let mut x = Array1::from_vec(input.to_vec());
        for layer in &self.layers {
            let z = x.dot(&layer.weights) + &layer.bias;
            x = match layer.activation {
                Activation::Relu => z.mapv(|v| v.max(0.0)),
                Activation::Linear => z,
                Activation::Softmax => softmax(z),
            };
        }
        x
    }
}

impl Classify for NeuralClassifier {
    fn classify(&self, landmarks: &[Landmark], boosts: &Boosts) -> ClassificationResult {
        let features = match self.extractor.extract(landmarks) {
            Ok(features) => features,
            Err(e) => {
                debug!("Skipping classification: {}", e);
                return ClassificationResult::fallback();
            }
        };

        let probabilities = self.predict(&features.to_training_vector());
        // Probabilities are scaled to the heuristic score range so boosts
        // carry the same weight under both backends.
        let scores = self
            .outputs
            .iter()
            .map(|&(i, id)| (id, probabilities[i] * 100.0))
            .collect();

        let result = rank_scores(scores, boosts);
        debug!(
            exercise = %result.key,
            confidence = result.confidence,
            "Neural classification"
        );
        result
    }

    fn name(&self) -> &'static str {
        "neural"
    }
}

fn fold_layer(index: usize, input_width: usize, layer: DenseLayer) -> Result<Layer, ModelError> {
    let shape_error = |expected: usize, actual: usize| ModelError::Shape {
        layer: index,
        expected,
        actual,
    };

    if layer.weights.len() != input_width {
        return Err(shape_error(input_width, layer.weights.len()));
    }
    let output_width = layer.bias.len();
    if let Some(row) = layer.weights.iter().find(|row| row.len() != output_width) {
        return Err(shape_error(output_width, row.len()));
    }

    let flat: Vec<f64> = layer.weights.into_iter().flatten().collect();
    let mut weights = Array2::from_shape_vec((input_width, output_width), flat)
        .map_err(|e| ModelError::Invalid(format!("layer {index}: {e}")))?;
    let mut bias = Array1::from_vec(layer.bias);

    if let Some(bn) = layer.batch_norm {
        for len in [bn.gamma.len(), bn.beta.len(), bn.moving_mean.len(), bn.moving_variance.len()] {
            if len != output_width {
                return Err(shape_error(output_width, len));
            }
        }
        // y = gamma * (z - mean) / sqrt(var + eps) + beta
        for j in 0..output_width {
            let scale = bn.gamma[j] / (bn.moving_variance[j] + bn.epsilon).sqrt();
            weights.column_mut(j).mapv_inplace(|w| w * scale);
            bias[j] = (bias[j] - bn.moving_mean[j]) * scale + bn.beta[j];
        }
    }

    Ok(Layer {
        weights,
        bias,
        activation: layer.activation,
    })
}

fn softmax(z: Array1<f64>) -> Array1<f64> {
    let max = z.fold(f64::NEG_INFINITY, |m, &v| m.max(v));
    let exp = z.mapv(|v| (v - max).exp());
    let sum = exp.sum();
    if sum > 0.0 && sum.is_finite() {
        exp / sum
    } else {
        Array1::from_elem(exp.len(), 1.0 / exp.len().max(1) as f64)
    }
}
