//! Pretrained in-context transformer predictor for tabular rows.
//!
//! The network is a prior-fitted predictor: `fit` performs no gradient
//! updates, it stores the standardized training set. `predict` runs a
//! forward pass over the token sequence [train rows ++ query rows] and reads
//! class logits at the query positions. An attention mask makes per-query
//! independence structural: query tokens attend to the training context and
//! to themselves only, never to other query rows.
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use candle_core::{DType, Device, IndexOp, Tensor};
use candle_nn::{embedding, linear, Embedding, Linear, Module, VarBuilder, VarMap};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::{ModelConfig, ModelType};
use crate::math::Array2;
use crate::models::classifier_trait::ClassifierModel;
use crate::models::nn::TransformerEncoder;
use crate::preprocessing::Scaler;

/// Resolve a device spec such as `cpu` or `cuda:0`.
pub fn parse_device(spec: &str) -> Result<Device> {
    match spec {
        "cpu" => Ok(Device::Cpu),
        s if s.starts_with("cuda") => {
            let ordinal = s
                .strip_prefix("cuda")
                .map(|rest| rest.trim_start_matches(':'))
                .filter(|rest| !rest.is_empty())
                .map_or(Ok(0), str::parse::<usize>)
                .with_context(|| format!("Invalid CUDA ordinal in '{}'", s))?;
            Device::new_cuda(ordinal).with_context(|| format!("Failed to open device '{}'", s))
        }
        other => bail!("Unknown device '{}'. Expected 'cpu' or 'cuda:N'", other),
    }
}

/// The network itself: row projection, label embedding, encoder stack and
/// class head. Weights come from a safetensors checkpoint or random init.
pub struct TabTransformerNetwork {
    feature_proj: Linear,
    label_embed: Embedding,
    encoder: TransformerEncoder,
    class_head: Linear,
    varmap: VarMap,
    device: Device,
    max_features: usize,
    max_classes: usize,
}

impl TabTransformerNetwork {
    #[allow(clippy::too_many_arguments)]
    pub fn new_untrained(
        embed_dim: usize,
        num_heads: usize,
        num_layers: usize,
        ff_dim: usize,
        max_features: usize,
        max_classes: usize,
        device: Device,
    ) -> Result<Self> {
        let varmap = VarMap::new();
        let vb = VarBuilder::from_varmap(&varmap, DType::F32, &device);

        let feature_proj = linear(max_features, embed_dim, vb.pp("feature_proj"))?;
        // One extra embedding entry marks query rows, whose label is unknown.
        let label_embed = embedding(max_classes + 1, embed_dim, vb.pp("label_embed"))?;
        let encoder = TransformerEncoder::new(
            &vb.pp("encoder"),
            embed_dim,
            ff_dim,
            num_heads,
            num_layers,
            0.0,
        )?;
        let class_head = linear(embed_dim, max_classes, vb.pp("class_head"))?;

        Ok(Self {
            feature_proj,
            label_embed,
            encoder,
            class_head,
            varmap,
            device,
            max_features,
            max_classes,
        })
    }

    /// Overwrite the network variables from a safetensors checkpoint.
    pub fn load_weights<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.varmap
            .load(path.as_ref())
            .with_context(|| format!("Failed to load weights: {}", path.as_ref().display()))?;
        log::info!("[TabTransformer] loaded weights from {}", path.as_ref().display());
        Ok(())
    }

    pub fn max_features(&self) -> usize {
        self.max_features
    }

    pub fn max_classes(&self) -> usize {
        self.max_classes
    }

    /// Class logits for each query row, conditioned on the labeled context.
    ///
    /// Both matrices must already be padded to `max_features` columns.
    pub fn forward_in_context(
        &self,
        x_ctx: &Array2<f32>,
        y_ctx: &[u32],
        x_query: &Array2<f32>,
    ) -> Result<Vec<Vec<f32>>> {
        let n_ctx = x_ctx.nrows();
        let n_query = x_query.nrows();
        let t = n_ctx + n_query;

        let mut flat = Vec::with_capacity(t * self.max_features);
        flat.extend_from_slice(x_ctx.as_slice());
        flat.extend_from_slice(x_query.as_slice());
        let rows = Tensor::from_vec(flat, (t, self.max_features), &self.device)?;

        let mut ids: Vec<u32> = y_ctx.to_vec();
        ids.extend(std::iter::repeat(self.max_classes as u32).take(n_query));
        let ids = Tensor::from_vec(ids, (t,), &self.device)?;

        let tokens = self.feature_proj.forward(&rows)?;
        let labels = self.label_embed.forward(&ids)?;
        let h = (&tokens + &labels)?.unsqueeze(0)?;

        let mask = self.attention_mask(n_ctx, t)?;
        let out = self.encoder.forward(&h, Some(&mask), false)?;
        let logits = self.class_head.forward(&out)?;

        let query_logits = logits.i((0, n_ctx.., ..))?;
        Ok(query_logits.to_vec2::<f32>()?)
    }

    /// Mask with 1.0 at blocked (query, query) pairs: token `i` may attend
    /// to every context token and, for query tokens, to itself.
    fn attention_mask(&self, n_ctx: usize, t: usize) -> Result<Tensor> {
        let mut mask = vec![0f32; t * t];
        for i in 0..t {
            for j in n_ctx..t {
                if j != i {
                    mask[i * t + j] = 1.0;
                }
            }
        }
        Ok(Tensor::from_vec(mask, (t, t), &self.device)?.unsqueeze(0)?)
    }
}

/// Adapter exposing the network through the shared classifier contract.
pub struct TabTransformerClassifier {
    network: TabTransformerNetwork,
    n_estimators: u32,
    scaler: Option<Scaler>,
    x_train: Option<Array2<f32>>,
    y_train: Vec<u32>,
    n_classes: usize,
}

impl TabTransformerClassifier {
    pub fn new(config: ModelConfig) -> Result<Self> {
        match config.model_type {
            ModelType::TabTransformer {
                n_estimators,
                embed_dim,
                num_heads,
                num_layers,
                ff_dim,
                max_features,
                max_classes,
                device,
                weights,
            } => {
                let device = parse_device(&device)?;
                let mut network = TabTransformerNetwork::new_untrained(
                    embed_dim,
                    num_heads,
                    num_layers,
                    ff_dim,
                    max_features,
                    max_classes,
                    device,
                )?;
                if let Some(path) = weights.as_deref() {
                    network.load_weights(path)?;
                } else {
                    log::warn!(
                        "[TabTransformer] no weights checkpoint configured; using random init"
                    );
                }
                Ok(Self {
                    network,
                    n_estimators: n_estimators.max(1),
                    scaler: None,
                    x_train: None,
                    y_train: Vec::new(),
                    n_classes: 0,
                })
            }
            other => bail!("Expected TabTransformer params, got {:?}", other),
        }
    }
}

impl ClassifierModel for TabTransformerClassifier {
    fn fit(&mut self, x: &Array2<f32>, y: &[u32]) -> Result<()> {
        if x.nrows() != y.len() {
            bail!("{} rows but {} labels", x.nrows(), y.len());
        }
        if x.nrows() == 0 {
            bail!("Cannot fit on an empty training set");
        }
        if x.ncols() > self.network.max_features() {
            bail!(
                "{} features exceed the network input width of {}",
                x.ncols(),
                self.network.max_features()
            );
        }
        let n_classes = y.iter().max().map(|&m| m as usize + 1).unwrap_or(0);
        if n_classes > self.network.max_classes() {
            bail!(
                "{} classes exceed the network head capacity of {}",
                n_classes,
                self.network.max_classes()
            );
        }

        let scaler = Scaler::fit(x);
        self.x_train = Some(scaler.transform(x));
        self.scaler = Some(scaler);
        self.y_train = y.to_vec();
        self.n_classes = n_classes;
        Ok(())
    }

    fn predict_proba(&self, x: &Array2<f32>) -> Result<Vec<Vec<f32>>> {
        let x_train = self
            .x_train
            .as_ref()
            .ok_or_else(|| anyhow!("TabTransformer model has not been fitted"))?;
        let scaler = self.scaler.as_ref().expect("scaler fitted with x_train");
        if x.ncols() != x_train.ncols() {
            bail!(
                "{} features but the model was fitted on {}",
                x.ncols(),
                x_train.ncols()
            );
        }
        if x.nrows() == 0 {
            return Ok(Vec::new());
        }

        let x_query = scaler.transform(x);
        let n_query = x_query.nrows();
        let width = self.network.max_features();

        let mut acc = vec![vec![0f32; self.n_classes.max(1)]; n_query];
        for member in 0..self.n_estimators {
            // Ensemble configurations are fixed feature permutations, seeded
            // by member index so repeated runs see the same ensemble.
            let perm = member_permutation(x_train.ncols(), member as u64);
            let ctx = permute_and_pad(x_train, &perm, width);
            let query = permute_and_pad(&x_query, &perm, width);

            log::trace!(
                "[TabTransformer] member {}: context {:?}, query {:?}",
                member,
                ctx.shape(),
                query.shape()
            );
            let logits = self
                .network
                .forward_in_context(&ctx, &self.y_train, &query)?;
            for (row, out) in logits.iter().zip(acc.iter_mut()) {
                let probs = softmax_slice(&row[..self.n_classes.max(1)]);
                for (o, p) in out.iter_mut().zip(probs.iter()) {
                    *o += p;
                }
            }
        }

        let scale = 1.0 / self.n_estimators as f32;
        for row in acc.iter_mut() {
            for v in row.iter_mut() {
                *v *= scale;
            }
        }
        Ok(acc)
    }

    fn name(&self) -> &str {
        "TabTransformer"
    }
}

fn member_permutation(n_features: usize, member: u64) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n_features).collect();
    let mut rng = StdRng::seed_from_u64(member);
    perm.shuffle(&mut rng);
    perm
}

/// Reorder columns by `perm`, then zero-pad each row to `width` columns.
fn permute_and_pad(x: &Array2<f32>, perm: &[usize], width: usize) -> Array2<f32> {
    let nrows = x.nrows();
    let mut data = Vec::with_capacity(nrows * width);
    for r in 0..nrows {
        let row = x.row_slice(r);
        for &c in perm {
            data.push(row[c]);
        }
        data.resize((r + 1) * width, 0.0);
    }
    Array2::from_shape_vec((nrows, width), data).expect("permute_and_pad: shape mismatch")
}

/// Numerically stable softmax over a logit slice.
fn softmax_slice(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&v| (v - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
