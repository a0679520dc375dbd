//! Transformer encoder building blocks for the in-context predictor.
//!
//! The encoder carries no positional encoding: the tokens it sees are table
//! rows, and row order must not influence the output.
use candle_core::{Result, Tensor};
use candle_nn::ops::softmax;
use candle_nn::{layer_norm, linear, Dropout, LayerNorm, Linear, Module, VarBuilder};

#[derive(Debug, Clone)]
pub struct TransformerEncoder {
    layers: Vec<TransformerEncoderLayer>,
    dropout: Dropout,
}

impl TransformerEncoder {
    pub fn new(
        vb: &VarBuilder,
        model_dim: usize,
        ff_dim: usize,
        num_heads: usize,
        num_layers: usize,
        dropout_prob: f32,
    ) -> Result<Self> {
        let mut layers = Vec::with_capacity(num_layers);
        for i in 0..num_layers {
            layers.push(TransformerEncoderLayer::new(
                &vb.pp(format!("layer_{}", i)),
                model_dim,
                ff_dim,
                num_heads,
                dropout_prob,
            )?);
        }
        Ok(Self {
            layers,
            dropout: Dropout::new(dropout_prob),
        })
    }

    /// `x` is `(batch, tokens, model_dim)`; `mask` is an additive attention
    /// mask of shape `(batch, tokens, tokens)` with 1.0 marking blocked
    /// pairs.
    pub fn forward(&self, x: &Tensor, mask: Option<&Tensor>, training: bool) -> Result<Tensor> {
        let mut out = self.dropout.forward(x, training)?;
        for (i, layer) in self.layers.iter().enumerate() {
            log::trace!("[TransformerEncoder] layer {} input {:?}", i, out.shape());
            out = layer.forward(&out, mask, training)?;
        }
        Ok(out)
    }
}

#[derive(Debug, Clone)]
pub struct TransformerEncoderLayer {
    self_attn: MultiHeadAttention,
    ff: FeedForward,
    norm1: LayerNorm,
    norm2: LayerNorm,
    dropout1: Dropout,
    dropout2: Dropout,
}

impl TransformerEncoderLayer {
    pub fn new(
        vb: &VarBuilder,
        model_dim: usize,
        ff_dim: usize,
        num_heads: usize,
        dropout_prob: f32,
    ) -> Result<Self> {
        Ok(Self {
            self_attn: MultiHeadAttention::new(&vb.pp("self_attn"), model_dim, num_heads)?,
            ff: FeedForward::new(&vb.pp("ff"), model_dim, ff_dim)?,
            norm1: layer_norm(model_dim, 1e-5, vb.pp("norm1"))?,
            norm2: layer_norm(model_dim, 1e-5, vb.pp("norm2"))?,
            dropout1: Dropout::new(dropout_prob),
            dropout2: Dropout::new(dropout_prob),
        })
    }

    pub fn forward(&self, x: &Tensor, mask: Option<&Tensor>, training: bool) -> Result<Tensor> {
        let attn = self.self_attn.forward(x, mask)?;
        let x = self.norm1.forward(&(x + &self.dropout1.forward(&attn, training)?)?)?;
        let ff = self.ff.forward(&x)?;
        self.norm2.forward(&(&x + &self.dropout2.forward(&ff, training)?)?)
    }
}

#[derive(Debug, Clone)]
pub struct MultiHeadAttention {
    proj_q: Linear,
    proj_k: Linear,
    proj_v: Linear,
    proj_out: Linear,
    num_heads: usize,
    head_dim: usize,
}

impl MultiHeadAttention {
    pub fn new(vb: &VarBuilder, model_dim: usize, num_heads: usize) -> Result<Self> {
        assert!(
            model_dim % num_heads == 0,
            "model_dim must be divisible by num_heads"
        );
        Ok(Self {
            proj_q: linear(model_dim, model_dim, vb.pp("proj_q"))?,
            proj_k: linear(model_dim, model_dim, vb.pp("proj_k"))?,
            proj_v: linear(model_dim, model_dim, vb.pp("proj_v"))?,
            proj_out: linear(model_dim, model_dim, vb.pp("proj_out"))?,
            num_heads,
            head_dim: model_dim / num_heads,
        })
    }

    pub fn forward(&self, x: &Tensor, mask: Option<&Tensor>) -> Result<Tensor> {
        let (b, t, _) = x.dims3()?;

        let q = self
            .proj_q
            .forward(x)?
            .reshape((b, t, self.num_heads, self.head_dim))?
            .transpose(1, 2)?
            .contiguous()?;
        let k = self
            .proj_k
            .forward(x)?
            .reshape((b, t, self.num_heads, self.head_dim))?
            .transpose(1, 2)?
            .contiguous()?;
        let v = self
            .proj_v
            .forward(x)?
            .reshape((b, t, self.num_heads, self.head_dim))?
            .transpose(1, 2)?
            .contiguous()?;

        let k_t = k.transpose(2, 3)?.contiguous()?;
        let mut scores = (q.matmul(&k_t)? / (self.head_dim as f64).sqrt())?;
        log::trace!("[MultiHeadAttention] score shape {:?}", scores.shape());

        if let Some(mask) = mask {
            // Additive mask: blocked pairs get a large negative score.
            let mask = mask.unsqueeze(1)?;
            scores = scores.broadcast_add(&(&mask * (-1e9f64))?)?;
        }

        let attn = softmax(&scores, candle_core::D::Minus1)?;
        let context = attn
            .matmul(&v)?
            .transpose(1, 2)?
            .reshape((b, t, self.num_heads * self.head_dim))?;
        self.proj_out.forward(&context)
    }
}

#[derive(Debug, Clone)]
pub struct FeedForward {
    lin1: Linear,
    lin2: Linear,
}

impl FeedForward {
    pub fn new(vb: &VarBuilder, model_dim: usize, ff_dim: usize) -> Result<Self> {
        Ok(Self {
            lin1: linear(model_dim, ff_dim, vb.pp("lin1"))?,
            lin2: linear(ff_dim, model_dim, vb.pp("lin2"))?,
        })
    }

    pub fn forward(&self, x: &Tensor) -> Result<Tensor> {
        let x = self.lin1.forward(x)?.relu()?;
        self.lin2.forward(&x)
    }
}
