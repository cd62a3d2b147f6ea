// ============================================================
// Layer 5 — Extractive QA Span Model
// ============================================================
// BERT-style encoder with a two-logit span head. The forward
// pass maps a [batch, seq_len] token id tensor to per-token
// start and end logits; the answer is the span [s..=e] with the
// highest probability product (decoded by the inferencer).
//
// This is an inference-only definition: the architecture is
// rebuilt from the stored config and the pretrained weights are
// loaded into it, never trained here.

use burn::{
    nn::{
        attention::{MhaInput, MultiHeadAttention, MultiHeadAttentionConfig},
        Embedding, EmbeddingConfig,
        LayerNorm, LayerNormConfig,
        Linear, LinearConfig,
    },
    prelude::*,
};

#[derive(Config, Debug)]
pub struct QaSpanModelConfig {
    pub vocab_size:  usize,
    pub max_seq_len: usize,
    pub d_model:     usize,
    pub num_heads:   usize,
    pub num_layers:  usize,
    pub d_ff:        usize,
}

impl QaSpanModelConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> QaSpanModel<B> {
        QaSpanModel {
            token_embedding:    EmbeddingConfig::new(self.vocab_size, self.d_model)
                .init(device),
            position_embedding: EmbeddingConfig::new(self.max_seq_len, self.d_model)
                .init(device),
            layers: (0..self.num_layers)
                .map(|_| self.init_layer(device))
                .collect(),
            final_norm: LayerNormConfig::new(self.d_model).init(device),
            span_head:  LinearConfig::new(self.d_model, 2).init(device),
        }
    }

    fn init_layer<B: Backend>(&self, device: &B::Device) -> EncoderLayer<B> {
        EncoderLayer {
            self_attn: MultiHeadAttentionConfig::new(self.d_model, self.num_heads)
                .init(device),
            ff_expand:   LinearConfig::new(self.d_model, self.d_ff).init(device),
            ff_contract: LinearConfig::new(self.d_ff, self.d_model).init(device),
            norm_attn:   LayerNormConfig::new(self.d_model).init(device),
            norm_ff:     LayerNormConfig::new(self.d_model).init(device),
        }
    }
}

/// One post-norm encoder layer: self-attention then a GELU
/// feed-forward block, each with a residual connection.
#[derive(Module, Debug)]
pub struct EncoderLayer<B: Backend> {
    pub self_attn:   MultiHeadAttention<B>,
    pub ff_expand:   Linear<B>,
    pub ff_contract: Linear<B>,
    pub norm_attn:   LayerNorm<B>,
    pub norm_ff:     LayerNorm<B>,
}

impl<B: Backend> EncoderLayer<B> {
    pub fn forward(&self, x: Tensor<B, 3>) -> Tensor<B, 3> {
        let attn = self.self_attn.forward(MhaInput::self_attn(x.clone())).context;
        let x    = self.norm_attn.forward(x + attn);
        let ff   = self.ff_contract.forward(
            burn::tensor::activation::gelu(self.ff_expand.forward(x.clone())),
        );
        self.norm_ff.forward(x + ff)
    }
}

#[derive(Module, Debug)]
pub struct QaSpanModel<B: Backend> {
    pub token_embedding:    Embedding<B>,
    pub position_embedding: Embedding<B>,
    pub layers:             Vec<EncoderLayer<B>>,
    pub final_norm:         LayerNorm<B>,
    pub span_head:          Linear<B>,
}

pub struct SpanLogits<B: Backend> {
    pub start: Tensor<B, 2>,
    pub end:   Tensor<B, 2>,
}

impl<B: Backend> QaSpanModel<B> {
    /// input_ids: [batch, seq_len] → start/end logits: [batch, seq_len]
    pub fn forward(&self, input_ids: Tensor<B, 2, Int>) -> SpanLogits<B> {
        let [batch_size, seq_len] = input_ids.dims();

        let tok_emb = self.token_embedding.forward(input_ids);

        // Self-attention is permutation-invariant; positions are
        // injected through a learned embedding.
        let positions = Tensor::<B, 1, Int>::arange(0..seq_len as i64, &tok_emb.device())
            .unsqueeze::<2>()
            .expand([batch_size, seq_len]);
        let pos_emb = self.position_embedding.forward(positions);

        let mut x = tok_emb + pos_emb;
        for layer in &self.layers {
            x = layer.forward(x);
        }
        let x = self.final_norm.forward(x); // [batch, seq_len, d_model]

        // Two logits per token, split into start / end planes.
        let logits = self.span_head.forward(x); // [batch, seq_len, 2]
        let start = logits.clone()
            .slice([0..batch_size, 0..seq_len, 0..1])
            .reshape([batch_size, seq_len]);
        let end = logits
            .slice([0..batch_size, 0..seq_len, 1..2])
            .reshape([batch_size, seq_len]);

        SpanLogits { start, end }
    }
}
