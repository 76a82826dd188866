//! Train a spike-and-slab RBM on synthetic data with CD-1.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --example train_ssrbm -- --visible 16 --hidden 8 --epochs 50
//!
//! # Load the model configuration from TOML instead:
//! cargo run --release --example train_ssrbm -- --config ssrbm.toml
//!
//! # Or use environment variables:
//! SSRBM_EPOCHS=200 RUST_LOG=debug cargo run --release --example train_ssrbm
//! ```

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use ssrbm_core::{GaussianInit, SpikeSlabConfig};
use ssrbm_examples::{cd1_epoch, synthetic_batch};
use ssrbm_models::SpikeSlabRbm;
use ssrbm_samplers::RngKey;

/// ssRBM CD-1 training on Gaussian blobs
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Train a spike-and-slab RBM on synthetic data")]
struct TrainArgs {
    /// TOML model configuration; overrides the size and hyperparameter flags
    #[arg(long, env = "SSRBM_CONFIG")]
    config: Option<PathBuf>,

    /// Visible units
    #[arg(long, default_value = "16", env = "SSRBM_VISIBLE")]
    visible: usize,

    /// Hidden spike units
    #[arg(long, default_value = "8", env = "SSRBM_HIDDEN")]
    hidden: usize,

    /// Slab factors per hidden unit
    #[arg(long, default_value = "2")]
    pool: usize,

    /// Slab precision
    #[arg(long, default_value = "8.0")]
    slab_penalty: f64,

    /// Acceptance radius for visible samples
    #[arg(long, default_value = "4.0")]
    radius: f64,

    /// Initial visible precision
    #[arg(long, default_value = "5.0")]
    visible_penalty: f64,

    /// Rejection attempts per visible sample
    #[arg(long, default_value = "10")]
    max_trials: usize,

    /// Number of training epochs
    #[arg(long = "epochs", short = 'e', default_value = "100", env = "SSRBM_EPOCHS")]
    n_epochs: usize,

    /// Training vectors
    #[arg(long, short = 'n', default_value = "64")]
    samples: usize,

    /// Learning rate
    #[arg(long, short = 'l', default_value = "0.005", env = "SSRBM_LR")]
    learning_rate: f64,

    /// Standard deviation of the synthetic blobs
    #[arg(long, default_value = "0.3")]
    noise: f64,

    /// Random seed
    #[arg(long, short = 's', default_value = "42")]
    seed: u64,

    /// Log every N epochs
    #[arg(long, default_value = "10")]
    log_every: usize,
}

impl TrainArgs {
    fn model_config(&self) -> Result<SpikeSlabConfig> {
        let config = match &self.config {
            Some(path) => SpikeSlabConfig::from_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => SpikeSlabConfig::new(self.visible, self.hidden, self.pool)
                .with_slab_penalty(self.slab_penalty)
                .with_radius(self.radius)
                .with_max_trials(self.max_trials)
                .with_initial_visible_penalty(self.visible_penalty),
        };
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = TrainArgs::parse();
    let config = args.model_config()?;
    log::info!(
        "ssRBM: V={} H={} P={} λ={} radius={}",
        config.visible_size,
        config.hidden_size,
        config.pool_size,
        config.slab_penalty,
        config.radius
    );

    let (data_key, train_key) = RngKey::new(args.seed).split_two();
    let mut data_rng = data_key.source();
    let mut rng = train_key.source();

    let batch = synthetic_batch(
        &mut data_rng,
        config.visible_size,
        args.samples,
        config.radius,
        args.noise,
    );

    let mut rbm = SpikeSlabRbm::new(config, GaussianInit::new(0.0, 0.01, args.seed))?;
    rbm.reset()?;
    log::info!(
        "initial mean free energy {:.4}",
        rbm.mean_free_energy(&batch)?
    );

    let start = Instant::now();
    for epoch in 1..=args.n_epochs {
        let stats = cd1_epoch(&mut rbm, &batch, args.learning_rate, &mut rng)
            .with_context(|| format!("epoch {epoch}"))?;
        if epoch % args.log_every.max(1) == 0 || epoch == args.n_epochs {
            log::info!(
                "epoch {epoch:>4}: mean free energy {:.4}, α {:.4}, {} rejected",
                stats.mean_free_energy,
                stats.visible_penalty,
                stats.rejected
            );
        }
    }
    log::info!("trained {} epochs in {:.2?}", args.n_epochs, start.elapsed());
    Ok(())
}
