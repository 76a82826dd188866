use ssrbm_core::{ConstantInit, GaussianInit, RbmError, SpikeSlabConfig, UniformInit};
use ssrbm_models::{RbmVariant, SpikeSlabRbm};
use ssrbm_samplers::{RandomSource, RngKey};

/// Constant uniforms and constant normals.
struct FixedSource {
    uniform: f64,
    normal: f64,
}

impl RandomSource for FixedSource {
    fn uniform(&mut self) -> f64 {
        self.uniform
    }

    fn standard_normal(&mut self) -> f64 {
        self.normal
    }
}

/// Every spike draws 1 and every Gaussian draw lands on its mean.
fn spikes_on() -> FixedSource {
    FixedSource {
        uniform: 0.0,
        normal: 0.0,
    }
}

/// Every spike draws 0.
fn spikes_off() -> FixedSource {
    FixedSource {
        uniform: 1.0,
        normal: 0.0,
    }
}

/// V=2, H=2, P=1 with W_0 = [1, 0], W_1 = [0, 1], b = 0, α = 1, λ = 1.
fn unit_model() -> SpikeSlabRbm<ConstantInit> {
    let config = SpikeSlabConfig::new(2, 2, 1).with_slab_penalty(1.0);
    let mut rbm = SpikeSlabRbm::new(config, ConstantInit(0.0)).unwrap();
    rbm.reset().unwrap();
    {
        let mut params = rbm.params_mut().unwrap();
        params.set_weight(0, 0, 0, 1.0);
        params.set_weight(1, 0, 1, 1.0);
        *params.visible_penalty_mut() = 1.0;
    }
    rbm
}

/// V=2, H=2, P=2 with dyadic weights so slab means are exact.
fn small_model() -> SpikeSlabRbm<ConstantInit> {
    let config = SpikeSlabConfig::new(2, 2, 2)
        .with_slab_penalty(2.0)
        .with_radius(100.0);
    let mut rbm = SpikeSlabRbm::new(config, ConstantInit(0.0)).unwrap();
    rbm.reset().unwrap();
    {
        let mut params = rbm.params_mut().unwrap();
        params
            .weight_mut()
            .copy_from_slice(&[0.5, 0.25, -0.5, 1.0, 0.0, 0.75, 0.125, -0.25]);
        params.spike_bias_mut().copy_from_slice(&[0.5, -1.0]);
        *params.visible_penalty_mut() = 2.0;
    }
    rbm
}

#[test]
fn test_free_energy_regression() {
    let rbm = unit_model();
    let energy = rbm.free_energy(&[1.0, 1.0]).unwrap();
    let expected = -1.786_031_034_769_558_7;
    assert!(
        ((energy - expected) / expected).abs() < 1e-9,
        "free energy {energy} != {expected}"
    );
}

#[test]
fn test_spike_mean_strictly_inside_unit_interval() {
    let mut rbm = small_model();
    rbm.params_mut()
        .unwrap()
        .spike_bias_mut()
        .copy_from_slice(&[1.0e4, -1.0e4]);

    let mut mean = [0.0; 2];
    rbm.spike_mean(&[3.0, -2.0], &mut mean).unwrap();
    assert!(mean[0] > 0.0 && mean[0] < 1.0, "{mean:?}");
    assert!(mean[1] > 0.0 && mean[1] < 1.0, "{mean:?}");

    let mut rng = RngKey::new(11).source();
    for k in 0..20 {
        let v = [rng.normal(0.0, 4.0), k as f64 - 10.0];
        rbm.spike_mean(&v, &mut mean).unwrap();
        assert!(mean.iter().all(|&m| m > 0.0 && m < 1.0));
    }
}

#[test]
fn test_inactive_spike_gives_zero_slab_column() {
    let rbm = small_model();
    let mut slab = [f64::NAN; 4];
    rbm.slab_mean(&[1.0, 2.0], &[0.0, 1.0], &mut slab).unwrap();
    assert_eq!(&slab[..2], &[0.0, 0.0]);
    // W_1ᵀ v / λ = [(0 + 1.5) / 2, (0.125 - 0.5) / 2]
    assert_eq!(&slab[2..], &[0.75, -0.1875]);
}

#[test]
fn test_hidden_mean_uses_sampled_spike() {
    let mut rbm = small_model();
    let visible = [1.0, 2.0];
    let mut hidden = vec![f64::NAN; rbm.hidden_len()];

    rbm.hidden_mean(&visible, &mut hidden, &mut spikes_off())
        .unwrap();
    let mut spike_mean = [0.0; 2];
    rbm.spike_mean(&visible, &mut spike_mean).unwrap();
    assert_eq!(&hidden[..2], &spike_mean);
    assert!(hidden[2..].iter().all(|&x| x == 0.0));

    rbm.hidden_mean(&visible, &mut hidden, &mut spikes_on())
        .unwrap();
    assert_eq!(&hidden[..2], &spike_mean);
    let mut slab = [0.0; 4];
    rbm.slab_mean(&visible, &[1.0, 1.0], &mut slab).unwrap();
    assert_eq!(&hidden[2..], &slab);
}

#[test]
fn test_sample_hidden_with_fixed_draws() {
    let mut rbm = small_model();
    let mut hidden = vec![0.0; rbm.hidden_len()];

    rbm.sample_hidden(&[1.0, 2.0], &mut hidden, &mut spikes_on())
        .unwrap();
    // W_0ᵀ v / λ = [1 / 2, 1.5 / 2]
    assert_eq!(hidden, vec![1.0, 1.0, 0.5, 0.75, 0.75, -0.1875]);

    rbm.sample_hidden(&[1.0, 2.0], &mut hidden, &mut spikes_off())
        .unwrap();
    assert_eq!(hidden, vec![0.0; 6]);
}

#[test]
fn test_visible_mean_is_linear_in_slab() {
    let rbm = small_model();
    let x = [1.0, 0.5, -0.25, 2.0];
    let y = [-0.75, 3.0, 1.5, 0.125];
    let sum: Vec<f64> = x.iter().zip(&y).map(|(a, b)| a + b).collect();

    let hidden = |slab: &[f64]| [&[1.0, 1.0][..], slab].concat();
    let mut mx = [0.0; 2];
    let mut my = [0.0; 2];
    let mut ms = [0.0; 2];
    rbm.visible_mean(&hidden(&x), &mut mx).unwrap();
    rbm.visible_mean(&hidden(&y), &mut my).unwrap();
    rbm.visible_mean(&hidden(&sum), &mut ms).unwrap();

    for i in 0..2 {
        assert!((ms[i] - (mx[i] + my[i])).abs() < 1e-12);
    }
}

#[test]
fn test_visible_mean_value() {
    let rbm = small_model();
    let mut mean = [0.0; 2];
    // Only hidden unit 0 active, slab [1, 1]: (W[:,0,0] + W[:,1,0]) / α
    rbm.visible_mean(&[1.0, 0.0, 1.0, 1.0, 5.0, 5.0], &mut mean)
        .unwrap();
    assert_eq!(mean, [0.0, 0.625]);
}

#[test]
fn test_sample_visible_with_zero_noise_returns_mean() {
    let mut rbm = small_model();
    let hidden = [1.0, 0.0, 1.0, 1.0, 5.0, 5.0];
    let mut visible = [f64::NAN; 2];
    let outcome = rbm
        .sample_visible(&hidden, &mut visible, &mut spikes_on())
        .unwrap();
    assert!(outcome.accepted);
    assert_eq!(outcome.attempts, 1);
    assert_eq!(visible, [0.0, 0.625]);
}

#[test]
fn test_sample_visible_attempts_bounded() {
    let config = SpikeSlabConfig::new(3, 2, 2)
        .with_radius(0.5)
        .with_max_trials(7)
        .with_initial_visible_penalty(1.0);
    let mut rbm = SpikeSlabRbm::new(config, UniformInit::new(-0.5, 0.5, 5)).unwrap();
    rbm.reset().unwrap();
    let mut rng = RngKey::new(21).source();
    let mut hidden = vec![0.0; rbm.hidden_len()];
    let mut visible = [0.0; 3];

    for _ in 0..25 {
        rbm.sample_hidden(&[0.1, 0.2, -0.1], &mut hidden, &mut rng)
            .unwrap();
        let outcome = rbm.sample_visible(&hidden, &mut visible, &mut rng).unwrap();
        assert!((1..=7).contains(&outcome.attempts));
        if outcome.accepted {
            assert!(outcome.norm < 0.5);
        } else {
            assert_eq!(outcome.attempts, 7);
        }
    }
}

#[test]
fn test_phase_gradient_bit_for_bit() {
    let mut rbm = small_model();
    let visible = [1.0, 2.0];
    let mut gradient = vec![0.0; rbm.parameter_len()];
    rbm.phase(&visible, &mut gradient, &mut spikes_on())
        .unwrap();

    let mut m = [0.0; 2];
    rbm.spike_mean(&visible, &mut m).unwrap();
    let slab = [0.5, 0.75, 0.75, -0.1875];

    let mut expected = Vec::new();
    for h in 0..2 {
        for j in 0..2 {
            for &v in &visible {
                expected.push(v * slab[j + 2 * h] * m[h]);
            }
        }
    }
    expected.extend_from_slice(&m);
    expected.push(-2.5);

    assert_eq!(gradient, expected);
}

#[test]
fn test_phase_with_inactive_spikes_zeroes_weight_gradient() {
    let mut rbm = small_model();
    let mut gradient = vec![f64::NAN; rbm.parameter_len()];
    rbm.phase(&[1.0, 2.0], &mut gradient, &mut spikes_off())
        .unwrap();
    assert!(gradient[..8].iter().all(|&g| g == 0.0));
    assert!(gradient[8..10].iter().all(|&g| g > 0.0 && g < 1.0));
    assert_eq!(gradient[10], -2.5);
}

#[test]
fn test_positive_negative_contrastive() {
    let mut rbm = small_model();
    let visible = [1.0, 2.0];
    let mut single = vec![0.0; rbm.parameter_len()];
    rbm.phase(&visible, &mut single, &mut spikes_on()).unwrap();

    rbm.positive_phase(&visible, &mut spikes_on()).unwrap();
    rbm.negative_phase(&visible, &mut spikes_on()).unwrap();
    rbm.negative_phase(&visible, &mut spikes_on()).unwrap();

    let grads = rbm.store().unwrap().gradients();
    assert_eq!(grads.positive(), &single[..]);
    let doubled: Vec<f64> = single.iter().map(|g| g + g).collect();
    assert_eq!(grads.negative(), &doubled[..]);

    let mut delta = vec![f64::NAN; rbm.parameter_len()];
    rbm.contrastive_gradient(2, &mut delta).unwrap();
    assert!(delta.iter().all(|&d| d == 0.0));

    rbm.clear_gradients().unwrap();
    let grads = rbm.store().unwrap().gradients();
    assert!(grads.negative().iter().all(|&g| g == 0.0));
}

#[test]
fn test_reset_is_idempotent() {
    let config = SpikeSlabConfig::new(5, 3, 2).with_initial_visible_penalty(3.0);
    let mut rbm = SpikeSlabRbm::new(config, GaussianInit::new(0.0, 0.1, 99)).unwrap();
    rbm.reset().unwrap();
    let first = rbm.parameters().unwrap().to_vec();

    rbm.parameters_mut().unwrap().fill(7.0);
    rbm.positive_phase(&[0.1; 5], &mut spikes_on()).unwrap();
    rbm.reset().unwrap();

    assert_eq!(rbm.parameters().unwrap(), &first[..]);
    assert_eq!(rbm.visible_penalty().unwrap(), 3.0);
    let store = rbm.store().unwrap();
    assert!(store.gradients().positive().iter().all(|&g| g == 0.0));
    assert_eq!(store.negative_samples().len(), 5);
}

#[test]
fn test_shape_mismatch_reported() {
    let mut rbm = small_model();
    let mut hidden = vec![0.0; rbm.hidden_len() + 1];
    assert!(matches!(
        rbm.sample_hidden(&[1.0, 2.0], &mut hidden, &mut spikes_on()),
        Err(RbmError::ShapeMismatch { .. })
    ));
    let mut gradient = vec![0.0; rbm.parameter_len() - 1];
    assert!(matches!(
        rbm.phase(&[1.0, 2.0], &mut gradient, &mut spikes_on()),
        Err(RbmError::ShapeMismatch { .. })
    ));
    assert!(matches!(
        rbm.free_energy(&[1.0, 2.0, 3.0]),
        Err(RbmError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_non_finite_weights_reported() {
    let mut rbm = small_model();
    rbm.params_mut().unwrap().set_weight(0, 0, 0, f64::INFINITY);
    let mut mean = [0.0; 2];
    assert!(matches!(
        rbm.spike_mean(&[1.0, 2.0], &mut mean),
        Err(RbmError::NumericalInstability { .. })
    ));
}

#[test]
fn test_boxed_variant_drives_gibbs_chain() {
    let config = SpikeSlabConfig::new(4, 3, 2)
        .with_radius(20.0)
        .with_initial_visible_penalty(2.0);
    let mut rbm: Box<dyn RbmVariant> =
        Box::new(SpikeSlabRbm::new(config, GaussianInit::new(0.0, 0.05, 1)).unwrap());
    assert!(matches!(rbm.parameters(), Err(RbmError::Uninitialized)));
    rbm.reset().unwrap();
    assert_eq!(rbm.name(), "ssRBM");
    assert_eq!(rbm.parameter_len(), 4 * 2 * 3 + 3 + 1);

    let mut rng = RngKey::new(3).source();
    let mut visible = vec![0.2, -0.1, 0.0, 0.4];
    let mut hidden = vec![0.0; rbm.hidden_len()];
    let mut gradient = vec![0.0; rbm.parameter_len()];

    for _ in 0..10 {
        rbm.sample_hidden(&visible, &mut hidden, &mut rng).unwrap();
        assert!(hidden[..3].iter().all(|&s| s == 0.0 || s == 1.0));
        rbm.sample_visible(&hidden, &mut visible, &mut rng).unwrap();
        rbm.phase(&visible, &mut gradient, &mut rng).unwrap();
        assert!(rbm.free_energy(&visible).unwrap().is_finite());
    }
}

#[test]
fn test_model_from_toml_config() {
    let config: SpikeSlabConfig = toml::from_str(
        r#"
        visible_size = 3
        hidden_size = 2
        pool_size = 1
        slab_penalty = 4.0
        radius = 2.0
        batch_size = 4
        "#,
    )
    .unwrap();
    let mut rbm = SpikeSlabRbm::new(config, ConstantInit(0.5)).unwrap();
    rbm.reset().unwrap();
    assert_eq!(rbm.hidden_len(), 2 + 2);
    assert_eq!(rbm.store().unwrap().negative_samples().len(), 3 * 4);
    assert_eq!(rbm.weight_slice(1).unwrap(), &[0.5, 0.5, 0.5]);
}
