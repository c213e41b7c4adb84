use rand::RngExt as _;
use rand::SeedableRng;
use rand::rngs::StdRng;
use riser_common::{Amplifier, Cable, ComponentCatalog, Distributor, Splitter, Tap};

/// Bounds for synthetic catalogue generation.
#[derive(Debug, Clone)]
pub struct CatalogueConfig {
    pub seed: u64,
    pub per_category: usize,
    pub cable_attenuation_per_100m: (f64, f64),
    pub splitter_branch_loss: (f64, f64),
    /// Added on top of the branch loss to get the insertion loss.
    pub splitter_insertion_extra: (f64, f64),
    pub distribution_loss: (f64, f64),
    pub amplifier_gain: (f64, f64),
    pub amplifier_noise_figure: (f64, f64),
    pub tap_attenuation: (f64, f64),
    /// Multiplier on the base price of every part.
    pub cost_scale: (f64, f64),
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            per_category: 4,
            cable_attenuation_per_100m: (12.0, 28.0),
            splitter_branch_loss: (0.8, 2.5),
            splitter_insertion_extra: (1.5, 4.0),
            distribution_loss: (3.5, 12.0),
            amplifier_gain: (6.0, 35.0),
            amplifier_noise_figure: (4.0, 9.0),
            tap_attenuation: (1.0, 14.0),
            cost_scale: (0.5, 2.0),
        }
    }
}

/// Deterministic catalogue generator.
///
/// The same seed always yields the same catalogue, so benchmarks and load
/// tests can be compared across runs.
#[derive(Debug)]
pub struct CatalogueGenerator {
    cfg: CatalogueConfig,
    rng: StdRng,
}

impl CatalogueGenerator {
    pub fn new(cfg: CatalogueConfig) -> Self {
        let rng = StdRng::seed_from_u64(cfg.seed);
        Self { cfg, rng }
    }

    pub fn generate(&mut self) -> ComponentCatalog {
        let mut cat = ComponentCatalog::default();
        let n = self.cfg.per_category;

        for i in 0..n {
            let att = self.between(self.cfg.cable_attenuation_per_100m);
            let cost = self.price(1.2);
            cat.cables.push(Cable {
                id: format!("gen_cable_{i}"),
                model: format!("CX-{:03}", i),
                cost,
                max_length_m: 100.0 + 50.0 * (i % 3) as f64,
                attenuation_per_100m: Some(att),
            });
        }
        for i in 0..n {
            let branch = self.between(self.cfg.splitter_branch_loss);
            let extra = self.between(self.cfg.splitter_insertion_extra);
            let cost = self.price(8.0);
            cat.splitters.push(Splitter {
                id: format!("gen_splitter_{i}"),
                model: format!("DER-{:03}", i),
                cost,
                insertion_loss: branch + extra,
                branch_loss: branch,
                directivity: 20.0,
                decoupling: 15.0,
            });
        }
        for i in 0..n {
            let loss = self.between(self.cfg.distribution_loss);
            let cost = self.price(10.0);
            cat.distributors.push(Distributor {
                id: format!("gen_distributor_{i}"),
                model: format!("DIS-{:03}", i),
                cost,
                num_outputs: 2 << (i % 3),
                distribution_loss: loss,
                decoupling: 20.0,
            });
        }
        for i in 0..n {
            let gain = self.between(self.cfg.amplifier_gain);
            let nf = self.between(self.cfg.amplifier_noise_figure);
            let cost = self.price(60.0 + gain * 2.0);
            cat.amplifiers.push(Amplifier {
                id: format!("gen_amplifier_{i}"),
                model: format!("AMP-{:03}", i),
                cost,
                attenuation: 1.0,
                gain,
                noise_figure: nf,
            });
        }
        for i in 0..n {
            let att = self.between(self.cfg.tap_attenuation);
            let cost = self.price(3.0);
            cat.taps.push(Tap {
                id: format!("gen_tap_{i}"),
                model: format!("TM-{:03}", i),
                cost,
                attenuation: att,
                decoupling: 14.0,
            });
        }

        cat
    }

    fn between(&mut self, (lo, hi): (f64, f64)) -> f64 {
        if hi <= lo {
            return lo;
        }
        lo + self.rng.random::<f64>() * (hi - lo)
    }

    /// Cents-rounded price around `base`.
    fn price(&mut self, base: f64) -> f64 {
        let scale = self.between(self.cfg.cost_scale);
        (base * scale * 100.0).round() / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_is_deterministic_for_seed() {
        let cfg = CatalogueConfig {
            seed: 42,
            ..CatalogueConfig::default()
        };
        let a = CatalogueGenerator::new(cfg.clone()).generate();
        let b = CatalogueGenerator::new(cfg).generate();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let a = CatalogueGenerator::new(CatalogueConfig {
            seed: 1,
            ..CatalogueConfig::default()
        })
        .generate();
        let b = CatalogueGenerator::new(CatalogueConfig {
            seed: 2,
            ..CatalogueConfig::default()
        })
        .generate();
        assert_ne!(a, b);
    }

    #[test]
    fn values_stay_within_bounds() {
        let cfg = CatalogueConfig {
            seed: 7,
            per_category: 16,
            ..CatalogueConfig::default()
        };
        let cat = CatalogueGenerator::new(cfg.clone()).generate();
        assert_eq!(cat.len(), 16 * 5);
        for c in &cat.cables {
            let att = c.attenuation_per_100m.unwrap();
            assert!(att >= cfg.cable_attenuation_per_100m.0 && att <= cfg.cable_attenuation_per_100m.1);
            assert!(c.cost > 0.0);
        }
        for s in &cat.splitters {
            assert!(s.insertion_loss > s.branch_loss);
        }
        for a in &cat.amplifiers {
            assert!(a.gain >= cfg.amplifier_gain.0 && a.gain <= cfg.amplifier_gain.1);
        }
    }

    #[test]
    fn generated_catalogue_passes_validation() {
        let cat = CatalogueGenerator::new(CatalogueConfig::default()).generate();
        let toml = cat.to_toml_string().unwrap();
        let reloaded = ComponentCatalog::from_toml_str(&toml).unwrap();
        assert_eq!(reloaded.len(), cat.len());
        assert_eq!(reloaded.cables[0].id, "gen_cable_0");
    }
}
