//! Signal chain evaluation.
//!
//! A floor sees the riser level after a fixed sequence of optional
//! components: cable run, splitter, distributor, amplifier. Each absent
//! component contributes nothing; there are no error conditions and the
//! result (dBμV) may be negative.

use riser_common::{Amplifier, Cable, Category, Distributor, Part, Splitter, Tap};
use serde::{Deserialize, Serialize};

/// Fallback cable coefficient (dB per 100 m) for catalogue rows without one.
///
/// This is a stand-in, not a measured value. Real deployments should carry
/// the manufacturer's figure on every cable row.
pub const DEFAULT_CABLE_ATTENUATION_PER_100M: f64 = 20.0;

pub fn cable_loss(cable: &Cable, length_m: f64) -> f64 {
    let per_100m = cable
        .attenuation_per_100m
        .unwrap_or(DEFAULT_CABLE_ATTENUATION_PER_100M);
    per_100m * length_m / 100.0
}

/// Terminating splitters lose `insertion_loss`, pass-through ones only the
/// branch tap.
pub fn splitter_loss(splitter: &Splitter, is_last_floor: bool) -> f64 {
    if is_last_floor {
        splitter.insertion_loss
    } else {
        splitter.branch_loss
    }
}

/// Level reaching a floor after its components.
pub fn evaluate(
    input_level: f64,
    cable: Option<&Cable>,
    cable_length_m: f64,
    splitter: Option<&Splitter>,
    distributor: Option<&Distributor>,
    amplifier: Option<&Amplifier>,
    is_last_floor: bool,
) -> f64 {
    let mut chain = SignalChain::new(input_level);
    if let Some(c) = cable {
        chain = chain.cable(c, cable_length_m);
    }
    if let Some(s) = splitter {
        chain = chain.splitter(s, is_last_floor);
    }
    if let Some(d) = distributor {
        chain = chain.distributor(d);
    }
    if let Some(a) = amplifier {
        chain = chain.amplifier(a);
    }
    chain.level()
}

/// Same as [`evaluate`], also returning one [`ChainStep`] per component.
pub fn evaluate_traced(
    input_level: f64,
    cable: Option<&Cable>,
    cable_length_m: f64,
    splitter: Option<&Splitter>,
    distributor: Option<&Distributor>,
    amplifier: Option<&Amplifier>,
    is_last_floor: bool,
) -> (f64, Vec<ChainStep>) {
    let mut chain = SignalChain::traced(input_level);
    if let Some(c) = cable {
        chain = chain.cable(c, cable_length_m);
    }
    if let Some(s) = splitter {
        chain = chain.splitter(s, is_last_floor);
    }
    if let Some(d) = distributor {
        chain = chain.distributor(d);
    }
    if let Some(a) = amplifier {
        chain = chain.amplifier(a);
    }
    let level = chain.level();
    (level, chain.into_steps())
}

/// Level at a user outlet fed from a floor's distributor output.
pub fn outlet_level(floor_level: f64, tap: &Tap) -> f64 {
    floor_level - tap.attenuation
}

/// One component's contribution to a chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainStep {
    pub category: Category,
    pub model: String,
    /// Signed change in dB (negative for losses).
    pub delta: f64,
    pub level_after: f64,
}

/// Builder applying components to a running level.
///
/// Callers are responsible for the order; [`evaluate`] applies the riser
/// order (cable, splitter, distributor, amplifier).
#[derive(Debug, Clone)]
pub struct SignalChain {
    level: f64,
    steps: Option<Vec<ChainStep>>,
}

impl SignalChain {
    pub fn new(input_level: f64) -> Self {
        Self {
            level: input_level,
            steps: None,
        }
    }

    pub fn traced(input_level: f64) -> Self {
        Self {
            level: input_level,
            steps: Some(Vec::new()),
        }
    }

    pub fn cable(mut self, cable: &Cable, length_m: f64) -> Self {
        let before = self.level;
        self.level -= cable_loss(cable, length_m);
        self.record(cable, before);
        self
    }

    pub fn splitter(mut self, splitter: &Splitter, is_last_floor: bool) -> Self {
        let before = self.level;
        self.level -= splitter_loss(splitter, is_last_floor);
        self.record(splitter, before);
        self
    }

    pub fn distributor(mut self, distributor: &Distributor) -> Self {
        let before = self.level;
        self.level -= distributor.distribution_loss;
        self.record(distributor, before);
        self
    }

    /// Gain and attenuation are applied as two independent adjustments.
    pub fn amplifier(mut self, amplifier: &Amplifier) -> Self {
        let before = self.level;
        self.level += amplifier.gain;
        self.level -= amplifier.attenuation;
        self.record(amplifier, before);
        self
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn into_steps(self) -> Vec<ChainStep> {
        self.steps.unwrap_or_default()
    }

    fn record(&mut self, part: &dyn Part, before: f64) {
        if let Some(steps) = self.steps.as_mut() {
            steps.push(ChainStep {
                category: part.category(),
                model: part.model().to_string(),
                delta: self.level - before,
                level_after: self.level,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cable(att: Option<f64>) -> Cable {
        Cable {
            id: "c".into(),
            model: "RG-6".into(),
            cost: 1.0,
            max_length_m: 100.0,
            attenuation_per_100m: att,
        }
    }

    fn splitter() -> Splitter {
        Splitter {
            id: "s".into(),
            model: "DER-2".into(),
            cost: 5.0,
            insertion_loss: 4.0,
            branch_loss: 1.5,
            directivity: 0.0,
            decoupling: 0.0,
        }
    }

    fn distributor() -> Distributor {
        Distributor {
            id: "d".into(),
            model: "DIS-4".into(),
            cost: 8.0,
            num_outputs: 4,
            distribution_loss: 7.0,
            decoupling: 0.0,
        }
    }

    fn amplifier() -> Amplifier {
        Amplifier {
            id: "a".into(),
            model: "AMP-30".into(),
            cost: 100.0,
            attenuation: 2.0,
            gain: 30.0,
            noise_figure: 6.0,
        }
    }

    #[test]
    fn no_components_is_identity() {
        assert_eq!(evaluate(73.25, None, 50.0, None, None, None, false), 73.25);
        assert_eq!(evaluate(-3.0, None, 0.0, None, None, None, true), -3.0);
    }

    #[test]
    fn cable_uses_own_coefficient() {
        let level = evaluate(90.0, Some(&cable(Some(15.0))), 40.0, None, None, None, false);
        assert!((level - 84.0).abs() < 1e-9);
    }

    #[test]
    fn cable_without_coefficient_uses_fallback() {
        let level = evaluate(90.0, Some(&cable(None)), 20.0, None, None, None, false);
        assert!((level - 86.0).abs() < 1e-9);
    }

    #[test]
    fn splitter_branch_vs_insertion() {
        let s = splitter();
        let mid = evaluate(80.0, None, 0.0, Some(&s), None, None, false);
        let last = evaluate(80.0, None, 0.0, Some(&s), None, None, true);
        assert!((mid - 78.5).abs() < 1e-9);
        assert!((last - 76.0).abs() < 1e-9);
    }

    #[test]
    fn distributor_subtracts_distribution_loss() {
        let level = evaluate(80.0, None, 0.0, None, Some(&distributor()), None, false);
        assert!((level - 73.0).abs() < 1e-9);
    }

    #[test]
    fn amplifier_adds_gain_then_subtracts_attenuation() {
        let a = amplifier();
        let level = evaluate(50.0, None, 0.0, None, None, Some(&a), false);
        assert_eq!(level, 50.0 + a.gain - a.attenuation);
    }

    #[test]
    fn full_chain_applies_all_steps() {
        let level = evaluate(
            90.0,
            Some(&cable(Some(20.0))),
            10.0,
            Some(&splitter()),
            Some(&distributor()),
            Some(&amplifier()),
            false,
        );
        // 90 - 2 - 1.5 - 7 + 30 - 2
        assert!((level - 107.5).abs() < 1e-9);
    }

    #[test]
    fn result_can_go_negative() {
        let level = evaluate(1.0, Some(&cable(Some(20.0))), 100.0, None, None, None, false);
        assert!((level - (-19.0)).abs() < 1e-9);
    }

    #[test]
    fn traced_matches_untraced_and_records_steps() {
        let c = cable(Some(20.0));
        let s = splitter();
        let a = amplifier();
        let plain = evaluate(90.0, Some(&c), 10.0, Some(&s), None, Some(&a), true);
        let (level, steps) = evaluate_traced(90.0, Some(&c), 10.0, Some(&s), None, Some(&a), true);
        assert_eq!(level, plain);
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].category, Category::Cable);
        assert!((steps[0].delta - (-2.0)).abs() < 1e-9);
        assert_eq!(steps[1].category, Category::Splitter);
        assert!((steps[1].delta - (-4.0)).abs() < 1e-9);
        assert_eq!(steps[2].model, "AMP-30");
        assert!((steps[2].level_after - level).abs() < 1e-9);
    }

    #[test]
    fn untraced_chain_has_no_steps() {
        let chain = SignalChain::new(10.0).distributor(&distributor());
        assert!(chain.into_steps().is_empty());
    }

    #[test]
    fn outlet_level_subtracts_tap() {
        let tap = Tap {
            id: "t".into(),
            model: "T-10".into(),
            cost: 2.0,
            attenuation: 10.0,
            decoupling: 0.0,
        };
        assert!((outlet_level(70.0, &tap) - 60.0).abs() < 1e-9);
    }
}
