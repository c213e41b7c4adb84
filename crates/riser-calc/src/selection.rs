//! Per-floor component selection strategies.
//!
//! The optimizer asks a [`SelectionStrategy`] which parts to place on each
//! floor. [`CheapestFirst`] is the historical greedy policy: the cheapest
//! part of every category, independently, with no regard for whether the
//! resulting level lands inside the quality margin. [`MarginAware`] searches
//! combinations and prefers the cheapest one that does.

use riser_common::{
    Amplifier, Cable, Category, ComponentCatalog, Distributor, Part, QualityMargin, Splitter, Tap,
};
use serde::{Deserialize, Serialize};

use crate::evaluator;
use crate::quality;

/// Parts chosen for one floor. `None` means the category is not installed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub cable: Option<Cable>,
    pub splitter: Option<Splitter>,
    pub distributor: Option<Distributor>,
    pub amplifier: Option<Amplifier>,
    pub tap: Option<Tap>,
}

impl Selection {
    pub fn cost(&self) -> f64 {
        self.parts().map(|p| p.cost()).sum()
    }

    pub fn parts(&self) -> impl Iterator<Item = &dyn Part> + '_ {
        let cable = self.cable.as_ref().map(|c| c as &dyn Part);
        let splitter = self.splitter.as_ref().map(|s| s as &dyn Part);
        let distributor = self.distributor.as_ref().map(|d| d as &dyn Part);
        let amplifier = self.amplifier.as_ref().map(|a| a as &dyn Part);
        let tap = self.tap.as_ref().map(|t| t as &dyn Part);
        [cable, splitter, distributor, amplifier, tap].into_iter().flatten()
    }

    pub fn model(&self, category: Category) -> Option<&str> {
        self.parts()
            .find(|p| p.category() == category)
            .map(|p| p.model())
    }

    /// Level at the floor output for this selection.
    pub fn evaluate(&self, input_level: f64, cable_length_m: f64, is_last_floor: bool) -> f64 {
        evaluator::evaluate(
            input_level,
            self.cable.as_ref(),
            cable_length_m,
            self.splitter.as_ref(),
            self.distributor.as_ref(),
            self.amplifier.as_ref(),
            is_last_floor,
        )
    }

    /// [`Selection::evaluate`] with one step per installed component.
    pub fn trace(
        &self,
        input_level: f64,
        cable_length_m: f64,
        is_last_floor: bool,
    ) -> (f64, Vec<evaluator::ChainStep>) {
        evaluator::evaluate_traced(
            input_level,
            self.cable.as_ref(),
            cable_length_m,
            self.splitter.as_ref(),
            self.distributor.as_ref(),
            self.amplifier.as_ref(),
            is_last_floor,
        )
    }
}

/// What a strategy knows about the floor being equipped.
#[derive(Debug, Clone, Copy)]
pub struct FloorContext<'a> {
    pub floor: u32,
    pub floor_count: u32,
    pub input_level: f64,
    pub cable_length_m: f64,
    pub margin: Option<&'a QualityMargin>,
    pub required: &'a [Category],
}

impl FloorContext<'_> {
    pub fn is_last_floor(&self) -> bool {
        self.floor == self.floor_count
    }

    pub fn is_required(&self, category: Category) -> bool {
        self.required.contains(&category)
    }
}

/// Picks the parts for one floor.
///
/// Implementations may assume every required category is non-empty; the
/// optimizer checks availability before asking.
pub trait SelectionStrategy: std::fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;
    fn select(&self, ctx: &FloorContext<'_>, catalog: &ComponentCatalog) -> Selection;
}

/// First-encountered minimum-cost item.
pub fn cheapest<T: Part>(items: &[T]) -> Option<&T> {
    let mut best: Option<&T> = None;
    for item in items {
        match best {
            Some(b) if item.cost() >= b.cost() => {}
            _ => best = Some(item),
        }
    }
    best
}

// ── Greedy ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct CheapestFirst;

impl SelectionStrategy for CheapestFirst {
    fn name(&self) -> &'static str {
        "cheapest"
    }

    fn select(&self, _ctx: &FloorContext<'_>, catalog: &ComponentCatalog) -> Selection {
        Selection {
            cable: cheapest(&catalog.cables).cloned(),
            splitter: cheapest(&catalog.splitters).cloned(),
            distributor: cheapest(&catalog.distributors).cloned(),
            amplifier: cheapest(&catalog.amplifiers).cloned(),
            tap: cheapest(&catalog.taps).cloned(),
        }
    }
}

// ── Constraint-aware ────────────────────────────────────────────────

pub const DEFAULT_MAX_COMBINATIONS: usize = 4096;

/// Exhaustive search over riser combinations.
///
/// Optional categories may also be left out. Among combinations whose
/// output is inside the margin the cheapest wins; if none is, the one
/// closest to the band (then cheapest) wins. Candidate lists are pruned of
/// their most expensive entries until the search space fits
/// `max_combinations`. Without a margin this degrades to [`CheapestFirst`].
#[derive(Debug, Clone, Copy)]
pub struct MarginAware {
    pub max_combinations: usize,
}

impl Default for MarginAware {
    fn default() -> Self {
        Self {
            max_combinations: DEFAULT_MAX_COMBINATIONS,
        }
    }
}

/// Candidates for one category, cheapest first (stable on catalogue order).
fn candidates<'a, T: Part>(items: &'a [T], optional: bool) -> Vec<Option<&'a T>> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by(|a, b| a.cost().total_cmp(&b.cost()));
    let mut out = Vec::with_capacity(sorted.len() + 1);
    if optional || sorted.is_empty() {
        out.push(None);
    }
    out.extend(sorted.into_iter().map(Some));
    out
}

impl SelectionStrategy for MarginAware {
    fn name(&self) -> &'static str {
        "margin-aware"
    }

    fn select(&self, ctx: &FloorContext<'_>, catalog: &ComponentCatalog) -> Selection {
        let Some(margin) = ctx.margin else {
            return CheapestFirst.select(ctx, catalog);
        };

        let mut cables = candidates(&catalog.cables, !ctx.is_required(Category::Cable));
        let mut splitters = candidates(&catalog.splitters, !ctx.is_required(Category::Splitter));
        let mut distributors =
            candidates(&catalog.distributors, !ctx.is_required(Category::Distributor));
        let mut amplifiers = candidates(&catalog.amplifiers, !ctx.is_required(Category::Amplifier));

        let limit = self.max_combinations.max(1);
        loop {
            let lens = [
                cables.len(),
                splitters.len(),
                distributors.len(),
                amplifiers.len(),
            ];
            let total = lens.iter().fold(1usize, |acc, l| acc.saturating_mul(*l));
            if total <= limit {
                break;
            }
            // Drop the most expensive candidate from the longest list.
            let (idx, _) = lens
                .iter()
                .enumerate()
                .max_by_key(|(i, l)| (**l, std::cmp::Reverse(*i)))
                .unwrap_or((0, &0));
            match idx {
                0 => {
                    cables.pop();
                }
                1 => {
                    splitters.pop();
                }
                2 => {
                    distributors.pop();
                }
                _ => {
                    amplifiers.pop();
                }
            }
        }

        // (deviation, cost, cable, splitter, distributor, amplifier)
        type Best<'a> = (
            f64,
            f64,
            Option<&'a Cable>,
            Option<&'a Splitter>,
            Option<&'a Distributor>,
            Option<&'a Amplifier>,
        );
        let mut best: Option<Best<'_>> = None;
        let last = ctx.is_last_floor();

        for &c in &cables {
            for &s in &splitters {
                for &d in &distributors {
                    for &a in &amplifiers {
                        let level =
                            evaluator::evaluate(ctx.input_level, c, ctx.cable_length_m, s, d, a, last);
                        let deviation = quality::margin_deviation(level, margin);
                        let cost = c.map_or(0.0, |p| p.cost())
                            + s.map_or(0.0, |p| p.cost())
                            + d.map_or(0.0, |p| p.cost())
                            + a.map_or(0.0, |p| p.cost());
                        let better = match best {
                            None => true,
                            Some((bd, bc, ..)) => deviation < bd || (deviation == bd && cost < bc),
                        };
                        if better {
                            best = Some((deviation, cost, c, s, d, a));
                        }
                    }
                }
            }
        }

        let mut selection = Selection {
            tap: cheapest(&catalog.taps).cloned(),
            ..Selection::default()
        };
        if let Some((deviation, cost, c, s, d, a)) = best {
            if deviation > 0.0 {
                tracing::warn!(
                    floor = ctx.floor,
                    deviation_db = deviation,
                    signal_type = %margin.signal_type,
                    "no combination meets the quality margin, using closest"
                );
            } else {
                tracing::debug!(floor = ctx.floor, cost, "margin-aware selection found");
            }
            selection.cable = c.cloned();
            selection.splitter = s.cloned();
            selection.distributor = d.cloned();
            selection.amplifier = a.cloned();
        }
        selection
    }
}

/// Named strategies selectable from configuration.
///
/// The two differ on optional categories (those not in
/// [`FloorContext::required`]): `Cheapest` installs the cheapest part of
/// every non-empty category whether required or not, so a catalogue entry is
/// always fitted when one exists. `MarginAware` treats optional categories as
/// removable and may leave them uninstalled when the floor lands closer to
/// the margin (or cheaper within it) without them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    #[default]
    Cheapest,
    MarginAware,
}

impl StrategyKind {
    pub fn build(self) -> Box<dyn SelectionStrategy> {
        match self {
            StrategyKind::Cheapest => Box::new(CheapestFirst),
            StrategyKind::MarginAware => Box::new(MarginAware::default()),
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::Cheapest => write!(f, "cheapest"),
            StrategyKind::MarginAware => write!(f, "margin-aware"),
        }
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cheapest" | "greedy" => Ok(StrategyKind::Cheapest),
            "margin-aware" => Ok(StrategyKind::MarginAware),
            other => Err(format!("unknown selection strategy: {other}")),
        }
    }
}
