//! Component catalogue.
//!
//! The catalogue is a read-only snapshot of five ordered category lists.
//! Order is significant: selection ties are broken by first occurrence.
//!
//! TOML layout:
//!
//! ```toml
//! [[cables]]
//! model = "RG-6"
//! cost = 0.8
//! max_length_m = 100.0
//! attenuation_per_100m = 18.5
//!
//! [[splitters]]
//! model = "DER-2"
//! cost = 6.0
//! insertion_loss = 3.5
//! branch_loss = 1.2
//! ```

use serde::{Deserialize, Serialize};

use crate::components::{Amplifier, Cable, Category, Component, Distributor, Part, Splitter, Tap};
use crate::ids;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentCatalog {
    pub cables: Vec<Cable>,
    pub splitters: Vec<Splitter>,
    pub distributors: Vec<Distributor>,
    pub amplifiers: Vec<Amplifier>,
    pub taps: Vec<Tap>,
}

impl ComponentCatalog {
    pub fn from_toml_str(input: &str) -> Result<Self, String> {
        if input.trim().is_empty() {
            return Ok(ComponentCatalog::default());
        }
        let parsed: ComponentCatalog =
            toml::from_str(input).map_err(|e| format!("Invalid catalogue TOML: {}", e))?;
        parsed.resolve()
    }

    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let parsed: ComponentCatalog =
            serde_json::from_str(input).map_err(|e| format!("Invalid catalogue JSON: {}", e))?;
        parsed.resolve()
    }

    pub fn to_toml_string(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Catalogue not representable as TOML: {}", e))
    }

    /// Build a catalogue from a flat list of tagged components, keeping the
    /// relative order within each category.
    pub fn from_components<I: IntoIterator<Item = Component>>(items: I) -> Self {
        let mut cat = ComponentCatalog::default();
        for item in items {
            cat.push(item);
        }
        cat
    }

    pub fn push(&mut self, component: Component) {
        match component {
            Component::Cable(c) => self.cables.push(c),
            Component::Splitter(s) => self.splitters.push(s),
            Component::Distributor(d) => self.distributors.push(d),
            Component::Amplifier(a) => self.amplifiers.push(a),
            Component::Tap(t) => self.taps.push(t),
        }
    }

    /// Assign IDs to rows loaded without one and reject malformed numbers.
    pub fn resolve(mut self) -> Result<Self, String> {
        fill_ids(&mut self.cables);
        fill_ids(&mut self.splitters);
        fill_ids(&mut self.distributors);
        fill_ids(&mut self.amplifiers);
        fill_ids(&mut self.taps);

        for part in self.parts() {
            let cost = part.cost();
            if !cost.is_finite() || cost < 0.0 {
                return Err(format!(
                    "{} '{}' has invalid cost {}",
                    part.category(),
                    part.model(),
                    cost
                ));
            }
        }
        for c in &self.cables {
            check_finite(Category::Cable, &c.model, "max_length_m", c.max_length_m)?;
            if let Some(att) = c.attenuation_per_100m {
                check_finite(Category::Cable, &c.model, "attenuation_per_100m", att)?;
            }
        }
        for s in &self.splitters {
            check_finite(Category::Splitter, &s.model, "insertion_loss", s.insertion_loss)?;
            check_finite(Category::Splitter, &s.model, "branch_loss", s.branch_loss)?;
        }
        for d in &self.distributors {
            check_finite(
                Category::Distributor,
                &d.model,
                "distribution_loss",
                d.distribution_loss,
            )?;
        }
        for a in &self.amplifiers {
            check_finite(Category::Amplifier, &a.model, "gain", a.gain)?;
            check_finite(Category::Amplifier, &a.model, "attenuation", a.attenuation)?;
            check_finite(Category::Amplifier, &a.model, "noise_figure", a.noise_figure)?;
        }
        for t in &self.taps {
            check_finite(Category::Tap, &t.model, "attenuation", t.attenuation)?;
        }
        Ok(self)
    }

    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Cable => self.cables.len(),
            Category::Splitter => self.splitters.len(),
            Category::Distributor => self.distributors.len(),
            Category::Amplifier => self.amplifiers.len(),
            Category::Tap => self.taps.len(),
        }
    }

    pub fn len(&self) -> usize {
        Category::ALL.iter().map(|c| self.count(*c)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every part, category by category, in catalogue order.
    pub fn parts(&self) -> impl Iterator<Item = &dyn Part> + '_ {
        self.cables
            .iter()
            .map(|c| c as &dyn Part)
            .chain(self.splitters.iter().map(|s| s as &dyn Part))
            .chain(self.distributors.iter().map(|d| d as &dyn Part))
            .chain(self.amplifiers.iter().map(|a| a as &dyn Part))
            .chain(self.taps.iter().map(|t| t as &dyn Part))
    }

    pub fn components(&self) -> impl Iterator<Item = Component> + '_ {
        self.cables
            .iter()
            .cloned()
            .map(Component::Cable)
            .chain(self.splitters.iter().cloned().map(Component::Splitter))
            .chain(self.distributors.iter().cloned().map(Component::Distributor))
            .chain(self.amplifiers.iter().cloned().map(Component::Amplifier))
            .chain(self.taps.iter().cloned().map(Component::Tap))
    }

    pub fn find(&self, id: &str) -> Option<Component> {
        self.components().find(|c| c.id() == id)
    }
}

fn fill_ids<T: HasId>(rows: &mut [T]) {
    for row in rows {
        if row.id_mut().trim().is_empty() {
            *row.id_mut() = ids::component_id();
        }
    }
}

fn check_finite(category: Category, model: &str, field: &str, value: f64) -> Result<(), String> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(format!("{category} '{model}' has non-finite {field}"))
    }
}

trait HasId {
    fn id_mut(&mut self) -> &mut String;
}

macro_rules! impl_has_id {
    ($($ty:ty),*) => {
        $(impl HasId for $ty {
            fn id_mut(&mut self) -> &mut String {
                &mut self.id
            }
        })*
    };
}

impl_has_id!(Cable, Splitter, Distributor, Amplifier, Tap);
