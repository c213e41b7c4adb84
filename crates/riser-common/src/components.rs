//! RF component variants.
//!
//! Every part in the catalogue is one of five categories. Each variant is a
//! plain struct with its category-specific electrical parameters; the
//! [`Component`] enum is the tagged union over them and [`Part`] is the
//! capability shared by all of them (identity, model name, cost).
//!
//! Levels and losses are in dB, costs in the catalogue's currency unit.

use serde::{Deserialize, Serialize};

// ── Category ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Cable,
    Splitter,
    Distributor,
    Amplifier,
    Tap,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Cable,
        Category::Splitter,
        Category::Distributor,
        Category::Amplifier,
        Category::Tap,
    ];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Cable => write!(f, "cable"),
            Category::Splitter => write!(f, "splitter"),
            Category::Distributor => write!(f, "distributor"),
            Category::Amplifier => write!(f, "amplifier"),
            Category::Tap => write!(f, "tap"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cable" => Ok(Category::Cable),
            "splitter" | "derivador" => Ok(Category::Splitter),
            "distributor" | "distribuidor" => Ok(Category::Distributor),
            "amplifier" => Ok(Category::Amplifier),
            "tap" | "toma" => Ok(Category::Tap),
            other => Err(format!("unknown component category: {other}")),
        }
    }
}

/// Capability shared by every catalogue part.
pub trait Part {
    fn id(&self) -> &str;
    fn model(&self) -> &str;
    fn cost(&self) -> f64;
    fn category(&self) -> Category;
}

macro_rules! impl_part {
    ($ty:ty, $cat:expr) => {
        impl Part for $ty {
            fn id(&self) -> &str {
                &self.id
            }
            fn model(&self) -> &str {
                &self.model
            }
            fn cost(&self) -> f64 {
                self.cost
            }
            fn category(&self) -> Category {
                $cat
            }
        }
    };
}

// ── Variants ────────────────────────────────────────────────────────

/// Coaxial cable sold by length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cable {
    #[serde(default)]
    pub id: String,
    pub model: String,
    pub cost: f64,
    /// Longest run the manufacturer rates this cable for, in metres.
    #[serde(default)]
    pub max_length_m: f64,
    /// Attenuation in dB per 100 m. Missing on some catalogue rows; the
    /// evaluator substitutes a fixed fallback coefficient.
    #[serde(default)]
    pub attenuation_per_100m: Option<f64>,
}

/// Tap-off splitter ("derivador") on the riser.
///
/// `insertion_loss` applies when the splitter terminates the line (last
/// floor); `branch_loss` when the line continues past it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Splitter {
    #[serde(default)]
    pub id: String,
    pub model: String,
    pub cost: f64,
    pub insertion_loss: f64,
    pub branch_loss: f64,
    #[serde(default)]
    pub directivity: f64,
    #[serde(default)]
    pub decoupling: f64,
}

/// In-floor distributor ("distribuidor") feeding several outlets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distributor {
    #[serde(default)]
    pub id: String,
    pub model: String,
    pub cost: f64,
    pub num_outputs: u32,
    pub distribution_loss: f64,
    #[serde(default)]
    pub decoupling: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amplifier {
    #[serde(default)]
    pub id: String,
    pub model: String,
    pub cost: f64,
    #[serde(default)]
    pub attenuation: f64,
    pub gain: f64,
    #[serde(default)]
    pub noise_figure: f64,
}

/// User outlet ("toma").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tap {
    #[serde(default)]
    pub id: String,
    pub model: String,
    pub cost: f64,
    pub attenuation: f64,
    #[serde(default)]
    pub decoupling: f64,
}

impl_part!(Cable, Category::Cable);
impl_part!(Splitter, Category::Splitter);
impl_part!(Distributor, Category::Distributor);
impl_part!(Amplifier, Category::Amplifier);
impl_part!(Tap, Category::Tap);

// ── Tagged union ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum Component {
    Cable(Cable),
    Splitter(Splitter),
    Distributor(Distributor),
    Amplifier(Amplifier),
    Tap(Tap),
}

impl Component {
    fn as_part(&self) -> &dyn Part {
        match self {
            Component::Cable(c) => c,
            Component::Splitter(s) => s,
            Component::Distributor(d) => d,
            Component::Amplifier(a) => a,
            Component::Tap(t) => t,
        }
    }
}

impl Part for Component {
    fn id(&self) -> &str {
        self.as_part().id()
    }
    fn model(&self) -> &str {
        self.as_part().model()
    }
    fn cost(&self) -> f64 {
        self.as_part().cost()
    }
    fn category(&self) -> Category {
        self.as_part().category()
    }
}
