//! Scenario definition: an ordered, finite chain of HTTP steps

pub mod loader;

pub use loader::{load_scenario, validate_scenario};

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single step of a scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    /// Step name for logging (may be empty)
    #[serde(default)]
    pub name: String,

    /// Delay expression, evaluated against the value store before dispatch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<String>,

    /// Expectation expressions, evaluated by extensions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expectations: Vec<String>,

    /// Ordered (name, expression) extraction pairs, evaluated by extensions
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extractions: IndexMap<String, String>,

    /// Repetition hint for reporting; never causes repeat dispatch
    #[serde(default = "default_samples")]
    pub samples: u32,
}

fn default_samples() -> u32 {
    1
}

impl Default for Step {
    fn default() -> Self {
        Self {
            name: String::new(),
            delay: None,
            expectations: Vec::new(),
            extractions: IndexMap::new(),
            samples: 1,
        }
    }
}

impl Step {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn has_expectations(&self) -> bool {
        !self.expectations.is_empty()
    }

    pub fn has_extractions(&self) -> bool {
        !self.extractions.is_empty()
    }
}

/// An index-addressed sequence of steps.
///
/// Finite, acyclic and forward-only as a structural property: cursors hold
/// a position into the vec and only ever advance toward its end.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenario {
    /// Name of the scenario
    #[serde(default)]
    pub name: String,

    /// Description of the scenario
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Scenario steps
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn new(name: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            steps,
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Explicit cursor over a [`Scenario`]'s step sequence.
#[derive(Debug, Clone)]
pub struct ScenarioCursor {
    scenario: Arc<Scenario>,
    index: usize,
}

impl ScenarioCursor {
    /// Cursor at the first step, or `None` for an empty scenario.
    pub fn first(scenario: Arc<Scenario>) -> Option<Self> {
        Self::at(scenario, 0)
    }

    /// Bounds-checked cursor at an arbitrary position.
    pub fn at(scenario: Arc<Scenario>, index: usize) -> Option<Self> {
        (index < scenario.steps.len()).then(|| Self { scenario, index })
    }

    /// The step under the cursor.
    pub fn step(&self) -> &Step {
        &self.scenario.steps[self.index]
    }

    /// Scenario position of the step under the cursor.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// Cursor of the following step, or `None` at the terminal step.
    pub fn advance(&self) -> Option<Self> {
        Self::at(Arc::clone(&self.scenario), self.index + 1)
    }

    pub fn is_terminal(&self) -> bool {
        self.index + 1 >= self.scenario.steps.len()
    }
}
