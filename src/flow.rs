//! Flows and the flow registry.
//!
//! A [`Flow`] is a named, ordered list of steps. Flows are declared as
//! `static` data and collected in a [`FlowRegistry`], which keeps them in
//! registration order (the order the host offers them for selection).
//!
//! Registration validates what can be checked locally: ids are unique, flows
//! are not empty, and in-flow jump targets point at existing steps. Targets in
//! other flows are resolved when the jump happens.

use thiserror::Error;

use crate::step::{Step, Target};

// =============================================================================
// Flow
// =============================================================================

#[derive(Clone, Copy, Debug)]
pub struct Flow {
    /// Selection key, e.g. `"firmwareUpdate"`.
    pub id: &'static str,
    pub steps: &'static [Step],
    /// Initial value of `powered_on` when the flow is selected.
    pub starts_powered: bool,
}

impl Flow {
    pub const fn new(id: &'static str, steps: &'static [Step]) -> Self {
        Self {
            id,
            steps,
            starts_powered: true,
        }
    }

    /// The flow starts with the device powered off.
    pub const fn starting_off(mut self) -> Self {
        self.starts_powered = false;
        self
    }

    #[inline]
    pub const fn len(&self) -> usize { self.steps.len() }

    #[inline]
    pub const fn is_empty(&self) -> bool { self.steps.is_empty() }

    #[inline]
    pub fn step(&self, index: usize) -> Option<&'static Step> { self.steps.get(index) }

    /// Human-readable label derived from the id.
    pub fn label(&self) -> String { to_title_case(self.id) }
}

/// `"firmwareUpdate"` -> `"Firmware Update"`, `"error_states"` -> `"Error States"`.
pub fn to_title_case(id: &str) -> String {
    let mut out = String::with_capacity(id.len() + 4);
    let mut word_start = true;
    for c in id.chars() {
        if c == '_' || c == '-' || c == ' ' {
            if !out.is_empty() && !out.ends_with(' ') {
                out.push(' ');
            }
            word_start = true;
            continue;
        }
        if c.is_uppercase() && !out.is_empty() && !out.ends_with(' ') {
            out.push(' ');
            word_start = true;
        }
        if word_start {
            out.extend(c.to_uppercase());
            word_start = false;
        } else {
            out.push(c);
        }
    }
    out
}

// =============================================================================
// Registry
// =============================================================================

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("flow `{0}` is already registered")]
    DuplicateFlow(String),

    #[error("flow `{0}` has no steps")]
    EmptyFlow(String),

    #[error("step {step} of flow `{flow}` jumps to missing step {target}")]
    DanglingTarget { flow: String, step: usize, target: usize },
}

/// Ordered collection of flows keyed by id.
#[derive(Debug, Default)]
pub struct FlowRegistry {
    flows: Vec<Flow>,
}

impl FlowRegistry {
    pub const fn new() -> Self { Self { flows: Vec::new() } }

    /// Registry holding the built-in flows, in selection order.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for flow in crate::screens::BUILTIN_FLOWS {
            if let Err(err) = registry.register(*flow) {
                log::warn!("skipping built-in flow: {err}");
            }
        }
        registry
    }

    pub fn register(
        &mut self,
        flow: Flow,
    ) -> Result<(), RegistryError> {
        if self.get(flow.id).is_some() {
            return Err(RegistryError::DuplicateFlow(flow.id.into()));
        }
        if flow.is_empty() {
            return Err(RegistryError::EmptyFlow(flow.id.into()));
        }
        for (index, step) in flow.steps.iter().enumerate() {
            if let Some(advance) = step.auto_advance
                && let Target::Step(target) = advance.target
                && target >= flow.len()
            {
                return Err(RegistryError::DanglingTarget {
                    flow: flow.id.into(),
                    step: index,
                    target,
                });
            }
        }
        log::debug!("registered flow `{}` ({} steps)", flow.id, flow.len());
        self.flows.push(flow);
        Ok(())
    }

    pub fn get(
        &self,
        id: &str,
    ) -> Option<&Flow> {
        self.flows.iter().find(|flow| flow.id == id)
    }

    pub fn index_of(
        &self,
        id: &str,
    ) -> Option<usize> {
        self.flows.iter().position(|flow| flow.id == id)
    }

    #[inline]
    pub fn by_index(&self, index: usize) -> Option<&Flow> { self.flows.get(index) }

    /// Flow ids in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ { self.flows.iter().map(|flow| flow.id) }

    pub fn iter(&self) -> impl Iterator<Item = &Flow> { self.flows.iter() }

    #[inline]
    pub const fn len(&self) -> usize { self.flows.len() }

    #[inline]
    pub const fn is_empty(&self) -> bool { self.flows.is_empty() }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::{
        led::LedDescriptor,
        step::Frame,
        surface::Surface,
    };

    fn blank(_: &mut dyn Surface, _: &Frame<'_>) {}

    static TWO_STEPS: [Step; 2] = [
        Step::new("First", "", LedDescriptor::OFF, blank),
        Step::new("Second", "", LedDescriptor::OFF, blank).advance_after(10, Target::Step(0)),
    ];

    static DANGLING: [Step; 1] = [Step::new("Lost", "", LedDescriptor::OFF, blank).advance_after(1, Target::Step(4))];

    #[test_case("power", "Power"; "single word")]
    #[test_case("firmwareUpdate", "Firmware Update"; "camel case")]
    #[test_case("errorStates", "Error States"; "camel case two")]
    #[test_case("battery_status", "Battery Status"; "snake case")]
    #[test_case("", ""; "empty")]
    fn test_title_case(id: &str, expected: &str) {
        assert_eq!(to_title_case(id), expected);
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = FlowRegistry::new();
        registry.register(Flow::new("alpha", &TWO_STEPS)).unwrap();
        registry.register(Flow::new("beta", &TWO_STEPS).starting_off()).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["alpha", "beta"], "Registration order kept");
        assert_eq!(registry.index_of("beta"), Some(1));
        assert!(!registry.get("beta").unwrap().starts_powered);
        assert!(registry.get("gamma").is_none());
    }

    #[test]
    fn test_duplicate_flow_rejected() {
        let mut registry = FlowRegistry::new();
        registry.register(Flow::new("alpha", &TWO_STEPS)).unwrap();

        assert_eq!(
            registry.register(Flow::new("alpha", &TWO_STEPS)),
            Err(RegistryError::DuplicateFlow("alpha".into()))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_empty_flow_rejected() {
        let mut registry = FlowRegistry::new();
        assert_eq!(registry.register(Flow::new("none", &[])), Err(RegistryError::EmptyFlow("none".into())));
    }

    #[test]
    fn test_dangling_target_rejected() {
        let mut registry = FlowRegistry::new();
        let err = registry.register(Flow::new("lost", &DANGLING)).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DanglingTarget {
                flow: "lost".into(),
                step: 0,
                target: 4
            }
        );
        assert!(err.to_string().contains("missing step 4"));
    }

    #[test]
    fn test_builtin_registry_is_complete() {
        let registry = FlowRegistry::builtin();
        assert_eq!(registry.len(), crate::screens::BUILTIN_FLOWS.len(), "Every built-in flow should register");
        assert_eq!(registry.keys().next(), Some("power"), "Power flow is offered first");
    }
}
