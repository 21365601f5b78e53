use crate::specialists::{Specialist, SpecialistRegistry};

/// Decides which specialist a manager classification points at.
pub trait RoutingPolicy: Send + Sync {
    /// Returns `None` when the classification names no known topic.
    fn select<'a>(
        &self,
        classification: &str,
        registry: &'a SpecialistRegistry,
    ) -> Option<&'a Specialist>;
}

/// Picks the first topic, in registry order, whose name appears anywhere in
/// the classification, ignoring case.
///
/// This is a keyword heuristic: "Websites" matches Web and the response is
/// never checked against the topic list.
#[derive(Debug, Default, Clone, Copy)]
pub struct SubstringPolicy;

impl RoutingPolicy for SubstringPolicy {
    fn select<'a>(
        &self,
        classification: &str,
        registry: &'a SpecialistRegistry,
    ) -> Option<&'a Specialist> {
        let haystack = classification.to_lowercase();
        registry
            .iter()
            .find(|specialist| haystack.contains(&specialist.name.to_lowercase()))
    }
}
