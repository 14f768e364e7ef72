//! The temporal query engine

use std::fmt::Display;
use std::time::Instant;

use tracing::{debug, warn};
use veritor_algebra::{compare, TolerancePolicy, Verdict};
use veritor_domain::{Claim, ClaimId, ClaimKeyStatus, ClaimStore, ClusterMap};
use veritor_extractor::{extract, hedge_strength, ExtractedValue};
use veritor_ordering::{AxisOrderInferrer, OrderingConfidence};

use crate::config::QueryConfig;
use crate::error::TemporalError;
use crate::removal::documents_removal;
use crate::types::{
    ApplicabilityStatus, ClaimCitation, ContextDiff, SinceWhenResult, StillApplicableResult,
    UncertaintyAnalysis,
};

/// Timeline positions are document-cluster granularity in this version
const TIMELINE_BASIS: &str = "cluster";

/// Read-only temporal queries over a claim store
///
/// Each query is an independent classification over current store contents;
/// the engine holds no mutable state and needs no locking. Document
/// clustering is owned upstream and injected.
pub struct TemporalQueryEngine<S, C> {
    store: S,
    clusters: C,
    inferrer: AxisOrderInferrer,
    tolerance: TolerancePolicy,
    config: QueryConfig,
}

impl<S, C> TemporalQueryEngine<S, C>
where
    S: ClaimStore,
    S::Error: Display,
    C: ClusterMap,
{
    /// Create an engine with the default query budget
    pub fn new(store: S, clusters: C) -> Self {
        Self::with_config(store, clusters, QueryConfig::default())
    }

    /// Create an engine with an explicit query budget
    pub fn with_config(store: S, clusters: C, config: QueryConfig) -> Self {
        Self {
            store,
            clusters,
            inferrer: AxisOrderInferrer::new(),
            tolerance: TolerancePolicy::default_config(),
            config,
        }
    }

    /// Since when has `capability` existed, positioned along `axis_key`?
    ///
    /// Candidate claim keys are refused outright: an unreviewed capability
    /// never gets a published timeline, however much evidence exists. When
    /// the axis order cannot be resolved the result names the earliest-seen
    /// context and its claims but carries no timeline.
    pub fn query_since_when(
        &self,
        capability: &str,
        axis_key: &str,
        status: ClaimKeyStatus,
    ) -> Result<SinceWhenResult, TemporalError> {
        if !status.is_validated() {
            debug!(capability, "refusing since-when query for candidate claim key");
            return Ok(SinceWhenResult {
                capability: capability.to_string(),
                first_occurrence_context: None,
                first_occurrence_claims: Vec::new(),
                timeline: None,
                timeline_basis: TIMELINE_BASIS.to_string(),
                ordering_confidence: OrderingConfidence::Unknown,
                refused: true,
                refused_reason: Some(
                    "claim key is an unreviewed candidate; timelines are published only for \
                     validated capabilities"
                        .to_string(),
                ),
                unresolved_reason: None,
            });
        }

        let started = Instant::now();
        let claims = self.claims_for_capability(capability)?;
        if claims.is_empty() {
            return Err(TemporalError::NoEvidence {
                capability: capability.to_string(),
            });
        }

        if self.budget_exhausted(started, claims.len()) {
            warn!(capability, claim_count = claims.len(), "since-when query budget exhausted");
            let first = &claims[0];
            return Ok(SinceWhenResult {
                capability: capability.to_string(),
                first_occurrence_context: Some(self.context_of(first, axis_key)),
                first_occurrence_claims: vec![ClaimCitation::from_claim(first)],
                timeline: None,
                timeline_basis: TIMELINE_BASIS.to_string(),
                ordering_confidence: OrderingConfidence::Unknown,
                refused: false,
                refused_reason: None,
                unresolved_reason: Some(
                    "query budget exhausted before the axis order could be resolved".to_string(),
                ),
            });
        }

        // Only claims that actually carry the axis participate in ordering;
        // cluster-fallback contexts have no discoverable position
        let mut axis_values: Vec<String> = Vec::new();
        for claim in &claims {
            if let Some(value) = claim.axis_value(axis_key) {
                if !axis_values.iter().any(|v| v == value) {
                    axis_values.push(value.to_string());
                }
            }
        }

        let inference = self.inferrer.infer_order(axis_key, &axis_values);
        debug!(
            capability,
            axis_key,
            orderable = inference.is_orderable,
            confidence = inference.confidence.as_str(),
            "since-when axis inference"
        );

        if let Some(order) = &inference.inferred_order {
            let first_context = order[0].clone();
            let first_claims: Vec<ClaimCitation> = claims
                .iter()
                .filter(|c| c.axis_value(axis_key) == Some(first_context.as_str()))
                .map(ClaimCitation::from_claim)
                .collect();
            return Ok(SinceWhenResult {
                capability: capability.to_string(),
                first_occurrence_context: Some(first_context),
                first_occurrence_claims: first_claims,
                timeline: Some(order.clone()),
                timeline_basis: TIMELINE_BASIS.to_string(),
                ordering_confidence: inference.confidence,
                refused: false,
                refused_reason: None,
                unresolved_reason: None,
            });
        }

        // No order: report the earliest-seen context, omit the timeline
        let first = &claims[0];
        let first_context = self.context_of(first, axis_key);
        let first_claims: Vec<ClaimCitation> = claims
            .iter()
            .filter(|c| self.context_of(c, axis_key) == first_context)
            .map(ClaimCitation::from_claim)
            .collect();
        Ok(SinceWhenResult {
            capability: capability.to_string(),
            first_occurrence_context: Some(first_context),
            first_occurrence_claims: first_claims,
            timeline: None,
            timeline_basis: TIMELINE_BASIS.to_string(),
            ordering_confidence: OrderingConfidence::Unknown,
            refused: false,
            refused_reason: None,
            unresolved_reason: Some(inference.reason),
        })
    }

    /// Does the claim still apply at the latest known context of its
    /// capability?
    ///
    /// `Removed` is reachable only through a distinct claim that explicitly
    /// documents removal at a later position on `axis_key`; absence of later
    /// mentions is never sufficient. Conflicting evidence (re-assertion
    /// after a documented removal) and unresolvable orderings degrade to
    /// `Uncertain`.
    pub fn query_still_applicable(
        &self,
        claim_id: ClaimId,
        axis_key: &str,
    ) -> Result<StillApplicableResult, TemporalError> {
        let subject = self
            .store
            .get_claim(claim_id)
            .map_err(|e| TemporalError::Store(e.to_string()))?
            .ok_or_else(|| TemporalError::ClaimNotFound(claim_id.to_string()))?;
        let subject_citation = ClaimCitation::from_claim(&subject);

        let started = Instant::now();
        let peers = self.claims_for_capability(&subject.capability)?;

        if self.budget_exhausted(started, peers.len()) {
            warn!(
                capability = %subject.capability,
                claim_count = peers.len(),
                "still-applicable query budget exhausted"
            );
            return Ok(uncertain(
                &subject_citation,
                vec![subject_citation.clone()],
                None,
                "query budget exhausted before evidence could be weighed",
            ));
        }

        let Some(subject_value) = subject.axis_value(axis_key) else {
            return Ok(uncertain(
                &subject_citation,
                vec![subject_citation.clone()],
                None,
                format!("claim carries no value for axis '{axis_key}'"),
            ));
        };

        let mut axis_values: Vec<String> = Vec::new();
        for claim in &peers {
            if let Some(value) = claim.axis_value(axis_key) {
                if !axis_values.iter().any(|v| v == value) {
                    axis_values.push(value.to_string());
                }
            }
        }

        let inference = self.inferrer.infer_order(axis_key, &axis_values);
        let Some(order) = inference.inferred_order else {
            let supporting: Vec<ClaimCitation> =
                peers.iter().map(ClaimCitation::from_claim).collect();
            return Ok(uncertain(
                &subject_citation,
                supporting,
                None,
                "axis order could not be established for the observed contexts",
            ));
        };

        // A store that lists peers without the subject would leave its value
        // out of the order; removal positions would be meaningless then
        let Some(subject_pos) = order.iter().position(|v| v == subject_value) else {
            return Ok(uncertain(
                &subject_citation,
                vec![subject_citation.clone()],
                None,
                "subject's context is missing from the inferred axis order",
            ));
        };
        let latest_context = order.last().cloned();

        let position_of = |claim: &Claim| -> Option<usize> {
            claim
                .axis_value(axis_key)
                .and_then(|v| order.iter().position(|o| o == v))
        };

        // Earliest explicit removal strictly after the subject's position
        let removal: Option<(usize, &Claim)> = peers
            .iter()
            .filter(|c| c.id != subject.id && documents_removal(&c.text))
            .filter_map(|c| position_of(c).map(|p| (p, c)))
            .filter(|(p, _)| *p > subject_pos)
            .min_by_key(|(p, _)| *p);

        if let Some((removal_pos, removal_claim)) = removal {
            let reasserted = peers.iter().any(|c| {
                !documents_removal(&c.text)
                    && position_of(c).is_some_and(|p| p > removal_pos)
            });
            if reasserted {
                let mut supporting = vec![subject_citation.clone()];
                supporting.push(ClaimCitation::from_claim(removal_claim));
                return Ok(uncertain(
                    &subject_citation,
                    supporting,
                    latest_context,
                    "conflicting evidence: capability re-asserted after a documented removal",
                ));
            }
            debug!(claim_id = %subject.id, "claim classified removed");
            return Ok(StillApplicableResult {
                claim_id: subject_citation.claim_id.clone(),
                status: ApplicabilityStatus::Removed,
                latest_context,
                supporting_claims: vec![
                    subject_citation,
                    ClaimCitation::from_claim(removal_claim),
                ],
                removal_evidence: Some(ClaimCitation::from_claim(removal_claim)),
                uncertainty_analysis: None,
            });
        }

        let latest = latest_context.clone().unwrap_or_default();
        let mut supporting: Vec<ClaimCitation> = peers
            .iter()
            .filter(|c| c.axis_value(axis_key) == Some(latest.as_str()))
            .map(ClaimCitation::from_claim)
            .collect();
        if supporting.is_empty() {
            supporting.push(subject_citation.clone());
        }
        Ok(StillApplicableResult {
            claim_id: subject_citation.claim_id,
            status: ApplicabilityStatus::Applicable,
            latest_context,
            supporting_claims: supporting,
            removal_evidence: None,
            uncertainty_analysis: None,
        })
    }

    /// Diff the claims attached to two contexts of one axis
    ///
    /// Claims are matched by value, not wording: a same-capability pair
    /// whose texts extract to values the comparator finds `Equal` within the
    /// pair's tolerance
    /// counts as present in both contexts, so "99% uptime" and "99.0% uptime
    /// guaranteed" never show up as a change. Claims with no extractable
    /// value fall back to exact text matching.
    pub fn compare_contexts(
        &self,
        axis_key: &str,
        context_a: &str,
        context_b: &str,
    ) -> Result<ContextDiff, TemporalError> {
        let claims_a = self
            .store
            .claims_for_context(axis_key, context_a)
            .map_err(|e| TemporalError::Store(e.to_string()))?;
        let claims_b = self
            .store
            .claims_for_context(axis_key, context_b)
            .map_err(|e| TemporalError::Store(e.to_string()))?;

        let only_in_a = claims_a
            .iter()
            .filter(|a| !claims_b.iter().any(|b| self.asserts_same_fact(a, b)))
            .map(ClaimCitation::from_claim)
            .collect();
        let only_in_b = claims_b
            .iter()
            .filter(|b| !claims_a.iter().any(|a| self.asserts_same_fact(a, b)))
            .map(ClaimCitation::from_claim)
            .collect();

        Ok(ContextDiff {
            context_a: context_a.to_string(),
            context_b: context_b.to_string(),
            claims_a: claims_a.iter().map(ClaimCitation::from_claim).collect(),
            claims_b: claims_b.iter().map(ClaimCitation::from_claim).collect(),
            only_in_a,
            only_in_b,
        })
    }

    /// Do two claims assert the same fact, stated with possibly different
    /// precision or wording?
    fn asserts_same_fact(&self, a: &Claim, b: &Claim) -> bool {
        // Claims about different capabilities never state the same fact,
        // whatever their values
        if a.capability != b.capability {
            return false;
        }
        if a.text == b.text {
            return true;
        }
        let (Some(va), Some(vb)) = (extract(&a.text), extract(&b.text)) else {
            return false;
        };
        // The stricter claim's tolerance governs the pair
        let tol = self
            .claim_tolerance(a, &va)
            .min(self.claim_tolerance(b, &vb));
        compare(&va, &vb, tol) == Verdict::Equal
    }

    fn claim_tolerance(&self, claim: &Claim, value: &ExtractedValue) -> f64 {
        self.tolerance.get_tolerance(
            value.kind,
            value.unit.as_deref(),
            claim.regime,
            claim.authority,
            hedge_strength(&claim.text),
        )
    }

    /// A claim's context on an axis: its own axis value, else its document
    /// cluster
    fn context_of(&self, claim: &Claim, axis_key: &str) -> String {
        match claim.axis_value(axis_key) {
            Some(value) => value.to_string(),
            None => self.clusters.cluster_of(&claim.doc_id),
        }
    }

    fn claims_for_capability(&self, capability: &str) -> Result<Vec<Claim>, TemporalError> {
        self.store
            .claims_for_capability(capability)
            .map_err(|e| TemporalError::Store(e.to_string()))
    }

    fn budget_exhausted(&self, started: Instant, claim_count: usize) -> bool {
        claim_count > self.config.max_claims || started.elapsed() >= self.config.time_budget
    }
}

fn uncertain(
    subject: &ClaimCitation,
    supporting: Vec<ClaimCitation>,
    latest_context: Option<String>,
    hint: impl Into<String>,
) -> StillApplicableResult {
    StillApplicableResult {
        claim_id: subject.claim_id.clone(),
        status: ApplicabilityStatus::Uncertain,
        latest_context,
        supporting_claims: supporting,
        removal_evidence: None,
        uncertainty_analysis: Some(UncertaintyAnalysis::manual_review(hint)),
    }
}
