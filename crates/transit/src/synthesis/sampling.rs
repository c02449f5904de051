//! Stride sampling.
//!
//! A corridor over a dense bus network would otherwise list every stop it
//! crosses; taking every `step`-th candidate keeps a representative skeleton.

use crate::synthesis::config::SamplingPolicy;

/// Every `max(1, len / target_density)`-th item, at most `max_stops` of them
pub fn stride_sample<T: Copy>(candidates: &[T], policy: &SamplingPolicy) -> Vec<T> {
    let step = (candidates.len() / policy.target_density.max(1)).max(1);
    candidates
        .iter()
        .step_by(step)
        .take(policy.max_stops)
        .copied()
        .collect()
}

/// Sample and keep the result only if it meets the policy's minimum size
pub fn sample_group<T: Copy>(candidates: &[T], policy: &SamplingPolicy) -> Option<Vec<T>> {
    let sampled = stride_sample(candidates, policy);
    (sampled.len() >= policy.min_stops).then_some(sampled)
}
