//! SIMD "condition vector" kernel shared by the decision-tree code generators.
//!
//! A subtree of depth `L` has `2^L - 1` internal nodes. Evaluating it means
//! comparing each node's feature value against its bias and packing the
//! `2^L - 1` compare outcomes into a single integer, one bit per node, at the
//! node's bit offset within the subtree. This crate provides that gather →
//! compare → mask → horizontal-OR-reduce kernel for a fixed lane count of 8
//! (the width the code generators in `dtjit-codegen` are built against),
//! with a portable scalar fallback for targets without a native 8-wide
//! compare.
mod simd;

pub use simd::{Backend, LANES};

/// Computes the condition vector for one subtree.
///
/// `features[i]` and `biases[i]` are the gathered feature value and bias of
/// the internal node at bit offset `i`; unused trailing lanes (when the
/// subtree has fewer than [`LANES`] internal nodes) must be zeroed by the
/// caller, and `shift_masks[i]` must be `0` for them so they never
/// contribute a bit to the result. `shift_masks[i]` is `1 << i` for lanes
/// that belong to a real internal node.
///
/// Bit `i` of the result is set iff `features[i] > biases[i]`, using an
/// ordered (NaN-is-false) comparison, matching the decision tree's
/// `feature > bias` split semantics.
#[inline]
pub fn condition_vector(
    backend: Backend,
    features: &[f32; LANES],
    biases: &[f32; LANES],
    shift_masks: &[i32; LANES],
) -> u32 {
    match backend {
        #[cfg(target_arch = "x86_64")]
        Backend::Avx => {
            // SAFETY: `Backend::Avx` is only ever handed out by `Backend::detect`/
            // `Backend::all_available`, both of which check `is_x86_feature_detected!("avx")`
            // first.
            unsafe { simd::avx::condition_vector(features, biases, shift_masks) }
        }
        Backend::Scalar => simd::scalar::condition_vector(features, biases, shift_masks),
    }
}
