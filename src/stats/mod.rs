// Statistical primitives for the capture report
//
// Welch's unequal-variance t-test backs the sex weight comparison and
// ordinary least squares backs the weight/hind-foot relationship, with exact
// p-values from statrs distributions (Student's t, Fisher-Snedecor).
// Descriptive helpers are shared by the aggregation layer and the charts.
//
// All functions here require pre-filtered input: callers remove missing
// values before handing samples in. Sample sizes too small to analyze are
// reported as errors, never papered over.

pub mod describe;

mod linear;
mod ttest;

pub use linear::{fit, LinearFit};
pub use ttest::{compare_groups, effect_size_label, GroupComparison};
