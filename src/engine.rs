//! Headword resolution engine.
//!
//! The engine lives in focused submodules under `src/engine/`, mirroring the
//! stages a question goes through.
//!
//! ## How the parts work together
//!
//! ```text
//! ParseTree ── screen ───────────────┬─ Implicit(token) ──────────────┐
//!              (eligibility.rs)      ├─ TooShort ──▶ no headword      │
//!                                    └─ ApplyRules                    │
//!                                          │                          │
//!                                          v                          │
//!                         HeadwordGenerator::descend (generator.rs)   │
//!                           loop:                                     │
//!                             apply_non_trivial_rules (overrides.rs)  │
//!                             else apply_rules        (generic.rs)    │
//!                             type word? post_operation_fix           │
//!                                                     (post_fix.rs)   │
//!                                          │                          │
//!                                          v                          v
//!                                   HeadwordSink::write_headword (sink.rs)
//! ```
//!
//! Descent is strictly downward except for the post-operation fix, which may
//! jump to a prepositional phrase hanging off one of the token's two nearest
//! ancestors. Every path ends with exactly one headword or none.
//!
//! ## Responsibilities by module
//!
//! - `eligibility.rs`: decides whether the head rules apply at all, and emits
//!   implicit headwords for when/where/who/whom/why and "how" questions.
//! - `generic.rs`: table-driven single-step child selection.
//! - `overrides.rs`: the two structural corrections consulted before the
//!   generic rules.
//! - `post_fix.rs`: type-word redirect to a nearby PP.
//! - `generator.rs`: the driver tying the above together.
//! - `sink.rs`: per-question result store and the focus diagnostic.
//! - `metrics.rs`: opt-in descent trace and timings.
//!
//! ## Debugging
//!
//! Every decision is emitted as a `tracing` debug event; the CLI shows them
//! with `HEADWORD_LOG=debug`.

#[path = "engine/eligibility.rs"]
mod eligibility;
#[path = "engine/generator.rs"]
mod generator;
#[path = "engine/generic.rs"]
mod generic;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/overrides.rs"]
mod overrides;
#[path = "engine/post_fix.rs"]
mod post_fix;
#[path = "engine/sink.rs"]
mod sink;

pub use eligibility::Screening;
pub use generator::HeadwordGenerator;
pub use metrics::{DescentMetrics, DescentStep, RunResult};
pub use overrides::Override;
pub use sink::{Annotations, FocusCheck, HeadwordSink};

pub(crate) use sink::check_focus;
