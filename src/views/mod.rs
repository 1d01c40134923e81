//! Per-plot aggregations over the enriched table.
//!
//! Each view is a pure function of the table (plus inputs computed once at
//! load time) and the current widget value. Views are rebuilt on every
//! widget change and owned by the panel that draws them.
//!
//! ```text
//!   EnrichedTable ──┬─ bar      (origin)  counts per model year
//!                   ├─ scatter  (origin)  jittered range by EV type
//!                   ├─ heatmap  (years)   county × region counts
//!                   └─ violin   (years)   range distribution by region
//! ```

pub mod bar;
pub mod heatmap;
pub mod scale;
pub mod scatter;
pub mod violin;
