/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse + coerce, drop incomplete rows → InsuranceDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  FilterCriteria → matching indices
///   └──────────┘
///        │
///        ├──► stats      count / sum / mean / median / stdev of charges
///        ├──► histogram  equal-width bins per category
///        └──► export     filtered rows → .csv
/// ```

pub mod export;
pub mod filter;
pub mod histogram;
pub mod loader;
pub mod model;
pub mod stats;
