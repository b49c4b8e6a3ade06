/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  LondonBikeJourney*.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse CSV → TripDataset
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ TripDataset  │  Vec<TripRecord>, option lists, date bounds
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  sidebar predicates → FilteredView (or NoStationMatch)
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌───────────┐
///   │ metrics   │   │ aggregate  │  six chart datasets
///   └──────────┘   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod metrics;
pub mod model;
