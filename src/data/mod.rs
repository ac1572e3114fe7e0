/// Data layer: result types, upload queue, filtering and summaries.
///
/// Architecture:
/// ```text
///  dropped / browsed files
///        │
///        ▼
///   ┌──────────┐
///   │  upload   │  UploadSet (≤ 10 paths)
///   └──────────┘
///        │  POST /api/process
///        ▼
///   ┌──────────────────────┐
///   │ ClassificationResult  │  Vec<ClassifiedRecord>, counters
///   └──────────────────────┘
///        │                 │
///        ▼                 ▼
///   ┌──────────┐     ┌──────────┐
///   │  filter   │     │ summary  │  analytics cards
///   └──────────┘     └──────────┘
///   predicates → filtered indices → page window
/// ```

pub mod filter;
pub mod model;
pub mod summary;
pub mod upload;
