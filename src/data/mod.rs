/// Data layer: records, loading, filtering, sorting and the grid view.
///
/// Architecture:
/// ```text
///   .jsonl (one JSON object per line)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse lines → LogTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ LogTable  │  Vec<Record>, first-seen column list (never mutated)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  level / name substring predicates → new LogTable
///   │  sort     │  optional header sort → new LogTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   view    │  row/column addressing + cell display text
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod sort;
pub mod view;
