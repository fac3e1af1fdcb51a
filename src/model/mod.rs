// File: ./src/model/mod.rs
pub mod buffer;
pub mod family;
pub mod item;
pub mod parser;

pub use buffer::BufferPercent;
pub use family::StatFamily;
pub use item::{FamilyEntry, FamilyGroup, FilterSet, PLACEHOLDER, ParsedStat};
pub use parser::{ExtractedLines, StatRule, clean_line, extract_lines, parse_stat, parse_stats};
