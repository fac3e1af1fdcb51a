// File: ./src/sink.rs
//! Events handed to the search page and the sinks that carry them.
use crate::model::item::{FilterSet, serialize_magnitude};
use serde::Serialize;
use std::io::Write;

/// One message for the page hosting the search form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterEvent {
    ClearAll,
    SetSimpleFilter {
        template: String,
        #[serde(serialize_with = "serialize_magnitude")]
        min: Option<f64>,
        #[serde(serialize_with = "serialize_magnitude")]
        max: Option<f64>,
    },
    SetGroupedFilter {
        template: String,
        count: usize,
        #[serde(serialize_with = "serialize_magnitude")]
        min: Option<f64>,
        #[serde(serialize_with = "serialize_magnitude")]
        max: Option<f64>,
    },
    SetItemClass {
        class: String,
    },
}

impl FilterEvent {
    /// Lays out a set as the ordered message stream the page expects:
    /// clear, ungrouped stats, attribute groups, resistance groups, item class.
    pub fn sequence(set: &FilterSet, clear_first: bool) -> Vec<FilterEvent> {
        let mut events = Vec::with_capacity(set.filter_count() + 2);
        if clear_first {
            events.push(FilterEvent::ClearAll);
        }
        events.extend(set.stats.iter().map(|stat| FilterEvent::SetSimpleFilter {
            template: stat.template.clone(),
            min: stat.magnitude,
            max: None,
        }));
        events.extend(
            set.attributes
                .iter()
                .chain(set.resistances.iter())
                .map(|(template, entry)| FilterEvent::SetGroupedFilter {
                    template: template.clone(),
                    count: entry.count,
                    min: entry.magnitude,
                    max: None,
                }),
        );
        if let Some(class) = &set.item_class {
            events.push(FilterEvent::SetItemClass {
                class: class.clone(),
            });
        }
        events
    }
}

/// Receives the complete event list for one paste.
pub trait FilterSink {
    fn deliver(&mut self, events: &[FilterEvent]) -> Result<(), String>;
}

/// Writes one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> FilterSink for JsonLinesSink<W> {
    fn deliver(&mut self, events: &[FilterEvent]) -> Result<(), String> {
        for event in events {
            serde_json::to_writer(&mut self.writer, event).map_err(|e| e.to_string())?;
            self.writer.write_all(b"\n").map_err(|e| e.to_string())?;
        }
        self.writer.flush().map_err(|e| e.to_string())
    }
}

/// Keeps delivered events in memory. Can be told to refuse delivery.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub events: Vec<FilterEvent>,
    pub refuse_with: Option<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refusing(reason: impl Into<String>) -> Self {
        Self {
            events: Vec::new(),
            refuse_with: Some(reason.into()),
        }
    }
}

impl FilterSink for MemorySink {
    fn deliver(&mut self, events: &[FilterEvent]) -> Result<(), String> {
        if let Some(reason) = &self.refuse_with {
            return Err(reason.clone());
        }
        self.events.extend_from_slice(events);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::item::{FamilyEntry, ParsedStat};

    #[test]
    fn events_follow_delivery_order() {
        let mut set = FilterSet::new(
            vec![ParsedStat::new("# increased Projectile Speed", Some(34.0))],
            Some("Dagger".into()),
        );
        set.resistances.insert(
            "+# to ELEMENTAL_RESIST Resistance".into(),
            FamilyEntry::new("+# to ELEMENTAL_RESIST Resistance", Some(20.0)),
        );
        set.attributes.insert(
            "+# to ATTRIBUTES".into(),
            FamilyEntry::new("+# to ATTRIBUTES", Some(12.0)),
        );

        let events = FilterEvent::sequence(&set, true);
        let kinds: Vec<&str> = events
            .iter()
            .map(|e| match e {
                FilterEvent::ClearAll => "clear",
                FilterEvent::SetSimpleFilter { .. } => "simple",
                FilterEvent::SetGroupedFilter { template, .. } if template.contains("ATTR") => {
                    "attr"
                }
                FilterEvent::SetGroupedFilter { .. } => "resist",
                FilterEvent::SetItemClass { .. } => "class",
            })
            .collect();
        assert_eq!(kinds, vec!["clear", "simple", "attr", "resist", "class"]);
    }

    #[test]
    fn json_lines_use_message_type_tags() {
        let events = vec![
            FilterEvent::ClearAll,
            FilterEvent::SetSimpleFilter {
                template: "+# to Dexterity".into(),
                min: Some(12.0),
                max: None,
            },
            FilterEvent::SetGroupedFilter {
                template: "+# to ATTRIBUTES".into(),
                count: 2,
                min: Some(7.5),
                max: None,
            },
            FilterEvent::SetItemClass {
                class: "Dagger".into(),
            },
        ];
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.deliver(&events).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                r#"{"type":"CLEAR_ALL"}"#,
                r##"{"type":"SET_SIMPLE_FILTER","template":"+# to Dexterity","min":12,"max":null}"##,
                r##"{"type":"SET_GROUPED_FILTER","template":"+# to ATTRIBUTES","count":2,"min":7.5,"max":null}"##,
                r#"{"type":"SET_ITEM_CLASS","class":"Dagger"}"#,
            ]
        );
    }

    #[test]
    fn refusing_sink_keeps_nothing() {
        let mut sink = MemorySink::refusing("tab closed");
        assert_eq!(
            sink.deliver(&[FilterEvent::ClearAll]),
            Err("tab closed".to_string())
        );
        assert!(sink.events.is_empty());
    }
}
