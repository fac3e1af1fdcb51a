// File: src/controller.rs
//! Runs the paste-to-filters pipeline and hands the result to a sink.
//!
//! Every front end (the CLI today) goes through [`FilterController`] so the
//! stage order and the outcome reporting stay in one place.
use crate::config::PipelineOptions;
use crate::error::{ApplyError, Result};
use crate::model::{FilterSet, StatFamily, extract_lines, parse_stats};
use crate::sink::{FilterEvent, FilterSink};
use std::fmt;
use strum::IntoEnumIterator;

/// What the user is told after a successful apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// Ungrouped stats plus attribute and resistance entries.
    pub applied: usize,
}

impl fmt::Display for ApplyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Filters applied for {} stats.", self.applied)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FilterController {
    pub options: PipelineOptions,
}

impl FilterController {
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    /// Parses a paste into a finished filter set.
    ///
    /// Stage order: extract, parse, attributes, resistances, buffer.
    pub fn build(&self, text: &str) -> Result<FilterSet> {
        let extracted = extract_lines(text)?;
        let stats = parse_stats(extracted.lines.iter().copied());
        log::debug!(
            "Parsed {} stat line(s), item class {:?}",
            stats.len(),
            extracted.item_class
        );

        let mut set = FilterSet::new(stats, extracted.item_class);
        for family in StatFamily::iter().filter(|f| self.options.groups(*f)) {
            set = family.classify(set);
        }
        if let Some(buffer) = self.options.buffer {
            set = buffer.apply(set);
        }
        Ok(set)
    }

    pub fn events(&self, set: &FilterSet) -> Vec<FilterEvent> {
        FilterEvent::sequence(set, self.options.clear_before_apply)
    }

    /// Builds the set, delivers its events and reports how many stats went out.
    pub fn apply(&self, text: &str, sink: &mut dyn FilterSink) -> Result<ApplyOutcome> {
        let set = self.build(text)?;
        let events = self.events(&set);

        if let Err(reason) = sink.deliver(&events) {
            log::error!("Delivering {} event(s) failed: {}", events.len(), reason);
            return Err(ApplyError::DeliveryFailure(reason));
        }

        let outcome = ApplyOutcome {
            applied: set.filter_count(),
        };
        log::info!("{}", outcome);
        Ok(outcome)
    }
}
