// libs/availability-cell/src/services/slots.rs
//
// Expands a professional's templates for one calendar date into candidate
// slot start times. Capacity is not consulted here.

use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use tracing::debug;
use uuid::Uuid;

use crate::models::{AvailabilityError, AvailabilityTemplate};
use crate::services::templates::AvailabilityService;

/// Start times of one template: `start, start + step, ...` while `< end`.
#[derive(Debug, Clone)]
pub struct SlotTimes {
    next: Option<NaiveTime>,
    end: NaiveTime,
    step: Duration,
}

impl SlotTimes {
    pub fn new(start: NaiveTime, end: NaiveTime, step: Duration) -> Self {
        Self {
            next: Some(start),
            end,
            step,
        }
    }
}

impl Iterator for SlotTimes {
    type Item = NaiveTime;

    fn next(&mut self) -> Option<NaiveTime> {
        let current = self.next.filter(|t| *t < self.end)?;

        // Stop instead of wrapping past midnight or spinning on a zero step.
        let (advanced, wrapped_secs) = current.overflowing_add_signed(self.step);
        self.next = if wrapped_secs == 0 && advanced > current {
            Some(advanced)
        } else {
            None
        };

        Some(current)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SlotCandidate<'a> {
    pub template: &'a AvailabilityTemplate,
    pub time: NaiveTime,
}

impl SlotCandidate<'_> {
    pub fn capacity(&self) -> u32 {
        self.template.capacity_per_slot
    }
}

/// Active templates of one professional resolved for a concrete date.
#[derive(Debug, Clone)]
pub struct DaySchedule {
    pub professional_id: Uuid,
    pub date: NaiveDate,
    templates: Vec<AvailabilityTemplate>,
}

impl DaySchedule {
    /// `templates` must already be filtered to the date's weekday and ordered by start time.
    pub fn new(professional_id: Uuid, date: NaiveDate, templates: Vec<AvailabilityTemplate>) -> Self {
        Self {
            professional_id,
            date,
            templates,
        }
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    pub fn templates(&self) -> &[AvailabilityTemplate] {
        &self.templates
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// First template whose half-open window holds `time`.
    pub fn template_at(&self, time: NaiveTime) -> Option<&AvailabilityTemplate> {
        self.templates.iter().find(|t| t.contains(time))
    }

    /// Lazily walks every candidate slot; each call starts over from the beginning.
    pub fn slots(&self) -> DaySlots<'_> {
        DaySlots {
            templates: self.templates.iter(),
            current: None,
        }
    }
}

pub struct DaySlots<'a> {
    templates: std::slice::Iter<'a, AvailabilityTemplate>,
    current: Option<(&'a AvailabilityTemplate, SlotTimes)>,
}

impl<'a> Iterator for DaySlots<'a> {
    type Item = SlotCandidate<'a>;

    fn next(&mut self) -> Option<SlotCandidate<'a>> {
        loop {
            if let Some((template, times)) = &mut self.current {
                if let Some(time) = times.next() {
                    return Some(SlotCandidate { template: *template, time });
                }
            }
            let template = self.templates.next()?;
            self.current = Some((template, template.slot_times()));
        }
    }
}

pub struct SlotCalculator {
    availability: Arc<AvailabilityService>,
}

impl SlotCalculator {
    pub fn new(availability: Arc<AvailabilityService>) -> Self {
        Self { availability }
    }

    pub async fn day_schedule(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
    ) -> Result<DaySchedule, AvailabilityError> {
        let templates = self
            .availability
            .list_for_weekday(professional_id, date.weekday())
            .await?;

        debug!(
            "Resolved {} templates for professional {} on {}",
            templates.len(),
            professional_id,
            date
        );
        Ok(DaySchedule::new(professional_id, date, templates))
    }
}
