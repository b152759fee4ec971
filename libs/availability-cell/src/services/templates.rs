// libs/availability-cell/src/services/templates.rs

use std::sync::Arc;

use chrono::{NaiveTime, Utc, Weekday};
use tracing::{debug, info, warn};
use uuid::Uuid;

use directory_cell::ProfessionalDirectory;
use shared_utils::KeyedLocks;

use crate::models::{AvailabilityError, AvailabilityTemplate, TemplateRequest};
use crate::store::TemplateRepository;

pub struct AvailabilityService {
    repository: Arc<dyn TemplateRepository>,
    professionals: Arc<dyn ProfessionalDirectory>,
    template_locks: KeyedLocks<Uuid>,
}

impl AvailabilityService {
    pub fn new(
        repository: Arc<dyn TemplateRepository>,
        professionals: Arc<dyn ProfessionalDirectory>,
    ) -> Self {
        Self {
            repository,
            professionals,
            template_locks: KeyedLocks::new("template"),
        }
    }

    /// Create an active availability template for a professional
    pub async fn create_template(&self, request: TemplateRequest) -> Result<AvailabilityTemplate, AvailabilityError> {
        debug!("Creating availability template for professional: {}", request.professional_id);

        if let Err(e) = request.validate() {
            warn!("Rejected template for professional {}: {}", request.professional_id, e);
            return Err(e);
        }
        self.professionals.get_professional(request.professional_id).await?;

        let now = Utc::now();
        let template = AvailabilityTemplate {
            id: Uuid::new_v4(),
            professional_id: request.professional_id,
            weekday: request.weekday,
            start_time: request.start_time,
            end_time: request.end_time,
            slot_duration_minutes: request.slot_duration_minutes(),
            capacity_per_slot: request.capacity_per_slot(),
            active: true,
            created_at: now,
            updated_at: now,
        };

        let template = self.repository.insert(template).await?;
        info!("Availability template created with ID: {}", template.id);
        Ok(template)
    }

    /// Replace every field of a template except its active flag
    pub async fn update_template(
        &self,
        id: Uuid,
        request: TemplateRequest,
    ) -> Result<AvailabilityTemplate, AvailabilityError> {
        debug!("Updating availability template: {}", id);

        request.validate()?;
        let _guard = self.template_locks.lock(id).await;
        let mut template = self.get_template(id).await?;
        self.professionals.get_professional(request.professional_id).await?;

        template.professional_id = request.professional_id;
        template.weekday = request.weekday;
        template.start_time = request.start_time;
        template.end_time = request.end_time;
        template.slot_duration_minutes = request.slot_duration_minutes();
        template.capacity_per_slot = request.capacity_per_slot();
        template.updated_at = Utc::now();

        self.repository.update(template).await
    }

    pub async fn get_template(&self, id: Uuid) -> Result<AvailabilityTemplate, AvailabilityError> {
        self.repository
            .get(id)
            .await?
            .ok_or(AvailabilityError::NotFound(id))
    }

    /// Active templates of a professional, by weekday (Monday first) then start time
    pub async fn list_active(&self, professional_id: Uuid) -> Result<Vec<AvailabilityTemplate>, AvailabilityError> {
        let mut templates: Vec<AvailabilityTemplate> = self
            .repository
            .list_for_professional(professional_id)
            .await?
            .into_iter()
            .filter(|t| t.active)
            .collect();

        templates.sort_by(|a, b| {
            a.weekday
                .num_days_from_monday()
                .cmp(&b.weekday.num_days_from_monday())
                .then_with(|| window_order(a, b))
        });
        Ok(templates)
    }

    /// Active templates for one weekday, ordered by start time ascending
    pub async fn list_for_weekday(
        &self,
        professional_id: Uuid,
        weekday: Weekday,
    ) -> Result<Vec<AvailabilityTemplate>, AvailabilityError> {
        let mut templates: Vec<AvailabilityTemplate> = self
            .repository
            .list_for_professional(professional_id)
            .await?
            .into_iter()
            .filter(|t| t.active && t.weekday == weekday)
            .collect();

        templates.sort_by(window_order);
        debug!(
            "Found {} active templates for professional {} on {}",
            templates.len(),
            professional_id,
            weekday
        );
        Ok(templates)
    }

    pub async fn deactivate(&self, id: Uuid) -> Result<AvailabilityTemplate, AvailabilityError> {
        info!("Deactivating availability template: {}", id);
        self.set_active(id, false).await
    }

    pub async fn activate(&self, id: Uuid) -> Result<AvailabilityTemplate, AvailabilityError> {
        info!("Activating availability template: {}", id);
        self.set_active(id, true).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AvailabilityError> {
        info!("Deleting availability template: {}", id);
        let _guard = self.template_locks.lock(id).await;
        if !self.repository.delete(id).await? {
            return Err(AvailabilityError::NotFound(id));
        }
        Ok(())
    }

    async fn set_active(&self, id: Uuid, active: bool) -> Result<AvailabilityTemplate, AvailabilityError> {
        let _guard = self.template_locks.lock(id).await;
        let mut template = self.get_template(id).await?;
        template.active = active;
        template.updated_at = Utc::now();
        self.repository.update(template).await
    }
}

/// Start time first; creation order and ID keep equal starts deterministic.
fn window_order(a: &AvailabilityTemplate, b: &AvailabilityTemplate) -> std::cmp::Ordering {
    let key = |t: &AvailabilityTemplate| -> (NaiveTime, chrono::DateTime<Utc>, Uuid) {
        (t.start_time, t.created_at, t.id)
    };
    key(a).cmp(&key(b))
}
