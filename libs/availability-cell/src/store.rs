use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{AvailabilityError, AvailabilityTemplate};

/// Persistence seam for availability templates.
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    async fn insert(&self, template: AvailabilityTemplate) -> Result<AvailabilityTemplate, AvailabilityError>;

    /// Replaces an existing record; fails with `NotFound` if the ID is unknown.
    async fn update(&self, template: AvailabilityTemplate) -> Result<AvailabilityTemplate, AvailabilityError>;

    async fn get(&self, id: Uuid) -> Result<Option<AvailabilityTemplate>, AvailabilityError>;

    /// Returns whether a record was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, AvailabilityError>;

    /// Every template of the professional, active or not, in no particular order.
    async fn list_for_professional(&self, professional_id: Uuid) -> Result<Vec<AvailabilityTemplate>, AvailabilityError>;
}

#[derive(Default)]
pub struct InMemoryTemplateRepository {
    templates: RwLock<HashMap<Uuid, AvailabilityTemplate>>,
}

impl InMemoryTemplateRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TemplateRepository for InMemoryTemplateRepository {
    async fn insert(&self, template: AvailabilityTemplate) -> Result<AvailabilityTemplate, AvailabilityError> {
        self.templates.write().await.insert(template.id, template.clone());
        Ok(template)
    }

    async fn update(&self, template: AvailabilityTemplate) -> Result<AvailabilityTemplate, AvailabilityError> {
        let mut templates = self.templates.write().await;
        let slot = templates
            .get_mut(&template.id)
            .ok_or(AvailabilityError::NotFound(template.id))?;
        *slot = template.clone();
        Ok(template)
    }

    async fn get(&self, id: Uuid) -> Result<Option<AvailabilityTemplate>, AvailabilityError> {
        Ok(self.templates.read().await.get(&id).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AvailabilityError> {
        Ok(self.templates.write().await.remove(&id).is_some())
    }

    async fn list_for_professional(&self, professional_id: Uuid) -> Result<Vec<AvailabilityTemplate>, AvailabilityError> {
        Ok(self
            .templates
            .read()
            .await
            .values()
            .filter(|t| t.professional_id == professional_id)
            .cloned()
            .collect())
    }
}
