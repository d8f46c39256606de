use lms_core::pagination::{Page, PageRequest};
use lms_core::types::DbId;
use lms_db::models::section::{CreateSection, Section, SectionFilter, UpdateSection};
use lms_db::repositories::SectionRepo;
use lms_db::DbPool;

use super::{found, ServiceResult};

pub const SECTION: &str = "section";

pub struct SectionService<'a> {
    pool: &'a DbPool,
}

impl<'a> SectionService<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: &CreateSection) -> ServiceResult<Section> {
        Ok(SectionRepo::create(self.pool, input).await?)
    }

    pub async fn list(
        &self,
        filter: &SectionFilter,
        page: &PageRequest,
    ) -> ServiceResult<Page<Section>> {
        Ok(SectionRepo::list(self.pool, filter, page).await?)
    }

    pub async fn get_by_id(&self, id: DbId) -> ServiceResult<Option<Section>> {
        Ok(SectionRepo::find_by_id(self.pool, id).await?)
    }

    pub async fn update(&self, id: DbId, input: &UpdateSection) -> ServiceResult<Section> {
        found(SectionRepo::update(self.pool, id, input).await?, SECTION, id)
    }

    pub async fn delete(&self, id: DbId) -> ServiceResult<Section> {
        found(SectionRepo::delete(self.pool, id).await?, SECTION, id)
    }
}
