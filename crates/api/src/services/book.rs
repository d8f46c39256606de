use lms_core::pagination::{Page, PageRequest};
use lms_core::types::DbId;
use lms_db::models::book::{Book, BookFilter, BookLookup, CreateBook, UpdateBook};
use lms_db::repositories::BookRepo;
use lms_db::DbPool;

use super::{found, ServiceResult};

pub const BOOK: &str = "book";

pub struct BookService<'a> {
    pool: &'a DbPool,
}

impl<'a> BookService<'a> {
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, input: &CreateBook) -> ServiceResult<Book> {
        Ok(BookRepo::create(self.pool, input).await?)
    }

    pub async fn list(&self, filter: &BookFilter, page: &PageRequest) -> ServiceResult<Page<Book>> {
        Ok(BookRepo::list(self.pool, filter, page).await?)
    }

    pub async fn get_by_id(&self, id: DbId) -> ServiceResult<Option<Book>> {
        Ok(BookRepo::find_by_id(self.pool, id).await?)
    }

    /// Oldest book for a subject.
    pub async fn find_by_subject(&self, subject_id: &str) -> ServiceResult<Option<Book>> {
        Ok(BookRepo::find_by_subject(self.pool, subject_id).await?)
    }

    /// Oldest book matching board, medium, class and subject.
    pub async fn find_by_filter(&self, lookup: &BookLookup) -> ServiceResult<Option<Book>> {
        Ok(BookRepo::find_by_lookup(self.pool, lookup).await?)
    }

    pub async fn update(&self, id: DbId, input: &UpdateBook) -> ServiceResult<Book> {
        found(BookRepo::update(self.pool, id, input).await?, BOOK, id)
    }

    pub async fn delete(&self, id: DbId) -> ServiceResult<Book> {
        found(BookRepo::delete(self.pool, id).await?, BOOK, id)
    }
}
