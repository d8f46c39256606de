pub mod book;
pub mod leaving_cert;
pub mod presentator;
pub mod recorded_broadcast;
pub mod section;
