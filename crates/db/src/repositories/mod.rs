//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod announcement_repo;
pub mod contact_repo;
pub mod event_repo;
pub mod news_repo;
pub mod project_repo;
pub mod report_repo;
pub mod subscription_repo;
pub mod user_repo;

pub use announcement_repo::AnnouncementRepo;
pub use contact_repo::ContactRepo;
pub use event_repo::EventRepo;
pub use news_repo::NewsRepo;
pub use project_repo::ProjectRepo;
pub use report_repo::ReportRepo;
pub use subscription_repo::SubscriptionRepo;
pub use user_repo::UserRepo;
