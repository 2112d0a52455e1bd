pub mod assessments;
pub mod dashboard;
pub mod feedback;
pub mod health;
pub mod referrals;
pub mod sessions;
