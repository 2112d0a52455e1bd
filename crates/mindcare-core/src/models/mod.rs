pub mod activity;
pub mod assessment;
pub mod chat;
pub mod chat_session;
pub mod distress;
pub mod feedback;
pub mod referral;
