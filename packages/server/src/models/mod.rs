pub mod submission;
pub mod webhook;
