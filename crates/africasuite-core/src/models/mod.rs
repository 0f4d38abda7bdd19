pub mod job;
pub mod parameter;
pub mod report;
pub mod schedule;
pub mod template;
