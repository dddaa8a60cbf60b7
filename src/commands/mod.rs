mod analyze;
mod checklist;
mod show;

pub use analyze::run_analyze;
pub use checklist::run_checklist;
pub use show::run_show;
