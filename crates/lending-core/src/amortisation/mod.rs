pub mod analysis;
pub mod cycle;
pub mod schedule;
pub mod terms;

pub use cycle::RepaymentCycle;
pub use schedule::{
    build_schedule, AmortisationSchedule, ScheduleEntry, ScheduleRequest, ScheduleSummary,
};
pub use terms::{InterestMethod, LoanTerms};
