pub mod late_fee;

pub use late_fee::{
    assess_penalty, PenaltyAccrual, PenaltyAssessment, PenaltyBasis, PenaltyInput, PenaltyPolicy,
};
