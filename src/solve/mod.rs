//! Solution retrieval over the SAT collaborator

pub mod enumerate;
pub mod session;

pub use enumerate::{
    enumerate_all, enumerate_tuples, extract, sample, sample_from, solve_one, Enumeration,
};
pub use session::{CheckOutcome, EncodingStatistics, Session};
