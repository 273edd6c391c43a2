//! Side-effecting repairs for gaps the validators only report.

pub mod blur;
pub mod calendar;
