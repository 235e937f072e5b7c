//! Aggregate counts and percentages for a finished (or partial) run.

use std::fmt;

use crate::types::{CategoryMappings, Outcome};

/// Separator framing the printed summary
pub const SEPARATOR: &str = "=====================================";

/// Count and share of one outcome category
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CategoryStats {
    /// Identifiers in the category across all groups
    pub count: usize,
    /// `count` as a percentage of the input total
    pub percent: f64,
}

impl CategoryStats {
    fn new(count: usize, total: usize) -> Self {
        let percent = if total == 0 {
            0.0
        } else {
            count as f64 / total as f64 * 100.0
        };
        Self { count, percent }
    }
}

/// Analysis summary across the three categories.
///
/// Percentages are relative to the pre-processing input size, so they sum to
/// 100% only when every identifier was classified.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    /// Identifiers in the input collection
    pub total: usize,
    /// Fully retrieved
    pub complete: CategoryStats,
    /// Partially retrieved
    pub incomplete: CategoryStats,
    /// Not retrievable
    pub not_downloadable: CategoryStats,
}

impl Summary {
    /// Compute the summary of `mappings` against the input `total`
    pub fn compute(mappings: &CategoryMappings, total: usize) -> Self {
        Self {
            total,
            complete: CategoryStats::new(mappings.count(Outcome::Complete), total),
            incomplete: CategoryStats::new(mappings.count(Outcome::Incomplete), total),
            not_downloadable: CategoryStats::new(mappings.count(Outcome::NotRetrievable), total),
        }
    }

    /// Sum of the three percentages
    pub fn percent_total(&self) -> f64 {
        self.complete.percent + self.incomplete.percent + self.not_downloadable.percent
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{SEPARATOR}")?;
        writeln!(f, "Analysis Summary:")?;
        writeln!(f, "Total number of PDB IDs: {}", self.total)?;
        writeln!(
            f,
            "Complete: {} ({:.2}%)",
            self.complete.count, self.complete.percent
        )?;
        writeln!(
            f,
            "Incomplete: {} ({:.2}%)",
            self.incomplete.count, self.incomplete.percent
        )?;
        writeln!(
            f,
            "Not Downloadable: {} ({:.2}%)",
            self.not_downloadable.count, self.not_downloadable.percent
        )?;
        write!(f, "{SEPARATOR}")
    }
}

/// Print the analysis summary to stdout.
pub fn report(mappings: &CategoryMappings, total: usize) {
    println!("{}", Summary::compute(mappings, total));
}
