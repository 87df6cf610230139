//! Judge selection for new cases.
//!
//! A case is assigned to a judge posted in its filing city. When no judge
//! sits there (or no city is given) any judge on the roster is eligible.
//! The pick among eligible judges is uniform.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{SchedulingError, SchedulingResult};
use crate::models::Judge;

/// The court's judges.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JudgeRoster {
    judges: Vec<Judge>,
}

impl JudgeRoster {
    /// Creates a roster.
    pub fn new(judges: Vec<Judge>) -> Self {
        Self { judges }
    }

    /// All judges.
    pub fn judges(&self) -> &[Judge] {
        &self.judges
    }

    /// Looks up a judge by ID.
    pub fn get(&self, judge_id: &str) -> Option<&Judge> {
        self.judges.iter().find(|j| j.id == judge_id)
    }

    /// Judges eligible for a case filed in `city`.
    ///
    /// Judges posted in `city` if any, otherwise the whole roster.
    pub fn candidates(&self, city: Option<&str>) -> Vec<&Judge> {
        if let Some(city) = city {
            let local: Vec<&Judge> = self
                .judges
                .iter()
                .filter(|j| j.posted_city.as_deref() == Some(city))
                .collect();
            if !local.is_empty() {
                return local;
            }
        }
        self.judges.iter().collect()
    }

    /// Picks a judge uniformly from the eligible pool.
    pub fn pick<R: Rng + ?Sized>(
        &self,
        city: Option<&str>,
        rng: &mut R,
    ) -> SchedulingResult<&Judge> {
        let pool = self.candidates(city);
        if pool.is_empty() {
            return Err(SchedulingError::NoJudgesAvailable);
        }
        Ok(pool[rng.random_range(0..pool.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn roster() -> JudgeRoster {
        JudgeRoster::new(vec![
            Judge::new("J1", "A. Rao").with_city("Pune"),
            Judge::new("J2", "B. Sen").with_city("Delhi"),
            Judge::new("J3", "C. Das").with_city("Pune"),
            Judge::new("J4", "D. Roy"),
        ])
    }

    #[test]
    fn test_city_pool() {
        let r = roster();
        let ids: Vec<&str> = r.candidates(Some("Pune")).iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["J1", "J3"]);
    }

    #[test]
    fn test_unknown_city_falls_back_to_all() {
        let r = roster();
        assert_eq!(r.candidates(Some("Chennai")).len(), 4);
        assert_eq!(r.candidates(None).len(), 4);
    }

    #[test]
    fn test_pick_stays_in_pool() {
        let r = roster();
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..50 {
            let j = r.pick(Some("Pune"), &mut rng).unwrap();
            assert_eq!(j.posted_city.as_deref(), Some("Pune"));
        }
    }

    #[test]
    fn test_empty_roster() {
        let mut rng = SmallRng::seed_from_u64(42);
        assert_eq!(
            JudgeRoster::default().pick(None, &mut rng).unwrap_err(),
            SchedulingError::NoJudgesAvailable
        );
    }

    #[test]
    fn test_get() {
        assert_eq!(roster().get("J2").map(|j| j.full_name.as_str()), Some("B. Sen"));
        assert!(roster().get("J9").is_none());
    }
}
