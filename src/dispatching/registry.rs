//! Per-center pools of available response units.
//!
//! Each pool is a FIFO line: new and returning units join the tail, and a
//! wildcard request takes the head.

use std::collections::{HashMap, VecDeque};

use crate::error::{DispatchError, Result};
use crate::models::{ResponseUnit, UnitRequirement};

/// Available units keyed by center id.
#[derive(Debug, Clone, Default)]
pub struct UnitRegistry {
    pools: HashMap<String, VecDeque<ResponseUnit>>,
}

impl UnitRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an empty pool for a center. Idempotent.
    pub fn add_center(&mut self, center_id: impl Into<String>) {
        self.pools.entry(center_id.into()).or_default();
    }

    /// Whether a pool exists for this center.
    pub fn has_center(&self, center_id: &str) -> bool {
        self.pools.contains_key(center_id)
    }

    /// Appends a unit to the tail of a center's pool.
    ///
    /// # Errors
    /// [`DispatchError::UnknownCenter`] if the center has no pool.
    pub fn add_unit(&mut self, center_id: &str, unit: ResponseUnit) -> Result<()> {
        let pool = self
            .pools
            .get_mut(center_id)
            .ok_or_else(|| DispatchError::UnknownCenter(center_id.to_string()))?;
        pool.push_back(unit);
        Ok(())
    }

    /// First unit, head to tail, that satisfies `requirement`.
    ///
    /// With [`UnitRequirement::Any`] this is the head of the pool.
    pub fn peek_matching(
        &self,
        center_id: &str,
        requirement: &UnitRequirement,
    ) -> Option<&ResponseUnit> {
        let pool = self.pools.get(center_id)?;
        match requirement {
            UnitRequirement::Any => pool.front(),
            _ => pool.iter().find(|u| requirement.is_satisfied_by(u)),
        }
    }

    /// Removes a unit by id from anywhere in the pool, keeping the order of
    /// the rest.
    pub fn remove(&mut self, center_id: &str, unit_id: &str) -> Option<ResponseUnit> {
        let pool = self.pools.get_mut(center_id)?;
        let idx = pool.iter().position(|u| u.id == unit_id)?;
        pool.remove(idx)
    }

    /// Removes the head of a center's pool.
    pub fn pop_front(&mut self, center_id: &str) -> Option<ResponseUnit> {
        self.pools.get_mut(center_id)?.pop_front()
    }

    /// Puts a unit at the tail of a center's pool, creating the pool if needed.
    pub fn return_unit(&mut self, center_id: &str, unit: ResponseUnit) {
        self.pools
            .entry(center_id.to_string())
            .or_default()
            .push_back(unit);
    }

    /// Units available at a center, head first. Empty for unknown centers.
    pub fn available(&self, center_id: &str) -> impl Iterator<Item = &ResponseUnit> {
        self.pools.get(center_id).into_iter().flatten()
    }

    /// Size of a center's pool (0 for unknown centers).
    pub fn pool_len(&self, center_id: &str) -> usize {
        self.pools.get(center_id).map_or(0, VecDeque::len)
    }

    /// Total available units across all pools.
    pub fn total_available(&self) -> usize {
        self.pools.values().map(VecDeque::len).sum()
    }

    /// Which center currently holds this unit, if any.
    pub fn locate(&self, unit_id: &str) -> Option<&str> {
        self.pools
            .iter()
            .find(|(_, pool)| pool.iter().any(|u| u.id == unit_id))
            .map(|(center, _)| center.as_str())
    }

    /// All pools, in no particular order.
    pub fn pools(&self) -> impl Iterator<Item = (&str, &VecDeque<ResponseUnit>)> {
        self.pools.iter().map(|(c, p)| (c.as_str(), p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> UnitRegistry {
        let mut r = UnitRegistry::new();
        r.add_center("DC1");
        r.add_unit("DC1", ResponseUnit::police("U1")).unwrap();
        r.add_unit("DC1", ResponseUnit::ambulance("U2")).unwrap();
        r.add_unit("DC1", ResponseUnit::new("U3", "Ambulance")).unwrap();
        r
    }

    fn ids(r: &UnitRegistry, center: &str) -> Vec<String> {
        r.available(center).map(|u| u.id.clone()).collect()
    }

    #[test]
    fn test_add_unit_unknown_center() {
        let mut r = UnitRegistry::new();
        assert_eq!(
            r.add_unit("DC9", ResponseUnit::fire("U1")),
            Err(DispatchError::UnknownCenter("DC9".into()))
        );
    }

    #[test]
    fn test_peek_any_returns_head() {
        let r = registry();
        assert_eq!(r.peek_matching("DC1", &UnitRequirement::Any).unwrap().id, "U1");
    }

    #[test]
    fn test_peek_type_first_match_case_insensitive() {
        let r = registry();
        let amb = r.peek_matching("DC1", &UnitRequirement::of("AMBULANCE"));
        assert_eq!(amb.unwrap().id, "U2");
        assert!(r.peek_matching("DC1", &UnitRequirement::of("fire")).is_none());
        assert!(r.peek_matching("DC9", &UnitRequirement::Any).is_none());
    }

    #[test]
    fn test_remove_from_middle_keeps_order() {
        let mut r = registry();
        let removed = r.remove("DC1", "U2").unwrap();
        assert_eq!(removed.id, "U2");
        assert_eq!(ids(&r, "DC1"), vec!["U1", "U3"]);
        assert!(r.remove("DC1", "U2").is_none());
        assert!(r.remove("DC9", "U1").is_none());
    }

    #[test]
    fn test_return_goes_to_tail() {
        let mut r = registry();
        let head = r.pop_front("DC1").unwrap();
        r.return_unit("DC1", head);
        assert_eq!(ids(&r, "DC1"), vec!["U2", "U3", "U1"]);

        r.return_unit("DC2", ResponseUnit::fire("U9"));
        assert!(r.has_center("DC2"));
        assert_eq!(r.total_available(), 4);
        assert_eq!(r.locate("U9"), Some("DC2"));
        assert_eq!(r.locate("nope"), None);
    }

    #[test]
    fn test_pool_len() {
        let r = registry();
        assert_eq!(r.pool_len("DC1"), 3);
        assert_eq!(r.pool_len("DC9"), 0);
        assert_eq!(r.available("DC9").count(), 0);
    }
}
