//! Directed graph of cities, routes and alien occupancy.

use invasion_core::{AlienId, Direction, Error, Result, Route};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::fmt;

/// A single city: its alien queue and outgoing routes
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct City {
    /// Front is the earliest arrival
    pub aliens: VecDeque<AlienId>,
    /// Outgoing routes in insertion order
    pub routes: Vec<Route>,
}

/// The world: cities keyed by name, iterated in insertion order.
///
/// All mutation goes through the methods here so destruction stays atomic
/// and no route can point at a missing city.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldGraph {
    order: Vec<String>,
    cities: HashMap<String, City>,
}

impl WorldGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure a city exists. Re-adding keeps its aliens and routes.
    pub fn add_city(&mut self, name: &str) {
        if !self.cities.contains_key(name) {
            self.order.push(name.to_string());
            self.cities.insert(name.to_string(), City::default());
        }
    }

    /// Add a route `from -> to`. A second route between the same pair
    /// overwrites the direction tag.
    pub fn add_route(&mut self, from: &str, to: &str, direction: &str) -> Result<()> {
        if !self.cities.contains_key(to) {
            return Err(Error::UnknownCity(to.to_string()));
        }
        let city = self.city_mut(from)?;

        match city.routes.iter_mut().find(|r| r.to == to) {
            Some(existing) => existing.direction = Direction::new(direction),
            None => city.routes.push(Route::new(direction, to)),
        }
        Ok(())
    }

    /// Append an alien to the back of a city's queue
    pub fn deploy_alien(&mut self, city: &str, id: AlienId) -> Result<()> {
        self.city_mut(city)?.aliens.push_back(id);
        Ok(())
    }

    /// Remove the earliest-arrived alien from a city
    pub fn pop_alien(&mut self, city: &str) -> Result<AlienId> {
        self.city_mut(city)?
            .aliens
            .pop_front()
            .ok_or_else(|| Error::EmptyCity(city.to_string()))
    }

    /// Destinations of outgoing routes, in insertion order
    pub fn neighbors(&self, city: &str) -> Result<Vec<&str>> {
        Ok(self
            .city(city)?
            .routes
            .iter()
            .map(|r| r.to.as_str())
            .collect())
    }

    pub fn routes(&self, city: &str) -> Result<&[Route]> {
        Ok(&self.city(city)?.routes)
    }

    pub fn aliens(&self, city: &str) -> Result<&VecDeque<AlienId>> {
        Ok(&self.city(city)?.aliens)
    }

    /// True when the city holds two or more aliens
    pub fn is_overwhelmed(&self, city: &str) -> bool {
        self.cities
            .get(city)
            .map_or(false, |c| c.aliens.len() >= 2)
    }

    /// Remove a city along with every route into or out of it.
    /// Returns the aliens that were in it, in arrival order.
    pub fn destroy_city(&mut self, city: &str) -> Result<Vec<AlienId>> {
        let removed = self
            .cities
            .remove(city)
            .ok_or_else(|| Error::UnknownCity(city.to_string()))?;

        self.order.retain(|name| name != city);
        for other in self.cities.values_mut() {
            other.routes.retain(|r| r.to != city);
        }

        Ok(removed.aliens.into_iter().collect())
    }

    /// Names of all surviving cities, in insertion order
    pub fn cities(&self) -> &[String] {
        &self.order
    }

    pub fn contains(&self, city: &str) -> bool {
        self.cities.contains_key(city)
    }

    pub fn has_route(&self, from: &str, to: &str) -> bool {
        self.cities
            .get(from)
            .map_or(false, |c| c.routes.iter().any(|r| r.to == to))
    }

    pub fn city_count(&self) -> usize {
        self.order.len()
    }

    pub fn route_count(&self) -> usize {
        self.cities.values().map(|c| c.routes.len()).sum()
    }

    /// Total number of live aliens across all cities
    pub fn alien_count(&self) -> usize {
        self.cities.values().map(|c| c.aliens.len()).sum()
    }

    /// Iterator over cities with their data, in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &City)> + '_ {
        self.order
            .iter()
            .filter_map(move |name| self.cities.get(name).map(|c| (name.as_str(), c)))
    }

    fn city(&self, name: &str) -> Result<&City> {
        self.cities
            .get(name)
            .ok_or_else(|| Error::UnknownCity(name.to_string()))
    }

    fn city_mut(&mut self, name: &str) -> Result<&mut City> {
        self.cities
            .get_mut(name)
            .ok_or_else(|| Error::UnknownCity(name.to_string()))
    }
}

impl fmt::Display for WorldGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "cities:")?;
        for (name, city) in self.iter() {
            let ids: Vec<String> = city.aliens.iter().map(|id| id.to_string()).collect();
            writeln!(f, "  {} aliens=[{}]", name, ids.join(", "))?;
        }
        writeln!(f, "routes:")?;
        for (name, city) in self.iter() {
            for route in &city.routes {
                writeln!(f, "  {} --{}--> {}", name, route.direction, route.to)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_way_world() -> WorldGraph {
        let mut world = WorldGraph::new();
        world.add_city("Foo");
        world.add_city("Bar");
        world.add_route("Foo", "Bar", "north").unwrap();
        world.add_route("Bar", "Foo", "south").unwrap();
        world
    }

    #[test]
    fn test_add_city_is_idempotent() {
        let mut world = WorldGraph::new();
        world.add_city("Foo");
        world.deploy_alien("Foo", AlienId(3)).unwrap();
        world.add_city("Foo");

        assert_eq!(world.city_count(), 1);
        assert_eq!(world.aliens("Foo").unwrap().len(), 1);
    }

    #[test]
    fn test_add_route_requires_known_cities() {
        let mut world = WorldGraph::new();
        world.add_city("Foo");

        let err = world.add_route("Foo", "Nowhere", "east").unwrap_err();
        assert!(matches!(err, Error::UnknownCity(name) if name == "Nowhere"));

        let err = world.add_route("Nowhere", "Foo", "east").unwrap_err();
        assert!(matches!(err, Error::UnknownCity(name) if name == "Nowhere"));
        assert_eq!(world.route_count(), 0);
    }

    #[test]
    fn test_duplicate_route_last_write_wins() {
        let mut world = two_way_world();
        world.add_route("Foo", "Bar", "west").unwrap();

        let routes = world.routes("Foo").unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].direction.as_str(), "west");
    }

    #[test]
    fn test_fifo_pop() {
        let mut world = WorldGraph::new();
        world.add_city("Foo");
        for id in [5, 2, 9] {
            world.deploy_alien("Foo", AlienId(id)).unwrap();
        }

        assert_eq!(world.pop_alien("Foo").unwrap(), AlienId(5));
        assert_eq!(world.pop_alien("Foo").unwrap(), AlienId(2));
        assert_eq!(world.pop_alien("Foo").unwrap(), AlienId(9));
        assert!(matches!(world.pop_alien("Foo"), Err(Error::EmptyCity(_))));
    }

    #[test]
    fn test_unknown_city_errors() {
        let mut world = WorldGraph::new();
        assert!(matches!(
            world.deploy_alien("Ghost", AlienId(0)),
            Err(Error::UnknownCity(_))
        ));
        assert!(matches!(world.pop_alien("Ghost"), Err(Error::UnknownCity(_))));
        assert!(matches!(world.destroy_city("Ghost"), Err(Error::UnknownCity(_))));
        assert!(world.neighbors("Ghost").is_err());
    }

    #[test]
    fn test_overwhelm_threshold() {
        let mut world = WorldGraph::new();
        world.add_city("Foo");
        assert!(!world.is_overwhelmed("Foo"));

        world.deploy_alien("Foo", AlienId(0)).unwrap();
        assert!(!world.is_overwhelmed("Foo"));

        world.deploy_alien("Foo", AlienId(1)).unwrap();
        assert!(world.is_overwhelmed("Foo"));

        world.deploy_alien("Foo", AlienId(2)).unwrap();
        assert!(world.is_overwhelmed("Foo"));
    }

    #[test]
    fn test_neighbors_in_insertion_order() {
        let mut world = WorldGraph::new();
        for name in ["Foo", "Bar", "Baz", "Qu-ux"] {
            world.add_city(name);
        }
        world.add_route("Foo", "Bar", "north").unwrap();
        world.add_route("Foo", "Baz", "west").unwrap();
        world.add_route("Foo", "Qu-ux", "south").unwrap();

        assert_eq!(world.neighbors("Foo").unwrap(), vec!["Bar", "Baz", "Qu-ux"]);
        assert!(world.neighbors("Bar").unwrap().is_empty());
    }

    #[test]
    fn test_destroy_removes_city_and_incident_routes() {
        let mut world = two_way_world();
        world.add_city("Baz");
        world.add_route("Baz", "Bar", "east").unwrap();
        world.add_route("Foo", "Baz", "west").unwrap();
        world.deploy_alien("Bar", AlienId(1)).unwrap();
        world.deploy_alien("Bar", AlienId(0)).unwrap();

        let aliens = world.destroy_city("Bar").unwrap();
        assert_eq!(aliens, vec![AlienId(1), AlienId(0)]);

        assert!(!world.contains("Bar"));
        assert_eq!(world.cities(), ["Foo".to_string(), "Baz".to_string()]);
        for (_, city) in world.iter() {
            assert!(city.routes.iter().all(|r| r.to != "Bar"));
        }
        assert!(world.has_route("Foo", "Baz"));
        assert_eq!(world.route_count(), 1);
        assert_eq!(world.alien_count(), 0);
    }

    #[test]
    fn test_display_summary() {
        let mut world = two_way_world();
        world.deploy_alien("Foo", AlienId(0)).unwrap();

        let summary = world.to_string();
        assert!(summary.contains("Foo aliens=[0]"));
        assert!(summary.contains("Bar aliens=[]"));
        assert!(summary.contains("Foo --north--> Bar"));
        assert!(summary.contains("Bar --south--> Foo"));
    }
}
