use impactphys_core::{BodyId, Scalar};
use crate::body::Body;

/// Owning body storage with ID = index semantics.
#[derive(Clone, Debug, Default)]
pub struct Bodies {
    items: Vec<Body>,
}

impl Bodies {
    pub fn with_capacity(cap: usize) -> Self {
        Self { items: Vec::with_capacity(cap) }
    }

    pub fn add(&mut self, body: Body) -> BodyId {
        self.items.push(body);
        BodyId((self.items.len() as u32) - 1)
    }

    #[inline] pub fn len(&self) -> usize { self.items.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.items.is_empty() }
    pub fn clear(&mut self) { self.items.clear(); }

    #[inline] pub fn get(&self, id: BodyId) -> Option<&Body> { self.items.get(id.index()) }
    #[inline] pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> { self.items.get_mut(id.index()) }

    #[inline] pub fn as_slice(&self) -> &[Body] { &self.items }
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Body> + '_ { self.items.iter() }
    pub fn iter_mut(&mut self) -> impl ExactSizeIterator<Item = &mut Body> + '_ { self.items.iter_mut() }

    /// Mutable borrows of two distinct bodies, in the order requested.
    pub fn pair_mut(&mut self, a: BodyId, b: BodyId) -> Option<(&mut Body, &mut Body)> {
        let (ia, ib) = (a.index(), b.index());
        if ia == ib || ia >= self.items.len() || ib >= self.items.len() { return None; }
        if ia < ib {
            let (lo, hi) = self.items.split_at_mut(ib);
            Some((&mut lo[ia], &mut hi[0]))
        } else {
            let (lo, hi) = self.items.split_at_mut(ia);
            Some((&mut hi[0], &mut lo[ib]))
        }
    }

    /// Advance every body by the same `dt`, keeping them on one clock.
    pub fn update_all(&mut self, dt: Scalar) {
        for body in &mut self.items {
            body.update(dt);
        }
    }

    // Iterator for hashing in stable order
    pub fn ids(&self) -> impl ExactSizeIterator<Item = BodyId> + '_ {
        (0..self.items.len() as u32).map(BodyId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use impactphys_core::vec3;
    use impactphys_geom::Shape;

    fn sample() -> Bodies {
        let mut bodies = Bodies::with_capacity(3);
        for i in 0..3 {
            bodies.add(Body::new(vec3(i as f32, 0.0, 0.0), Shape::sphere(0.5)).with_inv_mass(1.0));
        }
        bodies
    }

    #[test]
    fn ids_are_indices() {
        let mut bodies = Bodies::default();
        let a = bodies.add(Body::new(vec3(0.0, 0.0, 0.0), Shape::sphere(1.0)));
        let b = bodies.add(Body::new(vec3(1.0, 0.0, 0.0), Shape::sphere(1.0)));
        assert_eq!((a, b), (BodyId(0), BodyId(1)));
        assert_eq!(bodies.ids().collect::<Vec<_>>(), vec![BodyId(0), BodyId(1)]);
    }

    #[test]
    fn pair_mut_keeps_requested_order() {
        let mut bodies = sample();
        let (a, b) = bodies.pair_mut(BodyId(2), BodyId(0)).unwrap();
        assert_eq!(a.position.x, 2.0);
        assert_eq!(b.position.x, 0.0);
        let (a, b) = bodies.pair_mut(BodyId(0), BodyId(1)).unwrap();
        a.position.x = -1.0;
        b.position.x = 9.0;
        assert_eq!(bodies.get(BodyId(0)).unwrap().position.x, -1.0);
        assert_eq!(bodies.get(BodyId(1)).unwrap().position.x, 9.0);
    }

    #[test]
    fn pair_mut_rejects_aliasing_and_out_of_range() {
        let mut bodies = sample();
        assert!(bodies.pair_mut(BodyId(1), BodyId(1)).is_none());
        assert!(bodies.pair_mut(BodyId(0), BodyId(7)).is_none());
    }

    #[test]
    fn update_all_moves_every_body() {
        let mut bodies = sample();
        for id in [BodyId(0), BodyId(1), BodyId(2)] {
            bodies.get_mut(id).unwrap().linear_velocity = vec3(0.0, 1.0, 0.0);
        }
        bodies.update_all(0.5);
        assert!(bodies.iter().all(|b| (b.position.y - 0.5).abs() < 1e-6));
    }
}
