use nalgebra::{Point3, Vector3};

/// A single atom of a periodic system.
///
/// The label is kept as written in the source file; XSF allows either an atomic number
/// (`"8"`) or an element symbol (`"O"`).
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Atomic type label, e.g. `"8"` or `"O"`.
    pub label: String,
    /// Cartesian position in Angstrom.
    pub position: Point3<f64>,
}

impl Atom {
    pub fn new(label: impl Into<String>, position: Point3<f64>) -> Self {
        Self {
            label: label.into(),
            position,
        }
    }
}

/// An ordered collection of atoms.
///
/// Labels and coordinates live in the same record, so they always grow and shrink
/// together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomSet {
    atoms: Vec<Atom>,
}

impl AtomSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            atoms: Vec::with_capacity(capacity),
        }
    }

    /// Appends an atom and returns its index.
    pub fn add_atom(&mut self, label: impl Into<String>, position: Point3<f64>) -> usize {
        self.atoms.push(Atom::new(label, position));
        self.atoms.len() - 1
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Atom> {
        self.atoms.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.atoms.iter().map(|atom| atom.label.as_str())
    }

    pub fn positions(&self) -> impl Iterator<Item = &Point3<f64>> {
        self.atoms.iter().map(|atom| &atom.position)
    }

    pub fn positions_mut(&mut self) -> impl Iterator<Item = &mut Point3<f64>> {
        self.atoms.iter_mut().map(|atom| &mut atom.position)
    }

    /// Geometric center of all atoms, or `None` for an empty set.
    pub fn centroid(&self) -> Option<Point3<f64>> {
        if self.atoms.is_empty() {
            return None;
        }
        let sum: Vector3<f64> = self.positions().map(|p| p.coords).sum();
        Some(Point3::from(sum / self.atoms.len() as f64))
    }
}

impl FromIterator<Atom> for AtomSet {
    fn from_iter<I: IntoIterator<Item = Atom>>(iter: I) -> Self {
        Self {
            atoms: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a AtomSet {
    type Item = &'a Atom;
    type IntoIter = std::slice::Iter<'a, Atom>;

    fn into_iter(self) -> Self::IntoIter {
        self.atoms.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_atom_keeps_labels_and_positions_in_step() {
        let mut atoms = AtomSet::new();
        assert!(atoms.is_empty());
        let first = atoms.add_atom("8", Point3::new(0.0, 0.0, 0.0));
        let second = atoms.add_atom("H", Point3::new(0.96, 0.0, 0.0));

        assert_eq!((first, second), (0, 1));
        assert_eq!(atoms.len(), 2);
        assert_eq!(atoms.labels().count(), atoms.positions().count());
        assert_eq!(atoms.labels().collect::<Vec<_>>(), vec!["8", "H"]);
        assert_eq!(atoms.get(1).unwrap().position, Point3::new(0.96, 0.0, 0.0));
        assert!(atoms.get(2).is_none());
    }

    #[test]
    fn default_sets_are_independent() {
        let mut a = AtomSet::default();
        let b = AtomSet::default();
        a.add_atom("1", Point3::origin());
        assert_eq!(a.len(), 1);
        assert!(b.is_empty());
    }

    #[test]
    fn positions_mut_updates_in_place() {
        let mut atoms: AtomSet = vec![
            Atom::new("6", Point3::new(1.0, 1.0, 1.0)),
            Atom::new("6", Point3::new(2.0, 2.0, 2.0)),
        ]
        .into_iter()
        .collect();
        for p in atoms.positions_mut() {
            p.x = 0.0;
        }
        assert!(atoms.iter().all(|a| a.position.x == 0.0));
    }

    #[test]
    fn centroid_averages_positions() {
        let mut atoms = AtomSet::new();
        assert!(atoms.centroid().is_none());
        atoms.add_atom("1", Point3::new(0.0, 0.0, 0.0));
        atoms.add_atom("1", Point3::new(2.0, 4.0, -2.0));
        assert_eq!(atoms.centroid(), Some(Point3::new(1.0, 2.0, -1.0)));
    }
}
