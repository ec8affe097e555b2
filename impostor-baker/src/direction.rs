/// Cardinal capture directions and per-face storage
use crate::error::BakeError;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::{Index, IndexMut};

/// Logical cube face, listed in capture order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceName {
    Front,
    Back,
    Left,
    Right,
    Up,
    Down,
}

impl FaceName {
    pub const ALL: [FaceName; 6] = [
        FaceName::Front,
        FaceName::Back,
        FaceName::Left,
        FaceName::Right,
        FaceName::Up,
        FaceName::Down,
    ];

    /// Unit view direction the camera looks along for this face
    pub fn direction(self) -> Vec3 {
        match self {
            FaceName::Front => Vec3::Z,
            FaceName::Back => Vec3::NEG_Z,
            FaceName::Left => Vec3::NEG_X,
            FaceName::Right => Vec3::X,
            FaceName::Up => Vec3::Y,
            FaceName::Down => Vec3::NEG_Y,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Lowercase name used for capture and output file names
    pub fn file_stem(self) -> &'static str {
        match self {
            FaceName::Front => "front",
            FaceName::Back => "back",
            FaceName::Left => "left",
            FaceName::Right => "right",
            FaceName::Up => "up",
            FaceName::Down => "down",
        }
    }

    /// Whether the capture camera rolls 180 degrees for this face.
    pub fn is_vertical(self) -> bool {
        matches!(self, FaceName::Up | FaceName::Down)
    }
}

/// Exactly one value per cube face, indexed by `FaceName`.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceSet<T> {
    faces: [T; 6],
}

impl<T> FaceSet<T> {
    pub fn from_fn(mut f: impl FnMut(FaceName) -> T) -> Self {
        Self {
            faces: FaceName::ALL.map(&mut f),
        }
    }

    /// Builds the set face by face in capture order, stopping at the first error.
    pub fn try_from_fn<E>(mut f: impl FnMut(FaceName) -> Result<T, E>) -> Result<Self, E> {
        let mut values = Vec::with_capacity(6);
        for face in FaceName::ALL {
            values.push(f(face)?);
        }
        Ok(Self::from_vec(values))
    }

    /// Takes ownership of per-face values keyed by name; every face must be present.
    pub fn from_map(mut map: HashMap<FaceName, T>) -> Result<Self, BakeError> {
        Self::try_from_fn(|face| map.remove(&face).ok_or(BakeError::MissingFace(face)))
    }

    pub fn map<U>(self, mut f: impl FnMut(FaceName, T) -> U) -> FaceSet<U> {
        let mut values = Vec::with_capacity(6);
        for (face, value) in FaceName::ALL.into_iter().zip(self.faces) {
            values.push(f(face, value));
        }
        FaceSet::from_vec(values)
    }

    pub fn try_map<U, E>(self, mut f: impl FnMut(FaceName, T) -> Result<U, E>) -> Result<FaceSet<U>, E> {
        let mut values = Vec::with_capacity(6);
        for (face, value) in FaceName::ALL.into_iter().zip(self.faces) {
            values.push(f(face, value)?);
        }
        Ok(FaceSet::from_vec(values))
    }

    /// Exchange the values held by two faces
    pub fn swap(&mut self, a: FaceName, b: FaceName) {
        self.faces.swap(a.index(), b.index());
    }

    pub fn iter(&self) -> impl Iterator<Item = (FaceName, &T)> {
        FaceName::ALL.into_iter().zip(self.faces.iter())
    }

    pub fn into_map(self) -> HashMap<FaceName, T> {
        FaceName::ALL.into_iter().zip(self.faces).collect()
    }

    fn from_vec(values: Vec<T>) -> Self {
        match values.try_into() {
            Ok(faces) => Self { faces },
            Err(_) => unreachable!("one value is produced per face"),
        }
    }
}

impl<T> Index<FaceName> for FaceSet<T> {
    type Output = T;

    fn index(&self, face: FaceName) -> &T {
        &self.faces[face.index()]
    }
}

impl<T> IndexMut<FaceName> for FaceSet<T> {
    fn index_mut(&mut self, face: FaceName) -> &mut T {
        &mut self.faces[face.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_are_distinct_unit_axes() {
        for face in FaceName::ALL {
            let dir = face.direction();
            assert!((dir.length() - 1.0).abs() < 1e-6);
            assert_eq!(
                FaceName::ALL.iter().filter(|f| f.direction() == dir).count(),
                1
            );
        }
    }

    #[test]
    fn swap_exchanges_only_named_faces() {
        let mut set = FaceSet::from_fn(|face| face.index());
        set.swap(FaceName::Front, FaceName::Back);

        assert_eq!(set[FaceName::Front], 1);
        assert_eq!(set[FaceName::Back], 0);
        assert_eq!(set[FaceName::Left], 2);
        assert_eq!(set[FaceName::Down], 5);
    }

    #[test]
    fn map_missing_a_face_is_rejected() {
        let mut map: HashMap<FaceName, u8> = FaceName::ALL.iter().map(|f| (*f, 0)).collect();
        map.remove(&FaceName::Up);

        match FaceSet::from_map(map) {
            Err(BakeError::MissingFace(FaceName::Up)) => {}
            other => panic!("expected missing Up face, got {:?}", other),
        }
    }
}
