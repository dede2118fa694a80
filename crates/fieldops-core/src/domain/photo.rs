//! Survey photos
//!
//! The backend stores photos as a bare array of hosted-image URLs. Each
//! entry gets a synthetic id at insertion so removal and reordering are
//! keyed by identity, not URL equality (the same URL may legally appear
//! twice). The first entry is the record's primary photo.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub id: Uuid,
    pub url: String,
}

impl Photo {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            url: url.into(),
        }
    }
}

// On the wire a photo is only its URL; the id exists client-side only.
impl Serialize for Photo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for Photo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let url = String::deserialize(deserializer)?;
        Ok(Photo::new(url))
    }
}

/// Bounded, ordered photo collection backing the uploader UI.
#[derive(Debug, Clone)]
pub struct PhotoSet {
    photos: Vec<Photo>,
    max_photos: usize,
}

impl PhotoSet {
    pub fn new(max_photos: usize) -> Self {
        Self {
            photos: Vec::new(),
            max_photos,
        }
    }

    pub fn from_photos(photos: Vec<Photo>, max_photos: usize) -> Self {
        Self { photos, max_photos }
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn max_photos(&self) -> usize {
        self.max_photos
    }

    pub fn can_add(&self) -> bool {
        self.photos.len() < self.max_photos
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn primary(&self) -> Option<&Photo> {
        self.photos.first()
    }

    /// Append an uploaded URL. Rejected without mutation once the limit
    /// is reached.
    pub fn add(&mut self, url: impl Into<String>) -> Result<&Photo, DomainError> {
        if !self.can_add() {
            return Err(DomainError::PhotoLimitReached(self.max_photos));
        }
        self.photos.push(Photo::new(url));
        Ok(self.photos.last().unwrap())
    }

    pub fn remove(&mut self, id: Uuid) -> Result<Photo, DomainError> {
        let pos = self
            .photos
            .iter()
            .position(|p| p.id == id)
            .ok_or(DomainError::PhotoNotFound(id))?;
        Ok(self.photos.remove(pos))
    }

    /// Move a photo to index 0, shifting the rest down.
    pub fn make_primary(&mut self, id: Uuid) -> Result<(), DomainError> {
        let pos = self
            .photos
            .iter()
            .position(|p| p.id == id)
            .ok_or(DomainError::PhotoNotFound(id))?;
        let photo = self.photos.remove(pos);
        self.photos.insert(0, photo);
        Ok(())
    }

    pub fn into_photos(self) -> Vec<Photo> {
        self.photos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_beyond_limit_is_rejected_without_mutation() {
        let mut set = PhotoSet::new(2);
        set.add("https://img.example/a.jpg").unwrap();
        set.add("https://img.example/b.jpg").unwrap();

        let err = set.add("https://img.example/c.jpg").unwrap_err();
        assert!(matches!(err, DomainError::PhotoLimitReached(2)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn duplicate_urls_are_removed_independently() {
        let mut set = PhotoSet::new(5);
        let first = set.add("https://img.example/same.jpg").unwrap().id;
        let second = set.add("https://img.example/same.jpg").unwrap().id;
        assert_ne!(first, second);

        set.remove(first).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.photos()[0].id, second);
    }

    #[test]
    fn make_primary_moves_to_front_preserving_order() {
        let mut set = PhotoSet::new(5);
        set.add("a").unwrap();
        set.add("b").unwrap();
        let c = set.add("c").unwrap().id;

        set.make_primary(c).unwrap();
        let urls: Vec<&str> = set.photos().iter().map(|p| p.url.as_str()).collect();
        assert_eq!(urls, vec!["c", "a", "b"]);
        assert_eq!(set.primary().unwrap().id, c);
    }

    #[test]
    fn photos_serialize_as_bare_urls() {
        let photos = vec![Photo::new("https://img.example/a.jpg")];
        let json = serde_json::to_string(&photos).unwrap();
        assert_eq!(json, r#"["https://img.example/a.jpg"]"#);

        let back: Vec<Photo> = serde_json::from_str(&json).unwrap();
        assert_eq!(back[0].url, "https://img.example/a.jpg");
    }
}
