// 🐠 Animal Catalog - Closed category model + read-only lookups
// Exactly three categories exist; behavior keyed by category is a pure function

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{VoteError, VoteResult};
use crate::store::Store;

/// Sound reported for invertebrates no matter what the catalog stores
pub const SILENT: &str = "Silent";

// ============================================================================
// ANIMAL CATEGORY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimalCategory {
    Fish,
    Mammal,
    Invertebrate,
}

impl AnimalCategory {
    /// All categories, in display order
    pub const ALL: [AnimalCategory; 3] = [
        AnimalCategory::Fish,
        AnimalCategory::Mammal,
        AnimalCategory::Invertebrate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnimalCategory::Fish => "Fish",
            AnimalCategory::Mammal => "Mammal",
            AnimalCategory::Invertebrate => "Invertebrate",
        }
    }

    /// Sound used when the catalog row has none
    pub fn default_sound(&self) -> &'static str {
        match self {
            AnimalCategory::Fish => "Blub",
            AnimalCategory::Mammal => "Whistle",
            AnimalCategory::Invertebrate => SILENT,
        }
    }

    /// Fixed swim description, keyed by category alone
    pub fn swim_description(&self) -> &'static str {
        match self {
            AnimalCategory::Fish => "Swims by flapping its tail and fins",
            AnimalCategory::Mammal => "Swims with up-and-down tail strokes and surfaces to breathe",
            AnimalCategory::Invertebrate => "Swims by jet propulsion or by rippling its arms",
        }
    }
}

impl fmt::Display for AnimalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnimalCategory {
    type Err = VoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Fish" => Ok(AnimalCategory::Fish),
            "Mammal" => Ok(AnimalCategory::Mammal),
            "Invertebrate" => Ok(AnimalCategory::Invertebrate),
            other => Err(VoteError::Validation(format!(
                "unknown animal category: {}",
                other
            ))),
        }
    }
}

// ============================================================================
// ANIMAL ENTITY
// ============================================================================

/// One catalog entry. Identity is the SQLite rowid; the category is set at
/// seeding time and never changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animal {
    pub id: i64,
    pub name: String,
    pub scientific_name: String,
    pub category: AnimalCategory,
    /// Free-text refinement, e.g. "Shark"
    pub subtype: String,
    pub description: String,
    pub habitat: String,
    pub image_url: String,
    pub sound: String,
}

impl Animal {
    /// Stored sound for fish and mammals; invertebrates are always silent
    pub fn make_sound(&self) -> &str {
        match self.category {
            AnimalCategory::Invertebrate => SILENT,
            _ => &self.sound,
        }
    }

    pub fn swim_description(&self) -> &'static str {
        self.category.swim_description()
    }
}

/// Per-category animal tally
#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub category: AnimalCategory,
    pub count: i64,
}

// ============================================================================
// CATALOG
// ============================================================================

/// Read-only view over the animals table. Seeding lives elsewhere; nothing
/// here mutates the catalog.
#[derive(Clone)]
pub struct Catalog {
    store: Store,
}

impl Catalog {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Every animal, sorted by name (id breaks name ties, so the order is stable)
    pub fn get_all(&self) -> VoteResult<Vec<Animal>> {
        let conn = self.store.conn();
        let mut stmt = conn.prepare(
            "SELECT id, name, scientific_name, category, subtype,
                    description, habitat, image_url, sound
             FROM animals
             ORDER BY name, id",
        )?;

        let animals = stmt
            .query_map([], row_to_animal)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(animals)
    }

    pub fn get_by_id(&self, id: i64) -> VoteResult<Animal> {
        let conn = self.store.conn();
        let result = conn.query_row(
            "SELECT id, name, scientific_name, category, subtype,
                    description, habitat, image_url, sound
             FROM animals
             WHERE id = ?1",
            [id],
            row_to_animal,
        );

        match result {
            Ok(animal) => Ok(animal),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(VoteError::NotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    pub fn count(&self) -> VoteResult<i64> {
        let conn = self.store.conn();
        let count = conn.query_row("SELECT COUNT(*) FROM animals", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Tally per category, zero-filled so all three categories always appear
    pub fn category_counts(&self) -> VoteResult<Vec<CategoryCount>> {
        let conn = self.store.conn();
        let mut stmt = conn.prepare("SELECT category, COUNT(*) FROM animals GROUP BY category")?;

        let raw: HashMap<String, i64> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<Result<HashMap<_, _>, _>>()?;

        Ok(AnimalCategory::ALL
            .iter()
            .map(|category| CategoryCount {
                category: *category,
                count: raw.get(category.as_str()).copied().unwrap_or(0),
            })
            .collect())
    }
}

fn row_to_animal(row: &rusqlite::Row<'_>) -> rusqlite::Result<Animal> {
    let category_str: String = row.get(3)?;
    let category = AnimalCategory::from_str(&category_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
    })?;

    // Sound column is nullable; fall back to the category default
    let sound: Option<String> = row.get(8)?;

    Ok(Animal {
        id: row.get(0)?,
        name: row.get(1)?,
        scientific_name: row.get(2)?,
        category,
        subtype: row.get(4)?,
        description: row.get(5)?,
        habitat: row.get(6)?,
        image_url: row.get(7)?,
        sound: sound.unwrap_or_else(|| category.default_sound().to_string()),
    })
}

/// Insert one catalog row directly. Used by seeding and tests.
pub(crate) fn insert_animal_row(
    conn: &Connection,
    name: &str,
    scientific_name: &str,
    category: AnimalCategory,
    subtype: &str,
    description: &str,
    habitat: &str,
    image_url: &str,
    sound: Option<&str>,
) -> VoteResult<i64> {
    conn.execute(
        "INSERT INTO animals (name, scientific_name, category, subtype,
                              description, habitat, image_url, sound)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        rusqlite::params![
            name,
            scientific_name,
            category.as_str(),
            subtype,
            description,
            habitat,
            image_url,
            sound,
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_catalog() -> (Store, Catalog) {
        let store = Store::open_in_memory().unwrap();
        let catalog = Catalog::new(store.clone());
        (store, catalog)
    }

    fn add_animal(store: &Store, name: &str, category: AnimalCategory, sound: Option<&str>) -> i64 {
        insert_animal_row(
            &store.conn(),
            name,
            "Testus testus",
            category,
            "Test",
            "A test animal",
            "Test tank",
            "images/test.jpg",
            sound,
        )
        .unwrap()
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("Fish".parse::<AnimalCategory>().unwrap(), AnimalCategory::Fish);
        assert_eq!(
            "Mammal".parse::<AnimalCategory>().unwrap(),
            AnimalCategory::Mammal
        );
        assert_eq!(
            "Invertebrate".parse::<AnimalCategory>().unwrap(),
            AnimalCategory::Invertebrate
        );

        let err = "Reptile".parse::<AnimalCategory>().unwrap_err();
        assert!(matches!(err, VoteError::Validation(_)));
        assert!(err.to_string().contains("Reptile"));
    }

    #[test]
    fn test_category_round_trip() {
        for category in AnimalCategory::ALL {
            assert_eq!(category.as_str().parse::<AnimalCategory>().unwrap(), category);
        }
    }

    #[test]
    fn test_default_sounds() {
        assert_eq!(AnimalCategory::Fish.default_sound(), "Blub");
        assert_eq!(AnimalCategory::Mammal.default_sound(), "Whistle");
        assert_eq!(AnimalCategory::Invertebrate.default_sound(), SILENT);
    }

    #[test]
    fn test_swim_description_keyed_by_category_only() {
        let a = Animal {
            id: 1,
            name: "A".to_string(),
            scientific_name: "A a".to_string(),
            category: AnimalCategory::Fish,
            subtype: "Shark".to_string(),
            description: String::new(),
            habitat: String::new(),
            image_url: String::new(),
            sound: "Roar".to_string(),
        };
        let b = Animal {
            id: 2,
            name: "B".to_string(),
            subtype: "Ray".to_string(),
            ..a.clone()
        };

        // Different animals, same category, same description
        assert_eq!(a.swim_description(), b.swim_description());
        assert_eq!(a.swim_description(), AnimalCategory::Fish.swim_description());
    }

    #[test]
    fn test_make_sound_invertebrate_always_silent() {
        let (store, catalog) = test_catalog();
        let id = add_animal(&store, "Octopus", AnimalCategory::Invertebrate, Some("Pop"));

        let octopus = catalog.get_by_id(id).unwrap();
        assert_eq!(octopus.make_sound(), SILENT);
    }

    #[test]
    fn test_sound_default_applied_on_load() {
        let (store, catalog) = test_catalog();
        let fish_id = add_animal(&store, "Tuna", AnimalCategory::Fish, None);
        let mammal_id = add_animal(&store, "Dolphin", AnimalCategory::Mammal, None);
        let custom_id = add_animal(&store, "Whale", AnimalCategory::Mammal, Some("Song"));

        assert_eq!(catalog.get_by_id(fish_id).unwrap().sound, "Blub");
        assert_eq!(catalog.get_by_id(mammal_id).unwrap().sound, "Whistle");
        assert_eq!(catalog.get_by_id(custom_id).unwrap().sound, "Song");
    }

    #[test]
    fn test_get_all_ordered_by_name() {
        let (store, catalog) = test_catalog();
        add_animal(&store, "Orca", AnimalCategory::Mammal, None);
        add_animal(&store, "Clownfish", AnimalCategory::Fish, None);
        add_animal(&store, "Jellyfish", AnimalCategory::Invertebrate, None);

        let names: Vec<String> = catalog
            .get_all()
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();

        assert_eq!(names, vec!["Clownfish", "Jellyfish", "Orca"]);
    }

    #[test]
    fn test_get_by_id_not_found() {
        let (_store, catalog) = test_catalog();

        let err = catalog.get_by_id(42).unwrap_err();
        assert!(matches!(err, VoteError::NotFound(42)));
    }

    #[test]
    fn test_category_counts_zero_filled() {
        let (store, catalog) = test_catalog();
        add_animal(&store, "Tuna", AnimalCategory::Fish, None);
        add_animal(&store, "Salmon", AnimalCategory::Fish, None);

        let counts = catalog.category_counts().unwrap();
        assert_eq!(counts.len(), 3);
        assert_eq!(counts[0].category, AnimalCategory::Fish);
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[1].category, AnimalCategory::Mammal);
        assert_eq!(counts[1].count, 0);
        assert_eq!(counts[2].category, AnimalCategory::Invertebrate);
        assert_eq!(counts[2].count, 0);
    }

    #[test]
    fn test_count() {
        let (store, catalog) = test_catalog();
        assert_eq!(catalog.count().unwrap(), 0);

        add_animal(&store, "Tuna", AnimalCategory::Fish, None);
        assert_eq!(catalog.count().unwrap(), 1);
    }
}
