// 🌱 Catalog Seeding - built-in animals + CSV import
// The catalog is read-only at runtime; this module is the only writer

use anyhow::Context;
use std::path::Path;

use crate::catalog::{insert_animal_row, AnimalCategory};
use crate::error::VoteResult;
use crate::store::Store;
use serde::Deserialize;

/// One row of seed input. The category stays a raw string until insert time
/// so a bad seed file fails with a validation error, not a panic.
#[derive(Debug, Clone, Deserialize)]
pub struct AnimalSeed {
    pub name: String,
    pub scientific_name: String,
    pub category: String,
    pub subtype: String,
    pub description: String,
    pub habitat: String,
    pub image_url: String,
    #[serde(default)]
    pub sound: Option<String>,
}

/// Insert one animal, validating its category tag
pub fn insert_animal(store: &Store, seed: &AnimalSeed) -> VoteResult<i64> {
    let category: AnimalCategory = seed.category.parse()?;

    insert_animal_row(
        &store.conn(),
        &seed.name,
        &seed.scientific_name,
        category,
        &seed.subtype,
        &seed.description,
        &seed.habitat,
        &seed.image_url,
        seed.sound.as_deref(),
    )
}

/// Seed the catalog, skipping animals whose name is already present so the
/// command can be re-run safely. Returns the number inserted.
pub fn seed_catalog(store: &Store, seeds: &[AnimalSeed]) -> VoteResult<usize> {
    let mut inserted = 0;
    let mut skipped = 0;

    for seed in seeds {
        if animal_exists(store, &seed.name)? {
            skipped += 1;
            continue;
        }

        insert_animal(store, seed)?;
        inserted += 1;
    }

    println!("✓ Inserted: {} animals", inserted);
    println!("✓ Skipped existing: {}", skipped);

    Ok(inserted)
}

fn animal_exists(store: &Store, name: &str) -> VoteResult<bool> {
    let conn = store.conn();
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM animals WHERE name = ?1",
        [name],
        |row| row.get(0),
    )?;

    Ok(count > 0)
}

/// Load seed rows from a CSV file with the header
/// `name,scientific_name,category,subtype,description,habitat,image_url,sound`
pub fn load_catalog_csv(path: &Path) -> anyhow::Result<Vec<AnimalSeed>> {
    let mut rdr = csv::Reader::from_path(path).context("Failed to open seed CSV")?;

    let mut seeds = Vec::new();
    for result in rdr.deserialize() {
        let seed: AnimalSeed = result.context("Failed to deserialize seed row")?;
        seeds.push(seed);
    }

    Ok(seeds)
}

/// The built-in catalog: ten animals across all three categories.
/// Some rows leave `sound` empty to pick up the category default.
pub fn default_catalog() -> Vec<AnimalSeed> {
    fn seed(
        name: &str,
        scientific_name: &str,
        category: AnimalCategory,
        subtype: &str,
        description: &str,
        habitat: &str,
        image_url: &str,
        sound: Option<&str>,
    ) -> AnimalSeed {
        AnimalSeed {
            name: name.to_string(),
            scientific_name: scientific_name.to_string(),
            category: category.as_str().to_string(),
            subtype: subtype.to_string(),
            description: description.to_string(),
            habitat: habitat.to_string(),
            image_url: image_url.to_string(),
            sound: sound.map(str::to_string),
        }
    }

    vec![
        seed(
            "Clownfish",
            "Amphiprion ocellaris",
            AnimalCategory::Fish,
            "Anemonefish",
            "Lives among sea anemone tentacles, immune to their sting",
            "Coral reefs of the Indo-Pacific",
            "images/clownfish.jpg",
            None,
        ),
        seed(
            "Great White Shark",
            "Carcharodon carcharias",
            AnimalCategory::Fish,
            "Shark",
            "Apex predator that can detect a drop of blood from far away",
            "Coastal waters of all major oceans",
            "images/great_white.jpg",
            None,
        ),
        seed(
            "Manta Ray",
            "Mobula birostris",
            AnimalCategory::Fish,
            "Ray",
            "Largest ray in the world, filter-feeds on plankton",
            "Tropical and subtropical open ocean",
            "images/manta_ray.jpg",
            None,
        ),
        seed(
            "Seahorse",
            "Hippocampus kuda",
            AnimalCategory::Fish,
            "Seahorse",
            "Males carry the eggs in a brood pouch until they hatch",
            "Seagrass beds and mangroves",
            "images/seahorse.jpg",
            Some("Click"),
        ),
        seed(
            "Blue Whale",
            "Balaenoptera musculus",
            AnimalCategory::Mammal,
            "Baleen whale",
            "The largest animal to have ever lived on Earth",
            "All oceans except the Arctic",
            "images/blue_whale.jpg",
            Some("Moan"),
        ),
        seed(
            "Bottlenose Dolphin",
            "Tursiops truncatus",
            AnimalCategory::Mammal,
            "Dolphin",
            "Highly social and uses signature whistles like names",
            "Warm and temperate seas worldwide",
            "images/dolphin.jpg",
            None,
        ),
        seed(
            "Orca",
            "Orcinus orca",
            AnimalCategory::Mammal,
            "Toothed whale",
            "Hunts in coordinated pods with learned local techniques",
            "From Arctic to Antarctic waters",
            "images/orca.jpg",
            Some("Call"),
        ),
        seed(
            "Giant Pacific Octopus",
            "Enteroctopus dofleini",
            AnimalCategory::Invertebrate,
            "Octopus",
            "Can change color and texture in a fraction of a second",
            "Cold Pacific coastal waters",
            "images/octopus.jpg",
            None,
        ),
        seed(
            "Moon Jellyfish",
            "Aurelia aurita",
            AnimalCategory::Invertebrate,
            "Jellyfish",
            "Translucent bell with four horseshoe-shaped gonads",
            "Coastal waters worldwide",
            "images/moon_jellyfish.jpg",
            None,
        ),
        seed(
            "Humboldt Squid",
            "Dosidicus gigas",
            AnimalCategory::Invertebrate,
            "Squid",
            "Flashes red and white while hunting in large shoals",
            "Eastern Pacific, down to great depths",
            "images/humboldt_squid.jpg",
            Some("Pop"),
        ),
    ]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, SILENT};
    use crate::error::VoteError;
    use std::io::Write;

    #[test]
    fn test_default_catalog_is_valid() {
        let seeds = default_catalog();
        assert_eq!(seeds.len(), 10);

        for seed in &seeds {
            seed.category
                .parse::<AnimalCategory>()
                .expect("Built-in seeds must carry valid categories");
        }

        let mut names: Vec<&str> = seeds.iter().map(|s| s.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 10, "Seed names must be unique");
    }

    #[test]
    fn test_seed_catalog_is_rerunnable() {
        let store = Store::open_in_memory().unwrap();
        let seeds = default_catalog();

        let first = seed_catalog(&store, &seeds).unwrap();
        let second = seed_catalog(&store, &seeds).unwrap();

        assert_eq!(first, 10);
        assert_eq!(second, 0, "Second run must skip everything");
        assert_eq!(Catalog::new(store).count().unwrap(), 10);
    }

    #[test]
    fn test_insert_animal_rejects_unknown_category() {
        let store = Store::open_in_memory().unwrap();
        let mut seed = default_catalog().remove(0);
        seed.category = "Robot".to_string();

        let err = insert_animal(&store, &seed).unwrap_err();
        assert!(matches!(err, VoteError::Validation(_)));
        assert_eq!(Catalog::new(store).count().unwrap(), 0);
    }

    #[test]
    fn test_seeded_sounds_resolve() {
        let store = Store::open_in_memory().unwrap();
        seed_catalog(&store, &default_catalog()).unwrap();
        let catalog = Catalog::new(store);

        let animals = catalog.get_all().unwrap();
        let by_name = |name: &str| {
            animals
                .iter()
                .find(|a| a.name == name)
                .unwrap_or_else(|| panic!("{} missing", name))
        };

        // Empty seed sound falls back to the category default
        assert_eq!(by_name("Clownfish").sound, "Blub");
        assert_eq!(by_name("Bottlenose Dolphin").sound, "Whistle");
        assert_eq!(by_name("Orca").sound, "Call");

        // A stored squid sound never leaks out of make_sound
        let squid = by_name("Humboldt Squid");
        assert_eq!(squid.sound, "Pop");
        assert_eq!(squid.make_sound(), SILENT);
    }

    #[test]
    fn test_load_catalog_csv() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(
            file,
            "name,scientific_name,category,subtype,description,habitat,image_url,sound"
        )
        .unwrap();
        writeln!(
            file,
            "Narwhal,Monodon monoceros,Mammal,Toothed whale,Arctic whale with a long tusk,Arctic waters,images/narwhal.jpg,Click"
        )
        .unwrap();
        writeln!(
            file,
            "Lionfish,Pterois volitans,Fish,Scorpionfish,Venomous spines and bold stripes,Indo-Pacific reefs,images/lionfish.jpg,"
        )
        .unwrap();
        file.flush().unwrap();

        let seeds = load_catalog_csv(file.path()).unwrap();
        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0].name, "Narwhal");
        assert_eq!(seeds[0].sound.as_deref(), Some("Click"));
        assert_eq!(seeds[1].sound, None, "Empty CSV field means no sound");

        let store = Store::open_in_memory().unwrap();
        seed_catalog(&store, &seeds).unwrap();

        let animals = Catalog::new(store).get_all().unwrap();
        assert_eq!(animals.len(), 2);
        // Lionfish had no sound in the file; the Fish default applies
        assert_eq!(animals[0].name, "Lionfish");
        assert_eq!(animals[0].sound, "Blub");
    }
}
