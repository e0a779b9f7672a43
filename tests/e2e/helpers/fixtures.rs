use poi_narrator::domain::poi::AssetKind;
use poi_narrator::infrastructure::repositories::AudioAssetStore;
use std::path::PathBuf;

/// Narrative the mock text generator returns by default: three facts
pub const DEFAULT_NARRATIVE: &str = "Плотину построили в тысяча семьсот двадцать третьем году.\n\n\
Пруд снабжал водой Екатеринбургский завод.\n\
Здесь проходят народные гуляния.";

/// Catalog seeded into every test server.
///
/// Positions are planar so distances are easy to reason about:
/// 1 at the origin, 2 at (3, 4), 3 at (1, 1), 4 far away at (100, 100).
pub const CATALOG: &str = r#"[
    {
        "id": 1,
        "name": "Плотинка",
        "x": 0.0,
        "y": 0.0,
        "categories": ["history", "architecture"],
        "description": "Плотина городского пруда на реке Исеть",
        "source_facts": ["Построена в 1723 году", "Место народных гуляний"]
    },
    {
        "id": 2,
        "name": "Озеро Шарташ",
        "x": 3.0,
        "y": 4.0,
        "categories": ["nature", "forest_hiking"],
        "description": "Озеро на востоке города",
        "facts": ["Озеро старше Уральских гор", "На берегу стоят Каменные палатки"]
    },
    {
        "id": 3,
        "name": "Оперный театр",
        "x": 1.0,
        "y": 1.0,
        "categories": ["music", "architecture"],
        "description": "Театр оперы и балета"
    },
    {
        "id": 4,
        "name": "Ресторан на горе",
        "x": 100.0,
        "y": 100.0,
        "categories": ["gastronomy"],
        "description": "Уральская кухня"
    }
]"#;

/// Direct access to the audio root behind the server
pub struct TestFixtures {
    pub assets: AudioAssetStore,
}

impl TestFixtures {
    pub fn new(assets: AudioAssetStore) -> Self {
        Self { assets }
    }

    /// Place an asset on disk as if generated by an earlier run
    pub fn seed_asset(&self, poi_id: i64, asset: AssetKind, bytes: &[u8]) -> PathBuf {
        let path = self.assets.path_for(poi_id, asset);
        std::fs::create_dir_all(self.assets.poi_dir(poi_id)).expect("Failed to create POI dir");
        std::fs::write(&path, bytes).expect("Failed to seed asset");
        path
    }

    pub fn asset_exists(&self, poi_id: i64, asset: AssetKind) -> bool {
        self.assets.path_for(poi_id, asset).is_file()
    }

    pub fn read_asset(&self, poi_id: i64, asset: AssetKind) -> Vec<u8> {
        std::fs::read(self.assets.path_for(poi_id, asset)).expect("Failed to read asset")
    }

    /// File names in the POI directory, sorted
    pub fn files_in(&self, poi_id: i64) -> Vec<String> {
        let mut names: Vec<String> = match std::fs::read_dir(self.assets.poi_dir(poi_id)) {
            Ok(entries) => entries
                .map(|e| e.expect("Failed to read entry").file_name().to_string_lossy().to_string())
                .collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }
}
