// Data source URLs
pub const POLLEN_BASE_URL: &str = "https://www.atmo-hdf.fr/air-commune/";
pub const RECOMMENDATIONS_URL: &str = "https://www.atmo-france.org/article/lindice-pollinique";
pub const MEASUREMENT_URL: &str = "https://www.atmo-hdf.fr/article/surveillance-des-pollens";
pub const REGION_GEOJSON_URL: &str = "https://raw.githubusercontent.com/gregoiredavid/france-geojson/master/regions/hauts-de-france/departements-hauts-de-france.geojson";
pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search.php";

// Reference table columns
pub const COL_TOWN_NAME: &str = "nom_commune_postal";
pub const COL_LATITUDE: &str = "latitude";
pub const COL_LONGITUDE: &str = "longitude";
pub const COL_POSTAL_CODE: &str = "code_postal";
pub const COL_INSEE_CODE: &str = "code_commune_INSEE";
pub const COL_DEPARTMENT: &str = "nom_departement";
pub const COL_DEPARTMENT_ACCENTED: &str = "nom_département";
pub const COL_REGION: &str = "nom_region";

/// Width of postal and INSEE codes after zero padding.
pub const CODE_WIDTH: usize = 5;

// Selectors
pub const POLLEN_TITLE_SELECTOR: &str =
    r#"p[class="c-indice-pollen-taxon-title font-weight-bold text-center"]"#;
pub const RISK_CATEGORY_SELECTOR: &str = r#"p[class="text-uppercase mt-2"]"#;
pub const DEPARTMENT_RISK_SELECTOR: &str = r#"p[class="font-weight-bold text-uppercase mt-3"]"#;
pub const RECOMMENDATIONS_ANCHOR_SELECTOR: &str = "h2#item-4755, ul";
pub const ARTICLE_BODY_SELECTOR: &str = "div.field__item";
pub const VIDEO_IFRAME_SELECTOR: &str = "iframe[src]";

// Map defaults
pub const REGION_CENTER: (f64, f64) = (49.894483, 2.985636);
pub const REGION_ZOOM: f64 = 7.5;
pub const TOWN_ZOOM: f64 = 12.0;
pub const REGION_MAP_FILE: &str = "hauts_de_france_map.html";
