// The building catalog: every structure on the CapitalMed campus.
//
// A `Catalog` is an immutable, ordered list of `Building` records. It is
// built once (either the curated `Catalog::capitalmed()` set or a JSON file
// passed through `Catalog::from_json_str`) and never mutated afterwards.
// Construction validates the record invariants: ids are unique, and width,
// depth, and floor count are positive. Lookups that miss return `None`, and
// callers treat that as a no-op.
//
// Besides id lookup, this module carries the two directory queries the map
// UI offers: a case-insensitive name search for the destination box, and the
// sidebar category filter (`DirectoryFilter`).
//
// See also: `path.rs` for the entrance point derived from a building's
// footprint, `capitalmed_scene::volumes` for the shape decomposition.

use crate::types::{BuildingId, Category, Point2, Shape, Wing};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

/// One structure on campus.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub name: String,
    pub short_name: String,
    pub category: Category,
    /// Minimum corner of the footprint on the ground plane.
    pub origin: Point2,
    pub width: f32,
    pub depth: f32,
    pub floors: u32,
    pub shape: Shape,
    pub wing: Wing,
    pub phone: String,
    pub hours: String,
    pub description: String,
    pub services: Vec<String>,
}

impl Building {
    /// Centre of the footprint. Also where the building's entrance path ends.
    pub fn center(&self) -> Point2 {
        Point2::new(
            self.origin.x + self.width / 2.0,
            self.origin.z + self.depth / 2.0,
        )
    }

    /// Case-insensitive substring match on either the full or short name.
    pub fn matches_name(&self, query_lower: &str) -> bool {
        self.name.to_lowercase().contains(query_lower)
            || self.short_name.to_lowercase().contains(query_lower)
    }
}

/// Reasons a set of building records cannot form a catalog.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("duplicate building id {0}")]
    DuplicateId(u32),
    #[error("building {0} has a non-positive footprint")]
    EmptyFootprint(u32),
    #[error("building {0} has no floors")]
    NoFloors(u32),
    #[error("invalid catalog JSON: {0}")]
    Json(String),
}

/// Sidebar directory filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectoryFilter {
    /// Everything matching the search box.
    #[default]
    All,
    /// Patient-facing and research buildings.
    Medical,
    /// The emergency department only.
    Emergency,
}

/// The immutable, validated building list.
#[derive(Clone, Debug, Serialize)]
pub struct Catalog {
    buildings: Vec<Building>,
}

impl Catalog {
    /// Validate and wrap a list of buildings. Order is preserved.
    pub fn new(buildings: Vec<Building>) -> Result<Self, CatalogError> {
        let mut seen = BTreeSet::new();
        for b in &buildings {
            if !seen.insert(b.id) {
                return Err(CatalogError::DuplicateId(b.id.0));
            }
            if b.width <= 0.0 || b.depth <= 0.0 {
                return Err(CatalogError::EmptyFootprint(b.id.0));
            }
            if b.floors == 0 {
                return Err(CatalogError::NoFloors(b.id.0));
            }
        }
        Ok(Self { buildings })
    }

    /// Parse a JSON array of building records.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let buildings: Vec<Building> =
            serde_json::from_str(json).map_err(|e| CatalogError::Json(e.to_string()))?;
        Self::new(buildings)
    }

    /// All buildings in catalog order.
    pub fn list_buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn find_building(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.iter().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    /// Destination-box search. An empty query returns no results (the
    /// dropdown stays closed).
    pub fn search_buildings(&self, query: &str) -> Vec<&Building> {
        if query.is_empty() {
            return Vec::new();
        }
        let q = query.to_lowercase();
        self.buildings.iter().filter(|b| b.matches_name(&q)).collect()
    }

    /// Directory panel listing. The category filters ignore the query; `All`
    /// applies it (an empty query matches everything).
    pub fn directory(&self, filter: DirectoryFilter, query: &str) -> Vec<&Building> {
        let q = query.to_lowercase();
        self.buildings
            .iter()
            .filter(|b| match filter {
                DirectoryFilter::Emergency => b.category == Category::Emergency,
                DirectoryFilter::Medical => b.category.is_medical(),
                DirectoryFilter::All => b.matches_name(&q),
            })
            .collect()
    }

    /// The curated CapitalMed campus.
    pub fn capitalmed() -> Self {
        // The curated records satisfy every invariant checked by `new`.
        Self {
            buildings: capitalmed_buildings(),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::capitalmed()
    }
}

#[allow(clippy::too_many_arguments)]
fn record(
    id: u32,
    name: &str,
    short_name: &str,
    category: Category,
    (x, z, width, depth): (f32, f32, f32, f32),
    floors: u32,
    shape: Shape,
    wing: Wing,
    phone: &str,
    hours: &str,
    description: &str,
    services: &[&str],
) -> Building {
    Building {
        id: BuildingId(id),
        name: name.into(),
        short_name: short_name.into(),
        category,
        origin: Point2::new(x, z),
        width,
        depth,
        floors,
        shape,
        wing,
        phone: phone.into(),
        hours: hours.into(),
        description: description.into(),
        services: services.iter().map(|s| (*s).to_string()).collect(),
    }
}

const CLINIC_HOURS: &str = "Sun–Thu 9:00–21:00, Fri–Sat 10:00–18:00";
const ALWAYS_OPEN: &str = "Open 24/7";
const OFFICE_HOURS: &str = "Sun–Thu 8:00–16:00";

// One record per building, laid out as a table.
#[rustfmt::skip]
fn capitalmed_buildings() -> Vec<Building> {
    use Category::*;
    use Shape::*;
    use Wing::*;
    vec![
        record(1, "Rehabilitation, Cosmetics & Wellness Institute", "Rehab & Wellness", Wellness,
            (-38.0, 18.0, 18.0, 14.0), 3, LShaped, West, "+20 2 1234 5601", CLINIC_HOURS,
            "Physical rehabilitation, aesthetic medicine and spa-based recovery programs.",
            &["Physiotherapy", "Cosmetic Surgery", "Hydrotherapy"]),
        record(2, "UHC Phase 1 – 220 Beds, 36 Outpatient Clinics", "UHC Phase 1", Hospital,
            (-30.0, 4.0, 22.0, 16.0), 5, UShaped, West, "+20 2 1234 5602", ALWAYS_OPEN,
            "First phase of the University Hospital Center with inpatient wards and outpatient clinics.",
            &["Inpatient Wards", "Outpatient Clinics", "Day Surgery"]),
        record(3, "University Hospital Center – 332 Beds", "University Hospital", Hospital,
            (-36.0, -14.0, 26.0, 20.0), 7, UShaped, West, "+20 2 1234 5603", ALWAYS_OPEN,
            "Flagship teaching hospital with tertiary care and intensive care units.",
            &["ICU", "General Surgery", "Internal Medicine", "Radiology"]),
        record(4, "Emergency & Trauma Center", "Emergency Center", Emergency,
            (-10.0, -16.0, 16.0, 12.0), 4, Rectangular, Center, "123", ALWAYS_OPEN,
            "Level I trauma center with a dedicated ambulance bay and resuscitation suites.",
            &["Trauma Care", "Emergency Medicine", "Ambulance Services"]),
        record(5, "Central Command Administration", "Administration", Admin,
            (-4.0, -28.0, 12.0, 10.0), 3, Rectangular, Center, "+20 2 1234 5605", OFFICE_HOURS,
            "Campus administration, patient relations and the central operations desk.",
            &["Patient Relations", "Billing", "Medical Records"]),
        record(6, "CapitalMed Hotel", "Medical Hotel", Hotel,
            (-42.0, 30.0, 14.0, 12.0), 6, Rectangular, West, "+20 2 1234 5606", ALWAYS_OPEN,
            "Hotel for patients' families and international visitors.",
            &["Accommodation", "Concierge", "Airport Transfer"]),
        record(7, "Central Utility Building", "Utilities", Admin,
            (-6.0, -4.0, 10.0, 8.0), 2, Rectangular, Center, "+20 2 1234 5607", OFFICE_HOURS,
            "Central plant supplying power, chilled water and medical gases.",
            &["Facilities Management"]),
        record(8, "La Plaza Commercial Mall", "La Plaza Mall", Commercial,
            (-30.0, -28.0, 18.0, 12.0), 2, LShaped, West, "+20 2 1234 5608", "Daily 10:00–23:00",
            "Retail, dining and pharmacy outlets for visitors and staff.",
            &["Pharmacy", "Food Court", "Retail"]),
        record(9, "Neurosciences Institute", "Neurosciences", Hospital,
            (14.0, -28.0, 16.0, 12.0), 4, Rectangular, East, "+20 2 1234 5609", CLINIC_HOURS,
            "Neurology and neurosurgery with a stroke unit and neurophysiology labs.",
            &["Neurology", "Neurosurgery", "Stroke Unit"]),
        record(10, "Urinary Diseases & Urosurgery", "Urology", Hospital,
            (14.0, -14.0, 16.0, 12.0), 4, LShaped, East, "+20 2 1234 5610", CLINIC_HOURS,
            "Urology, nephrology and kidney transplantation.",
            &["Urology", "Nephrology", "Dialysis"]),
        record(11, "Cardiopulmonary Institute", "Cardiopulmonary", Hospital,
            (14.0, -2.0, 16.0, 12.0), 5, Rectangular, East, "+20 2 1234 5611", CLINIC_HOURS,
            "Heart and lung care from diagnostics to cardiac surgery.",
            &["Cardiology", "Cardiac Surgery", "Pulmonology"]),
        record(12, "Hepatobiliary & Gastroenterology", "Gastroenterology", Hospital,
            (34.0, -28.0, 16.0, 12.0), 4, Rectangular, East, "+20 2 1234 5612", CLINIC_HOURS,
            "Liver, pancreas and digestive tract medicine and surgery.",
            &["Gastroenterology", "Hepatology", "Endoscopy"]),
        record(13, "Advanced Medical Research", "Research Lab", Research,
            (34.0, -14.0, 16.0, 12.0), 4, LShaped, East, "+20 2 1234 5613", OFFICE_HOURS,
            "Translational research laboratories and the clinical trials unit.",
            &["Clinical Trials", "Genomics", "Biobank"]),
        record(14, "Oncology Institute", "Oncology", Hospital,
            (34.0, -2.0, 16.0, 12.0), 5, UShaped, East, "+20 2 1234 5614", CLINIC_HOURS,
            "Comprehensive cancer center with radiotherapy and day chemotherapy.",
            &["Medical Oncology", "Radiotherapy", "Day Chemotherapy"]),
        record(15, "Children & Women Institute", "Children & Women", Hospital,
            (54.0, -26.0, 16.0, 16.0), 5, UShaped, East, "+20 2 1234 5615", ALWAYS_OPEN,
            "Maternity, pediatrics and neonatal intensive care.",
            &["Obstetrics", "Pediatrics", "NICU"]),
        record(16, "Assisted Living Facilities", "Assisted Living", Wellness,
            (54.0, -10.0, 16.0, 12.0), 3, Rectangular, East, "+20 2 1234 5616", ALWAYS_OPEN,
            "Residential care with on-site nursing.",
            &["Residential Care", "Nursing"]),
        record(17, "Behavioral & Mental Health", "Mental Health", Hospital,
            (54.0, 4.0, 16.0, 12.0), 3, Rectangular, East, "+20 2 1234 5617", CLINIC_HOURS,
            "Psychiatry, psychology and addiction services.",
            &["Psychiatry", "Psychology", "Addiction Treatment"]),
        record(18, "Geriatric Health Care", "Geriatrics", Hospital,
            (34.0, 10.0, 16.0, 10.0), 3, Rectangular, East, "+20 2 1234 5618", CLINIC_HOURS,
            "Specialized care for older adults, including memory clinics.",
            &["Geriatric Medicine", "Memory Clinic"]),
        record(19, "Dental Institute", "Dental", Hospital,
            (14.0, 10.0, 12.0, 10.0), 2, Rectangular, East, "+20 2 1234 5619", CLINIC_HOURS,
            "General and specialist dentistry with maxillofacial surgery.",
            &["General Dentistry", "Orthodontics", "Maxillofacial Surgery"]),
    ]
}
