/// Typical conditions substituted when the weather provider is unreachable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackConditions {
    pub temperature_c: f64,
    pub rainfall_mm: f64,
    pub humidity_pct: f64,
}

/// An Indian state or union territory, located by a representative
/// agricultural city.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub name: &'static str,
    pub city: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    pub fallback: FallbackConditions,
}

/// Region used for unrecognized names.
pub const DEFAULT_REGION: &str = "Punjab";

const fn region(
    name: &'static str,
    city: &'static str,
    latitude: f64,
    longitude: f64,
    temperature_c: f64,
    rainfall_mm: f64,
    humidity_pct: f64,
) -> Region {
    Region {
        name,
        city,
        latitude,
        longitude,
        fallback: FallbackConditions {
            temperature_c,
            rainfall_mm,
            humidity_pct,
        },
    }
}

#[rustfmt::skip]
pub const REGIONS: &[Region] = &[
    region("Andhra Pradesh", "Kurnool", 15.9129, 79.7400, 30.0, 1.5, 60.0),
    region("Arunachal Pradesh", "Itanagar", 27.0844, 93.6053, 20.0, 6.0, 75.0),
    region("Assam", "Guwahati", 26.2006, 92.9376, 26.0, 8.0, 80.0),
    region("Bihar", "Patna", 25.0961, 85.3131, 28.0, 3.0, 65.0),
    region("Chhattisgarh", "Raipur", 21.2787, 81.8661, 29.0, 2.5, 55.0),
    region("Goa", "Panaji", 15.2993, 74.1240, 28.0, 4.0, 75.0),
    region("Gujarat", "Ahmedabad", 23.0225, 72.5714, 30.0, 1.0, 50.0),
    region("Haryana", "Karnal", 29.0588, 76.0856, 25.0, 2.0, 60.0),
    region("Himachal Pradesh", "Shimla", 31.1048, 77.1734, 15.0, 3.5, 70.0),
    region("Jharkhand", "Ranchi", 23.6102, 85.2799, 27.0, 4.0, 65.0),
    region("Karnataka", "Hubli", 15.3173, 75.7139, 26.0, 2.0, 55.0),
    region("Kerala", "Thrissur", 10.8505, 76.2711, 26.0, 8.2, 85.0),
    region("Madhya Pradesh", "Bhopal", 23.2599, 77.4126, 28.0, 2.5, 55.0),
    region("Maharashtra", "Aurangabad", 19.7515, 75.7139, 28.0, 0.0, 45.0),
    region("Manipur", "Imphal", 24.6637, 93.9063, 22.0, 5.0, 75.0),
    region("Meghalaya", "Shillong", 25.4670, 91.3662, 20.0, 10.0, 85.0),
    region("Mizoram", "Aizawl", 23.1645, 92.9376, 23.0, 7.0, 80.0),
    region("Nagaland", "Kohima", 26.1584, 94.5624, 21.0, 6.5, 78.0),
    region("Odisha", "Bhubaneswar", 20.9517, 85.0985, 29.0, 3.5, 70.0),
    region("Punjab", "Ludhiana", 31.1471, 75.3412, 18.0, 2.5, 65.0),
    region("Rajasthan", "Jaipur", 26.9124, 75.7873, 25.0, 0.5, 40.0),
    region("Sikkim", "Gangtok", 27.5330, 88.5122, 16.0, 8.0, 80.0),
    region("Tamil Nadu", "Coimbatore", 11.0168, 76.9558, 29.0, 2.0, 55.0),
    region("Telangana", "Warangal", 17.1232, 79.2088, 31.0, 1.8, 58.0),
    region("Tripura", "Agartala", 23.9408, 91.9882, 25.0, 6.0, 78.0),
    region("Uttar Pradesh", "Lucknow", 26.8467, 80.9462, 22.0, 3.0, 60.0),
    region("Uttarakhand", "Dehradun", 30.0668, 79.0193, 18.0, 4.0, 68.0),
    region("West Bengal", "Kolkata", 22.5726, 88.3639, 24.0, 5.0, 75.0),
    region("Delhi", "New Delhi", 28.7041, 77.1025, 26.0, 2.0, 58.0),
    region("Jammu and Kashmir", "Srinagar", 34.0837, 74.7973, 12.0, 3.0, 65.0),
    region("Ladakh", "Leh", 34.1526, 77.5771, 8.0, 0.5, 45.0),
    region("Chandigarh", "Chandigarh", 30.7333, 76.7794, 24.0, 2.2, 62.0),
    region("Puducherry", "Puducherry", 11.9416, 79.8083, 28.0, 3.0, 70.0),
    region("Andaman and Nicobar Islands", "Port Blair", 11.7401, 92.6586, 27.0, 8.5, 85.0),
    region("Lakshadweep", "Kavaratti", 10.5667, 72.6417, 29.0, 4.0, 78.0),
    region("Dadra and Nagar Haveli and Daman and Diu", "Daman", 20.1809, 73.0169, 30.0, 1.5, 65.0),
];

/// Looks up a region by name, ignoring ASCII case and surrounding space.
pub fn find_region(name: &str) -> Option<&'static Region> {
    let name = name.trim();
    REGIONS.iter().find(|r| r.name.eq_ignore_ascii_case(name))
}

/// Like [`find_region`] but substitutes the default region for unknown names.
pub fn region_or_default(name: &str) -> &'static Region {
    find_region(name).unwrap_or_else(default_region)
}

pub fn default_region() -> &'static Region {
    REGIONS
        .iter()
        .find(|r| r.name == DEFAULT_REGION)
        .unwrap_or(&REGIONS[0])
}

pub fn region_index(name: &str) -> Option<usize> {
    let name = name.trim();
    REGIONS.iter().position(|r| r.name.eq_ignore_ascii_case(name))
}
