//! Table fluid keys and their backend fluid names.
//!
//! Table keys follow ASHRAE refrigerant numbering (`R-410A`, `R-718`) or
//! short chemical names. CoolProp names most refrigerants without the hyphen
//! (`R410A`), a few fluids only by their common name.

/// Keys whose backend name does not follow the `R-xxx` -> `Rxxx` rule.
pub const SPECIAL_NAMES: [(&str, &str); 8] = [
    ("R-718", "Water"),
    ("R-744", "CO2"),
    ("R-717", "Ammonia"),
    ("NH3", "Ammonia"),
    ("CO2", "CO2"),
    ("Air", "Air"),
    ("N2", "Nitrogen"),
    ("O2", "Oxygen"),
];

/// Map a table key to the backend's fluid name.
///
/// Unknown keys pass through unchanged; whether the backend knows them is
/// only discovered when a state handle is opened.
pub fn backend_name_for_key(key: &str) -> String {
    if let Some((_, name)) = SPECIAL_NAMES.iter().find(|(k, _)| *k == key) {
        return (*name).to_string();
    }

    if let Some(number) = key.strip_prefix("R-") {
        return format!("R{number}");
    }

    key.to_string()
}
