//! Label vocabulary of the dish classifier, in the network's output order.

pub const DISH_LABELS: [&str; 20] = [
    "burger",
    "butter_naan",
    "chai",
    "chapati",
    "chole_bhature",
    "dal_makhani",
    "dhokla",
    "fried_rice",
    "idli",
    "jalebi",
    "kaathi_rolls",
    "kadai_paneer",
    "kulfi",
    "masala_dosa",
    "momos",
    "paani_puri",
    "pakode",
    "pav_bhaji",
    "pizza",
    "samosa",
];

/// Coarse food group for a dish label. Beverages have no group.
pub fn food_group(label: &str) -> Option<&'static str> {
    let group = match label {
        "burger" | "kaathi_rolls" | "momos" => "Meat",
        "butter_naan" | "chapati" | "pav_bhaji" | "pizza" => "Bread",
        "chai" => return None,
        "chole_bhature" | "paani_puri" | "pakode" | "samosa" => "Fried Food",
        "dal_makhani" => "Soup",
        "dhokla" => "Vegetable",
        "fried_rice" | "idli" | "masala_dosa" => "Rice",
        "jalebi" | "kulfi" => "Dessert",
        "kadai_paneer" => "Dairy",
        _ => return None,
    };
    Some(group)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for label in DISH_LABELS {
            assert!(seen.insert(label), "duplicate label {label}");
        }
    }

    #[test]
    fn every_dish_except_beverages_has_a_group() {
        for label in DISH_LABELS {
            if label == "chai" {
                assert_eq!(food_group(label), None);
            } else {
                assert!(food_group(label).is_some(), "no group for {label}");
            }
        }
    }

    #[test]
    fn unknown_labels_have_no_group() {
        assert_eq!(food_group("sushi"), None);
    }
}
