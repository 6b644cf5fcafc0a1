//! Curated local dish names used to bias searches toward regional food.
//! Only India has per-region tables so far.

use crate::plans::dto::MealSlot;
use crate::profiles::dto::{Country, Region};

type Keywords = &'static [&'static str];

const INDIA_VEG_DEFAULT: Keywords = &["dal", "sabzi", "roti"];
const INDIA_NONVEG_DEFAULT: Keywords = &["chicken curry", "rice"];
const GENERIC_VEG: Keywords = &["vegetarian", "healthy", "plant based"];
const GENERIC_NONVEG: Keywords = &["healthy", "protein"];

/// Keyword list for a profile and slot. Never empty.
pub fn regional_keywords(
    country: Option<Country>,
    region: Option<Region>,
    vegetarian: bool,
    slot: MealSlot,
) -> Keywords {
    if country != Some(Country::India) {
        return if vegetarian { GENERIC_VEG } else { GENERIC_NONVEG };
    }
    let table = match region {
        Some(region) if vegetarian => india_veg(region, slot),
        Some(region) => india_nonveg(region, slot),
        None => None,
    };
    match table {
        Some(kws) if !kws.is_empty() => kws,
        _ if vegetarian => INDIA_VEG_DEFAULT,
        _ => INDIA_NONVEG_DEFAULT,
    }
}

fn india_veg(region: Region, slot: MealSlot) -> Option<Keywords> {
    use MealSlot::*;
    let kws: Keywords = match (region, slot) {
        (Region::South, Breakfast) => &[
            "idli", "dosa", "uttapam", "pongal", "upma", "adai", "appam", "paniyaram",
        ],
        (Region::South, Lunch) => &[
            "sambar", "rasam", "curd rice", "vegetable biryani", "avial", "kootu", "thoran",
            "poriyal", "puli kulambu", "lemon rice", "tamarind rice",
        ],
        (Region::South, Snack) => &[
            "murukku", "sundal", "banana bajji", "pakoda", "masala vada", "mangalore bonda",
        ],
        (Region::South, Dinner) => &[
            "chapati with kurma", "vegetable upma", "idiyappam", "vegetable stew",
            "appam with kurma", "vegetable dosa",
        ],
        (Region::North, Breakfast) => &[
            "aloo paratha", "paneer paratha", "poha", "chole bhature", "thepla",
            "besan chilla", "stuffed puri", "upma",
        ],
        (Region::North, Lunch) => &[
            "rajma chawal", "chole chawal", "dal makhani with rice", "baingan bharta",
            "paneer butter masala", "kadhi chawal", "bhindi masala", "methi paratha",
        ],
        (Region::North, Snack) => &[
            "samosa", "kachori", "pakora", "dahi puri", "golgappa", "bread pakora",
        ],
        (Region::North, Dinner) => &[
            "roti with palak paneer", "paneer tikka masala", "dal tadka with jeera rice",
            "veg pulao", "stuffed capsicum", "aloo gobi",
        ],
        (Region::East, Breakfast) => &[
            "luchi aloo dum", "chire doi gur", "pakhala bhata", "sattu paratha",
        ],
        (Region::East, Lunch) => &[
            "shukto", "aloo posto", "dalma", "ghugni", "begun bhaja", "mochar ghonto",
        ],
        (Region::East, Snack) => &["ghugni chaat", "veg chop", "puchka", "telebhaja"],
        (Region::East, Dinner) => &[
            "cholar dal with luchi", "vegetable pulao", "chhana curry with rice",
        ],
        (Region::West, Breakfast) => &[
            "dhokla", "khaman", "thepla", "fafda jalebi", "handvo", "upma",
        ],
        (Region::West, Lunch) => &[
            "dal dhokli", "undhiyu", "sev tamatar", "bajra roti with lasun chutney",
            "vegetable kadhi", "stuffed bhindi", "methi thepla with curd",
        ],
        (Region::West, Snack) => &[
            "pav bhaji", "vada pav", "khandvi", "sev puri", "ragda pattice",
        ],
        (Region::West, Dinner) => &[
            "khichdi with kadhi", "vegetable pulao", "masala puri", "veg handi with roti",
        ],
        _ => return None,
    };
    Some(kws)
}

fn india_nonveg(region: Region, slot: MealSlot) -> Option<Keywords> {
    use MealSlot::*;
    let kws: Keywords = match (region, slot) {
        (Region::South, Breakfast) => &[
            "egg dosa", "chicken dosa", "mutton keema dosa", "egg curry with appam",
        ],
        (Region::South, Lunch) => &[
            "chicken chettinad", "mutton biryani", "fish curry", "meen kuzhambu",
            "prawn thokku", "egg curry", "nethili fry",
        ],
        (Region::South, Snack) => &["chicken pakora", "egg puff", "fish cutlet", "chicken samosa"],
        (Region::South, Dinner) => &[
            "chicken stew with appam", "mutton pepper fry", "egg masala with chapati",
            "fish fry with rasam rice",
        ],
        (Region::North, Breakfast) => &[
            "egg paratha", "keema paratha", "chicken sandwich", "boiled eggs with toast",
        ],
        (Region::North, Lunch) => &[
            "butter chicken", "mutton rogan josh", "chicken curry with rice", "egg curry",
            "chicken biryani", "mutton korma",
        ],
        (Region::North, Snack) => &["chicken tikka", "seekh kebab", "egg roll", "tandoori momos"],
        (Region::North, Dinner) => &[
            "tandoori chicken", "chicken tikka masala", "mutton kebab", "fish curry with rice",
        ],
        (Region::East, Breakfast) => &["egg roll", "chicken momo", "egg chowmein"],
        (Region::East, Lunch) => &[
            "machher jhol", "ilish curry", "mutton curry", "chicken kosha", "prawn malai curry",
        ],
        (Region::East, Snack) => &["fish cutlet", "egg devil", "chicken pakora", "momo with chutney"],
        (Region::East, Dinner) => &["egg curry with rice", "chicken pulao", "fish fry with dal rice"],
        (Region::West, Breakfast) => &["egg bhurji pav", "chicken frankie", "omelette pav"],
        (Region::West, Lunch) => &["chicken handi", "fish curry", "mutton sukka", "egg curry with rice"],
        (Region::West, Snack) => &["chicken frankie roll", "egg puff", "fish fry", "chicken lollipop"],
        (Region::West, Dinner) => &[
            "prawns curry with rice", "chicken kheema pav", "mutton curry with roti",
        ],
        _ => return None,
    };
    Some(kws)
}

#[cfg(test)]
mod keyword_tests {
    use super::*;

    #[test]
    fn india_regions_have_curated_lists() {
        let kws = regional_keywords(Some(Country::India), Some(Region::South), true, MealSlot::Breakfast);
        assert_eq!(kws.first(), Some(&"idli"));
        let kws = regional_keywords(Some(Country::India), Some(Region::North), false, MealSlot::Lunch);
        assert!(kws.contains(&"butter chicken"));
    }

    #[test]
    fn india_without_region_table_uses_staples() {
        for region in [None, Some(Region::Central), Some(Region::NoPreference)] {
            assert_eq!(
                regional_keywords(Some(Country::India), region, true, MealSlot::Snack),
                INDIA_VEG_DEFAULT
            );
            assert_eq!(
                regional_keywords(Some(Country::India), region, false, MealSlot::Snack),
                INDIA_NONVEG_DEFAULT
            );
        }
    }

    #[test]
    fn other_countries_use_generic_keywords() {
        assert_eq!(
            regional_keywords(Some(Country::Japan), Some(Region::North), true, MealSlot::Dinner),
            GENERIC_VEG
        );
        assert_eq!(regional_keywords(None, None, false, MealSlot::Dinner), GENERIC_NONVEG);
    }

    #[test]
    fn every_india_cell_is_populated() {
        for region in [Region::North, Region::South, Region::East, Region::West] {
            for slot in MealSlot::ALL {
                for veg in [true, false] {
                    let kws = if veg { india_veg(region, slot) } else { india_nonveg(region, slot) };
                    assert!(kws.is_some_and(|k| !k.is_empty()), "{region:?} {slot:?} {veg}");
                }
            }
        }
    }
}
